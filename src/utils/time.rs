use std::time::Duration;

#[cfg(feature = "web")]
pub async fn sleep(d: Duration) {
    gloo_timers::future::sleep(d).await
}

#[cfg(not(feature = "web"))]
pub async fn sleep(d: Duration) {
    tokio::time::sleep(d).await
}
