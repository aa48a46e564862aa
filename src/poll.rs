//! Cancellable fixed-interval refresh.

use std::future::Future;
use std::time::Duration;

use futures::future::{AbortHandle, Abortable};

use crate::utils::time::sleep;

/// Stops the task returned by [`periodic`]. Cloning shares the same task.
#[derive(Debug, Clone)]
pub struct PollHandle {
    abort: AbortHandle,
}

impl PollHandle {
    pub fn stop(&self) {
        self.abort.abort();
    }

    pub fn is_stopped(&self) -> bool {
        self.abort.is_aborted()
    }
}

/// Runs `job` now and then every `every`, until the handle is stopped.
///
/// The returned future has to be spawned by the caller (a component's
/// `spawn`, or a test runtime). A run is always awaited before the next sleep
/// starts, so runs never overlap.
pub fn periodic<F, Fut>(every: Duration, mut job: F) -> (impl Future<Output = ()>, PollHandle)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let (abort, registration) = AbortHandle::new_pair();
    let ticking = async move {
        loop {
            job().await;
            sleep(every).await;
        }
    };
    let task = Abortable::new(ticking, registration);
    let run = async move {
        let _ = task.await;
    };
    (run, PollHandle { abort })
}
