use std::marker::PhantomData;

use dioxus::logger::tracing::{debug, warn};
use once_cell::sync::Lazy;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::error::FetchError;
use crate::list::{DataSource, ListRecord};
use crate::shared::types::{CategorySalesDto, Envelope, ErrorBody, ListPage, SalesStatsDto, User};

static CLIENT: Lazy<Client> = Lazy::new(|| {
    let builder = Client::builder();
    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder.connect_timeout(std::time::Duration::from_secs(2));
    builder.build().unwrap_or_default()
});

/// Thin JSON client for the dashboard backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: CLIENT.clone(),
            base_url: config.api_base_url.clone(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send(&self, method: Method, path: &str) -> Result<Response, FetchError> {
        let url = self.url(path);
        debug!("[api] {} {}", method.as_str(), url);
        let res = self
            .client
            .request(method.clone(), &url)
            .header("Cache-Control", "no-store")
            .send()
            .await
            .map_err(|e| {
                warn!("[api] request error on {} {}: {}", method.as_str(), url, e);
                FetchError::transport(e)
            })?;
        if res.status().is_success() {
            return Ok(res);
        }
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        warn!(
            "[api] {} {} failed: status={} body={}",
            method.as_str(),
            url,
            status,
            snippet(&text)
        );
        Err(FetchError::application(
            status.as_u16(),
            failure_message(status.as_u16(), &text),
        ))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let res = self.send(Method::GET, path).await?;
        let status = res.status().as_u16();
        let bytes = res.bytes().await.map_err(FetchError::transport)?;
        decode(status, &bytes)
    }

    pub async fn delete(&self, path: &str) -> Result<(), FetchError> {
        self.send(Method::DELETE, path).await.map(|_| ())
    }

    pub async fn sales_stats(&self) -> Result<SalesStatsDto, FetchError> {
        let envelope: Envelope<SalesStatsDto> = self.get_json("sales/stats").await?;
        unwrap_envelope(envelope)
    }

    pub async fn sales_by_category(&self) -> Result<Vec<CategorySalesDto>, FetchError> {
        let envelope: Envelope<Vec<CategorySalesDto>> = self.get_json("sales/by-category").await?;
        Ok(envelope.data.unwrap_or_default())
    }

    pub fn users(&self) -> RestResource<User> {
        RestResource::new(self.clone(), "users")
    }
}

/// `{message}` of a failure body, or a generic line naming the status.
fn failure_message(status: u16, body: &str) -> String {
    server_message(body).unwrap_or_else(|| format!("request failed with status {}", status))
}

fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

/// Decodes a success body. A body that does not fit `T` but carries a
/// `{message}` (e.g. `{"success": false, "message": ...}` sent with a 200)
/// becomes an application error with that message.
pub(crate) fn decode<T: DeserializeOwned>(status: u16, bytes: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(bytes).map_err(|e| {
        let body = String::from_utf8_lossy(bytes);
        if let Some(message) = server_message(&body) {
            warn!("[api] error payload with status {}: {}", status, snippet(&body));
            return FetchError::application(status, message);
        }
        FetchError::application(
            status,
            format!("malformed response: {} (body: {})", e, snippet(&body)),
        )
    })
}

fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<T, FetchError> {
    match envelope {
        Envelope {
            success: true,
            data: Some(data),
            ..
        } => Ok(data),
        Envelope { message, .. } => Err(FetchError::application(
            200,
            message.unwrap_or_else(|| "request was not successful".into()),
        )),
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(300).collect()
}

/// A paginated REST collection, e.g. `{base}/users?page=1&limit=10`.
#[derive(Debug, Clone)]
pub struct RestResource<R> {
    api: ApiClient,
    path: &'static str,
    _record: PhantomData<R>,
}

impl<R> RestResource<R> {
    pub fn new(api: ApiClient, path: &'static str) -> Self {
        Self {
            api,
            path,
            _record: PhantomData,
        }
    }

    pub fn page_path(&self, page: u32, limit: u32) -> String {
        format!("{}?page={}&limit={}", self.path, page, limit)
    }
}

impl<R: ListRecord + DeserializeOwned> DataSource for RestResource<R> {
    type Record = R;

    async fn fetch_page(&self, page: u32, limit: u32) -> Result<ListPage<R>, FetchError> {
        self.api.get_json(&self.page_path(page, limit)).await
    }

    async fn delete(&self, id: &R::Id) -> Result<(), FetchError> {
        self.api.delete(&format!("{}/{}", self.path, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&AppConfig {
            api_base_url: base.to_string(),
            ..AppConfig::default()
        })
    }

    #[test]
    fn joins_paths_without_double_slashes() {
        assert_eq!(
            client("http://localhost:5000/api/").url("/users"),
            "http://localhost:5000/api/users"
        );
        assert_eq!(
            client("http://localhost:5000/api").url("sales/stats"),
            "http://localhost:5000/api/sales/stats"
        );
    }

    #[test]
    fn builds_page_query() {
        let users = client("http://x").users();
        assert_eq!(users.page_path(3, 10), "users?page=3&limit=10");
    }

    #[test]
    fn malformed_body_is_an_application_error() {
        let err = decode::<ListPage<User>>(200, b"<html>oops</html>").unwrap_err();
        match err {
            FetchError::Application { status, message } => {
                assert_eq!(status, 200);
                assert!(message.starts_with("malformed response"));
                assert!(message.contains("<html>oops</html>"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_payload_with_ok_status_is_not_a_page() {
        let body = br#"{"success": false, "message": "Database unavailable"}"#;
        assert_eq!(
            decode::<ListPage<User>>(200, body),
            Err(FetchError::application(200, "Database unavailable"))
        );
    }

    #[test]
    fn legacy_page_still_decodes() {
        let body = br#"{"empData": [], "currentPage": 1, "totalPages": 1, "totalUsers": 0}"#;
        let page = decode::<ListPage<User>>(200, body).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn failure_message_prefers_server_text() {
        assert_eq!(
            failure_message(404, r#"{"success": false, "message": "User not found"}"#),
            "User not found"
        );
    }

    #[test]
    fn failure_message_falls_back_to_status() {
        assert_eq!(
            failure_message(502, "<html><body>Bad Gateway</body></html>"),
            "request failed with status 502"
        );
        assert_eq!(failure_message(500, ""), "request failed with status 500");
        assert_eq!(
            failure_message(400, r#"{"message": "  "}"#),
            "request failed with status 400"
        );
    }

    #[test]
    fn unsuccessful_envelope_carries_its_message() {
        let env: Envelope<SalesStatsDto> =
            serde_json::from_str(r#"{"success": false, "message": "No sales yet"}"#).unwrap();
        assert_eq!(
            unwrap_envelope(env),
            Err(FetchError::application(200, "No sales yet"))
        );
    }

    #[test]
    fn successful_envelope_yields_data() {
        let env: Envelope<SalesStatsDto> = serde_json::from_str(
            r#"{"success": true, "data": {
                "totalRevenue": "$1,200.00",
                "averageOrderValue": "$40.00",
                "conversionRate": "3.1%",
                "salesGrowth": "12%"
            }}"#,
        )
        .unwrap();
        assert_eq!(unwrap_envelope(env).unwrap().sales_growth, "12%");
    }
}
