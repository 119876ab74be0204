//! HTTP client wrapper used for archive and image requests.

use std::time::{Duration, Instant};

use reqwest::header::{CACHE_CONTROL, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

const USER_AGENT: &str = "blog-archive/0.3 (+static archive loader)";

/// Browser user agent for impersonate mode.
const IMPERSONATE_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Resolve user agent from config value.
/// - None => default user agent
/// - "impersonate" => real browser user agent
/// - other => custom user agent string
pub fn resolve_user_agent(config: Option<&str>) -> String {
    match config {
        None => USER_AGENT.to_string(),
        Some("impersonate") => IMPERSONATE_USER_AGENT.to_string(),
        Some(custom) => custom.to_string(),
    }
}

/// HTTP client that never serves archive resources from cache.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    /// - None: Use default user agent
    /// - Some("impersonate"): Use a real browser user agent
    /// - Some(custom): Use custom user agent string
    pub fn new(timeout: Duration, user_agent_config: Option<&str>) -> Result<Self, reqwest::Error> {
        let user_agent = resolve_user_agent(user_agent_config);
        let client = Client::builder()
            .user_agent(&user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET request with `Cache-Control: no-store`.
    pub async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
            .send()
            .await?;

        debug!(
            "GET {} -> {} in {}ms",
            url,
            response.status().as_u16(),
            start.elapsed().as_millis()
        );

        Ok(HttpResponse {
            status: response.status(),
            response,
        })
    }
}

/// HTTP response wrapper.
pub struct HttpResponse {
    pub status: StatusCode,
    response: Response,
}

impl HttpResponse {
    /// Check if the response is successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get response body as bytes.
    pub async fn bytes(self) -> Result<Vec<u8>, reqwest::Error> {
        self.response.bytes().await.map(|b| b.to_vec())
    }

    /// Get response body as text.
    pub async fn text(self) -> Result<String, reqwest::Error> {
        self.response.text().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_user_agent_default() {
        let ua = resolve_user_agent(None);
        assert!(ua.contains("blog-archive"));
    }

    #[test]
    fn test_resolve_user_agent_impersonate() {
        let ua = resolve_user_agent(Some("impersonate"));
        assert!(ua.contains("Mozilla"));
        assert!(!ua.contains("blog-archive"));
    }

    #[test]
    fn test_resolve_user_agent_custom() {
        let ua = resolve_user_agent(Some("MyReader/1.0"));
        assert_eq!(ua, "MyReader/1.0");
    }
}
