use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;

use super::store::TokenStore;
use crate::config::SessionConfig;

/// HTTP client for the production API that attaches the current bearer
/// credential to every request.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(config: &SessionConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent("SpeakeasyDev/1.0")
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    /// Build a request with the freshest stored token attached as a bearer
    /// header. The token is re-read from storage on every call so a login or
    /// logout elsewhere in the app takes effect immediately; a missing token
    /// just omits the header instead of failing closed.
    pub async fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.store.load().await? {
            builder = builder.bearer_auth(token);
        }

        Ok(builder)
    }

    pub async fn get(&self, path: &str) -> Result<reqwest::RequestBuilder> {
        self.request(Method::GET, path).await
    }

    pub async fn post(&self, path: &str) -> Result<reqwest::RequestBuilder> {
        self.request(Method::POST, path).await
    }
}
