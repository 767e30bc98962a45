use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

use super::error::{ExchangeError, ExchangeResult};
use super::models::AccessToken;

/// Moves one serialized request to the exchange and returns the raw reply body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `path` below the API base. A bearer header is added
    /// only for a present, non-empty token.
    async fn post(&self, path: &str, body: String, token: Option<&AccessToken>) -> ExchangeResult<String>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post(&self, path: &str, body: String, token: Option<&AccessToken>) -> ExchangeResult<String> {
        (**self).post(path, body, token).await
    }
}

/// reqwest-backed transport. Idle connections are never kept, so every
/// call opens its own connection.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> ExchangeResult<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ExchangeError::InvalidInput(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ExchangeError::InvalidInput(format!(
                "Base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let http = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| ExchangeError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn map_error(&self, e: reqwest::Error) -> ExchangeError {
        if e.is_timeout() {
            ExchangeError::Timeout(self.timeout)
        } else {
            ExchangeError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, path: &str, body: String, token: Option<&AccessToken>) -> ExchangeResult<String> {
        let url = self.endpoint(path);
        let mut request = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            request = request.bearer_auth(token.as_str());
        }

        let response = request.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status();
        // JSON-RPC errors arrive with 4xx statuses, so the body is returned either way
        let text = response.text().await.map_err(|e| self.map_error(e))?;

        if !status.is_success() {
            debug!("HTTP {} from {}", status, url);
            if text.trim().is_empty() {
                return Err(ExchangeError::Transport(format!("HTTP {} with empty body", status)));
            }
        }

        Ok(text)
    }
}
