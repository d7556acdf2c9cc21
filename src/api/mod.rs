pub mod batch;
pub mod query;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

use std::time::Duration;

use reqwest::Response;
use serde_json::Value;
use thiserror::Error;
use url::Url;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error (status {status}): {detail}")]
    ApiError { status: u16, detail: String },
    #[error("deserialization error: {0}")]
    Deserialize(String),
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

// ---------------------------------------------------------------------------
// API client
// ---------------------------------------------------------------------------

/// Read-only client for the stats aggregation API.
///
/// Every endpoint returns JSON of a loosely known shape, so responses are
/// decoded into [`serde_json::Value`] and interpreted later by the renderer.
#[derive(Debug, Clone)]
pub struct StatsClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl StatsClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiClientError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "expected an http(s) URL".to_string(),
            });
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET request for an already-resolved path and decode the body.
    pub async fn get_json(&self, path: &str) -> Result<Value, ApiClientError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let resp = self.http_client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Check status and decode the body as JSON.
    async fn handle_response(&self, resp: Response) -> Result<Value, ApiClientError> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiClientError::ApiError {
                status: status.as_u16(),
                detail: body,
            });
        }

        let body = resp.text().await?;
        serde_json::from_str::<Value>(&body)
            .map_err(|e| ApiClientError::Deserialize(format!("{e}: {}", preview(&body))))
    }

    /// Build a full API URL from a path (e.g. "/alice/solved").
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Keep error messages readable when a server answers with an HTML page.
fn preview(body: &str) -> &str {
    match body.char_indices().nth(120) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
