use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::config::Config;
use crate::client::{
    traits::RemoteApi,
    error::ClientError,
    ClientResult,
    Endpoint,
};

/// Pre-authenticated HTTP client for the Outline API.
///
/// Built once at startup and shared by every tool; its configuration never
/// changes afterwards.
#[derive(Debug, Clone)]
pub struct OutlineClient {
    http: reqwest::Client,
    base_url: String,
}

impl OutlineClient {
    /// Create a client from the loaded configuration.
    pub fn new(config: &Config) -> ClientResult<Self> {
        Self::with_base_url(&config.api_url, &config.api_key)
    }

    /// Create a client for an explicit base URL and API key.
    pub fn with_base_url(base_url: &str, api_key: &str) -> ClientResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| ClientError::InvalidCredential(e.to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

#[async_trait::async_trait]
impl RemoteApi for OutlineClient {
    async fn post(&self, endpoint: Endpoint, body: Value) -> ClientResult<Value> {
        tracing::debug!("POST {}", endpoint);

        let response = self.http.post(self.url(endpoint)).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = remote_message(&text)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Best human-readable message from an error body: the `message` field,
/// then the `error` field, then the raw text.
fn remote_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = serde_json::from_str::<Value>(trimmed) {
        for key in ["message", "error"] {
            if let Some(msg) = parsed.get(key).and_then(|v| v.as_str()) {
                if !msg.trim().is_empty() {
                    return Some(msg.to_string());
                }
            }
        }
    }
    Some(trimmed.to_string())
}
