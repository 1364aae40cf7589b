//! Plivo client adapter
//!
//! Holds the authenticated handle to the Plivo call-placement API behind
//! the `CallProvider` trait so handlers can run against a test double.
//! Provider errors propagate unchanged; no retries, no circuit breaking.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of adapter operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Adapter errors
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Plivo API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Parameters for one call placement attempt
#[derive(Debug, Clone, Serialize)]
pub struct PlaceCallRequest {
    pub from: String,
    pub to: String,
    pub answer_url: String,
    pub answer_method: String,
}

/// Identifiers the provider returns for a placed call
#[derive(Debug, Clone, Deserialize)]
pub struct PlacedCall {
    pub request_uuid: String,
    pub api_id: String,
    #[serde(default)]
    pub message: String,
}

/// Trait the call-placement backend must implement
#[async_trait]
pub trait CallProvider: Send + Sync {
    /// Place a call from `from` to `to`, answered at `answer_url`.
    async fn place_call(&self, request: &PlaceCallRequest) -> ProviderResult<PlacedCall>;
}

const PLIVO_API_BASE: &str = "https://api.plivo.com";

/// Plivo REST API client
pub struct PlivoClient {
    auth_id: String,
    auth_token: String,
    api_base: String,
    http_client: reqwest::Client,
}

impl PlivoClient {
    pub fn new(auth_id: &str, auth_token: &str) -> Self {
        Self {
            auth_id: auth_id.to_string(),
            auth_token: auth_token.to_string(),
            api_base: PLIVO_API_BASE.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Point the client at a different API host (local test servers).
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl CallProvider for PlivoClient {
    async fn place_call(&self, request: &PlaceCallRequest) -> ProviderResult<PlacedCall> {
        let url = format!("{}/v1/Account/{}/Call/", self.api_base, self.auth_id);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.auth_id, Some(&self.auth_token))
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body["error"]
                .as_str()
                .or_else(|| body["message"].as_str())
                .unwrap_or("call placement rejected")
                .to_string();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<PlacedCall>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}
