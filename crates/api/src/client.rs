//! HTTP client for the Glean REST API.
//!
//! One POST route per operation (`/search`, `/chat`), bearer-token auth, and
//! an optional impersonation header. Responses come back as raw JSON; non-2xx
//! statuses are classified into a [`GleanError`] using the parsed body.

use crate::config::GleanConfig;
use crate::error::GleanError;
use crate::types::{ChatRequest, SearchRequest};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Impersonation header honored when the token has global scope.
const ACT_AS_HEADER: &str = "X-Scio-Actas";

/// The two upstream operations the tool layer depends on.
///
/// Held as a trait object so tests can substitute a stub for the network.
#[async_trait]
pub trait GleanApi: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Value, GleanError>;
    async fn chat(&self, request: &ChatRequest) -> Result<Value, GleanError>;
}

pub struct GleanClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
    act_as: Option<String>,
}

impl GleanClient {
    pub fn new(config: &GleanConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url(),
            api_token: config.api_token.clone(),
            act_as: config.act_as.clone(),
        }
    }

    /// Override the endpoint base (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Value, GleanError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut request = self.http.post(&url).bearer_auth(&self.api_token).json(body);
        if let Some(act_as) = &self.act_as {
            request = request.header(ACT_AS_HEADER, act_as);
        }

        let response = request.send().await.map_err(GleanError::from_transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(GleanError::from_transport)?;
        // Error bodies are not guaranteed to be JSON; classification copes
        // with a null payload.
        let payload: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(GleanError::classify(status.as_u16(), &payload));
        }
        Ok(payload)
    }
}

#[async_trait]
impl GleanApi for GleanClient {
    async fn search(&self, request: &SearchRequest) -> Result<Value, GleanError> {
        log::debug!("POST /search query={:?}", request.query);
        self.post("search", request).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<Value, GleanError> {
        log::debug!("POST /chat messages={}", request.messages.len());
        self.post("chat", request).await
    }
}
