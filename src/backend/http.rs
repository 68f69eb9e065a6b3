//! StreamSmart backend over plain HTTP + JSON.
//!
//! One request per chat turn: `POST {base_url}/api/chat`, full JSON body back.
//! No streaming, no auth, no retries.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::provider::{BackendError, RecommendationBackend};
use super::types::{ChatReply, ChatRequest};

pub const CHAT_PATH: &str = "/api/chat";

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Builds a backend for `base_url` with a per-request timeout.
    /// A trailing slash on the base URL is ignored.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, CHAT_PATH)
    }
}

#[async_trait]
impl RecommendationBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, BackendError> {
        info!(
            "Chat request: user_id={}, top_n={}, message_len={}",
            request.user_id,
            request.top_n,
            request.message.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        debug!("Backend response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Backend API error: {} - {}", status, err_body);
            return Err(BackendError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let reply: ChatReply = serde_json::from_str(&body).map_err(|e| {
            warn!("Unparseable backend reply ({} bytes): {}", body.len(), e);
            BackendError::Parse(e.to_string())
        })?;

        info!(
            "Chat reply: {} recommendations, mood={:?}",
            reply.recommendations.len(),
            reply.extracted_mood.as_ref().map(|m| m.mood.as_str())
        );
        Ok(reply)
    }
}
