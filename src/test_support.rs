//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::{BackendError, ChatReply, ChatRequest, RecommendationBackend};
use crate::core::state::App;

/// A backend that answers every request the same way, without any I/O.
pub struct StaticBackend {
    reply: Option<ChatReply>,
}

impl StaticBackend {
    pub fn replying(reply: ChatReply) -> Self {
        Self { reply: Some(reply) }
    }

    pub fn failing() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl RecommendationBackend for StaticBackend {
    fn name(&self) -> &str {
        "static"
    }

    async fn chat(&self, _request: &ChatRequest) -> Result<ChatReply, BackendError> {
        self.reply
            .clone()
            .ok_or_else(|| BackendError::Network("connection refused".to_string()))
    }
}

/// Creates a test App whose backend always fails.
pub fn test_app() -> App {
    test_app_with(Arc::new(StaticBackend::failing()))
}

pub fn test_app_with(backend: Arc<dyn RecommendationBackend>) -> App {
    App::new(backend, "user_1".to_string(), 5)
}
