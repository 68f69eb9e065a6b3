use std::fmt;

use async_trait::async_trait;

use super::types::{ChatReply, ChatRequest};

/// Errors that can occur while talking to the recommendation backend.
///
/// The chat view treats every variant the same way (one fallback message);
/// the split only exists so the log says what actually went wrong.
#[derive(Debug)]
pub enum BackendError {
    /// Client could not be built (bad URL, TLS init failure).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend answered with a non-2xx status.
    Api { status: u16, message: String },
    /// Body was not a valid chat reply.
    Parse(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Config(msg) => write!(f, "config error: {msg}"),
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

#[async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// Returns the name of the backend, for logs.
    fn name(&self) -> &str;

    /// Sends one chat turn and waits for the full reply.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, BackendError>;
}
