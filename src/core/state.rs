//! # Application State
//!
//! Core chat state. Domain logic only, no TUI types; presentation state
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn RecommendationBackend>  // who answers
//! ├── transcript: Transcript                   // what was said
//! ├── is_loading: bool                         // one request in flight
//! ├── status_message: String                   // title bar text
//! ├── user_id: String                          // sent with every request
//! └── top_n: u32                               // recommendations requested
//! ```
//!
//! Each `App` owns its transcript. Two `App`s never share anything but the
//! backend handle.
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::backend::RecommendationBackend;
use crate::core::config::ResolvedConfig;
use crate::core::transcript::Transcript;

pub const STATUS_READY: &str = "Ready";
pub const STATUS_THINKING: &str = "Thinking...";

pub struct App {
    pub backend: Arc<dyn RecommendationBackend>,
    pub transcript: Transcript,
    pub is_loading: bool,
    pub status_message: String,
    pub user_id: String,
    pub top_n: u32,
}

impl App {
    pub fn new(backend: Arc<dyn RecommendationBackend>, user_id: String, top_n: u32) -> Self {
        Self {
            backend,
            transcript: Transcript::new(),
            is_loading: false,
            status_message: String::from(STATUS_READY),
            user_id,
            top_n,
        }
    }

    pub fn from_config(backend: Arc<dyn RecommendationBackend>, config: &ResolvedConfig) -> Self {
        Self::new(backend, config.user_id.clone(), config.top_n)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Ready");
        assert!(!app.is_loading);
        assert!(app.transcript.is_empty());
        assert_eq!(app.user_id, "user_1");
        assert_eq!(app.top_n, 5);
    }

    #[test]
    fn test_apps_do_not_share_transcripts() {
        let mut a = test_app();
        let b = test_app();
        a.transcript.push(crate::core::transcript::Message::user("hello"));
        assert_eq!(a.transcript.len(), 1);
        assert!(b.transcript.is_empty());
    }
}
