pub mod http;
pub mod provider;
pub mod types;

pub use http::HttpBackend;
pub use provider::{BackendError, RecommendationBackend};
pub use types::{ChatReply, ChatRequest, Mood, Recommendation, Tags, match_percent};
