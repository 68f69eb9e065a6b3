//! # Actions
//!
//! Everything that can happen in the chat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Backend answers? That's `Action::ReplyReceived(reply)`.
//!
//! `update()` applies an action to the state and returns an `Effect`
//! describing the I/O the caller should perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::backend::{BackendError, ChatReply, ChatRequest};
use crate::core::state::{App, STATUS_READY, STATUS_THINKING};
use crate::core::transcript::Message;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Raw input text from the user.
    Submit(String),
    ReplyReceived(ChatReply),
    /// Request failed. The reason is logged, never displayed.
    RequestFailed(String),
    Quit,
}

/// Side effect requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SpawnRequest(ChatRequest),
    Quit,
}

impl From<Result<ChatReply, BackendError>> for Action {
    fn from(result: Result<ChatReply, BackendError>) -> Self {
        match result {
            Ok(reply) => Action::ReplyReceived(reply),
            Err(e) => Action::RequestFailed(e.to_string()),
        }
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if text.trim().is_empty() {
                return Effect::None;
            }
            if app.is_loading {
                debug!("Submit ignored: request already in flight");
                return Effect::None;
            }

            app.transcript.push(Message::user(text.clone()));
            app.is_loading = true;
            app.status_message = STATUS_THINKING.to_string();

            Effect::SpawnRequest(ChatRequest {
                user_id: app.user_id.clone(),
                message: text,
                top_n: app.top_n,
            })
        }
        Action::ReplyReceived(reply) => {
            info!(
                "Reply received with {} recommendations",
                reply.recommendations.len()
            );
            app.transcript.push(Message::reply(reply));
            app.is_loading = false;
            app.status_message = STATUS_READY.to_string();
            Effect::None
        }
        Action::RequestFailed(reason) => {
            warn!("Chat request failed: {}", reason);
            app.transcript.push(Message::fallback());
            app.is_loading = false;
            app.status_message = STATUS_READY.to_string();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
