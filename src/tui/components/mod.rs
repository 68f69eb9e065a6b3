//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status bar with user id and status
//! - `Welcome`: greeting and example prompts for an empty transcript
//! - `MessageCard`: one transcript message, including recommendations
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: text input; Enter is held while a request is in flight
//! - `MessageList`: scrollable transcript with height caching and auto-scroll
//!
//! Components receive external data as props (struct fields or constructor
//! arguments), never by reaching into `App`:
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! MessageList::new(&mut tui.message_list, app.transcript.messages(), app.is_loading, frame)
//!
//! // Bad: Hidden dependency on global state
//! MessageList::from_app(&app)
//! ```

pub mod input_box;
pub mod message;
pub mod message_list;
pub mod title_bar;
pub mod welcome;

pub use input_box::{InputBox, InputEvent};
pub use message::MessageCard;
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
pub use welcome::Welcome;
