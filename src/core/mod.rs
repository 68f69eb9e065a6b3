//! # Core Application Logic
//!
//! The chat session's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Transcript (data)    │
//!                    │  • App (state)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │  Backend   │
//!           │  Adapter   │              │   (HTTP)   │
//!           │ (ratatui)  │              │            │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`transcript`]: `Message` and the append-only `Transcript`
//! - [`state`]: The `App` struct, all chat state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod state;
pub mod transcript;
