//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the typing indicator animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or replies.
//!
//! ## Requests
//!
//! Each `Effect::SpawnRequest` becomes one tokio task. The task's result
//! comes back through a std `mpsc` channel as an `Action`. Tasks are never
//! aborted; if the loop has exited, the send fails and the reply is dropped.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::backend::{BackendError, ChatRequest, HttpBackend, RecommendationBackend};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter arrive as its own key;
        // terminals that don't support it ignore the sequence.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the HTTP backend from a resolved config.
pub fn build_backend(config: &ResolvedConfig) -> Result<Arc<dyn RecommendationBackend>, BackendError> {
    let backend = HttpBackend::new(
        config.base_url.clone(),
        Duration::from_secs(config.timeout_secs),
    )?;
    info!("Using backend endpoint {}", backend.endpoint());
    Ok(Arc::new(backend))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend = build_backend(&config).map_err(std::io::Error::other)?;
    let mut app = App::from_config(backend, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        tui.input_box.disabled = app.is_loading;

        if app.is_loading {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 4.0) as usize;
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let timeout = if app.is_loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match handle_tui_event(&mut app, &mut tui, event) {
                Effect::Quit => should_quit = true,
                Effect::SpawnRequest(request) => {
                    spawn_request(app.backend.clone(), request, tx.clone());
                }
                Effect::None => {}
            }
        }

        if should_quit {
            break Ok(());
        }

        // Replies from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if let Effect::SpawnRequest(request) = update(&mut app, action) {
                spawn_request(app.backend.clone(), request, tx.clone());
            }
        }
    };

    ratatui::restore();
    info!(
        "Session ended with {} messages",
        app.transcript.len()
    );
    result
}

/// Routes one terminal event to the component that owns it and returns
/// the effect the loop must carry out.
fn handle_tui_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::Resize => Effect::None,
        TuiEvent::ForceQuit | TuiEvent::Escape => update(app, Action::Quit),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            Effect::None
        }
        // End on an empty prompt jumps the transcript back to the newest message
        TuiEvent::CursorEnd if tui.input_box.buffer.is_empty() => {
            tui.message_list.scroll_to_bottom();
            Effect::None
        }
        _ => match tui.input_box.handle_event(&event) {
            Some(InputEvent::Submit(text)) => {
                let effect = update(app, Action::Submit(text));
                // Later events in the same batch must see the box as busy.
                if matches!(effect, Effect::SpawnRequest(_)) {
                    tui.input_box.disabled = true;
                }
                effect
            }
            _ => Effect::None,
        },
    }
}

fn spawn_request(
    backend: Arc<dyn RecommendationBackend>,
    request: ChatRequest,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning chat request via {} backend", backend.name());
    tokio::spawn(async move {
        let action: Action = backend.chat(&request).await.into();
        if tx.send(action).is_err() {
            warn!("Reply dropped: event loop already exited");
        }
    });
}
