//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! ## Responsibilities
//!
//! - Display every message as a [`MessageCard`]
//! - Show the typing indicator while a request is in flight
//! - Keep the newest message in view after each append
//! - Cache card heights
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the transcript (props).
//! Messages never change after they are appended, so a cached height stays
//! valid until the width changes.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::{Message, Speaker};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageCard;
use crate::tui::event::TuiEvent;

/// Height of the typing indicator card (one line + borders).
pub const TYPING_HEIGHT: u16 = 3;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Transcript length at the last render; a change re-pins to bottom
    pub seen_len: usize,
    /// Cached card heights, by transcript index
    pub heights: Vec<u16>,
    /// Width the cached heights were computed at
    cached_width: u16,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Total canvas height at the last render
    pub content_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            seen_len: 0,
            heights: Vec::new(),
            cached_width: 0,
            viewport_height: 0,
            content_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// True when there is content below the viewport.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.scroll_state.offset().y < self.max_offset()
    }

    pub fn scroll_to_bottom(&mut self) {
        self.stick_to_bottom = true;
        self.scroll_state.scroll_to_bottom();
    }

    /// Re-engage auto-scroll once the user scrolls back down to the end.
    fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Cached card heights plus the typing indicator. Saturates at
    /// `u16::MAX`; anything past it is clipped.
    fn canvas_height(&self, is_loading: bool) -> u16 {
        let typing_height = if is_loading { TYPING_HEIGHT } else { 0 };
        self.heights
            .iter()
            .fold(typing_height, |acc, &h| acc.saturating_add(h))
    }

    /// Bring the height cache in line with the transcript.
    fn sync_heights(&mut self, messages: &[Message], width: u16) {
        if width != self.cached_width || messages.len() < self.heights.len() {
            self.heights.clear();
            self.cached_width = width;
        }
        for message in messages.iter().skip(self.heights.len()) {
            self.heights.push(MessageCard::calculate_height(message, width));
        }
    }
}

/// Placeholder bot card with animated dots.
struct TypingIndicator {
    frame: usize,
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lit = self.frame % 3;
        let dots: Vec<Span> = (0..3)
            .map(|i| {
                let style = if i == lit {
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Span::styled("● ", style)
            })
            .collect();

        let block = Block::bordered()
            .title(Speaker::Bot.label())
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::DIM))
            .padding(Padding::horizontal(1));

        Paragraph::new(Line::from(dots)).block(block).render(area, buf);
    }
}

/// Scrollable transcript view.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [Message],
        is_loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            messages,
            is_loading,
            spinner_frame,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area

        self.state.sync_heights(self.messages, content_width);

        // Every append brings the newest message into view.
        if self.messages.len() != self.state.seen_len {
            self.state.seen_len = self.messages.len();
            self.state.stick_to_bottom = true;
        }

        let total_height = self.state.canvas_height(self.is_loading);

        self.state.viewport_height = area.height;
        self.state.content_height = total_height;

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (message, &height) in self.messages.iter().zip(self.state.heights.iter()) {
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(MessageCard::new(message), rect);
            y_offset = y_offset.saturating_add(height);
        }

        if self.is_loading {
            let rect = Rect::new(0, y_offset, content_width, TYPING_HEIGHT);
            scroll_view.render_widget(
                TypingIndicator {
                    frame: self.spinner_frame,
                },
                rect,
            );
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        } else if self.state.scroll_state.offset().y > self.state.max_offset() {
            let max_y = self.state.max_offset();
            self.state.scroll_state.set_offset(Position { x: 0, y: max_y });
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler lives on `MessageListState` because `MessageList` is rebuilt
/// every frame and cannot hold the scroll position.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut MessageListState, messages: &[Message], loading: bool, h: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(50, h)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                MessageList::new(state, messages, loading, 0).render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn many_messages(n: usize) -> Vec<Message> {
        (0..n).map(|i| Message::user(format!("message number {i}"))).collect()
    }

    #[test]
    fn test_heights_cached_per_message() {
        let mut state = MessageListState::new();
        let messages = many_messages(3);
        draw(&mut state, &messages, false, 20);
        assert_eq!(state.heights, vec![3, 3, 3]);
        assert_eq!(state.content_height, 9);
    }

    #[test]
    fn test_width_change_invalidates_cache() {
        let mut state = MessageListState::new();
        state.sync_heights(&many_messages(2), 40);
        state.heights[0] = 99;
        state.sync_heights(&many_messages(2), 40);
        assert_eq!(state.heights[0], 99);
        state.sync_heights(&many_messages(2), 30);
        assert_eq!(state.heights[0], 3);
    }

    #[test]
    fn test_newest_message_visible_after_append() {
        let mut state = MessageListState::new();
        let mut messages = many_messages(10);
        draw(&mut state, &messages, false, 9);

        // User scrolls away from the bottom...
        state.handle_event(&TuiEvent::ScrollPageUp);
        state.handle_event(&TuiEvent::ScrollPageUp);
        assert!(!state.stick_to_bottom);

        // ...then a reply lands and the view jumps back down.
        messages.push(Message::fallback());
        let text = draw(&mut state, &messages, false, 9);
        assert!(state.stick_to_bottom);
        assert!(text.contains("Sorry, I encountered an error"));
        assert!(!state.has_unseen_content());
    }

    #[test]
    fn test_scroll_up_unpins_without_new_messages() {
        let mut state = MessageListState::new();
        let messages = many_messages(10);
        draw(&mut state, &messages, false, 9);
        state.handle_event(&TuiEvent::ScrollPageUp);
        draw(&mut state, &messages, false, 9);
        assert!(!state.stick_to_bottom);
        assert!(state.has_unseen_content());
    }

    #[test]
    fn test_typing_indicator_only_while_loading() {
        let mut state = MessageListState::new();
        let messages = many_messages(1);
        let text = draw(&mut state, &messages, true, 10);
        assert!(text.contains("StreamSmart AI"));
        assert!(text.contains('●'));
        assert_eq!(state.content_height, 3 + TYPING_HEIGHT);

        let mut state = MessageListState::new();
        let text = draw(&mut state, &messages, false, 10);
        assert!(!text.contains('●'));
    }

    #[test]
    fn test_canvas_height_saturates() {
        let mut state = MessageListState::new();
        state.heights = vec![u16::MAX - 1, 5, 5];
        assert_eq!(state.canvas_height(false), u16::MAX);
        assert_eq!(state.canvas_height(true), u16::MAX);

        state.heights = vec![3, 4];
        assert_eq!(state.canvas_height(true), 7 + TYPING_HEIGHT);
    }
}
