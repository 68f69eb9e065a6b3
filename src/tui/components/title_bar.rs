//! # TitleBar Component
//!
//! Single-line status bar at the top of the screen.
//!
//! Shows, in priority order so narrow terminals keep the important bits:
//!
//! 1. `"StreamSmart (user: user_1) | Thinking... | ↓ New"`
//! 2. `"StreamSmart (user: user_1) | Ready"`
//! 3. `"StreamSmart (user: user_1)"` when the status is empty
//!
//! Stateless: all three fields are props. `user_id` and `status_message`
//! come from `App`, `has_unseen_content` from the message list's scroll state.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub user_id: String,
    pub status_message: String,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(user_id: String, status_message: String, has_unseen_content: bool) -> Self {
        Self {
            user_id,
            status_message,
            has_unseen_content,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "StreamSmart",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" (user: {})", self.user_id)),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        if self.has_unseen_content {
            spans.push(Span::styled(" | ↓ New", Style::default().fg(Color::Yellow)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
