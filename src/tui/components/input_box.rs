//! # InputBox Component
//!
//! Free-text prompt where the user says what they are in the mood for.
//!
//! ## Responsibilities
//!
//! - Capture and edit text (insert, paste, backspace, delete, cursor movement)
//! - Emit `Submit` on Enter and clear itself
//! - Hold Enter while `disabled` (a request is in flight); editing still works
//!
//! The buffer and cursor are internal state. `disabled` is a prop synced
//! from `App::is_loading` every frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Border (2) + padding (2) consumed horizontally by the bordered block
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to content (border + left padding)
const CONTENT_OFFSET: u16 = 2;

const PLACEHOLDER: &str = "Tell me what you're in the mood for...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed). Buffer is already cleared.
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// True while waiting on the backend (Prop)
    pub disabled: bool,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Wraps each logical line separately so blank lines and a trailing newline
/// each keep a visual row.
fn wrapped_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    text.split('\n')
        .flat_map(|logical| {
            if logical.is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(logical, wrap_options(width))
                    .into_iter()
                    .map(|l| l.into_owned())
                    .collect()
            }
        })
        .collect()
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            cursor: 0,
        }
    }

    /// Height for the current buffer, clamped to
    /// `[1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD]`.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let width = area_width.saturating_sub(HORIZONTAL_OVERHEAD);
        let lines = u16::try_from(wrapped_lines(&self.buffer, width).len()).unwrap_or(u16::MAX);
        lines.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// (row, column) of the cursor within the wrapped text.
    fn cursor_row_col(&self, width: u16) -> (u16, u16) {
        let before = wrapped_lines(&self.buffer[..self.cursor], width);
        let row = u16::try_from(before.len().saturating_sub(1)).unwrap_or(u16::MAX);

        // textwrap trims trailing spaces, so measure the tail of the logical line instead.
        let logical_start = self.buffer[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let logical = &self.buffer[logical_start..self.cursor];
        let segments = wrapped_lines(logical, width);
        let consumed: usize = segments
            .iter()
            .take(segments.len().saturating_sub(1))
            .map(|s| s.width())
            .sum();
        let col = u16::try_from(logical.width().saturating_sub(consumed)).unwrap_or(u16::MAX);

        (row, col.min(width.saturating_sub(1)))
    }

    fn handle_edit(&mut self, event: &TuiEvent) -> Option<InputEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft if self.cursor > 0 => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorRight if self.cursor < self.buffer.len() => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);

        let (title, border_style) = if self.disabled {
            (
                " Finding something for you... ",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (" Message (Enter to send) ", Style::default().fg(Color::Green))
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title)
            .padding(ratatui::widgets::Padding::horizontal(1));

        if self.buffer.is_empty() {
            let placeholder = Paragraph::new(PLACEHOLDER)
                .block(block)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
            frame.render_widget(placeholder, area);
            frame.set_cursor_position((area.x + CONTENT_OFFSET, area.y + 1));
            return;
        }

        let lines = wrapped_lines(&self.buffer, width);
        let (row, col) = self.cursor_row_col(width);
        let scroll = row.saturating_sub(MAX_VISIBLE_LINES - 1);
        let visible = lines
            .iter()
            .skip(scroll as usize)
            .take(MAX_VISIBLE_LINES as usize)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");

        let text_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green)
        };
        frame.render_widget(Paragraph::new(visible).block(block).style(text_style), area);

        frame.set_cursor_position((
            area.x + CONTENT_OFFSET + col,
            area.y + 1 + row - scroll,
        ));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    /// While disabled the buffer stays editable but Enter is swallowed,
    /// so text typed during a request waits for the next send.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled && *event == TuiEvent::Submit {
            return None;
        }
        self.handle_edit(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(input: &mut InputBox, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                input.render(f, area);
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

    #[test]
    fn test_typing_and_backspace() {
        let mut input = InputBox::new();
        assert_eq!(input.handle_event(&TuiEvent::InputChar('a')), Some(InputEvent::ContentChanged));
        input.handle_event(&TuiEvent::InputChar('é'));
        assert_eq!(input.buffer, "aé");
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "a");
        assert_eq!(input.handle_event(&TuiEvent::CursorLeft), Some(InputEvent::ContentChanged));
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_submit_clears_buffer() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("something funny".into()));
        match input.handle_event(&TuiEvent::Submit) {
            Some(InputEvent::Submit(text)) => assert_eq!(text, "something funny"),
            other => panic!("Expected Submit event, got {other:?}"),
        }
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_whitespace_submit_is_ignored() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("  \n ".into()));
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "  \n ");
    }

    #[test]
    fn test_disabled_keeps_text_but_blocks_submit() {
        let mut input = InputBox::new();
        input.disabled = true;
        input.handle_event(&TuiEvent::Paste("queued".into()));
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(
            input.handle_event(&TuiEvent::InputChar('!')),
            Some(InputEvent::ContentChanged)
        );
        assert_eq!(input.buffer, "queued!");

        input.disabled = false;
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("queued!".into()))
        );
    }

    #[test]
    fn test_height_of_huge_buffer_is_clamped() {
        let mut input = InputBox::new();
        input.buffer = "x\n".repeat(70_000);
        assert_eq!(input.calculate_height(80), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_home_end_delete() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("abc".into()));
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "bc");
        assert_eq!(input.handle_event(&TuiEvent::CursorEnd), Some(InputEvent::ContentChanged));
        assert_eq!(input.handle_event(&TuiEvent::CursorEnd), None);
    }

    #[test]
    fn test_height_grows_then_caps() {
        let mut input = InputBox::new();
        assert_eq!(input.calculate_height(40), 3);
        input.buffer = "one\ntwo\nthree".into();
        assert_eq!(input.calculate_height(40), 5);
        input.buffer = "1\n2\n3\n4\n5\n6\n7\n8".into();
        assert_eq!(input.calculate_height(40), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_trailing_newline_gets_its_own_row() {
        assert_eq!(wrapped_lines("abc\n", 10), vec!["abc".to_string(), String::new()]);
    }

    #[test]
    fn test_render_placeholder_and_disabled_title() {
        let mut input = InputBox::new();
        let text = screen_text(&mut input, 60, 3);
        assert!(text.contains("Tell me what you're in the mood for..."));

        input.disabled = true;
        let text = screen_text(&mut input, 60, 3);
        assert!(text.contains("Finding something for you..."));
    }
}
