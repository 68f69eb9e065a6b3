use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::backend::Recommendation;
use crate::core::transcript::{Message, Speaker};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Renders one transcript message as a bordered card.
///
/// `MessageCard` is a **transient component**: built fresh each frame from a
/// borrowed [`Message`]. It holds no state.
///
/// Bot replies with recommendations render, below the reply text:
///
/// ```text
/// Mood: sad   Tone: uplifting
///
/// ▸ Feel Good Movie
///   Comedy • ★ 7.5
///   feel-good, family
///   Released 2019
///   Match: 90%
/// ```
#[derive(Clone, Copy)]
pub struct MessageCard<'a> {
    pub message: &'a Message,
}

impl<'a> MessageCard<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    fn accent(speaker: Speaker) -> Style {
        match speaker {
            Speaker::User => Style::default().fg(Color::Green),
            Speaker::Bot => Style::default().fg(Color::Magenta),
        }
    }

    /// Body lines, before wrapping.
    pub fn lines(message: &Message) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = message
            .content
            .trim()
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .collect();

        if let Some(mood) = &message.mood {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled(
                    format!("Mood: {}", mood.mood),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw("   "),
                Span::styled(
                    format!("Tone: {}", mood.tone),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
        }

        if let Some(recs) = &message.recommendations {
            for rec in recs {
                lines.push(Line::default());
                lines.extend(recommendation_lines(rec));
            }
        }

        lines
    }

    /// Predicts the rendered height without rendering, so the message list
    /// can size its scroll canvas up front. Wrapping options mirror
    /// `Paragraph`'s word wrapper.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let body = Self::lines(message)
            .iter()
            .map(|line| {
                let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
                if text.is_empty() {
                    1
                } else {
                    u16::try_from(textwrap::wrap(&text, &options).len())
                        .unwrap_or(u16::MAX)
                        .max(1)
                }
            })
            .fold(0u16, u16::saturating_add);

        body.max(1).saturating_add(VERTICAL_OVERHEAD)
    }
}

fn recommendation_lines(rec: &Recommendation) -> Vec<Line<'static>> {
    let detail = Style::default().fg(Color::Gray);
    let mut lines = vec![Line::from(Span::styled(
        format!("▸ {}", rec.title),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    let genre_rating = match (&rec.genre, rec.rating) {
        (Some(genre), Some(rating)) => Some(format!("{genre} • ★ {rating}")),
        (Some(genre), None) => Some(genre.clone()),
        (None, Some(rating)) => Some(format!("★ {rating}")),
        (None, None) => None,
    };
    if let Some(text) = genre_rating {
        lines.push(Line::from(Span::styled(format!("  {text}"), detail)));
    }

    let blurb = rec
        .tags
        .as_ref()
        .map(|t| t.to_string())
        .or_else(|| rec.description.clone())
        .filter(|s| !s.trim().is_empty());
    if let Some(text) = blurb {
        lines.push(Line::from(Span::styled(
            format!("  {text}"),
            detail.add_modifier(Modifier::ITALIC),
        )));
    }

    if let Some(year) = rec.release_year {
        lines.push(Line::from(Span::styled(format!("  Released {year}"), detail)));
    }

    lines.push(Line::from(Span::styled(
        format!("  Match: {}", rec.match_label()),
        Style::default().fg(Color::Cyan),
    )));
    lines
}

impl<'a> Widget for MessageCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let accent = Self::accent(self.message.speaker);
        let border_style = accent.add_modifier(Modifier::DIM);

        let title = Line::from(vec![
            Span::styled(self.message.speaker.label(), accent.add_modifier(Modifier::BOLD)),
            Span::styled(format!(" · {}", self.message.timestamp), border_style),
        ]);

        let block = Block::bordered()
            .title(title)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Self::lines(self.message))
            .wrap(Wrap { trim: false })
            .render(inner_area, buf);
    }
}

impl<'a> Component for MessageCard<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ChatReply;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(message: &Message, width: u16) -> String {
        let height = MessageCard::calculate_height(message, width);
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                f.render_widget(MessageCard::new(message), area);
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

    fn reply_message() -> Message {
        let reply: ChatReply = serde_json::from_value(serde_json::json!({
            "message": "Here's something for you",
            "extracted_mood": {"mood": "sad", "tone": "uplifting"},
            "recommendations": [{
                "title": "Feel Good Movie",
                "genre": "Comedy",
                "rating": 7.5,
                "tags": "feel-good",
                "release_year": 2019,
                "hybrid_score": 0.9
            }]
        }))
        .unwrap();
        Message::reply(reply)
    }

    #[test]
    fn calculate_height_single_line_user_message() {
        let msg = Message::user("Hello");
        assert_eq!(MessageCard::calculate_height(&msg, 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let msg = Message::user("Hello world");
        assert_eq!(MessageCard::calculate_height(&msg, 0), 1);
        assert_eq!(MessageCard::calculate_height(&msg, HORIZONTAL_OVERHEAD), 1);
    }

    #[test]
    fn calculate_height_wraps_at_width_boundary() {
        let msg = Message::user("Hello world");
        // content_width = 9 - 4 = 5 → "Hello" | "world"
        assert_eq!(MessageCard::calculate_height(&msg, 9), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_counts_recommendation_block() {
        let msg = reply_message();
        // text, blank, mood, blank, title, genre, tags, year, match
        assert_eq!(MessageCard::calculate_height(&msg, 80), 9 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn fallback_has_no_recommendation_block() {
        let msg = Message::fallback();
        let lines = MessageCard::lines(&msg);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn render_reply_shows_mood_tone_and_match() {
        let text = render_to_text(&reply_message(), 60);
        assert!(text.contains("StreamSmart AI"));
        assert!(text.contains("Here's something for you"));
        assert!(text.contains("Mood: sad"));
        assert!(text.contains("Tone: uplifting"));
        assert!(text.contains("Feel Good Movie"));
        assert!(text.contains("Comedy"));
        assert!(text.contains("Released 2019"));
        assert!(text.contains("Match: 90%"));
    }

    #[test]
    fn render_user_message_header() {
        let msg = Message::user("I'm bored");
        let text = render_to_text(&msg, 40);
        assert!(text.contains("You"));
        assert!(text.contains(&msg.timestamp));
        assert!(text.contains("I'm bored"));
    }

    #[test]
    fn recommendation_lines_skip_missing_fields() {
        let rec: Recommendation =
            serde_json::from_str(r#"{"title": "Bare", "hybrid_score": 0.83}"#).unwrap();
        let lines = recommendation_lines(&rec);
        assert_eq!(lines.len(), 2);
        let last: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(last, "  Match: 83%");
    }

    #[test]
    fn description_used_when_tags_missing() {
        let rec: Recommendation =
            serde_json::from_str(r#"{"title": "T", "description": "A quiet drama"}"#).unwrap();
        let lines = recommendation_lines(&rec);
        let blurb: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(blurb, "  A quiet drama");
    }

    #[test]
    fn test_height_of_huge_message_saturates() {
        let message = Message::user("x\n".repeat(70_000));
        assert_eq!(MessageCard::calculate_height(&message, 80), u16::MAX);
    }
}
