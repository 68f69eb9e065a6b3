//! # Welcome Component
//!
//! Shown in place of the message list while the transcript is empty.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const EXAMPLE_PROMPTS: [&str; 3] = [
    "I'm feeling happy and want something funny",
    "Something thrilling for tonight",
    "I'm sad and need a pick-me-up",
];

pub struct Welcome;

impl Welcome {
    fn lines() -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "Welcome to StreamSmart!",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from("Tell me what you're in the mood for, and I'll recommend something great."),
            Line::default(),
        ];
        lines.extend(EXAMPLE_PROMPTS.iter().map(|p| {
            Line::from(Span::styled(
                format!("\"{p}\""),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))
        }));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }
}

impl Component for Welcome {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = Self::lines();
        let [centered] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_welcome_lists_examples() {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                Welcome.render(f, area);
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();

        assert!(text.contains("Welcome to StreamSmart!"));
        for prompt in EXAMPLE_PROMPTS {
            assert!(text.contains(prompt));
        }
    }
}
