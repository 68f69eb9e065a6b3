use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, TitleBar, Welcome};

/// Draws one frame: title bar, transcript (or welcome screen), input box.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    if app.transcript.is_empty() && !app.is_loading {
        Welcome.render(frame, main_area);
    } else {
        MessageList::new(
            &mut tui.message_list,
            app.transcript.messages(),
            app.is_loading,
            spinner_frame,
        )
        .render(frame, main_area);
    }

    TitleBar::new(
        app.user_id.clone(),
        app.status_message.clone(),
        tui.message_list.has_unseen_content(),
    )
    .render(frame, title_area);

    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_empty_session_shows_welcome() {
        let app = test_app();
        let mut tui = TuiState::new();
        let text = screen(&app, &mut tui);
        assert!(text.contains("Welcome to StreamSmart!"));
        assert!(text.contains("Ready"));
    }

    #[test]
    fn test_loading_shows_user_message_and_typing_indicator() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        update(&mut app, Action::Submit("Something thrilling for tonight".into()));
        tui.input_box.disabled = app.is_loading;

        let text = screen(&app, &mut tui);
        assert!(text.contains("Something thrilling for tonight"));
        assert!(text.contains("Thinking..."));
        assert!(text.contains('●'));
        assert!(text.contains("Finding something for you..."));
    }

    #[test]
    fn test_failure_renders_fallback() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        update(&mut app, Action::Submit("hi".into()));
        update(&mut app, Action::RequestFailed("timeout".into()));

        let text = screen(&app, &mut tui);
        assert!(text.contains("Sorry, I encountered an error. Please try again!"));
        assert!(!text.contains('●'));
    }
}
