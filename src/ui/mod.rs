pub mod chat;
pub mod dialog;
pub mod home;
pub mod keybar;
pub mod layout;
pub mod markdown;
pub mod quiz;
pub mod result;
pub mod statusbar;
pub mod titlebar;
pub mod wrap;

use ratatui::Frame;

use crate::state::{AppState, View};

pub fn draw(f: &mut Frame, state: &AppState) {
    let area = f.area();
    let layout = layout::compute_layout(area);

    titlebar::draw_titlebar(f, layout.titlebar, state);
    match state.view {
        View::Home => home::draw_home(f, layout.main, state),
        View::Quiz => quiz::draw_quiz(f, layout.main, state),
        View::Chat => chat::draw_chat(f, layout.main, state),
    }
    statusbar::draw_statusbar(f, layout.statusbar, state);
    keybar::draw_keybar(f, layout.keybar, state);

    if state.has_dialog() {
        dialog::draw_dialog(f, area, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use crate::model::{QuestionSet, QuizQuestion};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn home_lists_both_flows() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let state = AppState::new("http://127.0.0.1:8000");
        terminal.draw(|f| draw(f, &state)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Samvidhaan Quiz"));
        assert!(text.contains("Constitution AI Assistant"));
    }

    #[test]
    fn question_screen_shows_progress_and_options() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut state = AppState::new("http://127.0.0.1:8000");
        state.open_view(View::Quiz);
        state.quiz.questions_loaded(
            1,
            QuestionSet {
                quiz_id: "quiz_123".into(),
                questions: vec![QuizQuestion {
                    id: "1".into(),
                    question: "Who chaired the Drafting Committee?".into(),
                    options: vec!["B. R. Ambedkar".into(), "Rajendra Prasad".into()],
                }],
            },
        );
        state.quiz.start();
        terminal.draw(|f| draw(f, &state)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Question 1 of 1"));
        assert!(text.contains("B. R. Ambedkar"));
        assert!(text.contains("Finish Attempt"));
    }
}
