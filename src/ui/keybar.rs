use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::quiz::QuizPhase;
use crate::state::{AppState, View};

pub fn bindings(state: &AppState) -> Vec<(&'static str, &'static str)> {
    let mut bindings: Vec<(&str, &str)> = match state.view {
        View::Home => vec![("↑/↓", "choose"), ("Enter", "open")],
        View::Quiz => match state.quiz.phase() {
            QuizPhase::Idle | QuizPhase::Loading | QuizPhase::Submitting { .. } => vec![],
            QuizPhase::LoadFailed { .. } => vec![("r", "retry")],
            QuizPhase::NotStarted { .. } => vec![("Enter", "start quiz")],
            QuizPhase::InProgress { .. } => {
                let next = if state.quiz.is_last_question() {
                    "finish attempt"
                } else {
                    "continue"
                };
                vec![("a-z", "answer"), ("↑/↓", "select"), ("Enter", next)]
            }
            QuizPhase::SubmitFailed { .. } => vec![("r", "retry submit"), ("Ctrl+R", "start over")],
            QuizPhase::Result { .. } => vec![("↑/↓", "scroll"), ("r", "try again")],
        },
        View::Chat => {
            if state.chat.is_fresh() {
                vec![("Enter", "send"), ("↑/↓", "suggestions")]
            } else {
                vec![("Enter", "send"), ("↑/↓", "scroll")]
            }
        }
    };
    bindings.push(("Tab", "switch view"));
    bindings.push(("Ctrl+Q", "quit"));
    bindings
}

pub fn draw_keybar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, action)) in bindings(state).iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(widget, area);
}
