use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::quiz::QuizPhase;
use crate::state::AppState;

pub fn draw_statusbar(f: &mut Frame, area: Rect, state: &AppState) {
    let quiz_status = match state.quiz.phase() {
        QuizPhase::Idle => Span::styled("quiz: not opened", Style::default().fg(Color::DarkGray)),
        QuizPhase::Loading => Span::styled("quiz: loading…", Style::default().fg(Color::Yellow)),
        QuizPhase::LoadFailed { .. } => {
            Span::styled("quiz: load failed", Style::default().fg(Color::Red))
        }
        QuizPhase::NotStarted { set } => Span::styled(
            format!("quiz: {} questions ready", set.questions.len()),
            Style::default().fg(Color::White),
        ),
        QuizPhase::InProgress { .. } => {
            let (n, total, _) = state.quiz.progress().unwrap_or((0, 0, 0));
            Span::styled(
                format!("quiz: question {}/{}", n, total),
                Style::default().fg(Color::LightBlue),
            )
        }
        QuizPhase::Submitting { .. } => {
            Span::styled("quiz: submitting…", Style::default().fg(Color::Yellow))
        }
        QuizPhase::SubmitFailed { .. } => {
            Span::styled("quiz: submit failed", Style::default().fg(Color::Red))
        }
        QuizPhase::Result { .. } => {
            let (score, total, _) = state.quiz.score().unwrap_or((0, 0, 0));
            Span::styled(
                format!("quiz: scored {}/{}", score, total),
                Style::default().fg(Color::Green),
            )
        }
    };

    let chat_status = if state.chat.is_pending() {
        Span::styled("chat: waiting for answer…", Style::default().fg(Color::Yellow))
    } else {
        let asked = state.chat.messages().iter().filter(|m| m.is_user()).count();
        Span::styled(
            format!("chat: {} asked", asked),
            Style::default().fg(Color::White),
        )
    };

    let line = Line::from(vec![
        Span::raw(" "),
        quiz_status,
        Span::raw("   "),
        chat_status,
        Span::raw("   "),
        Span::styled(
            format!("⇄ {}", state.api_url),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("   "),
        Span::styled("[F1] help", Style::default().fg(Color::DarkGray)),
    ]);

    let widget = Paragraph::new(line).style(Style::default().bg(Color::Rgb(30, 30, 30)));
    f.render_widget(widget, area);
}
