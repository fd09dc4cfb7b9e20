use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::state::{AppState, Dialog};
use crate::ui::layout::centered_rect;

pub fn draw_dialog(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(dialog) = state.top_dialog() else {
        return;
    };

    match dialog {
        Dialog::ConfirmQuit => draw_confirm_quit(f, area, state),
        Dialog::Help => draw_help(f, area),
    }
}

fn draw_confirm_quit(f: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Quit?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if state.quiz.current_question().is_some() {
        lines.push(Line::from("   The quiz in progress will be lost."));
    }
    lines.push(Line::from("   Nothing is saved between sessions."));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("   [Enter] Confirm", Style::default().fg(Color::Green)),
        Span::raw("    "),
        Span::styled("[Esc] Cancel", Style::default().fg(Color::DarkGray)),
    ]));
    lines.push(Line::from(""));

    let rect = centered_rect(42, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, rect);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Key Bindings",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("   Tab/S-Tab  Next/previous view"),
        Line::from("   F1         This help"),
        Line::from("   Ctrl+Q     Quit"),
        Line::from(""),
        Line::from(Span::styled("   Quiz", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("   Enter      Start / continue / finish"),
        Line::from("   a-z, 1-9   Select an option"),
        Line::from("   ↑/↓        Move selection, scroll review"),
        Line::from("   r          Retry after an error, try again"),
        Line::from("   Ctrl+R     Start over after a failed submit"),
        Line::from(""),
        Line::from(Span::styled("   Chat", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("   Enter      Send message"),
        Line::from("   ↑/↓        Suggestions, then scroll"),
        Line::from("   PgUp/PgDn  Scroll a page"),
        Line::from("   Esc        Clear input / close dialog"),
        Line::from(""),
        Line::from(Span::styled(
            "        [Esc] Close",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    let rect = centered_rect(48, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, rect);
}
