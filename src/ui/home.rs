use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::state::{AppState, View};

/// Entries of the home menu, in display order.
pub const MENU: [(View, &str, &str); 2] = [
    (
        View::Quiz,
        "Samvidhaan Quiz",
        "Challenge your knowledge on the Indian Constitution.",
    ),
    (
        View::Chat,
        "Constitution AI Assistant",
        "Ask about fundamental rights, duties, the Preamble and more.",
    ),
];

pub fn draw_home(f: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "The Constitution of India",
            Style::default()
                .fg(Color::Rgb(255, 153, 51))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Learn it, test it, ask about it.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(""),
    ];

    for (i, (_, title, blurb)) in MENU.iter().enumerate() {
        let selected = i == state.home_cursor;
        let marker = if selected { "▶ " } else { "  " };
        let title_style = if selected {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Green)),
            Span::styled(title.to_string(), title_style),
        ]));
        lines.push(Line::from(Span::styled(
            blurb.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Open   [Tab] Switch view",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
