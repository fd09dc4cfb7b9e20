use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::{AppState, View};

pub fn draw_titlebar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![Span::styled(
        " ⚖ Samvidhan ",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];

    for view in View::ALL {
        spans.push(Span::raw(" "));
        let label = format!(" {} ", view.title());
        if view == state.view {
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Rgb(255, 153, 51))
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, Style::default().fg(Color::Gray)));
        }
    }

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    f.render_widget(widget, area);
}
