use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::chat::SUGGESTIONS;
use crate::model::{Author, ChatMessage};
use crate::state::AppState;
use crate::ui::layout::inner;
use crate::ui::markdown::markdown_to_lines;
use crate::ui::wrap::{text_width, wrap_lines};

struct ChatLayout {
    transcript: Rect,
    suggestions: Option<Rect>,
    input: Rect,
}

fn chat_layout(area: Rect, state: &AppState) -> ChatLayout {
    let suggestion_rows = if state.chat.is_fresh() {
        SUGGESTIONS.len() as u16 + 2
    } else {
        0
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(suggestion_rows),
            Constraint::Length(3),
        ])
        .split(area);
    ChatLayout {
        transcript: rows[0],
        suggestions: (suggestion_rows > 0).then_some(rows[1]),
        input: rows[2],
    }
}

fn author_style(author: Author) -> Style {
    match author {
        Author::User => Style::default()
            .fg(Color::Rgb(255, 153, 51))
            .add_modifier(Modifier::BOLD),
        Author::Assistant => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    }
}

pub fn message_lines(message: &ChatMessage) -> Vec<Line<'static>> {
    let who = match message.author {
        Author::User => "You",
        Author::Assistant => "Constitution Assistant",
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(who, author_style(message.author)),
        Span::styled(
            format!("  {}", message.timestamp.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    match message.author {
        Author::Assistant => lines.extend(markdown_to_lines(&message.text)),
        Author::User => lines.extend(message.text.lines().map(|l| Line::from(l.to_string()))),
    }

    if !message.sources.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Sources: {}", message.sources.join("; ")),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::from(""));
    lines
}

pub fn transcript_lines(state: &AppState) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = state
        .chat
        .messages()
        .iter()
        .flat_map(message_lines)
        .collect();
    if state.chat.is_pending() {
        lines.push(Line::from(Span::styled(
            "Constitution Assistant is typing …",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    lines
}

/// Lines the transcript can be scrolled back from the bottom.
pub fn max_scroll(state: &AppState, area: Rect) -> usize {
    let pane = inner(chat_layout(area, state).transcript);
    wrap_lines(transcript_lines(state), pane.width as usize)
        .len()
        .saturating_sub(pane.height as usize)
}

pub fn draw_chat(f: &mut Frame, area: Rect, state: &AppState) {
    let layout = chat_layout(area, state);

    let pane = inner(layout.transcript);
    let lines = wrap_lines(transcript_lines(state), pane.width as usize);
    let height = pane.height as usize;
    let back = state.chat_scroll.min(lines.len().saturating_sub(height));
    let end = lines.len() - back;
    let start = end.saturating_sub(height);
    let visible: Vec<Line<'static>> = lines[start..end].to_vec();

    let title = if back > 0 {
        format!(" Constitution AI Assistant  (↑{}) ", back)
    } else {
        " Constitution AI Assistant ".to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().fg(Color::Magenta)));
    f.render_widget(Paragraph::new(visible).block(block), layout.transcript);

    if let Some(rect) = layout.suggestions {
        let mut lines = Vec::new();
        for (i, q) in SUGGESTIONS.iter().enumerate() {
            let style = if state.suggestion_cursor == Some(i) {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(Span::styled(format!("  {}", q), style)));
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Suggested questions (↑/↓) ")
            .border_style(Style::default().fg(Color::DarkGray));
        f.render_widget(Paragraph::new(lines).block(block), rect);
    }

    draw_input(f, layout.input, state);
}

fn draw_input(f: &mut Frame, area: Rect, state: &AppState) {
    let pending = state.chat.is_pending();
    let (title, border) = if pending {
        (" Waiting for the answer … ", Color::DarkGray)
    } else {
        (" Ask me anything about the Constitution (Enter to send) ", Color::Blue)
    };

    let width = inner(area).width as usize;
    let chars: Vec<char> = state.chat_input.chars().collect();
    let offset = state.chat_cursor.saturating_sub(width.saturating_sub(1));
    let shown: String = chars.iter().skip(offset).take(width).collect();

    let text_style = if pending {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border));
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(shown, text_style))).block(block),
        area,
    );

    if !pending && !state.has_dialog() {
        let before: String = chars
            .iter()
            .skip(offset)
            .take(state.chat_cursor.saturating_sub(offset))
            .collect();
        let x = (area.x + 1 + text_width(&before) as u16).min(area.right().saturating_sub(2));
        f.set_cursor_position((x, area.y + 1));
    }
}
