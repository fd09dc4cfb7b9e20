use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::quiz::QuizPhase;
use crate::review::OptionMark;
use crate::state::AppState;
use crate::ui::layout::inner;
use crate::ui::wrap::wrap_lines;

pub fn mark_style(mark: OptionMark) -> Style {
    match mark {
        OptionMark::Correct => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        OptionMark::WrongSelected => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
        OptionMark::Neutral => Style::default().fg(Color::DarkGray),
    }
}

pub fn review_option_line(text: &str, mark: OptionMark) -> Line<'static> {
    let icon = match mark {
        OptionMark::Correct => "✓",
        OptionMark::WrongSelected => "✗",
        OptionMark::Neutral => " ",
    };
    let style = mark_style(mark);
    Line::from(vec![
        Span::raw("    "),
        Span::styled(format!("{} ", icon), style),
        Span::styled(text.to_string(), style),
    ])
}

/// Score card followed by the per-question review.
pub fn review_lines(state: &AppState) -> Vec<Line<'static>> {
    let QuizPhase::Result { result, .. } = state.quiz.phase() else {
        return Vec::new();
    };
    let (score, total, percent) = state.quiz.score().unwrap_or((0, 0, 0));

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ FINISHED",
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            format!("{}%", percent),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(format!("You got {} / {} correct", score, total)).alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            "[r] Try Again",
            Style::default().fg(Color::Green),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            "ⓘ Performance Summary",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if result.review.is_empty() {
        lines.push(Line::from(Span::styled(
            "  The server did not return a per-question review.",
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    for (idx, item) in result.review.iter().enumerate() {
        let (verdict, verdict_style) = if item.is_correct {
            ("✓", Style::default().fg(Color::Green))
        } else {
            ("✗", Style::default().fg(Color::Red))
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", verdict), verdict_style),
            Span::styled(
                format!("{}. {}", idx + 1, item.question),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        for (option, mark) in item.options.iter().zip(item.marks()) {
            lines.push(review_option_line(option, mark));
        }
        if !item.explanation.is_empty() {
            lines.push(Line::from(Span::styled(
                "    EXPLANATION",
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!("    {}", item.explanation),
                Style::default().fg(Color::LightBlue),
            )));
        }
        lines.push(Line::from(""));
    }

    lines
}

fn wrapped(state: &AppState, area: Rect) -> Vec<Line<'static>> {
    wrap_lines(review_lines(state), inner(area).width as usize)
}

/// Furthest the review can be scrolled inside `area`.
pub fn max_scroll(state: &AppState, area: Rect) -> usize {
    wrapped(state, area)
        .len()
        .saturating_sub(inner(area).height as usize)
}

pub fn draw_result(f: &mut Frame, area: Rect, state: &AppState) {
    let lines = wrapped(state, area);
    let max = lines.len().saturating_sub(inner(area).height as usize);
    let offset = state.review_scroll.min(max);

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .scroll((offset as u16, 0));
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_map_to_colours() {
        let correct = review_option_line("A", OptionMark::Correct);
        let wrong = review_option_line("B", OptionMark::WrongSelected);
        let neutral = review_option_line("C", OptionMark::Neutral);
        assert_eq!(correct.spans[2].style.fg, Some(Color::Green));
        assert_eq!(wrong.spans[2].style.fg, Some(Color::Red));
        assert_eq!(neutral.spans[2].style.fg, Some(Color::DarkGray));
        assert_eq!(correct.spans[1].content, "✓ ");
        assert_eq!(wrong.spans[1].content, "✗ ");
    }
}
