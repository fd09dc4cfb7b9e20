use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use crate::model::QuestionSet;
use crate::quiz::QuizPhase;
use crate::state::AppState;
use crate::ui::layout::{centered_rect, inner};
use crate::ui::result;

pub fn draw_quiz(f: &mut Frame, area: Rect, state: &AppState) {
    match state.quiz.phase() {
        QuizPhase::Idle | QuizPhase::Loading => draw_notice(
            f,
            area,
            "Loading Quiz Data...",
            Color::Yellow,
            vec![Line::from("Fetching questions from the server.")],
        ),
        QuizPhase::LoadFailed { error } => draw_notice(
            f,
            area,
            "✗  Could not load the quiz",
            Color::Red,
            vec![
                Line::from(error.clone()),
                Line::from(""),
                Line::from(Span::styled(
                    "[r] Retry",
                    Style::default().fg(Color::Green),
                )),
            ],
        ),
        QuizPhase::NotStarted { set } => draw_start(f, area, set),
        QuizPhase::InProgress { .. } => draw_question(f, area, state),
        QuizPhase::Submitting { submission, .. } => draw_notice(
            f,
            area,
            "Submitting...",
            Color::Yellow,
            vec![Line::from(format!(
                "Sending {} answers for scoring.",
                submission.answers.len()
            ))],
        ),
        QuizPhase::SubmitFailed { error, .. } => draw_notice(
            f,
            area,
            "⚠  Submission Failed",
            Color::Red,
            vec![
                Line::from(error.clone()),
                Line::from("Your answers are kept; nothing was scored yet."),
                Line::from(""),
                Line::from(vec![
                    Span::styled("[r] Retry submission", Style::default().fg(Color::Green)),
                    Span::raw("    "),
                    Span::styled("[Ctrl+R] Start over", Style::default().fg(Color::DarkGray)),
                ]),
            ],
        ),
        QuizPhase::Result { .. } => result::draw_result(f, area, state),
    }
}

fn draw_notice(f: &mut Frame, area: Rect, title: &str, color: Color, body: Vec<Line<'static>>) {
    let mut lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(body);
    lines.push(Line::from(""));

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn draw_start(f: &mut Frame, area: Rect, set: &QuestionSet) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("🏆", Style::default())),
        Line::from(""),
        Line::from(Span::styled(
            "Samvidhaan Quiz",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Challenge your knowledge on the Indian Constitution.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(format!("{} questions", set.questions.len())),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Start Quiz",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let rect = centered_rect(60, lines.len() as u16 + 2, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, rect);
}

/// One answer option: lettered badge plus text, highlighted when selected.
pub fn option_line(index: usize, text: &str, selected: bool) -> Line<'static> {
    let letter = if index < 26 {
        (b'A' + index as u8) as char
    } else {
        '?'
    };
    if selected {
        Line::from(vec![
            Span::styled(
                format!(" {} ", letter),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                text.to_string(),
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled(format!(" {} ", letter), Style::default().fg(Color::DarkGray)),
            Span::raw(" "),
            Span::styled(text.to_string(), Style::default().fg(Color::Gray)),
        ])
    }
}

fn draw_question(f: &mut Frame, area: Rect, state: &AppState) {
    let (Some(question), Some((number, total, percent))) =
        (state.quiz.current_question(), state.quiz.progress())
    else {
        return;
    };
    let selected = state.quiz.selected();

    let block = Block::default().borders(Borders::ALL);
    f.render_widget(block, area);
    let body = inner(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // progress label
            Constraint::Length(1), // gauge
            Constraint::Min(1),    // question card
        ])
        .split(body);

    let label = format!(" Question {} of {}", number, total);
    let pct = format!("{}% ", percent);
    let pad = (rows[0].width as usize).saturating_sub(label.chars().count() + pct.len());
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(label, Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(pad)),
            Span::styled(pct, Style::default().fg(Color::Gray)),
        ])),
        rows[0],
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue).bg(Color::Rgb(40, 40, 40)))
        .ratio(number as f64 / total.max(1) as f64)
        .label("");
    f.render_widget(gauge, rows[1]);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            question.question.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (i, option) in question.options.iter().enumerate() {
        lines.push(option_line(i, option, selected == Some(i)));
    }
    lines.push(Line::from(""));

    let action = if state.quiz.is_last_question() {
        "Finish Attempt ›"
    } else {
        "Continue ›"
    };
    let button_style = if selected.is_some() {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(vec![
        Span::styled(format!(" [Enter] {} ", action), button_style),
    ]));

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(widget, rows[2]);
}
