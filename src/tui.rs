use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::Rect;
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::api::Backend;
use crate::quiz::{QuizEffect, QuizPhase};
use crate::state::*;
use crate::ui;
use crate::ui::home::MENU;
use crate::worker::{self, ApiEvent};

const SCROLL_PAGE: usize = 10;

/// Starts requests on behalf of key handlers.
pub struct Dispatcher {
    backend: Arc<dyn Backend>,
    tx: mpsc::Sender<ApiEvent>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn Backend>, tx: mpsc::Sender<ApiEvent>) -> Self {
        Self { backend, tx }
    }

    pub fn quiz(&self, effect: Option<QuizEffect>) {
        if let Some(effect) = effect {
            debug!(?effect, "dispatching quiz request");
            worker::run_quiz_effect(effect, &self.backend, &self.tx);
        }
    }

    pub fn chat(&self, query: Option<String>) {
        if let Some(query) = query {
            worker::run_chat_query(query, &self.backend, &self.tx);
        }
    }
}

pub fn run_tui(mut state: AppState, backend: Arc<dyn Backend>, start: View) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let (tx, rx) = mpsc::channel::<ApiEvent>();
    let dispatcher = Dispatcher::new(backend, tx);
    dispatcher.quiz(state.open_view(start));
    info!(view = ?start, "terminal UI started");

    let result = main_loop(&mut terminal, &mut state, &rx, &dispatcher);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture).ok();
    terminal.show_cursor().ok();

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    rx: &mpsc::Receiver<ApiEvent>,
    dispatcher: &Dispatcher,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, state))?;

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            let size = terminal.size()?;
            let area = Rect::new(0, 0, size.width, size.height);
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    handle_key(key, state, area, dispatcher);
                }
                Event::Mouse(mouse) => handle_mouse(mouse, state, area),
                _ => {}
            }
        }

        while let Ok(ev) = rx.try_recv() {
            state.apply_api_event(ev);
        }
    }

    info!("terminal UI closed");
    Ok(())
}

/// Area the current view is drawn in, for scroll limits.
fn main_area(area: Rect) -> Rect {
    ui::layout::compute_layout(area).main
}

pub fn handle_key(key: KeyEvent, state: &mut AppState, area: Rect, dispatcher: &Dispatcher) {
    if state.has_dialog() {
        handle_dialog_key(key, state);
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') if ctrl => {
            state.push_dialog(Dialog::ConfirmQuit);
            return;
        }
        KeyCode::Char('c') if ctrl => {
            state.should_quit = true;
            return;
        }
        KeyCode::F(1) => {
            state.push_dialog(Dialog::Help);
            return;
        }
        KeyCode::Tab => {
            dispatcher.quiz(state.cycle_view(true));
            return;
        }
        KeyCode::BackTab => {
            dispatcher.quiz(state.cycle_view(false));
            return;
        }
        _ => {}
    }

    match state.view {
        View::Home => handle_home_key(key, state, dispatcher),
        View::Quiz => handle_quiz_key(key, state, area, dispatcher),
        View::Chat => handle_chat_key(key, state, area, dispatcher),
    }
}

fn handle_home_key(key: KeyEvent, state: &mut AppState, dispatcher: &Dispatcher) {
    match key.code {
        KeyCode::Up => state.home_cursor = state.home_cursor.saturating_sub(1),
        KeyCode::Down => state.home_cursor = (state.home_cursor + 1).min(MENU.len() - 1),
        KeyCode::Enter => {
            if let Some((view, _, _)) = MENU.get(state.home_cursor) {
                dispatcher.quiz(state.open_view(*view));
            }
        }
        _ => {}
    }
}

fn handle_quiz_key(key: KeyEvent, state: &mut AppState, area: Rect, dispatcher: &Dispatcher) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match state.quiz.phase() {
        QuizPhase::Idle | QuizPhase::Loading | QuizPhase::Submitting { .. } => {}
        QuizPhase::LoadFailed { .. } => {
            if key.code == KeyCode::Char('r') {
                dispatcher.quiz(state.quiz.retry());
            }
        }
        QuizPhase::NotStarted { .. } => {
            if key.code == KeyCode::Enter {
                state.quiz.start();
            }
        }
        QuizPhase::InProgress { .. } => match key.code {
            KeyCode::Enter => dispatcher.quiz(state.quiz.advance()),
            KeyCode::Up => state.quiz.move_selection(false),
            KeyCode::Down => state.quiz.move_selection(true),
            KeyCode::Char(c) if c.is_ascii_lowercase() && !ctrl => {
                state.quiz.select((c as u8 - b'a') as usize);
            }
            KeyCode::Char(c) if ('1'..='9').contains(&c) => {
                state.quiz.select((c as u8 - b'1') as usize);
            }
            _ => {}
        },
        QuizPhase::SubmitFailed { .. } => match key.code {
            KeyCode::Char('r') if ctrl => dispatcher.quiz(state.restart_quiz()),
            KeyCode::Char('r') => dispatcher.quiz(state.quiz.retry()),
            _ => {}
        },
        QuizPhase::Result { .. } => {
            let max = ui::result::max_scroll(state, main_area(area));
            match key.code {
                KeyCode::Char('r') => dispatcher.quiz(state.restart_quiz()),
                KeyCode::Up => state.review_scroll = state.review_scroll.saturating_sub(1),
                KeyCode::Down => state.review_scroll = (state.review_scroll + 1).min(max),
                KeyCode::PageUp => {
                    state.review_scroll = state.review_scroll.saturating_sub(SCROLL_PAGE)
                }
                KeyCode::PageDown => {
                    state.review_scroll = (state.review_scroll + SCROLL_PAGE).min(max)
                }
                KeyCode::Home => state.review_scroll = 0,
                KeyCode::End => state.review_scroll = max,
                _ => {}
            }
        }
    }
}

fn handle_chat_key(key: KeyEvent, state: &mut AppState, area: Rect, dispatcher: &Dispatcher) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => dispatcher.chat(state.send_chat()),
        KeyCode::Char(c) if !ctrl => state.insert_char(c),
        KeyCode::Backspace => state.backspace(),
        KeyCode::Delete => state.delete(),
        KeyCode::Left => state.cursor_left(),
        KeyCode::Right => state.cursor_right(),
        KeyCode::Home => state.cursor_home(),
        KeyCode::End => state.cursor_end(),
        KeyCode::Esc => state.clear_input(),
        KeyCode::Up | KeyCode::Down if state.chat.is_fresh() => {
            state.cycle_suggestion(key.code == KeyCode::Down);
        }
        KeyCode::Up => scroll_chat(state, area, 1, true),
        KeyCode::Down => scroll_chat(state, area, 1, false),
        KeyCode::PageUp => scroll_chat(state, area, SCROLL_PAGE, true),
        KeyCode::PageDown => scroll_chat(state, area, SCROLL_PAGE, false),
        _ => {}
    }
}

fn scroll_chat(state: &mut AppState, area: Rect, by: usize, back: bool) {
    if back {
        let max = ui::chat::max_scroll(state, main_area(area));
        state.chat_scroll = (state.chat_scroll + by).min(max);
    } else {
        state.chat_scroll = state.chat_scroll.saturating_sub(by);
    }
}

fn handle_dialog_key(key: KeyEvent, state: &mut AppState) {
    let dialog = state.top_dialog().cloned();
    match dialog {
        Some(Dialog::ConfirmQuit) => match key.code {
            KeyCode::Enter => {
                state.pop_dialog();
                state.should_quit = true;
            }
            KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::Help) => match key.code {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter => {
                state.pop_dialog();
            }
            _ => {}
        },
        None => {}
    }
}

fn handle_mouse(mouse: MouseEvent, state: &mut AppState, area: Rect) {
    if state.has_dialog() {
        return;
    }
    let up = match mouse.kind {
        MouseEventKind::ScrollUp => true,
        MouseEventKind::ScrollDown => false,
        _ => return,
    };
    match state.view {
        View::Chat => scroll_chat(state, area, 3, up),
        View::Quiz if matches!(state.quiz.phase(), QuizPhase::Result { .. }) => {
            if up {
                state.review_scroll = state.review_scroll.saturating_sub(3);
            } else {
                let max = ui::result::max_scroll(state, main_area(area));
                state.review_scroll = (state.review_scroll + 3).min(max);
            }
        }
        _ => {}
    }
}
