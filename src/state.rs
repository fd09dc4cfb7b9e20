use crate::chat::{ChatTranscript, SUGGESTIONS};
use crate::quiz::{QuizEffect, QuizFlow, QuizPhase};
use crate::worker::ApiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Quiz,
    Chat,
}

impl View {
    pub const ALL: [View; 3] = [View::Home, View::Quiz, View::Chat];

    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Quiz => "Quiz",
            View::Chat => "Ask AI",
        }
    }

    fn index(self) -> usize {
        View::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    ConfirmQuit,
    Help,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    pub quiz: QuizFlow,
    pub chat: ChatTranscript,
    pub chat_input: String,
    /// Cursor position in characters, not bytes.
    pub chat_cursor: usize,
    /// Lines scrolled up from the bottom of the transcript.
    pub chat_scroll: usize,
    pub suggestion_cursor: Option<usize>,
    pub review_scroll: usize,
    pub home_cursor: usize,
    pub dialog_stack: Vec<Dialog>,
    pub api_url: String,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(api_url: &str) -> Self {
        Self {
            view: View::Home,
            quiz: QuizFlow::new(),
            chat: ChatTranscript::new(),
            chat_input: String::new(),
            chat_cursor: 0,
            chat_scroll: 0,
            suggestion_cursor: None,
            review_scroll: 0,
            home_cursor: 0,
            dialog_stack: Vec::new(),
            api_url: api_url.to_string(),
            should_quit: false,
        }
    }

    /// Switch views. Opening the quiz for the first time starts loading it.
    pub fn open_view(&mut self, view: View) -> Option<QuizEffect> {
        self.view = view;
        match view {
            View::Quiz => self.quiz.mount(),
            _ => None,
        }
    }

    pub fn cycle_view(&mut self, forward: bool) -> Option<QuizEffect> {
        let n = View::ALL.len();
        let idx = self.view.index();
        let next = if forward { (idx + 1) % n } else { (idx + n - 1) % n };
        self.open_view(View::ALL[next])
    }

    pub fn restart_quiz(&mut self) -> Option<QuizEffect> {
        let effect = self.quiz.restart();
        if effect.is_some() {
            self.review_scroll = 0;
        }
        effect
    }

    /// Route a finished request to the flow that issued it.
    pub fn apply_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Questions { attempt, result } => match result {
                Ok(set) => self.quiz.questions_loaded(attempt, set),
                Err(e) => self.quiz.questions_failed(attempt, e.summary()),
            },
            ApiEvent::Scored { attempt, result } => match result {
                Ok(scored) => {
                    self.review_scroll = 0;
                    self.quiz.submitted(attempt, scored);
                }
                Err(e) => self.quiz.submit_failed(attempt, e.summary()),
            },
            ApiEvent::Answer(result) => {
                self.chat.receive(result);
                self.chat_scroll = 0;
            }
        }
    }

    pub fn is_quiz_busy(&self) -> bool {
        matches!(
            self.quiz.phase(),
            QuizPhase::Loading | QuizPhase::Submitting { .. }
        )
    }

    pub fn send_chat(&mut self) -> Option<String> {
        let query = self.chat.send(&self.chat_input)?;
        self.chat_input.clear();
        self.chat_cursor = 0;
        self.chat_scroll = 0;
        self.suggestion_cursor = None;
        Some(query)
    }

    /// Fill the input with the next canned question. Only offered before
    /// the first message.
    pub fn cycle_suggestion(&mut self, forward: bool) {
        if !self.chat.is_fresh() {
            return;
        }
        let n = SUGGESTIONS.len();
        let next = match (self.suggestion_cursor, forward) {
            (None, true) => 0,
            (None, false) => n - 1,
            (Some(i), true) => (i + 1) % n,
            (Some(i), false) => (i + n - 1) % n,
        };
        self.suggestion_cursor = Some(next);
        self.chat_input = SUGGESTIONS[next].to_string();
        self.chat_cursor = self.chat_input.chars().count();
    }

    fn cursor_byte(&self) -> usize {
        self.chat_input
            .char_indices()
            .nth(self.chat_cursor)
            .map_or(self.chat_input.len(), |(i, _)| i)
    }

    /// The input line is read-only while an answer is outstanding.
    pub fn input_locked(&self) -> bool {
        self.chat.is_pending()
    }

    pub fn insert_char(&mut self, c: char) {
        if self.input_locked() {
            return;
        }
        let at = self.cursor_byte();
        self.chat_input.insert(at, c);
        self.chat_cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.chat_cursor > 0 && !self.input_locked() {
            self.chat_cursor -= 1;
            let at = self.cursor_byte();
            self.chat_input.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.chat_cursor < self.chat_input.chars().count() && !self.input_locked() {
            let at = self.cursor_byte();
            self.chat_input.remove(at);
        }
    }

    pub fn clear_input(&mut self) {
        if self.input_locked() {
            return;
        }
        self.chat_input.clear();
        self.chat_cursor = 0;
        self.suggestion_cursor = None;
    }

    pub fn cursor_left(&mut self) {
        self.chat_cursor = self.chat_cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.chat_cursor = (self.chat_cursor + 1).min(self.chat_input.chars().count());
    }

    pub fn cursor_home(&mut self) {
        self.chat_cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.chat_cursor = self.chat_input.chars().count();
    }

    pub fn has_dialog(&self) -> bool {
        !self.dialog_stack.is_empty()
    }

    pub fn top_dialog(&self) -> Option<&Dialog> {
        self.dialog_stack.last()
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialog_stack.push(dialog);
    }

    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        self.dialog_stack.pop()
    }
}
