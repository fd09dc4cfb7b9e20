//! Quiz attempt state machine.
//!
//! The flow never performs I/O itself. Operations that need the backend
//! return a [`QuizEffect`]; the caller runs it and reports the outcome back
//! through [`QuizFlow::questions_loaded`], [`QuizFlow::submitted`] and their
//! failure counterparts. Each effect carries the attempt number it belongs
//! to so responses from an abandoned attempt are dropped.

use tracing::{debug, info, warn};

use crate::model::{AnswerRecord, QuestionSet, QuizQuestion, QuizResult, Submission};
use crate::review;

#[derive(Debug, Clone, PartialEq)]
pub enum QuizEffect {
    FetchQuestions { attempt: u64 },
    Submit { attempt: u64, submission: Submission },
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuizPhase {
    /// The quiz view has not been opened yet.
    Idle,
    Loading,
    LoadFailed {
        error: String,
    },
    NotStarted {
        set: QuestionSet,
    },
    InProgress {
        set: QuestionSet,
        current: usize,
        selected: Option<usize>,
        answers: Vec<AnswerRecord>,
    },
    Submitting {
        set: QuestionSet,
        submission: Submission,
    },
    SubmitFailed {
        set: QuestionSet,
        submission: Submission,
        error: String,
    },
    Result {
        set: QuestionSet,
        result: QuizResult,
    },
}

#[derive(Debug, Clone)]
pub struct QuizFlow {
    phase: QuizPhase,
    attempt: u64,
}

impl Default for QuizFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizFlow {
    pub fn new() -> Self {
        Self {
            phase: QuizPhase::Idle,
            attempt: 0,
        }
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// First display of the quiz view: start fetching questions.
    pub fn mount(&mut self) -> Option<QuizEffect> {
        match self.phase {
            QuizPhase::Idle => Some(self.begin_fetch()),
            _ => None,
        }
    }

    fn begin_fetch(&mut self) -> QuizEffect {
        self.attempt += 1;
        self.phase = QuizPhase::Loading;
        debug!(attempt = self.attempt, "fetching quiz questions");
        QuizEffect::FetchQuestions {
            attempt: self.attempt,
        }
    }

    pub fn questions_loaded(&mut self, attempt: u64, set: QuestionSet) {
        if attempt != self.attempt || self.phase != QuizPhase::Loading {
            debug!(attempt, current = self.attempt, "ignoring stale question set");
            return;
        }
        if set.questions.is_empty() {
            warn!(quiz_id = %set.quiz_id, "quiz has no questions");
            self.phase = QuizPhase::LoadFailed {
                error: "The quiz has no questions.".to_string(),
            };
            return;
        }
        if let Some(q) = set.questions.iter().find(|q| q.options.is_empty()) {
            warn!(quiz_id = %set.quiz_id, question = %q.id, "question has no options");
            self.phase = QuizPhase::LoadFailed {
                error: format!("Question {} has no answer options.", q.id),
            };
            return;
        }
        info!(quiz_id = %set.quiz_id, questions = set.questions.len(), "quiz loaded");
        self.phase = QuizPhase::NotStarted { set };
    }

    pub fn questions_failed(&mut self, attempt: u64, error: String) {
        if attempt != self.attempt || self.phase != QuizPhase::Loading {
            return;
        }
        warn!(attempt, %error, "failed to load quiz questions");
        self.phase = QuizPhase::LoadFailed { error };
    }

    pub fn start(&mut self) -> bool {
        match std::mem::replace(&mut self.phase, QuizPhase::Idle) {
            QuizPhase::NotStarted { set } => {
                debug!(quiz_id = %set.quiz_id, "quiz started");
                self.phase = QuizPhase::InProgress {
                    set,
                    current: 0,
                    selected: None,
                    answers: Vec::new(),
                };
                true
            }
            other => {
                self.phase = other;
                false
            }
        }
    }

    /// Change the selected option of the current question. Does not advance.
    pub fn select(&mut self, index: usize) -> bool {
        if let QuizPhase::InProgress {
            set,
            current,
            selected,
            ..
        } = &mut self.phase
        {
            let options = set.questions.get(*current).map_or(0, |q| q.options.len());
            if index < options {
                *selected = Some(index);
                return true;
            }
        }
        false
    }

    /// Move the selection up or down, starting from the first option when
    /// nothing is selected yet.
    pub fn move_selection(&mut self, forward: bool) {
        let target = match &self.phase {
            QuizPhase::InProgress {
                set,
                current,
                selected,
                ..
            } => {
                let options = set.questions.get(*current).map_or(0, |q| q.options.len());
                if options == 0 {
                    return;
                }
                match (*selected, forward) {
                    (None, _) => 0,
                    (Some(i), true) => (i + 1).min(options - 1),
                    (Some(i), false) => i.saturating_sub(1),
                }
            }
            _ => return,
        };
        self.select(target);
    }

    /// Record the current selection and move on. After the last question
    /// this hands back the submission to send.
    pub fn advance(&mut self) -> Option<QuizEffect> {
        match std::mem::replace(&mut self.phase, QuizPhase::Idle) {
            QuizPhase::InProgress {
                set,
                current,
                selected: Some(choice),
                mut answers,
            } => {
                let Some(question_id) = set.questions.get(current).map(|q| q.id.clone()) else {
                    self.phase = QuizPhase::InProgress {
                        set,
                        current,
                        selected: Some(choice),
                        answers,
                    };
                    return None;
                };
                answers.push(AnswerRecord {
                    question_id,
                    selected_answer: choice,
                });

                if current + 1 < set.questions.len() {
                    self.phase = QuizPhase::InProgress {
                        set,
                        current: current + 1,
                        selected: None,
                        answers,
                    };
                    None
                } else {
                    let submission = Submission {
                        quiz_id: set.quiz_id.clone(),
                        answers,
                    };
                    info!(
                        quiz_id = %submission.quiz_id,
                        answers = submission.answers.len(),
                        "submitting quiz"
                    );
                    self.phase = QuizPhase::Submitting {
                        set,
                        submission: submission.clone(),
                    };
                    Some(QuizEffect::Submit {
                        attempt: self.attempt,
                        submission,
                    })
                }
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    pub fn submitted(&mut self, attempt: u64, result: QuizResult) {
        if attempt != self.attempt {
            return;
        }
        match std::mem::replace(&mut self.phase, QuizPhase::Idle) {
            QuizPhase::Submitting { set, .. } => {
                info!(score = result.score, total = set.questions.len(), "quiz scored");
                self.phase = QuizPhase::Result { set, result };
            }
            other => self.phase = other,
        }
    }

    pub fn submit_failed(&mut self, attempt: u64, error: String) {
        if attempt != self.attempt {
            return;
        }
        match std::mem::replace(&mut self.phase, QuizPhase::Idle) {
            QuizPhase::Submitting { set, submission } => {
                warn!(%error, "quiz submission failed");
                self.phase = QuizPhase::SubmitFailed {
                    set,
                    submission,
                    error,
                };
            }
            other => self.phase = other,
        }
    }

    /// Repeat the request that failed: the question fetch, or the very same
    /// submission.
    pub fn retry(&mut self) -> Option<QuizEffect> {
        match std::mem::replace(&mut self.phase, QuizPhase::Idle) {
            QuizPhase::LoadFailed { .. } => Some(self.begin_fetch()),
            QuizPhase::SubmitFailed {
                set, submission, ..
            } => {
                debug!(attempt = self.attempt, "retrying submission");
                self.phase = QuizPhase::Submitting {
                    set,
                    submission: submission.clone(),
                };
                Some(QuizEffect::Submit {
                    attempt: self.attempt,
                    submission,
                })
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Throw away the finished attempt and fetch a fresh question set.
    pub fn restart(&mut self) -> Option<QuizEffect> {
        match self.phase {
            QuizPhase::Result { .. } | QuizPhase::SubmitFailed { .. } => Some(self.begin_fetch()),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match &self.phase {
            QuizPhase::InProgress { set, current, .. } => set.questions.get(*current),
            _ => None,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        match &self.phase {
            QuizPhase::InProgress { selected, .. } => *selected,
            _ => None,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        match &self.phase {
            QuizPhase::InProgress { current, .. } => Some(*current),
            _ => None,
        }
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        match &self.phase {
            QuizPhase::InProgress { answers, .. } => answers,
            QuizPhase::Submitting { submission, .. }
            | QuizPhase::SubmitFailed { submission, .. } => &submission.answers,
            _ => &[],
        }
    }

    /// (1-based question number, question count, rounded percent).
    pub fn progress(&self) -> Option<(usize, usize, u32)> {
        match &self.phase {
            QuizPhase::InProgress { set, current, .. } => {
                let total = set.questions.len();
                let number = current + 1;
                Some((number, total, review::percentage(number as u32, total)))
            }
            _ => None,
        }
    }

    pub fn is_last_question(&self) -> bool {
        matches!(self.progress(), Some((n, total, _)) if n == total)
    }

    /// (score, question count, rounded percent) once the attempt is scored.
    pub fn score(&self) -> Option<(u32, usize, u32)> {
        match &self.phase {
            QuizPhase::Result { set, result } => {
                let total = set.questions.len();
                Some((result.score, total, review::percentage(result.score, total)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(n: usize) -> QuestionSet {
        QuestionSet {
            quiz_id: "quiz_123".into(),
            questions: (0..n)
                .map(|i| QuizQuestion {
                    id: format!("q{}", i + 1),
                    question: format!("Question {}?", i + 1),
                    options: vec!["A".into(), "B".into(), "C".into()],
                })
                .collect(),
        }
    }

    fn started(n: usize) -> QuizFlow {
        let mut flow = QuizFlow::new();
        let Some(QuizEffect::FetchQuestions { attempt }) = flow.mount() else {
            panic!("mount should fetch");
        };
        flow.questions_loaded(attempt, set(n));
        assert!(flow.start());
        flow
    }

    #[test]
    fn mount_only_fetches_once() {
        let mut flow = QuizFlow::new();
        assert!(flow.mount().is_some());
        assert!(flow.mount().is_none());
        assert_eq!(flow.phase(), &QuizPhase::Loading);
    }

    #[test]
    fn advance_requires_selection() {
        let mut flow = started(2);
        assert!(flow.advance().is_none());
        assert_eq!(flow.current_index(), Some(0));
        assert!(flow.answers().is_empty());
    }

    #[test]
    fn selecting_out_of_range_is_ignored() {
        let mut flow = started(1);
        assert!(!flow.select(3));
        assert_eq!(flow.selected(), None);
        assert!(flow.select(2));
        assert_eq!(flow.selected(), Some(2));
    }

    #[test]
    fn selection_resets_between_questions() {
        let mut flow = started(2);
        flow.select(1);
        assert!(flow.advance().is_none());
        assert_eq!(flow.current_index(), Some(1));
        assert_eq!(flow.selected(), None);
        assert_eq!(flow.answers().len(), 1);
    }

    #[test]
    fn move_selection_clamps() {
        let mut flow = started(1);
        flow.move_selection(false);
        assert_eq!(flow.selected(), Some(0));
        flow.move_selection(false);
        assert_eq!(flow.selected(), Some(0));
        flow.move_selection(true);
        flow.move_selection(true);
        flow.move_selection(true);
        assert_eq!(flow.selected(), Some(2));
    }

    #[test]
    fn empty_question_set_is_a_load_failure() {
        let mut flow = QuizFlow::new();
        flow.mount();
        flow.questions_loaded(1, set(0));
        assert!(matches!(flow.phase(), QuizPhase::LoadFailed { .. }));
        assert!(!flow.start());
    }

    #[test]
    fn question_without_options_is_a_load_failure() {
        let mut flow = QuizFlow::new();
        flow.mount();
        let mut broken = set(3);
        broken.questions[1].options.clear();
        flow.questions_loaded(1, broken);
        match flow.phase() {
            QuizPhase::LoadFailed { error } => assert!(error.contains("q2")),
            other => panic!("unexpected phase: {:?}", other),
        }
        assert!(!flow.start());
        assert!(matches!(
            flow.retry(),
            Some(QuizEffect::FetchQuestions { attempt: 2 })
        ));
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut flow = QuizFlow::new();
        flow.mount();
        flow.questions_failed(1, "boom".into());
        let Some(QuizEffect::FetchQuestions { attempt }) = flow.retry() else {
            panic!("retry should refetch");
        };
        assert_eq!(attempt, 2);
        flow.questions_loaded(1, set(3));
        assert_eq!(flow.phase(), &QuizPhase::Loading);
        flow.questions_loaded(2, set(3));
        assert!(matches!(flow.phase(), QuizPhase::NotStarted { .. }));
    }

    #[test]
    fn progress_and_last_question() {
        let mut flow = started(4);
        assert_eq!(flow.progress(), Some((1, 4, 25)));
        assert!(!flow.is_last_question());
        for _ in 0..3 {
            flow.select(0);
            flow.advance();
        }
        assert_eq!(flow.progress(), Some((4, 4, 100)));
        assert!(flow.is_last_question());
    }
}
