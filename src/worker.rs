use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use crate::api::Backend;
use crate::error::ApiError;
use crate::model::{QuestionSet, QuizResult, RagAnswer};
use crate::quiz::QuizEffect;

/// Outcome of a background request, delivered to the UI loop.
#[derive(Debug)]
pub enum ApiEvent {
    Questions {
        attempt: u64,
        result: Result<QuestionSet, ApiError>,
    },
    Scored {
        attempt: u64,
        result: Result<QuizResult, ApiError>,
    },
    Answer(Result<RagAnswer, ApiError>),
}

pub fn run_quiz_effect(
    effect: QuizEffect,
    backend: &Arc<dyn Backend>,
    tx: &mpsc::Sender<ApiEvent>,
) {
    let backend = Arc::clone(backend);
    let tx = tx.clone();
    match effect {
        QuizEffect::FetchQuestions { attempt } => {
            thread::spawn(move || {
                let result = backend.fetch_questions();
                let _ = tx.send(ApiEvent::Questions { attempt, result });
            });
        }
        QuizEffect::Submit {
            attempt,
            submission,
        } => {
            thread::spawn(move || {
                let result = backend.submit_quiz(&submission);
                let _ = tx.send(ApiEvent::Scored { attempt, result });
            });
        }
    }
}

pub fn run_chat_query(query: String, backend: &Arc<dyn Backend>, tx: &mpsc::Sender<ApiEvent>) {
    let backend = Arc::clone(backend);
    let tx = tx.clone();
    thread::spawn(move || {
        let result = backend.query(&query);
        let _ = tx.send(ApiEvent::Answer(result));
    });
}
