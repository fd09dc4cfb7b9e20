//! HTTP access to the quiz and RAG backends.

use std::time::Instant;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::model::{QuestionSet, QuizResult, RagAnswer, RagQuery, Submission};

pub const QUESTIONS_PATH: &str = "/api/quiz/questions";
pub const SUBMIT_PATH: &str = "/api/quiz/submit";
pub const RAG_QUERY_PATH: &str = "/rag/query";

/// The three remote calls the client makes. Calls block the current
/// thread, so the UI runs them on worker threads.
pub trait Backend: Send + Sync {
    fn fetch_questions(&self) -> Result<QuestionSet, ApiError>;

    fn submit_quiz(&self, submission: &Submission) -> Result<QuizResult, ApiError>;

    fn query(&self, query: &str) -> Result<RagAnswer, ApiError>;
}

pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: response.text().unwrap_or_default(),
        });
    }
    let body = response.text().map_err(transport)?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

impl Backend for HttpBackend {
    #[instrument(skip(self), fields(base = %self.base_url))]
    fn fetch_questions(&self) -> Result<QuestionSet, ApiError> {
        let start = Instant::now();
        let response = self
            .client
            .get(self.url(QUESTIONS_PATH))
            .send()
            .map_err(transport)?;
        let set: QuestionSet = read_json(response)?;
        debug!(
            questions = set.questions.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "questions fetched"
        );
        Ok(set)
    }

    #[instrument(skip(self, submission), fields(quiz_id = %submission.quiz_id))]
    fn submit_quiz(&self, submission: &Submission) -> Result<QuizResult, ApiError> {
        let start = Instant::now();
        let response = self
            .client
            .post(self.url(SUBMIT_PATH))
            .json(submission)
            .send()
            .map_err(transport)?;
        let result: QuizResult = read_json(response)?;
        debug!(
            score = result.score,
            latency_ms = start.elapsed().as_millis() as u64,
            "quiz submitted"
        );
        Ok(result)
    }

    #[instrument(skip(self, query), fields(len = query.len()))]
    fn query(&self, query: &str) -> Result<RagAnswer, ApiError> {
        let start = Instant::now();
        let body = RagQuery {
            query: query.to_string(),
        };
        let response = self
            .client
            .post(self.url(RAG_QUERY_PATH))
            .json(&body)
            .send()
            .map_err(transport)?;
        let answer: RagAnswer = read_json(response)?;
        debug!(
            sources = answer.top_matches.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "RAG answer received"
        );
        Ok(answer)
    }
}
