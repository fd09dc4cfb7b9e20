use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
}

/// Response of `GET /api/quiz/questions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    #[serde(rename = "quizId")]
    pub quiz_id: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    #[serde(rename = "questionId")]
    pub question_id: String,
    #[serde(rename = "selectedAnswer")]
    pub selected_answer: usize,
}

/// Body of `POST /api/quiz/submit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(rename = "quizId")]
    pub quiz_id: String,
    pub answers: Vec<AnswerRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub question: String,
    pub options: Vec<String>,
    pub selected: usize,
    pub correct: usize,
    #[serde(default)]
    pub explanation: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

/// Response of `POST /api/quiz/submit`.
///
/// Some backends only report `score`, `total` and `percentage`; the review
/// list is then empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: u32,
    #[serde(default)]
    pub review: Vec<ReviewItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RagQuery {
    pub query: String,
}

/// Response of `POST /rag/query`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RagAnswer {
    pub answer: String,
    #[serde(default)]
    pub top_matches: Vec<SourceMatch>,
}

/// A constitution article the backend retrieved while answering.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SourceMatch {
    #[serde(default)]
    pub article_number: Option<serde_json::Value>,
    #[serde(default)]
    pub article_title: Option<String>,
    #[serde(default)]
    pub similarity_score: Option<f64>,
}

impl SourceMatch {
    /// "Article 21 - Protection of life and personal liberty", or whatever
    /// part of that the backend supplied.
    pub fn label(&self) -> Option<String> {
        let number = self.article_number.as_ref().and_then(|v| match v {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        match (number, self.article_title.as_deref()) {
            (Some(n), Some(t)) if !t.is_empty() => Some(format!("Article {} - {}", n, t)),
            (Some(n), _) => Some(format!("Article {}", n)),
            (None, Some(t)) if !t.is_empty() => Some(t.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub author: Author,
    pub timestamp: DateTime<Local>,
    pub sources: Vec<String>,
}

impl ChatMessage {
    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }
}
