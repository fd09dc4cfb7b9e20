//! In-memory chat transcript with a single request in flight.

use chrono::Local;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::model::{Author, ChatMessage, RagAnswer};

pub const GREETING: &str = "Hello! I am your Constitution Assistant. Ask me anything about the Indian Constitution, fundamental rights, duties, or any related topic!";

pub const FALLBACK: &str = "⚠️ Sorry, I couldn't reach the Constitution server. Please try again.";

pub const SUGGESTIONS: [&str; 4] = [
    "What are Fundamental Rights?",
    "Explain the Preamble",
    "What is Article 370?",
    "Tell me about Directive Principles",
];

#[derive(Debug, Clone)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    pending: bool,
    next_id: u64,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatTranscript {
    pub fn new() -> Self {
        let mut transcript = Self {
            messages: Vec::new(),
            pending: false,
            next_id: 1,
        };
        transcript.push(Author::Assistant, GREETING.to_string(), Vec::new());
        transcript
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// True until the user has sent something.
    pub fn is_fresh(&self) -> bool {
        self.messages.iter().all(|m| !m.is_user())
    }

    /// Append the user's message and return the query to send.
    ///
    /// Blank input, or input while an answer is still outstanding, is
    /// ignored and returns `None`.
    pub fn send(&mut self, input: &str) -> Option<String> {
        if input.trim().is_empty() {
            return None;
        }
        if self.pending {
            debug!("send rejected: response still pending");
            return None;
        }
        self.push(Author::User, input.to_string(), Vec::new());
        self.pending = true;
        Some(input.to_string())
    }

    /// Settle the outstanding request.
    pub fn receive(&mut self, result: Result<RagAnswer, ApiError>) {
        match result {
            Ok(answer) => {
                let sources = answer
                    .top_matches
                    .iter()
                    .filter_map(|m| m.label())
                    .collect();
                self.push(Author::Assistant, answer.answer, sources);
            }
            Err(e) => {
                warn!(error = %e, "RAG query failed");
                self.push(Author::Assistant, FALLBACK.to_string(), Vec::new());
            }
        }
        self.pending = false;
    }

    fn push(&mut self, author: Author, text: String, sources: Vec<String>) {
        self.messages.push(ChatMessage {
            id: self.next_id,
            text,
            author,
            timestamp: Local::now(),
            sources,
        });
        self.next_id += 1;
    }
}
