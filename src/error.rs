use thiserror::Error;

/// Failures talking to the quiz or RAG backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Short text suitable for a one-line status in the UI.
    pub fn summary(&self) -> String {
        match self {
            ApiError::Transport(_) => "Could not reach the server.".to_string(),
            ApiError::Status { status, .. } => format!("The server answered with HTTP {}.", status),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
