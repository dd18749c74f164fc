use thiserror::Error;

/// Everything that can go wrong between a question and an answer text.
///
/// Rendering itself never fails; these all come from building the request
/// or talking to the model service.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("{var} is not set. Add your API key to the environment to ask questions.")]
    MissingApiKey { var: String },

    #[error("Invalid base URL {url}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Question is empty")]
    EmptyQuestion,

    #[error("No subject with id {0}")]
    UnknownSubject(u32),

    #[error("Network error")]
    Transport(#[from] reqwest::Error),

    #[error("Response was not valid JSON")]
    InvalidResponse(#[source] serde_json::Error),

    /// The service answered with an `error.message` payload.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Request failed with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response did not contain any answer text")]
    MissingText,
}

impl AskError {
    /// Worth trying the same request again.
    pub fn is_retryable(&self) -> bool {
        match self {
            AskError::Transport(_) => true,
            AskError::Status { status, .. } | AskError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
