// Error types shared across the crate

/// Message shown to the user whenever a completion yields no answer.
pub const NO_RESPONSE_MESSAGE: &str = "No response received from the AI.";

/// Why a chat completion produced no answer.
///
/// The user only ever sees [`NO_RESPONSE_MESSAGE`]; the variant is logged so
/// network trouble can be told apart from an unexpected payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionFailure {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("completion API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed completion payload: {0}")]
    MalformedPayload(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Could not decode {file}: {reason}")]
    Decode { file: String, reason: String },

    #[error("No response received from the AI. ({0})")]
    Completion(#[from] CompletionFailure),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn decode(file: impl Into<String>, reason: impl ToString) -> Self {
        AppError::Decode {
            file: file.into(),
            reason: reason.to_string(),
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
