use reqwest::StatusCode;
use std::error::Error as _;
use thiserror::Error;

/// Shown when a failure carries no usable text of its own.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Used when a rejected submission's body names neither `message` nor `error`.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Failed to submit form";

/// Why a submission did not go through.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// The endpoint answered with a non-2xx status.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// No response was obtained.
    #[error("{0}")]
    Network(String),

    /// A 2xx response whose body is not JSON.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl SubmitError {
    /// Build a network error from a reqwest failure, with its source chain
    /// appended.
    pub fn network(err: reqwest::Error) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        SubmitError::Network(message)
    }

    /// The text to put in the error box.
    pub fn user_message(&self) -> String {
        let text = self.to_string();
        if text.trim().is_empty() {
            UNEXPECTED_ERROR_MESSAGE.to_string()
        } else {
            text
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SubmitError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
