//! Error taxonomy for PasteProbe actions.
use crate::outcome::ActionKind;
use thiserror::Error;

/// Input rejected before any request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Content is required")]
    EmptyContent,

    #[error("{field} must be a positive integer (got '{value}')")]
    NotPositiveInteger { field: &'static str, value: String },

    #[error("Paste id is required")]
    EmptyIdentifier,
}

/// Failure of a single client action.
///
/// Every variant renders to the message shown inline for that action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Non-2xx response.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 2xx response whose body is not JSON or lacks an expected field.
    #[error("{0}")]
    Shape(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid server URL '{url}': {reason}")]
    InvalidServer { url: String, reason: String },

    #[error("{0} is already in progress")]
    Busy(ActionKind),
}

impl ProbeError {
    /// HTTP status for errors that came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error was raised before any network call.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidServer { .. } | Self::Busy(_)
        )
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}
