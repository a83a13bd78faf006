//! Per-action state machine: `Idle -> Loading -> (Success | Error)`.

use crate::error::ProbeError;
use std::fmt;

/// The three independent panel actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Create,
    Fetch,
    Health,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Fetch => "Fetch",
            Self::Health => "Health check",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One action's slot. A single tagged value, so loading/result/error can
/// never disagree with each other.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> Outcome<T> {
    /// Enter `Loading`, replacing whatever terminal state the slot held.
    pub fn begin(&mut self) {
        *self = Self::Loading;
    }

    /// Record the result of the request started by [`Outcome::begin`].
    pub fn settle(&mut self, result: Result<T, ProbeError>) {
        *self = match result {
            Ok(value) => Self::Success(value),
            Err(err) => Self::Error(err.to_string()),
        };
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        *self = Self::Error(message.into());
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}
