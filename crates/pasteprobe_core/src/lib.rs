//! Core client library for PasteProbe (decoding, validation, HTTP actions, view state).

/// HTTP client for the pastebin API.
pub mod client;
/// Configuration loading from environment variables.
pub mod config;
/// Shared constants used across PasteProbe crates.
pub mod constants;
/// Response body decoding that tolerates non-JSON payloads.
pub mod decode;
/// Paste draft validation.
pub mod draft;
/// Process-global environment mutation helpers.
pub mod env;
/// Error taxonomy for validation, HTTP, and shape failures.
pub mod error;
/// Request and response payloads.
pub mod models;
/// Per-action state machine.
pub mod outcome;
/// Create/fetch/health panel state.
pub mod panel;
/// Paste viewer page state and downloads.
pub mod viewer;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use constants::{DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS};
pub use decode::DecodedBody;
pub use draft::PasteDraft;
pub use error::{ProbeError, ValidationError};
pub use models::{CreatePasteRequest, CreatedPaste, PasteRecord};
pub use outcome::{ActionKind, Outcome};
pub use panel::Panel;
pub use viewer::{ViewTicket, Viewer};

/// In-process mock backend used by tests across the workspace.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
