//! Shared constants used across PasteProbe crates.

/// Default base URL of the pastebin backend.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8787";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of characters of a raw body quoted in error messages.
pub const DISPLAY_TRUNCATE_CHARS: usize = 300;

/// Path segments of the backend API.
pub const API_SEGMENT: &str = "api";
pub const PASTES_SEGMENT: &str = "pastes";
pub const HEALTH_SEGMENT: &str = "healthz";
/// Path segment of the server-rendered HTML view (`/p/{id}`).
pub const VIEW_SEGMENT: &str = "p";

/// Messages used when a failed response carries no usable body.
pub const CREATE_FALLBACK_MESSAGE: &str = "Request failed";
pub const FETCH_FALLBACK_MESSAGE: &str = "Not found";
pub const HEALTH_FALLBACK_MESSAGE: &str = "Health check failed";
