//! Response decoding that reads a body once and tolerates non-JSON payloads.
//!
//! Gateways in front of the backend can answer with HTML error pages, so the
//! decoder always keeps the raw text next to the optional JSON parse.

use crate::constants::DISPLAY_TRUNCATE_CHARS;
use crate::error::ProbeError;
use reqwest::StatusCode;
use serde_json::Value;

/// A fully-read response body.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBody {
    pub status: StatusCode,
    pub text: String,
    /// `None` when the body is empty or not valid JSON.
    pub json: Option<Value>,
}

impl DecodedBody {
    /// Build a decoded body from an already-read status and text.
    ///
    /// # Returns
    /// The decoded body, with `json` set only when `text` parses as JSON.
    pub fn from_parts(status: StatusCode, text: impl Into<String>) -> Self {
        let text = text.into();
        let json = parse_json(&text);
        Self { status, text, json }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Backend-provided `error` string, when the body is a JSON object carrying one.
    pub fn error_field(&self) -> Option<&str> {
        self.json
            .as_ref()
            .and_then(|value| value.get("error"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }

    /// Raw text shortened for inline display.
    pub fn preview(&self) -> String {
        truncate_for_display(self.text.trim(), DISPLAY_TRUNCATE_CHARS)
    }
}

fn parse_json(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    serde_json::from_str(text).ok()
}

/// Read the whole response body as text and attempt a JSON parse.
///
/// # Errors
/// Returns [`ProbeError::Transport`] only when the body cannot be read.
/// Malformed JSON is never an error.
pub async fn decode_response(response: reqwest::Response) -> Result<DecodedBody, ProbeError> {
    let status = response.status();
    let text = response.text().await?;
    Ok(DecodedBody::from_parts(status, text))
}

/// Build the message shown for a failed (non-2xx) response.
///
/// Prefers the backend `error` field, then `HTTP <code>: <raw text>`, then
/// `fallback` when the body is empty.
pub fn failure_message(body: &DecodedBody, fallback: &str) -> String {
    if let Some(message) = body.error_field() {
        return message.to_string();
    }
    if body.text.trim().is_empty() {
        return fallback.to_string();
    }
    format!("HTTP {}: {}", body.status.as_u16(), body.preview())
}

/// Shorten `text` to at most `limit` characters, appending an ellipsis when cut.
pub fn truncate_for_display(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
