//! Request and response payloads exchanged with the pastebin backend.

use crate::error::ProbeError;
use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /api/pastes`.
///
/// Unset optional fields are left out of the JSON entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePasteRequest {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_views: Option<u64>,
}

/// Creation timestamp as sent by the backend.
///
/// The field is display-only, so any JSON value is accepted; shapes that are
/// not recognizable as a time are shown verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatedAt {
    /// Unix time, in seconds or milliseconds.
    Epoch(i64),
    /// Unix time with a fractional part.
    EpochFloat(f64),
    Text(String),
    Raw(Value),
}

// Anything above this is read as milliseconds (year 5138 in seconds).
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

impl CreatedAt {
    /// Interpret the timestamp as UTC, when it is recognizable.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Epoch(raw) if raw.abs() >= EPOCH_MILLIS_THRESHOLD => {
                DateTime::from_timestamp_millis(*raw)
            }
            Self::Epoch(raw) => DateTime::from_timestamp(*raw, 0),
            Self::EpochFloat(raw) => from_fractional_epoch(*raw),
            Self::Text(text) => DateTime::parse_from_rfc3339(text.trim())
                .ok()
                .map(|parsed| parsed.with_timezone(&Utc)),
            Self::Raw(_) => None,
        }
    }

    /// Human-readable form, falling back to the raw value.
    pub fn display(&self) -> String {
        match self.to_utc() {
            Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => match self {
                Self::Epoch(raw) => raw.to_string(),
                Self::EpochFloat(raw) => raw.to_string(),
                Self::Text(text) => text.clone(),
                Self::Raw(value) => value.to_string(),
            },
        }
    }
}

fn from_fractional_epoch(raw: f64) -> Option<DateTime<Utc>> {
    if !raw.is_finite() {
        return None;
    }
    let secs = if raw.abs() >= EPOCH_MILLIS_THRESHOLD as f64 {
        raw / 1000.0
    } else {
        raw
    };
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

/// Paste ids arrive as strings, but numeric ids are rendered as strings too.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(D::Error::custom(format!(
            "invalid type: {}, expected a string or number",
            other
        ))),
    }
}

/// Read-only snapshot of a paste as returned by `GET /api/pastes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasteRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<CreatedAt>,
    #[serde(default)]
    pub ttl_seconds: Option<u64>,
    #[serde(default)]
    pub max_views: Option<u64>,
    #[serde(default)]
    pub views: Option<u64>,
}

impl PasteRecord {
    /// Decode a record from a parsed JSON payload.
    ///
    /// # Errors
    /// Returns [`ProbeError::Shape`] when required fields are missing or mistyped.
    pub fn from_value(value: Value) -> Result<Self, ProbeError> {
        serde_json::from_value(value)
            .map_err(|err| ProbeError::Shape(format!("Unexpected paste shape: {}", err)))
    }

    /// Views left before the backend exhausts the paste, when a limit is set.
    pub fn remaining_views(&self) -> Option<u64> {
        let max = self.max_views?;
        Some(max.saturating_sub(self.views.unwrap_or(0)))
    }

    /// Label/value rows for the metadata block of the viewer.
    ///
    /// Only fields the backend actually sent are listed.
    pub fn metadata_rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![("ID", self.id.clone())];
        if let Some(created_at) = &self.created_at {
            rows.push(("Created", created_at.display()));
        }
        if let Some(ttl) = self.ttl_seconds {
            rows.push(("TTL", format!("{} s", ttl)));
        }
        if let Some(views) = self.views {
            rows.push(("Views", views.to_string()));
        }
        if let Some(max_views) = self.max_views {
            rows.push(("Max views", max_views.to_string()));
        }
        if let Some(remaining) = self.remaining_views() {
            rows.push(("Remaining", remaining.to_string()));
        }
        rows
    }
}

/// Successful create result plus the links derived from its id.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedPaste {
    pub id: String,
    /// Full parsed response, shown as-is.
    pub payload: Value,
    /// Server-rendered HTML page (`/p/{id}`).
    pub view_url: Url,
    /// JSON resource (`/api/pastes/{id}`).
    pub api_url: Url,
}

/// Extract the paste id from a create response payload.
///
/// Numeric ids are accepted and rendered as strings.
///
/// # Errors
/// Returns [`ProbeError::Shape`] when no usable `id` is present.
pub fn created_id(payload: &Value) -> Result<String, ProbeError> {
    let id = match payload.get("id") {
        Some(Value::String(id)) => id.trim().to_string(),
        Some(Value::Number(id)) => id.to_string(),
        _ => String::new(),
    };
    if id.is_empty() {
        return Err(ProbeError::Shape(
            "Response did not include an id".to_string(),
        ));
    }
    Ok(id)
}
