//! Paste draft validation (form fields to request body).

use crate::error::ValidationError;
use crate::models::CreatePasteRequest;

/// Form-bound fields of the create panel.
///
/// Numeric fields stay as the raw text the user typed until validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteDraft {
    pub content: String,
    pub ttl_seconds: String,
    pub max_views: String,
}

impl PasteDraft {
    /// Draft with content only.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Whether every field is blank.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
            && self.ttl_seconds.trim().is_empty()
            && self.max_views.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.ttl_seconds.clear();
        self.max_views.clear();
    }

    /// Validate the draft into a request body.
    ///
    /// # Returns
    /// A [`CreatePasteRequest`] carrying the content as typed and only the
    /// optional fields that were filled in.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyContent`] for blank content and
    /// [`ValidationError::NotPositiveInteger`] for a malformed TTL or view limit.
    pub fn validate(&self) -> Result<CreatePasteRequest, ValidationError> {
        if self.content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        let ttl_seconds = parse_optional_positive("ttl_seconds", &self.ttl_seconds)?;
        let max_views = parse_optional_positive("max_views", &self.max_views)?;
        Ok(CreatePasteRequest {
            content: self.content.clone(),
            ttl_seconds,
            max_views,
        })
    }
}

/// Parse an optional positive integer form field.
///
/// Blank input means "absent". Anything else must be a base-10 integer `>= 1`.
///
/// # Errors
/// Returns [`ValidationError::NotPositiveInteger`] naming `field`.
pub fn parse_optional_positive(
    field: &'static str,
    raw: &str,
) -> Result<Option<u64>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<u64>() {
        Ok(value) if value >= 1 => Ok(Some(value)),
        _ => Err(ValidationError::NotPositiveInteger {
            field,
            value: trimmed.to_string(),
        }),
    }
}

/// Trim a paste identifier and reject empty input.
///
/// # Errors
/// Returns [`ValidationError::EmptyIdentifier`] when nothing is left after trimming.
pub fn validate_identifier(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyIdentifier);
    }
    Ok(trimmed.to_string())
}
