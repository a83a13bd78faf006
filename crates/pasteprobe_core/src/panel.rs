//! Headless state of the create/fetch/health panel.
//!
//! Front ends drive it in two halves per action: `begin_*` validates input
//! and claims the panel, the caller performs the request, then `finish_*`
//! stores the result in that action's own slot.

use crate::draft::{validate_identifier, PasteDraft};
use crate::error::ProbeError;
use crate::models::{CreatePasteRequest, CreatedPaste};
use crate::outcome::{ActionKind, Outcome};
use serde_json::Value;
use tracing::debug;

/// Form fields, one outcome slot per action, and the action in flight.
#[derive(Debug, Default)]
pub struct Panel {
    pub draft: PasteDraft,
    /// Identifier field of the fetch form.
    pub fetch_id: String,
    create: Outcome<CreatedPaste>,
    fetch: Outcome<Value>,
    health: Outcome<Value>,
    active: Option<ActionKind>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Action currently awaiting a response, if any.
    pub fn active(&self) -> Option<ActionKind> {
        self.active
    }

    /// Whether action buttons should be disabled.
    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn create_outcome(&self) -> &Outcome<CreatedPaste> {
        &self.create
    }

    pub fn fetch_outcome(&self) -> &Outcome<Value> {
        &self.fetch
    }

    pub fn health_outcome(&self) -> &Outcome<Value> {
        &self.health
    }

    fn slot_error(&mut self, kind: ActionKind, err: &ProbeError) {
        let message = err.to_string();
        match kind {
            ActionKind::Create => self.create.fail(message),
            ActionKind::Fetch => self.fetch.fail(message),
            ActionKind::Health => self.health.fail(message),
        }
    }

    fn claim(&mut self, kind: ActionKind) -> Result<(), ProbeError> {
        if let Some(active) = self.active {
            debug!(requested = %kind, active = %active, "panel busy; action rejected");
            return Err(ProbeError::Busy(active));
        }
        self.active = Some(kind);
        match kind {
            ActionKind::Create => self.create.begin(),
            ActionKind::Fetch => self.fetch.begin(),
            ActionKind::Health => self.health.begin(),
        }
        Ok(())
    }

    fn release(&mut self, kind: ActionKind) {
        if self.active == Some(kind) {
            self.active = None;
        }
    }

    /// Validate the draft and claim the panel for a create request.
    ///
    /// # Returns
    /// The request body to send.
    ///
    /// # Errors
    /// - [`ProbeError::Busy`] when another action is in flight (no slot changes).
    /// - [`ProbeError::Validation`] for a bad draft; the create slot shows the
    ///   error and nothing must be sent.
    pub fn begin_create(&mut self) -> Result<CreatePasteRequest, ProbeError> {
        if let Some(active) = self.active {
            return Err(ProbeError::Busy(active));
        }
        let request = match self.draft.validate() {
            Ok(request) => request,
            Err(err) => {
                let err = ProbeError::from(err);
                self.slot_error(ActionKind::Create, &err);
                return Err(err);
            }
        };
        self.claim(ActionKind::Create)?;
        Ok(request)
    }

    /// Store a create result. Success fills the fetch id field and discards the draft.
    pub fn finish_create(&mut self, result: Result<CreatedPaste, ProbeError>) {
        self.release(ActionKind::Create);
        if let Ok(created) = &result {
            self.fetch_id = created.id.clone();
            self.draft.clear();
        }
        self.create.settle(result);
    }

    /// Validate the fetch id field and claim the panel for a fetch request.
    ///
    /// # Returns
    /// The trimmed identifier to request.
    ///
    /// # Errors
    /// [`ProbeError::Busy`] or [`ProbeError::Validation`], as for [`Panel::begin_create`].
    pub fn begin_fetch(&mut self) -> Result<String, ProbeError> {
        if let Some(active) = self.active {
            return Err(ProbeError::Busy(active));
        }
        let id = match validate_identifier(&self.fetch_id) {
            Ok(id) => id,
            Err(err) => {
                let err = ProbeError::from(err);
                self.slot_error(ActionKind::Fetch, &err);
                return Err(err);
            }
        };
        self.claim(ActionKind::Fetch)?;
        Ok(id)
    }

    pub fn finish_fetch(&mut self, result: Result<Value, ProbeError>) {
        self.release(ActionKind::Fetch);
        self.fetch.settle(result);
    }

    /// Claim the panel for a health check.
    ///
    /// # Errors
    /// [`ProbeError::Busy`] when another action is in flight.
    pub fn begin_health(&mut self) -> Result<(), ProbeError> {
        self.claim(ActionKind::Health)
    }

    pub fn finish_health(&mut self, result: Result<Value, ProbeError>) {
        self.release(ActionKind::Health);
        self.health.settle(result);
    }

    /// Discard the draft and the create slot's last outcome.
    pub fn clear_draft(&mut self) {
        self.draft.clear();
        if self.active != Some(ActionKind::Create) {
            self.create.reset();
        }
    }
}

#[cfg(test)]
mod tests;
