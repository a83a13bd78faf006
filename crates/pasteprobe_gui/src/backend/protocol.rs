//! Command/event protocol between the egui UI thread and the backend worker.

use pasteprobe_core::{CreatePasteRequest, CreatedPaste, PasteRecord, ProbeError, ViewTicket};
use serde_json::Value;

/// Requests issued by the UI thread; each maps to one HTTP round trip.
#[derive(Debug, Clone)]
pub enum ProbeCmd {
    /// `POST /api/pastes` with an already-validated body.
    Create { request: CreatePasteRequest },
    /// `GET /api/pastes/{id}` for the panel's fetch slot.
    Fetch { id: String },
    /// `GET /api/healthz`.
    Health,
    /// `GET /api/pastes/{id}` for the viewer page.
    View { ticket: ViewTicket },
}

/// Results produced by the backend worker and polled by the UI thread.
///
/// Each event names the slot it belongs to so results can arrive in any order.
#[derive(Debug)]
pub enum ProbeEvent {
    Created {
        result: Result<CreatedPaste, ProbeError>,
    },
    Fetched {
        id: String,
        result: Result<Value, ProbeError>,
    },
    Health {
        result: Result<Value, ProbeError>,
    },
    Viewed {
        ticket: ViewTicket,
        result: Result<PasteRecord, ProbeError>,
    },
}

impl ProbeEvent {
    /// Event reporting that `cmd` failed with `err` before producing a response.
    pub fn failed(cmd: ProbeCmd, err: ProbeError) -> Self {
        match cmd {
            ProbeCmd::Create { .. } => Self::Created { result: Err(err) },
            ProbeCmd::Fetch { id } => Self::Fetched {
                id,
                result: Err(err),
            },
            ProbeCmd::Health => Self::Health { result: Err(err) },
            ProbeCmd::View { ticket } => Self::Viewed {
                ticket,
                result: Err(err),
            },
        }
    }
}
