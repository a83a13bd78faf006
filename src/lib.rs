//! Root crate facade for PasteProbe: the headless client plus the native UI launcher.

pub use pasteprobe_core::{
    client, config, constants, decode, draft, error, models, outcome, panel, viewer, ActionKind,
    ApiClient, ClientConfig, CreatePasteRequest, CreatedPaste, DecodedBody, Outcome, Panel,
    PasteDraft, PasteRecord, ProbeError, ValidationError, ViewTicket, Viewer,
};

#[cfg(feature = "gui")]
pub use pasteprobe_gui::run as run_gui;
