//! Paste viewer page state: one fetch per identifier, stale results dropped.

use crate::draft::validate_identifier;
use crate::error::ProbeError;
use crate::models::PasteRecord;
use crate::outcome::Outcome;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Token for one viewer request. Results are only applied while the ticket
/// is still the latest one issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTicket {
    pub id: String,
    pub generation: u64,
}

/// Viewer page state keyed by the identifier from the navigation target.
#[derive(Debug, Default)]
pub struct Viewer {
    id: Option<String>,
    generation: u64,
    state: Outcome<PasteRecord>,
}

impl Viewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn state(&self) -> &Outcome<PasteRecord> {
        &self.state
    }

    /// Point the viewer at `raw_id`.
    ///
    /// # Returns
    /// A ticket for exactly one GET when the identifier changed (or on first
    /// mount); `None` when it is unchanged or blank. A blank identifier puts
    /// the page in the error state.
    pub fn navigate(&mut self, raw_id: &str) -> Option<ViewTicket> {
        let id = match validate_identifier(raw_id) {
            Ok(id) => id,
            Err(err) => {
                self.id = None;
                self.generation = self.generation.wrapping_add(1);
                self.state.fail(ProbeError::from(err).to_string());
                return None;
            }
        };
        if self.id.as_deref() == Some(id.as_str()) {
            return None;
        }
        self.id = Some(id);
        self.issue()
    }

    /// Enter the viewer page for `raw_id`.
    ///
    /// Unlike [`Viewer::navigate`], a valid identifier always yields a ticket,
    /// so re-entering the page for the paste already shown fetches it again.
    pub fn mount(&mut self, raw_id: &str) -> Option<ViewTicket> {
        self.id = None;
        self.navigate(raw_id)
    }

    /// Re-request the current identifier.
    pub fn reload(&mut self) -> Option<ViewTicket> {
        self.issue()
    }

    fn issue(&mut self) -> Option<ViewTicket> {
        let id = self.id.clone()?;
        self.generation = self.generation.wrapping_add(1);
        self.state.begin();
        Some(ViewTicket {
            id,
            generation: self.generation,
        })
    }

    /// Apply a response for `ticket`.
    ///
    /// # Returns
    /// `false` when the ticket was superseded and the result was discarded.
    pub fn commit(&mut self, ticket: &ViewTicket, result: Result<PasteRecord, ProbeError>) -> bool {
        if ticket.generation != self.generation || self.id.as_deref() != Some(ticket.id.as_str()) {
            debug!(
                id = %ticket.id,
                generation = ticket.generation,
                current = self.generation,
                "discarding stale viewer response"
            );
            return false;
        }
        self.state.settle(result);
        true
    }

    /// File name offered by the download action for the current paste.
    pub fn download_name(&self) -> Option<String> {
        self.id.as_deref().map(download_file_name)
    }
}

/// `paste-{id}.txt`, with characters outside `[A-Za-z0-9._-]` replaced by `_`.
pub fn download_file_name(id: &str) -> String {
    let safe: String = id
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    format!("paste-{}.txt", safe)
}

/// Write `content` to `dir/paste-{id}.txt`.
///
/// # Returns
/// The path written.
///
/// # Errors
/// Propagates any I/O error from creating or writing the file.
pub fn write_download(dir: &Path, id: &str, content: &str) -> io::Result<PathBuf> {
    let path = dir.join(download_file_name(id));
    save_download(&path, content)?;
    Ok(path)
}

/// Write paste content byte-for-byte to a caller-chosen `path`.
pub fn save_download(path: &Path, content: &str) -> io::Result<()> {
    std::fs::write(path, content.as_bytes())?;
    debug!(path = %path.display(), bytes = content.len(), "saved paste content");
    Ok(())
}
