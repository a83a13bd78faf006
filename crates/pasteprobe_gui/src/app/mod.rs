//! Native egui app: the create/fetch/health panel and the paste viewer page.

mod style;
mod ui;

use crate::backend::{spawn_backend, BackendHandle, ProbeCmd, ProbeEvent};
use crossbeam_channel::TryRecvError;
use eframe::egui;
use pasteprobe_core::viewer::save_download;
use pasteprobe_core::{ApiClient, ClientConfig, Panel, ProbeError, Viewer};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub(crate) const DEFAULT_WINDOW_SIZE: [f32; 2] = [960.0, 760.0];
pub(crate) const MIN_WINDOW_SIZE: [f32; 2] = [560.0, 420.0];
const STATUS_TTL: Duration = Duration::from_secs(4);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Which page is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    Panel,
    Viewer,
}

#[derive(Debug, Clone)]
pub(crate) struct StatusMessage {
    pub(crate) text: String,
    pub(crate) expires_at: Instant,
}

/// Native application shell.
///
/// Owns all view state and talks to the backend worker via channels so the
/// `update` loop never blocks on the network.
pub(crate) struct ProbeApp {
    backend: BackendHandle,
    backend_alive: bool,
    server: String,
    panel: Panel,
    viewer: Viewer,
    /// Identifier field of the viewer page's navigation bar.
    viewer_input: String,
    route: Route,
    status: Option<StatusMessage>,
    style_applied: bool,
}

impl ProbeApp {
    /// Build the app and spawn its backend worker.
    ///
    /// # Errors
    /// Returns an error when the configured server URL is unusable.
    pub(crate) fn new(
        config: &ClientConfig,
        initial_view: Option<String>,
    ) -> Result<Self, ProbeError> {
        let client = ApiClient::new(config)?;
        info!("using pastebin API at {}", client.base());
        let backend = spawn_backend(client);
        Ok(Self::with_backend(
            backend,
            config.server.clone(),
            initial_view,
        ))
    }

    pub(crate) fn with_backend(
        backend: BackendHandle,
        server: String,
        initial_view: Option<String>,
    ) -> Self {
        let mut app = Self {
            backend,
            backend_alive: true,
            server,
            panel: Panel::new(),
            viewer: Viewer::new(),
            viewer_input: String::new(),
            route: Route::Panel,
            status: None,
            style_applied: false,
        };
        if let Some(id) = initial_view {
            app.open_viewer(&id);
        }
        app
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            expires_at: Instant::now() + STATUS_TTL,
        });
    }

    fn expire_status(&mut self, now: Instant) {
        if self
            .status
            .as_ref()
            .is_some_and(|status| now >= status.expires_at)
        {
            self.status = None;
        }
    }

    /// Send a command, turning a dead worker into an error on the command's slot.
    fn dispatch(&mut self, cmd: ProbeCmd) {
        if let Err(err) = self.backend.cmd_tx.send(cmd) {
            warn!("backend worker is not running; request dropped");
            self.backend_alive = false;
            let event = ProbeEvent::failed(
                err.into_inner(),
                ProbeError::Transport("backend worker is not running".to_string()),
            );
            self.apply_event(event);
        }
    }

    /// Panel busy rejections only surface in the status line; validation
    /// errors are already shown in the action's slot.
    fn report_rejection(&mut self, err: ProbeError) {
        if matches!(err, ProbeError::Busy(_)) {
            self.set_status(err.to_string());
        }
    }

    pub(crate) fn submit_create(&mut self) {
        match self.panel.begin_create() {
            Ok(request) => self.dispatch(ProbeCmd::Create { request }),
            Err(err) => self.report_rejection(err),
        }
    }

    pub(crate) fn submit_fetch(&mut self) {
        match self.panel.begin_fetch() {
            Ok(id) => self.dispatch(ProbeCmd::Fetch { id }),
            Err(err) => self.report_rejection(err),
        }
    }

    pub(crate) fn submit_health(&mut self) {
        match self.panel.begin_health() {
            Ok(()) => self.dispatch(ProbeCmd::Health),
            Err(err) => self.report_rejection(err),
        }
    }

    pub(crate) fn clear_draft(&mut self) {
        self.panel.clear_draft();
    }

    /// Navigate to the viewer page for `id`. Entering the page always fetches.
    pub(crate) fn open_viewer(&mut self, id: &str) {
        self.route = Route::Viewer;
        self.viewer_input = id.trim().to_string();
        if let Some(ticket) = self.viewer.mount(id) {
            self.dispatch(ProbeCmd::View { ticket });
        }
    }

    /// Open the id typed into the viewer's own field; a no-op when it is
    /// already the paste on screen.
    pub(crate) fn submit_viewer_input(&mut self) {
        if let Some(ticket) = self.viewer.navigate(&self.viewer_input) {
            self.dispatch(ProbeCmd::View { ticket });
        }
    }

    pub(crate) fn reload_viewer(&mut self) {
        if let Some(ticket) = self.viewer.reload() {
            self.dispatch(ProbeCmd::View { ticket });
        }
    }

    pub(crate) fn back_to_panel(&mut self) {
        self.route = Route::Panel;
    }

    pub(crate) fn apply_event(&mut self, event: ProbeEvent) {
        match event {
            ProbeEvent::Created { result } => {
                if let Ok(created) = &result {
                    self.set_status(format!("Created paste {}", created.id));
                }
                self.panel.finish_create(result);
            }
            ProbeEvent::Fetched { result, .. } => self.panel.finish_fetch(result),
            ProbeEvent::Health { result } => self.panel.finish_health(result),
            ProbeEvent::Viewed { ticket, result } => {
                self.viewer.commit(&ticket, result);
            }
        }
    }

    /// Drain every event the worker has produced so far.
    pub(crate) fn poll_backend(&mut self) {
        loop {
            match self.backend.evt_rx.try_recv() {
                Ok(event) => self.apply_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.backend_alive {
                        warn!("backend worker disconnected");
                        self.backend_alive = false;
                        self.set_status("Backend worker stopped; restart the app.");
                    }
                    break;
                }
            }
        }
    }

    fn has_pending_work(&self) -> bool {
        self.panel.is_busy() || self.viewer.state().is_loading() || self.status.is_some()
    }

    /// Copy the viewed paste's content to the clipboard.
    pub(crate) fn copy_viewed_content(&mut self, ctx: &egui::Context) {
        let Some(record) = self.viewer.state().success() else {
            return;
        };
        ctx.copy_text(record.content.clone());
        self.set_status("Copied paste content to clipboard.");
    }

    /// Save the viewed paste through a native save dialog.
    pub(crate) fn download_viewed_content(&mut self) {
        let Some(record) = self.viewer.state().success() else {
            self.set_status("Nothing to download yet.");
            return;
        };
        let file_name = pasteprobe_core::viewer::download_file_name(&record.id);
        let content = record.content.clone();
        let dialog = rfd::FileDialog::new()
            .set_file_name(file_name.as_str())
            .add_filter("Text", &["txt"]);
        let Some(path) = dialog.save_file() else {
            return;
        };
        self.save_viewed_content(&path, &content);
    }

    fn save_viewed_content(&mut self, path: &Path, content: &str) {
        match save_download(path, content) {
            Ok(()) => self.set_status(format!("Saved {}", path.display())),
            Err(err) => {
                warn!("failed to save paste to {}: {}", path.display(), err);
                self.set_status(format!("Download failed: {}", err));
            }
        }
    }
}

impl eframe::App for ProbeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_style(ctx);
        self.poll_backend();
        self.expire_status(Instant::now());

        self.render_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.route {
                    Route::Panel => self.render_panel(ui),
                    Route::Viewer => self.render_viewer(ui),
                });
        });

        if self.has_pending_work() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
    }
}
