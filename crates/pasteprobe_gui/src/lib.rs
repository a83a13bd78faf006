//! Native egui front end for PasteProbe.
//!
//! Exposes a `run` helper so the workspace root can launch the UI without
//! duplicating initialization logic.

mod app;
/// Backend worker + protocol types used by the GUI and headless tests.
pub mod backend;

use app::ProbeApp;
use eframe::egui;
use pasteprobe_core::ClientConfig;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pasteprobe=warn,pasteprobe_gui=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Paste id to open in the viewer, from `--view <id>` or `--view=<id>`.
fn initial_view_from_args<I>(args: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--view" {
            return args.next();
        }
        if let Some(id) = arg.strip_prefix("--view=") {
            return Some(id.to_string());
        }
    }
    None
}

/// Start the native UI with tracing enabled.
///
/// # Returns
/// The result of `eframe::run_native`.
///
/// # Errors
/// Propagates any `eframe` initialization or runtime error, including app
/// creation failures when the configured server URL is unusable.
pub fn run() -> eframe::Result<()> {
    init_tracing();

    let config = ClientConfig::from_env();
    let initial_view = initial_view_from_args(std::env::args());
    let app = ProbeApp::new(&config, initial_view)
        .map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(app::DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(app::MIN_WINDOW_SIZE)
            .with_title("PasteProbe"),
        ..Default::default()
    };

    eframe::run_native("PasteProbe", options, Box::new(|_cc| Ok(Box::new(app))))
}
