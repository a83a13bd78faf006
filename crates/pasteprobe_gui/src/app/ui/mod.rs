//! UI surfaces extracted from the main app update loop.

/// Create/fetch/health forms and their result blocks.
pub(super) mod panel_view;
/// Bottom status bar content.
pub(super) mod status_bar;
/// Paste viewer page.
pub(super) mod viewer_view;

use super::style::{COLOR_ERROR, COLOR_TEXT_MUTED};
use eframe::egui;
use pasteprobe_core::Outcome;
use serde_json::Value;

/// Render a slot: spinner while loading, red line on error, `success` otherwise.
pub(super) fn outcome_ui<T>(
    ui: &mut egui::Ui,
    outcome: &Outcome<T>,
    loading_label: &str,
    success: impl FnOnce(&mut egui::Ui, &T),
) {
    match outcome {
        Outcome::Idle => {}
        Outcome::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(egui::RichText::new(loading_label).color(COLOR_TEXT_MUTED));
            });
        }
        Outcome::Error(message) => {
            ui.colored_label(COLOR_ERROR, message);
        }
        Outcome::Success(value) => success(ui, value),
    }
}

/// Read-only, selectable pretty-printed JSON block.
pub(super) fn json_block(ui: &mut egui::Ui, value: &Value) {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    ui.add(
        egui::TextEdit::multiline(&mut text.as_str())
            .font(egui::TextStyle::Monospace)
            .desired_width(f32::INFINITY)
            .desired_rows(4),
    );
}
