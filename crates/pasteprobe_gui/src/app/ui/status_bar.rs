//! Bottom status bar rendering for in-flight work and server metadata.

use crate::app::style::{COLOR_TEXT_MUTED, COLOR_TEXT_SECONDARY};
use crate::app::ProbeApp;
use eframe::egui;

impl ProbeApp {
    /// Renders the bottom status bar with the active action, transient
    /// status text, and the configured server.
    pub(crate) fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let mut has_primary_item = false;
                    if let Some(active) = self.panel.active() {
                        ui.spinner();
                        ui.label(
                            egui::RichText::new(format!("{}...", active.label()))
                                .color(COLOR_TEXT_MUTED),
                        );
                        has_primary_item = true;
                    }
                    if let Some(status) = &self.status {
                        if has_primary_item {
                            ui.separator();
                        }
                        ui.label(egui::RichText::new(&status.text).color(egui::Color32::YELLOW));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(format!("API: {}", self.server))
                                    .small()
                                    .color(COLOR_TEXT_SECONDARY),
                            )
                            .truncate(),
                        );
                    });
                });
            });
    }
}
