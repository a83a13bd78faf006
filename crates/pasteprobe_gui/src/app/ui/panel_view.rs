//! Create/fetch/health panel.

use super::{json_block, outcome_ui};
use crate::app::style::{COLOR_SUCCESS, COLOR_TEXT_MUTED, COLOR_TEXT_SECONDARY};
use crate::app::ProbeApp;
use eframe::egui;
use pasteprobe_core::CreatedPaste;
use serde_json::Value;

/// Button presses collected while rendering, applied after the frame's
/// immutable borrows end.
enum PanelAction {
    Create,
    ClearDraft,
    Fetch,
    Health,
    OpenViewer(String),
}

fn section(ui: &mut egui::Ui, title: &str, body: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(title).strong());
        ui.add_space(4.0);
        body(ui);
    });
    ui.add_space(8.0);
}

fn created_ui(ui: &mut egui::Ui, created: &CreatedPaste, actions: &mut Vec<PanelAction>) {
    ui.horizontal(|ui| {
        ui.colored_label(COLOR_SUCCESS, "Created");
        ui.monospace(&created.id);
        if ui.button("Open in viewer").clicked() {
            actions.push(PanelAction::OpenViewer(created.id.clone()));
        }
    });
    egui::Grid::new("created_links")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            ui.label(egui::RichText::new("View").color(COLOR_TEXT_SECONDARY));
            ui.hyperlink(created.view_url.as_str());
            ui.end_row();
            ui.label(egui::RichText::new("API").color(COLOR_TEXT_SECONDARY));
            ui.hyperlink(created.api_url.as_str());
            ui.end_row();
        });
    json_block(ui, &created.payload);
}

fn fetched_ui(
    ui: &mut egui::Ui,
    value: &Value,
    fallback_id: &str,
    actions: &mut Vec<PanelAction>,
) {
    let id = value
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or(fallback_id)
        .to_string();
    if !id.is_empty() && ui.button("Open in viewer").clicked() {
        actions.push(PanelAction::OpenViewer(id));
    }
    json_block(ui, value);
}

impl ProbeApp {
    /// Renders the three action forms and their result slots.
    pub(crate) fn render_panel(&mut self, ui: &mut egui::Ui) {
        let busy = self.panel.is_busy();
        let mut actions = Vec::new();

        ui.heading("PasteProbe");
        ui.label(
            egui::RichText::new(format!("Testing {}", self.server))
                .small()
                .color(COLOR_TEXT_MUTED),
        );
        ui.add_space(8.0);

        section(ui, "Create paste", |ui| {
            ui.add(
                egui::TextEdit::multiline(&mut self.panel.draft.content)
                    .hint_text("Paste content")
                    .desired_rows(6)
                    .desired_width(f32::INFINITY),
            );
            ui.horizontal(|ui| {
                ui.label("TTL (seconds)");
                ui.add(
                    egui::TextEdit::singleline(&mut self.panel.draft.ttl_seconds)
                        .hint_text("optional")
                        .desired_width(100.0),
                );
                ui.label("Max views");
                ui.add(
                    egui::TextEdit::singleline(&mut self.panel.draft.max_views)
                        .hint_text("optional")
                        .desired_width(100.0),
                );
            });
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!busy, egui::Button::new("Create"))
                    .clicked()
                {
                    actions.push(PanelAction::Create);
                }
                if ui
                    .add_enabled(!self.panel.draft.is_blank(), egui::Button::new("Clear"))
                    .clicked()
                {
                    actions.push(PanelAction::ClearDraft);
                }
            });
            outcome_ui(ui, self.panel.create_outcome(), "Creating...", |ui, created| {
                created_ui(ui, created, &mut actions);
            });
        });

        section(ui, "Fetch paste", |ui| {
            let mut submitted = false;
            ui.horizontal(|ui| {
                ui.label("Paste id");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.panel.fetch_id).desired_width(240.0),
                );
                submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.add_enabled(!busy, egui::Button::new("Fetch")).clicked() {
                    submitted = true;
                }
            });
            if submitted && !busy {
                actions.push(PanelAction::Fetch);
            }
            let fallback_id = self.panel.fetch_id.trim().to_string();
            outcome_ui(ui, self.panel.fetch_outcome(), "Fetching...", |ui, value| {
                fetched_ui(ui, value, &fallback_id, &mut actions);
            });
        });

        section(ui, "Health check", |ui| {
            if ui
                .add_enabled(!busy, egui::Button::new("Check health"))
                .clicked()
            {
                actions.push(PanelAction::Health);
            }
            outcome_ui(ui, self.panel.health_outcome(), "Checking...", json_block);
        });

        for action in actions {
            match action {
                PanelAction::Create => self.submit_create(),
                PanelAction::ClearDraft => self.clear_draft(),
                PanelAction::Fetch => self.submit_fetch(),
                PanelAction::Health => self.submit_health(),
                PanelAction::OpenViewer(id) => self.open_viewer(&id),
            }
        }
    }
}
