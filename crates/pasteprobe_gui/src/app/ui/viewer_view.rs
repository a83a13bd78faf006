//! Paste viewer page: content, metadata, copy and download.

use super::outcome_ui;
use crate::app::style::COLOR_TEXT_SECONDARY;
use crate::app::ProbeApp;
use eframe::egui;
use pasteprobe_core::PasteRecord;

enum ViewerAction {
    Back,
    Open,
    Reload,
    Copy,
    Download,
}

fn record_ui(ui: &mut egui::Ui, record: &PasteRecord, actions: &mut Vec<ViewerAction>) {
    egui::Grid::new("paste_metadata")
        .num_columns(2)
        .spacing([16.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            for (label, value) in record.metadata_rows() {
                ui.label(egui::RichText::new(label).color(COLOR_TEXT_SECONDARY));
                ui.monospace(value);
                ui.end_row();
            }
        });
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if ui.button("Copy").clicked() {
            actions.push(ViewerAction::Copy);
        }
        if ui.button("Download").clicked() {
            actions.push(ViewerAction::Download);
        }
    });
    ui.add(
        egui::TextEdit::multiline(&mut record.content.as_str())
            .font(egui::TextStyle::Monospace)
            .desired_width(f32::INFINITY)
            .desired_rows(16),
    );
}

impl ProbeApp {
    /// Renders the viewer page for the current identifier.
    pub(crate) fn render_viewer(&mut self, ui: &mut egui::Ui) {
        let mut actions = Vec::new();

        if ui.link("< Back to panel").clicked() {
            actions.push(ViewerAction::Back);
        }
        ui.horizontal(|ui| {
            ui.label("Paste id");
            let response =
                ui.add(egui::TextEdit::singleline(&mut self.viewer_input).desired_width(240.0));
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let open_clicked = ui.button("Open").clicked();
            if submitted || open_clicked {
                actions.push(ViewerAction::Open);
            }
            let can_reload = self.viewer.id().is_some() && !self.viewer.state().is_loading();
            if ui
                .add_enabled(can_reload, egui::Button::new("Reload"))
                .clicked()
            {
                actions.push(ViewerAction::Reload);
            }
        });
        ui.separator();

        if let Some(id) = self.viewer.id() {
            ui.heading(format!("Paste {}", id));
        }
        outcome_ui(ui, self.viewer.state(), "Loading paste...", |ui, record| {
            record_ui(ui, record, &mut actions);
        });

        for action in actions {
            match action {
                ViewerAction::Back => self.back_to_panel(),
                ViewerAction::Open => self.submit_viewer_input(),
                ViewerAction::Reload => self.reload_viewer(),
                ViewerAction::Copy => {
                    let ctx = ui.ctx().clone();
                    self.copy_viewed_content(&ctx);
                }
                ViewerAction::Download => self.download_viewed_content(),
            }
        }
    }
}
