use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use income_eda::dashboard::{SectionBody, TextTable};

use super::plot;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – the dashboard sections, top to bottom
// ---------------------------------------------------------------------------

/// Render every section of the dashboard.
pub fn dashboard_view(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new(&state.dashboard.title).strong());
            ui.add_space(8.0);

            for (idx, section) in state.dashboard.sections.iter().enumerate() {
                ui.push_id(idx, |ui: &mut Ui| {
                    ui.label(RichText::new(&section.heading).heading().size(18.0));
                    match &section.body {
                        SectionBody::Table(table) if state.tables_as_markdown => {
                            ui.code(table.to_markdown());
                        }
                        SectionBody::Table(table) => text_table(ui, table),
                        SectionBody::Chart(chart) => plot::chart(ui, chart, idx),
                    }
                });
                ui.separator();
            }
        });
}

fn text_table(ui: &mut Ui, table: &TextTable) {
    ScrollArea::horizontal()
        .id_salt("table_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .columns(Column::auto().at_least(40.0), table.header.len())
                .header(20.0, |mut header| {
                    for name in &table.header {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|mut body| {
                    for row in &table.rows {
                        body.row(18.0, |mut table_row| {
                            for cell in row {
                                table_row.col(|ui: &mut Ui| {
                                    ui.label(cell);
                                });
                            }
                        });
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export figures…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let summary = &state.dashboard.summary;
        ui.label(format!(
            "{} · {} columns, {} numeric",
            state.source.display(),
            summary.preview.columns.len(),
            summary.statistics.len()
        ));

        ui.separator();

        if ui
            .selectable_label(state.tables_as_markdown, "Markdown tables")
            .clicked()
        {
            state.tables_as_markdown = !state.tables_as_markdown;
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export dashboard figures")
        .add_filter("JSON", &["json"])
        .set_file_name("dashboard.json")
        .save_file();

    if let Some(path) = file {
        state.export_figures(&path);
    }
}
