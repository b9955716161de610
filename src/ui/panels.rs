use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::model::{CATEGORY, DATE};
use crate::state::{AppState, Command};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter panel. Interactions are queued in `commands`.
pub fn side_panel(ui: &mut Ui, state: &AppState, commands: &mut Vec<Command>) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Category multi-select ----
            match dataset.distinct(CATEGORY) {
                Some(all_values) => {
                    let selected = &state.criteria.categories;
                    let header_text = format!(
                        "Select Categories  ({}/{})",
                        selected.intersection(all_values).count(),
                        all_values.len()
                    );

                    egui::CollapsingHeader::new(RichText::new(header_text).strong())
                        .id_salt("categories")
                        .default_open(true)
                        .show(ui, |ui: &mut Ui| {
                            ui.horizontal(|ui: &mut Ui| {
                                if ui.small_button("All").clicked() {
                                    commands.push(Command::SelectAllCategories);
                                }
                                if ui.small_button("None").clicked() {
                                    commands.push(Command::SelectNoCategories);
                                }
                            });
                            if selected.is_empty() {
                                ui.weak("Nothing selected: showing every category.");
                            }

                            for val in all_values {
                                let text = RichText::new(val.to_string())
                                    .color(state.palette.color_for(val));
                                let mut checked = selected.contains(val);
                                if ui.checkbox(&mut checked, text).changed() {
                                    commands.push(Command::ToggleCategory(val.clone()));
                                }
                            }
                        });
                }
                None => {
                    ui.label("No 'category' column found.");
                }
            }
            ui.separator();

            // ---- Date range ----
            ui.strong("Select Date Range");
            match state.criteria.date_range {
                Some(range) => {
                    let mut start = range.start;
                    let mut end = range.end;
                    ui.horizontal(|ui: &mut Ui| {
                        ui.label("From");
                        if ui
                            .add(DatePickerButton::new(&mut start).id_salt("date_start"))
                            .changed()
                        {
                            commands.push(Command::SetDateStart(start));
                        }
                    });
                    ui.horizontal(|ui: &mut Ui| {
                        ui.label("To");
                        if ui
                            .add(DatePickerButton::new(&mut end).id_salt("date_end"))
                            .changed()
                        {
                            commands.push(Command::SetDateEnd(end));
                        }
                    });
                    if start > end {
                        ui.colored_label(Color32::YELLOW, "Start is after end: no rows match.");
                    }
                    if state.date_bounds != Some(range) && ui.small_button("Reset").clicked() {
                        commands.push(Command::ResetDateRange);
                    }
                }
                None if dataset.has_column(DATE) => {
                    if let Some(notice) = &state.date_notice {
                        ui.colored_label(Color32::YELLOW, notice.to_string());
                    }
                }
                None => {
                    ui.label("No 'date' column found.");
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState, commands: &mut Vec<Command>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                if let Some(path) = pick_data_file() {
                    commands.push(Command::Open(path));
                }
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                commands.push(Command::Reload);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(source) = &state.source {
            ui.label(source.display().to_string());
        }

        if let Some(ds) = &state.dataset {
            ui.separator();
            ui.label(format!(
                "{} rows loaded, {} visible",
                ds.len(),
                state.visible_count()
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

fn pick_data_file() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open dashboard data")
        .add_filter("JSON", &["json"])
        .pick_file()
}
