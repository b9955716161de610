use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::error::DashboardError;
use crate::state::{AppState, Command};
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub title: String,
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(title: String, state: AppState) -> Self {
        Self { title, state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut commands: Vec<Command> = Vec::new();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &mut commands);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state, &mut commands);
            });

        // ---- Central panel: charts and raw data ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.title, &self.state);
        });

        // Every interaction of this frame recomputes before the next one.
        for command in commands {
            self.state.dispatch(command);
        }
    }
}

fn banner(ui: &mut Ui, text: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.label(RichText::new(text).color(Color32::RED).strong());
    });
}

/// Text shown in place of the dashboard. Loader failures are shown as-is;
/// a bad cell hit while filtering names the filter step.
fn halt_message(err: &DashboardError) -> String {
    if err.is_fatal() {
        err.to_string()
    } else {
        format!("Filtering failed: {err}")
    }
}

fn dashboard(ui: &mut Ui, title: &str, state: &AppState) {
    ui.heading(title);
    ui.label("Compare metrics across categories and time.");
    ui.add_space(6.0);

    if let Some(err) = state.load_error.as_ref().or(state.filter_error.as_ref()) {
        banner(ui, halt_message(err));
        return;
    }
    let (Some(dataset), Some(views)) = (&state.dataset, &state.views) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view the dashboard  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if let Some(trend) = &views.trend {
                ui.heading("Trend Comparison Over Time");
                match trend {
                    Ok(data) => charts::trend_chart(ui, data, &state.palette),
                    Err(e) => charts::view_error(ui, e),
                }
                ui.separator();
            }

            if let Some(aggregation) = &views.aggregation {
                ui.heading("Category Comparison");
                match aggregation {
                    Ok(totals) => charts::category_bar_chart(ui, totals, &state.palette),
                    Err(e) => charts::view_error(ui, e),
                }
                ui.separator();
            }

            if let Some(correlation) = &views.correlation {
                ui.heading("Scatter Plot for Correlation");
                match correlation {
                    Ok(scatter) => {
                        ui.label(format!("value vs. {}", scatter.y_column));
                        charts::scatter_chart(ui, scatter, &state.palette);
                    }
                    Err(e) => charts::view_error(ui, e),
                }
                ui.separator();
            }

            ui.heading("Raw Data");
            table::raw_table(ui, dataset, &views.filtered);
        });
}
