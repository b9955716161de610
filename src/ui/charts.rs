use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::CategoryPalette;
use crate::data::aggregate::CategoryTotals;
use crate::data::correlation::ScatterData;
use crate::data::dates::{from_plot_x, to_plot_x};
use crate::data::model::{FieldValue, VALUE};
use crate::data::trend::TrendData;
use crate::error::DashboardError;

const CHART_HEIGHT: f32 = 280.0;

fn series_name(category: &FieldValue) -> String {
    match category {
        FieldValue::Null => VALUE.to_string(),
        other => other.to_string(),
    }
}

/// Shown in place of a chart whose data could not be built.
pub fn view_error(ui: &mut Ui, err: &DashboardError) {
    ui.colored_label(Color32::RED, format!("Chart unavailable: {err}"));
}

// ---------------------------------------------------------------------------
// Trend Comparison Over Time
// ---------------------------------------------------------------------------

pub fn trend_chart(ui: &mut Ui, trend: &TrendData, palette: &CategoryPalette) {
    Plot::new("trend_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("date")
        .y_axis_label("value")
        .x_axis_formatter(|mark: GridMark, _range| {
            from_plot_x(mark.value)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (category, points) in &trend.series {
                let points: PlotPoints = points
                    .iter()
                    .map(|(date, value)| [to_plot_x(*date), *value])
                    .collect();
                let line = Line::new(points)
                    .name(series_name(category))
                    .color(palette.color_for(category))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Total Value by Category
// ---------------------------------------------------------------------------

pub fn category_bar_chart(ui: &mut Ui, totals: &CategoryTotals, palette: &CategoryPalette) {
    let labels: Vec<String> = totals.totals.keys().map(FieldValue::to_string).collect();
    let bars: Vec<Bar> = totals
        .totals
        .iter()
        .enumerate()
        .map(|(i, (category, sum))| {
            Bar::new(i as f64, *sum)
                .name(category.to_string())
                .fill(palette.color_for(category))
                .width(0.6)
        })
        .collect();

    Plot::new("category_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("category")
        .y_axis_label("value")
        .x_axis_formatter(move |mark: GridMark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Total value"));
        });
}

// ---------------------------------------------------------------------------
// Scatter Plot for Correlation
// ---------------------------------------------------------------------------

pub fn scatter_chart(ui: &mut Ui, scatter: &ScatterData, palette: &CategoryPalette) {
    Plot::new("scatter_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(VALUE)
        .y_axis_label(scatter.y_column.as_str())
        .show(ui, |plot_ui| {
            for (category, points) in &scatter.series {
                let points = Points::new(PlotPoints::from(points.clone()))
                    .name(series_name(category))
                    .color(palette.color_for(category))
                    .radius(3.0);
                plot_ui.points(points);
            }
        });
}
