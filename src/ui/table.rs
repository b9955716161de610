use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::FilteredView;
use crate::data::model::{Dataset, FieldValue};

const ROW_HEIGHT: f32 = 18.0;

/// Raw data table over the filtered rows, one column per dataset field.
pub fn raw_table(ui: &mut Ui, dataset: &Dataset, view: &FilteredView) {
    let columns = &dataset.column_names;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(360.0)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(40.0))
        .columns(Column::auto().at_least(70.0).clip(true), columns.len())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            for name in columns {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, view.len(), |mut row| {
                let source_row = view.indices[row.index()];
                let record = &dataset.records[source_row];
                row.col(|ui| {
                    ui.weak(source_row.to_string());
                });
                for name in columns {
                    row.col(|ui| {
                        match record.get(name) {
                            FieldValue::Null => ui.weak("—"),
                            value => ui.label(value.to_string()),
                        };
                    });
                }
            });
        });
}
