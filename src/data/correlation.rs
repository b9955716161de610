use std::collections::BTreeMap;

use crate::error::Result;

use super::filter::FilteredView;
use super::model::{Dataset, FieldValue, VALUE};

/// Pick the column plotted against `value` in the correlation view.
///
/// This is a heuristic: the first numeric column other than `value`, in
/// schema order. Later numeric columns are never offered.
pub fn select_auxiliary_metric(dataset: &Dataset) -> Option<&str> {
    dataset
        .column_names
        .iter()
        .find(|col| col.as_str() != VALUE && dataset.is_numeric_column(col))
        .map(String::as_str)
}

/// `value` (x) against the auxiliary metric (y), grouped by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterData {
    pub y_column: String,
    pub series: BTreeMap<FieldValue, Vec<[f64; 2]>>,
}

impl ScatterData {
    pub fn point_count(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }
}

/// Rows with a null in either coordinate are left out.
pub fn scatter_points(dataset: &Dataset, view: &FilteredView, aux: &str) -> Result<ScatterData> {
    let mut series: BTreeMap<FieldValue, Vec<[f64; 2]>> = BTreeMap::new();

    for &row in &view.indices {
        let rec = &dataset.records[row];
        let x = rec.numeric_value(row)?;
        let y = rec.get(aux).numeric_at(row, aux)?;
        if let (Some(x), Some(y)) = (x, y) {
            series
                .entry(rec.category_key())
                .or_default()
                .push([x, y]);
        }
    }

    Ok(ScatterData {
        y_column: aux.to_string(),
        series,
    })
}
