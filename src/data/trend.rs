use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::Result;

use super::dates::date_at;
use super::filter::FilteredView;
use super::model::{Dataset, FieldValue};

/// `value` over time, one series per category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendData {
    /// Category → (date, value) points sorted by date. Without a `category`
    /// column all points share the null key.
    pub series: BTreeMap<FieldValue, Vec<(NaiveDate, f64)>>,
}

impl TrendData {
    pub fn point_count(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }
}

pub fn trend_series(dataset: &Dataset, view: &FilteredView) -> Result<TrendData> {
    let mut series: BTreeMap<FieldValue, Vec<(NaiveDate, f64)>> = BTreeMap::new();

    for &row in &view.indices {
        let rec = &dataset.records[row];
        let date = date_at(rec.date(), row)?;
        let Some(value) = rec.numeric_value(row)? else {
            continue;
        };
        series
            .entry(rec.category_key())
            .or_default()
            .push((date, value));
    }

    // Stable: rows sharing a date keep their source order.
    for points in series.values_mut() {
        points.sort_by_key(|(date, _)| *date);
    }

    Ok(TrendData { series })
}
