use std::collections::BTreeMap;

use crate::error::Result;

use super::filter::FilteredView;
use super::model::{Dataset, FieldValue, CATEGORY, VALUE};

/// Sum of `value` per category, ordered by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    pub totals: BTreeMap<FieldValue, f64>,
}

impl CategoryTotals {
    pub fn get(&self, category: &FieldValue) -> Option<f64> {
        self.totals.get(category).copied()
    }

    pub fn grand_total(&self) -> f64 {
        self.totals.values().sum()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Group the rows of `view` by category and add up their values.
///
/// Returns `Ok(None)` when the dataset lacks a `category` or `value` column.
/// Null values are skipped; rows without a category form the null group.
pub fn aggregate(dataset: &Dataset, view: &FilteredView) -> Result<Option<CategoryTotals>> {
    if !dataset.has_column(CATEGORY) || !dataset.has_column(VALUE) {
        return Ok(None);
    }

    let mut totals: BTreeMap<FieldValue, f64> = BTreeMap::new();
    for &row in &view.indices {
        let rec = &dataset.records[row];
        let sum = totals.entry(rec.category_key()).or_insert(0.0);
        if let Some(v) = rec.numeric_value(row)? {
            *sum += v;
        }
    }

    Ok(Some(CategoryTotals { totals }))
}
