use std::collections::BTreeSet;

use crate::error::Result;

use super::dates::{date_at, DateRange};
use super::model::{Dataset, FieldValue, CATEGORY, DATE};

// ---------------------------------------------------------------------------
// Filter criteria chosen in the side panel
// ---------------------------------------------------------------------------

/// Category selection plus an optional inclusive date interval.
/// An empty category set means "no category filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub categories: BTreeSet<FieldValue>,
    pub date_range: Option<DateRange>,
}

impl FilterCriteria {
    /// Default selection for a freshly loaded dataset: every category, and
    /// `date_range` (normally the dataset's full date span).
    pub fn new(dataset: &Dataset, date_range: Option<DateRange>) -> Self {
        FilterCriteria {
            categories: all_categories(dataset),
            date_range,
        }
    }

    pub fn with_categories<I>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = FieldValue>,
    {
        self.categories = categories.into_iter().collect();
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }
}

/// Distinct categories of the dataset; empty without a `category` column.
pub fn all_categories(dataset: &Dataset) -> BTreeSet<FieldValue> {
    dataset.distinct(CATEGORY).cloned().unwrap_or_default()
}

/// Row indices of the records passing the current criteria, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    pub indices: Vec<usize>,
}

impl FilteredView {
    pub fn all(dataset: &Dataset) -> Self {
        FilteredView {
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Apply `criteria` to `dataset`.
///
/// * Without a `category` column, or with nothing / everything selected,
///   categories do not constrain rows.
/// * Without a `date` column or a date range, dates do not constrain rows.
/// * Dates are only parsed for rows that pass the category test. A date that
///   does not parse fails the whole filter.
pub fn filter(dataset: &Dataset, criteria: &FilterCriteria) -> Result<FilteredView> {
    let category_active = match dataset.distinct(CATEGORY) {
        Some(all) => !criteria.categories.is_empty() && !all.is_subset(&criteria.categories),
        None => false,
    };
    let date_range = if dataset.has_column(DATE) {
        criteria.date_range
    } else {
        None
    };

    let mut indices = Vec::new();
    for (row, rec) in dataset.records.iter().enumerate() {
        if category_active && !criteria.categories.contains(&rec.category_key()) {
            continue;
        }
        if let Some(range) = date_range {
            if !range.contains(date_at(rec.date(), row)?) {
                continue;
            }
        }
        indices.push(row);
    }

    Ok(FilteredView { indices })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dates::date_bounds;
    use crate::data::loader::parse_dataset;
    use crate::error::DashboardError;
    use chrono::NaiveDate;

    /// Materialise a view as a dataset with the same schema.
    fn subset(dataset: &Dataset, view: &FilteredView) -> Dataset {
        let records = view
            .indices
            .iter()
            .map(|&i| dataset.records[i].clone())
            .collect();
        Dataset::new(records, dataset.column_names.clone())
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cat(s: &str) -> FieldValue {
        FieldValue::String(s.to_string())
    }

    fn sample() -> Dataset {
        parse_dataset(
            r#"[
                {"category": "A", "date": "2024-01-01", "value": 10},
                {"category": "B", "date": "2024-02-01", "value": 20},
                {"category": "A", "date": "2024-03-15", "value": 5},
                {"category": "C", "date": "2023-11-30", "value": 7},
                {"category": "B", "date": "2024-12-31", "value": 1}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn category_and_date_scenario() {
        let ds = parse_dataset(
            r#"[{"category": "A", "date": "2024-01-01", "value": 10},
                {"category": "B", "date": "2024-02-01", "value": 20}]"#,
        )
        .unwrap();
        let criteria = FilterCriteria::default()
            .with_categories([cat("A")])
            .with_date_range(DateRange::new(ymd(2024, 1, 1), ymd(2024, 12, 31)));

        let view = filter(&ds, &criteria).unwrap();
        assert_eq!(view.indices, vec![0]);
    }

    #[test]
    fn full_selection_keeps_everything() {
        let ds = sample();
        let criteria = FilterCriteria::new(&ds, date_bounds(&ds).unwrap());
        assert_eq!(criteria.categories.len(), 3);
        assert_eq!(filter(&ds, &criteria).unwrap(), FilteredView::all(&ds));

        let empty = FilterCriteria::default();
        assert_eq!(filter(&ds, &empty).unwrap(), FilteredView::all(&ds));
    }

    #[test]
    fn result_is_an_ordered_subsequence() {
        let ds = sample();
        let criteria = FilterCriteria::default()
            .with_categories([cat("A"), cat("B")])
            .with_date_range(DateRange::new(ymd(2024, 1, 1), ymd(2024, 6, 30)));

        let view = filter(&ds, &criteria).unwrap();
        assert_eq!(view.indices, vec![0, 1, 2]);
        assert!(view.indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = sample();
        let criteria = FilterCriteria::default()
            .with_categories([cat("B"), cat("C")])
            .with_date_range(DateRange::new(ymd(2023, 1, 1), ymd(2024, 6, 30)));

        let once = subset(&ds, &filter(&ds, &criteria).unwrap());
        let twice = subset(&once, &filter(&once, &criteria).unwrap());
        assert_eq!(once.records, twice.records);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn missing_columns_make_filters_no_ops() {
        let ds = parse_dataset(r#"[{"value": 1}, {"value": 2}]"#).unwrap();
        let criteria = FilterCriteria::default()
            .with_categories([cat("A")])
            .with_date_range(DateRange::new(ymd(2030, 1, 1), ymd(2030, 1, 2)));
        assert_eq!(filter(&ds, &criteria).unwrap().indices, vec![0, 1]);
    }

    #[test]
    fn malformed_date_is_reported() {
        let ds = parse_dataset(
            r#"[{"category": "A", "date": "2024-01-01"},
                {"category": "A", "date": "not a date"}]"#,
        )
        .unwrap();
        let criteria = FilterCriteria::default()
            .with_date_range(DateRange::new(ymd(2024, 1, 1), ymd(2024, 12, 31)));

        assert_eq!(
            filter(&ds, &criteria),
            Err(DashboardError::DateParse {
                row: 1,
                column: "date".into(),
                value: "not a date".into(),
            })
        );
    }

    #[test]
    fn dates_of_excluded_categories_are_not_parsed() {
        let ds = parse_dataset(
            r#"[{"category": "A", "date": "2024-01-01"},
                {"category": "B", "date": "garbage"}]"#,
        )
        .unwrap();
        let criteria = FilterCriteria::default()
            .with_categories([cat("A")])
            .with_date_range(DateRange::new(ymd(2024, 1, 1), ymd(2024, 12, 31)));

        assert_eq!(filter(&ds, &criteria).unwrap().indices, vec![0]);
    }

    #[test]
    fn time_of_day_on_end_date_is_included() {
        let ds = parse_dataset(
            r#"[{"date": "2024-12-31T18:00:00", "value": 1},
                {"date": "2025-01-01T00:00:00", "value": 2},
                {"date": "2024-01-01 08:30:00", "value": 3}]"#,
        )
        .unwrap();
        let criteria = FilterCriteria::default()
            .with_date_range(DateRange::new(ymd(2024, 1, 1), ymd(2024, 12, 31)));
        assert_eq!(filter(&ds, &criteria).unwrap().indices, vec![0, 2]);
    }

    #[test]
    fn missing_date_is_reported() {
        let ds = parse_dataset(r#"[{"date": "2024-01-01"}, {"value": 5}]"#).unwrap();
        let criteria = FilterCriteria::default()
            .with_date_range(DateRange::new(ymd(2024, 1, 1), ymd(2024, 12, 31)));
        assert!(matches!(
            filter(&ds, &criteria),
            Err(DashboardError::DateParse { row: 1, .. })
        ));
    }

    #[test]
    fn null_category_can_be_selected() {
        let ds = parse_dataset(
            r#"[{"category": "A"}, {"category": null}, {"other": 1}, {"category": "B"}]"#,
        )
        .unwrap();
        let criteria = FilterCriteria::default().with_categories([FieldValue::Null]);
        assert_eq!(filter(&ds, &criteria).unwrap().indices, vec![1, 2]);
    }
}
