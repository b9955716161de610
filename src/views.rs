use crate::data::aggregate::{aggregate, CategoryTotals};
use crate::data::correlation::{scatter_points, select_auxiliary_metric, ScatterData};
use crate::data::filter::{filter, FilterCriteria, FilteredView};
use crate::data::model::{Dataset, CATEGORY, DATE, VALUE};
use crate::data::trend::{trend_series, TrendData};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Which views the current schema supports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eligibility {
    /// `date` and `value` present.
    pub trend: bool,
    /// `category` and `value` present.
    pub aggregation: bool,
    /// The auxiliary metric, when `value` and another numeric column exist.
    pub correlation: Option<String>,
}

pub fn eligibility(dataset: &Dataset) -> Eligibility {
    let has_value = dataset.has_column(VALUE);
    Eligibility {
        trend: has_value && dataset.has_column(DATE),
        aggregation: has_value && dataset.has_column(CATEGORY),
        correlation: if has_value {
            select_auxiliary_metric(dataset).map(str::to_string)
        } else {
            None
        },
    }
}

// ---------------------------------------------------------------------------
// Derived data for one render pass
// ---------------------------------------------------------------------------

/// Outcome of a single view. A failed view carries its own error and
/// does not affect the others.
pub type ViewOutcome<T> = std::result::Result<T, DashboardError>;

/// Everything the central panel draws. `None` means the view is not
/// eligible for this dataset and is left out.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardViews {
    /// Rows shown by the raw data table.
    pub filtered: FilteredView,
    pub trend: Option<ViewOutcome<TrendData>>,
    pub aggregation: Option<ViewOutcome<CategoryTotals>>,
    pub correlation: Option<ViewOutcome<ScatterData>>,
}

/// Filter the dataset and build every eligible view from the result.
/// Only a filter failure is returned as an error.
pub fn build_views(dataset: &Dataset, criteria: &FilterCriteria) -> Result<DashboardViews> {
    let filtered = filter(dataset, criteria)?;
    let eligible = eligibility(dataset);

    let trend = eligible
        .trend
        .then(|| logged("trend", trend_series(dataset, &filtered)));
    let aggregation = if eligible.aggregation {
        aggregate(dataset, &filtered)
            .transpose()
            .map(|r| logged("aggregation", r))
    } else {
        None
    };
    let correlation = eligible
        .correlation
        .as_deref()
        .map(|aux| logged("correlation", scatter_points(dataset, &filtered, aux)));

    Ok(DashboardViews {
        filtered,
        trend,
        aggregation,
        correlation,
    })
}

fn logged<T>(view: &str, outcome: ViewOutcome<T>) -> ViewOutcome<T> {
    if let Err(e) = &outcome {
        log::warn!("{view} view unavailable: {e}");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dates::DateRange;
    use crate::data::loader::parse_dataset;
    use crate::data::model::FieldValue;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn full_dataset_enables_every_view() {
        let ds = parse_dataset(
            r#"[{"category": "A", "date": "2024-01-01", "value": 10, "units": 2},
                {"category": "B", "date": "2024-02-01", "value": 20, "units": 4}]"#,
        )
        .unwrap();
        let criteria = FilterCriteria::default()
            .with_categories([FieldValue::String("A".into())])
            .with_date_range(DateRange::new(ymd(2024, 1, 1), ymd(2024, 12, 31)));

        let views = build_views(&ds, &criteria).unwrap();
        assert_eq!(views.filtered.indices, vec![0]);

        let totals = views.aggregation.unwrap().unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get(&FieldValue::String("A".into())), Some(10.0));

        assert_eq!(views.trend.unwrap().unwrap().point_count(), 1);
        let scatter = views.correlation.unwrap().unwrap();
        assert_eq!(scatter.y_column, "units");
    }

    #[test]
    fn missing_category_skips_aggregation_only() {
        let ds = parse_dataset(
            r#"[{"date": "2024-01-01", "value": 10}, {"date": "2024-02-01", "value": 20}]"#,
        )
        .unwrap();
        let criteria = FilterCriteria::default()
            .with_categories([FieldValue::String("A".into())]);

        let views = build_views(&ds, &criteria).unwrap();
        assert_eq!(views.filtered.indices, vec![0, 1]);
        assert!(views.aggregation.is_none());
        assert!(views.correlation.is_none());
        assert_eq!(views.trend.unwrap().unwrap().point_count(), 2);
    }

    #[test]
    fn failing_view_does_not_hide_others() {
        let ds = parse_dataset(
            r#"[{"category": "A", "date": "2024-01-01", "value": "n/a", "units": 1}]"#,
        )
        .unwrap();
        let views = build_views(&ds, &FilterCriteria::default()).unwrap();

        assert!(matches!(views.aggregation, Some(Err(DashboardError::Type { .. }))));
        assert!(matches!(views.trend, Some(Err(DashboardError::Type { .. }))));
        assert_eq!(views.filtered.len(), 1);
    }

    #[test]
    fn bad_date_only_fails_the_trend() {
        let ds = parse_dataset(
            r#"[{"category": "A", "date": "2024-01-01", "value": 1, "units": 2},
                {"category": "A", "date": "soon", "value": 2, "units": 3}]"#,
        )
        .unwrap();
        let views = build_views(&ds, &FilterCriteria::default()).unwrap();

        assert!(matches!(
            views.trend,
            Some(Err(DashboardError::DateParse { row: 1, .. }))
        ));
        let totals = views.aggregation.unwrap().unwrap();
        assert_eq!(totals.get(&FieldValue::String("A".into())), Some(3.0));
        assert_eq!(views.correlation.unwrap().unwrap().point_count(), 2);
    }

    #[test]
    fn correlation_needs_value_column() {
        let ds = parse_dataset(r#"[{"units": 1, "cost": 2}]"#).unwrap();
        let eligible = eligibility(&ds);
        assert_eq!(
            eligible,
            Eligibility {
                trend: false,
                aggregation: false,
                correlation: None,
            }
        );
    }

    #[test]
    fn filter_failure_is_returned() {
        let ds = parse_dataset(r#"[{"date": "later", "value": 1}]"#).unwrap();
        let criteria = FilterCriteria::default()
            .with_date_range(DateRange::new(ymd(2024, 1, 1), ymd(2024, 1, 31)));
        assert!(matches!(
            build_views(&ds, &criteria),
            Err(DashboardError::DateParse { .. })
        ));
    }
}
