use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::{DashboardError, Result};

use super::model::{Dataset, FieldValue, DATE};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Inclusive calendar-date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Parse an ISO-like date string. Time of day and offsets are dropped.
pub fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Read the date cell of `row`. Anything but a parseable string fails,
/// including a missing or null date.
pub fn date_at(value: Option<&FieldValue>, row: usize) -> Result<NaiveDate> {
    let parsed = match value {
        Some(FieldValue::String(s)) => parse_date_str(s),
        _ => None,
    };
    parsed.ok_or_else(|| DashboardError::DateParse {
        row,
        column: DATE.to_string(),
        value: value.unwrap_or(&FieldValue::Null).to_string(),
    })
}

/// The `[min, max]` date interval of the dataset, or `None` without a
/// `date` column.
pub fn date_bounds(dataset: &Dataset) -> Result<Option<DateRange>> {
    if !dataset.has_column(DATE) {
        return Ok(None);
    }

    let mut bounds: Option<DateRange> = None;
    for (row, rec) in dataset.records.iter().enumerate() {
        let date = date_at(rec.date(), row)?;
        bounds = Some(match bounds {
            None => DateRange::new(date, date),
            Some(b) => DateRange::new(b.start.min(date), b.end.max(date)),
        });
    }
    Ok(bounds)
}

// ---------------------------------------------------------------------------
// Plot axis mapping: dates are plotted as days since 0001-01-01
// ---------------------------------------------------------------------------

pub fn to_plot_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

pub fn from_plot_x(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() || x.abs() > i32::MAX as f64 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}
