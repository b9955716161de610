use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{DashboardError, Result};

/// Column holding the category label used for filtering and grouping.
pub const CATEGORY: &str = "category";
/// Column holding the observation date.
pub const DATE: &str = "date";
/// Column holding the primary metric.
pub const VALUE: &str = "value";

// ---------------------------------------------------------------------------
// FieldValue – a single cell of the dataset
// ---------------------------------------------------------------------------

/// A dynamically-typed scalar taken from one JSON field.
/// Categories live in `BTreeSet`s and `BTreeMap` keys, so `FieldValue` must be `Ord`.
/// Equality follows the ordering.
#[derive(Debug, Clone)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

static NULL: FieldValue = FieldValue::Null;

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use FieldValue::*;
        fn rank(v: &FieldValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) | Float(_) => 2,
                String(_) => 3,
            }
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Integer(a), Float(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Float(a), Integer(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (String(a), String(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Null => write!(f, "<null>"),
        }
    }
}

impl From<&serde_json::Value> for FieldValue {
    fn from(val: &serde_json::Value) -> Self {
        use serde_json::Value;
        match val {
            Value::String(s) => FieldValue::String(s.clone()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    // -0.0 and 0.0 are one category.
                    FieldValue::Float(if f == 0.0 { 0.0 } else { f })
                } else {
                    FieldValue::String(n.to_string())
                }
            }
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Null => FieldValue::Null,
            // Nested arrays/objects are shown as their JSON text.
            other => FieldValue::String(other.to_string()),
        }
    }
}

impl FieldValue {
    /// Interpret the value as an `f64` (integers and floats only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Integer(_) | FieldValue::Float(_))
    }

    /// Read a numeric cell. Null yields `Ok(None)`; anything else that is not
    /// a number is a type error for `column` at `row`.
    pub fn numeric_at(&self, row: usize, column: &str) -> Result<Option<f64>> {
        match self {
            FieldValue::Null => Ok(None),
            v => v.as_f64().map(Some).ok_or_else(|| DashboardError::Type {
                row,
                column: column.to_string(),
                value: v.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one object of the input array
// ---------------------------------------------------------------------------

/// A single observation. Fields missing from the source object read as null.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(fields: BTreeMap<String, FieldValue>) -> Self {
        Record { fields }
    }

    pub fn get(&self, column: &str) -> &FieldValue {
        self.fields.get(column).unwrap_or(&NULL)
    }

    /// Non-null value of `column`; `None` when the field is missing or null.
    fn present(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column).filter(|v| !v.is_null())
    }

    pub fn category(&self) -> Option<&FieldValue> {
        self.present(CATEGORY)
    }

    pub fn date(&self) -> Option<&FieldValue> {
        self.present(DATE)
    }

    pub fn value(&self) -> Option<&FieldValue> {
        self.present(VALUE)
    }

    /// Category used as a grouping key; rows without one share the null key.
    pub fn category_key(&self) -> FieldValue {
        self.category().cloned().unwrap_or(FieldValue::Null)
    }

    /// The `value` field as a number. See [`FieldValue::numeric_at`].
    pub fn numeric_value(&self, row: usize) -> Result<Option<f64>> {
        self.value().map_or(Ok(None), |v| v.numeric_at(row, VALUE))
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The parsed dataset with its schema and pre-computed distinct values.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// All rows, in source order.
    pub records: Vec<Record>,
    /// Union of field names in first-seen order.
    pub column_names: Vec<String>,
    /// For each column the sorted set of distinct values (null included).
    pub unique_values: BTreeMap<String, BTreeSet<FieldValue>>,
}

impl Dataset {
    /// Build the column index for `records` under the given schema.
    /// Columns a record lacks count as null for that record.
    pub fn new(records: Vec<Record>, column_names: Vec<String>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<FieldValue>> = column_names
            .iter()
            .map(|c| (c.clone(), BTreeSet::new()))
            .collect();

        for rec in &records {
            for (col, vals) in unique_values.iter_mut() {
                vals.insert(rec.get(col).clone());
            }
        }

        Dataset {
            records,
            column_names,
            unique_values,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    /// Distinct values of `column`, if the column exists.
    pub fn distinct(&self, column: &str) -> Option<&BTreeSet<FieldValue>> {
        self.unique_values.get(column)
    }

    /// A column is numeric when it holds at least one number and nothing
    /// but numbers and nulls.
    pub fn is_numeric_column(&self, column: &str) -> bool {
        match self.unique_values.get(column) {
            Some(vals) => {
                vals.iter().any(FieldValue::is_numeric)
                    && vals.iter().all(|v| v.is_numeric() || v.is_null())
            }
            None => false,
        }
    }
}
