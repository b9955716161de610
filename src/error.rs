use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between reading the data file and
/// rendering a view.
///
/// Loader variants (`NotFound`, `Io`, `Parse`, `Format`, `EmptyDataset`)
/// halt the whole run. `DateParse` and `Type` are raised while filtering or
/// while building a single view and only affect that step.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("{} file not found.", .0.display())]
    NotFound(PathBuf),

    #[error("Could not read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("Invalid JSON format ({0}). Please check the data file.")]
    Parse(String),

    #[error("JSON data is not a list of objects ({0}). Please check the file format.")]
    Format(String),

    #[error("JSON data is empty. Please add data to the file.")]
    EmptyDataset,

    #[error("Row {row}: cannot read '{value}' in column '{column}' as a date")]
    DateParse {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Row {row}: column '{column}' holds non-numeric value '{value}'")]
    Type {
        row: usize,
        column: String,
        value: String,
    },
}

impl DashboardError {
    /// Whether this error stops the run before any view is built.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            DashboardError::DateParse { .. } | DashboardError::Type { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
