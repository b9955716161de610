use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use serde_json::Value as JsonValue;

use crate::error::{DashboardError, Result};

use super::model::{Dataset, FieldValue, Record};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read and validate a dataset file.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    parse_dataset(&text)
}

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "category": "A", "date": "2024-01-01", "value": 10, "units": 3 },
///   ...
/// ]
/// ```
///
/// Key order of the objects (first occurrence wins) becomes the column order.
pub fn parse_dataset(text: &str) -> Result<Dataset> {
    let root: JsonValue =
        serde_json::from_str(text).map_err(|e| DashboardError::Parse(e.to_string()))?;

    let rows = match root {
        JsonValue::Array(rows) => rows,
        other => {
            return Err(DashboardError::Format(format!(
                "top-level value is {}",
                json_kind(&other)
            )))
        }
    };

    if rows.is_empty() {
        return Err(DashboardError::EmptyDataset);
    }

    let mut column_names: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or_else(|| {
            DashboardError::Format(format!("row {i} is {}", json_kind(row)))
        })?;

        let mut fields = BTreeMap::new();
        for (key, val) in obj {
            if !column_names.iter().any(|c| c == key) {
                column_names.push(key.clone());
            }
            fields.insert(key.clone(), FieldValue::from(val));
        }
        records.push(Record::new(fields));
    }

    Ok(Dataset::new(records, column_names))
}

fn json_kind(val: &JsonValue) -> &'static str {
    match val {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

fn io_error(path: &Path, err: std::io::Error) -> DashboardError {
    match err.kind() {
        ErrorKind::NotFound => DashboardError::NotFound(path.to_path_buf()),
        _ => DashboardError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Source-keyed cache
// ---------------------------------------------------------------------------

/// Identity of a data file on disk. A file counts as unchanged while its
/// canonical path, modification time and length stay the same.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceStamp {
    path: PathBuf,
    modified: Option<SystemTime>,
    len: u64,
}

impl SourceStamp {
    fn of(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
        Ok(SourceStamp {
            path: path.canonicalize().unwrap_or_else(|_| path.to_path_buf()),
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

/// Keeps the most recently parsed dataset so reloading an unchanged file
/// skips the read and parse. Failed loads are never cached.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entry: Option<(SourceStamp, Arc<Dataset>)>,
}

impl DatasetCache {
    pub fn load(&mut self, path: &Path) -> Result<Arc<Dataset>> {
        let stamp = SourceStamp::of(path)?;

        if let Some((cached, dataset)) = &self.entry {
            if *cached == stamp {
                log::debug!("Reusing cached dataset for {}", path.display());
                return Ok(Arc::clone(dataset));
            }
        }

        self.entry = None;
        let dataset = Arc::new(load_file(path)?);
        self.entry = Some((stamp, Arc::clone(&dataset)));
        Ok(dataset)
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_json(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_records_in_declaration_order() {
        let ds = parse_dataset(
            r#"[{"value": 1, "category": "A", "date": "2024-01-01"},
                {"category": "B", "units": 4, "value": 2.5, "date": "2024-01-02"}]"#,
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.column_names, vec!["value", "category", "date", "units"]);
        assert_eq!(ds.records[1].get("value"), &FieldValue::Float(2.5));
        assert!(ds.records[0].get("units").is_null());
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            parse_dataset("[{\"a\": 1,"),
            Err(DashboardError::Parse(_))
        ));
    }

    #[test]
    fn rejects_non_array_top_level() {
        let err = parse_dataset(r#"{"category": "A"}"#).unwrap_err();
        assert_eq!(
            err,
            DashboardError::Format("top-level value is an object".into())
        );
    }

    #[test]
    fn rejects_non_object_rows() {
        let err = parse_dataset(r#"[{"value": 1}, 5]"#).unwrap_err();
        assert_eq!(err, DashboardError::Format("row 1 is a number".into()));
    }

    #[test]
    fn rejects_empty_array() {
        assert_eq!(parse_dataset("[]"), Err(DashboardError::EmptyDataset));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert_eq!(load_file(&path), Err(DashboardError::NotFound(path.clone())));
    }

    #[test]
    fn directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_file(dir.path()),
            Err(DashboardError::Io { .. })
        ));
    }

    #[test]
    fn cache_reuses_unchanged_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(dir.path(), "data.json", r#"[{"value": 1}]"#);

        let mut cache = DatasetCache::default();
        let first = cache.load(&path).unwrap();
        let second = cache.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        cache.clear();
        let third = cache.load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(*first, *third);
    }

    #[test]
    fn cache_reloads_changed_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(dir.path(), "data.json", r#"[{"value": 1}]"#);

        let mut cache = DatasetCache::default();
        let first = cache.load(&path).unwrap();

        write_json(dir.path(), "data.json", r#"[{"value": 1}, {"value": 2}]"#);
        let second = cache.load(&path).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn cache_does_not_keep_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(dir.path(), "data.json", "[]");

        let mut cache = DatasetCache::default();
        assert_eq!(cache.load(&path), Err(DashboardError::EmptyDataset));

        write_json(dir.path(), "data.json", r#"[{"value": 1}]"#);
        assert_eq!(cache.load(&path).unwrap().len(), 1);
    }
}
