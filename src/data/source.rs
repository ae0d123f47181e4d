use std::fmt;
use std::path::Path;

use mysql::prelude::Queryable;
use mysql::{Conn, Row, Value};

use crate::config::StoreConfig;
use crate::error::SourceError;

use super::loader;
use super::model::{MovieDataset, MovieRecord};

// ---------------------------------------------------------------------------
// DataSource resolver – store preferred, CSV fallback
// ---------------------------------------------------------------------------

/// Which path actually served the session's dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Store,
    FallbackFile,
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataOrigin::Store => f.write_str("SQL store"),
            DataOrigin::FallbackFile => f.write_str("CSV fallback"),
        }
    }
}

/// Resolve the session dataset.
///
/// The remote store is preferred when credentials are complete; incomplete
/// credentials skip that path silently. A store failure is logged as a
/// warning and recovered by the CSV fallback. Only when the fallback also
/// fails does resolution error out, and that error is fatal for the session.
pub fn resolve(
    config: &StoreConfig,
    fallback_path: &Path,
) -> Result<(MovieDataset, DataOrigin), SourceError> {
    if config.is_complete() {
        match load_from_store(config) {
            Ok(dataset) => {
                log::info!("loaded {} movies from the SQL store", dataset.len());
                return Ok((dataset, DataOrigin::Store));
            }
            Err(e) => log::warn!("{e}; falling back to {}", fallback_path.display()),
        }
    }

    match loader::load_csv(fallback_path) {
        Ok(dataset) => {
            log::info!(
                "loaded {} movies from {}",
                dataset.len(),
                fallback_path.display()
            );
            Ok((dataset, DataOrigin::FallbackFile))
        }
        Err(e) => Err(SourceError::DataUnavailable(format!("{e:#}"))),
    }
}

/// Full-table read against the configured store.
fn load_from_store(config: &StoreConfig) -> Result<MovieDataset, SourceError> {
    let store_err = |e: mysql::Error| SourceError::StoreUnavailable(e.to_string());

    let mut conn = Conn::new(config.opts()).map_err(store_err)?;
    let rows: Vec<Row> = conn
        .query(format!("SELECT * FROM {}", config.table))
        .map_err(store_err)?;

    let records = rows.iter().map(record_from_row).collect();
    Ok(MovieDataset::from_records(records))
}

/// Map a store row onto the known movie columns by name; unknown columns are
/// ignored and missing ones stay empty.
fn record_from_row(row: &Row) -> MovieRecord {
    let mut record = MovieRecord::default();
    for (i, column) in row.columns_ref().iter().enumerate() {
        let Some(value) = row.as_ref(i) else { continue };
        let text = value_text(value);
        match column.name_str().to_lowercase().as_str() {
            "title" => record.title = text,
            "genre" => record.genre = text,
            "rating" => record.rating = text,
            "votes" => record.votes = text,
            "duration" => record.duration = text,
            _ => {}
        }
    }
    record
}

/// Stringify one store cell for the raw record fields and for ad-hoc query
/// result display.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::NULL => String::new(),
        Value::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Value::Int(i) => i.to_string(),
        Value::UInt(u) => u.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Double(d) => d.to_string(),
        Value::Date(y, mo, d, h, mi, s, _) => {
            format!("{y:04}-{mo:02}-{d:02} {h:02}:{mi:02}:{s:02}")
        }
        Value::Time(neg, days, h, m, s, _) => {
            let sign = if *neg { "-" } else { "" };
            let hours = u64::from(*days) * 24 + u64::from(*h);
            format!("{sign}{hours}:{m:02}:{s:02}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("movie_dash_source_{name}.csv"));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_incomplete_credentials_fall_back_to_csv() {
        let path = write_temp_csv(
            "fallback",
            "title,genre,rating,votes,duration\nAlpha,Action,8.0,3K,2h\n",
        );
        let (dataset, origin) = resolve(&StoreConfig::default(), &path).unwrap();
        assert_eq!(origin, DataOrigin::FallbackFile);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].votes_numeric, 3_000);
    }

    #[test]
    fn test_both_paths_failing_is_data_unavailable() {
        let missing = std::env::temp_dir().join("movie_dash_source_absent.csv");
        let err = resolve(&StoreConfig::default(), &missing).unwrap_err();
        assert!(matches!(err, SourceError::DataUnavailable(_)));
    }

    #[test]
    fn test_value_text_variants() {
        assert_eq!(value_text(&Value::NULL), "");
        assert_eq!(value_text(&Value::Bytes(b"12.5K".to_vec())), "12.5K");
        assert_eq!(value_text(&Value::Int(-3)), "-3");
        assert_eq!(value_text(&Value::UInt(42)), "42");
        assert_eq!(
            value_text(&Value::Date(2024, 6, 1, 12, 30, 5, 0)),
            "2024-06-01 12:30:05"
        );
    }
}
