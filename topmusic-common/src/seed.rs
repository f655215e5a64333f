//! Dataset seeding
//!
//! Resets the song collection from a static JSON dataset: the collection is
//! cleared, then every entry is cast against the song schema and inserted.
//! Individual entries may fail without stopping the batch; the outcome of the
//! whole batch comes back as one [`SeedReport`].

use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::db::{SongCollection, SongDocument};
use crate::{Error, Result};

/// Aggregated outcome of a reset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Records removed before seeding
    pub cleared: u64,
    /// Entries stored successfully
    pub inserted: usize,
    /// Entries that failed to cast or insert
    pub failed: usize,
    /// Description of the first failing entry, if any
    pub first_failure: Option<String>,
}

impl SeedReport {
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }

    fn record_failure(&mut self, index: usize, error: &Error) {
        warn!("Seed entry {} rejected: {}", index, error);
        self.failed += 1;
        if self.first_failure.is_none() {
            self.first_failure = Some(format!("entry {}: {}", index, error));
        }
    }
}

/// Read a dataset file holding a JSON array of flat song objects
pub fn load_dataset(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)?;
    parse_dataset(&content)
}

fn parse_dataset(content: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(content)? {
        Value::Array(entries) => Ok(entries),
        _ => Err(Error::Document(
            "dataset must be a JSON array of song objects".to_string(),
        )),
    }
}

/// Clear the collection and insert every dataset entry
///
/// Failing to clear aborts the reset. Failing entries are counted in the
/// report and the remaining entries are still inserted.
pub async fn reset_collection(
    collection: &dyn SongCollection,
    entries: Vec<Value>,
) -> Result<SeedReport> {
    let mut report = SeedReport {
        cleared: collection.clear().await?,
        ..SeedReport::default()
    };
    info!("Cleared {} song records", report.cleared);

    for (index, entry) in entries.into_iter().enumerate() {
        let document = match SongDocument::from_flat(entry) {
            Ok(document) => document,
            Err(e) => {
                report.record_failure(index, &e);
                continue;
            }
        };
        match collection.insert(&document).await {
            Ok(_) => report.inserted += 1,
            Err(e) => report.record_failure(index, &e),
        }
    }

    info!(
        "Seeded {} song records ({} failed)",
        report.inserted, report.failed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_memory_database, SqliteSongCollection};
    use serde_json::json;
    use std::io::Write;

    async fn empty_collection() -> SqliteSongCollection {
        SqliteSongCollection::new(init_memory_database().await.unwrap())
    }

    #[tokio::test]
    async fn test_reset_replaces_existing_records() {
        let collection = empty_collection().await;
        let stale = SongDocument::from_flat(json!({ "trackName": "stale" })).unwrap();
        collection.insert(&stale).await.unwrap();

        let report = reset_collection(
            &collection,
            vec![
                json!({ "trackName": "Senorita", "energy": 55 }),
                json!({ "trackName": "China", "energy": 81 }),
            ],
        )
        .await
        .unwrap();

        assert_eq!(report.cleared, 1);
        assert_eq!(report.inserted, 2);
        assert!(report.is_complete());
        assert_eq!(collection.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_reset_counts_failures_and_continues() {
        let collection = empty_collection().await;

        let report = reset_collection(
            &collection,
            vec![
                json!({ "trackName": "ok", "energy": 1 }),
                json!({ "trackName": "bad", "energy": "very" }),
                json!("not an object"),
                json!({ "trackName": "also ok" }),
            ],
        )
        .await
        .unwrap();

        assert_eq!(report.inserted, 2);
        assert_eq!(report.failed, 2);
        assert!(!report.is_complete());
        let first = report.first_failure.unwrap();
        assert!(first.starts_with("entry 1:"), "unexpected first failure: {first}");
        assert_eq!(collection.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_reset_accepts_fractional_catalog_id() {
        let collection = empty_collection().await;

        let report = reset_collection(
            &collection,
            vec![json!({ "id": 1.5, "trackName": "x", "energy": 1 })],
        )
        .await
        .unwrap();

        assert_eq!(report.inserted, 1);
        assert!(report.is_complete(), "unexpected failure: {:?}", report.first_failure);
    }

    #[test]
    fn test_load_dataset_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":1,"trackName":"Senorita","artistName":"Shawn Mendes"}}]"#
        )
        .unwrap();

        let entries = load_dataset(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["trackName"], "Senorita");
    }

    #[test]
    fn test_dataset_must_be_array() {
        assert!(matches!(parse_dataset(r#"{"trackName":"x"}"#), Err(Error::Document(_))));
        assert!(matches!(parse_dataset("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_missing_dataset_file() {
        let err = load_dataset(Path::new("/nonexistent/top-music.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
