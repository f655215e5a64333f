//! Single-record lookup by store identifier

use std::sync::Arc;

use tracing::debug;
use topmusic_common::db::{Song, SongCollection};
use topmusic_common::{Result, SongId};

/// Result of resolving an identifier
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(Song),
    /// Well-formed identifier with no matching record
    NotFound,
    /// Identifier is not a valid store identifier; the store was not queried
    InvalidIdentifier,
}

/// Resolves a raw path identifier to at most one song
#[derive(Clone)]
pub struct IdentifierLookup {
    songs: Arc<dyn SongCollection>,
}

impl IdentifierLookup {
    pub fn new(songs: Arc<dyn SongCollection>) -> Self {
        Self { songs }
    }

    /// Look up a song by the identifier taken verbatim from the request
    ///
    /// Malformed identifiers and absent records are distinct outcomes. An
    /// `Err` means the store itself failed.
    pub async fn find_by_id(&self, identifier: &str) -> Result<LookupOutcome> {
        let id = match SongId::parse(identifier) {
            Ok(id) => id,
            Err(e) => {
                debug!("Rejecting song id: {}", e);
                return Ok(LookupOutcome::InvalidIdentifier);
            }
        };

        Ok(match self.songs.find_by_id(&id).await? {
            Some(song) => LookupOutcome::Found(song),
            None => LookupOutcome::NotFound,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use topmusic_common::db::{init_memory_database, SongDocument, SqliteSongCollection};

    async fn lookup_with_one_song() -> (IdentifierLookup, SongId) {
        let collection = SqliteSongCollection::new(init_memory_database().await.unwrap());
        let doc = SongDocument::from_flat(json!({
            "id": 3,
            "trackName": "Boyfriend (with Social House)",
            "artistName": "Ariana Grande",
            "genre": "dance pop",
            "energy": 55
        }))
        .unwrap();
        let id = collection.insert(&doc).await.unwrap();
        (IdentifierLookup::new(Arc::new(collection)), id)
    }

    #[tokio::test]
    async fn test_found() {
        let (lookup, id) = lookup_with_one_song().await;

        match lookup.find_by_id(&id.to_string()).await.unwrap() {
            LookupOutcome::Found(song) => {
                assert_eq!(song.id, id);
                assert_eq!(song.id.to_string(), id.to_string());
                assert_eq!(song.artist_name.as_deref(), Some("Ariana Grande"));
            }
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_well_formed_but_absent_is_not_found() {
        let (lookup, _) = lookup_with_one_song().await;

        let absent = SongId::generate().to_string();
        assert_eq!(lookup.find_by_id(&absent).await.unwrap(), LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_malformed_is_invalid_identifier() {
        let (lookup, id) = lookup_with_one_song().await;

        let full = id.to_string();
        let truncated = &full[..20];
        for raw in ["not-a-valid-id-format", "", "637f5d218aae5dd90801358b", truncated] {
            assert_eq!(
                lookup.find_by_id(raw).await.unwrap(),
                LookupOutcome::InvalidIdentifier,
                "{raw:?} should be an invalid identifier"
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_identifier_skips_store() {
        // A closed pool fails every query, so only a short-circuit can succeed
        let pool = init_memory_database().await.unwrap();
        let lookup = IdentifierLookup::new(Arc::new(SqliteSongCollection::new(pool.clone())));
        pool.close().await;

        assert_eq!(
            lookup.find_by_id("not-a-valid-id-format").await.unwrap(),
            LookupOutcome::InvalidIdentifier
        );
        assert!(lookup.find_by_id(&SongId::generate().to_string()).await.is_err());
    }
}
