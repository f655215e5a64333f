//! Song collection
//!
//! [`SongCollection`] is the only way the service touches stored songs.
//! [`SqliteSongCollection`] keeps each song as a JSON document in the `songs`
//! table and evaluates filters with SQLite's JSON functions.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::debug;

use crate::db::{numeric_text, FieldKind, Song, SongDocument, SongField, SongSummary};
use crate::filter::{FieldPredicate, SongFilter, SongQuery};
use crate::{Error, Result, SongId};

/// Document-store operations over the song collection
#[async_trait]
pub trait SongCollection: Send + Sync {
    /// Fetch at most one record by its store identifier
    async fn find_by_id(&self, id: &SongId) -> Result<Option<Song>>;

    /// Filtered, sorted, limited find projected to summaries
    async fn find_summaries(&self, query: &SongQuery) -> Result<Vec<SongSummary>>;

    /// Remove every record, returning how many were removed
    async fn clear(&self) -> Result<u64>;

    /// Store a new record and return its assigned identifier
    async fn insert(&self, document: &SongDocument) -> Result<SongId>;

    async fn count(&self) -> Result<i64>;
}

/// SQLite-backed song collection
#[derive(Debug, Clone)]
pub struct SqliteSongCollection {
    pool: SqlitePool,
}

impl SqliteSongCollection {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SongCollection for SqliteSongCollection {
    async fn find_by_id(&self, id: &SongId) -> Result<Option<Song>> {
        let row = sqlx::query("SELECT guid, document FROM songs WHERE guid = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let document: String = row.try_get("document")?;
                Ok(Some(Song::from_document(*id, &document)?))
            }
            None => Ok(None),
        }
    }

    async fn find_summaries(&self, query: &SongQuery) -> Result<Vec<SongSummary>> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT guid, \
             json_extract(document, '{}') AS track_name, \
             json_extract(document, '{}') AS artist_name \
             FROM songs",
            SongField::TrackName.json_path(),
            SongField::ArtistName.json_path(),
        ));
        push_where(&mut builder, &query.filter);
        // NULLs sort first; rowid keeps insertion order among ties
        builder.push(format!(
            " ORDER BY json_extract(document, '{}') ASC, rowid ASC LIMIT ",
            query.sort_by.json_path()
        ));
        builder.push_bind(query.limit);

        debug!("find_summaries: {}", builder.sql());

        let rows = builder.build().fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| -> Result<SongSummary> {
                let guid: String = row.try_get("guid")?;
                let id = SongId::parse(&guid).map_err(|_| {
                    Error::Document(format!("stored guid is not a song id: {}", guid))
                })?;
                Ok(SongSummary {
                    id,
                    track_name: row.try_get("track_name")?,
                    artist_name: row.try_get("artist_name")?,
                })
            })
            .collect()
    }

    async fn clear(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM songs").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn insert(&self, document: &SongDocument) -> Result<SongId> {
        let id = SongId::generate();
        sqlx::query("INSERT INTO songs (guid, document, created_at) VALUES (?, ?, ?)")
            .bind(id.to_string())
            .bind(document.to_json()?)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// String-coerced view of a field: text as stored, numbers as text, missing as ''
fn coerced_view(field: SongField) -> String {
    format!(
        "COALESCE(CAST(json_extract(document, '{}') AS TEXT), '')",
        field.json_path()
    )
}

fn push_where(builder: &mut QueryBuilder<'_, Sqlite>, filter: &SongFilter) {
    for (i, clause) in filter.clauses().iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        builder.push(coerced_view(clause.field));
        match &clause.predicate {
            FieldPredicate::Exact(raw) => {
                // Numeric fields compare by value, so "70.0" matches a stored 70
                let value = match clause.field.kind() {
                    FieldKind::Number => numeric_text(raw).unwrap_or_else(|| raw.clone()),
                    FieldKind::Text => raw.clone(),
                };
                builder.push(" = ");
                builder.push_bind(value);
            }
            FieldPredicate::Wildcard => {
                builder.push(" GLOB '*'");
            }
        }
    }
}
