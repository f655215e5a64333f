//! Database initialization
//!
//! Opens (or creates) the SQLite database holding the song collection and
//! makes sure the `songs` table exists.

use crate::config::DatabaseLocation;
use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Open the database at the configured location
pub async fn open_database(location: &DatabaseLocation) -> Result<SqlitePool> {
    match location {
        DatabaseLocation::Memory => init_memory_database().await,
        DatabaseLocation::File(path) => init_database(path).await,
    }
}

/// Initialize a file-backed database, creating it and its tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Readers keep going while a reset is writing
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_songs_table(&pool).await?;

    Ok(pool)
}

/// Initialize a private in-memory database
///
/// Every SQLite in-memory connection is its own database, so the pool is
/// pinned to a single connection that is never recycled.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    info!("Initialized in-memory database");

    create_songs_table(&pool).await?;

    Ok(pool)
}

/// Create the songs table
///
/// Each row is one document: the store-assigned guid plus the schema-cast
/// JSON object. Row order (rowid) is insertion order.
pub async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            guid TEXT PRIMARY KEY,
            document TEXT NOT NULL CHECK (json_valid(document)),
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
