//! topmusic-api library - song catalog HTTP service
//!
//! Read-only JSON API over the song collection: single-record lookup by id
//! and a filtered, energy-sorted listing capped at two songs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use topmusic_common::db::SongCollection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod catalog;
pub mod cli;

use catalog::{FilteredListing, IdentifierLookup};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub lookup: IdentifierLookup,
    pub listing: FilteredListing,
}

impl AppState {
    /// Build both catalog components over the same collection handle
    pub fn new(songs: Arc<dyn SongCollection>) -> Self {
        Self {
            lookup: IdentifierLookup::new(Arc::clone(&songs)),
            listing: FilteredListing::new(songs),
        }
    }
}

/// Sample dataset shipped with this crate, usable from any working directory
pub fn bundled_dataset_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("top-music.json")
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::routes_help))
        .route("/songs", get(api::list_songs))
        .route("/songs/", get(api::list_songs))
        .route("/songs/id/:id", get(api::get_song))
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Enable CORS for browser clients
        .layer(CorsLayer::permissive())
}
