//! Song endpoints
//!
//! GET /songs/id/:id and GET /songs?genre=&danceability=

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use topmusic_common::db::{Song, SongSummary};
use tracing::error;

use super::envelope::Envelope;
use crate::catalog::{ListingParams, LookupOutcome};
use crate::AppState;

/// GET /songs/id/:id
///
/// 200 with the song, 404 when no song has this id, 400 when the id is
/// malformed.
pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Song>>, SongsError> {
    match state.lookup.find_by_id(&id).await {
        Ok(LookupOutcome::Found(song)) => Ok(Json(Envelope::ok(song))),
        Ok(LookupOutcome::NotFound) => Err(SongsError::NotFound),
        Ok(LookupOutcome::InvalidIdentifier) => Err(SongsError::InvalidId),
        Err(e) => {
            // Store failures share the invalid-id response
            error!("Song lookup for {:?} failed: {}", id, e);
            Err(SongsError::InvalidId)
        }
    }
}

/// GET /songs?genre=...&danceability=...
///
/// Returns at most two songs, lowest energy first, with the listing wrapped
/// in a second success envelope.
pub async fn list_songs(
    State(state): State<AppState>,
    query: Result<Query<ListingParams>, QueryRejection>,
) -> Result<Json<Envelope<Envelope<Vec<SongSummary>>>>, SongsError> {
    let Query(params) = query.map_err(|e| SongsError::Query(e.body_text()))?;

    let songs = state.listing.list(&params).await.map_err(|e| {
        error!("Song listing failed: {}", e);
        SongsError::Query(e.to_string())
    })?;

    Ok(Json(Envelope::ok(Envelope::ok(songs))))
}

/// Song endpoint errors
#[derive(Debug)]
pub enum SongsError {
    InvalidId,
    NotFound,
    Query(String),
}

impl IntoResponse for SongsError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            SongsError::InvalidId => (StatusCode::BAD_REQUEST, "Invalid id".to_string()),
            SongsError::NotFound => (StatusCode::NOT_FOUND, "Could not find the song".to_string()),
            SongsError::Query(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, Json(Envelope::failure(message))).into_response()
    }
}
