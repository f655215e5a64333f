//! Filtered song listing
//!
//! Turns the optional `genre` and `danceability` query parameters into a
//! filter, then applies the fixed shaping policy: ascending by energy, at
//! most [`LISTING_LIMIT`] records, projected to [`SongSummary`].

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use topmusic_common::db::{SongCollection, SongField, SongSummary};
use topmusic_common::filter::{FieldPredicate, SongFilter, SongQuery};

/// Maximum number of songs returned by one listing
pub const LISTING_LIMIT: i64 = 2;

/// Raw listing query parameters; values are passed through uncoerced
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    pub genre: Option<String>,
    pub danceability: Option<String>,
}

/// The store query behind a listing failed
#[derive(Debug, Error)]
#[error("{0}")]
pub struct QueryFailure(#[from] pub topmusic_common::Error);

/// Resolves listing parameters into a bounded, sorted, projected result
#[derive(Clone)]
pub struct FilteredListing {
    songs: Arc<dyn SongCollection>,
}

impl FilteredListing {
    pub fn new(songs: Arc<dyn SongCollection>) -> Self {
        Self { songs }
    }

    /// Store query for the given parameters
    ///
    /// Absent parameters become wildcard clauses rather than being left out
    /// of the filter.
    pub fn query_for(params: &ListingParams) -> SongQuery {
        let filter = SongFilter::new()
            .with(
                SongField::Genre,
                FieldPredicate::from_param(params.genre.as_deref()),
            )
            .with(
                SongField::Danceability,
                FieldPredicate::from_param(params.danceability.as_deref()),
            );

        SongQuery {
            filter,
            sort_by: SongField::Energy,
            limit: LISTING_LIMIT,
        }
    }

    pub async fn list(&self, params: &ListingParams) -> Result<Vec<SongSummary>, QueryFailure> {
        let query = Self::query_for(params);
        Ok(self.songs.find_summaries(&query).await?)
    }
}
