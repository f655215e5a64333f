//! HTTP API handlers for topmusic-api

pub mod envelope;
pub mod health;
pub mod help;
pub mod songs;

pub use health::health_routes;
pub use help::routes_help;
pub use songs::{get_song, list_songs};
