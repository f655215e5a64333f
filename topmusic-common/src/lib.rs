//! # Top Music Common Library
//!
//! Shared code for the top music catalog service:
//! - Song schema, models and identifiers
//! - Filter model for catalog queries
//! - SQLite-backed document collection
//! - Dataset seeding
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod ids;
pub mod seed;

pub use error::{Error, Result};
pub use ids::SongId;
