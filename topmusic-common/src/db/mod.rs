//! Song storage: schema, models and the document collection

pub mod collection;
pub mod init;
pub mod models;
pub mod schema;

pub use collection::{SongCollection, SqliteSongCollection};
pub use init::*;
pub use models::*;
pub use schema::*;
