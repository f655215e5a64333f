//! Catalog query components
//!
//! Both components hold an injected collection handle and keep no state
//! between calls.

pub mod listing;
pub mod lookup;

pub use listing::{FilteredListing, ListingParams, QueryFailure, LISTING_LIMIT};
pub use lookup::{IdentifierLookup, LookupOutcome};
