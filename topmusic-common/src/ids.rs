//! Song identifiers
//!
//! The store assigns every record a UUID when it is inserted. Identifiers
//! arriving from URLs are parsed here, and a parse failure is the only thing
//! that makes an identifier "invalid".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// Store-native identifier of a song record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(Uuid);

impl SongId {
    /// Generate a fresh identifier for a new record
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier taken verbatim from a request
    pub fn parse(s: &str) -> Result<Self, Error> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| Error::InvalidInput(format!("malformed song id {:?}: {}", s, e)))
    }
}

impl FromStr for SongId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SongId {
    // Canonical hyphenated lowercase form, as stored in the `guid` column
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical() {
        let id = SongId::parse("0b6c3a1e-2f4d-4c57-9a3e-6f1d2b8e9c40").unwrap();
        assert_eq!(id.to_string(), "0b6c3a1e-2f4d-4c57-9a3e-6f1d2b8e9c40");
    }

    #[test]
    fn test_parse_normalizes_case() {
        let id = SongId::parse("0B6C3A1E-2F4D-4C57-9A3E-6F1D2B8E9C40").unwrap();
        assert_eq!(id.to_string(), "0b6c3a1e-2f4d-4c57-9a3e-6f1d2b8e9c40");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["not-a-valid-id-format", "", "637f5d218aae5dd90801358b", "12345"] {
            let err = SongId::parse(raw).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(SongId::generate(), SongId::generate());
    }

    #[test]
    fn test_serde_transparent() {
        let id = SongId::generate();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.to_string()));
    }
}
