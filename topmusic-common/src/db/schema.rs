//! Song document schema
//!
//! Every song document is a flat JSON object whose keys come from
//! [`SongField`]. Incoming objects are cast against the schema before they are
//! stored: unknown keys are dropped and values are coerced to the field kind.

use serde_json::{Map, Number, Value};

use crate::{Error, Result};

/// Value kind of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
}

/// Attributes of a song document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SongField {
    /// External catalog id (the dataset's own numbering)
    CatalogId,
    TrackName,
    ArtistName,
    Genre,
    /// Tempo in beats per minute
    Bpm,
    Energy,
    Danceability,
    Loudness,
    Liveness,
    Valence,
    /// Track length in seconds
    Length,
    Acousticness,
    Speechiness,
    Popularity,
}

impl SongField {
    pub const ALL: [SongField; 14] = [
        SongField::CatalogId,
        SongField::TrackName,
        SongField::ArtistName,
        SongField::Genre,
        SongField::Bpm,
        SongField::Energy,
        SongField::Danceability,
        SongField::Loudness,
        SongField::Liveness,
        SongField::Valence,
        SongField::Length,
        SongField::Acousticness,
        SongField::Speechiness,
        SongField::Popularity,
    ];

    /// JSON key of the field inside a document
    pub fn key(self) -> &'static str {
        match self {
            SongField::CatalogId => "id",
            SongField::TrackName => "trackName",
            SongField::ArtistName => "artistName",
            SongField::Genre => "genre",
            SongField::Bpm => "bpm",
            SongField::Energy => "energy",
            SongField::Danceability => "danceability",
            SongField::Loudness => "loudness",
            SongField::Liveness => "liveness",
            SongField::Valence => "valence",
            SongField::Length => "length",
            SongField::Acousticness => "acousticness",
            SongField::Speechiness => "speechiness",
            SongField::Popularity => "popularity",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            SongField::TrackName | SongField::ArtistName | SongField::Genre => FieldKind::Text,
            _ => FieldKind::Number,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }

    /// SQLite JSON path of the field, e.g. `$.energy`
    pub fn json_path(self) -> String {
        format!("$.{}", self.key())
    }
}

/// A schema-cast song document, ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct SongDocument(Map<String, Value>);

impl SongDocument {
    /// Cast a flat JSON object against the song schema
    ///
    /// Keys outside the schema are dropped. A value that cannot be coerced to
    /// its field kind fails the whole document.
    pub fn from_flat(value: Value) -> Result<Self> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(Error::Document(format!(
                    "expected a JSON object, got {}",
                    type_name(&other)
                )))
            }
        };

        let mut document = Map::new();
        for (key, value) in object {
            let Some(field) = SongField::from_key(&key) else {
                continue;
            };
            document.insert(key, cast(field, value)?);
        }

        Ok(Self(document))
    }

    pub fn get(&self, field: SongField) -> Option<&Value> {
        self.0.get(field.key())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

fn cast(field: SongField, value: Value) -> Result<Value> {
    match (field.kind(), value) {
        (_, Value::Null) => Ok(Value::Null),

        (FieldKind::Text, Value::String(s)) => Ok(Value::String(s)),
        (FieldKind::Text, Value::Number(n)) => Ok(Value::String(n.to_string())),
        (FieldKind::Text, Value::Bool(b)) => Ok(Value::String(b.to_string())),

        (FieldKind::Number, Value::Number(n)) => Ok(Value::Number(canonical_number(n))),
        (FieldKind::Number, Value::Bool(b)) => Ok(Value::Number(Number::from(u8::from(b)))),
        (FieldKind::Number, Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(Value::Null);
            }
            parse_number(trimmed)
                .map(Value::Number)
                .ok_or_else(|| cast_error(field, &Value::String(s.clone())))
        }

        (_, other) => Err(cast_error(field, &other)),
    }
}

/// Text form of a numeric query value, matching how the stored number renders
///
/// Returns `None` when `raw` is not a number.
pub fn numeric_text(raw: &str) -> Option<String> {
    parse_number(raw.trim()).map(|n| n.to_string())
}

/// One representation per value: integral floats such as `70.0` become `70`
fn canonical_number(n: Number) -> Number {
    if n.is_i64() || n.is_u64() {
        return n;
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Number::from(f as i64),
        _ => n,
    }
}

fn parse_number(s: &str) -> Option<Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    s.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(canonical_number)
}

fn cast_error(field: SongField, value: &Value) -> Error {
    Error::Document(format!(
        "cannot cast {} {} to {:?} for field \"{}\"",
        type_name(value),
        value,
        field.kind(),
        field.key()
    ))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
