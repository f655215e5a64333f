//! Song models as returned to API callers

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::{Result, SongId};

/// A full song record
///
/// Serializes with the store identifier under `_id` and the dataset's own
/// numbering under `id`. Attributes missing from the document are omitted.
/// Numbers keep their stored form, so whole values serialize without `.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    #[serde(rename = "_id")]
    pub id: SongId,
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub danceability: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loudness: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valence: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acousticness: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speechiness: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<Number>,
}

impl Song {
    /// Rebuild a record from its stored guid and JSON document
    pub fn from_document(id: SongId, document: &str) -> Result<Self> {
        let mut object: Map<String, Value> = serde_json::from_str(document)?;
        object.insert("_id".to_string(), Value::String(id.to_string()));
        Ok(serde_json::from_value(Value::Object(object))?)
    }
}

/// Projected view of a record: identifier, track name and artist name only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongSummary {
    #[serde(rename = "_id")]
    pub id: SongId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_song_from_document() {
        let id = SongId::generate();
        let song = Song::from_document(
            id,
            r#"{"id":1,"trackName":"Senorita","artistName":"Shawn Mendes","genre":"canadian pop","energy":55,"danceability":76}"#,
        )
        .unwrap();

        assert_eq!(song.id, id);
        assert_eq!(song.catalog_id, Some(Number::from(1)));
        assert_eq!(song.track_name.as_deref(), Some("Senorita"));
        assert_eq!(song.energy, Some(Number::from(55)));
        assert_eq!(song.bpm, None);
    }

    #[test]
    fn test_song_serializes_store_id_and_skips_missing() {
        let id = SongId::generate();
        let song = Song::from_document(id, r#"{"trackName":"Bad Guy","valence":56}"#).unwrap();

        let value = serde_json::to_value(&song).unwrap();
        assert_eq!(
            value,
            json!({ "_id": id.to_string(), "trackName": "Bad Guy", "valence": 56 })
        );
        assert!(serde_json::to_string(&song).unwrap().contains(r#""valence":56}"#));
    }

    #[test]
    fn test_summary_keys() {
        let summary = SongSummary {
            id: SongId::generate(),
            track_name: Some("Beautiful People".to_string()),
            artist_name: Some("Ed Sheeran".to_string()),
        };

        let value = serde_json::to_value(&summary).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["_id", "artistName", "trackName"]);
    }
}
