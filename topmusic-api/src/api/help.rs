//! Root route: static listing of the available routes

use axum::Json;
use serde_json::{json, Value};

/// GET /
pub async fn routes_help() -> Json<Value> {
    Json(json!({
        "Hello": "Here you can see all my routes!",
        "Routes": [
            { "/songs": "All the song data" },
            { "/songs/id/:id": "A specific song, for instance use id 0b6c3a1e-2f4d-4c57-9a3e-6f1d2b8e9c40" },
            { "/songs/?danceability=70": "or instead of 70 try another value, for instance 50" },
            { "/songs/?genre=pop": "or instead of pop try another genre, for instance trap music" },
        ],
    }))
}
