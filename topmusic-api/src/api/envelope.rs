//! JSON response envelope shared by the song endpoints

use serde::Serialize;

/// `{ "success": ..., "body": ... }`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub body: T,
}

impl<T> Envelope<T> {
    pub fn ok(body: T) -> Self {
        Self {
            success: true,
            body,
        }
    }
}

/// Body of a failed request
#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl Envelope<ErrorMessage> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            body: ErrorMessage {
                message: message.into(),
            },
        }
    }
}
