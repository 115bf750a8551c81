use serde::Serialize;

/// `{"message": ...}` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Acknowledgement for inserts, carrying the new row's id.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: i64,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl CreatedResponse {
    pub fn new(message: &'static str, id: i64) -> Self {
        Self { message, id }
    }
}
