//! JSON envelopes wrapped around every successful response.

use serde::{Deserialize, Serialize};

/// `{"data": ...}`: read responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

/// `{"message": ...}`: update and delete responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Create response carrying the generated identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Created {
    pub message: String,
    pub snippet_id: String,
}
