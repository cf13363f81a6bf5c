use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use codesnip_storage::error::{SnippetError, StorageError};

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    BadRequest {
        message: String,
        error: Option<String>,
    },
    NotFound {
        message: String,
        error: Option<String>,
    },
    Unavailable {
        message: String,
        error: String,
    },
    Internal {
        message: String,
        error: String,
    },
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ApiError {
    /// Like the `From` conversion, but a store failure carries `message`
    /// naming the operation that failed.
    pub fn from_snippet(e: SnippetError, message: &str) -> Self {
        match e {
            SnippetError::Storage(err) => ApiError::Internal {
                message: message.to_string(),
                error: err.to_string(),
            },
            other => other.into(),
        }
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: "Snippet not found".to_string(),
            error: Some(error.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            ApiError::BadRequest { message, error } => (StatusCode::BAD_REQUEST, message, error),
            ApiError::NotFound { message, error } => (StatusCode::NOT_FOUND, message, error),
            ApiError::Unavailable { message, error } => {
                tracing::warn!(error = %error, "{message}");
                (StatusCode::SERVICE_UNAVAILABLE, message, Some(error))
            }
            ApiError::Internal { message, error } => {
                tracing::error!(error = %error, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(error))
            }
        };

        (status, Json(ErrorBody { message, error })).into_response()
    }
}

impl From<SnippetError> for ApiError {
    fn from(e: SnippetError) -> Self {
        match e {
            SnippetError::Validation(_) => ApiError::BadRequest {
                message: "the snippetname or code field is required".to_string(),
                error: None,
            },
            SnippetError::InvalidIdentifier(_) => ApiError::BadRequest {
                message: "The id is invalid".to_string(),
                error: None,
            },
            SnippetError::NotFound(name) => ApiError::not_found(format!("no snippet named {name:?}")),
            SnippetError::Storage(err) => err.into(),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Internal {
            message: "document store operation failed".to_string(),
            error: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest {
            message: "invalid request body".to_string(),
            error: Some(e.to_string()),
        }
    }
}
