use codesnip_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("document store connect error: {0}")]
    Connect(String),

    #[error("document store disconnect error: {0}")]
    Disconnect(String),

    #[error("InsertOne error: {0}")]
    Insert(String),

    #[error("Find error: {0}")]
    Find(String),

    #[error("UpdateOne error: {0}")]
    Update(String),

    #[error("DeleteOne error: {0}")]
    Delete(String),

    #[error("ping error: {0}")]
    Ping(String),

    #[error("inserted id is not an ObjectId: {0}")]
    UnexpectedId(String),

    #[error("stored timestamp out of range: {0}")]
    Timestamp(String),
}

/// Failures of a repository operation, before they are mapped to HTTP.
#[derive(Debug, Error)]
pub enum SnippetError {
    #[error("validation failed: {0}")]
    Validation(#[from] CoreError),

    #[error("invalid snippet id: {0:?}")]
    InvalidIdentifier(String),

    #[error("no snippet named {0:?}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
