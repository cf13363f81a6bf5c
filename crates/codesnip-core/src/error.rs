use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("snippet name and code are both empty")]
    EmptySnippet,
}
