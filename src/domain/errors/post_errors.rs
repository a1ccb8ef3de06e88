use crate::domain::errors::{ErrorCode, ValidationError};

/// Errors that can occur listing or creating gallery posts
#[derive(Debug, thiserror::Error)]
pub enum PostError {
    /// A required field is missing or invalid
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The record store cannot be reached
    #[error("record store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// The media storage provider failed and strict upload mode is active
    #[error("media storage unavailable: {message}")]
    MediaUnavailable { message: String },

    /// Reading posts from the store failed
    #[error("fetching posts failed: {message}")]
    FetchFailed { message: String },

    /// Writing a post to the store failed
    #[error("creating post failed: {message}")]
    PersistFailed { message: String },
}

impl PostError {
    /// The stable wire code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            PostError::Validation(_) => ErrorCode::MissingField,
            PostError::StoreUnavailable { .. } => ErrorCode::StoreUnavailable,
            PostError::MediaUnavailable { .. } => ErrorCode::MediaUnavailable,
            PostError::FetchFailed { .. } | PostError::PersistFailed { .. } => ErrorCode::Internal,
        }
    }
}

/// Result type for post operations
pub type PostResult<T> = Result<T, PostError>;
