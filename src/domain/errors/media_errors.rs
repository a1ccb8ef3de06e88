/// Errors that can occur while uploading media to the storage provider
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// The server has no credentials for the media storage provider
    #[error("media storage provider is not configured: {0}")]
    MissingConfiguration(String),

    /// The provider rejected the upload
    #[error("upload rejected by the media storage provider ({status}): {message}")]
    UploadRejected { status: u16, message: String },

    /// The provider returned a success status but an unusable body
    #[error("unexpected media storage response: {0}")]
    UnexpectedResponse(String),

    /// Network or HTTP transport failure reaching the provider
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Result type for media storage operations
pub type MediaResult<T> = Result<T, MediaError>;
