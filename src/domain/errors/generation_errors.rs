use crate::domain::errors::{ErrorCode, ValidationError};

/// Errors that can occur while generating an image
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The prompt failed validation before any provider call
    #[error("invalid prompt: {0}")]
    InvalidPrompt(#[from] ValidationError),

    /// The server has no credentials for the generation provider
    #[error("generation provider is not configured: {0}")]
    MissingConfiguration(String),

    /// The provider rejected the prompt on content-policy grounds
    #[error("prompt rejected by the provider content policy: {0}")]
    ContentPolicy(String),

    /// The provider reported a billing or quota limit
    #[error("provider billing limit reached: {0}")]
    BillingLimit(String),

    /// The provider returned a success status but an unusable body
    #[error("unexpected provider response: {0}")]
    UnexpectedResponse(String),

    /// Network or HTTP transport failure reaching the provider
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Any other provider failure
    #[error("provider error: {message}")]
    Provider {
        status: Option<u16>,
        message: String,
    },
}

impl GenerationError {
    /// The stable wire code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            GenerationError::InvalidPrompt(_) => ErrorCode::InvalidPrompt,
            GenerationError::MissingConfiguration(_) => ErrorCode::MissingConfiguration,
            GenerationError::ContentPolicy(_) => ErrorCode::ContentPolicy,
            GenerationError::BillingLimit(_) => ErrorCode::BillingLimit,
            GenerationError::UnexpectedResponse(_)
            | GenerationError::Network(_)
            | GenerationError::Provider { .. } => ErrorCode::ProviderError,
        }
    }
}

/// Result type for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;
