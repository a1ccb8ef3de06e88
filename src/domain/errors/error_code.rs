use serde::{Deserialize, Serialize};

/// Stable machine-readable error codes carried in every error envelope.
///
/// Clients switch on this enum rather than matching message substrings, so
/// the human-readable `message` text can change freely without breaking
/// error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Prompt missing, empty, or too long
    InvalidPrompt,
    /// A required post field (name, prompt, photo) is missing
    MissingField,
    /// The generation provider rejected the prompt on content grounds
    ContentPolicy,
    /// The generation provider reported a billing or quota limit
    BillingLimit,
    /// The server is missing credentials for a required provider
    MissingConfiguration,
    /// The record store is unreachable
    StoreUnavailable,
    /// The media storage provider is unreachable (strict upload mode only)
    MediaUnavailable,
    /// Too many requests from this client address
    RateLimited,
    /// Unclassified failure from an external provider
    ProviderError,
    /// Unclassified internal failure
    Internal,
    /// Forward-compatibility catch-all for codes this build does not know
    #[serde(other)]
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidPrompt => "invalid_prompt",
            ErrorCode::MissingField => "missing_field",
            ErrorCode::ContentPolicy => "content_policy",
            ErrorCode::BillingLimit => "billing_limit",
            ErrorCode::MissingConfiguration => "missing_configuration",
            ErrorCode::StoreUnavailable => "store_unavailable",
            ErrorCode::MediaUnavailable => "media_unavailable",
            ErrorCode::RateLimited => "rate_limited",
            ErrorCode::ProviderError => "provider_error",
            ErrorCode::Internal => "internal",
            ErrorCode::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
