use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    errors::ValidationError,
    value_objects::{DisplayName, Prompt},
};

/// A gallery post as stored in the record store.
///
/// Identity and timestamp are assigned by the store; the service layer only
/// supplies name, prompt, and photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub name: String,
    pub prompt: String,
    /// Durable https URL, or an inline data URL when the upload degraded
    pub photo: String,
    pub created_at: DateTime<Utc>,
}

/// A validated, not-yet-persisted gallery post
#[derive(Debug, Clone)]
pub struct NewPost {
    name: DisplayName,
    prompt: Prompt,
    photo: String,
}

impl NewPost {
    /// Validate the three user-facing fields of a post
    pub fn new(name: &str, prompt: &str, photo: &str) -> Result<Self, ValidationError> {
        let name = DisplayName::new(name)?;
        let prompt = Prompt::new(prompt)?;

        if photo.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "photo" });
        }

        Ok(Self {
            name,
            prompt,
            photo: photo.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn prompt(&self) -> &str {
        self.prompt.as_str()
    }

    pub fn photo(&self) -> &str {
        &self.photo
    }

    /// Replace the photo reference, keeping name and prompt.
    /// Used after a successful upload to swap the inline data for the
    /// durable URL the media store returned.
    pub fn with_photo(mut self, photo: String) -> Self {
        self.photo = photo;
        self
    }
}

/// Raw, unvalidated request to create a post
#[derive(Debug, Clone, Default)]
pub struct CreatePostRequest {
    pub name: String,
    pub prompt: String,
    pub photo: String,
}

/// Outcome of a publish, including the non-fatal warning attached when the
/// media upload degraded to inline storage
#[derive(Debug, Clone)]
pub struct PublishReceipt {
    pub post: Post,
    pub warning: Option<String>,
}

impl PublishReceipt {
    pub fn ok(post: Post) -> Self {
        Self {
            post,
            warning: None,
        }
    }

    pub fn with_warning(post: Post, warning: impl Into<String>) -> Self {
        Self {
            post,
            warning: Some(warning.into()),
        }
    }
}

/// What to do when the media storage provider fails during publish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaFallback {
    /// Store the original inline data URL and attach a warning to the
    /// response; the publish still succeeds
    #[default]
    InlineWithWarning,
    /// Fail the publish with a media-unavailable error
    Strict,
}

/// A generated image as returned by the generation provider
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    /// Base64-encoded image bytes, without any data-URL prefix
    pub base64: String,
    /// Provider model identifier, when the provider reports one
    pub model: Option<String>,
}

impl GeneratedImage {
    /// The generated payload as an inline data URL suitable for the
    /// `photo` field of a post
    pub fn data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.base64)
    }
}
