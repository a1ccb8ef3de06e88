use crate::domain::errors::MediaResult;
use async_trait::async_trait;

/// A successfully uploaded media asset
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedMedia {
    /// Durable https URL served by the storage provider
    pub url: String,
}

/// Port for the media/CDN storage provider.
///
/// Transform directives (format/quality optimization, width bound) are
/// implementation configuration, not per-call parameters.
#[async_trait]
pub trait MediaStore: Send + Sync + 'static {
    /// Upload an image (typically an inline data URL) and return the
    /// durable URL the provider assigned
    async fn upload(&self, photo: &str) -> MediaResult<UploadedMedia>;
}
