use crate::domain::{
    errors::PostResult,
    models::{CreatePostRequest, Post, PublishReceipt},
};
use async_trait::async_trait;

/// Port for gallery post operations
#[async_trait]
pub trait PostService: Send + Sync + 'static {
    /// Return all published posts
    async fn list_posts(&self) -> PostResult<Vec<Post>>;

    /// Validate and publish a post, uploading its photo to durable media
    /// storage first. Depending on the configured fallback policy, a failed
    /// upload either degrades to inline storage with a warning or fails the
    /// publish.
    async fn create_post(&self, request: CreatePostRequest) -> PostResult<PublishReceipt>;
}
