use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    domain::{
        errors::{PostError, PostResult},
        models::{CreatePostRequest, MediaFallback, NewPost, Post, PublishReceipt},
    },
    ports::{providers::MediaStore, repositories::PostRepository, services::PostService},
};

/// Warning attached to a publish that fell back to inline photo storage
pub(crate) const INLINE_STORAGE_WARNING: &str =
    "Your image was stored inline because media storage is currently unavailable.";

/// Implementation of PostService for the community gallery
#[derive(Clone)]
pub struct PostServiceImpl {
    repository: Arc<dyn PostRepository>,
    media: Arc<dyn MediaStore>,
    fallback: MediaFallback,
}

impl PostServiceImpl {
    /// Create a new PostServiceImpl instance
    pub fn new(
        repository: Arc<dyn PostRepository>,
        media: Arc<dyn MediaStore>,
        fallback: MediaFallback,
    ) -> Self {
        Self {
            repository,
            media,
            fallback,
        }
    }

    async fn persist(&self, post: &NewPost) -> PostResult<Post> {
        let stored = self.repository.insert(post).await?;
        info!(post_id = %stored.id, "post created");
        Ok(stored)
    }
}

#[async_trait]
impl PostService for PostServiceImpl {
    async fn list_posts(&self) -> PostResult<Vec<Post>> {
        self.repository.list().await
    }

    async fn create_post(&self, request: CreatePostRequest) -> PostResult<PublishReceipt> {
        let new_post = NewPost::new(&request.name, &request.prompt, &request.photo)?;

        // The store must be reachable before the upload is attempted
        self.repository.ping().await?;

        match self.media.upload(new_post.photo()).await {
            Ok(media) => {
                let stored = self.persist(&new_post.with_photo(media.url)).await?;
                Ok(PublishReceipt::ok(stored))
            }
            Err(err) => match self.fallback {
                MediaFallback::InlineWithWarning => {
                    warn!(error = %err, "media upload failed, storing photo inline");
                    let stored = self.persist(&new_post).await?;
                    Ok(PublishReceipt::with_warning(stored, INLINE_STORAGE_WARNING))
                }
                MediaFallback::Strict => Err(PostError::MediaUnavailable {
                    message: err.to_string(),
                }),
            },
        }
    }
}
