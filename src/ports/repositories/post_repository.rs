use crate::domain::{
    errors::PostResult,
    models::{NewPost, Post},
};
use async_trait::async_trait;

/// Repository for persisting gallery posts.
///
/// The repository owns record identity and timestamps; callers only supply
/// the user-facing fields. Connection state is owned by the implementation
/// and surfaced through `ping`, never through process-wide globals.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist a new post, returning the stored record with its assigned
    /// identity and timestamp
    async fn insert(&self, post: &NewPost) -> PostResult<Post>;

    /// Return all stored posts, newest first when the store orders them
    async fn list(&self) -> PostResult<Vec<Post>>;

    /// Verify the store is reachable before attempting a write
    async fn ping(&self) -> PostResult<()>;
}
