use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    domain::{
        errors::PostResult,
        models::{NewPost, Post},
    },
    ports::repositories::PostRepository,
};

/// In-memory implementation of PostRepository for testing and development
#[derive(Clone, Default)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: &NewPost) -> PostResult<Post> {
        let stored = Post {
            id: Uuid::new_v4(),
            name: post.name().to_string(),
            prompt: post.prompt().to_string(),
            photo: post.photo().to_string(),
            created_at: Utc::now(),
        };

        self.posts.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> PostResult<Vec<Post>> {
        let posts = self.posts.read().await;
        // newest first, matching the SQL adapter's ordering
        Ok(posts.iter().rev().cloned().collect())
    }

    async fn ping(&self) -> PostResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(prompt: &str) -> NewPost {
        NewPost::new("Al", prompt, "data:image/jpeg;base64,AQID").unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_identity_and_timestamp() {
        let repo = InMemoryPostRepository::new();
        let a = repo.insert(&sample("first")).await.unwrap();
        let b = repo.insert(&sample("second")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = InMemoryPostRepository::new();
        repo.insert(&sample("first")).await.unwrap();
        repo.insert(&sample("second")).await.unwrap();

        let posts = repo.list().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].prompt, "second");
        assert_eq!(posts[1].prompt, "first");
    }
}
