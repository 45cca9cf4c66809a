//! In-memory post repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::post::{Post, PostId, PostRepository};
use crate::domain::DomainError;

/// In-memory implementation of PostRepository
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<HashMap<Uuid, Post>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn get(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        let posts = self.posts.read().await;
        Ok(posts.get(id.as_uuid()).cloned())
    }

    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        let mut posts = self.posts.write().await;
        posts.insert(*post.id().as_uuid(), post.clone());
        Ok(post)
    }

    async fn update(&self, post: &Post) -> Result<Post, DomainError> {
        let mut posts = self.posts.write().await;

        if !posts.contains_key(post.id().as_uuid()) {
            return Err(DomainError::not_found(format!(
                "Post '{}' not found",
                post.id()
            )));
        }

        posts.insert(*post.id().as_uuid(), post.clone());
        Ok(post.clone())
    }

    async fn delete(&self, id: &PostId) -> Result<bool, DomainError> {
        let mut posts = self.posts.write().await;
        Ok(posts.remove(id.as_uuid()).is_some())
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<Post>, DomainError> {
        let posts = self.posts.read().await;

        let mut result: Vec<Post> = posts
            .values()
            .filter(|p| search.is_none_or(|q| p.matches(q)))
            .cloned()
            .collect();

        result.sort_by_key(|p| p.created_at());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    fn create_test_post(title: &str, body: &str) -> Post {
        Post::new(PostId::generate(), title, body, UserId::generate())
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryPostRepository::new();
        let post = create_test_post("Hello", "World");

        repo.create(post.clone()).await.unwrap();

        let retrieved = repo.get(post.id()).await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().title(), "Hello");
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let repo = InMemoryPostRepository::new();
        let post = create_test_post("Hello", "World");

        let result = repo.update(&post).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryPostRepository::new();
        let post = create_test_post("Hello", "World");

        repo.create(post.clone()).await.unwrap();

        assert!(repo.delete(post.id()).await.unwrap());
        assert!(!repo.delete(post.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_with_search() {
        let repo = InMemoryPostRepository::new();

        repo.create(create_test_post("Rust tips", "Ownership explained"))
            .await
            .unwrap();
        repo.create(create_test_post("Travel notes", "Visiting Seoul"))
            .await
            .unwrap();

        let all = repo.list(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let rust = repo.list(Some("rust")).await.unwrap();
        assert_eq!(rust.len(), 1);
        assert_eq!(rust[0].title(), "Rust tips");

        let seoul = repo.list(Some("SEOUL")).await.unwrap();
        assert_eq!(seoul.len(), 1);

        let none = repo.list(Some("missing")).await.unwrap();
        assert!(none.is_empty());
    }
}
