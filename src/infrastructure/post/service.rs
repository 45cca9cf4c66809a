//! Post service with ownership checks

use std::sync::Arc;

use crate::domain::post::{Post, PostId, PostRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Request for creating a post
#[derive(Debug, Clone)]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
}

/// Request for updating a post; absent fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Post service
///
/// Mutations are owner-only; a post owned by someone else answers as if it
/// did not exist.
#[derive(Debug)]
pub struct PostService {
    repository: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repository: Arc<dyn PostRepository>) -> Self {
        Self { repository }
    }

    /// Create a post owned by the given user
    pub async fn create(
        &self,
        owner: &UserId,
        request: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let post = Post::new(PostId::generate(), request.title, request.body, *owner);
        self.repository.create(post).await
    }

    /// Get a post by ID
    pub async fn get(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        self.repository.get(id).await
    }

    /// List posts, optionally filtered by a substring search on title or body
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Post>, DomainError> {
        self.repository.list(search).await
    }

    /// Update a post owned by the given user
    pub async fn update(
        &self,
        owner: &UserId,
        id: &PostId,
        request: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let mut post = self.get_owned(owner, id).await?;

        if let Some(title) = request.title {
            post.set_title(title);
        }
        if let Some(body) = request.body {
            post.set_body(body);
        }

        self.repository.update(&post).await
    }

    /// Delete a post owned by the given user; returns the removed post
    pub async fn delete(&self, owner: &UserId, id: &PostId) -> Result<Post, DomainError> {
        let post = self.get_owned(owner, id).await?;
        self.repository.delete(id).await?;
        Ok(post)
    }

    async fn get_owned(&self, owner: &UserId, id: &PostId) -> Result<Post, DomainError> {
        let post = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post not found"))?;

        if post.user_id() != owner {
            return Err(DomainError::not_found("Post not found"));
        }

        Ok(post)
    }
}
