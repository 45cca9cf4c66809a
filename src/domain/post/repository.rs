//! Post repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Post, PostId};
use crate::domain::DomainError;

/// Repository trait for post storage
#[async_trait]
pub trait PostRepository: Send + Sync + Debug {
    /// Get a post by its ID
    async fn get(&self, id: &PostId) -> Result<Option<Post>, DomainError>;

    /// Create a new post
    async fn create(&self, post: Post) -> Result<Post, DomainError>;

    /// Update an existing post
    async fn update(&self, post: &Post) -> Result<Post, DomainError>;

    /// Delete a post; returns true if a record was removed
    async fn delete(&self, id: &PostId) -> Result<bool, DomainError>;

    /// List posts in creation order, optionally filtered by a
    /// case-insensitive substring search on title or body
    async fn list(&self, search: Option<&str>) -> Result<Vec<Post>, DomainError>;
}
