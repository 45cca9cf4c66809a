//! PostgreSQL post repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::post::{Post, PostId, PostRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// PostgreSQL implementation of PostRepository
#[derive(Debug, Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn get(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, body, user_id, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get post: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_post(&row))),
            None => Ok(None),
        }
    }

    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, title, body, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id().as_uuid())
        .bind(post.title())
        .bind(post.body())
        .bind(post.user_id().as_uuid())
        .bind(post.created_at())
        .bind(post.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create post: {}", e)))?;

        Ok(post)
    }

    async fn update(&self, post: &Post) -> Result<Post, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, body = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(post.id().as_uuid())
        .bind(post.title())
        .bind(post.body())
        .bind(post.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update post: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Post '{}' not found",
                post.id()
            )));
        }

        Ok(post.clone())
    }

    async fn delete(&self, id: &PostId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete post: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<Post>, DomainError> {
        let rows = match search {
            Some(q) => {
                let pattern = format!("%{}%", escape_like_pattern(q));
                sqlx::query(
                    r#"
                    SELECT id, title, body, user_id, created_at, updated_at
                    FROM posts
                    WHERE title ILIKE $1 OR body ILIKE $1
                    ORDER BY created_at
                    "#,
                )
                .bind(pattern)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, title, body, user_id, created_at, updated_at
                    FROM posts
                    ORDER BY created_at
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to list posts: {}", e)))?;

        Ok(rows.iter().map(row_to_post).collect())
    }
}

/// Escape ILIKE metacharacters so the search term matches literally, the same
/// contract as the in-memory substring search
fn escape_like_pattern(q: &str) -> String {
    q.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

fn row_to_post(row: &sqlx::postgres::PgRow) -> Post {
    let id: Uuid = row.get("id");
    let title: String = row.get("title");
    let body: String = row.get("body");
    let user_id: Uuid = row.get("user_id");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    Post::restore(
        PostId::from_uuid(id),
        title,
        body,
        UserId::from_uuid(user_id),
        created_at,
        updated_at,
    )
}
