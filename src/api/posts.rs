//! Post endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::post::{Post, PostId};
use crate::infrastructure::post::{CreatePostRequest, UpdatePostRequest};

/// Create the post routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post))
        .route("/posts", get(list_posts))
        .route("/posts/{id}", get(get_post))
        .route("/posts/{id}", patch(update_post))
        .route("/posts/{id}", delete(delete_post))
}

#[derive(Debug, Deserialize)]
struct CreatePostBody {
    title: String,
    body: String,
}

#[derive(Debug, Deserialize, Default)]
struct UpdatePostBody {
    title: Option<String>,
    body: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ListPostsQuery {
    q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub body: String,
    pub user_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id().to_string(),
            title: post.title().to_string(),
            body: post.body().to_string(),
            user_id: post.user_id().to_string(),
            created_at: post.created_at(),
            updated_at: post.updated_at(),
        }
    }
}

/// An unparseable id can never name an existing post
fn parse_post_id(id: &str) -> Result<PostId, ApiError> {
    PostId::parse(id).map_err(|_| ApiError::not_found("Post not found"))
}

async fn create_post(
    State(state): State<AppState>,
    auth: RequireUser,
    Json(body): Json<CreatePostBody>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .post_service
        .create(
            auth.user.id(),
            CreatePostRequest {
                title: body.title,
                body: body.body,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(&post))))
}

async fn list_posts(
    State(state): State<AppState>,
    _auth: RequireUser,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = state.post_service.list(query.q.as_deref()).await?;

    Ok(Json(posts.iter().map(PostResponse::from).collect()))
}

async fn get_post(
    State(state): State<AppState>,
    _auth: RequireUser,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let id = parse_post_id(&id)?;

    let post = state
        .post_service
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    Ok(Json(PostResponse::from(&post)))
}

async fn update_post(
    State(state): State<AppState>,
    auth: RequireUser,
    Path(id): Path<String>,
    Json(body): Json<UpdatePostBody>,
) -> Result<Json<PostResponse>, ApiError> {
    let id = parse_post_id(&id)?;

    let post = state
        .post_service
        .update(
            auth.user.id(),
            &id,
            UpdatePostRequest {
                title: body.title,
                body: body.body,
            },
        )
        .await?;

    Ok(Json(PostResponse::from(&post)))
}

async fn delete_post(
    State(state): State<AppState>,
    auth: RequireUser,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let id = parse_post_id(&id)?;

    let post = state.post_service.delete(auth.user.id(), &id).await?;

    Ok(Json(PostResponse::from(&post)))
}
