//! User account endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, patch, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::User;
use crate::infrastructure::user::SignUpRequest;

/// Create the user routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(sign_up))
        .route("/users/login", post(log_in))
        .route("/users/logout", post(log_out))
        .route("/users/logoutAll", post(log_out_all))
        .route("/users/me", patch(edit_profile))
        .route("/users/me", delete(delete_account))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpBody {
    email: String,
    password: String,
    first_name: Option<String>,
    last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LogInBody {
    email: String,
    password: String,
}

/// Public view of a user; credentials and session tokens never appear here
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            first_name: user.first_name().map(String::from),
            last_name: user.last_name().map(String::from),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// Response for endpoints that open a session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Response for endpoints that return only the user
#[derive(Debug, Serialize, Deserialize)]
pub struct UserPayload {
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<SignUpBody>,
) -> Result<impl IntoResponse, ApiError> {
    let (user, token) = state
        .account_service
        .sign_up(SignUpRequest {
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            user: UserResponse::from(&user),
            token,
        }),
    ))
}

async fn log_in(
    State(state): State<AppState>,
    Json(body): Json<LogInBody>,
) -> Result<Json<SessionResponse>, ApiError> {
    let (user, token) = state.account_service.log_in(&body.email, &body.password).await?;

    Ok(Json(SessionResponse {
        user: UserResponse::from(&user),
        token,
    }))
}

async fn log_out(
    State(state): State<AppState>,
    auth: RequireUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.account_service.log_out(auth.user, &auth.token).await?;

    Ok(Json(MessageResponse {
        message: "Logged out successfully!".to_string(),
    }))
}

async fn log_out_all(
    State(state): State<AppState>,
    auth: RequireUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.account_service.log_out_all(auth.user).await?;

    Ok(Json(MessageResponse {
        message: "Logged out all devices successfully!".to_string(),
    }))
}

async fn edit_profile(
    State(state): State<AppState>,
    auth: RequireUser,
    Json(body): Json<Value>,
) -> Result<Json<UserPayload>, ApiError> {
    let updates = match body {
        Value::Object(map) => map,
        _ => return Err(ApiError::bad_request("Invalid updates: expected an object")),
    };

    let user = state.account_service.edit_profile(auth.user, updates).await?;

    Ok(Json(UserPayload {
        user: UserResponse::from(&user),
    }))
}

async fn delete_account(
    State(state): State<AppState>,
    auth: RequireUser,
) -> Result<Json<UserPayload>, ApiError> {
    let user = state.account_service.delete_account(auth.user).await?;

    Ok(Json(UserPayload {
        user: UserResponse::from(&user),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    #[test]
    fn test_user_response_redacts_secrets() {
        let user = User::new(
            UserId::generate(),
            "a@x.com",
            "$argon2id$v=19$secret-hash",
            Some("Soyeon".to_string()),
            None,
        );

        let response = UserResponse::from(&user);
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("a@x.com"));
        assert!(json.contains("firstName"));
        assert!(!json.contains("lastName"));
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
        assert!(!json.contains("tokens"));
    }
}
