//! Router assembly

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api::{health, posts, state::AppState, users};

/// Build the application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(users::create_router())
        .merge(posts::create_router())
        .merge(health::create_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::auth::{JwtConfig, JwtService};
    use crate::infrastructure::post::{InMemoryPostRepository, PostService};
    use crate::infrastructure::user::{AccountService, Argon2Hasher, InMemoryUserRepository};

    fn create_app() -> Router {
        let account_service = Arc::new(AccountService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Argon2Hasher::new()),
            Arc::new(JwtService::new(JwtConfig::new("test-secret-key"))),
        ));
        let post_service = Arc::new(PostService::new(Arc::new(InMemoryPostRepository::new())));

        create_router(AppState::new(account_service, post_service))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn authed_request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token));

        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn sign_up(app: &Router, email: &str, password: &str) -> (Value, String) {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/users",
                json!({"email": email, "password": password, "firstName": "Soyeon"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        let token = body["token"].as_str().unwrap().to_string();
        (body, token)
    }

    async fn log_in(app: &Router, email: &str, password: &str) -> String {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/users/login",
                json!({"email": email, "password": password}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_app();

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_sign_up_returns_user_and_token() {
        let app = create_app();

        let (body, token) = sign_up(&app, "a@x.com", "12345aA!").await;

        assert!(!token.is_empty());
        assert_eq!(body["user"]["email"], "a@x.com");
        assert_eq!(body["user"]["firstName"], "Soyeon");

        // Secrets are redacted
        let raw = body.to_string();
        assert!(!raw.contains("passwordHash"));
        assert!(!raw.contains("tokens"));
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email() {
        let app = create_app();

        sign_up(&app, "a@x.com", "12345aA!").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/users",
                json!({"email": "a@x.com", "password": "other-pass1"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Email already exists");
    }

    #[tokio::test]
    async fn test_log_in_wrong_password() {
        let app = create_app();

        sign_up(&app, "a@x.com", "12345aA!").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/users/login",
                json!({"email": "a@x.com", "password": "wrong"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_protected_route_without_token() {
        let app = create_app();

        let response = app
            .oneshot(
                Request::post("/users/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Please authenticate");
    }

    #[tokio::test]
    async fn test_multi_device_session_lifecycle() {
        let app = create_app();

        // signUp opens session T1, logIn opens session T2
        let (_, t1) = sign_up(&app, "a@x.com", "12345aA!").await;
        let t2 = log_in(&app, "a@x.com", "12345aA!").await;
        assert_ne!(t1, t2);

        // logOut with T1 revokes only T1
        let response = app
            .clone()
            .oneshot(authed_request("POST", "/users/logout", &t1, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Logged out successfully!");

        let response = app
            .clone()
            .oneshot(authed_request("POST", "/users/logout", &t1, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // T2 still works; logOutAll revokes it too
        let response = app
            .clone()
            .oneshot(authed_request("POST", "/users/logoutAll", &t2, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(authed_request(
                "PATCH",
                "/users/me",
                &t2,
                Some(json!({"firstName": "Minnie"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_edit_profile() {
        let app = create_app();

        let (_, token) = sign_up(&app, "a@x.com", "12345aA!").await;

        let response = app
            .clone()
            .oneshot(authed_request(
                "PATCH",
                "/users/me",
                &token,
                Some(json!({"firstName": "Minnie", "email": "MINNIE@Cube.com"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["user"]["firstName"], "Minnie");
        assert_eq!(body["user"]["email"], "minnie@cube.com");
    }

    #[tokio::test]
    async fn test_edit_profile_rejects_unknown_field() {
        let app = create_app();

        let (_, token) = sign_up(&app, "a@x.com", "12345aA!").await;

        let response = app
            .clone()
            .oneshot(authed_request(
                "PATCH",
                "/users/me",
                &token,
                Some(json!({"role": "admin"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid updates"));
    }

    #[tokio::test]
    async fn test_delete_account_revokes_sessions() {
        let app = create_app();

        let (_, token) = sign_up(&app, "a@x.com", "12345aA!").await;

        let response = app
            .clone()
            .oneshot(authed_request("DELETE", "/users/me", &token, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["user"]["email"], "a@x.com");

        let response = app
            .clone()
            .oneshot(authed_request("POST", "/users/logout", &token, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_posts_crud_and_search() {
        let app = create_app();

        let (_, token) = sign_up(&app, "a@x.com", "12345aA!").await;

        let response = app
            .clone()
            .oneshot(authed_request(
                "POST",
                "/posts",
                &token,
                Some(json!({"title": "Rust tips", "body": "Ownership"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let created = body_json(response).await;
        let post_id = created["id"].as_str().unwrap().to_string();

        app.clone()
            .oneshot(authed_request(
                "POST",
                "/posts",
                &token,
                Some(json!({"title": "Diary", "body": "Kimchi stew"})),
            ))
            .await
            .unwrap();

        // Search filters by substring on title or body
        let response = app
            .clone()
            .oneshot(authed_request("GET", "/posts?q=rust", &token, None))
            .await
            .unwrap();
        let listed = body_json(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let response = app
            .clone()
            .oneshot(authed_request("GET", "/posts", &token, None))
            .await
            .unwrap();
        let listed = body_json(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 2);

        // Update, then delete
        let response = app
            .clone()
            .oneshot(authed_request(
                "PATCH",
                &format!("/posts/{}", post_id),
                &token,
                Some(json!({"title": "Updated"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["title"], "Updated");

        let response = app
            .clone()
            .oneshot(authed_request(
                "DELETE",
                &format!("/posts/{}", post_id),
                &token,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(authed_request(
                "GET",
                &format!("/posts/{}", post_id),
                &token,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_foreign_post_mutation_answers_not_found() {
        let app = create_app();

        let (_, owner_token) = sign_up(&app, "owner@x.com", "12345aA!").await;
        let (_, stranger_token) = sign_up(&app, "stranger@x.com", "12345aA!").await;

        let response = app
            .clone()
            .oneshot(authed_request(
                "POST",
                "/posts",
                &owner_token,
                Some(json!({"title": "Mine", "body": "Hands off"})),
            ))
            .await
            .unwrap();
        let post_id = body_json(response).await["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(authed_request(
                "DELETE",
                &format!("/posts/{}", post_id),
                &stranger_token,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Post not found");
    }

    #[tokio::test]
    async fn test_malformed_post_id_answers_not_found() {
        let app = create_app();

        let (_, token) = sign_up(&app, "a@x.com", "12345aA!").await;

        let response = app
            .clone()
            .oneshot(authed_request("GET", "/posts/not-a-uuid", &token, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
