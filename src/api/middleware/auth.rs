//! Bearer token authentication extractor

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;

/// Extractor that resolves the `Authorization: Bearer` token to its user.
///
/// A missing header, a malformed header, a bad signature and a revoked token
/// all produce the same 401 response, so clients learn nothing about which
/// check failed. The raw token is kept alongside the user so handlers can
/// revoke exactly the session that made the request.
pub struct RequireUser {
    pub user: User,
    pub token: String,
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(parts)
            .ok_or_else(|| ApiError::unauthorized("Please authenticate"))?
            .to_string();

        let user = state.account_service.authenticate(&token).await?;

        Ok(Self { user, token })
    }
}

fn extract_bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: &str) -> Parts {
        let (parts, _) = Request::builder()
            .header(header::AUTHORIZATION, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_extracts_bearer_token() {
        let parts = parts_with_auth("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn test_rejects_other_schemes() {
        let parts = parts_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(extract_bearer_token(&parts), None);
    }

    #[test]
    fn test_rejects_empty_token() {
        let parts = parts_with_auth("Bearer ");
        assert_eq!(extract_bearer_token(&parts), None);
    }

    #[test]
    fn test_missing_header() {
        let (parts, _) = Request::builder().body(()).unwrap().into_parts();
        assert_eq!(extract_bearer_token(&parts), None);
    }
}
