//! JWT session token generation and validation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::user::User;
use crate::domain::DomainError;

/// Claims embedded in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Unique token ID, so tokens issued in the same second still differ
    pub jti: String,
}

impl SessionClaims {
    /// Create new claims for a user
    pub fn new(user: &User) -> Self {
        Self {
            sub: user.id().to_string(),
            iat: chrono::Utc::now().timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Get the user ID from the claims
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// Configuration for the token issuer
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

/// Trait for session token operations
pub trait TokenIssuer: Send + Sync + Debug {
    /// Sign a session token for a user
    fn sign(&self, user: &User) -> Result<String, DomainError>;

    /// Verify a token's signature and return its claims
    fn verify(&self, token: &str) -> Result<SessionClaims, DomainError>;
}

/// HS256 token issuer backed by a process-wide secret.
///
/// Tokens carry no expiry; revocation happens exclusively through the user's
/// active-token list. This mirrors the service contract, where a
/// syntactically valid token is only accepted while it remains on the list.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new token issuer with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
        }
    }
}

impl TokenIssuer for JwtService {
    fn sign(&self, user: &User) -> Result<String, DomainError> {
        let claims = SessionClaims::new(user);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign token: {}", e)))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, DomainError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens have no exp claim; lifetime is bounded by the active-token list
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| DomainError::Unauthenticated)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    fn create_test_user() -> User {
        User::new(UserId::generate(), "soyeon@cube.com", "hashed_password", None, None)
    }

    fn create_service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret-key-12345"))
    }

    #[test]
    fn test_sign_and_verify() {
        let service = create_service();
        let user = create_test_user();

        let token = service.sign(&user).unwrap();
        assert!(!token.is_empty());

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.user_id(), user.id().to_string());
    }

    #[test]
    fn test_tokens_are_unique_per_issuance() {
        let service = create_service();
        let user = create_test_user();

        let t1 = service.sign(&user).unwrap();
        let t2 = service.sign(&user).unwrap();

        // Distinct jti means two sessions issued back to back never collide
        assert_ne!(t1, t2);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = create_service();

        assert!(service.verify("invalid-token").is_err());
        assert!(service.verify("").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service1 = JwtService::new(JwtConfig::new("secret-1"));
        let service2 = JwtService::new(JwtConfig::new("secret-2"));

        let token = service1.sign(&create_test_user()).unwrap();

        assert!(service2.verify(&token).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = create_service();
        let token = service.sign(&create_test_user()).unwrap();

        let mut tampered = token.clone();
        tampered.truncate(token.len() - 2);

        assert!(service.verify(&tampered).is_err());
    }
}
