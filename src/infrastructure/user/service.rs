//! Account service: registration, login and session management

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::user::{
    normalize_email, validate_email, validate_password, User, UserId, UserRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::auth::TokenIssuer;

use super::password::PasswordHasher;

/// Profile fields accepted by `edit_profile`. Any other key fails the whole
/// request.
const ALLOWED_UPDATES: [&str; 4] = ["firstName", "lastName", "email", "password"];

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Whitelisted profile updates, deserialized after the key check
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileUpdates {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

/// Account service orchestrating the credential store, the password hasher
/// and the token issuer
#[derive(Debug)]
pub struct AccountService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AccountService {
    /// Create a new account service
    pub fn new(
        repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    /// Register a new user and open their first session
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<(User, String), DomainError> {
        let email = normalize_email(&request.email);

        validate_email(&email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.email_exists(&email).await? {
            return Err(DomainError::DuplicateEmail);
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let mut user = User::new(
            UserId::generate(),
            email,
            password_hash,
            request.first_name.map(|n| n.trim().to_string()),
            request.last_name.map(|n| n.trim().to_string()),
        );

        self.repository.create(user.clone()).await?;
        let token = self.open_session(&mut user).await?;

        debug!(user_id = %user.id(), "user registered");

        Ok((user, token))
    }

    /// Authenticate by email and password, opening a new session on success.
    ///
    /// Unknown email and wrong password fail identically; callers cannot tell
    /// which check failed. Existing sessions on other devices are untouched.
    pub async fn log_in(&self, email: &str, password: &str) -> Result<(User, String), DomainError> {
        let email = normalize_email(email);

        let mut user = self
            .repository
            .get_by_email(&email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !self.hasher.verify(password, user.password_hash()) {
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.open_session(&mut user).await?;

        debug!(user_id = %user.id(), "user logged in");

        Ok((user, token))
    }

    /// Resolve a bearer token to its user.
    ///
    /// The token must both carry a valid signature and still be present in
    /// the user's active-token list; a revoked token is rejected even though
    /// its signature verifies. Every failure in this path, including storage
    /// faults, collapses to `Unauthenticated`.
    pub async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        let claims = self.tokens.verify(token)?;

        let id = UserId::parse(claims.user_id()).map_err(|_| DomainError::Unauthenticated)?;

        let user = self
            .repository
            .get(&id)
            .await
            .map_err(|_| DomainError::Unauthenticated)?
            .ok_or(DomainError::Unauthenticated)?;

        if !user.has_token(token) {
            return Err(DomainError::Unauthenticated);
        }

        Ok(user)
    }

    /// Close the session behind the presented token; other sessions stay valid
    pub async fn log_out(&self, mut user: User, token: &str) -> Result<(), DomainError> {
        user.remove_token(token);
        self.repository.update(&user).await?;
        Ok(())
    }

    /// Close every session for the user
    pub async fn log_out_all(&self, mut user: User) -> Result<(), DomainError> {
        user.clear_tokens();
        self.repository.update(&user).await?;
        Ok(())
    }

    /// Apply a whitelisted profile update.
    ///
    /// All submitted fields are validated before anything is applied, so the
    /// update is all-or-nothing. The password is re-hashed only when it is
    /// part of the update.
    pub async fn edit_profile(
        &self,
        mut user: User,
        updates: Map<String, Value>,
    ) -> Result<User, DomainError> {
        if let Some(key) = updates
            .keys()
            .find(|k| !ALLOWED_UPDATES.contains(&k.as_str()))
        {
            return Err(DomainError::invalid_update(format!(
                "unknown field '{}'",
                key
            )));
        }

        let updates: ProfileUpdates = serde_json::from_value(Value::Object(updates))
            .map_err(|e| DomainError::invalid_update(e.to_string()))?;

        let email = match updates.email {
            Some(raw) => {
                let email = normalize_email(&raw);
                validate_email(&email).map_err(|e| DomainError::validation(e.to_string()))?;

                if email != user.email() && self.repository.email_exists(&email).await? {
                    return Err(DomainError::DuplicateEmail);
                }

                Some(email)
            }
            None => None,
        };

        if let Some(password) = &updates.password {
            validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(email) = email {
            user.set_email(email);
        }
        if let Some(first_name) = updates.first_name {
            user.set_first_name(first_name.trim());
        }
        if let Some(last_name) = updates.last_name {
            user.set_last_name(last_name.trim());
        }
        if let Some(password) = updates.password {
            let hash = self.hasher.hash(&password)?;
            user.set_password_hash(hash);
        }

        self.repository.update(&user).await
    }

    /// Permanently delete the account, implicitly invalidating all its
    /// sessions. Returns the pre-deletion snapshot.
    pub async fn delete_account(&self, user: User) -> Result<User, DomainError> {
        self.repository.delete(user.id()).await?;
        Ok(user)
    }

    /// Issue a token, record it on the user's active list and persist
    async fn open_session(&self, user: &mut User) -> Result<String, DomainError> {
        let token = self.tokens.sign(user)?;
        user.add_token(token.clone());
        self.repository.update(user).await?;
        Ok(token)
    }
}
