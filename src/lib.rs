//! Account API
//!
//! A small HTTP service for user accounts with:
//! - Registration, login and multi-device session management
//! - Argon2 password hashing and JWT bearer tokens with server-side revocation
//! - A posts resource with owner-only mutations
//! - In-memory or Postgres storage, selected by configuration

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use api::state::AppState;
use domain::post::PostRepository;
use domain::user::UserRepository;
use infrastructure::auth::{JwtConfig, JwtService};
use infrastructure::post::{InMemoryPostRepository, PostService, PostgresPostRepository};
use infrastructure::user::{
    AccountService, Argon2Hasher, InMemoryUserRepository, PostgresUserRepository,
};

/// Build the application state from configuration, wiring the configured
/// storage backend into the services.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let (user_repository, post_repository): (Arc<dyn UserRepository>, Arc<dyn PostRepository>) =
        match config.storage.backend.as_str() {
            "postgres" => {
                let url = config
                    .storage
                    .database_url
                    .clone()
                    .or_else(|| std::env::var("DATABASE_URL").ok())
                    .context("postgres backend selected but no database URL configured")?;

                let pool = PgPoolOptions::new()
                    .max_connections(10)
                    .connect(&url)
                    .await
                    .context("failed to connect to postgres")?;

                (
                    Arc::new(PostgresUserRepository::new(pool.clone())),
                    Arc::new(PostgresPostRepository::new(pool)),
                )
            }
            "memory" => (
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryPostRepository::new()),
            ),
            other => anyhow::bail!("unknown storage backend '{}'", other),
        };

    let account_service = Arc::new(AccountService::new(
        user_repository,
        Arc::new(Argon2Hasher::new()),
        Arc::new(JwtService::new(JwtConfig::new(&config.auth.jwt_secret))),
    ));
    let post_service = Arc::new(PostService::new(post_repository));

    Ok(AppState::new(account_service, post_service))
}
