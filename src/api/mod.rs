//! HTTP API layer

pub mod health;
pub mod middleware;
pub mod posts;
pub mod router;
pub mod state;
pub mod types;
pub mod users;
