//! Domain layer: entities, repository traits and errors

pub mod error;
pub mod post;
pub mod user;

pub use error::DomainError;
