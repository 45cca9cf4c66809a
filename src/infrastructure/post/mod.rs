//! Post storage and service

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresPostRepository;
pub use repository::InMemoryPostRepository;
pub use service::{CreatePostRequest, PostService, UpdatePostRequest};
