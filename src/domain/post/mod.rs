//! Post domain model

mod entity;
mod repository;

pub use entity::{Post, PostId};
pub use repository::PostRepository;
