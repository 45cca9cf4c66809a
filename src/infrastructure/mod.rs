//! Infrastructure layer: storage, hashing, tokens, logging

pub mod auth;
pub mod logging;
pub mod post;
pub mod user;
