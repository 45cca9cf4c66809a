//! Shared application state

use std::sync::Arc;

use crate::infrastructure::post::PostService;
use crate::infrastructure::user::AccountService;

/// State shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub post_service: Arc<PostService>,
}

impl AppState {
    pub fn new(account_service: Arc<AccountService>, post_service: Arc<PostService>) -> Self {
        Self {
            account_service,
            post_service,
        }
    }
}
