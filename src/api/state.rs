//! Application state shared across handlers.

use std::sync::Arc;

use crate::account::AccountService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account service for registration, authentication and lookups.
    pub accounts: Arc<AccountService>,
    /// Origins allowed by the CORS layer.
    pub allowed_origins: Vec<String>,
}

impl AppState {
    /// Create new application state.
    pub fn new(accounts: AccountService) -> Self {
        Self {
            accounts: Arc::new(accounts),
            allowed_origins: Vec::new(),
        }
    }

    /// Set the origins the CORS layer should accept.
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }
}
