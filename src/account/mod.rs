//! Account management module.
//!
//! Provides account registration, password authentication, lookups, updates
//! and deletion over an abstract account store.

mod error;
mod models;
mod repository;
mod service;

pub use error::AccountError;
pub use models::{Account, AccountChanges, AccountProfile, NewAccount};
pub use repository::{AccountPatch, AccountStore, SqliteAccountStore};
pub use service::AccountService;
