//! Account service for business logic.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, instrument};

use super::error::AccountError;
use super::models::{Account, AccountChanges, AccountProfile, NewAccount};
use super::repository::{AccountPatch, AccountStore};

/// Service for account management operations.
///
/// Every operation returns an [`AccountProfile`]; the stored [`Account`] and
/// its password hash never leave this module.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    /// Create a new account service over any store implementation.
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Register a new account.
    ///
    /// The lookup before the insert is a fast path for a better error; the
    /// store's unique constraint is the authoritative duplicate guard, so a
    /// concurrent registration racing past the check still fails with
    /// [`AccountError::DuplicateAccount`].
    #[instrument(skip(self, account), fields(email = %account.email))]
    pub async fn register(&self, account: NewAccount) -> Result<AccountProfile, AccountError> {
        if self.store.find_by_email(&account.email).await?.is_some() {
            return Err(AccountError::DuplicateAccount);
        }

        let password_hash = hash_password(&account.password)?;
        let created = self
            .store
            .insert(&account.email, &password_hash, &account.user_name)
            .await?;

        info!(account_id = created.id, "Registered new account");
        Ok(created.into())
    }

    /// Verify credentials and return the matching account.
    ///
    /// Unknown email and wrong password fail identically so the caller
    /// cannot probe which addresses are registered.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccountProfile, AccountError> {
        let Some(account) = self.store.find_by_email(email).await? else {
            return Err(AccountError::InvalidCredentials);
        };

        if !verify_password(password, &account.password_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        info!(account_id = account.id, "Account authenticated");
        Ok(account.into())
    }

    /// List every account. An empty list is a successful result.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<AccountProfile>, AccountError> {
        let accounts = self.store.list_all().await?;
        Ok(accounts.into_iter().map(Account::into).collect())
    }

    /// Look up an account by id.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<AccountProfile, AccountError> {
        self.store
            .find_by_id(id)
            .await?
            .map(Account::into)
            .ok_or(AccountError::NotFound)
    }

    /// Look up an account by email.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<AccountProfile, AccountError> {
        self.store
            .find_by_email(email)
            .await?
            .map(Account::into)
            .ok_or(AccountError::NotFound)
    }

    /// Apply a partial update to an account.
    ///
    /// A supplied password is re-hashed before anything touches the store;
    /// plaintext is never persisted. An email change hits the same unique
    /// constraint as registration.
    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        id: i64,
        changes: AccountChanges,
    ) -> Result<AccountProfile, AccountError> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(AccountError::NotFound);
        }

        if let Some(email) = &changes.email {
            if let Some(existing) = self.store.find_by_email(email).await? {
                if existing.id != id {
                    return Err(AccountError::DuplicateAccount);
                }
            }
        }

        let patch = AccountPatch {
            email: changes.email,
            password_hash: changes.password.as_deref().map(hash_password).transpose()?,
            user_name: changes.user_name,
        };

        let updated = self.store.update(id, patch).await?;
        info!(account_id = updated.id, "Updated account");

        Ok(updated.into())
    }

    /// Delete an account.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AccountError> {
        self.store.delete(id).await?;
        info!(account_id = id, "Deleted account");
        Ok(())
    }
}

/// Hash a password using bcrypt.
fn hash_password(password: &str) -> Result<String, AccountError> {
    // Use a lower cost factor for development speed
    let cost = if cfg!(debug_assertions) { 4 } else { 10 };
    let hash = bcrypt::hash(password, cost).context("hashing password")?;
    Ok(hash)
}

/// Verify a password against a bcrypt hash.
fn verify_password(password: &str, hash: &str) -> Result<bool, AccountError> {
    let matches = bcrypt::verify(password, hash).context("verifying password")?;
    Ok(matches)
}
