//! Account store abstraction and its SQLite implementation.

use anyhow::Context;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::error::AccountError;
use super::models::Account;

/// Persisted form of a partial update. The password, if any, has already
/// been hashed by the service.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub user_name: Option<String>,
}

/// Capability set the account service requires from a store.
///
/// Any backend (embedded, relational, remote) satisfying this trait is
/// substitutable. Uniqueness of `email` must be enforced by the store
/// itself; `insert` and `update` report violations as
/// [`AccountError::DuplicateAccount`].
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn insert(
        &self,
        email: &str,
        password_hash: &str,
        user_name: &str,
    ) -> Result<Account, AccountError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AccountError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    async fn list_all(&self) -> Result<Vec<Account>, AccountError>;

    async fn update(&self, id: i64, patch: AccountPatch) -> Result<Account, AccountError>;

    async fn delete(&self, id: i64) -> Result<(), AccountError>;
}

/// SQLite-backed account store.
#[derive(Debug, Clone)]
pub struct SqliteAccountStore {
    pool: SqlitePool,
}

impl SqliteAccountStore {
    /// Create a new store over an existing connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const ACCOUNT_COLUMNS: &str = "id, email, password_hash, user_name, created_at, updated_at";

/// True when the error is the unique-index violation on `accounts.email`.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    #[instrument(skip(self, password_hash))]
    async fn insert(
        &self,
        email: &str,
        password_hash: &str,
        user_name: &str,
    ) -> Result<Account, AccountError> {
        debug!("Inserting account for {}", email);

        let result = sqlx::query(
            r#"
            INSERT INTO accounts (email, password_hash, user_name)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(user_name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AccountError::DuplicateAccount
            } else {
                AccountError::Store(anyhow::Error::new(e).context("inserting account"))
            }
        })?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AccountError::Store(anyhow::anyhow!("account missing after insert")))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AccountError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("fetching account by id")?;

        Ok(account)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("fetching account by email")?;

        Ok(account)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .context("listing accounts")?;

        Ok(accounts)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: i64, patch: AccountPatch) -> Result<Account, AccountError> {
        let existing = self.find_by_id(id).await?.ok_or(AccountError::NotFound)?;

        // Build update query dynamically
        let mut updates = Vec::new();
        let mut values: Vec<String> = Vec::new();

        if let Some(email) = patch.email {
            updates.push("email = ?");
            values.push(email);
        }

        if let Some(password_hash) = patch.password_hash {
            updates.push("password_hash = ?");
            values.push(password_hash);
        }

        if let Some(user_name) = patch.user_name {
            updates.push("user_name = ?");
            values.push(user_name);
        }

        if updates.is_empty() {
            return Ok(existing);
        }

        updates.push("updated_at = datetime('now')");

        let sql = format!("UPDATE accounts SET {} WHERE id = ?", updates.join(", "));

        let mut query_builder = sqlx::query(&sql);
        for value in &values {
            query_builder = query_builder.bind(value);
        }
        query_builder = query_builder.bind(id);

        query_builder.execute(&self.pool).await.map_err(|e| {
            if is_unique_violation(&e) {
                AccountError::DuplicateAccount
            } else {
                AccountError::Store(anyhow::Error::new(e).context("updating account"))
            }
        })?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AccountError::Store(anyhow::anyhow!("account missing after update")))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), AccountError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("deleting account")?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound);
        }

        Ok(())
    }
}
