//! Request payload validation.
//!
//! Validation runs in the transport layer, before any service call. Each
//! function returns the full list of field errors rather than stopping at
//! the first, so a client can fix a bad payload in one pass.

use serde::Serialize;

use crate::account::{AccountChanges, NewAccount};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// A single validation failure, named by the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a registration payload.
pub fn registration(account: &NewAccount) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    check_email(&account.email, &mut errors);
    check_password(&account.password, &mut errors);
    if account.user_name.trim().is_empty() {
        errors.push(FieldError::new("user_name", "user_name must not be empty"));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate a login payload.
pub fn credentials(email: &str, password: &str) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    check_email(email, &mut errors);
    check_password(password, &mut errors);

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate a partial update payload. Only supplied fields are checked.
pub fn update(changes: &AccountChanges) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if let Some(email) = &changes.email {
        check_email(email, &mut errors);
    }
    if let Some(password) = &changes.password {
        check_password(password, &mut errors);
    }
    if let Some(user_name) = &changes.user_name {
        if user_name.trim().is_empty() {
            errors.push(FieldError::new("user_name", "user_name must not be empty"));
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    if !is_valid_email(email) {
        errors.push(FieldError::new("email", "email must be a valid address"));
    }
}

fn check_password(password: &str, errors: &mut Vec<FieldError>) {
    if password.len() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }
    !parts[0].is_empty() && parts[1].contains('.')
}
