//! Domain errors raised by the account service.

use thiserror::Error;

/// Expected, named failure conditions of account operations.
///
/// `InvalidCredentials` deliberately carries the same message whether the
/// email is unknown or the password is wrong, so callers cannot enumerate
/// registered addresses.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("account with this email already exists")]
    DuplicateAccount,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("account not found")]
    NotFound,

    /// Infrastructure fault (store unavailable, hashing failure). Not
    /// recoverable here; propagates to the transport layer for generic
    /// handling.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_message_is_uniform() {
        // Both the unknown-email and wrong-password paths surface this exact
        // text; account enumeration must not be possible via the message.
        assert_eq!(
            AccountError::InvalidCredentials.to_string(),
            "invalid email or password"
        );
    }
}
