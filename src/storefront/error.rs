//! Storefront error types

use crate::storage::StorageError;
use thiserror::Error;

/// Errors returned by storefront operations
///
/// `EmptyEmail`, `NotLoggedIn` and `EmptyCart` are unmet preconditions that
/// leave the store untouched; `Storage` means a write could not be persisted.
#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Email must not be empty")]
    EmptyEmail,

    #[error("You must be logged in to place an order.")]
    NotLoggedIn,

    #[error("Your cart is empty.")]
    EmptyCart,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StorefrontError {
    /// Short machine-readable reason
    pub fn reason(&self) -> &'static str {
        match self {
            StorefrontError::EmptyEmail => "empty email",
            StorefrontError::NotLoggedIn => "not logged in",
            StorefrontError::EmptyCart => "empty cart",
            StorefrontError::Storage(_) => "storage failure",
        }
    }
}

/// Result type alias for storefront operations
pub type StorefrontResult<T> = Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reasons() {
        assert_eq!(StorefrontError::NotLoggedIn.reason(), "not logged in");
        assert_eq!(StorefrontError::EmptyCart.reason(), "empty cart");
        assert_eq!(StorefrontError::EmptyEmail.reason(), "empty email");

        let err: StorefrontError = StorageError::Backend("quota".to_string()).into();
        assert_eq!(err.reason(), "storage failure");
        assert_eq!(err.to_string(), "Backend error: quota");
    }

    #[test]
    fn test_notice_text() {
        assert_eq!(
            StorefrontError::NotLoggedIn.to_string(),
            "You must be logged in to place an order."
        );
        assert_eq!(StorefrontError::EmptyCart.to_string(), "Your cart is empty.");
    }
}
