//! Domain error types.

use common::ProductId;
use storage::StorageError;
use thiserror::Error;

use crate::order::OrderError;
use crate::validate::ValidationError;

/// Errors that can occur during checkout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// The cart has no lines to turn into an order.
    #[error("cannot place an order from an empty cart")]
    EmptyCart,

    /// Another checkout is already in flight for this session.
    #[error("another checkout is already in progress")]
    AlreadyInProgress,
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The catalog source failed; re-invoking the load retries.
    #[error("Network error: {0}")]
    Network(String),

    /// Malformed profile or payment input.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Checkout was rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// An order operation failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// The product id is not in the current catalog.
    #[error("Product error: unknown product {0}")]
    UnknownProduct(ProductId),

    /// The key-value store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DomainError {
    /// Returns true if retrying the same operation can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Network(_))
    }

    /// A short hint the boundary layer can show next to the error.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DomainError::Network(_) => "Check your internet connection and try again.",
            DomainError::Validation(_) => "Check your input and try again.",
            DomainError::Checkout(CheckoutError::EmptyCart) => {
                "Add an item to your cart before checking out."
            }
            DomainError::Checkout(CheckoutError::AlreadyInProgress) => {
                "Wait for the current checkout to finish."
            }
            DomainError::UnknownProduct(_) => {
                "The product may be temporarily unavailable. Try again later."
            }
            DomainError::Order(_) | DomainError::Storage(_) | DomainError::Serialization(_) => {
                "Try again or contact support if the problem persists."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_errors_are_retryable() {
        let err = DomainError::Network("timed out".to_string());
        assert!(err.is_retryable());
        assert!(!DomainError::Checkout(CheckoutError::EmptyCart).is_retryable());
    }

    #[test]
    fn display_includes_category() {
        let err = DomainError::Network("timed out".to_string());
        assert_eq!(err.to_string(), "Network error: timed out");

        let err = DomainError::UnknownProduct(ProductId::new("SKU-404"));
        assert_eq!(err.to_string(), "Product error: unknown product SKU-404");
    }

    #[test]
    fn every_error_has_a_recovery_suggestion() {
        let errors = [
            DomainError::Network("x".into()),
            DomainError::Checkout(CheckoutError::EmptyCart),
            DomainError::Checkout(CheckoutError::AlreadyInProgress),
            DomainError::UnknownProduct(ProductId::new("SKU-1")),
        ];
        for err in errors {
            assert!(!err.recovery_suggestion().is_empty());
        }
    }
}
