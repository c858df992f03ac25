//! # Error Types
//!
//! Domain-specific error types for kasir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  kasir-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                       │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  kasir-store errors (separate crate)                                │
//! │  └── StoreError       - Record store / file operation failures      │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → StoreError → caller            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (barcode, ID, amounts)
//! 3. Errors are enum variants, never String
//! 4. A lookup miss is `Ok(None)`, never an error; only rule
//!    violations and I/O failures surface here

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Payment tendered at checkout does not cover the total.
    ///
    /// ## When This Occurs
    /// - Cashier confirms a sale before enough cash is entered
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout (total: Rp 20.000)
    ///      │
    ///      ▼
    /// Payment entered: Rp 15.000
    ///      │
    ///      ▼
    /// InsufficientPayment { payment: 15000, total: 20000 }
    ///      │
    ///      ▼
    /// UI shows: "Pembayaran kurang"
    /// ```
    #[error("Payment {payment} does not cover total {total}")]
    InsufficientPayment { payment: i64, total: i64 },

    /// Checkout requested on a cart with no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// A cart line index that is out of bounds.
    #[error("No cart line at index {index}")]
    LineOutOfBounds { index: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Payment does not cover the total.
    ///
    /// Takes the two amounts so the message always carries both
    /// numbers for the cashier.
    pub fn insufficient_payment(payment: Money, total: Money) -> Self {
        CoreError::InsufficientPayment {
            payment: payment.amount(),
            total: total.amount(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before persistence runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive (sell price, quantity).
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more (buy price, discount).
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., malformed date, non-numeric price text).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate barcode on create).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// A required field was empty.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// A duplicate unique value was supplied.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::insufficient_payment(Money::new(15000), Money::new(20000));
        assert_eq!(err.to_string(), "Payment 15000 does not cover total 20000");

        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("name");
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "sell_price".to_string(),
        };
        assert_eq!(err.to_string(), "sell_price must be positive");

        let err = ValidationError::duplicate("barcode", "PRD000001");
        assert_eq!(err.to_string(), "barcode 'PRD000001' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::required("name");
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
