//! # Validation Module
//!
//! Input validation utilities for Kasir POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: UI shell (external)                                       │
//! │  ├── Basic format checks (empty fields, numeric entry)              │
//! │  └── Immediate user feedback                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - business rule validation                    │
//! │  ├── Runs on every repository save (add and update alike)           │
//! │  └── Runs before checkout persists a transaction                    │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Typed record structs                                      │
//! │  └── A record that deserializes is shaped right by construction     │
//! │                                                                     │
//! │  The store files have no constraints of their own, so layer 2      │
//! │  is the last line of defense before bad data reaches disk.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasir_core::money::Money;
//! use kasir_core::validation::{validate_product_name, validate_sell_price};
//!
//! validate_product_name("Kopi Hitam").unwrap();
//! validate_sell_price(Money::new(8000)).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (whitespace-only counts as empty)
///
/// ## Example
/// ```rust
/// use kasir_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Kopi Hitam").is_ok());
/// assert!(validate_product_name("").is_err());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::required("name"));
    }

    Ok(())
}

// =============================================================================
// Money Validators
// =============================================================================

/// Validates a sell price.
///
/// ## Rules
/// - Must be strictly positive; a product that sells for nothing is a
///   data-entry mistake, not a giveaway
///
/// ## Example
/// ```rust
/// use kasir_core::money::Money;
/// use kasir_core::validation::validate_sell_price;
///
/// assert!(validate_sell_price(Money::new(8000)).is_ok());
/// assert!(validate_sell_price(Money::zero()).is_err());
/// assert!(validate_sell_price(Money::new(-100)).is_err());
/// ```
pub fn validate_sell_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "sell_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a buy price.
///
/// ## Rules
/// - Must be zero or more; zero covers products with unknown cost
pub fn validate_buy_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "buy_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a cart discount.
///
/// ## Rules
/// - Must be zero or more; the totals rule clamps an oversized discount,
///   a negative one would silently become a surcharge
pub fn validate_discount(discount: Money) -> ValidationResult<()> {
    if discount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "discount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be at least 1; a zero-quantity line is removed, not stored
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  Cart: Set Quantity                                                 │
/// │                                                                     │
/// │  Cashier enters quantity: 3                                         │
/// │       │                                                             │
/// │       ▼                                                             │
/// │  validate_quantity(3) ← THIS FUNCTION                               │
/// │       │                                                             │
/// │       ├── qty == 0? → Error: "quantity must be positive"            │
/// │       │               (cart paths treat ≤ 0 as "remove the line")   │
/// │       │                                                             │
/// │       └── OK → line subtotal recomputed as price × qty              │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Kopi Hitam").is_ok());
        assert!(validate_product_name("Es Teh Manis").is_ok());

        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
    }

    #[test]
    fn test_validate_sell_price() {
        assert!(validate_sell_price(Money::new(8000)).is_ok());
        assert!(validate_sell_price(Money::new(1)).is_ok());

        assert!(validate_sell_price(Money::zero()).is_err());
        assert!(validate_sell_price(Money::new(-100)).is_err());
    }

    #[test]
    fn test_validate_buy_price() {
        assert!(validate_buy_price(Money::zero()).is_ok());
        assert!(validate_buy_price(Money::new(5000)).is_ok());

        assert!(validate_buy_price(Money::new(-1)).is_err());
    }

    #[test]
    fn test_validate_discount() {
        assert!(validate_discount(Money::zero()).is_ok());
        assert!(validate_discount(Money::new(4000)).is_ok());

        assert!(validate_discount(Money::new(-4000)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
    }
}
