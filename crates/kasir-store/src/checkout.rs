//! # Checkout Engine
//!
//! One cashier session: an in-memory cart, a discount, and the
//! transaction log it settles into.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Happy Path                                        │
//! │                                                                         │
//! │  scan/pick product ──► add_item          (qty merges per product)      │
//! │  adjust lines      ──► set_quantity / remove_item                      │
//! │  apply discount    ──► set_discount      (absolute amount)             │
//! │                                                                         │
//! │  checkout(payment, cashier)                                            │
//! │       │                                                                 │
//! │       ├── cart empty?            → EmptyCart                           │
//! │       ├── payment < total?       → InsufficientPayment                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TransactionRepository::add      (id, date, time assigned here)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart cleared, discount reset, Transaction returned for the receipt    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing touches disk until checkout; an abandoned cart leaves no
//! trace. Checkout is not idempotent - calling it twice with the same
//! lines records two sales.

use tracing::info;

use kasir_core::cart::{Cart, CartTotals};
use kasir_core::validation::validate_discount;
use kasir_core::{CoreError, Money, NewTransaction, Product, Transaction, DEFAULT_CASHIER};

use crate::error::StoreResult;
use crate::repository::transaction::TransactionRepository;

/// A cashier session over the transaction log.
///
/// Owned by exactly one caller; all mutation goes through `&mut self`.
///
/// ## Usage
/// ```rust,ignore
/// let mut engine = CartEngine::new(transactions);
/// engine.add_item(&kopi);
/// engine.add_item(&kopi);
/// engine.set_discount(Money::new(1_000))?;
///
/// let receipt_tx = engine.checkout(Money::new(15_000), "Siti")?;
/// ```
#[derive(Debug)]
pub struct CartEngine {
    cart: Cart,
    discount: Money,
    transactions: TransactionRepository,
}

impl CartEngine {
    /// Creates an engine with an empty cart over the given log.
    pub fn new(transactions: TransactionRepository) -> Self {
        CartEngine {
            cart: Cart::new(),
            discount: Money::zero(),
            transactions,
        }
    }

    /// The current cart, for rendering.
    #[inline]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The current absolute discount.
    #[inline]
    pub fn discount(&self) -> Money {
        self.discount
    }

    /// The repository this engine settles into.
    #[inline]
    pub fn transactions(&self) -> &TransactionRepository {
        &self.transactions
    }

    /// Adds one unit of a product, merging with an existing line.
    ///
    /// The line freezes the product's name and sell price as they are
    /// right now; later catalog edits do not reach into the cart.
    pub fn add_item(&mut self, product: &Product) {
        self.cart.add_item(product);
    }

    /// Sets the quantity of a line; zero or negative removes the line.
    pub fn set_quantity(&mut self, index: usize, qty: i32) -> StoreResult<()> {
        self.cart.set_quantity(index, qty)?;
        Ok(())
    }

    /// Removes a line.
    pub fn remove_item(&mut self, index: usize) -> StoreResult<()> {
        self.cart.remove_item(index)?;
        Ok(())
    }

    /// Sets the absolute discount for this sale.
    pub fn set_discount(&mut self, discount: Money) -> StoreResult<()> {
        validate_discount(discount)?;
        self.discount = discount;
        Ok(())
    }

    /// Empties the cart and resets the discount without selling.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.discount = Money::zero();
    }

    /// Current totals under the current discount.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals(self.discount)
    }

    /// Settles the cart into the transaction log.
    ///
    /// ## Rules
    /// - The cart must not be empty
    /// - `payment` must cover the discounted total
    /// - A blank cashier name records as the default
    ///
    /// On success the cart is cleared and the discount reset; the
    /// stored transaction is returned for receipt printing.
    pub fn checkout(&mut self, payment: Money, cashier: &str) -> StoreResult<Transaction> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let totals = self.cart.totals(self.discount);
        if payment < totals.total {
            return Err(CoreError::insufficient_payment(payment, totals.total).into());
        }

        let cashier = cashier.trim();
        let cashier = if cashier.is_empty() {
            DEFAULT_CASHIER.to_string()
        } else {
            cashier.to_string()
        };

        let transaction = self.transactions.add(NewTransaction {
            items: self.cart.to_line_items(),
            subtotal: totals.subtotal,
            discount: totals.discount,
            total: totals.total,
            payment,
            change: payment - totals.total,
            cashier,
        })?;

        info!(
            id = %transaction.id,
            total = transaction.total.amount(),
            lines = transaction.items.len(),
            "Checkout complete"
        );

        self.cart.clear();
        self.discount = Money::zero();
        Ok(transaction)
    }
}
