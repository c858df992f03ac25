//! # Cart
//!
//! The in-memory transaction-in-progress.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operations                               │
//! │                                                                     │
//! │  Cashier Action           Cart Call               State Change      │
//! │  ──────────────           ─────────               ────────────      │
//! │                                                                     │
//! │  Scan/click product ────► add_item() ───────────► qty += 1, or a   │
//! │                                                    new line (qty 1) │
//! │                                                                     │
//! │  Edit quantity ─────────► set_quantity(i, n) ───► line updated;    │
//! │                                                    n ≤ 0 removes it │
//! │                                                                     │
//! │  Remove line ───────────► remove_item(i) ───────► lines.remove(i)  │
//! │                                                                     │
//! │  Totals panel ──────────► totals(discount) ─────► (read only)      │
//! │                                                                     │
//! │  One line per distinct product; the sell price is frozen when the  │
//! │  line is created, so catalog edits never change an open cart.      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, Product};

// =============================================================================
// Cart Line
// =============================================================================

/// One line of the open cart.
///
/// ## Design Notes
/// - `product_id` identifies the line for merging repeat adds
/// - barcode, name and price are frozen copies taken when the line was
///   created; the subtotal is always derived, never stored, so a
///   quantity edit cannot leave it stale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog product this line came from.
    pub product_id: String,

    /// Barcode at time of adding (frozen).
    pub barcode: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Sell price at time of adding (frozen).
    pub price: Money,

    /// Quantity on this line; always at least 1.
    pub qty: u32,
}

impl CartLine {
    /// Creates a cart line from a catalog product with quantity 1.
    ///
    /// ## Price Freezing
    /// The sell price is captured at this moment. If the product price
    /// changes in the catalog, this line keeps the original price.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id.clone(),
            barcode: product.barcode.clone(),
            name: product.name.clone(),
            price: product.sell_price,
            qty: 1,
        }
    }

    /// The line subtotal (price × qty).
    pub fn subtotal(&self) -> Money {
        self.price.multiply_quantity(self.qty)
    }

    /// Converts this line into the persisted snapshot form.
    pub fn to_line_item(&self) -> LineItem {
        LineItem::new(
            self.product_id.clone(),
            self.barcode.clone(),
            self.name.clone(),
            self.price,
            self.qty,
        )
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The open cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product again
///   increases its quantity)
/// - Every line has qty ≥ 1 (setting qty ≤ 0 removes the line)
/// - Line order is insertion order and survives into the persisted
///   transaction unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Lines in the cart, in insertion order.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product already in the cart: its quantity increases by 1
    /// - Otherwise: a new line with qty 1 and the current sell price
    pub fn add_item(&mut self, product: &Product) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.qty += 1;
            return;
        }

        self.lines.push(CartLine::from_product(product));
    }

    /// Sets the quantity of the line at `index`.
    ///
    /// ## Behavior
    /// - qty ≤ 0: the line is removed
    /// - otherwise: the line quantity is replaced
    pub fn set_quantity(&mut self, index: usize, qty: i32) -> CoreResult<()> {
        if index >= self.lines.len() {
            return Err(CoreError::LineOutOfBounds { index });
        }

        if qty <= 0 {
            self.lines.remove(index);
        } else {
            self.lines[index].qty = qty as u32;
        }

        Ok(())
    }

    /// Removes the line at `index`.
    pub fn remove_item(&mut self, index: usize) -> CoreResult<()> {
        if index >= self.lines.len() {
            return Err(CoreError::LineOutOfBounds { index });
        }

        self.lines.remove(index);
        Ok(())
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.qty).sum()
    }

    /// Sum of line subtotals.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Computes the totals for a given absolute discount.
    ///
    /// ## Rules
    /// - subtotal = Σ line.subtotal
    /// - total = max(0, subtotal − discount); a discount larger than
    ///   the subtotal makes the sale free, never negative
    pub fn totals(&self, discount: Money) -> CartTotals {
        let subtotal = self.subtotal();
        CartTotals {
            line_count: self.line_count(),
            total_quantity: self.total_quantity(),
            subtotal,
            discount,
            total: subtotal.saturating_sub(discount),
        }
    }

    /// Snapshots every line into its persisted form, preserving order.
    pub fn to_line_items(&self) -> Vec<LineItem> {
        self.lines.iter().map(CartLine::to_line_item).collect()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart totals summary for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: u32,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_product(id: &str, sell_price: i64) -> Product {
        Product {
            id: id.to_string(),
            product_number: 1,
            barcode: format!("PRD-{id}"),
            name: format!("Product {id}"),
            category: "Minuman".to_string(),
            buy_price: Money::new(sell_price / 2),
            sell_price: Money::new(sell_price),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_item_creates_line_with_qty_one() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("A", 8000));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines[0].qty, 1);
        assert_eq!(cart.subtotal(), Money::new(8000));
    }

    #[test]
    fn test_add_same_product_increments_quantity() {
        let mut cart = Cart::new();
        let product = test_product("A", 8000);

        cart.add_item(&product);
        cart.add_item(&product);
        cart.add_item(&product);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines[0].qty, 3);
        assert_eq!(cart.subtotal(), Money::new(24000));
    }

    #[test]
    fn test_price_frozen_at_add_time() {
        let mut cart = Cart::new();
        let mut product = test_product("A", 8000);
        cart.add_item(&product);

        // A later catalog price change must not touch the open cart.
        product.sell_price = Money::new(12000);
        cart.add_item(&product);

        assert_eq!(cart.lines[0].price, Money::new(8000));
        assert_eq!(cart.subtotal(), Money::new(16000));
    }

    #[test]
    fn test_set_quantity_updates_subtotal() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("A", 8000));

        cart.set_quantity(0, 5).unwrap();
        assert_eq!(cart.lines[0].qty, 5);
        assert_eq!(cart.subtotal(), Money::new(40000));
    }

    #[test]
    fn test_set_quantity_zero_or_negative_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("A", 8000));
        cart.add_item(&test_product("B", 5000));

        cart.set_quantity(0, 0).unwrap();
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines[0].product_id, "B");

        cart.set_quantity(0, -3).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item_out_of_bounds() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("A", 8000));

        assert!(matches!(
            cart.remove_item(5),
            Err(CoreError::LineOutOfBounds { index: 5 })
        ));
        assert!(cart.remove_item(0).is_ok());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_applies_absolute_discount() {
        let mut cart = Cart::new();
        let product = test_product("A", 8000);
        cart.add_item(&product);
        cart.add_item(&product);
        cart.add_item(&product);

        let totals = cart.totals(Money::new(4000));
        assert_eq!(totals.subtotal, Money::new(24000));
        assert_eq!(totals.total, Money::new(20000));
    }

    #[test]
    fn test_totals_never_negative() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("A", 8000));

        let totals = cart.totals(Money::new(99000));
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_to_line_items_preserves_order_and_quantities() {
        let mut cart = Cart::new();
        let kopi = test_product("A", 8000);
        cart.add_item(&kopi);
        cart.add_item(&test_product("B", 5000));
        cart.add_item(&kopi);

        let items = cart.to_line_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_id, "A");
        assert_eq!(items[0].qty, 2);
        assert_eq!(items[0].subtotal, Money::new(16000));
        assert_eq!(items[1].product_id, "B");
        assert_eq!(items[1].qty, 1);
    }
}
