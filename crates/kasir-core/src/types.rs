//! # Domain Types
//!
//! Core domain types used throughout Kasir POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │    Product      │   │  Transaction    │   │    LineItem     │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id (token)     │   │  id (dated)     │   │  product_id     │   │
//! │  │  product_number │   │  date, time     │   │  name, barcode  │   │
//! │  │  barcode        │   │  items ─────────┼──►│  price × qty    │   │
//! │  │  prices         │   │  totals, kasir  │   │  subtotal       │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘   │
//! │                                                                     │
//! │  These structs double as the record schema: serde field order IS   │
//! │  the on-disk column order of the flat stores.                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every product has:
//! - `id`: opaque 8-char token - immutable, used for back-references
//! - `product_number`: sequential, human-readable, drives barcode derivation

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::{BARCODE_PREFIX, TRANSACTION_ID_PREFIX};

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque unique token (8 uppercase hex chars).
    pub id: String,

    /// Sequential business number; strictly increasing, never reused.
    pub product_number: u32,

    /// Scannable code; unique when non-empty. Auto-derived from the
    /// product number when left empty at creation.
    pub barcode: String,

    /// Display name shown to the cashier and on receipts.
    pub name: String,

    /// Free-form grouping label; may be empty.
    pub category: String,

    /// Acquisition cost per unit; zero when unknown.
    pub buy_price: Money,

    /// Selling price per unit; always positive on a saved record.
    pub sell_price: Money,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Generates an opaque product token: the first 8 hex chars of a
    /// v4 UUID, uppercased.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()[..8].to_uppercase()
    }

    /// Derives the automatic barcode for a product number.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::types::Product;
    ///
    /// assert_eq!(Product::derive_barcode(1), "PRD000001");
    /// assert_eq!(Product::derive_barcode(42), "PRD000042");
    /// ```
    pub fn derive_barcode(product_number: u32) -> String {
        format!("{BARCODE_PREFIX}{product_number:06}")
    }
}

/// Fields supplied by the caller when creating a product.
///
/// The repository fills in everything else: id, product number, the
/// derived barcode when this one is empty, and both timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    /// May be empty; an empty barcode is replaced by the derived one.
    pub barcode: String,
    pub name: String,
    pub category: String,
    pub buy_price: Money,
    pub sell_price: Money,
}

/// A partial product update. `None` fields are left untouched.
///
/// Updates are typed: there is no way to smuggle an unknown field into
/// a record, and every patched record is re-validated before the store
/// is rewritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub barcode: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub buy_price: Option<Money>,
    pub sell_price: Option<Money>,
}

impl ProductPatch {
    /// Applies the populated fields onto a product.
    ///
    /// The caller stamps `updated_at`; this only moves field values.
    pub fn apply(&self, product: &mut Product) {
        if let Some(barcode) = &self.barcode {
            product.barcode = barcode.clone();
        }
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(category) = &self.category {
            product.category = category.clone();
        }
        if let Some(buy_price) = self.buy_price {
            product.buy_price = buy_price;
        }
        if let Some(sell_price) = self.sell_price {
            product.sell_price = sell_price;
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry within a transaction.
/// Uses the snapshot pattern: name and price are frozen at sale time,
/// so later catalog edits never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Back-reference to the catalog product. Informational only; the
    /// product may have been deleted since.
    pub product_id: String,
    /// Barcode at time of sale (frozen).
    pub barcode: String,
    /// Product name at time of sale (frozen).
    pub name: String,
    /// Unit price at time of sale (frozen).
    pub price: Money,
    /// Quantity sold; at least 1.
    pub qty: u32,
    /// price × qty, stored redundantly for fast reload.
    pub subtotal: Money,
}

impl LineItem {
    /// Builds a line item, deriving the subtotal.
    pub fn new(
        product_id: impl Into<String>,
        barcode: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        qty: u32,
    ) -> Self {
        LineItem {
            product_id: product_id.into(),
            barcode: barcode.into(),
            name: name.into(),
            price,
            qty,
            subtotal: price.multiply_quantity(qty),
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A persisted sale.
///
/// Append-created and immutable in spirit; edits go through a
/// full-record rewrite that recomputes the derived totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Date-prefixed unique token, e.g. `TRX-20240115-000003`.
    pub id: String,
    /// Business date (local clock at creation). ISO 8601 on disk, so
    /// lexicographic order equals chronological order.
    pub date: NaiveDate,
    /// Wall-clock time of sale, whole seconds.
    pub time: NaiveTime,
    /// Ordered line items, nested into a single record field on disk.
    #[serde(with = "items_payload")]
    pub items: Vec<LineItem>,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
    pub payment: Money,
    pub change: Money,
    pub cashier: String,
}

impl Transaction {
    /// Composes a transaction id from a date and a per-day sequence.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use kasir_core::types::Transaction;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    /// assert_eq!(Transaction::compose_id(date, 3), "TRX-20240115-000003");
    /// ```
    pub fn compose_id(date: NaiveDate, sequence: u32) -> String {
        format!(
            "{TRANSACTION_ID_PREFIX}-{}-{sequence:06}",
            date.format("%Y%m%d")
        )
    }

    /// Extracts the numeric per-day sequence from an id.
    ///
    /// Returns `None` for ids whose suffix is not numeric (data written
    /// by older builds used a random token there); the sequence scan
    /// skips those.
    pub fn id_sequence(id: &str) -> Option<u32> {
        id.rsplit('-').next()?.parse().ok()
    }

    /// Recomputes the derived totals from subtotal, discount and payment.
    ///
    /// ## Rules
    /// - total = max(0, subtotal − discount)
    /// - change = payment − total
    pub fn recompute_totals(&mut self) {
        self.total = self.subtotal.saturating_sub(self.discount);
        self.change = self.payment - self.total;
    }
}

/// Fields supplied by checkout when persisting a sale.
///
/// The repository fills in id, date and time from the local clock.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub items: Vec<LineItem>,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
    pub payment: Money,
    pub change: Money,
    pub cashier: String,
}

/// A partial transaction update. `None` fields are left untouched.
///
/// Only the non-derived fields are patchable; total and change are
/// recomputed after the patch so the totals rules cannot be violated
/// by an edit.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub discount: Option<Money>,
    pub payment: Option<Money>,
    pub cashier: Option<String>,
}

impl TransactionPatch {
    /// Applies the populated fields onto a transaction. The caller
    /// recomputes totals and re-checks the payment rule afterwards.
    pub fn apply(&self, transaction: &mut Transaction) {
        if let Some(discount) = self.discount {
            transaction.discount = discount;
        }
        if let Some(payment) = self.payment {
            transaction.payment = payment;
        }
        if let Some(cashier) = &self.cashier {
            transaction.cashier = cashier.clone();
        }
    }
}

// =============================================================================
// Nested Items Boundary
// =============================================================================

/// The one (de)serialization boundary for the nested item sequence.
///
/// On disk a transaction is a flat record; its ordered line items are
/// carried inside the single `items` field as a JSON array. Encoding is
/// lossless and round-trips exactly. Decoding is deliberately lenient:
/// a malformed payload yields an empty item list for that record (with
/// a diagnostic) instead of failing the whole load: one bad sale must
/// not take the history screen down.
mod items_payload {
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use tracing::warn;

    use super::LineItem;

    pub fn serialize<S>(items: &[LineItem], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let payload = serde_json::to_string(items).map_err(S::Error::custom)?;
        serializer.serialize_str(&payload)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<LineItem>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let payload = String::deserialize(deserializer)?;
        match serde_json::from_str(&payload) {
            Ok(items) => Ok(items),
            Err(err) => {
                warn!(error = %err, "malformed item payload, treating as empty");
                Ok(Vec::new())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
