//! # kasir-core: Pure Business Logic for Kasir POS
//!
//! This crate is the **heart** of Kasir POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Point-of-Sale Surface                       │   │
//! │  │    Catalog UI ──► Cart UI ──► Payment UI ──► Receipt Print     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasir-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │  ┌────────┐ ┌───────┐ ┌──────┐ ┌─────────┐ ┌────────┐         │   │
//! │  │  │ types  │ │ money │ │ cart │ │ receipt │ │ report │         │   │
//! │  │  │Product │ │ Money │ │ Cart │ │ Segment │ │ P/L    │         │   │
//! │  │  │ Trans. │ │ Rp fmt│ │totals│ │ layout  │ │ months │         │   │
//! │  │  └────────┘ └───────┘ └──────┘ └─────────┘ └────────┘         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILE SYSTEM • NO CLOCK READS • PURE FUNCTIONS    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  kasir-store (Persistence Layer)                │   │
//! │  │        flat record stores, repositories, checkout engine        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Transaction, LineItem, patches)
//! - [`money`] - Money type with integer rupiah arithmetic (no floating point!)
//! - [`cart`] - In-memory cart with derived totals
//! - [`receipt`] - Receipt layout into printer-neutral segments
//! - [`report`] - Sales and profit/loss aggregation
//! - [`profile`] - Store identity block and preferences
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: File system and printer access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole rupiah (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use kasir_core::money::Money;
//!
//! // Whole rupiah, never floats.
//! let subtotal = Money::new(24_000);
//! let discount = Money::new(4_000);
//!
//! // Totals never dip below zero, however large the discount.
//! let total = subtotal.saturating_sub(discount);
//! assert_eq!(total.format_rp(), "Rp 20.000");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod profile;
pub mod receipt;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kasir_core::Money` instead of
// `use kasir_core::money::Money`

pub use cart::{Cart, CartLine, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use profile::StoreProfile;
pub use receipt::{render_plain, Align, ReceiptFormatter, Segment};
pub use report::{DayProfit, MonthlySales};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix of automatically derived product barcodes.
///
/// ## Why a constant?
/// A barcode derived from the product number (`PRD000001`, `PRD000042`,
/// ...) must look the same everywhere: at creation, in catalog import,
/// and in tests. One constant keeps the three in lockstep.
pub const BARCODE_PREFIX: &str = "PRD";

/// Prefix of transaction identifiers (`TRX-YYYYMMDD-NNNNNN`).
pub const TRANSACTION_ID_PREFIX: &str = "TRX";

/// Cashier name recorded when the caller leaves it blank.
///
/// ## Business Reason
/// Small stores often run a single till and never bother naming the
/// operator; receipts still need something printable on the Kasir row.
pub const DEFAULT_CASHIER: &str = "Kasir";

/// Receipt column width for 58mm thermal paper.
///
/// ## Business Reason
/// 58mm paper at standard ESC/POS font A fits 32 characters per row.
/// Wider 80mm printers can override this per formatter.
pub const DEFAULT_RECEIPT_WIDTH: usize = 32;
