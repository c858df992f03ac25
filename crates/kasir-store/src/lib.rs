//! # kasir-store: Persistence Layer for Kasir POS
//!
//! This crate owns everything that touches disk: the flat record
//! stores, the repositories over them, the store profile document, the
//! catalog import/export boundary, and the checkout engine that settles
//! carts into the sales log.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir POS Data Flow                              │
//! │                                                                         │
//! │  UI shell (cashier screen, settings, reports)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    kasir-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  RecordStore  │    │ Repositories  │    │  CartEngine  │  │   │
//! │  │   │  (record.rs)  │    │ (product.rs,  │    │ (checkout.rs)│  │   │
//! │  │   │               │    │  transaction) │    │              │  │   │
//! │  │   │ load_all      │◄───│ ProductRepo   │◄───│ add_item     │  │   │
//! │  │   │ append        │    │ TransactionRepo    │ checkout     │  │   │
//! │  │   │ rewrite_all   │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Flat data directory                        │   │
//! │  │   database/products.csv, transactions.csv, store_config.json   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`record`] - Typed flat record store (header row, atomic rewrite)
//! - [`error`] - Store error types
//! - [`repository`] - Repository implementations (product, transaction)
//! - [`profile`] - Store profile JSON document
//! - [`catalog`] - Bulk catalog import/export
//! - [`checkout`] - Cart session and checkout
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kasir_store::{CartEngine, ProductRepository, TransactionRepository};
//!
//! let products = ProductRepository::new("database/products.csv")?;
//! let transactions = TransactionRepository::new("database/transactions.csv")?;
//!
//! // Ring up a sale
//! let kopi = products.get_by_barcode("PRD000001")?.unwrap();
//! let mut engine = CartEngine::new(transactions);
//! engine.add_item(&kopi);
//! let receipt_tx = engine.checkout(Money::new(10_000), "Siti")?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod profile;
pub mod record;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use record::RecordStore;

pub use catalog::{export_products, import_products, ImportReport};
pub use checkout::CartEngine;
pub use profile::ProfileStore;

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::transaction::{DaySummary, TransactionRepository};
