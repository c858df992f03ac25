//! # Repository Module
//!
//! Typed repositories over the flat record stores.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  A repository owns one store file and exposes entity operations;        │
//! │  callers never touch rows or files directly.                            │
//! │                                                                         │
//! │  Checkout / UI code                                                     │
//! │       │                                                                 │
//! │       │  products.search("kopi")                                        │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── list / search / get_by_id / get_by_barcode                         │
//! │  ├── add(NewProduct)      → append one row                              │
//! │  ├── update(id, &Patch)   → rewrite all rows                            │
//! │  └── delete(id)           → rewrite all rows                            │
//! │       │                                                                 │
//! │       │  RecordStore<Product>                                           │
//! │       ▼                                                                 │
//! │  products.csv                                                           │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Identity, numbering and validation rules live in one place           │
//! │  • Easy to test against a scratch directory                             │
//! │  • The file layout is isolated from every caller                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog CRUD and search
//! - [`transaction::TransactionRepository`] - Sales log and summaries

pub mod product;
pub mod transaction;
