//! # Catalog Import / Export
//!
//! Bulk exchange of the product catalog as delimited text.
//!
//! ## Exchange Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  barcode,name,category,buy_price,sell_price                             │
//! │  8991002101234,Indomie Goreng,Makanan,2500,3500                         │
//! │  ,Kopi Hitam,Minuman,5000,8000        ← no barcode: row is skipped     │
//! │  8991002101234,Indomie Rebus,,,3000   ← duplicate: row is skipped      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Import is a tolerant bulk operation: rows that are malformed, fail
//! validation or collide with an existing barcode are counted and
//! skipped, never fatal. Only real I/O failures abort. Export writes
//! the five exchange columns for every product; ids, numbers and
//! timestamps stay internal.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use kasir_core::{Money, NewProduct};

use crate::error::{StoreError, StoreResult};
use crate::repository::product::ProductRepository;

/// Outcome of a catalog import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Rows stored as new products.
    pub added: usize,
    /// Rows rejected: malformed, invalid or duplicate barcode.
    pub skipped: usize,
}

/// One row of the exchange format, as read.
///
/// Everything is optional at the parsing stage; requiredness is
/// enforced per row so one bad line cannot abort the batch.
#[derive(Debug, Deserialize)]
struct ImportRow {
    #[serde(default)]
    barcode: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    buy_price: Option<i64>,
    #[serde(default)]
    sell_price: Option<i64>,
}

/// One row of the exchange format, as written.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    barcode: &'a str,
    name: &'a str,
    category: &'a str,
    buy_price: i64,
    sell_price: i64,
}

/// Imports products from an exchange file.
///
/// ## Row Rules
/// - `barcode`, `name` and `sell_price` are required; `category` and
///   `buy_price` default to empty / zero
/// - a row whose barcode is already on file is skipped
/// - a row that fails product validation is skipped
///
/// ## Returns
/// Counts of added and skipped rows. I/O failures (unreadable file,
/// failed append) abort with an error instead of being counted.
pub fn import_products(repo: &ProductRepository, path: &Path) -> StoreResult<ImportReport> {
    info!(path = %path.display(), "Importing catalog");

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
    let mut report = ImportReport::default();

    for row in reader.deserialize::<ImportRow>() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                debug!(error = %err, "Skipping malformed import row");
                report.skipped += 1;
                continue;
            }
        };

        let barcode = row.barcode.trim();
        let name = row.name.trim();
        let Some(sell_price) = row.sell_price else {
            report.skipped += 1;
            continue;
        };
        if barcode.is_empty() || name.is_empty() {
            report.skipped += 1;
            continue;
        }

        let new = NewProduct {
            barcode: barcode.to_string(),
            name: name.to_string(),
            category: row.category.trim().to_string(),
            buy_price: Money::new(row.buy_price.unwrap_or(0)),
            sell_price: Money::new(sell_price),
        };
        match repo.add(new) {
            Ok(_) => report.added += 1,
            Err(StoreError::Validation(err)) => {
                debug!(barcode = %barcode, error = %err, "Skipping rejected import row");
                report.skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    info!(
        added = report.added,
        skipped = report.skipped,
        "Catalog import finished"
    );
    Ok(report)
}

/// Exports the whole catalog to an exchange file.
///
/// ## Returns
/// The number of products written.
pub fn export_products(repo: &ProductRepository, path: &Path) -> StoreResult<usize> {
    let products = repo.list_all()?;

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_writer(File::create(path)?);
    for product in &products {
        writer.serialize(ExportRow {
            barcode: &product.barcode,
            name: &product.name,
            category: &product.category,
            buy_price: product.buy_price.amount(),
            sell_price: product.sell_price.amount(),
        })?;
    }
    writer.flush()?;

    info!(path = %path.display(), count = products.len(), "Catalog exported");
    Ok(products.len())
}
