//! # Transaction Repository
//!
//! The append-mostly sales log and its date-keyed views.
//!
//! ## Key Operations
//! - Persisting checkouts with dated, sequential ids
//! - Date and date-range views for history and reports
//! - Today's running summary for the dashboard
//!
//! ## Transaction Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 TRX-20250812-000003                                     │
//! │                  │        │      │                                      │
//! │                  │        │      └── per-day sequence, 6 digits        │
//! │                  │        └── business date (local clock)              │
//! │                  └── fixed prefix                                      │
//! │                                                                         │
//! │  The sequence is 1 + the highest numeric suffix among today's          │
//! │  records, so ids stay monotonic within a day and collisions are        │
//! │  impossible under the single-writer rule. Rows written by older        │
//! │  builds with non-numeric suffixes are skipped by the scan, never      │
//! │  rejected.                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, Timelike};
use serde::Serialize;
use tracing::debug;

use kasir_core::{CoreError, Money, NewTransaction, Transaction, TransactionPatch};

use crate::error::StoreResult;
use crate::record::RecordStore;

/// Column order of the transactions store. Must match the serde field
/// order on [`Transaction`].
pub const TRANSACTIONS_HEADER: &[&str] = &[
    "id", "date", "time", "items", "subtotal", "discount", "total", "payment", "change", "cashier",
];

/// One day's totals for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub total: Money,
    pub count: usize,
}

/// Repository for the sales log.
///
/// ## Usage
/// ```rust,ignore
/// let repo = TransactionRepository::new("data/transactions.csv")?;
///
/// let tx = repo.add(new_transaction)?;
/// let today = repo.get_today_summary()?;
/// ```
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    store: RecordStore<Transaction>,
}

impl TransactionRepository {
    /// Opens the repository, creating the store file if needed.
    pub fn new(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = RecordStore::new(path, TRANSACTIONS_HEADER);
        store.ensure_initialized()?;
        Ok(TransactionRepository { store })
    }

    /// Path of the backing store file.
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Full sales log in on-disk (chronological append) order.
    pub fn list_all(&self) -> StoreResult<Vec<Transaction>> {
        self.store.load_all()
    }

    /// Number of recorded sales.
    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.store.load_all()?.len())
    }

    /// Gets one transaction by id (history detail, reprint).
    pub fn get_by_id(&self, id: &str) -> StoreResult<Option<Transaction>> {
        Ok(self.store.load_all()?.into_iter().find(|t| t.id == id))
    }

    /// Transactions on exactly the given business date.
    pub fn get_by_date(&self, date: NaiveDate) -> StoreResult<Vec<Transaction>> {
        Ok(self
            .store
            .load_all()?
            .into_iter()
            .filter(|t| t.date == date)
            .collect())
    }

    /// Transactions within an inclusive date range.
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<Transaction>> {
        Ok(self
            .store
            .load_all()?
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect())
    }

    /// Sum and count of today's sales.
    pub fn get_today_summary(&self) -> StoreResult<DaySummary> {
        let today = Local::now().date_naive();
        let mut summary = DaySummary::default();
        for transaction in self.get_by_date(today)? {
            summary.total += transaction.total;
            summary.count += 1;
        }
        Ok(summary)
    }

    /// Persists a checkout as a new transaction.
    ///
    /// Stamps the business date and wall-clock time (whole seconds)
    /// from the local clock and assigns the next dated sequential id.
    pub fn add(&self, new: NewTransaction) -> StoreResult<Transaction> {
        let now = Local::now();
        let date = now.date_naive();
        let time = now.time().with_nanosecond(0).unwrap_or_else(|| now.time());

        let sequence = self
            .store
            .load_all()?
            .iter()
            .filter(|t| t.date == date)
            .filter_map(|t| Transaction::id_sequence(&t.id))
            .max()
            .unwrap_or(0)
            + 1;

        let transaction = Transaction {
            id: Transaction::compose_id(date, sequence),
            date,
            time,
            items: new.items,
            subtotal: new.subtotal,
            discount: new.discount,
            total: new.total,
            payment: new.payment,
            change: new.change,
            cashier: new.cashier,
        };

        debug!(id = %transaction.id, total = transaction.total.amount(), "Recording transaction");
        self.store.append(&transaction)?;
        Ok(transaction)
    }

    /// Applies a typed patch to a recorded transaction.
    ///
    /// Derived totals are recomputed after the patch, and the payment
    /// rule is re-enforced: the operation fails if the edit would leave
    /// the payment short of the new total.
    ///
    /// ## Returns
    /// * `Ok(true)` - Transaction found and updated
    /// * `Ok(false)` - No transaction with that id
    pub fn update(&self, id: &str, patch: &TransactionPatch) -> StoreResult<bool> {
        let mut transactions = self.store.load_all()?;
        let Some(transaction) = transactions.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };

        patch.apply(transaction);
        transaction.recompute_totals();
        if transaction.payment < transaction.total {
            return Err(CoreError::insufficient_payment(
                transaction.payment,
                transaction.total,
            )
            .into());
        }

        debug!(id = %id, "Updating transaction");
        self.store.rewrite_all(&transactions)?;
        Ok(true)
    }

    /// Removes a transaction from the log.
    ///
    /// ## Returns
    /// * `Ok(true)` - Transaction found and removed
    /// * `Ok(false)` - No transaction with that id
    pub fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut transactions = self.store.load_all()?;
        let before = transactions.len();
        transactions.retain(|t| t.id != id);
        if transactions.len() == before {
            return Ok(false);
        }

        debug!(id = %id, "Deleting transaction");
        self.store.rewrite_all(&transactions)?;
        Ok(true)
    }
}
