//! # Report Aggregation
//!
//! Pure computations over already-loaded transaction slices:
//!
//! ```text
//! ┌──────────────────┐      ┌───────────────────┐
//! │ &[Transaction]   │ ───▶ │ daily_profit      │ ─▶ per-date P/L
//! │ (+ buy prices)   │      │ margin            │ ─▶ percentage
//! │                  │ ───▶ │ monthly_sales     │ ─▶ month overview
//! └──────────────────┘      └───────────────────┘
//! ```
//!
//! Revenue is what the customer actually paid for the goods: the
//! transaction `total`, after discount. Cost is reconstructed from the
//! current catalog's buy prices; items whose product has since been
//! deleted count a cost of zero, so profit for old data is optimistic
//! rather than wrong-signed.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::money::Money;
use crate::types::Transaction;

// ============================================================================
// Daily profit / loss
// ============================================================================

/// Revenue, cost and profit for one business date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayProfit {
    pub revenue: Money,
    pub cost: Money,
    pub profit: Money,
}

/// Groups transactions by business date and computes profit per day.
///
/// `buy_price_by_product` maps product id → current buy price; line
/// items referencing an unknown product contribute zero cost.
pub fn daily_profit(
    transactions: &[Transaction],
    buy_price_by_product: &HashMap<String, Money>,
) -> BTreeMap<NaiveDate, DayProfit> {
    let mut days: BTreeMap<NaiveDate, DayProfit> = BTreeMap::new();

    for transaction in transactions {
        let entry = days.entry(transaction.date).or_default();
        entry.revenue += transaction.total;
        for item in &transaction.items {
            let buy = buy_price_by_product
                .get(&item.product_id)
                .copied()
                .unwrap_or_else(Money::zero);
            entry.cost += buy.multiply_quantity(item.qty);
        }
    }

    for day in days.values_mut() {
        day.profit = day.revenue - day.cost;
    }
    days
}

/// Profit margin as a percentage of revenue.
///
/// Zero revenue (an empty period) reports a margin of `0.0` rather
/// than dividing by zero.
pub fn margin(profit: Money, revenue: Money) -> f64 {
    if revenue.is_positive() {
        profit.amount() as f64 / revenue.amount() as f64 * 100.0
    } else {
        0.0
    }
}

// ============================================================================
// Monthly sales overview
// ============================================================================

/// One month of sales, spanning every calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySales {
    pub year: i32,
    pub month: u32,
    /// `(day, revenue)` for day 1 through the last day of the month;
    /// days without sales carry zero.
    pub daily_totals: Vec<(u32, Money)>,
    pub total_revenue: Money,
    /// `total_revenue / days_in_month`, whole rupiah.
    pub average_per_day: Money,
    pub transaction_count: usize,
    /// Day number with the highest revenue. Ties resolve to the lowest
    /// day; `None` when the month had no revenue at all.
    pub peak_day: Option<u32>,
}

/// Aggregates one calendar month of sales.
///
/// Transactions outside the target month are ignored, so callers may
/// pass a pre-filtered range or the whole history. A month outside
/// `1..=12` yields an empty report with no days.
pub fn monthly_sales(transactions: &[Transaction], year: i32, month: u32) -> MonthlySales {
    let days = days_in_month(year, month);
    let mut daily = vec![Money::zero(); days as usize];
    let mut transaction_count = 0usize;

    for transaction in transactions {
        if transaction.date.year() != year || transaction.date.month() != month {
            continue;
        }
        daily[transaction.date.day() as usize - 1] += transaction.total;
        transaction_count += 1;
    }

    let total_revenue: Money = daily.iter().copied().sum();
    let average_per_day = if days == 0 {
        Money::zero()
    } else {
        Money::new(total_revenue.amount() / i64::from(days))
    };

    // Ordered scan with a strict comparison: first (lowest) day wins ties.
    let mut peak_day = None;
    let mut peak_total = Money::zero();
    for (index, total) in daily.iter().enumerate() {
        if *total > peak_total {
            peak_total = *total;
            peak_day = Some(index as u32 + 1);
        }
    }

    MonthlySales {
        year,
        month,
        daily_totals: daily
            .into_iter()
            .enumerate()
            .map(|(index, total)| (index as u32 + 1, total))
            .collect(),
        total_revenue,
        average_per_day,
        transaction_count,
        peak_day,
    }
}

/// Number of calendar days in a month; `0` for an invalid month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        None => 0,
    }
}

// ============================================================================
// Tests
// ============================================================================
