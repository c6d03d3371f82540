//! Per-day aggregation of the uniform transaction view.
//!
//! Backs both the calendar grid cells and the day selection/detail view.
//! All grouping happens on the canonical `YYYY-MM-DD` key so a transaction
//! lands on exactly one day regardless of its time-of-day component.

use shared::{parse_date_parts, DayDetail, KindTotals, Transaction};
use std::collections::HashMap;

/// Group transactions by their canonical day key.
pub fn group_by_day_key(transactions: &[Transaction]) -> HashMap<String, Vec<Transaction>> {
    let mut by_day: HashMap<String, Vec<Transaction>> = HashMap::new();
    for transaction in transactions {
        by_day
            .entry(transaction.date_key().to_string())
            .or_default()
            .push(transaction.clone());
    }
    by_day
}

/// Per-kind sums over a list of transactions.
///
/// The match over `TransactionKind` is exhaustive: adding a kind without
/// deciding how it rolls up is a compile error.
pub fn totals_for(transactions: &[Transaction]) -> KindTotals {
    let mut totals = KindTotals::default();
    for transaction in transactions {
        totals.add(transaction.kind, transaction.amount);
    }
    totals
}

/// Build the detail view for one selected day.
///
/// Totals are recomputed strictly from the day's own transaction subset,
/// which makes them equal the grid cell's precomputed totals by
/// construction.
pub fn day_detail(day_key: &str, transactions: &[Transaction]) -> DayDetail {
    let day_transactions: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.date_key() == day_key)
        .cloned()
        .collect();
    let totals = totals_for(&day_transactions);
    DayDetail {
        date_key: day_key.to_string(),
        transactions: day_transactions,
        totals,
    }
}

/// Transactions whose date key falls in the given calendar month.
///
/// Transactions with unparseable dates match no month and are dropped.
pub fn transactions_in_month(
    month: u32,
    year: i32,
    transactions: &[Transaction],
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| {
            parse_date_parts(&t.date)
                .map(|(t_year, t_month, _)| t_year == year && t_month == month)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}
