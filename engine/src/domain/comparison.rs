//! Month-over-month comparison of realized totals.
//!
//! Splits the uniform transaction view into current-calendar-month and
//! previous-calendar-month partitions and summarizes each. Pending
//! installments are not realized yet and do not move either month's
//! totals.

use chrono::{Datelike, Local};
use shared::{MonthComparison, MonthSummary, Transaction, TransactionKind};

use crate::domain::day_totals::transactions_in_month;

/// Stateless builder of the current-vs-previous month summary.
pub struct ComparisonService;

impl ComparisonService {
    /// Compare the month containing today with the month before it.
    pub fn compare_months(transactions: &[Transaction]) -> MonthComparison {
        let today = Local::now().date_naive();
        Self::compare_months_at(today.month(), today.year(), transactions)
    }

    /// Deterministic core of [`Self::compare_months`].
    pub fn compare_months_at(
        month: u32,
        year: i32,
        transactions: &[Transaction],
    ) -> MonthComparison {
        let (previous_month, previous_year) = Self::previous_month(month, year);
        MonthComparison {
            current: summarize_month(month, year, transactions),
            previous: summarize_month(previous_month, previous_year, transactions),
        }
    }

    /// Calendar month before the given one, handling the year rollover
    /// (January -> December of the prior year).
    pub fn previous_month(month: u32, year: i32) -> (u32, i32) {
        if month == 1 {
            (12, year - 1)
        } else {
            (month - 1, year)
        }
    }
}

fn summarize_month(month: u32, year: i32, transactions: &[Transaction]) -> MonthSummary {
    let mut income_total = 0.0;
    let mut expense_total = 0.0;
    for transaction in transactions_in_month(month, year, transactions) {
        match transaction.kind {
            TransactionKind::Income => income_total += transaction.amount,
            TransactionKind::Expense => expense_total += transaction.amount,
            // Not realized yet; settling produces the Expense that counts
            TransactionKind::FutureExpense => {}
        }
    }
    MonthSummary {
        month,
        year,
        income_total,
        expense_total,
        net: income_total - expense_total,
    }
}
