//! Normalization of the three source record kinds into the uniform
//! transaction view.
//!
//! Expenses and incomes map one-to-one. Future expenses contribute one
//! transaction per **pending** installment of an **active** purchase; once
//! an installment settles, the realized expense produced by the data
//! service is the record that counts, so paid installments are skipped here
//! to prevent double counting.

use log::warn;
use shared::{parse_date_parts, Expense, FutureExpense, Income, Transaction, TransactionKind};

/// Flattens snapshot records into `Transaction`s tagged by kind.
///
/// Pure mapping; never mutates its sources.
pub struct TransactionNormalizer;

impl TransactionNormalizer {
    /// Build the uniform transaction view for one snapshot.
    ///
    /// Installments with an unparseable due date are excluded from the
    /// result (they cannot land on any day cell), not treated as an error.
    pub fn normalize(
        expenses: &[Expense],
        incomes: &[Income],
        future_expenses: &[FutureExpense],
    ) -> Vec<Transaction> {
        let mut transactions =
            Vec::with_capacity(expenses.len() + incomes.len() + future_expenses.len());

        for expense in expenses {
            transactions.push(Transaction {
                id: expense.id.clone(),
                date: expense.date.clone(),
                description: expense.description.clone(),
                kind: TransactionKind::Expense,
                amount: expense.amount,
                category: expense.category.clone(),
            });
        }

        for income in incomes {
            transactions.push(Transaction {
                id: income.id.clone(),
                date: income.date.clone(),
                description: income.description.clone(),
                kind: TransactionKind::Income,
                amount: income.amount,
                category: income.category.clone(),
            });
        }

        for future_expense in future_expenses.iter().filter(|fe| fe.is_active()) {
            for installment in future_expense.pending_installments() {
                if parse_date_parts(&installment.due_date).is_none() {
                    warn!(
                        "Skipping installment {} with unparseable due date {:?}",
                        installment.id, installment.due_date
                    );
                    continue;
                }
                transactions.push(Transaction {
                    id: installment.id.clone(),
                    date: installment.due_date.clone(),
                    description: format!(
                        "{} ({}/{})",
                        future_expense.description,
                        installment.number,
                        installment.total_installments
                    ),
                    kind: TransactionKind::FutureExpense,
                    amount: installment.amount,
                    category: future_expense.category.clone(),
                });
            }
        }

        transactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{FutureExpenseStatus, Installment, InstallmentStatus};

    fn create_test_expense(id: &str, date: &str, amount: f64) -> Expense {
        Expense {
            id: id.to_string(),
            date: date.to_string(),
            description: format!("Expense {}", id),
            amount,
            category: "general".to_string(),
        }
    }

    fn create_test_income(id: &str, date: &str, amount: f64) -> Income {
        Income {
            id: id.to_string(),
            date: date.to_string(),
            description: format!("Income {}", id),
            amount,
            category: "salary".to_string(),
        }
    }

    fn create_test_installment(
        parent: &str,
        number: u32,
        total: u32,
        amount: f64,
        due_date: &str,
        status: InstallmentStatus,
    ) -> Installment {
        Installment {
            id: Installment::generate_id(parent, number),
            future_expense_id: parent.to_string(),
            number,
            total_installments: total,
            amount,
            due_date: due_date.to_string(),
            payment_date: None,
            status,
            card_id: None,
        }
    }

    fn create_test_future_expense(
        id: &str,
        status: FutureExpenseStatus,
        installments: Vec<Installment>,
    ) -> FutureExpense {
        FutureExpense {
            id: id.to_string(),
            description: format!("Purchase {}", id),
            total_amount: installments.iter().map(|i| i.amount).sum(),
            category: "electronics".to_string(),
            purchase_date: "2025-05-01T10:00:00-03:00".to_string(),
            card_id: None,
            status,
            installments,
        }
    }

    #[test]
    fn test_normalize_maps_all_three_kinds() {
        let expenses = vec![create_test_expense("e1", "2025-06-01T09:00:00-03:00", 40.0)];
        let incomes = vec![create_test_income("i1", "2025-06-02T09:00:00-03:00", 100.0)];
        let future = vec![create_test_future_expense(
            "fe1",
            FutureExpenseStatus::Active,
            vec![create_test_installment(
                "fe1",
                1,
                3,
                50.0,
                "2025-06-10",
                InstallmentStatus::Pending,
            )],
        )];

        let transactions = TransactionNormalizer::normalize(&expenses, &incomes, &future);

        assert_eq!(transactions.len(), 3);
        assert_eq!(transactions[0].kind, TransactionKind::Expense);
        assert_eq!(transactions[1].kind, TransactionKind::Income);
        assert_eq!(transactions[2].kind, TransactionKind::FutureExpense);
        assert_eq!(transactions[2].description, "Purchase fe1 (1/3)");
    }

    #[test]
    fn test_normalize_skips_paid_installments() {
        let future = vec![create_test_future_expense(
            "fe1",
            FutureExpenseStatus::Active,
            vec![
                create_test_installment("fe1", 1, 2, 50.0, "2025-05-10", InstallmentStatus::Paid),
                create_test_installment(
                    "fe1",
                    2,
                    2,
                    50.0,
                    "2025-06-10",
                    InstallmentStatus::Pending,
                ),
            ],
        )];

        let transactions = TransactionNormalizer::normalize(&[], &[], &future);

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].id, Installment::generate_id("fe1", 2));
    }

    #[test]
    fn test_normalize_skips_inactive_future_expenses() {
        let future = vec![
            create_test_future_expense(
                "cancelled",
                FutureExpenseStatus::Cancelled,
                vec![create_test_installment(
                    "cancelled",
                    1,
                    1,
                    10.0,
                    "2025-06-10",
                    InstallmentStatus::Pending,
                )],
            ),
            create_test_future_expense("paid", FutureExpenseStatus::Paid, vec![]),
        ];

        let transactions = TransactionNormalizer::normalize(&[], &[], &future);
        assert!(transactions.is_empty());
    }

    #[test]
    fn test_normalize_excludes_unparseable_due_dates() {
        let future = vec![create_test_future_expense(
            "fe1",
            FutureExpenseStatus::Active,
            vec![
                create_test_installment(
                    "fe1",
                    1,
                    2,
                    50.0,
                    "not-a-date",
                    InstallmentStatus::Pending,
                ),
                create_test_installment(
                    "fe1",
                    2,
                    2,
                    50.0,
                    "2025-06-10",
                    InstallmentStatus::Pending,
                ),
            ],
        )];

        let transactions = TransactionNormalizer::normalize(&[], &[], &future);

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].date, "2025-06-10");
    }

    #[test]
    fn test_normalize_preserves_date_key_by_truncation() {
        let expenses = vec![create_test_expense("e1", "2025-06-30T23:30:00-03:00", 5.0)];
        let transactions = TransactionNormalizer::normalize(&expenses, &[], &[]);
        // The date key is the string's date portion, never a timezone shift
        assert_eq!(transactions[0].date_key(), "2025-06-30");
    }
}
