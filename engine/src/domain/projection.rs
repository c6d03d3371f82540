//! 12-month forward projection of installment totals.
//!
//! Unlike the calendar path, this view includes **paid** installments of
//! active purchases as well, so each month shows its realized-vs-pending
//! split. Installments due outside the 12-month window are dropped, never
//! clipped into the edge buckets.

use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use shared::{
    month_name, parse_date_parts, short_month_name, AnnualStats, FutureExpense, InstallmentStatus,
    MonthBucket, QuarterBucket,
};

/// Number of months in the projection window.
pub const PROJECTION_MONTHS: usize = 12;

/// Stateless builder of the projection and its rollups.
pub struct PeriodProjector;

impl PeriodProjector {
    /// Project installment totals over the 12 months starting this month.
    pub fn project_twelve_months(future_expenses: &[FutureExpense]) -> Vec<MonthBucket> {
        Self::project_twelve_months_from(Local::now().date_naive(), future_expenses)
    }

    /// Deterministic core of [`Self::project_twelve_months`]: the window
    /// starts at the month containing `today`.
    pub fn project_twelve_months_from(
        today: NaiveDate,
        future_expenses: &[FutureExpense],
    ) -> Vec<MonthBucket> {
        let start_index = month_index(today.year(), today.month());

        let mut buckets: Vec<MonthBucket> = (0..PROJECTION_MONTHS as i32)
            .map(|offset| {
                let index = start_index + offset;
                let year = index.div_euclid(12);
                let month = index.rem_euclid(12) as u32 + 1;
                MonthBucket {
                    month,
                    year,
                    label: format!("{} {}", month_name(month), year),
                    total: 0.0,
                    pending_total: 0.0,
                    paid_total: 0.0,
                    count: 0,
                }
            })
            .collect();

        for future_expense in future_expenses.iter().filter(|fe| fe.is_active()) {
            for installment in &future_expense.installments {
                let Some((year, month, _)) = parse_date_parts(&installment.due_date) else {
                    debug!(
                        "Installment {} has unparseable due date, not projected",
                        installment.id
                    );
                    continue;
                };
                let offset = month_index(year, month) - start_index;
                if !(0..PROJECTION_MONTHS as i32).contains(&offset) {
                    continue;
                }
                let bucket = &mut buckets[offset as usize];
                bucket.total += installment.amount;
                bucket.count += 1;
                match installment.status {
                    InstallmentStatus::Pending => bucket.pending_total += installment.amount,
                    InstallmentStatus::Paid => bucket.paid_total += installment.amount,
                }
            }
        }

        buckets
    }

    /// Roll the 12 monthly buckets into 4 quarters (index chunks 0-2, 3-5,
    /// 6-8, 9-11).
    pub fn quarterly_rollup(buckets: &[MonthBucket]) -> Vec<QuarterBucket> {
        buckets
            .chunks(3)
            .map(|chunk| QuarterBucket {
                label: quarter_label(chunk),
                total: chunk.iter().map(|b| b.total).sum(),
                pending_total: chunk.iter().map(|b| b.pending_total).sum(),
                paid_total: chunk.iter().map(|b| b.paid_total).sum(),
                count: chunk.iter().map(|b| b.count).sum(),
            })
            .collect()
    }

    /// Whole-window statistics.
    ///
    /// The mean divides by the window length (12), not by the number of
    /// months with spending. Max and min consider only months with
    /// `total > 0` and are `None` when no month has spending; ties go to
    /// the first occurrence.
    pub fn annual_stats(buckets: &[MonthBucket]) -> AnnualStats {
        let total: f64 = buckets.iter().map(|b| b.total).sum();
        let pending_total: f64 = buckets.iter().map(|b| b.pending_total).sum();

        let mut max_month: Option<&MonthBucket> = None;
        let mut min_month: Option<&MonthBucket> = None;
        for bucket in buckets.iter().filter(|b| b.total > 0.0) {
            if max_month.map(|m| bucket.total > m.total).unwrap_or(true) {
                max_month = Some(bucket);
            }
            if min_month.map(|m| bucket.total < m.total).unwrap_or(true) {
                min_month = Some(bucket);
            }
        }

        AnnualStats {
            total,
            pending_total,
            monthly_mean: if buckets.is_empty() {
                0.0
            } else {
                total / PROJECTION_MONTHS as f64
            },
            max_month: max_month.cloned(),
            min_month: min_month.cloned(),
        }
    }

    /// Percentage share of `part` in `whole`; 0.0 when `whole` is zero.
    pub fn share_of(part: f64, whole: f64) -> f64 {
        if whole == 0.0 {
            0.0
        } else {
            part / whole * 100.0
        }
    }
}

/// Absolute month counter (year * 12 + zero-based month) for windowing.
fn month_index(year: i32, month: u32) -> i32 {
    year * 12 + month as i32 - 1
}

fn quarter_label(chunk: &[MonthBucket]) -> String {
    match (chunk.first(), chunk.last()) {
        (Some(first), Some(last)) if first.year == last.year => format!(
            "{} - {} {}",
            short_month_name(first.month),
            short_month_name(last.month),
            first.year
        ),
        (Some(first), Some(last)) => format!(
            "{} {} - {} {}",
            short_month_name(first.month),
            first.year,
            short_month_name(last.month),
            last.year
        ),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{FutureExpenseStatus, Installment};

    fn create_test_installment(
        parent: &str,
        number: u32,
        amount: f64,
        due_date: &str,
        status: InstallmentStatus,
    ) -> Installment {
        Installment {
            id: Installment::generate_id(parent, number),
            future_expense_id: parent.to_string(),
            number,
            total_installments: 12,
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
            purchase_date: "2025-01-01T10:00:00-03:00".to_string(),
            card_id: None,
            status,
            installments,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_twelve_chronological_buckets_starting_current_month() {
        let buckets = PeriodProjector::project_twelve_months_from(today(), &[]);

        assert_eq!(buckets.len(), 12);
        assert_eq!((buckets[0].month, buckets[0].year), (6, 2025));
        assert_eq!(buckets[0].label, "June 2025");
        assert_eq!((buckets[6].month, buckets[6].year), (12, 2025));
        assert_eq!((buckets[7].month, buckets[7].year), (1, 2026));
        assert_eq!((buckets[11].month, buckets[11].year), (5, 2026));
    }

    #[test]
    fn test_projection_scenario_pending_paid_and_out_of_window() {
        // A: due this month, $300 pending
        // B: due next month, $150 pending + $50 paid
        // C: due in 13 months, $500 (outside the window)
        let future_expenses = vec![
            create_test_future_expense(
                "a",
                FutureExpenseStatus::Active,
                vec![create_test_installment(
                    "a",
                    1,
                    300.0,
                    "2025-06-20",
                    InstallmentStatus::Pending,
                )],
            ),
            create_test_future_expense(
                "b",
                FutureExpenseStatus::Active,
                vec![
                    create_test_installment("b", 1, 150.0, "2025-07-10", InstallmentStatus::Pending),
                    create_test_installment("b", 2, 50.0, "2025-07-10", InstallmentStatus::Paid),
                ],
            ),
            create_test_future_expense(
                "c",
                FutureExpenseStatus::Active,
                vec![create_test_installment(
                    "c",
                    1,
                    500.0,
                    "2026-07-10",
                    InstallmentStatus::Pending,
                )],
            ),
        ];

        let buckets = PeriodProjector::project_twelve_months_from(today(), &future_expenses);

        assert_eq!(buckets[0].total, 300.0);
        assert_eq!(buckets[0].pending_total, 300.0);
        assert_eq!(buckets[1].pending_total, 150.0);
        assert_eq!(buckets[1].paid_total, 50.0);
        assert_eq!(buckets[1].total, 200.0);
        // C contributes to no bucket
        let total: f64 = buckets.iter().map(|b| b.total).sum();
        assert_eq!(total, 500.0);
    }

    #[test]
    fn test_total_is_pending_plus_paid_per_bucket() {
        let future_expenses = vec![create_test_future_expense(
            "a",
            FutureExpenseStatus::Active,
            (1..=12)
                .map(|n| {
                    let status = if n % 2 == 0 {
                        InstallmentStatus::Paid
                    } else {
                        InstallmentStatus::Pending
                    };
                    let month = (6 + n - 2) % 12 + 1;
                    let year = if month < 6 { 2026 } else { 2025 };
                    create_test_installment(
                        "a",
                        n,
                        25.0,
                        &format!("{:04}-{:02}-15", year, month),
                        status,
                    )
                })
                .collect(),
        )];

        let buckets = PeriodProjector::project_twelve_months_from(today(), &future_expenses);
        for bucket in &buckets {
            assert_eq!(bucket.total, bucket.pending_total + bucket.paid_total);
        }
    }

    #[test]
    fn test_inactive_future_expenses_not_projected() {
        let future_expenses = vec![create_test_future_expense(
            "cancelled",
            FutureExpenseStatus::Cancelled,
            vec![create_test_installment(
                "cancelled",
                1,
                100.0,
                "2025-06-20",
                InstallmentStatus::Pending,
            )],
        )];

        let buckets = PeriodProjector::project_twelve_months_from(today(), &future_expenses);
        assert!(buckets.iter().all(|b| b.total == 0.0 && b.count == 0));
    }

    #[test]
    fn test_quarterly_rollup() {
        let future_expenses = vec![create_test_future_expense(
            "a",
            FutureExpenseStatus::Active,
            vec![
                create_test_installment("a", 1, 100.0, "2025-06-10", InstallmentStatus::Pending),
                create_test_installment("a", 2, 100.0, "2025-08-10", InstallmentStatus::Pending),
                create_test_installment("a", 3, 40.0, "2025-09-10", InstallmentStatus::Paid),
                create_test_installment("a", 4, 60.0, "2026-03-10", InstallmentStatus::Pending),
            ],
        )];

        let buckets = PeriodProjector::project_twelve_months_from(today(), &future_expenses);
        let quarters = PeriodProjector::quarterly_rollup(&buckets);

        assert_eq!(quarters.len(), 4);
        assert_eq!(quarters[0].total, 200.0); // Jun + Aug
        assert_eq!(quarters[0].label, "Jun - Aug 2025");
        assert_eq!(quarters[1].total, 40.0); // Sep
        assert_eq!(quarters[1].paid_total, 40.0);
        assert_eq!(quarters[2].total, 0.0);
        assert_eq!(quarters[2].label, "Dec 2025 - Feb 2026");
        assert_eq!(quarters[3].total, 60.0); // Mar
        assert_eq!(quarters[0].count + quarters[1].count + quarters[3].count, 4);
    }

    #[test]
    fn test_annual_stats_mean_and_extremes() {
        let future_expenses = vec![create_test_future_expense(
            "a",
            FutureExpenseStatus::Active,
            vec![
                create_test_installment("a", 1, 300.0, "2025-06-10", InstallmentStatus::Pending),
                create_test_installment("a", 2, 60.0, "2025-07-10", InstallmentStatus::Paid),
                create_test_installment("a", 3, 240.0, "2025-09-10", InstallmentStatus::Pending),
            ],
        )];

        let buckets = PeriodProjector::project_twelve_months_from(today(), &future_expenses);
        let stats = PeriodProjector::annual_stats(&buckets);

        assert_eq!(stats.total, 600.0);
        assert_eq!(stats.pending_total, 540.0);
        // Mean divides by the full window, not months-with-spending
        assert_eq!(stats.monthly_mean, 50.0);
        assert_eq!(stats.max_month.as_ref().unwrap().month, 6);
        // Minimum among months with spending, not the zero months
        assert_eq!(stats.min_month.as_ref().unwrap().month, 7);
    }

    #[test]
    fn test_annual_stats_ties_break_to_first_occurrence() {
        let future_expenses = vec![create_test_future_expense(
            "a",
            FutureExpenseStatus::Active,
            vec![
                create_test_installment("a", 1, 100.0, "2025-07-10", InstallmentStatus::Pending),
                create_test_installment("a", 2, 100.0, "2025-10-10", InstallmentStatus::Pending),
            ],
        )];

        let buckets = PeriodProjector::project_twelve_months_from(today(), &future_expenses);
        let stats = PeriodProjector::annual_stats(&buckets);

        assert_eq!(stats.max_month.as_ref().unwrap().month, 7);
        assert_eq!(stats.min_month.as_ref().unwrap().month, 7);
    }

    #[test]
    fn test_annual_stats_empty_window_has_no_extremes() {
        let buckets = PeriodProjector::project_twelve_months_from(today(), &[]);
        let stats = PeriodProjector::annual_stats(&buckets);

        assert_eq!(stats.total, 0.0);
        assert_eq!(stats.monthly_mean, 0.0);
        assert!(stats.max_month.is_none());
        assert!(stats.min_month.is_none());
    }

    #[test]
    fn test_share_of_guards_zero_denominator() {
        assert_eq!(PeriodProjector::share_of(50.0, 200.0), 25.0);
        assert_eq!(PeriodProjector::share_of(50.0, 0.0), 0.0);
    }
}
