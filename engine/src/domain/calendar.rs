//! Calendar grid generation for the dashboard.
//!
//! Builds the day cells for the three interchangeable view modes and
//! provides the matching titles and navigation rules. The grid is a pure
//! function of `{reference date, view mode, transactions}`; all user
//! interaction state lives in [`crate::domain::view_state::CalendarViewState`].

use chrono::{Datelike, Duration, NaiveDate};
use log::debug;
use shared::{
    days_in_month, month_name, short_month_name, DayCell, Transaction, ViewMode,
};
use std::collections::HashMap;

use crate::domain::day_totals::{group_by_day_key, totals_for};

/// Cells in a month-mode grid: 6 weeks of 7 days, regardless of month
/// length.
pub const MONTH_GRID_CELLS: usize = 42;

/// Stateless calendar grid builder.
pub struct CalendarService;

impl CalendarService {
    /// Build the day cells for the given reference date and view mode.
    ///
    /// - Month mode: exactly [`MONTH_GRID_CELLS`] cells starting on the
    ///   Sunday of the week containing day 1; cells outside the reference
    ///   month are flagged `in_current_period = false`.
    /// - Week mode: exactly 7 cells starting on the Sunday of the week
    ///   containing the reference date.
    /// - Day mode: exactly 1 cell.
    pub fn build_grid(
        reference_date: NaiveDate,
        view_mode: ViewMode,
        transactions: &[Transaction],
    ) -> Vec<DayCell> {
        let by_day = group_by_day_key(transactions);
        debug!(
            "📅 CALENDAR: building {:?} grid for {} over {} transactions",
            view_mode,
            reference_date,
            transactions.len()
        );

        match view_mode {
            ViewMode::Month => Self::month_grid(reference_date, &by_day),
            ViewMode::Week => Self::week_grid(reference_date, &by_day),
            ViewMode::Day => vec![Self::make_cell(reference_date, true, &by_day)],
        }
    }

    fn month_grid(
        reference_date: NaiveDate,
        by_day: &HashMap<String, Vec<Transaction>>,
    ) -> Vec<DayCell> {
        let first_of_month = reference_date.with_day(1).unwrap_or(reference_date);
        let grid_start = start_of_week(first_of_month);

        (0..MONTH_GRID_CELLS as i64)
            .map(|offset| {
                let date = grid_start + Duration::days(offset);
                let in_current_period = date.month() == reference_date.month()
                    && date.year() == reference_date.year();
                Self::make_cell(date, in_current_period, by_day)
            })
            .collect()
    }

    fn week_grid(
        reference_date: NaiveDate,
        by_day: &HashMap<String, Vec<Transaction>>,
    ) -> Vec<DayCell> {
        let week_start = start_of_week(reference_date);
        (0..7)
            .map(|offset| {
                let date = week_start + Duration::days(offset);
                Self::make_cell(date, true, by_day)
            })
            .collect()
    }

    fn make_cell(
        date: NaiveDate,
        in_current_period: bool,
        by_day: &HashMap<String, Vec<Transaction>>,
    ) -> DayCell {
        let key = date.format("%Y-%m-%d").to_string();
        let transactions = by_day.get(&key).cloned().unwrap_or_default();
        let totals = totals_for(&transactions);
        DayCell {
            date,
            in_current_period,
            transactions,
            totals,
        }
    }

    /// Display title for the current view.
    ///
    /// Month: "June 2025". Week: one month name when the week stays inside
    /// a single month, otherwise an abbreviated start-end range with years
    /// spelled out when they differ. Day: "June 13, 2025".
    pub fn title(reference_date: NaiveDate, view_mode: ViewMode) -> String {
        match view_mode {
            ViewMode::Month => format!(
                "{} {}",
                month_name(reference_date.month()),
                reference_date.year()
            ),
            ViewMode::Week => {
                let start = start_of_week(reference_date);
                let end = start + Duration::days(6);
                if start.month() == end.month() && start.year() == end.year() {
                    format!("{} {}", month_name(start.month()), start.year())
                } else if start.year() == end.year() {
                    format!(
                        "{} {} - {} {}, {}",
                        short_month_name(start.month()),
                        start.day(),
                        short_month_name(end.month()),
                        end.day(),
                        end.year()
                    )
                } else {
                    format!(
                        "{} {}, {} - {} {}, {}",
                        short_month_name(start.month()),
                        start.day(),
                        start.year(),
                        short_month_name(end.month()),
                        end.day(),
                        end.year()
                    )
                }
            }
            ViewMode::Day => format!(
                "{} {}, {}",
                month_name(reference_date.month()),
                reference_date.day(),
                reference_date.year()
            ),
        }
    }

    /// Reference date after navigating backwards one step in the given
    /// mode (1 month / 7 days / 1 day).
    pub fn previous(reference_date: NaiveDate, view_mode: ViewMode) -> NaiveDate {
        match view_mode {
            ViewMode::Month => shift_months(reference_date, -1),
            ViewMode::Week => reference_date - Duration::days(7),
            ViewMode::Day => reference_date - Duration::days(1),
        }
    }

    /// Reference date after navigating forwards one step in the given mode.
    pub fn next(reference_date: NaiveDate, view_mode: ViewMode) -> NaiveDate {
        match view_mode {
            ViewMode::Month => shift_months(reference_date, 1),
            ViewMode::Week => reference_date + Duration::days(7),
            ViewMode::Day => reference_date + Duration::days(1),
        }
    }
}

/// The Sunday of the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Shift a date by whole calendar months, clamping the day to the target
/// month's length (Jan 31 -> Feb 28/29).
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + delta;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(month, year));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}
