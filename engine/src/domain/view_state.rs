//! Explicit calendar view state.
//!
//! The aggregation functions are stateless; everything the UI mutates
//! (reference date, view mode, selected day) lives here and is passed into
//! the engine on every recomputation.

use chrono::{Local, NaiveDate};
use log::info;
use shared::{DayCell, ViewMode};

use crate::domain::calendar::CalendarService;

/// Navigation and selection state for the calendar views.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarViewState {
    /// Date the current view is anchored on
    pub reference_date: NaiveDate,
    pub view_mode: ViewMode,
    /// Currently selected day, if any
    pub selected_day: Option<NaiveDate>,
}

impl CalendarViewState {
    /// Create view state anchored on today's date in month mode.
    pub fn new() -> Self {
        Self::anchored_at(Local::now().date_naive(), ViewMode::Month)
    }

    /// Create view state anchored on an explicit date.
    pub fn anchored_at(reference_date: NaiveDate, view_mode: ViewMode) -> Self {
        Self {
            reference_date,
            view_mode,
            selected_day: None,
        }
    }

    /// Navigate one step backwards (1 month / 7 days / 1 day per mode).
    pub fn navigate_previous(&mut self) {
        self.reference_date = CalendarService::previous(self.reference_date, self.view_mode);
        info!("📅 Navigated to previous period: {}", self.reference_date);
    }

    /// Navigate one step forwards.
    pub fn navigate_next(&mut self) {
        self.reference_date = CalendarService::next(self.reference_date, self.view_mode);
        info!("📅 Navigated to next period: {}", self.reference_date);
    }

    /// Jump back to today: resets the reference date and also marks today
    /// as the selected day.
    pub fn go_to_today(&mut self) {
        self.reset_to(Local::now().date_naive());
    }

    /// Deterministic core of [`Self::go_to_today`].
    pub fn reset_to(&mut self, today: NaiveDate) {
        self.reference_date = today;
        self.selected_day = Some(today);
    }

    /// Switch the view mode, keeping the reference date.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    /// Toggle selection of a day cell.
    ///
    /// Selecting a non-empty cell selects its day; selecting it again
    /// deselects; empty cells are a no-op.
    pub fn toggle_day(&mut self, cell: &DayCell) {
        if cell.is_empty() {
            return;
        }
        if self.selected_day == Some(cell.date) {
            self.selected_day = None;
        } else {
            self.selected_day = Some(cell.date);
        }
    }
}

impl Default for CalendarViewState {
    fn default() -> Self {
        Self::new()
    }
}
