//! # Domain Module
//!
//! Contains all aggregation and projection logic for the dashboard.
//!
//! This module encapsulates the business rules that turn a read-only data
//! snapshot into the derived views the UI renders. It operates independently
//! of any specific UI framework or data-access mechanism.
//!
//! ## Module Organization
//!
//! - **normalizer**: flattening of expense/income/future-expense records
//!   into the uniform transaction view
//! - **calendar**: calendar grid generation, titles and navigation
//! - **day_totals**: per-day aggregation and day detail views
//! - **view_state**: explicit calendar view state (reference date, mode,
//!   selected day)
//! - **projection**: 12-month installment projection, quarterly and annual
//!   rollups
//! - **invoice**: per-card invoice grouping and batch settlement
//! - **comparison**: month-over-month summaries

pub mod calendar;
pub mod comparison;
pub mod day_totals;
pub mod invoice;
pub mod normalizer;
pub mod projection;
pub mod view_state;

pub use calendar::*;
pub use comparison::*;
pub use day_totals::*;
pub use invoice::*;
pub use normalizer::*;
pub use projection::*;
pub use view_state::*;
