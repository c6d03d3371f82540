//! # Finance Dashboard Engine
//!
//! Date-windowed aggregation and forward-projection engine for the
//! personal-finance dashboard.
//!
//! The engine turns flat snapshots of income/expense/installment records
//! into the derived views the dashboard renders:
//!
//! - **normalizer**: flattens the three source record kinds into a uniform
//!   transaction view
//! - **calendar**: day cells for month/week/day modes, titles, navigation
//! - **day_totals**: per-day sums by transaction kind and day detail views
//! - **projection**: 12-month installment projection with quarterly and
//!   annual rollups
//! - **invoice**: per-credit-card invoice ("fatura") groupings and the
//!   best-effort pay-entire-invoice operation
//! - **comparison**: current-vs-previous calendar month summary
//!
//! ## Design principles
//!
//! - **Stateless**: every view is recomputed in full from
//!   `{reference date, view mode, snapshot}`; the engine holds no internal
//!   state. UI state (selected day, current mode) lives in the explicit
//!   [`domain::view_state::CalendarViewState`] passed in by the caller.
//! - **Read-only snapshot**: all mutation flows through the external data
//!   service, reached only via the [`data_access::InstallmentPayer`] trait.
//! - **Synchronous**: every recomputation is O(#transactions) and completes
//!   within one render cycle; no operation blocks.

pub mod data_access;
pub mod domain;

pub use data_access::*;
pub use domain::*;
