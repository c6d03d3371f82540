use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub mod amount;

/// A realized expense record as fetched from the data service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    /// Timestamp with timezone (RFC 3339)
    pub date: String,
    pub description: String,
    /// Positive amount in currency units, two decimal places
    #[serde(with = "amount")]
    pub amount: f64,
    pub category: String,
}

/// An income record as fetched from the data service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: String,
    /// Timestamp with timezone (RFC 3339)
    pub date: String,
    pub description: String,
    #[serde(with = "amount")]
    pub amount: f64,
    pub category: String,
}

/// Kind of a normalized transaction for aggregation and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Realized income (money added)
    Income,
    /// Realized expense (money spent)
    Expense,
    /// Pending installment of a scheduled purchase (not yet settled)
    FutureExpense,
}

/// Uniform view over expense/income/installment records.
///
/// Built by the normalizer from the three source kinds; immutable per
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Timestamp with timezone (RFC 3339)
    pub date: String,
    pub description: String,
    pub kind: TransactionKind,
    #[serde(with = "amount")]
    pub amount: f64,
    pub category: String,
}

impl Transaction {
    /// Canonical `YYYY-MM-DD` key for day grouping.
    ///
    /// This is a string truncation of the stored timestamp, not a timezone
    /// conversion; callers must treat it as authoritative.
    pub fn date_key(&self) -> &str {
        date_key(&self.date)
    }
}

/// Settlement state of a single installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentStatus {
    Pending,
    Paid,
}

/// Installment ID in format: "installment::<future_expense_id>::<number>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub id: String,
    /// ID of the future expense this installment amortizes
    pub future_expense_id: String,
    /// 1-based position within the plan
    pub number: u32,
    pub total_installments: u32,
    #[serde(with = "amount")]
    pub amount: f64,
    /// Due date (RFC 3339 or plain `YYYY-MM-DD`)
    pub due_date: String,
    /// Set when the installment was settled into a realized expense
    pub payment_date: Option<String>,
    pub status: InstallmentStatus,
    /// Owning credit card, if the purchase was made on one
    pub card_id: Option<String>,
}

impl Installment {
    /// Generate an installment ID from its parent and position.
    pub fn generate_id(future_expense_id: &str, number: u32) -> String {
        format!("installment::{}::{}", future_expense_id, number)
    }

    /// Parse an installment ID into its parent ID and position.
    pub fn parse_id(id: &str) -> Result<(String, u32), ParseError> {
        let rest = id
            .strip_prefix("installment::")
            .ok_or_else(|| ParseError::InvalidId(id.to_string()))?;
        let (parent, number) = rest
            .rsplit_once("::")
            .ok_or_else(|| ParseError::InvalidId(id.to_string()))?;
        let number = number
            .parse::<u32>()
            .map_err(|_| ParseError::InvalidId(id.to_string()))?;
        Ok((parent.to_string(), number))
    }

    pub fn is_pending(&self) -> bool {
        self.status == InstallmentStatus::Pending
    }
}

/// Lifecycle state of a scheduled purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FutureExpenseStatus {
    /// Still has pending installments
    Active,
    /// Every installment settled
    Paid,
    Cancelled,
}

/// A scheduled credit-card purchase ("gasto futuro") that does not affect
/// balance until its installments settle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureExpense {
    pub id: String,
    pub description: String,
    #[serde(with = "amount")]
    pub total_amount: f64,
    pub category: String,
    /// Purchase timestamp (RFC 3339)
    pub purchase_date: String,
    pub card_id: Option<String>,
    pub status: FutureExpenseStatus,
    /// Ordered by installment number
    pub installments: Vec<Installment>,
}

impl FutureExpense {
    /// Generate a future expense ID from a millisecond timestamp.
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("future-expense::{}", epoch_millis)
    }

    pub fn is_active(&self) -> bool {
        self.status == FutureExpenseStatus::Active
    }

    /// Pending installments of this purchase, in plan order.
    pub fn pending_installments(&self) -> impl Iterator<Item = &Installment> {
        self.installments.iter().filter(|i| i.is_pending())
    }
}

/// A registered credit card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: String,
    pub name: String,
    pub holder: String,
    /// Day of month the invoice closes (1-31)
    pub due_day: u8,
    #[serde(default)]
    pub limit: Option<f64>,
    /// Display color (hex string)
    pub color: String,
    pub active: bool,
}

impl CreditCard {
    pub fn is_valid_due_day(day: u8) -> bool {
        (1..=31).contains(&day)
    }
}

/// Calendar display mode selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    Month,
    Week,
    Day,
}

/// Per-kind sums for one day cell.
///
/// All components are non-negative; an empty day is all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KindTotals {
    pub income: f64,
    pub expense: f64,
    pub future_expense: f64,
}

impl KindTotals {
    /// Accumulate one transaction amount under its kind.
    pub fn add(&mut self, kind: TransactionKind, amount: f64) {
        match kind {
            TransactionKind::Income => self.income += amount,
            TransactionKind::Expense => self.expense += amount,
            TransactionKind::FutureExpense => self.future_expense += amount,
        }
    }

    pub fn get(&self, kind: TransactionKind) -> f64 {
        match kind {
            TransactionKind::Income => self.income,
            TransactionKind::Expense => self.expense,
            TransactionKind::FutureExpense => self.future_expense,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.income == 0.0 && self.expense == 0.0 && self.future_expense == 0.0
    }
}

/// A single cell of a calendar grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for padding cells belonging to adjacent months
    pub in_current_period: bool,
    pub transactions: Vec<Transaction>,
    pub totals: KindTotals,
}

impl DayCell {
    /// Canonical `YYYY-MM-DD` key matching `Transaction::date_key`.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Detail view data for one selected day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDetail {
    pub date_key: String,
    pub transactions: Vec<Transaction>,
    pub totals: KindTotals,
}

/// One month of the 12-month installment projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Month number (1-12)
    pub month: u32,
    pub year: i32,
    /// Display label, e.g. "June 2026"
    pub label: String,
    /// pending_total + paid_total
    pub total: f64,
    pub pending_total: f64,
    pub paid_total: f64,
    /// Number of installments due in this month
    pub count: usize,
}

/// Three consecutive projection months rolled into one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterBucket {
    /// Display label, e.g. "Jun - Aug 2026"
    pub label: String,
    pub total: f64,
    pub pending_total: f64,
    pub paid_total: f64,
    pub count: usize,
}

/// Whole-window statistics over the 12-month projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualStats {
    pub total: f64,
    pub pending_total: f64,
    /// total / 12, regardless of how many months have spending
    pub monthly_mean: f64,
    /// Bucket with the highest total; None when no month has spending
    pub max_month: Option<MonthBucket>,
    /// Bucket with the lowest total among months with spending
    pub min_month: Option<MonthBucket>,
}

/// Owner of an invoice group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InvoiceGroup {
    /// A known active credit card
    Card(CreditCard),
    /// Installments referencing a card id that no longer matches any
    /// active card
    RemovedCard(String),
    /// Installments with no card at all
    NoCard,
}

impl InvoiceGroup {
    /// Display label for the invoice header.
    pub fn label(&self) -> String {
        match self {
            InvoiceGroup::Card(card) => card.name.clone(),
            InvoiceGroup::RemovedCard(card_id) => format!("Removed card ({})", card_id),
            InvoiceGroup::NoCard => "No card".to_string(),
        }
    }
}

/// Aggregated monthly invoice ("fatura") for one credit card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaturaSummary {
    pub group: InvoiceGroup,
    /// Pending installments, ascending by due date
    pub installments: Vec<Installment>,
    pub total_pending: f64,
    pub count: usize,
}

/// Income/expense/net totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: u32,
    pub year: i32,
    pub income_total: f64,
    pub expense_total: f64,
    /// income_total - expense_total
    pub net: f64,
}

/// Current-vs-previous calendar month comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthComparison {
    pub current: MonthSummary,
    pub previous: MonthSummary,
}

/// Errors raised while interpreting snapshot fields.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("invalid id: {0}")]
    InvalidId(String),
}

/// Date portion of an ISO timestamp, by string truncation.
pub fn date_key(date: &str) -> &str {
    date.split('T').next().unwrap_or(date)
}

/// Parse the date portion of an ISO timestamp into (year, month, day).
pub fn parse_date_parts(date: &str) -> Option<(i32, u32, u32)> {
    let parts: Vec<&str> = date_key(date).split('-').collect();
    if parts.len() != 3 {
        return None;
    }
    let year = parts[0].parse::<i32>().ok()?;
    let month = parts[1].parse::<u32>().ok()?;
    let day = parts[2].parse::<u32>().ok()?;
    // Reject out-of-range components such as month 13 or day 32
    NaiveDate::from_ymd_opt(year, month, day)?;
    Some((year, month, day))
}

/// Parse the date portion of an ISO timestamp into a `NaiveDate`.
pub fn parse_naive_date(date: &str) -> Result<NaiveDate, ParseError> {
    let (year, month, day) =
        parse_date_parts(date).ok_or_else(|| ParseError::InvalidDate(date.to_string()))?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ParseError::InvalidDate(date.to_string()))
}

/// Round a currency amount to whole cents (half away from zero).
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Full month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Invalid Month",
    }
}

/// Abbreviated month name for a 1-based month number.
pub fn short_month_name(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "???",
    }
}

/// Add calendar months to a date, clamping to the last day of the target
/// month (Jan 31 + 1 month = Feb 28/29).
pub fn add_months_clamped(date: NaiveDate, months: u32) -> NaiveDate {
    let zero_based = date.month0() + months;
    let year = date.year() + (zero_based / 12) as i32;
    let month = zero_based % 12 + 1;
    let day = date.day().min(days_in_month(month, year));
    // month and clamped day are always valid here
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Number of days in a given month and year.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Build an installment plan for a purchase: `count` equal amounts rounded
/// down to whole cents, with the rounding remainder folded into the last
/// installment, due one calendar month apart starting at `first_due`.
pub fn build_installment_plan(
    total: f64,
    count: u32,
    first_due: NaiveDate,
) -> Vec<(f64, NaiveDate)> {
    if count == 0 {
        return Vec::new();
    }
    let total_cents = (total * 100.0).round() as i64;
    let base_cents = total_cents / count as i64;
    let remainder_cents = total_cents - base_cents * count as i64;

    (0..count)
        .map(|i| {
            let cents = if i == count - 1 {
                base_cents + remainder_cents
            } else {
                base_cents
            };
            (cents as f64 / 100.0, add_months_clamped(first_due, i))
        })
        .collect()
}
