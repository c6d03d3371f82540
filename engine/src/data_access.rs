//! External data-access collaborator traits.
//!
//! The engine reads its snapshot pre-fetched and never performs I/O itself;
//! the one mutation it drives (settling an installment during
//! "pay entire invoice") goes through this abstraction so the engine stays
//! independent of the concrete data service.

use anyhow::Result;

/// Interface to the external "mark installment paid" operation.
///
/// Implementations are expected to be idempotent per installment: the
/// pay-invoice loop never rolls back already-settled installments after a
/// later failure.
pub trait InstallmentPayer: Send + Sync {
    /// Settle one pending installment, converting it into a realized
    /// expense on the data-service side.
    fn mark_installment_paid(&self, installment_id: &str) -> Result<()>;
}
