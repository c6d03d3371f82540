//! Per-credit-card invoice ("fatura") grouping and batch settlement.
//!
//! Pending installments of active purchases are grouped by their owning
//! card into invoice summaries. Settling an entire invoice is a sequential
//! best-effort loop over the external "mark installment paid" operation:
//! one failure is logged and skipped, the remaining installments are still
//! processed, and nothing is rolled back.

use log::{error, info};
use shared::{CreditCard, FaturaSummary, FutureExpense, Installment, InvoiceGroup};
use std::collections::HashMap;

use crate::data_access::InstallmentPayer;

/// How to group installments whose card id no longer matches any active
/// card (the card was deleted after the purchase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovedCardPolicy {
    /// Fold them into the "no card" invoice
    #[default]
    MergeIntoNoCard,
    /// Surface them as a distinct "removed card" invoice per orphaned id
    SurfaceRemovedCard,
}

/// Configuration for invoice grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvoiceGrouperConfig {
    pub removed_card_policy: RemovedCardPolicy,
}

/// Outcome of a "pay entire invoice" run.
#[derive(Debug, Clone, PartialEq)]
pub struct PayInvoiceResult {
    /// IDs of installments settled successfully, in processing order
    pub paid: Vec<String>,
    /// IDs and error messages of installments that failed to settle
    pub failed: Vec<(String, String)>,
}

impl PayInvoiceResult {
    pub fn all_paid(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Groups pending installments into per-card invoice summaries.
pub struct InvoiceGrouper {
    config: InvoiceGrouperConfig,
}

impl InvoiceGrouper {
    pub fn new() -> Self {
        Self::with_config(InvoiceGrouperConfig::default())
    }

    pub fn with_config(config: InvoiceGrouperConfig) -> Self {
        Self { config }
    }

    /// Build one `FaturaSummary` per card that has pending installments,
    /// plus the "no card" group, ordered by total pending amount
    /// descending. Groups with no installments are not surfaced.
    pub fn group(
        &self,
        future_expenses: &[FutureExpense],
        cards: &[CreditCard],
    ) -> Vec<FaturaSummary> {
        let active_cards: HashMap<&str, &CreditCard> = cards
            .iter()
            .filter(|c| c.active)
            .map(|c| (c.id.as_str(), c))
            .collect();

        let mut by_card: HashMap<String, Vec<Installment>> = HashMap::new();
        let mut removed: HashMap<String, Vec<Installment>> = HashMap::new();
        let mut no_card: Vec<Installment> = Vec::new();

        for future_expense in future_expenses.iter().filter(|fe| fe.is_active()) {
            for installment in future_expense.pending_installments() {
                match installment.card_id.as_deref() {
                    Some(card_id) if active_cards.contains_key(card_id) => {
                        by_card
                            .entry(card_id.to_string())
                            .or_default()
                            .push(installment.clone());
                    }
                    Some(card_id) => match self.config.removed_card_policy {
                        RemovedCardPolicy::MergeIntoNoCard => no_card.push(installment.clone()),
                        RemovedCardPolicy::SurfaceRemovedCard => removed
                            .entry(card_id.to_string())
                            .or_default()
                            .push(installment.clone()),
                    },
                    None => no_card.push(installment.clone()),
                }
            }
        }

        let mut summaries = Vec::new();
        // Known cards first in their registered order, then orphaned card
        // ids, then the card-less group; the final order is decided by the
        // stable sort on total_pending below.
        for card in cards.iter().filter(|c| c.active) {
            if let Some(installments) = by_card.remove(card.id.as_str()) {
                summaries.push(make_summary(InvoiceGroup::Card((*card).clone()), installments));
            }
        }
        let mut removed: Vec<(String, Vec<Installment>)> = removed.into_iter().collect();
        removed.sort_by(|a, b| a.0.cmp(&b.0));
        for (card_id, installments) in removed {
            summaries.push(make_summary(InvoiceGroup::RemovedCard(card_id), installments));
        }
        if !no_card.is_empty() {
            summaries.push(make_summary(InvoiceGroup::NoCard, no_card));
        }

        summaries.retain(|s| s.count > 0);
        summaries.sort_by(|a, b| {
            b.total_pending
                .partial_cmp(&a.total_pending)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        summaries
    }

    /// Settle every installment of one invoice through the external
    /// collaborator, sequentially. Failures are logged and skipped;
    /// already-settled installments are never rolled back.
    pub fn pay_invoice(
        &self,
        summary: &FaturaSummary,
        payer: &dyn InstallmentPayer,
    ) -> PayInvoiceResult {
        let mut result = PayInvoiceResult {
            paid: Vec::new(),
            failed: Vec::new(),
        };

        info!(
            "Settling invoice '{}' with {} installments totalling ${:.2}",
            summary.group.label(),
            summary.count,
            summary.total_pending
        );

        for installment in &summary.installments {
            match payer.mark_installment_paid(&installment.id) {
                Ok(()) => {
                    info!(
                        "Settled installment {} for ${:.2}",
                        installment.id, installment.amount
                    );
                    result.paid.push(installment.id.clone());
                }
                Err(e) => {
                    error!("Failed to settle installment {}: {:#}", installment.id, e);
                    result.failed.push((installment.id.clone(), e.to_string()));
                }
            }
        }

        result
    }
}

impl Default for InvoiceGrouper {
    fn default() -> Self {
        Self::new()
    }
}

fn make_summary(group: InvoiceGroup, mut installments: Vec<Installment>) -> FaturaSummary {
    installments.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    let total_pending = installments.iter().map(|i| i.amount).sum();
    let count = installments.len();
    FaturaSummary {
        group,
        installments,
        total_pending,
        count,
    }
}
