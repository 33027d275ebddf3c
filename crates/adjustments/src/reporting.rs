//! Document totals and currency-normalized reporting aggregates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockpilot_core::ValueObject;
use stockpilot_currency::{CurrencyId, Money, RateLookup};

use crate::adjustment::{AdjustmentItem, AdjustmentStatus, AdjustmentType, StockAdjustment};

/// Derived document totals. Recomputed, never hand-edited.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub total_items: usize,
    pub total_value: Decimal,
}

impl ValueObject for Totals {}

/// Aggregate movement across approved documents, expressed in a single
/// reporting currency.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Total inbound movement (`Add` documents), a non-negative magnitude.
    pub in_value: Decimal,
    /// Total outbound movement (`Deduct` documents), a non-negative magnitude.
    pub out_value: Decimal,
    /// `in_value + out_value`: total movement, not a signed net position.
    pub net_value: Decimal,
}

impl ValueObject for ReportTotals {}

/// Sum an item list into document totals.
pub fn aggregate(items: &[AdjustmentItem]) -> Totals {
    Totals {
        total_items: items.len(),
        total_value: items.iter().map(AdjustmentItem::line_value).sum(),
    }
}

/// Re-express a collection of documents in `reporting_currency`.
///
/// Only `Approved` documents participate; drafts, submitted, and rejected
/// documents are excluded. Each document's frozen `total_value` is converted
/// with the rate lookup supplied *at call time* - not the historical
/// `exchange_rate_at_creation` snapshot - so the same report can move with
/// the rates. A caller that wants point-in-time valuation builds its lookup
/// from the documents' snapshot rates instead.
pub fn aggregate_for_reporting(
    documents: &[StockAdjustment],
    reporting_currency: CurrencyId,
    rates: &impl RateLookup,
) -> ReportTotals {
    let mut in_value = Decimal::ZERO;
    let mut out_value = Decimal::ZERO;

    for document in documents {
        if !matches!(document.status(), AdjustmentStatus::Approved) {
            continue;
        }
        let Some(currency) = document.currency_id() else {
            continue;
        };

        let normalized =
            Money::new(document.total_value(), currency).normalized_to(reporting_currency, rates);

        match document.adjustment_type() {
            AdjustmentType::Add => in_value += normalized.amount,
            AdjustmentType::Deduct => out_value += normalized.amount,
        }
    }

    ReportTotals {
        in_value,
        out_value,
        net_value: in_value + out_value,
    }
}
