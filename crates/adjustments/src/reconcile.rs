//! Item reconciliation: quantity delta, monetary value, and sign validity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockpilot_core::ValueObject;

use crate::adjustment::{AdjustmentItem, AdjustmentType};

/// Outcome of reconciling one item against the adjustment direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledItem {
    /// `new_quantity - current_quantity` (signed).
    pub difference: Decimal,
    /// `|difference| * unit_cost`.
    pub line_value: Decimal,
    /// Whether the delta's sign matches the declared direction. Invalid items
    /// never block saving a draft, but always block submit.
    pub is_valid: bool,
}

impl ValueObject for ReconciledItem {}

/// Reconcile a single item.
pub fn reconcile(item: &AdjustmentItem, adjustment_type: AdjustmentType) -> ReconciledItem {
    let difference = item.difference();
    let is_valid = match adjustment_type {
        AdjustmentType::Add => difference >= Decimal::ZERO,
        AdjustmentType::Deduct => difference <= Decimal::ZERO,
    };

    ReconciledItem {
        difference,
        line_value: item.line_value(),
        is_valid,
    }
}

/// Reconcile a whole item list, preserving order.
///
/// Returns one result per item so callers can render every violation at once
/// rather than stopping at the first.
pub fn reconcile_items(
    items: &[AdjustmentItem],
    adjustment_type: AdjustmentType,
) -> Vec<ReconciledItem> {
    items
        .iter()
        .map(|item| reconcile(item, adjustment_type))
        .collect()
}

/// Zero-based indices of every item whose delta violates the direction.
pub fn invalid_indices(items: &[AdjustmentItem], adjustment_type: AdjustmentType) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| !reconcile(item, adjustment_type).is_valid)
        .map(|(index, _)| index)
        .collect()
}
