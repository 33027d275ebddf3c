//! Stock adjustment workflow engine (event-sourced).
//!
//! This crate contains the business rules for stock adjustment documents:
//! the draft → submitted → approved | rejected lifecycle, per-item
//! reconciliation against the adjustment direction, and currency-normalized
//! reporting aggregates. Implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod adjustment;
pub mod reconcile;
pub mod reporting;

pub use adjustment::{
    AddItem, AdjustmentCommand, AdjustmentEvent, AdjustmentId, AdjustmentItem, AdjustmentStatus,
    AdjustmentType, ApproveAdjustment, AuditAction, AuditStamp, ChangeHeader, CreateAdjustment,
    DeleteAdjustment, RejectAdjustment, RemoveItem, ResubmitAdjustment, StockAdjustment,
    SubmitAdjustment, transition,
};
pub use reconcile::{ReconciledItem, invalid_indices, reconcile, reconcile_items};
pub use reporting::{ReportTotals, Totals, aggregate, aggregate_for_reporting};
