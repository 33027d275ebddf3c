use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use stockpilot_core::{
    Aggregate, AggregateId, AggregateRoot, DomainError, DomainResult, ProductId, StoreId, UserId,
};
use stockpilot_currency::CurrencyId;
use stockpilot_events::Event;

use crate::{reconcile, reporting};

/// Stock adjustment document identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjustmentId(pub AggregateId);

impl AdjustmentId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for AdjustmentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Adjustment direction: declared once at creation, immutable thereafter.
/// Fixes the sign every item's delta must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentType {
    Add,
    Deduct,
}

/// Document status lifecycle.
///
/// The rejection reason lives inside the `Rejected` variant, so "non-empty
/// reason iff rejected" holds by construction rather than by a flag checked
/// in every screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentStatus {
    Draft,
    Submitted,
    Approved,
    Rejected { reason: String },
}

impl AdjustmentStatus {
    pub fn name(&self) -> &'static str {
        match self {
            AdjustmentStatus::Draft => "draft",
            AdjustmentStatus::Submitted => "submitted",
            AdjustmentStatus::Approved => "approved",
            AdjustmentStatus::Rejected { .. } => "rejected",
        }
    }
}

/// One proposed quantity change within an adjustment. Items are owned by
/// their document and addressed by position; they have no independent
/// identity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentItem {
    pub product_id: ProductId,
    /// Stock level observed when the item was added to the adjustment.
    pub current_quantity: Decimal,
    /// Proposed stock level.
    pub new_quantity: Decimal,
    /// Cost basis used to value the delta.
    pub unit_cost: Decimal,
}

impl AdjustmentItem {
    /// Signed quantity delta.
    pub fn difference(&self) -> Decimal {
        self.new_quantity - self.current_quantity
    }

    /// Monetary value of the delta (magnitude, full precision).
    pub fn line_value(&self) -> Decimal {
        self.difference().abs() * self.unit_cost
    }
}

/// Which lifecycle step an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Created,
    Submitted,
    Approved,
    Rejected,
    Resubmitted,
}

/// Actor + action + timestamp, appended as the document advances. The trail
/// is append-only: resubmission clears the rejection *status*, not history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStamp {
    pub action: AuditAction,
    pub actor: UserId,
    pub at: DateTime<Utc>,
}

/// Aggregate root: StockAdjustment.
///
/// A document recording a proposed change to inventory quantities/value,
/// moving through an approval lifecycle. All mutation goes through
/// `handle`/`apply`; a failed command leaves the snapshot untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAdjustment {
    id: AdjustmentId,
    reference_number: String,
    adjustment_type: AdjustmentType,
    store_id: Option<StoreId>,
    currency_id: Option<CurrencyId>,
    /// Rate to the reporting currency captured at creation time. A historical
    /// snapshot, distinct from the live rates reporting runs with.
    exchange_rate_at_creation: Decimal,
    status: AdjustmentStatus,
    items: Vec<AdjustmentItem>,
    total_items: usize,
    total_value: Decimal,
    audit_trail: Vec<AuditStamp>,
    version: u64,
    created: bool,
    deleted: bool,
}

impl StockAdjustment {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: AdjustmentId) -> Self {
        Self {
            id,
            reference_number: String::new(),
            adjustment_type: AdjustmentType::Add,
            store_id: None,
            currency_id: None,
            exchange_rate_at_creation: Decimal::ONE,
            status: AdjustmentStatus::Draft,
            items: Vec::new(),
            total_items: 0,
            total_value: Decimal::ZERO,
            audit_trail: Vec::new(),
            version: 0,
            created: false,
            deleted: false,
        }
    }

    pub fn id_typed(&self) -> AdjustmentId {
        self.id
    }

    pub fn reference_number(&self) -> &str {
        &self.reference_number
    }

    pub fn adjustment_type(&self) -> AdjustmentType {
        self.adjustment_type
    }

    pub fn store_id(&self) -> Option<StoreId> {
        self.store_id
    }

    pub fn currency_id(&self) -> Option<CurrencyId> {
        self.currency_id
    }

    pub fn exchange_rate_at_creation(&self) -> Decimal {
        self.exchange_rate_at_creation
    }

    pub fn status(&self) -> &AdjustmentStatus {
        &self.status
    }

    pub fn items(&self) -> &[AdjustmentItem] {
        &self.items
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_value(&self) -> Decimal {
        self.total_value
    }

    pub fn audit_trail(&self) -> &[AuditStamp] {
        &self.audit_trail
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        match &self.status {
            AdjustmentStatus::Rejected { reason } => Some(reason),
            _ => None,
        }
    }

    /// Items and header fields may change only while the document is a
    /// live draft.
    pub fn is_modifiable(&self) -> bool {
        self.created && !self.deleted && self.status == AdjustmentStatus::Draft
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}

impl AggregateRoot for StockAdjustment {
    type Id = AdjustmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateAdjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAdjustment {
    pub adjustment_id: AdjustmentId,
    pub reference_number: String,
    pub adjustment_type: AdjustmentType,
    pub store_id: StoreId,
    pub currency_id: CurrencyId,
    /// Rate to the reporting currency at creation time, snapshotted into the
    /// document.
    pub exchange_rate: Decimal,
    pub actor: UserId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddItem (draft only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub adjustment_id: AdjustmentId,
    pub product_id: ProductId,
    pub current_quantity: Decimal,
    pub new_quantity: Decimal,
    pub unit_cost: Decimal,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem (draft only, by position).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub adjustment_id: AdjustmentId,
    pub index: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ChangeHeader (draft only; store and/or currency).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeHeader {
    pub adjustment_id: AdjustmentId,
    pub store_id: Option<StoreId>,
    pub currency_id: Option<CurrencyId>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SubmitAdjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAdjustment {
    pub adjustment_id: AdjustmentId,
    pub actor: UserId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ApproveAdjustment.
///
/// Whether the actor *may* approve is the caller's authorization capability;
/// the engine only enforces the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveAdjustment {
    pub adjustment_id: AdjustmentId,
    pub actor: UserId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RejectAdjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectAdjustment {
    pub adjustment_id: AdjustmentId,
    pub actor: UserId,
    pub reason: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ResubmitAdjustment (rejected → submitted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResubmitAdjustment {
    pub adjustment_id: AdjustmentId,
    pub actor: UserId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeleteAdjustment (draft only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAdjustment {
    pub adjustment_id: AdjustmentId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustmentCommand {
    CreateAdjustment(CreateAdjustment),
    AddItem(AddItem),
    RemoveItem(RemoveItem),
    ChangeHeader(ChangeHeader),
    SubmitAdjustment(SubmitAdjustment),
    ApproveAdjustment(ApproveAdjustment),
    RejectAdjustment(RejectAdjustment),
    ResubmitAdjustment(ResubmitAdjustment),
    DeleteAdjustment(DeleteAdjustment),
}

/// Event: AdjustmentCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentCreated {
    pub adjustment_id: AdjustmentId,
    pub reference_number: String,
    pub adjustment_type: AdjustmentType,
    pub store_id: StoreId,
    pub currency_id: CurrencyId,
    pub exchange_rate: Decimal,
    pub actor: UserId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub adjustment_id: AdjustmentId,
    pub item: AdjustmentItem,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub adjustment_id: AdjustmentId,
    pub index: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Event: HeaderChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderChanged {
    pub adjustment_id: AdjustmentId,
    pub store_id: Option<StoreId>,
    pub currency_id: Option<CurrencyId>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: AdjustmentSubmitted. Carries the totals frozen at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentSubmitted {
    pub adjustment_id: AdjustmentId,
    pub actor: UserId,
    pub total_items: usize,
    pub total_value: Decimal,
    pub occurred_at: DateTime<Utc>,
}

/// Event: AdjustmentApproved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentApproved {
    pub adjustment_id: AdjustmentId,
    pub actor: UserId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: AdjustmentRejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentRejected {
    pub adjustment_id: AdjustmentId,
    pub actor: UserId,
    pub reason: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: AdjustmentResubmitted. Re-freezes totals like a submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentResubmitted {
    pub adjustment_id: AdjustmentId,
    pub actor: UserId,
    pub total_items: usize,
    pub total_value: Decimal,
    pub occurred_at: DateTime<Utc>,
}

/// Event: AdjustmentDeleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentDeleted {
    pub adjustment_id: AdjustmentId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustmentEvent {
    AdjustmentCreated(AdjustmentCreated),
    ItemAdded(ItemAdded),
    ItemRemoved(ItemRemoved),
    HeaderChanged(HeaderChanged),
    AdjustmentSubmitted(AdjustmentSubmitted),
    AdjustmentApproved(AdjustmentApproved),
    AdjustmentRejected(AdjustmentRejected),
    AdjustmentResubmitted(AdjustmentResubmitted),
    AdjustmentDeleted(AdjustmentDeleted),
}

impl Event for AdjustmentEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AdjustmentEvent::AdjustmentCreated(_) => "adjustments.adjustment.created",
            AdjustmentEvent::ItemAdded(_) => "adjustments.adjustment.item_added",
            AdjustmentEvent::ItemRemoved(_) => "adjustments.adjustment.item_removed",
            AdjustmentEvent::HeaderChanged(_) => "adjustments.adjustment.header_changed",
            AdjustmentEvent::AdjustmentSubmitted(_) => "adjustments.adjustment.submitted",
            AdjustmentEvent::AdjustmentApproved(_) => "adjustments.adjustment.approved",
            AdjustmentEvent::AdjustmentRejected(_) => "adjustments.adjustment.rejected",
            AdjustmentEvent::AdjustmentResubmitted(_) => "adjustments.adjustment.resubmitted",
            AdjustmentEvent::AdjustmentDeleted(_) => "adjustments.adjustment.deleted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            AdjustmentEvent::AdjustmentCreated(e) => e.occurred_at,
            AdjustmentEvent::ItemAdded(e) => e.occurred_at,
            AdjustmentEvent::ItemRemoved(e) => e.occurred_at,
            AdjustmentEvent::HeaderChanged(e) => e.occurred_at,
            AdjustmentEvent::AdjustmentSubmitted(e) => e.occurred_at,
            AdjustmentEvent::AdjustmentApproved(e) => e.occurred_at,
            AdjustmentEvent::AdjustmentRejected(e) => e.occurred_at,
            AdjustmentEvent::AdjustmentResubmitted(e) => e.occurred_at,
            AdjustmentEvent::AdjustmentDeleted(e) => e.occurred_at,
        }
    }
}

impl Aggregate for StockAdjustment {
    type Command = AdjustmentCommand;
    type Event = AdjustmentEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            AdjustmentEvent::AdjustmentCreated(e) => {
                self.id = e.adjustment_id;
                self.reference_number = e.reference_number.clone();
                self.adjustment_type = e.adjustment_type;
                self.store_id = Some(e.store_id);
                self.currency_id = Some(e.currency_id);
                self.exchange_rate_at_creation = e.exchange_rate;
                self.status = AdjustmentStatus::Draft;
                self.items.clear();
                self.total_items = 0;
                self.total_value = Decimal::ZERO;
                self.audit_trail.push(AuditStamp {
                    action: AuditAction::Created,
                    actor: e.actor,
                    at: e.occurred_at,
                });
                self.created = true;
            }
            AdjustmentEvent::ItemAdded(e) => {
                self.items.push(e.item);
                self.recompute_totals();
            }
            AdjustmentEvent::ItemRemoved(e) => {
                self.items.remove(e.index);
                self.recompute_totals();
            }
            AdjustmentEvent::HeaderChanged(e) => {
                if let Some(store_id) = e.store_id {
                    self.store_id = Some(store_id);
                }
                if let Some(currency_id) = e.currency_id {
                    self.currency_id = Some(currency_id);
                }
            }
            AdjustmentEvent::AdjustmentSubmitted(e) => {
                self.status = AdjustmentStatus::Submitted;
                self.total_items = e.total_items;
                self.total_value = e.total_value;
                self.audit_trail.push(AuditStamp {
                    action: AuditAction::Submitted,
                    actor: e.actor,
                    at: e.occurred_at,
                });
            }
            AdjustmentEvent::AdjustmentApproved(e) => {
                self.status = AdjustmentStatus::Approved;
                self.audit_trail.push(AuditStamp {
                    action: AuditAction::Approved,
                    actor: e.actor,
                    at: e.occurred_at,
                });
            }
            AdjustmentEvent::AdjustmentRejected(e) => {
                self.status = AdjustmentStatus::Rejected {
                    reason: e.reason.clone(),
                };
                self.audit_trail.push(AuditStamp {
                    action: AuditAction::Rejected,
                    actor: e.actor,
                    at: e.occurred_at,
                });
            }
            AdjustmentEvent::AdjustmentResubmitted(e) => {
                // Replacing the status variant clears the rejection reason;
                // the audit trail keeps the history.
                self.status = AdjustmentStatus::Submitted;
                self.total_items = e.total_items;
                self.total_value = e.total_value;
                self.audit_trail.push(AuditStamp {
                    action: AuditAction::Resubmitted,
                    actor: e.actor,
                    at: e.occurred_at,
                });
            }
            AdjustmentEvent::AdjustmentDeleted(_) => {
                self.deleted = true;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            AdjustmentCommand::CreateAdjustment(cmd) => self.handle_create(cmd),
            AdjustmentCommand::AddItem(cmd) => self.handle_add_item(cmd),
            AdjustmentCommand::RemoveItem(cmd) => self.handle_remove_item(cmd),
            AdjustmentCommand::ChangeHeader(cmd) => self.handle_change_header(cmd),
            AdjustmentCommand::SubmitAdjustment(cmd) => self.handle_submit(cmd),
            AdjustmentCommand::ApproveAdjustment(cmd) => self.handle_approve(cmd),
            AdjustmentCommand::RejectAdjustment(cmd) => self.handle_reject(cmd),
            AdjustmentCommand::ResubmitAdjustment(cmd) => self.handle_resubmit(cmd),
            AdjustmentCommand::DeleteAdjustment(cmd) => self.handle_delete(cmd),
        }
    }
}

impl StockAdjustment {
    fn recompute_totals(&mut self) {
        let totals = reporting::aggregate(&self.items);
        self.total_items = totals.total_items;
        self.total_value = totals.total_value;
    }

    fn ensure_exists(&self) -> DomainResult<()> {
        if !self.created || self.deleted {
            return Err(DomainError::not_found());
        }
        Ok(())
    }

    fn ensure_adjustment_id(&self, adjustment_id: AdjustmentId) -> DomainResult<()> {
        if self.id != adjustment_id {
            return Err(DomainError::validation(
                "command targets a different adjustment",
            ));
        }
        Ok(())
    }

    fn ensure_modifiable(&self, action: &str) -> DomainResult<()> {
        if !self.is_modifiable() {
            return Err(DomainError::illegal_state(action, self.status.name()));
        }
        Ok(())
    }

    /// Shared submit/resubmit precondition: at least one item, every item
    /// valid against the direction. Returns the totals to freeze.
    fn check_ready_for_submit(&self) -> DomainResult<reporting::Totals> {
        if self.items.is_empty() {
            return Err(DomainError::validation(
                "cannot submit an adjustment without items",
            ));
        }

        let invalid = reconcile::invalid_indices(&self.items, self.adjustment_type);
        if !invalid.is_empty() {
            return Err(DomainError::validation_items(
                "item quantity deltas violate the adjustment direction",
                invalid,
            ));
        }

        Ok(reporting::aggregate(&self.items))
    }

    fn handle_create(&self, cmd: &CreateAdjustment) -> Result<Vec<AdjustmentEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("adjustment already exists"));
        }
        if cmd.reference_number.trim().is_empty() {
            return Err(DomainError::validation("reference number cannot be empty"));
        }
        if cmd.exchange_rate <= Decimal::ZERO {
            return Err(DomainError::validation("exchange rate must be positive"));
        }

        Ok(vec![AdjustmentEvent::AdjustmentCreated(AdjustmentCreated {
            adjustment_id: cmd.adjustment_id,
            reference_number: cmd.reference_number.clone(),
            adjustment_type: cmd.adjustment_type,
            store_id: cmd.store_id,
            currency_id: cmd.currency_id,
            exchange_rate: cmd.exchange_rate,
            actor: cmd.actor,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add_item(&self, cmd: &AddItem) -> Result<Vec<AdjustmentEvent>, DomainError> {
        self.ensure_exists()?;
        self.ensure_adjustment_id(cmd.adjustment_id)?;
        self.ensure_modifiable("add item")?;

        if cmd.current_quantity < Decimal::ZERO || cmd.new_quantity < Decimal::ZERO {
            return Err(DomainError::validation("quantities cannot be negative"));
        }
        if cmd.unit_cost < Decimal::ZERO {
            return Err(DomainError::validation("unit cost cannot be negative"));
        }

        // A delta whose sign violates the direction is accepted here: drafts
        // may hold invalid items so the user can fix them all at once. Submit
        // is where the sign rule is enforced.
        Ok(vec![AdjustmentEvent::ItemAdded(ItemAdded {
            adjustment_id: cmd.adjustment_id,
            item: AdjustmentItem {
                product_id: cmd.product_id,
                current_quantity: cmd.current_quantity,
                new_quantity: cmd.new_quantity,
                unit_cost: cmd.unit_cost,
            },
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove_item(&self, cmd: &RemoveItem) -> Result<Vec<AdjustmentEvent>, DomainError> {
        self.ensure_exists()?;
        self.ensure_adjustment_id(cmd.adjustment_id)?;
        self.ensure_modifiable("remove item")?;

        if cmd.index >= self.items.len() {
            return Err(DomainError::validation(format!(
                "item index {} out of range (document has {} items)",
                cmd.index,
                self.items.len()
            )));
        }

        Ok(vec![AdjustmentEvent::ItemRemoved(ItemRemoved {
            adjustment_id: cmd.adjustment_id,
            index: cmd.index,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_change_header(
        &self,
        cmd: &ChangeHeader,
    ) -> Result<Vec<AdjustmentEvent>, DomainError> {
        self.ensure_exists()?;
        self.ensure_adjustment_id(cmd.adjustment_id)?;
        self.ensure_modifiable("change header")?;

        if cmd.store_id.is_none() && cmd.currency_id.is_none() {
            return Err(DomainError::validation(
                "header change must set store and/or currency",
            ));
        }

        Ok(vec![AdjustmentEvent::HeaderChanged(HeaderChanged {
            adjustment_id: cmd.adjustment_id,
            store_id: cmd.store_id,
            currency_id: cmd.currency_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_submit(&self, cmd: &SubmitAdjustment) -> Result<Vec<AdjustmentEvent>, DomainError> {
        self.ensure_exists()?;
        self.ensure_adjustment_id(cmd.adjustment_id)?;

        if self.status != AdjustmentStatus::Draft {
            return Err(DomainError::illegal_state("submit", self.status.name()));
        }
        let totals = self.check_ready_for_submit()?;

        Ok(vec![AdjustmentEvent::AdjustmentSubmitted(
            AdjustmentSubmitted {
                adjustment_id: cmd.adjustment_id,
                actor: cmd.actor,
                total_items: totals.total_items,
                total_value: totals.total_value,
                occurred_at: cmd.occurred_at,
            },
        )])
    }

    fn handle_approve(&self, cmd: &ApproveAdjustment) -> Result<Vec<AdjustmentEvent>, DomainError> {
        self.ensure_exists()?;
        self.ensure_adjustment_id(cmd.adjustment_id)?;

        if self.status != AdjustmentStatus::Submitted {
            return Err(DomainError::illegal_state("approve", self.status.name()));
        }

        Ok(vec![AdjustmentEvent::AdjustmentApproved(
            AdjustmentApproved {
                adjustment_id: cmd.adjustment_id,
                actor: cmd.actor,
                occurred_at: cmd.occurred_at,
            },
        )])
    }

    fn handle_reject(&self, cmd: &RejectAdjustment) -> Result<Vec<AdjustmentEvent>, DomainError> {
        self.ensure_exists()?;
        self.ensure_adjustment_id(cmd.adjustment_id)?;

        if self.status != AdjustmentStatus::Submitted {
            return Err(DomainError::illegal_state("reject", self.status.name()));
        }
        if cmd.reason.trim().is_empty() {
            return Err(DomainError::validation("rejection requires a reason"));
        }

        Ok(vec![AdjustmentEvent::AdjustmentRejected(
            AdjustmentRejected {
                adjustment_id: cmd.adjustment_id,
                actor: cmd.actor,
                reason: cmd.reason.clone(),
                occurred_at: cmd.occurred_at,
            },
        )])
    }

    fn handle_resubmit(
        &self,
        cmd: &ResubmitAdjustment,
    ) -> Result<Vec<AdjustmentEvent>, DomainError> {
        self.ensure_exists()?;
        self.ensure_adjustment_id(cmd.adjustment_id)?;

        if !matches!(self.status, AdjustmentStatus::Rejected { .. }) {
            return Err(DomainError::illegal_state("resubmit", self.status.name()));
        }
        let totals = self.check_ready_for_submit()?;

        Ok(vec![AdjustmentEvent::AdjustmentResubmitted(
            AdjustmentResubmitted {
                adjustment_id: cmd.adjustment_id,
                actor: cmd.actor,
                total_items: totals.total_items,
                total_value: totals.total_value,
                occurred_at: cmd.occurred_at,
            },
        )])
    }

    fn handle_delete(&self, cmd: &DeleteAdjustment) -> Result<Vec<AdjustmentEvent>, DomainError> {
        self.ensure_exists()?;
        self.ensure_adjustment_id(cmd.adjustment_id)?;

        if self.status != AdjustmentStatus::Draft {
            return Err(DomainError::illegal_state("delete", self.status.name()));
        }

        Ok(vec![AdjustmentEvent::AdjustmentDeleted(AdjustmentDeleted {
            adjustment_id: cmd.adjustment_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

/// Snapshot-in, snapshot-out execution: decide with `handle`, evolve with
/// `apply`, return the new document. A failed precondition returns the error
/// and the caller keeps its original snapshot.
pub fn transition(
    mut document: StockAdjustment,
    command: &AdjustmentCommand,
) -> DomainResult<StockAdjustment> {
    let events = document.handle(command)?;
    for event in &events {
        document.apply(event);
    }
    debug!(
        adjustment_id = %document.id_typed(),
        status = document.status().name(),
        events = events.len(),
        "adjustment transition applied"
    );
    Ok(document)
}
