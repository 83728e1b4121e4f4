use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use billkit_core::{Aggregate, AggregateId, AggregateRoot, DomainError};
use billkit_events::Event;

/// Purchase record identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseId(pub AggregateId);

impl PurchaseId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for PurchaseId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: Purchase.
///
/// A single purchase of one item from a vendor. The total is always
/// quantity times unit price; there is no per-purchase discount.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    id: PurchaseId,
    item_name: String,
    category: String,
    vendor: String,
    quantity: f64,
    unit_price: f64,
    purchase_date: Option<NaiveDate>,
    removed: bool,
    version: u64,
    created: bool,
}

impl Purchase {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: PurchaseId) -> Self {
        Self {
            id,
            item_name: String::new(),
            category: String::new(),
            vendor: String::new(),
            quantity: 0.0,
            unit_price: 0.0,
            purchase_date: None,
            removed: false,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> PurchaseId {
        self.id
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn purchase_date(&self) -> Option<NaiveDate> {
        self.purchase_date
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Total spent on this purchase.
    pub fn total_amount(&self) -> f64 {
        self.quantity * self.unit_price
    }

    fn is_live(&self) -> bool {
        self.created && !self.removed
    }
}

impl AggregateRoot for Purchase {
    type Id = PurchaseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RecordPurchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPurchase {
    pub purchase_id: PurchaseId,
    pub item_name: String,
    pub category: String,
    pub vendor: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub purchase_date: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdatePurchase (full replacement of the recorded fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePurchase {
    pub purchase_id: PurchaseId,
    pub item_name: String,
    pub category: String,
    pub vendor: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub purchase_date: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemovePurchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovePurchase {
    pub purchase_id: PurchaseId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PurchaseCommand {
    RecordPurchase(RecordPurchase),
    UpdatePurchase(UpdatePurchase),
    RemovePurchase(RemovePurchase),
}

/// Event: PurchaseRecorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecorded {
    pub purchase_id: PurchaseId,
    pub item_name: String,
    pub category: String,
    pub vendor: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_amount: f64,
    pub purchase_date: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PurchaseUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseUpdated {
    pub purchase_id: PurchaseId,
    pub item_name: String,
    pub category: String,
    pub vendor: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_amount: f64,
    pub purchase_date: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PurchaseRemoved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRemoved {
    pub purchase_id: PurchaseId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PurchaseEvent {
    PurchaseRecorded(PurchaseRecorded),
    PurchaseUpdated(PurchaseUpdated),
    PurchaseRemoved(PurchaseRemoved),
}

impl Event for PurchaseEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PurchaseEvent::PurchaseRecorded(_) => "purchasing.purchase.recorded",
            PurchaseEvent::PurchaseUpdated(_) => "purchasing.purchase.updated",
            PurchaseEvent::PurchaseRemoved(_) => "purchasing.purchase.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            PurchaseEvent::PurchaseRecorded(e) => e.occurred_at,
            PurchaseEvent::PurchaseUpdated(e) => e.occurred_at,
            PurchaseEvent::PurchaseRemoved(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Purchase {
    type Command = PurchaseCommand;
    type Event = PurchaseEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            PurchaseEvent::PurchaseRecorded(e) => {
                self.id = e.purchase_id;
                self.item_name = e.item_name.clone();
                self.category = e.category.clone();
                self.vendor = e.vendor.clone();
                self.quantity = e.quantity;
                self.unit_price = e.unit_price;
                self.purchase_date = Some(e.purchase_date);
                self.created = true;
            }
            PurchaseEvent::PurchaseUpdated(e) => {
                self.item_name = e.item_name.clone();
                self.category = e.category.clone();
                self.vendor = e.vendor.clone();
                self.quantity = e.quantity;
                self.unit_price = e.unit_price;
                self.purchase_date = Some(e.purchase_date);
            }
            PurchaseEvent::PurchaseRemoved(_) => {
                self.removed = true;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            PurchaseCommand::RecordPurchase(cmd) => self.handle_record(cmd),
            PurchaseCommand::UpdatePurchase(cmd) => self.handle_update(cmd),
            PurchaseCommand::RemovePurchase(cmd) => self.handle_remove(cmd),
        }
    }
}

impl Purchase {
    fn ensure_purchase_id(&self, purchase_id: PurchaseId) -> Result<(), DomainError> {
        if self.id != purchase_id {
            return Err(DomainError::invariant("purchase_id mismatch"));
        }
        Ok(())
    }

    fn validate_fields(
        item_name: &str,
        vendor: &str,
        quantity: f64,
        unit_price: f64,
    ) -> Result<(), DomainError> {
        if item_name.trim().is_empty() {
            return Err(DomainError::validation("item name is required"));
        }
        if vendor.trim().is_empty() {
            return Err(DomainError::validation("vendor is required"));
        }
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(DomainError::validation("unit price cannot be negative"));
        }
        Ok(())
    }

    fn handle_record(&self, cmd: &RecordPurchase) -> Result<Vec<PurchaseEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("purchase already recorded"));
        }
        Self::validate_fields(&cmd.item_name, &cmd.vendor, cmd.quantity, cmd.unit_price)?;

        Ok(vec![PurchaseEvent::PurchaseRecorded(PurchaseRecorded {
            purchase_id: cmd.purchase_id,
            item_name: cmd.item_name.clone(),
            category: cmd.category.clone(),
            vendor: cmd.vendor.clone(),
            quantity: cmd.quantity,
            unit_price: cmd.unit_price,
            total_amount: cmd.quantity * cmd.unit_price,
            purchase_date: cmd.purchase_date,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update(&self, cmd: &UpdatePurchase) -> Result<Vec<PurchaseEvent>, DomainError> {
        if !self.is_live() {
            return Err(DomainError::not_found());
        }
        self.ensure_purchase_id(cmd.purchase_id)?;
        Self::validate_fields(&cmd.item_name, &cmd.vendor, cmd.quantity, cmd.unit_price)?;

        Ok(vec![PurchaseEvent::PurchaseUpdated(PurchaseUpdated {
            purchase_id: cmd.purchase_id,
            item_name: cmd.item_name.clone(),
            category: cmd.category.clone(),
            vendor: cmd.vendor.clone(),
            quantity: cmd.quantity,
            unit_price: cmd.unit_price,
            total_amount: cmd.quantity * cmd.unit_price,
            purchase_date: cmd.purchase_date,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemovePurchase) -> Result<Vec<PurchaseEvent>, DomainError> {
        if !self.is_live() {
            return Err(DomainError::not_found());
        }
        self.ensure_purchase_id(cmd.purchase_id)?;

        Ok(vec![PurchaseEvent::PurchaseRemoved(PurchaseRemoved {
            purchase_id: cmd.purchase_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}
