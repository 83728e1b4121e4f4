use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use billkit_core::{Aggregate, AggregateId, AggregateRoot, DomainError};
use billkit_events::Event;
use billkit_totals::{LineItem, TaxConfig, TotalsResult, compute_totals};

use crate::number::DocumentNumber;

/// Quotation identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuotationId(pub AggregateId);

impl QuotationId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for QuotationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Quotation status lifecycle. A quotation starts pending and is settled
/// exactly once, either approved or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    Pending,
    Approved,
    Rejected,
}

/// Aggregate root: Quotation.
///
/// Shares the totals engine with invoices; a quotation's figures are computed
/// identically, only the document lifecycle differs.
#[derive(Debug, Clone, PartialEq)]
pub struct Quotation {
    id: QuotationId,
    number: Option<DocumentNumber>,
    quote_to: String,
    quotation_date: Option<NaiveDate>,
    valid_until: Option<NaiveDate>,
    status: QuotationStatus,
    items: Vec<LineItem>,
    tax: TaxConfig,
    totals: TotalsResult,
    version: u64,
    created: bool,
}

impl Quotation {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: QuotationId) -> Self {
        Self {
            id,
            number: None,
            quote_to: String::new(),
            quotation_date: None,
            valid_until: None,
            status: QuotationStatus::Pending,
            items: Vec::new(),
            tax: TaxConfig::new(0.0, 0.0),
            totals: TotalsResult::zero(),
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> QuotationId {
        self.id
    }

    pub fn number(&self) -> Option<DocumentNumber> {
        self.number
    }

    pub fn quote_to(&self) -> &str {
        &self.quote_to
    }

    pub fn quotation_date(&self) -> Option<NaiveDate> {
        self.quotation_date
    }

    pub fn valid_until(&self) -> Option<NaiveDate> {
        self.valid_until
    }

    pub fn status(&self) -> QuotationStatus {
        self.status
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn tax(&self) -> TaxConfig {
        self.tax
    }

    pub fn totals(&self) -> TotalsResult {
        self.totals
    }

    /// Invariant: only a pending quotation may be revised or settled.
    pub fn is_pending(&self) -> bool {
        self.created && self.status == QuotationStatus::Pending
    }
}

impl AggregateRoot for Quotation {
    type Id = QuotationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: IssueQuotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueQuotation {
    pub quotation_id: QuotationId,
    pub number: DocumentNumber,
    pub quote_to: String,
    pub quotation_date: NaiveDate,
    pub valid_until: NaiveDate,
    pub items: Vec<LineItem>,
    pub tax: TaxConfig,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReviseQuotation (pending only; totals recomputed in full).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviseQuotation {
    pub quotation_id: QuotationId,
    pub quote_to: String,
    pub valid_until: NaiveDate,
    pub items: Vec<LineItem>,
    pub tax: TaxConfig,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ApproveQuotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproveQuotation {
    pub quotation_id: QuotationId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RejectQuotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectQuotation {
    pub quotation_id: QuotationId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuotationCommand {
    IssueQuotation(IssueQuotation),
    ReviseQuotation(ReviseQuotation),
    ApproveQuotation(ApproveQuotation),
    RejectQuotation(RejectQuotation),
}

/// Event: QuotationIssued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationIssued {
    pub quotation_id: QuotationId,
    pub number: DocumentNumber,
    pub quote_to: String,
    pub quotation_date: NaiveDate,
    pub valid_until: NaiveDate,
    pub items: Vec<LineItem>,
    pub tax: TaxConfig,
    pub totals: TotalsResult,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuotationRevised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationRevised {
    pub quotation_id: QuotationId,
    pub quote_to: String,
    pub valid_until: NaiveDate,
    pub items: Vec<LineItem>,
    pub tax: TaxConfig,
    pub totals: TotalsResult,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuotationApproved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationApproved {
    pub quotation_id: QuotationId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuotationRejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationRejected {
    pub quotation_id: QuotationId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuotationEvent {
    QuotationIssued(QuotationIssued),
    QuotationRevised(QuotationRevised),
    QuotationApproved(QuotationApproved),
    QuotationRejected(QuotationRejected),
}

impl Event for QuotationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            QuotationEvent::QuotationIssued(_) => "invoicing.quotation.issued",
            QuotationEvent::QuotationRevised(_) => "invoicing.quotation.revised",
            QuotationEvent::QuotationApproved(_) => "invoicing.quotation.approved",
            QuotationEvent::QuotationRejected(_) => "invoicing.quotation.rejected",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            QuotationEvent::QuotationIssued(e) => e.occurred_at,
            QuotationEvent::QuotationRevised(e) => e.occurred_at,
            QuotationEvent::QuotationApproved(e) => e.occurred_at,
            QuotationEvent::QuotationRejected(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Quotation {
    type Command = QuotationCommand;
    type Event = QuotationEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            QuotationEvent::QuotationIssued(e) => {
                self.id = e.quotation_id;
                self.number = Some(e.number);
                self.quote_to = e.quote_to.clone();
                self.quotation_date = Some(e.quotation_date);
                self.valid_until = Some(e.valid_until);
                self.items = e.items.clone();
                self.tax = e.tax;
                self.totals = e.totals;
                self.status = QuotationStatus::Pending;
                self.created = true;
            }
            QuotationEvent::QuotationRevised(e) => {
                self.quote_to = e.quote_to.clone();
                self.valid_until = Some(e.valid_until);
                self.items = e.items.clone();
                self.tax = e.tax;
                self.totals = e.totals;
            }
            QuotationEvent::QuotationApproved(_) => {
                self.status = QuotationStatus::Approved;
            }
            QuotationEvent::QuotationRejected(_) => {
                self.status = QuotationStatus::Rejected;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            QuotationCommand::IssueQuotation(cmd) => self.handle_issue(cmd),
            QuotationCommand::ReviseQuotation(cmd) => self.handle_revise(cmd),
            QuotationCommand::ApproveQuotation(cmd) => self.handle_approve(cmd),
            QuotationCommand::RejectQuotation(cmd) => self.handle_reject(cmd),
        }
    }
}

impl Quotation {
    fn ensure_quotation_id(&self, quotation_id: QuotationId) -> Result<(), DomainError> {
        if self.id != quotation_id {
            return Err(DomainError::invariant("quotation_id mismatch"));
        }
        Ok(())
    }

    fn ensure_pending(&self) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        if self.status != QuotationStatus::Pending {
            return Err(DomainError::invariant(
                "quotation is already approved or rejected",
            ));
        }
        Ok(())
    }

    fn handle_issue(&self, cmd: &IssueQuotation) -> Result<Vec<QuotationEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("quotation already exists"));
        }

        if cmd.items.is_empty() {
            return Err(DomainError::validation(
                "cannot issue quotation without line items",
            ));
        }

        if cmd.valid_until < cmd.quotation_date {
            return Err(DomainError::validation(
                "quotation validity cannot end before its issue date",
            ));
        }

        let totals = compute_totals(&cmd.items, &cmd.tax);

        Ok(vec![QuotationEvent::QuotationIssued(QuotationIssued {
            quotation_id: cmd.quotation_id,
            number: cmd.number,
            quote_to: cmd.quote_to.clone(),
            quotation_date: cmd.quotation_date,
            valid_until: cmd.valid_until,
            items: cmd.items.clone(),
            tax: cmd.tax,
            totals,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_revise(&self, cmd: &ReviseQuotation) -> Result<Vec<QuotationEvent>, DomainError> {
        self.ensure_pending()?;
        self.ensure_quotation_id(cmd.quotation_id)?;

        if cmd.items.is_empty() {
            return Err(DomainError::validation(
                "cannot revise quotation to zero line items",
            ));
        }

        let totals = compute_totals(&cmd.items, &cmd.tax);

        Ok(vec![QuotationEvent::QuotationRevised(QuotationRevised {
            quotation_id: cmd.quotation_id,
            quote_to: cmd.quote_to.clone(),
            valid_until: cmd.valid_until,
            items: cmd.items.clone(),
            tax: cmd.tax,
            totals,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_approve(&self, cmd: &ApproveQuotation) -> Result<Vec<QuotationEvent>, DomainError> {
        self.ensure_pending()?;
        self.ensure_quotation_id(cmd.quotation_id)?;

        Ok(vec![QuotationEvent::QuotationApproved(QuotationApproved {
            quotation_id: cmd.quotation_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_reject(&self, cmd: &RejectQuotation) -> Result<Vec<QuotationEvent>, DomainError> {
        self.ensure_pending()?;
        self.ensure_quotation_id(cmd.quotation_id)?;

        Ok(vec![QuotationEvent::QuotationRejected(QuotationRejected {
            quotation_id: cmd.quotation_id,
            reason: cmd.reason.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}
