use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use billkit_core::{Aggregate, AggregateId, AggregateRoot, DomainError};
use billkit_events::Event;
use billkit_totals::{LineItem, TaxConfig, TotalsResult, compute_totals};

use crate::number::DocumentNumber;

/// Invoice identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub AggregateId);

impl InvoiceId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Invoice status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Issued,
    Paid,
    Void,
}

/// Aggregate root: Invoice.
///
/// Totals are always the engine's output for the current lines and rates.
/// They are replaced wholesale on issue and on every revision, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    id: InvoiceId,
    number: Option<DocumentNumber>,
    bill_to: String,
    invoice_date: Option<NaiveDate>,
    status: InvoiceStatus,
    items: Vec<LineItem>,
    tax: TaxConfig,
    totals: TotalsResult,
    version: u64,
    created: bool,
}

impl Invoice {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: InvoiceId) -> Self {
        Self {
            id,
            number: None,
            bill_to: String::new(),
            invoice_date: None,
            status: InvoiceStatus::Issued,
            items: Vec::new(),
            tax: TaxConfig::new(0.0, 0.0),
            totals: TotalsResult::zero(),
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> InvoiceId {
        self.id
    }

    pub fn number(&self) -> Option<DocumentNumber> {
        self.number
    }

    pub fn bill_to(&self) -> &str {
        &self.bill_to
    }

    pub fn invoice_date(&self) -> Option<NaiveDate> {
        self.invoice_date
    }

    pub fn status(&self) -> InvoiceStatus {
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

    /// Invariant: only an issued (not paid, not void) invoice may change.
    pub fn can_be_revised(&self) -> bool {
        self.created && self.status == InvoiceStatus::Issued
    }
}

impl AggregateRoot for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: IssueInvoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueInvoice {
    pub invoice_id: InvoiceId,
    pub number: DocumentNumber,
    pub bill_to: String,
    pub invoice_date: NaiveDate,
    pub items: Vec<LineItem>,
    pub tax: TaxConfig,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReviseInvoice (replace lines/rates, totals recomputed in full).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviseInvoice {
    pub invoice_id: InvoiceId,
    pub bill_to: String,
    pub items: Vec<LineItem>,
    pub tax: TaxConfig,
    pub occurred_at: DateTime<Utc>,
}

/// Command: MarkInvoicePaid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkInvoicePaid {
    pub invoice_id: InvoiceId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: VoidInvoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoidInvoice {
    pub invoice_id: InvoiceId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InvoiceCommand {
    IssueInvoice(IssueInvoice),
    ReviseInvoice(ReviseInvoice),
    MarkInvoicePaid(MarkInvoicePaid),
    VoidInvoice(VoidInvoice),
}

/// Event: InvoiceIssued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceIssued {
    pub invoice_id: InvoiceId,
    pub number: DocumentNumber,
    pub bill_to: String,
    pub invoice_date: NaiveDate,
    pub items: Vec<LineItem>,
    pub tax: TaxConfig,
    pub totals: TotalsResult,
    pub occurred_at: DateTime<Utc>,
}

/// Event: InvoiceRevised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRevised {
    pub invoice_id: InvoiceId,
    pub bill_to: String,
    pub items: Vec<LineItem>,
    pub tax: TaxConfig,
    pub totals: TotalsResult,
    pub occurred_at: DateTime<Utc>,
}

/// Event: InvoicePaid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePaid {
    pub invoice_id: InvoiceId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: InvoiceVoided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceVoided {
    pub invoice_id: InvoiceId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InvoiceEvent {
    InvoiceIssued(InvoiceIssued),
    InvoiceRevised(InvoiceRevised),
    InvoicePaid(InvoicePaid),
    InvoiceVoided(InvoiceVoided),
}

impl Event for InvoiceEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InvoiceEvent::InvoiceIssued(_) => "invoicing.invoice.issued",
            InvoiceEvent::InvoiceRevised(_) => "invoicing.invoice.revised",
            InvoiceEvent::InvoicePaid(_) => "invoicing.invoice.paid",
            InvoiceEvent::InvoiceVoided(_) => "invoicing.invoice.voided",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InvoiceEvent::InvoiceIssued(e) => e.occurred_at,
            InvoiceEvent::InvoiceRevised(e) => e.occurred_at,
            InvoiceEvent::InvoicePaid(e) => e.occurred_at,
            InvoiceEvent::InvoiceVoided(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Invoice {
    type Command = InvoiceCommand;
    type Event = InvoiceEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InvoiceEvent::InvoiceIssued(e) => {
                self.id = e.invoice_id;
                self.number = Some(e.number);
                self.bill_to = e.bill_to.clone();
                self.invoice_date = Some(e.invoice_date);
                self.items = e.items.clone();
                self.tax = e.tax;
                self.totals = e.totals;
                self.status = InvoiceStatus::Issued;
                self.created = true;
            }
            InvoiceEvent::InvoiceRevised(e) => {
                self.bill_to = e.bill_to.clone();
                self.items = e.items.clone();
                self.tax = e.tax;
                self.totals = e.totals;
            }
            InvoiceEvent::InvoicePaid(_) => {
                self.status = InvoiceStatus::Paid;
            }
            InvoiceEvent::InvoiceVoided(_) => {
                self.status = InvoiceStatus::Void;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InvoiceCommand::IssueInvoice(cmd) => self.handle_issue(cmd),
            InvoiceCommand::ReviseInvoice(cmd) => self.handle_revise(cmd),
            InvoiceCommand::MarkInvoicePaid(cmd) => self.handle_mark_paid(cmd),
            InvoiceCommand::VoidInvoice(cmd) => self.handle_void(cmd),
        }
    }
}

impl Invoice {
    fn ensure_invoice_id(&self, invoice_id: InvoiceId) -> Result<(), DomainError> {
        if self.id != invoice_id {
            return Err(DomainError::invariant("invoice_id mismatch"));
        }
        Ok(())
    }

    fn handle_issue(&self, cmd: &IssueInvoice) -> Result<Vec<InvoiceEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("invoice already exists"));
        }

        if cmd.items.is_empty() {
            return Err(DomainError::validation(
                "cannot issue invoice without line items",
            ));
        }

        let totals = compute_totals(&cmd.items, &cmd.tax);

        Ok(vec![InvoiceEvent::InvoiceIssued(InvoiceIssued {
            invoice_id: cmd.invoice_id,
            number: cmd.number,
            bill_to: cmd.bill_to.clone(),
            invoice_date: cmd.invoice_date,
            items: cmd.items.clone(),
            tax: cmd.tax,
            totals,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_revise(&self, cmd: &ReviseInvoice) -> Result<Vec<InvoiceEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_invoice_id(cmd.invoice_id)?;

        if !self.can_be_revised() {
            return Err(DomainError::invariant(
                "cannot revise a paid or void invoice",
            ));
        }

        if cmd.items.is_empty() {
            return Err(DomainError::validation(
                "cannot revise invoice to zero line items",
            ));
        }

        let totals = compute_totals(&cmd.items, &cmd.tax);

        Ok(vec![InvoiceEvent::InvoiceRevised(InvoiceRevised {
            invoice_id: cmd.invoice_id,
            bill_to: cmd.bill_to.clone(),
            items: cmd.items.clone(),
            tax: cmd.tax,
            totals,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_mark_paid(&self, cmd: &MarkInvoicePaid) -> Result<Vec<InvoiceEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_invoice_id(cmd.invoice_id)?;

        match self.status {
            InvoiceStatus::Issued => Ok(vec![InvoiceEvent::InvoicePaid(InvoicePaid {
                invoice_id: cmd.invoice_id,
                occurred_at: cmd.occurred_at,
            })]),
            InvoiceStatus::Paid => Err(DomainError::conflict("invoice is already paid")),
            InvoiceStatus::Void => Err(DomainError::invariant("cannot pay a void invoice")),
        }
    }

    fn handle_void(&self, cmd: &VoidInvoice) -> Result<Vec<InvoiceEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_invoice_id(cmd.invoice_id)?;

        if self.status == InvoiceStatus::Void {
            return Err(DomainError::conflict("invoice is already void"));
        }

        Ok(vec![InvoiceEvent::InvoiceVoided(InvoiceVoided {
            invoice_id: cmd.invoice_id,
            reason: cmd.reason.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::DocumentKind;
    use proptest::prelude::*;

    fn test_invoice_id() -> InvoiceId {
        InvoiceId::new(AggregateId::new())
    }

    fn test_number() -> DocumentNumber {
        DocumentNumber::new(DocumentKind::Invoice, 1)
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 5).unwrap()
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn discounted_line() -> LineItem {
        LineItem::new("Network switch", "8517", 2.0, 500.0, 10.0)
    }

    fn issue_cmd(invoice_id: InvoiceId) -> IssueInvoice {
        IssueInvoice {
            invoice_id,
            number: test_number(),
            bill_to: "Acme Traders\nPune".to_string(),
            invoice_date: test_date(),
            items: vec![discounted_line()],
            tax: TaxConfig::new(9.0, 9.0),
            occurred_at: test_time(),
        }
    }

    #[test]
    fn issue_invoice_computes_totals_through_the_engine() {
        let invoice_id = test_invoice_id();
        let invoice = Invoice::empty(invoice_id);

        let events = invoice
            .handle(&InvoiceCommand::IssueInvoice(issue_cmd(invoice_id)))
            .unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            InvoiceEvent::InvoiceIssued(e) => {
                assert_eq!(e.number.to_string(), "INV-0001");
                assert_eq!(e.totals.taxable_amount, 900.0);
                assert_eq!(e.totals.cgst_amount, 81.0);
                assert_eq!(e.totals.sgst_amount, 81.0);
                assert_eq!(e.totals.grand_total, 1062.0);
            }
            _ => panic!("Expected InvoiceIssued event"),
        }
    }

    #[test]
    fn cannot_issue_without_lines_or_twice() {
        let invoice_id = test_invoice_id();
        let mut invoice = Invoice::empty(invoice_id);

        let mut cmd = issue_cmd(invoice_id);
        cmd.items.clear();
        let err = invoice
            .handle(&InvoiceCommand::IssueInvoice(cmd))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let events = invoice
            .handle(&InvoiceCommand::IssueInvoice(issue_cmd(invoice_id)))
            .unwrap();
        invoice.apply(&events[0]);

        let err = invoice
            .handle(&InvoiceCommand::IssueInvoice(issue_cmd(invoice_id)))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn revision_replaces_totals_wholesale() {
        let invoice_id = test_invoice_id();
        let mut invoice = Invoice::empty(invoice_id);

        let events = invoice
            .handle(&InvoiceCommand::IssueInvoice(issue_cmd(invoice_id)))
            .unwrap();
        invoice.apply(&events[0]);
        assert_eq!(invoice.totals().grand_total, 1062.0);

        let new_items = vec![LineItem::new("Patch panel", "8517", 1.0, 250.0, 0.0)];
        let new_tax = TaxConfig::new(6.0, 6.0);
        let cmd = ReviseInvoice {
            invoice_id,
            bill_to: invoice.bill_to().to_string(),
            items: new_items.clone(),
            tax: new_tax,
            occurred_at: test_time(),
        };
        let events = invoice
            .handle(&InvoiceCommand::ReviseInvoice(cmd))
            .unwrap();
        invoice.apply(&events[0]);

        // Totals are exactly what a fresh computation yields, nothing carried over.
        assert_eq!(invoice.totals(), compute_totals(&new_items, &new_tax));
        assert_eq!(invoice.totals().grand_total, 280.0);
        assert_eq!(invoice.version(), 2);
    }

    #[test]
    fn cannot_revise_or_pay_a_void_invoice() {
        let invoice_id = test_invoice_id();
        let mut invoice = Invoice::empty(invoice_id);

        let events = invoice
            .handle(&InvoiceCommand::IssueInvoice(issue_cmd(invoice_id)))
            .unwrap();
        invoice.apply(&events[0]);

        let events = invoice
            .handle(&InvoiceCommand::VoidInvoice(VoidInvoice {
                invoice_id,
                reason: Some("Customer dispute".to_string()),
                occurred_at: test_time(),
            }))
            .unwrap();
        invoice.apply(&events[0]);
        assert_eq!(invoice.status(), InvoiceStatus::Void);

        let err = invoice
            .handle(&InvoiceCommand::ReviseInvoice(ReviseInvoice {
                invoice_id,
                bill_to: String::new(),
                items: vec![discounted_line()],
                tax: TaxConfig::new(9.0, 9.0),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));

        let err = invoice
            .handle(&InvoiceCommand::MarkInvoicePaid(MarkInvoicePaid {
                invoice_id,
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn paid_invoice_cannot_be_revised() {
        let invoice_id = test_invoice_id();
        let mut invoice = Invoice::empty(invoice_id);

        let events = invoice
            .handle(&InvoiceCommand::IssueInvoice(issue_cmd(invoice_id)))
            .unwrap();
        invoice.apply(&events[0]);

        let events = invoice
            .handle(&InvoiceCommand::MarkInvoicePaid(MarkInvoicePaid {
                invoice_id,
                occurred_at: test_time(),
            }))
            .unwrap();
        invoice.apply(&events[0]);
        assert_eq!(invoice.status(), InvoiceStatus::Paid);

        let err = invoice
            .handle(&InvoiceCommand::ReviseInvoice(ReviseInvoice {
                invoice_id,
                bill_to: String::new(),
                items: vec![discounted_line()],
                tax: TaxConfig::new(9.0, 9.0),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: issued totals always satisfy the engine's identity.
        #[test]
        fn issued_totals_satisfy_engine_identity(
            lines in prop::collection::vec(
                (0.0f64..100.0, 0.0f64..1000.0, 0.0f64..100.0),
                1..8,
            ),
            cgst in 0.0f64..28.0,
            sgst in 0.0f64..28.0,
        ) {
            let invoice_id = test_invoice_id();
            let invoice = Invoice::empty(invoice_id);
            let cmd = IssueInvoice {
                invoice_id,
                number: test_number(),
                bill_to: "x".to_string(),
                invoice_date: test_date(),
                items: lines
                    .into_iter()
                    .map(|(q, p, d)| LineItem::new("p", "code", q, p, d))
                    .collect(),
                tax: TaxConfig::new(cgst, sgst),
                occurred_at: test_time(),
            };

            let events = invoice.handle(&InvoiceCommand::IssueInvoice(cmd)).unwrap();
            let totals = match &events[0] {
                InvoiceEvent::InvoiceIssued(e) => e.totals,
                _ => unreachable!(),
            };

            let recomposed = totals.taxable_amount
                + totals.cgst_amount
                + totals.sgst_amount
                + totals.round_off;
            prop_assert!((totals.grand_total - recomposed).abs() < 1e-6);
            prop_assert!((totals.grand_total - totals.grand_total.round()).abs() < 1e-9);
        }
    }
}
