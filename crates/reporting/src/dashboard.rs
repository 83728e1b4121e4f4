//! Dashboard statistics projection.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use billkit_events::{Event, EventEnvelope, Projection};
use billkit_inventory::StockStats;
use billkit_invoicing::{InvoiceEvent, InvoiceId, QuotationEvent, QuotationId, QuotationStatus};

/// Union of the event streams the dashboard consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BillingEvent {
    Invoice(InvoiceEvent),
    Quotation(QuotationEvent),
}

impl From<InvoiceEvent> for BillingEvent {
    fn from(value: InvoiceEvent) -> Self {
        Self::Invoice(value)
    }
}

impl From<QuotationEvent> for BillingEvent {
    fn from(value: QuotationEvent) -> Self {
        Self::Quotation(value)
    }
}

impl Event for BillingEvent {
    fn event_type(&self) -> &'static str {
        match self {
            BillingEvent::Invoice(e) => e.event_type(),
            BillingEvent::Quotation(e) => e.event_type(),
        }
    }

    fn version(&self) -> u32 {
        match self {
            BillingEvent::Invoice(e) => e.version(),
            BillingEvent::Quotation(e) => e.version(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            BillingEvent::Invoice(e) => e.occurred_at(),
            BillingEvent::Quotation(e) => e.occurred_at(),
        }
    }
}

/// The four headline figures shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_invoices: usize,
    pub total_revenue: f64,
    pub pending_quotations: usize,
    pub low_stock_items: usize,
}

/// Builds dashboard figures from the billing event feed.
///
/// State is keyed per aggregate, so re-applying an event overwrites rather
/// than double-counts (idempotent per the projection contract). Void invoices
/// stay counted as documents but contribute no revenue.
#[derive(Debug, Default)]
pub struct DashboardProjection {
    invoice_totals: HashMap<InvoiceId, f64>,
    void_invoices: HashSet<InvoiceId>,
    quotation_statuses: HashMap<QuotationId, QuotationStatus>,
}

impl DashboardProjection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_invoices(&self) -> usize {
        self.invoice_totals.len()
    }

    pub fn total_revenue(&self) -> f64 {
        self.invoice_totals
            .iter()
            .filter(|(id, _)| !self.void_invoices.contains(id))
            .map(|(_, total)| total)
            .sum()
    }

    pub fn pending_quotations(&self) -> usize {
        self.quotation_statuses
            .values()
            .filter(|s| **s == QuotationStatus::Pending)
            .count()
    }

    /// Snapshot the headline figures; low stock comes from the inventory
    /// register, which is not event-sourced.
    pub fn stats(&self, stock: &StockStats) -> DashboardStats {
        DashboardStats {
            total_invoices: self.total_invoices(),
            total_revenue: self.total_revenue(),
            pending_quotations: self.pending_quotations(),
            low_stock_items: stock.low_stock_items,
        }
    }
}

impl Projection for DashboardProjection {
    type Ev = BillingEvent;

    fn apply(&mut self, envelope: &EventEnvelope<BillingEvent>) {
        match envelope.payload() {
            BillingEvent::Invoice(event) => match event {
                InvoiceEvent::InvoiceIssued(e) => {
                    self.invoice_totals
                        .insert(e.invoice_id, e.totals.grand_total);
                }
                InvoiceEvent::InvoiceRevised(e) => {
                    self.invoice_totals
                        .insert(e.invoice_id, e.totals.grand_total);
                }
                InvoiceEvent::InvoicePaid(_) => {}
                InvoiceEvent::InvoiceVoided(e) => {
                    self.void_invoices.insert(e.invoice_id);
                }
            },
            BillingEvent::Quotation(event) => match event {
                QuotationEvent::QuotationIssued(e) => {
                    self.quotation_statuses
                        .insert(e.quotation_id, QuotationStatus::Pending);
                }
                QuotationEvent::QuotationRevised(_) => {}
                QuotationEvent::QuotationApproved(e) => {
                    self.quotation_statuses
                        .insert(e.quotation_id, QuotationStatus::Approved);
                }
                QuotationEvent::QuotationRejected(e) => {
                    self.quotation_statuses
                        .insert(e.quotation_id, QuotationStatus::Rejected);
                }
            },
        }
    }
}
