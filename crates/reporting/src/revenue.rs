//! Revenue report read model.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use billkit_events::{EventEnvelope, Projection};
use billkit_invoicing::{InvoiceEvent, InvoiceId};

/// One line of the revenue report, one per live invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRow {
    pub number: String,
    pub invoice_date: NaiveDate,
    pub bill_to: String,
    pub taxable_amount: f64,
    /// CGST and SGST combined.
    pub gst_amount: f64,
    pub round_off: f64,
    pub total: f64,
}

/// Maintains revenue report rows from the invoice event stream.
///
/// Rows keep first-issued order. A revision rewrites the row in place; a void
/// removes it from the report entirely.
#[derive(Debug, Default)]
pub struct RevenueProjection {
    rows: Vec<(InvoiceId, InvoiceRow)>,
}

impl RevenueProjection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> impl Iterator<Item = &InvoiceRow> {
        self.rows.iter().map(|(_, row)| row)
    }

    fn position(&self, invoice_id: InvoiceId) -> Option<usize> {
        self.rows.iter().position(|(id, _)| *id == invoice_id)
    }
}

impl Projection for RevenueProjection {
    type Ev = InvoiceEvent;

    fn apply(&mut self, envelope: &EventEnvelope<InvoiceEvent>) {
        match envelope.payload() {
            InvoiceEvent::InvoiceIssued(e) => {
                let row = InvoiceRow {
                    number: e.number.to_string(),
                    invoice_date: e.invoice_date,
                    bill_to: e.bill_to.clone(),
                    taxable_amount: e.totals.taxable_amount,
                    gst_amount: e.totals.cgst_amount + e.totals.sgst_amount,
                    round_off: e.totals.round_off,
                    total: e.totals.grand_total,
                };
                match self.position(e.invoice_id) {
                    Some(idx) => self.rows[idx].1 = row,
                    None => self.rows.push((e.invoice_id, row)),
                }
            }
            InvoiceEvent::InvoiceRevised(e) => {
                if let Some(idx) = self.position(e.invoice_id) {
                    let row = &mut self.rows[idx].1;
                    row.bill_to = e.bill_to.clone();
                    row.taxable_amount = e.totals.taxable_amount;
                    row.gst_amount = e.totals.cgst_amount + e.totals.sgst_amount;
                    row.round_off = e.totals.round_off;
                    row.total = e.totals.grand_total;
                }
            }
            InvoiceEvent::InvoicePaid(_) => {}
            InvoiceEvent::InvoiceVoided(e) => {
                if let Some(idx) = self.position(e.invoice_id) {
                    self.rows.remove(idx);
                }
            }
        }
    }
}

/// Headline figures over a set of report rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub total_revenue: f64,
    pub total_invoices: usize,
    pub average_invoice: f64,
}

/// Filter rows to an inclusive date range. `None` on either side leaves that
/// side open; the end bound covers the whole end day.
pub fn in_date_range<'a>(
    rows: impl IntoIterator<Item = &'a InvoiceRow>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<&'a InvoiceRow> {
    rows.into_iter()
        .filter(|row| from.is_none_or(|f| row.invoice_date >= f))
        .filter(|row| to.is_none_or(|t| row.invoice_date <= t))
        .collect()
}

/// Summarize a set of rows. The average is zero for an empty set.
pub fn revenue_summary<'a>(rows: impl IntoIterator<Item = &'a InvoiceRow>) -> RevenueSummary {
    let mut total_revenue = 0.0;
    let mut total_invoices = 0usize;
    for row in rows {
        total_revenue += row.total;
        total_invoices += 1;
    }

    let average_invoice = if total_invoices == 0 {
        0.0
    } else {
        total_revenue / total_invoices as f64
    };

    RevenueSummary {
        total_revenue,
        total_invoices,
        average_invoice,
    }
}

/// Group revenue by calendar month, keyed `"YYYY-MM"`. The BTreeMap keeps
/// months in chronological order.
pub fn monthly_revenue<'a>(
    rows: impl IntoIterator<Item = &'a InvoiceRow>,
) -> BTreeMap<String, f64> {
    let mut months: BTreeMap<String, f64> = BTreeMap::new();
    for row in rows {
        let key = format!(
            "{:04}-{:02}",
            row.invoice_date.year(),
            row.invoice_date.month()
        );
        *months.entry(key).or_insert(0.0) += row.total;
    }
    months
}
