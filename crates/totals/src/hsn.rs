use serde::{Deserialize, Serialize};

use billkit_core::or_zero;

use crate::line::LineItem;
use crate::totals::TaxConfig;

/// Group key for line items that carry no HSN/SAC code.
pub const UNCLASSIFIED_TAX_CODE: &str = "N/A";

/// Per-tax-code aggregation printed in the document's HSN/SAC summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HsnSummaryEntry {
    pub tax_code: String,
    pub taxable: f64,
    pub cgst_rate: f64,
    pub sgst_rate: f64,
    pub cgst_amount: f64,
    pub sgst_amount: f64,
}

/// HSN/SAC tax summary: one entry per distinct code, in first-seen order so
/// a recomputed document renders its summary table reproducibly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HsnSummary {
    entries: Vec<HsnSummaryEntry>,
}

impl HsnSummary {
    pub fn entries(&self) -> &[HsnSummaryEntry] {
        &self.entries
    }

    pub fn get(&self, tax_code: &str) -> Option<&HsnSummaryEntry> {
        self.entries.iter().find(|e| e.tax_code == tax_code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Aggregate line items by tax code.
///
/// Uses the single document-level rate pair for every group (there are no
/// per-item rates). Items with an empty code land under
/// [`UNCLASSIFIED_TAX_CODE`].
pub fn hsn_summary(items: &[LineItem], tax: &TaxConfig) -> HsnSummary {
    let cgst_rate = or_zero(Some(tax.cgst_rate_percent));
    let sgst_rate = or_zero(Some(tax.sgst_rate_percent));

    let mut entries: Vec<HsnSummaryEntry> = Vec::new();

    for item in items {
        let code = if item.tax_code.trim().is_empty() {
            UNCLASSIFIED_TAX_CODE
        } else {
            item.tax_code.as_str()
        };
        let taxable = item.amount();

        let entry = match entries.iter_mut().find(|e| e.tax_code == code) {
            Some(entry) => entry,
            None => {
                entries.push(HsnSummaryEntry {
                    tax_code: code.to_string(),
                    taxable: 0.0,
                    cgst_rate,
                    sgst_rate,
                    cgst_amount: 0.0,
                    sgst_amount: 0.0,
                });
                entries.last_mut().expect("just pushed")
            }
        };

        entry.taxable += taxable;
        entry.cgst_amount += taxable * cgst_rate / 100.0;
        entry.sgst_amount += taxable * sgst_rate / 100.0;
    }

    HsnSummary { entries }
}
