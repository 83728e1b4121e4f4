//! Purchase receipt figures.
//!
//! Receipts carry a single flat GST rate rather than the CGST/SGST split used
//! on sales documents, and no round-off line.

use serde::{Deserialize, Serialize};

use billkit_totals::words;

/// Flat GST rate applied to purchase receipts.
pub const PURCHASE_GST_RATE_PERCENT: f64 = 18.0;

/// Figures printed on a purchase receipt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReceiptTotals {
    pub subtotal: f64,
    pub gst_amount: f64,
    pub grand_total: f64,
}

impl ReceiptTotals {
    /// Grand total spelled out in Indian-rupee words.
    pub fn amount_in_words(&self) -> String {
        words::indian_rupees(self.grand_total)
    }
}

/// Compute receipt figures for a purchase subtotal.
pub fn receipt_totals(subtotal: f64) -> ReceiptTotals {
    let gst_amount = subtotal * (PURCHASE_GST_RATE_PERCENT / 100.0);
    ReceiptTotals {
        subtotal,
        gst_amount,
        grand_total: subtotal + gst_amount,
    }
}
