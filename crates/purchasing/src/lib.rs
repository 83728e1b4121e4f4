//! Purchasing domain module (event-sourced).
//!
//! Records purchases made from vendors and prints purchase receipts. Unlike
//! sales documents, purchases carry a single flat GST rate on the receipt
//! rather than configurable CGST/SGST components.

pub mod purchase;
pub mod receipt;

pub use purchase::{
    Purchase, PurchaseCommand, PurchaseEvent, PurchaseId, PurchaseRecorded, PurchaseRemoved,
    PurchaseUpdated, RecordPurchase, RemovePurchase, UpdatePurchase,
};
pub use receipt::{PURCHASE_GST_RATE_PERCENT, ReceiptTotals, receipt_totals};
