//! `billkit-totals` — deterministic invoice/quotation totals engine.
//!
//! This crate is the computation core shared by every document type: given a
//! line-item list and a CGST/SGST rate pair it produces the taxable amount,
//! tax amounts, automatic round-off, grand total, an HSN/SAC tax summary, and
//! the amount-in-words renderings printed on documents.
//!
//! Everything here is a pure function over immutable inputs: no IO, no state,
//! no failure modes. Callers recompute totals in full on every input change
//! and replace the previous result wholesale; results are never patched
//! incrementally.

pub mod hsn;
pub mod line;
pub mod totals;
pub mod words;

pub use hsn::{HsnSummary, HsnSummaryEntry, UNCLASSIFIED_TAX_CODE, hsn_summary};
pub use line::LineItem;
pub use totals::{TaxConfig, TotalsResult, compute_totals, round_off};
