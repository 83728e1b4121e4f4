//! Invoicing domain module (event-sourced).
//!
//! This crate contains business rules for invoices and quotations,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage). Document totals are never stored incrementally: every issue or
//! revision recomputes them in full through `billkit-totals`.

pub mod invoice;
pub mod number;
pub mod quotation;

pub use invoice::{
    Invoice, InvoiceCommand, InvoiceEvent, InvoiceId, InvoiceIssued, InvoicePaid, InvoiceRevised,
    InvoiceStatus, InvoiceVoided, IssueInvoice, MarkInvoicePaid, ReviseInvoice, VoidInvoice,
};
pub use number::{DocumentKind, DocumentNumber};
pub use quotation::{
    ApproveQuotation, IssueQuotation, Quotation, QuotationApproved, QuotationCommand,
    QuotationEvent, QuotationId, QuotationIssued, QuotationRejected, QuotationRevised,
    QuotationStatus, RejectQuotation, ReviseQuotation,
};
