//! Read models over the billing event feed.
//!
//! Reporting never stores its own truth: the dashboard and revenue views are
//! projections rebuilt from invoice/quotation events, plus register
//! statistics handed in from inventory. They produce plain values; rendering
//! (PDF, spreadsheets, UI) lives with the callers.

pub mod dashboard;
pub mod revenue;

pub use dashboard::{BillingEvent, DashboardProjection, DashboardStats};
pub use revenue::{
    InvoiceRow, RevenueProjection, RevenueSummary, in_date_range, monthly_revenue, revenue_summary,
};
