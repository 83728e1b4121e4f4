use serde::{Deserialize, Serialize};

use billkit_core::{or_zero, parse_or_zero};

/// One billable line of a document (invoice, quotation).
///
/// Quantities, prices and discounts are whatever the operator typed; values
/// that failed numeric parsing have already been collapsed to zero by the
/// constructors. Derived figures (subtotal, discount, line amount) are never
/// stored; they are recomputed from these fields on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    /// HSN/SAC classification code, free text. Empty means "not classified"
    /// and is grouped under [`crate::UNCLASSIFIED_TAX_CODE`] in summaries.
    pub tax_code: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// Percentage discount on the line subtotal, nominally 0–100 (the engine
    /// accepts any value; only the entry form bounds it).
    pub discount_percent: f64,
}

impl LineItem {
    /// Build a line item from already-numeric values.
    ///
    /// Non-finite values collapse to zero, same as unparseable form input.
    pub fn new(
        description: impl Into<String>,
        tax_code: impl Into<String>,
        quantity: f64,
        unit_price: f64,
        discount_percent: f64,
    ) -> Self {
        Self {
            description: description.into(),
            tax_code: tax_code.into(),
            quantity: or_zero(Some(quantity)),
            unit_price: or_zero(Some(unit_price)),
            discount_percent: or_zero(Some(discount_percent)),
        }
    }

    /// Build a line item from raw form fields.
    ///
    /// Numeric fields go through the zero-default policy: empty or
    /// unparseable input contributes zero, never an error.
    pub fn from_form(
        description: &str,
        tax_code: &str,
        quantity: &str,
        unit_price: &str,
        discount_percent: &str,
    ) -> Self {
        Self::new(
            description,
            tax_code,
            parse_or_zero(quantity),
            parse_or_zero(unit_price),
            parse_or_zero(discount_percent),
        )
    }

    /// Line amount after discount: `qty * price - qty * price * disc / 100`.
    pub fn amount(&self) -> f64 {
        let subtotal = or_zero(Some(self.quantity)) * or_zero(Some(self.unit_price));
        let discount = subtotal * or_zero(Some(self.discount_percent)) / 100.0;
        subtotal - discount
    }
}
