use serde::{Deserialize, Serialize};

use billkit_core::{or_zero, parse_or_zero};

/// A stock level below this is flagged on the dashboard.
pub const LOW_STOCK_THRESHOLD: f64 = 10.0;

/// One entry in the stock register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub product_name: String,
    pub product_code: String,
    pub unit_price: f64,
    pub quantity: f64,
}

impl StockItem {
    pub fn new(
        product_name: impl Into<String>,
        product_code: impl Into<String>,
        unit_price: f64,
        quantity: f64,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            product_code: product_code.into(),
            unit_price: or_zero(Some(unit_price)),
            quantity: or_zero(Some(quantity)),
        }
    }

    /// Build an entry from raw form fields (zero-default numeric policy).
    pub fn from_form(
        product_name: &str,
        product_code: &str,
        unit_price: &str,
        quantity: &str,
    ) -> Self {
        Self::new(
            product_name,
            product_code,
            parse_or_zero(unit_price),
            parse_or_zero(quantity),
        )
    }

    /// Value held in stock for this entry.
    pub fn stock_value(&self) -> f64 {
        self.unit_price * self.quantity
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }
}

/// Register-level stock statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockStats {
    pub total_units: f64,
    pub total_value: f64,
    pub low_stock_items: usize,
}

/// Compute statistics over a stock register.
pub fn stock_stats(items: &[StockItem]) -> StockStats {
    StockStats {
        total_units: items.iter().map(|i| i.quantity).sum(),
        total_value: items.iter().map(StockItem::stock_value).sum(),
        low_stock_items: items.iter().filter(|i| i.is_low_stock()).count(),
    }
}
