use serde::{Deserialize, Serialize};

use billkit_core::{or_zero, parse_or_zero};

/// One entry in the fixed-asset register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub category: String,
    pub unit_value: f64,
    pub quantity: f64,
}

impl Asset {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        unit_value: f64,
        quantity: f64,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            unit_value: or_zero(Some(unit_value)),
            quantity: or_zero(Some(quantity)),
        }
    }

    /// Build an entry from raw form fields (zero-default numeric policy).
    pub fn from_form(name: &str, category: &str, unit_value: &str, quantity: &str) -> Self {
        Self::new(
            name,
            category,
            parse_or_zero(unit_value),
            parse_or_zero(quantity),
        )
    }

    /// Total value of this asset line.
    pub fn total_value(&self) -> f64 {
        self.unit_value * self.quantity
    }
}

/// Register-level asset statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetStats {
    pub total_items: f64,
    pub total_value: f64,
}

/// Compute statistics over an asset register.
pub fn asset_stats(assets: &[Asset]) -> AssetStats {
    AssetStats {
        total_items: assets.iter().map(|a| a.quantity).sum(),
        total_value: assets.iter().map(Asset::total_value).sum(),
    }
}
