//! Stock and asset registers.
//!
//! Plain in-memory registers with derived statistics. Register entries are
//! not event-sourced: the backing store owns their lifecycle, this crate owns
//! the arithmetic over them.

pub mod asset;
pub mod stock;

pub use asset::{Asset, AssetStats, asset_stats};
pub use stock::{LOW_STOCK_THRESHOLD, StockItem, StockStats, stock_stats};
