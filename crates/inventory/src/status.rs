use serde::{Deserialize, Serialize};

/// Stock at or above this quantity counts as fully in stock.
pub const LOW_STOCK_THRESHOLD: u64 = 15;

/// Stock status, derived from the quantity on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub fn label(self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a stock quantity to its status.
///
/// `0` is out of stock, `1..15` is low, `15..` is in stock. Every mutation
/// path that changes stock goes through this; the store does not re-check.
pub fn derive_status(stock: u64) -> StockStatus {
    match stock {
        0 => StockStatus::OutOfStock,
        s if s < LOW_STOCK_THRESHOLD => StockStatus::LowStock,
        _ => StockStatus::InStock,
    }
}
