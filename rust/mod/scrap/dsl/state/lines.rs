//! Scrap lines: stored at `scrap/lines`.

use flux_derive::state;
use serde::{Deserialize, Serialize};

/// How the scanned code carried its quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarcodeKind {
    /// Weight embedded in the code.
    Weight,
    /// One piece per scan.
    #[default]
    Unit,
    #[serde(other)]
    Other,
}

/// Product tracking mode as reported by the ERP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tracking {
    #[default]
    None,
    Lot,
    Serial,
    #[serde(other)]
    Other,
}

/// One product to scrap. Unique by `product_id` within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapLine {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: f64,
    pub uom: String,
    pub product_uom_id: Option<i64>,
    pub unit_price: f64,
    pub barcode_type: BarcodeKind,
    pub image_url: Option<String>,
    pub tracking: Tracking,
    /// Stock on hand when the product was first scanned.
    pub qty_available: f64,
}

impl ScrapLine {
    /// Upper bound for `quantity`. Negative stock counts as none.
    pub fn cap(&self) -> f64 {
        self.qty_available.max(0.0)
    }

    pub fn value(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Lines in scan order.
#[state("scrap/lines")]
#[derive(Default, Serialize, Deserialize)]
pub struct ScrapLines {
    pub items: Vec<ScrapLine>,
}

impl ScrapLines {
    /// Sum of quantity × unit price.
    pub fn total_value(&self) -> f64 {
        self.items.iter().map(ScrapLine::value).sum()
    }

    /// Number of distinct products.
    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn has_lines(&self) -> bool {
        !self.items.is_empty()
    }
}
