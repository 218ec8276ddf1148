//! Scrap result: stored at `scrap/result`.

use flux_derive::state;
use serde::{Deserialize, Serialize};

/// A scrap order created and confirmed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedScrap {
    pub id: i64,
    pub name: String,
    pub product_name: String,
    pub quantity: f64,
    pub uom: String,
}

/// Stock on hand after scrapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLevel {
    pub product_id: i64,
    pub product_name: String,
    pub qty_available: f64,
    pub uom: String,
    pub unit_price: f64,
    pub value: f64,
}

/// Server summary of one submission, rendered as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrapResult {
    pub scrap_count: u32,
    pub scraps: Vec<CreatedScrap>,
    /// Ordered by product id.
    pub stock_after: Vec<StockLevel>,
    /// Names of products the server skipped for lack of stock.
    pub skipped: Vec<String>,
}

#[state("scrap/result")]
#[derive(Default, Serialize, Deserialize)]
pub struct ScrapResultState {
    pub result: Option<ScrapResult>,
}
