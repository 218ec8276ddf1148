//! Wire shapes of the `scrap.dashboard` remote methods.
//!
//! The ERP encodes "no value" as `false`; every optional field goes
//! through [`false_as_none`].

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::state::{BarcodeKind, CreatedScrap, ScrapResult, StockLevel, Tracking};

/// Deserialize `false` and `null` as `None`.
pub fn false_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(None),
        other => serde_json::from_value(other)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DefaultConfig {
    #[serde(default, deserialize_with = "false_as_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "false_as_none")]
    pub default_scrap_reason_tag_id: Option<i64>,
}

/// A product resolved from a barcode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScannedProduct {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: f64,
    #[serde(default, deserialize_with = "false_as_none")]
    pub product_uom: Option<String>,
    #[serde(default, deserialize_with = "false_as_none")]
    pub product_uom_id: Option<i64>,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub barcode_type: BarcodeKind,
    #[serde(default, deserialize_with = "false_as_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tracking: Tracking,
    #[serde(default)]
    pub qty_available: f64,
}

/// Outcome of `parse_barcode`.
#[derive(Debug, Clone, PartialEq)]
pub enum BarcodeScan {
    Found(ScannedProduct),
    /// The server answered `success: false`, optionally saying why.
    Rejected(Option<String>),
}

#[derive(Deserialize)]
pub(crate) struct ParseBarcodeResponse {
    success: bool,
    #[serde(default, deserialize_with = "false_as_none")]
    error: Option<String>,
    #[serde(flatten)]
    rest: serde_json::Map<String, Value>,
}

impl ParseBarcodeResponse {
    pub(crate) fn into_scan(self) -> Result<BarcodeScan, serde_json::Error> {
        if !self.success {
            return Ok(BarcodeScan::Rejected(self.error));
        }
        serde_json::from_value(Value::Object(self.rest)).map(BarcodeScan::Found)
    }
}

/// One line sent to `create_scrap_orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapLineInput {
    pub product_id: i64,
    pub quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_uom_id: Option<i64>,
}

#[derive(Deserialize)]
pub(crate) struct CreateScrapResponse {
    success: bool,
    #[serde(default, deserialize_with = "false_as_none")]
    error: Option<String>,
    #[serde(default)]
    scraps: Vec<CreatedScrap>,
    #[serde(default)]
    stock_after: BTreeMap<String, StockLevel>,
    #[serde(default)]
    scrap_count: u32,
    #[serde(default)]
    skipped: Vec<String>,
}

impl CreateScrapResponse {
    /// `Err` carries the server's reason when it reported `success: false`.
    pub(crate) fn into_result(self) -> Result<ScrapResult, Option<String>> {
        if !self.success {
            return Err(self.error);
        }
        let mut stock_after: Vec<StockLevel> = self.stock_after.into_values().collect();
        stock_after.sort_by_key(|s| s.product_id);
        Ok(ScrapResult {
            scrap_count: self.scrap_count,
            scraps: self.scraps,
            stock_after,
            skipped: self.skipped,
        })
    }
}
