//! Requests available from the result view.

use flux_derive::request;

#[request("result/open-scrap")]
pub struct OpenScrapReq {
    pub scrap_id: i64,
}

#[request("result/open-product")]
pub struct OpenProductReq {
    pub product_id: i64,
}

/// Open the server's quantity-on-hand wizard for a product.
#[request("result/adjust-inventory")]
pub struct AdjustInventoryReq {
    pub product_id: i64,
}

/// Clear everything and go back to scanning.
#[request("session/new")]
pub struct NewSessionReq;
