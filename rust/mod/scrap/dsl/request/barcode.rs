//! Barcode field requests.

use flux_derive::request;

/// The barcode field's text changed.
#[request("barcode/input")]
pub struct BarcodeInputReq {
    pub value: String,
}

/// Enter pressed in the barcode field.
#[request("barcode/submit")]
pub struct SubmitBarcodeReq;
