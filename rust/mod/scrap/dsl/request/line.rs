//! Line editing and reason selection.

use flux_derive::request;

/// Manual quantity edit. Hosts pass `f64::NAN` for unparsable input.
#[request("line/set-quantity")]
pub struct SetQuantityReq {
    pub index: usize,
    pub value: f64,
}

#[request("line/increment")]
pub struct IncrementLineReq {
    pub index: usize,
}

/// Decrement by one; a line at quantity 1 or less is removed instead.
#[request("line/decrement")]
pub struct DecrementLineReq {
    pub index: usize,
}

/// Scrap everything on hand for the line's product.
#[request("line/scrap-all")]
pub struct ScrapAllLineReq {
    pub index: usize,
}

#[request("line/remove")]
pub struct RemoveLineReq {
    pub index: usize,
}

/// `None` or a non-positive id clears the selection.
#[request("reason/select")]
pub struct SelectReasonReq {
    pub tag_id: Option<i64>,
}
