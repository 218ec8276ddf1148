//! Dashboard lifecycle requests.

use flux_derive::request;

/// Load configuration and reason tags, then start scanning.
#[request("dashboard/initialize")]
pub struct InitializeReq;

/// Tear down: drop all dashboard state and stop reacting to keys.
#[request("dashboard/close")]
pub struct CloseReq;

/// Where a key press landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    /// An editable field (input or textarea); left alone.
    TextField,
    Other,
}

/// A key press anywhere in the view.
#[request("dashboard/key-down")]
pub struct KeyDownReq {
    pub target: KeyTarget,
}
