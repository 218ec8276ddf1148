//! Dashboard request definitions.
//!
//! Each struct is a typed payload with a `PATH` const. Hosts emit them;
//! `register_handlers` routes each path to its handler.

pub mod barcode;
pub mod dashboard;
pub mod line;
pub mod result;
pub mod scrap;
pub mod ui;

pub use barcode::{BarcodeInputReq, SubmitBarcodeReq};
pub use dashboard::{CloseReq, InitializeReq, KeyDownReq, KeyTarget};
pub use line::{
    DecrementLineReq, IncrementLineReq, RemoveLineReq, ScrapAllLineReq, SelectReasonReq,
    SetQuantityReq,
};
pub use result::{AdjustInventoryReq, NewSessionReq, OpenProductReq, OpenScrapReq};
pub use scrap::{CancelScrapReq, ConfirmScrapReq, RequestScrapReq};
pub use ui::DismissNoticeReq;
