//! Submission requests.

use flux_derive::request;

/// Ask to scrap the current lines; opens the confirmation prompt.
#[request("scrap/request")]
pub struct RequestScrapReq;

#[request("scrap/cancel")]
pub struct CancelScrapReq;

/// Send the lines to the server.
#[request("scrap/confirm")]
pub struct ConfirmScrapReq;
