//! Barcode scrap dashboard.
//!
//! A headless controller for the ERP's scrap screen: scan products,
//! adjust quantities, pick a reason and submit scrap orders. All state
//! lives in a [`Flux`](openerp_flux::Flux) store; hosts emit requests and
//! render what changes.
//!
//! Structure:
//! - `dsl/state/`: state types, one per path
//! - `dsl/request/`: request payloads, one per path
//! - `src/handlers/`: request handlers and their wiring
//! - `src/service/`: the remote `scrap.dashboard` contract

// State types: flat access as `crate::state::*`.
#[path = "../dsl/state/mod.rs"]
pub mod state;

// Request types: flat access as `crate::request::*`.
#[path = "../dsl/request/mod.rs"]
pub mod request;

pub mod format;
pub mod handlers;
pub mod i18n_strings;
mod lines;
pub mod service;
pub mod sound;

pub use handlers::{register_handlers, ScrapBff};
pub use service::{OrmScrapService, ScrapError, ScrapService};
pub use sound::{Silent, SoundCue, SoundPlayer};
