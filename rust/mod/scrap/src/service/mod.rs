//! The remote operations the dashboard depends on.
//!
//! Handlers only see [`ScrapService`]. Production wires
//! [`OrmScrapService`] over the JSON-RPC client; tests substitute an
//! in-memory fake.

pub mod model;
mod orm;

use async_trait::async_trait;
use openerp_rpc::RpcError;
use serde_json::Value;
use thiserror::Error;

use crate::state::{ReasonTag, ScrapResult};

pub use model::{BarcodeScan, DefaultConfig, ScannedProduct, ScrapLineInput};
pub use orm::OrmScrapService;

/// Server model exposing the dashboard methods.
pub const DASHBOARD_MODEL: &str = "scrap.dashboard";
pub const PRODUCT_MODEL: &str = "product.product";
pub const SCRAP_MODEL: &str = "stock.scrap";

#[derive(Debug, Error)]
pub enum ScrapError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The server answered but reported `success: false`.
    #[error("rejected: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
}

impl ScrapError {
    /// Message the server meant for the user, if any.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ScrapError::Rpc(e) => e.user_message(),
            ScrapError::Rejected(reason) => reason.as_deref().filter(|m| !m.trim().is_empty()),
        }
    }
}

#[async_trait]
pub trait ScrapService: Send + Sync + 'static {
    async fn default_config(&self) -> Result<DefaultConfig, ScrapError>;

    async fn reason_tags(&self) -> Result<Vec<ReasonTag>, ScrapError>;

    /// Resolve a scanned code. A code the server does not recognise is
    /// `Ok(BarcodeScan::Rejected)`, not an error.
    async fn parse_barcode(&self, barcode: &str) -> Result<BarcodeScan, ScrapError>;

    /// Create and confirm one scrap order per line.
    async fn create_scrap_orders(
        &self,
        lines: &[ScrapLineInput],
        reason_tag_ids: &[i64],
    ) -> Result<ScrapResult, ScrapError>;

    /// Window action of the quantity-on-hand wizard for one product.
    async fn inventory_adjustment_action(&self, product_id: i64) -> Result<Value, ScrapError>;
}
