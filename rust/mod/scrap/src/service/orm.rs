use std::sync::Arc;

use async_trait::async_trait;
use openerp_rpc::{call_typed, OrmCall, RpcError};
use serde_json::{json, Value};
use tracing::debug;

use super::model::{CreateScrapResponse, ParseBarcodeResponse};
use super::{
    BarcodeScan, DefaultConfig, ScrapError, ScrapLineInput, ScrapService, DASHBOARD_MODEL,
    PRODUCT_MODEL,
};
use crate::state::{ReasonTag, ScrapResult};

/// [`ScrapService`] over any [`OrmCall`] transport.
pub struct OrmScrapService<C: OrmCall + ?Sized> {
    orm: Arc<C>,
}

impl<C: OrmCall + ?Sized> OrmScrapService<C> {
    pub fn new(orm: Arc<C>) -> Self {
        Self { orm }
    }
}

fn decode(method: &str, e: serde_json::Error) -> ScrapError {
    RpcError::Decode(format!("{}.{}: {}", DASHBOARD_MODEL, method, e)).into()
}

#[async_trait]
impl<C: OrmCall + ?Sized> ScrapService for OrmScrapService<C> {
    async fn default_config(&self) -> Result<DefaultConfig, ScrapError> {
        Ok(call_typed(&*self.orm, DASHBOARD_MODEL, "get_default_config", json!([])).await?)
    }

    async fn reason_tags(&self) -> Result<Vec<ReasonTag>, ScrapError> {
        Ok(call_typed(&*self.orm, DASHBOARD_MODEL, "get_scrap_reason_tags", json!([])).await?)
    }

    async fn parse_barcode(&self, barcode: &str) -> Result<BarcodeScan, ScrapError> {
        let resp: ParseBarcodeResponse =
            call_typed(&*self.orm, DASHBOARD_MODEL, "parse_barcode", json!([barcode])).await?;
        let scan = resp.into_scan().map_err(|e| decode("parse_barcode", e))?;
        debug!(barcode, found = matches!(scan, BarcodeScan::Found(_)), "barcode parsed");
        Ok(scan)
    }

    async fn create_scrap_orders(
        &self,
        lines: &[ScrapLineInput],
        reason_tag_ids: &[i64],
    ) -> Result<ScrapResult, ScrapError> {
        let resp: CreateScrapResponse = call_typed(
            &*self.orm,
            DASHBOARD_MODEL,
            "create_scrap_orders",
            json!([lines, reason_tag_ids]),
        )
        .await?;
        resp.into_result().map_err(ScrapError::Rejected)
    }

    async fn inventory_adjustment_action(&self, product_id: i64) -> Result<Value, ScrapError> {
        let action = self
            .orm
            .call_kw(
                PRODUCT_MODEL,
                "action_update_quantity_on_hand",
                json!([[product_id]]),
                json!({}),
            )
            .await?;
        Ok(action)
    }
}
