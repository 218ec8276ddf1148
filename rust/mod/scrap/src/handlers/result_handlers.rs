//! Result view handlers.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use openerp_flux::StateStore;
use tracing::{debug, info, warn};

use super::helpers;
use super::ScrapBff;
use crate::i18n_strings;
use crate::request::*;
use crate::service::{PRODUCT_MODEL, SCRAP_MODEL};
use crate::state::*;

/// Handle `result/open-scrap`.
pub async fn handle_open_scrap(req: &OpenScrapReq, store: &StateStore) {
    helpers::dispatch_action(
        store,
        HostAction::OpenRecord {
            model: SCRAP_MODEL.into(),
            id: req.scrap_id,
        },
    );
}

/// Handle `result/open-product`.
pub async fn handle_open_product(req: &OpenProductReq, store: &StateStore) {
    helpers::dispatch_action(
        store,
        HostAction::OpenRecord {
            model: PRODUCT_MODEL.into(),
            id: req.product_id,
        },
    );
}

/// Handle `result/adjust-inventory`: open the server-built wizard.
pub async fn handle_adjust_inventory(req: &AdjustInventoryReq, bff: &ScrapBff, store: &StateStore) {
    helpers::begin_call(store);
    let outcome = bff.service.inventory_adjustment_action(req.product_id).await;
    if bff.closed.load(Ordering::Acquire) {
        return;
    }
    helpers::end_call(store);

    match outcome {
        Ok(descriptor) => helpers::dispatch_action(store, HostAction::dialog(descriptor)),
        Err(e) => {
            warn!(product_id = req.product_id, error = %e, "inventory adjustment failed");
            let message = e
                .user_message()
                .map(str::to_string)
                .unwrap_or_else(|| bff.t(i18n_strings::ADJUST_FAILED));
            helpers::notify(store, Severity::Danger, None, message);
        }
    }
}

/// Handle `session/new`.
///
/// The barcode field is refocused after `refocus_delay` so the host has
/// re-rendered the scanning view first. A close in the meantime cancels
/// the refocus.
pub async fn handle_new_session(bff: Arc<ScrapBff>, store: Arc<StateStore>) {
    helpers::reset_session(&store);
    helpers::load_reasons(&bff, &store).await;
    if bff.closed.load(Ordering::Acquire) {
        return;
    }
    info!("new scrap session");

    let delay = bff.refocus_delay;
    if delay.is_zero() {
        helpers::refocus(&store);
        return;
    }
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if bff.closed.load(Ordering::Acquire) {
            debug!("dashboard closed, refocus skipped");
            return;
        }
        helpers::refocus(&store);
    });
}
