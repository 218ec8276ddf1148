//! Dashboard lifecycle handlers.

use std::sync::atomic::Ordering;

use openerp_flux::StateStore;
use tracing::{debug, info};

use super::helpers;
use super::ScrapBff;
use crate::request::*;
use crate::state::*;

/// Handle `dashboard/initialize`.
pub async fn handle_initialize(bff: &ScrapBff, store: &StateStore) {
    bff.closed.store(false, Ordering::Release);
    helpers::reset_session(store);
    helpers::load_reasons(bff, store).await;
    helpers::refocus(store);
    info!("scrap dashboard ready");
}

/// Handle `dashboard/close`.
pub async fn handle_close(bff: &ScrapBff, store: &StateStore) {
    bff.closed.store(true, Ordering::Release);
    for path in ALL_PATHS {
        store.remove(path);
    }
    info!("scrap dashboard closed");
}

/// Handle `dashboard/key-down`: stray keys go back to the barcode field
/// while scanning.
pub async fn handle_key_down(req: &KeyDownReq, bff: &ScrapBff, store: &StateStore) {
    if bff.closed.load(Ordering::Acquire) {
        debug!("key ignored, dashboard closed");
        return;
    }
    if !helpers::dashboard(store).captures_keys() {
        return;
    }
    if req.target != KeyTarget::TextField {
        helpers::refocus(store);
    }
}

/// Handle `ui/dismiss-notice`.
pub async fn handle_dismiss_notice(req: &DismissNoticeReq, store: &StateStore) {
    let removed = store.update(Notices::PATH, Notices::default, |n: &mut Notices| n.dismiss(req.id));
    if !removed {
        debug!(id = req.id, "notice already gone");
    }
}
