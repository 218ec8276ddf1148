//! Barcode field handlers.

use std::sync::atomic::Ordering;

use openerp_flux::StateStore;
use tracing::{debug, info, warn};

use super::helpers::{self, InFlight};
use super::ScrapBff;
use crate::i18n_strings;
use crate::request::*;
use crate::service::BarcodeScan;
use crate::sound::{play_detached, SoundCue};
use crate::state::*;

/// Handle `barcode/input`.
pub async fn handle_input(req: &BarcodeInputReq, store: &StateStore) {
    store.set(BarcodeInput::PATH, BarcodeInput(req.value.clone()));
}

/// Handle `barcode/submit`.
///
/// The field is cleared before the lookup so the scanner can keep
/// typing. A second submit while one is being resolved is dropped and
/// its text stays in the field. A result arriving after the dashboard
/// left scanning is discarded; after close nothing is written.
pub async fn handle_submit(bff: &ScrapBff, store: &StateStore) {
    if helpers::phase(store) != DashboardPhase::Scanning {
        debug!("barcode submit ignored outside scanning");
        return;
    }
    let input = store
        .get_cloned::<BarcodeInput>(BarcodeInput::PATH)
        .unwrap_or_default();
    let barcode = input.0.trim().to_string();
    if barcode.is_empty() {
        return;
    }
    let Some(_guard) = InFlight::acquire(&bff.scan_in_flight) else {
        debug!(%barcode, "scan already in flight");
        return;
    };

    store.set(BarcodeInput::PATH, BarcodeInput::default());
    helpers::begin_call(store);

    let outcome = bff.service.parse_barcode(&barcode).await;

    if bff.closed.load(Ordering::Acquire) {
        debug!(%barcode, "scan resolved after close, dropped");
        return;
    }
    helpers::end_call(store);

    if helpers::phase(store) != DashboardPhase::Scanning {
        warn!(%barcode, "scan resolved after leaving scanning, dropped");
        helpers::notify(store, Severity::Danger, None, bff.t(i18n_strings::SCAN_DISCARDED));
        play_detached(&bff.sound, SoundCue::Error);
        return;
    }

    match outcome {
        Ok(BarcodeScan::Found(product)) => {
            let index = store.update(ScrapLines::PATH, ScrapLines::default, |l: &mut ScrapLines| {
                l.merge_scan(&product)
            });
            info!(%barcode, product_id = product.product_id, index, "product scanned");
            play_detached(&bff.sound, SoundCue::Success);
        }
        Ok(BarcodeScan::Rejected(reason)) => {
            info!(%barcode, ?reason, "barcode rejected");
            let message = reason
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| bff.t(i18n_strings::PRODUCT_NOT_FOUND));
            helpers::notify(
                store,
                Severity::Danger,
                Some(bff.t(i18n_strings::BARCODE_ERROR_TITLE)),
                message,
            );
            play_detached(&bff.sound, SoundCue::Error);
        }
        Err(e) => {
            warn!(%barcode, error = %e, "barcode lookup failed");
            let message = e
                .user_message()
                .map(str::to_string)
                .unwrap_or_else(|| bff.t(i18n_strings::SCAN_FAILED));
            helpers::notify(store, Severity::Danger, None, message);
            play_detached(&bff.sound, SoundCue::Error);
        }
    }

    helpers::refocus(store);
}
