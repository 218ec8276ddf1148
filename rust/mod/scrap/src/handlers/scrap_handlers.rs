//! Submission handlers: request, cancel, confirm.

use std::sync::atomic::Ordering;

use openerp_flux::StateStore;
use tracing::{debug, info, warn};

use super::helpers::{self, InFlight};
use super::ScrapBff;
use crate::i18n_strings;
use crate::service::ScrapLineInput;
use crate::state::*;

/// Handle `scrap/request`. Nothing to scrap is rejected locally.
pub async fn handle_request(bff: &ScrapBff, store: &StateStore) {
    if helpers::phase(store) != DashboardPhase::Scanning {
        debug!("scrap request ignored outside scanning");
        return;
    }
    if bff.scan_in_flight.load(Ordering::Acquire) {
        debug!("scrap request refused, scan still resolving");
        helpers::notify(store, Severity::Warning, None, bff.t(i18n_strings::SCAN_PENDING));
        return;
    }
    if !helpers::lines(store).has_lines() {
        helpers::notify(store, Severity::Warning, None, bff.t(i18n_strings::NO_LINES));
        return;
    }
    helpers::set_phase(store, DashboardPhase::ConfirmPending);
}

/// Handle `scrap/cancel`. Too late once the orders are being created.
pub async fn handle_cancel(bff: &ScrapBff, store: &StateStore) {
    if helpers::phase(store) != DashboardPhase::ConfirmPending {
        return;
    }
    if bff.confirm_in_flight.load(Ordering::Acquire) {
        debug!("cancel ignored, confirmation already sent");
        return;
    }
    helpers::set_phase(store, DashboardPhase::Scanning);
    helpers::refocus(store);
}

/// Handle `scrap/confirm`.
///
/// The dashboard stays in `ConfirmPending` until the server answers, so
/// no scan or line edit can slip in. On failure the lines stay as they
/// are so the user can retry. The server gives no idempotency guarantee,
/// so nothing is retried here.
pub async fn handle_confirm(bff: &ScrapBff, store: &StateStore) {
    if helpers::phase(store) != DashboardPhase::ConfirmPending {
        debug!("confirm ignored, no pending request");
        return;
    }
    let Some(_guard) = InFlight::acquire(&bff.confirm_in_flight) else {
        debug!("confirm already in flight");
        return;
    };
    helpers::begin_call(store);

    let inputs: Vec<ScrapLineInput> = helpers::lines(store)
        .items
        .iter()
        .map(|l| ScrapLineInput {
            product_id: l.product_id,
            quantity: l.quantity,
            product_uom_id: l.product_uom_id,
        })
        .collect();
    let tag_ids = helpers::reason(store).tag_ids();

    let outcome = bff.service.create_scrap_orders(&inputs, &tag_ids).await;
    if bff.closed.load(Ordering::Acquire) {
        debug!("scrap orders answered after close");
        return;
    }
    helpers::end_call(store);

    match outcome {
        Ok(result) => {
            info!(
                lines = inputs.len(),
                created = result.scrap_count,
                skipped = result.skipped.len(),
                "scrap orders created"
            );
            let message = bff.t(&format!("{}?count={}", i18n_strings::CREATED, result.scrap_count));
            store.set(ScrapResultState::PATH, ScrapResultState { result: Some(result) });
            helpers::set_phase(store, DashboardPhase::ShowingResult);
            helpers::notify(store, Severity::Success, None, message);
        }
        Err(e) => {
            warn!(lines = inputs.len(), error = %e, "creating scrap orders failed");
            let message = e
                .user_message()
                .map(str::to_string)
                .unwrap_or_else(|| bff.t(i18n_strings::CREATE_FAILED));
            helpers::set_phase(store, DashboardPhase::Scanning);
            helpers::notify(store, Severity::Danger, None, message);
        }
    }
}
