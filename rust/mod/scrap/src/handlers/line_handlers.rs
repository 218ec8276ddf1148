//! Line editing and reason selection handlers.

use openerp_flux::StateStore;
use tracing::{debug, warn};

use super::helpers;
use crate::request::*;
use crate::state::*;

/// Apply `edit` to the lines if scanning. Out-of-range indices are logged.
fn edit_lines<F>(store: &StateStore, op: &'static str, index: usize, edit: F) -> bool
where
    F: FnOnce(&mut ScrapLines, usize) -> bool,
{
    if helpers::phase(store) != DashboardPhase::Scanning {
        debug!(op, "line edit ignored outside scanning");
        return false;
    }
    let applied = store.update(ScrapLines::PATH, ScrapLines::default, |l: &mut ScrapLines| {
        edit(l, index)
    });
    if !applied {
        warn!(op, index, "no line at index");
    }
    applied
}

/// Handle `line/set-quantity`. The field being edited keeps focus.
pub async fn handle_set_quantity(req: &SetQuantityReq, store: &StateStore) {
    let value = req.value;
    edit_lines(store, "set-quantity", req.index, |l, i| l.set_quantity(i, value));
}

/// Handle `line/increment`.
pub async fn handle_increment(req: &IncrementLineReq, store: &StateStore) {
    if edit_lines(store, "increment", req.index, ScrapLines::increment) {
        helpers::refocus(store);
    }
}

/// Handle `line/decrement`.
pub async fn handle_decrement(req: &DecrementLineReq, store: &StateStore) {
    if edit_lines(store, "decrement", req.index, ScrapLines::decrement) {
        helpers::refocus(store);
    }
}

/// Handle `line/scrap-all`.
pub async fn handle_scrap_all(req: &ScrapAllLineReq, store: &StateStore) {
    if edit_lines(store, "scrap-all", req.index, ScrapLines::scrap_all) {
        helpers::refocus(store);
    }
}

/// Handle `line/remove`.
pub async fn handle_remove(req: &RemoveLineReq, store: &StateStore) {
    if edit_lines(store, "remove", req.index, ScrapLines::remove) {
        helpers::refocus(store);
    }
}

/// Handle `reason/select`.
pub async fn handle_select_reason(req: &SelectReasonReq, store: &StateStore) {
    let selected = req.tag_id.filter(|id| *id > 0);
    store.update(ReasonState::PATH, ReasonState::default, |r: &mut ReasonState| {
        r.selected = selected
    });
}
