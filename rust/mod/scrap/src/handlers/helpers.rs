//! Shared state helpers for handlers.

use std::sync::atomic::{AtomicBool, Ordering};

use openerp_flux::StateStore;
use tracing::{info, warn};

use super::ScrapBff;
use crate::i18n_strings;
use crate::state::*;

pub fn dashboard(store: &StateStore) -> DashboardState {
    store
        .get_cloned::<DashboardState>(DashboardState::PATH)
        .unwrap_or_default()
}

pub fn phase(store: &StateStore) -> DashboardPhase {
    dashboard(store).phase
}

pub fn set_phase(store: &StateStore, phase: DashboardPhase) {
    store.update(DashboardState::PATH, DashboardState::scanning, |d: &mut DashboardState| {
        d.phase = phase
    });
}

/// Mark a remote call as started. Pair with [`end_call`].
pub fn begin_call(store: &StateStore) {
    store.update(DashboardState::PATH, DashboardState::scanning, DashboardState::begin_call);
}

pub fn end_call(store: &StateStore) {
    store.update(DashboardState::PATH, DashboardState::scanning, DashboardState::end_call);
}

pub fn lines(store: &StateStore) -> ScrapLines {
    store.get_cloned::<ScrapLines>(ScrapLines::PATH).unwrap_or_default()
}

pub fn reason(store: &StateStore) -> ReasonState {
    store.get_cloned::<ReasonState>(ReasonState::PATH).unwrap_or_default()
}

/// Ask the host to focus the barcode field.
pub fn refocus(store: &StateStore) {
    store.update(FocusState::PATH, FocusState::default, |f: &mut FocusState| {
        f.target = Some(FocusTarget::BarcodeInput);
        f.generation += 1;
    });
}

pub fn notify(store: &StateStore, severity: Severity, title: Option<String>, message: String) {
    store.update(Notices::PATH, Notices::default, |n: &mut Notices| {
        n.push(severity, title, message)
    });
}

/// Hand a window action to the host.
pub fn dispatch_action(store: &StateStore, action: HostAction) {
    store.update(HostActionState::PATH, HostActionState::default, |a: &mut HostActionState| {
        a.seq += 1;
        a.action = Some(action);
    });
}

/// Empty lines, barcode and result; back to scanning.
pub fn reset_session(store: &StateStore) {
    store.set(ScrapLines::PATH, ScrapLines::default());
    store.set(BarcodeInput::PATH, BarcodeInput::default());
    store.set(ScrapResultState::PATH, ScrapResultState::default());
    set_phase(store, DashboardPhase::Scanning);
}

/// Fetch the default reason and the reason list.
///
/// Each load fails independently; a failure leaves its part empty and
/// raises one danger notice. Nothing is written if the dashboard was
/// closed meanwhile.
pub async fn load_reasons(bff: &ScrapBff, store: &StateStore) {
    let mut failure = None;

    let selected = match bff.service.default_config().await {
        Ok(config) => config.default_scrap_reason_tag_id,
        Err(e) => {
            warn!(error = %e, "loading default scrap config failed");
            failure = Some(e);
            None
        }
    };
    let tags = match bff.service.reason_tags().await {
        Ok(tags) => tags,
        Err(e) => {
            warn!(error = %e, "loading scrap reason tags failed");
            failure = Some(e);
            Vec::new()
        }
    };
    if bff.closed.load(Ordering::Acquire) {
        return;
    }

    info!(tags = tags.len(), default_tag = ?selected, "reason tags loaded");
    store.set(ReasonState::PATH, ReasonState { tags, selected });

    if let Some(e) = failure {
        let message = e
            .user_message()
            .map(str::to_string)
            .unwrap_or_else(|| bff.t(i18n_strings::LOAD_FAILED));
        notify(store, Severity::Danger, None, message);
    }
}

/// Clears its flag when dropped.
pub struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    /// Take the flag, or `None` if someone already holds it.
    pub fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
