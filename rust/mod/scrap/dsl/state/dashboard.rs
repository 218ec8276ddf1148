//! Dashboard phase and the barcode field: `scrap/dashboard`, `scrap/barcode`.

use flux_derive::state;
use serde::{Deserialize, Serialize};

/// Which view the dashboard shows. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardPhase {
    #[default]
    Scanning,
    ConfirmPending,
    ShowingResult,
}

#[state("scrap/dashboard")]
#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub phase: DashboardPhase,
    /// At least one remote call is in progress.
    pub loading: bool,
    /// Remote calls in progress. `loading` is `pending > 0`.
    pub pending: u32,
}

impl DashboardState {
    pub fn scanning() -> Self {
        Self::default()
    }

    /// Count one more remote call as started.
    pub fn begin_call(&mut self) {
        self.pending += 1;
        self.loading = true;
    }

    /// Count one remote call as finished.
    pub fn end_call(&mut self) {
        self.pending = self.pending.saturating_sub(1);
        self.loading = self.pending > 0;
    }

    /// Stray key presses are routed to the barcode field only while scanning.
    pub fn captures_keys(&self) -> bool {
        self.phase == DashboardPhase::Scanning
    }
}

/// Text currently in the barcode field.
#[state("scrap/barcode")]
#[derive(Default, Serialize, Deserialize)]
pub struct BarcodeInput(pub String);
