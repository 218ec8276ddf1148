//! Dashboard state definitions.
//!
//! Each file defines the type stored at one well-known path. Hosts
//! subscribe to `scrap/#` and `ui/#` and render whatever changed.

pub mod dashboard;
pub mod lines;
pub mod reason;
pub mod result;
pub mod ui;

pub use dashboard::{BarcodeInput, DashboardPhase, DashboardState};
pub use lines::{BarcodeKind, ScrapLine, ScrapLines, Tracking};
pub use reason::{ReasonState, ReasonTag};
pub use result::{CreatedScrap, ScrapResult, ScrapResultState, StockLevel};
pub use ui::{FocusState, FocusTarget, HostAction, HostActionState, Notice, Notices, Severity};

/// Every state path the dashboard writes.
pub const ALL_PATHS: &[&str] = &[
    DashboardState::PATH,
    BarcodeInput::PATH,
    ScrapLines::PATH,
    ReasonState::PATH,
    ScrapResultState::PATH,
    Notices::PATH,
    FocusState::PATH,
    HostActionState::PATH,
];
