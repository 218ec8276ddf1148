//! Host-facing UI state: notices, focus and window actions.
//!
//! The dashboard never talks to a screen directly. It writes these paths
//! and the host turns them into toasts, focus changes and form views.

use flux_derive::state;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Notices kept before the oldest is dropped.
pub const MAX_NOTICES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

/// A transient, non-blocking notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub id: u64,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub message: String,
}

#[state("ui/notices")]
#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notices {
    pub items: Vec<Notice>,
    pub next_id: u64,
}

impl Notices {
    /// Append a notice, dropping the oldest past `MAX_NOTICES`. Returns its id.
    pub fn push(&mut self, severity: Severity, title: Option<String>, message: String) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notice {
            id,
            severity,
            title,
            message,
        });
        if self.items.len() > MAX_NOTICES {
            let excess = self.items.len() - MAX_NOTICES;
            self.items.drain(..excess);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() < before
    }

    pub fn last(&self) -> Option<&Notice> {
        self.items.last()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    BarcodeInput,
}

/// Focus request. Every refocus bumps `generation` so the host can
/// tell a repeat request from a stale one.
#[state("ui/focus")]
#[derive(Default, Serialize, Deserialize)]
pub struct FocusState {
    pub target: Option<FocusTarget>,
    pub generation: u64,
}

/// Something the host should open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostAction {
    /// Form view of one record.
    OpenRecord { model: String, id: i64 },
    /// Window action built by the server.
    Server { descriptor: Value },
}

impl HostAction {
    /// A server-built window action, opened in a dialog.
    pub fn dialog(mut descriptor: Value) -> Self {
        if let Some(obj) = descriptor.as_object_mut() {
            obj.insert("target".into(), Value::from("new"));
        }
        HostAction::Server { descriptor }
    }

    /// Window-action descriptor.
    pub fn descriptor(&self) -> Value {
        match self {
            HostAction::OpenRecord { model, id } => json!({
                "type": "ir.actions.act_window",
                "res_model": model,
                "res_id": id,
                "views": [[false, "form"]],
                "target": "new",
            }),
            HostAction::Server { descriptor } => descriptor.clone(),
        }
    }
}

/// Latest host action. `seq` increases with every dispatch.
#[state("ui/action")]
#[derive(Default, Serialize, Deserialize)]
pub struct HostActionState {
    pub seq: u64,
    pub action: Option<HostAction>,
}
