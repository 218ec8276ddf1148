//! Reason tags: stored at `scrap/reason`.

use flux_derive::state;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonTag {
    pub id: i64,
    pub name: String,
}

/// Loaded tags plus the optional selection. No selection is valid.
#[state("scrap/reason")]
#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasonState {
    pub tags: Vec<ReasonTag>,
    pub selected: Option<i64>,
}

impl ReasonState {
    /// Name of the selected tag, if it is among the loaded ones.
    pub fn selected_name(&self) -> Option<&str> {
        let id = self.selected?;
        self.tags.iter().find(|t| t.id == id).map(|t| t.name.as_str())
    }

    /// Tag ids to send with a scrap request: the selection or nothing.
    pub fn tag_ids(&self) -> Vec<i64> {
        self.selected.into_iter().collect()
    }
}
