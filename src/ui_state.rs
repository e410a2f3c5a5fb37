//! Persisted UI state: which board columns are collapsed.
//!
//! A flat key-value JSON file under `.badgeboard/`. Nothing else is stored.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::board::Column;

pub const UI_STATE_FILE: &str = "ui_state.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    #[serde(default)]
    pub collapsed: BTreeMap<String, bool>,
}

impl UiState {
    /// Load state from `path`, falling back to the default when the file is
    /// missing or unreadable as JSON.
    pub fn load_or_default(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt UI state");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize UI state")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write UI state: {}", path.display()))
    }

    pub fn is_collapsed(&self, column: Column) -> bool {
        self.collapsed.get(column.as_str()).copied().unwrap_or(false)
    }

    pub fn set_collapsed(&mut self, column: Column, collapsed: bool) {
        self.collapsed.insert(column.as_str().to_string(), collapsed);
    }
}
