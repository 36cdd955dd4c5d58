//! Row selection.

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Row;
use crate::model::RowKey;

/// Selection mode for grid rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// No selection allowed.
    #[default]
    None,
    /// One row at a time.
    Single,
    /// Any number of rows, toggled individually.
    #[serde(rename = "multiple", alias = "multi")]
    Multi,
}

/// Tracks selected rows by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    mode: SelectionMode,
    selected: HashSet<RowKey>,
    last_selected: Option<RowKey>,
}

impl Selection {
    /// Creates an empty selection in `mode`.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
            last_selected: None,
        }
    }

    /// Returns the selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Applies a click on the row with `key`. Returns true if the selection changed.
    ///
    /// Single mode replaces the selection (clicking the selected row keeps
    /// it); multi mode toggles the row in or out.
    pub fn click(&mut self, key: RowKey) -> bool {
        let changed = match self.mode {
            SelectionMode::None => return false,
            SelectionMode::Single => {
                if self.selected.len() == 1 && self.selected.contains(&key) {
                    false
                } else {
                    self.selected.clear();
                    self.selected.insert(key.clone());
                    true
                }
            }
            SelectionMode::Multi => {
                if !self.selected.remove(&key) {
                    self.selected.insert(key.clone());
                }
                true
            }
        };
        self.last_selected = Some(key);
        changed
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.selected.contains(key)
    }

    /// The most recently clicked key.
    pub fn last_selected(&self) -> Option<&RowKey> {
        self.last_selected.as_ref()
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selections.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.last_selected = None;
    }

    /// Selected rows among `rows`, in the order of `rows`.
    pub fn selected_rows<'a>(&self, rows: &[&'a Row], id_field: &str) -> Vec<&'a Row> {
        rows.iter()
            .copied()
            .filter(|row| self.selected.contains(&row.key(id_field)))
            .collect()
    }
}
