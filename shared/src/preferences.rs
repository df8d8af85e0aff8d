//! Table column layout persisted through an injected key-value store.

use log::warn;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;

/// Key-value port for UI preferences. The browser build backs it with local
/// storage; tests use [`MemoryPreferences`].
pub trait PreferencesStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferencesStore for MemoryPreferences {
    fn read(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnState {
    pub key: String,
    pub visible: bool,
}

/// Ordered table columns with per-column visibility
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    storage_key: String,
    defaults: Vec<String>,
    columns: Vec<ColumnState>,
}

impl ColumnLayout {
    /// All default columns visible, in the given order
    pub fn with_defaults(storage_key: &str, defaults: &[&str]) -> Self {
        Self {
            storage_key: storage_key.to_string(),
            defaults: defaults.iter().map(|key| key.to_string()).collect(),
            columns: defaults
                .iter()
                .map(|key| ColumnState {
                    key: key.to_string(),
                    visible: true,
                })
                .collect(),
        }
    }

    /// Restore a saved layout and reconcile it with the table's current columns.
    ///
    /// Saved keys the table no longer has are dropped; columns the saved
    /// layout doesn't know are appended visible. Unreadable data falls back to
    /// the defaults.
    pub fn load(store: &dyn PreferencesStore, storage_key: &str, defaults: &[&str]) -> Self {
        let mut layout = Self::with_defaults(storage_key, defaults);

        let Some(raw) = store.read(storage_key) else {
            return layout;
        };
        let saved: Vec<ColumnState> = match serde_json::from_str(&raw) {
            Ok(saved) => saved,
            Err(e) => {
                warn!("Ignoring unreadable column layout '{}': {}", storage_key, e);
                return layout;
            }
        };

        let mut columns: Vec<ColumnState> = saved
            .into_iter()
            .filter(|c| defaults.contains(&c.key.as_str()))
            .fold(Vec::new(), |mut acc, c| {
                if !acc.iter().any(|seen: &ColumnState| seen.key == c.key) {
                    acc.push(c);
                }
                acc
            });
        for key in defaults {
            if !columns.iter().any(|c| c.key == *key) {
                columns.push(ColumnState {
                    key: key.to_string(),
                    visible: true,
                });
            }
        }

        layout.columns = columns;
        layout.ensure_one_visible();
        layout
    }

    pub fn save(&self, store: &dyn PreferencesStore) {
        match serde_json::to_string(&self.columns) {
            Ok(json) => store.write(&self.storage_key, &json),
            Err(e) => warn!("Failed to serialize column layout '{}': {}", self.storage_key, e),
        }
    }

    pub fn columns(&self) -> &[ColumnState] {
        &self.columns
    }

    pub fn visible(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.visible)
            .map(|c| c.key.as_str())
            .collect()
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.columns.iter().any(|c| c.key == key && c.visible)
    }

    /// Flip a column's visibility. Hiding the last visible column is a no-op.
    pub fn toggle(&mut self, key: &str) {
        let visible_count = self.columns.iter().filter(|c| c.visible).count();
        if let Some(column) = self.columns.iter_mut().find(|c| c.key == key) {
            if column.visible && visible_count == 1 {
                return;
            }
            column.visible = !column.visible;
        }
    }

    pub fn move_left(&mut self, key: &str) {
        if let Some(pos) = self.position(key) {
            if pos > 0 {
                self.columns.swap(pos, pos - 1);
            }
        }
    }

    pub fn move_right(&mut self, key: &str) {
        if let Some(pos) = self.position(key) {
            if pos + 1 < self.columns.len() {
                self.columns.swap(pos, pos + 1);
            }
        }
    }

    /// Back to the table's default order with every column visible
    pub fn reset(&mut self) {
        self.columns = self
            .defaults
            .iter()
            .map(|key| ColumnState {
                key: key.clone(),
                visible: true,
            })
            .collect();
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    fn ensure_one_visible(&mut self) {
        if !self.columns.iter().any(|c| c.visible) {
            if let Some(first) = self.columns.first_mut() {
                first.visible = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "columns.test";
    const DEFAULTS: [&str; 4] = ["folio", "nombre", "correo", "parque"];

    #[test]
    fn test_load_without_saved_layout() {
        let store = MemoryPreferences::new();
        let layout = ColumnLayout::load(&store, KEY, &DEFAULTS);
        assert_eq!(layout.visible(), DEFAULTS.to_vec());
    }

    #[test]
    fn test_save_and_reload() {
        let store = MemoryPreferences::new();
        let mut layout = ColumnLayout::load(&store, KEY, &DEFAULTS);
        layout.toggle("correo");
        layout.move_left("parque");
        layout.save(&store);

        let restored = ColumnLayout::load(&store, KEY, &DEFAULTS);
        assert_eq!(restored, layout);
        assert_eq!(restored.visible(), vec!["folio", "nombre", "parque"]);
        assert!(!restored.is_visible("correo"));
    }

    #[test]
    fn test_load_reconciles_with_current_columns() {
        let store = MemoryPreferences::new();
        store.write(
            KEY,
            r#"[{"key":"parque","visible":true},{"key":"eliminada","visible":true},{"key":"folio","visible":false},{"key":"parque","visible":false}]"#,
        );

        let layout = ColumnLayout::load(&store, KEY, &DEFAULTS);
        let keys: Vec<&str> = layout.columns().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["parque", "folio", "nombre", "correo"]);
        assert_eq!(layout.visible(), vec!["parque", "nombre", "correo"]);
    }

    #[test]
    fn test_load_ignores_garbage() {
        let store = MemoryPreferences::new();
        store.write(KEY, "not json");
        let layout = ColumnLayout::load(&store, KEY, &DEFAULTS);
        assert_eq!(layout.visible(), DEFAULTS.to_vec());
    }

    #[test]
    fn test_last_visible_column_cannot_be_hidden() {
        let mut layout = ColumnLayout::with_defaults(KEY, &["folio", "nombre"]);
        layout.toggle("folio");
        layout.toggle("nombre");
        assert_eq!(layout.visible(), vec!["nombre"]);

        layout.toggle("folio");
        assert_eq!(layout.visible(), vec!["folio", "nombre"]);
    }

    #[test]
    fn test_all_hidden_in_storage_restores_first() {
        let store = MemoryPreferences::new();
        store.write(KEY, r#"[{"key":"nombre","visible":false},{"key":"folio","visible":false}]"#);
        let layout = ColumnLayout::load(&store, KEY, &["folio", "nombre"]);
        assert_eq!(layout.visible(), vec!["nombre"]);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut layout = ColumnLayout::with_defaults(KEY, &DEFAULTS);
        layout.move_right("folio");
        layout.toggle("correo");
        layout.reset();
        assert_eq!(layout, ColumnLayout::with_defaults(KEY, &DEFAULTS));
    }

    #[test]
    fn test_move_at_edges_is_noop() {
        let mut layout = ColumnLayout::with_defaults(KEY, &DEFAULTS);
        layout.move_left("folio");
        layout.move_right("parque");
        layout.move_right("desconocida");
        assert_eq!(layout.visible(), DEFAULTS.to_vec());
    }
}
