use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::shared::table_state::{FilterPayload, TableState};

const KEY_PREFIX: &str = "table_settings_v1:";

/// Filter and paging position of a table, kept across navigation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSettings<F> {
    pub filter_payload: F,
    pub page_number: u32,
    pub page_limit: u32,
}

/// Plain get/set storage under string keys
pub trait SettingsBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Browser `sessionStorage`: survives navigation, gone with the tab
pub struct SessionStorageBackend {
    storage: web_sys::Storage,
}

impl SessionStorageBackend {
    pub fn new() -> Option<Self> {
        let storage = web_sys::window()?.session_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl SettingsBackend for SessionStorageBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let _ = self.storage.set_item(key, value);
    }

    fn remove(&self, key: &str) {
        let _ = self.storage.remove_item(key);
    }
}

/// In-memory fallback when no window is available
#[derive(Debug, Default)]
pub struct MemoryBackend {
    states: RefCell<HashMap<String, String>>,
}

impl SettingsBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.states.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.states
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.states.borrow_mut().remove(key);
    }
}

/// Session-scoped store of table settings, one entry per list view.
///
/// Provided once through Leptos context; list views restore from it on
/// mount and save to it when their filter or page changes.
#[derive(Clone)]
pub struct TableSettingsStore {
    backend: Rc<dyn SettingsBackend>,
}

impl TableSettingsStore {
    pub fn with_backend(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    /// Backed by `sessionStorage`, or memory outside a browser
    pub fn session() -> Self {
        match SessionStorageBackend::new() {
            Some(backend) => Self::with_backend(backend),
            None => {
                log::debug!("sessionStorage unavailable, table settings kept in memory");
                Self::in_memory()
            }
        }
    }

    pub fn in_memory() -> Self {
        Self::with_backend(MemoryBackend::default())
    }

    fn storage_key(view_key: &str) -> String {
        format!("{}{}", KEY_PREFIX, view_key)
    }

    pub fn save<F: Serialize>(&self, view_key: &str, settings: &TableSettings<F>) {
        match serde_json::to_string(settings) {
            Ok(raw) => self.backend.set(&Self::storage_key(view_key), &raw),
            Err(e) => log::warn!("cannot save table settings '{}': {}", view_key, e),
        }
    }

    /// Saved settings for `view_key`; unreadable entries count as absent
    pub fn load<F: DeserializeOwned>(&self, view_key: &str) -> Option<TableSettings<F>> {
        let raw = self.backend.get(&Self::storage_key(view_key))?;
        match serde_json::from_str(&raw) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("ignoring stored table settings '{}': {}", view_key, e);
                None
            }
        }
    }

    pub fn clear(&self, view_key: &str) {
        self.backend.remove(&Self::storage_key(view_key));
    }

    pub fn save_from<F, T>(&self, view_key: &str, state: RwSignal<TableState<F, T>>)
    where
        F: FilterPayload + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        let settings = state.with_untracked(|s| TableSettings {
            filter_payload: s.filter_payload.clone(),
            page_number: s.page_number,
            page_limit: s.page_limit,
        });
        self.save(view_key, &settings);
    }

    /// Apply saved settings to `state`; returns whether anything was restored
    pub fn restore_into<F, T>(&self, view_key: &str, state: RwSignal<TableState<F, T>>) -> bool
    where
        F: FilterPayload + DeserializeOwned + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        let Some(settings) = self.load::<F>(view_key) else {
            return false;
        };
        state.update(|s| {
            s.filter_payload = settings.filter_payload;
            s.page_number = settings.page_number.max(1);
            s.page_limit = settings.page_limit.max(1);
            s.reached_end = false;
            s.refresh_is_active();
        });
        true
    }
}

/// Put `store` in context for every table below; the app root passes
/// [`TableSettingsStore::session`]
pub fn provide_table_settings_store(store: TableSettingsStore) -> TableSettingsStore {
    provide_context(StoredValue::new_local(store.clone()));
    store
}

pub fn use_table_settings_store() -> TableSettingsStore {
    use_context::<StoredValue<TableSettingsStore, LocalStorage>>()
        .map(|stored| stored.get_value())
        .unwrap_or_else(TableSettingsStore::session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Filter {
        short_name: Option<String>,
    }

    impl FilterPayload for Filter {}

    #[test]
    fn test_round_trip_through_state() {
        let store = TableSettingsStore::in_memory();
        let state = RwSignal::new(TableState::<Filter, u32>::new(20));
        state.update(|s| {
            s.filter_payload.short_name = Some("ABC".into());
            s.page_number = 3;
            s.items = vec![1, 2];
        });
        store.save_from("eft", state);

        let restored = RwSignal::new(TableState::<Filter, u32>::new(10));
        assert!(store.restore_into("eft", restored));

        let s = restored.get_untracked();
        assert_eq!(s.filter_payload.short_name.as_deref(), Some("ABC"));
        assert_eq!(s.page_number, 3);
        assert_eq!(s.page_limit, 20);
        assert!(s.is_active);
        assert!(s.items.is_empty());
    }

    #[test]
    fn test_missing_and_corrupt_entries_are_ignored() {
        let backend = MemoryBackend::default();
        backend.set("table_settings_v1:refunds", "{not json");
        let store = TableSettingsStore::with_backend(backend);

        let state = RwSignal::new(TableState::<Filter, u32>::new(10));
        assert!(!store.restore_into("refunds", state));
        assert!(!store.restore_into("unknown", state));
        assert_eq!(state.get_untracked().page_limit, 10);
    }

    #[test]
    fn test_clear_removes_entry() {
        let store = TableSettingsStore::in_memory();
        let settings = TableSettings {
            filter_payload: Filter::default(),
            page_number: 2,
            page_limit: 5,
        };
        store.save("routing-slips", &settings);
        assert_eq!(store.load::<Filter>("routing-slips"), Some(settings));

        store.clear("routing-slips");
        assert_eq!(store.load::<Filter>("routing-slips"), None);
    }

    #[test]
    fn test_provided_store_is_the_one_in_context() {
        let owner = Owner::new();
        owner.with(|| {
            let provided = provide_table_settings_store(TableSettingsStore::in_memory());
            let settings = TableSettings {
                filter_payload: Filter {
                    short_name: Some("XYZ".into()),
                },
                page_number: 4,
                page_limit: 25,
            };
            provided.save("eft-shortnames:linked", &settings);

            let used = use_table_settings_store();
            assert_eq!(used.load::<Filter>("eft-shortnames:linked"), Some(settings));
        });
    }
}
