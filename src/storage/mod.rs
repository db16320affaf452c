use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;

pub(crate) const TOKEN_KEY: &str = "catatan_token";
pub(crate) const USER_KEY: &str = "catatan_user";
pub(crate) const DRAFT_KEY: &str = "catatan_draft";

/// Scoped key-value persistence.
///
/// Constructed once at application start and passed to whatever needs it,
/// so tests can swap in [`MemoryStore`] instead of `window.localStorage`.
pub(crate) trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    /// Returns whether the write actually happened (quota errors report `false`).
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str);
}

/// `window.localStorage`-backed store.
#[derive(Clone, Copy, Default)]
pub(crate) struct LocalStore;

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) -> bool {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            storage.set_item(key, value).is_ok()
        } else {
            false
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory fake for native tests.
#[derive(Default)]
pub(crate) struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

pub(crate) fn load_json<T: for<'de> Deserialize<'de>>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Option<T> {
    let json = store.get(key)?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => store.set(key, &json),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::default();
        assert!(store.get("k").is_none());

        assert!(store.set("k", "v"));
        assert_eq!(store.get("k").as_deref(), Some("v"));

        store.remove("k");
        assert!(store.get("k").is_none());
    }

    #[test]
    fn test_load_json_corrupt_payload_is_none() {
        let store = MemoryStore::default();
        store.set("k", "{not json");
        assert!(load_json::<Vec<String>>(&store, "k").is_none());
    }

    #[test]
    fn test_save_then_load_json() {
        let store = MemoryStore::default();
        assert!(save_json(&store, "k", &vec!["a".to_string(), "b".to_string()]));
        let loaded: Vec<String> = load_json(&store, "k").expect("should load");
        assert_eq!(loaded, vec!["a", "b"]);
    }
}
