use crate::storage::{load_json, save_json, KeyValueStore, DRAFT_KEY};
use serde::{Deserialize, Serialize};

/// Flat snapshot of the add/edit form. One global slot, last writer wins.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct DraftSnapshot {
    pub judul_catatan: String,
    pub isi_catatan: String,
    pub kategori_nama: String,
    pub folder_nama: String,
    pub is_archived: bool,
    pub pinned: bool,
}

pub(crate) fn save_draft(store: &dyn KeyValueStore, snapshot: &DraftSnapshot) -> bool {
    save_json(store, DRAFT_KEY, snapshot)
}

/// Corrupt or unreadable payloads are treated as "no draft".
pub(crate) fn load_draft(store: &dyn KeyValueStore) -> Option<DraftSnapshot> {
    load_json(store, DRAFT_KEY)
}

pub(crate) fn clear_draft(store: &dyn KeyValueStore) {
    store.remove(DRAFT_KEY);
}
