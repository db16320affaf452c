use crate::drafts::{clear_draft, load_draft, save_draft, DraftSnapshot};
use crate::models::Catatan;
use crate::storage::KeyValueStore;
use leptos::prelude::*;

/// Per-field validation messages, rendered inline next to the inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FieldErrors {
    pub judul_catatan: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.judul_catatan.is_none()
    }
}

/// Title is the only validated field; everything else is free-form.
pub(crate) fn validate_snapshot(snapshot: &DraftSnapshot) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if snapshot.judul_catatan.trim().is_empty() {
        errors.judul_catatan = Some("Judul catatan wajib diisi".to_string());
    }
    errors
}

/// Initial form values for editing an existing catatan. Kategori/folder are
/// carried as names (the joined rows), matching what the form edits.
pub(crate) fn snapshot_from_catatan(catatan: &Catatan) -> DraftSnapshot {
    DraftSnapshot {
        judul_catatan: catatan.judul_catatan.clone(),
        isi_catatan: catatan.isi_catatan.clone().unwrap_or_default(),
        kategori_nama: catatan
            .kategori_catatan
            .as_ref()
            .map(|k| k.nama.clone())
            .unwrap_or_default(),
        folder_nama: catatan
            .folder_catatan
            .as_ref()
            .map(|f| f.nama.clone())
            .unwrap_or_default(),
        is_archived: catatan.is_archived,
        pinned: catatan.pinned,
    }
}

/// Typed form state: one signal per input, no stringly-keyed field map.
#[derive(Clone, Copy)]
pub(crate) struct CatatanFormState {
    pub judul_catatan: RwSignal<String>,
    pub isi_catatan: RwSignal<String>,
    pub kategori_nama: RwSignal<String>,
    pub folder_nama: RwSignal<String>,
    pub is_archived: RwSignal<bool>,
    pub pinned: RwSignal<bool>,

    pub errors: RwSignal<FieldErrors>,
    pub is_dirty: RwSignal<bool>,
}

impl CatatanFormState {
    pub fn new(initial: DraftSnapshot) -> Self {
        Self {
            judul_catatan: RwSignal::new(initial.judul_catatan),
            isi_catatan: RwSignal::new(initial.isi_catatan),
            kategori_nama: RwSignal::new(initial.kategori_nama),
            folder_nama: RwSignal::new(initial.folder_nama),
            is_archived: RwSignal::new(initial.is_archived),
            pinned: RwSignal::new(initial.pinned),
            errors: RwSignal::new(FieldErrors::default()),
            is_dirty: RwSignal::new(false),
        }
    }

    pub fn snapshot(&self) -> DraftSnapshot {
        DraftSnapshot {
            judul_catatan: self.judul_catatan.get_untracked(),
            isi_catatan: self.isi_catatan.get_untracked(),
            kategori_nama: self.kategori_nama.get_untracked(),
            folder_nama: self.folder_nama.get_untracked(),
            is_archived: self.is_archived.get_untracked(),
            pinned: self.pinned.get_untracked(),
        }
    }

    pub fn apply(&self, snapshot: DraftSnapshot) {
        self.judul_catatan.set(snapshot.judul_catatan);
        self.isi_catatan.set(snapshot.isi_catatan);
        self.kategori_nama.set(snapshot.kategori_nama);
        self.folder_nama.set(snapshot.folder_nama);
        self.is_archived.set(snapshot.is_archived);
        self.pinned.set(snapshot.pinned);
    }

    pub fn mark_dirty(&self) {
        self.is_dirty.set(true);
        // Typing clears the stale inline error.
        if !self.errors.get_untracked().is_empty() {
            self.errors.set(FieldErrors::default());
        }
    }

    /// Runs validation, publishing inline errors. Returns whether the form
    /// may be submitted.
    pub fn validate(&self) -> bool {
        let errors = validate_snapshot(&self.snapshot());
        let ok = errors.is_empty();
        self.errors.set(errors);
        ok
    }

    pub fn reset(&self) {
        self.apply(DraftSnapshot::default());
        self.errors.set(FieldErrors::default());
        self.is_dirty.set(false);
    }

    pub fn save_draft(&self, store: &dyn KeyValueStore) -> bool {
        save_draft(store, &self.snapshot())
    }

    /// Restores a saved draft into the form, marking it dirty. Returns
    /// whether a draft existed.
    pub fn load_draft(&self, store: &dyn KeyValueStore) -> bool {
        match load_draft(store) {
            Some(snapshot) => {
                self.apply(snapshot);
                self.is_dirty.set(true);
                true
            }
            None => false,
        }
    }

    pub fn clear_draft(&self, store: &dyn KeyValueStore) {
        clear_draft(store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NamedRow;
    use crate::storage::MemoryStore;

    #[test]
    fn test_validate_rejects_whitespace_title() {
        let mut snapshot = DraftSnapshot::default();
        snapshot.judul_catatan = "   ".to_string();

        let errors = validate_snapshot(&snapshot);
        assert!(errors.judul_catatan.is_some());
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_validate_accepts_nonempty_title_only() {
        let mut snapshot = DraftSnapshot::default();
        snapshot.judul_catatan = "Shopping List".to_string();
        // Body, kategori and folder stay empty: still valid.
        assert!(validate_snapshot(&snapshot).is_empty());
    }

    #[test]
    fn test_snapshot_from_catatan_uses_joined_names() {
        let catatan = Catatan {
            id: "c1".to_string(),
            user_id: "u1".to_string(),
            judul_catatan: "T".to_string(),
            isi_catatan: None,
            kategori_id: Some("k1".to_string()),
            folder_id: None,
            is_archived: true,
            pinned: false,
            created_at: String::new(),
            updated_at: String::new(),
            kategori_catatan: Some(NamedRow {
                id: "k1".to_string(),
                nama: "Personal".to_string(),
            }),
            folder_catatan: None,
        };

        let snapshot = snapshot_from_catatan(&catatan);
        assert_eq!(snapshot.kategori_nama, "Personal");
        assert!(snapshot.folder_nama.is_empty());
        assert!(snapshot.isi_catatan.is_empty());
        assert!(snapshot.is_archived);
    }

    #[test]
    fn test_load_draft_restores_fields_and_marks_dirty() {
        let store = MemoryStore::default();

        let filled = CatatanFormState::new(DraftSnapshot::default());
        filled.judul_catatan.set("Belanja mingguan".to_string());
        filled.kategori_nama.set("Belanja".to_string());
        filled.pinned.set(true);
        assert!(filled.save_draft(&store));

        // A fresh form instance picks the draft up from storage.
        let fresh = CatatanFormState::new(DraftSnapshot::default());
        assert!(!fresh.is_dirty.get_untracked());

        assert!(fresh.load_draft(&store));
        assert_eq!(fresh.judul_catatan.get_untracked(), "Belanja mingguan");
        assert_eq!(fresh.kategori_nama.get_untracked(), "Belanja");
        assert!(fresh.pinned.get_untracked());
        assert!(fresh.is_dirty.get_untracked());
    }

    #[test]
    fn test_load_draft_empty_store_leaves_form_clean() {
        let store = MemoryStore::default();
        let form = CatatanFormState::new(DraftSnapshot::default());

        assert!(!form.load_draft(&store));
        assert!(form.judul_catatan.get_untracked().is_empty());
        assert!(!form.is_dirty.get_untracked());
    }
}
