use crate::api::ApiClient;
use crate::models::{FolderRow, KategoriRow};
use crate::options::{NamedOption, OptionSet};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Working kategori/folder option sets for the composition form, plus the
/// show/hide state of the inline "add new" inputs.
///
/// `add_*_locally` only touches signals; nothing is persisted until the
/// submission workflow resolves the names.
#[derive(Clone, Copy)]
pub(crate) struct UseDynamicOptions {
    pub kategoris: RwSignal<Vec<NamedOption>>,
    pub folders: RwSignal<Vec<NamedOption>>,

    pub show_add_kategori: RwSignal<bool>,
    pub new_kategori_name: RwSignal<String>,
    pub show_add_folder: RwSignal<bool>,
    pub new_folder_name: RwSignal<String>,
}

fn warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

fn kategori_options(rows: Vec<KategoriRow>) -> Vec<NamedOption> {
    rows.into_iter()
        .map(|r| NamedOption::confirmed(r.id, r.nama))
        .collect()
}

fn folder_options(rows: Vec<FolderRow>) -> Vec<NamedOption> {
    rows.into_iter()
        .map(|r| NamedOption::confirmed(r.id, r.nama))
        .collect()
}

impl UseDynamicOptions {
    /// Add a pending kategori if the trimmed name is new; no-op otherwise.
    pub fn add_kategori_locally(&self, name: &str) -> Option<NamedOption> {
        let mut set = OptionSet::new(self.kategoris.get_untracked());
        let added = set.add_locally(name);
        if added.is_some() {
            self.kategoris.set(set.items().to_vec());
        }
        added
    }

    pub fn add_folder_locally(&self, name: &str) -> Option<NamedOption> {
        let mut set = OptionSet::new(self.folders.get_untracked());
        let added = set.add_locally(name);
        if added.is_some() {
            self.folders.set(set.items().to_vec());
        }
        added
    }

    /// Replace both sets with fresh backend rows, deduplicated by id.
    pub fn apply_confirmed(&self, kategoris: Vec<KategoriRow>, folders: Vec<FolderRow>) {
        let mut set = OptionSet::new(self.kategoris.get_untracked());
        set.replace_confirmed(kategori_options(kategoris));
        self.kategoris.set(set.items().to_vec());

        let mut set = OptionSet::new(self.folders.get_untracked());
        set.replace_confirmed(folder_options(folders));
        self.folders.set(set.items().to_vec());
    }

    /// Initial load: merge the caller-seeded options with the backend
    /// lists, caller precedence on name collision.
    pub fn load_initial(&self, client: ApiClient) {
        let this = *self;
        spawn_local(async move {
            let Ok(user_id) = client.require_user_id() else {
                return;
            };

            match client.fetch_kategoris(&user_id).await {
                Ok(rows) => {
                    let merged = OptionSet::merged(
                        this.kategoris.get_untracked(),
                        kategori_options(rows),
                    );
                    this.kategoris.set(merged.items().to_vec());
                }
                Err(e) => warn(&format!("load kategoris failed: {e}")),
            }

            match client.fetch_folders(&user_id).await {
                Ok(rows) => {
                    let merged =
                        OptionSet::merged(this.folders.get_untracked(), folder_options(rows));
                    this.folders.set(merged.items().to_vec());
                }
                Err(e) => warn(&format!("load folders failed: {e}")),
            }
        });
    }

    /// Re-fetch the authoritative lists and replace local state.
    pub fn refresh(&self, client: ApiClient) {
        let this = *self;
        spawn_local(async move {
            let Ok(user_id) = client.require_user_id() else {
                return;
            };

            let kategoris = match client.fetch_kategoris(&user_id).await {
                Ok(rows) => rows,
                Err(e) => {
                    warn(&format!("refresh kategoris failed: {e}"));
                    return;
                }
            };
            let folders = match client.fetch_folders(&user_id).await {
                Ok(rows) => rows,
                Err(e) => {
                    warn(&format!("refresh folders failed: {e}"));
                    return;
                }
            };

            this.apply_confirmed(kategoris, folders);
        });
    }
}

pub(crate) fn use_dynamic_options(
    initial_kategoris: Vec<NamedOption>,
    initial_folders: Vec<NamedOption>,
) -> UseDynamicOptions {
    UseDynamicOptions {
        kategoris: RwSignal::new(initial_kategoris),
        folders: RwSignal::new(initial_folders),
        show_add_kategori: RwSignal::new(false),
        new_kategori_name: RwSignal::new(String::new()),
        show_add_folder: RwSignal::new(false),
        new_folder_name: RwSignal::new(String::new()),
    }
}
