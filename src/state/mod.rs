use crate::api::ApiClient;
use crate::filter::CatatanFilter;
use crate::models::{Catatan, CountedOption, CurrentUser};
use crate::storage::LocalStore;
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    /// The one key-value store instance; everything that persists goes
    /// through it so tests can swap in a memory store.
    pub store: LocalStore,

    pub api_client: RwSignal<ApiClient>,
    pub current_user: RwSignal<Option<CurrentUser>>,

    /// All of the user's notes, loaded from the backend.
    pub catatans: RwSignal<Vec<Catatan>>,
    pub catatans_loading: RwSignal<bool>,
    pub catatans_error: RwSignal<Option<String>>,

    /// Load guard: ignore responses from superseded requests.
    pub catatans_request_id: RwSignal<u64>,

    /// Sidebar lists with per-option note counts.
    pub kategoris: RwSignal<Vec<CountedOption>>,
    pub folders: RwSignal<Vec<CountedOption>>,

    pub filter: RwSignal<CatatanFilter>,
    pub show_archived: RwSignal<bool>,

    pub show_add_form: RwSignal<bool>,
    pub toast: RwSignal<Option<Toast>>,
}

impl AppState {
    pub fn new() -> Self {
        let store = LocalStore;
        let stored_client = ApiClient::load_from_storage(&store);
        let stored_user = stored_client.current_user().cloned();

        Self {
            store,
            api_client: RwSignal::new(stored_client),
            current_user: RwSignal::new(stored_user),
            catatans: RwSignal::new(vec![]),
            catatans_loading: RwSignal::new(false),
            catatans_error: RwSignal::new(None),
            catatans_request_id: RwSignal::new(0),
            kategoris: RwSignal::new(vec![]),
            folders: RwSignal::new(vec![]),
            filter: RwSignal::new(CatatanFilter::default()),
            show_archived: RwSignal::new(false),
            show_add_form: RwSignal::new(false),
            toast: RwSignal::new(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
