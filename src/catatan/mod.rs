//! Note submission workflow: validate, resolve kategori/folder references,
//! persist, then refresh dependent collections.

use crate::api::{ApiClient, ApiError, ApiErrorKind, ApiResult, CatatanPatch, NewCatatan};
use crate::drafts::{clear_draft, DraftSnapshot};
use crate::form::{validate_snapshot, FieldErrors};
use crate::models::{Catatan, FolderRow, KategoriRow};
use crate::storage::KeyValueStore;

/// Backend calls the submission workflow performs.
///
/// `ApiClient` is the real implementation; tests swap in an in-memory fake
/// the same way storage tests use `MemoryStore`.
pub(crate) trait CatatanBackend {
    fn require_user_id(&self) -> ApiResult<String>;

    async fn find_kategori_by_nama(
        &self,
        nama: &str,
        user_id: &str,
    ) -> ApiResult<Option<KategoriRow>>;
    async fn create_kategori(&self, nama: &str, user_id: &str) -> ApiResult<KategoriRow>;
    async fn find_folder_by_nama(&self, nama: &str, user_id: &str)
        -> ApiResult<Option<FolderRow>>;
    async fn create_folder(&self, nama: &str, user_id: &str) -> ApiResult<FolderRow>;

    async fn fetch_catatan_any_owner(&self, id: &str) -> ApiResult<Option<Catatan>>;
    async fn insert_catatan(&self, row: &NewCatatan) -> ApiResult<Catatan>;
    async fn update_catatan(&self, id: &str, user_id: &str, patch: &CatatanPatch)
        -> ApiResult<()>;
    async fn delete_catatan(&self, id: &str, user_id: &str) -> ApiResult<()>;

    async fn fetch_kategoris(&self, user_id: &str) -> ApiResult<Vec<KategoriRow>>;
    async fn fetch_folders(&self, user_id: &str) -> ApiResult<Vec<FolderRow>>;
}

impl CatatanBackend for ApiClient {
    fn require_user_id(&self) -> ApiResult<String> {
        ApiClient::require_user_id(self)
    }

    async fn find_kategori_by_nama(
        &self,
        nama: &str,
        user_id: &str,
    ) -> ApiResult<Option<KategoriRow>> {
        ApiClient::find_kategori_by_nama(self, nama, user_id).await
    }

    async fn create_kategori(&self, nama: &str, user_id: &str) -> ApiResult<KategoriRow> {
        ApiClient::create_kategori(self, nama, user_id).await
    }

    async fn find_folder_by_nama(
        &self,
        nama: &str,
        user_id: &str,
    ) -> ApiResult<Option<FolderRow>> {
        ApiClient::find_folder_by_nama(self, nama, user_id).await
    }

    async fn create_folder(&self, nama: &str, user_id: &str) -> ApiResult<FolderRow> {
        ApiClient::create_folder(self, nama, user_id).await
    }

    async fn fetch_catatan_any_owner(&self, id: &str) -> ApiResult<Option<Catatan>> {
        ApiClient::fetch_catatan_any_owner(self, id).await
    }

    async fn insert_catatan(&self, row: &NewCatatan) -> ApiResult<Catatan> {
        ApiClient::insert_catatan(self, row).await
    }

    async fn update_catatan(
        &self,
        id: &str,
        user_id: &str,
        patch: &CatatanPatch,
    ) -> ApiResult<()> {
        ApiClient::update_catatan(self, id, user_id, patch).await
    }

    async fn delete_catatan(&self, id: &str, user_id: &str) -> ApiResult<()> {
        ApiClient::delete_catatan(self, id, user_id).await
    }

    async fn fetch_kategoris(&self, user_id: &str) -> ApiResult<Vec<KategoriRow>> {
        ApiClient::fetch_kategoris(self, user_id).await
    }

    async fn fetch_folders(&self, user_id: &str) -> ApiResult<Vec<FolderRow>> {
        ApiClient::fetch_folders(self, user_id).await
    }
}

/// Phase of one submission attempt. Pages use this to disable the submit
/// control while a request is in flight (advisory, not a lock).
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum SubmitPhase {
    Idle,
    Validating,
    ResolvingOptions,
    Persisting,
    Refreshing,
    Done,
    Failed,
}

impl SubmitPhase {
    /// True while a submission attempt is still running.
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            SubmitPhase::Validating
                | SubmitPhase::ResolvingOptions
                | SubmitPhase::Persisting
                | SubmitPhase::Refreshing
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SubmitError {
    Validation(FieldErrors),
    Authentication,
    NotFound,
    NotAuthorized,
    Backend(String),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::Validation(_) => write!(f, "Periksa kembali isian formulir"),
            SubmitError::Authentication => write!(f, "Sesi berakhir, silakan masuk kembali"),
            SubmitError::NotFound => write!(f, "Catatan tidak ditemukan"),
            SubmitError::NotAuthorized => {
                write!(f, "Anda tidak berhak mengubah catatan ini")
            }
            SubmitError::Backend(msg) => {
                if msg.is_empty() {
                    write!(f, "Terjadi kesalahan yang tidak diketahui")
                } else {
                    write!(f, "{msg}")
                }
            }
        }
    }
}

impl From<ApiError> for SubmitError {
    fn from(e: ApiError) -> Self {
        match e.kind {
            ApiErrorKind::Unauthorized => SubmitError::Authentication,
            _ => SubmitError::Backend(e.message),
        }
    }
}

/// Fresh option lists fetched after a successful submission, so newly
/// created kategori/folder rows appear with their permanent ids. A field is
/// `None` when that refresh fetch failed; callers keep their current list.
#[derive(Clone, Debug, Default)]
pub(crate) struct SubmitOutcome {
    pub kategoris: Option<Vec<KategoriRow>>,
    pub folders: Option<Vec<FolderRow>>,
}

/// Get-or-create a kategori by exact name for this user.
///
/// Read-then-write: two concurrent submissions with the same new name can
/// both miss the lookup and both insert. Duplicate-name rows are accepted;
/// the refresh step dedups the option list by id.
async fn ensure_kategori_exists(
    client: &impl CatatanBackend,
    nama: &str,
    user_id: &str,
) -> Result<String, SubmitError> {
    if let Some(existing) = client.find_kategori_by_nama(nama, user_id).await? {
        return Ok(existing.id);
    }
    let created = client.create_kategori(nama, user_id).await?;
    Ok(created.id)
}

async fn ensure_folder_exists(
    client: &impl CatatanBackend,
    nama: &str,
    user_id: &str,
) -> Result<String, SubmitError> {
    if let Some(existing) = client.find_folder_by_nama(nama, user_id).await? {
        return Ok(existing.id);
    }
    let created = client.create_folder(nama, user_id).await?;
    Ok(created.id)
}

/// Resolve the form's kategori/folder names to backend-confirmed ids.
/// Empty names resolve to `None` (the note keeps a null reference).
async fn resolve_references(
    client: &impl CatatanBackend,
    snapshot: &DraftSnapshot,
    user_id: &str,
) -> Result<(Option<String>, Option<String>), SubmitError> {
    let kategori_nama = snapshot.kategori_nama.trim();
    let folder_nama = snapshot.folder_nama.trim();

    let kategori_id = if kategori_nama.is_empty() {
        None
    } else {
        Some(ensure_kategori_exists(client, kategori_nama, user_id).await?)
    };

    let folder_id = if folder_nama.is_empty() {
        None
    } else {
        Some(ensure_folder_exists(client, folder_nama, user_id).await?)
    };

    Ok((kategori_id, folder_id))
}

/// Re-fetch option lists after a write. Not fatal: a failure here leaves
/// the caller's lists stale but the submission already succeeded.
async fn refresh_options(client: &impl CatatanBackend, user_id: &str) -> SubmitOutcome {
    let kategoris = match client.fetch_kategoris(user_id).await {
        Ok(rows) => Some(rows),
        Err(e) => {
            leptos::logging::warn!("refresh kategoris failed: {e}");
            None
        }
    };
    let folders = match client.fetch_folders(user_id).await {
        Ok(rows) => Some(rows),
        Err(e) => {
            leptos::logging::warn!("refresh folders failed: {e}");
            None
        }
    };
    SubmitOutcome { kategoris, folders }
}

pub(crate) async fn submit_new_catatan(
    client: &impl CatatanBackend,
    store: &dyn KeyValueStore,
    snapshot: &DraftSnapshot,
    on_phase: impl Fn(SubmitPhase),
) -> Result<SubmitOutcome, SubmitError> {
    let result = submit_new_inner(client, snapshot, &on_phase).await;
    match &result {
        Ok(_) => {
            // Done consumes the draft slot.
            clear_draft(store);
            on_phase(SubmitPhase::Done);
        }
        Err(_) => on_phase(SubmitPhase::Failed),
    }
    result
}

async fn submit_new_inner(
    client: &impl CatatanBackend,
    snapshot: &DraftSnapshot,
    on_phase: &impl Fn(SubmitPhase),
) -> Result<SubmitOutcome, SubmitError> {
    on_phase(SubmitPhase::Validating);
    let errors = validate_snapshot(snapshot);
    if !errors.is_empty() {
        return Err(SubmitError::Validation(errors));
    }

    let user_id = client
        .require_user_id()
        .map_err(|_| SubmitError::Authentication)?;

    on_phase(SubmitPhase::ResolvingOptions);
    let (kategori_id, folder_id) = resolve_references(client, snapshot, &user_id).await?;

    on_phase(SubmitPhase::Persisting);
    client
        .insert_catatan(&NewCatatan {
            judul_catatan: snapshot.judul_catatan.trim().to_string(),
            isi_catatan: snapshot.isi_catatan.clone(),
            kategori_id,
            folder_id,
            is_archived: snapshot.is_archived,
            pinned: snapshot.pinned,
            user_id: user_id.clone(),
        })
        .await?;

    on_phase(SubmitPhase::Refreshing);
    Ok(refresh_options(client, &user_id).await)
}

pub(crate) async fn submit_catatan_update(
    client: &impl CatatanBackend,
    store: &dyn KeyValueStore,
    catatan_id: &str,
    snapshot: &DraftSnapshot,
    on_phase: impl Fn(SubmitPhase),
) -> Result<SubmitOutcome, SubmitError> {
    let result = submit_update_inner(client, catatan_id, snapshot, &on_phase).await;
    match &result {
        Ok(_) => {
            clear_draft(store);
            on_phase(SubmitPhase::Done);
        }
        Err(_) => on_phase(SubmitPhase::Failed),
    }
    result
}

async fn submit_update_inner(
    client: &impl CatatanBackend,
    catatan_id: &str,
    snapshot: &DraftSnapshot,
    on_phase: &impl Fn(SubmitPhase),
) -> Result<SubmitOutcome, SubmitError> {
    on_phase(SubmitPhase::Validating);
    let errors = validate_snapshot(snapshot);
    if !errors.is_empty() {
        return Err(SubmitError::Validation(errors));
    }

    let user_id = client
        .require_user_id()
        .map_err(|_| SubmitError::Authentication)?;

    // Ownership check before any mutation: a missing row and a foreign row
    // fail with distinct messages.
    let existing = client.fetch_catatan_any_owner(catatan_id).await?;
    match existing {
        None => return Err(SubmitError::NotFound),
        Some(row) if row.user_id != user_id => return Err(SubmitError::NotAuthorized),
        Some(_) => {}
    }

    on_phase(SubmitPhase::ResolvingOptions);
    let (kategori_id, folder_id) = resolve_references(client, snapshot, &user_id).await?;

    on_phase(SubmitPhase::Persisting);
    client
        .update_catatan(
            catatan_id,
            &user_id,
            &CatatanPatch {
                judul_catatan: snapshot.judul_catatan.trim().to_string(),
                isi_catatan: snapshot.isi_catatan.clone(),
                kategori_id,
                folder_id,
                is_archived: snapshot.is_archived,
                pinned: snapshot.pinned,
            },
        )
        .await?;

    on_phase(SubmitPhase::Refreshing);
    Ok(refresh_options(client, &user_id).await)
}

pub(crate) async fn delete_catatan(
    client: &impl CatatanBackend,
    catatan_id: &str,
) -> Result<(), SubmitError> {
    let user_id = client
        .require_user_id()
        .map_err(|_| SubmitError::Authentication)?;
    client.delete_catatan(catatan_id, &user_id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;
    use std::future::Future;
    use std::pin::pin;
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    // Every await in the workflow is immediately ready against the
    // in-memory backend, so one poll with a noop waker drives a whole
    // submission to completion.
    fn poll_once<F: Future>(fut: F) -> Poll<F::Output> {
        const VTABLE: RawWakerVTable =
            RawWakerVTable::new(|_| RawWaker::new(std::ptr::null(), &VTABLE), |_| {}, |_| {}, |_| {});
        let waker = unsafe { Waker::from_raw(RawWaker::new(std::ptr::null(), &VTABLE)) };
        let mut cx = Context::from_waker(&waker);
        pin!(fut).as_mut().poll(&mut cx)
    }

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:54321".to_string(), "anon".to_string())
    }

    fn backend_error() -> ApiError {
        ApiError {
            kind: ApiErrorKind::Network,
            message: "connection refused".to_string(),
        }
    }

    /// In-memory backend recording every mutation.
    #[derive(Default)]
    struct FakeBackend {
        user_id: Option<String>,
        kategoris: RefCell<Vec<KategoriRow>>,
        folders: RefCell<Vec<FolderRow>>,
        catatans: RefCell<Vec<Catatan>>,
        inserted: RefCell<Vec<NewCatatan>>,
        updated: RefCell<Vec<(String, CatatanPatch)>>,
        deleted: RefCell<Vec<String>>,
        fail_refresh: bool,
    }

    impl FakeBackend {
        fn logged_in(user_id: &str) -> Self {
            Self {
                user_id: Some(user_id.to_string()),
                ..Default::default()
            }
        }

        fn with_kategori(self, id: &str, nama: &str) -> Self {
            self.kategoris.borrow_mut().push(KategoriRow {
                id: id.to_string(),
                nama: nama.to_string(),
                user_id: self.user_id.clone(),
            });
            self
        }

        fn with_catatan(self, id: &str, owner: &str) -> Self {
            self.catatans.borrow_mut().push(Catatan {
                id: id.to_string(),
                user_id: owner.to_string(),
                judul_catatan: "T".to_string(),
                isi_catatan: None,
                kategori_id: None,
                folder_id: None,
                is_archived: false,
                pinned: false,
                created_at: String::new(),
                updated_at: String::new(),
                kategori_catatan: None,
                folder_catatan: None,
            });
            self
        }
    }

    impl CatatanBackend for FakeBackend {
        fn require_user_id(&self) -> ApiResult<String> {
            self.user_id.clone().ok_or_else(ApiError::unauthorized)
        }

        async fn find_kategori_by_nama(
            &self,
            nama: &str,
            _user_id: &str,
        ) -> ApiResult<Option<KategoriRow>> {
            Ok(self
                .kategoris
                .borrow()
                .iter()
                .find(|r| r.nama == nama)
                .cloned())
        }

        async fn create_kategori(&self, nama: &str, user_id: &str) -> ApiResult<KategoriRow> {
            let row = KategoriRow {
                id: format!("k{}", self.kategoris.borrow().len() + 1),
                nama: nama.to_string(),
                user_id: Some(user_id.to_string()),
            };
            self.kategoris.borrow_mut().push(row.clone());
            Ok(row)
        }

        async fn find_folder_by_nama(
            &self,
            nama: &str,
            _user_id: &str,
        ) -> ApiResult<Option<FolderRow>> {
            Ok(self
                .folders
                .borrow()
                .iter()
                .find(|r| r.nama == nama)
                .cloned())
        }

        async fn create_folder(&self, nama: &str, user_id: &str) -> ApiResult<FolderRow> {
            let row = FolderRow {
                id: format!("f{}", self.folders.borrow().len() + 1),
                nama: nama.to_string(),
                user_id: Some(user_id.to_string()),
            };
            self.folders.borrow_mut().push(row.clone());
            Ok(row)
        }

        async fn fetch_catatan_any_owner(&self, id: &str) -> ApiResult<Option<Catatan>> {
            Ok(self.catatans.borrow().iter().find(|c| c.id == id).cloned())
        }

        async fn insert_catatan(&self, row: &NewCatatan) -> ApiResult<Catatan> {
            self.inserted.borrow_mut().push(row.clone());
            Ok(Catatan {
                id: format!("c{}", self.inserted.borrow().len()),
                user_id: row.user_id.clone(),
                judul_catatan: row.judul_catatan.clone(),
                isi_catatan: Some(row.isi_catatan.clone()),
                kategori_id: row.kategori_id.clone(),
                folder_id: row.folder_id.clone(),
                is_archived: row.is_archived,
                pinned: row.pinned,
                created_at: String::new(),
                updated_at: String::new(),
                kategori_catatan: None,
                folder_catatan: None,
            })
        }

        async fn update_catatan(
            &self,
            id: &str,
            _user_id: &str,
            patch: &CatatanPatch,
        ) -> ApiResult<()> {
            self.updated.borrow_mut().push((id.to_string(), patch.clone()));
            Ok(())
        }

        async fn delete_catatan(&self, id: &str, _user_id: &str) -> ApiResult<()> {
            self.deleted.borrow_mut().push(id.to_string());
            Ok(())
        }

        async fn fetch_kategoris(&self, _user_id: &str) -> ApiResult<Vec<KategoriRow>> {
            if self.fail_refresh {
                return Err(backend_error());
            }
            Ok(self.kategoris.borrow().clone())
        }

        async fn fetch_folders(&self, _user_id: &str) -> ApiResult<Vec<FolderRow>> {
            if self.fail_refresh {
                return Err(backend_error());
            }
            Ok(self.folders.borrow().clone())
        }
    }

    fn unwrap_ready<T>(poll: Poll<T>) -> T {
        match poll {
            Poll::Ready(v) => v,
            Poll::Pending => panic!("workflow should complete in one poll"),
        }
    }

    #[test]
    fn test_empty_title_fails_before_any_backend_call() {
        let store = MemoryStore::default();
        let snapshot = DraftSnapshot::default();
        let phases: RefCell<Vec<SubmitPhase>> = RefCell::new(Vec::new());

        let poll = poll_once(submit_new_catatan(&client(), &store, &snapshot, |p| {
            phases.borrow_mut().push(p)
        }));

        // Resolved on the first poll: no request future was ever created.
        match poll {
            Poll::Ready(Err(SubmitError::Validation(errors))) => {
                assert!(errors.judul_catatan.is_some());
            }
            other => panic!("expected immediate validation failure, got {other:?}"),
        }
        assert_eq!(
            *phases.borrow(),
            vec![SubmitPhase::Validating, SubmitPhase::Failed]
        );
    }

    #[test]
    fn test_missing_session_fails_before_any_backend_call() {
        let store = MemoryStore::default();
        let snapshot = DraftSnapshot {
            judul_catatan: "X".to_string(),
            ..Default::default()
        };

        let poll = poll_once(submit_new_catatan(&client(), &store, &snapshot, |_| {}));
        match poll {
            Poll::Ready(Err(SubmitError::Authentication)) => {}
            other => panic!("expected authentication failure, got {other:?}"),
        }
    }

    #[test]
    fn test_update_with_empty_title_is_validation_error() {
        let store = MemoryStore::default();
        let snapshot = DraftSnapshot {
            judul_catatan: "  ".to_string(),
            ..Default::default()
        };

        let poll = poll_once(submit_catatan_update(
            &client(),
            &store,
            "c1",
            &snapshot,
            |_| {},
        ));
        assert!(matches!(
            poll,
            Poll::Ready(Err(SubmitError::Validation(_)))
        ));
    }

    #[test]
    fn test_submit_error_display_messages() {
        assert_eq!(
            SubmitError::NotFound.to_string(),
            "Catatan tidak ditemukan"
        );
        assert_eq!(
            SubmitError::NotAuthorized.to_string(),
            "Anda tidak berhak mengubah catatan ini"
        );
        assert_eq!(
            SubmitError::Backend(String::new()).to_string(),
            "Terjadi kesalahan yang tidak diketahui"
        );
        assert_eq!(SubmitError::Backend("boom".to_string()).to_string(), "boom");
    }

    #[test]
    fn test_api_error_maps_unauthorized_to_authentication() {
        let e = ApiError::unauthorized();
        assert_eq!(SubmitError::from(e), SubmitError::Authentication);
    }

    #[test]
    fn test_submit_phase_display_kebab_case() {
        assert_eq!(SubmitPhase::ResolvingOptions.to_string(), "resolving-options");
        assert_eq!(SubmitPhase::Idle.to_string(), "idle");
    }

    #[test]
    fn test_new_kategori_creates_one_row_and_links_note() {
        let backend = FakeBackend::logged_in("u1");
        let store = MemoryStore::default();
        let snapshot = DraftSnapshot {
            judul_catatan: "Shopping List".to_string(),
            kategori_nama: "Belanja".to_string(),
            ..Default::default()
        };
        let phases: RefCell<Vec<SubmitPhase>> = RefCell::new(Vec::new());

        let outcome = unwrap_ready(poll_once(submit_new_catatan(
            &backend,
            &store,
            &snapshot,
            |p| phases.borrow_mut().push(p),
        )))
        .expect("submission should succeed");

        // Exactly one kategori row, and the note references its id.
        assert_eq!(backend.kategoris.borrow().len(), 1);
        let inserted = backend.inserted.borrow();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].kategori_id.as_deref(), Some("k1"));
        assert!(inserted[0].folder_id.is_none());

        assert_eq!(outcome.kategoris.as_ref().map(Vec::len), Some(1));
        assert_eq!(
            *phases.borrow(),
            vec![
                SubmitPhase::Validating,
                SubmitPhase::ResolvingOptions,
                SubmitPhase::Persisting,
                SubmitPhase::Refreshing,
                SubmitPhase::Done,
            ]
        );
    }

    #[test]
    fn test_existing_kategori_is_reused_not_recreated() {
        let backend = FakeBackend::logged_in("u1").with_kategori("k9", "Belanja");
        let store = MemoryStore::default();
        let snapshot = DraftSnapshot {
            judul_catatan: "X".to_string(),
            kategori_nama: "Belanja".to_string(),
            ..Default::default()
        };

        let result = unwrap_ready(poll_once(submit_new_catatan(
            &backend,
            &store,
            &snapshot,
            |_| {},
        )));

        assert!(result.is_ok());
        assert_eq!(backend.kategoris.borrow().len(), 1);
        assert_eq!(
            backend.inserted.borrow()[0].kategori_id.as_deref(),
            Some("k9")
        );
    }

    #[test]
    fn test_successful_submit_consumes_draft_slot() {
        let backend = FakeBackend::logged_in("u1");
        let store = MemoryStore::default();
        let snapshot = DraftSnapshot {
            judul_catatan: "X".to_string(),
            ..Default::default()
        };
        crate::drafts::save_draft(&store, &snapshot);

        let result = unwrap_ready(poll_once(submit_new_catatan(
            &backend,
            &store,
            &snapshot,
            |_| {},
        )));

        assert!(result.is_ok());
        assert!(crate::drafts::load_draft(&store).is_none());
    }

    #[test]
    fn test_edit_foreign_note_fails_without_mutation() {
        let backend = FakeBackend::logged_in("u1").with_catatan("c1", "u2");
        let store = MemoryStore::default();
        let snapshot = DraftSnapshot {
            judul_catatan: "X".to_string(),
            kategori_nama: "Baru".to_string(),
            ..Default::default()
        };

        let result = unwrap_ready(poll_once(submit_catatan_update(
            &backend,
            &store,
            "c1",
            &snapshot,
            |_| {},
        )));

        assert_eq!(result.unwrap_err(), SubmitError::NotAuthorized);
        // Fails before option resolution and before any write.
        assert!(backend.updated.borrow().is_empty());
        assert!(backend.kategoris.borrow().is_empty());
    }

    #[test]
    fn test_edit_missing_note_is_not_found() {
        let backend = FakeBackend::logged_in("u1");
        let store = MemoryStore::default();
        let snapshot = DraftSnapshot {
            judul_catatan: "X".to_string(),
            ..Default::default()
        };

        let result = unwrap_ready(poll_once(submit_catatan_update(
            &backend,
            &store,
            "missing",
            &snapshot,
            |_| {},
        )));

        assert_eq!(result.unwrap_err(), SubmitError::NotFound);
        assert!(backend.updated.borrow().is_empty());
    }

    #[test]
    fn test_edit_own_note_patches_row() {
        let backend = FakeBackend::logged_in("u1").with_catatan("c1", "u1");
        let store = MemoryStore::default();
        let snapshot = DraftSnapshot {
            judul_catatan: "  Revisi  ".to_string(),
            pinned: true,
            ..Default::default()
        };

        let result = unwrap_ready(poll_once(submit_catatan_update(
            &backend,
            &store,
            "c1",
            &snapshot,
            |_| {},
        )));

        assert!(result.is_ok());
        let updated = backend.updated.borrow();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].0, "c1");
        assert_eq!(updated[0].1.judul_catatan, "Revisi");
        assert!(updated[0].1.pinned);
    }

    #[test]
    fn test_failed_refresh_leaves_outcome_lists_unset() {
        let backend = FakeBackend {
            fail_refresh: true,
            ..FakeBackend::logged_in("u1")
        };
        let store = MemoryStore::default();
        let snapshot = DraftSnapshot {
            judul_catatan: "X".to_string(),
            ..Default::default()
        };

        let outcome = unwrap_ready(poll_once(submit_new_catatan(
            &backend,
            &store,
            &snapshot,
            |_| {},
        )))
        .expect("refresh failure is not fatal to the submission");

        // `None` tells callers to keep their current option lists.
        assert!(outcome.kategoris.is_none());
        assert!(outcome.folders.is_none());
        assert_eq!(backend.inserted.borrow().len(), 1);
    }

    #[test]
    fn test_delete_scopes_to_session_user() {
        let backend = FakeBackend::logged_in("u1").with_catatan("c1", "u1");
        let result = unwrap_ready(poll_once(delete_catatan(&backend, "c1")));
        assert!(result.is_ok());
        assert_eq!(*backend.deleted.borrow(), vec!["c1".to_string()]);
    }

    #[test]
    fn test_submit_phase_in_flight() {
        assert!(!SubmitPhase::Idle.is_in_flight());
        assert!(SubmitPhase::Validating.is_in_flight());
        assert!(SubmitPhase::Persisting.is_in_flight());
        assert!(!SubmitPhase::Done.is_in_flight());
        assert!(!SubmitPhase::Failed.is_in_flight());
    }
}
