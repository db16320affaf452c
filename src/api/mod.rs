use crate::models::{Catatan, CurrentUser, FolderRow, KategoriRow};
use crate::storage::{KeyValueStore, TOKEN_KEY, USER_KEY};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    pub(crate) fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub supabase_url: String,
    pub anon_key: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let mut config = Self {
            supabase_url: "http://localhost:54321".to_string(),
            anon_key: "dev-anon-key".to_string(),
        };

        // Deployment injects `window.ENV.SUPABASE_URL` / `window.ENV.SUPABASE_ANON_KEY`.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    if let Ok(url) = js_sys::Reflect::get(&env, &"SUPABASE_URL".into()) {
                        if let Some(url) = url.as_string() {
                            config.supabase_url = url;
                        }
                    }
                    if let Ok(key) = js_sys::Reflect::get(&env, &"SUPABASE_ANON_KEY".into()) {
                        if let Some(key) = key.as_string() {
                            config.anon_key = key;
                        }
                    }
                }
            }
        }

        config
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Clone, Debug)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize, Clone, Debug)]
struct SignupRequest {
    email: String,
    password: String,
    data: SignupMetadata,
}

#[derive(Serialize, Clone, Debug)]
struct SignupMetadata {
    full_name: String,
}

#[derive(Deserialize, Clone, Debug)]
pub(crate) struct AuthResponse {
    pub access_token: String,
    pub user: CurrentUser,
}

/// Insert payload for a catatan row. Kategori/folder ids must already be
/// backend-confirmed; pending option ids never reach this struct.
#[derive(Serialize, Clone, Debug)]
pub(crate) struct NewCatatan {
    pub judul_catatan: String,
    pub isi_catatan: String,
    pub kategori_id: Option<String>,
    pub folder_id: Option<String>,
    pub is_archived: bool,
    pub pinned: bool,
    pub user_id: String,
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct CatatanPatch {
    pub judul_catatan: String,
    pub isi_catatan: String,
    pub kategori_id: Option<String>,
    pub folder_id: Option<String>,
    pub is_archived: bool,
    pub pinned: bool,
}

#[derive(Serialize, Clone, Debug)]
struct NewNamedRow {
    nama: String,
    user_id: String,
}

/// PostgREST `eq.` filter value, url-encoded so names with spaces or
/// reserved characters survive the query string.
pub(crate) fn eq_filter(value: &str) -> String {
    format!("eq.{}", urlencoding::encode(value))
}

/// Total from a `Content-Range` header, e.g. `0-0/57` or `*/0`.
pub(crate) fn parse_content_range_total(header: &str) -> Option<u32> {
    let (_, total) = header.rsplit_once('/')?;
    total.trim().parse().ok()
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) anon_key: String,
    pub(crate) token: Option<String>,
    pub(crate) user: Option<CurrentUser>,
}

impl ApiClient {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            base_url,
            anon_key,
            token: None,
            user: None,
        }
    }

    pub fn load_from_storage(store: &dyn KeyValueStore) -> Self {
        let env = EnvConfig::new();
        let token = store.get(TOKEN_KEY);
        let user = store
            .get(USER_KEY)
            .and_then(|json| serde_json::from_str(&json).ok());

        Self {
            base_url: env.supabase_url,
            anon_key: env.anon_key,
            token,
            user,
        }
    }

    pub fn save_to_storage(&self, store: &dyn KeyValueStore) {
        if let Some(token) = &self.token {
            store.set(TOKEN_KEY, token);
        }
        if let Some(user) = &self.user {
            if let Ok(json) = serde_json::to_string(user) {
                store.set(USER_KEY, &json);
            }
        }
    }

    pub fn clear_storage(store: &dyn KeyValueStore) {
        store.remove(TOKEN_KEY);
        store.remove(USER_KEY);
    }

    pub fn set_session(&mut self, token: String, user: CurrentUser) {
        self.token = Some(token);
        self.user = Some(user);
    }

    pub fn logout(&mut self, store: &dyn KeyValueStore) {
        self.token = None;
        self.user = None;
        Self::clear_storage(store);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    /// Id of the authenticated user, or `Unauthorized` when no session.
    pub fn require_user_id(&self) -> ApiResult<String> {
        match (&self.token, &self.user) {
            (Some(_), Some(user)) => Ok(user.id.clone()),
            _ => Err(ApiError::unauthorized()),
        }
    }

    fn with_headers(&self, mut req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req = req.header("apikey", self.anon_key.clone());
        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req
    }

    fn rest_url(&self, table: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}/rest/v1/{}", self.base_url, table);
        for (i, (k, v)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(k);
            url.push('=');
            url.push_str(v);
        }
        url
    }

    async fn decode<T: serde::de::DeserializeOwned>(res: reqwest::Response) -> ApiResult<T> {
        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Request failed"))
        }
    }

    async fn rest_get<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let req = self.with_headers(client.get(self.rest_url(table, query)));
        let res = req.send().await.map_err(ApiError::network)?;
        Self::decode(res).await
    }

    /// Insert returning the created row (`Prefer: return=representation`).
    async fn rest_insert<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        body: &impl serde::Serialize,
    ) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let req = self
            .with_headers(client.post(self.rest_url(table, &[])))
            .header("Prefer", "return=representation")
            .json(body);
        let res = req.send().await.map_err(ApiError::network)?;

        let mut rows: Vec<T> = Self::decode(res).await?;
        if rows.is_empty() {
            return Err(ApiError::parse("insert returned no rows"));
        }
        Ok(rows.remove(0))
    }

    async fn rest_patch(
        &self,
        table: &str,
        query: &[(&str, String)],
        body: &impl serde::Serialize,
    ) -> ApiResult<()> {
        let client = reqwest::Client::new();
        let req = self
            .with_headers(client.patch(self.rest_url(table, query)))
            .json(body);
        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(())
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Update failed"))
        }
    }

    async fn rest_delete(&self, table: &str, query: &[(&str, String)]) -> ApiResult<()> {
        let client = reqwest::Client::new();
        let req = self.with_headers(client.delete(self.rest_url(table, query)));
        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(())
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Delete failed"))
        }
    }

    /// Exact row count without fetching rows (`Prefer: count=exact`).
    async fn rest_count(&self, table: &str, query: &[(&str, String)]) -> ApiResult<u32> {
        let client = reqwest::Client::new();
        let req = self
            .with_headers(client.get(self.rest_url(table, query)))
            .header("Prefer", "count=exact")
            .header("Range", "0-0");
        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().as_u16() == 401 {
            return Err(ApiError::unauthorized());
        }
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::http(status, body, "Count failed"));
        }

        res.headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| ApiError::parse("missing Content-Range header"))
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let client = reqwest::Client::new();
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let res = client
            .post(url)
            .header("apikey", self.anon_key.clone())
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            Err(ApiError {
                kind: ApiErrorKind::Http,
                message: "Email atau password salah".to_string(),
            })
        }
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> ApiResult<AuthResponse> {
        let client = reqwest::Client::new();
        let url = format!("{}/auth/v1/signup", self.base_url);
        let res = client
            .post(url)
            .header("apikey", self.anon_key.clone())
            .json(&SignupRequest {
                email: email.to_string(),
                password: password.to_string(),
                data: SignupMetadata {
                    full_name: full_name.to_string(),
                },
            })
            .send()
            .await
            .map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Signup failed"))
        }
    }

    pub async fn fetch_catatans(&self, user_id: &str) -> ApiResult<Vec<Catatan>> {
        self.rest_get(
            "catatan",
            &[
                (
                    "select",
                    "*,kategori_catatan(id,nama),folder_catatan(id,nama)".to_string(),
                ),
                ("user_id", eq_filter(user_id)),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await
    }

    pub async fn fetch_catatan(&self, id: &str, user_id: &str) -> ApiResult<Option<Catatan>> {
        let rows: Vec<Catatan> = self
            .rest_get(
                "catatan",
                &[
                    (
                        "select",
                        "*,kategori_catatan(id,nama),folder_catatan(id,nama)".to_string(),
                    ),
                    ("id", eq_filter(id)),
                    ("user_id", eq_filter(user_id)),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Row by id regardless of owner, for the edit ownership check.
    /// A strict-RLS deployment returns no row here; callers then report
    /// "not found" instead of "not authorized".
    pub async fn fetch_catatan_any_owner(&self, id: &str) -> ApiResult<Option<Catatan>> {
        let rows: Vec<Catatan> = self
            .rest_get(
                "catatan",
                &[("select", "*".to_string()), ("id", eq_filter(id))],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    pub async fn insert_catatan(&self, row: &NewCatatan) -> ApiResult<Catatan> {
        self.rest_insert("catatan", row).await
    }

    pub async fn update_catatan(
        &self,
        id: &str,
        user_id: &str,
        patch: &CatatanPatch,
    ) -> ApiResult<()> {
        self.rest_patch(
            "catatan",
            &[("id", eq_filter(id)), ("user_id", eq_filter(user_id))],
            patch,
        )
        .await
    }

    pub async fn delete_catatan(&self, id: &str, user_id: &str) -> ApiResult<()> {
        self.rest_delete(
            "catatan",
            &[("id", eq_filter(id)), ("user_id", eq_filter(user_id))],
        )
        .await
    }

    pub async fn fetch_kategoris(&self, user_id: &str) -> ApiResult<Vec<KategoriRow>> {
        self.rest_get(
            "kategori_catatan",
            &[
                ("select", "id,nama".to_string()),
                ("user_id", eq_filter(user_id)),
                ("order", "nama.asc".to_string()),
            ],
        )
        .await
    }

    pub async fn fetch_folders(&self, user_id: &str) -> ApiResult<Vec<FolderRow>> {
        self.rest_get(
            "folder_catatan",
            &[
                ("select", "id,nama".to_string()),
                ("user_id", eq_filter(user_id)),
                ("order", "nama.asc".to_string()),
            ],
        )
        .await
    }

    /// Exact case-sensitive name lookup scoped to the user.
    pub async fn find_kategori_by_nama(
        &self,
        nama: &str,
        user_id: &str,
    ) -> ApiResult<Option<KategoriRow>> {
        let rows: Vec<KategoriRow> = self
            .rest_get(
                "kategori_catatan",
                &[
                    ("select", "id,nama".to_string()),
                    ("nama", eq_filter(nama)),
                    ("user_id", eq_filter(user_id)),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    pub async fn find_folder_by_nama(
        &self,
        nama: &str,
        user_id: &str,
    ) -> ApiResult<Option<FolderRow>> {
        let rows: Vec<FolderRow> = self
            .rest_get(
                "folder_catatan",
                &[
                    ("select", "id,nama".to_string()),
                    ("nama", eq_filter(nama)),
                    ("user_id", eq_filter(user_id)),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    pub async fn create_kategori(&self, nama: &str, user_id: &str) -> ApiResult<KategoriRow> {
        self.rest_insert(
            "kategori_catatan",
            &NewNamedRow {
                nama: nama.to_string(),
                user_id: user_id.to_string(),
            },
        )
        .await
    }

    pub async fn create_folder(&self, nama: &str, user_id: &str) -> ApiResult<FolderRow> {
        self.rest_insert(
            "folder_catatan",
            &NewNamedRow {
                nama: nama.to_string(),
                user_id: user_id.to_string(),
            },
        )
        .await
    }

    pub async fn count_catatan_by_kategori(
        &self,
        kategori_id: &str,
        user_id: &str,
    ) -> ApiResult<u32> {
        self.rest_count(
            "catatan",
            &[
                ("select", "id".to_string()),
                ("kategori_id", eq_filter(kategori_id)),
                ("user_id", eq_filter(user_id)),
            ],
        )
        .await
    }

    pub async fn count_catatan_by_folder(&self, folder_id: &str, user_id: &str) -> ApiResult<u32> {
        self.rest_count(
            "catatan",
            &[
                ("select", "id".to_string()),
                ("folder_id", eq_filter(folder_id)),
                ("user_id", eq_filter(user_id)),
            ],
        )
        .await
    }
}
