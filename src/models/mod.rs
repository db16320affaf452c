use serde::{Deserialize, Serialize};

/// Authenticated account as returned by the auth endpoint.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct CurrentUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Joined kategori/folder name row embedded in a catatan response.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NamedRow {
    pub id: String,
    pub nama: String,
}

/// A user-owned note row.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct Catatan {
    pub id: String,
    pub user_id: String,
    pub judul_catatan: String,
    #[serde(default)]
    pub isi_catatan: Option<String>,
    #[serde(default)]
    pub kategori_id: Option<String>,
    #[serde(default)]
    pub folder_id: Option<String>,
    pub is_archived: bool,
    pub pinned: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,

    /// Present when the list query embeds the joined name rows.
    #[serde(default)]
    pub kategori_catatan: Option<NamedRow>,
    #[serde(default)]
    pub folder_catatan: Option<NamedRow>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct KategoriRow {
    pub id: String,
    pub nama: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FolderRow {
    pub id: String,
    pub nama: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Sidebar entry: a kategori/folder with its per-user note count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CountedOption {
    pub id: String,
    pub name: String,
    pub count: u32,
}
