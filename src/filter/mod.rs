use crate::models::Catatan;

/// Mutually exclusive kategori/folder selection for the list view.
///
/// Selecting a kategori clears any selected folder and vice versa, so at
/// most one of the two is ever active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CatatanFilter {
    pub selected_kategori: Option<String>,
    pub selected_folder: Option<String>,
}

impl CatatanFilter {
    pub fn select_kategori(&mut self, kategori_id: Option<String>) {
        self.selected_kategori = kategori_id;
        self.selected_folder = None;
    }

    pub fn select_folder(&mut self, folder_id: Option<String>) {
        self.selected_folder = folder_id;
        self.selected_kategori = None;
    }

    pub fn is_active(&self) -> bool {
        self.selected_kategori.is_some() || self.selected_folder.is_some()
    }

    pub fn matches(&self, catatan: &Catatan) -> bool {
        if let Some(k) = &self.selected_kategori {
            if catatan.kategori_id.as_deref() != Some(k.as_str()) {
                return false;
            }
        }
        if let Some(f) = &self.selected_folder {
            if catatan.folder_id.as_deref() != Some(f.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Filtered, display-ordered list: archived notes are dropped unless
/// `show_archived`, pinned notes come first. The backend already orders
/// by `created_at desc`; the sort here is stable so that order survives
/// within each group.
pub(crate) fn visible_catatans(
    all: &[Catatan],
    filter: &CatatanFilter,
    show_archived: bool,
) -> Vec<Catatan> {
    let mut out: Vec<Catatan> = all
        .iter()
        .filter(|c| (show_archived || !c.is_archived) && filter.matches(c))
        .cloned()
        .collect();
    out.sort_by_key(|c| !c.pinned);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catatan(id: &str, kategori: Option<&str>, folder: Option<&str>) -> Catatan {
        Catatan {
            id: id.to_string(),
            user_id: "u1".to_string(),
            judul_catatan: format!("note {id}"),
            isi_catatan: None,
            kategori_id: kategori.map(|s| s.to_string()),
            folder_id: folder.map(|s| s.to_string()),
            is_archived: false,
            pinned: false,
            created_at: String::new(),
            updated_at: String::new(),
            kategori_catatan: None,
            folder_catatan: None,
        }
    }

    #[test]
    fn test_select_folder_clears_kategori() {
        let mut filter = CatatanFilter::default();
        filter.select_kategori(Some("k1".to_string()));
        assert_eq!(filter.selected_kategori.as_deref(), Some("k1"));

        filter.select_folder(Some("f1".to_string()));
        assert!(filter.selected_kategori.is_none());
        assert_eq!(filter.selected_folder.as_deref(), Some("f1"));
    }

    #[test]
    fn test_select_kategori_clears_folder() {
        let mut filter = CatatanFilter::default();
        filter.select_folder(Some("f1".to_string()));
        filter.select_kategori(Some("k1".to_string()));
        assert!(filter.selected_folder.is_none());
    }

    #[test]
    fn test_filter_by_kategori() {
        let all = vec![
            catatan("a", Some("k1"), None),
            catatan("b", Some("k2"), None),
            catatan("c", None, None),
        ];
        let mut filter = CatatanFilter::default();
        filter.select_kategori(Some("k1".to_string()));

        let visible = visible_catatans(&all, &filter, false);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "a");
    }

    #[test]
    fn test_no_filter_returns_all_unarchived() {
        let mut archived = catatan("a", None, None);
        archived.is_archived = true;
        let all = vec![archived, catatan("b", None, None)];

        let filter = CatatanFilter::default();
        assert_eq!(visible_catatans(&all, &filter, false).len(), 1);
        assert_eq!(visible_catatans(&all, &filter, true).len(), 2);
    }

    #[test]
    fn test_pinned_sorts_first_keeping_relative_order() {
        let mut pinned = catatan("p", None, None);
        pinned.pinned = true;
        let all = vec![catatan("a", None, None), pinned, catatan("b", None, None)];

        let visible = visible_catatans(&all, &CatatanFilter::default(), false);
        let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["p", "a", "b"]);
    }
}
