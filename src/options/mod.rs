use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Identifier of a kategori/folder option.
///
/// `Pending` ids exist only in this client, for options the user typed in
/// but that have not been persisted yet. A saved catatan must never
/// reference one; submission resolves pending options to confirmed rows.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) enum OptionId {
    Confirmed(String),
    Pending(String),
}

impl OptionId {
    pub fn is_pending(&self) -> bool {
        matches!(self, OptionId::Pending(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            OptionId::Confirmed(s) | OptionId::Pending(s) => s,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NamedOption {
    pub id: OptionId,
    pub name: String,
}

impl NamedOption {
    pub fn confirmed(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: OptionId::Confirmed(id.into()),
            name: name.into(),
        }
    }
}

static PENDING_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Process-unique temporary id for a not-yet-persisted option.
pub(crate) fn pending_id() -> String {
    let counter = PENDING_COUNTER.fetch_add(1, Ordering::SeqCst);
    let mut hasher = DefaultHasher::new();
    counter.hash(&mut hasher);
    format!("temp_{}_{:x}", counter, hasher.finish())
}

/// Working set of kategori or folder options for the composition form.
///
/// Seeded from caller-supplied options merged with the backend list
/// (caller wins on name collision); grows via [`OptionSet::add_locally`]
/// which never performs IO.
#[derive(Clone, Debug, Default)]
pub(crate) struct OptionSet {
    items: Vec<NamedOption>,
}

impl OptionSet {
    pub fn new(items: Vec<NamedOption>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[NamedOption] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.items.iter().any(|o| o.name == name)
    }

    /// Merge caller options with the backend list. Caller options take
    /// precedence on name collision (exact, case-sensitive match).
    pub fn merged(initial: Vec<NamedOption>, fetched: Vec<NamedOption>) -> Self {
        let mut items = initial.clone();
        items.extend(
            fetched
                .into_iter()
                .filter(|f| !initial.iter().any(|i| i.name == f.name)),
        );
        Self { items }
    }

    /// Add a pending option for `name` if the trimmed name is non-empty and
    /// not already present. Returns the new option, or `None` on no-op.
    pub fn add_locally(&mut self, name: &str) -> Option<NamedOption> {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.contains_name(trimmed) {
            return None;
        }

        let option = NamedOption {
            id: OptionId::Pending(pending_id()),
            name: trimmed.to_string(),
        };
        self.items.push(option.clone());
        Some(option)
    }

    /// Replace local state with the authoritative backend list,
    /// deduplicating by identifier. Pending options are discarded; the
    /// backend rows carry the permanent ids.
    pub fn replace_confirmed(&mut self, fetched: Vec<NamedOption>) {
        let mut seen: Vec<&str> = Vec::with_capacity(fetched.len());
        let mut items = Vec::with_capacity(fetched.len());
        for o in &fetched {
            if !seen.contains(&o.id.as_str()) {
                seen.push(o.id.as_str());
                items.push(o.clone());
            }
        }
        self.items = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_ids_are_unique_and_marked() {
        let a = pending_id();
        let b = pending_id();
        assert_ne!(a, b);
        assert!(a.starts_with("temp_"));
        assert!(OptionId::Pending(a).is_pending());
    }

    #[test]
    fn test_merged_caller_wins_on_name_collision() {
        let initial = vec![NamedOption::confirmed("local-1", "Personal")];
        let fetched = vec![
            NamedOption::confirmed("db-1", "Personal"),
            NamedOption::confirmed("db-2", "Work"),
        ];

        let set = OptionSet::merged(initial, fetched);
        assert_eq!(set.len(), 2);
        assert_eq!(set.items()[0].id, OptionId::Confirmed("local-1".to_string()));
        assert_eq!(set.items()[1].name, "Work");
    }

    #[test]
    fn test_add_locally_trims_and_appends_pending() {
        let mut set = OptionSet::default();
        let added = set.add_locally("  Personal  ").expect("should add");
        assert_eq!(added.name, "Personal");
        assert!(added.id.is_pending());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_add_locally_duplicate_name_is_noop() {
        let mut set = OptionSet::new(vec![NamedOption::confirmed("db-1", "Personal")]);
        assert!(set.add_locally("Personal").is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_add_locally_case_sensitive_match() {
        let mut set = OptionSet::new(vec![NamedOption::confirmed("db-1", "Personal")]);
        assert!(set.add_locally("personal").is_some());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_add_locally_whitespace_only_is_noop() {
        let mut set = OptionSet::default();
        assert!(set.add_locally("").is_none());
        assert!(set.add_locally("   ").is_none());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_replace_confirmed_dedups_by_id_and_drops_pending() {
        let mut set = OptionSet::default();
        set.add_locally("Personal");

        set.replace_confirmed(vec![
            NamedOption::confirmed("db-1", "Personal"),
            NamedOption::confirmed("db-1", "Personal"),
            NamedOption::confirmed("db-2", "Work"),
        ]);

        assert_eq!(set.len(), 2);
        assert!(set.items().iter().all(|o| !o.id.is_pending()));
    }
}
