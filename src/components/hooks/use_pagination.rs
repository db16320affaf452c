use leptos::prelude::*;

/// Client-side pagination over an in-memory ordered collection: the
/// visible window is always a prefix that grows one page at a time.
///
/// The pager does not watch the collection; whenever the identity of the
/// underlying sequence changes (in practice: whenever the filter criteria
/// change), the caller must invoke `reset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Pager {
    page_size: usize,
    page: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 1,
        }
    }

    pub fn visible(&self, len: usize) -> usize {
        (self.page * self.page_size).min(len)
    }

    pub fn has_more(&self, len: usize) -> bool {
        self.visible(len) < len
    }

    /// Reveal one more page; no-op once everything is visible.
    pub fn load_more(&mut self, len: usize) {
        if self.has_more(len) {
            self.page += 1;
        }
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }
}

pub(crate) struct UsePagination<T: Clone + Send + Sync + 'static> {
    pub current_items: Signal<Vec<T>>,
    pub has_more: Signal<bool>,
    pub total_items: Signal<usize>,
    pager: RwSignal<Pager>,
    data: Signal<Vec<T>>,
}

// Signals are `Copy` handles, so the hook handle is too (a derive would
// needlessly require `T: Copy`).
impl<T: Clone + Send + Sync + 'static> Clone for UsePagination<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Clone + Send + Sync + 'static> Copy for UsePagination<T> {}

impl<T: Clone + Send + Sync + 'static> UsePagination<T> {
    pub fn load_more(&self) {
        let len = self.data.get_untracked().len();
        self.pager.update(|p| p.load_more(len));
    }

    pub fn reset(&self) {
        self.pager.update(|p| p.reset());
    }
}

pub(crate) fn use_pagination<T: Clone + Send + Sync + 'static>(
    data: Signal<Vec<T>>,
    page_size: usize,
) -> UsePagination<T> {
    let pager = RwSignal::new(Pager::new(page_size));

    let current_items = Signal::derive(move || {
        let p = pager.get();
        let items = data.get();
        let visible = p.visible(items.len());
        items[..visible].to_vec()
    });

    let has_more = Signal::derive(move || {
        let p = pager.get();
        p.has_more(data.get().len())
    });

    let total_items = Signal::derive(move || data.get().len());

    UsePagination {
        current_items,
        has_more,
        total_items,
        pager,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_prefix_and_has_more() {
        for (len, page_size) in [(25usize, 10usize), (10, 10), (3, 10), (1, 1)] {
            let pager = Pager::new(page_size);
            assert_eq!(pager.visible(len), page_size.min(len));
            assert_eq!(pager.has_more(len), len > page_size);
        }
    }

    #[test]
    fn test_empty_sequence() {
        let pager = Pager::new(10);
        assert_eq!(pager.visible(0), 0);
        assert!(!pager.has_more(0));
    }

    #[test]
    fn test_load_more_converges_then_noops() {
        let len = 25;
        let mut pager = Pager::new(10);

        let mut steps = 0;
        while pager.has_more(len) {
            pager.load_more(len);
            steps += 1;
            assert!(steps <= 3, "load_more must converge");
        }
        assert_eq!(pager.visible(len), len);

        // Further calls are no-ops.
        pager.load_more(len);
        pager.load_more(len);
        assert_eq!(pager.visible(len), len);
        assert!(!pager.has_more(len));
    }

    #[test]
    fn test_reset_returns_to_first_page() {
        let len = 25;
        let mut pager = Pager::new(10);
        pager.load_more(len);
        pager.load_more(len);
        assert_eq!(pager.visible(len), 25);

        pager.reset();
        assert_eq!(pager.visible(len), 10);
        assert!(pager.has_more(len));
    }

    #[test]
    fn test_zero_page_size_clamped() {
        let pager = Pager::new(0);
        assert_eq!(pager.visible(5), 1);
    }

    #[test]
    fn test_reset_against_shorter_replacement_sequence() {
        // Filter change: the caller resets, then reads against the new list.
        let mut pager = Pager::new(10);
        pager.load_more(25);
        pager.reset();
        assert_eq!(pager.visible(4), 4);
        assert!(!pager.has_more(4));
    }
}
