//! Stepped "show more" pagination over an in-memory aggregate

/// Initial and step size on the Search screen
pub const SEARCH_PAGE_SIZE: usize = 10;
/// Initial and step size on the Groups screen
pub const GROUPS_PAGE_SIZE: usize = 5;

/// Items-to-show cursor
///
/// The count only grows through [`load_more`](Self::load_more) and goes back
/// to one page on [`reset`](Self::reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    results_to_show: usize,
}

impl Paginator {
    /// Create a paginator showing one page; a zero page size is treated as one
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            results_to_show: page_size,
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current items-to-show count
    #[must_use]
    pub const fn results_to_show(&self) -> usize {
        self.results_to_show
    }

    /// The visible prefix of `items`
    #[must_use]
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.results_to_show.min(items.len())]
    }

    /// Whether `len` items hold more than are shown
    #[must_use]
    pub const fn can_load_more(&self, len: usize) -> bool {
        self.results_to_show < len
    }

    /// Show one more page
    pub fn load_more(&mut self) {
        self.results_to_show = self.results_to_show.saturating_add(self.page_size);
    }

    /// Back to a single page
    pub fn reset(&mut self) {
        self.results_to_show = self.page_size;
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(SEARCH_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_is_min_of_cursor_and_len() {
        let items: Vec<u32> = (0..12).collect();
        let mut pager = Paginator::new(5);
        assert_eq!(pager.visible(&items).len(), 5);
        assert!(pager.can_load_more(items.len()));

        pager.load_more();
        assert_eq!(pager.visible(&items).len(), 10);
        assert!(pager.can_load_more(items.len()));

        pager.load_more();
        assert_eq!(pager.results_to_show(), 15);
        assert_eq!(pager.visible(&items), &items[..]);
        assert!(!pager.can_load_more(items.len()));
    }

    #[test]
    fn test_cursor_only_grows_until_reset() {
        let mut pager = Paginator::new(GROUPS_PAGE_SIZE);
        let mut last = pager.results_to_show();
        for _ in 0..4 {
            pager.load_more();
            assert!(pager.results_to_show() > last);
            last = pager.results_to_show();
        }
        pager.reset();
        assert_eq!(pager.results_to_show(), GROUPS_PAGE_SIZE);
    }

    #[test]
    fn test_exact_fit_cannot_load_more() {
        let items = vec!['a'; 10];
        let pager = Paginator::default();
        assert_eq!(pager.page_size(), SEARCH_PAGE_SIZE);
        assert!(!pager.can_load_more(items.len()));
    }

    #[test]
    fn test_zero_page_size() {
        let pager = Paginator::new(0);
        assert_eq!(pager.page_size(), 1);
        assert!(pager.visible::<u8>(&[]).is_empty());
    }
}
