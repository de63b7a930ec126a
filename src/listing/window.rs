/// Records revealed per "load more" step
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Prefix of a result set revealed one page at a time.
///
/// The window never stores the results themselves; its length against a
/// result set of `total` records is `min(page_size * pages, total)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWindow {
    page_size: usize,
    pages: usize,
}

impl VisibleWindow {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            pages: 1,
        }
    }

    /// Window as if `requested` pages had been revealed, capped at the last
    /// page that actually holds records
    pub fn with_pages(page_size: usize, requested: usize, total: usize) -> Self {
        let mut window = Self::new(page_size);
        window.pages = requested.clamp(1, window.last_page(total));
        window
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn reset(&mut self) {
        self.pages = 1;
    }

    pub fn len(&self, total: usize) -> usize {
        self.page_size.saturating_mul(self.pages).min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.len(total) < total
    }

    /// Reveal the next page; a no-op returning `false` once everything is visible
    pub fn load_more(&mut self, total: usize) -> bool {
        if !self.has_more(total) {
            return false;
        }
        self.pages += 1;
        true
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.len(items.len())]
    }

    fn last_page(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }
}

impl Default for VisibleWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_page() {
        let window = VisibleWindow::default();
        assert_eq!(window.len(25), 10);
        assert_eq!(window.len(4), 4);
        assert_eq!(window.len(0), 0);
    }

    #[test]
    fn load_more_grows_by_page_size_until_exhausted() {
        let mut window = VisibleWindow::new(10);
        let total = 25;

        assert!(window.load_more(total));
        assert_eq!(window.len(total), 20);
        assert!(window.load_more(total));
        assert_eq!(window.len(total), 25);
        assert!(!window.has_more(total));

        assert!(!window.load_more(total));
        assert_eq!(window.pages(), 3);
        assert_eq!(window.len(total), 25);
    }

    #[test]
    fn length_is_min_of_pages_and_total() {
        for total in [0, 1, 9, 10, 11, 30, 31] {
            let mut window = VisibleWindow::new(10);
            for pages in 1..=4 {
                assert_eq!(window.len(total), (10 * pages).min(total));
                window.load_more(total);
            }
        }
    }

    #[test]
    fn with_pages_caps_at_last_populated_page() {
        let window = VisibleWindow::with_pages(10, 7, 12);
        assert_eq!(window.pages(), 2);
        assert_eq!(window.len(12), 12);

        let window = VisibleWindow::with_pages(10, 0, 12);
        assert_eq!(window.pages(), 1);
    }

    #[test]
    fn reset_returns_to_first_page() {
        let mut window = VisibleWindow::new(5);
        window.load_more(20);
        window.load_more(20);
        window.reset();
        assert_eq!(window.len(20), 5);
    }

    #[test]
    fn slice_is_a_prefix() {
        let items: Vec<u32> = (0..13).collect();
        let mut window = VisibleWindow::new(10);
        assert_eq!(window.slice(&items), &items[..10]);
        window.load_more(items.len());
        assert_eq!(window.slice(&items), &items[..]);
    }
}
