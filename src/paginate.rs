/// One page of a sliced list plus the navigation facts the UI needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Pagination state. The current page is 1-based and always kept
/// inside `[1, total_pages]`; when the upstream list shrinks below the
/// current page the next `page()` call snaps back to page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }

    /// Slice out the current page. Restores the page invariant first:
    /// a stale page past the end of a shrunken list resets to 1.
    pub fn page<T: Clone>(&mut self, records: &[T]) -> Page<T> {
        let total_items = records.len();
        let total_pages = self.total_pages(total_items);

        if total_pages > 0 && self.page > total_pages {
            self.page = 1;
        }

        let start = (self.page - 1) * self.page_size;
        let end = (start + self.page_size).min(total_items);
        let items = if start < total_items {
            records[start..end].to_vec()
        } else {
            Vec::new()
        };

        Page {
            items,
            page: self.page,
            total_pages,
            total_items,
            has_next: self.page < total_pages,
            has_prev: self.page > 1,
        }
    }

    /// Out-of-range requests clamp silently; they never error.
    pub fn go_to(&mut self, page: usize, total_items: usize) {
        let total_pages = self.total_pages(total_items);
        if total_pages == 0 {
            self.page = 1;
        } else {
            self.page = page.clamp(1, total_pages);
        }
    }

    pub fn next(&mut self, total_items: usize) {
        if self.page < self.total_pages(total_items) {
            self.page += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Changing the page size always lands back on the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        let pager = Pager::new(10);
        assert_eq!(pager.total_pages(0), 0);
        assert_eq!(pager.total_pages(1), 1);
        assert_eq!(pager.total_pages(10), 1);
        assert_eq!(pager.total_pages(11), 2);
        assert_eq!(pager.total_pages(25), 3);
    }

    #[test]
    fn page_slices_the_expected_window() {
        let mut pager = Pager::new(10);
        pager.go_to(2, 25);
        let page = pager.page(&numbers(25));
        assert_eq!(page.items, (10..20).collect::<Vec<_>>());
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 25);
        assert!(page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn last_page_truncates() {
        let mut pager = Pager::new(10);
        pager.go_to(3, 25);
        let page = pager.page(&numbers(25));
        assert_eq!(page.items, (20..25).collect::<Vec<_>>());
        assert!(!page.has_next);
    }

    #[test]
    fn out_of_range_requests_clamp_silently() {
        let mut pager = Pager::new(10);
        pager.go_to(8, 25); // totalPages + 5
        assert_eq!(pager.current_page(), 3);
        pager.go_to(0, 25);
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn empty_list_yields_zero_pages_and_page_one() {
        let mut pager = Pager::new(10);
        pager.go_to(4, 0);
        let page = pager.page(&numbers(0));
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert!(!page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn shrinking_upstream_list_resets_to_page_one() {
        let mut pager = Pager::new(10);
        pager.go_to(3, 25);
        // The list shrinks (say, a filter kicked in) below page 3.
        let page = pager.page(&numbers(12));
        assert_eq!(page.page, 1);
        assert_eq!(page.items, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn changing_page_size_resets_to_page_one() {
        let mut pager = Pager::new(10);
        pager.go_to(2, 25);
        pager.set_page_size(5);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.page_size(), 5);
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut pager = Pager::new(10);
        pager.previous();
        assert_eq!(pager.current_page(), 1);
        pager.next(25);
        pager.next(25);
        pager.next(25); // already on the last page
        assert_eq!(pager.current_page(), 3);
    }
}
