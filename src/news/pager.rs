/// Number of articles on one page.
pub const PAGE_SIZE: usize = 20;

/// Offset-based paginator over a list owned elsewhere.
///
/// The paginator never holds the items. The owner reports the list length
/// with [`Paginator::set_total`] and asks for the visible window with
/// [`Paginator::slice`]. Navigation is clamped to existing pages, while
/// `slice` itself tolerates any offset and simply returns fewer (or zero)
/// items on overrun.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    first: usize,
    rows: usize,
    total: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Paginator {
    /// A zero page size is treated as one row per page.
    pub fn new(rows: usize) -> Self {
        Self {
            first: 0,
            rows: rows.max(1),
            total: 0,
        }
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Update the item count without moving the offset.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
    }

    /// Go back to offset 0.
    pub fn reset(&mut self) {
        self.first = 0;
    }

    /// Page-change callback: the view reports a new offset and page size.
    pub fn page_change(&mut self, first: usize, rows: usize) {
        self.rows = rows.max(1);
        self.first = first;
    }

    /// The visible window `[first, first + rows)` of `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.first.min(items.len());
        let end = self.first.saturating_add(self.rows).min(items.len());
        &items[start..end]
    }

    /// Zero-based index of the current page.
    pub fn page_index(&self) -> usize {
        self.first / self.rows
    }

    /// Number of pages; an empty list still has one (empty) page.
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.rows).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page_index() + 1 < self.page_count()
    }

    pub fn has_prev(&self) -> bool {
        self.first > 0
    }

    /// Advance one page. Returns false when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.first = (self.page_index() + 1) * self.rows;
        true
    }

    /// Go back one page. Returns false when already on the first page.
    pub fn prev_page(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.first = self.page_index().saturating_sub(1) * self.rows;
        true
    }

    pub fn first_page(&mut self) {
        self.first = 0;
    }

    pub fn last_page(&mut self) {
        self.first = (self.page_count() - 1) * self.rows;
    }

    /// Human-readable window, e.g. "21-25 of 25". Empty lists read "0 of 0".
    pub fn range_label(&self) -> String {
        if self.total == 0 || self.first >= self.total {
            return format!("0 of {}", self.total);
        }
        let end = self.first.saturating_add(self.rows).min(self.total);
        format!("{}-{} of {}", self.first + 1, end, self.total)
    }
}
