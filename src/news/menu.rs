use super::types::Category;

/// Viewport width (logical pixels) at or below which the menu collapses.
pub const COMPACT_BREAKPOINT: u32 = 768;

/// Collapsible category menu state.
///
/// Above the breakpoint the menu is always shown. At or below it the menu is
/// hidden until toggled open, and picking a category closes it again. The
/// cursor only exists for keyboard navigation and is clamped to the list.
#[derive(Debug, Clone, Default)]
pub struct CategoryMenu {
    open: bool,
    cursor: usize,
}

impl CategoryMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        tracing::debug!(open = self.open, "Category menu toggled");
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_compact(viewport_width: u32) -> bool {
        viewport_width <= COMPACT_BREAKPOINT
    }

    /// Whether the category list should be drawn at this width.
    pub fn is_visible(&self, viewport_width: u32) -> bool {
        !Self::is_compact(viewport_width) || self.open
    }

    /// Record a pick and return the category name to filter by.
    ///
    /// Closes the menu on compact viewports.
    pub fn select<'a>(&mut self, category: &'a Category, viewport_width: u32) -> &'a str {
        if Self::is_compact(viewport_width) {
            self.open = false;
        }
        &category.name
    }

    /// Pick the category under the cursor, if any.
    pub fn select_current<'a>(
        &mut self,
        categories: &'a [Category],
        viewport_width: u32,
    ) -> Option<&'a str> {
        let category = categories.get(self.cursor)?;
        Some(self.select(category, viewport_width))
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Keep the cursor inside a list that may have shrunk after a refresh.
    pub fn clamp_cursor(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}
