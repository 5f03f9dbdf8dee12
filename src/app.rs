use crate::config::Config;
use crate::news::{Article, CategoryMenu, NewsBrowser, NewsBundle};
use crate::source::NewsSource;
use crate::util::{resolve_link, LinkError, MAX_SEARCH_QUERY_LENGTH};
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::sync::Arc;
use tokio::time::Instant;

/// Maximum scroll offset for the reader view (ratatui u16 limit).
pub const MAX_SCROLL: usize = u16::MAX as usize;

/// How long a status message stays on screen.
const STATUS_TTL_SECS: u64 = 3;

// ============================================================================
// View and Focus Enums
// ============================================================================

/// Current view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Browse, // Category menu + article list
    Reader, // Full-screen article
}

/// Which panel has focus in Browse view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Menu,
    Articles,
}

/// Events from background tasks
pub enum AppEvent {
    /// A load from the source finished.
    ///
    /// `generation` is the counter value when the load was spawned; results
    /// from superseded loads are dropped.
    Loaded {
        generation: u64,
        result: Result<NewsBundle, String>,
    },
    /// A background task panicked.
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// App State
// ============================================================================

pub struct App {
    pub config: Config,
    pub source: NewsSource,
    pub browser: NewsBrowser,
    pub menu: CategoryMenu,

    pub view: View,
    pub focus: Focus,
    /// Cursor within the visible page.
    pub selected: usize,

    pub search_mode: bool,
    pub search_input: String,

    pub reader_article: Option<Arc<Article>>,
    pub scroll_offset: usize,
    /// Rendered line count of the reader body, updated by the reader widget.
    pub reader_total_lines: usize,
    pub reader_visible_lines: usize,

    pub show_help: bool,
    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub needs_redraw: bool,

    /// Terminal width in columns, updated on every draw.
    pub viewport_columns: u16,

    pub loading: bool,
    pub load_generation: u64,
    pub last_loaded: Option<DateTime<Local>>,
    pub last_refresh: Instant,
}

impl App {
    pub fn new(config: Config, source: NewsSource, bundle: NewsBundle) -> Self {
        let browser = NewsBrowser::new(bundle, config.page_size, config.search_scope);
        Self {
            config,
            source,
            browser,
            menu: CategoryMenu::new(),
            view: View::Browse,
            focus: Focus::Articles,
            selected: 0,
            search_mode: false,
            search_input: String::new(),
            reader_article: None,
            scroll_offset: 0,
            reader_total_lines: 0,
            reader_visible_lines: 0,
            show_help: false,
            status_message: None,
            needs_redraw: true,
            viewport_columns: 0,
            loading: false,
            load_generation: 0,
            last_loaded: None,
            last_refresh: Instant::now(),
        }
    }

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired. Returns true if a message was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    // ------------------------------------------------------------------------
    // Category menu
    // ------------------------------------------------------------------------

    /// Viewport width in logical pixels for the menu breakpoint.
    pub fn viewport_px(&self) -> u32 {
        u32::from(self.viewport_columns).saturating_mul(self.config.cell_width_px)
    }

    pub fn menu_visible(&self) -> bool {
        self.menu.is_visible(self.viewport_px())
    }

    pub fn toggle_menu(&mut self) {
        self.menu.toggle();
        if self.menu_visible() {
            self.focus = Focus::Menu;
        } else if self.focus == Focus::Menu {
            self.focus = Focus::Articles;
        }
    }

    /// Filter by the category under the menu cursor.
    pub fn select_category_at_cursor(&mut self) {
        let width = self.viewport_px();
        let Some(name) = self
            .menu
            .select_current(self.browser.categories(), width)
            .map(str::to_string)
        else {
            return;
        };
        self.browser.select_category(Some(&name));
        self.after_filter_change();
        if !self.menu_visible() {
            self.focus = Focus::Articles;
        }
        self.set_status(format!(
            "{}: {} articles",
            name,
            self.browser.filtered().len()
        ));
    }

    pub fn clear_filters(&mut self) {
        self.browser.clear_filters();
        self.search_input.clear();
        self.after_filter_change();
        self.set_status("Filters cleared");
    }

    // ------------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------------

    pub fn enter_search(&mut self) {
        self.search_mode = true;
        self.search_input.clear();
    }

    pub fn cancel_search(&mut self) {
        self.search_mode = false;
        self.search_input.clear();
    }

    pub fn push_search_char(&mut self, c: char) {
        if self.search_input.chars().count() < MAX_SEARCH_QUERY_LENGTH {
            self.search_input.push(c);
        }
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
    }

    /// Apply the typed term and leave search mode.
    pub fn submit_search(&mut self) {
        self.search_mode = false;
        let term = self.search_input.trim().to_string();
        self.browser.search(&term);
        self.after_filter_change();
        let count = self.browser.filtered().len();
        if count == 0 {
            self.set_status(format!("No articles match \"{}\"", term));
        } else {
            self.set_status(format!("{} articles match \"{}\"", count, term));
        }
    }

    fn after_filter_change(&mut self) {
        self.selected = 0;
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn nav_down(&mut self) {
        match self.focus {
            Focus::Menu => self.menu.cursor_down(self.browser.categories().len()),
            Focus::Articles => {
                if self.selected + 1 < self.browser.page().len() {
                    self.selected += 1;
                }
            }
        }
    }

    pub fn nav_up(&mut self) {
        match self.focus {
            Focus::Menu => self.menu.cursor_up(),
            Focus::Articles => self.selected = self.selected.saturating_sub(1),
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Articles if self.menu_visible() => Focus::Menu,
            _ => Focus::Articles,
        };
    }

    pub fn next_page(&mut self) {
        if self.browser.next_page() {
            self.selected = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.browser.prev_page() {
            self.selected = 0;
        }
    }

    pub fn first_page(&mut self) {
        self.browser.first_page();
        self.selected = 0;
    }

    pub fn last_page(&mut self) {
        self.browser.last_page();
        self.selected = 0;
    }

    pub fn selected_article(&self) -> Option<Arc<Article>> {
        self.browser.open_article(self.selected)
    }

    // ------------------------------------------------------------------------
    // Reader
    // ------------------------------------------------------------------------

    /// Open the selected article in the reader. Returns false when the page
    /// is empty.
    pub fn enter_reader(&mut self) -> bool {
        let Some(article) = self.selected_article() else {
            return false;
        };
        tracing::debug!(title = %article.title, "Opening article");
        self.reader_article = Some(article);
        self.scroll_offset = 0;
        self.view = View::Reader;
        true
    }

    pub fn exit_reader(&mut self) {
        self.view = View::Browse;
        self.reader_article = None;
        self.scroll_offset = 0;
    }

    fn max_scroll(&self) -> usize {
        self.reader_total_lines
            .saturating_sub(self.reader_visible_lines)
            .min(MAX_SCROLL)
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn clamp_reader_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Absolute link of the article shown in the reader, or the selected one.
    pub fn current_link(&self) -> Result<url::Url, LinkError> {
        let article = match self.view {
            View::Reader => self.reader_article.clone(),
            View::Browse => self.selected_article(),
        };
        let article = article.ok_or(LinkError::Missing)?;
        resolve_link(&article.link, &self.config.site_url)
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    /// Mark a load as started and return its generation.
    pub fn begin_load(&mut self) -> u64 {
        self.load_generation = self.load_generation.wrapping_add(1);
        self.loading = true;
        self.last_refresh = Instant::now();
        self.load_generation
    }

    /// Apply a finished load. Stale generations are ignored.
    pub fn finish_load(&mut self, generation: u64, result: Result<NewsBundle, String>) {
        if generation != self.load_generation {
            tracing::debug!(
                generation,
                current = self.load_generation,
                "Dropping stale load result"
            );
            return;
        }
        self.loading = false;

        match result {
            Ok(bundle) => {
                let count = bundle.articles.len();
                self.browser.replace(bundle);
                self.menu.clamp_cursor(self.browser.categories().len());
                self.search_input.clear();
                self.selected = 0;
                self.last_loaded = Some(Local::now());
                self.set_status(format!("Loaded {} articles", count));
            }
            Err(e) => {
                tracing::warn!(error = %e, source = %self.source.describe(), "Load failed");
                self.set_status(format!("Load failed: {}", e));
            }
        }
    }

    /// Whether the periodic refresh is due.
    pub fn refresh_due(&self) -> bool {
        match self.config.refresh_interval() {
            Some(interval) => !self.loading && self.last_refresh.elapsed() >= interval,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn bundle(n: usize) -> NewsBundle {
        let articles = (0..n)
            .map(|i| {
                let category = if i % 2 == 0 { "Tech" } else { "Sports" };
                let mut a = Article::new(format!("Story {i}"), category);
                a.link = format!("/story/{i}");
                a
            })
            .collect();
        NewsBundle::new(articles, Vec::new())
    }

    fn app(n: usize) -> App {
        let source = NewsSource::Snapshot(PathBuf::from("/tmp/newsdesk.json"));
        let mut app = App::new(Config::default(), source, bundle(n));
        app.viewport_columns = 80; // 640px, compact
        app
    }

    #[test]
    fn test_menu_hidden_on_compact_until_toggled() {
        let mut app = app(4);
        assert!(!app.menu_visible());
        app.toggle_menu();
        assert!(app.menu_visible());
        assert_eq!(app.focus, Focus::Menu);
    }

    #[test]
    fn test_menu_always_visible_when_wide() {
        let mut app = app(4);
        app.viewport_columns = 200;
        assert!(app.menu_visible());
    }

    #[test]
    fn test_category_pick_closes_compact_menu_and_filters() {
        let mut app = app(6);
        app.toggle_menu();
        app.nav_down(); // Sports
        app.select_category_at_cursor();
        assert!(!app.menu.is_open());
        assert_eq!(app.focus, Focus::Articles);
        assert_eq!(app.browser.current_category(), Some("Sports"));
        assert_eq!(app.browser.filtered().len(), 3);
    }

    #[test]
    fn test_search_resets_selection_and_page() {
        let mut app = app(50);
        app.next_page();
        app.nav_down();
        assert_eq!(app.selected, 1);

        app.enter_search();
        for c in "story 4".chars() {
            app.push_search_char(c);
        }
        app.submit_search();
        assert!(!app.search_mode);
        assert_eq!(app.selected, 0);
        assert_eq!(app.browser.pager().first(), 0);
        // "Story 4" and "Story 40".."Story 49"
        assert_eq!(app.browser.filtered().len(), 11);
    }

    #[test]
    fn test_selection_clamped_to_page() {
        let mut app = app(3);
        for _ in 0..10 {
            app.nav_down();
        }
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn test_reader_open_and_link() {
        let mut app = app(3);
        app.nav_down();
        assert!(app.enter_reader());
        assert_eq!(app.view, View::Reader);
        assert_eq!(
            app.current_link().unwrap().as_str(),
            "https://www.haberler.com/story/1"
        );
        app.exit_reader();
        assert_eq!(app.view, View::Browse);
    }

    #[test]
    fn test_reader_on_empty_page() {
        let mut app = app(0);
        assert!(!app.enter_reader());
        assert_eq!(app.view, View::Browse);
    }

    #[test]
    fn test_reader_scroll_clamped() {
        let mut app = app(1);
        app.enter_reader();
        app.reader_total_lines = 30;
        app.reader_visible_lines = 10;
        app.scroll_down(100);
        assert_eq!(app.scroll_offset, 20);
        app.scroll_up(5);
        assert_eq!(app.scroll_offset, 15);
    }

    #[test]
    fn test_stale_load_dropped() {
        let mut app = app(2);
        let first = app.begin_load();
        let second = app.begin_load();
        app.finish_load(first, Ok(bundle(10)));
        assert_eq!(app.browser.articles().len(), 2);
        assert!(app.loading);

        app.finish_load(second, Ok(bundle(10)));
        assert_eq!(app.browser.articles().len(), 10);
        assert!(!app.loading);
        assert!(app.last_loaded.is_some());
    }

    #[test]
    fn test_failed_load_keeps_articles() {
        let mut app = app(2);
        let generation = app.begin_load();
        app.finish_load(generation, Err("HTTP error: status 500".into()));
        assert_eq!(app.browser.articles().len(), 2);
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert!(msg.contains("Load failed"));
    }

    #[test]
    fn test_search_input_length_capped() {
        let mut app = app(1);
        app.enter_search();
        for _ in 0..(MAX_SEARCH_QUERY_LENGTH + 10) {
            app.push_search_char('x');
        }
        assert_eq!(app.search_input.chars().count(), MAX_SEARCH_QUERY_LENGTH);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_expires() {
        let mut app = app(1);
        app.set_status("hello");
        assert!(!app.clear_expired_status());
        tokio::time::advance(std::time::Duration::from_secs(4)).await;
        assert!(app.clear_expired_status());
        assert!(app.status_message.is_none());
    }
}
