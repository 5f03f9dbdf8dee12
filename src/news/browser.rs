//! Selection state and the filter → page data flow.
//!
//! `NewsBrowser` owns the full article list, the current category and search
//! term, the working set those produce, and the paginator over it. Every
//! selection change recomputes the working set synchronously and resets the
//! paginator to offset 0, so the visible page is always a contiguous slice of
//! the current working set.

use super::filter::{filter_by_category, filter_by_title};
use super::pager::Paginator;
use super::types::{Article, Category, NewsBundle};
use serde::Deserialize;
use std::sync::Arc;

/// What a search runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    /// Search the current working set. Consecutive searches compound until
    /// the category changes or the filters are cleared.
    #[default]
    Narrow,
    /// Search the category-filtered list, discarding earlier searches.
    Category,
}

#[derive(Debug, Clone)]
pub struct NewsBrowser {
    articles: Vec<Arc<Article>>,
    categories: Vec<Category>,
    current_category: Option<String>,
    /// Terms that produced the working set, oldest first. Narrow scope
    /// accumulates them, category scope keeps at most one.
    search_terms: Vec<String>,
    scope: SearchScope,
    filtered: Vec<Arc<Article>>,
    pager: Paginator,
}

impl NewsBrowser {
    pub fn new(bundle: NewsBundle, page_size: usize, scope: SearchScope) -> Self {
        let mut browser = Self {
            articles: bundle.articles,
            categories: bundle.categories,
            current_category: None,
            search_terms: Vec::new(),
            scope,
            filtered: Vec::new(),
            pager: Paginator::new(page_size),
        };
        browser.recompute();
        browser
    }

    /// Swap in a freshly loaded article/category list.
    ///
    /// The current category survives a reload, the search term does not.
    pub fn replace(&mut self, bundle: NewsBundle) {
        self.articles = bundle.articles;
        self.categories = bundle.categories;
        self.search_terms.clear();
        self.recompute();
        tracing::debug!(
            articles = self.articles.len(),
            categories = self.categories.len(),
            "Article list replaced"
        );
    }

    /// Select a category (or none) and recompute from the full list.
    ///
    /// Any active search is dropped.
    pub fn select_category(&mut self, category: Option<&str>) {
        self.current_category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        self.search_terms.clear();
        self.recompute();
        tracing::debug!(
            category = ?self.current_category,
            matches = self.filtered.len(),
            "Category selected"
        );
    }

    /// Drop both the category and the search term.
    pub fn clear_filters(&mut self) {
        self.current_category = None;
        self.search_terms.clear();
        self.recompute();
    }

    /// Narrow the working set to titles containing `term`.
    pub fn search(&mut self, term: &str) {
        match self.scope {
            SearchScope::Narrow => {
                if !term.is_empty() {
                    self.search_terms.push(term.to_string());
                }
                self.filtered = filter_by_title(&self.filtered, term);
            }
            SearchScope::Category => {
                self.search_terms.clear();
                if !term.is_empty() {
                    self.search_terms.push(term.to_string());
                }
                self.filtered = filter_by_title(
                    &filter_by_category(&self.articles, self.current_category.as_deref()),
                    term,
                );
            }
        }
        self.reset_page();
        tracing::debug!(term, scope = ?self.scope, matches = self.filtered.len(), "Search applied");
    }

    fn recompute(&mut self) {
        self.filtered = filter_by_category(&self.articles, self.current_category.as_deref());
        self.reset_page();
    }

    fn reset_page(&mut self) {
        self.pager.set_total(self.filtered.len());
        self.pager.reset();
    }

    /// The articles on the visible page.
    pub fn page(&self) -> &[Arc<Article>] {
        self.pager.slice(&self.filtered)
    }

    /// The article at `index` within the visible page.
    pub fn open_article(&self, index: usize) -> Option<Arc<Article>> {
        self.page().get(index).cloned()
    }

    pub fn pager(&self) -> &Paginator {
        &self.pager
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pager.prev_page()
    }

    pub fn first_page(&mut self) {
        self.pager.first_page();
    }

    pub fn last_page(&mut self) {
        self.pager.last_page();
    }

    /// Page-change callback from the view.
    pub fn page_change(&mut self, first: usize, rows: usize) {
        self.pager.page_change(first, rows);
    }

    pub fn articles(&self) -> &[Arc<Article>] {
        &self.articles
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn filtered(&self) -> &[Arc<Article>] {
        &self.filtered
    }

    pub fn current_category(&self) -> Option<&str> {
        self.current_category.as_deref()
    }

    /// The most recent applied term, or "" when none is active.
    pub fn search_term(&self) -> &str {
        self.search_terms.last().map_or("", String::as_str)
    }

    pub fn search_terms(&self) -> &[String] {
        &self.search_terms
    }

    pub fn scope(&self) -> SearchScope {
        self.scope
    }
}
