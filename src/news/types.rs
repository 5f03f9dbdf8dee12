use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Data Structures
// ============================================================================

/// A news item as delivered by the backend.
///
/// Every field is a plain string and defaults to empty when the backend
/// omits it. Articles are immutable once loaded and shared as `Arc<Article>`
/// between the full list, the working set and the visible page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub title: String,
    /// Absolute URL or a site-relative path such as `/world/some-story`.
    pub link: String,
    /// Publication date exactly as the source site prints it.
    pub date: String,
    /// Category label, matched case-insensitively by the category filter.
    pub category: String,
    pub description: String,
    pub full_text: String,
}

impl Article {
    /// Convenience constructor used by tests and the snapshot loader.
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            ..Self::default()
        }
    }
}

/// A named grouping shown in the category menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    /// Display label and filter key.
    pub name: String,
    pub title: String,
    pub link: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Everything a source delivers in one load.
#[derive(Debug, Clone, Default)]
pub struct NewsBundle {
    pub articles: Vec<Arc<Article>>,
    pub categories: Vec<Category>,
}

impl NewsBundle {
    /// Build a bundle, deriving categories from the articles when the source
    /// supplied none.
    ///
    /// Derived categories keep first-seen order and skip blank labels.
    pub fn new(articles: Vec<Article>, categories: Vec<Category>) -> Self {
        let articles: Vec<Arc<Article>> = articles.into_iter().map(Arc::new).collect();
        let categories = if categories.is_empty() {
            derive_categories(&articles)
        } else {
            categories
        };
        Self {
            articles,
            categories,
        }
    }
}

fn derive_categories(articles: &[Arc<Article>]) -> Vec<Category> {
    let mut seen: Vec<String> = Vec::new();
    let mut categories = Vec::new();
    for article in articles {
        let name = article.category.trim();
        if name.is_empty() {
            continue;
        }
        let key = name.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            categories.push(Category::new(name));
        }
    }
    categories
}
