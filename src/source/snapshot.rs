use super::SourceError;
use crate::news::{Article, Category, NewsBundle};
use serde::Deserialize;
use std::path::Path;

/// Snapshots hold the same payload as the backend, so allow the same headroom.
const MAX_SNAPSHOT_SIZE: u64 = 64 * 1024 * 1024;

#[derive(Deserialize, Default)]
#[serde(default)]
struct Snapshot {
    articles: Vec<Article>,
    categories: Vec<Category>,
}

/// Load a `{"articles": [...], "categories": [...]}` document from disk.
///
/// Either key may be missing. Without categories, they are derived from the
/// articles like a backend that failed the categories request.
pub fn load_snapshot(path: &Path) -> Result<NewsBundle, SourceError> {
    let size = std::fs::metadata(path)?.len();
    if size > MAX_SNAPSHOT_SIZE {
        return Err(SourceError::SnapshotTooLarge(size));
    }

    let content = std::fs::read(path)?;
    let snapshot: Snapshot = serde_json::from_slice(&content)?;
    tracing::info!(
        path = %path.display(),
        articles = snapshot.articles.len(),
        categories = snapshot.categories.len(),
        "Loaded snapshot"
    );
    Ok(NewsBundle::new(snapshot.articles, snapshot.categories))
}
