//! Substring filters over the in-memory article list.
//!
//! Both filters are a single linear scan that keeps input order. Matching is
//! case-insensitive using Unicode lowercase on both sides.

use super::types::Article;
use std::sync::Arc;

/// Case-insensitive substring test. An empty needle always matches.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Keep articles whose category label contains `category`.
///
/// `None` or an empty name returns the full list unchanged.
pub fn filter_by_category(articles: &[Arc<Article>], category: Option<&str>) -> Vec<Arc<Article>> {
    let Some(category) = category.filter(|c| !c.is_empty()) else {
        return articles.to_vec();
    };
    articles
        .iter()
        .filter(|a| contains_ignore_case(&a.category, category))
        .cloned()
        .collect()
}

/// Keep articles whose title contains `term`. An empty term keeps everything.
pub fn filter_by_title(articles: &[Arc<Article>], term: &str) -> Vec<Arc<Article>> {
    if term.is_empty() {
        return articles.to_vec();
    }
    articles
        .iter()
        .filter(|a| contains_ignore_case(&a.title, term))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn list(items: &[(&str, &str)]) -> Vec<Arc<Article>> {
        items
            .iter()
            .map(|(t, c)| Arc::new(Article::new(*t, *c)))
            .collect()
    }

    fn titles(articles: &[Arc<Article>]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn test_category_match_is_case_insensitive() {
        let articles = list(&[("A", "Tech"), ("B", "Sports")]);
        let filtered = filter_by_category(&articles, Some("tech"));
        assert_eq!(titles(&filtered), vec!["A"]);
    }

    #[test]
    fn test_category_substring_matches() {
        let articles = list(&[("A", "World Economy"), ("B", "Economy"), ("C", "Sports")]);
        let filtered = filter_by_category(&articles, Some("ECONOMY"));
        assert_eq!(titles(&filtered), vec!["A", "B"]);
    }

    #[test]
    fn test_no_category_returns_full_list() {
        let articles = list(&[("A", "Tech"), ("B", "Sports")]);
        assert_eq!(filter_by_category(&articles, None), articles);
        assert_eq!(filter_by_category(&articles, Some("")), articles);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let articles = list(&[("A", "Tech")]);
        assert!(filter_by_category(&articles, Some("Weather")).is_empty());
    }

    #[test]
    fn test_title_search_is_case_insensitive() {
        let articles = list(&[("A", "Tech"), ("B", "Sports")]);
        let filtered = filter_by_title(&articles, "b");
        assert_eq!(titles(&filtered), vec!["B"]);
    }

    #[test]
    fn test_title_search_non_ascii() {
        let articles = list(&[("Şampiyonluk yarışı", "Spor"), ("Borsa", "Ekonomi")]);
        let filtered = filter_by_title(&articles, "ŞAMP");
        assert_eq!(titles(&filtered), vec!["Şampiyonluk yarışı"]);
    }

    #[test]
    fn test_empty_term_keeps_everything() {
        let articles = list(&[("A", "Tech"), ("B", "Sports")]);
        assert_eq!(filter_by_title(&articles, ""), articles);
    }

    #[test]
    fn test_filters_on_empty_input() {
        assert!(filter_by_category(&[], Some("tech")).is_empty());
        assert!(filter_by_title(&[], "x").is_empty());
    }

    fn arb_articles() -> impl Strategy<Value = Vec<Arc<Article>>> {
        prop::collection::vec(("[a-zA-Z ]{0,12}", "[a-zA-Z]{0,8}"), 0..40).prop_map(|v| {
            v.into_iter()
                .map(|(t, c)| Arc::new(Article::new(t, c)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_category_filter_is_matching_subset(articles in arb_articles(), cat in "[a-zA-Z]{0,3}") {
            let filtered = filter_by_category(&articles, Some(&cat));
            prop_assert!(filtered.len() <= articles.len());
            for a in &filtered {
                prop_assert!(articles.iter().any(|x| Arc::ptr_eq(x, a)));
                prop_assert!(contains_ignore_case(&a.category, &cat));
            }
        }

        #[test]
        fn prop_title_filter_is_matching_subset(articles in arb_articles(), term in "[a-zA-Z]{0,3}") {
            let filtered = filter_by_title(&articles, &term);
            prop_assert!(filtered.len() <= articles.len());
            for a in &filtered {
                prop_assert!(articles.iter().any(|x| Arc::ptr_eq(x, a)));
                prop_assert!(contains_ignore_case(&a.title, &term));
            }
        }

        #[test]
        fn prop_title_filter_keeps_every_match(articles in arb_articles(), term in "[a-zA-Z]{1,2}") {
            let filtered = filter_by_title(&articles, &term);
            let expected = articles.iter().filter(|a| contains_ignore_case(&a.title, &term)).count();
            prop_assert_eq!(filtered.len(), expected);
        }
    }
}
