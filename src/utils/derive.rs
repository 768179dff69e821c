//! Derived-view pipeline for the repository dashboard.
//!
//! Everything here is a pure function of the fetched collection plus the
//! current filter state, so the dashboard can recompute its visible subset
//! on any input change without hidden mutation.

use crate::types::{FilterState, Repository, SortKey};

/// Aggregate numbers shown in the dashboard stat tiles.
///
/// Computed from the full collection, never from the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollectionStats {
    pub total: usize,
    pub stars: u64,
    pub forks: u64,
}

/// Build the visible repository list from the collection and filter state.
///
/// A repository is kept when the search text (case-insensitive) occurs in its
/// name or description and, if a language is selected, its language matches
/// exactly. The result is then stably sorted by the active sort key, so rows
/// with equal keys keep their server response order.
pub fn derive_view(collection: &[Repository], filter: &FilterState) -> Vec<Repository> {
    let needle = filter.search.to_lowercase();

    let mut view: Vec<Repository> = collection
        .iter()
        .filter(|repo| matches_search(repo, &needle) && matches_language(repo, filter))
        .cloned()
        .collect();

    match filter.sort {
        SortKey::Name => view.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Stars => view.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count)),
        SortKey::Forks => view.sort_by(|a, b| b.forks_count.cmp(&a.forks_count)),
        // None timestamps order as oldest, so they sink to the bottom here.
        SortKey::Updated => view.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
    }

    view
}

fn matches_search(repo: &Repository, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    repo.name.to_lowercase().contains(needle)
        || repo
            .description
            .as_ref()
            .is_some_and(|description| description.to_lowercase().contains(needle))
}

fn matches_language(repo: &Repository, filter: &FilterState) -> bool {
    match &filter.language {
        None => true,
        Some(language) => repo.language.as_deref() == Some(language.as_str()),
    }
}

/// Distinct non-empty languages in first-observed collection order.
///
/// The caller prepends its "all languages" choice; the sentinel is a UI
/// concern, not part of the observed data.
pub fn language_options(collection: &[Repository]) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for repo in collection {
        if let Some(language) = &repo.language {
            if !language.is_empty() && !options.iter().any(|seen| seen == language) {
                options.push(language.clone());
            }
        }
    }
    options
}

/// Totals over the full collection for the stat tiles.
pub fn collection_stats(collection: &[Repository]) -> CollectionStats {
    CollectionStats {
        total: collection.len(),
        stars: collection.iter().map(|repo| repo.stargazers_count).sum(),
        forks: collection.iter().map(|repo| repo.forks_count).sum(),
    }
}
