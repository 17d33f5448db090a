//! Catalog search.
//!
//! `SearchQuery` is what the user typed plus the selected category;
//! `filter_artworks` evaluates it against a cached collection, and
//! [`SearchEngine`] debounces queries and makes sure only the newest one
//! ever reaches the store.

mod engine;

use std::fmt;
use std::str::FromStr;

use unicase::UniCase;

use crate::error::{ArtifyError, Result};
use crate::types::{Artwork, Category};

pub use engine::{SearchEngine, SearchHandle, SearchOutcome};

/// Label of the "no category filter" sentinel
pub const ALL_CATEGORIES: &str = "All";

/// Category selection of a search
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No filtering
    #[default]
    All,
    /// Exact match on one known category
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "{}", ALL_CATEGORIES),
            CategoryFilter::Only(c) => write!(f, "{}", c),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ArtifyError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || UniCase::new(s) == UniCase::new(ALL_CATEGORIES) {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}

/// A free-text term plus a category filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    term: String,
    category: CategoryFilter,
}

impl SearchQuery {
    /// The term is trimmed; surrounding whitespace never changes results.
    pub fn new(term: impl Into<String>, category: CategoryFilter) -> Self {
        let term: String = term.into();
        Self {
            term: term.trim().to_string(),
            category,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Empty term and `All` categories: the full collection.
    pub fn is_unfiltered(&self) -> bool {
        self.term.is_empty() && self.category == CategoryFilter::All
    }

    pub fn matches(&self, artwork: &Artwork) -> bool {
        self.category.matches(&artwork.category)
            && (self.term.is_empty()
                || contains_ignore_case(&artwork.title, &self.term)
                || contains_ignore_case(&artwork.artist_name, &self.term))
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" in {}", self.term, self.category)
    }
}

/// Case-insensitive substring test.
///
/// Each window of `haystack` as long as `needle` (in chars) is compared
/// with Unicode case folding, so "ÉTUDE" finds "étude".
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle_chars = needle.chars().count();
    let needle = UniCase::new(needle);
    let bounds: Vec<usize> = haystack
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(haystack.len()))
        .collect();
    bounds
        .windows(needle_chars + 1)
        .any(|w| UniCase::new(&haystack[w[0]..w[needle_chars]]) == needle)
}

/// Apply a query to a cached collection, preserving order.
pub fn filter_artworks<'a>(artworks: &'a [Artwork], query: &SearchQuery) -> Vec<&'a Artwork> {
    if query.is_unfiltered() {
        return artworks.iter().collect();
    }
    artworks.iter().filter(|a| query.matches(a)).collect()
}
