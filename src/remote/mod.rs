//! Remote gallery API.
//!
//! This module defines the `ArtworkApi` contract the rest of the crate talks
//! to, and `HttpClient`, its implementation over the gallery's REST API.
//! Every call is attempted exactly once; retry policy belongs to the caller.

pub mod error;
pub mod http;

use std::fmt;

use crate::error::Result;
use crate::search::SearchQuery;
use crate::types::{
    Artwork, ArtworkDraft, FavoriteOutcome, LikeOutcome, TopArtist, UserProfile,
};

pub use http::HttpClient;

/// Which collection to fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArtworkFilter {
    /// The whole public catalog
    #[default]
    All,
    /// Server-side search by term and category
    Search(SearchQuery),
    /// Artworks owned by the signed-in viewer
    Mine,
    /// Artworks the signed-in viewer favorited
    Favorites,
    /// Most recently added artworks
    Latest,
}

impl ArtworkFilter {
    /// Whether the endpoint behind this filter needs a bearer token
    pub fn requires_auth(&self) -> bool {
        matches!(self, ArtworkFilter::Mine | ArtworkFilter::Favorites)
    }
}

impl fmt::Display for ArtworkFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtworkFilter::All => write!(f, "all artworks"),
            ArtworkFilter::Search(q) => write!(f, "search {}", q),
            ArtworkFilter::Mine => write!(f, "my artworks"),
            ArtworkFilter::Favorites => write!(f, "my favorites"),
            ArtworkFilter::Latest => write!(f, "latest artworks"),
        }
    }
}

/// Common interface for the gallery backend
#[async_trait::async_trait]
pub trait ArtworkApi: Send + Sync {
    /// Fetch a collection of artworks
    async fn fetch_artworks(&self, filter: &ArtworkFilter) -> Result<Vec<Artwork>>;

    /// Fetch a single artwork
    async fn fetch_artwork(&self, id: &str) -> Result<Artwork>;

    /// Flip the viewer's like on an artwork
    async fn toggle_like(&self, id: &str) -> Result<LikeOutcome>;

    /// Flip the viewer's favorite on an artwork
    async fn toggle_favorite(&self, id: &str) -> Result<FavoriteOutcome>;

    async fn create_artwork(&self, draft: &ArtworkDraft) -> Result<Artwork>;

    async fn update_artwork(&self, id: &str, draft: &ArtworkDraft) -> Result<Artwork>;

    async fn delete_artwork(&self, id: &str) -> Result<()>;

    /// Leaderboard of the most followed artists
    async fn top_artists(&self) -> Result<Vec<TopArtist>>;

    /// Profile of the signed-in viewer
    async fn current_user(&self) -> Result<UserProfile>;

    async fn update_user(&self, profile: &UserProfile) -> Result<UserProfile>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::CategoryFilter;
    use crate::types::Category;

    #[test]
    fn test_requires_auth() {
        assert!(!ArtworkFilter::All.requires_auth());
        assert!(!ArtworkFilter::Latest.requires_auth());
        assert!(!ArtworkFilter::Search(SearchQuery::default()).requires_auth());
        assert!(ArtworkFilter::Mine.requires_auth());
        assert!(ArtworkFilter::Favorites.requires_auth());
    }

    #[test]
    fn test_filter_display() {
        let q = SearchQuery::new("sun", CategoryFilter::Only(Category::Painting));
        assert_eq!(
            ArtworkFilter::Search(q).to_string(),
            "search \"sun\" in Painting"
        );
        assert_eq!(ArtworkFilter::Mine.to_string(), "my artworks");
    }
}
