use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{ArtifyError, Result};
use crate::search::SearchQuery;
use crate::types::Artwork;

/// In-memory cache of the most recently loaded artwork collection.
///
/// The store holds exactly one generation of data: `load` replaces
/// everything, there is no merging. A search query is kept alongside the
/// collection so the filtered view is always derived from the current
/// generation. Locks are never held across an `.await`.
pub struct ArtworkStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    items: Vec<Artwork>,
    index: HashMap<String, usize>,
    query: SearchQuery,
    generation: u64,
}

impl Inner {
    fn reindex(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.clone(), i))
            .collect();
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Artwork> {
        match self.index.get(id) {
            Some(&i) => Ok(&mut self.items[i]),
            None => Err(ArtifyError::NotFound(id.to_string())),
        }
    }
}

impl ArtworkStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Replace the cached collection with `items`.
    ///
    /// Duplicate identifiers keep their first occurrence. The derived view is
    /// reset to the whole collection. Returns the new generation number.
    pub fn load(&self, items: Vec<Artwork>) -> u64 {
        let mut unique = Vec::with_capacity(items.len());
        let mut seen = std::collections::HashSet::new();
        for artwork in items {
            if seen.insert(artwork.id.clone()) {
                unique.push(artwork);
            } else {
                tracing::warn!("duplicate artwork '{}' in response, keeping first", artwork.id);
            }
        }

        let mut inner = self.inner.write();
        inner.items = unique;
        inner.reindex();
        inner.query = SearchQuery::default();
        inner.generation += 1;
        inner.generation
    }

    /// Number of `load` calls so far.
    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    pub fn get(&self, id: &str) -> Result<Artwork> {
        let inner = self.inner.read();
        inner
            .index
            .get(id)
            .map(|&i| inner.items[i].clone())
            .ok_or_else(|| ArtifyError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.read().index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every cached record, in load order.
    pub fn all(&self) -> Vec<Artwork> {
        self.inner.read().items.clone()
    }

    /// Records matching the current query, in load order.
    pub fn view(&self) -> Vec<Artwork> {
        let inner = self.inner.read();
        crate::search::filter_artworks(&inner.items, &inner.query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn query(&self) -> SearchQuery {
        self.inner.read().query.clone()
    }

    /// Filter the cached collection without refetching. Returns the size of
    /// the resulting view.
    pub fn apply_filter(&self, query: SearchQuery) -> usize {
        let mut inner = self.inner.write();
        inner.query = query;
        crate::search::filter_artworks(&inner.items, &inner.query).len()
    }

    pub fn likes(&self, id: &str) -> Result<u64> {
        self.get(id).map(|a| a.likes)
    }

    /// Like count together with the generation it belongs to.
    pub fn likes_at(&self, id: &str) -> Result<(u64, u64)> {
        let inner = self.inner.read();
        inner
            .index
            .get(id)
            .map(|&i| (inner.items[i].likes, inner.generation))
            .ok_or_else(|| ArtifyError::NotFound(id.to_string()))
    }

    /// Adjust the cached like count by one in the given direction.
    ///
    /// The count never goes below zero. An unlike at zero means local state
    /// disagreed with the server; it is logged and clamped rather than
    /// returned as an error.
    pub fn apply_like_delta(&self, id: &str, liked: bool) -> Result<u64> {
        let mut inner = self.inner.write();
        let artwork = inner.find_mut(id)?;
        if liked {
            artwork.likes = artwork.likes.saturating_add(1);
        } else if artwork.likes == 0 {
            tracing::error!("like count for artwork '{id}' would go negative, clamping at 0");
        } else {
            artwork.likes -= 1;
        }
        Ok(artwork.likes)
    }

    /// Overwrite the cached like count.
    pub fn set_likes(&self, id: &str, likes: u64) -> Result<()> {
        let mut inner = self.inner.write();
        inner.find_mut(id)?.likes = likes;
        Ok(())
    }

    /// Overwrite the cached like count only if no `load` happened since
    /// `generation`. Returns whether the write was applied.
    pub fn set_likes_at(&self, id: &str, likes: u64, generation: u64) -> Result<bool> {
        let mut inner = self.inner.write();
        if inner.generation != generation {
            return Ok(false);
        }
        inner.find_mut(id)?.likes = likes;
        Ok(true)
    }

    /// Insert a record or replace the one with the same id, keeping its
    /// position.
    pub fn upsert(&self, artwork: Artwork) {
        let mut inner = self.inner.write();
        let existing = inner.index.get(&artwork.id).copied();
        match existing {
            Some(i) => inner.items[i] = artwork,
            None => {
                let id = artwork.id.clone();
                inner.items.push(artwork);
                let position = inner.items.len() - 1;
                inner.index.insert(id, position);
            }
        }
    }

    pub fn remove(&self, id: &str) -> Result<Artwork> {
        let mut inner = self.inner.write();
        let position = inner
            .index
            .get(id)
            .copied()
            .ok_or_else(|| ArtifyError::NotFound(id.to_string()))?;
        let removed = inner.items.remove(position);
        inner.reindex();
        Ok(removed)
    }
}

impl Default for ArtworkStore {
    fn default() -> Self {
        Self::new()
    }
}
