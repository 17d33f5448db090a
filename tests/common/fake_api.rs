//! In-memory `ArtworkApi` with scriptable failures, delays and gates.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;

use artify::error::{ArtifyError, Result};
use artify::remote::{ArtworkApi, ArtworkFilter};
use artify::types::{
    Artwork, ArtworkDraft, FavoriteOutcome, LikeOutcome, TopArtist, UserProfile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    FetchArtworks,
    FetchArtwork,
    ToggleLike,
    ToggleFavorite,
    Create,
    Update,
    Delete,
    TopArtists,
    CurrentUser,
    UpdateUser,
}

pub struct FakeApi {
    catalog: Mutex<Vec<Artwork>>,
    liked: Mutex<HashSet<String>>,
    favorites: Mutex<HashSet<String>>,
    failures: Mutex<HashMap<Op, ArtifyError>>,
    search_delays: Mutex<HashMap<String, Duration>>,
    gates: Mutex<HashMap<Op, Arc<Notify>>>,
    calls: Mutex<Vec<(Op, String)>>,
    /// Answer toggles with the pre-toggle state instead of flipping it
    disagree: AtomicBool,
    /// Include the new like count in like answers
    report_counts: AtomicBool,
}

impl FakeApi {
    pub fn new(catalog: Vec<Artwork>) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            liked: Mutex::new(HashSet::new()),
            favorites: Mutex::new(HashSet::new()),
            failures: Mutex::new(HashMap::new()),
            search_delays: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            disagree: AtomicBool::new(false),
            report_counts: AtomicBool::new(true),
        }
    }

    /// Fail the next call of `op` with `error`.
    pub fn fail_next(&self, op: Op, error: ArtifyError) {
        self.failures.lock().insert(op, error);
    }

    /// Delay searches for `term` by `delay`.
    pub fn delay_search(&self, term: &str, delay: Duration) {
        self.search_delays.lock().insert(term.to_string(), delay);
    }

    /// Hold calls of `op` until the returned `Notify` is signalled.
    pub fn gate(&self, op: Op) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.lock().insert(op, Arc::clone(&notify));
        notify
    }

    pub fn disagree(&self, on: bool) {
        self.disagree.store(on, Ordering::SeqCst);
    }

    pub fn report_counts(&self, on: bool) {
        self.report_counts.store(on, Ordering::SeqCst);
    }

    pub fn set_liked(&self, id: &str) {
        self.liked.lock().insert(id.to_string());
    }

    pub fn calls(&self, op: Op) -> usize {
        self.calls.lock().iter().filter(|(o, _)| *o == op).count()
    }

    pub fn call_args(&self, op: Op) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|(o, _)| *o == op)
            .map(|(_, arg)| arg.clone())
            .collect()
    }

    pub fn catalog(&self) -> Vec<Artwork> {
        self.catalog.lock().clone()
    }

    async fn enter(&self, op: Op, arg: impl Into<String>) -> Result<()> {
        self.calls.lock().push((op, arg.into()));
        let gate = self.gates.lock().get(&op).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match self.failures.lock().remove(&op) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn find(&self, id: &str) -> Result<Artwork> {
        self.catalog
            .lock()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| ArtifyError::NotFound(id.to_string()))
    }
}

#[async_trait::async_trait]
impl ArtworkApi for FakeApi {
    async fn fetch_artworks(&self, filter: &ArtworkFilter) -> Result<Vec<Artwork>> {
        let delay = match filter {
            ArtworkFilter::Search(query) => self.search_delays.lock().get(query.term()).copied(),
            _ => None,
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.enter(Op::FetchArtworks, filter.to_string()).await?;

        let catalog = self.catalog();
        Ok(match filter {
            ArtworkFilter::All | ArtworkFilter::Latest => catalog,
            ArtworkFilter::Search(query) => {
                catalog.into_iter().filter(|a| query.matches(a)).collect()
            }
            ArtworkFilter::Mine => catalog
                .into_iter()
                .filter(|a| a.artist_email == "jane@example.com")
                .collect(),
            ArtworkFilter::Favorites => {
                let favorites = self.favorites.lock().clone();
                catalog
                    .into_iter()
                    .filter(|a| favorites.contains(&a.id))
                    .collect()
            }
        })
    }

    async fn fetch_artwork(&self, id: &str) -> Result<Artwork> {
        self.enter(Op::FetchArtwork, id).await?;
        self.find(id)
    }

    async fn toggle_like(&self, id: &str) -> Result<LikeOutcome> {
        self.enter(Op::ToggleLike, id).await?;
        self.find(id)?;

        let mut liked = self.liked.lock();
        let was_liked = liked.contains(id);
        if self.disagree.load(Ordering::SeqCst) {
            return Ok(LikeOutcome {
                liked: was_liked,
                likes: None,
            });
        }

        let now_liked = !was_liked;
        if now_liked {
            liked.insert(id.to_string());
        } else {
            liked.remove(id);
        }

        let mut catalog = self.catalog.lock();
        let mut likes = 0;
        if let Some(artwork) = catalog.iter_mut().find(|a| a.id == id) {
            artwork.likes = if now_liked {
                artwork.likes + 1
            } else {
                artwork.likes.saturating_sub(1)
            };
            likes = artwork.likes;
        }

        Ok(LikeOutcome {
            liked: now_liked,
            likes: self.report_counts.load(Ordering::SeqCst).then_some(likes),
        })
    }

    async fn toggle_favorite(&self, id: &str) -> Result<FavoriteOutcome> {
        self.enter(Op::ToggleFavorite, id).await?;
        self.find(id)?;

        let mut favorites = self.favorites.lock();
        let was_favorited = favorites.contains(id);
        if self.disagree.load(Ordering::SeqCst) {
            return Ok(FavoriteOutcome {
                favorited: was_favorited,
            });
        }
        if was_favorited {
            favorites.remove(id);
        } else {
            favorites.insert(id.to_string());
        }
        Ok(FavoriteOutcome {
            favorited: !was_favorited,
        })
    }

    async fn create_artwork(&self, draft: &ArtworkDraft) -> Result<Artwork> {
        self.enter(Op::Create, draft.title.clone()).await?;
        let mut catalog = self.catalog.lock();
        let artwork = Artwork {
            id: format!("new-{}", catalog.len() + 1),
            title: draft.title.clone(),
            artist_name: draft.artist_name.clone().unwrap_or_default(),
            artist_email: draft.artist_email.clone().unwrap_or_default(),
            category: draft.category.clone().into(),
            medium: draft.medium.clone(),
            description: draft.description.clone(),
            dimensions: draft.dimensions.clone(),
            price: draft.price,
            visibility: draft.visibility,
            image_url: draft.image_url.clone(),
            likes: 0,
            created_at: None,
            liked: None,
            favorited: None,
        };
        catalog.push(artwork.clone());
        Ok(artwork)
    }

    async fn update_artwork(&self, id: &str, draft: &ArtworkDraft) -> Result<Artwork> {
        self.enter(Op::Update, id).await?;
        let mut catalog = self.catalog.lock();
        let artwork = catalog
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ArtifyError::NotFound(id.to_string()))?;
        artwork.title = draft.title.clone();
        artwork.image_url = draft.image_url.clone();
        artwork.category = draft.category.clone().into();
        artwork.medium = draft.medium.clone();
        artwork.description = draft.description.clone();
        artwork.dimensions = draft.dimensions.clone();
        artwork.price = draft.price;
        artwork.visibility = draft.visibility;
        Ok(artwork.clone())
    }

    async fn delete_artwork(&self, id: &str) -> Result<()> {
        self.enter(Op::Delete, id).await?;
        let mut catalog = self.catalog.lock();
        let before = catalog.len();
        catalog.retain(|a| a.id != id);
        if catalog.len() == before {
            return Err(ArtifyError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn top_artists(&self) -> Result<Vec<TopArtist>> {
        self.enter(Op::TopArtists, "").await?;
        Ok(vec![TopArtist {
            id: "u1".to_string(),
            name: "Jane Doe".to_string(),
            avatar: None,
            followers: 42,
        }])
    }

    async fn current_user(&self) -> Result<UserProfile> {
        self.enter(Op::CurrentUser, "").await?;
        Ok(UserProfile {
            display_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            photo_url: None,
        })
    }

    async fn update_user(&self, profile: &UserProfile) -> Result<UserProfile> {
        self.enter(Op::UpdateUser, profile.display_name.clone()).await?;
        Ok(profile.clone())
    }
}
