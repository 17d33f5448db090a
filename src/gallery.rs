//! One place that wires the remote client, store, search engine and
//! interaction controller together for a session.

use std::sync::Arc;

use crate::config::Config;
use crate::error::{ArtifyError, Result};
use crate::interaction::{InteractionController, InteractionState};
use crate::notify::{Notifier, Toast};
use crate::remote::{ArtworkApi, ArtworkFilter, HttpClient};
use crate::search::{SearchEngine, SearchHandle, SearchQuery};
use crate::session::Session;
use crate::store::ArtworkStore;
use crate::types::{
    Artwork, ArtworkDraft, FavoriteOutcome, LikeOutcome, TopArtist, UserProfile,
};

pub struct Gallery<A: ArtworkApi + 'static> {
    api: Arc<A>,
    store: Arc<ArtworkStore>,
    search: SearchEngine<A>,
    interactions: InteractionController<A>,
    notifier: Notifier,
    session: Session,
}

impl Gallery<HttpClient> {
    /// Gallery backed by the HTTP API described in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = HttpClient::from_config(config)?;
        let session = client.session().clone();
        Ok(Self::new(Arc::new(client), session, config))
    }
}

impl<A: ArtworkApi + 'static> Gallery<A> {
    pub fn new(api: Arc<A>, session: Session, config: &Config) -> Self {
        let store = Arc::new(ArtworkStore::new());
        let notifier = Notifier::new();
        let search = SearchEngine::new(
            Arc::clone(&api),
            Arc::clone(&store),
            notifier.clone(),
            config.debounce(),
            config.search.mode,
        );
        let interactions = InteractionController::new(
            Arc::clone(&api),
            Arc::clone(&store),
            session.clone(),
            notifier.clone(),
        );

        Self {
            api,
            store,
            search,
            interactions,
            notifier,
            session,
        }
    }

    pub fn store(&self) -> &ArtworkStore {
        &self.store
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn interactions(&self) -> &InteractionController<A> {
        &self.interactions
    }

    pub fn search_engine(&self) -> &SearchEngine<A> {
        &self.search
    }

    /// Fetch a collection into the store.
    ///
    /// On failure the store keeps its previous contents and an error toast is
    /// published. Searches still in flight are superseded; a search scheduled
    /// while the refresh is in flight wins over it.
    pub async fn refresh(&self, filter: ArtworkFilter) -> Result<Vec<Artwork>> {
        let generation = self.search.supersede();
        match self.api.fetch_artworks(&filter).await {
            Ok(items) => {
                for artwork in &items {
                    self.interactions.observe(artwork);
                }
                if filter == ArtworkFilter::Favorites {
                    self.interactions.mark_favorites(&items);
                }
                if self.search.load_if_current(generation, items.clone()) {
                    Ok(self.store.view())
                } else {
                    Ok(items)
                }
            }
            Err(e) => {
                tracing::warn!("failed to fetch {filter}: {e}");
                self.notifier
                    .publish(Toast::error(format!("Failed to fetch {filter}: {e}")));
                Err(e)
            }
        }
    }

    /// Fetch one artwork and cache it.
    pub async fn open(&self, id: &str) -> Result<Artwork> {
        let artwork = self.api.fetch_artwork(id).await?;
        self.interactions.observe(&artwork);
        self.store.upsert(artwork.clone());
        Ok(artwork)
    }

    /// Debounced search; see [`SearchEngine::set_query`].
    pub fn search(&self, query: SearchQuery) -> SearchHandle {
        self.search.set_query(query)
    }

    /// Undebounced search for one-shot callers.
    pub fn search_now(&self, query: SearchQuery) -> SearchHandle {
        self.search.search_now(query)
    }

    pub fn state(&self, id: &str) -> InteractionState {
        self.interactions.state(id)
    }

    /// Load `id` into the store unless it is already there, so a toggle
    /// starts from the server's view of the record.
    async fn ensure_cached(&self, id: &str) -> Result<()> {
        if !self.store.contains(id) {
            self.open(id).await?;
        }
        Ok(())
    }

    pub async fn toggle_like(&self, id: &str) -> Result<LikeOutcome> {
        self.require_auth()?;
        self.ensure_cached(id).await?;
        self.interactions.toggle_like(id).await
    }

    pub async fn toggle_favorite(&self, id: &str) -> Result<FavoriteOutcome> {
        self.require_auth()?;
        self.ensure_cached(id).await?;
        self.interactions.toggle_favorite(id).await
    }

    fn require_auth(&self) -> Result<()> {
        if !self.session.is_authenticated() {
            return Err(ArtifyError::AuthRequired);
        }
        Ok(())
    }

    /// Create an artwork owned by the signed-in viewer.
    pub async fn create(&self, mut draft: ArtworkDraft) -> Result<Artwork> {
        self.require_auth()?;
        draft.validate()?;

        if let Some(viewer) = self.session.viewer() {
            if draft.artist_name.is_none() {
                draft.artist_name = viewer.name.clone();
            }
            if draft.artist_email.is_none() {
                draft.artist_email = viewer.email.clone();
            }
        }

        let artwork = self.api.create_artwork(&draft).await?;
        self.store.upsert(artwork.clone());
        self.notifier
            .publish(Toast::success(format!("Added \"{}\"", artwork.title)));
        Ok(artwork)
    }

    pub async fn update(&self, id: &str, draft: ArtworkDraft) -> Result<Artwork> {
        self.require_auth()?;
        draft.validate()?;

        let artwork = self.api.update_artwork(id, &draft).await?;
        self.store.upsert(artwork.clone());
        self.notifier
            .publish(Toast::success(format!("Updated \"{}\"", artwork.title)));
        Ok(artwork)
    }

    /// Update an artwork starting from its current record, changing only
    /// what `change` touches.
    pub async fn edit(
        &self,
        id: &str,
        change: impl FnOnce(&mut ArtworkDraft),
    ) -> Result<Artwork> {
        self.require_auth()?;
        let current = match self.store.get(id) {
            Ok(artwork) => artwork,
            Err(_) => self.open(id).await?,
        };
        let mut draft = ArtworkDraft::from_artwork(&current);
        change(&mut draft);
        self.update(id, draft).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.require_auth()?;
        self.api.delete_artwork(id).await?;
        if self.store.remove(id).is_err() {
            tracing::debug!("deleted artwork '{id}' was not cached");
        }
        self.notifier.publish(Toast::success("Artwork deleted"));
        Ok(())
    }

    pub async fn top_artists(&self) -> Result<Vec<TopArtist>> {
        self.api.top_artists().await
    }

    pub async fn profile(&self) -> Result<UserProfile> {
        self.require_auth()?;
        self.api.current_user().await
    }

    pub async fn update_profile(&self, profile: &UserProfile) -> Result<UserProfile> {
        self.require_auth()?;
        let updated = self.api.update_user(profile).await?;
        self.notifier.publish(Toast::success("Profile updated"));
        Ok(updated)
    }
}
