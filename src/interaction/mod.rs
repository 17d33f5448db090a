//! Optimistic like/favorite toggles.
//!
//! A toggle flips local state immediately, sends exactly one request, then
//! either adopts the server's answer or restores the pre-toggle snapshot.
//! While a pair is pending, further toggles for it are refused with
//! `OperationInProgress`.

mod state;

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{ArtifyError, Result};
use crate::notify::{Notifier, Toast};
use crate::remote::ArtworkApi;
use crate::session::{Session, Viewer};
use crate::store::ArtworkStore;
use crate::types::{Artwork, FavoriteOutcome, LikeOutcome};

pub use state::{
    InteractionKind, InteractionState, PairEntry, Snapshot, TogglePhase, reconcile_likes,
};

/// (viewer id, artwork id)
type PairKey = (String, String);

/// Orchestrates optimistic toggles for the session's viewer.
pub struct InteractionController<A: ArtworkApi> {
    api: Arc<A>,
    store: Arc<ArtworkStore>,
    session: Session,
    notifier: Notifier,
    pairs: DashMap<PairKey, PairEntry>,
}

/// Keeps a pair out of `Pending` on every exit path. If the toggle future is
/// dropped before it finishes, the optimistic change is rolled back.
struct PendingToggle<'a, A: ArtworkApi> {
    controller: &'a InteractionController<A>,
    key: PairKey,
    kind: InteractionKind,
    snapshot: Snapshot,
    settled: bool,
}

impl<A: ArtworkApi> PendingToggle<'_, A> {
    fn artwork_id(&self) -> &str {
        &self.key.1
    }

    /// Adopt the server's answer.
    fn confirm(mut self, apply: impl FnOnce(&mut InteractionState)) {
        if let Some(mut entry) = self.controller.pairs.get_mut(&self.key) {
            apply(&mut entry.state);
            entry.confirm(self.kind);
        }
        self.settled = true;
    }

    /// Restore the snapshot.
    fn roll_back(mut self) {
        self.restore();
        self.settled = true;
    }

    fn restore(&self) {
        if let Some(mut entry) = self.controller.pairs.get_mut(&self.key) {
            self.snapshot
                .restore(&mut entry, &self.controller.store, self.artwork_id());
            entry.roll_back(self.kind);
        }
    }
}

impl<A: ArtworkApi> Drop for PendingToggle<'_, A> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!(
                "{} toggle on '{}' abandoned, rolling back",
                self.kind,
                self.artwork_id()
            );
            self.restore();
        }
    }
}

impl<A: ArtworkApi> InteractionController<A> {
    pub fn new(
        api: Arc<A>,
        store: Arc<ArtworkStore>,
        session: Session,
        notifier: Notifier,
    ) -> Self {
        Self {
            api,
            store,
            session,
            notifier,
            pairs: DashMap::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn viewer(&self) -> Option<&Viewer> {
        self.session.viewer()
    }

    fn require_viewer(&self) -> Result<&Viewer> {
        match self.viewer() {
            Some(viewer) if self.session.is_authenticated() => Ok(viewer),
            _ => Err(ArtifyError::AuthRequired),
        }
    }

    fn key_for(viewer: &Viewer, artwork_id: &str) -> PairKey {
        (viewer.id.clone(), artwork_id.to_string())
    }

    /// Current local state for the viewer, default when unknown or signed out.
    pub fn state(&self, artwork_id: &str) -> InteractionState {
        self.viewer()
            .and_then(|v| self.pairs.get(&Self::key_for(v, artwork_id)))
            .map(|entry| entry.state)
            .unwrap_or_default()
    }

    pub fn phase(&self, artwork_id: &str) -> TogglePhase {
        self.viewer()
            .and_then(|v| self.pairs.get(&Self::key_for(v, artwork_id)))
            .map(|entry| entry.phase)
            .unwrap_or_default()
    }

    /// Replace local state with known server truth. Ignored while a toggle
    /// for the pair is pending, since its answer will be applied anyway.
    pub fn seed(&self, artwork_id: &str, state: InteractionState) {
        let Some(viewer) = self.viewer() else {
            return;
        };
        let mut entry = self
            .pairs
            .entry(Self::key_for(viewer, artwork_id))
            .or_default();
        if !entry.phase.is_pending() {
            entry.state = state;
        }
    }

    /// Seed from the viewer hints a record may carry.
    pub fn observe(&self, artwork: &Artwork) {
        if artwork.liked.is_none() && artwork.favorited.is_none() {
            return;
        }
        let current = self.state(&artwork.id);
        self.seed(
            &artwork.id,
            InteractionState {
                liked: artwork.liked.unwrap_or(current.liked),
                favorited: artwork.favorited.unwrap_or(current.favorited),
            },
        );
    }

    /// Everything in the viewer's favorites list is favorited.
    pub fn mark_favorites(&self, favorites: &[Artwork]) {
        for artwork in favorites {
            let current = self.state(&artwork.id);
            self.seed(
                &artwork.id,
                InteractionState {
                    favorited: true,
                    ..current
                },
            );
        }
    }

    fn begin(&self, artwork_id: &str, kind: InteractionKind) -> Result<PendingToggle<'_, A>> {
        let viewer = self.require_viewer()?;
        let key = Self::key_for(viewer, artwork_id);
        let (likes, generation) = match kind {
            InteractionKind::Like => match self.store.likes_at(artwork_id) {
                Ok((likes, generation)) => (Some(likes), generation),
                Err(_) => (None, self.store.generation()),
            },
            InteractionKind::Favorite => (None, self.store.generation()),
        };

        let snapshot = {
            let mut entry = self.pairs.entry(key.clone()).or_default();
            entry.begin(kind, likes, generation).ok_or_else(|| {
                tracing::debug!("{kind} on '{artwork_id}' rejected, toggle already pending");
                ArtifyError::OperationInProgress(artwork_id.to_string())
            })?
        };

        Ok(PendingToggle {
            controller: self,
            key,
            kind,
            snapshot,
            settled: false,
        })
    }

    /// Apply an optimistic change to the local flags.
    fn set_local(&self, key: &PairKey, apply: impl FnOnce(&mut InteractionState)) {
        if let Some(mut entry) = self.pairs.get_mut(key) {
            apply(&mut entry.state);
        }
    }

    fn fail<T>(&self, pending: PendingToggle<'_, A>, error: ArtifyError) -> Result<T> {
        let kind = pending.kind;
        let artwork_id = pending.artwork_id().to_string();
        pending.roll_back();

        tracing::warn!("{kind} on '{artwork_id}' failed, rolled back: {error}");
        let hint = if error.is_retryable() {
            " Please try again."
        } else {
            ""
        };
        self.notifier.publish(Toast::error(format!(
            "Failed to update {}: {error}.{hint}",
            match kind {
                InteractionKind::Like => "like",
                InteractionKind::Favorite => "favorites",
            }
        )));
        Err(error)
    }

    /// Toggle the viewer's like on an artwork.
    ///
    /// Returns the confirmed state and the resulting like count, when the
    /// artwork is cached.
    pub async fn toggle_like(&self, artwork_id: &str) -> Result<LikeOutcome> {
        let pending = self.begin(artwork_id, InteractionKind::Like)?;
        let before = pending.snapshot;
        let optimistic = !before.state.liked;

        self.set_local(&pending.key, |s| s.liked = optimistic);
        if before.likes.is_some() {
            self.store.apply_like_delta(artwork_id, optimistic)?;
        }

        let outcome = match self.api.toggle_like(artwork_id).await {
            Ok(outcome) => outcome,
            Err(e) => return self.fail(pending, e),
        };

        if outcome.liked != optimistic {
            tracing::debug!(
                "server disagreed with optimistic like on '{artwork_id}': liked={}",
                outcome.liked
            );
        }

        let likes = match (before.likes, outcome.likes) {
            (None, _) => None,
            // A count from the server is current whatever was loaded meanwhile.
            (Some(_), Some(server_likes)) => match self.store.set_likes(artwork_id, server_likes) {
                Ok(()) => Some(server_likes),
                Err(e) => {
                    tracing::debug!("artwork '{artwork_id}' left the store before confirmation: {e}");
                    None
                }
            },
            (Some(before_likes), None) => {
                let reconciled = reconcile_likes(before_likes, before.state.liked, outcome.liked);
                match self.store.set_likes_at(artwork_id, reconciled, before.generation) {
                    Ok(true) => Some(reconciled),
                    Ok(false) => {
                        tracing::debug!("store reloaded during like on '{artwork_id}', keeping loaded count");
                        self.store.likes(artwork_id).ok()
                    }
                    Err(e) => {
                        tracing::debug!("artwork '{artwork_id}' left the store before confirmation: {e}");
                        None
                    }
                }
            }
        };

        pending.confirm(|s| s.liked = outcome.liked);

        Ok(LikeOutcome {
            liked: outcome.liked,
            likes: likes.or(outcome.likes),
        })
    }

    /// Toggle the viewer's favorite on an artwork.
    pub async fn toggle_favorite(&self, artwork_id: &str) -> Result<FavoriteOutcome> {
        let pending = self.begin(artwork_id, InteractionKind::Favorite)?;
        let optimistic = !pending.snapshot.state.favorited;

        self.set_local(&pending.key, |s| s.favorited = optimistic);

        let outcome = match self.api.toggle_favorite(artwork_id).await {
            Ok(outcome) => outcome,
            Err(e) => return self.fail(pending, e),
        };

        pending.confirm(|s| s.favorited = outcome.favorited);

        self.notifier.publish(Toast::success(if outcome.favorited {
            "Added to favorites"
        } else {
            "Removed from favorites"
        }));

        Ok(outcome)
    }
}
