//! Per-(artwork, viewer) toggle state machine.
//!
//! ```text
//! Idle ──begin──▶ Pending ──confirm──▶ Confirmed ──begin──▶ Pending ...
//!                    │
//!                    └──roll_back──▶ RolledBack ──begin──▶ Pending ...
//! ```
//!
//! Only one toggle may be pending per pair, whichever interaction it is.

use std::fmt;

use crate::store::ArtworkStore;

/// Viewer's relationship to one artwork. Derived from server answers and
/// never authoritative on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub liked: bool,
    pub favorited: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Like,
    Favorite,
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionKind::Like => write!(f, "like"),
            InteractionKind::Favorite => write!(f, "favorite"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TogglePhase {
    #[default]
    Idle,
    Pending(InteractionKind),
    Confirmed(InteractionKind),
    RolledBack(InteractionKind),
}

impl TogglePhase {
    pub fn is_pending(&self) -> bool {
        matches!(self, TogglePhase::Pending(_))
    }
}

/// What was on screen before an optimistic change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub state: InteractionState,
    /// Cached like count, if the artwork was in the store
    pub likes: Option<u64>,
    /// Store generation `likes` was read from
    pub generation: u64,
}

impl Snapshot {
    /// Put the flags and the cached count back to their snapshot values.
    ///
    /// Writes are absolute, so restoring twice is the same as restoring
    /// once. A count loaded after the snapshot is newer and is left alone.
    pub fn restore(&self, entry: &mut PairEntry, store: &ArtworkStore, artwork_id: &str) {
        entry.state = self.state;
        let Some(likes) = self.likes else {
            return;
        };
        match store.set_likes_at(artwork_id, likes, self.generation) {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!("store reloaded during toggle on '{artwork_id}', keeping loaded count");
            }
            Err(e) => {
                tracing::debug!("artwork '{artwork_id}' left the store before rollback: {e}");
            }
        }
    }
}

/// Toggle bookkeeping for one (artwork, viewer) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PairEntry {
    pub state: InteractionState,
    pub phase: TogglePhase,
}

impl PairEntry {
    /// Enter `Pending` and hand back the pre-toggle snapshot, or `None` if a
    /// toggle is already in flight.
    pub fn begin(
        &mut self,
        kind: InteractionKind,
        likes: Option<u64>,
        generation: u64,
    ) -> Option<Snapshot> {
        if self.phase.is_pending() {
            return None;
        }
        self.phase = TogglePhase::Pending(kind);
        Some(Snapshot {
            state: self.state,
            likes,
            generation,
        })
    }

    pub fn confirm(&mut self, kind: InteractionKind) {
        self.phase = TogglePhase::Confirmed(kind);
    }

    pub fn roll_back(&mut self, kind: InteractionKind) {
        self.phase = TogglePhase::RolledBack(kind);
    }
}

/// Like count implied by the server's answer when it does not send one.
///
/// If the server agrees the like flipped, the count moves by one from the
/// pre-toggle value; if it reports the old value, the count is unchanged.
pub fn reconcile_likes(before_likes: u64, before_liked: bool, server_liked: bool) -> u64 {
    match (before_liked, server_liked) {
        (false, true) => before_likes.saturating_add(1),
        (true, false) => before_likes.saturating_sub(1),
        _ => before_likes,
    }
}
