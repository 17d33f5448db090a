//! Debounced search with last-query-wins semantics.
//!
//! Every `set_query` takes a new generation number. A query runs only after
//! the debounce window passes without a newer one, and its results are only
//! applied if it is still the newest query when they arrive. Superseded
//! requests are not aborted on the network; their responses are dropped.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::config::SearchMode;
use crate::error::Result;
use crate::notify::{Notifier, Toast};
use crate::remote::{ArtworkApi, ArtworkFilter};
use crate::store::ArtworkStore;
use crate::types::Artwork;

use super::SearchQuery;

/// How a scheduled query ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results were written to the store
    Applied { count: usize },
    /// The query matched nothing; the store now shows an empty view
    Empty,
    /// A newer query replaced this one; nothing was written
    Superseded,
    /// The request failed; the store keeps its previous contents
    Failed(String),
}

/// Handle to a scheduled query.
pub struct SearchHandle {
    generation: u64,
    task: JoinHandle<SearchOutcome>,
}

impl SearchHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait for the query to finish, be discarded, or fail.
    pub async fn outcome(self) -> SearchOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => SearchOutcome::Failed(format!("search task did not complete: {e}")),
        }
    }
}

/// Debouncing front end to catalog search.
pub struct SearchEngine<A: ArtworkApi + 'static> {
    api: Arc<A>,
    store: Arc<ArtworkStore>,
    notifier: Notifier,
    debounce: Duration,
    mode: SearchMode,
    /// Newest generation handed out. Checked and applied under the same
    /// lock, so a stale task can never write between check and load.
    latest: Arc<Mutex<u64>>,
}

impl<A: ArtworkApi + 'static> SearchEngine<A> {
    pub fn new(
        api: Arc<A>,
        store: Arc<ArtworkStore>,
        notifier: Notifier,
        debounce: Duration,
        mode: SearchMode,
    ) -> Self {
        Self {
            api,
            store,
            notifier,
            debounce,
            mode,
            latest: Arc::new(Mutex::new(0)),
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Generation of the newest scheduled query.
    pub fn latest_generation(&self) -> u64 {
        *self.latest.lock()
    }

    /// Schedule `query` after the debounce window, superseding any earlier
    /// query.
    pub fn set_query(&self, query: SearchQuery) -> SearchHandle {
        self.schedule(query, self.debounce)
    }

    /// Run `query` immediately, still superseding earlier queries.
    pub fn search_now(&self, query: SearchQuery) -> SearchHandle {
        self.schedule(query, Duration::ZERO)
    }

    /// Take a generation for a collection load that does not go through
    /// the engine, superseding every query scheduled so far.
    pub fn supersede(&self) -> u64 {
        let mut latest = self.latest.lock();
        *latest += 1;
        *latest
    }

    /// Load `items` into the store if no query was scheduled since
    /// `generation` was taken. Returns whether the store was written.
    pub fn load_if_current(&self, generation: u64, items: Vec<Artwork>) -> bool {
        let latest = self.latest.lock();
        if *latest != generation {
            tracing::debug!(generation, latest = *latest, "discarding stale collection load");
            return false;
        }
        self.store.load(items);
        true
    }

    fn schedule(&self, query: SearchQuery, delay: Duration) -> SearchHandle {
        let generation = self.supersede();
        tracing::debug!(generation, "scheduling search {}", query);

        let job = SearchJob {
            api: Arc::clone(&self.api),
            store: Arc::clone(&self.store),
            notifier: self.notifier.clone(),
            latest: Arc::clone(&self.latest),
            mode: self.mode,
            generation,
            query,
        };
        let task = tokio::spawn(job.run(delay));

        SearchHandle { generation, task }
    }
}

struct SearchJob<A: ArtworkApi + 'static> {
    api: Arc<A>,
    store: Arc<ArtworkStore>,
    notifier: Notifier,
    latest: Arc<Mutex<u64>>,
    mode: SearchMode,
    generation: u64,
    query: SearchQuery,
}

impl<A: ArtworkApi + 'static> SearchJob<A> {
    async fn run(self, delay: Duration) -> SearchOutcome {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if !self.is_current() {
            tracing::debug!(generation = self.generation, "search superseded before dispatch");
            return SearchOutcome::Superseded;
        }

        match self.mode {
            SearchMode::Local => self.apply_local(),
            SearchMode::Remote => {
                let filter = if self.query.is_unfiltered() {
                    ArtworkFilter::All
                } else {
                    ArtworkFilter::Search(self.query.clone())
                };
                let result = self.api.fetch_artworks(&filter).await;
                self.apply_remote(result)
            }
        }
    }

    fn is_current(&self) -> bool {
        *self.latest.lock() == self.generation
    }

    fn apply_local(&self) -> SearchOutcome {
        let latest = self.latest.lock();
        if *latest != self.generation {
            return SearchOutcome::Superseded;
        }
        let count = self.store.apply_filter(self.query.clone());
        drop(latest);
        outcome_for(count)
    }

    fn apply_remote(&self, result: Result<Vec<Artwork>>) -> SearchOutcome {
        let latest = self.latest.lock();
        if *latest != self.generation {
            tracing::debug!(
                generation = self.generation,
                latest = *latest,
                "discarding stale search response"
            );
            return SearchOutcome::Superseded;
        }

        match result {
            Ok(items) => {
                let count = items.len();
                self.store.load(items);
                drop(latest);
                outcome_for(count)
            }
            Err(e) => {
                drop(latest);
                tracing::warn!("search {} failed: {e}", self.query);
                self.notifier
                    .publish(Toast::error(format!("Failed to filter artworks: {e}")));
                SearchOutcome::Failed(e.to_string())
            }
        }
    }
}

fn outcome_for(count: usize) -> SearchOutcome {
    if count == 0 {
        SearchOutcome::Empty
    } else {
        SearchOutcome::Applied { count }
    }
}
