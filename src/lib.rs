pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gallery;
pub mod interaction;
pub mod notify;
pub mod remote;
pub mod search;
pub mod session;
pub mod store;
pub mod types;

pub use config::{Config, SearchMode};
pub use error::{ArtifyError, Result};
pub use gallery::Gallery;
pub use interaction::{InteractionController, InteractionKind, InteractionState, TogglePhase};
pub use notify::{Notifier, Toast, ToastLevel};
pub use remote::{ArtworkApi, ArtworkFilter, HttpClient};
pub use search::{CategoryFilter, SearchEngine, SearchHandle, SearchOutcome, SearchQuery};
pub use session::{Session, Viewer};
pub use store::ArtworkStore;
pub use types::{
    Artwork, ArtworkDraft, Category, FavoriteOutcome, LikeOutcome, TopArtist, UserProfile,
    Visibility,
};
