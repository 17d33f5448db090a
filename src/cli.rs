use clap::{Args, Parser, Subcommand};

use crate::search::CategoryFilter;
use crate::types::Visibility;

#[derive(Parser)]
#[command(name = "artify")]
#[command(about = "Browse, search and curate the Artify gallery")]
#[command(version)]
pub struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output flags shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
}

impl Cli {
    pub fn output(&self) -> OutputOptions {
        OutputOptions { json: self.json }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List artworks
    #[command(visible_alias = "ls")]
    List {
        /// Only artworks you added (requires sign-in)
        #[arg(long, group = "collection")]
        mine: bool,

        /// Only your favorites (requires sign-in)
        #[arg(long, group = "collection")]
        favorites: bool,

        /// Most recent artworks
        #[arg(long, group = "collection")]
        latest: bool,
    },

    /// Search by title or artist, optionally within a category
    Search {
        /// Text to match against title and artist name
        #[arg(default_value = "")]
        term: String,

        /// Category name, or "All"
        #[arg(short, long, default_value = "All", value_parser = parse_category_filter)]
        category: CategoryFilter,
    },

    /// Show one artwork
    #[command(visible_alias = "s")]
    Show {
        /// Artwork ID
        id: String,
    },

    /// Like or unlike an artwork
    Like {
        /// Artwork ID
        id: String,
    },

    /// Add or remove an artwork from favorites
    #[command(visible_alias = "fav")]
    Favorite {
        /// Artwork ID
        id: String,
    },

    /// Add an artwork
    Add(DraftArgs),

    /// Update an artwork you own
    Update {
        /// Artwork ID
        id: String,

        #[command(flatten)]
        changes: ArtworkChanges,
    },

    /// Delete an artwork you own
    #[command(visible_alias = "rm")]
    Delete {
        /// Artwork ID
        id: String,
    },

    /// Show the top artists
    Artists,

    /// Show or edit the signed-in user's profile
    Whoami {
        /// New display name
        #[arg(long)]
        set_name: Option<String>,

        /// New profile photo URL
        #[arg(long)]
        photo_url: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug, Clone)]
pub struct DraftArgs {
    /// Artwork title
    #[arg(long)]
    pub title: String,

    /// Public http(s) URL of the image
    #[arg(long)]
    pub image_url: String,

    /// Category (e.g. Painting, Photography, "Digital Art")
    #[arg(long)]
    pub category: String,

    /// Medium or tools used
    #[arg(long)]
    pub medium: String,

    /// Description text
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Dimensions, e.g. "24x36 in"
    #[arg(long)]
    pub dimensions: Option<String>,

    /// Asking price
    #[arg(long)]
    pub price: Option<f64>,

    /// public or private
    #[arg(long, default_value = "public", value_parser = parse_visibility)]
    pub visibility: Visibility,
}

/// Fields to change on an existing artwork. Anything left out keeps its
/// current value.
#[derive(Args, Debug, Clone, Default)]
pub struct ArtworkChanges {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub image_url: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub medium: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(long)]
    pub dimensions: Option<String>,

    #[arg(long)]
    pub price: Option<f64>,

    #[arg(long, value_parser = parse_visibility)]
    pub visibility: Option<Visibility>,
}

impl ArtworkChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.image_url.is_none()
            && self.category.is_none()
            && self.medium.is_none()
            && self.description.is_none()
            && self.dimensions.is_none()
            && self.price.is_none()
            && self.visibility.is_none()
    }
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key in dot notation (e.g. api.url, auth.token)
        key: String,

        /// New value
        value: String,
    },
}

fn parse_category_filter(s: &str) -> Result<CategoryFilter, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_visibility(s: &str) -> Result<Visibility, String> {
    s.parse().map_err(|e| format!("{e}"))
}
