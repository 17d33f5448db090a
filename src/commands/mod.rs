mod account;
mod config;
mod interact;
mod list;
mod manage;
mod show;

pub use account::{cmd_artists, cmd_whoami};
pub use config::{cmd_config_set, cmd_config_show};
pub use interact::{cmd_favorite, cmd_like};
pub use list::{cmd_list, cmd_search};
pub use manage::{cmd_add, cmd_delete, cmd_update};
pub use show::cmd_show;

use owo_colors::OwoColorize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::{ArtworkChanges, DraftArgs, OutputOptions};
use crate::error::Result;
use crate::types::{Artwork, ArtworkDraft};

/// Result of a command, printed as JSON or as text depending on the
/// output options.
pub struct CommandOutput {
    json: serde_json::Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: serde_json::Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output: OutputOptions) -> Result<()> {
        if output.json {
            return print_json(&self.json);
        }
        if let Some(text) = self.text {
            println!("{text}");
        }
        Ok(())
    }
}

pub fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A row in artwork listings
#[derive(Tabled)]
struct ArtworkRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Artist")]
    artist: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Likes")]
    likes: u64,
    #[tabled(rename = "Price")]
    price: String,
}

impl From<&Artwork> for ArtworkRow {
    fn from(artwork: &Artwork) -> Self {
        Self {
            id: artwork.id.clone(),
            title: artwork.title.clone(),
            artist: artwork.artist_name.clone(),
            category: artwork.category.to_string(),
            likes: artwork.likes,
            price: format_price(artwork.price),
        }
    }
}

pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("${p:.2}"),
        None => "-".to_string(),
    }
}

/// Render a collection as a table, or a placeholder when it is empty.
pub fn format_artwork_table(artworks: &[Artwork]) -> String {
    if artworks.is_empty() {
        return "No artworks found.".dimmed().to_string();
    }
    let rows: Vec<ArtworkRow> = artworks.iter().map(ArtworkRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{table}\n\n{} artwork(s)", artworks.len())
}

/// Single-line summary used by mutation commands
pub fn format_artwork_line(artwork: &Artwork) -> String {
    format!(
        "{} {} by {} [{}]",
        artwork.id.cyan(),
        artwork.title.bold(),
        artwork.artist_name,
        artwork.category
    )
}

pub fn artwork_json(artwork: &Artwork) -> serde_json::Value {
    serde_json::to_value(artwork).unwrap_or_else(|_| json!({ "id": artwork.id }))
}

impl From<DraftArgs> for ArtworkDraft {
    fn from(args: DraftArgs) -> Self {
        ArtworkDraft {
            title: args.title,
            image_url: args.image_url,
            category: args.category,
            medium: args.medium,
            description: args.description,
            dimensions: args.dimensions,
            price: args.price,
            visibility: args.visibility,
            artist_name: None,
            artist_email: None,
        }
    }
}

impl ArtworkChanges {
    /// Overwrite the fields that were given.
    pub fn apply(self, draft: &mut ArtworkDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(image_url) = self.image_url {
            draft.image_url = image_url;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(medium) = self.medium {
            draft.medium = medium;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if self.dimensions.is_some() {
            draft.dimensions = self.dimensions;
        }
        if self.price.is_some() {
            draft.price = self.price;
        }
        if let Some(visibility) = self.visibility {
            draft.visibility = visibility;
        }
    }
}
