use owo_colors::OwoColorize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::error::Result;
use crate::gallery::Gallery;
use crate::remote::ArtworkApi;
use crate::types::TopArtist;

/// A row in the top artists table
#[derive(Tabled)]
struct ArtistRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Artist")]
    name: String,
    #[tabled(rename = "Followers")]
    followers: u64,
}

fn format_artists(artists: &[TopArtist]) -> String {
    if artists.is_empty() {
        return "No artists yet.".dimmed().to_string();
    }
    let rows: Vec<ArtistRow> = artists
        .iter()
        .enumerate()
        .map(|(i, a)| ArtistRow {
            rank: i + 1,
            name: a.name.clone(),
            followers: a.followers,
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Show the top artists leaderboard
pub async fn cmd_artists<A: ArtworkApi + 'static>(
    gallery: &Gallery<A>,
    output: OutputOptions,
) -> Result<()> {
    let artists = gallery.top_artists().await?;

    CommandOutput::new(json!({
        "count": artists.len(),
        "artists": artists,
    }))
    .with_text(format!(
        "{}\n\n{}",
        "Top artists".cyan().bold(),
        format_artists(&artists)
    ))
    .print(output)
}

/// Show the signed-in user's profile, applying any edits first
pub async fn cmd_whoami<A: ArtworkApi + 'static>(
    gallery: &Gallery<A>,
    set_name: Option<String>,
    photo_url: Option<String>,
    output: OutputOptions,
) -> Result<()> {
    let mut profile = gallery.profile().await?;
    if set_name.is_some() || photo_url.is_some() {
        if let Some(name) = set_name {
            profile.display_name = name;
        }
        if photo_url.is_some() {
            profile.photo_url = photo_url;
        }
        profile = gallery.update_profile(&profile).await?;
    }

    let mut text = format!("{}\n", profile.display_name.bold());
    text.push_str(&format!("{}: {}", "email".cyan(), profile.email));
    if let Some(ref photo) = profile.photo_url {
        text.push_str(&format!("\n{}: {photo}", "photo".cyan()));
    }

    CommandOutput::new(json!(profile)).with_text(text).print(output)
}
