use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::error::Result;
use crate::gallery::Gallery;
use crate::remote::ArtworkApi;

/// Toggle the viewer's like on an artwork
pub async fn cmd_like<A: ArtworkApi + 'static>(
    gallery: &Gallery<A>,
    id: &str,
    output: OutputOptions,
) -> Result<()> {
    let outcome = gallery.toggle_like(id).await?;

    let verb = if outcome.liked { "Liked" } else { "Unliked" };
    let mut text = format!("{} {}", verb.green(), id.cyan());
    if let Some(likes) = outcome.likes {
        text.push_str(&format!(" ({likes} like(s))"));
    }

    CommandOutput::new(json!({
        "id": id,
        "action": "like",
        "liked": outcome.liked,
        "likes": outcome.likes,
    }))
    .with_text(text)
    .print(output)
}

/// Toggle an artwork in the viewer's favorites
pub async fn cmd_favorite<A: ArtworkApi + 'static>(
    gallery: &Gallery<A>,
    id: &str,
    output: OutputOptions,
) -> Result<()> {
    let outcome = gallery.toggle_favorite(id).await?;

    let text = if outcome.favorited {
        format!("{} {} to favorites", "Added".green(), id.cyan())
    } else {
        format!("{} {} from favorites", "Removed".yellow(), id.cyan())
    };

    CommandOutput::new(json!({
        "id": id,
        "action": "favorite",
        "favorited": outcome.favorited,
    }))
    .with_text(text)
    .print(output)
}
