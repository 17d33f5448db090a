use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, artwork_json, format_price};
use crate::cli::OutputOptions;
use crate::error::Result;
use crate::gallery::Gallery;
use crate::remote::ArtworkApi;
use crate::types::Artwork;

/// Show one artwork in full
pub async fn cmd_show<A: ArtworkApi + 'static>(
    gallery: &Gallery<A>,
    id: &str,
    output: OutputOptions,
) -> Result<()> {
    let artwork = gallery.open(id).await?;
    let state = gallery.state(id);

    let mut value = artwork_json(&artwork);
    if gallery.session().is_authenticated() {
        value["viewer"] = json!({
            "liked": state.liked,
            "favorited": state.favorited,
        });
    }

    let mut text = format_details(&artwork);
    if gallery.session().is_authenticated() {
        let liked = if state.liked { "yes".green().to_string() } else { "no".dimmed().to_string() };
        let favorited = if state.favorited {
            "yes".green().to_string()
        } else {
            "no".dimmed().to_string()
        };
        text.push_str(&format!("\n{}: {liked}", "Liked".cyan()));
        text.push_str(&format!("\n{}: {favorited}", "Favorite".cyan()));
    }

    CommandOutput::new(value).with_text(text).print(output)
}

fn format_details(artwork: &Artwork) -> String {
    let mut text = String::new();
    text.push_str(&format!("{}\n", artwork.title.bold()));
    text.push_str(&format!("{}\n\n", format!("by {}", artwork.artist_name).dimmed()));

    let mut field = |label: &str, value: &str| {
        if !value.is_empty() {
            text.push_str(&format!("{}: {value}\n", label.cyan()));
        }
    };
    field("ID", &artwork.id);
    field("Category", artwork.category.as_str());
    field("Medium", &artwork.medium);
    field("Dimensions", artwork.dimensions.as_deref().unwrap_or(""));
    field("Price", &format_price(artwork.price));
    field("Visibility", &artwork.visibility.to_string());
    field("Likes", &artwork.likes.to_string());
    field("Image", &artwork.image_url);
    if let Some(created) = artwork.created_timestamp() {
        field("Created", &created.strftime("%Y-%m-%d").to_string());
    }

    if !artwork.description.is_empty() {
        text.push('\n');
        text.push_str(&artwork.description);
        text.push('\n');
    }
    text.trim_end().to_string()
}
