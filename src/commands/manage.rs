use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, artwork_json, format_artwork_line};
use crate::cli::{ArtworkChanges, DraftArgs, OutputOptions};
use crate::error::{ArtifyError, Result};
use crate::gallery::Gallery;
use crate::remote::ArtworkApi;
use crate::types::ArtworkDraft;

/// Add an artwork as the signed-in viewer
pub async fn cmd_add<A: ArtworkApi + 'static>(
    gallery: &Gallery<A>,
    args: DraftArgs,
    output: OutputOptions,
) -> Result<()> {
    let artwork = gallery.create(ArtworkDraft::from(args)).await?;

    CommandOutput::new(json!({
        "action": "created",
        "artwork": artwork_json(&artwork),
    }))
    .with_text(format!("{} {}", "Created".green(), format_artwork_line(&artwork)))
    .print(output)
}

/// Change some fields of an artwork, keeping the rest
pub async fn cmd_update<A: ArtworkApi + 'static>(
    gallery: &Gallery<A>,
    id: &str,
    changes: ArtworkChanges,
    output: OutputOptions,
) -> Result<()> {
    if changes.is_empty() {
        return Err(ArtifyError::Validation(
            "nothing to update, pass at least one field".to_string(),
        ));
    }
    let artwork = gallery.edit(id, |draft| changes.apply(draft)).await?;

    CommandOutput::new(json!({
        "action": "updated",
        "artwork": artwork_json(&artwork),
    }))
    .with_text(format!("{} {}", "Updated".green(), format_artwork_line(&artwork)))
    .print(output)
}

/// Delete an artwork
pub async fn cmd_delete<A: ArtworkApi + 'static>(
    gallery: &Gallery<A>,
    id: &str,
    output: OutputOptions,
) -> Result<()> {
    gallery.delete(id).await?;

    CommandOutput::new(json!({
        "action": "deleted",
        "id": id,
    }))
    .with_text(format!("{} {}", "Deleted".green(), id.cyan()))
    .print(output)
}
