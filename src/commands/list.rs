use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, artwork_json, format_artwork_table};
use crate::cli::OutputOptions;
use crate::error::{ArtifyError, Result};
use crate::gallery::Gallery;
use crate::remote::{ArtworkApi, ArtworkFilter};
use crate::search::{CategoryFilter, SearchOutcome, SearchQuery};

/// List one of the gallery's collections
pub async fn cmd_list<A: ArtworkApi + 'static>(
    gallery: &Gallery<A>,
    filter: ArtworkFilter,
    output: OutputOptions,
) -> Result<()> {
    if filter.requires_auth() && !gallery.session().is_authenticated() {
        return Err(ArtifyError::AuthRequired);
    }

    let artworks = gallery.refresh(filter.clone()).await?;
    let items: Vec<_> = artworks.iter().map(artwork_json).collect();

    CommandOutput::new(json!({
        "collection": filter.to_string(),
        "count": artworks.len(),
        "artworks": items,
    }))
    .with_text(format!(
        "{}\n\n{}",
        capitalize(&filter.to_string()).cyan().bold(),
        format_artwork_table(&artworks)
    ))
    .print(output)
}

/// Search the catalog by term and category
pub async fn cmd_search<A: ArtworkApi + 'static>(
    gallery: &Gallery<A>,
    term: &str,
    category: CategoryFilter,
    output: OutputOptions,
) -> Result<()> {
    let query = SearchQuery::new(term, category);

    match gallery.search_now(query.clone()).outcome().await {
        SearchOutcome::Applied { .. } | SearchOutcome::Empty => {}
        SearchOutcome::Superseded => {
            return Err(ArtifyError::Other(format!("search {query} was superseded")));
        }
        SearchOutcome::Failed(message) => {
            return Err(ArtifyError::Other(format!("search failed: {message}")));
        }
    }

    let artworks = gallery.store().view();
    let items: Vec<_> = artworks.iter().map(artwork_json).collect();

    CommandOutput::new(json!({
        "term": query.term(),
        "category": query.category().to_string(),
        "count": artworks.len(),
        "artworks": items,
    }))
    .with_text(format!(
        "Search results for {query}\n\n{}",
        format_artwork_table(&artworks)
    ))
    .print(output)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
