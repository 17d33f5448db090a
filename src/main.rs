use clap::Parser;
use owo_colors::OwoColorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use artify::cli::{Cli, Commands, ConfigAction};
use artify::commands::{
    cmd_add, cmd_artists, cmd_config_set, cmd_config_show, cmd_delete, cmd_favorite, cmd_like,
    cmd_list, cmd_search, cmd_show, cmd_update, cmd_whoami,
};
use artify::{ArtworkFilter, Config, Gallery, Result};

fn init_logging() {
    let filter = EnvFilter::try_from_env("ARTIFY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let output = cli.output();

    if let Commands::Config { action } = &cli.command {
        return match action {
            ConfigAction::Show => cmd_config_show(output),
            ConfigAction::Set { key, value } => cmd_config_set(key, value, output),
        };
    }

    let config = Config::load()?;
    let gallery = Gallery::from_config(&config)?;
    tracing::debug!("using gallery API at {}", config.api_url());

    match cli.command {
        Commands::List {
            mine,
            favorites,
            latest,
        } => {
            let filter = if mine {
                ArtworkFilter::Mine
            } else if favorites {
                ArtworkFilter::Favorites
            } else if latest {
                ArtworkFilter::Latest
            } else {
                ArtworkFilter::All
            };
            cmd_list(&gallery, filter, output).await
        }
        Commands::Search { term, category } => cmd_search(&gallery, &term, category, output).await,
        Commands::Show { id } => cmd_show(&gallery, &id, output).await,
        Commands::Like { id } => cmd_like(&gallery, &id, output).await,
        Commands::Favorite { id } => cmd_favorite(&gallery, &id, output).await,
        Commands::Add(args) => cmd_add(&gallery, args, output).await,
        Commands::Update { id, changes } => cmd_update(&gallery, &id, changes, output).await,
        Commands::Delete { id } => cmd_delete(&gallery, &id, output).await,
        Commands::Artists => cmd_artists(&gallery, output).await,
        Commands::Whoami {
            set_name,
            photo_url,
        } => cmd_whoami(&gallery, set_name, photo_url, output).await,
        Commands::Config { .. } => Ok(()), // handled above
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
