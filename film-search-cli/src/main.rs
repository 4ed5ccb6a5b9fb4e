//! film-search CLI
//!
//! Search a film catalog by title keyword or by genre and release year,
//! and review which searches are popular.

mod cli_types;
mod commands;
mod config;
mod error;
mod logging;
mod menu;
mod present;
mod table;

use clap::Parser;

use cli_types::{CatalogAction, Cli, Commands, ConfigAction, SearchAction, StatsAction};
use config::Overrides;
pub(crate) use error::CliError;

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to set up logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let overrides = Overrides {
        catalog_db: cli.catalog_db,
        page_size: None,
    };
    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => commands::interactive::run_interactive(config_path, &overrides),
        Commands::Search { action } => match action {
            SearchAction::Keyword { keyword, paging } => {
                commands::search::run_search_keyword(config_path, &overrides, &keyword, paging)
            }
            SearchAction::Genre {
                genre,
                from,
                to,
                paging,
            } => commands::search::run_search_genre(
                config_path,
                &overrides,
                &genre,
                from,
                to,
                paging,
            ),
        },
        Commands::Genres => commands::genres::run_genres(config_path, &overrides),
        Commands::Stats { action } => match action {
            StatsAction::Popular { limit } => {
                commands::stats::run_stats_popular(config_path, &overrides, limit)
            }
            StatsAction::Recent { limit } => {
                commands::stats::run_stats_recent(config_path, &overrides, limit)
            }
            StatsAction::Summary => commands::stats::run_stats_summary(config_path, &overrides),
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Import { file, db } => {
                commands::catalog::run_catalog_import(config_path, &overrides, &file, db)
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(config_path, &overrides),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    }
}
