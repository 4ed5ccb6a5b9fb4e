use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::config::{self, Overrides};

use super::catalog_store;

/// List genres and the release year range.
pub(crate) fn run_genres(config_path: Option<&Path>, overrides: &Overrides) -> Result<(), CliError> {
    let config = config::load(config_path, overrides)?;
    let mut catalog = catalog_store(&config)?;

    let genres = catalog.get_all_genres();
    let (min_year, max_year) = catalog.get_year_range();

    log::info!("{}", "Available Genres:".if_supports_color(Stdout, |t| t.bold()));
    if genres.is_empty() {
        log::info!("  (none)");
    } else {
        log::info!("{}", genres.join(", "));
    }
    crate::log_blank();
    log::info!(
        "{} {} to {}",
        "Available Year Range:".if_supports_color(Stdout, |t| t.bold()),
        min_year,
        max_year,
    );
    Ok(())
}
