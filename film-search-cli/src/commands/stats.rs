use std::path::Path;

use film_search_core::QueryStats;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::config::{self, Overrides};
use crate::present::render_stats;

use super::{analytics_store, catalog_store};

pub(crate) fn run_stats_popular(
    config_path: Option<&Path>,
    overrides: &Overrides,
    limit: u32,
) -> Result<(), CliError> {
    let config = config::load(config_path, overrides)?;
    let mut analytics = analytics_store(&config);
    let stats = QueryStats::Popular(analytics.get_popular_queries(limit));
    log::info!("{}", render_stats(&stats, limit as usize));
    Ok(())
}

pub(crate) fn run_stats_recent(
    config_path: Option<&Path>,
    overrides: &Overrides,
    limit: u32,
) -> Result<(), CliError> {
    let config = config::load(config_path, overrides)?;
    let mut analytics = analytics_store(&config);
    let stats = QueryStats::Recent(analytics.get_recent_queries(limit));
    log::info!("{}", render_stats(&stats, limit as usize));
    Ok(())
}

/// Catalog and search log totals.
pub(crate) fn run_stats_summary(
    config_path: Option<&Path>,
    overrides: &Overrides,
) -> Result<(), CliError> {
    let config = config::load(config_path, overrides)?;
    let mut catalog = catalog_store(&config)?;
    let mut analytics = analytics_store(&config);

    let films = catalog.film_count();
    let genres = catalog.get_all_genres().len();
    let (min_year, max_year) = catalog.get_year_range();
    let events = analytics.event_count();

    log::info!("{}", "Film Search Summary".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Catalog:   {}", config.catalog_db.display());
    log::info!("  Analytics: {}", config.analytics.read_path.display());
    crate::log_blank();
    log::info!("  Films:          {:>8}", films);
    log::info!("  Genres:         {:>8}", genres);
    log::info!("  Years:          {:>8}", format!("{}-{}", min_year, max_year));
    log::info!("  Searches:       {:>8}", events);
    Ok(())
}
