pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod genres;
pub(crate) mod interactive;
pub(crate) mod search;
pub(crate) mod stats;

use film_search_analytics::AnalyticsStore;
use film_search_db::CatalogStore;

use crate::CliError;
use crate::config::AppConfig;

/// Catalog client for the configured database. The file must exist; the
/// connection itself is opened on first use.
pub(crate) fn catalog_store(config: &AppConfig) -> Result<CatalogStore, CliError> {
    if !config.catalog_db.exists() {
        return Err(CliError::database(format!(
            "No catalog database found at {}. Run 'film-search catalog import <FILE>' to create one",
            config.catalog_db.display()
        )));
    }
    Ok(CatalogStore::new(config.catalog_db.clone()))
}

pub(crate) fn analytics_store(config: &AppConfig) -> AnalyticsStore {
    AnalyticsStore::new(config.analytics.clone())
}
