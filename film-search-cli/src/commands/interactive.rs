use std::path::Path;

use crate::CliError;
use crate::config::{self, Overrides};
use crate::menu::{Menu, Stores};

use super::{analytics_store, catalog_store};

/// Run the interactive menu on stdin.
pub(crate) fn run_interactive(config_path: Option<&Path>, overrides: &Overrides) -> Result<(), CliError> {
    let config = config::load(config_path, overrides)?;
    let mut catalog = catalog_store(&config)?;
    let mut analytics = analytics_store(&config);

    log::debug!(
        "Catalog: {}, analytics: {}",
        config.catalog_db.display(),
        config.analytics.write_path.display()
    );

    let mut stores = Stores {
        catalog: &mut catalog,
        analytics: &mut analytics,
    };
    let stdin = std::io::stdin();
    Menu::new(&mut stores, stdin.lock(), config.page_size).run();
    Ok(())
}
