use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::config::{self, Overrides};

/// Import films from a YAML file, creating the catalog database if needed.
pub(crate) fn run_catalog_import(
    config_path: Option<&Path>,
    overrides: &Overrides,
    file: &Path,
    db_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let db_path = match db_path {
        Some(p) => p,
        None => config::load_catalog_path(config_path, overrides)?,
    };

    let films = film_search_db::load_film_file(file)?;
    log::debug!("Read {} films from {}", films.len(), file.display());

    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let conn = film_search_db::open_database(&db_path).map_err(|e| {
        CliError::database(format!(
            "Failed to open catalog database at {}: {}",
            db_path.display(),
            e
        ))
    })?;

    let stats = film_search_db::import_films(&conn, &films)?;

    log::info!(
        "{} Imported {} films into {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.films,
        db_path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("  New genres: {:>6}", stats.categories_created);
    log::info!("  New actors: {:>6}", stats.actors_created);
    Ok(())
}
