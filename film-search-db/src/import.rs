//! Catalog import from YAML.
//!
//! A film file is a mapping with a `films` sequence:
//!
//! ```yaml
//! films:
//!   - title: Inception
//!     year: 2010
//!     rating: PG-13
//!     genres: [Sci-Fi]
//!     actors:
//!       - { first_name: Leonardo, last_name: DiCaprio }
//! ```
//!
//! Genres and actors are shared between films by name.

use std::path::Path;

use film_search_core::Rating;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Film #{index} has an empty title")]
    EmptyTitle { index: usize },
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilmFile {
    #[serde(default)]
    pub films: Vec<FilmEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilmEntry {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub actors: Vec<ActorEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActorEntry {
    pub first_name: String,
    pub last_name: String,
}

/// Counts from an import run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub films: usize,
    pub categories_created: usize,
    pub actors_created: usize,
}

/// Parse a YAML film file.
pub fn load_film_file(path: &Path) -> Result<Vec<FilmEntry>, ImportError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let file: FilmFile = serde_yml::from_str(&contents).map_err(|e| ImportError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(file.films)
}

/// Insert films, their genres and their cast. Runs in one transaction:
/// either every film is imported or none is.
pub fn import_films(conn: &Connection, films: &[FilmEntry]) -> Result<ImportStats, ImportError> {
    let mut stats = ImportStats::default();
    let tx = conn.unchecked_transaction()?;

    for (index, film) in films.iter().enumerate() {
        let title = film.title.trim();
        if title.is_empty() {
            return Err(ImportError::EmptyTitle { index });
        }

        let rating = film
            .rating
            .as_deref()
            .map(|r| Rating::from_str_loose(r).as_str().to_string());
        tx.execute(
            "INSERT INTO film (title, release_year, rating) VALUES (?1, ?2, ?3)",
            params![title, film.year, rating],
        )?;
        let film_id = tx.last_insert_rowid();

        for genre in &film.genres {
            let (category_id, created) = find_or_insert_category(&tx, genre.trim())?;
            if created {
                stats.categories_created += 1;
            }
            tx.execute(
                "INSERT OR IGNORE INTO film_category (film_id, category_id) VALUES (?1, ?2)",
                params![film_id, category_id],
            )?;
        }

        for actor in &film.actors {
            let (actor_id, created) =
                find_or_insert_actor(&tx, actor.first_name.trim(), actor.last_name.trim())?;
            if created {
                stats.actors_created += 1;
            }
            tx.execute(
                "INSERT OR IGNORE INTO film_actor (actor_id, film_id) VALUES (?1, ?2)",
                params![actor_id, film_id],
            )?;
        }

        stats.films += 1;
    }

    tx.commit()?;
    log::debug!(
        "Imported {} films ({} new genres, {} new actors)",
        stats.films,
        stats.categories_created,
        stats.actors_created
    );
    Ok(stats)
}

/// Returns the category id and whether it was newly created.
fn find_or_insert_category(conn: &Connection, name: &str) -> Result<(i64, bool), ImportError> {
    let existing = conn
        .query_row(
            "SELECT category_id FROM category WHERE name = ?1",
            params![name],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    if let Some(id) = existing {
        return Ok((id, false));
    }
    conn.execute("INSERT INTO category (name) VALUES (?1)", params![name])?;
    Ok((conn.last_insert_rowid(), true))
}

/// Returns the actor id and whether it was newly created.
fn find_or_insert_actor(
    conn: &Connection,
    first_name: &str,
    last_name: &str,
) -> Result<(i64, bool), ImportError> {
    let existing = conn
        .query_row(
            "SELECT actor_id FROM actor WHERE first_name = ?1 AND last_name = ?2
             ORDER BY actor_id LIMIT 1",
            params![first_name, last_name],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    if let Some(id) = existing {
        return Ok((id, false));
    }
    conn.execute(
        "INSERT INTO actor (first_name, last_name) VALUES (?1, ?2)",
        params![first_name, last_name],
    )?;
    Ok((conn.last_insert_rowid(), true))
}
