//! Read queries for the film catalog.
//!
//! Every function takes a borrowed connection and returns the raw
//! `rusqlite` error on failure. [`crate::CatalogStore`] wraps these with
//! the degrade-to-empty policy used by the interactive frontend.
//!
//! Title matching and ordering go through `fold_case`, so the connection
//! must come from one of the [`crate::schema`] openers or have had
//! [`crate::schema::register_functions`] called on it.

use film_search_core::{FilmRecord, Rating};
use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Actor names for film `f`: distinct "First Last", ordered by last name,
/// joined with ", ".
const ACTORS_EXPR: &str = "COALESCE((
        SELECT group_concat(name, ', ' ORDER BY last_name, first_name)
        FROM (SELECT DISTINCT a.first_name || ' ' || a.last_name AS name,
                              a.first_name, a.last_name
              FROM film_actor fa
              JOIN actor a ON a.actor_id = fa.actor_id
              WHERE fa.film_id = f.film_id)
    ), '')";

// ── Film Searches ───────────────────────────────────────────────────────────

/// Films whose title contains `keyword` (case-insensitive), ordered by title.
///
/// Returns at most `limit` films starting at `offset`. `%` and `_` in the
/// keyword match literally.
pub fn search_by_keyword(
    conn: &Connection,
    keyword: &str,
    limit: u32,
    offset: u32,
) -> Result<Vec<FilmRecord>, QueryError> {
    let pattern = format!("%{}%", escape_like(keyword));
    let mut stmt = conn.prepare(&format!(
        "SELECT f.title, f.release_year, COALESCE(f.rating, ''),
                COALESCE((SELECT MIN(c.name)
                          FROM film_category fc
                          JOIN category c ON c.category_id = fc.category_id
                          WHERE fc.film_id = f.film_id), ''),
                {ACTORS_EXPR}
         FROM film f
         WHERE fold_case(f.title) LIKE fold_case(?1) ESCAPE '\\'
         ORDER BY fold_case(f.title), f.title, f.film_id
         LIMIT ?2 OFFSET ?3"
    ))?;
    let rows = stmt.query_map(params![pattern, limit, offset], row_to_film)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Films in category `genre` released in `[year_from, year_to]`, ordered by
/// year then title.
pub fn search_by_genre_and_year(
    conn: &Connection,
    genre: &str,
    year_from: i32,
    year_to: i32,
    limit: u32,
    offset: u32,
) -> Result<Vec<FilmRecord>, QueryError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT f.title, f.release_year, COALESCE(f.rating, ''), c.name,
                {ACTORS_EXPR}
         FROM film f
         JOIN film_category fc ON fc.film_id = f.film_id
         JOIN category c ON c.category_id = fc.category_id
         WHERE c.name = ?1 AND f.release_year BETWEEN ?2 AND ?3
         ORDER BY f.release_year, fold_case(f.title), f.title, f.film_id
         LIMIT ?4 OFFSET ?5"
    ))?;
    let rows = stmt.query_map(
        params![genre, year_from, year_to, limit, offset],
        row_to_film,
    )?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Catalog Facets ──────────────────────────────────────────────────────────

/// All genre names, ascending.
pub fn get_all_genres(conn: &Connection) -> Result<Vec<String>, QueryError> {
    let mut stmt = conn.prepare("SELECT DISTINCT name FROM category ORDER BY name")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// `(min, max)` release year, or `(0, 0)` for an empty catalog.
pub fn get_year_range(conn: &Connection) -> Result<(i32, i32), QueryError> {
    let (min, max): (Option<i32>, Option<i32>) = conn.query_row(
        "SELECT MIN(release_year), MAX(release_year) FROM film",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(match (min, max) {
        (Some(min), Some(max)) => (min, max),
        _ => (0, 0),
    })
}

pub fn film_count(conn: &Connection) -> Result<i64, QueryError> {
    conn.query_row("SELECT COUNT(*) FROM film", [], |r| r.get(0))
        .map_err(Into::into)
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn row_to_film(row: &rusqlite::Row<'_>) -> rusqlite::Result<FilmRecord> {
    let rating: String = row.get(2)?;
    Ok(FilmRecord {
        title: row.get(0)?,
        year: row.get(1)?,
        rating: Rating::from_str_loose(&rating),
        genre: row.get(3)?,
        actors: row.get(4)?,
    })
}
