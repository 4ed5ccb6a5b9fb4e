//! Catalog client used by the frontend.

use std::path::PathBuf;

use film_search_core::FilmRecord;
use rusqlite::Connection;

use crate::queries::{self, QueryError};
use crate::schema::{open_catalog, register_functions};

/// Owned handle to the film catalog.
///
/// The connection is opened on first use and kept until [`close`] (or
/// drop). Storage failures never reach the caller: they are logged and
/// turned into an empty result, or `(0, 0)` for the year range.
///
/// [`close`]: CatalogStore::close
pub struct CatalogStore {
    path: Option<PathBuf>,
    conn: Option<Connection>,
}

impl CatalogStore {
    /// Catalog backed by the SQLite file at `path`. Nothing is opened yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            conn: None,
        }
    }

    /// Wrap an already-open connection (e.g. from `open_memory`). The
    /// search functions are registered on it here.
    pub fn from_connection(conn: Connection) -> Self {
        if let Err(e) = register_functions(&conn) {
            log::warn!("Failed to register catalog functions: {}", e);
        }
        Self {
            path: None,
            conn: Some(conn),
        }
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Close the cached connection. Safe to call repeatedly.
    pub fn close(&mut self) {
        if let Some(conn) = self.conn.take()
            && let Err((_, e)) = conn.close()
        {
            log::debug!("Error closing catalog connection: {}", e);
        }
    }

    pub fn search_by_keyword(&mut self, keyword: &str, limit: u32, offset: u32) -> Vec<FilmRecord> {
        self.run("keyword search", |conn| {
            queries::search_by_keyword(conn, keyword, limit, offset)
        })
    }

    pub fn search_by_genre_and_year(
        &mut self,
        genre: &str,
        year_from: i32,
        year_to: i32,
        limit: u32,
        offset: u32,
    ) -> Vec<FilmRecord> {
        self.run("genre search", |conn| {
            queries::search_by_genre_and_year(conn, genre, year_from, year_to, limit, offset)
        })
    }

    pub fn get_all_genres(&mut self) -> Vec<String> {
        self.run("genre listing", queries::get_all_genres)
    }

    pub fn get_year_range(&mut self) -> (i32, i32) {
        self.run("year range", queries::get_year_range)
    }

    pub fn film_count(&mut self) -> i64 {
        self.run("film count", queries::film_count)
    }

    fn connection(&mut self) -> Option<&Connection> {
        if self.conn.is_none()
            && let Some(path) = &self.path
        {
            match open_catalog(path) {
                Ok(conn) => {
                    log::debug!("Opened catalog {}", path.display());
                    self.conn = Some(conn);
                }
                Err(e) => log::error!("Catalog connection error: {}", e),
            }
        }
        self.conn.as_ref()
    }

    fn run<T: Default>(
        &mut self,
        what: &str,
        query: impl FnOnce(&Connection) -> Result<T, QueryError>,
    ) -> T {
        let Some(conn) = self.connection() else {
            return T::default();
        };
        match query(conn) {
            Ok(value) => value,
            Err(e) => {
                log::error!("Query execution error ({}): {}", what, e);
                T::default()
            }
        }
    }
}

impl Drop for CatalogStore {
    fn drop(&mut self) {
        self.close();
    }
}
