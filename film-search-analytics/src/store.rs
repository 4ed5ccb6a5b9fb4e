//! Analytics client used by the frontend.

use std::path::{Path, PathBuf};
use std::time::Duration;

use film_search_core::{PopularQuery, SearchEvent, SearchParams, SearchType};
use rusqlite::{Connection, OpenFlags};

use crate::collection::{collection_exists, ensure_collection, validate_collection_name};
use crate::error::AnalyticsError;
use crate::events;

/// How long a connection waits on a locked database before giving up.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the analytics collection lives.
///
/// Reads and writes may go to different files (e.g. a read replica), but
/// usually both paths are the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
    pub read_path: PathBuf,
    pub write_path: PathBuf,
    pub collection: String,
}

impl AnalyticsConfig {
    /// Build from read/write directories and a database name: each side
    /// uses `<dir>/<database>.db`.
    pub fn from_locations(
        read_dir: &Path,
        write_dir: &Path,
        database: &str,
        collection: impl Into<String>,
    ) -> Result<Self, AnalyticsError> {
        let collection = collection.into();
        validate_collection_name(&collection)?;
        let file_name = format!("{database}.db");
        Ok(Self {
            read_path: read_dir.join(&file_name),
            write_path: write_dir.join(&file_name),
            collection,
        })
    }

    /// Read and write through the same file.
    pub fn single_file(path: impl Into<PathBuf>, collection: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            read_path: path.clone(),
            write_path: path,
            collection: collection.into(),
        }
    }
}

/// Owned handle to the analytics collection.
///
/// Writer and reader connections are opened on first use and cached until
/// [`close`] (or drop). A failed open is not cached, so the next call tries
/// again. Storage failures never reach the caller: writes report `false`,
/// reads come back empty.
///
/// [`close`]: AnalyticsStore::close
pub struct AnalyticsStore {
    config: AnalyticsConfig,
    writer: Option<Connection>,
    reader: Option<Connection>,
}

impl AnalyticsStore {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self {
            config,
            writer: None,
            reader: None,
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some() || self.reader.is_some()
    }

    /// Record one search, stamped with the current UTC time.
    ///
    /// Returns `false` if the event could not be stored.
    pub fn log_search(
        &mut self,
        search_type: SearchType,
        params: SearchParams,
        results_count: u64,
    ) -> bool {
        let event = SearchEvent::now(search_type, params, results_count);
        let collection = self.config.collection.clone();
        let Some(conn) = self.writer() else {
            return false;
        };
        match events::insert_event(conn, &collection, &event) {
            Ok(id) => {
                log::debug!("Logged {} search as event #{}", search_type, id);
                true
            }
            Err(e) => {
                log::error!("Failed to log search: {}", e);
                false
            }
        }
    }

    pub fn get_popular_queries(&mut self, limit: u32) -> Vec<PopularQuery> {
        self.read("popular queries", |conn, collection| {
            events::popular_queries(conn, collection, limit)
        })
    }

    pub fn get_recent_queries(&mut self, limit: u32) -> Vec<SearchEvent> {
        self.read("recent queries", |conn, collection| {
            events::recent_queries(conn, collection, limit)
        })
    }

    /// Total number of logged events (0 when unavailable).
    pub fn event_count(&mut self) -> i64 {
        self.read("event count", events::event_count)
    }

    /// Close both connections. Safe to call repeatedly, or before anything
    /// was opened.
    pub fn close(&mut self) {
        for conn in [self.writer.take(), self.reader.take()].into_iter().flatten() {
            if let Err((_, e)) = conn.close() {
                log::debug!("Error closing analytics connection: {}", e);
            }
        }
    }

    fn writer(&mut self) -> Option<&Connection> {
        if self.writer.is_none() {
            match open_writer(&self.config) {
                Ok(conn) => self.writer = Some(conn),
                Err(e) => log::error!("Analytics connection error: {}", e),
            }
        }
        self.writer.as_ref()
    }

    fn reader(&mut self) -> Option<&Connection> {
        if self.reader.is_none() {
            // Nothing has been logged yet.
            if !self.config.read_path.exists() {
                return None;
            }
            match open_reader(&self.config.read_path) {
                Ok(conn) => self.reader = Some(conn),
                Err(e) => log::error!("Analytics connection error: {}", e),
            }
        }
        self.reader.as_ref()
    }

    fn read<T: Default>(
        &mut self,
        what: &str,
        query: impl FnOnce(&Connection, &str) -> Result<T, AnalyticsError>,
    ) -> T {
        let collection = self.config.collection.clone();
        let Some(conn) = self.reader() else {
            return T::default();
        };
        let result = collection_exists(conn, &collection).and_then(|exists| {
            if exists {
                query(conn, &collection)
            } else {
                Ok(T::default())
            }
        });
        match result {
            Ok(value) => value,
            Err(e) => {
                log::error!("Failed to get {}: {}", what, e);
                T::default()
            }
        }
    }
}

impl Drop for AnalyticsStore {
    fn drop(&mut self) {
        self.close();
    }
}

fn open_writer(config: &AnalyticsConfig) -> Result<Connection, AnalyticsError> {
    if let Some(parent) = config.write_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| AnalyticsError::Io {
            path: parent.display().to_string(),
            source: e,
        })?;
    }
    let conn = Connection::open(&config.write_path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    ensure_collection(&conn, &config.collection)?;
    log::debug!(
        "Opened analytics collection '{}' at {}",
        config.collection,
        config.write_path.display()
    );
    Ok(conn)
}

fn open_reader(path: &Path) -> Result<Connection, AnalyticsError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}
