//! SQLite film catalog.
//!
//! Provides the catalog schema, read queries (keyword and genre/year
//! search with pagination, genre listing, year range), a client that
//! degrades storage failures to empty results, and YAML import for
//! building a catalog file.

pub mod import;
pub mod queries;
pub mod schema;
pub mod store;

pub use import::{
    ActorEntry, FilmEntry, ImportError, ImportStats, import_films, load_film_file,
};
pub use queries::{
    QueryError, film_count, get_all_genres, get_year_range, search_by_genre_and_year,
    search_by_keyword,
};
pub use schema::{SchemaError, open_catalog, open_database, open_memory, register_functions};
pub use store::CatalogStore;
