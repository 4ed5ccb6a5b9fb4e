//! Shared data model for film-search.
//!
//! Film records produced by the catalog, search events written to the
//! analytics collection, and the aggregates read back from it.

pub mod rating;
pub mod search;
pub mod types;

pub use rating::{Rating, RatingTier};
pub use search::{
    Page, PopularQuery, QueryStats, SearchEvent, SearchParams, SearchType, StatsKind, YearRange,
    YearRangeError,
};
pub use types::FilmRecord;
