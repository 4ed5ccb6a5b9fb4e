//! Search analytics: an append-only collection of search events.
//!
//! Events are stored as JSON documents in a single SQLite table (the
//! "collection"). Aggregations group and sort on fields extracted from
//! the documents, so writers may add fields freely.

pub mod collection;
pub mod error;
pub mod events;
pub mod store;

pub use error::AnalyticsError;
pub use events::{event_count, insert_event, popular_queries, recent_queries};
pub use store::{AnalyticsConfig, AnalyticsStore};
