//! Writing search events and aggregating them.

use film_search_core::{PopularQuery, SearchEvent};
use rusqlite::{Connection, params};

use crate::collection::validate_collection_name;
use crate::error::AnalyticsError;

/// Append one event document. Returns the new document id.
pub fn insert_event(
    conn: &Connection,
    collection: &str,
    event: &SearchEvent,
) -> Result<i64, AnalyticsError> {
    validate_collection_name(collection)?;
    let document = serde_json::to_string(event)?;
    conn.execute(
        &format!("INSERT INTO \"{collection}\" (document) VALUES (?1)"),
        params![document],
    )?;
    Ok(conn.last_insert_rowid())
}

/// The `limit` most frequent (keyword, genre, year_range) combinations,
/// most frequent first. Equal counts keep the order in which the
/// combination was first logged.
pub fn popular_queries(
    conn: &Connection,
    collection: &str,
    limit: u32,
) -> Result<Vec<PopularQuery>, AnalyticsError> {
    validate_collection_name(collection)?;
    let mut stmt = conn.prepare(&format!(
        "SELECT CAST(json_extract(document, '$.params.keyword') AS TEXT) AS keyword,
                CAST(json_extract(document, '$.params.genre') AS TEXT) AS genre,
                CAST(json_extract(document, '$.params.year_range') AS TEXT) AS year_range,
                COUNT(*) AS hits,
                MIN(id) AS first_seen
         FROM \"{collection}\"
         GROUP BY keyword, genre, year_range
         ORDER BY hits DESC, first_seen
         LIMIT ?1"
    ))?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(PopularQuery {
            keyword: row.get(0)?,
            genre: row.get(1)?,
            year_range: row.get(2)?,
            count: row.get::<_, i64>(3)?.max(0) as u64,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// The `limit` most recently logged events, newest first.
///
/// Documents that no longer parse as a [`SearchEvent`] are skipped and the
/// next older document takes their place. A document whose timestamp is
/// missing or unreadable still counts, with no timestamp, and sorts after
/// every dated one when the timestamp is missing.
pub fn recent_queries(
    conn: &Connection,
    collection: &str,
    limit: u32,
) -> Result<Vec<SearchEvent>, AnalyticsError> {
    validate_collection_name(collection)?;
    let mut stmt = conn.prepare(&format!(
        "SELECT id, document FROM \"{collection}\"
         ORDER BY json_extract(document, '$.timestamp') DESC, id DESC"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut events = Vec::new();
    for row in rows {
        if events.len() >= limit as usize {
            break;
        }
        let (id, document) = row?;
        match serde_json::from_str::<SearchEvent>(&document) {
            Ok(event) => events.push(event),
            Err(e) => log::warn!("Skipping malformed search event #{}: {}", id, e),
        }
    }
    Ok(events)
}

pub fn event_count(conn: &Connection, collection: &str) -> Result<i64, AnalyticsError> {
    validate_collection_name(collection)?;
    let count = conn.query_row(
        &format!("SELECT COUNT(*) FROM \"{collection}\""),
        [],
        |r| r.get(0),
    )?;
    Ok(count)
}
