//! Search events and the aggregates derived from them.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Search Type ─────────────────────────────────────────────────────────────

/// Which search form produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    Keyword,
    GenreYear,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::GenreYear => "genre_year",
        }
    }
}

impl std::fmt::Display for SearchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Year Range ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("start year {from} is after end year {to}")]
pub struct YearRangeError {
    pub from: i32,
    pub to: i32,
}

/// Inclusive release-year window, remembering whether it was asked for as
/// one specific year or as a from/to range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    from: i32,
    to: i32,
    single: bool,
}

impl YearRange {
    /// A from/to range. Equal ends are allowed and still count as a range.
    pub fn new(from: i32, to: i32) -> Result<Self, YearRangeError> {
        if from > to {
            return Err(YearRangeError { from, to });
        }
        Ok(Self {
            from,
            to,
            single: false,
        })
    }

    /// One specific year.
    pub fn single(year: i32) -> Self {
        Self {
            from: year,
            to: year,
            single: true,
        }
    }

    pub fn from(&self) -> i32 {
        self.from
    }

    pub fn to(&self) -> i32 {
        self.to
    }

    /// Whether this was built with [`YearRange::single`].
    pub fn is_single_year(&self) -> bool {
        self.single
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.from..=self.to).contains(&year)
    }
}

/// `"2006"` for a specific year, `"2000-2010"` (or `"2006-2006"`) for a
/// range. This is the form stored in logged search params.
impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.single {
            write!(f, "{}", self.from)
        } else {
            write!(f, "{}-{}", self.from, self.to)
        }
    }
}

// ── Pagination ──────────────────────────────────────────────────────────────

/// A 1-based page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    /// First page with the given page size.
    pub fn first(size: u32) -> Self {
        Self { number: 1, size }
    }

    /// Page `number` (clamped to at least 1).
    pub fn new(number: u32, size: u32) -> Self {
        Self {
            number: number.max(1),
            size,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Rows to skip: `(number - 1) * size`.
    pub fn offset(&self) -> u32 {
        (self.number - 1).saturating_mul(self.size)
    }

    pub fn next(&self) -> Self {
        Self {
            number: self.number.saturating_add(1),
            size: self.size,
        }
    }

    /// `None` when already on the first page.
    pub fn previous(&self) -> Option<Self> {
        (self.number > 1).then(|| Self {
            number: self.number - 1,
            size: self.size,
        })
    }
}

// ── Search Params ───────────────────────────────────────────────────────────

/// Parameters recorded with a search event. Only the keys relevant to the
/// search type are present in the stored document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl SearchParams {
    pub fn keyword(keyword: impl Into<String>, page: u32) -> Self {
        Self {
            keyword: Some(keyword.into()),
            page: Some(page),
            ..Default::default()
        }
    }

    pub fn genre_year(genre: impl Into<String>, years: &YearRange) -> Self {
        Self {
            genre: Some(genre.into()),
            year_range: Some(years.to_string()),
            ..Default::default()
        }
    }
}

// ── Search Event ────────────────────────────────────────────────────────────

/// One logged search. Written once, never modified.
///
/// `timestamp` is always set on events written here. Documents read back
/// with a missing or unreadable timestamp keep the rest of their fields and
/// come back with `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEvent {
    #[serde(
        default,
        with = "timestamp_format",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    pub search_type: SearchType,
    pub params: SearchParams,
    pub results_count: u64,
}

impl SearchEvent {
    /// Event stamped with the current UTC time, at microsecond precision
    /// (the precision the analytics collection stores).
    pub fn now(search_type: SearchType, params: SearchParams, results_count: u64) -> Self {
        Self {
            timestamp: Some(Utc::now().trunc_subsecs(6)),
            search_type,
            params,
            results_count,
        }
    }
}

/// Fixed-width RFC 3339 timestamps (`2024-05-01T12:00:00.000000Z`), so that
/// string order in the collection matches time order.
///
/// Reading is lenient: a value that is not an RFC 3339 string becomes
/// `None` rather than an error.
pub mod timestamp_format {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Other(IgnoredAny),
    }

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn serialize<S: Serializer>(ts: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => s.serialize_str(&format(ts)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Ok(match Raw::deserialize(d)? {
            Raw::Text(raw) => parse(&raw),
            Raw::Other(_) => None,
        })
    }
}

// ── Aggregates ──────────────────────────────────────────────────────────────

/// One group of identical (keyword, genre, year_range) searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopularQuery {
    pub keyword: Option<String>,
    pub genre: Option<String>,
    pub year_range: Option<String>,
    pub count: u64,
}

impl PopularQuery {
    /// The grouping key as search params (without a page).
    pub fn params(&self) -> SearchParams {
        SearchParams {
            keyword: self.keyword.clone(),
            genre: self.genre.clone(),
            year_range: self.year_range.clone(),
            page: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsKind {
    Popular,
    Recent,
}

impl StatsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Recent => "recent",
        }
    }
}

/// Aggregated analytics, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStats {
    Popular(Vec<PopularQuery>),
    Recent(Vec<SearchEvent>),
}

impl QueryStats {
    pub fn kind(&self) -> StatsKind {
        match self {
            Self::Popular(_) => StatsKind::Popular,
            Self::Recent(_) => StatsKind::Recent,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Popular(rows) => rows.len(),
            Self::Recent(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
