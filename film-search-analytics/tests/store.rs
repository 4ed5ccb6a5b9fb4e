use film_search_analytics::*;
use film_search_core::{SearchParams, SearchType, YearRange};

fn temp_store(dir: &tempfile::TempDir) -> AnalyticsStore {
    AnalyticsStore::new(AnalyticsConfig::single_file(
        dir.path().join("analytics.db"),
        "search_logs",
    ))
}

#[test]
fn log_then_read_recent() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(&dir);

    assert!(store.log_search(SearchType::Keyword, SearchParams::keyword("ince", 2), 1));

    let recent = store.get_recent_queries(1);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].search_type, SearchType::Keyword);
    assert_eq!(recent[0].params, SearchParams::keyword("ince", 2));
    assert_eq!(recent[0].results_count, 1);
}

#[test]
fn most_recent_event_comes_first() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(&dir);
    let years = YearRange::new(2000, 2010).unwrap();

    store.log_search(SearchType::Keyword, SearchParams::keyword("a", 2), 4);
    store.log_search(SearchType::GenreYear, SearchParams::genre_year("Drama", &years), 0);

    let recent = store.get_recent_queries(5);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].search_type, SearchType::GenreYear);
    assert_eq!(recent[0].params.year_range.as_deref(), Some("2000-2010"));
    assert_eq!(recent[0].results_count, 0);
    assert!(recent[0].timestamp >= recent[1].timestamp);
}

#[test]
fn popular_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(&dir);
    for _ in 0..3 {
        store.log_search(SearchType::Keyword, SearchParams::keyword("ince", 2), 1);
    }
    store.log_search(SearchType::Keyword, SearchParams::keyword("toy", 2), 1);

    let popular = store.get_popular_queries(5);
    assert_eq!(popular.len(), 2);
    assert_eq!(popular[0].keyword.as_deref(), Some("ince"));
    assert_eq!(popular[0].count, 3);
    assert_eq!(store.event_count(), 4);
}

#[test]
fn reads_before_any_write_are_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(&dir);
    assert!(store.get_popular_queries(5).is_empty());
    assert!(store.get_recent_queries(5).is_empty());
    assert_eq!(store.event_count(), 0);
    assert!(!store.is_open());
}

#[test]
fn separate_read_and_write_locations() {
    let dir = tempfile::tempdir().unwrap();
    let config =
        AnalyticsConfig::from_locations(dir.path(), dir.path(), "analytics", "search_logs")
            .unwrap();
    assert_eq!(config.read_path, dir.path().join("analytics.db"));
    assert_eq!(config.read_path, config.write_path);

    let mut store = AnalyticsStore::new(config);
    assert!(store.log_search(SearchType::Keyword, SearchParams::keyword("x", 2), 0));
    assert_eq!(store.get_recent_queries(5).len(), 1);
}

#[test]
fn write_location_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let config = AnalyticsConfig::from_locations(&nested, &nested, "analytics", "logs").unwrap();
    let mut store = AnalyticsStore::new(config);
    assert!(store.log_search(SearchType::Keyword, SearchParams::keyword("x", 2), 0));
    assert!(nested.join("analytics.db").exists());
}

#[test]
fn invalid_collection_in_config() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        AnalyticsConfig::from_locations(dir.path(), dir.path(), "analytics", "bad-name"),
        Err(AnalyticsError::InvalidCollection(_))
    ));
}

#[test]
fn unwritable_location_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the directory should be
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let config = AnalyticsConfig::single_file(blocker.join("analytics.db"), "logs");
    let mut store = AnalyticsStore::new(config);

    assert!(!store.log_search(SearchType::Keyword, SearchParams::keyword("x", 2), 0));
    assert!(!store.is_open());
    assert!(store.get_recent_queries(5).is_empty());
}

#[test]
fn close_is_idempotent_and_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(&dir);

    // Never opened
    store.close();
    assert!(!store.is_open());

    store.log_search(SearchType::Keyword, SearchParams::keyword("x", 2), 0);
    assert!(store.is_open());
    store.close();
    store.close();
    assert!(!store.is_open());

    // Data survives and the next call reconnects
    assert_eq!(store.get_recent_queries(5).len(), 1);
    assert!(store.is_open());
}
