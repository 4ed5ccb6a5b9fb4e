use super::*;
use chrono::TimeZone;

#[test]
fn year_range_display() {
    assert_eq!(YearRange::single(2006).to_string(), "2006");
    assert_eq!(YearRange::new(2000, 2010).unwrap().to_string(), "2000-2010");
    assert_eq!(YearRange::new(2005, 2005).unwrap().to_string(), "2005-2005");
}

#[test]
fn year_range_keeps_search_mode() {
    let specific = YearRange::single(2006);
    let range = YearRange::new(2006, 2006).unwrap();
    assert!(specific.is_single_year());
    assert!(!range.is_single_year());
    assert_eq!((range.from(), range.to()), (specific.from(), specific.to()));
    assert_ne!(specific, range);

    let params = SearchParams::genre_year("Drama", &range);
    assert_eq!(params.year_range.as_deref(), Some("2006-2006"));
}

#[test]
fn year_range_rejects_inverted() {
    let err = YearRange::new(2010, 2000).unwrap_err();
    assert_eq!(err, YearRangeError { from: 2010, to: 2000 });
}

#[test]
fn year_range_is_inclusive() {
    let r = YearRange::new(2000, 2010).unwrap();
    assert!(r.contains(2000));
    assert!(r.contains(2010));
    assert!(!r.contains(1999));
    assert!(!r.contains(2011));
}

#[test]
fn page_offsets() {
    let p = Page::first(10);
    assert_eq!(p.offset(), 0);
    assert_eq!(p.next().offset(), 10);
    assert_eq!(p.next().next().number(), 3);
    assert_eq!(Page::new(0, 10).number(), 1);
    assert_eq!(Page::new(4, 25).offset(), 75);
}

#[test]
fn page_previous_stops_at_first() {
    let p = Page::first(10);
    assert!(p.previous().is_none());
    assert_eq!(p.next().previous(), Some(p));
}

#[test]
fn keyword_params_omit_unrelated_keys() {
    let params = SearchParams::keyword("ince", 2);
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json, serde_json::json!({"keyword": "ince", "page": 2}));
}

#[test]
fn genre_year_params() {
    let params = SearchParams::genre_year("Drama", &YearRange::new(2000, 2010).unwrap());
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"genre": "Drama", "year_range": "2000-2010"})
    );
}

#[test]
fn event_document_shape() {
    let event = SearchEvent {
        timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()),
        search_type: SearchType::GenreYear,
        params: SearchParams::genre_year("Sci-Fi", &YearRange::single(2010)),
        results_count: 0,
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["timestamp"], "2024-05-01T12:30:00.000000Z");
    assert_eq!(json["search_type"], "genre_year");
    assert_eq!(json["params"]["year_range"], "2010");
    assert_eq!(json["results_count"], 0);

    let back: SearchEvent = serde_json::from_value(json).unwrap();
    assert_eq!(back, event);
}

#[test]
fn event_now_has_microsecond_precision() {
    let event = SearchEvent::now(SearchType::Keyword, SearchParams::keyword("a", 1), 3);
    let ts = event.timestamp.unwrap();
    assert_eq!(ts.timestamp_subsec_nanos() % 1_000, 0);
}

#[test]
fn event_without_readable_timestamp_still_parses() {
    let rest = r#""search_type":"keyword","params":{"keyword":"ince","page":2},"results_count":1"#;
    for doc in [
        format!("{{{rest}}}"),
        format!(r#"{{"timestamp":null,{rest}}}"#),
        format!(r#"{{"timestamp":"yesterday",{rest}}}"#),
        format!(r#"{{"timestamp":1714564800,{rest}}}"#),
    ] {
        let event: SearchEvent = serde_json::from_str(&doc).unwrap();
        assert_eq!(event.timestamp, None, "{doc}");
        assert_eq!(event.params, SearchParams::keyword("ince", 2));
    }

    let event = SearchEvent {
        timestamp: None,
        search_type: SearchType::Keyword,
        params: SearchParams::keyword("ince", 2),
        results_count: 1,
    };
    let json = serde_json::to_value(&event).unwrap();
    assert!(json.get("timestamp").is_none());
}

#[test]
fn query_stats_kind() {
    assert_eq!(QueryStats::Popular(vec![]).kind(), StatsKind::Popular);
    assert_eq!(QueryStats::Recent(vec![]).kind(), StatsKind::Recent);
    assert!(QueryStats::Recent(vec![]).is_empty());
}
