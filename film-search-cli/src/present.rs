//! Rendering search results and search statistics.

use chrono::{DateTime, Utc};
use film_search_core::{FilmRecord, QueryStats, RatingTier, SearchParams};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::table::{Cell, CellColor, Table};

/// Maximum characters of the actor list shown before it is cut off.
pub(crate) const ACTORS_DISPLAY_WIDTH: usize = 85;

pub(crate) const FILM_HEADERS: [&str; 5] = ["Title", "Year", "Rating", "Genre", "Actors"];

/// Cut `text` to `max_chars` characters, appending "..." when anything was
/// removed.
pub(crate) fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

fn tier_color(tier: RatingTier) -> CellColor {
    match tier {
        RatingTier::Mild => CellColor::Green,
        RatingTier::Moderate => CellColor::Yellow,
        RatingTier::Restricted => CellColor::Red,
        RatingTier::Unrated => CellColor::Plain,
    }
}

/// Film results as a table, at most `max_rows` rows.
pub(crate) fn render_films(films: &[FilmRecord], max_rows: usize) -> String {
    if films.is_empty() {
        return "No results found."
            .if_supports_color(Stdout, |t| t.red())
            .to_string();
    }

    let mut table = Table::new(FILM_HEADERS);
    for film in films.iter().take(max_rows) {
        table.add_row(vec![
            film.title.as_str().into(),
            film.year.to_string().into(),
            Cell::colored(film.rating.as_str(), tier_color(film.rating.tier())),
            film.genre.as_str().into(),
            truncate_text(&film.actors, ACTORS_DISPLAY_WIDTH).into(),
        ]);
    }
    table.render()
}

/// Search parameters as "keyword: X, genre: Y, year_range: Z", leaving out
/// empty fields.
pub(crate) fn describe_params(params: &SearchParams) -> String {
    let fields = [
        ("keyword", params.keyword.as_deref()),
        ("genre", params.genre.as_deref()),
        ("year_range", params.year_range.as_deref()),
    ];
    let parts: Vec<String> = fields
        .iter()
        .filter_map(|(name, value)| match value {
            Some(v) if !v.is_empty() => Some(format!("{name}: {v}")),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        "(any)".to_string()
    } else {
        parts.join(", ")
    }
}

/// Placeholder shown for an event without a readable timestamp.
pub(crate) const MISSING_TIMESTAMP: &str = "N/A";

pub(crate) fn format_timestamp(timestamp: Option<&DateTime<Utc>>) -> String {
    match timestamp {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => MISSING_TIMESTAMP.to_string(),
    }
}

/// Popular or recent query aggregates with a title line.
pub(crate) fn render_stats(stats: &QueryStats, max_rows: usize) -> String {
    let (title, empty_message, table) = match stats {
        QueryStats::Popular(queries) => {
            let mut table = Table::new(["Query", "Count"]);
            for query in queries.iter().take(max_rows) {
                table.add_row(vec![
                    describe_params(&query.params()).into(),
                    query.count.to_string().into(),
                ]);
            }
            ("Popular Queries:", "No popular queries found.", table)
        }
        QueryStats::Recent(events) => {
            let mut table = Table::new(["Query", "Timestamp"]);
            for event in events.iter().take(max_rows) {
                table.add_row(vec![
                    describe_params(&event.params).into(),
                    format_timestamp(event.timestamp.as_ref()).into(),
                ]);
            }
            ("Recent Queries:", "No recent queries found.", table)
        }
    };

    if table.is_empty() {
        return empty_message
            .if_supports_color(Stdout, |t| t.red())
            .to_string();
    }
    format!(
        "{}\n{}",
        title.if_supports_color(Stdout, |t| t.bold()),
        table.render()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use film_search_core::{PopularQuery, Rating, SearchEvent, SearchType, YearRange};

    fn plain(rendered: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(rendered)).unwrap()
    }

    fn film(title: &str, actors: &str) -> FilmRecord {
        FilmRecord {
            title: title.to_string(),
            year: 2006,
            rating: Rating::Pg13,
            genre: "Action".to_string(),
            actors: actors.to_string(),
        }
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_text("abc", 3), "abc");
        assert_eq!(truncate_text("", 5), "");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        // Character based, not byte based
        assert_eq!(truncate_text("éééé", 2), "éé...");
    }

    #[test]
    fn empty_films() {
        assert_eq!(plain(&render_films(&[], 10)), "No results found.");
    }

    #[test]
    fn film_table_contents() {
        let rendered = plain(&render_films(&[film("Inception", "Leo DiCaprio")], 10));
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("Title") && lines[1].contains("Actors"));
        assert!(lines[3].contains("Inception"));
        assert!(lines[3].contains("PG-13"));
        assert!(lines[3].contains("Leo DiCaprio"));
    }

    #[test]
    fn film_rows_capped() {
        let films: Vec<_> = (0..15).map(|i| film(&format!("Film {i}"), "")).collect();
        let rendered = plain(&render_films(&films, 10));
        // 3 border lines + header + 10 rows
        assert_eq!(rendered.lines().count(), 14);
        assert!(!rendered.contains("Film 10"));
    }

    #[test]
    fn long_actor_list_truncated() {
        let actors = vec!["Firstname Lastname"; 10].join(", ");
        let rendered = plain(&render_films(&[film("Crowded", &actors)], 10));
        let expected = format!("{}...", &actors[..ACTORS_DISPLAY_WIDTH]);
        assert!(rendered.contains(&expected));
        assert!(!rendered.contains(&actors));
    }

    #[test]
    fn describe_skips_empty_fields() {
        assert_eq!(
            describe_params(&SearchParams::keyword("ince", 2)),
            "keyword: ince"
        );
        let years = YearRange::new(2000, 2010).unwrap();
        assert_eq!(
            describe_params(&SearchParams::genre_year("Drama", &years)),
            "genre: Drama, year_range: 2000-2010"
        );
        let blank = SearchParams {
            keyword: Some(String::new()),
            ..SearchParams::default()
        };
        assert_eq!(describe_params(&blank), "(any)");
    }

    #[test]
    fn popular_stats() {
        let stats = QueryStats::Popular(vec![PopularQuery {
            keyword: Some("ince".to_string()),
            genre: None,
            year_range: None,
            count: 3,
        }]);
        let rendered = plain(&render_stats(&stats, 5));
        assert!(rendered.starts_with("Popular Queries:\n"));
        assert!(rendered.contains("| Query         | Count |"));
        assert!(rendered.contains("| keyword: ince | 3     |"));
    }

    #[test]
    fn recent_stats() {
        let event = SearchEvent {
            timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 15).unwrap()),
            search_type: SearchType::Keyword,
            params: SearchParams::keyword("ince", 2),
            results_count: 1,
        };
        let rendered = plain(&render_stats(&QueryStats::Recent(vec![event]), 5));
        assert!(rendered.starts_with("Recent Queries:\n"));
        assert!(rendered.contains("2024-05-01 09:30:15"));
    }

    #[test]
    fn recent_stats_without_timestamp() {
        let event = SearchEvent {
            timestamp: None,
            search_type: SearchType::Keyword,
            params: SearchParams::keyword("ince", 2),
            results_count: 1,
        };
        let rendered = plain(&render_stats(&QueryStats::Recent(vec![event]), 5));
        assert!(rendered.contains("| keyword: ince | N/A       |"));
    }

    #[test]
    fn empty_stats() {
        assert_eq!(
            plain(&render_stats(&QueryStats::Popular(vec![]), 5)),
            "No popular queries found."
        );
        assert_eq!(
            plain(&render_stats(&QueryStats::Recent(vec![]), 5)),
            "No recent queries found."
        );
    }
}
