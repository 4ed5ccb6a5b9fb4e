//! Interactive search menu.

use std::io::{BufRead, Write};

use film_search_analytics::AnalyticsStore;
use film_search_core::{
    FilmRecord, Page, PopularQuery, QueryStats, SearchEvent, SearchParams, SearchType, YearRange,
};
use film_search_db::CatalogStore;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::logging::PROMPT_TARGET;
use crate::present::{render_films, render_stats};

/// Number of rows shown by the popular and recent menu entries.
pub(crate) const STATS_LIMIT: u32 = 5;

/// Storage operations the menu needs.
pub(crate) trait SearchBackend {
    fn search_by_keyword(&mut self, keyword: &str, page: Page) -> Vec<FilmRecord>;
    fn search_by_genre_and_year(
        &mut self,
        genre: &str,
        years: &YearRange,
        page: Page,
    ) -> Vec<FilmRecord>;
    fn genres(&mut self) -> Vec<String>;
    fn year_range(&mut self) -> (i32, i32);
    fn log_search(
        &mut self,
        search_type: SearchType,
        params: SearchParams,
        results_count: u64,
    ) -> bool;
    fn popular_queries(&mut self, limit: u32) -> Vec<PopularQuery>;
    fn recent_queries(&mut self, limit: u32) -> Vec<SearchEvent>;
    fn close(&mut self);
}

/// The catalog and analytics stores, borrowed from `main`.
pub(crate) struct Stores<'a> {
    pub catalog: &'a mut CatalogStore,
    pub analytics: &'a mut AnalyticsStore,
}

impl SearchBackend for Stores<'_> {
    fn search_by_keyword(&mut self, keyword: &str, page: Page) -> Vec<FilmRecord> {
        self.catalog
            .search_by_keyword(keyword, page.size(), page.offset())
    }

    fn search_by_genre_and_year(
        &mut self,
        genre: &str,
        years: &YearRange,
        page: Page,
    ) -> Vec<FilmRecord> {
        self.catalog.search_by_genre_and_year(
            genre,
            years.from(),
            years.to(),
            page.size(),
            page.offset(),
        )
    }

    fn genres(&mut self) -> Vec<String> {
        self.catalog.get_all_genres()
    }

    fn year_range(&mut self) -> (i32, i32) {
        self.catalog.get_year_range()
    }

    fn log_search(
        &mut self,
        search_type: SearchType,
        params: SearchParams,
        results_count: u64,
    ) -> bool {
        self.analytics.log_search(search_type, params, results_count)
    }

    fn popular_queries(&mut self, limit: u32) -> Vec<PopularQuery> {
        self.analytics.get_popular_queries(limit)
    }

    fn recent_queries(&mut self, limit: u32) -> Vec<SearchEvent> {
        self.analytics.get_recent_queries(limit)
    }

    fn close(&mut self) {
        self.analytics.close();
        self.catalog.close();
    }
}

/// Fetch one page of keyword results and log the search.
///
/// The logged page number is one ahead of the page shown, capped at
/// `u32::MAX`.
pub(crate) fn keyword_page<B: SearchBackend + ?Sized>(
    backend: &mut B,
    keyword: &str,
    page: Page,
) -> Vec<FilmRecord> {
    let films = backend.search_by_keyword(keyword, page);
    backend.log_search(
        SearchType::Keyword,
        SearchParams::keyword(keyword, page.number().saturating_add(1)),
        films.len() as u64,
    );
    films
}

/// Fetch one page of genre/year results and log the search.
pub(crate) fn genre_year_page<B: SearchBackend + ?Sized>(
    backend: &mut B,
    genre: &str,
    years: &YearRange,
    page: Page,
) -> Vec<FilmRecord> {
    let films = backend.search_by_genre_and_year(genre, years, page);
    backend.log_search(
        SearchType::GenreYear,
        SearchParams::genre_year(genre, years),
        films.len() as u64,
    );
    films
}

/// Whether to keep going after a menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The main menu loop, reading choices from `input`.
pub(crate) struct Menu<'a, B: SearchBackend, R: BufRead> {
    backend: &'a mut B,
    input: R,
    page_size: u32,
}

impl<'a, B: SearchBackend, R: BufRead> Menu<'a, B, R> {
    pub(crate) fn new(backend: &'a mut B, input: R, page_size: u32) -> Self {
        Self {
            backend,
            input,
            page_size: page_size.max(1),
        }
    }

    /// Run until the user exits or input ends. The backend is closed on the
    /// way out.
    pub(crate) fn run(&mut self) {
        loop {
            self.show_menu();
            let Some(choice) = self.prompt("Your choice: ") else {
                break;
            };
            let flow = match choice.as_str() {
                "1" => self.keyword_search(),
                "2" => self.genre_year_search(),
                "3" => {
                    let stats = QueryStats::Popular(self.backend.popular_queries(STATS_LIMIT));
                    log::info!("Top {} popular queries:", STATS_LIMIT);
                    log::info!("{}", render_stats(&stats, STATS_LIMIT as usize));
                    Flow::Continue
                }
                "4" => {
                    let stats = QueryStats::Recent(self.backend.recent_queries(STATS_LIMIT));
                    crate::log_blank();
                    log::info!("Top {} recent queries:", STATS_LIMIT);
                    log::info!("{}", render_stats(&stats, STATS_LIMIT as usize));
                    Flow::Continue
                }
                "5" => Flow::Quit,
                _ => {
                    log::info!("Invalid choice.");
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }
        log::info!("Goodbye!");
        self.backend.close();
    }

    fn show_menu(&self) {
        crate::log_blank();
        log::info!("{}", "Main Menu:".if_supports_color(Stdout, |t| t.bold()));
        log::info!("1. Search by keyword");
        log::info!("2. Search by genre and release year range");
        log::info!("3. Show {} popular queries", STATS_LIMIT);
        log::info!("4. Show {} most recent queries", STATS_LIMIT);
        log::info!("5. Exit");
    }

    /// Show `label` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Option<String> {
        log::info!(target: PROMPT_TARGET, "{}", label);
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                None
            }
        }
    }

    fn prompt_year(&mut self, label: &str) -> Option<Result<i32, ()>> {
        self.prompt(label).map(|s| s.parse::<i32>().map_err(|_| ()))
    }

    fn keyword_search(&mut self) -> Flow {
        let Some(keyword) = self.prompt("Enter a keyword to search for films: ") else {
            return Flow::Quit;
        };
        self.paginate(|backend, page| keyword_page(backend, &keyword, page))
    }

    fn genre_year_search(&mut self) -> Flow {
        let genres = self.backend.genres();
        crate::log_blank();
        log::info!("{}", "Available Genres:".if_supports_color(Stdout, |t| t.bold()));
        log::info!("{}", genres.join(", "));

        let (min_year, max_year) = self.backend.year_range();
        crate::log_blank();
        log::info!("Available Year Range: {} to {}", min_year, max_year);
        crate::log_blank();

        let Some(genre) = self.prompt("Enter genre name: ") else {
            return Flow::Quit;
        };
        if !genres.contains(&genre) {
            log::info!("The genre input is incorrect.");
            return Flow::Continue;
        }

        crate::log_blank();
        log::info!("Do you want to search by:");
        log::info!("1. Specific year");
        log::info!("2. Year range");
        let Some(year_choice) = self.prompt("Your choice: ") else {
            return Flow::Quit;
        };
        let years = match year_choice.as_str() {
            "1" => self.read_single_year(min_year, max_year),
            "2" => self.read_year_range(min_year, max_year),
            _ => {
                log::info!("Invalid choice. Please select 1 or 2");
                return Flow::Continue;
            }
        };
        let Some(years) = years else {
            return Flow::Quit;
        };

        self.paginate(|backend, page| genre_year_page(backend, &genre, &years, page))
    }

    fn read_single_year(&mut self, min_year: i32, max_year: i32) -> Option<YearRange> {
        loop {
            match self.prompt_year(&format!("Enter year ({}-{}): ", min_year, max_year))? {
                Ok(year) if (min_year..=max_year).contains(&year) => {
                    return Some(YearRange::single(year));
                }
                Ok(_) => log::info!("Year must be between {} and {}", min_year, max_year),
                Err(()) => log::info!("Please enter a valid year"),
            }
        }
    }

    fn read_year_range(&mut self, min_year: i32, max_year: i32) -> Option<YearRange> {
        loop {
            let Ok(from) =
                self.prompt_year(&format!("Enter start year ({}-{}): ", min_year, max_year))?
            else {
                log::info!("Please enter valid years");
                continue;
            };
            let Ok(to) = self.prompt_year(&format!("Enter end year ({}-{}): ", min_year, max_year))?
            else {
                log::info!("Please enter valid years");
                continue;
            };

            let bounds = min_year..=max_year;
            if !bounds.contains(&from) || !bounds.contains(&to) {
                log::info!("Years must be between {} and {}", min_year, max_year);
                continue;
            }
            match YearRange::new(from, to) {
                Ok(years) => return Some(years),
                Err(_) => log::info!("Start year cannot be greater than end year"),
            }
        }
    }

    /// Show pages from `fetch` until the user leaves. Every displayed page,
    /// including a re-display after bad input, is fetched (and logged) again.
    fn paginate(&mut self, mut fetch: impl FnMut(&mut B, Page) -> Vec<FilmRecord>) -> Flow {
        let mut page = Page::first(self.page_size);
        loop {
            let films = fetch(&mut *self.backend, page);
            log::info!("{}", render_films(&films, self.page_size as usize));

            crate::log_blank();
            log::info!("Navigation: 1 - Previous | 2 - Next | 3 - Exit");
            let Some(nav) = self.prompt("Your choice: ") else {
                return Flow::Quit;
            };
            match nav.as_str() {
                "3" => return Flow::Continue,
                "1" => match page.previous() {
                    Some(previous) => page = previous,
                    None => log::info!("You're already on the first page."),
                },
                "2" => page = page.next(),
                _ => log::info!("Invalid input."),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/menu_tests.rs"]
mod tests;
