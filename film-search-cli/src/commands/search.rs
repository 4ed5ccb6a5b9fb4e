use std::path::Path;

use film_search_core::{FilmRecord, Page, YearRange};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::PageArgs;
use crate::config::{self, Overrides};
use crate::menu::{Stores, genre_year_page, keyword_page};
use crate::present::render_films;

use super::{analytics_store, catalog_store};

fn with_page_size(overrides: &Overrides, paging: PageArgs) -> Overrides {
    Overrides {
        page_size: paging.page_size.or(overrides.page_size),
        ..overrides.clone()
    }
}

fn print_page(films: &[FilmRecord], page: Page) {
    log::info!("{}", render_films(films, page.size() as usize));
    crate::log_blank();
    log::info!(
        "{}",
        format!("Page {} ({} results)", page.number(), films.len())
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
}

/// One page of keyword results. The search is logged like a menu search.
pub(crate) fn run_search_keyword(
    config_path: Option<&Path>,
    overrides: &Overrides,
    keyword: &str,
    paging: PageArgs,
) -> Result<(), CliError> {
    let config = config::load(config_path, &with_page_size(overrides, paging))?;
    let mut catalog = catalog_store(&config)?;
    let mut analytics = analytics_store(&config);
    let mut stores = Stores {
        catalog: &mut catalog,
        analytics: &mut analytics,
    };

    let page = Page::new(paging.page, config.page_size);
    let films = keyword_page(&mut stores, keyword, page);
    print_page(&films, page);
    Ok(())
}

/// One page of genre/year results. Without `to` this is a specific-year
/// search for `from`.
pub(crate) fn run_search_genre(
    config_path: Option<&Path>,
    overrides: &Overrides,
    genre: &str,
    from: i32,
    to: Option<i32>,
    paging: PageArgs,
) -> Result<(), CliError> {
    let years = match to {
        Some(to) => YearRange::new(from, to)
            .map_err(|e| CliError::invalid_argument(e.to_string()))?,
        None => YearRange::single(from),
    };

    let config = config::load(config_path, &with_page_size(overrides, paging))?;
    let mut catalog = catalog_store(&config)?;

    let genres = catalog.get_all_genres();
    if !genres.iter().any(|g| g == genre) {
        log::warn!("The genre input is incorrect.");
        log::info!("Available genres: {}", genres.join(", "));
        return Ok(());
    }

    let mut analytics = analytics_store(&config);
    let mut stores = Stores {
        catalog: &mut catalog,
        analytics: &mut analytics,
    };

    let page = Page::new(paging.page, config.page_size);
    let films = genre_year_page(&mut stores, genre, &years, page);
    print_page(&films, page);
    Ok(())
}
