//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "film-search")]
#[command(about = "Search a film catalog and review search history", long_about = None)]
pub(crate) struct Cli {
    /// Path to the config file (default: <config dir>/film-search/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the catalog database file (overrides FILM_SEARCH_CATALOG_DB)
    #[arg(long, global = true)]
    pub catalog_db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Defaults to the interactive menu
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Paging arguments shared by the search commands.
#[derive(Args, Clone, Copy)]
pub(crate) struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Results per page (overrides FILM_SEARCH_PAGE_SIZE)
    #[arg(long)]
    pub page_size: Option<u32>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the interactive search menu
    Interactive,

    /// Run a single search and print one page of results
    Search {
        #[command(subcommand)]
        action: SearchAction,
    },

    /// List the catalog's genres and release year range
    Genres,

    /// Show search history statistics
    Stats {
        #[command(subcommand)]
        action: StatsAction,
    },

    /// Manage the catalog database
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum SearchAction {
    /// Films whose title contains the keyword (case-insensitive)
    Keyword {
        keyword: String,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Films of a genre released in a year range
    Genre {
        /// Exact genre name (see `film-search genres`)
        genre: String,

        /// First release year
        #[arg(long)]
        from: i32,

        /// Last release year. Omit to search only the --from year
        #[arg(long)]
        to: Option<i32>,

        #[command(flatten)]
        paging: PageArgs,
    },
}

#[derive(Subcommand)]
pub(crate) enum StatsAction {
    /// Most frequent search parameter combinations
    Popular {
        /// Maximum number of rows
        #[arg(long, default_value = "5")]
        limit: u32,
    },

    /// Most recent searches
    Recent {
        /// Maximum number of rows
        #[arg(long, default_value = "5")]
        limit: u32,
    },

    /// Catalog and search log totals
    Summary,
}

#[derive(Subcommand)]
pub(crate) enum CatalogAction {
    /// Import films from a YAML file into a catalog database
    Import {
        /// YAML file with a top-level `films` list
        file: PathBuf,

        /// Catalog database to create or extend (default: the configured catalog)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and their sources
    Show,

    /// Print the config file path
    Path,
}
