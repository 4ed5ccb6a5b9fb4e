//! Application settings.
//!
//! Each setting is resolved with priority: CLI flag > environment variable >
//! config file > default. `main` loads a `.env` file into the environment
//! before anything is resolved.

use std::path::{Path, PathBuf};

use film_search_analytics::{AnalyticsConfig, AnalyticsError};

/// Errors resolving the application settings.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("Missing {key}. Set {env} or add `{key}` to the config file")]
    Missing {
        env: &'static str,
        key: &'static str,
    },

    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

/// One named setting and where it can be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Setting {
    pub env: &'static str,
    pub key: &'static str,
    pub default: Option<&'static str>,
}

pub(crate) const CATALOG_DB: Setting = Setting {
    env: "FILM_SEARCH_CATALOG_DB",
    key: "catalog.database",
    default: None,
};
pub(crate) const ANALYTICS_URL_READ: Setting = Setting {
    env: "FILM_SEARCH_ANALYTICS_URL_READ",
    key: "analytics.url_read",
    default: None,
};
pub(crate) const ANALYTICS_URL_WRITE: Setting = Setting {
    env: "FILM_SEARCH_ANALYTICS_URL_WRITE",
    key: "analytics.url_write",
    default: None,
};
pub(crate) const ANALYTICS_DB: Setting = Setting {
    env: "FILM_SEARCH_ANALYTICS_DB",
    key: "analytics.database",
    default: None,
};
pub(crate) const ANALYTICS_COLLECTION: Setting = Setting {
    env: "FILM_SEARCH_ANALYTICS_COLLECTION",
    key: "analytics.collection",
    default: None,
};
pub(crate) const PAGE_SIZE: Setting = Setting {
    env: "FILM_SEARCH_PAGE_SIZE",
    key: "search.page_size",
    default: Some("10"),
};

pub(crate) const ALL_SETTINGS: [Setting; 6] = [
    CATALOG_DB,
    ANALYTICS_URL_READ,
    ANALYTICS_URL_WRITE,
    ANALYTICS_DB,
    ANALYTICS_COLLECTION,
    PAGE_SIZE,
];

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
    /// Given on the command line.
    Flag,
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Built-in default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct ConfigFile {
    catalog: Option<CatalogSection>,
    analytics: Option<AnalyticsSection>,
    search: Option<SearchSection>,
}

#[derive(Debug, serde::Deserialize)]
struct CatalogSection {
    database: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct AnalyticsSection {
    url_read: Option<String>,
    url_write: Option<String>,
    database: Option<String>,
    collection: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct SearchSection {
    page_size: Option<u32>,
}

impl ConfigFile {
    pub(crate) fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    fn value(&self, setting: &Setting) -> Option<String> {
        let analytics = self.analytics.as_ref();
        match setting.key {
            "catalog.database" => self.catalog.as_ref()?.database.clone(),
            "analytics.url_read" => analytics?.url_read.clone(),
            "analytics.url_write" => analytics?.url_write.clone(),
            "analytics.database" => analytics?.database.clone(),
            "analytics.collection" => analytics?.collection.clone(),
            "search.page_size" => self.search.as_ref()?.page_size.map(|n| n.to_string()),
            _ => None,
        }
    }
}

/// Values given on the command line, which win over everything else.
#[derive(Debug, Default, Clone)]
pub(crate) struct Overrides {
    pub catalog_db: Option<PathBuf>,
    pub page_size: Option<u32>,
}

impl Overrides {
    fn value(&self, setting: &Setting) -> Option<String> {
        match setting.key {
            "catalog.database" => self
                .catalog_db
                .as_ref()
                .map(|p| p.display().to_string()),
            "search.page_size" => self.page_size.map(|n| n.to_string()),
            _ => None,
        }
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AppConfig {
    pub catalog_db: PathBuf,
    pub analytics: AnalyticsConfig,
    pub page_size: u32,
}

/// Everything a setting can be resolved from.
pub(crate) struct Sources<'a, E: Fn(&str) -> Option<String>> {
    pub file: &'a ConfigFile,
    pub env: E,
    pub overrides: &'a Overrides,
}

impl<E: Fn(&str) -> Option<String>> Sources<'_, E> {
    /// Look up one setting. Empty strings count as unset.
    pub(crate) fn lookup(&self, setting: &Setting) -> (Option<String>, SettingSource) {
        let non_empty = |v: String| if v.trim().is_empty() { None } else { Some(v) };

        if let Some(v) = self.overrides.value(setting).and_then(non_empty) {
            return (Some(v), SettingSource::Flag);
        }
        if let Some(v) = (self.env)(setting.env).and_then(non_empty) {
            return (Some(v), SettingSource::EnvVar(setting.env));
        }
        if let Some(v) = self.file.value(setting).and_then(non_empty) {
            return (Some(v), SettingSource::ConfigFile);
        }
        match setting.default {
            Some(d) => (Some(d.to_string()), SettingSource::Default),
            None => (None, SettingSource::Missing),
        }
    }

    fn require(&self, setting: &Setting) -> Result<String, ConfigError> {
        self.lookup(setting).0.ok_or(ConfigError::Missing {
            env: setting.env,
            key: setting.key,
        })
    }

    pub(crate) fn resolve(&self) -> Result<AppConfig, ConfigError> {
        let catalog_db = PathBuf::from(self.require(&CATALOG_DB)?);
        let url_read = self.require(&ANALYTICS_URL_READ)?;
        let url_write = self.require(&ANALYTICS_URL_WRITE)?;
        let database = self.require(&ANALYTICS_DB)?;
        let collection = self.require(&ANALYTICS_COLLECTION)?;

        let raw_page_size = self.require(&PAGE_SIZE)?;
        let page_size = raw_page_size
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::Invalid {
                key: PAGE_SIZE.key,
                value: raw_page_size.clone(),
            })?;

        let analytics = AnalyticsConfig::from_locations(
            Path::new(&url_read),
            Path::new(&url_write),
            &database,
            collection,
        )?;

        Ok(AppConfig {
            catalog_db,
            analytics,
            page_size,
        })
    }
}

/// Return the path to the default config file.
pub(crate) fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("film-search").join("config.toml"))
}

/// Read the config file at `path`, or the default location. A missing file
/// is an empty config.
pub(crate) fn load_config_file(path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => return Ok(ConfigFile::default()),
        },
    };
    if !path.exists() {
        log::debug!("No config file at {}", path.display());
        return Ok(ConfigFile::default());
    }
    let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    ConfigFile::parse(&text, &path)
}

pub(crate) fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Resolve settings from the process environment and the config file.
pub(crate) fn load(config: Option<&Path>, overrides: &Overrides) -> Result<AppConfig, ConfigError> {
    let file = load_config_file(config)?;
    Sources {
        file: &file,
        env: process_env,
        overrides,
    }
    .resolve()
}

/// Resolve only the catalog path, for commands that never touch analytics.
pub(crate) fn load_catalog_path(
    config: Option<&Path>,
    overrides: &Overrides,
) -> Result<PathBuf, ConfigError> {
    let file = load_config_file(config)?;
    Sources {
        file: &file,
        env: process_env,
        overrides,
    }
    .require(&CATALOG_DB)
    .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const FULL_FILE: &str = r#"
[catalog]
database = "/data/sakila.db"

[analytics]
url_read = "/data/analytics"
url_write = "/data/analytics"
database = "ich_edit"
collection = "search_logs"

[search]
page_size = 20
"#;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn parse(text: &str) -> ConfigFile {
        ConfigFile::parse(text, Path::new("config.toml")).unwrap()
    }

    #[test]
    fn resolves_from_config_file() {
        let file = parse(FULL_FILE);
        let config = Sources {
            file: &file,
            env: env_from(&[]),
            overrides: &Overrides::default(),
        }
        .resolve()
        .unwrap();

        assert_eq!(config.catalog_db, PathBuf::from("/data/sakila.db"));
        assert_eq!(
            config.analytics.read_path,
            PathBuf::from("/data/analytics/ich_edit.db")
        );
        assert_eq!(config.analytics.collection, "search_logs");
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn env_beats_file_and_flag_beats_env() {
        let file = parse(FULL_FILE);
        let overrides = Overrides {
            catalog_db: Some(PathBuf::from("/flag.db")),
            page_size: None,
        };
        let sources = Sources {
            file: &file,
            env: env_from(&[
                ("FILM_SEARCH_CATALOG_DB", "/env.db"),
                ("FILM_SEARCH_PAGE_SIZE", "5"),
            ]),
            overrides: &overrides,
        };

        assert_eq!(
            sources.lookup(&CATALOG_DB),
            (Some("/flag.db".to_string()), SettingSource::Flag)
        );
        assert_eq!(
            sources.lookup(&PAGE_SIZE),
            (
                Some("5".to_string()),
                SettingSource::EnvVar("FILM_SEARCH_PAGE_SIZE")
            )
        );
        assert_eq!(
            sources.lookup(&ANALYTICS_DB),
            (Some("ich_edit".to_string()), SettingSource::ConfigFile)
        );
        assert_eq!(sources.resolve().unwrap().page_size, 5);
    }

    #[test]
    fn page_size_defaults_to_ten() {
        let file = ConfigFile::default();
        let sources = Sources {
            file: &file,
            env: env_from(&[
                ("FILM_SEARCH_CATALOG_DB", "/c.db"),
                ("FILM_SEARCH_ANALYTICS_URL_READ", "/a"),
                ("FILM_SEARCH_ANALYTICS_URL_WRITE", "/a"),
                ("FILM_SEARCH_ANALYTICS_DB", "analytics"),
                ("FILM_SEARCH_ANALYTICS_COLLECTION", "logs"),
            ]),
            overrides: &Overrides::default(),
        };
        assert_eq!(
            sources.lookup(&PAGE_SIZE),
            (Some("10".to_string()), SettingSource::Default)
        );
        assert_eq!(sources.resolve().unwrap().page_size, 10);
    }

    #[test]
    fn missing_required_names_env_and_key() {
        let file = ConfigFile::default();
        let err = Sources {
            file: &file,
            env: env_from(&[("FILM_SEARCH_CATALOG_DB", "/c.db")]),
            overrides: &Overrides::default(),
        }
        .resolve()
        .unwrap_err();

        match err {
            ConfigError::Missing { env, key } => {
                assert_eq!(env, "FILM_SEARCH_ANALYTICS_URL_READ");
                assert_eq!(key, "analytics.url_read");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_env_value_is_unset() {
        let file = parse(FULL_FILE);
        let sources = Sources {
            file: &file,
            env: env_from(&[("FILM_SEARCH_CATALOG_DB", "  ")]),
            overrides: &Overrides::default(),
        };
        assert_eq!(sources.lookup(&CATALOG_DB).1, SettingSource::ConfigFile);
    }

    #[test]
    fn invalid_page_size() {
        let file = parse(FULL_FILE);
        for bad in ["0", "ten", "-3"] {
            let err = Sources {
                file: &file,
                env: env_from(&[("FILM_SEARCH_PAGE_SIZE", bad)]),
                overrides: &Overrides::default(),
            }
            .resolve()
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "accepted {bad}");
        }
    }

    #[test]
    fn invalid_collection_name() {
        let file = parse(FULL_FILE);
        let err = Sources {
            file: &file,
            env: env_from(&[("FILM_SEARCH_ANALYTICS_COLLECTION", "search-logs")]),
            overrides: &Overrides::default(),
        }
        .resolve()
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Analytics(AnalyticsError::InvalidCollection(_))
        ));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let result = ConfigFile::parse("[catalog\ndatabase = ", Path::new("bad.toml"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let file = load_config_file(Some(&dir.path().join("nope.toml"))).unwrap();
        assert!(file.catalog.is_none());
        assert!(file.analytics.is_none());
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, FULL_FILE).unwrap();
        let file = load_config_file(Some(&path)).unwrap();
        assert_eq!(file.value(&PAGE_SIZE).as_deref(), Some("20"));
    }
}
