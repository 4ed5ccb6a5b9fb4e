use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::config::{self, ALL_SETTINGS, ConfigError, Overrides, Sources};

/// Show each setting, its resolved value and where it came from.
pub(crate) fn run_config_show(
    config_path: Option<&Path>,
    overrides: &Overrides,
) -> Result<(), CliError> {
    let path = config_path
        .map(Path::to_path_buf)
        .or_else(config::config_path);

    log::info!(
        "{}",
        "Film Search Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    let file = config::load_config_file(path.as_deref())?;
    let sources = Sources {
        file: &file,
        env: config::process_env,
        overrides,
    };

    for setting in &ALL_SETTINGS {
        let (value, source) = sources.lookup(setting);
        let source_str = format!("({})", source);
        let name = format!("{}:", setting.key);
        match value {
            Some(v) => {
                log::info!(
                    "  {} {} {}",
                    name.if_supports_color(Stdout, |t| t.cyan()),
                    v,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                log::info!(
                    "  {} {} {}",
                    name.if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                    format!("(set {})", setting.env).if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }
    Ok(())
}

pub(crate) fn run_config_path() -> Result<(), CliError> {
    let path = config::config_path().ok_or(ConfigError::NoConfigDir)?;
    log::info!("{}", path.display());
    Ok(())
}
