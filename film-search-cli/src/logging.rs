//! Log output setup.
//!
//! Command output is printed through `log::info!`, so the default format is
//! the bare message on stdout. Warnings and errors get a colored tag.
//! Interactive prompts use [`PROMPT_TARGET`] so they reach the log file too.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use log::{Level, LevelFilter, Record};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Writes everything to stdout and a copy, without ANSI escapes, to a file.
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        self.file.write_all(&strip_ansi_escapes::strip(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        self.file.flush()
    }
}

/// Log target for interactive prompts. Always enabled, written without a
/// timestamp or trailing newline.
pub(crate) const PROMPT_TARGET: &str = "prompt";

pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// One record as it is written out.
fn render_record(record: &Record<'_>, verbose: bool) -> String {
    if record.target() == PROMPT_TARGET {
        return record.args().to_string();
    }

    let tag = match record.level() {
        Level::Error => Some(format!(
            "{}",
            "error:".if_supports_color(Stdout, |t| t.red())
        )),
        Level::Warn => Some(format!(
            "{}",
            "warning:".if_supports_color(Stdout, |t| t.yellow())
        )),
        Level::Info => None,
        Level::Debug | Level::Trace => Some(format!(
            "{}",
            record
                .level()
                .as_str()
                .to_lowercase()
                .if_supports_color(Stdout, |t| t.dimmed())
        )),
    };

    let mut line = String::new();
    if verbose {
        line.push_str(&format!(
            "{} ",
            chrono::Local::now()
                .format("%H:%M:%S%.3f")
                .if_supports_color(Stdout, |t| t.dimmed())
        ));
    }
    match tag {
        Some(tag) => line.push_str(&format!("{} {}\n", tag, record.args())),
        None => line.push_str(&format!("{}\n", record.args())),
    }
    line
}

/// Install the global logger. `RUST_LOG` overrides the level chosen by the
/// flags.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for(quiet, verbose));
    builder.parse_env(env_logger::Env::default());

    builder.filter(Some(PROMPT_TARGET), LevelFilter::Info);
    builder.format(move |buf, record| buf.write_all(render_record(record, verbose).as_bytes()));

    match logfile {
        Some(path) => {
            let file = File::create(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(TeeWriter { file })));
        }
        None => {
            builder.target(env_logger::Target::Stdout);
        }
    }

    builder
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}
