use crate::error::Result;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::{Layer, filter::LevelFilter, fmt, prelude::*, registry::LookupSpan};

/// Console level: WARN by default, one step louder per `-v`, silent with `-q`.
pub fn console_level(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Log file level. Never below DEBUG so a saved log records how each
/// matrix was loaded, and unaffected by `-q`.
pub fn file_level(verbosity: u8) -> LevelFilter {
    console_level(verbosity, false).max(LevelFilter::DEBUG)
}

fn file_layer<S>(path: &Path, level: LevelFilter) -> Result<impl Layer<S> + use<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let file = File::create(path)?;
    Ok(fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_filter(level))
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .with_filter(console_level(verbosity, quiet));

    let file_output = log_file
        .map(|path| file_layer(&path, file_level(verbosity)))
        .transpose()?;

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_output)
        .try_init()?;

    Ok(())
}
