//! Tracing setup. Log lines go to a file so they never interleave with the
//! interactive prompts.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogFormat, LogSettings};

/// Install the global subscriber. `RUST_LOG` overrides the default `info`
/// filter. When the log file cannot be opened, logs fall back to stderr.
pub fn init(settings: &LogSettings) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match open_log_file(&settings.file) {
        Ok(file) => file,
        Err(err) => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .try_init()
                .map_err(|err| anyhow!("failed to init tracing: {err}"))?;
            tracing::warn!(
                path = %settings.file.display(),
                error = %format!("{err:#}"),
                "cannot open log file, using stderr"
            );
            return Ok(());
        }
    };

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    let installed = match settings.format {
        LogFormat::Text => subscriber.try_init(),
        LogFormat::Json => subscriber.json().try_init(),
    };
    installed.map_err(|err| anyhow!("failed to init tracing: {err}"))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))
}
