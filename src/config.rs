//! Environment-driven configuration. Everything is read and validated up
//! front so a bad setting stops the program before the database is touched.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;

use crate::error::{Error, ErrorKind, Result};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".photoshoot-manager";
/// Log file written inside the data directory unless `APP_LOG_FILE` says otherwise.
const LOG_FILE_NAME: &str = "app.log";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;

pub const ENV_DB_NAME: &str = "APP_DB_NAME";
pub const ENV_DB_DIR: &str = "APP_DB_DIR";
pub const ENV_CONNECT_TIMEOUT: &str = "APP_DB_CONNECT_TIMEOUT_SECS";
pub const ENV_QUERY_TIMEOUT: &str = "APP_DB_QUERY_TIMEOUT_SECS";
pub const ENV_LOG_FILE: &str = "APP_LOG_FILE";
pub const ENV_LOG_FORMAT: &str = "APP_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database: DatabaseSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// Full path of the SQLite file.
    pub path: PathBuf,
    /// Upper bound on waiting for the database file while connecting.
    pub connect_timeout: Duration,
    /// Deadline applied to every individual statement.
    pub query_timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub file: PathBuf,
    pub format: LogFormat,
}

impl Config {
    /// Load settings from the process environment, after merging a `.env`
    /// file from the working directory when there is one. Variables that are
    /// already set win over the file.
    pub fn from_env() -> Result<Self> {
        load_dotenv(dotenvy::dotenv())?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup. Blank values count as
    /// missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let name = get(ENV_DB_NAME).ok_or_else(|| {
            Error::new(ErrorKind::ConfigError, format!("{ENV_DB_NAME} is required"))
        })?;
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(Error::new(
                ErrorKind::ConfigError,
                format!("{ENV_DB_NAME} must be a plain name, got {name:?}"),
            ));
        }

        let data_dir = match get(ENV_DB_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let connect_timeout = seconds(
            get(ENV_CONNECT_TIMEOUT),
            ENV_CONNECT_TIMEOUT,
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?;
        let query_timeout = seconds(
            get(ENV_QUERY_TIMEOUT),
            ENV_QUERY_TIMEOUT,
            DEFAULT_QUERY_TIMEOUT_SECS,
        )?;

        let format = get(ENV_LOG_FORMAT).map(|value| value.to_ascii_lowercase());
        let format = match format.as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("text") => LogFormat::Text,
            Some(other) => {
                return Err(Error::new(
                    ErrorKind::ConfigError,
                    format!("{ENV_LOG_FORMAT} must be `json` or `text`, got {other:?}"),
                ))
            }
        };
        let file = get(ENV_LOG_FILE)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(LOG_FILE_NAME));

        Ok(Self {
            database: DatabaseSettings {
                path: database_file(&data_dir, &name),
                connect_timeout,
                query_timeout,
            },
            log: LogSettings { file, format },
        })
    }
}

/// A missing `.env` is fine; one that exists but does not parse is not.
fn load_dotenv(loaded: dotenvy::Result<PathBuf>) -> Result<()> {
    match loaded {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(Error::wrap(err, ErrorKind::ConfigError, "failed to load .env file")),
    }
}

fn database_file(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.sqlite"))
}

/// Resolve `~/.photoshoot-manager`.
fn default_data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| {
        Error::new(
            ErrorKind::ConfigError,
            format!("could not locate home directory; set {ENV_DB_DIR}"),
        )
    })?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

fn seconds(raw: Option<String>, key: &str, default: u64) -> Result<Duration> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(default));
    };
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        Ok(_) => Err(Error::new(
            ErrorKind::ConfigError,
            format!("{key} must be greater than zero"),
        )),
        Err(err) => Err(Error::wrap(
            err,
            ErrorKind::ConfigError,
            format!("{key} must be an integer"),
        )),
    }
}
