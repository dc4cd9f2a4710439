//! Configuration management for the top tracks CLI.
//!
//! Configuration is read from environment variables, optionally populated
//! from `.env` files, exactly once at process start. The resulting
//! [`Config`] and [`Credentials`] values are plain structs handed to every
//! component by reference; nothing in the crate reads the environment after
//! that.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use crate::{
    error::{Error, Result},
    types::TimeRange,
};

pub const ENV_CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "SPOTIFY_REDIRECT_URI";
pub const ENV_ACCESS_TOKEN: &str = "SPOTIFY_ACCESS_TOKEN";
pub const ENV_TIMEFRAME: &str = "SPOTIFY_TIMEFRAME";
pub const ENV_ACCOUNTS_URL: &str = "SPOTIFY_ACCOUNTS_URL";
pub const ENV_API_URL: &str = "SPOTIFY_API_URL";
pub const ENV_HTTP_TIMEOUT: &str = "SPOTIFY_HTTP_TIMEOUT_SECS";

pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Scopes requested during authorization.
pub const SCOPES: [&str; 3] = [
    "user-top-read",
    "playlist-modify-public",
    "playlist-modify-private",
];

/// Loads environment variables from `.env` files.
///
/// A `.env` in the working directory is loaded first, then the one in the
/// platform-specific local data directory under `toptracks/.env`:
/// - Linux: `~/.local/share/toptracks/.env`
/// - macOS: `~/Library/Application Support/toptracks/.env`
/// - Windows: `%LOCALAPPDATA%/toptracks/.env`
///
/// Variables already present in the environment are never overwritten.
/// Missing files are not an error.
///
/// # Errors
///
/// Returns [`Error::Io`] if the data directory cannot be created and
/// [`Error::Config`] if an existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<()> {
    skip_missing(dotenv::dotenv())?;

    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    load_env_file(&path)
}

/// Loads a single `.env` file. A missing file is not an error.
pub fn load_env_file(path: &Path) -> Result<()> {
    skip_missing(dotenv::from_path(path))
}

fn skip_missing<T>(result: dotenv::Result<T>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(Error::Config(format!("invalid .env file: {e}"))),
    }
}

/// Root of everything the tool keeps on disk.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("toptracks");
    path
}

/// Returns the access token from `SPOTIFY_ACCESS_TOKEN`, if set and non-empty.
pub fn access_token() -> Option<String> {
    env::var(ENV_ACCESS_TOKEN)
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// OAuth client credentials registered with the Spotify developer dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

impl Credentials {
    /// Loads credentials from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    /// Loads credentials through `lookup`, failing on the first missing or
    /// blank value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Config(format!("{key} must be set")))
        };

        Ok(Self {
            client_id: required(ENV_CLIENT_ID)?,
            client_secret: required(ENV_CLIENT_SECRET)?,
            redirect_uri: required(ENV_REDIRECT_URI)?,
            scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Space separated scope string as expected by the authorize endpoint.
    pub fn scope(&self) -> String {
        self.scopes.join(" ")
    }
}

/// Base URLs of the two Spotify services the tool talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// e.g. `https://accounts.spotify.com`
    pub accounts_url: String,
    /// e.g. `https://api.spotify.com/v1`
    pub api_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            accounts_url: DEFAULT_ACCOUNTS_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Endpoints {
    pub fn authorize_url(&self) -> String {
        format!("{}/authorize", self.accounts_url.trim_end_matches('/'))
    }

    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.accounts_url.trim_end_matches('/'))
    }

    pub fn api(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Runtime settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoints: Endpoints,
    pub time_range: TimeRange,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            time_range: TimeRange::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    /// Builds the configuration through `lookup`, falling back to defaults
    /// for unset or blank values.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when `SPOTIFY_TIMEFRAME` is not a known time range
    /// or `SPOTIFY_HTTP_TIMEOUT_SECS` is not a positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();

        let time_range = match optional(ENV_TIMEFRAME) {
            Some(v) => TimeRange::from_str(&v).map_err(Error::Config)?,
            None => defaults.time_range,
        };

        let timeout = match optional(ENV_HTTP_TIMEOUT) {
            Some(v) => match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(Error::Config(format!(
                        "{ENV_HTTP_TIMEOUT} must be a positive number of seconds, got '{v}'"
                    )));
                }
            },
            None => defaults.timeout,
        };

        Ok(Self {
            endpoints: Endpoints {
                accounts_url: optional(ENV_ACCOUNTS_URL)
                    .unwrap_or(defaults.endpoints.accounts_url),
                api_url: optional(ENV_API_URL).unwrap_or(defaults.endpoints.api_url),
            },
            time_range,
            timeout,
        })
    }
}
