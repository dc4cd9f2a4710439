use thiserror::Error;

/// A convenient Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or empty configuration value. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The token endpoint answered with something other than 200.
    #[error("Token exchange failed with status {status}: {body}")]
    AuthExchange { status: u16, body: String },

    /// The top tracks endpoint answered with something other than 200.
    #[error("Spotify API error {status}: {message}")]
    Fetch { status: u16, message: String },

    /// Any playlist endpoint answered with a non-2xx status.
    #[error("Playlist request failed with status {status}: {body}")]
    Playlist { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}
