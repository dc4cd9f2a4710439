//! # Spotify Integration Module
//!
//! Thin async wrappers around the handful of Spotify endpoints the tool
//! needs. Every function takes the shared [`reqwest::Client`] and the
//! configured [`Endpoints`](crate::config::Endpoints) explicitly and performs
//! exactly one request per call (add-tracks excepted, which is chunked).
//!
//! ```text
//! CLI Layer
//!     ↓
//! Spotify Integration Layer
//!     ├── auth      (authorize URL, code extraction, token exchange)
//!     ├── tracks    (GET /me/top/tracks)
//!     └── playlist  (GET /me, create playlist, add tracks)
//!     ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! There is no retry, backoff or rate-limit handling: a non-success status is
//! turned into the matching [`Error`] variant and returned to the caller.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = spotify::http_client(&config)?;
//! let token = spotify::auth::exchange_code(&client, &config.endpoints, &creds, &code).await?;
//! let tracks = spotify::tracks::get_top_tracks(
//!     &client, &config.endpoints, &token, 5, TimeRange::LongTerm,
//! ).await?;
//! ```

pub mod auth;
pub mod playlist;
pub mod tracks;

use reqwest::Client;

use crate::{
    config::Config,
    error::{Error, Result},
    types::ApiErrorResponse,
};

/// Builds the HTTP client shared by every request of a run.
///
/// The client carries the configured timeout so that no call can block
/// forever on an unresponsive server.
pub fn http_client(config: &Config) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(Error::from)
}

/// Extracts `error.message` from a Spotify error body.
///
/// Returns an empty string when the body is not JSON or carries no message.
pub fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|e| e.error.message)
        .unwrap_or_default()
}
