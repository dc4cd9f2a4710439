//! # CLI Module
//!
//! Command handlers behind the `toptracks` binary. Each handler receives the
//! [`Config`](crate::config::Config) built once in `main`, talks to the
//! [`spotify`](crate::spotify) layer and reports progress through the
//! crate's output macros. Errors are returned to `main`, which prints them and
//! exits.
//!
//! ## Commands
//!
//! - [`auth`] - interactive authorization code flow, caches the token
//! - [`top`] - fetch and print top tracks, optionally dump the raw JSON
//! - [`playlist`] - create a playlist out of the top tracks
//!
//! ## Token resolution
//!
//! Commands that call the Web API use `SPOTIFY_ACCESS_TOKEN` when it is set
//! and fall back to the token cached by `toptracks auth`. Without either the
//! command prints a warning and returns successfully.
//!
//! ```bash
//! toptracks auth                         # authorize once
//! toptracks                              # top 5, SPOTIFY_TIMEFRAME or long_term
//! toptracks top --limit 20 --save        # also writes top_tracks.json
//! toptracks playlist --name "My Top 5"   # create a playlist from them
//! ```

mod auth;
mod playlist;
mod top;

use std::{path::Path, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

pub use auth::auth;
pub use playlist::{DEFAULT_PLAYLIST_NAME, PlaylistOptions, playlist, playlist_with_token};
pub use top::{TopOptions, top, top_with_token};

use crate::{config, management::TokenManager, warning};

/// Returns the token to call the Web API with, if any.
pub async fn resolve_token() -> Option<String> {
    resolve_token_from(config::access_token(), &TokenManager::token_path()).await
}

/// Picks `env_token` unless it is blank, then the token cached at `cache`.
pub async fn resolve_token_from(env_token: Option<String>, cache: &Path) -> Option<String> {
    if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
        return Some(token);
    }

    TokenManager::load_from(cache)
        .await
        .ok()
        .map(|mgr| mgr.access_token().to_string())
        .filter(|t| !t.is_empty())
}

fn warn_missing_token() {
    warning!(
        "Please set {} in your environment or run `toptracks auth`.",
        config::ENV_ACCESS_TOKEN
    );
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
