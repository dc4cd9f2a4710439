use std::path::PathBuf;

use crate::{
    config::Config,
    error::Result,
    info,
    management::save_json,
    spotify::{self, tracks},
    success,
    types::TimeRange,
    utils,
};

pub const DEFAULT_LIMIT: u32 = 5;

#[derive(Debug, Clone)]
pub struct TopOptions {
    pub limit: u32,
    /// Overrides the configured time range.
    pub time_range: Option<TimeRange>,
    pub with_urls: bool,
    /// Where to dump the raw response, if anywhere.
    pub save: Option<PathBuf>,
}

impl Default for TopOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            time_range: None,
            with_urls: true,
            save: None,
        }
    }
}

pub async fn top(config: &Config, opts: TopOptions) -> Result<()> {
    top_with_token(config, opts, super::resolve_token().await).await
}

/// Runs `top` with an already resolved token. `None` only warns.
pub async fn top_with_token(
    config: &Config,
    opts: TopOptions,
    token: Option<String>,
) -> Result<()> {
    let Some(token) = token else {
        super::warn_missing_token();
        return Ok(());
    };

    let time_range = opts.time_range.unwrap_or(config.time_range);
    let client = spotify::http_client(config)?;

    let pb = super::spinner("Fetching top tracks...");
    let raw = tracks::get_top_tracks_raw(
        &client,
        &config.endpoints,
        &token,
        opts.limit,
        time_range,
    )
    .await;
    pb.finish_and_clear();
    let raw = raw?;

    if let Some(path) = &opts.save {
        save_json(path, &raw).await?;
        success!("Saved top tracks → {}", path.display());
    }

    let top_tracks = tracks::parse_top_tracks(&raw)?;
    if top_tracks.is_empty() {
        info!("No top tracks for time range {}", time_range);
        return Ok(());
    }

    utils::display_top_tracks(&top_tracks, opts.with_urls);
    Ok(())
}
