use crate::{
    config::Config,
    error::Result,
    info,
    spotify::{self, playlist as api, tracks},
    success,
    types::TimeRange,
    utils, warning,
};

pub const DEFAULT_PLAYLIST_NAME: &str = "My Top 5 Tracks";
pub const DEFAULT_PLAYLIST_DESCRIPTION: &str = "Automatically generated playlist of my top songs.";

#[derive(Debug, Clone)]
pub struct PlaylistOptions {
    pub name: String,
    pub description: Option<String>,
    pub limit: u32,
    pub time_range: Option<TimeRange>,
}

impl Default for PlaylistOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLAYLIST_NAME.to_string(),
            description: Some(DEFAULT_PLAYLIST_DESCRIPTION.to_string()),
            limit: super::top::DEFAULT_LIMIT,
            time_range: None,
        }
    }
}

pub async fn playlist(config: &Config, opts: PlaylistOptions) -> Result<()> {
    playlist_with_token(config, opts, super::resolve_token().await).await
}

/// Runs `playlist` with an already resolved token. `None` only warns.
///
/// Track URIs are checked before the playlist is created.
pub async fn playlist_with_token(
    config: &Config,
    opts: PlaylistOptions,
    token: Option<String>,
) -> Result<()> {
    let Some(token) = token else {
        super::warn_missing_token();
        return Ok(());
    };

    let time_range = opts.time_range.unwrap_or(config.time_range);
    let client = spotify::http_client(config)?;
    let endpoints = &config.endpoints;

    let pb = super::spinner("Fetching top tracks...");
    let top_tracks =
        tracks::get_top_tracks(&client, endpoints, &token, opts.limit, time_range).await;
    pb.finish_and_clear();
    let top_tracks = top_tracks?;

    if top_tracks.is_empty() {
        warning!("No top tracks for time range {}, nothing to add.", time_range);
        return Ok(());
    }

    let uris = utils::playlist_track_uris(&top_tracks)?;

    let user_id = api::get_current_user_id(&client, endpoints, &token).await?;
    info!("Logged in as Spotify user: {}", user_id);

    let playlist_id = api::create_playlist(
        &client,
        endpoints,
        &token,
        &user_id,
        &opts.name,
        opts.description.as_deref(),
    )
    .await?;
    success!("Playlist '{}' created! ID: {}", opts.name, playlist_id);

    api::add_tracks(&client, endpoints, &token, &playlist_id, &uris).await?;
    success!("{} tracks added to your playlist!", uris.len());

    Ok(())
}
