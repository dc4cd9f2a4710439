use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::{
    config::Endpoints,
    error::{Error, Result},
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUserResponse,
    },
    utils,
};

/// Maximum number of URIs the add-tracks endpoint accepts per request.
pub const ADD_TRACKS_CHUNK_SIZE: usize = 100;

/// Returns the Spotify user id of the token's owner (`GET /me`).
pub async fn get_current_user_id(
    client: &Client,
    endpoints: &Endpoints,
    token: &str,
) -> Result<String> {
    let res = client
        .get(endpoints.api("me"))
        .bearer_auth(token)
        .send()
        .await?;

    let user: CurrentUserResponse = read_success(res).await?;
    Ok(user.id)
}

/// Creates a public playlist for `user_id` and returns its id.
///
/// Needs the `playlist-modify-public` scope. A missing description is sent
/// as an empty string.
pub async fn create_playlist(
    client: &Client,
    endpoints: &Endpoints,
    token: &str,
    user_id: &str,
    name: &str,
    description: Option<&str>,
) -> Result<String> {
    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.unwrap_or_default().to_string(),
        public: true,
    };

    let res = client
        .post(endpoints.api(&format!("users/{user_id}/playlists")))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;

    let playlist: CreatePlaylistResponse = read_success(res).await?;
    Ok(playlist.id)
}

/// Adds tracks to a playlist.
///
/// The endpoint only understands track URIs (`spotify:track:<id>`). Web
/// links (`https://open.spotify.com/track/<id>`) are converted first; any
/// other input is rejected with [`Error::Parse`] before a request is made.
/// Tracks are sent in chunks of [`ADD_TRACKS_CHUNK_SIZE`]. A failing chunk
/// stops the call; earlier chunks stay in the playlist.
///
/// Any 2xx status counts as success. Returns the snapshot id of the last
/// request that reported one, or `None` if there was nothing to add or the
/// server sent no snapshot.
pub async fn add_tracks<S: AsRef<str>>(
    client: &Client,
    endpoints: &Endpoints,
    token: &str,
    playlist_id: &str,
    tracks: &[S],
) -> Result<Option<String>> {
    let uris = tracks
        .iter()
        .map(|t| {
            let t = t.as_ref();
            utils::normalize_track_uri(t).ok_or_else(|| {
                Error::Parse(format!("'{t}' is neither a track URI nor a track URL"))
            })
        })
        .collect::<Result<Vec<String>>>()?;

    let mut snapshot = None;
    for chunk in uris.chunks(ADD_TRACKS_CHUNK_SIZE) {
        let body = AddTrackToPlaylistRequest {
            uris: chunk.to_vec(),
        };

        let res = client
            .post(endpoints.api(&format!("playlists/{playlist_id}/tracks")))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let body = check_status(res).await?;
        if let Ok(added) = serde_json::from_str::<AddTrackToPlaylistResponse>(&body) {
            snapshot = Some(added.snapshot_id);
        }
    }

    Ok(snapshot)
}

async fn read_success<T: DeserializeOwned>(res: Response) -> Result<T> {
    let body = check_status(res).await?;
    serde_json::from_str(&body).map_err(|e| Error::Parse(format!("invalid playlist response: {e}")))
}

/// Returns the body of a 2xx response, [`Error::Playlist`] otherwise.
async fn check_status(res: Response) -> Result<String> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        return Err(Error::Playlist {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}
