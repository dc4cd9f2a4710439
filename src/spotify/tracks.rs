use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::Endpoints,
    error::{Error, Result},
    spotify,
    types::{TimeRange, TopTracksResponse, TrackItem, TrackRecord},
    utils,
};

/// Retrieves the user's top tracks as returned by the API, untouched.
///
/// Performs a single `GET {api}/me/top/tracks?limit=..&time_range=..` with
/// bearer authentication. Requires a token granted the `user-top-read`
/// scope.
///
/// # Errors
///
/// - [`Error::Fetch`] for any status other than 200, carrying the API's
///   `error.message` when the body has one
/// - [`Error::Parse`] when a 200 body is not JSON
/// - [`Error::Http`] on network failures or timeouts
pub async fn get_top_tracks_raw(
    client: &Client,
    endpoints: &Endpoints,
    token: &str,
    limit: u32,
    time_range: TimeRange,
) -> Result<Value> {
    let limit = limit.to_string();
    let res = client
        .get(endpoints.api("me/top/tracks"))
        .bearer_auth(token)
        .query(&[("limit", limit.as_str()), ("time_range", time_range.as_str())])
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;

    if status != StatusCode::OK {
        return Err(Error::Fetch {
            status: status.as_u16(),
            message: spotify::api_error_message(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| Error::Parse(format!("invalid top tracks body: {e}")))
}

/// Retrieves the user's top tracks mapped to [`TrackRecord`]s.
///
/// Records keep the order of the response. An empty, missing or `null`
/// `items` array yields an empty vector.
///
/// # Example
///
/// ```
/// let tracks = get_top_tracks(&client, &config.endpoints, token, 5, TimeRange::LongTerm).await?;
/// for (i, t) in tracks.iter().enumerate() {
///     println!("{}. {}", i + 1, t.name);
/// }
/// ```
pub async fn get_top_tracks(
    client: &Client,
    endpoints: &Endpoints,
    token: &str,
    limit: u32,
    time_range: TimeRange,
) -> Result<Vec<TrackRecord>> {
    let raw = get_top_tracks_raw(client, endpoints, token, limit, time_range).await?;
    parse_top_tracks(&raw)
}

/// Maps a raw top tracks body to track records.
///
/// Fails with [`Error::Parse`] when an item lacks one of the fields a
/// record is built from (`name`, `artists[].name`, `album.name`,
/// `external_urls.spotify`).
pub fn parse_top_tracks(raw: &Value) -> Result<Vec<TrackRecord>> {
    if raw.is_null() {
        return Ok(Vec::new());
    }

    let response = TopTracksResponse::deserialize(raw)
        .map_err(|e| Error::Parse(format!("unexpected top tracks shape: {e}")))?;
    Ok(response
        .items
        .unwrap_or_default()
        .into_iter()
        .map(to_record)
        .collect())
}

fn to_record(item: TrackItem) -> TrackRecord {
    let artists = item
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let url = item.external_urls.spotify;
    let uri = item
        .uri
        .filter(|u| !u.is_empty())
        .or_else(|| item.id.map(|id| format!("spotify:track:{id}")))
        .or_else(|| utils::track_uri_from_url(&url))
        .unwrap_or_default();

    TrackRecord {
        name: item.name,
        artists,
        album: item.album.name,
        url,
        uri,
    }
}
