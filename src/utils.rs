use std::str::FromStr;

use reqwest::Url;

use crate::{
    error::{Error, Result},
    types::{TimeRange, TrackRecord},
};

const TRACK_URI_PREFIX: &str = "spotify:track:";
const WEB_PLAYER_HOST: &str = "open.spotify.com";

/// Formats one track for display.
///
/// `1. 🎵 Song — A, B (Album)`, optionally followed by the track URL on an
/// indented second line.
pub fn format_track(rank: usize, track: &TrackRecord, with_url: bool) -> String {
    let line = format!(
        "{rank}. 🎵 {name} — {artists} ({album})",
        name = track.name,
        artists = track.artists,
        album = track.album
    );

    if with_url {
        format!("{line}\n   {url}", url = track.url)
    } else {
        line
    }
}

/// Formats tracks with 1-based ranks taken from their position.
pub fn format_tracks(tracks: &[TrackRecord], with_url: bool) -> Vec<String> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| format_track(i + 1, t, with_url))
        .collect()
}

pub fn display_top_tracks(tracks: &[TrackRecord], with_url: bool) {
    println!("\n🔥 Your Top {} Spotify Tracks 🔥\n", tracks.len());
    for line in format_tracks(tracks, with_url) {
        println!("{line}\n");
    }
}

pub fn extract_track_urls(tracks: &[TrackRecord]) -> Vec<String> {
    tracks.iter().map(|t| t.url.clone()).collect()
}

pub fn extract_track_uris(tracks: &[TrackRecord]) -> Vec<String> {
    tracks.iter().map(|t| t.uri.clone()).collect()
}

/// Track URIs for adding `tracks` to a playlist.
///
/// A record without a usable URI falls back to its web link. The first track
/// with neither fails the whole call with [`Error::Parse`].
pub fn playlist_track_uris(tracks: &[TrackRecord]) -> Result<Vec<String>> {
    tracks
        .iter()
        .map(|t| {
            normalize_track_uri(&t.uri)
                .or_else(|| normalize_track_uri(&t.url))
                .ok_or_else(|| Error::Parse(format!("no track URI for '{}'", t.name)))
        })
        .collect()
}

/// Converts a web player link into a track URI.
///
/// `https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC?si=abc` becomes
/// `spotify:track:4uLU6hMCjMI75M1A2tKUQC`. Localised links
/// (`/intl-de/track/...`) are understood as well. Anything that is not a
/// track link on `open.spotify.com` yields `None`.
pub fn track_uri_from_url(url: &str) -> Option<String> {
    let url = Url::parse(url.trim()).ok()?;
    if url.host_str() != Some(WEB_PLAYER_HOST) {
        return None;
    }

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let mut kind = segments.next()?;
    if kind.starts_with("intl-") {
        kind = segments.next()?;
    }
    if kind != "track" {
        return None;
    }

    let id = segments.next()?;
    if segments.next().is_some() || !is_valid_id(id) {
        return None;
    }

    Some(format!("{TRACK_URI_PREFIX}{id}"))
}

/// Returns a track URI for either a track URI or a track web link.
pub fn normalize_track_uri(input: &str) -> Option<String> {
    let input = input.trim();
    match input.strip_prefix(TRACK_URI_PREFIX) {
        Some(id) if is_valid_id(id) => Some(input.to_string()),
        Some(_) => None,
        None => track_uri_from_url(input),
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// clap value parser for `--time-range`.
pub fn parse_time_range(s: &str) -> std::result::Result<TimeRange, String> {
    TimeRange::from_str(s)
}
