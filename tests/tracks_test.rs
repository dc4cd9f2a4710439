use mockito::Matcher;
use serde_json::json;
use toptracks::Error;
use toptracks::config::{Config, Endpoints};
use toptracks::spotify::{self, tracks::*};
use toptracks::types::TimeRange;
use toptracks::utils::format_tracks;

fn test_endpoints(server: &mockito::Server) -> Endpoints {
    Endpoints {
        accounts_url: server.url(),
        api_url: format!("{}/v1", server.url()),
    }
}

// Helper function to create a track item as returned by the API
fn track_item(id: &str, name: &str, artists: &[&str], album: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:track:{id}"),
        "artists": artists
            .iter()
            .map(|a| json!({ "name": a, "id": format!("{a}_id") }))
            .collect::<Vec<_>>(),
        "album": { "name": album, "id": format!("{id}_album") },
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{id}") },
        "popularity": 80
    })
}

fn two_track_fixture() -> serde_json::Value {
    json!({
        "items": [
            track_item("1abc", "First Song", &["Artist B", "Artist A"], "Album One"),
            track_item("2def", "Second Song", &["Solo"], "Album Two"),
        ],
        "total": 50,
        "limit": 2,
        "offset": 0
    })
}

#[tokio::test]
async fn test_get_top_tracks_maps_items_in_order() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/me/top/tracks")
        .match_header("authorization", "Bearer token-123")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "2".into()),
            Matcher::UrlEncoded("time_range".into(), "short_term".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(two_track_fixture().to_string())
        .create_async()
        .await;

    let client = spotify::http_client(&Config::default()).unwrap();
    let tracks = get_top_tracks(
        &client,
        &test_endpoints(&server),
        "token-123",
        2,
        TimeRange::ShortTerm,
    )
    .await
    .unwrap();

    mock.assert_async().await;
    assert_eq!(tracks.len(), 2);

    assert_eq!(tracks[0].name, "First Song");
    // artist order must be preserved, not sorted
    assert_eq!(tracks[0].artists, "Artist B, Artist A");
    assert_eq!(tracks[0].album, "Album One");
    assert_eq!(tracks[0].url, "https://open.spotify.com/track/1abc");
    assert_eq!(tracks[0].uri, "spotify:track:1abc");

    assert_eq!(tracks[1].name, "Second Song");
    assert_eq!(tracks[1].artists, "Solo");
    assert_eq!(tracks[1].album, "Album Two");
}

#[tokio::test]
async fn test_get_top_tracks_empty_items() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/me/top/tracks")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"items": [], "total": 0}"#)
        .create_async()
        .await;

    let client = spotify::http_client(&Config::default()).unwrap();
    let tracks = get_top_tracks(
        &client,
        &test_endpoints(&server),
        "t",
        5,
        TimeRange::LongTerm,
    )
    .await
    .unwrap();

    assert!(tracks.is_empty());
}

#[tokio::test]
async fn test_get_top_tracks_missing_items() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/me/top/tracks")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"total": 0}"#)
        .create_async()
        .await;

    let client = spotify::http_client(&Config::default()).unwrap();
    let tracks = get_top_tracks(
        &client,
        &test_endpoints(&server),
        "t",
        5,
        TimeRange::LongTerm,
    )
    .await
    .unwrap();

    assert!(tracks.is_empty());
}

#[tokio::test]
async fn test_get_top_tracks_error_carries_api_message() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/me/top/tracks")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"error": {"status": 401, "message": "The access token expired"}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = spotify::http_client(&Config::default()).unwrap();
    let result = get_top_tracks(
        &client,
        &test_endpoints(&server),
        "expired",
        5,
        TimeRange::LongTerm,
    )
    .await;

    match result {
        Err(Error::Fetch { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "The access token expired");
        }
        other => panic!("expected Fetch error, got {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_top_tracks_error_without_json_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/me/top/tracks")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let client = spotify::http_client(&Config::default()).unwrap();
    let result = get_top_tracks(
        &client,
        &test_endpoints(&server),
        "t",
        5,
        TimeRange::LongTerm,
    )
    .await;

    match result {
        Err(Error::Fetch { status, message }) => {
            assert_eq!(status, 503);
            assert!(message.is_empty());
        }
        other => panic!("expected Fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_top_tracks_raw_returns_body_untouched() {
    let mut server = mockito::Server::new_async().await;
    let fixture = two_track_fixture();
    let _mock = server
        .mock("GET", "/v1/me/top/tracks")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(fixture.to_string())
        .create_async()
        .await;

    let client = spotify::http_client(&Config::default()).unwrap();
    let raw = get_top_tracks_raw(
        &client,
        &test_endpoints(&server),
        "t",
        2,
        TimeRange::MediumTerm,
    )
    .await
    .unwrap();

    assert_eq!(raw, fixture);
}

#[test]
fn test_parse_top_tracks_is_stable() {
    let fixture = two_track_fixture();

    let first = parse_top_tracks(&fixture).unwrap();
    let second = parse_top_tracks(&fixture).unwrap();
    assert_eq!(first, second);

    let lines = format_tracks(&first, true);
    assert_eq!(lines, format_tracks(&first, true));
    assert_eq!(parse_top_tracks(&fixture).unwrap(), first);
}

#[test]
fn test_parse_top_tracks_missing_required_field() {
    let fixture = json!({
        "items": [{
            "name": "No Album",
            "artists": [{ "name": "A" }],
            "external_urls": { "spotify": "https://open.spotify.com/track/x1" }
        }]
    });

    assert!(matches!(parse_top_tracks(&fixture), Err(Error::Parse(_))));
}

#[test]
fn test_parse_top_tracks_derives_uri_from_url() {
    let fixture = json!({
        "items": [{
            "name": "Song",
            "artists": [{ "name": "A" }],
            "album": { "name": "Album" },
            "external_urls": { "spotify": "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC" }
        }]
    });

    let tracks = parse_top_tracks(&fixture).unwrap();
    assert_eq!(tracks[0].uri, "spotify:track:4uLU6hMCjMI75M1A2tKUQC");
}

#[test]
fn test_parse_top_tracks_null_body() {
    assert!(parse_top_tracks(&serde_json::Value::Null).unwrap().is_empty());
}

#[test]
fn test_parse_top_tracks_null_items() {
    let fixture = json!({ "items": null, "total": 0 });
    assert!(parse_top_tracks(&fixture).unwrap().is_empty());
}
