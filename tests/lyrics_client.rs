//! Integration tests for the lyrics HTTP client.
//!
//! Runs a small axum server on a loopback port that answers like the public
//! lyrics service (and like a few broken ones).

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use genius::config::Config;
use genius::error::Error;
use genius::lyrics::{FetchDispatcher, LyricsClient, LyricsSource, SongIdentity};

async fn lyrics(Path((artist, title)): Path<(String, String)>, headers: HeaderMap) -> Response {
    match title.as_str() {
        "missing" => (StatusCode::NOT_FOUND, Json(json!({ "error": "No lyrics found" }))).into_response(),
        "blank" => Json(json!({ "lyrics": "" })).into_response(),
        "garbage" => (StatusCode::OK, "<html>definitely not json</html>").into_response(),
        "wrong shape" => Json(json!({ "words": ["a", "b"] })).into_response(),
        "overloaded" => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "lyrics": "too late" })).into_response()
        }
        "whoami" => {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("anonymous")
                .to_string();
            Json(json!({ "lyrics": auth })).into_response()
        }
        _ => Json(json!({ "lyrics": format!("{title} by {artist}") })).into_response(),
    }
}

async fn not_found_page() -> Response {
    (StatusCode::NOT_FOUND, "<html>Not Found</html>").into_response()
}

async fn spawn_stub() -> SocketAddr {
    let app = Router::new()
        .route("/v1/:artist/:title", get(lyrics))
        .fallback(not_found_page);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config_for(addr: SocketAddr) -> Config {
    let mut config = Config::default();
    config.lyrics_api_url = format!("http://{addr}/v1");
    config
}

async fn stub_client() -> LyricsClient {
    LyricsClient::new(&config_for(spawn_stub().await)).unwrap()
}

#[tokio::test]
async fn fetches_lyrics_with_escaped_path() {
    let client = stub_client().await;
    let song = SongIdentity::new("Simon & Garfunkel", "The Boxer / Live", 1u64);

    let text = client.lookup(&song).await.unwrap();

    assert_eq!(text, "The Boxer / Live by Simon & Garfunkel");
}

#[tokio::test]
async fn not_found_and_blank_are_soft_misses() {
    let client = stub_client().await;

    for title in ["missing", "blank"] {
        let text = client.lookup(&SongIdentity::new("Nobody", title, 1u64)).await.unwrap();
        assert!(text.is_empty(), "{title} should be a soft miss");
    }
}

#[tokio::test]
async fn html_not_found_page_fails_the_batch() {
    let mut config = config_for(spawn_stub().await);
    config.lyrics_api_url = config.lyrics_api_url.replace("/v1", "/wrong/path");
    let client = LyricsClient::new(&config).unwrap();

    match client.lookup(&SongIdentity::new("Adele", "Hello", 1u64)).await {
        Err(Error::Parse { message, .. }) => assert!(message.contains("Invalid 404 body")),
        other => panic!("expected parse error for an HTML 404, got {other:?}"),
    }

    let dispatcher = FetchDispatcher::new(client);
    let songs = vec![
        SongIdentity::new("Adele", "Hello", 1u64),
        SongIdentity::new("Coldplay", "Yellow", 2u64),
    ];
    match dispatcher.fetch_all(&songs).await {
        Err(Error::Lookup { source, .. }) => assert!(matches!(*source, Error::Parse { .. })),
        other => panic!("expected the batch to fail, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_bodies_are_parse_errors() {
    let client = stub_client().await;

    for title in ["garbage", "wrong shape"] {
        match client.lookup(&SongIdentity::new("Broken", title, 1u64)).await {
            Err(Error::Parse { message, .. }) => assert!(message.contains("Invalid JSON")),
            other => panic!("expected parse error for {title}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn server_errors_carry_status_and_hint() {
    let client = stub_client().await;

    match client.lookup(&SongIdentity::new("Busy", "overloaded", 1u64)).await {
        Err(Error::LyricsApi { status: Some(503), hint: Some(_), .. }) => {}
        other => panic!("expected 503 lyrics API error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    // Bind then drop so the port is very likely closed
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let client = LyricsClient::new(&config_for(addr)).unwrap();

    let result = client.lookup(&SongIdentity::new("Ghost", "Town", 1u64)).await;

    assert!(matches!(result, Err(Error::Network(_))));
}

#[tokio::test]
async fn timeout_is_a_network_error() {
    let mut config = config_for(spawn_stub().await);
    config.request_timeout = Duration::from_millis(200);
    let client = LyricsClient::new(&config).unwrap();

    let result = client.lookup(&SongIdentity::new("Snail", "slow", 1u64)).await;

    assert!(matches!(result, Err(Error::Network(_))));
}

#[tokio::test]
async fn token_is_sent_as_bearer() {
    let mut config = config_for(spawn_stub().await);
    config.lyrics_api_token = Some("s3cret".into());
    let client = LyricsClient::new(&config).unwrap();

    let text = client.lookup(&SongIdentity::new("Me", "whoami", 1u64)).await.unwrap();
    assert_eq!(text, "Bearer s3cret");

    let anonymous = stub_client().await;
    let text = anonymous.lookup(&SongIdentity::new("Me", "whoami", 1u64)).await.unwrap();
    assert_eq!(text, "anonymous");
}

#[tokio::test]
async fn batch_over_http_fails_on_first_bad_song() {
    let dispatcher = FetchDispatcher::new(stub_client().await);
    let mut songs: Vec<_> = (0..6)
        .map(|i| SongIdentity::new("Band", format!("track {i}"), i as u64))
        .collect();

    let records = dispatcher.fetch_all(&songs).await.unwrap();
    assert_eq!(records.len(), 6);

    songs.push(SongIdentity::new("Broken", "garbage", 99u64));
    match dispatcher.fetch_all(&songs).await {
        Err(Error::Lookup { song, source }) => {
            assert_eq!(song, "Broken - garbage (99)");
            assert!(matches!(*source, Error::Parse { .. }));
        }
        other => panic!("expected lookup error, got {other:?}"),
    }
}
