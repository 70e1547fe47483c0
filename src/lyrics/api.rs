use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::config::{parse_base_url, Config};
use crate::error::{Error, Result};
use crate::lyrics::types::SongIdentity;

/// Anything that can produce lyrics text for a song.
///
/// The dispatcher fans lookups out over this trait, so tests and alternative
/// backends plug in here.
#[async_trait]
pub trait LyricsSource: Send + Sync {
    /// Fetch lyrics for one song.
    ///
    /// An empty string means the source answered but had no lyrics.
    async fn lookup(&self, song: &SongIdentity) -> Result<String>;

    /// Get the name of this source (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// Response shape of the lyrics service
#[derive(Debug, Deserialize)]
struct LyricsResponse {
    lyrics: String,
}

/// Body the service sends with a 404 for a song it has no lyrics for
#[derive(Debug, Deserialize)]
struct NotFoundResponse {
    #[allow(dead_code)]
    error: String,
}

/// Client for the lyrics HTTP service (`GET {base}/{artist}/{title}`)
#[derive(Clone)]
pub struct LyricsClient {
    base_url: Url,
    token: Option<String>,
    client: Client,
}

impl LyricsClient {
    /// Create a new lyrics client from config
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = parse_base_url(&config.lyrics_api_url)?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            token: config.lyrics_api_token.clone(),
            client,
        })
    }

    /// Build the lookup URL for a song.
    ///
    /// Artist and title become two escaped path segments, otherwise untouched.
    pub fn endpoint(&self, song: &SongIdentity) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config("Lyrics API URL cannot take path segments", "Use an http(s) URL"))?
            .pop_if_empty()
            .push(&song.artist)
            .push(&song.title);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<String> {
        let path = url.path().to_string();
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {path} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(Error::api_status(
                format!("Request to {path} returned {status}"),
                status.as_u16(),
            ));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response body from {path}: {e}")))?;

        // Unknown songs come back as 404 with a JSON error body; anything
        // else on a 404 (an HTML page from a wrong base URL) is not a miss
        if status == StatusCode::NOT_FOUND {
            return serde_json::from_slice::<NotFoundResponse>(&body)
                .map(|_| String::new())
                .map_err(|e| Error::parse(format!("Invalid 404 body from {path}: {e}"), None));
        }

        let decoded: LyricsResponse = serde_json::from_slice(&body)
            .map_err(|e| Error::parse(format!("Invalid JSON from {path}: {e}"), None))?;

        Ok(decoded.lyrics)
    }
}

#[async_trait]
impl LyricsSource for LyricsClient {
    async fn lookup(&self, song: &SongIdentity) -> Result<String> {
        let url = self.endpoint(song)?;
        self.get(url).await
    }

    fn name(&self) -> &'static str {
        "LyricsClient"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn client_for(base: &str) -> LyricsClient {
        let mut config = Config::default();
        config.lyrics_api_url = base.to_string();
        LyricsClient::new(&config).unwrap()
    }

    #[test]
    fn endpoint_appends_escaped_segments() {
        let client = client_for("https://api.lyrics.ovh/v1");
        let song = SongIdentity::new("AC/DC", "Back in Black?", 1u64);

        let url = client.endpoint(&song).unwrap();
        assert_eq!(url.as_str(), "https://api.lyrics.ovh/v1/AC%2FDC/Back%20in%20Black%3F");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client = client_for("https://api.lyrics.ovh/v1/");
        let song = SongIdentity::new("Queen", "Bohemian Rhapsody", 1u64);

        let url = client.endpoint(&song).unwrap();
        assert_eq!(url.as_str(), "https://api.lyrics.ovh/v1/Queen/Bohemian%20Rhapsody");
    }

    #[test]
    fn rejects_base_without_path() {
        let mut config = Config::default();
        config.lyrics_api_url = "data:text/plain,hello".to_string();
        assert!(matches!(LyricsClient::new(&config), Err(Error::Config { .. })));
    }
}
