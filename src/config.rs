//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::constants::lyrics_api;
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Base URL of the lyrics service; songs are appended as `/{artist}/{title}`
    pub lyrics_api_url: String,
    /// Credential attached as a bearer token to every lyrics request
    pub lyrics_api_token: Option<String>,
    /// Per-request timeout for the lyrics service
    pub request_timeout: Duration,
    /// Cap on simultaneously in-flight lookups (`None` = one task per song, unbounded)
    pub max_concurrency: Option<usize>,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            lyrics_api_url: lyrics_api::BASE_URL.to_string(),
            lyrics_api_token: None,
            request_timeout: Duration::from_secs(lyrics_api::REQUEST_TIMEOUT_SECS),
            max_concurrency: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `load` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("LYRICS_API_URL").filter(|u| !u.trim().is_empty()) {
            config.lyrics_api_url = url.trim().to_string();
        }
        parse_base_url(&config.lyrics_api_url)?;

        config.lyrics_api_token = lookup("LYRICS_API_TOKEN").filter(|t| !t.is_empty());

        if let Some(secs) = lookup("LYRICS_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                Error::config(
                    format!("Invalid LYRICS_TIMEOUT_SECS '{secs}'"),
                    "Use a whole number of seconds greater than zero",
                )
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(max) = lookup("LYRICS_MAX_CONCURRENCY") {
            let max = max.trim().parse::<usize>().map_err(|_| {
                Error::config(
                    format!("Invalid LYRICS_MAX_CONCURRENCY '{max}'"),
                    "Use a whole number; 0 means unbounded",
                )
            })?;
            config.max_concurrency = (max > 0).then_some(max);
        }

        Ok(config)
    }

    /// Check if a lyrics API credential is configured
    pub const fn has_token(&self) -> bool {
        self.lyrics_api_token.is_some()
    }
}

/// Parse the lyrics service base URL, which must be able to take path segments
pub(crate) fn parse_base_url(raw: &str) -> Result<Url> {
    Url::parse(raw)
        .ok()
        .filter(|u| !u.cannot_be_a_base())
        .ok_or_else(|| {
            Error::config(
                format!("Invalid lyrics API URL '{raw}'"),
                "Set LYRICS_API_URL to an absolute http(s) URL such as https://api.lyrics.ovh/v1",
            )
        })
}
