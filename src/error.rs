//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Network error (connection, timeout, DNS, truncated body)
    #[error("Network error: {0}")]
    Network(String),

    /// Lyrics service answered with a non-success status
    #[error("Lyrics API error: {message}")]
    LyricsApi {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Response body or input file could not be decoded
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// A single lookup failed and took its batch down with it
    #[error("Lyrics lookup failed for {song}: {source}")]
    Lookup {
        /// The song that failed, as `artist - title (id)`.
        song: String,
        /// What went wrong for that song.
        #[source]
        source: Box<Error>,
    },

    /// The caller cancelled the batch before it finished
    #[error("Lyrics batch was cancelled")]
    Cancelled,

    /// A lookup task panicked or was aborted underneath the dispatcher
    #[error("Lookup task failed: {0}")]
    Task(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a lyrics API error with HTTP status
    pub fn api_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            401 | 403 => Some("Check the LYRICS_API_TOKEN environment variable"),
            408 => Some("The lyrics service timed out - try again or raise LYRICS_TIMEOUT_SECS"),
            429 => Some("Rate limited - lower LYRICS_MAX_CONCURRENCY or wait a moment"),
            500..=599 => Some("Lyrics service error - try again later"),
            _ => None,
        };
        Self::LyricsApi {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Attribute an error to the song whose lookup produced it
    pub fn lookup(song: impl std::fmt::Display, source: Self) -> Self {
        Self::Lookup {
            song: song.to_string(),
            source: Box::new(source),
        }
    }

    /// The innermost error, looking through any `Lookup` wrappers
    pub fn root(&self) -> &Self {
        match self {
            Self::Lookup { source, .. } => source.root(),
            other => other,
        }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}
