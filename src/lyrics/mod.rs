//! Lyrics retrieval.
//!
//! Provides the lyrics service client and the dispatcher that fetches a whole
//! batch of songs concurrently.

/// Lyrics sources and the HTTP client for the lyrics service
pub mod api;
/// Concurrent batch fetching with first-error abort
pub mod dispatcher;
/// Song identities and lyrics records
pub mod types;

// Re-export key components
pub use api::{LyricsClient, LyricsSource};
pub use dispatcher::FetchDispatcher;
pub use types::{load_songs, parse_songs, LyricsRecord, SongId, SongIdentity};
