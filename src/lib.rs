//! `genius` - concurrent lyrics fetching and word census.
//!
//! Fetches lyrics for a batch of songs in parallel from a lyrics service,
//! failing the whole batch on the first error, then counts words and
//! classifies them into a fixed, ordered set of categories.

// Re-export public modules for use in integration tests and as a library
pub mod config;
pub mod constants;
pub mod error;
pub mod lyrics;
pub mod words;

pub use error::{Error, Result};
pub use lyrics::{FetchDispatcher, LyricsClient, LyricsRecord, LyricsSource, SongId, SongIdentity};
pub use words::{classify, CategoryCounts, CategoryMatcher, WordClassifier};
