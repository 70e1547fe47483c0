//! Lyrics data types.
//!
//! Song identities come in from whoever chose the songs (search results, a
//! file, the command line); lyrics records go out to the word census.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque identifier correlating a song with its lyrics
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SongId {
    /// Numeric id, as handed out by most metadata services
    Number(u64),
    /// Any other identifier
    Text(String),
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for SongId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for SongId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for SongId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A song to look up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongIdentity {
    /// Performing artist, used verbatim in the lookup path
    pub artist: String,
    /// Song title, used verbatim in the lookup path
    pub title: String,
    /// Identifier carried through to the lyrics record
    pub id: SongId,
}

impl SongIdentity {
    /// Create a new song identity
    pub fn new(artist: impl Into<String>, title: impl Into<String>, id: impl Into<SongId>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            id: id.into(),
        }
    }

    /// Parse an `Artist - Title` string.
    ///
    /// Splits on the first ` - ` so titles may contain dashes of their own.
    pub fn parse(text: &str, id: impl Into<SongId>) -> Result<Self> {
        let (artist, title) = text
            .split_once(" - ")
            .map(|(a, t)| (a.trim(), t.trim()))
            .filter(|(a, t)| !a.is_empty() && !t.is_empty())
            .ok_or_else(|| Error::parse(format!("Expected 'Artist - Title', got '{text}'"), None))?;

        Ok(Self::new(artist, title, id))
    }
}

impl fmt::Display for SongIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.artist, self.title, self.id)
    }
}

/// Lyrics fetched for one song
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LyricsRecord {
    /// Id of the song these lyrics belong to
    pub id: SongId,
    /// Lyrics text; empty when the service had nothing for the song
    pub text: String,
}

impl LyricsRecord {
    /// Create a new lyrics record
    pub fn new(id: SongId, text: impl Into<String>) -> Self {
        Self { id, text: text.into() }
    }

    /// True when the lookup succeeded but found no lyrics
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Song list entry as written in a JSON file; `id` is optional there
#[derive(Debug, Deserialize)]
struct SongEntry {
    artist: String,
    title: String,
    #[serde(default)]
    id: Option<SongId>,
}

/// Load a JSON array of `{ "artist", "title", "id"? }` objects.
///
/// Entries without an id get their 1-based position in the file.
pub fn load_songs(path: &Path) -> Result<Vec<SongIdentity>> {
    let raw = std::fs::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    parse_songs(&raw).map_err(|e| match e {
        Error::Parse { message, .. } => Error::parse(message, path.to_path_buf()),
        other => other,
    })
}

/// Parse a JSON song list; see [`load_songs`].
pub fn parse_songs(json: &str) -> Result<Vec<SongIdentity>> {
    let entries: Vec<SongEntry> = serde_json::from_str(json)
        .map_err(|e| Error::parse(format!("Invalid song list: {e}"), None))?;

    Ok(entries
        .into_iter()
        .zip(1u64..)
        .map(|(entry, position)| SongIdentity {
            artist: entry.artist,
            title: entry.title,
            id: entry.id.unwrap_or(SongId::Number(position)),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::io::Write;

    #[test]
    fn parse_splits_on_first_separator() {
        let song = SongIdentity::parse("Wu-Tang Clan - C.R.E.A.M. - Remastered", 3u64).unwrap();
        assert_eq!(song.artist, "Wu-Tang Clan");
        assert_eq!(song.title, "C.R.E.A.M. - Remastered");
        assert_eq!(song.id, SongId::Number(3));
    }

    #[test]
    fn parse_rejects_missing_title() {
        assert!(matches!(SongIdentity::parse("Coldplay", 1u64), Err(Error::Parse { .. })));
        assert!(matches!(SongIdentity::parse("Coldplay - ", 1u64), Err(Error::Parse { .. })));
    }

    #[test]
    fn display_includes_id() {
        let song = SongIdentity::new("Adele", "Hello", "abc");
        assert_eq!(song.to_string(), "Adele - Hello (abc)");
    }

    #[test]
    fn whitespace_only_lyrics_count_as_empty() {
        assert!(LyricsRecord::new(1u64.into(), " \n").is_empty());
        assert!(!LyricsRecord::new(1u64.into(), "hello").is_empty());
    }

    #[test]
    fn song_list_fills_missing_ids() {
        let songs = parse_songs(
            r#"[
                {"artist": "Eminem", "title": "Stan", "id": 235729},
                {"artist": "Outkast", "title": "Hey Ya!"},
                {"artist": "Björk", "title": "Jóga", "id": "bjork-joga"}
            ]"#,
        )
        .unwrap();

        assert_eq!(songs.len(), 3);
        assert_eq!(songs[0].id, SongId::Number(235_729));
        assert_eq!(songs[1].id, SongId::Number(2));
        assert_eq!(songs[2].id, SongId::Text("bjork-joga".into()));
    }

    #[test]
    fn load_songs_reports_file_on_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"artist\": \"nope\"}}").unwrap();

        match load_songs(file.path()) {
            Err(Error::Parse { file: Some(p), .. }) => assert_eq!(p, file.path()),
            other => panic!("expected parse error with file, got {other:?}"),
        }
    }

    #[test]
    fn load_songs_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("songs.json");
        assert!(matches!(load_songs(&missing), Err(Error::Io { path: Some(_), .. })));
    }
}
