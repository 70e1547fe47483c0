//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Lyrics service constants.
pub mod lyrics_api {
    /// Default base URL of the public lyrics service.
    pub const BASE_URL: &str = "https://api.lyrics.ovh/v1";

    /// Default per-request timeout in seconds.
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Word census constants.
pub mod words {
    /// Built-in categories in priority order, each with the spellings that count toward it.
    ///
    /// Patterns are lowercase substrings; the first category with a matching
    /// pattern claims the word.
    pub const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
        ("fuck", &["fuck", "f-ck", "f*ck"]),
        ("shit", &["shit"]),
        ("bitch", &["bitch", "b*tch", "b-tch"]),
        ("pussy", &["pussy", "p*ssy", "p-ssy"]),
    ];
}
