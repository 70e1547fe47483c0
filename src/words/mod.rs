//! Word census over fetched lyrics.
//!
//! Splits lyrics into whitespace-delimited words, counts every word, and
//! files each one under at most one category. Categories are substring
//! matchers checked in priority order; the first one that matches wins.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::constants::words::DEFAULT_CATEGORIES;
use crate::lyrics::LyricsRecord;

/// A named category and the lowercase substrings that select it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMatcher {
    name: String,
    patterns: Vec<String>,
}

impl CategoryMatcher {
    /// Create a matcher; patterns are lowercased so matching is case-insensitive.
    pub fn new<I, P>(name: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        Self {
            name: name.into(),
            patterns: patterns
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Category name, used as the key in [`CategoryCounts`]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether an already-lowercased word contains any of the patterns
    pub fn matches(&self, word_lower: &str) -> bool {
        self.patterns.iter().any(|p| word_lower.contains(p.as_str()))
    }
}

/// Classifies words into a fixed, ordered set of categories.
#[derive(Debug, Clone)]
pub struct WordClassifier {
    matchers: Vec<CategoryMatcher>,
}

impl Default for WordClassifier {
    fn default() -> Self {
        Self::new(
            DEFAULT_CATEGORIES
                .iter()
                .map(|(name, patterns)| CategoryMatcher::new(*name, patterns.iter())),
        )
    }
}

impl WordClassifier {
    /// Create a classifier; earlier matchers take priority over later ones.
    pub fn new(matchers: impl IntoIterator<Item = CategoryMatcher>) -> Self {
        Self { matchers: matchers.into_iter().collect() }
    }

    /// Append one lowest-priority category per extra word.
    ///
    /// Words that already name a category, or repeat, are skipped.
    #[must_use]
    pub fn with_words<I, W>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() || self.matchers.iter().any(|m| m.name == word) {
                continue;
            }
            self.matchers.push(CategoryMatcher::new(word.clone(), [word]));
        }
        self
    }

    /// Category names in priority order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(CategoryMatcher::name)
    }

    /// The category a single word falls under, if any
    pub fn category_of(&self, word: &str) -> Option<&str> {
        let lower = word.to_lowercase();
        self.matchers
            .iter()
            .find(|m| m.matches(&lower))
            .map(CategoryMatcher::name)
    }

    /// Count words and categories across all records.
    pub fn classify(&self, lyrics: &[LyricsRecord]) -> CategoryCounts {
        let mut counts = self.empty_counts();
        for record in lyrics {
            self.tally(&record.text, &mut counts);
        }
        tracing::info!("total words counted: {}", counts.total_words);
        counts
    }

    /// Count words and categories in a single piece of text.
    pub fn classify_text(&self, text: &str) -> CategoryCounts {
        let mut counts = self.empty_counts();
        self.tally(text, &mut counts);
        counts
    }

    fn empty_counts(&self) -> CategoryCounts {
        CategoryCounts {
            counts: self.matchers.iter().map(|m| (m.name.clone(), 0)).collect(),
            total_words: 0,
        }
    }

    fn tally(&self, text: &str, counts: &mut CategoryCounts) {
        for word in text.split_whitespace() {
            counts.total_words += 1;
            if let Some(name) = self.category_of(word) {
                if let Some(n) = counts.counts.get_mut(name) {
                    *n += 1;
                }
            }
        }
    }
}

/// Classify with the built-in categories.
pub fn classify(lyrics: &[LyricsRecord]) -> CategoryCounts {
    WordClassifier::default().classify(lyrics)
}

/// Per-category word counts plus the total number of words seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    counts: BTreeMap<String, usize>,
    total_words: usize,
}

impl CategoryCounts {
    /// Count for one category; unknown categories count zero
    pub fn get(&self, category: &str) -> usize {
        self.counts.get(category).copied().unwrap_or(0)
    }

    /// Total words scanned, matched or not
    pub const fn total_words(&self) -> usize {
        self.total_words
    }

    /// Words that landed in some category
    pub fn matched_words(&self) -> usize {
        self.counts.values().sum()
    }

    /// `(category, count)` pairs sorted by category name
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// One `category:count` line per category, sorted by category name
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CategoryCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, count) in self.iter() {
            writeln!(f, "{name}:{count}")?;
        }
        Ok(())
    }
}
