//! Keyword tokens used to address entities from player input.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered, de-duplicated set of lowercase keyword tokens.
///
/// Insertion order is kept so listings are stable; matching only cares
/// about membership.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keywords(Vec<String>);

impl Keywords {
    /// Creates an empty keyword set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives keywords from a display name by splitting on whitespace.
    ///
    /// Leading articles are skipped, so "a brass key" yields `brass`, `key`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.split_whitespace()
            .filter(|word| !matches!(word.to_lowercase().as_str(), "a" | "an" | "the"))
            .collect()
    }

    /// Adds a token, lowercased. Empty and duplicate tokens are ignored.
    pub fn insert(&mut self, token: &str) {
        let token = token.trim().to_lowercase();
        if !token.is_empty() && !self.0.contains(&token) {
            self.0.push(token);
        }
    }

    /// Returns a copy with `token` added.
    #[must_use]
    pub fn with(mut self, token: &str) -> Self {
        self.insert(token);
        self
    }

    /// Returns true if any token starts with `prefix` (case-insensitive).
    ///
    /// An empty prefix never matches.
    #[must_use]
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        if prefix.is_empty() {
            return false;
        }
        let prefix = prefix.to_lowercase();
        self.0.iter().any(|token| token.starts_with(&prefix))
    }

    /// Returns true if `token` is present exactly.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        self.0.iter().any(|t| *t == token)
    }

    /// Iterates tokens in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for Keywords {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut keywords = Self::new();
        for token in iter {
            keywords.insert(token);
        }
        keywords
    }
}

impl fmt::Display for Keywords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}
