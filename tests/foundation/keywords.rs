//! Integration tests for Keywords
//!
//! Tests keyword derivation from names and prefix matching.

use proptest::prelude::*;
use wayfarer_foundation::Keywords;

// =============================================================================
// Derivation
// =============================================================================

#[test]
fn from_name_drops_articles() {
    let keywords = Keywords::from_name("a Brass Key");
    assert_eq!(keywords.iter().collect::<Vec<_>>(), vec!["brass", "key"]);
}

#[test]
fn from_name_keeps_other_words_in_order() {
    let keywords = Keywords::from_name("The Old Iron Gate");
    assert_eq!(keywords.iter().collect::<Vec<_>>(), vec!["old", "iron", "gate"]);
}

#[test]
fn duplicates_and_blanks_are_ignored() {
    let keywords = Keywords::new().with("apple").with("APPLE").with("  ");
    assert_eq!(keywords.len(), 1);
}

// =============================================================================
// Matching
// =============================================================================

#[test]
fn prefix_matching_is_case_insensitive() {
    let keywords = Keywords::from_name("a short sword");
    assert!(keywords.matches_prefix("SW"));
    assert!(keywords.matches_prefix("sho"));
    assert!(!keywords.matches_prefix("word"));
}

#[test]
fn empty_prefix_never_matches() {
    assert!(!Keywords::from_name("a short sword").matches_prefix(""));
}

#[test]
fn contains_needs_the_whole_token() {
    let keywords = Keywords::from_name("a short sword");
    assert!(keywords.contains("Sword"));
    assert!(!keywords.contains("sw"));
}

proptest! {
    #[test]
    fn derived_keywords_skip_articles(words in prop::collection::vec("(a|an|the|[a-z]{1,8})", 0..6)) {
        let name = words.join(" ");
        let keywords = Keywords::from_name(&name);
        prop_assert!(keywords.iter().all(|token| !matches!(token, "a" | "an" | "the")));
        prop_assert!(keywords.len() <= words.len());
    }
}
