//! Small text helpers for output lines.

/// Uppercases the first character.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Third-person form of a verb: `get` to `gets`, `relinquish` to
/// `relinquishes`.
#[must_use]
pub fn third_person(verb: &str) -> String {
    if ["s", "sh", "ch", "x", "z"]
        .iter()
        .any(|ending| verb.ends_with(ending))
    {
        format!("{verb}es")
    } else {
        format!("{verb}s")
    }
}

/// Drops a leading `a`, `an`, or `the`: `a radio` becomes `radio`.
#[must_use]
pub fn without_article(name: &str) -> &str {
    for article in ["a ", "an ", "the "] {
        if name.len() > article.len() && name[..article.len()].eq_ignore_ascii_case(article) {
            return name[article.len()..].trim_start();
        }
    }
    name
}
