//! Argument splitting.
//!
//! Splits a raw input line into a verb and its argument text, and breaks
//! argument text into the one or two references most commands take.

/// A raw line split into verb and arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLine<'a> {
    /// Lowercased verb word.
    pub verb: String,
    /// Everything after the verb, trimmed. Case is preserved for messages.
    pub args: &'a str,
}

/// Splits player input.
pub struct ArgumentTokenizer;

impl ArgumentTokenizer {
    /// Splits a line into verb and arguments.
    ///
    /// A leading punctuation character is a verb on its own, so `'hello`
    /// splits into `'` and `hello`. Returns `None` for a blank line.
    #[must_use]
    pub fn split_command(input: &str) -> Option<CommandLine<'_>> {
        let input = input.trim();
        let first = input.chars().next()?;

        if first.is_ascii_punctuation() {
            let (verb, args) = input.split_at(first.len_utf8());
            return Some(CommandLine {
                verb: verb.to_string(),
                args: args.trim(),
            });
        }

        let (verb, args) = input
            .split_once(char::is_whitespace)
            .unwrap_or((input, ""));
        Some(CommandLine {
            verb: verb.to_lowercase(),
            args: args.trim(),
        })
    }

    /// Splits argument text into words, dropping any word in `fillers`
    /// (compared case-insensitively).
    #[must_use]
    pub fn words<'a>(args: &'a str, fillers: &[&str]) -> Vec<&'a str> {
        args.split_whitespace()
            .filter(|word| !fillers.iter().any(|filler| filler.eq_ignore_ascii_case(word)))
            .collect()
    }

    /// Splits argument text into a primary reference and an optional
    /// secondary one, ignoring filler words.
    ///
    /// `get ball from bag` and `get ball bag` both give `("ball", Some("bag"))`.
    /// Words past the second are ignored.
    #[must_use]
    pub fn pair<'a>(args: &'a str, fillers: &[&str]) -> Option<(&'a str, Option<&'a str>)> {
        let words = Self::words(args, fillers);
        let first = *words.first()?;
        Some((first, words.get(1).copied()))
    }

    /// Splits off the first word, returning it and the trimmed remainder.
    ///
    /// Used where the first word names a target and the rest is free text,
    /// as in `whisper bob meet me at the gate`.
    #[must_use]
    pub fn first_word(text: &str) -> Option<(&str, &str)> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let (word, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
        Some((word, rest.trim()))
    }
}
