//! Where REPL input comes from.
//!
//! The REPL only talks to [`LineEditor`], so tests can feed it scripted input
//! while the binary reads the terminal through rustyline.

use std::borrow::Cow;

use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator};
use wayfarer_foundation::{Error, Result};

/// One attempt at reading input.
#[derive(Debug)]
pub enum ReadResult {
    /// The player entered a line.
    Line(String),
    /// Ctrl+C; the current line is abandoned.
    Interrupted,
    /// Ctrl+D or the end of scripted input.
    Eof,
}

/// A source of player input lines.
pub trait LineEditor {
    /// Shows `prompt` and waits for the next line.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying input cannot be read.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Remembers an entered line for recall.
    fn add_history(&mut self, line: &str);

    /// Replaces the verbs offered for completion.
    fn set_keywords(&mut self, keywords: Vec<String>);
}

#[derive(Helper, Completer, Hinter, Validator)]
struct WayfarerHelper {
    #[rustyline(Completer)]
    completer: VerbCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
}

impl Highlighter for WayfarerHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completes verbs and meta commands in first position, and file paths after
/// `:save` or `:load`.
struct VerbCompleter {
    paths: FilenameCompleter,
    keywords: Vec<String>,
}

impl VerbCompleter {
    fn new() -> Self {
        Self {
            paths: FilenameCompleter::new(),
            keywords: Vec::new(),
        }
    }
}

impl Completer for VerbCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before = &line[..pos];
        if before.starts_with(":save ") || before.starts_with(":load ") {
            return self.paths.complete(line, pos, ctx);
        }
        // Only the verb is completed; arguments name things in the world.
        if before.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }

        let word = before.to_lowercase();
        let candidates = self
            .keywords
            .iter()
            .filter(|keyword| keyword.starts_with(&word))
            .map(|keyword| Pair {
                display: keyword.clone(),
                replacement: keyword.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

/// Terminal input with history, hints, and verb completion.
pub struct RustylineEditor {
    editor: Editor<WayfarerHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Opens the terminal for line editing.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(|e| Error::internal(e.to_string()))?
            .build();

        let helper = WayfarerHelper {
            completer: VerbCompleter::new(),
            hinter: HistoryHinter::new(),
        };

        let mut editor =
            Editor::with_config(config).map_err(|e| Error::internal(e.to_string()))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        let read = match self.editor.readline(prompt) {
            Ok(line) => ReadResult::Line(line),
            Err(ReadlineError::Interrupted) => ReadResult::Interrupted,
            Err(ReadlineError::Eof) => ReadResult::Eof,
            Err(e) => return Err(Error::internal(format!("terminal read failed: {e}"))),
        };
        Ok(read)
    }

    fn add_history(&mut self, line: &str) {
        self.editor.add_history_entry(line).ok();
    }

    fn set_keywords(&mut self, keywords: Vec<String>) {
        if let Some(WayfarerHelper { completer, .. }) = self.editor.helper_mut() {
            completer.keywords = keywords;
        }
    }
}
