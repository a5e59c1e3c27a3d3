//! The main REPL implementation.
//!
//! Plain lines run as game commands for the active character. Lines that
//! start with `:` are meta commands that pick who to play, manage sessions,
//! and save or load snapshots.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use wayfarer_foundation::{EntityId, Error, ErrorKind, Result};

use crate::config::RuntimeConfig;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::serialize;
use crate::session::Session;

const META_COMMANDS: &[&str] = &[
    ":as", ":connect", ":disconnect", ":save", ":load", ":help", ":quit",
];

const HELP: &[&str] = &[
    "Meta commands:",
    "  :as NAME          Play as NAME, connecting them if needed",
    "  :connect NAME     Connect NAME without switching to them",
    "  :disconnect NAME  Disconnect NAME",
    "  :save [PATH]      Save the world to PATH",
    "  :load [PATH]      Load the world from PATH",
    "  :help             Show this list",
    "  :quit             Leave",
    "Anything else runs as a command for the character you are playing.",
];

/// What one line of input produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Lines to show.
    Lines(Vec<String>),
    /// The user asked to leave.
    Quit,
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Self::Lines(vec![text.into()])
    }
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// The world and the character being played.
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Prompt, shown after the active character's name.
    prompt: String,

    /// Default target for `:save` and `:load`.
    snapshot_path: Option<PathBuf>,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E) -> Self {
        let mut repl = Self {
            editor,
            session: Session::new(),
            show_banner: true,
            prompt: "> ".to_string(),
            snapshot_path: None,
        };
        repl.refresh_keywords();
        repl
    }

    /// Sets the session for this REPL.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self.refresh_keywords();
        self
    }

    /// Applies prompt, banner, and snapshot settings.
    #[must_use]
    pub fn with_config(mut self, config: &RuntimeConfig) -> Self {
        self.prompt.clone_from(&config.prompt);
        self.show_banner = config.show_banner;
        self.snapshot_path.clone_from(&config.snapshot_path);
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    self.print_error(&e);
                }
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let prompt = self.prompt_text();
        let input = match self.editor.read_line(&prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => {
                println!();
                return Ok(true);
            }
            ReadResult::Eof => return Ok(false),
        };

        if input.trim().is_empty() {
            return Ok(true);
        }
        self.editor.add_history(&input);

        match self.eval(&input) {
            Ok(Reply::Lines(lines)) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Ok(Reply::Quit) => return Ok(false),
            Err(e) => self.print_error(&e),
        }
        Ok(true)
    }

    fn prompt_text(&self) -> String {
        match self.session.actor_name() {
            Some(name) => format!("{name}{}", self.prompt),
            None => self.prompt.clone(),
        }
    }

    fn refresh_keywords(&mut self) {
        let mut keywords: Vec<String> = META_COMMANDS.iter().map(ToString::to_string).collect();
        for entry in self.session.dispatcher().vocabulary().iter() {
            keywords.push(entry.name.clone());
            keywords.extend(entry.aliases.iter().cloned());
        }
        self.editor.set_keywords(keywords);
    }

    /// Evaluates one line of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the command hits inconsistent world data or a
    /// snapshot cannot be read or written.
    pub fn eval(&mut self, input: &str) -> Result<Reply> {
        let input = input.trim();
        if let Some(meta) = input.strip_prefix(':') {
            let (command, arg) = meta
                .split_once(char::is_whitespace)
                .map_or((meta, ""), |(command, arg)| (command, arg.trim()));
            return self.meta(command, arg);
        }
        self.play(input)
    }

    /// Runs every line of a script, skipping blanks and `#` comments, and
    /// returns everything it printed. Stops early at `:quit`.
    ///
    /// # Errors
    ///
    /// Returns the first error a line produces.
    pub fn eval_script(&mut self, source: &str) -> Result<Vec<String>> {
        let mut output = Vec::new();
        for line in source.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match self.eval(line)? {
                Reply::Lines(lines) => output.extend(lines),
                Reply::Quit => break,
            }
        }
        Ok(output)
    }

    /// Runs a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line fails.
    pub fn eval_file(&mut self, path: &Path) -> Result<Vec<String>> {
        let source = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::IoError(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        })?;
        self.eval_script(&source)
    }

    fn play(&mut self, line: &str) -> Result<Reply> {
        let Some(actor) = self.session.actor() else {
            return Ok(Reply::line("No active character. Use :as NAME first."));
        };
        self.session.submit(actor, line)?;
        Ok(Reply::Lines(self.session.drain(actor)))
    }

    fn meta(&mut self, command: &str, arg: &str) -> Result<Reply> {
        match command.to_lowercase().as_str() {
            "as" => self.with_player(command, arg, |repl, actor, name| {
                repl.session.play_as(actor)?;
                let mut lines = vec![format!("You are now playing {name}.")];
                lines.extend(repl.session.drain(actor));
                Ok(Reply::Lines(lines))
            }),
            "connect" => self.with_player(command, arg, |repl, actor, name| {
                if repl.session.world().is_connected(actor) {
                    return Ok(Reply::line(format!("{name} is already connected.")));
                }
                repl.session.connect(actor)?;
                Ok(Reply::line(format!("{name} connected.")))
            }),
            "disconnect" => self.with_player(command, arg, |repl, actor, name| {
                Ok(Reply::line(if repl.session.disconnect(actor) {
                    format!("{name} disconnected.")
                } else {
                    format!("{name} is not connected.")
                }))
            }),
            "save" => {
                let Some(path) = self.snapshot_target(arg) else {
                    return Ok(Reply::line("Usage: :save PATH"));
                };
                serialize::save_to_file(self.session.world(), &path)?;
                Ok(Reply::line(format!("Saved to {}.", path.display())))
            }
            "load" => {
                let Some(path) = self.snapshot_target(arg) else {
                    return Ok(Reply::line("Usage: :load PATH"));
                };
                let world = serialize::load_from_file(&path)?;
                self.session.replace_world(world);
                Ok(Reply::line(format!("Loaded {}.", path.display())))
            }
            "help" | "?" => Ok(Reply::Lines(HELP.iter().map(ToString::to_string).collect())),
            "quit" | "q" | "exit" => Ok(Reply::Quit),
            _ => Ok(Reply::line(format!(
                "Unknown command :{command}. Type :help for a list."
            ))),
        }
    }

    /// Looks up the player named by `arg` and hands it to `action` along
    /// with its display name.
    fn with_player(
        &mut self,
        command: &str,
        arg: &str,
        action: impl FnOnce(&mut Self, EntityId, &str) -> Result<Reply>,
    ) -> Result<Reply> {
        if arg.is_empty() {
            return Ok(Reply::line(format!("Usage: :{command} NAME")));
        }
        let Some(actor) = self.session.find_player(arg) else {
            return Ok(Reply::line(format!("No player named {arg}.")));
        };
        let name = self.session.world().name(actor)?.to_string();
        action(self, actor, &name)
    }

    fn snapshot_target(&self, arg: &str) -> Option<PathBuf> {
        if arg.is_empty() {
            self.snapshot_path.clone()
        } else {
            Some(PathBuf::from(arg))
        }
    }

    /// Prints an error to stderr.
    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mWayfarer v{}\x1b[0m", env!("CARGO_PKG_VERSION"));
        println!("Type :help for meta commands, :as NAME to start playing. Ctrl+D exits.\n");
        let _ = io::stdout().flush();
    }
}
