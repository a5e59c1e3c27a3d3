//! Runtime configuration.

use std::path::PathBuf;

use wayfarer_storage::DEFAULT_INVENTORY_CAPACITY;

/// Settings for a REPL run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Prompt shown before each line.
    pub prompt: String,

    /// Whether to print the welcome banner.
    pub show_banner: bool,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Carry capacity given to demo characters.
    pub inventory_capacity: usize,

    /// Snapshot to load at startup, and the default target of `:save`.
    pub snapshot_path: Option<PathBuf>,

    /// Character to connect and play as at startup.
    pub start_as: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            show_banner: true,
            log_filter: "warn".to_string(),
            inventory_capacity: DEFAULT_INVENTORY_CAPACITY,
            snapshot_path: None,
            start_as: None,
        }
    }
}

impl RuntimeConfig {
    /// Creates a configuration for scripted runs: no banner, no prompt.
    #[must_use]
    pub fn batch() -> Self {
        Self {
            prompt: String::new(),
            show_banner: false,
            ..Self::default()
        }
    }

    /// Creates a configuration that logs engine internals.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            log_filter: "wayfarer_engine=debug,wayfarer_runtime=debug,info".to_string(),
            ..Self::default()
        }
    }

    /// Builder method to set the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Builder method to show or hide the banner.
    #[must_use]
    pub fn with_banner(mut self, show: bool) -> Self {
        self.show_banner = show;
        self
    }

    /// Builder method to set the log filter.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Builder method to set the inventory capacity.
    #[must_use]
    pub fn with_inventory_capacity(mut self, capacity: usize) -> Self {
        self.inventory_capacity = capacity;
        self
    }

    /// Builder method to set the snapshot path.
    #[must_use]
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Builder method to set the starting character.
    #[must_use]
    pub fn with_start_as(mut self, name: impl Into<String>) -> Self {
        self.start_as = Some(name.into());
        self
    }
}
