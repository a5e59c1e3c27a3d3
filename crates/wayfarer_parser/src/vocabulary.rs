//! Verb vocabulary.
//!
//! Maps input words to actions. A word is looked up as an exact verb name,
//! then as an exact alias, then as a prefix of a verb name in registration
//! order, so registering common verbs first gives them the short forms.

/// A registered verb.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerbEntry<A> {
    /// Canonical name.
    pub name: String,
    /// Alternative words that map to this verb exactly.
    pub aliases: Vec<String>,
    /// What the verb does.
    pub action: A,
}

/// Verb table with aliases and prefix lookup.
#[derive(Clone, Debug)]
pub struct Vocabulary<A> {
    verbs: Vec<VerbEntry<A>>,
}

impl<A> Default for Vocabulary<A> {
    fn default() -> Self {
        Self { verbs: Vec::new() }
    }
}

impl<A> Vocabulary<A> {
    /// Creates an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a verb. A verb with the same name is replaced in place.
    pub fn register(&mut self, name: &str, aliases: &[&str], action: A) {
        let entry = VerbEntry {
            name: name.to_lowercase(),
            aliases: aliases.iter().map(|alias| alias.to_lowercase()).collect(),
            action,
        };
        match self.verbs.iter_mut().find(|verb| verb.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.verbs.push(entry),
        }
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, name: &str, aliases: &[&str], action: A) -> Self {
        self.register(name, aliases, action);
        self
    }

    /// Looks up a word.
    #[must_use]
    pub fn lookup(&self, word: &str) -> Option<&VerbEntry<A>> {
        let word = word.to_lowercase();
        if word.is_empty() {
            return None;
        }
        self.verbs
            .iter()
            .find(|verb| verb.name == word)
            .or_else(|| {
                self.verbs
                    .iter()
                    .find(|verb| verb.aliases.iter().any(|alias| *alias == word))
            })
            .or_else(|| self.verbs.iter().find(|verb| verb.name.starts_with(&word)))
    }

    /// Registered verbs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &VerbEntry<A>> {
        self.verbs.iter()
    }

    /// Number of verbs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Returns true if no verbs are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }
}

/// Compass and vertical directions with their abbreviations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// n
    North,
    /// s
    South,
    /// e
    East,
    /// w
    West,
    /// ne
    Northeast,
    /// nw
    Northwest,
    /// se
    Southeast,
    /// sw
    Southwest,
    /// u
    Up,
    /// d
    Down,
}

impl Direction {
    /// Every direction, cardinal ones first.
    pub const ALL: [Self; 10] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::Up,
        Self::Down,
        Self::Northeast,
        Self::Northwest,
        Self::Southeast,
        Self::Southwest,
    ];

    /// Full lowercase name, as used for exit directions.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Northeast => "northeast",
            Self::Northwest => "northwest",
            Self::Southeast => "southeast",
            Self::Southwest => "southwest",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Short form.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::South => "s",
            Self::East => "e",
            Self::West => "w",
            Self::Northeast => "ne",
            Self::Northwest => "nw",
            Self::Southeast => "se",
            Self::Southwest => "sw",
            Self::Up => "u",
            Self::Down => "d",
        }
    }

    /// The direction leading back.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::Northeast => Self::Southwest,
            Self::Northwest => Self::Southeast,
            Self::Southeast => Self::Northwest,
            Self::Southwest => Self::Northeast,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Parses a full name or abbreviation, ignoring case.
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        let word = word.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|direction| direction.name() == word || direction.abbreviation() == word)
    }
}
