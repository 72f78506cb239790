//! The command table.

use std::fmt;

/// A recognised command verb.
///
/// Matching is case-sensitive: `say` is a verb, `Say` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Say,
    Look,
    Go,
    Equip,
    Inventory,
    Help,
}

impl Verb {
    /// Every verb, in help-listing order.
    pub const ALL: [Verb; 6] = [
        Verb::Say,
        Verb::Look,
        Verb::Go,
        Verb::Equip,
        Verb::Inventory,
        Verb::Help,
    ];

    /// Looks a typed verb up in the alias table.
    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.aliases().contains(&word))
    }

    /// The spellings that select this verb. The first is canonical.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Say => &["say", "/"],
            Self::Look => &["look", "l", "ls"],
            Self::Go => &["go", "g"],
            Self::Equip => &["equip", "e"],
            Self::Inventory => &["inventory", "i"],
            Self::Help => &["commands", "help"],
        }
    }

    /// The canonical spelling.
    pub fn name(self) -> &'static str {
        self.aliases()[0]
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The static text sent in reply to `commands`/`help`.
pub const HELP_LINES: [&str; 7] = [
    "Commands:",
    "  say(/) <message>    - Says something out loud, e.g. 'say Hello'",
    "  look(l, ls) [item]  - Examines the surroundings, e.g. 'look'",
    "  go(g) <exit>        - Moves through the exit specified, e.g. 'go outside'",
    "  equip(e) <item>     - Equips an item found in the room, e.g. 'equip plunger'",
    "  inventory(i)        - Shows what you are carrying",
    "  commands(help)      - Shows this list",
];
