//! Players and their hidden roles.
//!
//! ## Role
//!
//! The three roles dealt at the start of a game. Civilians share the
//! common word, Undercovers hold the paired alternate word and Mr. White
//! holds no word at all.
//!
//! ## Player
//!
//! One seat at the table. Names are the natural key: they are unique within
//! a session and are how scores carry across repeated games.

use serde::{Deserialize, Serialize};

/// Hidden role dealt to a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Civilian,
    Undercover,
    MrWhite,
}

impl Role {
    /// Whether this role is handed a word at reveal time.
    #[must_use]
    pub const fn has_word(self) -> bool {
        !matches!(self, Role::MrWhite)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Civilian => write!(f, "Civilian"),
            Role::Undercover => write!(f, "Undercover"),
            Role::MrWhite => write!(f, "Mr. White"),
        }
    }
}

/// A player seated in the current game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name, unique within the session.
    pub name: String,

    /// Role dealt for the current game.
    pub role: Role,

    /// Cumulative score across games in this session. May go negative.
    pub points: i64,

    /// Removed from active play this game.
    pub eliminated: bool,

    /// Secret word; empty for Mr. White.
    pub word: String,
}

impl Player {
    /// Create a fresh, alive player.
    pub fn new(name: impl Into<String>, role: Role, word: impl Into<String>, points: i64) -> Self {
        let word = if role.has_word() { word.into() } else { String::new() };
        Self {
            name: name.into(),
            role,
            points,
            eliminated: false,
            word,
        }
    }

    /// Still in play.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.eliminated
    }

    /// The player's word, or `None` for Mr. White.
    #[must_use]
    pub fn word(&self) -> Option<&str> {
        if self.word.is_empty() {
            None
        } else {
            Some(&self.word)
        }
    }
}

/// Split multi-line roster input into player names.
///
/// One name per line; surrounding whitespace is trimmed and blank lines are
/// dropped.
///
/// ```
/// use undercover::core::parse_roster;
///
/// let names = parse_roster("  Ana\n\nBo \n  \nCy");
/// assert_eq!(names, vec!["Ana", "Bo", "Cy"]);
/// ```
pub fn parse_roster(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
