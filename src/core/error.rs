//! Error types for session setup, word catalogs and transitions.

use super::state::ScreenKind;

/// Setup-blocking validation failures. Nothing is mutated when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// Fewer names than the configured roles need.
    #[error("Not enough player names for selected roles ({names} names, {roles} roles)")]
    NotEnoughPlayers { names: usize, roles: usize },

    #[error("no player names were given")]
    EmptyRoster,

    #[error("player name at position {0} is blank")]
    BlankName(usize),

    /// Names are the scoring key, so they must be unique.
    #[error("player name {0:?} appears more than once")]
    DuplicateName(String),

    #[error("at least one civilian is required")]
    NoCivilians,

    #[error("at least one undercover is required")]
    NoUndercovers,
}

/// Failures while loading or validating a word catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read word catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse word catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("word catalog is empty")]
    Empty,

    /// A pair with a blank word, or the same word on both sides.
    #[error("word pair {index} is malformed: {reason}")]
    MalformedPair { index: usize, reason: &'static str },
}

/// Errors returned by session transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    /// The intent is not accepted on the current screen.
    #[error("cannot {action} while on the {screen} screen")]
    InvalidTransition {
        action: &'static str,
        screen: ScreenKind,
    },

    #[error("no player named {0:?} in this game")]
    UnknownPlayer(String),

    #[error("player {0:?} is already eliminated")]
    AlreadyEliminated(String),
}
