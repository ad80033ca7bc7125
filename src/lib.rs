//! # undercover
//!
//! Headless engine for the Undercover party game, played on one device
//! passed around the table.
//!
//! ## How a game runs
//!
//! 1. **Setup**: names and role counts are submitted. Civilians share a
//!    word, Undercovers get the paired word, an optional Mr. White gets none.
//! 2. **Reveal**: each player in turn privately sees their role and word.
//! 3. **Clue order**: a random speaking order for the round.
//! 4. **Elimination**: the table removes one player. Surviving Undercovers
//!    score, the eliminated player loses a point, and the win condition is
//!    checked. If nobody has won, the next round starts at the clue order.
//! 5. **Results**: the winning side collects its bonus. Play again with the
//!    same roster (scores carry) or start over.
//!
//! ## Modules
//!
//! - `core`: players, settings, word catalog, RNG, errors and the `Session`
//! - `rules`: win detection and scoring
//!
//! ```
//! use undercover::{Role, Screen, Session, Settings};
//!
//! let mut session = Session::seeded(7);
//! session.start_game(["Ana", "Bo"], Settings::new(1, 1, false)).unwrap();
//! while session.reveal_card().is_some() {
//!     session.advance_reveal().unwrap();
//! }
//!
//! let civilian = session
//!     .players()
//!     .iter()
//!     .find(|p| p.role == Role::Civilian)
//!     .map(|p| p.name.clone())
//!     .unwrap();
//! session.eliminate(&civilian).unwrap();
//! assert!(matches!(session.screen(), Screen::Results { .. }));
//! ```

pub mod core;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    parse_roster, validate_roster, CatalogError, EliminationRecord, GameError, GameRng, Intent,
    Player, RevealCard, Role, ScoringRules, Screen, ScreenKind, Session, Settings, SetupError,
    WordAssignment, WordCatalog, WordPair, MR_WHITE_NOTICE,
};

pub use crate::rules::{check_win_condition, AliveCounts, Winner};
