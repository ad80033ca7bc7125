//! Core types: players, settings, word catalog, RNG, errors, session.
//!
//! The session in `state` is the only stateful piece. Everything else here
//! is data it owns or helpers it calls.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;
pub mod words;

pub use action::{EliminationRecord, Intent};
pub use config::{ScoringRules, Settings};
pub use error::{CatalogError, GameError, SetupError};
pub use player::{parse_roster, Player, Role};
pub use rng::GameRng;
pub use state::{validate_roster, RevealCard, Screen, ScreenKind, Session, MR_WHITE_NOTICE};
pub use words::{WordAssignment, WordCatalog, WordPair};
