//! User intents and elimination history.
//!
//! An [`Intent`] is one thing the person holding the device asked for:
//! submit the setup form, flip to the next reveal card, eliminate a player,
//! start over. The presentation layer builds intents and hands them to
//! [`Session::dispatch`](crate::core::Session::dispatch); it never mutates
//! session fields directly.
//!
//! ```
//! use undercover::core::{Intent, Session, Settings};
//!
//! let mut session = Session::seeded(1);
//! let names = ["Ana", "Bo", "Cy"].map(String::from).to_vec();
//! session
//!     .dispatch(Intent::StartGame { names, settings: Settings::new(2, 1, false) })
//!     .unwrap();
//! assert_eq!(session.players().len(), 3);
//! ```

use serde::{Deserialize, Serialize};

use super::config::Settings;
use super::player::Role;

/// A user action forwarded by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Submit the setup form.
    StartGame { names: Vec<String>, settings: Settings },

    /// Hand the device to the next player during the reveal.
    AdvanceReveal,

    /// Leave the clue order screen for the elimination screen.
    BeginElimination,

    /// Remove a player chosen by the group.
    Eliminate { name: String },

    /// Continue after results, with the same roster or a fresh one.
    PlayAgain { keep_roster: bool },
}

/// One elimination, kept for the results screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminationRecord {
    /// Round in which the player was eliminated.
    pub round: u32,

    /// Who was eliminated.
    pub name: String,

    /// Their role, revealed once eliminated.
    pub role: Role,
}
