//! Win conditions and scoring.
//!
//! The session marks eliminations and then calls into this module to:
//! - Score the elimination (survival reward, elimination penalty)
//! - Decide whether a side has won
//! - Pay the winning side's bonus
//!
//! Nothing here touches the screen flow.

pub mod engine;

pub use engine::{award_victory, check_win_condition, score_elimination, AliveCounts, Winner};
