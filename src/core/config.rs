//! Game configuration types.
//!
//! - `Settings`: how many of each role to deal, chosen before every game
//! - `ScoringRules`: point rewards and penalties applied during play
//!
//! Both are plain serde structs with `Default` and `with_*` builders.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::SetupError;
use super::player::Role;

/// Role counts chosen at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Civilians to deal (at least 1).
    pub num_civilians: usize,

    /// Undercovers to deal (at least 1).
    pub num_undercovers: usize,

    /// Deal a single Mr. White as well.
    pub include_mr_white: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            num_civilians: 4,
            num_undercovers: 1,
            include_mr_white: false,
        }
    }
}

impl Settings {
    /// Create settings with explicit role counts.
    #[must_use]
    pub fn new(num_civilians: usize, num_undercovers: usize, include_mr_white: bool) -> Self {
        Self {
            num_civilians,
            num_undercovers,
            include_mr_white,
        }
    }

    #[must_use]
    pub fn with_civilians(mut self, count: usize) -> Self {
        self.num_civilians = count;
        self
    }

    #[must_use]
    pub fn with_undercovers(mut self, count: usize) -> Self {
        self.num_undercovers = count;
        self
    }

    #[must_use]
    pub fn with_mr_white(mut self, include: bool) -> Self {
        self.include_mr_white = include;
        self
    }

    /// Total roles these settings deal.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.num_civilians + self.num_undercovers + usize::from(self.include_mr_white)
    }

    /// Check the role counts on their own.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.num_civilians == 0 {
            return Err(SetupError::NoCivilians);
        }
        if self.num_undercovers == 0 {
            return Err(SetupError::NoUndercovers);
        }
        Ok(())
    }

    /// Check the role counts against a roster size.
    pub fn validate_for(&self, player_count: usize) -> Result<(), SetupError> {
        self.validate()?;
        if player_count < self.role_count() {
            return Err(SetupError::NotEnoughPlayers {
                names: player_count,
                roles: self.role_count(),
            });
        }
        Ok(())
    }

    /// Build the unshuffled role multiset for `player_count` seats.
    ///
    /// Seats beyond `role_count()` are dealt as Civilians so every player
    /// holds exactly one role.
    #[must_use]
    pub fn role_deck(&self, player_count: usize) -> SmallVec<[Role; 16]> {
        let civilians = self.num_civilians + player_count.saturating_sub(self.role_count());
        let mut deck = SmallVec::with_capacity(player_count.max(self.role_count()));
        deck.extend(std::iter::repeat(Role::Civilian).take(civilians));
        deck.extend(std::iter::repeat(Role::Undercover).take(self.num_undercovers));
        if self.include_mr_white {
            deck.push(Role::MrWhite);
        }
        deck
    }
}

/// Point values used when resolving eliminations and wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Awarded to every alive Undercover after each elimination.
    pub survival_reward: i64,

    /// Deducted from the player who was just eliminated.
    pub elimination_penalty: i64,

    /// Awarded to every Civilian when Civilians win.
    pub civilian_bonus: i64,

    /// Awarded to every Undercover when Undercovers win.
    pub undercover_bonus: i64,

    /// Awarded to Mr. White when Mr. White wins.
    pub mr_white_bonus: i64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            survival_reward: 1,
            elimination_penalty: 1,
            civilian_bonus: 3,
            undercover_bonus: 3,
            mr_white_bonus: 5,
        }
    }
}

impl ScoringRules {
    #[must_use]
    pub fn with_survival_reward(mut self, points: i64) -> Self {
        self.survival_reward = points;
        self
    }

    #[must_use]
    pub fn with_elimination_penalty(mut self, points: i64) -> Self {
        self.elimination_penalty = points;
        self
    }

    #[must_use]
    pub fn with_civilian_bonus(mut self, points: i64) -> Self {
        self.civilian_bonus = points;
        self
    }

    #[must_use]
    pub fn with_undercover_bonus(mut self, points: i64) -> Self {
        self.undercover_bonus = points;
        self
    }

    #[must_use]
    pub fn with_mr_white_bonus(mut self, points: i64) -> Self {
        self.mr_white_bonus = points;
        self
    }

    /// Bonus for every member of the winning side holding `role`.
    #[must_use]
    pub fn bonus_for(&self, role: Role) -> i64 {
        match role {
            Role::Civilian => self.civilian_bonus,
            Role::Undercover => self.undercover_bonus,
            Role::MrWhite => self.mr_white_bonus,
        }
    }
}
