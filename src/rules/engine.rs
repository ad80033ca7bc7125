//! Win detection and point bookkeeping.
//!
//! Everything here is a pure function of the roster, so the session can
//! call it after marking an elimination and tests can call it on
//! hand-built rosters.

use serde::{Deserialize, Serialize};

use crate::core::config::ScoringRules;
use crate::core::player::{Player, Role};

/// The side that won a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Civilians,
    Undercovers,
    MrWhite,
}

impl Winner {
    /// The role whose holders share this victory.
    #[must_use]
    pub const fn role(self) -> Role {
        match self {
            Winner::Civilians => Role::Civilian,
            Winner::Undercovers => Role::Undercover,
            Winner::MrWhite => Role::MrWhite,
        }
    }

    /// Check if a player is on the winning side.
    ///
    /// Eliminated players still share their side's victory.
    #[must_use]
    pub fn is_winner(self, player: &Player) -> bool {
        player.role == self.role()
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Civilians => write!(f, "Civilians"),
            Winner::Undercovers => write!(f, "Undercovers"),
            Winner::MrWhite => write!(f, "Mr. White"),
        }
    }
}

/// Alive players per role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AliveCounts {
    pub civilians: usize,
    pub undercovers: usize,
    pub mr_white: usize,
}

impl AliveCounts {
    pub fn tally<'a>(players: impl IntoIterator<Item = &'a Player>) -> Self {
        let mut counts = Self::default();
        for player in players.into_iter().filter(|p| p.is_alive()) {
            match player.role {
                Role::Civilian => counts.civilians += 1,
                Role::Undercover => counts.undercovers += 1,
                Role::MrWhite => counts.mr_white += 1,
            }
        }
        counts
    }

    /// Decide the game from these counts.
    ///
    /// Undercovers are checked before Mr. White, so when both could claim
    /// the win the Undercovers take it.
    #[must_use]
    pub fn winner(&self) -> Option<Winner> {
        let Self {
            civilians,
            undercovers,
            mr_white,
        } = *self;

        if undercovers == 0 && mr_white == 0 {
            Some(Winner::Civilians)
        } else if undercovers > 0 && civilians + mr_white <= 1 {
            Some(Winner::Undercovers)
        } else if mr_white > 0 && civilians + undercovers <= 1 {
            Some(Winner::MrWhite)
        } else {
            None
        }
    }
}

/// Check if the game is over.
///
/// Returns `Some(winner)` if a side has won, `None` if play continues.
pub fn check_win_condition<'a>(players: impl IntoIterator<Item = &'a Player>) -> Option<Winner> {
    AliveCounts::tally(players).winner()
}

/// Score an elimination that has already been marked on the roster.
///
/// Every alive Undercover gains the survival reward and the eliminated
/// player pays the penalty. There is no floor on scores.
pub fn score_elimination<'a>(
    players: impl IntoIterator<Item = &'a mut Player>,
    eliminated: &str,
    rules: &ScoringRules,
) {
    for player in players {
        if player.role == Role::Undercover && player.is_alive() {
            player.points += rules.survival_reward;
        }
        if player.name == eliminated {
            player.points -= rules.elimination_penalty;
        }
    }
}

/// Pay the winning side's bonus to every member, eliminated or not.
pub fn award_victory<'a>(players: impl IntoIterator<Item = &'a mut Player>, winner: Winner, rules: &ScoringRules) {
    let bonus = rules.bonus_for(winner.role());
    for player in players.into_iter().filter(|p| winner.is_winner(p)) {
        player.points += bonus;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, role: Role, eliminated: bool) -> Player {
        let mut p = Player::new(name, role, "w", 0);
        p.eliminated = eliminated;
        p
    }

    #[test]
    fn test_undercovers_win_with_mr_white_out() {
        let roster = [
            player("a", Role::Civilian, false),
            player("b", Role::Undercover, false),
            player("c", Role::MrWhite, true),
        ];
        assert_eq!(check_win_condition(&roster), Some(Winner::Undercovers));
    }

    #[test]
    fn test_civilians_win_when_impostors_gone() {
        let roster = [
            player("a", Role::Civilian, false),
            player("b", Role::Civilian, true),
            player("c", Role::Undercover, true),
            player("d", Role::MrWhite, true),
        ];
        assert_eq!(check_win_condition(&roster), Some(Winner::Civilians));
    }

    #[test]
    fn test_no_winner_with_full_table() {
        let roster = [
            player("a", Role::Civilian, false),
            player("b", Role::Civilian, false),
            player("c", Role::Undercover, false),
            player("d", Role::Undercover, false),
            player("e", Role::MrWhite, false),
        ];
        assert_eq!(check_win_condition(&roster), None);
    }

    #[test]
    fn test_mr_white_wins_head_to_head() {
        let roster = [
            player("a", Role::Civilian, false),
            player("b", Role::Undercover, true),
            player("c", Role::MrWhite, false),
        ];
        assert_eq!(check_win_condition(&roster), Some(Winner::MrWhite));
    }

    #[test]
    fn test_undercover_takes_tie_over_mr_white() {
        // uc=1, mw=1, civ=0: both conditions hold.
        let counts = AliveCounts {
            civilians: 0,
            undercovers: 1,
            mr_white: 1,
        };
        assert_eq!(counts.winner(), Some(Winner::Undercovers));
    }

    #[test]
    fn test_tally_ignores_eliminated() {
        let roster = [
            player("a", Role::Civilian, false),
            player("b", Role::Civilian, true),
            player("c", Role::Undercover, false),
        ];
        let counts = AliveCounts::tally(&roster);
        assert_eq!(counts.civilians, 1);
        assert_eq!(counts.undercovers, 1);
        assert_eq!(counts.mr_white, 0);
    }

    #[test]
    fn test_score_elimination() {
        let mut roster = vec![
            player("a", Role::Civilian, true),
            player("b", Role::Undercover, false),
            player("c", Role::Undercover, true),
            player("d", Role::Civilian, false),
        ];
        score_elimination(&mut roster, "a", &ScoringRules::default());

        let points: Vec<_> = roster.iter().map(|p| p.points).collect();
        assert_eq!(points, vec![-1, 1, 0, 0]);
    }

    #[test]
    fn test_eliminated_undercover_gets_no_survival_reward() {
        let mut roster = vec![player("u", Role::Undercover, true), player("v", Role::Undercover, false)];
        score_elimination(&mut roster, "u", &ScoringRules::default());
        assert_eq!(roster[0].points, -1);
        assert_eq!(roster[1].points, 1);
    }

    #[test]
    fn test_award_victory_includes_eliminated() {
        let mut roster = vec![
            player("a", Role::Civilian, true),
            player("b", Role::Civilian, false),
            player("c", Role::Undercover, true),
        ];
        award_victory(&mut roster, Winner::Civilians, &ScoringRules::default());
        let points: Vec<_> = roster.iter().map(|p| p.points).collect();
        assert_eq!(points, vec![3, 3, 0]);

        award_victory(&mut roster, Winner::MrWhite, &ScoringRules::default());
        assert_eq!(roster.iter().map(|p| p.points).sum::<i64>(), 6);
    }

    #[test]
    fn test_winner_display() {
        assert_eq!(Winner::MrWhite.to_string(), "Mr. White");
        assert_eq!(Winner::Undercovers.role(), Role::Undercover);
    }
}
