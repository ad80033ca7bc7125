//! The game session state machine.
//!
//! ## Screens
//!
//! ```text
//! Setup → RevealWord (once per alive player) → ClueOrder → Elimination
//!                                                 ↑            │
//!                                                 └─ next round┤
//!                                                              ↓
//!                         Setup ← (new roster) ─── Results ────┘
//!                   RevealWord ← (same roster) ─┘
//! ```
//!
//! The reveal sequence only runs in round 1 of a game; later rounds go
//! straight from an elimination back to the clue order.
//!
//! ## Session
//!
//! A single object owns the roster, settings, round counter, clue order,
//! word bookkeeping and RNG. Transitions go through [`Session::dispatch`]
//! or the typed methods it forwards to. Every transition either succeeds
//! or returns an error with the session untouched.
//!
//! The roster and clue order are `im` vectors, so [`Session::step`] can
//! return a new session without copying the roster.

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use super::action::{EliminationRecord, Intent};
use super::config::{ScoringRules, Settings};
use super::error::{GameError, SetupError};
use super::player::{Player, Role};
use super::rng::GameRng;
use super::words::{WordAssignment, WordCatalog};
use crate::rules::{self, Winner};

/// Notice shown to Mr. White instead of a word.
pub const MR_WHITE_NOTICE: &str = "You have no word. Improvise!";

/// The screen the presentation layer should render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    /// Collecting names and role counts.
    Setup,

    /// Showing the `index`-th alive player their role and word.
    RevealWord { index: usize },

    /// Showing who gives clues in which order.
    ClueOrder,

    /// Choosing a player to eliminate.
    Elimination,

    /// Game over.
    Results { winner: Winner },
}

impl Screen {
    #[must_use]
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Setup => ScreenKind::Setup,
            Screen::RevealWord { .. } => ScreenKind::RevealWord,
            Screen::ClueOrder => ScreenKind::ClueOrder,
            Screen::Elimination => ScreenKind::Elimination,
            Screen::Results { .. } => ScreenKind::Results,
        }
    }
}

/// Payload-free screen tag, used in error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    Setup,
    RevealWord,
    ClueOrder,
    Elimination,
    Results,
}

impl std::fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenKind::Setup => write!(f, "setup"),
            ScreenKind::RevealWord => write!(f, "word reveal"),
            ScreenKind::ClueOrder => write!(f, "clue order"),
            ScreenKind::Elimination => write!(f, "elimination"),
            ScreenKind::Results => write!(f, "results"),
        }
    }
}

/// What the current holder of the device gets to see.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealCard<'a> {
    pub name: &'a str,
    pub role: Role,
    /// `None` for Mr. White.
    pub word: Option<&'a str>,
    /// 0-based step in the reveal sequence.
    pub position: usize,
    /// Alive players being revealed.
    pub total: usize,
}

impl RevealCard<'_> {
    /// Line shown under the role: the word, or Mr. White's notice.
    #[must_use]
    pub fn message(&self) -> String {
        match self.word {
            Some(word) => format!("Your word: {word}"),
            None => MR_WHITE_NOTICE.to_string(),
        }
    }

    /// Whether advancing from this card ends the reveal.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position + 1 >= self.total
    }
}

/// A local pass-the-device game session.
#[derive(Clone, Debug, Serialize)]
pub struct Session {
    screen: Screen,
    players: Vector<Player>,
    settings: Settings,
    scoring: ScoringRules,
    round: u32,
    clue_order: Vector<String>,
    used_pairs: FxHashSet<usize>,
    winner: Option<Winner>,
    words: Option<WordAssignment>,
    eliminations: Vector<EliminationRecord>,
    #[serde(skip)]
    catalog: WordCatalog,
    #[serde(skip)]
    rng: GameRng,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(WordCatalog::builtin(), GameRng::from_entropy())
    }
}

impl Session {
    /// Create a session on the setup screen.
    #[must_use]
    pub fn new(catalog: WordCatalog, rng: GameRng) -> Self {
        Self {
            screen: Screen::Setup,
            players: Vector::new(),
            settings: Settings::default(),
            scoring: ScoringRules::default(),
            round: 1,
            clue_order: Vector::new(),
            used_pairs: FxHashSet::default(),
            winner: None,
            words: None,
            eliminations: Vector::new(),
            catalog,
            rng,
        }
    }

    /// Built-in catalog with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(WordCatalog::builtin(), GameRng::new(seed))
    }

    /// Replace the scoring rules.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringRules) -> Self {
        self.scoring = scoring;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Roster in seat order, eliminated players included.
    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive())
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn scoring(&self) -> &ScoringRules {
        &self.scoring
    }

    /// Current round (starts at 1).
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Names in this round's clue-giving order.
    #[must_use]
    pub fn clue_order(&self) -> &Vector<String> {
        &self.clue_order
    }

    #[must_use]
    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    /// Words dealt for the current game.
    #[must_use]
    pub fn words(&self) -> Option<&WordAssignment> {
        self.words.as_ref()
    }

    /// Catalog indices already dealt since the last reshuffle.
    #[must_use]
    pub fn used_pairs(&self) -> &FxHashSet<usize> {
        &self.used_pairs
    }

    #[must_use]
    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn eliminations(&self) -> &Vector<EliminationRecord> {
        &self.eliminations
    }

    /// Players by points, highest first. Ties keep seat order.
    #[must_use]
    pub fn standings(&self) -> Vec<&Player> {
        let mut standings: Vec<&Player> = self.players.iter().collect();
        standings.sort_by(|a, b| b.points.cmp(&a.points));
        standings
    }

    /// The card for the current reveal step, if revealing.
    #[must_use]
    pub fn reveal_card(&self) -> Option<RevealCard<'_>> {
        let Screen::RevealWord { index } = self.screen else {
            return None;
        };
        let total = self.alive_players().count();
        let player = self.alive_players().nth(index)?;
        Some(RevealCard {
            name: &player.name,
            role: player.role,
            word: player.word(),
            position: index,
            total,
        })
    }

    // === Transitions ===

    /// Apply an intent in place.
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), GameError> {
        match intent {
            Intent::StartGame { names, settings } => self.start_game(names, settings),
            Intent::AdvanceReveal => self.advance_reveal(),
            Intent::BeginElimination => self.begin_elimination(),
            Intent::Eliminate { name } => self.eliminate(&name).map(|_| ()),
            Intent::PlayAgain { keep_roster } => self.play_again(keep_roster),
        }
    }

    /// Apply an intent to a copy and return the next session.
    pub fn step(&self, intent: Intent) -> Result<Session, GameError> {
        let mut next = self.clone();
        next.dispatch(intent)?;
        Ok(next)
    }

    /// Submit the setup form: validate, deal roles and words, start the
    /// reveal.
    ///
    /// Names are trimmed before validation. Points carry over for names
    /// already seated in this session.
    pub fn start_game<I, S>(&mut self, names: I, settings: Settings) -> Result<(), GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expect_screen(ScreenKind::Setup, "start a game")?;
        let names: Vec<String> = names
            .into_iter()
            .map(|name| Into::<String>::into(name).trim().to_string())
            .collect();
        validate_roster(&names, &settings)?;
        self.deal(names, settings);
        Ok(())
    }

    /// Move to the next reveal card, or on to the clue order after the last.
    pub fn advance_reveal(&mut self) -> Result<(), GameError> {
        let Screen::RevealWord { index } = self.screen else {
            return Err(self.invalid("advance the reveal"));
        };
        let alive = self.alive_players().count();
        self.screen = if index + 1 < alive {
            Screen::RevealWord { index: index + 1 }
        } else {
            Screen::ClueOrder
        };
        tracing::debug!(step = index, alive, "reveal advanced");
        Ok(())
    }

    /// Leave the clue order screen for elimination.
    pub fn begin_elimination(&mut self) -> Result<(), GameError> {
        self.expect_screen(ScreenKind::ClueOrder, "begin elimination")?;
        self.screen = Screen::Elimination;
        Ok(())
    }

    /// Eliminate a player, score the round and check for a winner.
    ///
    /// Accepted from the clue order and elimination screens. Returns the
    /// winner when this elimination ends the game.
    pub fn eliminate(&mut self, name: &str) -> Result<Option<Winner>, GameError> {
        if !matches!(self.screen, Screen::ClueOrder | Screen::Elimination) {
            return Err(self.invalid("eliminate a player"));
        }
        let index = self
            .players
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))?;
        if self.players[index].eliminated {
            return Err(GameError::AlreadyEliminated(name.to_string()));
        }

        let role = {
            let player = &mut self.players[index];
            player.eliminated = true;
            player.role
        };
        rules::score_elimination(self.players.iter_mut(), name, &self.scoring);
        self.eliminations.push_back(EliminationRecord {
            round: self.round,
            name: name.to_string(),
            role,
        });
        tracing::info!(round = self.round, player = name, %role, "player eliminated");

        match rules::check_win_condition(self.players.iter()) {
            Some(winner) => {
                rules::award_victory(self.players.iter_mut(), winner, &self.scoring);
                self.winner = Some(winner);
                self.screen = Screen::Results { winner };
                tracing::info!(round = self.round, %winner, "game over");
                Ok(Some(winner))
            }
            None => {
                self.round += 1;
                self.shuffle_clue_order();
                self.screen = Screen::ClueOrder;
                Ok(None)
            }
        }
    }

    /// Leave the results screen.
    ///
    /// With `keep_roster` the same names and settings are dealt again and
    /// scores carry forward. Without it the session returns to setup with
    /// scores cleared; used word pairs are remembered either way.
    pub fn play_again(&mut self, keep_roster: bool) -> Result<(), GameError> {
        self.expect_screen(ScreenKind::Results, "play again")?;
        if keep_roster {
            let names: Vec<String> = self.players.iter().map(|p| p.name.clone()).collect();
            self.deal(names, self.settings);
        } else {
            self.reset_to_setup();
        }
        Ok(())
    }

    // === Internals ===

    fn deal(&mut self, names: Vec<String>, settings: Settings) {
        let carried: FxHashMap<String, i64> = self
            .players
            .iter()
            .map(|p| (p.name.clone(), p.points))
            .collect();

        let words = self.catalog.draw(&mut self.used_pairs, &mut self.rng);
        let mut deck = settings.role_deck(names.len());
        self.rng.shuffle(&mut deck);

        self.players = names
            .into_iter()
            .zip(deck)
            .map(|(name, role)| {
                let points = carried.get(&name).copied().unwrap_or(0);
                Player::new(name, role, words.word_for(role), points)
            })
            .collect();

        self.settings = settings;
        self.round = 1;
        self.winner = None;
        self.words = Some(words);
        self.eliminations = Vector::new();
        self.shuffle_clue_order();
        self.screen = Screen::RevealWord { index: 0 };

        tracing::info!(
            players = self.players.len(),
            civilians = settings.num_civilians,
            undercovers = settings.num_undercovers,
            mr_white = settings.include_mr_white,
            "game started"
        );
    }

    fn reset_to_setup(&mut self) {
        self.screen = Screen::Setup;
        self.players = Vector::new();
        self.settings = Settings::default();
        self.round = 1;
        self.clue_order = Vector::new();
        self.winner = None;
        self.words = None;
        self.eliminations = Vector::new();
        tracing::info!(used_pairs = self.used_pairs.len(), "session reset to setup");
    }

    fn shuffle_clue_order(&mut self) {
        let mut order: Vec<String> = self.alive_players().map(|p| p.name.clone()).collect();
        self.rng.shuffle(&mut order);
        self.clue_order = order.into_iter().collect();
    }

    fn expect_screen(&self, expected: ScreenKind, action: &'static str) -> Result<(), GameError> {
        if self.screen.kind() == expected {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> GameError {
        GameError::InvalidTransition {
            action,
            screen: self.screen.kind(),
        }
    }
}

/// Check a roster against the settings before anything is dealt.
///
/// Names that differ only in surrounding whitespace count as duplicates.
pub fn validate_roster(names: &[String], settings: &Settings) -> Result<(), SetupError> {
    if names.is_empty() {
        return Err(SetupError::EmptyRoster);
    }
    let mut seen = FxHashSet::default();
    for (position, name) in names.iter().map(|n| n.trim()).enumerate() {
        if name.is_empty() {
            return Err(SetupError::BlankName(position));
        }
        if !seen.insert(name) {
            return Err(SetupError::DuplicateName(name.to_string()));
        }
    }
    settings.validate_for(names.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("p{i}")).collect()
    }

    fn started(n: usize, settings: Settings) -> Session {
        let mut session = Session::seeded(42);
        session.start_game(roster(n), settings).unwrap();
        session
    }

    fn name_with(session: &Session, role: Role) -> String {
        session
            .alive_players()
            .find(|p| p.role == role)
            .map(|p| p.name.clone())
            .unwrap()
    }

    #[test]
    fn test_new_session_is_on_setup() {
        let session = Session::seeded(1);
        assert_eq!(session.screen(), Screen::Setup);
        assert!(session.players().is_empty());
        assert_eq!(session.round(), 1);
        assert!(session.reveal_card().is_none());
    }

    #[test]
    fn test_start_game_deals_everyone() {
        let session = started(4, Settings::new(2, 1, true));

        assert_eq!(session.players().len(), 4);
        assert_eq!(session.screen(), Screen::RevealWord { index: 0 });
        assert_eq!(session.clue_order().len(), 4);
        assert!(session.words().is_some());
        assert_eq!(session.used_pairs().len(), 1);
        assert!(session.players().iter().all(|p| p.is_alive() && p.points == 0));
    }

    #[test]
    fn test_words_match_roles() {
        let session = started(5, Settings::new(2, 2, true));
        let words = session.words().unwrap();

        for player in session.players() {
            assert_eq!(player.word, words.word_for(player.role));
        }
    }

    #[test]
    fn test_failed_start_leaves_session_untouched() {
        let mut session = Session::seeded(1);
        let result = session.start_game(roster(3), Settings::new(3, 1, false));

        assert_eq!(
            result,
            Err(GameError::Setup(SetupError::NotEnoughPlayers { names: 3, roles: 4 }))
        );
        assert_eq!(session.screen(), Screen::Setup);
        assert!(session.players().is_empty());
        assert!(session.used_pairs().is_empty());
    }

    #[test]
    fn test_roster_validation() {
        let settings = Settings::new(1, 1, false);
        let names = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert_eq!(validate_roster(&[], &settings), Err(SetupError::EmptyRoster));
        assert_eq!(validate_roster(&names(&["a", " "]), &settings), Err(SetupError::BlankName(1)));
        assert_eq!(
            validate_roster(&names(&["a", "b", "a"]), &settings),
            Err(SetupError::DuplicateName("a".into()))
        );
        assert_eq!(
            validate_roster(&names(&["a", "b"]), &Settings::new(0, 1, false)),
            Err(SetupError::NoCivilians)
        );
        assert!(validate_roster(&names(&["a", "b"]), &settings).is_ok());
    }

    #[test]
    fn test_names_differing_by_whitespace_are_duplicates() {
        let settings = Settings::new(1, 1, false);
        let names = vec!["Ana".to_string(), "Ana ".to_string()];
        assert_eq!(
            validate_roster(&names, &settings),
            Err(SetupError::DuplicateName("Ana".into()))
        );

        let mut session = Session::seeded(4);
        assert_eq!(
            session.start_game(["Ana", " Ana "], settings),
            Err(GameError::Setup(SetupError::DuplicateName("Ana".into())))
        );
        assert!(session.players().is_empty());
    }

    #[test]
    fn test_start_game_stores_trimmed_names() {
        let mut session = Session::seeded(4);
        session.start_game([" Ana", "Bo  "], Settings::new(1, 1, false)).unwrap();

        let seated: Vec<_> = session.players().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(seated, vec!["Ana", "Bo"]);
        assert!(session.player("Ana").is_some());
    }

    #[test]
    fn test_reveal_walks_alive_players_in_seat_order() {
        let mut session = started(3, Settings::new(2, 1, false));
        let mut seen = Vec::new();

        while let Some(card) = session.reveal_card() {
            assert_eq!(card.total, 3);
            seen.push(card.name.to_string());
            session.advance_reveal().unwrap();
        }

        assert_eq!(seen, vec!["p0", "p1", "p2"]);
        assert_eq!(session.screen(), Screen::ClueOrder);
    }

    #[test]
    fn test_mr_white_card_has_notice() {
        let mut session = started(3, Settings::new(1, 1, true));
        loop {
            let card = session.reveal_card().unwrap();
            if card.role == Role::MrWhite {
                assert_eq!(card.word, None);
                assert_eq!(card.message(), MR_WHITE_NOTICE);
                break;
            }
            assert!(card.message().starts_with("Your word: "));
            session.advance_reveal().unwrap();
        }
    }

    #[test]
    fn test_last_card_flag() {
        let mut session = started(2, Settings::new(1, 1, false));
        assert!(!session.reveal_card().unwrap().is_last());
        session.advance_reveal().unwrap();
        assert!(session.reveal_card().unwrap().is_last());
    }

    #[test]
    fn test_wrong_screen_is_rejected() {
        let mut session = Session::seeded(1);
        assert_eq!(
            session.advance_reveal(),
            Err(GameError::InvalidTransition {
                action: "advance the reveal",
                screen: ScreenKind::Setup,
            })
        );
        assert!(session.eliminate("anyone").is_err());
        assert!(session.play_again(true).is_err());
        assert!(session.begin_elimination().is_err());
    }

    #[test]
    fn test_eliminate_rejects_unknown_and_repeat() {
        let mut session = started(5, Settings::new(3, 2, false));
        while session.reveal_card().is_some() {
            session.advance_reveal().unwrap();
        }
        let civilian = name_with(&session, Role::Civilian);

        assert_eq!(session.eliminate("ghost"), Err(GameError::UnknownPlayer("ghost".into())));
        assert_eq!(session.eliminate(&civilian), Ok(None));
        assert_eq!(
            session.eliminate(&civilian),
            Err(GameError::AlreadyEliminated(civilian.clone()))
        );
    }

    #[test]
    fn test_next_round_skips_reveal() {
        let mut session = started(5, Settings::new(3, 2, false));
        while session.reveal_card().is_some() {
            session.advance_reveal().unwrap();
        }
        session.begin_elimination().unwrap();
        let civilian = name_with(&session, Role::Civilian);
        session.eliminate(&civilian).unwrap();

        assert_eq!(session.round(), 2);
        assert_eq!(session.screen(), Screen::ClueOrder);
        assert_eq!(session.clue_order().len(), 4);
        assert!(!session.clue_order().contains(&civilian));
        assert_eq!(session.eliminations().len(), 1);
        assert_eq!(session.eliminations()[0].role, Role::Civilian);
    }

    #[test]
    fn test_step_leaves_original_alone() {
        let session = Session::seeded(3);
        let next = session
            .step(Intent::StartGame {
                names: roster(3),
                settings: Settings::new(2, 1, false),
            })
            .unwrap();

        assert_eq!(session.screen(), Screen::Setup);
        assert_eq!(next.screen(), Screen::RevealWord { index: 0 });
        assert!(session.step(Intent::AdvanceReveal).is_err());
    }

    #[test]
    fn test_standings_order() {
        let mut session = started(3, Settings::new(2, 1, false));
        session.players[1].points = 5;
        session.players[2].points = 5;
        session.players[0].points = -1;

        let names: Vec<_> = session.standings().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["p1", "p2", "p0"]);
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = started(3, Settings::new(2, 1, false));
        let json = serde_json::to_value(&session).unwrap();

        assert_eq!(json["screen"]["screen"], "reveal_word");
        assert_eq!(json["screen"]["index"], 0);
        assert_eq!(json["players"].as_array().unwrap().len(), 3);
        assert_eq!(json["round"], 1);
        assert!(json.get("rng").is_none());
    }
}
