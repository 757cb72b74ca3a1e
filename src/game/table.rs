//! The turn/settlement state machine.

use tracing::{debug, info, warn};

use crate::core::{
    GameConfig, GameError, GamePhase, Ledger, Roll, RollRecord, RoundState, Side,
};
use crate::rules::{Outcome, Resolution, RoundResult, RulesEngine, StandardRules};

use super::message;

/// Everything that happened as a result of one submitted roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollReport {
    /// The history entry appended for this roll.
    pub record: RollRecord,
    /// What the roll means.
    pub outcome: Outcome,
    /// What the roll did to the round.
    pub resolution: Resolution,
    /// Phase after the roll.
    pub phase: GamePhase,
    /// Status message after the roll.
    pub message: String,
}

impl RollReport {
    /// The round result, if this roll settled the round.
    #[must_use]
    pub fn result(&self) -> Option<RoundResult> {
        match self.resolution {
            Resolution::Settled(result) => Some(result),
            _ => None,
        }
    }
}

/// A single table: one player against the banker.
///
/// Owns the phase, both bankrolls and the current round. All mutation goes
/// through `start_game`, `submit_roll` and `new_game` (plus the wager
/// controls while betting).
#[derive(Clone, Debug)]
pub struct Game<R: RulesEngine = StandardRules> {
    config: GameConfig,
    rules: R,
    phase: GamePhase,
    ledger: Ledger,
    round: RoundState,
    /// Pending wager for the next round.
    wager: i64,
    current_roll: Roll,
    message: String,
    last_result: Option<RoundResult>,
}

impl Game<StandardRules> {
    /// Create a table with the standard rules.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rules(config, StandardRules)
    }
}

impl<R: RulesEngine> Game<R> {
    /// Create a table with custom rules.
    #[must_use]
    pub fn with_rules(config: GameConfig, rules: R) -> Self {
        let ledger = Ledger::new(config.starting_player_money, config.starting_banker_money);
        let wager = clamp_wager(config.default_bet, ledger.max_bet());
        Self {
            config,
            rules,
            phase: GamePhase::Betting,
            ledger,
            round: RoundState::new(0),
            wager,
            current_roll: Roll::default(),
            message: message::PLACE_BET.to_string(),
            last_result: None,
        }
    }

    // === Accessors ===

    /// The configuration this table was built from.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The current (or just-finished) round.
    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Pending wager for the next round.
    #[must_use]
    pub fn wager(&self) -> i64 {
        self.wager
    }

    /// Dice from the most recent roll (1-1-1 before the first).
    #[must_use]
    pub fn current_roll(&self) -> Roll {
        self.current_roll
    }

    /// Current status message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Result of the last settled round, cleared when a new round starts.
    #[must_use]
    pub fn last_result(&self) -> Option<RoundResult> {
        self.last_result
    }

    /// Largest bet both sides can cover.
    #[must_use]
    pub fn max_bet(&self) -> i64 {
        self.ledger.max_bet()
    }

    /// Whether any round can still be played.
    #[must_use]
    pub fn can_bet(&self) -> bool {
        self.max_bet() >= 1
    }

    /// The last `n` rolls of the round, newest first.
    pub fn recent_history(&self, n: usize) -> impl Iterator<Item = &RollRecord> {
        self.round.recent(n)
    }

    // === Triggers ===

    /// Start a round with `bet`.
    ///
    /// Fails with `InvalidBet` unless `1 <= bet <= min(player money, banker
    /// money)`. A rejected bet only replaces the message with the error text.
    pub fn start_game(&mut self, bet: i64) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Betting, "start a game")?;

        let max = self.max_bet();
        if bet < 1 || bet > max {
            warn!(bet, max, "rejected bet");
            let err = GameError::InvalidBet { bet, max };
            self.message = err.to_string();
            return Err(err);
        }

        self.round = RoundState::new(bet);
        self.wager = bet;
        self.last_result = None;
        self.phase = GamePhase::BankerRolling;
        self.message = message::BANKER_ROLLING.to_string();
        info!(bet, player = self.ledger.player_money, banker = self.ledger.banker_money, "round started");
        Ok(())
    }

    /// Start a round with the pending wager.
    pub fn start_round(&mut self) -> Result<(), GameError> {
        self.start_game(self.wager)
    }

    /// Apply a roll for whoever is due to roll.
    ///
    /// Only valid in `BankerRolling` and `PlayerRolling`.
    pub fn submit_roll(&mut self, roll: Roll) -> Result<RollReport, GameError> {
        let roller = self.phase.roller().ok_or(GameError::InvalidTransition {
            action: "submit a roll",
            phase: self.phase,
        })?;

        let outcome = self.rules.classify(&roll);
        let record = RollRecord::new(roll, outcome.description(), roller);
        self.round.record(record.clone());
        self.current_roll = roll;

        let resolution = self.rules.resolve(roller, &outcome, self.round.banker_point);
        debug!(%roller, dice = %roll, ?resolution, "roll resolved");

        if let (Side::Player, Some(point)) = (roller, outcome.point()) {
            self.round.player_point = Some(point);
        }

        match resolution {
            Resolution::Settled(result) => self.settle(result),
            Resolution::PointSet(point) => {
                self.round.banker_point = Some(point);
                self.phase = GamePhase::PlayerRolling;
            }
            Resolution::RollAgain => {}
        }

        self.message = message::roll_message(roller, &outcome, &resolution, self.round.banker_point);

        Ok(RollReport {
            record,
            outcome,
            resolution,
            phase: self.phase,
            message: self.message.clone(),
        })
    }

    /// Return to betting after a settled round. Balances carry over.
    pub fn new_game(&mut self) -> Result<(), GameError> {
        self.expect_phase(GamePhase::GameOver, "start a new game")?;

        self.round = RoundState::new(0);
        self.phase = GamePhase::Betting;
        self.message = message::PLACE_BET.to_string();
        self.wager = clamp_wager(self.wager, self.max_bet());
        info!(player = self.ledger.player_money, banker = self.ledger.banker_money, "new game");
        Ok(())
    }

    // === Wager controls ===

    /// Set the pending wager, clamped to `[1, max bet]`.
    pub fn set_bet(&mut self, amount: i64) -> Result<i64, GameError> {
        self.expect_phase(GamePhase::Betting, "change the bet")?;
        self.wager = amount.min(self.max_bet()).max(1);
        Ok(self.wager)
    }

    /// Raise the pending wager by one step, capped at the max bet.
    pub fn raise_bet(&mut self) -> Result<i64, GameError> {
        self.set_bet(self.wager.saturating_add(self.config.bet_step))
    }

    /// Lower the pending wager by one step, floored at 1.
    pub fn lower_bet(&mut self) -> Result<i64, GameError> {
        self.set_bet(self.wager.saturating_sub(self.config.bet_step))
    }

    // === Internals ===

    fn settle(&mut self, result: RoundResult) {
        let bet = self.round.bet;
        let total = self.ledger.total();
        if let RoundResult::Winner(winner) = result {
            self.ledger.settle(winner, bet);
        }
        debug_assert_eq!(total, self.ledger.total());

        self.phase = GamePhase::GameOver;
        self.last_result = Some(result);
        info!(
            ?result,
            bet,
            player = self.ledger.player_money,
            banker = self.ledger.banker_money,
            "round settled"
        );
    }

    fn expect_phase(&self, expected: GamePhase, action: &'static str) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::InvalidTransition {
                action,
                phase: self.phase,
            })
        }
    }
}

/// Cap a pending wager at the max bet, unless nothing can be bet at all.
fn clamp_wager(wager: i64, max: i64) -> i64 {
    if max >= 1 {
        wager.min(max)
    } else {
        wager
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(values: [u8; 3]) -> Roll {
        Roll::from_values(values).unwrap()
    }

    fn game() -> Game {
        Game::new(GameConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let game = game();
        assert_eq!(game.phase(), GamePhase::Betting);
        assert_eq!(*game.ledger(), Ledger::new(100, 200));
        assert_eq!(game.wager(), 10);
        assert_eq!(game.message(), "Place your bet and roll!");
        assert_eq!(game.current_roll(), Roll::default());
        assert!(game.round().history.is_empty());
    }

    #[test]
    fn test_start_game_validates_bet() {
        let mut game = game();

        assert_eq!(game.start_game(0), Err(GameError::InvalidBet { bet: 0, max: 100 }));
        assert_eq!(game.start_game(101), Err(GameError::InvalidBet { bet: 101, max: 100 }));
        assert_eq!(game.phase(), GamePhase::Betting);
        assert_eq!(*game.ledger(), Ledger::new(100, 200));
        assert_eq!(game.message(), "Maximum bet is $100 (limited by available funds)");

        game.start_game(100).unwrap();
        assert_eq!(game.phase(), GamePhase::BankerRolling);
        assert_eq!(game.round().bet, 100);
        assert_eq!(game.message(), "Banker is rolling...");
    }

    #[test]
    fn test_submit_roll_requires_rolling_phase() {
        let mut game = game();
        let err = game.submit_roll(roll([4, 5, 6])).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidTransition {
                action: "submit a roll",
                phase: GamePhase::Betting
            }
        );
        assert!(game.round().history.is_empty());
    }

    #[test]
    fn test_banker_point_then_player_loses() {
        let mut game = game();
        game.start_game(10).unwrap();

        let report = game.submit_roll(roll([2, 2, 5])).unwrap();
        assert_eq!(report.resolution, Resolution::PointSet(report.outcome.point().unwrap()));
        assert_eq!(game.phase(), GamePhase::PlayerRolling);
        assert_eq!(game.round().banker_point.map(|p| p.get()), Some(5));

        let report = game.submit_roll(roll([6, 6, 3])).unwrap();
        assert_eq!(report.result(), Some(RoundResult::Winner(Side::Banker)));
        assert_eq!(game.round().player_point.map(|p| p.get()), Some(3));
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(*game.ledger(), Ledger::new(90, 210));
        assert_eq!(game.message(), "You rolled Point 3 vs Banker's Point 5 - You lose!");
    }

    #[test]
    fn test_continue_keeps_phase() {
        let mut game = game();
        game.start_game(10).unwrap();

        let report = game.submit_roll(roll([2, 3, 5])).unwrap();
        assert_eq!(report.resolution, Resolution::RollAgain);
        assert_eq!(game.phase(), GamePhase::BankerRolling);
        assert_eq!(game.round().history.len(), 1);
        assert_eq!(*game.ledger(), Ledger::new(100, 200));
        assert_eq!(game.current_roll(), roll([2, 3, 5]));
    }

    #[test]
    fn test_new_game_keeps_balances() {
        let mut game = game();
        assert!(game.new_game().is_err());

        game.start_game(10).unwrap();
        game.submit_roll(roll([1, 2, 3])).unwrap();
        assert_eq!(game.last_result(), Some(RoundResult::Winner(Side::Player)));

        game.new_game().unwrap();
        assert_eq!(game.phase(), GamePhase::Betting);
        assert_eq!(*game.ledger(), Ledger::new(110, 190));
        assert!(game.round().history.is_empty());
        assert_eq!(game.round().banker_point, None);
        assert_eq!(game.message(), "Place your bet and roll!");
    }

    #[test]
    fn test_wager_controls() {
        let mut game = Game::new(GameConfig::default().with_balances(35, 200));

        assert_eq!(game.raise_bet(), Ok(20));
        assert_eq!(game.raise_bet(), Ok(30));
        assert_eq!(game.raise_bet(), Ok(35));
        assert_eq!(game.lower_bet(), Ok(25));
        assert_eq!(game.set_bet(-4), Ok(1));
        assert_eq!(game.lower_bet(), Ok(1));
        assert_eq!(game.set_bet(1_000), Ok(35));

        game.start_round().unwrap();
        assert_eq!(game.round().bet, 35);
        assert!(game.raise_bet().is_err());
    }

    #[test]
    fn test_bankrupt_table_cannot_start() {
        let mut game = Game::new(GameConfig::default().with_balances(10, 200));
        game.start_game(10).unwrap();
        game.submit_roll(roll([4, 5, 6])).unwrap();
        game.new_game().unwrap();

        assert_eq!(game.ledger().player_money, 0);
        assert!(!game.can_bet());
        assert_eq!(game.start_round(), Err(GameError::InvalidBet { bet: 10, max: 0 }));
    }

    #[test]
    fn test_oversized_default_bet_is_clamped() {
        let game = Game::new(GameConfig::default().with_default_bet(150));
        assert_eq!(game.wager(), 100);

        let mut game = Game::new(GameConfig::default().with_balances(0, 200).with_default_bet(150));
        assert_eq!(game.wager(), 150);
        assert!(!game.can_bet());
        assert!(game.start_round().is_err());
    }

    #[test]
    fn test_oversized_default_bet_plays_a_round() {
        let mut game = Game::new(GameConfig::default().with_default_bet(150));
        game.start_round().unwrap();
        assert_eq!(game.round().bet, 100);

        game.submit_roll(roll([4, 5, 6])).unwrap();
        assert_eq!(*game.ledger(), Ledger::new(0, 300));
    }
}
