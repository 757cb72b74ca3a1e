//! Session driver: connects a `Game` to a `DiceRoller`.
//!
//! The table never rolls on its own. `Session` is the orchestrating layer
//! that runs the banker's auto-roll loop, asks for player rolls, and paces
//! banker rolls with an optional delay. The delay only affects timing;
//! a zero-delay session produces exactly the same rounds.
//!
//! ```
//! use four_five_six::core::{GameConfig, GamePhase, RollerKind};
//! use four_five_six::session::Session;
//!
//! let config = GameConfig::default()
//!     .with_roller(RollerKind::Synthetic)
//!     .with_seed(7)
//!     .with_banker_roll_delay_ms(0);
//! let mut session = Session::new(config).unwrap();
//!
//! let summary = session.play_round(10).unwrap();
//! assert_eq!(session.game().phase(), GamePhase::GameOver);
//! assert_eq!(summary.ledger.total(), 300);
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info_span};

use crate::core::{ConfigError, GameConfig, GameError, GamePhase, Ledger, RollRecord};
use crate::game::{Game, RollReport};
use crate::roller::{build_roller, DiceRoller};
use crate::rules::RoundResult;

/// Everything needed to report a finished round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Wager for the round.
    pub bet: i64,
    /// Who won, or a push.
    pub result: RoundResult,
    /// Every roll of the round, oldest first.
    pub records: Vec<RollRecord>,
    /// Balances after settlement.
    pub ledger: Ledger,
}

/// A game plus the dice that drive it.
pub struct Session {
    game: Game,
    roller: Box<dyn DiceRoller>,
    banker_delay: Duration,
}

impl Session {
    /// Validate `config` and build the table with the roller it selects.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let roller = build_roller(&config);
        Ok(Self::with_roller(config, roller))
    }

    /// Build the table around an existing roller.
    #[must_use]
    pub fn with_roller(config: GameConfig, roller: Box<dyn DiceRoller>) -> Self {
        let banker_delay = config.banker_roll_delay();
        Self {
            game: Game::new(config),
            roller,
            banker_delay,
        }
    }

    /// Override the pause between banker rolls.
    #[must_use]
    pub fn with_banker_delay(mut self, delay: Duration) -> Self {
        self.banker_delay = delay;
        self
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Mutable access for the wager controls.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    #[must_use]
    pub fn roller_name(&self) -> &'static str {
        self.roller.name()
    }

    /// Start a round with `bet`.
    pub fn start(&mut self, bet: i64) -> Result<(), GameError> {
        self.game.start_game(bet)
    }

    /// Start a round with the pending wager.
    pub fn start_round(&mut self) -> Result<(), GameError> {
        self.game.start_round()
    }

    /// Roll for the banker until the banker sets a point or the round ends.
    pub fn roll_banker(&mut self) -> Result<Vec<RollReport>, GameError> {
        let mut reports = Vec::new();
        self.roll_banker_with(|report| reports.push(report.clone()))?;
        Ok(reports)
    }

    /// Like `roll_banker`, calling `observer` after every banker roll.
    pub fn roll_banker_with(&mut self, mut observer: impl FnMut(&RollReport)) -> Result<(), GameError> {
        if self.game.phase() != GamePhase::BankerRolling {
            return Err(GameError::InvalidTransition {
                action: "roll for the banker",
                phase: self.game.phase(),
            });
        }

        while self.game.phase() == GamePhase::BankerRolling {
            if !self.banker_delay.is_zero() {
                std::thread::sleep(self.banker_delay);
            }
            let roll = self.roller.roll();
            let report = self.game.submit_roll(roll)?;
            debug!(dice = %roll, message = %report.message, "banker rolled");
            observer(&report);
        }
        Ok(())
    }

    /// Roll once for the player.
    pub fn roll_player(&mut self) -> Result<RollReport, GameError> {
        if self.game.phase() != GamePhase::PlayerRolling {
            return Err(GameError::InvalidTransition {
                action: "roll for the player",
                phase: self.game.phase(),
            });
        }

        let roll = self.roller.roll();
        let report = self.game.submit_roll(roll)?;
        debug!(dice = %roll, message = %report.message, "player rolled");
        Ok(report)
    }

    /// Return to betting after a settled round.
    pub fn new_game(&mut self) -> Result<(), GameError> {
        self.game.new_game()
    }

    /// Play a whole round with `bet`: banker loop, then player rolls until
    /// the round is settled. Leaves the table in `GameOver`.
    pub fn play_round(&mut self, bet: i64) -> Result<RoundSummary, GameError> {
        let span = info_span!("round", bet);
        let _guard = span.enter();

        self.start(bet)?;
        self.roll_banker()?;
        while self.game.phase() == GamePhase::PlayerRolling {
            self.roll_player()?;
        }

        let result = self.game.last_result().ok_or(GameError::InvalidTransition {
            action: "summarize an unsettled round",
            phase: self.game.phase(),
        })?;

        Ok(RoundSummary {
            bet,
            result,
            records: self.game.round().history.iter().cloned().collect(),
            ledger: *self.game.ledger(),
        })
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("game", &self.game)
            .field("roller", &self.roller.name())
            .field("banker_delay", &self.banker_delay)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Side;
    use crate::roller::ScriptedRoller;

    fn scripted(values: &[[u8; 3]]) -> Session {
        let roller = ScriptedRoller::from_values(values).unwrap();
        Session::with_roller(GameConfig::default(), Box::new(roller)).with_banker_delay(Duration::ZERO)
    }

    #[test]
    fn test_banker_rerolls_until_point() {
        let mut session = scripted(&[[2, 3, 5], [1, 4, 6], [2, 2, 5]]);
        session.start(10).unwrap();

        let reports = session.roll_banker().unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(session.game().phase(), GamePhase::PlayerRolling);
        assert_eq!(session.game().round().rolls_by(Side::Banker), 3);
    }

    #[test]
    fn test_play_round_scenario() {
        let mut session = scripted(&[[2, 2, 5], [6, 6, 3]]);
        let summary = session.play_round(10).unwrap();

        assert_eq!(summary.result, RoundResult::Winner(Side::Banker));
        assert_eq!(summary.ledger, Ledger::new(90, 210));
        assert_eq!(summary.records.len(), 2);
        assert_eq!(summary.records[1].roller, Side::Player);
    }

    #[test]
    fn test_roll_requires_matching_phase() {
        let mut session = scripted(&[[4, 5, 6]]);
        assert!(session.roll_banker().is_err());
        assert!(session.roll_player().is_err());

        session.start(10).unwrap();
        assert!(session.roll_player().is_err());
        session.roll_banker().unwrap();
        assert_eq!(session.game().phase(), GamePhase::GameOver);
        assert!(session.roll_banker().is_err());
    }

    #[test]
    fn test_summary_serializes() {
        let mut session = scripted(&[[3, 3, 3]]);
        let summary = session.play_round(5).unwrap();
        let json = serde_json::to_string(&summary).unwrap();
        let restored: RoundSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, restored);
    }
}
