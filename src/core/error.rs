//! Error types for the engine, the dice rollers and configuration loading.
//!
//! `GameError` separates two very different failures:
//! - `InvalidBet` is a normal, recoverable user mistake. Its display text is
//!   shown to the player as-is.
//! - `InvalidTransition` means the orchestrating layer drove the state machine
//!   out of order. Callers should treat it as a bug, not as user input.

use thiserror::Error;

use super::state::GamePhase;

/// Errors raised by the turn/settlement engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Bet outside `[1, min(player money, banker money)]`.
    #[error("Maximum bet is ${max} (limited by available funds)")]
    InvalidBet { bet: i64, max: i64 },

    /// A trigger was invoked in a phase that does not permit it.
    #[error("cannot {action} while in phase {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: GamePhase,
    },

    /// A die face outside 1..=6.
    #[error("die value {0} is outside 1..=6")]
    InvalidDie(u8),

    /// A roll with the wrong number of dice.
    #[error("a roll needs exactly 3 dice, got {0}")]
    InvalidRoll(usize),
}

impl GameError {
    /// True for errors a player can fix by changing their input.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GameError::InvalidBet { .. })
    }
}

/// Errors raised by a dice source before the fallback roller takes over.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RollerError {
    #[error("dice did not settle within {steps} simulation steps")]
    NotSettled { steps: u32 },

    #[error("expected {expected} dice, got {got}")]
    WrongDiceCount { expected: usize, got: usize },

    #[error("die landed on face {0}, which is outside 1..=6")]
    FaceOutOfRange(u8),

    #[error("dice source unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while loading or validating a `GameConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bet_message_reports_max() {
        let err = GameError::InvalidBet { bet: 500, max: 100 };
        assert_eq!(err.to_string(), "Maximum bet is $100 (limited by available funds)");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_invalid_transition_is_not_recoverable() {
        let err = GameError::InvalidTransition {
            action: "submit a roll",
            phase: GamePhase::Betting,
        };
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "cannot submit a roll while in phase Betting");
    }

    #[test]
    fn test_config_error_from_json() {
        let parse_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ConfigError = parse_err.into();
        assert!(err.to_string().starts_with("failed to parse config"));
    }
}
