//! Rules engine trait.
//!
//! The state machine in `game` never interprets dice itself. It asks a
//! `RulesEngine` two questions:
//! - What does this roll mean? (`classify`)
//! - Given who rolled it, what happens to the round? (`resolve`)

use serde::{Deserialize, Serialize};

use crate::core::{DieValue, Roll, Side};

use super::classifier::{classify, Outcome};

/// Result of a settled round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundResult {
    /// One side takes the bet.
    Winner(Side),
    /// Equal points; no money changes hands.
    Push,
}

impl RoundResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, RoundResult::Winner(s) if *s == side)
    }
}

/// What a single roll does to the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// The round is over.
    Settled(RoundResult),
    /// The roller set a point; play passes to the other side.
    PointSet(DieValue),
    /// No result; the same side rolls again.
    RollAgain,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - Both methods must be deterministic and side-effect free
/// - `resolve` for the banker never returns `Settled(Push)`
/// - `resolve` for the player never returns `PointSet`
pub trait RulesEngine {
    /// Interpret a roll.
    fn classify(&self, roll: &Roll) -> Outcome;

    /// Decide what `outcome`, rolled by `roller`, does to the round.
    ///
    /// `banker_point` is the banker's point when the player is rolling.
    fn resolve(&self, roller: Side, outcome: &Outcome, banker_point: Option<DieValue>) -> Resolution;
}

/// Standard 4-5-6 rules against a banker.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardRules;

impl RulesEngine for StandardRules {
    fn classify(&self, roll: &Roll) -> Outcome {
        classify(roll)
    }

    fn resolve(&self, roller: Side, outcome: &Outcome, banker_point: Option<DieValue>) -> Resolution {
        match (roller, outcome) {
            (_, Outcome::Continue) => Resolution::RollAgain,

            // Instant results go to whoever rolled them
            (_, Outcome::AutoWin(_) | Outcome::Triple(_)) => {
                Resolution::Settled(RoundResult::Winner(roller))
            }
            (_, Outcome::AutoLose(_)) => Resolution::Settled(RoundResult::Winner(roller.opponent())),

            (Side::Banker, Outcome::Point(point)) => Resolution::PointSet(*point),
            (Side::Player, Outcome::Point(point)) => {
                let result = match banker_point {
                    Some(banker) if *point > banker => RoundResult::Winner(Side::Player),
                    Some(banker) if *point < banker => RoundResult::Winner(Side::Banker),
                    _ => RoundResult::Push,
                };
                Resolution::Settled(result)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::classifier::AutoReason;

    fn die(value: u8) -> DieValue {
        DieValue::new(value).unwrap()
    }

    #[test]
    fn test_round_result_is_winner() {
        let result = RoundResult::Winner(Side::Player);
        assert!(result.is_winner(Side::Player));
        assert!(!result.is_winner(Side::Banker));

        assert!(!RoundResult::Push.is_winner(Side::Player));
        assert!(!RoundResult::Push.is_winner(Side::Banker));
    }

    #[test]
    fn test_banker_resolution() {
        let rules = StandardRules;
        let banker = Side::Banker;

        assert_eq!(
            rules.resolve(banker, &Outcome::AutoWin(AutoReason::Straight), None),
            Resolution::Settled(RoundResult::Winner(Side::Banker))
        );
        assert_eq!(
            rules.resolve(banker, &Outcome::Triple(die(3)), None),
            Resolution::Settled(RoundResult::Winner(Side::Banker))
        );
        assert_eq!(
            rules.resolve(banker, &Outcome::AutoLose(AutoReason::PointRoll), None),
            Resolution::Settled(RoundResult::Winner(Side::Player))
        );
        assert_eq!(rules.resolve(banker, &Outcome::Point(die(4)), None), Resolution::PointSet(die(4)));
        assert_eq!(rules.resolve(banker, &Outcome::Continue, None), Resolution::RollAgain);
    }

    #[test]
    fn test_player_resolution() {
        let rules = StandardRules;
        let player = Side::Player;
        let banker_point = Some(die(4));

        assert_eq!(
            rules.resolve(player, &Outcome::Triple(die(1)), banker_point),
            Resolution::Settled(RoundResult::Winner(Side::Player))
        );
        assert_eq!(
            rules.resolve(player, &Outcome::AutoLose(AutoReason::Straight), banker_point),
            Resolution::Settled(RoundResult::Winner(Side::Banker))
        );
        assert_eq!(
            rules.resolve(player, &Outcome::Point(die(5)), banker_point),
            Resolution::Settled(RoundResult::Winner(Side::Player))
        );
        assert_eq!(
            rules.resolve(player, &Outcome::Point(die(3)), banker_point),
            Resolution::Settled(RoundResult::Winner(Side::Banker))
        );
        assert_eq!(
            rules.resolve(player, &Outcome::Point(die(4)), banker_point),
            Resolution::Settled(RoundResult::Push)
        );
        assert_eq!(rules.resolve(player, &Outcome::Continue, banker_point), Resolution::RollAgain);
    }
}
