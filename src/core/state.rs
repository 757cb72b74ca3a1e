//! Table state: phase, balances, and the current round.
//!
//! ## Ledger
//!
//! Both bankrolls. Persists across rounds and only changes through
//! `Ledger::settle`, which moves the same amount from loser to winner.
//!
//! ## RoundState
//!
//! The bet, the two points, and the roll history of one round. Recreated
//! at the start of every round.
//!
//! The history uses `im::Vector` so handing a snapshot of the round to the
//! presentation layer is an O(1) clone.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::dice::{DieValue, Roll};
use super::player::Side;

/// Where the table is in the round cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a wager.
    #[default]
    Betting,
    /// The banker rolls until a point or an instant result.
    BankerRolling,
    /// The player rolls until a point or an instant result.
    PlayerRolling,
    /// The round is settled; waiting for a new game.
    GameOver,
}

impl GamePhase {
    /// Whether `submit_roll` is allowed in this phase.
    #[must_use]
    pub const fn accepts_rolls(self) -> bool {
        matches!(self, GamePhase::BankerRolling | GamePhase::PlayerRolling)
    }

    /// Who is expected to roll, if anyone.
    #[must_use]
    pub const fn roller(self) -> Option<Side> {
        match self {
            GamePhase::BankerRolling => Some(Side::Banker),
            GamePhase::PlayerRolling => Some(Side::Player),
            GamePhase::Betting | GamePhase::GameOver => None,
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GamePhase::Betting => "Betting",
            GamePhase::BankerRolling => "BankerRolling",
            GamePhase::PlayerRolling => "PlayerRolling",
            GamePhase::GameOver => "GameOver",
        };
        write!(f, "{}", name)
    }
}

/// Both bankrolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ledger {
    pub player_money: i64,
    pub banker_money: i64,
}

impl Ledger {
    /// Create a ledger with the given balances.
    #[must_use]
    pub const fn new(player_money: i64, banker_money: i64) -> Self {
        Self {
            player_money,
            banker_money,
        }
    }

    /// Largest bet both sides can cover.
    #[must_use]
    pub fn max_bet(&self) -> i64 {
        self.player_money.min(self.banker_money).max(0)
    }

    /// Combined money on the table. Invariant across settlements.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.player_money + self.banker_money
    }

    /// Balance of one side.
    #[must_use]
    pub fn balance(&self, side: Side) -> i64 {
        match side {
            Side::Banker => self.banker_money,
            Side::Player => self.player_money,
        }
    }

    /// Move `amount` from the loser to `winner`.
    pub fn settle(&mut self, winner: Side, amount: i64) {
        match winner {
            Side::Player => {
                self.player_money += amount;
                self.banker_money -= amount;
            }
            Side::Banker => {
                self.player_money -= amount;
                self.banker_money += amount;
            }
        }
    }
}

/// One throw of the dice, as logged in the round history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRecord {
    /// The dice as rolled.
    pub dice: Roll,

    /// Classifier description, shown verbatim.
    pub outcome_description: String,

    /// Who rolled.
    pub roller: Side,
}

impl RollRecord {
    /// Create a new roll record.
    #[must_use]
    pub fn new(dice: Roll, outcome_description: impl Into<String>, roller: Side) -> Self {
        Self {
            dice,
            outcome_description: outcome_description.into(),
            roller,
        }
    }
}

impl std::fmt::Display for RollRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.roller, self.dice, self.outcome_description)
    }
}

/// State of a single round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Point set by the banker, if any.
    pub banker_point: Option<DieValue>,

    /// Point rolled by the player, if any.
    pub player_point: Option<DieValue>,

    /// Wager for this round. Fixed once the round starts.
    pub bet: i64,

    /// Every roll of the round in chronological order.
    pub history: Vector<RollRecord>,
}

impl RoundState {
    /// Fresh round with the given bet.
    #[must_use]
    pub fn new(bet: i64) -> Self {
        Self {
            bet,
            ..Self::default()
        }
    }

    /// Append a roll to the history.
    pub fn record(&mut self, record: RollRecord) {
        self.history.push_back(record);
    }

    /// The last `n` records, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &RollRecord> {
        self.history.iter().rev().take(n)
    }

    /// Number of rolls made by one side this round.
    #[must_use]
    pub fn rolls_by(&self, side: Side) -> usize {
        self.history.iter().filter(|r| r.roller == side).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(values: [u8; 3]) -> Roll {
        Roll::from_values(values).unwrap()
    }

    #[test]
    fn test_phase_accepts_rolls() {
        assert!(!GamePhase::Betting.accepts_rolls());
        assert!(GamePhase::BankerRolling.accepts_rolls());
        assert!(GamePhase::PlayerRolling.accepts_rolls());
        assert!(!GamePhase::GameOver.accepts_rolls());

        assert_eq!(GamePhase::BankerRolling.roller(), Some(Side::Banker));
        assert_eq!(GamePhase::PlayerRolling.roller(), Some(Side::Player));
        assert_eq!(GamePhase::GameOver.roller(), None);
    }

    #[test]
    fn test_ledger_settle_conserves_total() {
        let mut ledger = Ledger::new(100, 200);
        let total = ledger.total();

        ledger.settle(Side::Player, 25);
        assert_eq!(ledger, Ledger::new(125, 175));
        assert_eq!(ledger.total(), total);

        ledger.settle(Side::Banker, 50);
        assert_eq!(ledger, Ledger::new(75, 225));
        assert_eq!(ledger.total(), total);
    }

    #[test]
    fn test_ledger_max_bet() {
        assert_eq!(Ledger::new(100, 200).max_bet(), 100);
        assert_eq!(Ledger::new(300, 200).max_bet(), 200);
        assert_eq!(Ledger::new(0, 200).max_bet(), 0);
        assert_eq!(Ledger::new(100, 200).balance(Side::Banker), 200);
    }

    #[test]
    fn test_round_history_order() {
        let mut round = RoundState::new(10);
        round.record(RollRecord::new(roll([2, 3, 5]), "Keep rolling...", Side::Banker));
        round.record(RollRecord::new(roll([2, 2, 5]), "Point 5", Side::Banker));
        round.record(RollRecord::new(roll([6, 6, 3]), "Point 3", Side::Player));

        let recent: Vec<_> = round.recent(2).map(|r| r.outcome_description.as_str()).collect();
        assert_eq!(recent, vec!["Point 3", "Point 5"]);
        assert_eq!(round.rolls_by(Side::Banker), 2);
        assert_eq!(round.rolls_by(Side::Player), 1);
        assert_eq!(round.history[0].dice, roll([2, 3, 5]));
    }

    #[test]
    fn test_record_display() {
        let record = RollRecord::new(roll([4, 5, 6]), "4-5-6 – Auto Win!", Side::Player);
        assert_eq!(format!("{}", record), "Player: 4 • 5 • 6 (4-5-6 – Auto Win!)");
    }

    #[test]
    fn test_round_state_serde() {
        let mut round = RoundState::new(10);
        round.banker_point = Some(DieValue::new(4).unwrap());
        round.record(RollRecord::new(roll([4, 4, 2]), "Point 2", Side::Banker));

        let json = serde_json::to_string(&round).unwrap();
        let restored: RoundState = serde_json::from_str(&json).unwrap();
        assert_eq!(round, restored);
    }
}
