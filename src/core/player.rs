//! The two sides of the table.
//!
//! Every round is played between the house banker and a single player.
//! `Side` names who rolled a given throw and who won a settled round.

use serde::{Deserialize, Serialize};

/// One of the two sides of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The house.
    Banker,
    /// The person betting against the house.
    Player,
}

impl Side {
    /// Both sides in turn order.
    pub const ALL: [Side; 2] = [Side::Banker, Side::Player];

    /// The other side of the table.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Banker => Side::Player,
            Side::Player => Side::Banker,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Banker => write!(f, "Banker"),
            Side::Player => write!(f, "Player"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Side::Banker.opponent(), Side::Player);
        assert_eq!(Side::Player.opponent(), Side::Banker);
        for side in Side::ALL {
            assert_eq!(side.opponent().opponent(), side);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Side::Banker), "Banker");
        assert_eq!(format!("{}", Side::Player), "Player");
    }
}
