//! Fixed roll sequences for replays and tests.

use crate::core::{Roll, RollerError};

use super::DiceRoller;

/// Plays back a fixed list of rolls, starting over when it runs out.
#[derive(Clone, Debug)]
pub struct ScriptedRoller {
    rolls: Vec<Roll>,
    next: usize,
}

impl ScriptedRoller {
    /// Create a roller from a non-empty list of rolls.
    pub fn new(rolls: Vec<Roll>) -> Result<Self, RollerError> {
        if rolls.is_empty() {
            return Err(RollerError::Unavailable("scripted roller needs at least one roll".into()));
        }
        Ok(Self { rolls, next: 0 })
    }

    /// Create a roller from raw faces, e.g. `[[2, 2, 5], [6, 6, 3]]`.
    pub fn from_values(values: &[[u8; 3]]) -> Result<Self, RollerError> {
        let rolls = values
            .iter()
            .map(|v| super::validate_throw(v))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rolls)
    }

    /// Rolls handed out so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.next
    }
}

impl DiceRoller for ScriptedRoller {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn roll(&mut self) -> Roll {
        let roll = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        roll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plays_in_order_and_wraps() {
        let mut roller = ScriptedRoller::from_values(&[[2, 3, 5], [2, 2, 5]]).unwrap();
        assert_eq!(roller.roll().values(), [2, 3, 5]);
        assert_eq!(roller.roll().values(), [2, 2, 5]);
        assert_eq!(roller.roll().values(), [2, 3, 5]);
        assert_eq!(roller.position(), 3);
    }

    #[test]
    fn test_rejects_empty_and_invalid_scripts() {
        assert!(ScriptedRoller::new(Vec::new()).is_err());
        assert_eq!(
            ScriptedRoller::from_values(&[[1, 7, 2]]).unwrap_err(),
            RollerError::FaceOutOfRange(7)
        );
    }
}
