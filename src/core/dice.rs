//! Dice values and three-die rolls.
//!
//! ## DieValue
//!
//! A single face in `1..=6`. Construction is checked, so every `DieValue`
//! in the engine is valid by type.
//!
//! ## Roll
//!
//! An ordered triple of faces. Order is kept as rolled (for display and
//! history); the classifier sorts a copy when it needs to.
//!
//! ```
//! use four_five_six::core::Roll;
//!
//! let roll = Roll::from_values([6, 4, 5]).unwrap();
//! assert_eq!(roll.values(), [6, 4, 5]);
//! assert_eq!(roll.sorted_values(), [4, 5, 6]);
//!
//! assert!(Roll::from_values([0, 1, 2]).is_err());
//! ```

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Number of dice in every roll.
pub const DICE_PER_ROLL: usize = 3;

/// Number of faces on each die.
pub const FACES: u8 = 6;

const FACE_VALUES: [DieValue; FACES as usize] = [
    DieValue(1),
    DieValue(2),
    DieValue(3),
    DieValue(4),
    DieValue(5),
    DieValue(6),
];

/// A single die face in `1..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieValue(u8);

impl DieValue {
    /// Create a die value, rejecting faces outside `1..=6`.
    pub fn new(value: u8) -> Result<Self, GameError> {
        if (1..=FACES).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GameError::InvalidDie(value))
        }
    }

    /// Get the raw face value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Iterate over all six faces in ascending order.
    pub fn all() -> impl Iterator<Item = DieValue> {
        FACE_VALUES.into_iter()
    }

    /// Face at zero-based `index`, wrapping past six.
    pub(crate) const fn from_index(index: usize) -> Self {
        FACE_VALUES[index % FACE_VALUES.len()]
    }
}

impl TryFrom<u8> for DieValue {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DieValue> for u8 {
    fn from(value: DieValue) -> Self {
        value.0
    }
}

impl std::fmt::Display for DieValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Three dice as rolled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roll([DieValue; DICE_PER_ROLL]);

impl Roll {
    /// Create a roll from already-validated faces.
    #[must_use]
    pub const fn new(dice: [DieValue; DICE_PER_ROLL]) -> Self {
        Self(dice)
    }

    /// Create a roll from raw faces.
    pub fn from_values(values: [u8; DICE_PER_ROLL]) -> Result<Self, GameError> {
        Ok(Self([
            DieValue::new(values[0])?,
            DieValue::new(values[1])?,
            DieValue::new(values[2])?,
        ]))
    }

    /// Create a roll from a slice of raw faces, checking the dice count.
    pub fn from_slice(values: &[u8]) -> Result<Self, GameError> {
        let values: [u8; DICE_PER_ROLL] = values
            .try_into()
            .map_err(|_| GameError::InvalidRoll(values.len()))?;
        Self::from_values(values)
    }

    /// The dice in rolled order.
    #[must_use]
    pub fn dice(&self) -> [DieValue; DICE_PER_ROLL] {
        self.0
    }

    /// The raw faces in rolled order.
    #[must_use]
    pub fn values(&self) -> [u8; DICE_PER_ROLL] {
        self.0.map(DieValue::get)
    }

    /// The raw faces sorted ascending.
    #[must_use]
    pub fn sorted_values(&self) -> [u8; DICE_PER_ROLL] {
        let mut values = self.values();
        values.sort_unstable();
        values
    }

    /// Count of each face. Index 0 is unused.
    #[must_use]
    pub fn face_counts(&self) -> [u8; FACES as usize + 1] {
        let mut counts = [0u8; FACES as usize + 1];
        for die in self.0 {
            counts[die.get() as usize] += 1;
        }
        counts
    }
}

impl Default for Roll {
    /// The resting display before the first throw: 1-1-1.
    fn default() -> Self {
        Self([DieValue(1); DICE_PER_ROLL])
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{} • {} • {}", a, b, c)
    }
}
