//! Roll classification.
//!
//! Maps three dice to an `Outcome`. The checks run in a fixed order:
//!
//! 1. Sorted 4-5-6: instant win
//! 2. Sorted 1-2-3: instant loss
//! 3. Three of a kind: triple
//! 4. Pair plus a singleton: the singleton is the point, except that a
//!    singleton 6 wins and a singleton 1 loses outright
//! 5. Anything else (three distinct faces): roll again
//!
//! ```
//! use four_five_six::core::Roll;
//! use four_five_six::rules::{classify, Outcome};
//!
//! let outcome = classify(&Roll::from_values([2, 2, 5]).unwrap());
//! assert!(matches!(outcome, Outcome::Point(p) if p.get() == 5));
//! assert_eq!(outcome.description(), "Point 5");
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{DieValue, Roll, FACES};

/// Why an instant result happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutoReason {
    /// 4-5-6 or 1-2-3.
    Straight,
    /// A pair with a singleton 6 or 1.
    PointRoll,
}

/// Meaning of a three-die roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Wins immediately for whoever rolled it.
    AutoWin(AutoReason),
    /// Loses immediately for whoever rolled it.
    AutoLose(AutoReason),
    /// Three of a kind.
    Triple(DieValue),
    /// Pair plus a singleton in `2..=5`.
    Point(DieValue),
    /// No result; roll again.
    Continue,
}

impl Outcome {
    /// Human-readable description, shown to the player verbatim.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Outcome::AutoWin(AutoReason::Straight) => "4-5-6 – Auto Win!".to_string(),
            Outcome::AutoWin(AutoReason::PointRoll) => "Point 6 – Auto Win!".to_string(),
            Outcome::AutoLose(AutoReason::Straight) => "1-2-3 – Auto Lose!".to_string(),
            Outcome::AutoLose(AutoReason::PointRoll) => "Point 1 – Auto Lose!".to_string(),
            Outcome::Triple(value) => format!("Triple {}s!", value),
            Outcome::Point(value) => format!("Point {}", value),
            Outcome::Continue => "Keep rolling...".to_string(),
        }
    }

    /// True if this outcome ends the roller's turn.
    #[must_use]
    pub fn is_decisive(&self) -> bool {
        !matches!(self, Outcome::Continue)
    }

    /// The point value, if this is a point.
    #[must_use]
    pub fn point(&self) -> Option<DieValue> {
        match self {
            Outcome::Point(value) => Some(*value),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description())
    }
}

/// Classify a roll. Pure and total.
#[must_use]
pub fn classify(roll: &Roll) -> Outcome {
    let outcome = classify_inner(roll);
    debug!(dice = %roll, outcome = %outcome, "classified roll");
    outcome
}

fn classify_inner(roll: &Roll) -> Outcome {
    match roll.sorted_values() {
        [4, 5, 6] => return Outcome::AutoWin(AutoReason::Straight),
        [1, 2, 3] => return Outcome::AutoLose(AutoReason::Straight),
        _ => {}
    }

    let [a, b, c] = roll.dice();
    if a == b && b == c {
        return Outcome::Triple(a);
    }

    let counts = roll.face_counts();
    let mut pairs: SmallVec<[DieValue; 3]> = SmallVec::new();
    let mut singles: SmallVec<[DieValue; 3]> = SmallVec::new();
    for face in DieValue::all() {
        match counts[face.get() as usize] {
            2 => pairs.push(face),
            1 => singles.push(face),
            _ => {}
        }
    }

    if let ([_], [point]) = (pairs.as_slice(), singles.as_slice()) {
        return match point.get() {
            FACES => Outcome::AutoWin(AutoReason::PointRoll),
            1 => Outcome::AutoLose(AutoReason::PointRoll),
            _ => Outcome::Point(*point),
        };
    }

    Outcome::Continue
}
