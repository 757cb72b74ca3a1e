//! Player-facing status messages.
//!
//! The engine keeps one current message that the front-end shows above the
//! table. Classifier descriptions are embedded verbatim.

use crate::core::{DieValue, Side};
use crate::rules::{Outcome, Resolution, RoundResult};

/// Shown before a wager is placed.
pub const PLACE_BET: &str = "Place your bet and roll!";

/// Shown while the banker's auto-roll loop runs.
pub const BANKER_ROLLING: &str = "Banker is rolling...";

/// Message for a roll that has just been resolved.
#[must_use]
pub fn roll_message(
    roller: Side,
    outcome: &Outcome,
    resolution: &Resolution,
    banker_point: Option<DieValue>,
) -> String {
    let desc = outcome.description();
    match roller {
        Side::Banker => banker_message(outcome, &desc),
        Side::Player => player_message(outcome, resolution, banker_point, &desc),
    }
}

fn banker_message(outcome: &Outcome, desc: &str) -> String {
    match outcome {
        Outcome::AutoWin(_) => format!("Banker {desc} - Banker wins!"),
        Outcome::AutoLose(_) => format!("Banker {desc} - Player wins!"),
        Outcome::Triple(_) => format!("Banker rolled {desc} - Banker wins!"),
        Outcome::Point(_) => format!("Banker established {desc}. Your turn to roll!"),
        Outcome::Continue => format!("Banker rolled: {desc}"),
    }
}

fn player_message(
    outcome: &Outcome,
    resolution: &Resolution,
    banker_point: Option<DieValue>,
    desc: &str,
) -> String {
    match outcome {
        Outcome::AutoWin(_) | Outcome::Triple(_) => format!("You rolled {desc} - You win!"),
        Outcome::AutoLose(_) => format!("You rolled {desc} - You lose!"),
        Outcome::Point(_) => {
            let verdict = match resolution {
                Resolution::Settled(RoundResult::Winner(Side::Player)) => "You win!",
                Resolution::Settled(RoundResult::Winner(Side::Banker)) => "You lose!",
                _ => "Push (tie)!",
            };
            match banker_point {
                Some(point) => format!("You rolled {desc} vs Banker's Point {point} - {verdict}"),
                None => format!("You rolled {desc} - {verdict}"),
            }
        }
        Outcome::Continue => format!("You rolled: {desc}"),
    }
}
