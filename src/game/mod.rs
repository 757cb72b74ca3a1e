//! The 4-5-6 table: turn sequencing and settlement.
//!
//! A round goes:
//! - `start_game(bet)`: Betting → BankerRolling
//! - banker rolls until a point (→ PlayerRolling) or an instant result
//!   (→ GameOver)
//! - player rolls until an instant result or a point, which is compared
//!   with the banker's (→ GameOver)
//! - `new_game()`: GameOver → Betting, balances carried forward
//!
//! The table never rolls dice itself. The caller supplies each `Roll`,
//! usually from a `DiceRoller` via `Session`.

mod message;
mod table;

pub use message::{roll_message, BANKER_ROLLING, PLACE_BET};
pub use table::{Game, RollReport};
