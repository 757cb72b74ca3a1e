//! Core table types: dice, sides, state, errors, RNG, configuration.
//!
//! This module holds the building blocks shared by the rules, the engine,
//! the dice rollers and the session driver.

pub mod dice;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use dice::{DieValue, Roll, DICE_PER_ROLL, FACES};
pub use player::Side;
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, PhysicsConfig, RollerKind};
pub use error::{ConfigError, GameError, RollerError};
pub use state::{GamePhase, Ledger, RollRecord, RoundState};
