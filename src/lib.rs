//! # four-five-six
//!
//! A 4-5-6 dice game engine: one player betting against a house banker.
//!
//! ## Design Principles
//!
//! 1. **Rules are pure**: `rules::classify` maps three dice to an `Outcome`
//!    with no side effects. The `RulesEngine` trait turns that outcome into
//!    a `Resolution` for whoever rolled it.
//!
//! 2. **The table never rolls**: `Game` is a state machine driven by
//!    `start_game`, `submit_roll` and `new_game`. Rolls come from outside.
//!
//! 3. **Dice are a capability**: a `DiceRoller` is picked at startup
//!    (simulated physics with a synthetic fallback, or synthetic only).
//!
//! ## Round
//!
//! ```
//! use four_five_six::core::{GameConfig, GamePhase, Roll};
//! use four_five_six::game::Game;
//!
//! let mut game = Game::new(GameConfig::default());
//! game.start_game(10).unwrap();
//!
//! // Banker sets point 5, player rolls point 3 and loses
//! game.submit_roll(Roll::from_values([2, 2, 5]).unwrap()).unwrap();
//! game.submit_roll(Roll::from_values([6, 6, 3]).unwrap()).unwrap();
//!
//! assert_eq!(game.phase(), GamePhase::GameOver);
//! assert_eq!(game.ledger().player_money, 90);
//! assert_eq!(game.ledger().banker_money, 210);
//! ```
//!
//! ## Modules
//!
//! - `core`: Dice, sides, state, errors, RNG, configuration
//! - `rules`: Roll classifier and the `RulesEngine` trait
//! - `game`: The turn/settlement state machine
//! - `roller`: Dice rollers (physics, synthetic, scripted)
//! - `session`: Drives a `Game` with a `DiceRoller`

pub mod core;
pub mod rules;
pub mod game;
pub mod roller;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    DieValue, Roll, Side,
    GameRng, GameRngState,
    GameConfig, PhysicsConfig, RollerKind,
    ConfigError, GameError, RollerError,
    GamePhase, Ledger, RollRecord, RoundState,
};

pub use crate::rules::{classify, AutoReason, Outcome, Resolution, RoundResult, RulesEngine, StandardRules};

pub use crate::game::{Game, RollReport};

pub use crate::roller::{
    build_roller, DiceRoller, DiceSource,
    FallbackRoller, PhysicsRoller, ScriptedRoller, SyntheticRoller,
};

pub use crate::session::{RoundSummary, Session};
