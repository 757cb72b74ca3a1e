//! Scoring rules for 4-5-6.
//!
//! - `classifier`: what a roll means, independent of who rolled it
//! - `engine`: the `RulesEngine` trait that turns an outcome into a
//!   resolution for the current round

pub mod classifier;
pub mod engine;

pub use classifier::{classify, AutoReason, Outcome};
pub use engine::{Resolution, RoundResult, RulesEngine, StandardRules};
