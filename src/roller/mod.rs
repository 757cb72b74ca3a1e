//! Dice rollers: where rolls come from.
//!
//! The engine only consumes `Roll`s. Producing them is the job of a
//! `DiceRoller`, chosen once at startup:
//!
//! - `SyntheticRoller`: three independent uniform dice from `GameRng`
//! - `FallbackRoller<PhysicsRoller>`: simulated tumbling dice, with any
//!   failed or malformed throw replaced by a synthetic roll
//! - `ScriptedRoller`: a fixed sequence, for replays and tests
//!
//! Fallible sources implement `DiceSource` and return raw faces. Their
//! output is checked by `validate_throw` before it reaches the engine.

pub mod fallback;
pub mod physics;
pub mod scripted;
pub mod synthetic;

pub use fallback::FallbackRoller;
pub use physics::PhysicsRoller;
pub use scripted::ScriptedRoller;
pub use synthetic::SyntheticRoller;

use tracing::info;

use crate::core::{GameConfig, GameError, GameRng, Roll, RollerError, RollerKind, DICE_PER_ROLL};

/// Something that always produces a valid three-die roll.
///
/// Each die must be uniform on `1..=6` and independent of the others.
pub trait DiceRoller {
    /// Short name for logs and the front-end.
    fn name(&self) -> &'static str;

    /// Roll three dice.
    fn roll(&mut self) -> Roll;
}

/// A dice source that may fail or return malformed results.
pub trait DiceSource {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Throw `count` dice and report the raw faces.
    fn throw(&mut self, count: usize) -> Result<Vec<u8>, RollerError>;
}

impl<R: DiceRoller + ?Sized> DiceRoller for Box<R> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn roll(&mut self) -> Roll {
        (**self).roll()
    }
}

/// Check raw faces from a `DiceSource`: exactly three dice, each `1..=6`.
pub fn validate_throw(faces: &[u8]) -> Result<Roll, RollerError> {
    Roll::from_slice(faces).map_err(|err| match err {
        GameError::InvalidDie(face) => RollerError::FaceOutOfRange(face),
        _ => RollerError::WrongDiceCount {
            expected: DICE_PER_ROLL,
            got: faces.len(),
        },
    })
}

/// Build the roller selected by `config`.
///
/// Uses `config.seed` when set, OS entropy otherwise. The physics and
/// synthetic rollers draw from separate streams of the same seed.
pub fn build_roller(config: &GameConfig) -> Box<dyn DiceRoller> {
    let base = match config.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    let synthetic = SyntheticRoller::new(base.for_context("synthetic"));

    let roller: Box<dyn DiceRoller> = match config.roller {
        RollerKind::Physics => {
            let physics = PhysicsRoller::new(base.for_context("physics"), config.physics.clone());
            Box::new(FallbackRoller::new(physics, synthetic))
        }
        RollerKind::Synthetic => Box::new(synthetic),
    };
    info!(roller = roller.name(), seed = base.seed(), "dice roller ready");
    roller
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_throw() {
        assert_eq!(validate_throw(&[4, 5, 6]).unwrap().values(), [4, 5, 6]);
        assert_eq!(
            validate_throw(&[4, 5]),
            Err(RollerError::WrongDiceCount { expected: 3, got: 2 })
        );
        assert_eq!(validate_throw(&[4, 0, 6]), Err(RollerError::FaceOutOfRange(0)));
    }

    #[test]
    fn test_build_roller_by_kind() {
        let config = GameConfig::default().with_seed(1);
        assert_eq!(build_roller(&config).name(), "physics");

        let config = config.with_roller(RollerKind::Synthetic);
        assert_eq!(build_roller(&config).name(), "synthetic");
    }

    #[test]
    fn test_build_roller_is_seeded() {
        let config = GameConfig::default().with_seed(99);
        let mut a = build_roller(&config);
        let mut b = build_roller(&config);
        for _ in 0..20 {
            assert_eq!(a.roll(), b.roll());
        }
    }
}
