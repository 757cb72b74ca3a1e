//! Simulated tumbling dice.
//!
//! Each die is thrown with a random spin and a uniformly random face up.
//! While its spin is above the settle threshold it tumbles onto one of the
//! four faces adjacent to the current top face, losing spin each time.
//!
//! Tumbling to a uniformly chosen neighbour keeps the uniform distribution
//! over faces (every face has exactly four neighbours), so the settled face
//! is uniform on `1..=6` however long the die rolls.
//!
//! A throw that has not settled after `max_steps` is abandoned with
//! `RollerError::NotSettled`; `FallbackRoller` then supplies a synthetic roll.

use tracing::trace;

use crate::core::{GameRng, PhysicsConfig, RollerError, FACES};

use super::DiceSource;

/// Opposite faces of a standard die sum to seven.
const OPPOSITE_SUM: u8 = FACES + 1;

#[derive(Clone, Copy, Debug)]
struct TumblingDie {
    top: u8,
    spin: f32,
}

impl TumblingDie {
    fn is_moving(&self, threshold: f32) -> bool {
        self.spin > threshold
    }

    /// Roll onto one of the four faces adjacent to `top`.
    fn tumble(&mut self, rng: &mut GameRng, damping: f32) {
        let top = self.top;
        let bottom = OPPOSITE_SUM - top;
        let mut neighbours = (1..=FACES).filter(|&f| f != top && f != bottom);
        let pick = rng.gen_range_usize(0..4);
        if let Some(face) = neighbours.nth(pick) {
            self.top = face;
        }
        self.spin *= damping;
    }
}

/// Dice source backed by a small tumbling simulation.
#[derive(Clone, Debug)]
pub struct PhysicsRoller {
    rng: GameRng,
    config: PhysicsConfig,
}

impl PhysicsRoller {
    #[must_use]
    pub fn new(rng: GameRng, config: PhysicsConfig) -> Self {
        Self { rng, config }
    }

    #[must_use]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    fn launch(&mut self) -> TumblingDie {
        TumblingDie {
            top: self.rng.roll_die().get(),
            // Spin in [0.5, 1.5) x throw force
            spin: self.config.throw_force * (0.5 + self.rng.gen_unit()),
        }
    }
}

impl DiceSource for PhysicsRoller {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn throw(&mut self, count: usize) -> Result<Vec<u8>, RollerError> {
        let mut dice: Vec<TumblingDie> = (0..count).map(|_| self.launch()).collect();
        let threshold = self.config.settle_threshold;
        let damping = self.config.damping;

        for step in 0..self.config.max_steps {
            let mut moving = false;
            for die in dice.iter_mut().filter(|d| d.is_moving(threshold)) {
                die.tumble(&mut self.rng, damping);
                moving = true;
            }

            if !moving {
                trace!(step, "dice settled");
                return Ok(dice.iter().map(|d| d.top).collect());
            }
        }

        if dice.iter().all(|d| !d.is_moving(threshold)) {
            return Ok(dice.iter().map(|d| d.top).collect());
        }

        Err(RollerError::NotSettled {
            steps: self.config.max_steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roller(seed: u64) -> PhysicsRoller {
        PhysicsRoller::new(GameRng::new(seed), PhysicsConfig::default())
    }

    #[test]
    fn test_tumble_never_lands_on_top_or_bottom() {
        let mut rng = GameRng::new(3);
        for top in 1..=6 {
            for _ in 0..20 {
                let mut die = TumblingDie { top, spin: 1.0 };
                die.tumble(&mut rng, 0.5);
                assert_ne!(die.top, top);
                assert_ne!(die.top, OPPOSITE_SUM - top);
                assert!((1..=6).contains(&die.top));
                assert_eq!(die.spin, 0.5);
            }
        }
    }

    #[test]
    fn test_throw_settles_with_valid_faces() {
        let mut roller = roller(42);
        for _ in 0..100 {
            let faces = roller.throw(3).unwrap();
            assert_eq!(faces.len(), 3);
            assert!(faces.iter().all(|f| (1..=6).contains(f)));
        }
    }

    #[test]
    fn test_throw_is_deterministic() {
        let mut a = roller(8);
        let mut b = roller(8);
        for _ in 0..20 {
            assert_eq!(a.throw(3).unwrap(), b.throw(3).unwrap());
        }
    }

    #[test]
    fn test_short_simulation_does_not_settle() {
        let config = PhysicsConfig {
            max_steps: 1,
            ..PhysicsConfig::default()
        };
        let mut roller = PhysicsRoller::new(GameRng::new(1), config);
        assert_eq!(roller.throw(3), Err(RollerError::NotSettled { steps: 1 }));
    }

    #[test]
    fn test_settled_faces_are_roughly_uniform() {
        let mut roller = roller(2024);
        let mut counts = [0u32; 7];
        for _ in 0..10_000 {
            for face in roller.throw(3).unwrap() {
                counts[face as usize] += 1;
            }
        }
        // Expected 5_000 per face
        for &count in &counts[1..] {
            assert!((4_500..5_500).contains(&count), "count {count} far from uniform");
        }
    }
}
