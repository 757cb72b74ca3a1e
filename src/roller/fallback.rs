//! A fallible primary source backed by synthetic dice.
//!
//! Every throw from the primary source is validated. A failed or malformed
//! throw is replaced by a synthetic roll for that turn. After
//! `MAX_CONSECUTIVE_FAILURES` failures in a row the primary is switched off
//! until `restore_primary` is called.

use tracing::warn;

use crate::core::{Roll, DICE_PER_ROLL};

use super::{validate_throw, DiceRoller, DiceSource, SyntheticRoller};

/// Failures in a row before the primary source is disabled.
pub const MAX_CONSECUTIVE_FAILURES: u32 = 3;

/// Roller that prefers `primary` and falls back to synthetic dice.
#[derive(Clone, Debug)]
pub struct FallbackRoller<S: DiceSource> {
    primary: S,
    fallback: SyntheticRoller,
    primary_enabled: bool,
    consecutive_failures: u32,
    fallback_rolls: u64,
}

impl<S: DiceSource> FallbackRoller<S> {
    #[must_use]
    pub fn new(primary: S, fallback: SyntheticRoller) -> Self {
        Self {
            primary,
            fallback,
            primary_enabled: true,
            consecutive_failures: 0,
            fallback_rolls: 0,
        }
    }

    /// Whether throws still go to the primary source.
    #[must_use]
    pub fn primary_enabled(&self) -> bool {
        self.primary_enabled
    }

    /// Number of rolls served by the synthetic fallback so far.
    #[must_use]
    pub fn fallback_rolls(&self) -> u64 {
        self.fallback_rolls
    }

    /// Re-enable a primary source that was switched off.
    pub fn restore_primary(&mut self) {
        self.primary_enabled = true;
        self.consecutive_failures = 0;
    }

    fn try_primary(&mut self) -> Option<Roll> {
        if !self.primary_enabled {
            return None;
        }

        let result = self
            .primary
            .throw(DICE_PER_ROLL)
            .and_then(|faces| validate_throw(&faces));

        match result {
            Ok(roll) => {
                self.consecutive_failures = 0;
                Some(roll)
            }
            Err(err) => {
                self.consecutive_failures += 1;
                warn!(
                    source = self.primary.name(),
                    error = %err,
                    failures = self.consecutive_failures,
                    "dice throw failed, using synthetic dice"
                );
                if self.consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
                    warn!(source = self.primary.name(), "disabling dice source after repeated failures");
                    self.primary_enabled = false;
                }
                None
            }
        }
    }
}

impl<S: DiceSource> DiceRoller for FallbackRoller<S> {
    fn name(&self) -> &'static str {
        if self.primary_enabled {
            self.primary.name()
        } else {
            self.fallback.name()
        }
    }

    fn roll(&mut self) -> Roll {
        match self.try_primary() {
            Some(roll) => roll,
            None => {
                self.fallback_rolls += 1;
                self.fallback.roll()
            }
        }
    }
}
