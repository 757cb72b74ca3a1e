//! Game configuration.
//!
//! Everything the table needs at startup:
//! - Starting balances for both sides
//! - The default wager and the +/- step used by the wager controls
//! - Which dice roller to use, and how the physics roller behaves
//! - Pacing between automatic banker rolls (presentation only)
//!
//! Configs are plain serde types so they can be loaded from JSON:
//!
//! ```
//! use four_five_six::core::{GameConfig, RollerKind};
//!
//! let config = GameConfig::from_json_str(r#"{ "starting_player_money": 50, "roller": "Synthetic" }"#).unwrap();
//! assert_eq!(config.starting_player_money, 50);
//! assert_eq!(config.starting_banker_money, 200);
//! assert_eq!(config.roller, RollerKind::Synthetic);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::ConfigError;

/// Which dice roller the table uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollerKind {
    /// Simulated tumbling dice, falling back to `Synthetic` on failure.
    #[default]
    Physics,
    /// Plain pseudorandom dice.
    Synthetic,
}

impl std::str::FromStr for RollerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "physics" | "3d" => Ok(RollerKind::Physics),
            "synthetic" | "2d" => Ok(RollerKind::Synthetic),
            other => Err(ConfigError::Invalid(format!("unknown roller kind '{other}'"))),
        }
    }
}

/// Tuning for the physics dice simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Initial spin imparted on each die (arbitrary units).
    pub throw_force: f32,

    /// Fraction of spin kept after each tumble, in `(0, 1)`.
    pub damping: f32,

    /// Spin below which a die is considered at rest.
    pub settle_threshold: f32,

    /// Simulation steps allowed before the throw is abandoned.
    pub max_steps: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            throw_force: 3.0,
            damping: 0.85,
            settle_threshold: 0.05,
            max_steps: 500,
        }
    }
}

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player's bankroll at the start of the session.
    pub starting_player_money: i64,

    /// Banker's bankroll at the start of the session.
    pub starting_banker_money: i64,

    /// Wager pre-selected before the first round.
    pub default_bet: i64,

    /// Amount the wager controls add or remove.
    pub bet_step: i64,

    /// Pause between automatic banker rolls, in milliseconds.
    /// Has no effect on results.
    pub banker_roll_delay_ms: u64,

    /// Dice roller selected at startup.
    pub roller: RollerKind,

    /// Seed for the dice. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Physics roller tuning.
    pub physics: PhysicsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_player_money: 100,
            starting_banker_money: 200,
            default_bet: 10,
            bet_step: 10,
            banker_roll_delay_ms: 1000,
            roller: RollerKind::default(),
            seed: None,
            physics: PhysicsConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Set starting balances.
    #[must_use]
    pub fn with_balances(mut self, player: i64, banker: i64) -> Self {
        self.starting_player_money = player;
        self.starting_banker_money = banker;
        self
    }

    /// Set the default wager.
    #[must_use]
    pub fn with_default_bet(mut self, bet: i64) -> Self {
        self.default_bet = bet;
        self
    }

    /// Set the wager step.
    #[must_use]
    pub fn with_bet_step(mut self, step: i64) -> Self {
        self.bet_step = step;
        self
    }

    /// Set the pause between banker rolls.
    #[must_use]
    pub fn with_banker_roll_delay_ms(mut self, delay_ms: u64) -> Self {
        self.banker_roll_delay_ms = delay_ms;
        self
    }

    /// Select the dice roller.
    #[must_use]
    pub fn with_roller(mut self, roller: RollerKind) -> Self {
        self.roller = roller;
        self
    }

    /// Fix the dice seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the physics tuning.
    #[must_use]
    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    /// Pause between banker rolls as a `Duration`.
    #[must_use]
    pub fn banker_roll_delay(&self) -> Duration {
        Duration::from_millis(self.banker_roll_delay_ms)
    }

    /// Check that the values describe a playable table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_player_money < 0 || self.starting_banker_money < 0 {
            return Err(ConfigError::Invalid("starting balances must not be negative".into()));
        }
        if self.starting_player_money.checked_add(self.starting_banker_money).is_none() {
            return Err(ConfigError::Invalid("combined starting balances overflow".into()));
        }
        if self.default_bet < 1 {
            return Err(ConfigError::Invalid("default_bet must be at least 1".into()));
        }
        if self.bet_step < 1 {
            return Err(ConfigError::Invalid("bet_step must be at least 1".into()));
        }

        let physics = &self.physics;
        if !(physics.throw_force > 0.0) {
            return Err(ConfigError::Invalid("physics.throw_force must be positive".into()));
        }
        if !(physics.damping > 0.0 && physics.damping < 1.0) {
            return Err(ConfigError::Invalid("physics.damping must be in (0, 1)".into()));
        }
        if !(physics.settle_threshold > 0.0) {
            return Err(ConfigError::Invalid("physics.settle_threshold must be positive".into()));
        }
        if physics.max_steps == 0 {
            return Err(ConfigError::Invalid("physics.max_steps must be at least 1".into()));
        }

        Ok(())
    }
}
