//! Runtime configuration and environment loading.
use std::env;
use std::time::Duration;

use game_core::GameConfig;

use crate::error::{Result, RuntimeError};

/// Runtime configuration shared by every component of a run.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
    /// Minimum delay before an intro task logs its line.
    pub intro_delay: Duration,
    /// Random extra delay on top of `intro_delay`, exclusive.
    pub intro_jitter: Duration,
    /// Multiplier applied to every buff duration. Tests shrink it.
    pub buff_time_scale: f64,
    /// When set, the run uses seeded dice instead of the thread RNG.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            event_buffer_size: 256,
            intro_delay: Duration::from_millis(500),
            intro_jitter: Duration::from_millis(500),
            buff_time_scale: 1.0,
            seed: None,
        }
    }
}

impl RuntimeConfig {
    pub fn with_game(game: GameConfig) -> Self {
        Self {
            game,
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_MAX_FLOORS` - Floors in a run (default: 15)
    /// - `DUNGEON_EVENT_BUFFER` - Event bus capacity per topic (default: 256)
    /// - `DUNGEON_INTRO_DELAY_MS` - Intro delay; jitter uses the same value (default: 500)
    /// - `DUNGEON_BUFF_TIME_SCALE` - Buff duration multiplier (default: 1.0)
    /// - `DUNGEON_SEED` - Seed for reproducible dice (default: thread RNG)
    ///
    /// Unparseable values are ignored and keep their defaults.
    pub fn from_env() -> Self {
        Self::from_env_with(Self::default())
    }

    /// Like [`from_env`](Self::from_env), layered over `base`.
    pub fn from_env_with(base: Self) -> Self {
        let mut config = base;

        if let Some(floors) = read_env::<u32>("DUNGEON_MAX_FLOORS") {
            config.game.max_floors = floors;
        }

        if let Some(capacity) = read_env::<usize>("DUNGEON_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        if let Some(millis) = read_env::<u64>("DUNGEON_INTRO_DELAY_MS") {
            config.intro_delay = Duration::from_millis(millis);
            config.intro_jitter = Duration::from_millis(millis);
        }

        if let Some(scale) = read_env::<f64>("DUNGEON_BUFF_TIME_SCALE") {
            config.buff_time_scale = scale;
        }

        config.seed = read_env::<u64>("DUNGEON_SEED").or(config.seed);

        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.game.max_floors == 0 {
            return Err(RuntimeError::InvalidConfig(
                "max_floors must be at least 1".into(),
            ));
        }
        if self.game.party_size == 0 {
            return Err(RuntimeError::InvalidConfig(
                "party_size must be at least 1".into(),
            ));
        }
        if !self.buff_time_scale.is_finite() || self.buff_time_scale < 0.0 {
            return Err(RuntimeError::InvalidConfig(format!(
                "buff_time_scale must be a non-negative number, got {}",
                self.buff_time_scale
            )));
        }
        Ok(())
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
