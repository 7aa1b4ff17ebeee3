//! Shared run context.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use game_core::Dice;

use crate::config::RuntimeConfig;
use crate::dice::shared_dice;
use crate::events::EventBus;

/// Everything a component needs from the surrounding run: configuration,
/// dice, the event bus, and the game-over flag. Cheap to clone.
#[derive(Clone)]
pub struct RuntimeContext {
    config: Arc<RuntimeConfig>,
    dice: Arc<dyn Dice>,
    events: EventBus,
    game_active: Arc<AtomicBool>,
}

impl RuntimeContext {
    pub fn new(config: RuntimeConfig) -> Self {
        let dice = shared_dice(config.seed);
        Self::with_dice(config, dice)
    }

    /// Context with injected dice (scripted tests).
    pub fn with_dice(config: RuntimeConfig, dice: Arc<dyn Dice>) -> Self {
        let events = EventBus::with_capacity(config.event_buffer_size);
        Self {
            config: Arc::new(config),
            dice,
            events,
            game_active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn dice(&self) -> &dyn Dice {
        self.dice.as_ref()
    }

    pub fn shared_dice(&self) -> Arc<dyn Dice> {
        Arc::clone(&self.dice)
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Game-over is a flag loops poll, not a cancellation signal.
    pub fn is_game_active(&self) -> bool {
        self.game_active.load(Ordering::Acquire)
    }

    pub fn set_game_active(&self, active: bool) {
        self.game_active.store(active, Ordering::Release);
    }
}

impl Default for RuntimeContext {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}

impl std::fmt::Debug for RuntimeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeContext")
            .field("config", &self.config)
            .field("game_active", &self.is_game_active())
            .finish_non_exhaustive()
    }
}
