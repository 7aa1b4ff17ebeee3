use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use game_core::{
    AbilityOutcome, AbilitySpec, ActorSnapshot, ActorState, ArchetypeKind, DamageOutcome, Dice,
    Enemy, EnemyAttack, Equipment, Inventory, InventoryError, PotionEffect, PotionKind, Strike,
    enemy_attack, hero_strike,
};
use serde::Serialize;

use super::timers::BuffTimers;

static NEXT_ACTOR_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique actor identity. Names are display text and may repeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

struct ActorShared {
    id: ActorId,
    name: String,
    kind: ArchetypeKind,
    state: Mutex<ActorState>,
    inventory: Mutex<Inventory>,
    timers: BuffTimers,
    buff_time_scale: f64,
}

/// Cloneable handle to one actor.
///
/// Every mutator takes the vitals lock for exactly one [`ActorState`] call, so
/// concurrent callers never lose an update. The inventory has its own lock and
/// the two are never held together.
#[derive(Clone)]
pub struct ActorHandle {
    inner: Arc<ActorShared>,
}

impl ActorHandle {
    pub fn new(name: impl Into<String>, kind: ArchetypeKind) -> Self {
        Self::with_buff_scale(name, kind, 1.0)
    }

    /// Creates an actor whose buff durations are multiplied by `buff_time_scale`.
    /// Negative or non-finite scales fall back to real time.
    pub fn with_buff_scale(
        name: impl Into<String>,
        kind: ArchetypeKind,
        buff_time_scale: f64,
    ) -> Self {
        let name = name.into();
        let buff_time_scale = if buff_time_scale.is_finite() && buff_time_scale >= 0.0 {
            buff_time_scale
        } else {
            1.0
        };
        Self {
            inner: Arc::new(ActorShared {
                id: ActorId(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed)),
                state: Mutex::new(ActorState::new(name.clone(), kind)),
                name,
                kind,
                inventory: Mutex::new(Inventory::new()),
                timers: BuffTimers::new(),
                buff_time_scale,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ActorState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn inventory(&self) -> MutexGuard<'_, Inventory> {
        self.inner
            .inventory
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` under the vitals lock. Keep `f` short and never await inside.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut ActorState) -> R) -> R {
        f(&mut self.state())
    }

    /// Runs `f` under the inventory lock.
    pub fn with_inventory<R>(&self, f: impl FnOnce(&mut Inventory) -> R) -> R {
        f(&mut self.inventory())
    }

    // ===== identity =====

    pub fn id(&self) -> ActorId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn kind(&self) -> ArchetypeKind {
        self.inner.kind
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ===== getters =====

    pub fn snapshot(&self) -> ActorSnapshot {
        self.state().snapshot()
    }

    pub fn is_alive(&self) -> bool {
        self.state().is_alive()
    }

    pub fn health(&self) -> u32 {
        self.state().health()
    }

    pub fn max_health(&self) -> u32 {
        self.state().max_health()
    }

    pub fn mana(&self) -> u32 {
        self.state().mana()
    }

    pub fn max_mana(&self) -> u32 {
        self.state().max_mana()
    }

    pub fn gold(&self) -> u32 {
        self.state().gold()
    }

    pub fn level(&self) -> u32 {
        self.state().level()
    }

    pub fn experience(&self) -> u32 {
        self.state().experience()
    }

    pub fn log(&self) -> Vec<String> {
        self.state().log().to_vec()
    }

    // ===== vitals =====

    pub fn heal(&self, amount: u32) -> u32 {
        self.state().heal(amount)
    }

    /// Applies damage. A killing blow aborts every pending buff timer.
    pub fn take_damage(&self, amount: u32) -> DamageOutcome {
        let outcome = self.state().take_damage(amount);
        if outcome.defeated_now() {
            self.on_defeat();
        }
        outcome
    }

    fn on_defeat(&self) {
        let cancelled = self.inner.timers.cancel_all();
        tracing::info!(
            target: "runtime::actor",
            actor = %self.name(),
            cancelled_timers = cancelled,
            "actor defeated"
        );
    }

    pub fn restore_mana(&self, amount: u32) -> u32 {
        self.state().restore_mana(amount)
    }

    pub fn deduct_mana(&self, amount: u32) -> bool {
        self.state().deduct_mana(amount)
    }

    pub fn add_gold(&self, amount: u32) -> u32 {
        self.state().add_gold(amount)
    }

    pub fn add_gold_silent(&self, amount: u32) -> u32 {
        self.state().add_gold_silent(amount)
    }

    pub fn spend_gold(&self, amount: u32) -> bool {
        self.state().spend_gold(amount)
    }

    pub fn add_experience(&self, amount: u32) -> u32 {
        self.state().add_experience(amount)
    }

    pub fn add_experience_silent(&self, amount: u32) -> u32 {
        self.state().add_experience_silent(amount)
    }

    pub fn win_battle(&self) -> u32 {
        self.state().win_battle()
    }

    pub fn collect_item(&self) -> u32 {
        self.state().collect_item()
    }

    // ===== log =====

    pub fn log_event(&self, message: impl AsRef<str>) {
        self.state().log_event(message);
    }

    pub fn log_direct(&self, message: impl Into<String>) {
        self.state().log_direct(message);
    }

    pub fn take_log(&self) -> Vec<String> {
        self.state().take_log()
    }

    pub fn clear_log(&self) {
        self.state().clear_log();
    }

    // ===== combat =====

    /// This actor's contribution to the current round, computed under its lock.
    pub fn strike(&self, enemy_name: &str, dice: &dyn Dice) -> Option<Strike> {
        hero_strike(&mut self.state(), enemy_name, dice)
    }

    /// Resolves one enemy hit against this actor.
    pub fn defend(&self, enemy: &Enemy, dice: &dyn Dice) -> EnemyAttack {
        let attack = enemy_attack(enemy, &mut self.state(), dice);
        if attack.defeated {
            self.on_defeat();
        }
        attack
    }

    // ===== abilities =====

    /// Fires the archetype ability and schedules its reversion.
    pub fn use_ability(&self) -> AbilityOutcome {
        let outcome = self.state().activate_ability();
        if let AbilityOutcome::Activated(ability) = outcome {
            let duration = self.scaled(ability.buff.duration);
            let handle = self.clone();
            let scheduled = self.inner.timers.schedule(async move {
                tokio::time::sleep(duration).await;
                handle.expire_buff(&ability);
            });
            if !scheduled {
                tracing::warn!(
                    target: "runtime::actor",
                    actor = %self.name(),
                    ability = ability.name,
                    "no async runtime for buff timer; reverting immediately"
                );
                self.expire_buff(&ability);
            } else {
                tracing::debug!(
                    target: "runtime::actor",
                    actor = %self.name(),
                    ability = ability.name,
                    ?duration,
                    "buff scheduled"
                );
            }
        }
        outcome
    }

    /// Applies the buff time scale. A product `Duration` cannot hold keeps
    /// the unscaled duration.
    fn scaled(&self, duration: Duration) -> Duration {
        Duration::try_from_secs_f64(duration.as_secs_f64() * self.inner.buff_time_scale)
            .unwrap_or(duration)
    }

    fn expire_buff(&self, ability: &AbilitySpec) {
        let mut state = self.state();
        if state.revert_buff(&ability.buff) {
            let line = format!("{}{}", self.inner.name, ability.fade_line);
            state.log_event(line);
        }
    }

    /// Buff reversions that have not fired yet.
    pub fn pending_buffs(&self) -> usize {
        self.inner.timers.pending()
    }

    // ===== inventory =====

    /// Drinks one potion of `kind`. A missing potion is logged, not an error.
    pub fn drink_potion(&self, kind: PotionKind) -> bool {
        if !self.is_alive() {
            return false;
        }
        let used = self.inventory().use_potion(kind);
        if let Err(err) = used {
            self.log_event(format!("{} has {err}.", self.name()));
            return false;
        }
        match kind.effect() {
            PotionEffect::Health(amount) => {
                self.heal(amount);
            }
            PotionEffect::Mana(amount) => {
                self.restore_mana(amount);
            }
        }
        self.log_event(format!("{} drank a {kind}.", self.name()));
        true
    }

    pub fn give_equipment(&self, item: Equipment) -> Result<(), InventoryError> {
        self.inventory().add_equipment(item)
    }

    pub fn give_potion(&self, kind: PotionKind, quantity: u32) -> Result<(), InventoryError> {
        self.inventory().add_potion(kind, quantity)
    }

    /// Equips the bag item at `index`; any replaced item goes back to the bag.
    ///
    /// Returns the replaced item, if any.
    pub fn equip(&self, index: usize) -> Result<Option<Equipment>, InventoryError> {
        let mut inventory = self.inventory();
        let previous = inventory.equip(index)?;
        if let Some(item) = previous {
            // The equip just freed a bag slot, so this cannot overflow.
            inventory.add_equipment(item)?;
        }
        Ok(previous)
    }

    pub fn potion_count(&self, kind: PotionKind) -> u32 {
        self.inventory().potion_count(kind)
    }

    /// Copy of the inventory for display.
    pub fn inventory_snapshot(&self) -> Inventory {
        self.inventory().clone()
    }
}

impl fmt::Debug for ActorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorHandle")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("kind", &self.inner.kind)
            .finish_non_exhaustive()
    }
}
