//! Actor vitals, counters, and the private event log.
//!
//! [`ActorState`] is plain data with `&mut self` mutators. It knows nothing
//! about threads: the runtime wraps each actor in a single mutex so every
//! mutator here becomes one atomic step.
//!
//! # Invariants
//!
//! - `health <= max_health` and `mana <= max_mana` after every mutator
//! - `experience < EXPERIENCE_PER_LEVEL` after every experience grant
//! - `Defeated` is terminal: no mutator brings an actor back

use crate::config::GameConfig;

use super::archetype::{AbilitySpec, ArchetypeKind, ArchetypeStats};
use super::buff::{Buff, BuffBonuses};

/// Lifecycle status of an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorStatus {
    Active,
    Defeated,
}

/// Result of applying damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Damage applied, actor still standing.
    Wounded { health: u32 },
    /// This hit brought the actor to zero.
    Defeated,
    /// Actor was already defeated; nothing changed.
    Ignored,
}

impl DamageOutcome {
    pub fn defeated_now(&self) -> bool {
        matches!(self, Self::Defeated)
    }
}

/// Result of trying to activate the archetype ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbilityOutcome {
    /// Mana spent and buff applied; the caller schedules the reversion.
    Activated(AbilitySpec),
    InsufficientMana { required: u32, available: u32 },
    Defeated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActorState {
    name: String,
    kind: ArchetypeKind,
    status: ActorStatus,
    max_health: u32,
    health: u32,
    max_mana: u32,
    mana: u32,
    level: u32,
    experience: u32,
    gold: u32,
    battles_won: u32,
    items_collected: u32,
    stats: ArchetypeStats,
    bonuses: BuffBonuses,
    /// Set by a defensive cast; halves the next enemy hit this round.
    guarded: bool,
    log: Vec<String>,
}

impl ActorState {
    /// Creates an actor with archetype base stats at full health and mana.
    pub fn new(name: impl Into<String>, kind: ArchetypeKind) -> Self {
        let profile = kind.profile();
        Self {
            name: name.into(),
            kind,
            status: ActorStatus::Active,
            max_health: profile.max_health,
            health: profile.max_health,
            max_mana: profile.max_mana,
            mana: profile.max_mana,
            level: 1,
            experience: 0,
            gold: GameConfig::STARTING_GOLD,
            battles_won: 0,
            items_collected: 0,
            stats: profile.stats,
            bonuses: BuffBonuses::default(),
            guarded: false,
            log: Vec::new(),
        }
    }

    // ===== getters =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ArchetypeKind {
        self.kind
    }

    pub fn status(&self) -> ActorStatus {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status == ActorStatus::Active
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn mana(&self) -> u32 {
        self.mana
    }

    pub fn max_mana(&self) -> u32 {
        self.max_mana
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn battles_won(&self) -> u32 {
        self.battles_won
    }

    pub fn items_collected(&self) -> u32 {
        self.items_collected
    }

    /// Base archetype stats with active buffs folded in.
    pub fn stats(&self) -> ArchetypeStats {
        self.bonuses.effective(&self.stats)
    }

    pub fn bonuses(&self) -> BuffBonuses {
        self.bonuses
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    // ===== log =====

    /// Appends a line prefixed with the actor's name.
    pub fn log_event(&mut self, message: impl AsRef<str>) {
        self.log.push(format!("[{}] {}", self.name, message.as_ref()));
    }

    /// Appends a line verbatim (shared narration).
    pub fn log_direct(&mut self, message: impl Into<String>) {
        self.log.push(message.into());
    }

    pub fn take_log(&mut self) -> Vec<String> {
        core::mem::take(&mut self.log)
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    // ===== vitals =====

    /// Heals up to max health. Returns the new health.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            self.log_event("cannot be healed while defeated.");
            return 0;
        }
        self.health = (self.health + amount).min(self.max_health);
        let line = format!(
            "{} healed for {} HP. Current health: {}",
            self.name, amount, self.health
        );
        self.log_event(line);
        self.health
    }

    /// Applies damage, clamping at zero and flipping to `Defeated` on zero.
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::Ignored;
        }
        self.health = self.health.saturating_sub(amount);
        let line = format!(
            "{} took {} damage. Current health: {}",
            self.name, amount, self.health
        );
        self.log_event(line);

        if self.health == 0 {
            self.status = ActorStatus::Defeated;
            self.guarded = false;
            let line = format!("{} has been defeated!", self.name);
            self.log_event(line);
            DamageOutcome::Defeated
        } else {
            DamageOutcome::Wounded {
                health: self.health,
            }
        }
    }

    /// Restores mana up to max mana. Returns the new mana.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        self.mana = (self.mana + amount).min(self.max_mana);
        let line = format!(
            "{} restored {} mana. Current mana: {}",
            self.name, amount, self.mana
        );
        self.log_event(line);
        self.mana
    }

    /// Deducts mana only when enough is available.
    pub fn deduct_mana(&mut self, amount: u32) -> bool {
        if self.mana >= amount {
            self.mana -= amount;
            true
        } else {
            false
        }
    }

    // ===== gold =====

    pub fn add_gold(&mut self, amount: u32) -> u32 {
        self.gold += amount;
        let line = format!("{} gained {} gold. Total: {}", self.name, amount, self.gold);
        self.log_event(line);
        self.gold
    }

    pub fn add_gold_silent(&mut self, amount: u32) -> u32 {
        self.gold += amount;
        self.gold
    }

    /// Spends gold only when the purse covers the price.
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold >= amount {
            self.gold -= amount;
            true
        } else {
            false
        }
    }

    // ===== progression =====

    /// Grants experience and logs the gain and every level reached.
    /// Returns the number of levels gained.
    pub fn add_experience(&mut self, amount: u32) -> u32 {
        let line = format!("{} gained {} experience.", self.name, amount);
        self.log_event(line);
        let levels = self.grant_experience(amount);
        for level in (self.level - levels + 1)..=self.level {
            let line = format!("{} leveled up to level {}!", self.name, level);
            self.log_event(line);
        }
        levels
    }

    /// Grants experience without logging (combat rewards).
    pub fn add_experience_silent(&mut self, amount: u32) -> u32 {
        self.grant_experience(amount)
    }

    fn grant_experience(&mut self, amount: u32) -> u32 {
        self.experience += amount;
        let mut levels = 0;
        while self.experience >= GameConfig::EXPERIENCE_PER_LEVEL {
            self.experience -= GameConfig::EXPERIENCE_PER_LEVEL;
            self.level += 1;
            self.max_health += GameConfig::HEALTH_PER_LEVEL;
            self.max_mana += GameConfig::MANA_PER_LEVEL;
            // Level-ups restore a living actor; a defeated one stays down.
            if self.is_alive() {
                self.health = self.max_health;
                self.mana = self.max_mana;
            }
            levels += 1;
        }
        levels
    }

    pub fn win_battle(&mut self) -> u32 {
        self.battles_won += 1;
        self.battles_won
    }

    pub fn collect_item(&mut self) -> u32 {
        self.items_collected += 1;
        self.items_collected
    }

    // ===== abilities & buffs =====

    /// Spends mana and applies the archetype ability's buff.
    pub fn activate_ability(&mut self) -> AbilityOutcome {
        let ability = self.kind.profile().ability;
        if !self.is_alive() {
            return AbilityOutcome::Defeated;
        }
        if !self.deduct_mana(ability.mana_cost) {
            let line = format!(
                "{} doesn't have enough mana for {}! (Requires {} mana)",
                self.name, ability.name, ability.mana_cost
            );
            self.log_event(line);
            return AbilityOutcome::InsufficientMana {
                required: ability.mana_cost,
                available: self.mana,
            };
        }
        self.bonuses.apply(&ability.buff);
        let line = format!("{} {}", self.name, ability.cast_line);
        self.log_event(line);
        AbilityOutcome::Activated(ability)
    }

    pub fn apply_buff(&mut self, buff: &Buff) {
        self.bonuses.apply(buff);
    }

    /// Reverts a buff. Returns false (and changes nothing) once defeated.
    pub fn revert_buff(&mut self, buff: &Buff) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.bonuses.revert(buff);
        true
    }

    pub fn set_guarded(&mut self, guarded: bool) {
        self.guarded = guarded && self.is_alive();
    }

    pub fn is_guarded(&self) -> bool {
        self.guarded
    }

    /// Point-in-time copy of every observable field.
    pub fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot {
            name: self.name.clone(),
            kind: self.kind,
            status: self.status,
            health: self.health,
            max_health: self.max_health,
            mana: self.mana,
            max_mana: self.max_mana,
            level: self.level,
            experience: self.experience,
            gold: self.gold,
            battles_won: self.battles_won,
            items_collected: self.items_collected,
            log: self.log.clone(),
        }
    }
}

/// Read-only copy of an actor, used for status lines, events, and reports.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorSnapshot {
    pub name: String,
    pub kind: ArchetypeKind,
    pub status: ActorStatus,
    pub health: u32,
    pub max_health: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub level: u32,
    pub experience: u32,
    pub gold: u32,
    pub battles_won: u32,
    pub items_collected: u32,
    pub log: Vec<String>,
}

impl ActorSnapshot {
    pub fn is_alive(&self) -> bool {
        self.status == ActorStatus::Active
    }

    /// `Name: 120/200 HP | 40/50 Mana`
    pub fn status_line(&self) -> String {
        format!(
            "{}: {}/{} HP | {}/{} Mana",
            self.name, self.health, self.max_health, self.mana, self.max_mana
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_stays_clamped() {
        let mut actor = ActorState::new("Theron", ArchetypeKind::Knight);
        actor.take_damage(50);
        actor.heal(500);
        assert_eq!(actor.health(), actor.max_health());

        let outcome = actor.take_damage(10_000);
        assert_eq!(outcome, DamageOutcome::Defeated);
        assert_eq!(actor.health(), 0);
        assert_eq!(actor.status(), ActorStatus::Defeated);
    }

    #[test]
    fn defeat_is_terminal() {
        let mut actor = ActorState::new("Arcanis", ArchetypeKind::Wizard);
        actor.take_damage(actor.max_health());
        let log_len = actor.log().len();

        assert_eq!(actor.take_damage(5), DamageOutcome::Ignored);
        assert_eq!(actor.log().len(), log_len);
        assert_eq!(actor.heal(50), 0);
        assert_eq!(actor.health(), 0);
        assert!(!actor.is_alive());
    }

    #[test]
    fn level_up_loop_crosses_multiple_thresholds() {
        let mut actor = ActorState::new("Theron", ArchetypeKind::Knight);
        let base_health = actor.max_health();
        let base_mana = actor.max_mana();
        actor.take_damage(30);
        actor.deduct_mana(20);

        let levels = actor.add_experience(250);

        assert_eq!(levels, 2);
        assert_eq!(actor.level(), 3);
        assert_eq!(actor.experience(), 50);
        assert_eq!(actor.max_health(), base_health + 2 * GameConfig::HEALTH_PER_LEVEL);
        assert_eq!(actor.max_mana(), base_mana + 2 * GameConfig::MANA_PER_LEVEL);
        assert_eq!(actor.health(), actor.max_health());
        assert_eq!(actor.mana(), actor.max_mana());
        assert!(actor.log().iter().any(|line| line.contains("level 3")));
    }

    #[test]
    fn silent_experience_does_not_log() {
        let mut actor = ActorState::new("Shadowblade", ArchetypeKind::Thief);
        actor.add_experience_silent(100);
        assert_eq!(actor.level(), 2);
        assert!(actor.log().is_empty());
    }

    #[test]
    fn mana_and_gold_never_go_negative() {
        let mut actor = ActorState::new("Theron", ArchetypeKind::Knight);
        assert!(!actor.deduct_mana(51));
        assert_eq!(actor.mana(), 50);
        assert!(actor.deduct_mana(50));
        assert_eq!(actor.mana(), 0);

        assert!(!actor.spend_gold(101));
        assert!(actor.spend_gold(100));
        assert_eq!(actor.gold(), 0);
    }

    #[test]
    fn ability_applies_buff_and_spends_mana() {
        let mut actor = ActorState::new("Theron", ArchetypeKind::Knight);
        let outcome = actor.activate_ability();
        let AbilityOutcome::Activated(ability) = outcome else {
            panic!("expected activation, got {outcome:?}");
        };
        assert_eq!(actor.mana(), 20);
        assert_eq!(actor.stats().armor, 35);

        assert!(actor.revert_buff(&ability.buff));
        assert_eq!(actor.stats().armor, 20);
    }

    #[test]
    fn ability_without_mana_degrades_to_narration() {
        let mut actor = ActorState::new("Theron", ArchetypeKind::Knight);
        actor.deduct_mana(40);
        let outcome = actor.activate_ability();
        assert_eq!(
            outcome,
            AbilityOutcome::InsufficientMana {
                required: 30,
                available: 10
            }
        );
        assert!(actor.bonuses().is_empty());
        assert!(actor.log().last().unwrap().contains("doesn't have enough mana"));
    }

    #[test]
    fn revert_on_defeated_actor_is_noop() {
        let mut actor = ActorState::new("Arcanis", ArchetypeKind::Wizard);
        let AbilityOutcome::Activated(ability) = actor.activate_ability() else {
            panic!("wizard starts with enough mana");
        };
        actor.take_damage(1_000);
        assert!(!actor.revert_buff(&ability.buff));
    }

    #[test]
    fn status_line_format() {
        let actor = ActorState::new("Arcanis", ArchetypeKind::Wizard);
        assert_eq!(
            actor.snapshot().status_line(),
            "Arcanis: 100/100 HP | 200/200 Mana"
        );
    }
}
