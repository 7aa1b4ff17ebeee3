//! Per-round hero strikes and enemy counter-attacks.
//!
//! Each archetype has one strike rule, selected by matching on
//! [`ArchetypeKind`]. Rules return their narration instead of logging it so the
//! caller can fan lines out to the shared encounter log after releasing the
//! actor lock.

use core::ops::Range;

use crate::env::Dice;
use crate::state::{ActorState, ArchetypeKind, ArchetypeStats, DamageOutcome};

use super::enemy::Enemy;

/// Base damage roll for every hero strike.
pub const HERO_BASE_DAMAGE: Range<u32> = 8..20;

const SPELL_MANA: u32 = 20;
const FIZZLE_MANA: u32 = 5;
const STEAL_CHANCE: u32 = 20;
const STEAL_MANA: u32 = 15;
const STOLEN_GOLD: Range<u32> = 10..30;
const SHIELD_CHANCE: u32 = 30;
const SHIELD_MANA: u32 = 25;

/// Which branch of the archetype rule fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrikeKind {
    /// Wizard spent mana for the spell bonus.
    Spell,
    /// Wizard was short on mana.
    Fizzle,
    /// Thief traded half its damage for gold.
    Steal { gold: u32 },
    Critical,
    /// Knight traded half its damage for a guard this round.
    Shield,
    Normal,
}

/// One hero's contribution to a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Strike {
    pub kind: StrikeKind,
    pub damage: u32,
    pub lines: Vec<String>,
}

/// Resolves one hero's strike against `enemy_name`.
///
/// Mana, stolen gold, and the guard flag are applied to `actor` directly.
/// Returns `None` for a defeated actor.
pub fn hero_strike(actor: &mut ActorState, enemy_name: &str, dice: &dyn Dice) -> Option<Strike> {
    if !actor.is_alive() {
        return None;
    }
    actor.set_guarded(false);

    let base = dice.range(HERO_BASE_DAMAGE.start, HERO_BASE_DAMAGE.end);
    let name = actor.name().to_owned();
    let stats = actor.stats();
    let mut lines = Vec::with_capacity(2);

    let (kind, damage) = match actor.kind() {
        ArchetypeKind::Wizard => {
            if actor.deduct_mana(SPELL_MANA) {
                let damage = base + spell_bonus(&stats);
                lines.push(format!(
                    "{name} casts FIREBALL (-{SPELL_MANA} mana) for {damage} total damage!"
                ));
                (StrikeKind::Spell, damage)
            } else {
                actor.deduct_mana(FIZZLE_MANA);
                lines.push(format!(
                    "{name} is low on mana and strikes with the staff for {base} damage."
                ));
                (StrikeKind::Fizzle, base)
            }
        }
        ArchetypeKind::Thief => {
            if dice.chance(STEAL_CHANCE) && actor.deduct_mana(STEAL_MANA) {
                let gold = dice.range(STOLEN_GOLD.start, STOLEN_GOLD.end);
                actor.add_gold_silent(gold);
                lines.push(format!(
                    "{name} steals {gold} gold from {enemy_name}! (-{STEAL_MANA} mana)"
                ));
                (StrikeKind::Steal { gold }, base / 2)
            } else if dice.chance(crit_chance(actor)) {
                let damage = base * 2;
                lines.push(format!("{name} lands a CRITICAL STRIKE for {damage} damage!"));
                (StrikeKind::Critical, damage)
            } else {
                lines.push(format!(
                    "{name} strikes with {base} damage (Dodge: {}%)",
                    dodge_chance(actor)
                ));
                (StrikeKind::Normal, base)
            }
        }
        ArchetypeKind::Knight => {
            if dice.chance(SHIELD_CHANCE) && actor.deduct_mana(SHIELD_MANA) {
                actor.set_guarded(true);
                let damage = base / 2;
                lines.push(format!(
                    "{name} raises a shield (-{SHIELD_MANA} mana) and bashes for {damage} damage!"
                ));
                lines.push("(Defense increased this round - reduced incoming damage)".to_owned());
                (StrikeKind::Shield, damage)
            } else {
                lines.push(format!("{name} performs a strong attack for {base} damage!"));
                (StrikeKind::Normal, base)
            }
        }
    };

    lines.push(format!("{name} deals {damage} damage!"));
    Some(Strike {
        kind,
        damage,
        lines,
    })
}

fn spell_bonus(stats: &ArchetypeStats) -> u32 {
    stats.spell_power / 2
}

fn crit_chance(actor: &ActorState) -> u32 {
    actor.stats().crit_chance + actor.bonuses().agility / 4
}

/// Percent chance to fully negate an enemy hit. Only the active agility bonus
/// raises it above the archetype base.
pub fn dodge_chance(actor: &ActorState) -> u32 {
    (actor.stats().dodge_chance + actor.bonuses().agility / 4).min(95)
}

/// Flat reduction of each incoming hit.
pub fn mitigation(stats: &ArchetypeStats) -> u32 {
    stats.armor / 10
}

/// Outcome of one enemy counter-attack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyAttack {
    /// Damage actually applied (zero on a dodge).
    pub damage: u32,
    pub dodged: bool,
    pub defeated: bool,
    pub lines: Vec<String>,
}

/// Resolves one enemy hit against `target`: dodge roll, guard, armor, damage.
pub fn enemy_attack(enemy: &Enemy, target: &mut ActorState, dice: &dyn Dice) -> EnemyAttack {
    let incoming = enemy.roll_hit(dice);
    let name = target.name().to_owned();
    let mut lines = Vec::with_capacity(2);

    let dodge = dodge_chance(target);
    if dodge > 0 && dice.chance(dodge) {
        lines.push(format!("{name} dodges the attack from {}!", enemy.name()));
        return EnemyAttack {
            damage: 0,
            dodged: true,
            defeated: false,
            lines,
        };
    }

    let mut damage = incoming;
    if target.is_guarded() {
        damage /= 2;
        lines.push(format!("{name}'s guard absorbs half the blow."));
    }
    damage = damage.saturating_sub(mitigation(&target.stats())).max(1);

    lines.push(format!("{} hits {name} for {damage} damage!", enemy.name()));
    let outcome = target.take_damage(damage);
    if outcome == DamageOutcome::Defeated {
        lines.push(format!("{name} has fallen!"));
    }
    EnemyAttack {
        damage,
        dodged: false,
        defeated: outcome.defeated_now(),
        lines,
    }
}
