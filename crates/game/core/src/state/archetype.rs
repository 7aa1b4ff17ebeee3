//! Character archetypes.
//!
//! The archetype set is closed: every rule that differs between characters
//! matches on [`ArchetypeKind`] instead of dispatching through trait objects,
//! so the encounter loop itself stays archetype-agnostic.

use core::time::Duration;

use strum::{Display, EnumCount, EnumIter};

use super::buff::{Buff, BuffStat};

/// The closed set of playable character archetypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArchetypeKind {
    /// Heavy melee fighter; shields itself and soaks hits with armor.
    Knight,
    /// Agile striker; dodges, steals gold, and lands critical hits.
    Thief,
    /// Spellcaster; spends mana for bonus damage.
    Wizard,
}

/// Secondary stats that feed combat formulas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchetypeStats {
    pub armor: u32,
    pub agility: u32,
    pub intelligence: u32,
    pub spell_power: u32,
    /// Base chance (percent) to dodge an enemy attack.
    pub dodge_chance: u32,
    /// Base chance (percent) to land a critical strike.
    pub crit_chance: u32,
}

/// A one-shot, mana-consuming ability with a temporary stat bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilitySpec {
    pub name: &'static str,
    pub mana_cost: u32,
    pub buff: Buff,
    /// Narration when the ability fires.
    pub cast_line: &'static str,
    /// Narration when the bonus expires.
    pub fade_line: &'static str,
}

/// Starting numbers for an archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArchetypeProfile {
    pub max_health: u32,
    pub max_mana: u32,
    pub stats: ArchetypeStats,
    pub ability: AbilitySpec,
}

impl ArchetypeKind {
    pub const fn profile(self) -> ArchetypeProfile {
        match self {
            Self::Knight => ArchetypeProfile {
                max_health: 200,
                max_mana: 50,
                stats: ArchetypeStats {
                    armor: 20,
                    agility: 0,
                    intelligence: 0,
                    spell_power: 0,
                    dodge_chance: 0,
                    crit_chance: 0,
                },
                ability: AbilitySpec {
                    name: "Shield Bash",
                    mana_cost: 30,
                    buff: Buff::new(BuffStat::Armor, 15, Duration::from_millis(3_000)),
                    cast_line: "uses SHIELD BASH! Blocks incoming damage and stuns enemies!",
                    fade_line: "'s shield bash effect wears off.",
                },
            },
            Self::Thief => ArchetypeProfile {
                max_health: 120,
                max_mana: 80,
                stats: ArchetypeStats {
                    armor: 0,
                    agility: 35,
                    intelligence: 0,
                    spell_power: 0,
                    dodge_chance: 45,
                    crit_chance: 25,
                },
                ability: AbilitySpec {
                    name: "Shadow Clone",
                    mana_cost: 25,
                    buff: Buff::new(BuffStat::Agility, 20, Duration::from_millis(2_500)),
                    cast_line: "uses SHADOW CLONE! Evades next attack and moves behind enemy!",
                    fade_line: "'s shadow clone fades away.",
                },
            },
            Self::Wizard => ArchetypeProfile {
                max_health: 100,
                max_mana: 200,
                stats: ArchetypeStats {
                    armor: 0,
                    agility: 0,
                    intelligence: 40,
                    spell_power: 30,
                    dodge_chance: 0,
                    crit_chance: 0,
                },
                ability: AbilitySpec {
                    name: "Fireball",
                    mana_cost: 40,
                    buff: Buff::new(BuffStat::SpellPower, 15, Duration::from_millis(3_500)),
                    cast_line: "casts FIREBALL! Dealing massive area damage!",
                    fade_line: "'s fireball effect cools down.",
                },
            },
        }
    }

    /// Line logged when the actor's intro task runs.
    pub const fn intro_line(self) -> &'static str {
        match self {
            Self::Knight => "the Knight enters the dungeon, ready for battle!",
            Self::Thief => "the Thief enters the dungeon, moving silently...",
            Self::Wizard => "the Wizard enters the dungeon, eyes glowing with arcane power...",
        }
    }
}
