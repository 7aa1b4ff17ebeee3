//! Temporary stat bonuses.
//!
//! A buff is applied immediately and reverted later by whoever scheduled it.
//! Bonuses stack additively per stat and never push a stat below its base.

use core::time::Duration;

use super::archetype::ArchetypeStats;

/// Stat a buff modifies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuffStat {
    Armor,
    Agility,
    SpellPower,
}

/// A flat bonus to one stat for a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Buff {
    pub stat: BuffStat,
    pub amount: u32,
    pub duration: Duration,
}

impl Buff {
    pub const fn new(stat: BuffStat, amount: u32, duration: Duration) -> Self {
        Self {
            stat,
            amount,
            duration,
        }
    }
}

/// Accumulated active buff bonuses on top of base archetype stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffBonuses {
    pub armor: u32,
    pub agility: u32,
    pub spell_power: u32,
}

impl BuffBonuses {
    fn slot(&mut self, stat: BuffStat) -> &mut u32 {
        match stat {
            BuffStat::Armor => &mut self.armor,
            BuffStat::Agility => &mut self.agility,
            BuffStat::SpellPower => &mut self.spell_power,
        }
    }

    pub fn apply(&mut self, buff: &Buff) {
        *self.slot(buff.stat) += buff.amount;
    }

    pub fn revert(&mut self, buff: &Buff) {
        let slot = self.slot(buff.stat);
        *slot = slot.saturating_sub(buff.amount);
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Base stats with every active bonus folded in.
    pub fn effective(&self, base: &ArchetypeStats) -> ArchetypeStats {
        ArchetypeStats {
            armor: base.armor + self.armor,
            agility: base.agility + self.agility,
            spell_power: base.spell_power + self.spell_power,
            ..*base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacking_and_revert() {
        let buff = Buff::new(BuffStat::Armor, 15, Duration::from_millis(10));
        let mut bonuses = BuffBonuses::default();
        bonuses.apply(&buff);
        bonuses.apply(&buff);
        assert_eq!(bonuses.armor, 30);

        bonuses.revert(&buff);
        assert_eq!(bonuses.armor, 15);
        bonuses.revert(&buff);
        bonuses.revert(&buff);
        assert!(bonuses.is_empty());
    }

    #[test]
    fn effective_adds_only_buffed_stats() {
        let base = ArchetypeStats {
            armor: 20,
            crit_chance: 25,
            ..ArchetypeStats::default()
        };
        let bonuses = BuffBonuses {
            armor: 15,
            ..BuffBonuses::default()
        };
        let effective = bonuses.effective(&base);
        assert_eq!(effective.armor, 35);
        assert_eq!(effective.crit_chance, 25);
    }
}
