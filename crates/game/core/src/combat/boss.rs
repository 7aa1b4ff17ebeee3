//! Milestone bosses.

use core::ops::Range;

use crate::env::Dice;

/// Static description of a milestone boss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossProfile {
    pub name: &'static str,
    pub title: &'static str,
    pub max_health: u32,
    pub attack: u32,
    /// Entrance narration; may span several lines.
    pub story: &'static str,
}

/// Rewards granted to every living hero when a boss falls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossRewards {
    pub experience: u32,
    pub gold: u32,
}

/// A boss fight in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Boss {
    profile: BossProfile,
    health: u32,
}

impl Boss {
    /// Damage range of one hero hit.
    pub const HERO_HIT: Range<u32> = 15..40;
    /// Damage range of the counter-attack that follows each surviving hit.
    pub const COUNTER: Range<u32> = 10..30;
    pub const REWARDS: BossRewards = BossRewards {
        experience: 200,
        gold: 500,
    };

    pub fn new(profile: BossProfile) -> Self {
        Self {
            health: profile.max_health,
            profile,
        }
    }

    pub fn profile(&self) -> &BossProfile {
        &self.profile
    }

    pub fn name(&self) -> &'static str {
        self.profile.name
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.profile.max_health
    }

    /// Threat rating shown on entrance. Counters roll from [`Self::COUNTER`].
    pub fn attack(&self) -> u32 {
        self.profile.attack
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Banner and story lines shown when the boss appears.
    pub fn entrance(&self) -> Vec<String> {
        let rule = "=".repeat(80);
        let mut lines = vec![
            rule.clone(),
            format!("*** {} ***", self.profile.title.to_uppercase()),
            rule.clone(),
        ];
        lines.extend(self.profile.story.lines().map(str::to_owned));
        lines.push(format!(
            "Health: {} | Attack: {}",
            self.profile.max_health, self.profile.attack
        ));
        lines.push(rule);
        lines
    }

    /// Rolls and applies one hero hit. Returns the damage dealt.
    pub fn receive_hit(&mut self, dice: &dyn Dice) -> u32 {
        let damage = dice.range(Self::HERO_HIT.start, Self::HERO_HIT.end);
        self.health = self.health.saturating_sub(damage);
        damage
    }

    pub fn roll_counter(&self, dice: &dyn Dice) -> u32 {
        dice.range(Self::COUNTER.start, Self::COUNTER.end)
    }

    /// `Name: 120/300 HP`
    pub fn status_line(&self) -> String {
        format!(
            "{}: {}/{} HP",
            self.profile.name, self.health, self.profile.max_health
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgDice;

    const GOLEM: BossProfile = BossProfile {
        name: "Golem",
        title: "Keeper of the Gate",
        max_health: 60,
        attack: 20,
        story: "Stone grinds on stone.\nThe gate will not open.",
    };

    #[test]
    fn hits_stay_in_range_and_clamp() {
        let dice = PcgDice::new(5);
        let mut boss = Boss::new(GOLEM);
        let mut dealt = 0;
        while !boss.is_defeated() {
            let hit = boss.receive_hit(&dice);
            assert!(Boss::HERO_HIT.contains(&hit));
            dealt += hit;
        }
        assert!(dealt >= 60);
        assert_eq!(boss.health(), 0);
    }

    #[test]
    fn entrance_includes_title_and_story() {
        let lines = Boss::new(GOLEM).entrance();
        assert!(lines.contains(&"*** KEEPER OF THE GATE ***".to_owned()));
        assert!(lines.contains(&"The gate will not open.".to_owned()));
        assert!(lines.contains(&"Health: 60 | Attack: 20".to_owned()));
    }
}
