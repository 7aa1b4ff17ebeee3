//! Milestone boss table.

use game_core::{BossProfile, Milestone};

pub const GARTH: BossProfile = BossProfile {
    name: "Garth the Stone Guardian",
    title: "Guardian of the Depths",
    max_health: 300,
    attack: 25,
    story: "A massive creature of living stone blocks your path. Its eyes glow with ancient power!\n\
            \"None shall pass beyond this point,\" it rumbles menacingly.",
};

pub const ZEPHYR: BossProfile = BossProfile {
    name: "Zephyr the Storm Elemental",
    title: "Master of the Winds",
    max_health: 500,
    attack: 35,
    story: "Lightning crackles around a towering elemental form.\n\
            \"I am the fury of nature! Your mortal forms are but dust before me!\"",
};

pub const FINAL_BOSS: BossProfile = BossProfile {
    name: "Malachar",
    title: "The Dark Lord Malachar - Final Antagonist",
    max_health: 1000,
    attack: 50,
    story: "Before you stands Malachar, the ancient Dark Lord whose corruption has plagued these lands!\n\
            \"AT LAST! The pathetic heroes arrive to meet their doom!\"\n\
            \"For a thousand years I have waited, gathering power, spreading darkness through every corner.\"\n\
            \"Did you think your pitiful blades and magic could harm one such as I?\"\n\
            \"I AM ETERNAL! I AM INEVITABLE!\"\n\
            Malachar raises his staff, and shadows surge around the chamber. The final battle begins!",
};

/// Boss guarding a milestone. Only floors 5 and 10 have guardians; any other
/// intermediate milestone (long runs) has none.
pub fn boss_for(milestone: Milestone) -> Option<BossProfile> {
    match milestone {
        Milestone::Floor(5) => Some(GARTH),
        Milestone::Floor(10) => Some(ZEPHYR),
        Milestone::Floor(_) => None,
        Milestone::Final => Some(FINAL_BOSS),
    }
}
