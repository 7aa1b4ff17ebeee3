use std::collections::HashSet;

use crate::actor::{ActorHandle, ActorId};

/// Health restored per resting hero.
pub const REST_HEAL: u32 = 25;

/// Rests the living members of `roster`: 25 HP and a full mana bar each.
///
/// Returns the resting set; pass it to the next encounter so those heroes
/// sit the fight out.
pub fn party_rest(roster: &[ActorHandle]) -> HashSet<ActorId> {
    let mut resting = HashSet::new();
    for actor in roster.iter().filter(|a| a.is_alive()) {
        actor.heal(REST_HEAL);
        actor.restore_mana(actor.max_mana());
        actor.log_event(format!("{} rests and recovers.", actor.name()));
        resting.insert(actor.id());
    }
    tracing::debug!(target: "runtime::rooms", resting = resting.len(), "party rested");
    resting
}
