//! End-of-run statistics over actor snapshots.
//!
//! Stateless: every function reads a slice of [`ActorSnapshot`]s taken after
//! the run. Totals, rankings, and the highest level only consider heroes that
//! are still standing.

use crate::state::ActorSnapshot;

/// Party-wide totals over living heroes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyTotals {
    pub battles_won: u32,
    pub items_collected: u32,
    pub gold: u32,
}

/// One row of a ranking.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankEntry {
    pub name: String,
    pub kind: crate::state::ArchetypeKind,
    pub value: u32,
}

/// Everything the driver prints at the end of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub survivors: Vec<ActorSnapshot>,
    pub totals: PartyTotals,
    pub by_battles: Vec<RankEntry>,
    pub by_gold: Vec<RankEntry>,
    pub highest_level: Option<RankEntry>,
}

fn living(actors: &[ActorSnapshot]) -> impl Iterator<Item = &ActorSnapshot> {
    actors.iter().filter(|actor| actor.is_alive())
}

pub fn totals(actors: &[ActorSnapshot]) -> PartyTotals {
    living(actors).fold(PartyTotals::default(), |acc, actor| PartyTotals {
        battles_won: acc.battles_won + actor.battles_won,
        items_collected: acc.items_collected + actor.items_collected,
        gold: acc.gold + actor.gold,
    })
}

fn rank_by(actors: &[ActorSnapshot], metric: impl Fn(&ActorSnapshot) -> u32) -> Vec<RankEntry> {
    let mut ranked: Vec<RankEntry> = living(actors)
        .map(|actor| RankEntry {
            name: actor.name.clone(),
            kind: actor.kind,
            value: metric(actor),
        })
        .collect();
    // Stable: ties keep roster order.
    ranked.sort_by(|a, b| b.value.cmp(&a.value));
    ranked
}

/// Living heroes, most battles won first.
pub fn rank_by_battles(actors: &[ActorSnapshot]) -> Vec<RankEntry> {
    rank_by(actors, |actor| actor.battles_won)
}

/// Living heroes, richest first.
pub fn rank_by_gold(actors: &[ActorSnapshot]) -> Vec<RankEntry> {
    rank_by(actors, |actor| actor.gold)
}

/// Highest-level living hero; the first in roster order wins ties.
pub fn highest_level(actors: &[ActorSnapshot]) -> Option<RankEntry> {
    living(actors)
        .fold(None::<&ActorSnapshot>, |best, actor| match best {
            Some(best) if best.level >= actor.level => Some(best),
            _ => Some(actor),
        })
        .map(|actor| RankEntry {
            name: actor.name.clone(),
            kind: actor.kind,
            value: actor.level,
        })
}

/// Every actor's private log, concatenated in roster order.
pub fn event_log(actors: &[ActorSnapshot]) -> Vec<String> {
    actors
        .iter()
        .flat_map(|actor| actor.log.iter().cloned())
        .collect()
}

pub fn summarize(actors: &[ActorSnapshot]) -> RunSummary {
    RunSummary {
        survivors: living(actors).cloned().collect(),
        totals: totals(actors),
        by_battles: rank_by_battles(actors),
        by_gold: rank_by_gold(actors),
        highest_level: highest_level(actors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorState, ArchetypeKind};

    fn roster() -> Vec<ActorSnapshot> {
        let mut knight = ActorState::new("Theron", ArchetypeKind::Knight);
        knight.win_battle();
        knight.win_battle();
        knight.add_gold(40);
        knight.log_event("opened a door");

        let mut thief = ActorState::new("Shadowblade", ArchetypeKind::Thief);
        thief.win_battle();
        thief.add_gold(300);
        thief.collect_item();
        thief.add_experience_silent(100);

        let mut wizard = ActorState::new("Arcanis", ArchetypeKind::Wizard);
        wizard.win_battle();
        wizard.win_battle();
        wizard.win_battle();
        wizard.take_damage(1_000);

        vec![knight.snapshot(), thief.snapshot(), wizard.snapshot()]
    }

    #[test]
    fn totals_skip_fallen_heroes() {
        let totals = totals(&roster());
        assert_eq!(
            totals,
            PartyTotals {
                battles_won: 3,
                items_collected: 1,
                gold: 140 + 400,
            }
        );
    }

    #[test]
    fn rankings_are_descending() {
        let actors = roster();
        let battles: Vec<_> = rank_by_battles(&actors)
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(battles, ["Theron", "Shadowblade"]);

        let gold: Vec<_> = rank_by_gold(&actors)
            .into_iter()
            .map(|entry| entry.value)
            .collect();
        assert_eq!(gold, [400, 140]);
    }

    #[test]
    fn highest_level_among_living() {
        let best = highest_level(&roster()).unwrap();
        assert_eq!(best.name, "Shadowblade");
        assert_eq!(best.value, 2);
        assert_eq!(highest_level(&[]), None);
    }

    #[test]
    fn event_log_flattens_in_roster_order() {
        let log = event_log(&roster());
        assert!(log[0].starts_with("[Theron]"));
        assert!(log.iter().any(|line| line.contains("Arcanis has been defeated!")));
    }
}
