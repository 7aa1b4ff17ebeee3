//! Encounter arena: quorum, round barrier, rewards, and terminal states.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{FixedDice, knights, no_rest, scripted_context};
use game_core::{ArchetypeKind, Enemy, PcgDice};
use runtime::{
    ActorHandle, Encounter, EncounterEvent, EncounterOutcome, EncounterStatus, Event, JoinOutcome,
    RuntimeConfig, RuntimeContext, Topic,
};

/// Three knights against a 100 HP orc with scripted dice.
///
/// Every strike deals 15, so the orc drops 100 -> 55 -> 10 -> 0. It
/// counter-attacks twice, always the first knight, for 17 - 2 armor each.
#[tokio::test]
async fn three_knights_defeat_an_orc() {
    let ctx = scripted_context(FixedDice::PLAIN);
    let party = knights(&["Theron", "Galahad", "Percival"]);
    let encounter = Encounter::with_enemy(1, Enemy::new("Orc", 100, 10), no_rest(), ctx);

    assert_eq!(encounter.enter(&party[0]), JoinOutcome::Joined);
    assert_eq!(encounter.enter(&party[1]), JoinOutcome::Joined);
    assert_eq!(encounter.enter(&party[2]), JoinOutcome::Started);

    let outcome = encounter.wait_resolved().await.expect("encounter resolves");
    assert_eq!(outcome, EncounterOutcome::Victory { gold: 90 });
    assert_eq!(encounter.last_gold_earned(), 90);
    assert!(encounter.enemy().is_defeated());
    assert_eq!(encounter.status(), EncounterStatus::Resolved { outcome });

    assert_eq!(party[0].health(), 170);
    assert_eq!(party[1].health(), 200);
    assert_eq!(party[2].health(), 200);
    for knight in &party {
        assert_eq!(knight.gold(), 130);
        assert_eq!(knight.experience(), 50);
        assert_eq!(knight.snapshot().battles_won, 1);
    }

    let log = encounter.log();
    assert!(log.iter().any(|line| line == "Orc: 55/100 HP"));
    assert!(log.iter().any(|line| line == "Orc: 10/100 HP"));
    assert!(log.iter().any(|line| line == "Gained 90 gold total!"));
    assert_eq!(
        log.iter().filter(|line| line.starts_with("--- Round")).count(),
        3
    );

    // Shared narration reaches every participant's private log.
    let private = party[2].log();
    assert!(private.iter().any(|line| line == "Orc: 55/100 HP"));
}

#[tokio::test]
async fn round_damage_is_applied_after_every_strike() {
    let ctx = scripted_context(FixedDice::PLAIN);
    let mut events = ctx.events().subscribe(Topic::Encounter);
    let party = knights(&["Theron", "Galahad", "Percival"]);
    let encounter = Encounter::with_enemy(2, Enemy::new("Orc", 100, 10), no_rest(), ctx);

    for knight in &party {
        encounter.enter(knight);
    }
    encounter.wait_resolved().await.expect("encounter resolves");

    let mut rounds = Vec::new();
    let mut resolved = false;
    while let Ok(event) = events.try_recv() {
        match event {
            Event::Encounter(EncounterEvent::RoundCompleted {
                damage,
                enemy_health,
                ..
            }) => rounds.push((damage, enemy_health)),
            Event::Encounter(EncounterEvent::Resolved { floor, .. }) => {
                assert_eq!(floor, 2);
                resolved = true;
            }
            _ => {}
        }
    }
    assert_eq!(rounds, vec![(45, 55), (45, 10), (45, 0)]);
    assert!(resolved);
}

/// Per-round sums of the "deals N damage!" lines in an encounter log.
fn narrated_round_damage(log: &[String]) -> Vec<u32> {
    let mut rounds = Vec::new();
    let mut current = 0;
    for line in log {
        if line.starts_with("--- Round") {
            current = 0;
        } else if let Some(rest) = line.split(" deals ").nth(1) {
            let amount = rest.trim_end_matches(" damage!");
            current += amount.parse::<u32>().expect("strike amount");
        } else if line.starts_with(">>> Total Damage Dealt") {
            rounds.push(current);
        }
    }
    rounds
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn mixed_party_rounds_sum_every_strike() {
    for seed in 0..30 {
        let ctx = RuntimeContext::with_dice(RuntimeConfig::default(), Arc::new(PcgDice::new(seed)));
        let mut events = ctx.events().subscribe(Topic::Encounter);
        let party = [
            ActorHandle::new("Theron", ArchetypeKind::Knight),
            ActorHandle::new("Shadowblade", ArchetypeKind::Thief),
            ActorHandle::new("Arcanis", ArchetypeKind::Wizard),
        ];
        let encounter = Encounter::with_enemy(3, Enemy::new("Troll", 300, 8), no_rest(), ctx);
        for hero in &party {
            encounter.enter(hero);
        }
        encounter.wait_resolved().await.expect("encounter resolves");

        let mut applied = Vec::new();
        let mut health = 300u32;
        while let Ok(event) = events.try_recv() {
            if let Event::Encounter(EncounterEvent::RoundCompleted {
                damage,
                enemy_health,
                ..
            }) = event
            {
                assert_eq!(enemy_health, health.saturating_sub(damage), "seed {seed}");
                health = enemy_health;
                applied.push(damage);
            }
        }
        assert!(!applied.is_empty(), "seed {seed}");
        assert_eq!(narrated_round_damage(&encounter.log()), applied, "seed {seed}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_joins_start_the_loop_once() {
    let ctx = scripted_context(FixedDice::PLAIN);
    let party = knights(&["Theron", "Galahad", "Percival"]);
    let encounter = Encounter::with_enemy(1, Enemy::new("Goblin", 40, 6), no_rest(), ctx);

    let joins: Vec<_> = party
        .iter()
        .cloned()
        .map(|knight| {
            let encounter = encounter.clone();
            tokio::spawn(async move { encounter.enter(&knight) })
        })
        .collect();

    let mut outcomes = Vec::new();
    for join in joins {
        outcomes.push(join.await.expect("join task"));
    }
    let started = outcomes
        .iter()
        .filter(|outcome| **outcome == JoinOutcome::Started)
        .count();
    assert_eq!(started, 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|outcome| **outcome == JoinOutcome::Joined)
            .count(),
        2
    );

    let outcome = encounter.wait_resolved().await.expect("encounter resolves");
    assert!(matches!(outcome, EncounterOutcome::Victory { .. }));
    assert_eq!(encounter.participants().len(), 3);
}

#[tokio::test]
async fn refused_joins_are_narrated() {
    let ctx = scripted_context(FixedDice::PLAIN);
    let party = knights(&["Theron", "Galahad", "Percival", "Tristan", "Bors"]);
    let fallen = &party[4];
    fallen.take_damage(10_000);

    let encounter = Encounter::with_enemy(
        1,
        Enemy::new("Goblin", 40, 6),
        [party[3].id()],
        ctx,
    );

    assert_eq!(encounter.enter(fallen), JoinOutcome::Defeated);
    assert_eq!(encounter.enter(&party[3]), JoinOutcome::Resting);
    assert_eq!(encounter.enter(&party[0]), JoinOutcome::Joined);
    assert_eq!(encounter.enter(&party[0]), JoinOutcome::AlreadyJoined);
    assert_eq!(encounter.enter(&party[1]), JoinOutcome::Joined);
    assert_eq!(encounter.enter(&party[2]), JoinOutcome::Started);

    encounter.wait_resolved().await.expect("encounter resolves");
    assert_eq!(encounter.enter(&party[3]), JoinOutcome::Resting);

    let late = knights(&["Lancelot"]);
    assert_eq!(encounter.enter(&late[0]), JoinOutcome::Closed);
    assert!(late[0].log().last().unwrap().contains("already begun"));
    assert!(party[3].log().last().unwrap().contains("resting"));
}

#[tokio::test]
async fn defeated_heroes_stay_defeated_through_a_wipe() {
    let ctx = scripted_context(FixedDice::PLAIN);
    let party = knights(&["Theron", "Galahad", "Percival"]);
    for knight in &party {
        knight.take_damage(190);
    }
    let encounter = Encounter::with_enemy(3, Enemy::new("Drake", 10_000, 10), no_rest(), ctx);
    for knight in &party {
        encounter.enter(knight);
    }

    let outcome = encounter.wait_resolved().await.expect("encounter resolves");
    assert_eq!(outcome, EncounterOutcome::Wipe);
    assert_eq!(encounter.enemy().health(), 10_000 - 45 - 30 - 15);
    assert_eq!(encounter.last_gold_earned(), 0);
    assert!(
        encounter
            .log()
            .iter()
            .any(|line| line == "*** THE PARTY HAS BEEN WIPED OUT ***")
    );

    for knight in &party {
        assert!(!knight.is_alive());
        assert_eq!(knight.heal(50), 0);
        assert_eq!(knight.health(), 0);
        assert_eq!(knight.snapshot().battles_won, 0);
    }
}

#[tokio::test]
async fn begin_runs_below_quorum() {
    let ctx = scripted_context(FixedDice::PLAIN);
    let party = knights(&["Theron"]);
    let encounter = Encounter::with_enemy(1, Enemy::new("Goblin", 25, 6), no_rest(), ctx);

    assert!(!encounter.begin());
    assert_eq!(encounter.enter(&party[0]), JoinOutcome::Joined);
    assert!(encounter.begin());
    assert!(!encounter.begin());

    let outcome = encounter.wait_resolved().await.expect("encounter resolves");
    assert_eq!(outcome, EncounterOutcome::Victory { gold: 30 });
}

#[tokio::test]
async fn bypass_hits_every_living_hero_once() {
    let ctx = scripted_context(FixedDice::PLAIN);
    let party = knights(&["Theron", "Galahad", "Percival"]);
    party[2].take_damage(10_000);
    let encounter = Encounter::with_enemy(1, Enemy::new("Troll", 80, 10), HashSet::new(), ctx);

    let damage = encounter.apply_equal_damage_to_all(&party);
    assert_eq!(damage, 17);
    assert_eq!(party[0].health(), 183);
    assert_eq!(party[1].health(), 183);
    assert_eq!(party[2].health(), 0);
    assert_eq!(encounter.status(), EncounterStatus::Forming);
    assert!(party[2].log().iter().all(|line| !line.contains("Troll hits")));
}
