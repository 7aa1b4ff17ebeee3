//! Sequential boss fights and the party intro.

mod common;

use common::{FixedDice, knights, scripted_context, scripted_context_with};
use game_core::{Boss, BossProfile, Milestone};
use runtime::{
    BossEncounter, BossRound, EncounterEvent, Event, Party, RuntimeConfig, RuntimeError, Topic,
};

const GOLEM: BossProfile = BossProfile {
    name: "Golem",
    title: "Keeper of the Gate",
    max_health: 30,
    attack: 10,
    story: "The gate groans open.",
};

#[test]
fn boss_falls_mid_round_and_later_heroes_skip() {
    let ctx = scripted_context(FixedDice::PLAIN);
    let party = knights(&["Theron", "Galahad", "Percival"]);
    let mut fight = BossEncounter::new(5, Boss::new(GOLEM), ctx);

    assert_eq!(fight.battle_round(&party), BossRound::Defeated);
    assert!(fight.boss().is_defeated());

    let log = fight.log();
    assert!(log.iter().any(|line| line == "Theron strikes for 15 damage!"));
    assert!(log.iter().any(|line| line == "Golem counterattacks Theron for 15 damage!"));
    assert!(log.iter().any(|line| line == "Galahad strikes for 15 damage!"));
    assert!(!log.iter().any(|line| line.starts_with("Percival strikes")));
    assert!(!log.iter().any(|line| line.contains("counterattacks Galahad")));
    assert!(log.iter().any(|line| line == "*** GOLEM HAS BEEN DEFEATED! ***"));

    for knight in &party {
        assert_eq!(knight.gold(), 600);
        assert_eq!(knight.level(), 3);
        assert_eq!(knight.snapshot().battles_won, 1);
    }
}

#[tokio::test]
async fn a_fallen_party_ends_the_game() {
    let ctx = scripted_context(FixedDice::PLAIN);
    let mut events = ctx.events().subscribe(Topic::Encounter);
    let party = knights(&["Theron", "Galahad", "Percival"]);
    for knight in &party {
        knight.take_damage(190);
    }
    let mut fight = BossEncounter::for_milestone(15, Milestone::Final, ctx.clone())
        .expect("final boss exists");
    assert_eq!(fight.boss().name(), "Malachar");

    assert_eq!(fight.run_to_completion(&party).await, BossRound::Fallen);
    assert!(!ctx.is_game_active());
    assert_eq!(fight.boss().health(), 1000 - 45);
    assert!(party.iter().all(|knight| !knight.is_alive()));

    let mut fallen = false;
    while let Ok(event) = events.try_recv() {
        if let Event::Encounter(EncounterEvent::PartyFallen { floor }) = event {
            assert_eq!(floor, 15);
            fallen = true;
        }
    }
    assert!(fallen);
}

#[tokio::test]
async fn garth_goes_down_over_several_rounds() {
    let ctx = scripted_context(FixedDice::PLAIN);
    let mut events = ctx.events().subscribe(Topic::Encounter);
    let party = knights(&["Theron", "Galahad", "Percival"]);
    let mut fight =
        BossEncounter::for_milestone(5, Milestone::Floor(5), ctx).expect("floor 5 has a guardian");

    let banner = fight.entrance(&party);
    assert!(banner.iter().any(|line| line.contains("GUARDIAN OF THE DEPTHS")));
    assert_eq!(fight.run_to_completion(&party).await, BossRound::Defeated);
    assert!(party.iter().all(|knight| knight.is_alive()));

    let mut seen = Vec::new();
    while let Ok(Event::Encounter(event)) = events.try_recv() {
        seen.push(event);
    }
    assert!(banner.contains(&"Health: 300 | Attack: 25".to_owned()));
    assert!(matches!(
        seen.first(),
        Some(EncounterEvent::BossAppeared {
            floor: 5,
            health: 300,
            attack: 25,
            ..
        })
    ));
    assert!(matches!(seen.last(), Some(EncounterEvent::BossDefeated { floor: 5, .. })));
}

#[tokio::test]
async fn fights_stop_when_the_game_is_over() {
    let ctx = scripted_context(FixedDice::PLAIN);
    let party = knights(&["Theron"]);
    let mut fight = BossEncounter::new(5, Boss::new(GOLEM), ctx.clone());
    ctx.set_game_active(false);

    assert_eq!(fight.run_to_completion(&party).await, BossRound::Continue);
    assert_eq!(fight.boss().health(), 30);
}

#[test]
fn unguarded_milestones_are_an_error() {
    let ctx = scripted_context(FixedDice::PLAIN);
    let err = BossEncounter::for_milestone(20, Milestone::Floor(20), ctx).unwrap_err();
    assert!(matches!(err, RuntimeError::MissingBoss { floor: 20 }));
}

#[tokio::test(start_paused = true)]
async fn every_hero_introduces_themselves() {
    let ctx = scripted_context_with(RuntimeConfig::default(), FixedDice::PLAIN);
    let party = Party::default_roster(ctx);

    party.start_adventure().await.expect("intro tasks");

    let names: Vec<_> = party.members().iter().map(|m| m.name().to_owned()).collect();
    assert_eq!(names, ["Theron", "Shadowblade", "Arcanis"]);
    for member in party.members() {
        let intro = member.log();
        assert_eq!(intro.len(), 1);
        assert!(intro[0].contains("enters the dungeon"));
    }

    let summary = party.summary();
    assert_eq!(summary.survivors.len(), 3);
    assert_eq!(summary.totals.gold, 300);
}

#[test]
fn no_boss_after_game_over() {
    let ctx = scripted_context(FixedDice::PLAIN);
    ctx.set_game_active(false);
    let err = BossEncounter::for_milestone(5, Milestone::Floor(5), ctx).unwrap_err();
    assert!(matches!(err, RuntimeError::GameOver));
}
