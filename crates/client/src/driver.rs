//! Automatic driver that plays a whole run without user input.
//!
//! Each regular floor offers the party a number of room choices. Before every
//! choice the party tends itself (potions, better gear, a rest when badly
//! hurt), then the driver picks one of the offered rooms. Milestone floors are
//! a boss fight instead.

use std::collections::HashSet;

use anyhow::Result;
use game_core::{ActorSnapshot, GameConfig, Milestone, PotionKind, RoomKind, RunSummary};
use runtime::{
    ActorHandle, ActorId, BossEncounter, BossRound, Chest, Encounter, FloorController, JoinOutcome,
    Party, RuntimeContext, RuntimeError, Topic, party_rest,
};
use tokio::sync::broadcast::error::RecvError;

/// Below this share of max health a hero drinks a healing potion.
const POTION_THRESHOLD_PERCENT: u32 = 40;
/// Below this average share of max health the party rests.
const REST_THRESHOLD_PERCENT: u32 = 50;
const LOW_MANA: u32 = 20;

pub struct Driver {
    ctx: RuntimeContext,
    party: Party,
    floor: FloorController,
    stream_events: bool,
}

impl Driver {
    pub fn new(ctx: RuntimeContext, stream_events: bool) -> Self {
        Self {
            party: Party::default_roster(ctx.clone()),
            floor: FloorController::new(ctx.clone()),
            ctx,
            stream_events,
        }
    }

    /// Plays floors until the last boss falls, the party wipes, or the run
    /// runs out of floors.
    pub async fn run(self) -> Result<RunSummary> {
        if self.stream_events {
            spawn_event_stream(&self.ctx);
        }

        self.banner("WELCOME TO THE DESCENT: CHRONICLES OF THREE HEROES");
        for member in self.party.members() {
            let snapshot = member.snapshot();
            self.say(format!(
                "- {} the {} | Health: {} | Mana: {}",
                snapshot.name, snapshot.kind, snapshot.max_health, snapshot.max_mana
            ));
        }
        self.party.start_adventure().await?;
        self.flush_private_logs();

        while self.floor.is_game_active() {
            let current = self.floor.current_floor().await;
            if current > self.floor.max_floors() {
                break;
            }
            self.banner(&format!("FLOOR {current}/{}", self.floor.max_floors()));

            if let Some(milestone) = self.floor.milestone(current) {
                match self.boss_floor(current, milestone).await {
                    Ok(BossRound::Defeated) if milestone == Milestone::Final => {
                        self.banner("*** ADVENTURE COMPLETE ***");
                        self.floor.set_game_active(false);
                        break;
                    }
                    Ok(BossRound::Defeated) => {
                        self.floor.next_floor().await;
                        continue;
                    }
                    Ok(BossRound::Fallen | BossRound::Continue) => break,
                    Err(RuntimeError::MissingBoss { floor }) => {
                        tracing::warn!(floor, "milestone without a guardian, playing a regular floor");
                        self.floor.generate_floor_rooms().await;
                    }
                    Err(err) => return Err(err.into()),
                }
            }

            self.play_floor(current).await?;
            if self.party.is_wiped() {
                self.banner("*** ALL HEROES HAVE FALLEN ***");
                self.floor.set_game_active(false);
                break;
            }
            self.floor.next_floor().await;
        }

        Ok(self.party.summary())
    }

    async fn boss_floor(&self, floor: u32, milestone: Milestone) -> runtime::Result<BossRound> {
        let mut fight = BossEncounter::for_milestone(floor, milestone, self.ctx.clone())?;
        let roster = self.party.members();
        fight.entrance(roster);
        self.tend_party();
        let result = fight.run_to_completion(roster).await;
        self.print_lines(fight.take_log());
        self.flush_private_logs();
        Ok(result)
    }

    async fn play_floor(&self, floor: u32) -> Result<()> {
        let choices = self.floor.config().room_choices_per_floor;
        for choice in 1..=choices {
            if !self.floor.is_game_active() || self.party.is_wiped() {
                break;
            }
            self.say(format!("\n[FLOOR {floor}] [ROOM {choice} OF {choices}]"));

            self.tend_party();
            let resting = if self.needs_rest() {
                let resting = party_rest(self.party.members());
                self.say("The party rests: healed 25 HP and refilled mana for all living heroes.");
                resting
            } else {
                HashSet::new()
            };
            self.flush_private_logs();

            let options = self.floor.room_options().await;
            let descriptions: Vec<String> = options
                .iter()
                .map(|room| format!("{room} - {}", room.description()))
                .collect();
            self.say(format!("Options: {}", descriptions.join(" | ")));

            match self.choose_room(&options) {
                RoomKind::Chest => self.chest_room(),
                RoomKind::Shop => self.shop_room().await,
                RoomKind::Combat => self.combat_room(floor, resting).await?,
            }
            self.flush_private_logs();
        }
        Ok(())
    }

    /// Chest first, then the shop when someone is hurt and can pay, else combat.
    fn choose_room(&self, options: &[RoomKind]) -> RoomKind {
        if options.contains(&RoomKind::Chest) {
            return RoomKind::Chest;
        }
        let wounded_with_gold = self.party.living().iter().any(|hero| {
            hero.gold() >= runtime::HEALING_PRICE
                && health_percent(&hero.snapshot()) < REST_THRESHOLD_PERCENT
        });
        if wounded_with_gold && options.contains(&RoomKind::Shop) {
            return RoomKind::Shop;
        }
        RoomKind::Combat
    }

    fn chest_room(&self) {
        let living = self.party.living();
        let Some(hero) = living.get(self.ctx.dice().pick(living.len())) else {
            return;
        };
        self.say("*** TREASURE CHEST ***");
        let loot = Chest::new().open(hero, self.ctx.dice());
        tracing::debug!(hero = %hero.name(), ?loot, "chest looted");
    }

    async fn shop_room(&self) {
        let living = self.party.living();
        let Some(hero) = living
            .iter()
            .min_by_key(|hero| health_percent(&hero.snapshot()))
        else {
            return;
        };
        self.say("*** MYSTERIOUS SHOP ***");
        let outcome = self.floor.visit_shop(hero).await;
        tracing::debug!(hero = %hero.name(), ?outcome, "shop visited");
    }

    async fn combat_room(&self, floor: u32, resting: HashSet<ActorId>) -> Result<()> {
        self.say("*** COMBAT ENGAGED ***");
        let skip_fight = !resting.is_empty();
        let encounter = Encounter::new(floor, resting, self.ctx.clone());
        let roster = self.party.members();

        if skip_fight {
            self.say("Combat skipped due to rest: the enemy lashes out at the whole party!");
            let damage = encounter.apply_equal_damage_to_all(roster);
            self.print_lines(encounter.take_log());
            self.say(format!("Each living hero took {damage} damage."));
            return Ok(());
        }

        for hero in roster.iter().filter(|hero| hero.is_alive()) {
            if hero.mana() == hero.max_mana() {
                hero.use_ability();
            }
        }

        let mut started = false;
        for hero in roster {
            started |= encounter.enter(hero) == JoinOutcome::Started;
        }
        if !started && !encounter.begin() {
            return Ok(());
        }

        let outcome = encounter.wait_resolved().await?;
        self.print_lines(encounter.take_log());
        tracing::info!(floor, ?outcome, "combat resolved");
        Ok(())
    }

    /// Potions for the badly hurt or drained, and any better gear in the bag.
    fn tend_party(&self) {
        for hero in self.party.living() {
            let snapshot = hero.snapshot();
            if health_percent(&snapshot) < POTION_THRESHOLD_PERCENT {
                drink_healing_potion(&hero);
            }
            if snapshot.mana < LOW_MANA && hero.potion_count(PotionKind::Mana) > 0 {
                hero.drink_potion(PotionKind::Mana);
            }
            equip_upgrades(&hero);
        }
    }

    fn needs_rest(&self) -> bool {
        let living: Vec<ActorSnapshot> = self
            .party
            .living()
            .iter()
            .map(ActorHandle::snapshot)
            .collect();
        if living.is_empty() {
            return false;
        }
        let average = living.iter().map(health_percent).sum::<u32>() / living.len() as u32;
        average < REST_THRESHOLD_PERCENT
    }

    /// Prints and clears every hero's private events; shared narration
    /// already went out through the encounter log.
    fn flush_private_logs(&self) {
        for member in self.party.members() {
            let lines: Vec<String> = member
                .take_log()
                .into_iter()
                .filter(|line| line.starts_with('['))
                .collect();
            self.print_lines(lines);
        }
    }

    fn print_lines(&self, lines: Vec<String>) {
        for line in lines {
            self.say(line);
        }
    }

    fn banner(&self, title: &str) {
        let rule = "=".repeat(80);
        self.say(format!("\n{rule}\n{title}\n{rule}"));
    }

    /// Human-readable output; suppressed while stdout carries JSON events.
    fn say(&self, line: impl AsRef<str>) {
        if !self.stream_events {
            println!("{}", line.as_ref());
        }
    }
}

/// Equips bag items that beat what the hero wears, one at a time.
fn equip_upgrades(hero: &ActorHandle) {
    for _ in 0..GameConfig::INVENTORY_CAPACITY {
        let inventory = hero.inventory_snapshot();
        let upgrade = inventory.bag().iter().enumerate().find(|(_, item)| {
            inventory
                .equipped(item.kind)
                .is_none_or(|worn| item.level > worn.level)
        });
        let Some((index, item)) = upgrade else {
            return;
        };
        if let Err(err) = hero.equip(index) {
            tracing::warn!(hero = %hero.name(), error = %err, "equip failed");
            return;
        }
        hero.log_event(format!("{} equipped {}.", hero.name(), item.kind));
    }
}

/// Vigor first, plain health potions when none is left.
fn drink_healing_potion(hero: &ActorHandle) {
    if !hero.drink_potion(PotionKind::Vigor) {
        hero.drink_potion(PotionKind::Health);
    }
}

fn health_percent(snapshot: &ActorSnapshot) -> u32 {
    if snapshot.max_health == 0 {
        return 0;
    }
    snapshot.health * 100 / snapshot.max_health
}

/// Mirrors every bus topic to stdout as JSON lines.
fn spawn_event_stream(ctx: &RuntimeContext) {
    for (topic, mut events) in ctx.events().subscribe_multiple(&Topic::ALL) {
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => match serde_json::to_string(&event) {
                        Ok(line) => println!("{line}"),
                        Err(err) => tracing::warn!(?topic, error = %err, "event not serializable"),
                    },
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(?topic, skipped, "event stream lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }
}

/// Final statistics and rankings.
pub fn print_summary(summary: &RunSummary) {
    let rule = "=".repeat(80);
    println!("\n{rule}\n*** GAME STATISTICS ***\n{rule}");
    println!("Survivors: {}", summary.survivors.len());
    println!("Total battles won: {}", summary.totals.battles_won);
    println!("Total items collected: {}", summary.totals.items_collected);
    println!("Total gold: {}", summary.totals.gold);

    println!("\n--- Ranked by battles won ---");
    for (place, entry) in summary.by_battles.iter().enumerate() {
        println!("{}. {} ({}) - {}", place + 1, entry.name, entry.kind, entry.value);
    }
    println!("\n--- Ranked by gold ---");
    for (place, entry) in summary.by_gold.iter().enumerate() {
        println!("{}. {} ({}) - {}", place + 1, entry.name, entry.kind, entry.value);
    }
    if let Some(entry) = &summary.highest_level {
        println!("\n*** HIGHEST LEVEL: {} (Level {}) ***", entry.name, entry.value);
    }
}
