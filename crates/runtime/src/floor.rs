//! Floor controller: current floor, room batch, and the per-floor shop.
//!
//! Room state sits behind a `tokio::sync::RwLock`. Many readers query rooms
//! and shop availability during a floor; regeneration takes the write lock
//! and swaps the whole batch in one assignment, so a reader never sees a
//! partially rebuilt list.

use game_core::floor::{generate_rooms, room_options};
use game_core::{GameConfig, Milestone, RoomBatch, RoomOptions};
use tokio::sync::RwLock;

use crate::actor::ActorHandle;
use crate::context::RuntimeContext;
use crate::events::FloorEvent;
use crate::rooms::{Shop, ShopOutcome};

#[derive(Debug)]
struct FloorState {
    current_floor: u32,
    rooms: RoomBatch,
    shop_visited: bool,
}

#[derive(Debug)]
pub struct FloorController {
    ctx: RuntimeContext,
    config: GameConfig,
    state: RwLock<FloorState>,
}

impl FloorController {
    /// Starts at floor 1 with a generated room batch.
    pub fn new(ctx: RuntimeContext) -> Self {
        let config = ctx.config().game.clone();
        let rooms = generate_rooms(ctx.dice());
        ctx.set_game_active(true);
        Self {
            state: RwLock::new(FloorState {
                current_floor: 1,
                rooms,
                shop_visited: false,
            }),
            config,
            ctx,
        }
    }

    /// Replaces the room batch and reopens the shop.
    pub async fn generate_floor_rooms(&self) -> RoomBatch {
        let mut state = self.state.write().await;
        self.regenerate(&mut state)
    }

    fn regenerate(&self, state: &mut FloorState) -> RoomBatch {
        state.rooms = generate_rooms(self.ctx.dice());
        state.shop_visited = false;
        tracing::debug!(
            target: "runtime::floor",
            floor = state.current_floor,
            rooms = ?state.rooms,
            "rooms generated"
        );
        self.ctx.events().publish(FloorEvent::RoomsGenerated {
            floor: state.current_floor,
            rooms: state.rooms.to_vec(),
        });
        state.rooms.clone()
    }

    /// Snapshot of the current batch.
    pub async fn rooms(&self) -> RoomBatch {
        self.state.read().await.rooms.clone()
    }

    /// Options for one room choice; the shop only appears while available.
    pub async fn room_options(&self) -> RoomOptions {
        let available = self.is_shop_available().await;
        room_options(available, self.ctx.dice())
    }

    /// The floor's merchant while it still trades.
    ///
    /// Every floor has one, whether or not a batch slot shows it. Returns
    /// `None` once the shop was visited. Use [`visit_shop`](Self::visit_shop)
    /// to claim it; this is only a peek.
    pub async fn shop(&self) -> Option<Shop> {
        let state = self.state.read().await;
        (!state.shop_visited).then(|| Shop::new(state.current_floor))
    }

    pub async fn is_shop_available(&self) -> bool {
        !self.state.read().await.shop_visited
    }

    pub async fn mark_shop_visited(&self) {
        let mut state = self.state.write().await;
        state.shop_visited = true;
    }

    /// Claims the shop for `actor` and serves one offer.
    ///
    /// Check and mark happen under one write lock, so only one visit per
    /// floor succeeds; every later attempt sees [`ShopOutcome::Closed`].
    pub async fn visit_shop(&self, actor: &ActorHandle) -> ShopOutcome {
        let floor = {
            let mut state = self.state.write().await;
            if state.shop_visited {
                None
            } else {
                state.shop_visited = true;
                Some(state.current_floor)
            }
        };
        match floor {
            Some(floor) => {
                self.ctx.events().publish(FloorEvent::ShopVisited {
                    floor,
                    actor: actor.name().to_owned(),
                });
                Shop::new(floor).serve(actor, self.ctx.dice())
            }
            None => Shop::closed(actor),
        }
    }

    /// Advances one floor and regenerates rooms while still within the run.
    ///
    /// Milestone floors get no rooms; they belong to the boss. Passing the
    /// last floor ends the game. Returns the new floor number.
    pub async fn next_floor(&self) -> u32 {
        let mut state = self.state.write().await;
        state.current_floor += 1;
        let floor = state.current_floor;
        if floor <= self.config.max_floors {
            tracing::info!(target: "runtime::floor", floor, "advancing");
            self.ctx.events().publish(FloorEvent::Advanced { floor });
            if self.config.milestone(floor).is_none() {
                self.regenerate(&mut state);
            } else {
                state.rooms.clear();
                state.shop_visited = false;
            }
        } else {
            tracing::info!(target: "runtime::floor", floor, "run complete");
            self.ctx.set_game_active(false);
            self.ctx.events().publish(FloorEvent::GameOver { floor });
        }
        floor
    }

    pub async fn current_floor(&self) -> u32 {
        self.state.read().await.current_floor
    }

    pub fn max_floors(&self) -> u32 {
        self.config.max_floors
    }

    pub fn is_game_active(&self) -> bool {
        self.ctx.is_game_active()
    }

    pub fn set_game_active(&self, active: bool) {
        self.ctx.set_game_active(active);
    }

    /// Boss kind for `floor`, if it is a milestone.
    pub fn milestone(&self, floor: u32) -> Option<Milestone> {
        self.config.milestone(floor)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
