use game_content::SHOPKEEPER;
use game_core::{Dice, Equipment, EquipmentKind};
use serde::Serialize;

use crate::actor::ActorHandle;

/// Gold for a full restore of health and mana.
pub const HEALING_PRICE: u32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ShopOutcome {
    Healed,
    CannotAffordHealing,
    Purchased { item: Equipment, price: u32 },
    CannotAfford { item: Equipment, price: u32 },
    /// Paid for, but the bag had no room; the gold is refunded.
    InventoryFull { item: Equipment },
    /// The floor's shop was already used.
    Closed,
}

/// The wandering merchant of one floor.
///
/// Trading goes through [`FloorController::visit_shop`], which serves only
/// the visit that claimed the floor's shop.
///
/// [`FloorController::visit_shop`]: crate::FloorController::visit_shop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shop {
    floor: u32,
    keeper: &'static str,
}

impl Shop {
    pub fn new(floor: u32) -> Self {
        Self {
            floor,
            keeper: SHOPKEEPER,
        }
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn keeper(&self) -> &'static str {
        self.keeper
    }

    /// Narrates a visit to a shop that is no longer trading.
    pub fn closed(actor: &ActorHandle) -> ShopOutcome {
        actor.log_event("The shop is already closed!");
        ShopOutcome::Closed
    }

    /// Makes one offer to `actor`: full healing or a piece of equipment.
    pub(crate) fn serve(&self, actor: &ActorHandle, dice: &dyn Dice) -> ShopOutcome {
        actor.log_event(format!(
            "{} enters the mysterious shop of {}!",
            actor.name(),
            self.keeper
        ));
        let outcome = if dice.chance(50) {
            self.offer_healing(actor)
        } else {
            let item = Equipment::new(EquipmentKind::random(dice), actor.level() + 1);
            self.offer_equipment(actor, item)
        };
        tracing::debug!(
            target: "runtime::rooms",
            floor = self.floor,
            actor = %actor.name(),
            ?outcome,
            "shop visit"
        );
        outcome
    }

    fn offer_healing(&self, actor: &ActorHandle) -> ShopOutcome {
        actor.log_event(format!(
            "{} offers healing! Full restoration for {HEALING_PRICE} gold.",
            self.keeper
        ));
        if !actor.spend_gold(HEALING_PRICE) {
            actor.log_event("Not enough gold for healing!");
            return ShopOutcome::CannotAffordHealing;
        }
        actor.heal(actor.max_health());
        actor.restore_mana(actor.max_mana());
        actor.log_event(format!("{} is fully healed!", actor.name()));
        ShopOutcome::Healed
    }

    fn offer_equipment(&self, actor: &ActorHandle, item: Equipment) -> ShopOutcome {
        let price = item.kind.price();
        actor.log_event(format!("{} offers {item} for {price} gold.", self.keeper));
        if !actor.spend_gold(price) {
            actor.log_event("Not enough gold for purchase!");
            return ShopOutcome::CannotAfford { item, price };
        }
        if let Err(err) = actor.give_equipment(item) {
            actor.add_gold_silent(price);
            actor.log_event(format!("{} cannot carry it: {err}.", actor.name()));
            return ShopOutcome::InventoryFull { item };
        }
        actor.log_event(format!("{} purchased the item!", actor.name()));
        ShopOutcome::Purchased { item, price }
    }
}
