/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of floors in a run. The last floor is always the final boss.
    pub max_floors: u32,
    /// Quorum required before an encounter starts its round loop.
    pub party_size: usize,
    /// Room choices the party makes on a regular floor.
    pub room_choices_per_floor: usize,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Rooms generated per floor batch.
    pub const ROOMS_PER_FLOOR: usize = 5;
    /// Room options offered for each choice.
    pub const ROOM_OPTIONS: usize = 3;
    /// Total items (bag + equipped + potion stacks) an inventory can hold.
    pub const INVENTORY_CAPACITY: usize = 50;

    // ===== progression =====
    pub const EXPERIENCE_PER_LEVEL: u32 = 100;
    pub const HEALTH_PER_LEVEL: u32 = 25;
    pub const MANA_PER_LEVEL: u32 = 10;
    pub const STARTING_GOLD: u32 = 100;
    /// Every Nth floor (except the last) is a milestone boss floor.
    pub const MILESTONE_INTERVAL: u32 = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_FLOORS: u32 = 15;
    pub const DEFAULT_PARTY_SIZE: usize = 3;
    pub const DEFAULT_ROOM_CHOICES: usize = 5;

    pub fn new() -> Self {
        Self {
            max_floors: Self::DEFAULT_MAX_FLOORS,
            party_size: Self::DEFAULT_PARTY_SIZE,
            room_choices_per_floor: Self::DEFAULT_ROOM_CHOICES,
        }
    }

    pub fn with_max_floors(max_floors: u32) -> Self {
        Self {
            max_floors,
            ..Self::new()
        }
    }

    /// Returns true when `floor` is handed to a boss encounter instead of rooms.
    pub fn is_milestone(&self, floor: u32) -> bool {
        floor == self.max_floors
            || (floor % Self::MILESTONE_INTERVAL == 0 && floor < self.max_floors)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
