//! Game constants — item kinds and tuning defaults.
//!
//! Simple `u8` constants with no engine dependency. The harness and any
//! host use these to tag candidate items.

pub mod item_kinds {
    /// Floating rubbish; the only thing a cleanup net should collect.
    pub const TRASH: u8 = 0;
    /// Wildlife (turtles, ducks). Netting these is never rewarded.
    pub const FRIENDLY: u8 = 1;

    pub fn name(kind: u8) -> &'static str {
        match kind {
            TRASH => "Trash",
            FRIENDLY => "Friendly",
            _ => "Unknown",
        }
    }

    pub fn is_collectible(kind: u8) -> bool {
        kind == TRASH
    }
}

/// Defaults matching the designer-tuned values of the cleanup minigame.
pub mod defaults {
    pub const MIN_SAMPLE_SPACING: f32 = 1.0;
    pub const FADE_DURATION: f32 = 2.0;
    pub const MAX_TRAIL_LENGTH: f32 = 50.0;
    pub const CLOSE_DISTANCE: f32 = 1.0;
    pub const SEGMENT_SKIP_COUNT: usize = 8;
    pub const FLASH_DURATION: f32 = 1.0;

    pub const TOTAL_RUBBISH: u32 = 10;
    pub const LEVEL_TIME: f32 = 300.0;
    pub const SPAWN_INTERVAL: f32 = 5.0;
    pub const SPAWN_AREA: (f32, f32) = (50.0, 50.0);
    /// Hull reach for scooping rubbish up by driving over it.
    pub const PICKUP_RADIUS: f32 = 1.0;
}
