//! Boat cleanup level rules.
//!
//! A level is a timed round: rubbish spawns at random spots on the water
//! every `spawn_interval` seconds and the player nets it. Collecting
//! `total_rubbish` pieces before the clock runs out wins the level.
//!
//! # States
//!
//! | State | Clock | Spawning | Captures |
//! |-------|-------|----------|----------|
//! | `Intermission` | paused | no | ignored |
//! | `Playing` | counts down | every `spawn_interval` | applied |
//! | `EndGame` | stopped | no | ignored |
//!
//! The level owns the live item set; [`CleanupLevel::items`] is what a
//! [`crate::session::NetSession`] is handed when a net closes. Rubbish can
//! also be picked up one piece at a time by driving over it
//! ([`CleanupLevel::collect_near`]).

use crate::constants::{defaults, item_kinds};
use crate::geometry::Vec2;
use crate::polygon::CandidateItem;
use crate::session::Capture;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning for one cleanup level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Pieces of rubbish needed to win.
    pub total_rubbish: u32,
    /// Seconds on the clock.
    pub level_time: f32,
    /// Seconds between rubbish spawns.
    pub spawn_interval: f32,
    /// Width and depth of the spawn rectangle, centred on the origin.
    pub spawn_area: (f32, f32),
    /// Fraction of `level_time` that must remain for 2 and 3 stars.
    pub star_thresholds: (f32, f32),
    /// Seed for spawn positions; same seed, same level.
    pub seed: u64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            total_rubbish: defaults::TOTAL_RUBBISH,
            level_time: defaults::LEVEL_TIME,
            spawn_interval: defaults::SPAWN_INTERVAL,
            spawn_area: defaults::SPAWN_AREA,
            star_thresholds: (0.25, 0.5),
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelConfigError {
    #[error("total_rubbish must be at least 1")]
    NoRubbish,
    #[error("level_time must be positive and finite (got {0})")]
    LevelTime(f32),
    #[error("spawn_interval must be positive and finite (got {0})")]
    SpawnInterval(f32),
    #[error("spawn_area must be non-negative and finite (got {0}×{1})")]
    SpawnArea(f32, f32),
    #[error("star thresholds must satisfy 0 <= two <= three <= 1 (got {0}, {1})")]
    StarThresholds(f32, f32),
}

/// Validate a level configuration, returning all errors found.
pub fn validate_level_config(config: &LevelConfig) -> Vec<LevelConfigError> {
    let mut errors = Vec::new();
    let positive = |v: f32| v.is_finite() && v > 0.0;

    if config.total_rubbish == 0 {
        errors.push(LevelConfigError::NoRubbish);
    }
    if !positive(config.level_time) {
        errors.push(LevelConfigError::LevelTime(config.level_time));
    }
    if !positive(config.spawn_interval) {
        errors.push(LevelConfigError::SpawnInterval(config.spawn_interval));
    }
    let (w, d) = config.spawn_area;
    if !(w.is_finite() && d.is_finite() && w >= 0.0 && d >= 0.0) {
        errors.push(LevelConfigError::SpawnArea(w, d));
    }
    let (two, three) = config.star_thresholds;
    if !(0.0..=1.0).contains(&two) || !(0.0..=1.0).contains(&three) || two > three {
        errors.push(LevelConfigError::StarThresholds(two, three));
    }

    errors
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LevelState {
    Intermission,
    Playing,
    EndGame { won: bool, stars: u8 },
}

/// Something the host should react to (spawn a sprite, update the HUD...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LevelEvent {
    Spawned(CandidateItem),
    Collected { id: u32, total: u32 },
    Ended { won: bool, stars: u8 },
}

/// Stars for a finished level: none for a loss, 1–3 for a win depending
/// on how much of the clock was left.
pub fn star_reward(won: bool, time_left: f32, level_time: f32, thresholds: (f32, f32)) -> u8 {
    if !won {
        return 0;
    }
    let remaining = (time_left / level_time).clamp(0.0, 1.0);
    if remaining >= thresholds.1 {
        3
    } else if remaining >= thresholds.0 {
        2
    } else {
        1
    }
}

#[derive(Debug)]
pub struct CleanupLevel {
    config: LevelConfig,
    state: LevelState,
    time_left: f32,
    since_last_spawn: f32,
    collected: u32,
    items: Vec<CandidateItem>,
    next_id: u32,
    rng: StdRng,
}

impl CleanupLevel {
    pub fn new(config: LevelConfig) -> Result<Self, LevelConfigError> {
        if let Some(err) = validate_level_config(&config).into_iter().next() {
            log::warn!("rejected level config: {}", err);
            return Err(err);
        }
        Ok(Self {
            state: LevelState::Intermission,
            time_left: config.level_time,
            since_last_spawn: 0.0,
            collected: 0,
            items: Vec::new(),
            next_id: 1,
            rng: StdRng::seed_from_u64(config.seed),
            config,
        })
    }

    /// Leave the intermission and start the clock.
    pub fn end_intermission(&mut self) {
        if self.state == LevelState::Intermission {
            log::info!(
                "cleanup level started: {} rubbish in {:.0}s",
                self.config.total_rubbish,
                self.config.level_time
            );
            self.state = LevelState::Playing;
        }
    }

    /// Place an item directly, e.g. level-authored wildlife or rubbish.
    pub fn place(&mut self, kind: u8, position: Vec2) -> CandidateItem {
        let item = CandidateItem::new(self.next_id, kind, position);
        self.next_id += 1;
        self.items.push(item);
        item
    }

    /// Advance the clock by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> Vec<LevelEvent> {
        let mut events = Vec::new();
        if self.state != LevelState::Playing {
            return events;
        }

        self.time_left -= dt;
        if self.time_left <= 0.0 {
            self.time_left = 0.0;
            events.push(self.end(false));
            return events;
        }

        self.since_last_spawn += dt;
        if self.since_last_spawn >= self.config.spawn_interval
            && self.collected < self.config.total_rubbish
        {
            self.since_last_spawn = 0.0;
            let item = self.spawn_rubbish();
            events.push(LevelEvent::Spawned(item));
        }
        events
    }

    fn spawn_rubbish(&mut self) -> CandidateItem {
        let (w, d) = self.config.spawn_area;
        let x = if w > 0.0 {
            self.rng.gen_range(-w / 2.0..=w / 2.0)
        } else {
            0.0
        };
        let y = if d > 0.0 {
            self.rng.gen_range(-d / 2.0..=d / 2.0)
        } else {
            0.0
        };
        let item = self.place(item_kinds::TRASH, Vec2::new(x, y));
        log::debug!("spawned rubbish #{} at ({:.1}, {:.1})", item.id, x, y);
        item
    }

    /// Apply a closed net: captured rubbish is removed and counted. Other
    /// kinds are left in place.
    pub fn apply_capture(&mut self, capture: &Capture) -> Vec<LevelEvent> {
        let mut events = Vec::new();
        if self.state != LevelState::Playing {
            return events;
        }

        for &id in &capture.captured {
            let Some(index) = self
                .items
                .iter()
                .position(|i| i.id == id && item_kinds::is_collectible(i.kind))
            else {
                continue;
            };
            events.push(self.take(index));
        }

        self.check_win(&mut events);
        events
    }

    /// Pick up at most one piece of rubbish within `radius` of `position`,
    /// the first one in spawn order. Wildlife is never picked up.
    pub fn collect_near(&mut self, position: Vec2, radius: f32) -> Vec<LevelEvent> {
        let mut events = Vec::new();
        if self.state != LevelState::Playing {
            return events;
        }

        let nearby = self.items.iter().position(|i| {
            item_kinds::is_collectible(i.kind) && i.position.distance(position) <= radius
        });
        if let Some(index) = nearby {
            events.push(self.take(index));
            self.check_win(&mut events);
        }
        events
    }

    fn take(&mut self, index: usize) -> LevelEvent {
        let item = self.items.remove(index);
        self.collected += 1;
        log::debug!("collected rubbish #{} ({} total)", item.id, self.collected);
        LevelEvent::Collected {
            id: item.id,
            total: self.collected,
        }
    }

    fn check_win(&mut self, events: &mut Vec<LevelEvent>) {
        if self.collected >= self.config.total_rubbish {
            events.push(self.end(true));
        }
    }

    fn end(&mut self, won: bool) -> LevelEvent {
        let stars = star_reward(
            won,
            self.time_left,
            self.config.level_time,
            self.config.star_thresholds,
        );
        log::info!(
            "cleanup level over: {} with {} stars ({}/{} collected, {:.1}s left)",
            if won { "won" } else { "lost" },
            stars,
            self.collected,
            self.config.total_rubbish,
            self.time_left
        );
        self.state = LevelState::EndGame { won, stars };
        LevelEvent::Ended { won, stars }
    }

    /// Live items on the water.
    pub fn items(&self) -> Vec<CandidateItem> {
        self.items.clone()
    }

    pub fn state(&self) -> LevelState {
        self.state
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }
}
