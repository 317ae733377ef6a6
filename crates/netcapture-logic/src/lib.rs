//! Pure net capture logic for the boat cleanup minigame.
//!
//! This crate contains the capture algorithm and level rules with no
//! engine, renderer, or physics dependency. Functions take plain data and
//! return results, so everything is unit-testable and any host loop can
//! drive it one tick at a time.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Net tuning parameters and validation |
//! | [`constants`] | Item kinds and designer defaults (u8 IDs) |
//! | [`geometry`] | Planar points, bounds, shoelace area, even-odd containment |
//! | [`level`] | Cleanup level clock, rubbish spawning, win/lose and stars |
//! | [`loop_detect`] | Closure detection against the oldest nearby sample |
//! | [`polygon`] | Capture polygons and enclosed-item collection |
//! | [`session`] | Idle/Drawing/Closed state machine driven per tick |
//! | [`trail`] | Spacing-, age- and length-bounded boat trail |

pub mod config;
pub mod constants;
pub mod geometry;
pub mod level;
pub mod loop_detect;
pub mod polygon;
pub mod session;
pub mod trail;
