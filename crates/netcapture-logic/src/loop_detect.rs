//! Loop closure detection on the trail.
//!
//! After each accepted sample the newest point is compared against older
//! points. Candidates are scanned from the **oldest** end and the first one
//! within `close_distance` wins, so the enclosed loop is as large as
//! possible. The most recent `segment_skip_count` samples are never
//! candidates; otherwise the trail would close against the sample it was
//! just drawn from.

use crate::config::NetConfig;
use crate::trail::TrailBuffer;

/// Fewest samples that can enclose an area.
pub const MIN_LOOP_POINTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopDetector {
    pub close_distance: f32,
    pub segment_skip_count: usize,
}

impl LoopDetector {
    pub fn new(close_distance: f32, segment_skip_count: usize) -> Self {
        Self {
            close_distance,
            segment_skip_count,
        }
    }

    pub fn from_config(config: &NetConfig) -> Self {
        Self::new(config.close_distance, config.segment_skip_count)
    }

    /// Index of the oldest sample the newest sample closes against, if any.
    ///
    /// A closure whose sub-loop `[index ..= newest]` would have fewer than
    /// [`MIN_LOOP_POINTS`] samples is reported as no closure.
    pub fn detect(&self, trail: &TrailBuffer) -> Option<usize> {
        let newest_index = trail.len().checked_sub(1)?;
        let newest = trail.newest()?.point;
        let last_candidate = newest_index.checked_sub(self.segment_skip_count)?;

        let index = trail
            .samples()
            .take(last_candidate + 1)
            .position(|s| s.point.distance(newest) < self.close_distance)?;

        if newest_index - index + 1 < MIN_LOOP_POINTS {
            log::debug!(
                "closure at {} rejected: only {} points in loop",
                index,
                newest_index - index + 1
            );
            return None;
        }
        Some(index)
    }
}
