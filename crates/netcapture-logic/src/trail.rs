//! The boat's recent path, kept as a bounded polyline.
//!
//! Samples are stored **oldest-first**: index 0 is the oldest sample and
//! the last index is the newest. Three limits keep the trail bounded:
//!
//! 1. Consecutive samples are at least `min_sample_spacing` apart
//! 2. Samples older than `fade_duration` are evicted from the front
//! 3. Total path length never exceeds `max_trail_length`
//!
//! ```
//! use netcapture_logic::geometry::Vec2;
//! use netcapture_logic::trail::TrailBuffer;
//!
//! let mut trail = TrailBuffer::new(1.0, 2.0, 50.0);
//! assert!(trail.add_sample(Vec2::new(0.0, 0.0), 0.0));
//! assert!(!trail.add_sample(Vec2::new(0.5, 0.0), 0.1)); // too close
//! assert!(trail.add_sample(Vec2::new(3.0, 0.0), 0.2));
//! assert_eq!(trail.path_length(), 3.0);
//! ```

use crate::config::NetConfig;
use crate::geometry::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A recorded boat position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub point: Vec2,
    /// Host time (seconds) at which the sample was taken.
    pub time: f32,
}

/// A trail point as handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailPoint {
    pub point: Vec2,
    /// `1.0` when fresh, falling to `0.0` at `fade_duration`.
    pub freshness: f32,
}

/// Freshness of a sample taken at `time`, seen at `now`.
///
/// A non-positive (or NaN) `fade_duration` means samples are faded on
/// arrival, so the result is `0.0`.
pub fn freshness(time: f32, now: f32, fade_duration: f32) -> f32 {
    if !(fade_duration > 0.0) {
        return 0.0;
    }
    (1.0 - (now - time) / fade_duration).clamp(0.0, 1.0)
}

/// Ordered, time- and length-bounded sequence of samples.
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    samples: VecDeque<Sample>,
    min_sample_spacing: f32,
    fade_duration: f32,
    max_trail_length: f32,
}

impl TrailBuffer {
    pub fn new(min_sample_spacing: f32, fade_duration: f32, max_trail_length: f32) -> Self {
        Self {
            samples: VecDeque::new(),
            min_sample_spacing,
            fade_duration,
            max_trail_length,
        }
    }

    pub fn from_config(config: &NetConfig) -> Self {
        Self::new(
            config.min_sample_spacing,
            config.fade_duration,
            config.max_trail_length,
        )
    }

    /// Append a sample unless it is closer than `min_sample_spacing` to the
    /// newest one. Accepted samples then trigger eviction and the length cap.
    ///
    /// Returns whether the sample was kept. A rejected sample is debounced,
    /// not an error.
    pub fn add_sample(&mut self, point: Vec2, time: f32) -> bool {
        if let Some(newest) = self.samples.back() {
            if newest.point.distance(point) < self.min_sample_spacing {
                return false;
            }
        }
        self.samples.push_back(Sample { point, time });
        self.evict_expired(time);
        self.enforce_max_length();
        true
    }

    /// Drop samples older than `fade_duration` from the oldest end.
    /// Returns how many were removed.
    pub fn evict_expired(&mut self, now: f32) -> usize {
        let mut removed = 0;
        while let Some(oldest) = self.samples.front() {
            if now - oldest.time <= self.fade_duration {
                break;
            }
            self.samples.pop_front();
            removed += 1;
        }
        removed
    }

    /// Drop oldest samples until the path is no longer than `max_trail_length`.
    /// The newest sample is always kept. Returns how many were removed.
    pub fn enforce_max_length(&mut self) -> usize {
        let mut removed = 0;
        while self.samples.len() > 1 && self.path_length() > self.max_trail_length {
            self.samples.pop_front();
            removed += 1;
        }
        removed
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Sum of distances between consecutive samples.
    pub fn path_length(&self) -> f32 {
        let mut total = 0.0;
        let mut prev: Option<Vec2> = None;
        for s in &self.samples {
            if let Some(p) = prev {
                total += p.distance(s.point);
            }
            prev = Some(s.point);
        }
        total
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn newest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn oldest(&self) -> Option<&Sample> {
        self.samples.front()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// Samples in order, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.iter()
    }

    /// Points from `start` to the newest sample, oldest first.
    pub fn points_from(&self, start: usize) -> Vec<Vec2> {
        self.samples.iter().skip(start).map(|s| s.point).collect()
    }

    /// Current points with their freshness at `now`, oldest first.
    /// Freshness is recomputed on every call.
    pub fn points_with_freshness(&self, now: f32) -> Vec<TrailPoint> {
        self.samples
            .iter()
            .map(|s| TrailPoint {
                point: s.point,
                freshness: freshness(s.time, now, self.fade_duration),
            })
            .collect()
    }

    pub fn fade_duration(&self) -> f32 {
        self.fade_duration
    }
}
