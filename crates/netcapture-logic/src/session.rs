//! Net capture session — the per-boat state machine.
//!
//! ```text
//!            begin()            closure             flash over
//!   Idle ───────────▶ Drawing ──────────▶ Closed ─────────────▶ Drawing / Idle
//!     ▲                  │
//!     └──── cancel() ────┘
//! ```
//!
//! The host calls [`NetSession::tick`] once per fixed step with the boat's
//! position and the current time. Each tick is a complete synchronous
//! computation; nothing is scheduled or suspended. Sessions share no state,
//! so several boats simply own several sessions.
//!
//! ```
//! use netcapture_logic::config::NetConfig;
//! use netcapture_logic::geometry::Vec2;
//! use netcapture_logic::polygon::CandidateItem;
//! use netcapture_logic::session::{NetSession, TickOutcome};
//!
//! let config = NetConfig {
//!     close_distance: 1.5,
//!     segment_skip_count: 1,
//!     fade_duration: 60.0,
//!     ..Default::default()
//! };
//! let mut session = NetSession::new(config).unwrap();
//! session.begin();
//! let items = || vec![CandidateItem::new(7, 0, Vec2::new(5.0, 5.0))];
//! let path = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (1.0, 0.5)];
//! let mut captured = Vec::new();
//! for (i, (x, y)) in path.into_iter().enumerate() {
//!     if let TickOutcome::Captured(c) = session.tick(Vec2::new(x, y), i as f32, &items) {
//!         captured = c.captured;
//!     }
//! }
//! assert_eq!(captured, vec![7]);
//! ```

use crate::config::{validate_config, ConfigError, NetConfig};
use crate::geometry::Vec2;
use crate::loop_detect::LoopDetector;
use crate::polygon::{CandidateItem, CapturePolygon, PolygonCollector};
use crate::trail::{TrailBuffer, TrailPoint};
use serde::Serialize;

/// Where a session is in its draw/close cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum NetState {
    /// Not drawing; ticks are ignored.
    Idle,
    /// Recording the boat's trail and watching for closure.
    Drawing,
    /// A loop just closed; held until `hold_until` before resetting.
    Closed { hold_until: f32 },
}

/// Result of a successful loop closure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Capture {
    /// Index into the trail (oldest-first) where the loop closed.
    pub closure_index: usize,
    pub polygon: CapturePolygon,
    /// Ids of enclosed items, in the order the host supplied them.
    pub captured: Vec<u32>,
    /// Host time of the closing sample.
    pub time: f32,
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Session idle; nothing recorded.
    Inactive,
    /// Position too close to the previous sample (or not finite).
    Rejected,
    /// Sample recorded, no closure.
    Extended,
    /// The trail closed into a loop.
    Captured(Capture),
    /// Closed net still being shown.
    Holding,
    /// Hold period ended; session went back to drawing or idle. When it
    /// went back to drawing, the tick's position is the new trail's first
    /// sample.
    Reset,
}

#[derive(Debug)]
pub struct NetSession {
    config: NetConfig,
    trail: TrailBuffer,
    detector: LoopDetector,
    collector: PolygonCollector,
    state: NetState,
    last_capture: Option<Capture>,
    captures: u32,
}

impl NetSession {
    /// Create an idle session. The configuration is validated here and the
    /// first problem found is returned.
    pub fn new(config: NetConfig) -> Result<Self, ConfigError> {
        if let Some(err) = validate_config(&config).into_iter().next() {
            log::warn!("rejected net config: {}", err);
            return Err(err);
        }
        Ok(Self {
            trail: TrailBuffer::from_config(&config),
            detector: LoopDetector::from_config(&config),
            collector: PolygonCollector::any(),
            config,
            state: NetState::Idle,
            last_capture: None,
            captures: 0,
        })
    }

    /// Restrict which item kinds a capture reports.
    pub fn with_collector(mut self, collector: PolygonCollector) -> Self {
        self.collector = collector;
        self
    }

    /// Start drawing a fresh trail. Ignored unless idle.
    pub fn begin(&mut self) {
        if self.state == NetState::Idle {
            self.trail.clear();
            self.state = NetState::Drawing;
        }
    }

    /// Abandon the current trail. Only meaningful while drawing.
    pub fn cancel(&mut self) {
        if self.state == NetState::Drawing {
            log::debug!("net cancelled with {} samples", self.trail.len());
            self.trail.clear();
            self.state = NetState::Idle;
        }
    }

    /// Advance one step.
    ///
    /// `items` is only invoked when a loop closes, so the host can build the
    /// candidate list lazily from its live scene state.
    pub fn tick(
        &mut self,
        position: Vec2,
        now: f32,
        items: &dyn Fn() -> Vec<CandidateItem>,
    ) -> TickOutcome {
        match self.state {
            NetState::Idle => TickOutcome::Inactive,
            NetState::Closed { hold_until } => {
                if now < hold_until {
                    return TickOutcome::Holding;
                }
                self.trail.clear();
                self.state = if self.config.auto_restart {
                    NetState::Drawing
                } else {
                    NetState::Idle
                };
                log::debug!("net reset to {:?}", self.state);
                if self.state == NetState::Drawing {
                    // A single sample cannot close, so only Extended or Rejected come back.
                    self.draw(position, now, items);
                }
                TickOutcome::Reset
            }
            NetState::Drawing => self.draw(position, now, items),
        }
    }

    fn draw(
        &mut self,
        position: Vec2,
        now: f32,
        items: &dyn Fn() -> Vec<CandidateItem>,
    ) -> TickOutcome {
        self.trail.evict_expired(now);
        if !position.is_finite() || !self.trail.add_sample(position, now) {
            return TickOutcome::Rejected;
        }

        let Some(closure_index) = self.detector.detect(&self.trail) else {
            return TickOutcome::Extended;
        };
        let Some(polygon) = CapturePolygon::from_trail(&self.trail, closure_index) else {
            return TickOutcome::Extended;
        };

        let candidates = items();
        let captured = self.collector.collect(&polygon, &candidates);
        self.captures += 1;
        log::info!(
            "net closed at index {} ({} points, area {:.1}): {} of {} items captured",
            closure_index,
            polygon.points().len(),
            polygon.area(),
            captured.len(),
            candidates.len()
        );

        let capture = Capture {
            closure_index,
            polygon,
            captured,
            time: now,
        };
        self.trail.clear();
        self.state = NetState::Closed {
            hold_until: now + self.config.flash_duration,
        };
        self.last_capture = Some(capture.clone());
        TickOutcome::Captured(capture)
    }

    /// Current trail for rendering, with freshness at `now`.
    pub fn trail_points(&self, now: f32) -> Vec<TrailPoint> {
        self.trail.points_with_freshness(now)
    }

    pub fn state(&self) -> NetState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == NetState::Drawing
    }

    pub fn config(&self) -> &NetConfig {
        &self.config
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    pub fn last_capture(&self) -> Option<&Capture> {
        self.last_capture.as_ref()
    }

    /// Number of loops closed over the session's lifetime.
    pub fn capture_count(&self) -> u32 {
        self.captures
    }
}
