//! Capture polygons and enclosed-item collection.
//!
//! When the trail closes, the samples from the closure point to the newest
//! sample form a polygon on the water plane. Items are tested against it
//! with the even-odd rule from [`crate::geometry::point_in_polygon`], after
//! a cheap bounding-box reject.
//!
//! ```
//! use netcapture_logic::geometry::Vec2;
//! use netcapture_logic::polygon::{CandidateItem, CapturePolygon, PolygonCollector};
//!
//! let square = CapturePolygon::new(vec![
//!     Vec2::new(0.0, 0.0),
//!     Vec2::new(1.0, 0.0),
//!     Vec2::new(1.0, 1.0),
//!     Vec2::new(0.0, 1.0),
//! ])
//! .unwrap();
//! let items = [
//!     CandidateItem::new(1, 0, Vec2::new(0.5, 0.5)),
//!     CandidateItem::new(2, 0, Vec2::new(2.0, 2.0)),
//! ];
//! assert_eq!(PolygonCollector::any().collect(&square, &items), vec![1]);
//! ```

use crate::geometry::{point_in_polygon, signed_area, Bounds, Vec2};
use crate::loop_detect::MIN_LOOP_POINTS;
use crate::trail::TrailBuffer;
use serde::{Deserialize, Serialize};

/// Something floating on the water that a net might enclose.
///
/// Owned by the host; the capture core only reads it at closure time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub id: u32,
    /// One of [`crate::constants::item_kinds`].
    pub kind: u8,
    pub position: Vec2,
}

impl CandidateItem {
    pub fn new(id: u32, kind: u8, position: Vec2) -> Self {
        Self { id, kind, position }
    }
}

/// A closed sub-loop of the trail, valid only at the instant of closure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapturePolygon {
    points: Vec<Vec2>,
    bounds: Bounds,
}

impl CapturePolygon {
    /// Polygon over `points`, implicitly closed. `None` for fewer than
    /// three points.
    pub fn new(points: Vec<Vec2>) -> Option<Self> {
        if points.len() < MIN_LOOP_POINTS {
            return None;
        }
        let bounds = Bounds::from_points(&points)?;
        Some(Self { points, bounds })
    }

    /// Polygon over the trail from `closure_index` to the newest sample.
    pub fn from_trail(trail: &TrailBuffer, closure_index: usize) -> Option<Self> {
        Self::new(trail.points_from(closure_index))
    }

    /// Ordered vertices, oldest trail sample first.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Enclosed area (absolute shoelace area).
    pub fn area(&self) -> f32 {
        signed_area(&self.points).abs()
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.bounds.contains(p) && point_in_polygon(p, &self.points)
    }
}

/// Reports which candidate items a capture polygon encloses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonCollector {
    /// Kinds to report. Empty means every kind.
    kinds: Vec<u8>,
}

impl PolygonCollector {
    /// Collector that reports every enclosed item.
    pub fn any() -> Self {
        Self { kinds: Vec::new() }
    }

    /// Collector restricted to the given item kinds.
    pub fn only(kinds: &[u8]) -> Self {
        Self {
            kinds: kinds.to_vec(),
        }
    }

    pub fn accepts(&self, kind: u8) -> bool {
        self.kinds.is_empty() || self.kinds.contains(&kind)
    }

    /// Ids of accepted items inside `polygon`, in input order.
    /// The candidate set is never modified.
    pub fn collect<'a, I>(&self, polygon: &CapturePolygon, items: I) -> Vec<u32>
    where
        I: IntoIterator<Item = &'a CandidateItem>,
    {
        items
            .into_iter()
            .filter(|item| self.accepts(item.kind) && polygon.contains(item.position))
            .map(|item| item.id)
            .collect()
    }
}
