//! Planar geometry for net capture.
//!
//! The boat moves on a fixed-height water plane, so everything here is 2D.
//! Pure functions over plain points — no engine types.

use serde::{Deserialize, Serialize};

/// A point (or vector) on the water plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        self.distance_squared(other).sqrt()
    }

    pub fn distance_squared(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box on the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Smallest box containing every point. `None` for an empty slice.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let first = *points.first()?;
        let mut b = Bounds {
            min: first,
            max: first,
        };
        for p in &points[1..] {
            b.min.x = b.min.x.min(p.x);
            b.min.y = b.min.y.min(p.y);
            b.max.x = b.max.x.max(p.x);
            b.max.y = b.max.y.max(p.y);
        }
        Some(b)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Sum of distances between consecutive points of an open polyline.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Signed shoelace area of a closed polygon (counter-clockwise is positive).
pub fn signed_area(points: &[Vec2]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        twice += a.x * b.y - b.x * a.y;
    }
    twice * 0.5
}

/// Even-odd (crossing number) point-in-polygon test.
///
/// The polygon is implicitly closed from the last point back to the first.
/// Edges use a half-open rule on `y` so a ray through a shared vertex is
/// counted once. Points exactly on an edge may land on either side.
/// Self-intersecting polygons follow the even-odd rule: regions covered an
/// even number of times are outside.
pub fn point_in_polygon(p: Vec2, polygon: &[Vec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Vec2::new(0.0, 0.0).distance(Vec2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn polyline_length_sums_segments() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0), Vec2::new(3.0, 0.0)];
        assert!((polyline_length(&pts) - 9.0).abs() < 1e-6);
        assert_eq!(polyline_length(&pts[..1]), 0.0);
    }

    #[test]
    fn square_area_and_winding() {
        let sq = unit_square();
        assert!((signed_area(&sq) - 1.0).abs() < 1e-6);
        let cw: Vec<Vec2> = sq.into_iter().rev().collect();
        assert!((signed_area(&cw) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn point_in_unit_square() {
        let sq = unit_square();
        assert!(point_in_polygon(Vec2::new(0.5, 0.5), &sq));
        assert!(!point_in_polygon(Vec2::new(2.0, 2.0), &sq));
        assert!(!point_in_polygon(Vec2::new(-0.1, 0.5), &sq));
    }

    #[test]
    fn ray_through_vertex_counts_once() {
        // Diamond: a horizontal ray from the centre passes through the right vertex.
        let diamond = [
            Vec2::new(0.0, -1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, 0.0),
        ];
        assert!(point_in_polygon(Vec2::ZERO, &diamond));
        assert!(!point_in_polygon(Vec2::new(-2.0, 0.0), &diamond));
    }

    #[test]
    fn concave_notch_is_outside() {
        // U shape opening upward; the notch is outside.
        let u = [
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(3.0, 3.0),
            Vec2::new(2.0, 3.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 3.0),
            Vec2::new(0.0, 3.0),
        ];
        assert!(!point_in_polygon(Vec2::new(1.5, 2.0), &u));
        assert!(point_in_polygon(Vec2::new(0.5, 2.0), &u));
        assert!(point_in_polygon(Vec2::new(1.5, 0.5), &u));
    }

    #[test]
    fn figure_eight_overlap_is_even_odd() {
        // Bow-tie: two triangles meeting at (1,1).
        let bowtie = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(0.0, 2.0),
        ];
        assert!(point_in_polygon(Vec2::new(0.3, 1.0), &bowtie));
        assert!(point_in_polygon(Vec2::new(1.7, 1.0), &bowtie));
        assert!(!point_in_polygon(Vec2::new(1.0, 0.3), &bowtie));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let line = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)];
        assert!(!point_in_polygon(Vec2::new(0.5, 0.5), &line));
    }

    #[test]
    fn bounds_cover_points() {
        let b = Bounds::from_points(&unit_square()).unwrap();
        assert_eq!(b.min, Vec2::ZERO);
        assert_eq!(b.max, Vec2::new(1.0, 1.0));
        assert_eq!(b.center(), Vec2::new(0.5, 0.5));
        assert!(b.contains(Vec2::new(1.0, 0.0)));
        assert!(Bounds::from_points(&[]).is_none());
    }
}
