//! Collision detection for axis-aligned and rotated rectangles
//!
//! Rotated rectangles are converted to 4-vertex polygons and tested with the
//! Separating Axis Theorem. SAT is the reference; the AABB test is a cheap
//! path for the common case where neither rectangle is rotated, and the two
//! agree on every axis-aligned pair (touching edges count as overlap in both).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A rectangle with its top-left corner at `pos`, rotated about its centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
    /// Radians, counter-clockwise about the centre
    pub rotation: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            rotation: 0.0,
        }
    }

    pub fn rotated(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn is_axis_aligned(&self) -> bool {
        self.rotation == 0.0
    }
}

/// Axis-aligned overlap test (rotation ignored)
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.pos.x > b.pos.x + b.size.x
        || b.pos.x > a.pos.x + a.size.x
        || a.pos.y > b.pos.y + b.size.y
        || b.pos.y > a.pos.y + a.size.y)
}

/// World-space corners of a rectangle, in winding order.
///
/// Each corner is rotated about the centre by the rectangle's rotation. An
/// unrotated rectangle returns its exact corners so the SAT projections
/// match the AABB comparisons bit for bit.
pub fn rect_to_polygon(rect: &Rect) -> [Vec2; 4] {
    let Rect { pos, size, rotation } = *rect;
    if rotation == 0.0 {
        return [
            pos,
            Vec2::new(pos.x + size.x, pos.y),
            Vec2::new(pos.x + size.x, pos.y + size.y),
            Vec2::new(pos.x, pos.y + size.y),
        ];
    }

    let center = rect.center();
    let half = size / 2.0;
    let (sin, cos) = rotation.sin_cos();
    let rotate = |offset: Vec2| {
        center + Vec2::new(offset.x * cos - offset.y * sin, offset.x * sin + offset.y * cos)
    };
    [
        rotate(Vec2::new(-half.x, -half.y)),
        rotate(Vec2::new(half.x, -half.y)),
        rotate(Vec2::new(half.x, half.y)),
        rotate(Vec2::new(-half.x, half.y)),
    ]
}

/// Separating axis for an edge: the edge's perpendicular.
///
/// Axis-aligned edges map to exact unit axes; other axes are normalized so
/// projections from both polygons share a scale.
fn edge_axis(edge: Vec2) -> Option<Vec2> {
    let axis = edge.perp();
    if axis.x == 0.0 && axis.y == 0.0 {
        None
    } else if axis.x == 0.0 {
        Some(Vec2::new(0.0, axis.y.signum()))
    } else if axis.y == 0.0 {
        Some(Vec2::new(axis.x.signum(), 0.0))
    } else {
        Some(axis.normalize())
    }
}

/// Min/max of the polygon's projection onto `axis`
fn project(polygon: &[Vec2], axis: Vec2) -> (f32, f32) {
    polygon.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), v| {
        let p = v.dot(axis);
        (min.min(p), max.max(p))
    })
}

/// True if some edge of `polygon` separates it from `other`
fn has_separating_axis(polygon: &[Vec2], other: &[Vec2]) -> bool {
    let n = polygon.len();
    (0..n).any(|i| {
        let edge = polygon[(i + 1) % n] - polygon[i];
        match edge_axis(edge) {
            Some(axis) => {
                let (min_a, max_a) = project(polygon, axis);
                let (min_b, max_b) = project(other, axis);
                max_a < min_b || max_b < min_a
            }
            None => false,
        }
    })
}

/// Separating Axis Theorem test for two convex polygons.
///
/// Returns false as soon as one edge normal of either polygon separates the
/// projections; otherwise the polygons intersect.
pub fn polygons_intersect(a: &[Vec2], b: &[Vec2]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    !(has_separating_axis(a, b) || has_separating_axis(b, a))
}

/// SAT test on two rectangles
pub fn sat_overlap(a: &Rect, b: &Rect) -> bool {
    polygons_intersect(&rect_to_polygon(a), &rect_to_polygon(b))
}

/// Rectangle overlap: AABB when neither is rotated, SAT otherwise
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    if a.is_axis_aligned() && b.is_axis_aligned() {
        aabb_overlap(a, b)
    } else {
        sat_overlap(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_aabb_overlap_and_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(aabb_overlap(&a, &Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Shared edge counts as overlap
        assert!(aabb_overlap(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!aabb_overlap(&a, &Rect::new(10.5, 0.0, 10.0, 10.0)));
        assert!(!aabb_overlap(&a, &Rect::new(0.0, -20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_rect_to_polygon_unrotated_is_exact() {
        let poly = rect_to_polygon(&Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(
            poly,
            [
                Vec2::new(1.0, 2.0),
                Vec2::new(4.0, 2.0),
                Vec2::new(4.0, 6.0),
                Vec2::new(1.0, 6.0),
            ]
        );
    }

    #[test]
    fn test_rect_to_polygon_rotated_keeps_center_and_extent() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0).rotated(FRAC_PI_4);
        let poly = rect_to_polygon(&rect);
        let centroid = poly.iter().copied().sum::<Vec2>() / 4.0;
        assert!((centroid - Vec2::new(5.0, 5.0)).length() < 1e-5);
        // A square rotated 45 degrees reaches half its diagonal from the centre
        let reach = poly.iter().map(|v| (v.x - 5.0).abs()).fold(0.0, f32::max);
        assert!((reach - 50.0f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_rotated_squares_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 0.0, 10.0, 10.0).rotated(FRAC_PI_4);
        assert!(sat_overlap(&a, &b));
        assert!(rects_overlap(&a, &b));
    }

    #[test]
    fn test_rotated_squares_separated() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(50.0, 0.0, 10.0, 10.0).rotated(FRAC_PI_4);
        assert!(!sat_overlap(&a, &b));
        assert!(!rects_overlap(&a, &b));
    }

    #[test]
    fn test_rotation_separates_where_aabb_would_not() {
        // Diamond corner-to-corner gap: the bounding boxes overlap but the shapes don't
        let a = Rect::new(0.0, 0.0, 10.0, 10.0).rotated(FRAC_PI_4);
        let b = Rect::new(8.0, 8.0, 10.0, 10.0).rotated(FRAC_PI_4);
        assert!(aabb_overlap(&a, &b));
        assert!(!sat_overlap(&a, &b));
    }

    #[test]
    fn test_polygons_intersect_triangles() {
        let tri = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        let inside = [Vec2::new(1.0, 1.0), Vec2::new(3.0, 1.0), Vec2::new(1.0, 3.0)];
        let beyond = [Vec2::new(8.0, 8.0), Vec2::new(12.0, 8.0), Vec2::new(8.0, 12.0)];
        assert!(polygons_intersect(&tri, &inside));
        // Beyond the hypotenuse: only the diagonal axis separates them
        assert!(!polygons_intersect(&tri, &beyond));
        assert!(!polygons_intersect(&tri, &[]));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 1.0f32..100.0, 1.0f32..100.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn aabb_agrees_with_sat(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(aabb_overlap(&a, &b), sat_overlap(&a, &b));
        }

        #[test]
        fn aabb_agrees_with_sat_when_touching(
            a in rect_strategy(),
            w in 1.0f32..100.0,
            h in 1.0f32..100.0,
            dy in -50.0f32..50.0,
        ) {
            // b starts exactly on a's right edge
            let b = Rect::new(a.pos.x + a.size.x, a.pos.y + dy, w, h);
            prop_assert_eq!(aabb_overlap(&a, &b), sat_overlap(&a, &b));
        }

        #[test]
        fn overlap_is_symmetric(a in rect_strategy(), b in rect_strategy(), r in -3.2f32..3.2) {
            let b = b.rotated(r);
            prop_assert_eq!(rects_overlap(&a, &b), rects_overlap(&b, &a));
        }
    }
}
