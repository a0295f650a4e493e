//! Circle shape with integer center and radius.

use crate::crossings::segment_meets_circle;
use crate::geometry::{Point, Rect};
use crate::path::{CollectedPathIter, Path, PathElement, WindingRule};
use crate::raster::{circle_contains, CirclePerimeterIter};
use crate::shapes::Segment;
use crate::{Coord, CoordF};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cubic control distance for a quarter-circle arc, as a fraction of the
/// radius.
const ARC_CONTROL_RATIO: CoordF = 0.552_284_749_8;

/// A circle on the integer lattice: the set of pixels inside or on the
/// perimeter drawn by the midpoint algorithm.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: Coord,
}

impl Circle {
    /// Create a circle. The radius must be non-negative.
    pub fn new(cx: Coord, cy: Coord, radius: Coord) -> Self {
        assert!(radius >= 0, "circle radius must be non-negative");
        Self {
            center: Point::new(cx, cy),
            radius,
        }
    }

    /// Create a circle around a center point.
    pub fn from_center(center: Point, radius: Coord) -> Self {
        Self::new(center.x, center.y, radius)
    }

    /// Checked constructor for callers that cannot guarantee the radius
    /// precondition up front.
    pub fn try_new(cx: Coord, cy: Coord, radius: Coord) -> crate::Result<Self> {
        if radius < 0 {
            return Err(crate::Error::InvalidParameter(format!(
                "negative circle radius {radius}"
            )));
        }
        Ok(Self {
            center: Point::new(cx, cy),
            radius,
        })
    }

    /// Replace the radius. Must be non-negative.
    pub fn set_radius(&mut self, radius: Coord) {
        assert!(radius >= 0, "circle radius must be non-negative");
        self.radius = radius;
    }

    /// Whether the circle has zero extent.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.radius == 0
    }

    /// Bounding box of the disk.
    pub fn bounding_box(&self) -> Rect {
        Rect::from_coords(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    /// Translate the center.
    pub fn translate(&mut self, dx: Coord, dy: Coord) {
        self.center += crate::geometry::Vector::new(dx, dy);
    }

    /// Discrete disk membership (see [`circle_contains`]).
    pub fn contains_point(&self, x: Coord, y: Coord) -> bool {
        circle_contains(self.center.x, self.center.y, self.radius, x, y)
    }

    /// Whether the whole rectangle lies in the disk.
    ///
    /// The disk's pixel rows shrink monotonically away from the center
    /// row, so corner containment implies containment of the full span.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        if rect.is_empty() {
            return false;
        }
        rect.corners()
            .iter()
            .all(|c| self.contains_point(c.x, c.y))
    }

    /// Euclidean circle/circle overlap: center distance within the sum
    /// of radii.
    pub fn intersects_circle(&self, other: &Circle) -> bool {
        let sum = (self.radius + other.radius) as i64;
        self.center.distance_squared(&other.center) <= sum * sum
    }

    /// Whether the disk and the rectangle overlap: the rectangle pixel
    /// closest to the center decides.
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        if rect.is_empty() {
            return false;
        }
        let closest = rect.clamp_point(self.center.x, self.center.y);
        self.contains_point(closest.x, closest.y)
    }

    /// Whether any pixel of the segment lies in the disk.
    pub fn intersects_segment(&self, segment: &Segment) -> bool {
        segment_meets_circle(
            self.center.x,
            self.center.y,
            self.radius,
            segment.p1.x,
            segment.p1.y,
            segment.p2.x,
            segment.p2.y,
        )
    }

    /// Whether the disk and the path region overlap.
    pub fn intersects_path(&self, path: &Path) -> bool {
        path.intersects_circle(self)
    }

    /// Closest disk pixel to `(x, y)`: the point itself when contained,
    /// otherwise the nearest perimeter pixel found by the perimeter walk.
    pub fn closest_point_to(&self, x: Coord, y: Coord) -> Point {
        if self.contains_point(x, y) {
            return Point::new(x, y);
        }
        let target = Point::new(x, y);
        let mut best = self.center;
        let mut best_d = i64::MAX;
        for p in self.point_iter() {
            let d = p.distance_squared(&target);
            if d < best_d {
                best_d = d;
                best = p;
            }
        }
        best
    }

    /// Farthest perimeter pixel from `(x, y)`.
    pub fn farthest_point_to(&self, x: Coord, y: Coord) -> Point {
        if self.radius == 0 {
            return self.center;
        }
        let target = Point::new(x, y);
        let mut best = self.center;
        let mut best_d = i64::MIN;
        for p in self.point_iter() {
            let d = p.distance_squared(&target);
            if d > best_d {
                best_d = d;
                best = p;
            }
        }
        best
    }

    /// Outline as four cubic arcs, counter-clockwise from the rightmost
    /// point.
    pub fn path_iter(&self) -> CollectedPathIter {
        let (cx, cy, r) = (self.center.x, self.center.y, self.radius);
        let k = (ARC_CONTROL_RATIO * r as CoordF).round() as Coord;
        let elements = vec![
            PathElement::MoveTo { x: cx + r, y: cy },
            PathElement::CurveTo {
                ctrl1_x: cx + r,
                ctrl1_y: cy + k,
                ctrl2_x: cx + k,
                ctrl2_y: cy + r,
                x: cx,
                y: cy + r,
            },
            PathElement::CurveTo {
                ctrl1_x: cx - k,
                ctrl1_y: cy + r,
                ctrl2_x: cx - r,
                ctrl2_y: cy + k,
                x: cx - r,
                y: cy,
            },
            PathElement::CurveTo {
                ctrl1_x: cx - r,
                ctrl1_y: cy - k,
                ctrl2_x: cx - k,
                ctrl2_y: cy - r,
                x: cx,
                y: cy - r,
            },
            PathElement::CurveTo {
                ctrl1_x: cx + k,
                ctrl1_y: cy - r,
                ctrl2_x: cx + r,
                ctrl2_y: cy - k,
                x: cx + r,
                y: cy,
            },
            PathElement::Close {
                from_x: cx + r,
                from_y: cy,
                x: cx + r,
                y: cy,
            },
        ];
        CollectedPathIter::new(elements, WindingRule::NonZero)
    }

    /// Perimeter pixels (all eight octants).
    pub fn point_iter(&self) -> CirclePerimeterIter {
        CirclePerimeterIter::new(self.center.x, self.center.y, self.radius)
    }
}

impl fmt::Debug for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circle({:?}, r={})", self.center, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathIterator;

    #[test]
    fn test_contains_3_4_5() {
        let c = Circle::new(0, 0, 5);
        assert!(c.contains_point(3, 4));
        assert!(c.contains_point(0, 0));
        assert!(!c.contains_point(6, 0));
        // (3, 4) is also yielded by the perimeter walker.
        assert!(c.point_iter().any(|p| p == Point::new(3, 4)));
    }

    #[test]
    fn test_bounding_box() {
        let c = Circle::new(2, -1, 3);
        assert_eq!(c.bounding_box(), Rect::from_coords(-1, -4, 5, 2));
    }

    #[test]
    fn test_intersects_circle() {
        let a = Circle::new(0, 0, 5);
        let b = Circle::new(10, 0, 5);
        let c = Circle::new(11, 0, 5);
        assert!(a.intersects_circle(&b)); // touching
        assert!(!a.intersects_circle(&c));
    }

    #[test]
    fn test_intersects_rect() {
        let c = Circle::new(0, 0, 5);
        assert!(c.intersects_rect(&Rect::from_coords(3, 3, 10, 10)));
        assert!(!c.intersects_rect(&Rect::from_coords(5, 5, 10, 10)));
        assert!(c.intersects_rect(&Rect::from_coords(-1, -1, 1, 1)));
    }

    #[test]
    fn test_intersects_segment() {
        let c = Circle::new(0, 0, 5);
        assert!(c.intersects_segment(&Segment::new(-10, 0, 10, 0)));
        assert!(!c.intersects_segment(&Segment::new(-10, 8, 10, 8)));
        // Touching the perimeter at a single pixel.
        assert!(c.intersects_segment(&Segment::new(5, -3, 5, 3)));
    }

    #[test]
    fn test_contains_rect() {
        let c = Circle::new(0, 0, 5);
        assert!(c.contains_rect(&Rect::from_coords(-2, -2, 2, 2)));
        assert!(!c.contains_rect(&Rect::from_coords(-4, -4, 4, 4)));
    }

    #[test]
    fn test_closest_point_inside_is_identity() {
        let c = Circle::new(0, 0, 5);
        assert_eq!(c.closest_point_to(1, 2), Point::new(1, 2));
        assert_eq!(c.closest_point_to(3, 4), Point::new(3, 4));
    }

    #[test]
    fn test_closest_point_outside() {
        let c = Circle::new(0, 0, 5);
        assert_eq!(c.closest_point_to(12, 0), Point::new(5, 0));
        assert_eq!(c.closest_point_to(0, -9), Point::new(0, -5));
    }

    #[test]
    fn test_farthest_point_dominates_perimeter() {
        // The winner must not be beaten by any perimeter pixel (the
        // discrete perimeter bulges, so it need not be the antipode).
        let c = Circle::new(0, 0, 5);
        let target = Point::new(12, 0);
        let far = c.farthest_point_to(12, 0);
        let far_d = far.distance_squared(&target);
        assert!(c.point_iter().all(|p| p.distance_squared(&target) <= far_d));
        assert_eq!(far.x, -5);

        let d = Circle::new(3, 3, 0);
        assert_eq!(d.farthest_point_to(100, 100), Point::new(3, 3));
    }

    #[test]
    fn test_path_iter_is_curved_polygon() {
        let c = Circle::new(0, 0, 10);
        let it = c.path_iter();
        assert!(it.is_curved());
        assert!(it.is_polygon());
        let elements: Vec<PathElement> = it.collect();
        assert_eq!(elements.len(), 6);
        assert!(matches!(elements[0], PathElement::MoveTo { x: 10, y: 0 }));
    }

    #[test]
    fn test_degenerate_circle() {
        let c = Circle::new(7, 7, 0);
        assert!(c.is_empty());
        assert!(c.contains_point(7, 7));
        assert!(!c.contains_point(8, 7));
        assert_eq!(c.point_iter().collect::<Vec<Point>>(), vec![Point::new(7, 7)]);
    }

    #[test]
    #[should_panic(expected = "radius must be non-negative")]
    fn test_negative_radius_rejected() {
        let _ = Circle::new(0, 0, -3);
    }

    #[test]
    fn test_try_new() {
        assert!(Circle::try_new(0, 0, 5).is_ok());
        assert!(matches!(
            Circle::try_new(0, 0, -1),
            Err(crate::Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_translate_round_trip() {
        let mut c = Circle::new(0, 0, 5);
        c.translate(10, 20);
        assert_eq!(c.center, Point::new(10, 20));
        c.translate(-10, -20);
        assert_eq!(c, Circle::new(0, 0, 5));
    }
}
