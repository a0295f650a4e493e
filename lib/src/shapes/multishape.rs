//! Multishape: an ordered collection of sub-shapes in global coordinates.

use crate::geometry::{Point, Rect};
use crate::path::{CollectedPathIter, Path, PathElement, WindingRule};
use crate::shapes::{Circle, OrientedPoint, Segment, Shape, ShapePointIter};
use crate::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered collection of shapes queried as one.
///
/// Every query narrows through the collection's bounding box first, then
/// delegates member by member, aggregating with a logical OR and
/// short-circuiting on the first match. Containment is member-wise too: a
/// rectangle straddling two adjacent members is not reported as
/// contained.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiShape {
    shapes: Vec<Shape>,
}

impl MultiShape {
    /// Create an empty multishape.
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Create a multishape from a shape collection.
    pub fn from_shapes(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    /// Append a shape.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// The member shapes.
    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Mutable access to the member shapes.
    #[inline]
    pub fn shapes_mut(&mut self) -> &mut Vec<Shape> {
        &mut self.shapes
    }

    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether no member covers any pixel.
    pub fn is_empty(&self) -> bool {
        self.shapes.iter().all(Shape::is_empty)
    }

    /// Remove all members.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Union of the members' bounding boxes.
    pub fn bounding_box(&self) -> Rect {
        let mut bounds = Rect::new();
        for shape in &self.shapes {
            bounds.merge(&shape.bounding_box());
        }
        bounds
    }

    /// Translate every member.
    pub fn translate(&mut self, dx: Coord, dy: Coord) {
        for shape in &mut self.shapes {
            shape.translate(dx, dy);
        }
    }

    pub fn contains_point(&self, x: Coord, y: Coord) -> bool {
        self.bounding_box().contains_point(x, y)
            && self.shapes.iter().any(|s| s.contains_point(x, y))
    }

    pub fn contains_rect(&self, rect: &Rect) -> bool {
        self.bounding_box().contains_rect(rect)
            && self.shapes.iter().any(|s| s.contains_rect(rect))
    }

    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        self.bounding_box().intersects_rect(&circle.bounding_box())
            && self.shapes.iter().any(|s| s.intersects_circle(circle))
    }

    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        self.bounding_box().intersects_rect(rect)
            && self.shapes.iter().any(|s| s.intersects_rect(rect))
    }

    pub fn intersects_segment(&self, segment: &Segment) -> bool {
        self.bounding_box().intersects_rect(&segment.bounding_box())
            && self.shapes.iter().any(|s| s.intersects_segment(segment))
    }

    pub fn intersects_path(&self, path: &Path) -> bool {
        self.bounding_box().intersects_rect(&path.bounding_box())
            && self.shapes.iter().any(|s| s.intersects_path(path))
    }

    pub fn intersects_multishape(&self, other: &MultiShape) -> bool {
        self.bounding_box().intersects_rect(&other.bounding_box())
            && other.shapes.iter().any(|s| self.intersects_shape(s))
    }

    pub fn intersects_oriented_point(&self, point: &OrientedPoint) -> bool {
        self.contains_point(point.position.x, point.position.y)
    }

    /// Intersection against any shape kind.
    pub fn intersects_shape(&self, shape: &Shape) -> bool {
        match shape {
            Shape::Circle(c) => self.intersects_circle(c),
            Shape::Rect(r) => self.intersects_rect(r),
            Shape::Segment(s) => self.intersects_segment(s),
            Shape::Path(p) => self.intersects_path(p),
            Shape::OrientedPoint(p) => self.intersects_oriented_point(p),
        }
    }

    /// Closest member point to `(x, y)`; the origin for an empty
    /// collection.
    pub fn closest_point_to(&self, x: Coord, y: Coord) -> Point {
        let target = Point::new(x, y);
        let mut best = Point::zero();
        let mut best_d = i64::MAX;
        for shape in &self.shapes {
            let p = shape.closest_point_to(x, y);
            let d = p.distance_squared(&target);
            if d < best_d {
                best_d = d;
                best = p;
            }
        }
        best
    }

    /// Farthest member point from `(x, y)`; the origin for an empty
    /// collection.
    pub fn farthest_point_to(&self, x: Coord, y: Coord) -> Point {
        let target = Point::new(x, y);
        let mut best = Point::zero();
        let mut best_d = i64::MIN;
        for shape in &self.shapes {
            let p = shape.farthest_point_to(x, y);
            let d = p.distance_squared(&target);
            if d > best_d {
                best_d = d;
                best = p;
            }
        }
        if self.shapes.is_empty() {
            Point::zero()
        } else {
            best
        }
    }

    /// Concatenated outlines of all members.
    pub fn path_iter(&self) -> CollectedPathIter {
        let mut elements: Vec<PathElement> = Vec::new();
        for shape in &self.shapes {
            elements.extend(shape.path_iter());
        }
        CollectedPathIter::new(elements, WindingRule::NonZero)
    }

    /// Pixels of every member, in member order.
    pub fn point_iter(&self) -> MultiShapePointIter<'_> {
        MultiShapePointIter {
            shapes: &self.shapes,
            idx: 0,
            cur: None,
        }
    }
}

impl fmt::Debug for MultiShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MultiShape({} shapes)", self.shapes.len())
    }
}

impl FromIterator<Shape> for MultiShape {
    fn from_iter<I: IntoIterator<Item = Shape>>(iter: I) -> Self {
        Self {
            shapes: iter.into_iter().collect(),
        }
    }
}

/// Pixel iterator over every member of a multishape.
pub struct MultiShapePointIter<'a> {
    shapes: &'a [Shape],
    idx: usize,
    cur: Option<ShapePointIter>,
}

impl Iterator for MultiShapePointIter<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        loop {
            if let Some(cur) = &mut self.cur {
                if let Some(p) = cur.next() {
                    return Some(p);
                }
                self.cur = None;
            }
            let shape = self.shapes.get(self.idx)?;
            self.idx += 1;
            self.cur = Some(shape.point_iter());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathIterator;

    fn sample() -> MultiShape {
        let mut ms = MultiShape::new();
        ms.push(Shape::Circle(Circle::new(0, 0, 5)));
        ms.push(Shape::Rect(Rect::from_coords(20, 20, 30, 30)));
        ms
    }

    #[test]
    fn test_contains_point_any_member() {
        let ms = sample();
        assert!(ms.contains_point(0, 0));
        assert!(ms.contains_point(25, 25));
        assert!(!ms.contains_point(10, 10));
    }

    #[test]
    fn test_bounding_box_is_union() {
        let ms = sample();
        let bb = ms.bounding_box();
        assert_eq!(bb.min, Point::new(-5, -5));
        assert_eq!(bb.max, Point::new(30, 30));
    }

    #[test]
    fn test_intersects_narrows_through_bbox() {
        let ms = sample();
        // Far outside the union box.
        assert!(!ms.intersects_rect(&Rect::from_coords(100, 100, 110, 110)));
        assert!(ms.intersects_rect(&Rect::from_coords(25, 25, 40, 40)));
        assert!(ms.intersects_segment(&Segment::new(-10, 0, 10, 0)));
    }

    #[test]
    fn test_first_match_short_circuit_semantics() {
        let ms = sample();
        // Inside the union bbox but in no member.
        assert!(!ms.intersects_rect(&Rect::from_coords(10, 10, 12, 12)));
    }

    #[test]
    fn test_closest_point_over_members() {
        let ms = sample();
        assert_eq!(ms.closest_point_to(0, 0), Point::new(0, 0));
        assert_eq!(ms.closest_point_to(19, 25), Point::new(20, 25));
    }

    #[test]
    fn test_translate_round_trip() {
        let mut ms = sample();
        let original = ms.clone();
        ms.translate(3, -4);
        assert!(ms.contains_point(3, -4));
        ms.translate(-3, 4);
        assert_eq!(ms, original);
    }

    #[test]
    fn test_empty_multishape() {
        let ms = MultiShape::new();
        assert!(ms.is_empty());
        assert!(!ms.contains_point(0, 0));
        assert_eq!(ms.closest_point_to(5, 5), Point::zero());
        assert_eq!(ms.point_iter().count(), 0);
    }

    #[test]
    fn test_point_iter_covers_members() {
        let ms = sample();
        let pts: Vec<Point> = ms.point_iter().collect();
        assert!(pts.contains(&Point::new(5, 0)));
        assert!(pts.contains(&Point::new(20, 20)));
    }

    #[test]
    fn test_path_iter_is_multi_parts() {
        let ms = sample();
        let it = ms.path_iter();
        assert!(it.is_multi_parts());
    }
}
