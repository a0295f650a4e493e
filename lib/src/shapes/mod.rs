//! Shape types and the polymorphic shape surface.

mod circle;
mod multishape;
mod oriented_point;
mod segment;

pub use circle::Circle;
pub use multishape::{MultiShape, MultiShapePointIter};
pub use oriented_point::OrientedPoint;
pub use segment::Segment;

use crate::geometry::{Point, Rect, RectPerimeterIter};
use crate::kit::{GeometryKit, Point2D};
use crate::path::{CollectedPathIter, Path, PathPixelIter};
use crate::raster::{CirclePerimeterIter, LinePixelIter};
use crate::Coord;
use serde::{Deserialize, Serialize};
use std::iter;

/// The polymorphic surface shared by every shape, generic over one
/// geometry kit.
///
/// Predicates take plain coordinates or concrete shapes; the queries that
/// build points do so exclusively through the kit factory value, keeping
/// the kernel independent of the caller's point representation.
pub trait Shape2D<K: GeometryKit> {
    /// Whether the shape has zero extent.
    fn is_empty(&self) -> bool;

    /// Axis-aligned bounding box.
    fn bounding_box(&self) -> Rect;

    /// Translate in place.
    fn translate(&mut self, dx: Coord, dy: Coord);

    /// Whether the pixel `(x, y)` belongs to the shape.
    fn contains_point(&self, x: Coord, y: Coord) -> bool;

    /// Whether the whole rectangle belongs to the shape.
    fn contains_rect(&self, rect: &Rect) -> bool;

    fn intersects_circle(&self, circle: &Circle) -> bool;
    fn intersects_rect(&self, rect: &Rect) -> bool;
    fn intersects_segment(&self, segment: &Segment) -> bool;
    fn intersects_path(&self, path: &Path) -> bool;
    fn intersects_multishape(&self, multishape: &MultiShape) -> bool;
    fn intersects_oriented_point(&self, point: &OrientedPoint) -> bool;

    /// Closest shape point to `p`, built through the kit.
    fn closest_point_to(&self, kit: &K, p: &K::Point) -> K::Point;

    /// Farthest shape point from `p`, built through the kit.
    fn farthest_point_to(&self, kit: &K, p: &K::Point) -> K::Point;
}

/// Closed union of the kernel's shape kinds, used for heterogeneous
/// collections ([`MultiShape`]) and dynamic dispatch without boxing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(Circle),
    Rect(Rect),
    Segment(Segment),
    Path(Path),
    OrientedPoint(OrientedPoint),
}

macro_rules! each_shape {
    ($self:expr, $s:ident => $e:expr) => {
        match $self {
            Shape::Circle($s) => $e,
            Shape::Rect($s) => $e,
            Shape::Segment($s) => $e,
            Shape::Path($s) => $e,
            Shape::OrientedPoint($s) => $e,
        }
    };
}

impl Shape {
    pub fn is_empty(&self) -> bool {
        each_shape!(self, s => s.is_empty())
    }

    pub fn bounding_box(&self) -> Rect {
        each_shape!(self, s => s.bounding_box())
    }

    pub fn translate(&mut self, dx: Coord, dy: Coord) {
        each_shape!(self, s => s.translate(dx, dy))
    }

    pub fn contains_point(&self, x: Coord, y: Coord) -> bool {
        each_shape!(self, s => s.contains_point(x, y))
    }

    pub fn contains_rect(&self, rect: &Rect) -> bool {
        each_shape!(self, s => s.contains_rect(rect))
    }

    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        match self {
            Shape::Circle(c) => c.intersects_circle(circle),
            Shape::Rect(r) => r.intersects_circle(circle),
            Shape::Segment(s) => s.intersects_circle(circle),
            Shape::Path(p) => p.intersects_circle(circle),
            Shape::OrientedPoint(p) => p.intersects_circle(circle),
        }
    }

    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        each_shape!(self, s => s.intersects_rect(rect))
    }

    pub fn intersects_segment(&self, segment: &Segment) -> bool {
        each_shape!(self, s => s.intersects_segment(segment))
    }

    pub fn intersects_path(&self, path: &Path) -> bool {
        each_shape!(self, s => s.intersects_path(path))
    }

    pub fn intersects_oriented_point(&self, point: &OrientedPoint) -> bool {
        self.contains_point(point.position.x, point.position.y)
    }

    pub fn intersects_multishape(&self, multishape: &MultiShape) -> bool {
        match self {
            Shape::Circle(c) => multishape.intersects_circle(c),
            Shape::Rect(r) => multishape.intersects_rect(r),
            Shape::Segment(s) => multishape.intersects_segment(s),
            Shape::Path(p) => multishape.intersects_path(p),
            Shape::OrientedPoint(p) => multishape.intersects_oriented_point(p),
        }
    }

    /// Pairwise intersection between any two shape kinds.
    pub fn intersects_shape(&self, other: &Shape) -> bool {
        match other {
            Shape::Circle(c) => self.intersects_circle(c),
            Shape::Rect(r) => self.intersects_rect(r),
            Shape::Segment(s) => self.intersects_segment(s),
            Shape::Path(p) => self.intersects_path(p),
            Shape::OrientedPoint(p) => self.intersects_oriented_point(p),
        }
    }

    pub fn closest_point_to(&self, x: Coord, y: Coord) -> Point {
        each_shape!(self, s => s.closest_point_to(x, y))
    }

    pub fn farthest_point_to(&self, x: Coord, y: Coord) -> Point {
        each_shape!(self, s => s.farthest_point_to(x, y))
    }

    /// Outline as an owned element iterator.
    pub fn path_iter(&self) -> CollectedPathIter {
        match self {
            Shape::Circle(c) => c.path_iter(),
            Shape::Rect(r) => r.path_iter(),
            Shape::Segment(s) => s.path_iter(),
            Shape::Path(p) => CollectedPathIter::new(p.iter().collect(), p.winding_rule()),
            Shape::OrientedPoint(p) => p.path_iter(),
        }
    }

    /// Pixels of the shape's outline.
    pub fn point_iter(&self) -> ShapePointIter {
        match self {
            Shape::Circle(c) => ShapePointIter::Circle(c.point_iter()),
            Shape::Rect(r) => ShapePointIter::Rect(r.point_iter()),
            Shape::Segment(s) => ShapePointIter::Segment(s.point_iter()),
            Shape::Path(p) => ShapePointIter::Path(p.point_iter()),
            Shape::OrientedPoint(p) => ShapePointIter::Point(p.point_iter()),
        }
    }
}

/// Owned pixel iterator over any shape kind.
pub enum ShapePointIter {
    Circle(CirclePerimeterIter),
    Rect(RectPerimeterIter),
    Segment(LinePixelIter),
    Path(PathPixelIter),
    Point(iter::Once<Point>),
}

impl Iterator for ShapePointIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        match self {
            ShapePointIter::Circle(it) => it.next(),
            ShapePointIter::Rect(it) => it.next(),
            ShapePointIter::Segment(it) => it.next(),
            ShapePointIter::Path(it) => it.next(),
            ShapePointIter::Point(it) => it.next(),
        }
    }
}

macro_rules! impl_shape2d {
    ($ty:ty, $ms_method:ident) => {
        impl<K: GeometryKit> Shape2D<K> for $ty {
            fn is_empty(&self) -> bool {
                <$ty>::is_empty(self)
            }

            fn bounding_box(&self) -> Rect {
                <$ty>::bounding_box(self)
            }

            fn translate(&mut self, dx: Coord, dy: Coord) {
                <$ty>::translate(self, dx, dy)
            }

            fn contains_point(&self, x: Coord, y: Coord) -> bool {
                <$ty>::contains_point(self, x, y)
            }

            fn contains_rect(&self, rect: &Rect) -> bool {
                <$ty>::contains_rect(self, rect)
            }

            fn intersects_circle(&self, circle: &Circle) -> bool {
                <$ty>::intersects_circle(self, circle)
            }

            fn intersects_rect(&self, rect: &Rect) -> bool {
                <$ty>::intersects_rect(self, rect)
            }

            fn intersects_segment(&self, segment: &Segment) -> bool {
                <$ty>::intersects_segment(self, segment)
            }

            fn intersects_path(&self, path: &Path) -> bool {
                <$ty>::intersects_path(self, path)
            }

            fn intersects_multishape(&self, multishape: &MultiShape) -> bool {
                multishape.$ms_method(self)
            }

            fn intersects_oriented_point(&self, point: &OrientedPoint) -> bool {
                <$ty>::contains_point(self, point.position.x, point.position.y)
            }

            fn closest_point_to(&self, kit: &K, p: &K::Point) -> K::Point {
                let q = <$ty>::closest_point_to(self, p.x(), p.y());
                kit.point(q.x, q.y)
            }

            fn farthest_point_to(&self, kit: &K, p: &K::Point) -> K::Point {
                let q = <$ty>::farthest_point_to(self, p.x(), p.y());
                kit.point(q.x, q.y)
            }
        }
    };
}

impl_shape2d!(Circle, intersects_circle);
impl_shape2d!(Rect, intersects_rect);
impl_shape2d!(Segment, intersects_segment);
impl_shape2d!(Path, intersects_path);
impl_shape2d!(Shape, intersects_shape);

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Shape::Circle(c)
    }
}

impl From<Rect> for Shape {
    fn from(r: Rect) -> Self {
        Shape::Rect(r)
    }
}

impl From<Segment> for Shape {
    fn from(s: Segment) -> Self {
        Shape::Segment(s)
    }
}

impl From<Path> for Shape {
    fn from(p: Path) -> Self {
        Shape::Path(p)
    }
}

impl From<OrientedPoint> for Shape {
    fn from(p: OrientedPoint) -> Self {
        Shape::OrientedPoint(p)
    }
}

impl<K: GeometryKit> Shape2D<K> for OrientedPoint {
    fn is_empty(&self) -> bool {
        OrientedPoint::is_empty(self)
    }

    fn bounding_box(&self) -> Rect {
        OrientedPoint::bounding_box(self)
    }

    fn translate(&mut self, dx: Coord, dy: Coord) {
        OrientedPoint::translate(self, dx, dy)
    }

    fn contains_point(&self, x: Coord, y: Coord) -> bool {
        OrientedPoint::contains_point(self, x, y)
    }

    fn contains_rect(&self, rect: &Rect) -> bool {
        OrientedPoint::contains_rect(self, rect)
    }

    fn intersects_circle(&self, circle: &Circle) -> bool {
        OrientedPoint::intersects_circle(self, circle)
    }

    fn intersects_rect(&self, rect: &Rect) -> bool {
        OrientedPoint::intersects_rect(self, rect)
    }

    fn intersects_segment(&self, segment: &Segment) -> bool {
        OrientedPoint::intersects_segment(self, segment)
    }

    fn intersects_path(&self, path: &Path) -> bool {
        OrientedPoint::intersects_path(self, path)
    }

    fn intersects_multishape(&self, multishape: &MultiShape) -> bool {
        OrientedPoint::intersects_multishape(self, multishape)
    }

    fn intersects_oriented_point(&self, point: &OrientedPoint) -> bool {
        OrientedPoint::contains_point(self, point.position.x, point.position.y)
    }

    fn closest_point_to(&self, kit: &K, _p: &K::Point) -> K::Point {
        kit.point(self.position.x, self.position.y)
    }

    fn farthest_point_to(&self, kit: &K, _p: &K::Point) -> K::Point {
        kit.point(self.position.x, self.position.y)
    }
}

impl<K: GeometryKit> Shape2D<K> for MultiShape {
    fn is_empty(&self) -> bool {
        MultiShape::is_empty(self)
    }

    fn bounding_box(&self) -> Rect {
        MultiShape::bounding_box(self)
    }

    fn translate(&mut self, dx: Coord, dy: Coord) {
        MultiShape::translate(self, dx, dy)
    }

    fn contains_point(&self, x: Coord, y: Coord) -> bool {
        MultiShape::contains_point(self, x, y)
    }

    fn contains_rect(&self, rect: &Rect) -> bool {
        MultiShape::contains_rect(self, rect)
    }

    fn intersects_circle(&self, circle: &Circle) -> bool {
        MultiShape::intersects_circle(self, circle)
    }

    fn intersects_rect(&self, rect: &Rect) -> bool {
        MultiShape::intersects_rect(self, rect)
    }

    fn intersects_segment(&self, segment: &Segment) -> bool {
        MultiShape::intersects_segment(self, segment)
    }

    fn intersects_path(&self, path: &Path) -> bool {
        MultiShape::intersects_path(self, path)
    }

    fn intersects_multishape(&self, multishape: &MultiShape) -> bool {
        MultiShape::intersects_multishape(self, multishape)
    }

    fn intersects_oriented_point(&self, point: &OrientedPoint) -> bool {
        MultiShape::intersects_oriented_point(self, point)
    }

    fn closest_point_to(&self, kit: &K, p: &K::Point) -> K::Point {
        let q = MultiShape::closest_point_to(self, p.x(), p.y());
        kit.point(q.x, q.y)
    }

    fn farthest_point_to(&self, kit: &K, p: &K::Point) -> K::Point {
        let q = MultiShape::farthest_point_to(self, p.x(), p.y());
        kit.point(q.x, q.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::PixelKit;
    use crate::path::WindingRule;

    fn shapes() -> Vec<Shape> {
        let mut path = Path::new(WindingRule::NonZero);
        path.move_to(0, 0);
        path.line_to(10, 0);
        path.line_to(10, 10);
        path.line_to(0, 10);
        path.close();
        // All five shapes share the pixel (0, 0).
        vec![
            Shape::Circle(Circle::new(0, 0, 5)),
            Shape::Rect(Rect::from_coords(0, 0, 10, 10)),
            Shape::Segment(Segment::new(0, 0, 10, 10)),
            Shape::Path(path),
            Shape::OrientedPoint(OrientedPoint::new(0, 0, 1, 0)),
        ]
    }

    #[test]
    fn test_every_shape_contains_the_shared_pixel() {
        for shape in shapes() {
            assert!(shape.contains_point(0, 0), "{shape:?} misses (0, 0)");
        }
    }

    #[test]
    fn test_trait_surface_through_kit() {
        let kit = PixelKit;
        for shape in shapes() {
            // (0, 0) is inside or on every sample shape, so it is its own
            // closest point.
            let p = kit.point(0, 0);
            let q = Shape2D::<PixelKit>::closest_point_to(&shape, &kit, &p);
            assert_eq!(q, p, "{shape:?} closest point not idempotent");
        }
    }

    #[test]
    fn test_pairwise_intersections() {
        let all = shapes();
        // Sharing the pixel (0, 0) makes every pair intersect.
        for a in &all {
            for b in &all {
                assert!(a.intersects_shape(b), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_translate_round_trip_enum() {
        for mut shape in shapes() {
            let original = shape.clone();
            shape.translate(13, -8);
            shape.translate(-13, 8);
            assert_eq!(shape, original);
        }
    }

    #[test]
    fn test_point_iter_enum() {
        for shape in shapes() {
            assert!(shape.point_iter().count() > 0, "{shape:?} has no pixels");
        }
    }
}
