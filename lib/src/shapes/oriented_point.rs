//! Oriented point: a position with a direction vector.

use crate::geometry::{Point, Rect, Vector};
use crate::path::{CollectedPathIter, Path, PathElement, WindingRule};
use crate::shapes::{Circle, MultiShape, Segment};
use crate::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter;

/// A zero-area shape: one pixel plus an orientation. The normal is
/// derived from the direction by a counter-clockwise quarter turn and is
/// never stored.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrientedPoint {
    pub position: Point,
    pub direction: Vector,
}

impl OrientedPoint {
    /// Create an oriented point from position and direction components.
    pub const fn new(x: Coord, y: Coord, dir_x: Coord, dir_y: Coord) -> Self {
        Self {
            position: Point::new(x, y),
            direction: Vector::new(dir_x, dir_y),
        }
    }

    /// The derived normal: the direction rotated a quarter turn
    /// counter-clockwise.
    #[inline]
    pub fn normal(&self) -> Vector {
        self.direction.rotate_90_ccw()
    }

    /// A point covers its single pixel, so it is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Single-pixel bounding box.
    pub fn bounding_box(&self) -> Rect {
        Rect::from_min_max(self.position, self.position)
    }

    /// Translate the position; the orientation is unchanged.
    pub fn translate(&mut self, dx: Coord, dy: Coord) {
        self.position += Vector::new(dx, dy);
    }

    /// Containment degenerates to coordinate equality.
    pub fn contains_point(&self, x: Coord, y: Coord) -> bool {
        self.position.x == x && self.position.y == y
    }

    /// A zero-area shape contains only a rectangle degenerated to its own
    /// pixel.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        !rect.is_empty() && rect.min == self.position && rect.max == self.position
    }

    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        circle.contains_point(self.position.x, self.position.y)
    }

    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        rect.contains_point(self.position.x, self.position.y)
    }

    pub fn intersects_segment(&self, segment: &Segment) -> bool {
        segment.contains_point(self.position.x, self.position.y)
    }

    pub fn intersects_path(&self, path: &Path) -> bool {
        path.contains_point(self.position.x, self.position.y)
    }

    pub fn intersects_multishape(&self, multishape: &MultiShape) -> bool {
        multishape.contains_point(self.position.x, self.position.y)
    }

    /// The position, whatever the query point.
    pub fn closest_point_to(&self, _x: Coord, _y: Coord) -> Point {
        self.position
    }

    /// The position, whatever the query point.
    pub fn farthest_point_to(&self, _x: Coord, _y: Coord) -> Point {
        self.position
    }

    /// Degenerate outline: a single move-to.
    pub fn path_iter(&self) -> CollectedPathIter {
        CollectedPathIter::new(
            vec![PathElement::MoveTo {
                x: self.position.x,
                y: self.position.y,
            }],
            WindingRule::NonZero,
        )
    }

    /// The single pixel.
    pub fn point_iter(&self) -> iter::Once<Point> {
        iter::once(self.position)
    }
}

impl fmt::Debug for OrientedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OrientedPoint({:?}, dir={:?})",
            self.position, self.direction
        )
    }
}
