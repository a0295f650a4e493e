//! Axis-aligned rectangle with integer pixel coordinates.
//!
//! `Rect` is both the rectangle shape and the bounding-box type used
//! throughout the kernel. An undefined (empty) rectangle is a valid
//! terminal state: it contains nothing, intersects nothing, and merges
//! like an identity element.

use super::Point;
use crate::crossings::segment_meets_rect;
use crate::path::{CollectedPathIter, Path, PathElement, WindingRule};
use crate::shapes::{Circle, Segment};
use crate::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D axis-aligned rectangle. `min` and `max` are both inclusive
/// pixel corners.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
    defined: bool,
}

impl Rect {
    /// Create a new empty (undefined) rectangle.
    #[inline]
    pub fn new() -> Self {
        Self {
            min: Point::new(Coord::MAX, Coord::MAX),
            max: Point::new(Coord::MIN, Coord::MIN),
            defined: false,
        }
    }

    /// Create a rectangle from ordered min and max corners.
    #[inline]
    pub fn from_min_max(min: Point, max: Point) -> Self {
        assert!(
            min.x <= max.x && min.y <= max.y,
            "rectangle corners must be ordered"
        );
        Self {
            min,
            max,
            defined: true,
        }
    }

    /// Create a rectangle from ordered corner coordinates.
    #[inline]
    pub fn from_coords(min_x: Coord, min_y: Coord, max_x: Coord, max_y: Coord) -> Self {
        Self::from_min_max(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Create a rectangle from two arbitrary corners, normalizing them.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
            defined: true,
        }
    }

    /// Create a rectangle covering a slice of points.
    pub fn from_points(points: &[Point]) -> Self {
        let mut rect = Self::new();
        for p in points {
            rect.merge_point(*p);
        }
        rect
    }

    /// Whether the rectangle has been given an extent.
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.defined
    }

    /// Whether the rectangle is empty (undefined).
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.defined
    }

    /// Reset to the undefined state.
    pub fn reset(&mut self) {
        self.min = Point::new(Coord::MAX, Coord::MAX);
        self.max = Point::new(Coord::MIN, Coord::MIN);
        self.defined = false;
    }

    /// Grow the rectangle to cover a point.
    pub fn merge_point(&mut self, p: Point) {
        if self.defined {
            self.min.x = self.min.x.min(p.x);
            self.min.y = self.min.y.min(p.y);
            self.max.x = self.max.x.max(p.x);
            self.max.y = self.max.y.max(p.y);
        } else {
            self.min = p;
            self.max = p;
            self.defined = true;
        }
    }

    /// Grow the rectangle to cover another rectangle.
    pub fn merge(&mut self, other: &Rect) {
        if other.defined {
            self.merge_point(other.min);
            self.merge_point(other.max);
        }
    }

    /// Width of the covered pixel span.
    #[inline]
    pub fn width(&self) -> Coord {
        if self.defined {
            self.max.x - self.min.x
        } else {
            0
        }
    }

    /// Height of the covered pixel span.
    #[inline]
    pub fn height(&self) -> Coord {
        if self.defined {
            self.max.y - self.min.y
        } else {
            0
        }
    }

    /// Size as a point (width, height).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width(), self.height())
    }

    /// Center point (rounded toward the min corner).
    #[inline]
    pub fn center(&self) -> Point {
        Point::new((self.min.x + self.max.x) / 2, (self.min.y + self.max.y) / 2)
    }

    /// Area of the covered span, widened.
    #[inline]
    pub fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    /// Whether the pixel `(x, y)` is inside the rectangle (borders
    /// included).
    #[inline]
    pub fn contains_point(&self, x: Coord, y: Coord) -> bool {
        self.defined && x >= self.min.x && x <= self.max.x && y >= self.min.y && y <= self.max.y
    }

    /// Whether this rectangle fully contains another.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.defined
            && other.defined
            && self.contains_point(other.min.x, other.min.y)
            && self.contains_point(other.max.x, other.max.y)
    }

    /// Whether this rectangle and another overlap (shared border pixels
    /// count).
    #[inline]
    pub fn intersects_rect(&self, other: &Rect) -> bool {
        self.defined
            && other.defined
            && self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// The overlap of two rectangles.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects_rect(other) {
            return None;
        }
        Some(Rect::from_min_max(
            Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        ))
    }

    /// Whether the circle's disk and this rectangle overlap.
    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        circle.intersects_rect(self)
    }

    /// Whether any pixel of the segment lies in this rectangle.
    pub fn intersects_segment(&self, segment: &Segment) -> bool {
        self.defined
            && segment_meets_rect(
                self.min.x,
                self.min.y,
                self.max.x,
                self.max.y,
                segment.p1.x,
                segment.p1.y,
                segment.p2.x,
                segment.p2.y,
            )
    }

    /// Whether the path region and this rectangle overlap.
    pub fn intersects_path(&self, path: &Path) -> bool {
        path.intersects_rect(self)
    }

    /// Grow by a margin on all sides.
    pub fn expand(&mut self, margin: Coord) {
        if self.defined {
            self.min.x -= margin;
            self.min.y -= margin;
            self.max.x += margin;
            self.max.y += margin;
        }
    }

    /// Return an expanded copy.
    pub fn expanded(&self, margin: Coord) -> Self {
        let mut result = *self;
        result.expand(margin);
        result
    }

    /// Translate in place.
    pub fn translate(&mut self, dx: Coord, dy: Coord) {
        if self.defined {
            let v = super::Vector::new(dx, dy);
            self.min += v;
            self.max += v;
        }
    }

    /// The four corners, counter-clockwise from `min`.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }

    /// Clamp a point into the rectangle.
    pub fn clamp_point(&self, x: Coord, y: Coord) -> Point {
        Point::new(
            x.clamp(self.min.x, self.max.x),
            y.clamp(self.min.y, self.max.y),
        )
    }

    /// Closest rectangle pixel to `(x, y)`; the point itself when inside.
    pub fn closest_point_to(&self, x: Coord, y: Coord) -> Point {
        if !self.defined {
            return Point::zero();
        }
        self.clamp_point(x, y)
    }

    /// Farthest rectangle pixel from `(x, y)`: always a corner.
    pub fn farthest_point_to(&self, x: Coord, y: Coord) -> Point {
        if !self.defined {
            return Point::zero();
        }
        let target = Point::new(x, y);
        let mut best = self.min;
        let mut best_d = i64::MIN;
        for corner in self.corners() {
            let d = corner.distance_squared(&target);
            if d > best_d {
                best_d = d;
                best = corner;
            }
        }
        best
    }

    /// The rectangle's bounding box: itself.
    #[inline]
    pub fn bounding_box(&self) -> Rect {
        *self
    }

    /// Outline as path elements (move, three lines, close).
    pub fn path_iter(&self) -> CollectedPathIter {
        let elements = if self.defined {
            vec![
                PathElement::MoveTo {
                    x: self.min.x,
                    y: self.min.y,
                },
                PathElement::LineTo {
                    x: self.max.x,
                    y: self.min.y,
                },
                PathElement::LineTo {
                    x: self.max.x,
                    y: self.max.y,
                },
                PathElement::LineTo {
                    x: self.min.x,
                    y: self.max.y,
                },
                PathElement::Close {
                    from_x: self.min.x,
                    from_y: self.max.y,
                    x: self.min.x,
                    y: self.min.y,
                },
            ]
        } else {
            Vec::new()
        };
        CollectedPathIter::new(elements, WindingRule::NonZero)
    }

    /// Border pixels, counter-clockwise, corners emitted once.
    pub fn point_iter(&self) -> RectPerimeterIter {
        RectPerimeterIter::new(self)
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.defined {
            write!(f, "Rect({:?} - {:?})", self.min, self.max)
        } else {
            write!(f, "Rect(undefined)")
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.defined {
            write!(f, "[{} - {}]", self.min, self.max)
        } else {
            write!(f, "[undefined]")
        }
    }
}

/// Restartable iterator over a rectangle's border pixels.
#[derive(Debug, Clone)]
pub struct RectPerimeterIter {
    xmin: Coord,
    ymin: Coord,
    xmax: Coord,
    ymax: Coord,
    empty: bool,
    side: u8,
    x: Coord,
    y: Coord,
    done: bool,
}

impl RectPerimeterIter {
    pub(crate) fn new(rect: &Rect) -> Self {
        let mut iter = Self {
            xmin: rect.min.x,
            ymin: rect.min.y,
            xmax: rect.max.x,
            ymax: rect.max.y,
            empty: rect.is_empty(),
            side: 0,
            x: 0,
            y: 0,
            done: false,
        };
        iter.restart();
        iter
    }

    /// Re-walk the border from the min corner.
    pub fn restart(&mut self) {
        self.side = 0;
        self.x = self.xmin;
        self.y = self.ymin;
        self.done = self.empty;
    }
}

impl Iterator for RectPerimeterIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        loop {
            if self.done {
                return None;
            }
            match self.side {
                // Bottom row, left to right.
                0 => {
                    if self.x <= self.xmax {
                        let p = Point::new(self.x, self.ymin);
                        self.x += 1;
                        return Some(p);
                    }
                    self.side = 1;
                    self.y = self.ymin + 1;
                }
                // Right column, upward.
                1 => {
                    if self.y <= self.ymax {
                        let p = Point::new(self.xmax, self.y);
                        self.y += 1;
                        return Some(p);
                    }
                    self.side = 2;
                    self.x = self.xmax - 1;
                }
                // Top row, right to left (absent for degenerate heights).
                2 => {
                    if self.ymax > self.ymin && self.x >= self.xmin {
                        let p = Point::new(self.x, self.ymax);
                        self.x -= 1;
                        return Some(p);
                    }
                    self.side = 3;
                    self.y = self.ymax - 1;
                }
                // Left column, downward, both corners already emitted.
                _ => {
                    if self.xmax > self.xmin && self.y > self.ymin {
                        let p = Point::new(self.xmin, self.y);
                        self.y -= 1;
                        return Some(p);
                    }
                    self.done = true;
                }
            }
        }
    }
}
