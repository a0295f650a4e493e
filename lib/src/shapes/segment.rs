//! Segment shape with integer endpoints.

use crate::crossings::{
    closest_pixel_on_segment, intersects_segment_segment, x_run_at_row,
};
use crate::geometry::{side_of_line, Point, Rect};
use crate::path::{CollectedPathIter, Path, PathElement, WindingRule};
use crate::raster::LinePixelIter;
use crate::shapes::Circle;
use crate::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A straight segment between two pixels. As a shape it is exactly its
/// Bresenham pixel set.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl Segment {
    /// Create a segment from endpoint coordinates.
    #[inline]
    pub const fn new(x1: Coord, y1: Coord, x2: Coord, y2: Coord) -> Self {
        Self {
            p1: Point::new(x1, y1),
            p2: Point::new(x2, y2),
        }
    }

    /// Create a segment between two points.
    #[inline]
    pub const fn between(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Whether the segment has zero extent (both endpoints equal).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.p1 == self.p2
    }

    /// Bounding box of the two endpoints.
    pub fn bounding_box(&self) -> Rect {
        Rect::from_corners(self.p1, self.p2)
    }

    /// Translate both endpoints.
    pub fn translate(&mut self, dx: Coord, dy: Coord) {
        let v = crate::geometry::Vector::new(dx, dy);
        self.p1 += v;
        self.p2 += v;
    }

    /// Whether the pixel `(x, y)` is on the segment's walk.
    pub fn contains_point(&self, x: Coord, y: Coord) -> bool {
        let target = Point::new(x, y);
        self.pixels().any(|p| p == target)
    }

    /// Whether the rectangle's pixels are all on the segment.
    ///
    /// Only degenerate rectangles (a single pixel or an axis-aligned run)
    /// can ever satisfy this for a zero-area shape.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        if rect.is_empty() {
            return false;
        }
        let (w, h) = (rect.width(), rect.height());
        if w != 0 && h != 0 {
            return false;
        }
        if w == 0 && h == 0 {
            return self.contains_point(rect.min.x, rect.min.y);
        }
        if h == 0 {
            // A horizontal run: the segment's pixel run on that row must
            // cover it.
            return match x_run_at_row(self.p1.x, self.p1.y, self.p2.x, self.p2.y, rect.min.y) {
                Some((lo, hi)) => lo <= rect.min.x && hi >= rect.max.x,
                None => false,
            };
        }
        match self.y_run_at_column(rect.min.x) {
            Some((lo, hi)) => lo <= rect.min.y && hi >= rect.max.y,
            None => false,
        }
    }

    /// The contiguous y-extent of the segment's pixels in one column.
    fn y_run_at_column(&self, column: Coord) -> Option<(Coord, Coord)> {
        let mut run: Option<(Coord, Coord)> = None;
        for p in self.pixels() {
            if p.x == column {
                run = Some(match run {
                    None => (p.y, p.y),
                    Some((lo, hi)) => (lo.min(p.y), hi.max(p.y)),
                });
            } else if run.is_some() {
                break;
            }
        }
        run
    }

    /// Pixel-exact intersection with another segment.
    pub fn intersects_segment(&self, other: &Segment) -> bool {
        intersects_segment_segment(
            self.p1.x, self.p1.y, self.p2.x, self.p2.y, other.p1.x, other.p1.y, other.p2.x,
            other.p2.y,
        )
    }

    /// Whether any pixel of the segment lies in the circle's disk.
    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        circle.intersects_segment(self)
    }

    /// Whether any pixel of the segment lies in the rectangle.
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        rect.intersects_segment(self)
    }

    /// Whether the segment and the path region overlap.
    pub fn intersects_path(&self, path: &Path) -> bool {
        path.intersects_segment(self)
    }

    /// Closest segment pixel to `(x, y)`.
    pub fn closest_point_to(&self, x: Coord, y: Coord) -> Point {
        closest_pixel_on_segment(self.p1.x, self.p1.y, self.p2.x, self.p2.y, x, y).0
    }

    /// Squared distance from `(x, y)` to the nearest segment pixel.
    pub fn distance_squared_to(&self, x: Coord, y: Coord) -> i64 {
        closest_pixel_on_segment(self.p1.x, self.p1.y, self.p2.x, self.p2.y, x, y).1
    }

    /// Farthest segment pixel from `(x, y)`: always an endpoint.
    pub fn farthest_point_to(&self, x: Coord, y: Coord) -> Point {
        let target = Point::new(x, y);
        if self.p2.distance_squared(&target) > self.p1.distance_squared(&target) {
            self.p2
        } else {
            self.p1
        }
    }

    /// Side of the directed line `p1 -> p2` the point falls on: positive
    /// left, negative right, zero collinear.
    pub fn side_of_point(&self, x: Coord, y: Coord) -> i64 {
        side_of_line(self.p1.x, self.p1.y, self.p2.x, self.p2.y, x, y)
    }

    /// The segment as path elements (move, line).
    pub fn path_iter(&self) -> CollectedPathIter {
        CollectedPathIter::new(
            vec![
                PathElement::MoveTo {
                    x: self.p1.x,
                    y: self.p1.y,
                },
                PathElement::LineTo {
                    x: self.p2.x,
                    y: self.p2.y,
                },
            ],
            WindingRule::NonZero,
        )
    }

    /// The segment's Bresenham pixels.
    pub fn pixels(&self) -> LinePixelIter {
        LinePixelIter::between(self.p1, self.p2)
    }

    /// Alias for [`Self::pixels`], the shape point iterator.
    pub fn point_iter(&self) -> LinePixelIter {
        self.pixels()
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Segment({:?} - {:?})", self.p1, self.p2)
    }
}
