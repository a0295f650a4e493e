//! Path shadows: crossing computation of a query segment against a whole
//! path, with a bounding-box fast path, and the closest-point variant.

use super::path::{compute_crossings_on_path, EdgeCrossings};
use super::{
    crossings_from_rect, segment_intersection_filtered, segment_intersection_pixel, x_run_at_row,
    SHAPE_INTERSECTS,
};
use crate::geometry::Point;
use crate::path::Path;
use crate::raster::LinePixelIter;
use crate::Coord;

/// Closest pixel of the segment `(x0, y0)-(x1, y1)` to `(px, py)`,
/// together with its squared distance, found by walking the segment's
/// pixels.
pub(crate) fn closest_pixel_on_segment(
    x0: Coord,
    y0: Coord,
    x1: Coord,
    y1: Coord,
    px: Coord,
    py: Coord,
) -> (Point, i64) {
    let target = Point::new(px, py);
    let mut best = Point::new(x0, y0);
    let mut best_d = i64::MAX;
    for p in LinePixelIter::new(x0, y0, x1, y1) {
        let d = p.distance_squared(&target);
        if d < best_d {
            best_d = d;
            best = p;
        }
    }
    (best, best_d)
}

/// Border-row bookkeeping shared by the shadow walks: the path's extreme
/// pixel rows and the leftmost x at which the path touches each of them.
///
/// The rows are discovered while walking the flattened edges (a curved
/// path's control-hull bounding box can overshoot rows no pixel ever
/// reaches); each border keeps a "has a value yet" flag via `Option`.
#[derive(Debug, Clone, Copy, Default)]
struct BorderTrack {
    /// `(row, leftmost x)` of the lowest pixel row seen so far.
    ymin: Option<(Coord, Coord)>,
    /// `(row, leftmost x)` of the highest pixel row seen so far.
    ymax: Option<(Coord, Coord)>,
}

impl BorderTrack {
    fn observe_edge(&mut self, x0: Coord, y0: Coord, x1: Coord, y1: Coord) {
        // An edge attains its extreme rows at its endpoints, so probing
        // those two runs is enough.
        let (ymin_e, ymax_e) = (y0.min(y1), y0.max(y1));
        if let Some((lo, _)) = x_run_at_row(x0, y0, x1, y1, ymin_e) {
            self.ymin = Some(match self.ymin {
                None => (ymin_e, lo),
                Some((row, _)) if ymin_e < row => (ymin_e, lo),
                Some((row, x)) if ymin_e == row => (row, x.min(lo)),
                Some(kept) => kept,
            });
        }
        if let Some((lo, _)) = x_run_at_row(x0, y0, x1, y1, ymax_e) {
            self.ymax = Some(match self.ymax {
                None => (ymax_e, lo),
                Some((row, _)) if ymax_e > row => (ymax_e, lo),
                Some((row, x)) if ymax_e == row => (row, x.min(lo)),
                Some(kept) => kept,
            });
        }
    }

    /// Convert the border flags into crossing adjustments for the query
    /// segment, under the shared row-touch convention.
    fn adjustments(&self, x0: Coord, y0: Coord, x1: Coord, y1: Coord) -> i32 {
        if y0 == y1 {
            // A horizontal query runs parallel to the border rays.
            return 0;
        }
        let (eymin, eymax) = (y0.min(y1), y0.max(y1));
        let dir = if y0 < y1 { 1 } else { -1 };
        let mut adj = 0;
        if let Some((row, xm)) = self.ymin {
            if let Some((lo, _)) = x_run_at_row(x0, y0, x1, y1, row) {
                let counts = (row > eymin && row < eymax) || row == eymin;
                if lo >= xm && counts {
                    adj += dir;
                }
            }
        }
        if let Some((row, xm)) = self.ymax {
            if let Some((lo, _)) = x_run_at_row(x0, y0, x1, y1, row) {
                let counts = (row > eymin && row < eymax) || row == eymax;
                if lo >= xm && counts {
                    adj += dir;
                }
            }
        }
        adj
    }
}

struct ShadowWalker {
    qx0: Coord,
    qy0: Coord,
    qx1: Coord,
    qy1: Coord,
    track: BorderTrack,
}

impl EdgeCrossings for ShadowWalker {
    fn edge(&mut self, crossings: i32, x0: Coord, y0: Coord, x1: Coord, y1: Coord) -> i32 {
        if segment_intersection_filtered(
            x0, y0, x1, y1, self.qx0, self.qy0, self.qx1, self.qy1, true, true,
        ) {
            return SHAPE_INTERSECTS;
        }
        self.track.observe_edge(x0, y0, x1, y1);
        crossings
    }
}

/// Crossing computation of a query segment against the shadow of a path.
///
/// Phase one tests the segment against the path's bounding box with
/// [`crossings_from_rect`]; a zero result proves the segment misses the
/// shadow entirely and skips the walk. Phase two re-walks the (flattened)
/// path: any pixel-exact edge intersection is the sentinel, and the
/// leftmost border-row contacts convert into crossing adjustments
/// combined with the caller's accumulator.
#[derive(Debug)]
pub struct PathShadow<'a> {
    path: &'a Path,
}

impl<'a> PathShadow<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// Fold the crossing contribution of the query segment
    /// `(x0, y0)-(x1, y1)` into `crossings`.
    pub fn compute_crossings(
        &self,
        crossings: i32,
        x0: Coord,
        y0: Coord,
        x1: Coord,
        y1: Coord,
    ) -> i32 {
        if crossings == SHAPE_INTERSECTS {
            return crossings;
        }
        let bounds = self.path.bounding_box();
        if bounds.is_empty() {
            return crossings;
        }
        let quick = crossings_from_rect(
            0,
            bounds.min.x,
            bounds.min.y,
            bounds.max.x,
            bounds.max.y,
            x0,
            y0,
            x1,
            y1,
        );
        if quick == 0 {
            return crossings;
        }
        let mut walker = ShadowWalker {
            qx0: x0,
            qy0: y0,
            qx1: x1,
            qy1: y1,
            track: BorderTrack::default(),
        };
        let walked =
            compute_crossings_on_path(&mut self.path.iter(), &mut walker, true).unwrap_or(0);
        if walked == SHAPE_INTERSECTS {
            return SHAPE_INTERSECTS;
        }
        crossings + walker.track.adjustments(x0, y0, x1, y1)
    }

    /// Fold every edge of another path through this shadow, auto-closing
    /// it: the result is twice the winding of `other` around this path's
    /// region, or the sentinel on boundary contact.
    pub(crate) fn fold_path(&self, other: &Path) -> i32 {
        struct Fold<'s, 'p> {
            shadow: &'s PathShadow<'p>,
        }
        impl EdgeCrossings for Fold<'_, '_> {
            fn edge(&mut self, crossings: i32, x0: Coord, y0: Coord, x1: Coord, y1: Coord) -> i32 {
                self.shadow.compute_crossings(crossings, x0, y0, x1, y1)
            }
        }
        compute_crossings_on_path(&mut other.iter(), &mut Fold { shadow: self }, true).unwrap_or(0)
    }
}

struct ClosestWalker {
    qx0: Coord,
    qy0: Coord,
    qx1: Coord,
    qy1: Coord,
    track: BorderTrack,
    best: Option<(i64, Point, Point)>,
}

impl ClosestWalker {
    fn consider(&mut self, d: i64, on_path: Point, on_query: Point) {
        if self.best.map_or(true, |(bd, _, _)| d < bd) {
            self.best = Some((d, on_path, on_query));
        }
    }
}

impl EdgeCrossings for ClosestWalker {
    fn edge(&mut self, crossings: i32, x0: Coord, y0: Coord, x1: Coord, y1: Coord) -> i32 {
        if let Some(p) = segment_intersection_pixel(
            x0, y0, x1, y1, self.qx0, self.qy0, self.qx1, self.qy1, true, true,
        ) {
            // Touching: distance zero, and no smaller pair can exist.
            self.best = Some((0, p, p));
            return SHAPE_INTERSECTS;
        }
        // Disjoint pixel segments attain their minimum distance against
        // an endpoint of one of them.
        let (qx0, qy0, qx1, qy1) = (self.qx0, self.qy0, self.qx1, self.qy1);
        let (p, d) = closest_pixel_on_segment(x0, y0, x1, y1, qx0, qy0);
        self.consider(d, p, Point::new(qx0, qy0));
        let (p, d) = closest_pixel_on_segment(x0, y0, x1, y1, qx1, qy1);
        self.consider(d, p, Point::new(qx1, qy1));
        let (q, d) = closest_pixel_on_segment(qx0, qy0, qx1, qy1, x0, y0);
        self.consider(d, Point::new(x0, y0), q);
        let (q, d) = closest_pixel_on_segment(qx0, qy0, qx1, qy1, x1, y1);
        self.consider(d, Point::new(x1, y1), q);
        self.track.observe_edge(x0, y0, x1, y1);
        crossings
    }
}

/// [`PathShadow`] variant that additionally tracks the minimum-distance
/// point pair between the query segment and every path edge visited.
///
/// Unlike the plain shadow there is no bounding-box skip: the walk is the
/// point of this type, and a strictly smaller pair replaces the running
/// best. Distance zero (touching) short-circuits to the sentinel.
#[derive(Debug)]
pub struct ClosestPointPathShadow<'a> {
    path: &'a Path,
    best: Option<(i64, Point, Point)>,
}

impl<'a> ClosestPointPathShadow<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path, best: None }
    }

    /// Fold the crossing contribution of the query segment into
    /// `crossings` while tracking the closest pair seen so far.
    pub fn compute_crossings(
        &mut self,
        crossings: i32,
        x0: Coord,
        y0: Coord,
        x1: Coord,
        y1: Coord,
    ) -> i32 {
        let bounds = self.path.bounding_box();
        if bounds.is_empty() {
            return crossings;
        }
        let mut walker = ClosestWalker {
            qx0: x0,
            qy0: y0,
            qx1: x1,
            qy1: y1,
            track: BorderTrack::default(),
            best: self.best,
        };
        let walked =
            compute_crossings_on_path(&mut self.path.iter(), &mut walker, true).unwrap_or(0);
        self.best = walker.best;
        if crossings == SHAPE_INTERSECTS || walked == SHAPE_INTERSECTS {
            return SHAPE_INTERSECTS;
        }
        crossings + walker.track.adjustments(x0, y0, x1, y1)
    }

    /// The closest pair found so far: `(point on path, point on query)`.
    pub fn closest_pair(&self) -> Option<(Point, Point)> {
        self.best.map(|(_, p, q)| (p, q))
    }

    /// Squared distance of the closest pair found so far.
    pub fn distance_squared(&self) -> Option<i64> {
        self.best.map(|(d, _, _)| d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::WindingRule;

    fn square() -> Path {
        let mut p = Path::new(WindingRule::NonZero);
        p.move_to(0, 0);
        p.line_to(10, 0);
        p.line_to(10, 10);
        p.line_to(0, 10);
        p.close();
        p
    }

    #[test]
    fn test_shadow_segment_right_of_path() {
        let p = square();
        let shadow = PathShadow::new(&p);
        // Vertical segment right of the square crossing both border rows.
        assert_eq!(shadow.compute_crossings(0, 15, -5, 15, 15), 2);
        assert_eq!(shadow.compute_crossings(0, 15, 15, 15, -5), -2);
    }

    #[test]
    fn test_shadow_segment_left_of_path() {
        let p = square();
        let shadow = PathShadow::new(&p);
        assert_eq!(shadow.compute_crossings(0, -5, -5, -5, 15), 0);
    }

    #[test]
    fn test_shadow_segment_touching_path() {
        let p = square();
        let shadow = PathShadow::new(&p);
        assert_eq!(
            shadow.compute_crossings(0, 5, 5, 15, 5),
            SHAPE_INTERSECTS
        );
    }

    #[test]
    fn test_shadow_segment_inside_path() {
        // Strictly interior segment: no border row is reached, so the
        // shadow contributes nothing (the enclosing region is detected by
        // the aggregator direction, not the shadow direction).
        let p = square();
        let shadow = PathShadow::new(&p);
        assert_eq!(shadow.compute_crossings(0, 4, 4, 6, 6), 0);
    }

    #[test]
    fn test_shadow_combines_initial_value() {
        let p = square();
        let shadow = PathShadow::new(&p);
        assert_eq!(shadow.compute_crossings(3, 15, -5, 15, 15), 5);
        assert_eq!(
            shadow.compute_crossings(SHAPE_INTERSECTS, 15, -5, 15, 15),
            SHAPE_INTERSECTS
        );
    }

    #[test]
    fn test_closest_shadow_touching() {
        let p = square();
        let mut shadow = ClosestPointPathShadow::new(&p);
        let c = shadow.compute_crossings(0, 5, 5, 15, 5);
        assert_eq!(c, SHAPE_INTERSECTS);
        assert_eq!(shadow.distance_squared(), Some(0));
        let (on_path, on_query) = shadow.closest_pair().unwrap();
        assert_eq!(on_path, Point::new(10, 5));
        assert_eq!(on_query, Point::new(10, 5));
    }

    #[test]
    fn test_closest_shadow_disjoint() {
        let p = square();
        let mut shadow = ClosestPointPathShadow::new(&p);
        let c = shadow.compute_crossings(0, 15, 5, 20, 5);
        assert_ne!(c, SHAPE_INTERSECTS);
        assert_eq!(shadow.distance_squared(), Some(25));
        let (on_path, on_query) = shadow.closest_pair().unwrap();
        assert_eq!(on_path, Point::new(10, 5));
        assert_eq!(on_query, Point::new(15, 5));
    }

    #[test]
    fn test_closest_pixel_on_segment() {
        let (p, d) = closest_pixel_on_segment(0, 0, 10, 0, 4, 3);
        assert_eq!(p, Point::new(4, 0));
        assert_eq!(d, 9);
        // Beyond the endpoint the endpoint itself is closest.
        let (p, d) = closest_pixel_on_segment(0, 0, 10, 0, 14, 0);
        assert_eq!(p, Point::new(10, 0));
        assert_eq!(d, 16);
    }
}
