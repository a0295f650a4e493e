//! Crossing aggregation over path element streams.
//!
//! One generic engine walks any [`PathIterator`], maintaining the pen and
//! move-to positions, flattening curve elements on demand and folding a
//! per-edge crossing tester into a single accumulator. The sentinel
//! short-circuits the walk as soon as a boundary intersection is found.

use super::{
    crossings_from_circle, crossings_from_point, crossings_from_rect, crossings_from_segment,
    SHAPE_INTERSECTS,
};
use crate::geometry::Point;
use crate::path::{flatten_cubic, flatten_quad, PathElement, PathIterator, FLATTENING_TOLERANCE};
use crate::{Coord, Error, Result};

/// Per-edge crossing computation folded by the aggregation engine.
pub(crate) trait EdgeCrossings {
    fn edge(&mut self, crossings: i32, x0: Coord, y0: Coord, x1: Coord, y1: Coord) -> i32;
}

/// Walk a path element stream and fold `tester` over every edge.
///
/// The first element must be a move-to ([`Error::MalformedPath`]
/// otherwise); an empty stream contributes zero crossings. A move-to
/// starts a new subpath without closing the previous one. With
/// `auto_close`, a stream that ends away from its last move-to point gets
/// one final closing-edge test; without it, an open ending zeroes the
/// count, which is then meaningful only through the sentinel.
pub(crate) fn compute_crossings_on_path<I, T>(
    it: &mut I,
    tester: &mut T,
    auto_close: bool,
) -> Result<i32>
where
    I: PathIterator,
    T: EdgeCrossings,
{
    let mut crossings = 0i32;
    let mut seen_move = false;
    let mut cur = Point::zero();
    let mut mov = Point::zero();
    let mut flat: Vec<Point> = Vec::new();

    while let Some(element) = it.next() {
        match element {
            PathElement::MoveTo { x, y } => {
                cur = Point::new(x, y);
                mov = cur;
                seen_move = true;
            }
            _ if !seen_move => return Err(Error::MalformedPath),
            PathElement::LineTo { x, y } => {
                crossings = tester.edge(crossings, cur.x, cur.y, x, y);
                cur = Point::new(x, y);
            }
            PathElement::QuadTo { ctrl_x, ctrl_y, x, y } => {
                flat.clear();
                flatten_quad(
                    cur,
                    Point::new(ctrl_x, ctrl_y),
                    Point::new(x, y),
                    FLATTENING_TOLERANCE,
                    &mut flat,
                );
                for p in &flat {
                    crossings = tester.edge(crossings, cur.x, cur.y, p.x, p.y);
                    if crossings == SHAPE_INTERSECTS {
                        break;
                    }
                    cur = *p;
                }
                cur = Point::new(x, y);
            }
            PathElement::CurveTo {
                ctrl1_x,
                ctrl1_y,
                ctrl2_x,
                ctrl2_y,
                x,
                y,
            } => {
                flat.clear();
                flatten_cubic(
                    cur,
                    Point::new(ctrl1_x, ctrl1_y),
                    Point::new(ctrl2_x, ctrl2_y),
                    Point::new(x, y),
                    FLATTENING_TOLERANCE,
                    &mut flat,
                );
                for p in &flat {
                    crossings = tester.edge(crossings, cur.x, cur.y, p.x, p.y);
                    if crossings == SHAPE_INTERSECTS {
                        break;
                    }
                    cur = *p;
                }
                cur = Point::new(x, y);
            }
            PathElement::Close { .. } => {
                if cur != mov {
                    crossings = tester.edge(crossings, cur.x, cur.y, mov.x, mov.y);
                }
                cur = mov;
            }
        }
        if crossings == SHAPE_INTERSECTS {
            return Ok(SHAPE_INTERSECTS);
        }
    }
    if !seen_move {
        return Ok(0);
    }
    if cur != mov {
        if auto_close {
            crossings = tester.edge(crossings, cur.x, cur.y, mov.x, mov.y);
            if crossings == SHAPE_INTERSECTS {
                return Ok(SHAPE_INTERSECTS);
            }
        } else {
            crossings = 0;
        }
    }
    Ok(crossings)
}

struct PointTester {
    px: Coord,
    py: Coord,
}

impl EdgeCrossings for PointTester {
    fn edge(&mut self, crossings: i32, x0: Coord, y0: Coord, x1: Coord, y1: Coord) -> i32 {
        crossings_from_point(crossings, self.px, self.py, x0, y0, x1, y1)
    }
}

struct SegmentTester {
    sx1: Coord,
    sy1: Coord,
    sx2: Coord,
    sy2: Coord,
}

impl EdgeCrossings for SegmentTester {
    fn edge(&mut self, crossings: i32, x0: Coord, y0: Coord, x1: Coord, y1: Coord) -> i32 {
        crossings_from_segment(
            crossings, self.sx1, self.sy1, self.sx2, self.sy2, x0, y0, x1, y1,
        )
    }
}

struct CircleTester {
    cx: Coord,
    cy: Coord,
    radius: Coord,
}

impl EdgeCrossings for CircleTester {
    fn edge(&mut self, crossings: i32, x0: Coord, y0: Coord, x1: Coord, y1: Coord) -> i32 {
        crossings_from_circle(crossings, self.cx, self.cy, self.radius, x0, y0, x1, y1)
    }
}

struct RectTester {
    rxmin: Coord,
    rymin: Coord,
    rxmax: Coord,
    rymax: Coord,
}

impl EdgeCrossings for RectTester {
    fn edge(&mut self, crossings: i32, x0: Coord, y0: Coord, x1: Coord, y1: Coord) -> i32 {
        crossings_from_rect(
            crossings, self.rxmin, self.rymin, self.rxmax, self.rymax, x0, y0, x1, y1,
        )
    }
}

/// Crossing number of a path around the point `(px, py)`.
pub fn crossings_from_path_point<I: PathIterator>(
    it: &mut I,
    px: Coord,
    py: Coord,
    auto_close: bool,
) -> Result<i32> {
    compute_crossings_on_path(it, &mut PointTester { px, py }, auto_close)
}

/// Crossing number of a path around the shadow of a segment.
pub fn crossings_from_path_segment<I: PathIterator>(
    it: &mut I,
    sx1: Coord,
    sy1: Coord,
    sx2: Coord,
    sy2: Coord,
    auto_close: bool,
) -> Result<i32> {
    compute_crossings_on_path(it, &mut SegmentTester { sx1, sy1, sx2, sy2 }, auto_close)
}

/// Crossing number of a path around the shadow of a circle.
pub fn crossings_from_path_circle<I: PathIterator>(
    it: &mut I,
    cx: Coord,
    cy: Coord,
    radius: Coord,
    auto_close: bool,
) -> Result<i32> {
    compute_crossings_on_path(it, &mut CircleTester { cx, cy, radius }, auto_close)
}

/// Crossing number of a path around the shadow of a rectangle.
pub fn crossings_from_path_rect<I: PathIterator>(
    it: &mut I,
    rxmin: Coord,
    rymin: Coord,
    rxmax: Coord,
    rymax: Coord,
    auto_close: bool,
) -> Result<i32> {
    compute_crossings_on_path(
        it,
        &mut RectTester {
            rxmin,
            rymin,
            rxmax,
            rymax,
        },
        auto_close,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{CollectedPathIter, Path, WindingRule};

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
    fn test_point_inside_square() {
        let p = square();
        assert_eq!(crossings_from_path_point(&mut p.iter(), 5, 5, true), Ok(1));
        assert_eq!(crossings_from_path_point(&mut p.iter(), 20, 20, true), Ok(0));
    }

    #[test]
    fn test_point_on_boundary_is_sentinel() {
        let p = square();
        assert_eq!(
            crossings_from_path_point(&mut p.iter(), 0, 5, true),
            Ok(SHAPE_INTERSECTS)
        );
    }

    #[test]
    fn test_malformed_path_stream() {
        let mut it = CollectedPathIter::new(
            vec![PathElement::LineTo { x: 5, y: 5 }],
            WindingRule::NonZero,
        );
        assert_eq!(
            crossings_from_path_point(&mut it, 0, 0, true),
            Err(Error::MalformedPath)
        );
    }

    #[test]
    fn test_empty_stream_is_zero() {
        let mut it = CollectedPathIter::new(Vec::new(), WindingRule::NonZero);
        assert_eq!(crossings_from_path_point(&mut it, 0, 0, true), Ok(0));
    }

    #[test]
    fn test_open_path_without_auto_close_is_zero() {
        // A wedge that would wind around the point once closed.
        let mut p = Path::default();
        p.move_to(0, 0);
        p.line_to(10, 0);
        p.line_to(10, 10);
        p.line_to(0, 10);
        assert_eq!(crossings_from_path_point(&mut p.iter(), 5, 5, false), Ok(0));
        assert_eq!(crossings_from_path_point(&mut p.iter(), 5, 5, true), Ok(1));
    }

    #[test]
    fn test_open_path_sentinel_survives() {
        let mut p = Path::default();
        p.move_to(0, 5);
        p.line_to(10, 5);
        assert_eq!(
            crossings_from_path_point(&mut p.iter(), 5, 5, false),
            Ok(SHAPE_INTERSECTS)
        );
    }

    #[test]
    fn test_segment_enclosed_by_square() {
        let p = square();
        assert_eq!(
            crossings_from_path_segment(&mut p.iter(), 4, 4, 6, 6, true),
            Ok(2)
        );
    }

    #[test]
    fn test_segment_crossing_square_boundary() {
        let p = square();
        assert_eq!(
            crossings_from_path_segment(&mut p.iter(), 5, 5, 15, 5, true),
            Ok(SHAPE_INTERSECTS)
        );
    }

    #[test]
    fn test_segment_outside_square() {
        let p = square();
        assert_eq!(
            crossings_from_path_segment(&mut p.iter(), 20, 0, 25, 5, true),
            Ok(0)
        );
    }

    #[test]
    fn test_circle_enclosed_by_square() {
        let p = square();
        assert_eq!(
            crossings_from_path_circle(&mut p.iter(), 5, 5, 2, true),
            Ok(2)
        );
    }

    #[test]
    fn test_rect_enclosed_by_square() {
        let p = square();
        assert_eq!(
            crossings_from_path_rect(&mut p.iter(), 3, 3, 7, 7, true),
            Ok(2)
        );
    }

    #[test]
    fn test_reversed_square_counts_negative() {
        let mut p = Path::default();
        p.move_to(0, 0);
        p.line_to(0, 10);
        p.line_to(10, 10);
        p.line_to(10, 0);
        p.close();
        assert_eq!(crossings_from_path_point(&mut p.iter(), 5, 5, true), Ok(-1));
        assert_eq!(
            crossings_from_path_rect(&mut p.iter(), 3, 3, 7, 7, true),
            Ok(-2)
        );
    }

    #[test]
    fn test_quad_path_crossings() {
        // Arch peaking at y=10, closed along the x axis; the loop runs
        // clockwise, so the interior winds to -1.
        let mut p = Path::default();
        p.move_to(0, 0);
        p.quad_to(10, 20, 20, 0);
        p.close();
        assert_eq!(crossings_from_path_point(&mut p.iter(), 10, 5, true), Ok(-1));
        assert_eq!(crossings_from_path_point(&mut p.iter(), 10, 15, true), Ok(0));
    }
}
