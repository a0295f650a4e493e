//! Ray-shadow crossing primitives.
//!
//! The shadow of a reference shape is its horizontal projection to the
//! right. A query edge contributes `+1` to a crossing count when it
//! crosses a shadow border row while increasing in y, `-1` while
//! decreasing, and the reserved [`SHAPE_INTERSECTS`] sentinel when it
//! touches the reference shape's own pixels. All primitives share one
//! row-touch convention, so crossing counts computed against points,
//! segments, circles, rectangles and whole paths agree with each other:
//! an edge strictly passing a row always counts; an edge touching a row
//! with its bottom endpoint counts when the bottom enable is set (the
//! default), with its top endpoint when the top enable is set.

mod path;
mod shadow;

pub use path::{
    crossings_from_path_circle, crossings_from_path_point, crossings_from_path_rect,
    crossings_from_path_segment,
};
pub use shadow::{ClosestPointPathShadow, PathShadow};
pub(crate) use shadow::closest_pixel_on_segment;

use crate::raster::{circle_contains, LinePixelIter};
use crate::Coord;

/// Reserved crossing accumulator value: an actual boundary intersection
/// was found and the numeric count is meaningless. Propagates through
/// every combining operation.
pub const SHAPE_INTERSECTS: i32 = i32::MIN;

/// The contiguous x-extent of the edge's pixels on the given row, walked
/// with the Bresenham enumerator. `None` when the edge never reaches the
/// row.
pub(crate) fn x_run_at_row(
    x0: Coord,
    y0: Coord,
    x1: Coord,
    y1: Coord,
    row: Coord,
) -> Option<(Coord, Coord)> {
    if row < y0.min(y1) || row > y0.max(y1) {
        return None;
    }
    let mut run: Option<(Coord, Coord)> = None;
    for p in LinePixelIter::new(x0, y0, x1, y1) {
        if p.y == row {
            run = Some(match run {
                None => (p.x, p.x),
                Some((lo, hi)) => (lo.min(p.x), hi.max(p.x)),
            });
        } else if run.is_some() {
            // y is monotone along the walk: the run is over.
            break;
        }
    }
    run
}

/// Crossing contribution of the edge `(x0, y0)-(x1, y1)` against the
/// rightward ray of the point `(px, py)`, with explicit border enables.
///
/// Returns the updated accumulator, or [`SHAPE_INTERSECTS`] when the
/// edge's pixels pass through `(px, py)` itself.
pub fn crossings_from_point_ex(
    crossings: i32,
    px: Coord,
    py: Coord,
    x0: Coord,
    y0: Coord,
    x1: Coord,
    y1: Coord,
    enable_top: bool,
    enable_bottom: bool,
) -> i32 {
    if crossings == SHAPE_INTERSECTS {
        return crossings;
    }
    let (ymin, ymax) = (y0.min(y1), y0.max(y1));
    if py < ymin || py > ymax {
        return crossings;
    }
    let (xmin, xmax) = (x0.min(x1), x0.max(x1));
    if y0 == y1 {
        // Horizontal edge lying in the ray's row: a direct hit or nothing.
        if px >= xmin && px <= xmax {
            return SHAPE_INTERSECTS;
        }
        return crossings;
    }
    if px > xmax {
        return crossings;
    }
    let counts = if py == ymax {
        enable_top
    } else if py == ymin {
        enable_bottom
    } else {
        true
    };
    let dir = if y0 < y1 { 1 } else { -1 };
    if px < xmin {
        // Edge strictly right of the point: pure shadow crossing.
        return if counts { crossings + dir } else { crossings };
    }
    match x_run_at_row(x0, y0, x1, y1, py) {
        Some((lo, hi)) => {
            if px >= lo && px <= hi {
                SHAPE_INTERSECTS
            } else if counts && lo > px {
                crossings + dir
            } else {
                crossings
            }
        }
        None => crossings,
    }
}

/// Crossing contribution of an edge against a point's rightward ray with
/// the default polygon convention (bottom border counts, top does not).
pub fn crossings_from_point(
    crossings: i32,
    px: Coord,
    py: Coord,
    x0: Coord,
    y0: Coord,
    x1: Coord,
    y1: Coord,
) -> i32 {
    crossings_from_point_ex(crossings, px, py, x0, y0, x1, y1, false, true)
}

/// Crossing contribution of the edge `(x0, y0)-(x1, y1)` against the
/// shadow of the reference segment `(sx1, sy1)-(sx2, sy2)`.
///
/// A pixel-exact intersection with the reference segment yields
/// [`SHAPE_INTERSECTS`]; otherwise the edge is tested against the rays of
/// the segment's topmost and bottommost endpoints, so a closed path fully
/// enclosing the segment accumulates two crossings per winding.
pub fn crossings_from_segment(
    crossings: i32,
    sx1: Coord,
    sy1: Coord,
    sx2: Coord,
    sy2: Coord,
    x0: Coord,
    y0: Coord,
    x1: Coord,
    y1: Coord,
) -> i32 {
    if crossings == SHAPE_INTERSECTS {
        return crossings;
    }
    // Rows disjoint: no ray can be crossed and no pixel can be shared.
    if y0.max(y1) < sy1.min(sy2) || y0.min(y1) > sy1.max(sy2) {
        return crossings;
    }
    // Edge entirely left of the reference: the shadow extends rightward.
    if x0.max(x1) < sx1.min(sx2) {
        return crossings;
    }
    if segment_intersection_filtered(sx1, sy1, sx2, sy2, x0, y0, x1, y1, true, true) {
        return SHAPE_INTERSECTS;
    }
    let (tx, ty, bx, by) = if sy1 >= sy2 {
        (sx1, sy1, sx2, sy2)
    } else {
        (sx2, sy2, sx1, sy1)
    };
    let crossings = crossings_from_point_ex(crossings, tx, ty, x0, y0, x1, y1, true, false);
    crossings_from_point_ex(crossings, bx, by, x0, y0, x1, y1, false, true)
}

/// Crossing contribution of the edge `(x0, y0)-(x1, y1)` against the
/// shadow of the circle `(cx, cy, radius)`.
pub fn crossings_from_circle(
    crossings: i32,
    cx: Coord,
    cy: Coord,
    radius: Coord,
    x0: Coord,
    y0: Coord,
    x1: Coord,
    y1: Coord,
) -> i32 {
    assert!(radius >= 0, "circle radius must be non-negative");
    if crossings == SHAPE_INTERSECTS {
        return crossings;
    }
    if y0.max(y1) < cy - radius || y0.min(y1) > cy + radius {
        return crossings;
    }
    if x0.max(x1) < cx - radius {
        return crossings;
    }
    if segment_meets_circle(cx, cy, radius, x0, y0, x1, y1) {
        return SHAPE_INTERSECTS;
    }
    let crossings =
        crossings_from_point_ex(crossings, cx, cy + radius, x0, y0, x1, y1, true, false);
    crossings_from_point_ex(crossings, cx, cy - radius, x0, y0, x1, y1, false, true)
}

/// Whether any pixel of the edge lies in the discrete disk.
pub(crate) fn segment_meets_circle(
    cx: Coord,
    cy: Coord,
    radius: Coord,
    x0: Coord,
    y0: Coord,
    x1: Coord,
    y1: Coord,
) -> bool {
    LinePixelIter::new(x0, y0, x1, y1).any(|p| circle_contains(cx, cy, radius, p.x, p.y))
}

/// Whether any pixel of the edge lies in the (inclusive) rectangle.
pub(crate) fn segment_meets_rect(
    rxmin: Coord,
    rymin: Coord,
    rxmax: Coord,
    rymax: Coord,
    x0: Coord,
    y0: Coord,
    x1: Coord,
    y1: Coord,
) -> bool {
    LinePixelIter::new(x0, y0, x1, y1)
        .any(|p| p.x >= rxmin && p.x <= rxmax && p.y >= rymin && p.y <= rymax)
}

/// Crossing contribution of the edge `(x0, y0)-(x1, y1)` against the
/// shadow of the rectangle `[rxmin, rxmax] x [rymin, rymax]`.
///
/// A horizontal edge overlapping the rectangle in both axes resolves to
/// [`SHAPE_INTERSECTS`] immediately (an exact border touch is a touch of
/// the rectangle's own pixels). Any other edge is pixel-walked once: an
/// in-rectangle pixel is the sentinel; runs on the `rymin`/`rymax` border
/// rows strictly right of `rxmax` convert to crossings under the shared
/// row-touch convention.
pub fn crossings_from_rect(
    crossings: i32,
    rxmin: Coord,
    rymin: Coord,
    rxmax: Coord,
    rymax: Coord,
    x0: Coord,
    y0: Coord,
    x1: Coord,
    y1: Coord,
) -> i32 {
    assert!(
        rxmin <= rxmax && rymin <= rymax,
        "rectangle corners must be ordered"
    );
    if crossings == SHAPE_INTERSECTS {
        return crossings;
    }
    if y0 == y1 {
        if y0 >= rymin && y0 <= rymax && x0.max(x1) >= rxmin && x0.min(x1) <= rxmax {
            return SHAPE_INTERSECTS;
        }
        return crossings;
    }
    let (eymin, eymax) = (y0.min(y1), y0.max(y1));
    if eymax < rymin || eymin > rymax {
        return crossings;
    }
    if x0.max(x1) < rxmin {
        return crossings;
    }
    let mut run_min: Option<(Coord, Coord)> = None;
    let mut run_max: Option<(Coord, Coord)> = None;
    let extend = |run: &mut Option<(Coord, Coord)>, x: Coord| {
        *run = Some(match *run {
            None => (x, x),
            Some((lo, hi)) => (lo.min(x), hi.max(x)),
        });
    };
    for p in LinePixelIter::new(x0, y0, x1, y1) {
        if p.x >= rxmin && p.x <= rxmax && p.y >= rymin && p.y <= rymax {
            return SHAPE_INTERSECTS;
        }
        if p.y == rymin {
            extend(&mut run_min, p.x);
        }
        if p.y == rymax {
            extend(&mut run_max, p.x);
        }
    }
    let dir = if y0 < y1 { 1 } else { -1 };
    let mut crossings = crossings;
    if let Some((lo, _)) = run_min {
        let counts = (rymin > eymin && rymin < eymax) || rymin == eymin;
        if lo > rxmax && counts {
            crossings += dir;
        }
    }
    if let Some((lo, _)) = run_max {
        let counts = (rymax > eymin && rymax < eymax) || rymax == eymax;
        if lo > rxmax && counts {
            crossings += dir;
        }
    }
    crossings
}

/// One x-column of a pixel walk: `(x, ymin, ymax)`.
struct ColumnRuns {
    it: LinePixelIter,
    pending: Option<crate::geometry::Point>,
}

impl ColumnRuns {
    /// Walk the segment's pixels column by column, in increasing x.
    fn new(x0: Coord, y0: Coord, x1: Coord, y1: Coord) -> Self {
        let it = if x0 <= x1 {
            LinePixelIter::new(x0, y0, x1, y1)
        } else {
            LinePixelIter::new(x1, y1, x0, y0)
        };
        Self { it, pending: None }
    }

    fn next_column(&mut self) -> Option<(Coord, Coord, Coord)> {
        let first = self.pending.take().or_else(|| self.it.next())?;
        let (x, mut lo, mut hi) = (first.x, first.y, first.y);
        for p in self.it.by_ref() {
            if p.x == x {
                lo = lo.min(p.y);
                hi = hi.max(p.y);
            } else {
                self.pending = Some(p);
                break;
            }
        }
        Some((x, lo, hi))
    }
}

/// Pixel-exact segment/segment intersection with endpoint filtering.
///
/// Both segments are walked as increasing-x pixel columns; the slower
/// walk advances until the columns meet, and overlapping y-ranges in a
/// shared column declare an intersection. With `enable_third` or
/// `enable_fourth` cleared, an overlap consisting solely of the second
/// segment's first or second endpoint pixel does not count; callers
/// walking consecutive path edges use this to ignore shared junctions.
pub(crate) fn segment_intersection_filtered(
    x1: Coord,
    y1: Coord,
    x2: Coord,
    y2: Coord,
    x3: Coord,
    y3: Coord,
    x4: Coord,
    y4: Coord,
    enable_third: bool,
    enable_fourth: bool,
) -> bool {
    segment_intersection_pixel(x1, y1, x2, y2, x3, y3, x4, y4, enable_third, enable_fourth)
        .is_some()
}

/// Like [`segment_intersection_filtered`], returning a witness pixel of
/// the overlap.
pub(crate) fn segment_intersection_pixel(
    x1: Coord,
    y1: Coord,
    x2: Coord,
    y2: Coord,
    x3: Coord,
    y3: Coord,
    x4: Coord,
    y4: Coord,
    enable_third: bool,
    enable_fourth: bool,
) -> Option<crate::geometry::Point> {
    use crate::geometry::Point;

    let mut a = ColumnRuns::new(x1, y1, x2, y2);
    let mut b = ColumnRuns::new(x3, y3, x4, y4);
    let mut ca = a.next_column();
    let mut cb = b.next_column();
    while let (Some((ax, alo, ahi)), Some((bx, blo, bhi))) = (ca, cb) {
        if ax < bx {
            ca = a.next_column();
        } else if bx < ax {
            cb = b.next_column();
        } else {
            let lo = alo.max(blo);
            let hi = ahi.min(bhi);
            if lo <= hi {
                for y in lo..=hi {
                    let p = Point::new(ax, y);
                    let is_third = p.x == x3 && p.y == y3;
                    let is_fourth = p.x == x4 && p.y == y4;
                    if (enable_third || !is_third) && (enable_fourth || !is_fourth) {
                        return Some(p);
                    }
                }
            }
            ca = a.next_column();
            cb = b.next_column();
        }
    }
    None
}

/// Pixel-exact segment/segment intersection test.
pub fn intersects_segment_segment(
    x1: Coord,
    y1: Coord,
    x2: Coord,
    y2: Coord,
    x3: Coord,
    y3: Coord,
    x4: Coord,
    y4: Coord,
) -> bool {
    segment_intersection_filtered(x1, y1, x2, y2, x3, y3, x4, y4, true, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_crossing_simple_up_edge() {
        // Vertical edge right of the point, crossing its row upward.
        let c = crossings_from_point(0, 5, 5, 10, 0, 10, 10);
        assert_eq!(c, 1);
        // And downward.
        let c = crossings_from_point(0, 5, 5, 10, 10, 10, 0);
        assert_eq!(c, -1);
    }

    #[test]
    fn test_point_crossing_edge_left_of_point() {
        let c = crossings_from_point(0, 5, 5, 0, 0, 0, 10);
        assert_eq!(c, 0);
    }

    #[test]
    fn test_point_crossing_row_not_reached() {
        let c = crossings_from_point(0, 5, 5, 10, 6, 10, 10);
        assert_eq!(c, 0);
    }

    #[test]
    fn test_point_crossing_hit_is_sentinel() {
        // Diagonal through (5, 5).
        let c = crossings_from_point(0, 5, 5, 0, 0, 10, 10);
        assert_eq!(c, SHAPE_INTERSECTS);
        // Horizontal run over the point.
        let c = crossings_from_point(0, 5, 5, 0, 5, 10, 5);
        assert_eq!(c, SHAPE_INTERSECTS);
    }

    #[test]
    fn test_point_crossing_half_open_rule() {
        // Edge touching the row with its top endpoint: not counted by
        // default.
        let c = crossings_from_point(0, 5, 5, 10, 0, 10, 5);
        assert_eq!(c, 0);
        // Touching with its bottom endpoint: counted.
        let c = crossings_from_point(0, 5, 5, 10, 5, 10, 10);
        assert_eq!(c, 1);
        // Enables override both.
        let c = crossings_from_point_ex(0, 5, 5, 10, 0, 10, 5, true, false);
        assert_eq!(c, 1);
        let c = crossings_from_point_ex(0, 5, 5, 10, 5, 10, 10, false, false);
        assert_eq!(c, 0);
    }

    #[test]
    fn test_point_crossing_closed_square_counts_once() {
        // Fold the four edges of a CCW square around an interior point.
        let edges = [(0, 0, 10, 0), (10, 0, 10, 10), (10, 10, 0, 10), (0, 10, 0, 0)];
        let mut c = 0;
        for (x0, y0, x1, y1) in edges {
            c = crossings_from_point(c, 5, 5, x0, y0, x1, y1);
        }
        assert_eq!(c, 1);
    }

    #[test]
    fn test_sentinel_propagates() {
        let c = crossings_from_point(SHAPE_INTERSECTS, 5, 5, 10, 0, 10, 10);
        assert_eq!(c, SHAPE_INTERSECTS);
        let c = crossings_from_rect(SHAPE_INTERSECTS, 0, 0, 1, 1, 5, 5, 6, 6);
        assert_eq!(c, SHAPE_INTERSECTS);
    }

    #[test]
    fn test_segments_crossing() {
        // The two diagonals of a square cross at (5, 5).
        assert!(intersects_segment_segment(0, 0, 10, 10, 0, 10, 10, 0));
        assert_eq!(
            segment_intersection_pixel(0, 0, 10, 10, 0, 10, 10, 0, true, true),
            Some(crate::geometry::Point::new(5, 5))
        );
    }

    #[test]
    fn test_segments_parallel_disjoint() {
        assert!(!intersects_segment_segment(0, 0, 10, 0, 0, 3, 10, 3));
    }

    #[test]
    fn test_segments_sharing_endpoint() {
        assert!(intersects_segment_segment(0, 0, 5, 5, 5, 5, 10, 0));
        // Filtered out when the shared pixel is the second segment's
        // declared start.
        assert!(!segment_intersection_filtered(
            0, 0, 5, 5, 5, 5, 10, 0, false, true
        ));
    }

    #[test]
    fn test_segments_collinear_overlap() {
        assert!(intersects_segment_segment(0, 0, 10, 0, 5, 0, 15, 0));
        assert!(!intersects_segment_segment(0, 0, 4, 0, 6, 0, 10, 0));
    }

    #[test]
    fn test_segment_shadow_crossing() {
        // Reference segment from (0, 0) to (0, 10); a vertical edge to
        // its right crossing both endpoint rays.
        let c = crossings_from_segment(0, 0, 0, 0, 10, 5, -5, 5, 15);
        assert_eq!(c, 2);
        let c = crossings_from_segment(0, 0, 0, 0, 10, 5, 15, 5, -5);
        assert_eq!(c, -2);
    }

    #[test]
    fn test_segment_shadow_miss_left() {
        let c = crossings_from_segment(0, 5, 0, 5, 10, 0, -5, 0, 15);
        assert_eq!(c, 0);
    }

    #[test]
    fn test_segment_shadow_intersection() {
        let c = crossings_from_segment(0, 0, 5, 10, 5, 5, 0, 5, 10);
        assert_eq!(c, SHAPE_INTERSECTS);
    }

    #[test]
    fn test_circle_shadow_crossing() {
        // Circle r=3 at origin; vertical edge right of it crossing both
        // border rays.
        let c = crossings_from_circle(0, 0, 0, 3, 10, -5, 10, 5);
        assert_eq!(c, 2);
    }

    #[test]
    fn test_circle_shadow_intersection() {
        // Horizontal edge through the circle.
        let c = crossings_from_circle(0, 0, 0, 3, -5, 0, 5, 0);
        assert_eq!(c, SHAPE_INTERSECTS);
    }

    #[test]
    fn test_circle_shadow_miss() {
        let c = crossings_from_circle(0, 0, 0, 3, -10, 10, 10, 12);
        assert_eq!(c, 0);
    }

    #[test]
    fn test_rect_crossing_vertical_edge_right() {
        let c = crossings_from_rect(0, 0, 0, 4, 4, 8, -2, 8, 6);
        assert_eq!(c, 2);
        let c = crossings_from_rect(0, 0, 0, 4, 4, 8, 6, 8, -2);
        assert_eq!(c, -2);
    }

    #[test]
    fn test_rect_crossing_edge_through_rect() {
        let c = crossings_from_rect(0, 0, 0, 4, 4, 2, -2, 2, 6);
        assert_eq!(c, SHAPE_INTERSECTS);
    }

    #[test]
    fn test_rect_horizontal_touch_is_sentinel() {
        // Horizontal edge exactly on the top border row: touch counts.
        let c = crossings_from_rect(0, 0, 0, 4, 4, 2, 4, 10, 4);
        assert_eq!(c, SHAPE_INTERSECTS);
        // Same row, x-ranges disjoint: no contact.
        let c = crossings_from_rect(0, 0, 0, 4, 4, 6, 4, 10, 4);
        assert_eq!(c, 0);
    }

    #[test]
    fn test_rect_crossing_edge_left_of_rect() {
        let c = crossings_from_rect(0, 4, 0, 8, 4, 0, -2, 0, 6);
        assert_eq!(c, 0);
    }

    #[test]
    fn test_x_run_at_row() {
        // Shallow segment: row 1 is covered by a run of pixels.
        assert_eq!(x_run_at_row(0, 0, 5, 2, 1), Some((2, 3)));
        assert_eq!(x_run_at_row(0, 0, 5, 2, 5), None);
        assert_eq!(x_run_at_row(0, 0, 10, 0, 0), Some((0, 10)));
    }
}
