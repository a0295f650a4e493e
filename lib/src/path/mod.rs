//! Paths: element sequences, winding rules and path iterators.

mod flatten;

pub use flatten::{FlatteningPathIterator, FLATTENING_TOLERANCE};
pub(crate) use flatten::{flatten_cubic, flatten_quad};

use crate::crossings::{
    crossings_from_path_circle, crossings_from_path_point, crossings_from_path_rect,
    crossings_from_path_segment, ClosestPointPathShadow, PathShadow, SHAPE_INTERSECTS,
};
use crate::geometry::{Point, Rect};
use crate::raster::LinePixelIter;
use crate::Coord;
use serde::{Deserialize, Serialize};

/// Rule converting a crossing number into an inside/outside verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindingRule {
    /// Any nonzero crossing count is inside.
    #[default]
    NonZero,
    /// An odd crossing count is inside.
    EvenOdd,
}

impl WindingRule {
    /// Bitmask applied to a single-ray crossing count for point
    /// containment.
    #[inline]
    pub fn mask(self) -> i32 {
        match self {
            WindingRule::NonZero => -1,
            WindingRule::EvenOdd => 1,
        }
    }

    /// Bitmask applied to a two-border crossing count (segment, circle,
    /// rectangle and path shadows), where a full enclosure contributes
    /// two crossings.
    #[inline]
    pub fn intersection_mask(self) -> i32 {
        match self {
            WindingRule::NonZero => -1,
            WindingRule::EvenOdd => 2,
        }
    }
}

/// One element of a path's element sequence.
///
/// A well-formed sequence always begins with a `MoveTo`. `Close` carries
/// the edge it closes: from the current pen position back to the point of
/// the last `MoveTo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathElement {
    MoveTo {
        x: Coord,
        y: Coord,
    },
    LineTo {
        x: Coord,
        y: Coord,
    },
    QuadTo {
        ctrl_x: Coord,
        ctrl_y: Coord,
        x: Coord,
        y: Coord,
    },
    CurveTo {
        ctrl1_x: Coord,
        ctrl1_y: Coord,
        ctrl2_x: Coord,
        ctrl2_y: Coord,
        x: Coord,
        y: Coord,
    },
    Close {
        from_x: Coord,
        from_y: Coord,
        x: Coord,
        y: Coord,
    },
}

impl PathElement {
    /// The pen position after this element.
    #[inline]
    pub fn end_point(&self) -> Point {
        match *self {
            PathElement::MoveTo { x, y }
            | PathElement::LineTo { x, y }
            | PathElement::QuadTo { x, y, .. }
            | PathElement::CurveTo { x, y, .. }
            | PathElement::Close { x, y, .. } => Point::new(x, y),
        }
    }

    /// Whether this element is a quadratic or cubic curve.
    #[inline]
    pub fn is_curved(&self) -> bool {
        matches!(
            self,
            PathElement::QuadTo { .. } | PathElement::CurveTo { .. }
        )
    }
}

/// Iterator capability contract for walking a shape as path elements.
///
/// Iterators are stateful and non-reentrant; `restart` re-walks from the
/// beginning without reconstructing the underlying shape. The
/// classification queries let callers pick fast paths (for example,
/// skipping curve flattening when `is_curved` is false).
pub trait PathIterator: Iterator<Item = PathElement> {
    fn winding_rule(&self) -> WindingRule;
    fn restart(&mut self);

    /// A single open run of straight lines.
    fn is_polyline(&self) -> bool;
    /// Contains at least one quadratic or cubic element.
    fn is_curved(&self) -> bool;
    /// Contains more than one move-to.
    fn is_multi_parts(&self) -> bool;
    /// A single closed part.
    fn is_polygon(&self) -> bool;
}

/// Internal storage verb. `Close` carries no coordinates; the closing
/// edge is synthesized at iteration time so element mutation can never
/// desynchronize it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
enum Verb {
    MoveTo(Coord, Coord),
    LineTo(Coord, Coord),
    QuadTo(Coord, Coord, Coord, Coord),
    CurveTo(Coord, Coord, Coord, Coord, Coord, Coord),
    Close,
}

/// A mutable path: an ordered element sequence plus a winding rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    verbs: Vec<Verb>,
    winding_rule: WindingRule,
}

impl Path {
    /// Create an empty path with the given winding rule.
    pub fn new(winding_rule: WindingRule) -> Self {
        Self {
            verbs: Vec::new(),
            winding_rule,
        }
    }

    #[inline]
    pub fn winding_rule(&self) -> WindingRule {
        self.winding_rule
    }

    #[inline]
    pub fn set_winding_rule(&mut self, rule: WindingRule) {
        self.winding_rule = rule;
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Remove all elements.
    pub fn clear(&mut self) {
        self.verbs.clear();
    }

    /// Start a new subpath at `(x, y)`.
    pub fn move_to(&mut self, x: Coord, y: Coord) {
        self.verbs.push(Verb::MoveTo(x, y));
    }

    /// Straight edge from the pen position to `(x, y)`.
    pub fn line_to(&mut self, x: Coord, y: Coord) {
        assert!(!self.verbs.is_empty(), "line-to requires a previous move-to");
        self.verbs.push(Verb::LineTo(x, y));
    }

    /// Quadratic edge with one control point.
    pub fn quad_to(&mut self, ctrl_x: Coord, ctrl_y: Coord, x: Coord, y: Coord) {
        assert!(!self.verbs.is_empty(), "quad-to requires a previous move-to");
        self.verbs.push(Verb::QuadTo(ctrl_x, ctrl_y, x, y));
    }

    /// Cubic edge with two control points.
    pub fn curve_to(
        &mut self,
        ctrl1_x: Coord,
        ctrl1_y: Coord,
        ctrl2_x: Coord,
        ctrl2_y: Coord,
        x: Coord,
        y: Coord,
    ) {
        assert!(!self.verbs.is_empty(), "curve-to requires a previous move-to");
        self.verbs
            .push(Verb::CurveTo(ctrl1_x, ctrl1_y, ctrl2_x, ctrl2_y, x, y));
    }

    /// Close the current subpath back to its move-to point.
    pub fn close(&mut self) {
        assert!(!self.verbs.is_empty(), "close requires a previous move-to");
        self.verbs.push(Verb::Close);
    }

    /// The pen position after the last element, if any.
    pub fn current_point(&self) -> Option<Point> {
        let mut cur = None;
        let mut mov = Point::zero();
        for verb in &self.verbs {
            match *verb {
                Verb::MoveTo(x, y) => {
                    mov = Point::new(x, y);
                    cur = Some(mov);
                }
                Verb::LineTo(x, y)
                | Verb::QuadTo(_, _, x, y)
                | Verb::CurveTo(_, _, _, _, x, y) => cur = Some(Point::new(x, y)),
                Verb::Close => cur = Some(mov),
            }
        }
        cur
    }

    /// Bounding box over all coordinates, control points included.
    pub fn bounding_box(&self) -> Rect {
        let mut bb = Rect::new();
        for verb in &self.verbs {
            match *verb {
                Verb::MoveTo(x, y) | Verb::LineTo(x, y) => bb.merge_point(Point::new(x, y)),
                Verb::QuadTo(cx, cy, x, y) => {
                    bb.merge_point(Point::new(cx, cy));
                    bb.merge_point(Point::new(x, y));
                }
                Verb::CurveTo(c1x, c1y, c2x, c2y, x, y) => {
                    bb.merge_point(Point::new(c1x, c1y));
                    bb.merge_point(Point::new(c2x, c2y));
                    bb.merge_point(Point::new(x, y));
                }
                Verb::Close => {}
            }
        }
        bb
    }

    /// Translate every element, control points included.
    pub fn translate(&mut self, dx: Coord, dy: Coord) {
        for verb in &mut self.verbs {
            *verb = match *verb {
                Verb::MoveTo(x, y) => Verb::MoveTo(x + dx, y + dy),
                Verb::LineTo(x, y) => Verb::LineTo(x + dx, y + dy),
                Verb::QuadTo(cx, cy, x, y) => Verb::QuadTo(cx + dx, cy + dy, x + dx, y + dy),
                Verb::CurveTo(c1x, c1y, c2x, c2y, x, y) => {
                    Verb::CurveTo(c1x + dx, c1y + dy, c2x + dx, c2y + dy, x + dx, y + dy)
                }
                Verb::Close => Verb::Close,
            };
        }
    }

    /// Iterate the element sequence.
    pub fn iter(&self) -> PathElementsIter<'_> {
        PathElementsIter {
            path: self,
            idx: 0,
            cur: Point::zero(),
            mov: Point::zero(),
        }
    }

    /// Whether the path contains a curve element.
    pub fn is_curved(&self) -> bool {
        self.verbs
            .iter()
            .any(|v| matches!(v, Verb::QuadTo(..) | Verb::CurveTo(..)))
    }

    /// Whether the path has more than one subpath.
    pub fn is_multi_parts(&self) -> bool {
        self.verbs
            .iter()
            .filter(|v| matches!(v, Verb::MoveTo(..)))
            .count()
            > 1
    }

    /// Whether the path is one closed part.
    pub fn is_polygon(&self) -> bool {
        !self.is_empty()
            && !self.is_multi_parts()
            && self.verbs.iter().any(|v| matches!(v, Verb::Close))
    }

    /// Whether the path is one open run of straight lines.
    pub fn is_polyline(&self) -> bool {
        !self.is_empty()
            && !self.is_multi_parts()
            && !self.is_curved()
            && !self.verbs.iter().any(|v| matches!(v, Verb::Close))
            && self.verbs.iter().any(|v| matches!(v, Verb::LineTo(..)))
    }

    /// Crossing number of this path around `(px, py)`, auto-closed.
    fn point_crossings(&self, px: Coord, py: Coord) -> i32 {
        crossings_from_path_point(&mut self.iter(), px, py, true).unwrap_or(0)
    }

    /// Point containment under the path's winding rule. Pixels exactly on
    /// the boundary are contained.
    pub fn contains_point(&self, x: Coord, y: Coord) -> bool {
        if self.is_empty() {
            return false;
        }
        let c = self.point_crossings(x, y);
        c == SHAPE_INTERSECTS || (c & self.winding_rule.mask()) != 0
    }

    /// Whether the whole rectangle lies inside the path region.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        if self.is_empty() || rect.is_empty() {
            return false;
        }
        let c = crossings_from_path_rect(
            &mut self.iter(),
            rect.min.x,
            rect.min.y,
            rect.max.x,
            rect.max.y,
            true,
        )
        .unwrap_or(0);
        c != SHAPE_INTERSECTS && (c & self.winding_rule.intersection_mask()) != 0
    }

    /// Whether the path region and the circle overlap.
    pub fn intersects_circle(&self, circle: &crate::shapes::Circle) -> bool {
        let c = crossings_from_path_circle(
            &mut self.iter(),
            circle.center.x,
            circle.center.y,
            circle.radius,
            true,
        )
        .unwrap_or(0);
        c == SHAPE_INTERSECTS || (c & self.winding_rule.intersection_mask()) != 0
    }

    /// Whether the path region and the rectangle overlap.
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        if rect.is_empty() {
            return false;
        }
        let c = crossings_from_path_rect(
            &mut self.iter(),
            rect.min.x,
            rect.min.y,
            rect.max.x,
            rect.max.y,
            true,
        )
        .unwrap_or(0);
        c == SHAPE_INTERSECTS || (c & self.winding_rule.intersection_mask()) != 0
    }

    /// Whether the path region and the segment overlap.
    pub fn intersects_segment(&self, segment: &crate::shapes::Segment) -> bool {
        let c = crossings_from_path_segment(
            &mut self.iter(),
            segment.p1.x,
            segment.p1.y,
            segment.p2.x,
            segment.p2.y,
            true,
        )
        .unwrap_or(0);
        c == SHAPE_INTERSECTS || (c & self.winding_rule.intersection_mask()) != 0
    }

    /// Whether two path regions overlap.
    pub fn intersects_path(&self, other: &Path) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        if !self.bounding_box().intersects_rect(&other.bounding_box()) {
            return false;
        }
        let shadow = PathShadow::new(self);
        let c = shadow.fold_path(other);
        if c == SHAPE_INTERSECTS || (c & other.winding_rule().intersection_mask()) != 0 {
            return true;
        }
        // Disjoint boundaries and zero winding: one region may still sit
        // strictly inside the other.
        let inside = |path: &Path, p: Option<Point>| {
            p.is_some_and(|p| path.contains_point(p.x, p.y))
        };
        inside(self, other.first_point()) || inside(other, self.first_point())
    }

    /// Pixels of the path's (flattened) drawn edges.
    pub fn point_iter(&self) -> PathPixelIter {
        PathPixelIter::new(self)
    }

    /// The first move-to point, if any.
    fn first_point(&self) -> Option<Point> {
        self.verbs.iter().find_map(|v| match *v {
            Verb::MoveTo(x, y) => Some(Point::new(x, y)),
            _ => None,
        })
    }

    /// Closest point of the path region to `(px, py)`.
    ///
    /// Points inside or on the region are their own closest point;
    /// otherwise the boundary pixels of every (flattened) edge are
    /// scanned.
    pub fn closest_point_to(&self, px: Coord, py: Coord) -> Point {
        if self.contains_point(px, py) {
            return Point::new(px, py);
        }
        let target = Point::new(px, py);
        let mut best = Point::zero();
        let mut best_d = i64::MAX;
        let mut consider = |p: Point| {
            let d = p.distance_squared(&target);
            if d < best_d {
                best_d = d;
                best = p;
            }
        };
        let mut it = FlatteningPathIterator::with_default_tolerance(self.iter());
        let mut cur = Point::zero();
        for element in &mut it {
            match element {
                PathElement::MoveTo { x, y } => {
                    cur = Point::new(x, y);
                    consider(cur);
                }
                PathElement::LineTo { x, y } | PathElement::Close { x, y, .. } => {
                    let to = Point::new(x, y);
                    for p in LinePixelIter::between(cur, to) {
                        consider(p);
                    }
                    cur = to;
                }
                // The flattening iterator never yields curves.
                _ => unreachable!(),
            }
        }
        best
    }

    /// Farthest boundary point of the path from `(px, py)`.
    ///
    /// On a straight edge the farthest pixel is an endpoint, so only edge
    /// endpoints and move-to points are candidates.
    pub fn farthest_point_to(&self, px: Coord, py: Coord) -> Point {
        let target = Point::new(px, py);
        let mut best = Point::zero();
        let mut best_d = i64::MIN;
        let mut it = FlatteningPathIterator::with_default_tolerance(self.iter());
        for element in &mut it {
            let p = element.end_point();
            let d = p.distance_squared(&target);
            if d > best_d {
                best_d = d;
                best = p;
            }
        }
        best
    }

    /// Closest pair between this path's boundary and a segment:
    /// `(point on path, point on segment)`. `None` for an empty path.
    pub fn closest_point_to_segment(
        &self,
        x1: Coord,
        y1: Coord,
        x2: Coord,
        y2: Coord,
    ) -> Option<(Point, Point)> {
        if self.is_empty() {
            return None;
        }
        let mut shadow = ClosestPointPathShadow::new(self);
        shadow.compute_crossings(0, x1, y1, x2, y2);
        shadow.closest_pair()
    }
}

/// Element iterator over a [`Path`], synthesizing `Close` coordinates.
#[derive(Debug, Clone)]
pub struct PathElementsIter<'a> {
    path: &'a Path,
    idx: usize,
    cur: Point,
    mov: Point,
}

impl Iterator for PathElementsIter<'_> {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        let verb = *self.path.verbs.get(self.idx)?;
        self.idx += 1;
        Some(match verb {
            Verb::MoveTo(x, y) => {
                self.cur = Point::new(x, y);
                self.mov = self.cur;
                PathElement::MoveTo { x, y }
            }
            Verb::LineTo(x, y) => {
                self.cur = Point::new(x, y);
                PathElement::LineTo { x, y }
            }
            Verb::QuadTo(ctrl_x, ctrl_y, x, y) => {
                self.cur = Point::new(x, y);
                PathElement::QuadTo { ctrl_x, ctrl_y, x, y }
            }
            Verb::CurveTo(ctrl1_x, ctrl1_y, ctrl2_x, ctrl2_y, x, y) => {
                self.cur = Point::new(x, y);
                PathElement::CurveTo {
                    ctrl1_x,
                    ctrl1_y,
                    ctrl2_x,
                    ctrl2_y,
                    x,
                    y,
                }
            }
            Verb::Close => {
                let e = PathElement::Close {
                    from_x: self.cur.x,
                    from_y: self.cur.y,
                    x: self.mov.x,
                    y: self.mov.y,
                };
                self.cur = self.mov;
                e
            }
        })
    }
}

impl PathIterator for PathElementsIter<'_> {
    fn winding_rule(&self) -> WindingRule {
        self.path.winding_rule
    }

    fn restart(&mut self) {
        self.idx = 0;
        self.cur = Point::zero();
        self.mov = Point::zero();
    }

    fn is_polyline(&self) -> bool {
        self.path.is_polyline()
    }

    fn is_curved(&self) -> bool {
        self.path.is_curved()
    }

    fn is_multi_parts(&self) -> bool {
        self.path.is_multi_parts()
    }

    fn is_polygon(&self) -> bool {
        self.path.is_polygon()
    }
}

/// Owned element iterator over a pre-collected element sequence.
///
/// The non-path shapes and multishapes expose their outlines through this
/// type; classification flags are computed once at construction.
#[derive(Debug, Clone)]
pub struct CollectedPathIter {
    elements: Vec<PathElement>,
    winding_rule: WindingRule,
    idx: usize,
    polyline: bool,
    curved: bool,
    multi_parts: bool,
    polygon: bool,
}

impl CollectedPathIter {
    pub fn new(elements: Vec<PathElement>, winding_rule: WindingRule) -> Self {
        let moves = elements
            .iter()
            .filter(|e| matches!(e, PathElement::MoveTo { .. }))
            .count();
        let curved = elements.iter().any(PathElement::is_curved);
        let closed = elements
            .iter()
            .any(|e| matches!(e, PathElement::Close { .. }));
        let lines = elements
            .iter()
            .any(|e| matches!(e, PathElement::LineTo { .. }));
        Self {
            polyline: !elements.is_empty() && moves <= 1 && !curved && !closed && lines,
            curved,
            multi_parts: moves > 1,
            polygon: !elements.is_empty() && moves <= 1 && closed,
            elements,
            winding_rule,
            idx: 0,
        }
    }
}

impl Iterator for CollectedPathIter {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        let e = self.elements.get(self.idx).copied()?;
        self.idx += 1;
        Some(e)
    }
}

impl PathIterator for CollectedPathIter {
    fn winding_rule(&self) -> WindingRule {
        self.winding_rule
    }

    fn restart(&mut self) {
        self.idx = 0;
    }

    fn is_polyline(&self) -> bool {
        self.polyline
    }

    fn is_curved(&self) -> bool {
        self.curved
    }

    fn is_multi_parts(&self) -> bool {
        self.multi_parts
    }

    fn is_polygon(&self) -> bool {
        self.polygon
    }
}

/// Pixel iterator over a path's (flattened) drawn edges.
///
/// Shared vertices between consecutive edges are emitted once; a bare
/// move-to with no following edge contributes no pixels.
#[derive(Debug, Clone)]
pub struct PathPixelIter {
    elements: Vec<PathElement>,
    idx: usize,
    cur: Point,
    walker: Option<LinePixelIter>,
    last: Option<Point>,
}

impl PathPixelIter {
    pub(crate) fn new(path: &Path) -> Self {
        let elements =
            FlatteningPathIterator::with_default_tolerance(path.iter()).collect();
        Self {
            elements,
            idx: 0,
            cur: Point::zero(),
            walker: None,
            last: None,
        }
    }

    /// Re-walk the pixels from the beginning.
    pub fn restart(&mut self) {
        self.idx = 0;
        self.cur = Point::zero();
        self.walker = None;
        self.last = None;
    }
}

impl Iterator for PathPixelIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        loop {
            if let Some(walker) = &mut self.walker {
                for p in walker.by_ref() {
                    if self.last != Some(p) {
                        self.last = Some(p);
                        return Some(p);
                    }
                }
                self.walker = None;
            }
            let element = *self.elements.get(self.idx)?;
            self.idx += 1;
            match element {
                PathElement::MoveTo { x, y } => {
                    self.cur = Point::new(x, y);
                }
                PathElement::LineTo { x, y } | PathElement::Close { x, y, .. } => {
                    let to = Point::new(x, y);
                    self.walker = Some(LinePixelIter::between(self.cur, to));
                    self.cur = to;
                }
                // Flattened input carries no curves.
                _ => unreachable!(),
            }
        }
    }
}
