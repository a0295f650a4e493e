//! Midpoint circle perimeter enumeration.

use crate::geometry::Point;
use crate::Coord;

/// Map a canonical-octant pixel `(x, y)` (with `0 <= x <= y`) into one of
/// the eight 45-degree octants around `(cx, cy)`.
///
/// Octants 0..8 cover the perimeter via the eight sign/axis-swap
/// symmetries of the canonical stepping sequence.
#[inline]
fn octant_pixel(octant: u8, cx: Coord, cy: Coord, x: Coord, y: Coord) -> Point {
    match octant {
        0 => Point::new(cx + x, cy + y),
        1 => Point::new(cx + y, cy + x),
        2 => Point::new(cx + y, cy - x),
        3 => Point::new(cx + x, cy - y),
        4 => Point::new(cx - x, cy - y),
        5 => Point::new(cx - y, cy - x),
        6 => Point::new(cx - y, cy + x),
        7 => Point::new(cx - x, cy + y),
        _ => unreachable!("octant out of range"),
    }
}

/// Lazy, restartable enumerator of the integer pixels on a circle's
/// perimeter, octant by octant.
///
/// The canonical octant is stepped with the midpoint decision variable
/// (`d = 3 - 2r`, incremented by `4x + 6` or `4(x - y) + 10`); the other
/// octants are derived by symmetry. Pixels sitting exactly on an octant
/// boundary (the axis starts and the 45-degree diagonal) are shared by two
/// adjacent octants; a fixed-size junction array deduplicates them so each
/// perimeter pixel of the requested range is yielded exactly once.
#[derive(Debug, Clone)]
pub struct CirclePerimeterIter {
    cx: Coord,
    cy: Coord,
    radius: Coord,
    first_octant: u8,
    last_octant: u8,
    skip_first: bool,
    // Walk state.
    octant: u8,
    x: Coord,
    y: Coord,
    d: Coord,
    junctions: [Point; 8],
    junction_len: usize,
    emitted_any: bool,
    done: bool,
}

impl CirclePerimeterIter {
    /// Iterate the perimeter pixels of the octant range
    /// `[first_octant, last_octant)`.
    ///
    /// `skip_first` suppresses the very first pixel of the range, for
    /// callers chaining this walk after another one that already produced
    /// it. The radius must be non-negative and the octant range must
    /// satisfy `first_octant < last_octant <= 8`.
    pub fn with_octants(
        cx: Coord,
        cy: Coord,
        radius: Coord,
        first_octant: u8,
        last_octant: u8,
        skip_first: bool,
    ) -> Self {
        assert!(radius >= 0, "circle radius must be non-negative");
        assert!(
            first_octant < last_octant && last_octant <= 8,
            "invalid octant range [{first_octant}, {last_octant})"
        );
        let mut iter = Self {
            cx,
            cy,
            radius,
            first_octant,
            last_octant,
            skip_first,
            octant: 0,
            x: 0,
            y: 0,
            d: 0,
            junctions: [Point::zero(); 8],
            junction_len: 0,
            emitted_any: false,
            done: false,
        };
        iter.restart();
        iter
    }

    /// Iterate the full perimeter (all eight octants).
    pub fn new(cx: Coord, cy: Coord, radius: Coord) -> Self {
        Self::with_octants(cx, cy, radius, 0, 8, false)
    }

    /// Re-walk from the beginning of the requested octant range.
    pub fn restart(&mut self) {
        self.octant = self.first_octant;
        self.x = 0;
        self.y = self.radius;
        self.d = 3 - 2 * self.radius;
        self.junction_len = 0;
        self.emitted_any = false;
        self.done = false;
    }

    fn junction_seen(&mut self, p: Point) -> bool {
        if self.junctions[..self.junction_len].contains(&p) {
            return true;
        }
        // At most eight distinct junction pixels exist: the four axis
        // starts and the four diagonal ends.
        if self.junction_len < self.junctions.len() {
            self.junctions[self.junction_len] = p;
            self.junction_len += 1;
        }
        false
    }
}

impl Iterator for CirclePerimeterIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        loop {
            if self.done {
                return None;
            }
            if self.x > self.y {
                self.octant += 1;
                if self.octant >= self.last_octant {
                    self.done = true;
                    continue;
                }
                self.x = 0;
                self.y = self.radius;
                self.d = 3 - 2 * self.radius;
                continue;
            }
            let p = octant_pixel(self.octant, self.cx, self.cy, self.x, self.y);
            let junction = self.x == 0 || self.x == self.y;
            if self.d < 0 {
                self.d += 4 * self.x + 6;
            } else {
                self.d += 4 * (self.x - self.y) + 10;
                self.y -= 1;
            }
            self.x += 1;
            if junction && self.junction_seen(p) {
                continue;
            }
            if !self.emitted_any {
                self.emitted_any = true;
                if self.skip_first {
                    continue;
                }
            }
            return Some(p);
        }
    }
}

/// Discrete disk membership test.
///
/// A pixel belongs to the circle `(cx, cy, radius)` exactly when its
/// major offset does not exceed the perimeter the midpoint walk draws at
/// its minor offset. With `a = max(|x-cx|, |y-cy|)` and `b` the other
/// offset, that is `a <= round(sqrt(r^2 - b^2))`, evaluated in integers as
/// `4(a^2 + b^2) <= 4r^2 + 4a - 1`. Every pixel yielded by
/// [`CirclePerimeterIter`] satisfies this test.
pub fn circle_contains(cx: Coord, cy: Coord, radius: Coord, x: Coord, y: Coord) -> bool {
    assert!(radius >= 0, "circle radius must be non-negative");
    let vx = (x as i64 - cx as i64).abs();
    let vy = (y as i64 - cy as i64).abs();
    let (a, b) = if vx >= vy { (vx, vy) } else { (vy, vx) };
    if a == 0 {
        return true;
    }
    let r = radius as i64;
    4 * (a * a + b * b) <= 4 * r * r + 4 * a - 1
}
