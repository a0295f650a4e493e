//! Point and vector types with integer pixel coordinates.
//!
//! These are the stock implementations of the [`Point2D`]/[`Vector2D`]
//! capability traits, produced by [`PixelKit`](crate::PixelKit). Kernel
//! algorithms never depend on them directly; they only pass through the
//! capability traits or plain coordinates.

use crate::kit::{Point2D, Vector2D};
use crate::{Coord, CoordF};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A 2D point with integer pixel coordinates.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    /// Create a new point with the given coordinates.
    #[inline]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Create a point at the origin (0, 0).
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Calculate the squared distance to another point.
    /// Widened to i64 to avoid overflow with large coordinates.
    #[inline]
    pub fn distance_squared(&self, other: &Point) -> i64 {
        let dx = (other.x - self.x) as i64;
        let dy = (other.y - self.y) as i64;
        dx * dx + dy * dy
    }

    /// Calculate the distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point) -> CoordF {
        (self.distance_squared(other) as CoordF).sqrt()
    }

    /// The vector from this point to another.
    #[inline]
    pub fn vector_to(&self, other: &Point) -> Vector {
        Vector::new(other.x - self.x, other.y - self.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Point2D for Point {
    #[inline]
    fn x(&self) -> Coord {
        self.x
    }

    #[inline]
    fn y(&self) -> Coord {
        self.y
    }

    #[inline]
    fn set_x(&mut self, x: Coord) {
        self.x = x;
    }

    #[inline]
    fn set_y(&mut self, y: Coord) {
        self.y = y;
    }
}

impl Add<Vector> for Point {
    type Output = Self;

    #[inline]
    fn add(self, v: Vector) -> Self {
        Self {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }
}

impl AddAssign<Vector> for Point {
    #[inline]
    fn add_assign(&mut self, v: Vector) {
        self.x += v.x;
        self.y += v.y;
    }
}

impl Sub<Vector> for Point {
    type Output = Self;

    #[inline]
    fn sub(self, v: Vector) -> Self {
        Self {
            x: self.x - v.x,
            y: self.y - v.y,
        }
    }
}

impl Sub for Point {
    type Output = Vector;

    #[inline]
    fn sub(self, other: Self) -> Vector {
        Vector {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl From<(Coord, Coord)> for Point {
    #[inline]
    fn from((x, y): (Coord, Coord)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (Coord, Coord) {
    #[inline]
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// A 2D vector with integer pixel coordinates.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector {
    pub x: Coord,
    pub y: Coord,
}

impl Vector {
    /// Create a new vector with the given components.
    #[inline]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// The zero vector.
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Squared length, widened.
    #[inline]
    pub fn length_squared(&self) -> i64 {
        (self.x as i64) * (self.x as i64) + (self.y as i64) * (self.y as i64)
    }

    /// Euclidean length.
    #[inline]
    pub fn length(&self) -> CoordF {
        (self.length_squared() as CoordF).sqrt()
    }

    /// Rotated a quarter turn counter-clockwise.
    #[inline]
    pub const fn rotate_90_ccw(&self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }

    /// Rotated a quarter turn clockwise.
    #[inline]
    pub const fn rotate_90_cw(&self) -> Self {
        Self {
            x: self.y,
            y: -self.x,
        }
    }
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector({}, {})", self.x, self.y)
    }
}

impl Point2D for Vector {
    #[inline]
    fn x(&self) -> Coord {
        self.x
    }

    #[inline]
    fn y(&self) -> Coord {
        self.y
    }

    #[inline]
    fn set_x(&mut self, x: Coord) {
        self.x = x;
    }

    #[inline]
    fn set_y(&mut self, y: Coord) {
        self.y = y;
    }
}

impl Vector2D for Vector {}

impl Add for Vector {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vector {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vector {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl SubAssign for Vector {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Neg for Vector {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl From<(Coord, Coord)> for Vector {
    #[inline]
    fn from((x, y): (Coord, Coord)) -> Self {
        Self { x, y }
    }
}

/// Sign of the cross product `(b - a) x (p - a)`.
///
/// Positive when `p` lies to the left of the directed line `a -> b`,
/// negative to the right, zero when collinear.
pub fn side_of_line(ax: Coord, ay: Coord, bx: Coord, by: Coord, px: Coord, py: Coord) -> i64 {
    let ux = (bx - ax) as i64;
    let uy = (by - ay) as i64;
    let vx = (px - ax) as i64;
    let vy = (py - ay) as i64;
    ux * vy - uy * vx
}
