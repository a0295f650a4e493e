//! Pixelgeom - Exact integer-coordinate 2D shape intersection kernel.
//!
//! All shapes live on the integer lattice: a shape is the set of pixels it
//! covers, and intersection/containment queries are answered exactly with
//! integer arithmetic. No shape equation is ever evaluated in floating
//! point; straight edges are enumerated with a Bresenham walk, circle
//! perimeters with the midpoint algorithm, and containment with
//! ray-crossing counts masked by a winding rule.
//!
//! The crate is organized bottom-up:
//! - [`raster`]: pixel enumerators for lines and circle perimeters.
//! - [`crossings`]: ray-shadow crossing primitives, the path crossing
//!   aggregator, and the path-shadow algorithms.
//! - [`path`]: path elements, winding rules and path iterators.
//! - [`geometry`] / [`shapes`]: the concrete shape types and the
//!   [`Shape2D`] polymorphic surface.
//! - [`kit`]: the factory seam that keeps the kernel generic over the
//!   caller's point/vector representation.

pub mod crossings;
pub mod geometry;
pub mod kit;
pub mod path;
pub mod raster;
pub mod shapes;

use thiserror::Error;

/// Integer pixel coordinate type.
pub type Coord = i32;

/// Floating-point scalar used internally for curve flattening math.
/// Coordinates handed to or returned from the kernel are always [`Coord`].
pub type CoordF = f64;

/// Errors reported by the kernel.
///
/// These are precondition violations, not recoverable runtime conditions.
/// The `SHAPE_INTERSECTS` crossing sentinel is a valid computation outcome
/// and is never reported through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A path element stream whose first element is not a move-to.
    #[error("malformed path: the first path element must be a move-to")]
    MalformedPath,

    /// An argument outside the documented domain of an operation.
    #[error("invalid geometric parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, Error>;

pub use crossings::{
    crossings_from_circle, crossings_from_path_circle, crossings_from_path_point,
    crossings_from_path_rect, crossings_from_path_segment, crossings_from_point,
    crossings_from_point_ex, crossings_from_rect, crossings_from_segment,
    intersects_segment_segment, ClosestPointPathShadow, PathShadow, SHAPE_INTERSECTS,
};
pub use geometry::{Point, Rect, Vector};
pub use kit::{GeometryKit, PixelKit, Point2D, Vector2D};
pub use path::{
    FlatteningPathIterator, Path, PathElement, PathIterator, WindingRule, FLATTENING_TOLERANCE,
};
pub use raster::{circle_contains, CirclePerimeterIter, LinePixelIter};
pub use shapes::{Circle, MultiShape, OrientedPoint, Segment, Shape, Shape2D};
