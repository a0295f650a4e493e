//! Concrete integer-lattice geometry value types.

mod point;
mod rect;

pub use point::{side_of_line, Point, Vector};
pub use rect::{Rect, RectPerimeterIter};
