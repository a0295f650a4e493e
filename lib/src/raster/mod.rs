//! Pixel enumerators for lines and circle perimeters.
//!
//! These are the leaf algorithms of the kernel: everything above them
//! (crossing counts, containment, closest points) is defined in terms of
//! the pixel sequences they produce, so intersection queries stay exact
//! without evaluating any shape equation in floating point.

mod circle;
mod line;

pub use circle::{circle_contains, CirclePerimeterIter};
pub use line::LinePixelIter;
