//! Geometry primitives for swipe-to-dismiss
//!
//! Pointer positions, item sizes and the screen-space hit rectangles the
//! gesture tracker tests against.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
}
