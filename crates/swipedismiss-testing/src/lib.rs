//! Testing utilities for swipe-to-dismiss
//!
//! A fake host list of stacked rows, callbacks that record what they are
//! told, and a [`GestureRobot`] that plays pointer sequences against a manual
//! frame clock.

pub mod callbacks;
pub mod host;
pub mod robot;

pub use callbacks::*;
pub use host::*;
pub use robot::*;

pub mod prelude {
    pub use crate::callbacks::RecordingCallbacks;
    pub use crate::host::{TestHostList, TestItem};
    pub use crate::robot::{GestureRobot, SwipeHarness};
}
