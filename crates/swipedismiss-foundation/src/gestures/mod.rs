//! Swipe gesture recognition.

mod session;
mod swipe;

pub use session::{GesturePhase, GestureSession};
pub use swipe::{
    dismiss_direction, CancelledGesture, GestureTracker, MoveOutcome, Release, ReleaseAction,
};
