//! Animation primitives for swipe-to-dismiss
//!
//! A cooperative, single-threaded [`FrameClock`], tween [`AnimationSpec`]s with
//! easing curves, and the [`Animator`] interface the gesture layer drives item
//! presentation through.

mod animator;
mod easing;
mod frame_clock;

pub use animator::*;
pub use easing::*;
pub use frame_clock::*;

pub mod prelude {
    pub use crate::animator::{AnimationHandle, Animator, FrameAnimator, ValueAnimation};
    pub use crate::easing::{AnimationSpec, Easing, Lerp};
    pub use crate::frame_clock::FrameClock;
}
