//! Swipe-to-dismiss for scrollable lists.
//!
//! A [`SwipeDismissListener`] watches the pointer events of a host list. When
//! the user drags a row sideways far or fast enough it slides the row away,
//! collapses it, and reports every row dismissed in the same burst to
//! [`DismissCallbacks::on_dismiss`] in one call, positions sorted high to low.

pub mod config;
pub mod dismiss;
pub mod gesture_constants;
pub mod gestures;
pub mod host;
pub mod input;
pub mod listener;
pub mod presentation;
pub mod velocity_tracker;

pub use config::{ConfigError, SwipeDirection, SwipeDismissConfig, SwipeMode};
pub use dismiss::{DismissBatch, DismissCoordinator, PendingDismissal};
pub use gestures::{GesturePhase, GestureSession, GestureTracker, ReleaseAction};
pub use host::{DismissCallbacks, HostList, ItemId, ItemView, ScrollState};
pub use input::{PointerEvent, PointerEventKind, PointerId};
pub use listener::SwipeDismissListener;
pub use velocity_tracker::{Velocity, VelocityTracker, VelocityTracker1D};

pub mod prelude {
    pub use crate::config::{SwipeDismissConfig, SwipeMode};
    pub use crate::host::{DismissCallbacks, HostList, ItemView, ScrollState};
    pub use crate::input::PointerEvent;
    pub use crate::listener::SwipeDismissListener;
    pub use swipedismiss_animation::{Animator, FrameAnimator, FrameClock, ImmediateAnimator};
    pub use swipedismiss_graphics::{Point, Rect, Size};
}
