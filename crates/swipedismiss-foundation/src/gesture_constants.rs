//! Default gesture thresholds.
//!
//! These are in logical pixels and milliseconds. They seed
//! [`SwipeDismissConfig::default`](crate::SwipeDismissConfig) and can all be
//! overridden per listener; nothing reads them directly at gesture time.

/// Distance the pointer must travel horizontally before a touch is treated as
/// a swipe rather than a tap or a scroll.
///
/// Matches the touch slop of common mobile platforms (~8dp).
pub const TOUCH_SLOP: f32 = 8.0;

/// Smallest velocity, in px/s, a platform reports as a fling.
pub const BASE_MIN_FLING_VELOCITY: f32 = 50.0;

/// Scale applied to [`BASE_MIN_FLING_VELOCITY`] for dismissal.
///
/// A bare platform fling threshold fires on almost any flick; dismissing a
/// row needs a deliberate throw. 16 is an empirical setting, not a physical
/// constant.
pub const FLING_VELOCITY_MULTIPLIER: f32 = 16.0;

/// Maximum fling velocity in px/s. Throws faster than this are treated as
/// noise and do not dismiss.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Duration of snap-back, fly-out and collapse animations.
pub const SHORT_ANIMATION_MILLIS: u64 = 200;

/// Height a dismissed row collapses to before the batch is handed over.
pub const MIN_DISMISSED_EXTENT: f32 = 1.0;

/// Velocities are reported per this many milliseconds (i.e. px/s).
pub const VELOCITY_UNITS_MILLIS: i64 = 1_000;
