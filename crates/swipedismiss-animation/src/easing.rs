//! Easing curves and tween specifications.

use std::f32::consts::PI;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

/// Easing curves applied to the linear progress of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Cosine ease in and out; the default curve for property animations on
    /// list items.
    AccelerateDecelerate,
}

impl Easing {
    /// Apply the easing function to a linear fraction in `[0, 1]`.
    pub fn transform(&self, fraction: f32) -> f32 {
        let fraction = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Linear => fraction,
            Easing::AccelerateDecelerate => ((fraction + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::AccelerateDecelerate
    }
}

/// Tween specification: duration, easing and start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    pub easing: Easing,
    /// Delay before the value starts moving, in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    /// Eased progress after `elapsed_nanos`, plus whether the tween is done.
    pub fn progress_at(&self, elapsed_nanos: u64) -> (f32, bool) {
        let delay_nanos = self.delay_millis.saturating_mul(1_000_000);
        if elapsed_nanos < delay_nanos {
            return (0.0, false);
        }
        if self.duration_millis == 0 {
            return (1.0, true);
        }
        let duration_nanos = self.duration_millis.saturating_mul(1_000_000);
        let linear = ((elapsed_nanos - delay_nanos) as f64 / duration_nanos as f64) as f32;
        if linear >= 1.0 {
            (1.0, true)
        } else {
            (self.easing.transform(linear), false)
        }
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(200, Easing::AccelerateDecelerate)
    }
}
