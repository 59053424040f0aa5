//! Per-listener swipe configuration.

use crate::gesture_constants::{
    BASE_MIN_FLING_VELOCITY, FLING_VELOCITY_MULTIPLIER, MAX_FLING_VELOCITY, MIN_DISMISSED_EXTENT,
    SHORT_ANIMATION_MILLIS, TOUCH_SLOP,
};
use std::str::FromStr;
use swipedismiss_animation::{AnimationSpec, Easing};

/// Which horizontal directions an item may be swiped in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SwipeMode {
    #[default]
    Both,
    LeftOnly,
    RightOnly,
}

impl SwipeMode {
    /// Clamps a horizontal delta to the directions this mode allows.
    pub fn clamp_delta(self, delta_x: f32) -> f32 {
        match self {
            SwipeMode::Both => delta_x,
            SwipeMode::LeftOnly => delta_x.min(0.0),
            SwipeMode::RightOnly => delta_x.max(0.0),
        }
    }

    pub fn allows(self, direction: SwipeDirection) -> bool {
        match (self, direction) {
            (SwipeMode::Both, _) => true,
            (SwipeMode::LeftOnly, SwipeDirection::Left) => true,
            (SwipeMode::RightOnly, SwipeDirection::Right) => true,
            _ => false,
        }
    }
}

impl FromStr for SwipeMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "both" => Ok(SwipeMode::Both),
            "left" | "left-only" => Ok(SwipeMode::LeftOnly),
            "right" | "right-only" => Ok(SwipeMode::RightOnly),
            _ => Err(ConfigError::UnknownSwipeMode {
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Direction of a signed horizontal quantity; `None` for zero.
    pub fn from_sign(value: f32) -> Option<Self> {
        if value > 0.0 {
            Some(SwipeDirection::Right)
        } else if value < 0.0 {
            Some(SwipeDirection::Left)
        } else {
            None
        }
    }

    /// Translation that puts an item of `width` fully off-screen.
    pub fn off_screen_translation(self, width: f32) -> f32 {
        match self {
            SwipeDirection::Left => -width,
            SwipeDirection::Right => width,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    RatioOutOfRange { field: &'static str, value: f32 },
    InvalidVelocity { field: &'static str, value: f32 },
    FlingRangeInverted { min: f32, max: f32 },
    InvalidSlop { value: f32 },
    InvalidExtent { value: f32 },
    UnknownSwipeMode { value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::RatioOutOfRange { field, value } => {
                write!(f, "{field} must be within [0, 1], got {value}")
            }
            ConfigError::InvalidVelocity { field, value } => {
                write!(f, "{field} must be a positive finite velocity, got {value}")
            }
            ConfigError::FlingRangeInverted { min, max } => {
                write!(f, "minimum fling velocity {min} exceeds maximum {max}")
            }
            ConfigError::InvalidSlop { value } => {
                write!(f, "touch slop must be finite and non-negative, got {value}")
            }
            ConfigError::InvalidExtent { value } => {
                write!(f, "dismissed extent must be finite and non-negative, got {value}")
            }
            ConfigError::UnknownSwipeMode { value } => {
                write!(f, "unknown swipe mode {value:?}; expected both, left or right")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tunables for one swipe-to-dismiss listener.
#[derive(Clone, Debug, PartialEq)]
pub struct SwipeDismissConfig {
    pub swipe_mode: SwipeMode,
    /// How far an item may travel, as a fraction of its width.
    pub swipe_distance_ratio: f32,
    /// Travel, as a fraction of width, beyond which release dismisses
    /// regardless of velocity.
    pub dismiss_decision_distance_ratio: f32,
    /// When false a qualifying swipe returns the item to rest and reports
    /// `on_try_to_dismiss` instead of removing it.
    pub commit_dismiss: bool,
    pub touch_slop: f32,
    pub base_min_fling_velocity: f32,
    pub fling_velocity_multiplier: f32,
    pub max_fling_velocity: f32,
    pub animation: AnimationSpec,
    pub min_dismissed_extent: f32,
}

impl Default for SwipeDismissConfig {
    fn default() -> Self {
        Self {
            swipe_mode: SwipeMode::Both,
            swipe_distance_ratio: 1.0,
            dismiss_decision_distance_ratio: 0.5,
            commit_dismiss: true,
            touch_slop: TOUCH_SLOP,
            base_min_fling_velocity: BASE_MIN_FLING_VELOCITY,
            fling_velocity_multiplier: FLING_VELOCITY_MULTIPLIER,
            max_fling_velocity: MAX_FLING_VELOCITY,
            animation: AnimationSpec::tween(SHORT_ANIMATION_MILLIS, Easing::AccelerateDecelerate),
            min_dismissed_extent: MIN_DISMISSED_EXTENT,
        }
    }
}

impl SwipeDismissConfig {
    pub fn with_swipe_mode(mut self, mode: SwipeMode) -> Self {
        self.swipe_mode = mode;
        self
    }

    pub fn with_swipe_distance_ratio(mut self, ratio: f32) -> Self {
        self.swipe_distance_ratio = ratio;
        self
    }

    pub fn with_dismiss_decision_distance_ratio(mut self, ratio: f32) -> Self {
        self.dismiss_decision_distance_ratio = ratio;
        self
    }

    pub fn with_commit_dismiss(mut self, commit: bool) -> Self {
        self.commit_dismiss = commit;
        self
    }

    pub fn with_touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop = slop;
        self
    }

    pub fn with_fling_velocities(mut self, base_min: f32, multiplier: f32, max: f32) -> Self {
        self.base_min_fling_velocity = base_min;
        self.fling_velocity_multiplier = multiplier;
        self.max_fling_velocity = max;
        self
    }

    pub fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = animation;
        self
    }

    /// Velocity, in px/s, a release must reach to dismiss by flinging.
    pub fn min_fling_velocity(&self) -> f32 {
        self.base_min_fling_velocity * self.fling_velocity_multiplier
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_ratio("swipe_distance_ratio", self.swipe_distance_ratio)?;
        check_ratio(
            "dismiss_decision_distance_ratio",
            self.dismiss_decision_distance_ratio,
        )?;
        if !self.touch_slop.is_finite() || self.touch_slop < 0.0 {
            return Err(ConfigError::InvalidSlop {
                value: self.touch_slop,
            });
        }
        check_velocity("base_min_fling_velocity", self.base_min_fling_velocity)?;
        check_velocity("fling_velocity_multiplier", self.fling_velocity_multiplier)?;
        check_velocity("max_fling_velocity", self.max_fling_velocity)?;
        let min = self.min_fling_velocity();
        if min > self.max_fling_velocity {
            return Err(ConfigError::FlingRangeInverted {
                min,
                max: self.max_fling_velocity,
            });
        }
        if !self.min_dismissed_extent.is_finite() || self.min_dismissed_extent < 0.0 {
            return Err(ConfigError::InvalidExtent {
                value: self.min_dismissed_extent,
            });
        }
        Ok(())
    }
}

fn check_ratio(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RatioOutOfRange { field, value })
    }
}

fn check_velocity(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidVelocity { field, value })
    }
}
