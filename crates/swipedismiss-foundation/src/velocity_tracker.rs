//! Pointer velocity estimation.
//!
//! Impulse strategy: velocity is derived from the kinetic energy the pointer
//! imparts across the recent samples, which is far less jittery than a
//! two-point difference at release.

use swipedismiss_graphics::Point;

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within the last 100ms contribute.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer had stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default)]
struct DataPointAtTime {
    time_ms: i64,
    data_point: f32,
}

/// 1D velocity tracker over absolute positions.
#[derive(Clone)]
pub struct VelocityTracker1D {
    samples: [Option<DataPointAtTime>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    pub fn add_data_point(&mut self, time_ms: i64, data_point: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(DataPointAtTime {
            time_ms,
            data_point,
        });
    }

    /// Velocity in units per millisecond; 0.0 with fewer than two usable
    /// samples.
    pub fn velocity_per_millis(&self) -> f32 {
        let mut data_points = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut sample_count = 0;

        let newest = match self.samples[self.index] {
            Some(sample) => sample,
            None => return 0.0,
        };

        let mut current_index = self.index;
        let mut previous = newest;
        while let Some(sample) = self.samples[current_index] {
            let age = newest.time_ms - sample.time_ms;
            let gap = (sample.time_ms - previous.time_ms).abs();
            previous = sample;
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }

            data_points[sample_count] = sample.data_point;
            times[sample_count] = -(age as f32);
            sample_count += 1;
            if sample_count >= HISTORY_SIZE {
                break;
            }

            current_index = (current_index + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if sample_count < 2 {
            return 0.0;
        }
        impulse_velocity(&data_points[..sample_count], &times[..sample_count])
    }

    /// Velocity in units per `units_millis` milliseconds.
    pub fn compute_velocity(&self, units_millis: i64) -> f32 {
        let velocity = self.velocity_per_millis() * units_millis as f32;
        if velocity.is_finite() {
            velocity
        } else {
            0.0
        }
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Samples are ordered newest first; `times` are non-positive ages.
fn impulse_velocity(data_points: &[f32], times: &[f32]) -> f32 {
    let oldest = data_points.len() - 1;
    let mut work = 0.0f32;
    let mut next_time = times[oldest];

    for i in (1..=oldest).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }

        let v_curr = (data_points[i - 1] - data_points[i]) / (next_time - current_time);
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }

    kinetic_energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with m = 1.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

/// Pointer velocity on both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };
}

/// Tracks pointer movement on both axes for one gesture.
#[derive(Clone, Default)]
pub struct VelocityTracker {
    x: VelocityTracker1D,
    y: VelocityTracker1D,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_movement(&mut self, time_ms: i64, position: Point) {
        self.x.add_data_point(time_ms, position.x);
        self.y.add_data_point(time_ms, position.y);
    }

    /// Velocity in pixels per `units_millis` milliseconds.
    pub fn compute_velocity(&self, units_millis: i64) -> Velocity {
        Velocity {
            x: self.x.compute_velocity(units_millis),
            y: self.y.compute_velocity(units_millis),
        }
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tracker_returns_zero() {
        let tracker = VelocityTracker1D::new();
        assert_eq!(tracker.compute_velocity(1000), 0.0);
    }

    #[test]
    fn test_single_point_returns_zero() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 100.0);
        assert_eq!(tracker.compute_velocity(1000), 0.0);
    }

    #[test]
    fn test_constant_velocity() {
        let mut tracker = VelocityTracker1D::new();
        // 100 px per 10ms = 10000 px/s
        for step in 0..4 {
            tracker.add_data_point(step * 10, step as f32 * 100.0);
        }

        let velocity = tracker.compute_velocity(1000);
        assert!(
            (velocity - 10_000.0).abs() < 1_000.0,
            "Expected ~10000, got {}",
            velocity
        );
    }

    #[test]
    fn test_units_scale_result() {
        let mut tracker = VelocityTracker1D::new();
        for step in 0..4 {
            tracker.add_data_point(step * 10, step as f32 * 10.0);
        }

        let per_second = tracker.compute_velocity(1000);
        let per_ms = tracker.compute_velocity(1);
        assert!((per_second - per_ms * 1000.0).abs() < 1e-2);
    }

    #[test]
    fn test_negative_velocity() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 300.0);
        tracker.add_data_point(10, 200.0);
        tracker.add_data_point(20, 100.0);

        let velocity = tracker.compute_velocity(1000);
        assert!(velocity < 0.0, "Expected negative velocity, got {}", velocity);
    }

    #[test]
    fn test_reset() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 100.0);

        tracker.reset();

        assert_eq!(tracker.compute_velocity(1000), 0.0);
    }

    #[test]
    fn test_old_samples_ignored() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 5_000.0);
        tracker.add_data_point(150, 100.0);
        tracker.add_data_point(160, 200.0);
        tracker.add_data_point(170, 300.0);

        // The stale sample would make this strongly negative.
        let velocity = tracker.compute_velocity(1000);
        assert!(velocity > 0.0, "Expected recent samples only, got {velocity}");
    }

    #[test]
    fn test_pause_before_release_returns_zero() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 100.0);
        tracker.add_data_point(10 + ASSUME_STOPPED_MS + 1, 100.0);

        assert_eq!(tracker.compute_velocity(1000), 0.0);
    }

    #[test]
    fn test_two_dimensional_tracking() {
        let mut tracker = VelocityTracker::new();
        for step in 0..5 {
            let t = step * 8;
            tracker.add_movement(t, Point::new(step as f32 * 16.0, 300.0 - step as f32 * 2.0));
        }

        let velocity = tracker.compute_velocity(1000);
        assert!((velocity.x - 2_000.0).abs() < 200.0, "x: {}", velocity.x);
        assert!(velocity.y < 0.0 && velocity.y.abs() < velocity.x.abs());

        tracker.reset();
        assert_eq!(tracker.compute_velocity(1000), Velocity::ZERO);
    }
}
