//! Scripted pointer input against a manual frame clock.
//!
//! [`GestureRobot`] owns the only notion of time in a test: pointer events
//! are stamped with it and animation frames are drained as it advances, one
//! frame every [`FRAME_INTERVAL_MS`].

use crate::callbacks::RecordingCallbacks;
use crate::host::TestHostList;
use std::cell::Cell;
use std::rc::Rc;
use swipedismiss_animation::{Animator, FrameAnimator, FrameClock, ImmediateAnimator};
use swipedismiss_foundation::{
    ConfigError, PointerEvent, ScrollState, SwipeDismissConfig, SwipeDismissListener,
};
use swipedismiss_graphics::Point;

pub const FRAME_INTERVAL_MS: i64 = 16;

/// Frames [`GestureRobot::wait_for_idle`] drains before giving up.
const MAX_IDLE_FRAMES: usize = 1_000;

pub struct GestureRobot {
    listener: SwipeDismissListener,
    clock: FrameClock,
    now_ms: Cell<i64>,
    next_frame_ms: Cell<i64>,
}

impl GestureRobot {
    pub fn new(listener: SwipeDismissListener, clock: FrameClock) -> Self {
        Self {
            listener,
            clock,
            now_ms: Cell::new(0),
            next_frame_ms: Cell::new(FRAME_INTERVAL_MS),
        }
    }

    pub fn listener(&self) -> &SwipeDismissListener {
        &self.listener
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Current robot time in milliseconds.
    pub fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }

    /// Sends an event to the listener as-is. Returns whether it was consumed.
    pub fn send(&self, event: &PointerEvent) -> bool {
        self.listener.on_pointer_event(event)
    }

    pub fn press(&self, at: Point) -> bool {
        self.send(&PointerEvent::down(at.x, at.y, self.now_ms()))
    }

    pub fn move_to(&self, to: Point) -> bool {
        self.send(&PointerEvent::moved(to.x, to.y, self.now_ms()))
    }

    pub fn release(&self, at: Point) -> bool {
        self.send(&PointerEvent::up(at.x, at.y, self.now_ms()))
    }

    pub fn cancel(&self) -> bool {
        self.send(&PointerEvent::cancel(self.now_ms()))
    }

    /// Presses at `from`, moves to `to` in `steps` evenly spaced moves over
    /// `duration_ms`, and releases there. Frames keep running in between.
    ///
    /// Returns how many of the moves were consumed.
    pub fn swipe(&self, from: Point, to: Point, steps: usize, duration_ms: i64) -> usize {
        let consumed = self.drag(from, to, steps, duration_ms);
        self.release(to);
        consumed
    }

    /// Like [`GestureRobot::swipe`] but keeps the pointer down.
    pub fn drag(&self, from: Point, to: Point, steps: usize, duration_ms: i64) -> usize {
        self.press(from);
        let steps = steps.max(1);
        let step_ms = duration_ms / steps as i64;
        let mut consumed = 0;
        for step in 1..=steps {
            self.advance_time(step_ms);
            let fraction = step as f32 / steps as f32;
            let point = Point::new(
                from.x + (to.x - from.x) * fraction,
                from.y + (to.y - from.y) * fraction,
            );
            if self.move_to(point) {
                consumed += 1;
            }
        }
        consumed
    }

    /// Moves time forward, draining every frame that falls due.
    pub fn advance_time(&self, millis: i64) {
        let target = self.now_ms.get() + millis.max(0);
        while self.next_frame_ms.get() <= target {
            let frame = self.next_frame_ms.get();
            self.now_ms.set(frame);
            self.next_frame_ms.set(frame + FRAME_INTERVAL_MS);
            self.clock.drain_frame_callbacks(frame as u64 * 1_000_000);
        }
        self.now_ms.set(target);
    }

    /// Drains frames until no animation is scheduled. Returns the number of
    /// frames drained.
    pub fn wait_for_idle(&self) -> usize {
        let mut frames = 0;
        while self.clock.has_pending_callbacks() && frames < MAX_IDLE_FRAMES {
            let until_next = self.next_frame_ms.get() - self.now_ms.get();
            self.advance_time(until_next);
            frames += 1;
        }
        if frames == MAX_IDLE_FRAMES {
            log::warn!("animations still running after {MAX_IDLE_FRAMES} frames");
        }
        frames
    }
}

/// A list of rows, recording callbacks, a listener wired to both and a robot
/// driving it.
pub struct SwipeHarness {
    pub host: Rc<TestHostList>,
    pub callbacks: Rc<RecordingCallbacks>,
    pub robot: GestureRobot,
}

impl SwipeHarness {
    pub const WIDTH: f32 = 400.0;
    pub const ROW_HEIGHT: f32 = 60.0;

    /// Rows animated by a [`FrameAnimator`]; dismissed rows are removed
    /// from the host and synthetic cancels are routed back to the listener.
    pub fn new(rows: usize) -> Self {
        let clock = FrameClock::new();
        let animator = Rc::new(FrameAnimator::new(clock.clone()));
        Self::with_animator(rows, animator, clock)
    }

    /// Rows animated by an [`ImmediateAnimator`].
    pub fn immediate(rows: usize) -> Self {
        Self::with_animator(rows, Rc::new(ImmediateAnimator), FrameClock::new())
    }

    fn with_animator(rows: usize, animator: Rc<dyn Animator>, clock: FrameClock) -> Self {
        let host = TestHostList::with_rows(rows, Self::WIDTH, Self::ROW_HEIGHT);
        let callbacks = RecordingCallbacks::new();
        callbacks.removing_from(&host);
        let listener = SwipeDismissListener::new(host.clone(), callbacks.clone(), animator);
        host.route_cancels_to(listener.clone());
        Self {
            host,
            callbacks,
            robot: GestureRobot::new(listener, clock),
        }
    }

    pub fn with_config(self, config: SwipeDismissConfig) -> Result<Self, ConfigError> {
        self.robot.listener().set_config(config)?;
        Ok(self)
    }

    pub fn listener(&self) -> &SwipeDismissListener {
        self.robot.listener()
    }

    pub fn row_center(&self, position: usize) -> Point {
        self.host.row_center(position)
    }

    /// Swipes the row at `position` horizontally by `dx` over `duration_ms`.
    pub fn swipe_row(&self, position: usize, dx: f32, duration_ms: i64) -> usize {
        let from = self.row_center(position);
        let to = Point::new(from.x + dx, from.y);
        self.robot.swipe(from, to, 10, duration_ms)
    }

    pub fn scroll_state(&self, state: ScrollState) {
        self.listener().on_scroll_state_changed(state);
    }
}
