//! Cooperative frame clock.
//!
//! Callbacks registered with [`FrameClock::with_frame_nanos`] run once, on the
//! next call to [`FrameClock::drain_frame_callbacks`]. Callbacks registered
//! while a frame is draining run on the following frame.

use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_time::Instant;

pub type FrameCallbackId = u64;

type FrameCallback = Box<dyn FnOnce(u64)>;

struct FrameClockState {
    next_id: FrameCallbackId,
    callbacks: IndexMap<FrameCallbackId, FrameCallback>,
    last_frame_nanos: Option<u64>,
}

#[derive(Clone)]
pub struct FrameClock {
    state: Rc<RefCell<FrameClockState>>,
    origin: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(FrameClockState {
                next_id: 1,
                callbacks: IndexMap::new(),
                last_frame_nanos: None,
            })),
            origin: Instant::now(),
        }
    }

    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.callbacks.insert(id, Box::new(callback));
        FrameCallbackRegistration {
            clock: Rc::downgrade(&self.state),
            id: Some(id),
        }
    }

    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        self.with_frame_nanos(move |nanos| callback(nanos / 1_000_000))
    }

    pub fn has_pending_callbacks(&self) -> bool {
        !self.state.borrow().callbacks.is_empty()
    }

    /// Timestamp of the most recently drained frame.
    pub fn last_frame_nanos(&self) -> Option<u64> {
        self.state.borrow().last_frame_nanos
    }

    /// Runs every callback registered before this call, in registration
    /// order. Returns how many ran.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) -> usize {
        let ids: Vec<FrameCallbackId> = {
            let mut state = self.state.borrow_mut();
            state.last_frame_nanos = Some(frame_time_nanos);
            state.callbacks.keys().copied().collect()
        };

        let mut ran = 0;
        for id in ids {
            // A callback earlier in this frame may have cancelled this one.
            let callback = self.state.borrow_mut().callbacks.shift_remove(&id);
            if let Some(callback) = callback {
                callback(frame_time_nanos);
                ran += 1;
            }
        }
        log::trace!("frame at {frame_time_nanos}ns ran {ran} callbacks");
        ran
    }

    /// Nanoseconds since this clock was created, on the wall clock.
    pub fn uptime_nanos(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }

    pub fn uptime_millis(&self) -> i64 {
        self.origin.elapsed().as_millis() as i64
    }

    /// Drains a frame stamped with the current wall-clock uptime.
    pub fn drain_now(&self) -> usize {
        self.drain_frame_callbacks(self.uptime_nanos())
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("FrameClock")
            .field("pending", &state.callbacks.len())
            .field("last_frame_nanos", &state.last_frame_nanos)
            .finish()
    }
}

/// Keeps a frame callback scheduled; dropping or cancelling it unregisters
/// the callback if it has not run yet.
pub struct FrameCallbackRegistration {
    clock: Weak<RefCell<FrameClockState>>,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    pub fn cancel(mut self) {
        self.unregister();
    }

    fn unregister(&mut self) {
        if let (Some(id), Some(clock)) = (self.id.take(), self.clock.upgrade()) {
            clock.borrow_mut().callbacks.shift_remove(&id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.unregister();
    }
}
