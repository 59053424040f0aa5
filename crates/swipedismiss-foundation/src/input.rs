//! Pointer events as the listener consumes them.

use std::cell::Cell;
use std::rc::Rc;
use swipedismiss_graphics::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single-pointer event in screen coordinates.
///
/// Consumption is shared between clones so a host can tell whether the swipe
/// listener claimed the event before running its own scroll and click
/// handling.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    /// Screen-space (raw) position.
    pub position: Point,
    /// Monotonic event time in milliseconds.
    pub uptime_ms: i64,
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, uptime_ms: i64) -> Self {
        Self {
            id: 0,
            kind,
            position,
            uptime_ms,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn down(x: f32, y: f32, uptime_ms: i64) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y), uptime_ms)
    }

    pub fn moved(x: f32, y: f32, uptime_ms: i64) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y), uptime_ms)
    }

    pub fn up(x: f32, y: f32, uptime_ms: i64) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y), uptime_ms)
    }

    pub fn cancel(uptime_ms: i64) -> Self {
        Self::new(PointerEventKind::Cancel, Point::ZERO, uptime_ms)
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    /// Mark this event as handled; the host must not also scroll or click
    /// with it.
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}
