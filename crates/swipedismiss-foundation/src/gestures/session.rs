//! State of one touch sequence.

use crate::host::{ItemId, ItemView};
use crate::input::PointerId;
use crate::velocity_tracker::VelocityTracker;
use std::rc::{Rc, Weak};
use swipedismiss_graphics::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// No pointer is down on a dismissable item.
    Idle,
    /// Pointer went down on a dismissable item and has not moved yet.
    Armed,
    /// Pointer is moving but the motion is not (yet) a horizontal swipe.
    Tracking,
    /// Motion classified as a swipe; the item follows the pointer.
    Swiping,
}

/// Everything remembered between touch-down and release on one item.
///
/// The item is held weakly: the host owns its views and may detach one
/// mid-gesture.
pub struct GestureSession {
    pub(crate) item: Weak<dyn ItemView>,
    pub(crate) item_id: ItemId,
    /// Pointer that armed the session; other pointers are ignored.
    pub(crate) pointer: PointerId,
    pub(crate) position: Option<usize>,
    pub(crate) start: Point,
    pub(crate) phase: GesturePhase,
    pub(crate) swipe_slop_offset: f32,
    pub(crate) item_width: f32,
    pub(crate) velocity: VelocityTracker,
}

impl GestureSession {
    pub(crate) fn new(
        item: &Rc<dyn ItemView>,
        pointer: PointerId,
        position: usize,
        start: Point,
        item_width: f32,
    ) -> Self {
        Self {
            item: Rc::downgrade(item),
            item_id: item.id(),
            pointer,
            position: Some(position),
            start,
            phase: GesturePhase::Armed,
            swipe_slop_offset: 0.0,
            item_width,
            velocity: VelocityTracker::new(),
        }
    }

    pub fn item(&self) -> Option<Rc<dyn ItemView>> {
        self.item.upgrade()
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    /// Position captured at touch-down; `None` once a dismiss batch has
    /// invalidated it.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_swiping(&self) -> bool {
        self.phase == GesturePhase::Swiping
    }

    pub fn swipe_slop_offset(&self) -> f32 {
        self.swipe_slop_offset
    }

    pub fn item_width(&self) -> f32 {
        self.item_width
    }
}

impl std::fmt::Debug for GestureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureSession")
            .field("item_id", &self.item_id)
            .field("pointer", &self.pointer)
            .field("position", &self.position)
            .field("start", &self.start)
            .field("phase", &self.phase)
            .field("swipe_slop_offset", &self.swipe_slop_offset)
            .field("item_width", &self.item_width)
            .finish()
    }
}
