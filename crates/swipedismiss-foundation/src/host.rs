//! Collaboration interfaces between the listener, the host list and the
//! caller.
//!
//! The host list keeps its own rendering, layout and touch handling. The
//! listener only needs to find items under the pointer, map them to
//! positions, and switch off the list's own press and scroll handling while a
//! swipe owns the pointer.

use std::rc::Rc;
use swipedismiss_graphics::{Point, Rect};

pub type ItemId = u64;

/// A row currently laid out by the host list.
///
/// Presentation setters take `&self`; items are shared between the host and
/// running animations on a single UI thread.
pub trait ItemView {
    /// Identity of the view, stable while it is attached.
    fn id(&self) -> ItemId;

    /// Hit rectangle in screen coordinates, ignoring translation.
    fn bounds(&self) -> Rect;

    /// Laid-out height along the scroll axis.
    fn extent(&self) -> f32;
    fn set_extent(&self, extent: f32);

    fn translation_x(&self) -> f32;
    fn set_translation_x(&self, translation_x: f32);

    fn alpha(&self) -> f32;
    fn set_alpha(&self, alpha: f32);
}

/// The scrollable list hosting dismissable items.
pub trait HostList {
    /// Number of currently attached (visible) item views.
    fn child_count(&self) -> usize;

    /// Attached item at `index`, in the list's child order.
    fn child_at(&self, index: usize) -> Option<Rc<dyn ItemView>>;

    /// Adapter position backing `item`, if it is still attached.
    fn position_for_item(&self, item: &dyn ItemView) -> Option<usize>;

    /// Viewport width; items travel this far when dismissed.
    fn width(&self) -> f32;

    /// While true the list and its ancestors must not steal the pointer.
    fn request_disallow_intercept(&self, disallow: bool);

    /// Cancels the list's own press highlight and click tracking for the
    /// current pointer. Must not route back into the swipe listener.
    fn cancel_press_handling(&self);

    /// Sends a synthetic cancel through the list's full touch pipeline. The
    /// host may forward it to the swipe listener.
    fn dispatch_cancel(&self);

    /// First attached item whose bounds contain `point`.
    fn hit_test(&self, point: Point) -> Option<Rc<dyn ItemView>> {
        (0..self.child_count())
            .filter_map(|index| self.child_at(index))
            .find(|item| item.bounds().contains_point(point))
    }
}

/// Callbacks from the listener to the code that owns the list's data.
pub trait DismissCallbacks {
    /// Whether the item at `position` may be swiped away.
    fn can_dismiss(&self, position: usize) -> bool;

    /// One or more items finished animating out. Positions are sorted in
    /// descending order so they can be removed one by one without shifting
    /// the ones still to remove.
    fn on_dismiss(&self, reverse_sorted_positions: &[usize]);

    /// A swipe qualified for dismissal while dismissals are not committed.
    /// The item has already returned to rest.
    fn on_try_to_dismiss(&self, item: &Rc<dyn ItemView>, position: usize) {
        let _ = (item, position);
    }
}

/// Scroll state reported by the host list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollState {
    Idle,
    /// The user is dragging the list.
    TouchScroll,
    /// The list is settling after a fling.
    Fling,
}
