//! In-memory host list of vertically stacked rows.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use swipedismiss_foundation::{HostList, ItemId, ItemView, SwipeDismissListener};
use swipedismiss_graphics::{Point, Rect};

pub struct TestItem {
    id: ItemId,
    label: String,
    top: Cell<f32>,
    width: f32,
    extent: Cell<f32>,
    translation_x: Cell<f32>,
    alpha: Cell<f32>,
}

impl TestItem {
    pub fn new(id: ItemId, label: impl Into<String>, width: f32, extent: f32) -> Self {
        Self {
            id,
            label: label.into(),
            top: Cell::new(0.0),
            width,
            extent: Cell::new(extent),
            translation_x: Cell::new(0.0),
            alpha: Cell::new(1.0),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_at_rest(&self) -> bool {
        self.translation_x.get() == 0.0 && self.alpha.get() == 1.0
    }
}

impl ItemView for TestItem {
    fn id(&self) -> ItemId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(0.0, self.top.get(), self.width, self.extent.get())
    }

    fn extent(&self) -> f32 {
        self.extent.get()
    }

    fn set_extent(&self, extent: f32) {
        self.extent.set(extent);
    }

    fn translation_x(&self) -> f32 {
        self.translation_x.get()
    }

    fn set_translation_x(&self, translation_x: f32) {
        self.translation_x.set(translation_x);
    }

    fn alpha(&self) -> f32 {
        self.alpha.get()
    }

    fn set_alpha(&self, alpha: f32) {
        self.alpha.set(alpha);
    }
}

impl std::fmt::Debug for TestItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestItem")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("bounds", &self.bounds())
            .field("translation_x", &self.translation_x.get())
            .field("alpha", &self.alpha.get())
            .finish()
    }
}

/// Rows laid out top to bottom, every row attached. Position equals child
/// index.
pub struct TestHostList {
    width: f32,
    rows: RefCell<Vec<Rc<TestItem>>>,
    next_id: Cell<ItemId>,
    disallow_intercept: Cell<bool>,
    press_cancels: Cell<usize>,
    dispatched_cancels: Cell<usize>,
    /// Receives synthetic cancels, as a real list forwards them to its touch
    /// listener.
    cancel_target: RefCell<Option<SwipeDismissListener>>,
}

impl TestHostList {
    pub fn with_rows(count: usize, width: f32, row_height: f32) -> Rc<Self> {
        let host = Rc::new(Self {
            width,
            rows: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            disallow_intercept: Cell::new(false),
            press_cancels: Cell::new(0),
            dispatched_cancels: Cell::new(0),
            cancel_target: RefCell::new(None),
        });
        for index in 0..count {
            host.push_row(format!("row {index}"), row_height);
        }
        host
    }

    pub fn push_row(&self, label: impl Into<String>, height: f32) -> Rc<TestItem> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let item = Rc::new(TestItem::new(id, label, self.width, height));
        self.rows.borrow_mut().push(Rc::clone(&item));
        self.relayout();
        item
    }

    /// Removes rows by position, in the order given, then lays out again.
    pub fn remove_positions(&self, positions: &[usize]) {
        {
            let mut rows = self.rows.borrow_mut();
            for &position in positions {
                if position < rows.len() {
                    rows.remove(position);
                }
            }
        }
        self.relayout();
    }

    pub fn relayout(&self) {
        let mut top = 0.0;
        for row in self.rows.borrow().iter() {
            row.top.set(top);
            top += row.extent();
        }
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }

    pub fn item(&self, position: usize) -> Rc<TestItem> {
        Rc::clone(&self.rows.borrow()[position])
    }

    pub fn item_view(&self, position: usize) -> Rc<dyn ItemView> {
        self.item(position)
    }

    pub fn labels(&self) -> Vec<String> {
        self.rows
            .borrow()
            .iter()
            .map(|row| row.label().to_string())
            .collect()
    }

    /// Centre of the row at `position`, in screen coordinates.
    pub fn row_center(&self, position: usize) -> Point {
        let bounds = self.item(position).bounds();
        Point::new(bounds.x + bounds.width / 2.0, bounds.y + bounds.height / 2.0)
    }

    pub fn is_intercept_disallowed(&self) -> bool {
        self.disallow_intercept.get()
    }

    pub fn press_cancels(&self) -> usize {
        self.press_cancels.get()
    }

    pub fn dispatched_cancels(&self) -> usize {
        self.dispatched_cancels.get()
    }

    pub fn route_cancels_to(&self, listener: SwipeDismissListener) {
        *self.cancel_target.borrow_mut() = Some(listener);
    }
}

impl HostList for TestHostList {
    fn child_count(&self) -> usize {
        self.rows.borrow().len()
    }

    fn child_at(&self, index: usize) -> Option<Rc<dyn ItemView>> {
        self.rows
            .borrow()
            .get(index)
            .map(|row| Rc::clone(row) as Rc<dyn ItemView>)
    }

    fn position_for_item(&self, item: &dyn ItemView) -> Option<usize> {
        self.rows.borrow().iter().position(|row| row.id() == item.id())
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn request_disallow_intercept(&self, disallow: bool) {
        self.disallow_intercept.set(disallow);
    }

    fn cancel_press_handling(&self) {
        self.press_cancels.set(self.press_cancels.get() + 1);
    }

    fn dispatch_cancel(&self) {
        self.dispatched_cancels.set(self.dispatched_cancels.get() + 1);
        let target = self.cancel_target.borrow().clone();
        if let Some(listener) = target {
            listener.on_pointer_event(&swipedismiss_foundation::PointerEvent::cancel(0));
        }
    }
}
