//! A list of messages with an adapter that removes dismissed rows.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use swipedismiss_foundation::{DismissCallbacks, HostList, ItemId, ItemView};
use swipedismiss_graphics::Rect;

pub const ROW_HEIGHT: f32 = 72.0;

pub struct MessageRow {
    id: ItemId,
    subject: String,
    pinned: bool,
    width: f32,
    top: Cell<f32>,
    extent: Cell<f32>,
    translation_x: Cell<f32>,
    alpha: Cell<f32>,
}

impl MessageRow {
    fn new(id: ItemId, subject: &str, pinned: bool, width: f32) -> Self {
        Self {
            id,
            subject: subject.to_string(),
            pinned,
            width,
            top: Cell::new(0.0),
            extent: Cell::new(ROW_HEIGHT),
            translation_x: Cell::new(0.0),
            alpha: Cell::new(1.0),
        }
    }
}

impl ItemView for MessageRow {
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

pub struct Inbox {
    width: f32,
    rows: RefCell<Vec<Rc<MessageRow>>>,
    archived: RefCell<Vec<String>>,
}

impl Inbox {
    pub fn new(width: f32, subjects: &[(&str, bool)]) -> Rc<Self> {
        let rows = subjects
            .iter()
            .zip(1..)
            .map(|(&(subject, pinned), id)| Rc::new(MessageRow::new(id, subject, pinned, width)))
            .collect();
        let inbox = Rc::new(Self {
            width,
            rows: RefCell::new(rows),
            archived: RefCell::new(Vec::new()),
        });
        inbox.relayout();
        inbox
    }

    fn relayout(&self) {
        let mut top = 0.0;
        for row in self.rows.borrow().iter() {
            row.top.set(top);
            top += row.extent();
        }
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn row(&self, position: usize) -> Option<Rc<dyn ItemView>> {
        self.child_at(position)
    }

    pub fn archived(&self) -> Vec<String> {
        self.archived.borrow().clone()
    }

    /// One line per row: offset, opacity and subject.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (position, row) in self.rows.borrow().iter().enumerate() {
            let marker = if row.pinned { '*' } else { ' ' };
            out.push_str(&format!(
                "{position:>2}{marker} [{:>7.1} | {:.2} | {:>5.1}] {}\n",
                row.translation_x.get(),
                row.alpha.get(),
                row.extent.get(),
                row.subject
            ));
        }
        out
    }
}

impl HostList for Inbox {
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
        self.rows.borrow().iter().position(|row| row.id == item.id())
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn request_disallow_intercept(&self, disallow: bool) {
        log::trace!("inbox intercept {}", if disallow { "blocked" } else { "allowed" });
    }

    fn cancel_press_handling(&self) {
        log::trace!("inbox press cancelled");
    }

    fn dispatch_cancel(&self) {
        log::trace!("inbox cancel dispatched");
    }
}

/// Pinned messages stay; anything else is archived when swiped away.
pub struct InboxAdapter {
    inbox: Rc<Inbox>,
}

impl InboxAdapter {
    pub fn new(inbox: Rc<Inbox>) -> Self {
        Self { inbox }
    }
}

impl DismissCallbacks for InboxAdapter {
    fn can_dismiss(&self, position: usize) -> bool {
        self.inbox
            .rows
            .borrow()
            .get(position)
            .is_some_and(|row| !row.pinned)
    }

    fn on_dismiss(&self, reverse_sorted_positions: &[usize]) {
        {
            let mut rows = self.inbox.rows.borrow_mut();
            let mut archived = self.inbox.archived.borrow_mut();
            for &position in reverse_sorted_positions {
                if position < rows.len() {
                    archived.push(rows.remove(position).subject.clone());
                }
            }
        }
        self.inbox.relayout();
        log::info!("archived positions {reverse_sorted_positions:?}");
        print!("{}", self.inbox.render());
    }

    fn on_try_to_dismiss(&self, item: &Rc<dyn ItemView>, position: usize) {
        log::info!("row {position} (item {}) asked to be archived; kept", item.id());
    }
}
