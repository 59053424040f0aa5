//! Dismiss callbacks that record every call.

use crate::host::TestHostList;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use swipedismiss_foundation::{DismissCallbacks, ItemId, ItemView};

type CanDismissFn = Box<dyn Fn(usize) -> bool>;
type DismissHook = Box<dyn Fn(&[usize])>;

/// Records `on_dismiss` batches and `on_try_to_dismiss` calls.
///
/// When attached to a [`TestHostList`] with [`RecordingCallbacks::removing_from`]
/// the dismissed positions are removed from it, as an adapter would.
pub struct RecordingCallbacks {
    can_dismiss: RefCell<CanDismissFn>,
    batches: RefCell<Vec<Vec<usize>>>,
    tries: RefCell<Vec<(ItemId, usize)>>,
    can_dismiss_queries: Cell<usize>,
    host: RefCell<Weak<TestHostList>>,
    on_dismiss_hook: RefCell<Option<DismissHook>>,
}

impl RecordingCallbacks {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            can_dismiss: RefCell::new(Box::new(|_| true)),
            batches: RefCell::new(Vec::new()),
            tries: RefCell::new(Vec::new()),
            can_dismiss_queries: Cell::new(0),
            host: RefCell::new(Weak::new()),
            on_dismiss_hook: RefCell::new(None),
        })
    }

    pub fn set_can_dismiss(&self, predicate: impl Fn(usize) -> bool + 'static) {
        *self.can_dismiss.borrow_mut() = Box::new(predicate);
    }

    pub fn removing_from(&self, host: &Rc<TestHostList>) {
        *self.host.borrow_mut() = Rc::downgrade(host);
    }

    /// Runs after each batch has been recorded and removed from the host.
    pub fn on_each_dismiss(&self, hook: impl Fn(&[usize]) + 'static) {
        *self.on_dismiss_hook.borrow_mut() = Some(Box::new(hook));
    }

    pub fn batches(&self) -> Vec<Vec<usize>> {
        self.batches.borrow().clone()
    }

    pub fn dismissed_count(&self) -> usize {
        self.batches.borrow().iter().map(Vec::len).sum()
    }

    pub fn tries(&self) -> Vec<(ItemId, usize)> {
        self.tries.borrow().clone()
    }

    pub fn can_dismiss_queries(&self) -> usize {
        self.can_dismiss_queries.get()
    }
}

impl DismissCallbacks for RecordingCallbacks {
    fn can_dismiss(&self, position: usize) -> bool {
        self.can_dismiss_queries.set(self.can_dismiss_queries.get() + 1);
        (self.can_dismiss.borrow())(position)
    }

    fn on_dismiss(&self, reverse_sorted_positions: &[usize]) {
        log::debug!("test callbacks dismissed {reverse_sorted_positions:?}");
        self.batches.borrow_mut().push(reverse_sorted_positions.to_vec());
        let host = self.host.borrow().upgrade();
        if let Some(host) = host {
            host.remove_positions(reverse_sorted_positions);
        }
        if let Some(hook) = self.on_dismiss_hook.borrow().as_ref() {
            hook(reverse_sorted_positions);
        }
    }

    fn on_try_to_dismiss(&self, item: &Rc<dyn ItemView>, position: usize) {
        self.tries.borrow_mut().push((item.id(), position));
    }
}
