//! The swipe-to-dismiss listener a host list forwards its pointer events to.
//!
//! ```ignore
//! let listener = SwipeDismissListener::new(list.clone(), callbacks, animator);
//! list.set_pointer_handler(listener.clone());
//! list.set_scroll_observer(listener.scroll_observer());
//! ```
//!
//! All state lives behind one `Rc`; animation completions hold it weakly.
//! No borrow is held across calls into the host, the callbacks or the
//! animator, so any of them may call back into the listener.

use crate::config::{ConfigError, SwipeDirection, SwipeDismissConfig, SwipeMode};
use crate::dismiss::DismissCoordinator;
use crate::gestures::{GesturePhase, GestureTracker, MoveOutcome, ReleaseAction};
use crate::host::{DismissCallbacks, HostList, ItemId, ItemView, ScrollState};
use crate::input::{PointerEvent, PointerEventKind};
use crate::presentation::{animate_presentation, Presentation};
use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use swipedismiss_animation::{AnimationHandle, Animator, ValueAnimation};

#[derive(Clone)]
pub struct SwipeDismissListener {
    shared: Rc<ListenerShared>,
}

struct ListenerShared {
    host: Rc<dyn HostList>,
    callbacks: Rc<dyn DismissCallbacks>,
    animator: Rc<dyn Animator>,
    config: RefCell<SwipeDismissConfig>,
    tracker: RefCell<GestureTracker>,
    coordinator: RefCell<DismissCoordinator>,
    /// Offset/opacity animation currently driving each item.
    presentation_animations: RefCell<FxHashMap<ItemId, AnimationHandle>>,
    paused: Cell<bool>,
    touch_listen: Cell<bool>,
}

impl SwipeDismissListener {
    pub fn new(
        host: Rc<dyn HostList>,
        callbacks: Rc<dyn DismissCallbacks>,
        animator: Rc<dyn Animator>,
    ) -> Self {
        Self {
            shared: Rc::new(ListenerShared {
                host,
                callbacks,
                animator,
                config: RefCell::new(SwipeDismissConfig::default()),
                tracker: RefCell::new(GestureTracker::new()),
                coordinator: RefCell::new(DismissCoordinator::new()),
                presentation_animations: RefCell::new(FxHashMap::default()),
                paused: Cell::new(false),
                touch_listen: Cell::new(true),
            }),
        }
    }

    pub fn with_config(self, config: SwipeDismissConfig) -> Result<Self, ConfigError> {
        self.set_config(config)?;
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn config(&self) -> SwipeDismissConfig {
        self.shared.config.borrow().clone()
    }

    /// Replaces the whole configuration. Invalid configurations are rejected
    /// and the current one is kept.
    pub fn set_config(&self, config: SwipeDismissConfig) -> Result<(), ConfigError> {
        if let Err(err) = config.validate() {
            log::warn!("rejected swipe config: {err}");
            return Err(err);
        }
        *self.shared.config.borrow_mut() = config;
        Ok(())
    }

    fn update_config(
        &self,
        update: impl FnOnce(&mut SwipeDismissConfig),
    ) -> Result<(), ConfigError> {
        let mut config = self.config();
        update(&mut config);
        self.set_config(config)
    }

    pub fn swipe_mode(&self) -> SwipeMode {
        self.shared.config.borrow().swipe_mode
    }

    pub fn set_swipe_mode(&self, mode: SwipeMode) {
        self.shared.config.borrow_mut().swipe_mode = mode;
    }

    pub fn swipe_distance_ratio(&self) -> f32 {
        self.shared.config.borrow().swipe_distance_ratio
    }

    pub fn set_swipe_distance_ratio(&self, ratio: f32) -> Result<(), ConfigError> {
        self.update_config(|config| config.swipe_distance_ratio = ratio)
    }

    pub fn dismiss_decision_distance_ratio(&self) -> f32 {
        self.shared.config.borrow().dismiss_decision_distance_ratio
    }

    pub fn set_dismiss_decision_distance_ratio(&self, ratio: f32) -> Result<(), ConfigError> {
        self.update_config(|config| config.dismiss_decision_distance_ratio = ratio)
    }

    pub fn commit_dismiss(&self) -> bool {
        self.shared.config.borrow().commit_dismiss
    }

    /// When false, qualifying swipes report `on_try_to_dismiss` and the item
    /// stays in the list.
    pub fn set_commit_dismiss(&self, commit: bool) {
        self.shared.config.borrow_mut().commit_dismiss = commit;
    }

    /// Pauses or resumes gesture recognition. Running animations are not
    /// affected.
    pub fn set_enabled(&self, enabled: bool) {
        self.shared.paused.set(!enabled);
    }

    pub fn is_enabled(&self) -> bool {
        !self.shared.paused.get()
    }

    /// When false every pointer event is passed through untouched.
    pub fn set_touch_listen(&self, listen: bool) {
        self.shared.touch_listen.set(listen);
    }

    pub fn is_touch_listen(&self) -> bool {
        self.shared.touch_listen.get()
    }

    /// Forward the host list's scroll state here; swiping is paused while
    /// the user drags the list.
    pub fn on_scroll_state_changed(&self, state: ScrollState) {
        self.shared.on_scroll_state_changed(state);
    }

    /// Scroll observer to register with the host list. Holds the listener
    /// weakly.
    pub fn scroll_observer(&self) -> impl Fn(ScrollState) + 'static {
        let shared = Rc::downgrade(&self.shared);
        move |state| {
            if let Some(shared) = shared.upgrade() {
                shared.on_scroll_state_changed(state);
            }
        }
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    pub fn gesture_phase(&self) -> GesturePhase {
        self.shared
            .tracker
            .try_borrow()
            .map_or(GesturePhase::Idle, |tracker| tracker.phase())
    }

    pub fn is_dismissing(&self, id: ItemId) -> bool {
        self.shared.coordinator.borrow().is_dismissing(id)
    }

    /// Dismiss animations that have started and not yet finished.
    pub fn dismiss_in_flight(&self) -> usize {
        self.shared.coordinator.borrow().in_flight()
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Handles one pointer event. Returns true, and marks the event
    /// consumed, when the host must not process it further.
    pub fn on_pointer_event(&self, event: &PointerEvent) -> bool {
        if !self.shared.touch_listen.get() {
            return false;
        }
        let consumed = match event.kind {
            PointerEventKind::Down => self.shared.on_down(event),
            PointerEventKind::Move => self.shared.on_move(event),
            PointerEventKind::Up => ListenerShared::on_up(&self.shared, event),
            PointerEventKind::Cancel => self.shared.on_cancel(),
        };
        if consumed {
            event.consume();
        }
        consumed
    }

    /// Animates `item` away and reports it with the current batch, exactly as
    /// a swipe would. Ignored if the item is already being dismissed.
    pub fn dismiss(&self, item: &Rc<dyn ItemView>, position: usize) {
        if !self.shared.coordinator.borrow_mut().begin(item.id()) {
            log::debug!("item {} is already being dismissed", item.id());
            return;
        }
        ListenerShared::collapse(&self.shared, Rc::clone(item), position);
    }
}

impl ListenerShared {
    fn on_scroll_state_changed(&self, state: ScrollState) {
        let paused = state == ScrollState::TouchScroll;
        if paused != self.paused.get() {
            log::debug!("swipe {} by scroll state {state:?}", if paused { "paused" } else { "resumed" });
        }
        self.paused.set(paused);
    }

    fn on_down(&self, event: &PointerEvent) -> bool {
        if self.paused.get() {
            return false;
        }
        match self.tracker.try_borrow() {
            Ok(tracker) if tracker.has_session() => return false,
            Ok(_) => {}
            Err(_) => {
                log::warn!("dropped re-entrant pointer down");
                return false;
            }
        }

        let Some(item) = self.host.hit_test(event.position) else {
            return false;
        };
        if self.coordinator.borrow().is_dismissing(item.id()) {
            return false;
        }
        let Some(position) = self.host.position_for_item(item.as_ref()) else {
            return false;
        };
        if !self.callbacks.can_dismiss(position) {
            log::trace!("position {position} is not dismissable");
            return false;
        }

        let width = self.host.width();
        if let Ok(mut tracker) = self.tracker.try_borrow_mut() {
            tracker.arm(&item, position, width, event);
        }
        false
    }

    fn on_move(&self, event: &PointerEvent) -> bool {
        if self.paused.get() {
            return false;
        }
        let (outcome, item) = {
            let Ok(mut tracker) = self.tracker.try_borrow_mut() else {
                log::warn!("dropped re-entrant pointer move");
                return false;
            };
            let config = self.config.borrow();
            let outcome = tracker.on_move(event, &config);
            (outcome, tracker.session().and_then(|session| session.item()))
        };

        match outcome {
            MoveOutcome::SwipeStarted => {
                if let Some(item) = item {
                    self.cancel_presentation_animation(item.id());
                }
                self.host.request_disallow_intercept(true);
                self.host.cancel_press_handling();
            }
            MoveOutcome::Detached { was_swiping: true } => {
                self.host.request_disallow_intercept(false);
            }
            _ => {}
        }
        outcome.consumes()
    }

    fn on_up(this: &Rc<Self>, event: &PointerEvent) -> bool {
        let release = {
            let Ok(mut tracker) = this.tracker.try_borrow_mut() else {
                log::warn!("dropped re-entrant pointer up");
                return false;
            };
            let config = this.config.borrow();
            tracker.on_up(event, &config)
        };
        let Some(release) = release else {
            return false;
        };
        if release.was_swiping {
            this.host.request_disallow_intercept(false);
        }

        let Some(item) = release.item else {
            return false;
        };
        match (release.action, release.position) {
            (ReleaseAction::Dismiss(direction), Some(position)) => {
                Self::fly_out(this, item, position, direction, release.item_width);
            }
            (ReleaseAction::TryDismiss, Some(position)) => {
                let callbacks = Rc::clone(&this.callbacks);
                let target = Rc::clone(&item);
                this.animate_to_rest(
                    &item,
                    Some(Box::new(move || callbacks.on_try_to_dismiss(&target, position))),
                );
            }
            _ => this.animate_to_rest(&item, None),
        }
        false
    }

    fn on_cancel(&self) -> bool {
        let cancelled = {
            let Ok(mut tracker) = self.tracker.try_borrow_mut() else {
                log::warn!("dropped re-entrant pointer cancel");
                return false;
            };
            tracker.on_cancel()
        };
        if let Some(cancelled) = cancelled {
            if cancelled.was_swiping {
                self.host.request_disallow_intercept(false);
                if let Some(item) = cancelled.item {
                    self.animate_to_rest(&item, None);
                }
            }
        }
        false
    }

    fn animate_to_rest(&self, item: &Rc<dyn ItemView>, on_end: Option<Box<dyn FnOnce()>>) {
        self.animate_presentation(item, Presentation::REST, on_end);
    }

    fn animate_presentation(
        &self,
        item: &Rc<dyn ItemView>,
        target: Presentation,
        on_end: Option<Box<dyn FnOnce()>>,
    ) {
        self.cancel_presentation_animation(item.id());
        let spec = self.config.borrow().animation;
        let handle = animate_presentation(self.animator.as_ref(), item, target, spec, on_end);
        if handle.is_running() {
            let mut animations = self.presentation_animations.borrow_mut();
            animations.retain(|_, handle| handle.is_running());
            animations.insert(item.id(), handle);
        }
    }

    fn cancel_presentation_animation(&self, id: ItemId) {
        let handle = self.presentation_animations.borrow_mut().remove(&id);
        if let Some(handle) = handle {
            handle.cancel();
        }
    }

    /// Slides the item off-screen, then collapses it.
    fn fly_out(
        this: &Rc<Self>,
        item: Rc<dyn ItemView>,
        position: usize,
        direction: SwipeDirection,
        width: f32,
    ) {
        if !this.coordinator.borrow_mut().begin(item.id()) {
            this.animate_to_rest(&item, None);
            return;
        }
        let target = Presentation {
            translation_x: direction.off_screen_translation(width),
            alpha: 0.0,
        };
        let weak: Weak<Self> = Rc::downgrade(this);
        let departing = Rc::clone(&item);
        this.animate_presentation(
            &item,
            target,
            Some(Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    Self::collapse(&shared, departing, position);
                }
            })),
        );
    }

    /// Shrinks the item's extent to the minimum, then releases its
    /// reference on the batch.
    fn collapse(this: &Rc<Self>, item: Rc<dyn ItemView>, position: usize) {
        let original_extent = this
            .coordinator
            .borrow_mut()
            .collapse(Rc::clone(&item), position);
        let (spec, min_extent) = {
            let config = this.config.borrow();
            (config.animation, config.min_dismissed_extent)
        };
        log::debug!(
            "collapsing item {} at position {position} from {original_extent:.1}",
            item.id()
        );

        let shrinking = Rc::downgrade(&item);
        let weak = Rc::downgrade(this);
        let animation = ValueAnimation::new(original_extent, min_extent, spec)
            .on_update(move |extent| {
                if let Some(item) = shrinking.upgrade() {
                    item.set_extent(extent);
                }
            })
            .on_end(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.finish_dismiss();
                }
            });
        this.animator.start(animation);
    }

    fn finish_dismiss(&self) {
        let batch = self.coordinator.borrow_mut().complete_one();
        let Some(batch) = batch else {
            return;
        };

        let positions = batch.positions();
        log::debug!("dismissing positions {positions:?}");
        self.callbacks.on_dismiss(&positions);

        // Indices captured before the removal no longer name the same rows.
        if let Ok(mut tracker) = self.tracker.try_borrow_mut() {
            tracker.invalidate_position();
        }

        {
            let mut animations = self.presentation_animations.borrow_mut();
            for entry in batch.iter() {
                animations.remove(&entry.item.id());
            }
        }
        batch.restore_presentation();
        self.host.dispatch_cancel();
    }
}

impl std::fmt::Debug for SwipeDismissListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeDismissListener")
            .field("enabled", &self.is_enabled())
            .field("touch_listen", &self.is_touch_listen())
            .field("phase", &self.gesture_phase())
            .field("config", &*self.shared.config.borrow())
            .finish()
    }
}
