//! The animation primitive the gesture layer is written against.
//!
//! An [`Animator`] starts a [`ValueAnimation`] (a float tween with an optional
//! per-frame update and a completion notification) and hands back an
//! [`AnimationHandle`]. [`FrameAnimator`] drives animations off a
//! [`FrameClock`]; [`ImmediateAnimator`] jumps straight to the end, for hosts
//! that do not animate.

use crate::easing::{AnimationSpec, Lerp};
use crate::frame_clock::{FrameCallbackRegistration, FrameClock};
use std::cell::RefCell;
use std::rc::Rc;

type UpdateFn = Box<dyn FnMut(f32)>;
type EndFn = Box<dyn FnOnce()>;

/// A float tween from `from` to `to`.
pub struct ValueAnimation {
    pub from: f32,
    pub to: f32,
    pub spec: AnimationSpec,
    on_update: Option<UpdateFn>,
    on_end: Option<EndFn>,
}

impl ValueAnimation {
    pub fn new(from: f32, to: f32, spec: AnimationSpec) -> Self {
        Self {
            from,
            to,
            spec,
            on_update: None,
            on_end: None,
        }
    }

    /// Called every frame with the current value, including the final one.
    pub fn on_update(mut self, update: impl FnMut(f32) + 'static) -> Self {
        self.on_update = Some(Box::new(update));
        self
    }

    /// Called once after the final update. Never called if the animation is
    /// cancelled.
    pub fn on_end(mut self, end: impl FnOnce() + 'static) -> Self {
        self.on_end = Some(Box::new(end));
        self
    }

    pub fn value_at(&self, eased_progress: f32) -> f32 {
        self.from.lerp(&self.to, eased_progress)
    }

    fn into_parts(self) -> (f32, f32, AnimationSpec, Option<UpdateFn>, Option<EndFn>) {
        (self.from, self.to, self.spec, self.on_update, self.on_end)
    }
}

impl std::fmt::Debug for ValueAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueAnimation")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("spec", &self.spec)
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
    Running,
    Finished,
    Cancelled,
}

/// Control surface an [`Animator`] implementation exposes for one animation.
pub trait AnimationControl {
    fn status(&self) -> AnimationStatus;
    fn cancel(&self);
}

/// Handle to a started animation. Dropping it does not stop the animation.
#[derive(Clone)]
pub struct AnimationHandle {
    control: Option<Rc<dyn AnimationControl>>,
}

impl AnimationHandle {
    pub fn new(control: Rc<dyn AnimationControl>) -> Self {
        Self {
            control: Some(control),
        }
    }

    /// Handle for an animation that already ran to completion.
    pub fn finished() -> Self {
        Self { control: None }
    }

    pub fn status(&self) -> AnimationStatus {
        self.control
            .as_ref()
            .map_or(AnimationStatus::Finished, |control| control.status())
    }

    pub fn is_running(&self) -> bool {
        self.status() == AnimationStatus::Running
    }

    /// Stops the animation where it is. The completion notification does not
    /// fire.
    pub fn cancel(&self) {
        if let Some(control) = &self.control {
            control.cancel();
        }
    }
}

impl std::fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationHandle")
            .field("status", &self.status())
            .finish()
    }
}

/// Starts value animations.
pub trait Animator {
    fn start(&self, animation: ValueAnimation) -> AnimationHandle;
}

/// Applies the final value and completes inside [`Animator::start`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateAnimator;

impl Animator for ImmediateAnimator {
    fn start(&self, animation: ValueAnimation) -> AnimationHandle {
        let (_, to, _, on_update, on_end) = animation.into_parts();
        if let Some(mut update) = on_update {
            update(to);
        }
        if let Some(end) = on_end {
            end();
        }
        AnimationHandle::finished()
    }
}

/// Drives tweens from a [`FrameClock`]. The first frame after `start` fixes
/// the animation's start time.
#[derive(Clone, Debug)]
pub struct FrameAnimator {
    clock: FrameClock,
}

impl FrameAnimator {
    pub fn new(clock: FrameClock) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

impl Animator for FrameAnimator {
    fn start(&self, animation: ValueAnimation) -> AnimationHandle {
        log::trace!("starting {animation:?}");
        let (from, to, spec, on_update, on_end) = animation.into_parts();
        let running = Rc::new(RefCell::new(RunningAnimation {
            from,
            to,
            spec,
            on_update,
            on_end,
            start_time_nanos: None,
            registration: None,
            status: AnimationStatus::Running,
        }));
        RunningAnimation::schedule_frame(&running, &self.clock);
        AnimationHandle::new(running)
    }
}

struct RunningAnimation {
    from: f32,
    to: f32,
    spec: AnimationSpec,
    on_update: Option<UpdateFn>,
    on_end: Option<EndFn>,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    status: AnimationStatus,
}

impl RunningAnimation {
    fn schedule_frame(this: &Rc<RefCell<RunningAnimation>>, clock: &FrameClock) {
        let strong = Rc::clone(this);
        let next_clock = clock.clone();
        let registration = clock.with_frame_nanos(move |time| {
            Self::on_frame(&strong, &next_clock, time);
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(
        this: &Rc<RefCell<RunningAnimation>>,
        clock: &FrameClock,
        frame_time_nanos: u64,
    ) {
        let (value, done, mut update) = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            if inner.status != AnimationStatus::Running {
                return;
            }
            let start = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let (progress, done) = inner
                .spec
                .progress_at(frame_time_nanos.saturating_sub(start));
            let value = if done {
                inner.to
            } else {
                inner.from.lerp(&inner.to, progress)
            };
            (value, done, inner.on_update.take())
        };

        // Callbacks run unborrowed so they may cancel or start animations.
        if let Some(update) = update.as_mut() {
            update(value);
        }

        let end = {
            let mut inner = this.borrow_mut();
            if inner.status != AnimationStatus::Running {
                return;
            }
            if !done {
                inner.on_update = update;
                None
            } else {
                inner.status = AnimationStatus::Finished;
                inner.on_end.take()
            }
        };

        if !done {
            Self::schedule_frame(this, clock);
        } else if let Some(end) = end {
            end();
        }
    }
}

impl AnimationControl for RefCell<RunningAnimation> {
    fn status(&self) -> AnimationStatus {
        self.borrow().status
    }

    fn cancel(&self) {
        let (registration, update, end) = {
            let mut inner = self.borrow_mut();
            if inner.status != AnimationStatus::Running {
                return;
            }
            inner.status = AnimationStatus::Cancelled;
            (
                inner.registration.take(),
                inner.on_update.take(),
                inner.on_end.take(),
            )
        };
        // Dropped outside the borrow: the closures may own handles to us.
        drop((registration, update, end));
    }
}

#[cfg(test)]
#[path = "tests/animator_tests.rs"]
mod tests;
