//! Scripted input played against the inbox in real time.

use crate::inbox::Inbox;
use std::collections::VecDeque;
use swipedismiss_foundation::{PointerEvent, ScrollState, SwipeDismissListener};

#[derive(Clone, Debug)]
pub enum Step {
    /// Horizontal swipe across the row at `position`, released at the end.
    Swipe {
        position: usize,
        dx: f32,
        duration_ms: i64,
    },
    /// Dismiss without a gesture.
    Dismiss { position: usize },
    Scroll(ScrollState),
}

impl Step {
    pub fn swipe(position: usize, dx: f32, duration_ms: i64) -> Self {
        Step::Swipe {
            position,
            dx,
            duration_ms,
        }
    }
}

enum Action {
    Step(Step),
    Pointer(PointerEvent),
}

/// Moves sent per swipe.
const SWIPE_MOVES: i64 = 12;

pub struct Script {
    queue: VecDeque<(i64, Action)>,
}

impl Script {
    pub fn new(steps: impl IntoIterator<Item = (i64, Step)>) -> Self {
        let mut script = Self {
            queue: VecDeque::new(),
        };
        for (at_ms, step) in steps {
            script.schedule(at_ms, Action::Step(step));
        }
        script
    }

    /// The demo's default scenario.
    pub fn inbox_tour() -> Self {
        Self::new([
            // Distance, then a fling on another row while the first is
            // still collapsing: both are archived together.
            (200, Step::swipe(1, 320.0, 240)),
            (500, Step::swipe(3, -140.0, 60)),
            // Pinned.
            (1400, Step::swipe(0, 300.0, 240)),
            // Too short and too slow.
            (1900, Step::swipe(1, 90.0, 600)),
            (2800, Step::Dismiss { position: 2 }),
            // Ignored while the list is being dragged.
            (3400, Step::Scroll(ScrollState::TouchScroll)),
            (3450, Step::swipe(1, 300.0, 240)),
            (3800, Step::Scroll(ScrollState::Idle)),
        ])
    }

    fn schedule(&mut self, at_ms: i64, action: Action) {
        let index = self.queue.partition_point(|(time, _)| *time <= at_ms);
        self.queue.insert(index, (at_ms, action));
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Runs every action due at `now_ms`.
    pub fn run_due(&mut self, now_ms: i64, inbox: &Inbox, listener: &SwipeDismissListener) {
        while self.queue.front().is_some_and(|(time, _)| *time <= now_ms) {
            let Some((at_ms, action)) = self.queue.pop_front() else {
                break;
            };
            match action {
                Action::Pointer(event) => {
                    listener.on_pointer_event(&event);
                }
                Action::Step(step) => self.run_step(at_ms, step, inbox, listener),
            }
        }
    }

    fn run_step(
        &mut self,
        at_ms: i64,
        step: Step,
        inbox: &Inbox,
        listener: &SwipeDismissListener,
    ) {
        log::info!("t={at_ms}ms {step:?}");
        match step {
            Step::Swipe {
                position,
                dx,
                duration_ms,
            } => {
                let Some(row) = inbox.row(position) else {
                    log::warn!("no row at position {position}");
                    return;
                };
                let bounds = row.bounds();
                let x = bounds.x + bounds.width / 2.0;
                let y = bounds.y + bounds.height / 2.0;
                self.schedule(at_ms, Action::Pointer(PointerEvent::down(x, y, at_ms)));
                for n in 1..=SWIPE_MOVES {
                    let time = at_ms + duration_ms * n / SWIPE_MOVES;
                    let moved_x = x + dx * n as f32 / SWIPE_MOVES as f32;
                    self.schedule(time, Action::Pointer(PointerEvent::moved(moved_x, y, time)));
                }
                let end = at_ms + duration_ms;
                self.schedule(end, Action::Pointer(PointerEvent::up(x + dx, y, end)));
            }
            Step::Dismiss { position } => match inbox.row(position) {
                Some(row) => listener.dismiss(&row, position),
                None => log::warn!("no row at position {position}"),
            },
            Step::Scroll(state) => listener.on_scroll_state_changed(state),
        }
    }
}
