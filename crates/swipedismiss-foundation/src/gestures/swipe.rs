//! Horizontal swipe recogniser.
//!
//! [`GestureTracker`] owns at most one [`GestureSession`]. It moves the item
//! under the pointer while a swipe is in progress and decides, on release,
//! whether the item should be dismissed. It never talks to the host list or
//! starts animations itself; the listener acts on the outcomes it returns.

use super::session::{GesturePhase, GestureSession};
use crate::config::{SwipeDirection, SwipeDismissConfig};
use crate::gesture_constants::VELOCITY_UNITS_MILLIS;
use crate::host::ItemView;
use crate::input::PointerEvent;
use crate::velocity_tracker::Velocity;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No session, or the session's item is gone.
    Ignored,
    /// Still deciding between swipe, scroll and tap.
    Tracking,
    /// This move classified the gesture as a swipe. The host must stop
    /// handling the pointer.
    SwipeStarted,
    /// Swipe in progress; the move was applied to the item.
    Swiping,
    /// The session's item was detached; the session has ended.
    Detached { was_swiping: bool },
}

impl MoveOutcome {
    /// Moves are consumed only while swiping.
    pub fn consumes(&self) -> bool {
        matches!(self, MoveOutcome::SwipeStarted | MoveOutcome::Swiping)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseAction {
    /// Fly off-screen in the given direction, then collapse.
    Dismiss(SwipeDirection),
    /// Return to rest, then report `on_try_to_dismiss`.
    TryDismiss,
    /// Return to rest.
    Restore,
}

/// What to do with the item once the pointer lifts.
pub struct Release {
    /// `None` when the item was detached during the gesture.
    pub item: Option<Rc<dyn ItemView>>,
    pub position: Option<usize>,
    pub action: ReleaseAction,
    pub was_swiping: bool,
    pub item_width: f32,
    pub velocity: Velocity,
}

impl std::fmt::Debug for Release {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Release")
            .field("item", &self.item.as_ref().map(|item| item.id()))
            .field("position", &self.position)
            .field("action", &self.action)
            .field("was_swiping", &self.was_swiping)
            .field("velocity", &self.velocity)
            .finish()
    }
}

pub struct CancelledGesture {
    pub item: Option<Rc<dyn ItemView>>,
    pub was_swiping: bool,
}

#[derive(Debug, Default)]
pub struct GestureTracker {
    session: Option<GestureSession>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn phase(&self) -> GesturePhase {
        self.session
            .as_ref()
            .map_or(GesturePhase::Idle, |session| session.phase)
    }

    /// Starts a session on `item`. Ignored while another session is active.
    pub fn arm(
        &mut self,
        item: &Rc<dyn ItemView>,
        position: usize,
        item_width: f32,
        event: &PointerEvent,
    ) -> bool {
        if self.session.is_some() {
            return false;
        }
        let mut session = GestureSession::new(
            item,
            event.id,
            position,
            event.position,
            item_width.max(1.0),
        );
        session.velocity.add_movement(event.uptime_ms, event.position);
        log::debug!(
            "armed swipe on item {} at position {position} ({:.1}, {:.1})",
            item.id(),
            event.position.x,
            event.position.y
        );
        self.session = Some(session);
        true
    }

    pub fn on_move(&mut self, event: &PointerEvent, config: &SwipeDismissConfig) -> MoveOutcome {
        let Some(session) = self.session.as_mut() else {
            return MoveOutcome::Ignored;
        };
        if event.id != session.pointer {
            return MoveOutcome::Ignored;
        }
        let Some(item) = session.item.upgrade() else {
            log::debug!("item {} detached mid-gesture", session.item_id);
            let was_swiping = session.is_swiping();
            self.session = None;
            return MoveOutcome::Detached { was_swiping };
        };
        session.velocity.add_movement(event.uptime_ms, event.position);

        let delta = event.position - session.start;
        let limit = session.item_width * config.swipe_distance_ratio;
        let delta_x = config
            .swipe_mode
            .clamp_delta(delta.x)
            .max(-limit)
            .min(limit);

        let mut started = false;
        if session.phase != GesturePhase::Swiping {
            if delta_x.abs() > config.touch_slop && delta.y.abs() < delta_x.abs() / 2.0 {
                session.phase = GesturePhase::Swiping;
                session.swipe_slop_offset = config.touch_slop.copysign(delta_x);
                started = true;
                log::debug!(
                    "item {} swiping (dx {delta_x:.1}, dy {:.1})",
                    session.item_id,
                    delta.y
                );
            } else {
                session.phase = GesturePhase::Tracking;
                return MoveOutcome::Tracking;
            }
        }

        let translation = delta_x - session.swipe_slop_offset;
        let alpha = (1.0 - delta_x.abs() / session.item_width).clamp(0.0, 1.0);
        log::trace!("item {} translation {translation:.1} alpha {alpha:.2}", session.item_id);
        item.set_translation_x(translation);
        item.set_alpha(alpha);

        if started {
            MoveOutcome::SwipeStarted
        } else {
            MoveOutcome::Swiping
        }
    }

    /// Ends the session and decides the item's fate. `None` without a
    /// session, or for a pointer other than the one that armed it.
    pub fn on_up(&mut self, event: &PointerEvent, config: &SwipeDismissConfig) -> Option<Release> {
        if self.session.as_ref()?.pointer != event.id {
            return None;
        }
        let mut session = self.session.take()?;
        let was_swiping = session.is_swiping();
        let Some(item) = session.item.upgrade() else {
            log::debug!("item {} detached before release", session.item_id);
            return Some(Release {
                item: None,
                position: None,
                action: ReleaseAction::Restore,
                was_swiping,
                item_width: session.item_width,
                velocity: Velocity::ZERO,
            });
        };

        session.velocity.add_movement(event.uptime_ms, event.position);
        let velocity = session.velocity.compute_velocity(VELOCITY_UNITS_MILLIS);
        let net_delta_x = config
            .swipe_mode
            .clamp_delta(event.position.x - session.start.x);

        let direction = dismiss_direction(
            was_swiping,
            item.translation_x(),
            session.item_width,
            net_delta_x,
            velocity,
            config,
        );
        let action = match (direction, session.position) {
            (Some(direction), Some(_)) if config.commit_dismiss => ReleaseAction::Dismiss(direction),
            (Some(_), Some(_)) => ReleaseAction::TryDismiss,
            _ => ReleaseAction::Restore,
        };
        log::debug!(
            "release item {} at {:?}: {action:?} (dx {net_delta_x:.1}, v ({:.0}, {:.0}))",
            session.item_id,
            session.position,
            velocity.x,
            velocity.y
        );

        Some(Release {
            item: Some(item),
            position: session.position,
            action,
            was_swiping,
            item_width: session.item_width,
            velocity,
        })
    }

    /// Ends the session without a decision.
    pub fn on_cancel(&mut self) -> Option<CancelledGesture> {
        let session = self.session.take()?;
        log::debug!("gesture on item {} cancelled", session.item_id);
        Some(CancelledGesture {
            item: session.item.upgrade(),
            was_swiping: session.phase == GesturePhase::Swiping,
        })
    }

    /// Forgets the active session's position so its release cannot dismiss
    /// an index that no longer refers to the same row.
    pub fn invalidate_position(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.position = None;
        }
    }
}

/// Decides whether a release dismisses, and in which direction.
///
/// The distance test wins when it passes; otherwise a horizontal fling in the
/// direction of the drag dismisses. Only swipes can dismiss, and never in a
/// direction the swipe mode forbids.
pub fn dismiss_direction(
    swiping: bool,
    translation_x: f32,
    item_width: f32,
    net_delta_x: f32,
    velocity: Velocity,
    config: &SwipeDismissConfig,
) -> Option<SwipeDirection> {
    if !swiping {
        return None;
    }

    let abs_vx = velocity.x.abs();
    let direction = if (translation_x / item_width).abs() > config.dismiss_decision_distance_ratio {
        SwipeDirection::from_sign(net_delta_x)
    } else if config.min_fling_velocity() <= abs_vx
        && abs_vx <= config.max_fling_velocity
        && velocity.y.abs() < abs_vx
    {
        let fling = SwipeDirection::from_sign(velocity.x);
        let drag = SwipeDirection::from_sign(net_delta_x);
        if fling == drag {
            fling
        } else {
            None
        }
    } else {
        None
    };

    direction.filter(|direction| config.swipe_mode.allows(*direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SwipeMode;
    use crate::host::ItemId;
    use std::cell::Cell;
    use swipedismiss_graphics::Rect;

    struct Row {
        translation_x: Cell<f32>,
        alpha: Cell<f32>,
    }

    impl ItemView for Row {
        fn id(&self) -> ItemId {
            7
        }
        fn bounds(&self) -> Rect {
            Rect::new(0.0, 0.0, 400.0, 60.0)
        }
        fn extent(&self) -> f32 {
            60.0
        }
        fn set_extent(&self, _extent: f32) {}
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

    fn row() -> Rc<dyn ItemView> {
        Rc::new(Row {
            translation_x: Cell::new(0.0),
            alpha: Cell::new(1.0),
        })
    }

    fn armed(item: &Rc<dyn ItemView>) -> GestureTracker {
        let mut tracker = GestureTracker::new();
        assert!(tracker.arm(item, 3, 400.0, &PointerEvent::down(100.0, 30.0, 0)));
        tracker
    }

    #[test]
    fn small_moves_keep_tracking() {
        let item = row();
        let mut tracker = armed(&item);
        let config = SwipeDismissConfig::default();

        assert_eq!(
            tracker.on_move(&PointerEvent::moved(106.0, 31.0, 10), &config),
            MoveOutcome::Tracking
        );
        assert_eq!(tracker.phase(), GesturePhase::Tracking);
        assert_eq!(item.translation_x(), 0.0);
    }

    #[test]
    fn vertical_motion_is_not_a_swipe() {
        let item = row();
        let mut tracker = armed(&item);
        let config = SwipeDismissConfig::default();

        let outcome = tracker.on_move(&PointerEvent::moved(130.0, 60.0, 10), &config);
        assert_eq!(outcome, MoveOutcome::Tracking);
        assert!(!outcome.consumes());
    }

    #[test]
    fn slop_offset_prevents_a_jump_at_classification() {
        let item = row();
        let mut tracker = armed(&item);
        let config = SwipeDismissConfig::default();

        assert_eq!(
            tracker.on_move(&PointerEvent::moved(110.0, 30.0, 10), &config),
            MoveOutcome::SwipeStarted
        );
        assert_eq!(item.translation_x(), 2.0);
        assert_eq!(
            tracker.on_move(&PointerEvent::moved(200.0, 30.0, 20), &config),
            MoveOutcome::Swiping
        );
        assert_eq!(item.translation_x(), 92.0);
        assert!((item.alpha() - 0.75).abs() < 1e-6);

        let mut left = armed(&item);
        left.on_move(&PointerEvent::moved(80.0, 30.0, 10), &config);
        assert_eq!(item.translation_x(), -12.0);
    }

    #[test]
    fn travel_is_capped_by_swipe_distance_ratio() {
        let item = row();
        let mut tracker = armed(&item);
        let config = SwipeDismissConfig::default().with_swipe_distance_ratio(0.25);

        tracker.on_move(&PointerEvent::moved(150.0, 30.0, 10), &config);
        tracker.on_move(&PointerEvent::moved(390.0, 30.0, 20), &config);
        assert_eq!(item.translation_x(), 100.0 - 8.0);
    }

    #[test]
    fn left_only_never_classifies_a_rightward_drag() {
        let item = row();
        let mut tracker = armed(&item);
        let config = SwipeDismissConfig::default().with_swipe_mode(SwipeMode::LeftOnly);

        for (step, x) in [120.0, 200.0, 300.0].into_iter().enumerate() {
            let outcome = tracker.on_move(&PointerEvent::moved(x, 30.0, step as i64 * 10), &config);
            assert_eq!(outcome, MoveOutcome::Tracking);
        }
        let release = tracker
            .on_up(&PointerEvent::up(300.0, 30.0, 40), &config)
            .expect("session was armed");
        assert_eq!(release.action, ReleaseAction::Restore);
        assert!(!release.was_swiping);
    }

    #[test]
    fn release_without_session_is_inert() {
        let mut tracker = GestureTracker::new();
        let config = SwipeDismissConfig::default();
        assert!(tracker.on_up(&PointerEvent::up(0.0, 0.0, 0), &config).is_none());
        assert!(tracker.on_cancel().is_none());
        assert_eq!(
            tracker.on_move(&PointerEvent::moved(50.0, 0.0, 0), &config),
            MoveOutcome::Ignored
        );
    }

    #[test]
    fn second_arm_is_ignored_while_a_session_is_active() {
        let item = row();
        let mut tracker = armed(&item);
        assert!(!tracker.arm(&item, 9, 400.0, &PointerEvent::down(5.0, 5.0, 3)));
        assert_eq!(tracker.session().and_then(|s| s.position()), Some(3));
    }

    #[test]
    fn invalidated_position_turns_dismiss_into_restore() {
        let item = row();
        let mut tracker = armed(&item);
        let config = SwipeDismissConfig::default();

        tracker.on_move(&PointerEvent::moved(200.0, 30.0, 16), &config);
        tracker.on_move(&PointerEvent::moved(340.0, 30.0, 32), &config);
        tracker.invalidate_position();
        let release = tracker
            .on_up(&PointerEvent::up(340.0, 30.0, 48), &config)
            .expect("session was armed");
        assert_eq!(release.action, ReleaseAction::Restore);
        assert_eq!(release.position, None);
    }

    #[test]
    fn item_dropped_mid_gesture_ends_the_session() {
        let mut tracker = {
            let item = row();
            armed(&item)
        };
        let config = SwipeDismissConfig::default();
        assert_eq!(
            tracker.on_move(&PointerEvent::moved(200.0, 30.0, 16), &config),
            MoveOutcome::Detached { was_swiping: false }
        );
        assert!(!tracker.has_session());
    }

    #[test]
    fn release_after_detach_reports_the_swipe() {
        let config = SwipeDismissConfig::default();
        let item = row();
        let mut tracker = armed(&item);
        tracker.on_move(&PointerEvent::moved(200.0, 30.0, 16), &config);
        drop(item);

        let release = tracker
            .on_up(&PointerEvent::up(200.0, 30.0, 32), &config)
            .expect("session was armed");
        assert!(release.item.is_none());
        assert!(release.was_swiping);
        assert_eq!(release.action, ReleaseAction::Restore);
        assert!(!tracker.has_session());
    }

    #[test]
    fn other_pointers_do_not_drive_the_session() {
        let item = row();
        let mut tracker = armed(&item);
        let config = SwipeDismissConfig::default();

        let second = PointerEvent::moved(300.0, 30.0, 10).with_id(1);
        assert_eq!(tracker.on_move(&second, &config), MoveOutcome::Ignored);
        assert_eq!(item.translation_x(), 0.0);
        assert!(tracker
            .on_up(&PointerEvent::up(300.0, 30.0, 20).with_id(1), &config)
            .is_none());
        assert!(tracker.has_session());

        assert_eq!(
            tracker.on_move(&PointerEvent::moved(150.0, 30.0, 30), &config),
            MoveOutcome::SwipeStarted
        );
    }

    #[test]
    fn distance_decides_before_velocity() {
        let config = SwipeDismissConfig::default();
        let slow = Velocity { x: 0.0, y: 0.0 };
        assert_eq!(
            dismiss_direction(true, -210.0, 400.0, -218.0, slow, &config),
            Some(SwipeDirection::Left)
        );
        assert_eq!(dismiss_direction(true, 190.0, 400.0, 198.0, slow, &config), None);
        assert_eq!(dismiss_direction(false, 390.0, 400.0, 398.0, slow, &config), None);
    }

    #[test]
    fn fling_must_be_horizontal_in_range_and_agree_with_drag() {
        let config = SwipeDismissConfig::default();
        let fling = |x, y| Velocity { x, y };

        assert_eq!(
            dismiss_direction(true, 40.0, 400.0, 48.0, fling(1_500.0, 200.0), &config),
            Some(SwipeDirection::Right)
        );
        // Against the drag.
        assert_eq!(dismiss_direction(true, 40.0, 400.0, 48.0, fling(-1_500.0, 0.0), &config), None);
        // Too slow, too fast, too diagonal.
        assert_eq!(dismiss_direction(true, 40.0, 400.0, 48.0, fling(700.0, 0.0), &config), None);
        assert_eq!(dismiss_direction(true, 40.0, 400.0, 48.0, fling(9_000.0, 0.0), &config), None);
        assert_eq!(
            dismiss_direction(true, 40.0, 400.0, 48.0, fling(1_500.0, 1_500.0), &config),
            None
        );
        // No net drag means no agreed direction.
        assert_eq!(dismiss_direction(true, 0.0, 400.0, 0.0, fling(1_500.0, 0.0), &config), None);
    }

    #[test]
    fn forbidden_direction_never_dismisses() {
        let config = SwipeDismissConfig::default().with_swipe_mode(SwipeMode::RightOnly);
        assert_eq!(
            dismiss_direction(true, -300.0, 400.0, -308.0, Velocity::ZERO, &config),
            None
        );
    }
}
