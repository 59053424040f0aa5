//! Pointer-driven swipe behaviour against a fake list.

use swipedismiss_foundation::{
    GesturePhase, ItemView, PointerEvent, ScrollState, SwipeDismissConfig, SwipeMode,
};
use swipedismiss_graphics::Point;
use swipedismiss_testing::SwipeHarness;

#[test]
fn long_swipe_dismisses_the_row() {
    let harness = SwipeHarness::new(5);
    let row = harness.host.item(2);

    harness.swipe_row(2, 300.0, 1000);
    harness.robot.wait_for_idle();

    assert_eq!(harness.callbacks.batches(), vec![vec![2]]);
    assert_eq!(harness.host.len(), 4);
    assert!(!harness.host.labels().contains(&"row 2".to_string()));
    // Recycled views come back at rest with their own extent.
    assert!(row.is_at_rest());
    assert_eq!(row.extent(), SwipeHarness::ROW_HEIGHT);
}

#[test]
fn short_slow_swipe_returns_to_rest() {
    let harness = SwipeHarness::new(3);

    harness.swipe_row(1, 150.0, 1000);
    assert!(harness.host.item(1).translation_x() > 0.0);
    harness.robot.wait_for_idle();

    assert!(harness.callbacks.batches().is_empty());
    assert!(harness.host.item(1).is_at_rest());
    assert_eq!(harness.host.len(), 3);
}

#[test]
fn fast_short_fling_dismisses_in_its_direction() {
    let harness = SwipeHarness::new(3);
    let row = harness.host.item(0);

    harness.swipe_row(0, -120.0, 60);
    // Flying out to the left before collapsing.
    harness.robot.advance_time(100);
    assert!(row.translation_x() < -120.0);

    harness.robot.wait_for_idle();
    assert_eq!(harness.callbacks.batches(), vec![vec![0]]);
}

#[test]
fn fling_against_the_drag_direction_restores() {
    let harness = SwipeHarness::new(3);
    let robot = &harness.robot;
    let start = harness.row_center(1);

    robot.drag(start, Point::new(start.x + 120.0, start.y), 10, 500);
    for x in [110.0, 100.0, 90.0] {
        robot.advance_time(8);
        robot.move_to(Point::new(start.x + x, start.y));
    }
    robot.release(Point::new(start.x + 90.0, start.y));
    robot.wait_for_idle();

    assert!(harness.callbacks.batches().is_empty());
    assert!(harness.host.item(1).is_at_rest());
}

#[test]
fn moves_are_consumed_only_once_swiping() {
    let harness = SwipeHarness::new(2);
    let robot = &harness.robot;
    let start = harness.row_center(0);

    robot.press(start);
    robot.advance_time(10);
    let tracking = PointerEvent::moved(start.x + 4.0, start.y, robot.now_ms());
    assert!(!robot.send(&tracking));
    assert!(!tracking.is_consumed());
    assert_eq!(harness.listener().gesture_phase(), GesturePhase::Tracking);

    robot.advance_time(10);
    let swiping = PointerEvent::moved(start.x + 40.0, start.y, robot.now_ms());
    assert!(robot.send(&swiping));
    assert!(swiping.is_consumed());
    assert_eq!(harness.listener().gesture_phase(), GesturePhase::Swiping);
    assert!(harness.host.is_intercept_disallowed());
    assert_eq!(harness.host.press_cancels(), 1);

    // Content follows the finger, less the slop.
    let row = harness.host.item(0);
    assert_eq!(row.translation_x(), 40.0 - 8.0);
    assert_eq!(row.alpha(), 1.0 - 40.0 / SwipeHarness::WIDTH);

    robot.advance_time(200);
    robot.release(Point::new(start.x + 40.0, start.y));
    assert!(!harness.host.is_intercept_disallowed());
}

#[test]
fn vertical_drag_is_left_to_the_list() {
    let harness = SwipeHarness::new(4);
    let start = harness.row_center(0);

    let consumed = harness
        .robot
        .swipe(start, Point::new(start.x + 20.0, start.y + 200.0), 10, 200);
    harness.robot.wait_for_idle();

    assert_eq!(consumed, 0);
    assert_eq!(harness.host.press_cancels(), 0);
    assert!(harness.host.item(0).is_at_rest());
    assert!(harness.callbacks.batches().is_empty());
}

#[test]
fn travel_is_capped_by_swipe_distance_ratio() {
    let harness = SwipeHarness::new(2);
    harness
        .listener()
        .set_swipe_distance_ratio(0.25)
        .expect("ratio in range");
    let start = harness.row_center(0);

    harness
        .robot
        .drag(start, Point::new(start.x + 300.0, start.y), 10, 1000);

    assert_eq!(harness.host.item(0).translation_x(), 100.0 - 8.0);
}

#[test]
fn left_only_ignores_rightward_swipes() {
    let config = SwipeDismissConfig::default().with_swipe_mode(SwipeMode::LeftOnly);
    let harness = SwipeHarness::new(3).with_config(config).expect("valid config");

    let consumed = harness.swipe_row(0, 300.0, 500);
    harness.robot.wait_for_idle();
    assert_eq!(consumed, 0);
    assert!(harness.host.item(0).is_at_rest());
    assert!(harness.callbacks.batches().is_empty());

    harness.swipe_row(0, -300.0, 500);
    harness.robot.wait_for_idle();
    assert_eq!(harness.callbacks.batches(), vec![vec![0]]);
}

#[test]
fn undismissable_rows_never_arm() {
    let harness = SwipeHarness::new(3);
    harness.callbacks.set_can_dismiss(|position| position != 1);

    let consumed = harness.swipe_row(1, 300.0, 500);
    harness.robot.wait_for_idle();

    assert_eq!(consumed, 0);
    assert_eq!(harness.listener().gesture_phase(), GesturePhase::Idle);
    assert!(harness.callbacks.batches().is_empty());
}

#[test]
fn press_outside_any_row_is_ignored() {
    let harness = SwipeHarness::new(2);
    let below = Point::new(200.0, SwipeHarness::ROW_HEIGHT * 5.0);

    assert!(!harness.robot.press(below));
    assert_eq!(harness.listener().gesture_phase(), GesturePhase::Idle);
    assert_eq!(harness.callbacks.can_dismiss_queries(), 0);
}

#[test]
fn cancel_restores_and_is_idempotent() {
    let harness = SwipeHarness::new(2);
    let start = harness.row_center(0);
    harness
        .robot
        .drag(start, Point::new(start.x + 100.0, start.y), 5, 100);
    assert!(harness.host.is_intercept_disallowed());

    assert!(!harness.robot.cancel());
    assert!(!harness.host.is_intercept_disallowed());
    assert_eq!(harness.listener().gesture_phase(), GesturePhase::Idle);
    assert!(!harness.robot.cancel());

    harness.robot.wait_for_idle();
    assert!(harness.host.item(0).is_at_rest());
    assert!(harness.callbacks.batches().is_empty());
}

#[test]
fn commit_disabled_reports_a_try_once() {
    let harness = SwipeHarness::new(3);
    harness.listener().set_commit_dismiss(false);
    let id = harness.host.item(1).id();

    harness.swipe_row(1, 300.0, 500);
    harness.robot.wait_for_idle();

    assert_eq!(harness.callbacks.tries(), vec![(id, 1)]);
    assert!(harness.callbacks.batches().is_empty());
    assert!(harness.host.item(1).is_at_rest());
    assert_eq!(harness.host.len(), 3);
}

#[test]
fn touch_scroll_pauses_new_gestures() {
    let harness = SwipeHarness::new(3);
    let observer = harness.listener().scroll_observer();

    observer(ScrollState::TouchScroll);
    assert!(!harness.listener().is_enabled());
    assert_eq!(harness.swipe_row(0, 300.0, 500), 0);
    harness.robot.wait_for_idle();
    assert!(harness.callbacks.batches().is_empty());

    observer(ScrollState::Fling);
    assert!(harness.listener().is_enabled());
    harness.swipe_row(0, 300.0, 500);
    harness.robot.wait_for_idle();
    assert_eq!(harness.callbacks.batches(), vec![vec![0]]);
}

#[test]
fn release_is_honoured_while_paused() {
    let harness = SwipeHarness::new(3);
    let start = harness.row_center(2);
    harness
        .robot
        .drag(start, Point::new(start.x + 300.0, start.y), 10, 500);

    harness.listener().set_enabled(false);
    harness.robot.release(Point::new(start.x + 300.0, start.y));
    harness.robot.wait_for_idle();

    assert_eq!(harness.callbacks.batches(), vec![vec![2]]);
}

#[test]
fn touch_listen_off_passes_everything_through() {
    let harness = SwipeHarness::new(2);
    harness.listener().set_touch_listen(false);

    assert_eq!(harness.swipe_row(0, 300.0, 500), 0);
    harness.robot.wait_for_idle();

    assert_eq!(harness.callbacks.can_dismiss_queries(), 0);
    assert!(harness.host.item(0).is_at_rest());
    assert!(harness.callbacks.batches().is_empty());
}

#[test]
fn new_swipe_takes_over_a_settling_row() {
    let harness = SwipeHarness::new(2);
    let start = harness.row_center(0);

    harness.swipe_row(0, 100.0, 500);
    harness.robot.advance_time(32);
    let settling = harness.host.item(0).translation_x();
    assert!(settling > 0.0 && settling < 92.0);

    harness
        .robot
        .drag(start, Point::new(start.x - 60.0, start.y), 3, 30);
    let translation = harness.host.item(0).translation_x();
    assert_eq!(translation, -60.0 + 8.0);

    // The cancelled settle animation no longer writes to the row.
    harness.robot.advance_time(300);
    assert_eq!(harness.host.item(0).translation_x(), translation);
}

#[test]
fn invalid_ratio_is_rejected_and_old_value_kept() {
    let harness = SwipeHarness::new(1);
    let listener = harness.listener();

    assert!(listener.set_swipe_distance_ratio(1.5).is_err());
    assert_eq!(listener.swipe_distance_ratio(), 1.0);
    assert!(listener.set_dismiss_decision_distance_ratio(-0.1).is_err());
    assert_eq!(listener.dismiss_decision_distance_ratio(), 0.5);

    let inverted = SwipeDismissConfig::default().with_fling_velocities(50.0, 16.0, 100.0);
    assert!(listener.set_config(inverted).is_err());
    assert_eq!(listener.config(), SwipeDismissConfig::default());
}

#[test]
fn detached_row_releases_the_intercept_lock_on_lift() {
    let harness = SwipeHarness::new(3);
    let start = harness.row_center(0);
    harness
        .robot
        .drag(start, Point::new(start.x + 100.0, start.y), 5, 100);
    assert!(harness.host.is_intercept_disallowed());

    harness.host.remove_positions(&[0]);
    assert!(!harness.robot.release(Point::new(start.x + 100.0, start.y)));

    assert_eq!(harness.listener().gesture_phase(), GesturePhase::Idle);
    assert!(!harness.host.is_intercept_disallowed());
    harness.robot.wait_for_idle();
    assert!(harness.callbacks.batches().is_empty());
}

#[test]
fn detached_row_releases_the_intercept_lock_on_move() {
    let harness = SwipeHarness::new(3);
    let start = harness.row_center(1);
    harness
        .robot
        .drag(start, Point::new(start.x - 100.0, start.y), 5, 100);
    assert!(harness.host.is_intercept_disallowed());

    harness.host.remove_positions(&[1]);
    harness.robot.advance_time(10);
    assert!(!harness.robot.move_to(Point::new(start.x - 120.0, start.y)));

    assert_eq!(harness.listener().gesture_phase(), GesturePhase::Idle);
    assert!(!harness.host.is_intercept_disallowed());
}

#[test]
fn second_pointer_cannot_steer_or_release_the_swipe() {
    let harness = SwipeHarness::new(3);
    let robot = &harness.robot;
    let start = harness.row_center(0);
    robot.drag(start, Point::new(start.x + 60.0, start.y), 3, 30);
    let translation = harness.host.item(0).translation_x();

    let other = harness.row_center(2);
    assert!(!robot.send(&PointerEvent::down(other.x, other.y, robot.now_ms()).with_id(1)));
    robot.advance_time(10);
    let stray = PointerEvent::moved(other.x + 200.0, other.y, robot.now_ms()).with_id(1);
    assert!(!robot.send(&stray));
    assert!(!robot.send(&PointerEvent::up(other.x + 200.0, other.y, robot.now_ms()).with_id(1)));

    assert_eq!(harness.host.item(0).translation_x(), translation);
    assert_eq!(harness.listener().gesture_phase(), GesturePhase::Swiping);
    assert!(harness.host.item(2).is_at_rest());

    robot.release(Point::new(start.x + 60.0, start.y));
    assert_eq!(harness.listener().gesture_phase(), GesturePhase::Idle);
}
