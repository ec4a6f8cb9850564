//! Integration tests for the step state machine driving tweens
//!
//! These tests verify that:
//! - Every boundary fires its callback exactly once, whatever the delta size
//! - Splitting a delta never changes the outcome
//! - Backward updates retrace forward ones
//! - The finished flag always matches the step counter

mod common;

use common::*;
use pretty_assertions::assert_eq;
use tween_engine::{EaseMode, Easing, Tween, TweenEvent, Unit};

fn linear_x(p: &std::rc::Rc<std::cell::RefCell<Point>>, duration: f64, to: f64) -> Tween {
    Tween::to(p.clone(), X, duration)
        .unwrap()
        .target(&[to])
        .ease(Easing::Linear)
}

fn events(log: &EventLog) -> Vec<TweenEvent> {
    log.borrow().iter().map(|(_, event)| *event).collect()
}

fn assert_finished_law(tween: &Tween) {
    let state = tween.state();
    if !state.is_initialized() {
        assert!(!state.is_finished());
        return;
    }
    let expected = state.repeat_count() >= 0
        && (state.step() > state.repeat_count() * 2 || state.step() < 0);
    assert_eq!(state.is_finished(), expected, "{:?}", state);
}

/// Two half updates reach the target and fire START, END and COMPLETE once
#[test]
fn test_half_steps_reach_target() {
    let log = event_log();
    let p = point(0.0, 0.0);
    let mut tween = linear_x(&p, 1.0, 10.0)
        .callback(record(&log, "tween"))
        .callback_triggers(TweenEvent::START | TweenEvent::END | TweenEvent::COMPLETE);
    tween.start(&registry()).unwrap();

    tween.update(0.5);
    assert_close(p.borrow().x, 5.0);
    tween.update(0.5);
    assert_close(p.borrow().x, 10.0);

    assert_eq!(
        events(&log),
        vec![TweenEvent::START, TweenEvent::END, TweenEvent::COMPLETE]
    );
    assert!(tween.is_finished());
}

/// A single update spanning three iterations fires all of their callbacks in order
#[test]
fn test_one_update_spans_all_repeats() {
    let log = event_log();
    let p = point(0.0, 0.0);
    let mut tween = linear_x(&p, 1.0, 10.0)
        .repeat(2, 0.0)
        .unwrap()
        .callback(record(&log, "tween"))
        .callback_triggers(TweenEvent::START | TweenEvent::END | TweenEvent::COMPLETE);
    tween.start(&registry()).unwrap();

    tween.update(3.0);

    assert_eq!(
        events(&log),
        vec![
            TweenEvent::START,
            TweenEvent::END,
            TweenEvent::START,
            TweenEvent::END,
            TweenEvent::START,
            TweenEvent::END,
            TweenEvent::COMPLETE,
        ]
    );
    assert_eq!(tween.state().step(), 5);
    assert!(tween.is_finished());
    assert_close(p.borrow().x, 10.0);
}

/// Replaying the same deltas from scratch gives identical callbacks and values
#[test]
fn test_replay_is_deterministic() {
    let run = || {
        let log = event_log();
        let p = point(1.0, -1.0);
        let mut tween = Tween::to(p.clone(), XY, 0.8)
            .unwrap()
            .target(&[4.0, 2.0])
            .ease(Easing::EaseInOutQuad)
            .delay(0.2)
            .repeat_yoyo(3, 0.1)
            .unwrap()
            .callback(record(&log, "tween"))
            .callback_triggers(TweenEvent::ANY);
        tween.start(&registry()).unwrap();
        for delta in deltas(7, 60, 0.3) {
            tween.update(delta);
        }
        let snapshot = p.borrow().clone();
        let recorded = log.borrow().clone();
        (recorded, snapshot, tween.state().step(), tween.state().current_time())
    };

    assert_eq!(run(), run());
}

/// The finished flag tracks the step counter after any sequence of updates
#[test]
fn test_finished_matches_step() {
    for seed in [1, 2, 3, 4, 5] {
        let p = point(0.0, 0.0);
        let mut tween = linear_x(&p, 0.7, 3.0)
            .delay(0.4)
            .repeat_yoyo(2, 0.3)
            .unwrap();
        tween.start(&registry()).unwrap();

        for delta in deltas(seed, 80, 0.6) {
            tween.update(delta);
            assert_finished_law(&tween);
        }
    }
}

/// One large delta lands exactly where the same time split in pieces lands
#[test]
fn test_split_deltas_match_single_delta() {
    let make = |log: &EventLog, p: &std::rc::Rc<std::cell::RefCell<Point>>| {
        let mut tween = Tween::to(p.clone(), XY, 0.9)
            .unwrap()
            .target(&[9.0, -3.0])
            .ease(Easing::back(EaseMode::InOut))
            .delay(0.35)
            .repeat_yoyo(4, 0.2)
            .unwrap()
            .callback(record(log, "tween"))
            .callback_triggers(TweenEvent::ANY);
        tween.start(&registry()).unwrap();
        tween
    };

    for seed in [11, 12, 13] {
        let pieces: Vec<f64> = deltas(seed, 12, 0.8).into_iter().map(f64::abs).collect();
        let total: f64 = pieces.iter().sum();

        let whole_log = event_log();
        let whole_point = point(0.0, 0.0);
        let mut whole = make(&whole_log, &whole_point);
        whole.update(total);

        let split_log = event_log();
        let split_point = point(0.0, 0.0);
        let mut split = make(&split_log, &split_point);
        for piece in &pieces {
            split.update(*piece);
        }

        assert_eq!(whole.state().step(), split.state().step());
        assert!((whole.state().current_time() - split.state().current_time()).abs() < 1e-9);
        assert!((whole_point.borrow().x - split_point.borrow().x).abs() < 1e-9);
        assert!((whole_point.borrow().y - split_point.borrow().y).abs() < 1e-9);
        assert_eq!(*whole_log.borrow(), *split_log.borrow());
    }
}

/// Going forward then backward by the same amount returns to the same step and time
#[test]
fn test_backward_retraces_forward() {
    let p = point(0.0, 0.0);
    let mut tween = linear_x(&p, 1.0, 10.0).repeat(3, 0.2).unwrap();
    tween.start(&registry()).unwrap();
    tween.update(0.3);
    let (step, time, x) = (tween.state().step(), tween.state().current_time(), p.borrow().x);

    for distance in [0.45, 1.1, 2.45, 3.8] {
        tween.update(distance);
        tween.update(-distance);
        assert_eq!(tween.state().step(), step);
        assert!((tween.state().current_time() - time).abs() < 1e-9);
        assert!((p.borrow().x - x).abs() < 1e-9);
    }
}

/// Rewinding past the start fires the BACK_* events and restores the start values
#[test]
fn test_rewind_fires_back_events() {
    let log = event_log();
    let p = point(2.0, 0.0);
    let mut tween = linear_x(&p, 1.0, 6.0)
        .callback(record(&log, "tween"))
        .callback_triggers(TweenEvent::ANY_BACKWARD);
    tween.start(&registry()).unwrap();

    tween.update(1.5);
    assert_close(p.borrow().x, 6.0);
    tween.update(-3.0);

    assert_eq!(
        events(&log),
        vec![
            TweenEvent::BACK_BEGIN,
            TweenEvent::BACK_START,
            TweenEvent::BACK_END,
            TweenEvent::BACK_COMPLETE,
        ]
    );
    assert_close(p.borrow().x, 2.0);
    assert_eq!(tween.state().step(), -1);
    assert!(tween.is_finished());
}

/// Infinite repeats keep cycling until killed
#[test]
fn test_infinite_repeat_until_killed() {
    let p = point(0.0, 0.0);
    let mut tween = linear_x(&p, 1.0, 10.0).repeat(-1, 0.0).unwrap();
    tween.start(&registry()).unwrap();

    tween.update(100.25);
    assert_close(p.borrow().x, 2.5);
    assert!(!tween.is_finished());
    assert_eq!(tween.state().full_duration(), None);

    tween.kill();
    tween.update(0.5);
    assert!(tween.is_finished());
    assert_close(p.borrow().x, 2.5);
}

/// Yoyo iterations interpolate backward with the easing input mirrored
#[test]
fn test_yoyo_mirrors_easing() {
    let p = point(0.0, 0.0);
    let mut tween = Tween::to(p.clone(), X, 1.0)
        .unwrap()
        .target(&[1.0])
        .ease(Easing::EaseInQuad)
        .repeat_yoyo(1, 0.0)
        .unwrap();
    tween.start(&registry()).unwrap();

    tween.update(0.25);
    assert_close(p.borrow().x, 0.0625);
    tween.update(1.0);
    assert_close(p.borrow().x, 0.5625);
}
