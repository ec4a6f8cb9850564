//! Integration tests for the tween manager and pooled factories

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::*;
use pretty_assertions::assert_eq;
use tween_engine::{
    AccessorRegistry, Easing, Target, TweenError, TweenEvent, TweenManager, Tweenable, Unit,
};

fn manager() -> TweenManager {
    TweenManager::new(Rc::new(registry()))
}

struct Opacity(f64);

impl Tweenable for Opacity {
    fn get_values(&self, _: i32, values: &mut [f64]) -> usize {
        values[0] = self.0;
        1
    }

    fn set_values(&mut self, _: i32, values: &[f64]) {
        self.0 = values[0];
    }
}

struct Sprite {
    position: Point,
    name: &'static str,
}

impl AsRef<Point> for Sprite {
    fn as_ref(&self) -> &Point {
        &self.position
    }
}

impl AsMut<Point> for Sprite {
    fn as_mut(&mut self) -> &mut Point {
        &mut self.position
    }
}

/// Pooled tweens are returned to the pool once finished and drawn again by the next factory call
#[test]
fn test_pooled_tweens_are_recycled() {
    let mut manager = manager();
    let p = point(0.0, 0.0);

    let tween = manager
        .pools_mut()
        .to(p.clone(), X, 1.0)
        .unwrap()
        .target(&[2.0])
        .ease(Easing::Linear);
    manager.add(tween).unwrap();
    manager.update(1.0);
    assert_close(p.borrow().x, 2.0);
    assert_eq!(manager.pools_mut().tween_count(), 0);

    manager.update(0.0);
    assert!(manager.is_empty());
    assert_eq!(manager.pools_mut().tween_count(), 1);

    let reused = manager
        .pools_mut()
        .from(p.clone(), X, 1.0)
        .unwrap()
        .target(&[0.0])
        .ease(Easing::Linear);
    assert_eq!(manager.pools_mut().tween_count(), 0);
    assert!(reused.is_from());
    assert_eq!(reused.state().step(), -2);
    assert!(!reused.state().is_started());

    manager.add(reused).unwrap();
    manager.update(0.25);
    assert_close(p.borrow().x, 0.5);
}

/// Freeing a finished timeline returns it and all of its children to the pools
#[test]
fn test_pooled_timeline_frees_children() {
    let mut manager = manager();
    let p = point(0.0, 0.0);

    let pools = manager.pools_mut();
    let first = pools.to(p.clone(), X, 1.0).unwrap().target(&[1.0]);
    let second = pools.to(p.clone(), Y, 1.0).unwrap().target(&[1.0]);
    let nested = pools.parallel().push(second).unwrap();
    let timeline = pools
        .sequence()
        .push(first)
        .unwrap()
        .push(nested)
        .unwrap()
        .push_pause(0.5)
        .unwrap();

    manager.add(timeline).unwrap();
    assert_eq!(manager.running_tweens_count(), 3);
    assert_eq!(manager.running_timelines_count(), 2);

    manager.update(3.0);
    manager.update(0.0);
    assert!(manager.is_empty());
    assert_eq!(manager.pools_mut().tween_count(), 3);
    assert_eq!(manager.pools_mut().timeline_count(), 2);
}

/// Killing a target stops every unit animating it and leaves the others running
#[test]
fn test_kill_target() {
    let mut manager = manager();
    let p = point(0.0, 0.0);
    let q = point(0.0, 0.0);
    let (p_target, q_target) = (Target::from(p.clone()), Target::from(q.clone()));

    let tween = pooled_tween(&mut manager, &p, X);
    manager.add(tween).unwrap();
    let timeline = tween_engine::Timeline::sequence()
        .push(pooled_tween(&mut manager, &q, Y))
        .unwrap();
    manager.add(timeline).unwrap();

    assert!(manager.contains_target(&p_target));
    assert!(manager.contains_target_type(&p_target, X));
    assert!(!manager.contains_target_type(&p_target, Y));
    assert!(manager.contains_target_type(&q_target, Y));

    manager.kill_target(&p_target);
    manager.update(0.5);
    assert!(!manager.contains_target(&p_target));
    assert!(manager.contains_target(&q_target));
    assert_close(p.borrow().x, 0.0);
    assert_close(q.borrow().y, 5.0);

    manager.kill_target_type(&q_target, Y);
    manager.update(0.5);
    assert!(manager.is_empty());
    assert_close(q.borrow().y, 5.0);
}

fn pooled_tween(
    manager: &mut TweenManager,
    p: &Rc<RefCell<Point>>,
    tween_type: i32,
) -> tween_engine::Tween {
    manager
        .pools_mut()
        .to(p.clone(), tween_type, 1.0)
        .unwrap()
        .target(&[10.0])
        .ease(Easing::Linear)
}

/// Callbacks of managed units fire during manager updates
#[test]
fn test_call_tween_fires_through_manager() {
    let log = event_log();
    let mut manager = manager();
    let tween = manager
        .pools_mut()
        .call(record(&log, "call"))
        .delay(1.0)
        .callback_triggers(TweenEvent::START);
    manager.add(tween).unwrap();

    manager.update(0.5);
    assert!(log.borrow().is_empty());
    manager.update(0.5);
    assert_eq!(*log.borrow(), vec![("call", TweenEvent::START)]);
}

/// Targets implementing `Tweenable` need no registered accessor
#[test]
fn test_tweenable_target() {
    let mut manager = manager();
    let opacity = Rc::new(RefCell::new(Opacity(1.0)));
    let tween = tween_engine::Tween::to(Target::tweenable(opacity.clone()), 0, 2.0)
        .unwrap()
        .target(&[0.0])
        .ease(Easing::Linear);
    manager.add(tween).unwrap();

    manager.update(0.5);
    assert_close(opacity.borrow().0, 0.75);
}

/// Targets without an accessor of their own fall back to a registered parent type
#[test]
fn test_parent_accessor_fallback() {
    let mut registry = registry();
    registry.register_parent::<Sprite, Point>();
    let mut manager = TweenManager::new(Rc::new(registry));

    let sprite = Rc::new(RefCell::new(Sprite {
        position: Point { x: 1.0, y: 1.0 },
        name: "hero",
    }));
    let tween = tween_engine::Tween::to(sprite.clone(), XY, 1.0)
        .unwrap()
        .target(&[3.0, 5.0])
        .ease(Easing::Linear);
    manager.add(tween).unwrap();

    manager.update(0.5);
    let sprite = sprite.borrow();
    assert_eq!(sprite.name, "hero");
    assert_close(sprite.position.x, 2.0);
    assert_close(sprite.position.y, 3.0);
}

/// Adding a unit whose target has no accessor fails at start
#[test]
fn test_missing_accessor_is_reported() {
    let mut manager = TweenManager::new(Rc::new(AccessorRegistry::new()));
    let tween = tween_engine::Tween::to(point(0.0, 0.0), X, 1.0)
        .unwrap()
        .target(&[1.0]);

    assert!(matches!(manager.add(tween), Err(TweenError::NoAccessor(_))));
    assert!(manager.is_empty());
}

/// Too many combined attributes are rejected when the tween is built
#[test]
fn test_combined_attributes_limit() {
    let config = tween_engine::TweenConfig::default().with_combined_attributes_limit(1);
    let mut manager = TweenManager::new(Rc::new(registry_with(config)));
    let tween = tween_engine::Tween::to(point(0.0, 0.0), XY, 1.0)
        .unwrap()
        .target(&[1.0, 1.0]);

    assert!(matches!(
        manager.add(tween),
        Err(TweenError::CombinedAttributesLimit { limit: 1, count: 2 })
    ));
}
