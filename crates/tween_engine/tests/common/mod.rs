//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use tween_engine::{AccessorRegistry, TweenAccessor, TweenConfig, TweenEvent};

pub const X: i32 = 0;
pub const Y: i32 = 1;
pub const XY: i32 = 2;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub struct PointAccessor;

impl TweenAccessor<Point> for PointAccessor {
    fn get_values(&self, target: &Point, tween_type: i32, values: &mut [f64]) -> usize {
        match tween_type {
            X => {
                values[0] = target.x;
                1
            }
            Y => {
                values[0] = target.y;
                1
            }
            _ => {
                values[0] = target.x;
                values[1] = target.y;
                2
            }
        }
    }

    fn set_values(&self, target: &mut Point, tween_type: i32, values: &[f64]) {
        match tween_type {
            X => target.x = values[0],
            Y => target.y = values[0],
            _ => {
                target.x = values[0];
                target.y = values[1];
            }
        }
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn registry() -> AccessorRegistry {
    registry_with(TweenConfig::default())
}

pub fn registry_with(config: TweenConfig) -> AccessorRegistry {
    init_tracing();
    let mut registry = AccessorRegistry::with_config(config);
    registry.register::<Point, _>(PointAccessor);
    registry
}

pub fn point(x: f64, y: f64) -> Rc<RefCell<Point>> {
    Rc::new(RefCell::new(Point { x, y }))
}

pub type EventLog = Rc<RefCell<Vec<(&'static str, TweenEvent)>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Callback appending `(name, event)` to `log`
pub fn record(log: &EventLog, name: &'static str) -> impl FnMut(TweenEvent) + 'static {
    let log = log.clone();
    move |event| log.borrow_mut().push((name, event))
}

/// Deterministic pseudo-random deltas in `[-spread/2, spread)`, biased forward
pub fn deltas(seed: u64, count: usize, spread: f64) -> Vec<f64> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
            unit * spread * 1.5 - spread * 0.5
        })
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
