//! Free-lists for tweens and timelines
//!
//! Pooled units are owned values: acquiring moves one out of the free-list
//! and releasing moves it back, so a unit can never sit in the pool twice.

use crate::accessor::Target;
use crate::any_unit::AnyUnit;
use crate::callback::TweenEvent;
use crate::config::TweenConfig;
use crate::error::Result;
use crate::timeline::{Timeline, TimelineMode};
use crate::tween::Tween;

/// Reset hooks for pooled objects
pub trait Poolable: Default {
    /// Called when the object leaves the pool
    fn on_acquire(&mut self) {}

    /// Called when the object goes back to the pool; must clear all per-use state
    fn on_release(&mut self);
}

/// A simple free-list of reusable objects
pub struct Pool<T> {
    free: Vec<T>,
}

impl<T: Poolable> Pool<T> {
    pub fn new() -> Self {
        Self { free: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
        }
    }

    /// Take an object from the free-list, creating one if it is empty
    pub fn acquire(&mut self) -> T {
        let mut object = self.free.pop().unwrap_or_default();
        object.on_acquire();
        object
    }

    /// Return an object to the free-list
    pub fn release(&mut self, mut object: T) {
        object.on_release();
        self.free.push(object);
    }

    /// Number of idle objects
    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Pre-allocate idle objects until at least `min` are available
    pub fn ensure_capacity(&mut self, min: usize) {
        if self.free.len() < min {
            tracing::debug!(from = self.free.len(), to = min, "growing pool");
            self.free.resize_with(min, T::default);
        }
    }

    pub fn clear(&mut self) {
        self.free.clear();
    }
}

impl<T: Poolable> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Unit pools
// ============================================================================

/// Pools for both unit kinds, with factories that draw from them
pub struct UnitPools {
    tweens: Pool<Tween>,
    timelines: Pool<Timeline>,
}

impl UnitPools {
    pub fn new(config: &TweenConfig) -> Self {
        Self {
            tweens: Pool::with_capacity(config.tween_pool_capacity),
            timelines: Pool::with_capacity(config.timeline_pool_capacity),
        }
    }

    // =========================================================================
    // Tween factories
    // =========================================================================

    /// Pooled [`Tween::to`]
    pub fn to(&mut self, target: impl Into<Target>, tween_type: i32, duration: f64) -> Result<Tween> {
        self.tweens
            .acquire()
            .setup_to(target.into(), tween_type, duration)
    }

    /// Pooled [`Tween::from`]
    pub fn from(&mut self, target: impl Into<Target>, tween_type: i32, duration: f64) -> Result<Tween> {
        let tween = self.to(target, tween_type, duration)?;
        Ok(tween.as_from())
    }

    /// Pooled [`Tween::set`]
    pub fn set(&mut self, target: impl Into<Target>, tween_type: i32) -> Tween {
        self.tweens.acquire().setup_set(target.into(), tween_type)
    }

    /// Pooled [`Tween::call`]
    pub fn call(&mut self, callback: impl FnMut(TweenEvent) + 'static) -> Tween {
        self.tweens.acquire().as_call(callback)
    }

    /// Pooled [`Tween::mark`]
    pub fn mark(&mut self) -> Tween {
        self.tweens.acquire()
    }

    // =========================================================================
    // Timeline factories
    // =========================================================================

    pub fn sequence(&mut self) -> Timeline {
        self.timelines.acquire().with_mode(TimelineMode::Sequence)
    }

    pub fn parallel(&mut self) -> Timeline {
        self.timelines.acquire().with_mode(TimelineMode::Parallel)
    }

    // =========================================================================
    // Release
    // =========================================================================

    /// Return a unit to its pool. Timelines release their children first, last child first.
    pub fn free(&mut self, unit: impl Into<AnyUnit>) {
        match unit.into() {
            AnyUnit::Tween(tween) => self.tweens.release(tween),
            AnyUnit::Timeline(timeline) => self.free_timeline(timeline),
        }
    }

    fn free_timeline(&mut self, mut timeline: Timeline) {
        for child in timeline.take_children().into_iter().rev() {
            self.free(child);
        }
        self.timelines.release(timeline);
    }

    pub fn ensure_capacity(&mut self, tweens: usize, timelines: usize) {
        self.tweens.ensure_capacity(tweens);
        self.timelines.ensure_capacity(timelines);
    }

    /// Idle tweens
    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    /// Idle timelines
    pub fn timeline_count(&self) -> usize {
        self.timelines.len()
    }
}

impl Default for UnitPools {
    fn default() -> Self {
        Self::new(&TweenConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Unit;

    #[derive(Default)]
    struct Counter {
        acquired: u32,
        released: u32,
        dirty: bool,
    }

    impl Poolable for Counter {
        fn on_acquire(&mut self) {
            self.acquired += 1;
        }

        fn on_release(&mut self) {
            self.released += 1;
            self.dirty = false;
        }
    }

    #[test]
    fn test_acquire_release_hooks() {
        let mut pool: Pool<Counter> = Pool::new();
        let mut counter = pool.acquire();
        assert_eq!(counter.acquired, 1);
        counter.dirty = true;

        pool.release(counter);
        assert_eq!(pool.len(), 1);

        let counter = pool.acquire();
        assert_eq!(counter.acquired, 2);
        assert_eq!(counter.released, 1);
        assert!(!counter.dirty);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_ensure_capacity() {
        let mut pool: Pool<Counter> = Pool::with_capacity(4);
        assert_eq!(pool.len(), 0);
        pool.ensure_capacity(3);
        assert_eq!(pool.len(), 3);
        pool.ensure_capacity(1);
        assert_eq!(pool.len(), 3);
        pool.clear();
        assert!(pool.is_empty());
    }

    #[test]
    fn test_free_timeline_recursively() {
        let mut pools = UnitPools::default();
        let inner = pools.parallel().push(pools.mark()).unwrap();
        let outer = pools
            .sequence()
            .push(pools.mark())
            .unwrap()
            .push(inner)
            .unwrap()
            .push(pools.call(|_| {}))
            .unwrap();

        pools.free(outer);
        assert_eq!(pools.tween_count(), 3);
        assert_eq!(pools.timeline_count(), 2);

        let reused = pools.sequence();
        assert!(reused.children().is_empty());
        assert_eq!(pools.timeline_count(), 1);
    }

    #[test]
    fn test_reused_tween_is_clean() {
        let mut pools = UnitPools::default();
        let tween = pools.call(|_| {}).delay(1.0);
        pools.free(tween);

        let tween = pools.mark();
        assert_eq!(tween.state().delay(), 0.0);
        assert_eq!(tween.state().callback_triggers(), TweenEvent::COMPLETE);
        assert_eq!(pools.tween_count(), 0);
    }
}
