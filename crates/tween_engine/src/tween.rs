//! Leaf interpolation unit
//!
//! A tween interpolates up to `combined_attributes_limit` floats of a single
//! target, optionally through waypoints, and writes them back through the
//! accessor resolved at build time.

use smallvec::SmallVec;
use tween_easing::{Easing, TweenPath};

use crate::accessor::{AccessorRegistry, BoundAccessor, Target};
use crate::callback::TweenEvent;
use crate::error::{Result, TweenError};
use crate::pool::Poolable;
use crate::unit::{Unit, UnitState};

/// Below this, a duration counts as zero
const ZERO_DURATION: f64 = 1e-11;

/// Room given to accessors when counting attributes, so an oversized count can be reported
const SCRATCH_LEN: usize = 16;

type Values = SmallVec<[f64; 4]>;

/// Interpolates attributes of one target between start and target values
pub struct Tween {
    state: UnitState,

    target: Option<Target>,
    tween_type: i32,
    easing: Easing,
    path: Option<TweenPath>,
    accessor: Option<BoundAccessor>,

    is_from: bool,
    is_relative: bool,
    combined_attrs_count: usize,

    // As given to the builders, before relative offsets and from swaps
    configured_targets: Values,
    configured_waypoints: SmallVec<[Values; 2]>,

    start_values: Values,
    target_values: Values,
    waypoints: SmallVec<[Values; 2]>,

    accessor_buffer: Values,
    path_buffer: SmallVec<[f64; 8]>,
}

impl Tween {
    pub fn new() -> Self {
        Self {
            state: UnitState::new(),
            target: None,
            tween_type: -1,
            easing: Easing::EaseInOutQuad,
            path: None,
            accessor: None,
            is_from: false,
            is_relative: false,
            combined_attrs_count: 0,
            configured_targets: SmallVec::new(),
            configured_waypoints: SmallVec::new(),
            start_values: SmallVec::new(),
            target_values: SmallVec::new(),
            waypoints: SmallVec::new(),
            accessor_buffer: SmallVec::new(),
            path_buffer: SmallVec::new(),
        }
    }

    /// Interpolate `target` from its current values to the ones given with `target()`
    pub fn to(target: impl Into<Target>, tween_type: i32, duration: f64) -> Result<Self> {
        Tween::new().setup_to(target.into(), tween_type, duration)
    }

    /// Interpolate `target` from the values given with `target()` back to its current values
    pub fn from(target: impl Into<Target>, tween_type: i32, duration: f64) -> Result<Self> {
        Ok(Tween::to(target, tween_type, duration)?.as_from())
    }

    /// Set `target` to the given values as soon as the delay elapses
    pub fn set(target: impl Into<Target>, tween_type: i32) -> Self {
        Tween::new().setup_set(target.into(), tween_type)
    }

    /// Zero-length tween that only fires `callback` on START
    pub fn call(callback: impl FnMut(TweenEvent) + 'static) -> Self {
        Tween::new().as_call(callback)
    }

    /// Empty tween, useful as a marker or a pause in a timeline
    pub fn mark() -> Self {
        Tween::new()
    }

    pub(crate) fn setup_to(mut self, target: Target, tween_type: i32, duration: f64) -> Result<Self> {
        if duration < 0.0 {
            return Err(TweenError::NegativeDuration(duration));
        }
        self.target = Some(target);
        self.tween_type = tween_type;
        self.state.duration = duration;
        self.path = Some(TweenPath::CatmullRom);
        Ok(self)
    }

    pub(crate) fn setup_set(mut self, target: Target, tween_type: i32) -> Self {
        self.target = Some(target);
        self.tween_type = tween_type;
        self
    }

    pub(crate) fn as_from(mut self) -> Self {
        self.is_from = true;
        self
    }

    pub(crate) fn as_call(self, callback: impl FnMut(TweenEvent) + 'static) -> Self {
        self.callback(callback)
            .callback_triggers(TweenEvent::START)
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Path used when waypoints are present
    pub fn path(mut self, path: TweenPath) -> Self {
        self.path = Some(path);
        self
    }

    /// Absolute target values
    pub fn target(mut self, values: &[f64]) -> Self {
        self.configured_targets = SmallVec::from_slice(values);
        self.target_values = SmallVec::from_slice(values);
        self
    }

    /// Target values relative to the start values
    pub fn target_relative(mut self, values: &[f64]) -> Self {
        self.is_relative = true;
        self.configured_targets = SmallVec::from_slice(values);
        self.target_values = values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                if self.state.is_initialized {
                    value + self.start_values.get(i).copied().unwrap_or(0.0)
                } else {
                    *value
                }
            })
            .collect();
        self
    }

    /// Intermediate point the interpolation passes through
    pub fn waypoint(mut self, values: &[f64]) -> Self {
        self.configured_waypoints.push(SmallVec::from_slice(values));
        self.waypoints.push(SmallVec::from_slice(values));
        self
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn get_target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    pub fn tween_type(&self) -> i32 {
        self.tween_type
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn target_values(&self) -> &[f64] {
        &self.target_values
    }

    pub fn start_values(&self) -> &[f64] {
        &self.start_values
    }

    /// Number of attributes driven, known after `build()`
    pub fn combined_attributes_count(&self) -> usize {
        self.combined_attrs_count
    }

    pub fn is_from(&self) -> bool {
        self.is_from
    }

    pub fn is_relative(&self) -> bool {
        self.is_relative
    }

    fn write(&self, values: &[f64]) {
        if let (Some(target), Some(accessor)) = (&self.target, &self.accessor) {
            accessor.set_values(target, self.tween_type, &values[..self.combined_attrs_count]);
        }
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::new()
    }
}

impl Unit for Tween {
    fn state(&self) -> &UnitState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut UnitState {
        &mut self.state
    }

    fn build(&mut self, registry: &AccessorRegistry) -> Result<()> {
        let Some(target) = &self.target else {
            return Ok(());
        };
        let config = registry.config();
        let limit = config.combined_attributes_limit;

        if self.configured_targets.len() > limit {
            return Err(TweenError::CombinedAttributesLimit {
                limit,
                count: self.configured_targets.len(),
            });
        }
        if self.configured_waypoints.len() > config.waypoints_limit {
            return Err(TweenError::WaypointsLimit {
                limit: config.waypoints_limit,
                count: self.configured_waypoints.len(),
            });
        }

        let accessor = registry.resolve(target)?;
        self.accessor_buffer.clear();
        self.accessor_buffer.resize(limit.max(SCRATCH_LEN), 0.0);
        let count = accessor.get_values(target, self.tween_type, &mut self.accessor_buffer);
        if count > limit {
            return Err(TweenError::CombinedAttributesLimit { limit, count });
        }

        self.combined_attrs_count = count;
        self.accessor = Some(accessor);
        self.configured_targets.resize(count, 0.0);
        for waypoint in self.configured_waypoints.iter_mut() {
            waypoint.resize(count, 0.0);
        }
        if !self.state.is_initialized {
            self.start_values.resize(count, 0.0);
            self.target_values.resize(count, 0.0);
            for waypoint in self.waypoints.iter_mut() {
                waypoint.resize(count, 0.0);
            }
        }
        Ok(())
    }

    fn initialize_override(&mut self) {
        let (Some(target), Some(accessor)) = (&self.target, &self.accessor) else {
            return;
        };
        accessor.get_values(target, self.tween_type, &mut self.start_values);

        // Resolved values start over from the configured ones on every run
        self.target_values.clone_from(&self.configured_targets);
        self.waypoints.clone_from(&self.configured_waypoints);

        for i in 0..self.combined_attrs_count {
            if self.is_relative {
                let start = self.start_values[i];
                self.target_values[i] += start;
                for waypoint in self.waypoints.iter_mut() {
                    waypoint[i] += start;
                }
            }
            if self.is_from {
                std::mem::swap(&mut self.start_values[i], &mut self.target_values[i]);
            }
        }
    }

    fn update_override(&mut self, step: i32, last_step: i32, is_iteration_step: bool, delta: f64) {
        let (Some(target), Some(accessor)) = (&self.target, &self.accessor) else {
            return;
        };
        let count = self.combined_attrs_count;
        let set = |values: &[f64]| accessor.set_values(target, self.tween_type, &values[..count]);

        // Iteration boundary crossed
        if !is_iteration_step && step > last_step {
            if self.state.is_reverse(last_step) {
                set(&self.start_values);
            } else {
                set(&self.target_values);
            }
            return;
        }
        if !is_iteration_step && step < last_step {
            if self.state.is_reverse(last_step) {
                set(&self.target_values);
            } else {
                set(&self.start_values);
            }
            return;
        }

        let duration = self.state.duration;
        let reverse = self.state.is_reverse(step);
        if duration < ZERO_DURATION {
            let forward = delta > -ZERO_DURATION;
            if forward == reverse {
                set(&self.target_values);
            } else {
                set(&self.start_values);
            }
            return;
        }

        let time = if reverse {
            duration - self.state.current_time
        } else {
            self.state.current_time
        };
        let t = self.easing.apply(time / duration);

        let mut values: SmallVec<[f64; 4]> = SmallVec::with_capacity(count);
        match self.path {
            Some(path) if !self.waypoints.is_empty() => {
                for i in 0..count {
                    self.path_buffer.clear();
                    self.path_buffer.push(self.start_values[i]);
                    self.path_buffer
                        .extend(self.waypoints.iter().map(|waypoint| waypoint[i]));
                    self.path_buffer.push(self.target_values[i]);
                    values.push(path.compute(t, &self.path_buffer));
                }
            }
            _ => {
                for i in 0..count {
                    let start = self.start_values[i];
                    values.push(start + t * (self.target_values[i] - start));
                }
            }
        }
        set(&values);
    }

    fn force_start_values(&mut self) {
        if self.state.is_initialized {
            self.write(&self.start_values);
        }
    }

    fn force_end_values(&mut self) {
        if self.state.is_initialized {
            self.write(&self.target_values);
        }
    }

    fn contains_target(&self, target: &Target) -> bool {
        self.target.as_ref() == Some(target)
    }

    fn contains_target_type(&self, target: &Target, tween_type: i32) -> bool {
        self.contains_target(target) && self.tween_type == tween_type
    }
}

impl Poolable for Tween {
    fn on_release(&mut self) {
        self.state.reset();
        self.target = None;
        self.tween_type = -1;
        self.easing = Easing::EaseInOutQuad;
        self.path = None;
        self.accessor = None;
        self.is_from = false;
        self.is_relative = false;
        self.combined_attrs_count = 0;
        self.configured_targets.clear();
        self.configured_waypoints.clear();
        self.start_values.clear();
        self.target_values.clear();
        self.waypoints.clear();
    }
}
