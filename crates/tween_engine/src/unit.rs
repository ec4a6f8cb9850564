//! Shared timing state machine for tweens and timelines
//!
//! Time is a signed walk over `step`:
//!
//! - even steps are iterations, odd steps are the gaps between them
//! - `-2` means the initial delay hasn't elapsed yet
//! - `-1` is before the first iteration, `repeat_count * 2 + 1` after the last
//!
//! Each `update` consumes its delta one boundary at a time, so a single large
//! delta fires exactly the same callbacks as many small ones. Boundaries are
//! crossed when they are reached in the direction of travel; a zero delta
//! crosses nothing.

use std::fmt;

use crate::accessor::{AccessorRegistry, Target};
use crate::callback::{TweenCallback, TweenEvent};
use crate::error::{Result, TweenError};

/// Largest finite repeat count, so the last step `count * 2 + 1` fits in an `i32`
pub const MAX_REPEAT_COUNT: i32 = (i32::MAX - 1) / 2;

/// Timing state shared by every unit
pub struct UnitState {
    pub(crate) delay: f64,
    pub(crate) duration: f64,
    pub(crate) repeat_count: i32,
    pub(crate) repeat_delay: f64,
    pub(crate) is_yoyo: bool,

    pub(crate) step: i32,
    pub(crate) current_time: f64,
    pub(crate) is_iteration_step: bool,

    pub(crate) is_started: bool,
    pub(crate) is_initialized: bool,
    pub(crate) is_finished: bool,
    pub(crate) is_killed: bool,
    pub(crate) is_paused: bool,

    pub(crate) callback: Option<TweenCallback>,
    pub(crate) callback_triggers: TweenEvent,
    pub(crate) auto_remove: bool,
    pub(crate) auto_start: bool,
}

impl UnitState {
    pub fn new() -> Self {
        Self {
            delay: 0.0,
            duration: 0.0,
            repeat_count: 0,
            repeat_delay: 0.0,
            is_yoyo: false,
            step: -2,
            current_time: 0.0,
            is_iteration_step: false,
            is_started: false,
            is_initialized: false,
            is_finished: false,
            is_killed: false,
            is_paused: false,
            callback: None,
            callback_triggers: TweenEvent::COMPLETE,
            auto_remove: true,
            auto_start: true,
        }
    }

    /// Back to a freshly constructed state, dropping the callback
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub(crate) fn start(&mut self) -> Result<()> {
        if self.repeat_count < 0 && self.duration + self.repeat_delay <= 0.0 {
            return Err(TweenError::ZeroLengthInfiniteLoop);
        }
        self.current_time = -self.delay;
        self.step = -2;
        self.is_iteration_step = false;
        self.is_initialized = false;
        self.is_finished = false;
        self.is_started = true;
        Ok(())
    }

    pub(crate) fn set_repeat(&mut self, count: i32, delay: f64, yoyo: bool) -> Result<()> {
        if self.is_started {
            return Err(TweenError::AlreadyStarted);
        }
        if count > MAX_REPEAT_COUNT {
            return Err(TweenError::RepeatCountTooLarge {
                count,
                max: MAX_REPEAT_COUNT,
            });
        }
        // Every negative count means forever
        self.repeat_count = count.max(-1);
        self.repeat_delay = delay.max(0.0);
        self.is_yoyo = yoyo;
        Ok(())
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Duration of a single iteration
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Number of repetitions, `-1` for infinite
    pub fn repeat_count(&self) -> i32 {
        self.repeat_count
    }

    pub fn repeat_delay(&self) -> f64 {
        self.repeat_delay
    }

    /// Delay, every iteration and every repeat delay. `None` when repeated forever.
    pub fn full_duration(&self) -> Option<f64> {
        if self.repeat_count < 0 {
            return None;
        }
        Some(
            self.delay
                + self.duration
                + (self.repeat_delay + self.duration) * self.repeat_count as f64,
        )
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    /// Local time inside the current step, negative while delayed
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn is_iteration_step(&self) -> bool {
        self.is_iteration_step
    }

    pub fn is_started(&self) -> bool {
        self.is_started
    }

    pub fn is_initialized(&self) -> bool {
        self.is_initialized
    }

    /// Finished or killed
    pub fn is_finished(&self) -> bool {
        self.is_finished || self.is_killed
    }

    pub fn is_killed(&self) -> bool {
        self.is_killed
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_yoyo(&self) -> bool {
        self.is_yoyo
    }

    pub fn callback_triggers(&self) -> TweenEvent {
        self.callback_triggers
    }

    pub fn is_auto_remove_enabled(&self) -> bool {
        self.auto_remove
    }

    pub fn is_auto_start_enabled(&self) -> bool {
        self.auto_start
    }

    /// Whether `step` plays backward because of yoyo
    pub fn is_reverse(&self, step: i32) -> bool {
        self.is_yoyo && (step % 4).abs() == 2
    }

    fn is_valid(&self, step: i32) -> bool {
        (step >= 0 && step <= self.repeat_count * 2) || self.repeat_count < 0
    }

    fn fire(&mut self, event: TweenEvent) {
        tracing::trace!(?event, step = self.step, "tween event");
        if !self.callback_triggers.contains(event) {
            return;
        }
        if let Some(callback) = self.callback.as_mut() {
            callback(event);
        }
    }
}

impl Default for UnitState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitState")
            .field("delay", &self.delay)
            .field("duration", &self.duration)
            .field("repeat_count", &self.repeat_count)
            .field("repeat_delay", &self.repeat_delay)
            .field("is_yoyo", &self.is_yoyo)
            .field("step", &self.step)
            .field("current_time", &self.current_time)
            .field("is_iteration_step", &self.is_iteration_step)
            .field("is_started", &self.is_started)
            .field("is_initialized", &self.is_initialized)
            .field("is_finished", &self.is_finished)
            .field("is_killed", &self.is_killed)
            .field("is_paused", &self.is_paused)
            .field("has_callback", &self.callback.is_some())
            .field("callback_triggers", &self.callback_triggers)
            .finish()
    }
}

// ============================================================================
// Unit trait
// ============================================================================

/// A tween or a timeline: anything driven by the step state machine
pub trait Unit {
    fn state(&self) -> &UnitState;
    fn state_mut(&mut self) -> &mut UnitState;

    /// Compute derived data before playback. Must be idempotent.
    fn build(&mut self, registry: &AccessorRegistry) -> Result<()>;

    /// Snap to the values held at the start of an iteration
    fn force_start_values(&mut self);

    /// Snap to the values held at the end of an iteration
    fn force_end_values(&mut self);

    fn contains_target(&self, target: &Target) -> bool;
    fn contains_target_type(&self, target: &Target, tween_type: i32) -> bool;

    /// Called once, when the initial delay has elapsed
    fn initialize_override(&mut self) {}

    /// Called with the local delta applied to `step`, once the engine knows where it lands
    fn update_override(&mut self, step: i32, last_step: i32, is_iteration_step: bool, delta: f64) {
        let _ = (step, last_step, is_iteration_step, delta);
    }

    /// Build, then reset the clock and mark the unit started
    fn start(&mut self, registry: &AccessorRegistry) -> Result<()> {
        self.build(registry)?;
        self.state_mut().start()
    }

    /// Advance by `delta` seconds, negative to play backward
    fn update(&mut self, delta: f64) {
        advance(self, delta);
    }

    fn kill(&mut self) {
        self.state_mut().is_killed = true;
    }

    fn pause(&mut self) {
        self.state_mut().is_paused = true;
    }

    fn resume(&mut self) {
        self.state_mut().is_paused = false;
    }

    fn is_finished(&self) -> bool {
        self.state().is_finished()
    }

    /// Kill the unit if it animates `target`
    fn kill_target(&mut self, target: &Target) {
        if self.contains_target(target) {
            self.kill();
        }
    }

    fn kill_target_type(&mut self, target: &Target, tween_type: i32) {
        if self.contains_target_type(target, tween_type) {
            self.kill();
        }
    }

    /// Move to the state preceding the initial delay and snap to start values
    fn force_to_start(&mut self) {
        let reverse = {
            let state = self.state_mut();
            state.current_time = -state.delay;
            state.step = -1;
            state.is_iteration_step = false;
            state.is_reverse(0)
        };
        if reverse {
            self.force_end_values();
        } else {
            self.force_start_values();
        }
    }

    /// Move to the state after the last iteration, `time` being the parent's clock
    fn force_to_end(&mut self, time: f64) {
        let reverse = {
            let state = self.state_mut();
            let full = state.full_duration().unwrap_or(time);
            state.current_time = time - full;
            state.step = state.repeat_count * 2 + 1;
            state.is_iteration_step = false;
            state.is_reverse(state.repeat_count * 2)
        };
        if reverse {
            self.force_start_values();
        } else {
            self.force_end_values();
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Add to the initial delay
    fn delay(mut self, delay: f64) -> Self
    where
        Self: Sized,
    {
        self.state_mut().delay += delay;
        self
    }

    /// Repeat `count` more times (`-1` forever), waiting `delay` between iterations
    fn repeat(mut self, count: i32, delay: f64) -> Result<Self>
    where
        Self: Sized,
    {
        self.state_mut().set_repeat(count, delay, false)?;
        Ok(self)
    }

    /// Like `repeat`, but every other iteration plays backward
    fn repeat_yoyo(mut self, count: i32, delay: f64) -> Result<Self>
    where
        Self: Sized,
    {
        self.state_mut().set_repeat(count, delay, true)?;
        Ok(self)
    }

    fn callback(mut self, callback: impl FnMut(TweenEvent) + 'static) -> Self
    where
        Self: Sized,
    {
        self.state_mut().callback = Some(Box::new(callback));
        self
    }

    /// Events that reach the callback
    fn callback_triggers(mut self, triggers: TweenEvent) -> Self
    where
        Self: Sized,
    {
        self.state_mut().callback_triggers = triggers;
        self
    }

    /// Whether a manager drops the unit once finished
    fn auto_remove(mut self, enabled: bool) -> Self
    where
        Self: Sized,
    {
        self.state_mut().auto_remove = enabled;
        self
    }

    /// Whether a manager starts the unit when it is added
    fn auto_start(mut self, enabled: bool) -> Self
    where
        Self: Sized,
    {
        self.state_mut().auto_start = enabled;
        self
    }

    // =========================================================================
    // Mutating setters
    // =========================================================================

    fn set_repeat(&mut self, count: i32, delay: f64) -> Result<()> {
        self.state_mut().set_repeat(count, delay, false)
    }

    fn set_repeat_yoyo(&mut self, count: i32, delay: f64) -> Result<()> {
        self.state_mut().set_repeat(count, delay, true)
    }

    fn set_callback(&mut self, callback: Option<TweenCallback>) {
        self.state_mut().callback = callback;
    }

    fn set_callback_triggers(&mut self, triggers: TweenEvent) {
        self.state_mut().callback_triggers = triggers;
    }
}

// ============================================================================
// Engine
// ============================================================================

fn advance<U: Unit + ?Sized>(unit: &mut U, delta: f64) {
    {
        let state = unit.state();
        if !state.is_started || state.is_paused || state.is_killed {
            return;
        }
    }

    let mut remaining = delta;
    if !unit.state().is_initialized {
        initialize(unit, &mut remaining);
    }
    if unit.state().is_initialized {
        relaunch(unit, delta, &mut remaining);
        walk(unit, delta, &mut remaining);
        let state = unit.state_mut();
        state.is_finished = state.repeat_count >= 0
            && (state.step > state.repeat_count * 2 || state.step < 0);
    }
    unit.state_mut().current_time += remaining;
}

fn initialize<U: Unit + ?Sized>(unit: &mut U, remaining: &mut f64) {
    if unit.state().current_time + *remaining < 0.0 {
        return;
    }
    unit.initialize_override();

    let state = unit.state_mut();
    state.is_initialized = true;
    state.is_iteration_step = true;
    state.step = 0;
    *remaining += state.current_time;
    state.current_time = 0.0;
    state.fire(TweenEvent::BEGIN);
    state.fire(TweenEvent::START);
}

/// Re-enter the walk from one of the terminal gaps
fn relaunch<U: Unit + ?Sized>(unit: &mut U, delta: f64, remaining: &mut f64) {
    let state = unit.state_mut();
    if state.is_iteration_step || state.repeat_count < 0 {
        return;
    }
    let target = state.current_time + *remaining;

    if state.step < 0 && delta > 0.0 && target >= 0.0 {
        let used = -state.current_time;
        *remaining -= used;
        state.is_iteration_step = true;
        state.step = 0;
        state.current_time = 0.0;
        state.fire(TweenEvent::BEGIN);
        state.fire(TweenEvent::START);
        unit.update_override(0, -1, true, used);
    } else if state.step > state.repeat_count * 2 && delta < 0.0 && target <= 0.0 {
        let used = -state.current_time;
        *remaining -= used;
        state.is_iteration_step = true;
        state.step = state.repeat_count * 2;
        state.current_time = state.duration;
        state.fire(TweenEvent::BACK_BEGIN);
        state.fire(TweenEvent::BACK_START);
        let step = state.step;
        unit.update_override(step, step + 1, true, used);
    }
}

fn walk<U: Unit + ?Sized>(unit: &mut U, delta: f64, remaining: &mut f64) {
    let forward = delta > 0.0;
    let backward = delta < 0.0;

    while unit.state().is_valid(unit.state().step) {
        let state = unit.state_mut();
        let ct = state.current_time;
        let reach = ct + *remaining;

        if !state.is_iteration_step && backward && reach <= 0.0 {
            // Back into the previous iteration, landing on its end
            let used = -ct;
            *remaining -= used;
            state.is_iteration_step = true;
            state.step -= 1;
            state.current_time = state.duration;
            let step = state.step;
            if state.is_reverse(step) {
                unit.force_start_values();
            } else {
                unit.force_end_values();
            }
            unit.state_mut().fire(TweenEvent::BACK_START);
            unit.update_override(step, step + 1, true, used);
        } else if !state.is_iteration_step && forward && reach >= state.repeat_delay {
            // Into the next iteration, landing on its start
            let used = state.repeat_delay - ct;
            *remaining -= used;
            state.is_iteration_step = true;
            state.step += 1;
            state.current_time = 0.0;
            let step = state.step;
            if state.is_reverse(step) {
                unit.force_end_values();
            } else {
                unit.force_start_values();
            }
            unit.state_mut().fire(TweenEvent::START);
            unit.update_override(step, step - 1, true, used);
        } else if state.is_iteration_step && backward && reach <= 0.0 {
            // Out of the iteration through its start
            let used = -ct;
            *remaining -= used;
            state.is_iteration_step = false;
            state.step -= 1;
            state.current_time = 0.0;
            let step = state.step;
            unit.update_override(step, step + 1, false, used);

            let state = unit.state_mut();
            state.fire(TweenEvent::BACK_END);
            if step < 0 && state.repeat_count >= 0 {
                state.fire(TweenEvent::BACK_COMPLETE);
            } else {
                state.current_time = state.repeat_delay;
            }
        } else if state.is_iteration_step && forward && reach >= state.duration {
            // Out of the iteration through its end
            let used = state.duration - ct;
            *remaining -= used;
            state.is_iteration_step = false;
            state.step += 1;
            state.current_time = state.duration;
            let step = state.step;
            unit.update_override(step, step - 1, false, used);

            let state = unit.state_mut();
            state.fire(TweenEvent::END);
            if step > state.repeat_count * 2 && state.repeat_count >= 0 {
                state.fire(TweenEvent::COMPLETE);
            }
            state.current_time = 0.0;
        } else {
            let used = *remaining;
            *remaining = 0.0;
            state.current_time += used;
            if state.is_iteration_step {
                let step = state.step;
                unit.update_override(step, step, true, used);
            }
            break;
        }
    }
}
