//! Composite unit orchestrating tweens and nested timelines
//!
//! A sequence plays its children one after another by shifting each child's
//! delay by the full duration of everything before it. A parallel timeline
//! plays all of them from its own start and lasts as long as the longest.

use crate::accessor::{AccessorRegistry, Target};
use crate::any_unit::AnyUnit;
use crate::error::{Result, TweenError};
use crate::pool::Poolable;
use crate::tween::Tween;
use crate::unit::{Unit, UnitState};

/// How a timeline schedules its children
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimelineMode {
    #[default]
    Sequence,
    Parallel,
}

/// A tween container, possibly nested
pub struct Timeline {
    state: UnitState,
    mode: TimelineMode,
    children: Vec<AnyUnit>,
    /// Nested timelines opened with `begin_*` and not yet closed, innermost last
    open: Vec<Timeline>,
    is_built: bool,
}

impl Timeline {
    pub fn new(mode: TimelineMode) -> Self {
        Self {
            state: UnitState::new(),
            mode,
            children: Vec::new(),
            open: Vec::new(),
            is_built: false,
        }
    }

    /// Children play one after another
    pub fn sequence() -> Self {
        Self::new(TimelineMode::Sequence)
    }

    /// Children play together
    pub fn parallel() -> Self {
        Self::new(TimelineMode::Parallel)
    }

    pub(crate) fn with_mode(mut self, mode: TimelineMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> TimelineMode {
        self.mode
    }

    pub fn children(&self) -> &[AnyUnit] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [AnyUnit] {
        &mut self.children
    }

    pub fn is_built(&self) -> bool {
        self.is_built
    }

    pub(crate) fn take_children(&mut self) -> Vec<AnyUnit> {
        let mut children = std::mem::take(&mut self.children);
        // Unclosed nested timelines are still owned here
        while let Some(open) = self.open.pop() {
            children.push(AnyUnit::Timeline(open));
        }
        children
    }

    /// The timeline children are currently appended to
    fn current_mut(&mut self) -> &mut Timeline {
        if self.open.is_empty() {
            return self;
        }
        let innermost = self.open.len() - 1;
        &mut self.open[innermost]
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Append a tween or a closed timeline to the innermost open timeline
    pub fn push(mut self, child: impl Into<AnyUnit>) -> Result<Self> {
        self.add(child)?;
        Ok(self)
    }

    /// Append an empty tween delayed by `time`, acting as a pause in a sequence
    pub fn push_pause(self, time: f64) -> Result<Self> {
        self.push(Tween::mark().delay(time))
    }

    /// Open a nested sequence; following pushes go into it until `end()`
    pub fn begin_sequence(mut self) -> Result<Self> {
        self.begin(TimelineMode::Sequence)?;
        Ok(self)
    }

    /// Open a nested parallel timeline; following pushes go into it until `end()`
    pub fn begin_parallel(mut self) -> Result<Self> {
        self.begin(TimelineMode::Parallel)?;
        Ok(self)
    }

    /// Open `nested`, typically drawn from [`UnitPools`](crate::UnitPools), instead of a fresh timeline
    pub fn begin_timeline(mut self, nested: Timeline) -> Result<Self> {
        self.begin_nested(nested)?;
        Ok(self)
    }

    /// Close the innermost nested timeline
    pub fn end(mut self) -> Result<Self> {
        self.close()?;
        Ok(self)
    }

    // =========================================================================
    // Mutating setters
    // =========================================================================

    pub fn add(&mut self, child: impl Into<AnyUnit>) -> Result<()> {
        if self.is_built {
            return Err(TweenError::TimelineBuilt);
        }
        let child = child.into();
        if let AnyUnit::Timeline(timeline) = &child {
            if !timeline.open.is_empty() {
                return Err(TweenError::UnclosedTimeline(timeline.open.len()));
            }
        }
        self.current_mut().children.push(child);
        Ok(())
    }

    /// Open a freshly allocated nested timeline. It only joins the pools once its parent is freed.
    pub fn begin(&mut self, mode: TimelineMode) -> Result<()> {
        self.begin_nested(Timeline::new(mode))
    }

    /// Open an existing timeline, keeping the children it already has
    pub fn begin_nested(&mut self, nested: Timeline) -> Result<()> {
        if self.is_built || nested.is_built {
            return Err(TweenError::TimelineBuilt);
        }
        if !nested.open.is_empty() {
            return Err(TweenError::UnclosedTimeline(nested.open.len()));
        }
        self.open.push(nested);
        Ok(())
    }

    pub fn close(&mut self) -> Result<()> {
        let Some(nested) = self.open.pop() else {
            return Err(TweenError::NothingToEnd);
        };
        self.current_mut().children.push(AnyUnit::Timeline(nested));
        Ok(())
    }

    fn for_each_child(&mut self, forward: bool, mut f: impl FnMut(&mut AnyUnit)) {
        if forward {
            self.children.iter_mut().for_each(&mut f);
        } else {
            self.children.iter_mut().rev().for_each(&mut f);
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::sequence()
    }
}

impl Unit for Timeline {
    fn state(&self) -> &UnitState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut UnitState {
        &mut self.state
    }

    fn build(&mut self, registry: &AccessorRegistry) -> Result<()> {
        if self.is_built {
            return Ok(());
        }
        if !self.open.is_empty() {
            return Err(TweenError::UnclosedTimeline(self.open.len()));
        }

        self.state.duration = 0.0;
        let mut offset = 0.0;
        for child in self.children.iter_mut() {
            child.build(registry)?;
            let full = child
                .state()
                .full_duration()
                .ok_or(TweenError::InfiniteChild)?;
            match self.mode {
                TimelineMode::Sequence => {
                    child.state_mut().delay += offset;
                    offset += full;
                    self.state.duration = offset;
                }
                TimelineMode::Parallel => {
                    self.state.duration = self.state.duration.max(full);
                }
            }
        }

        self.is_built = true;
        tracing::debug!(
            mode = ?self.mode,
            children = self.children.len(),
            duration = self.state.duration,
            "timeline built"
        );
        Ok(())
    }

    fn start(&mut self, registry: &AccessorRegistry) -> Result<()> {
        self.build(registry)?;
        self.state.start()?;
        for child in self.children.iter_mut() {
            child.start(registry)?;
        }
        Ok(())
    }

    fn update_override(&mut self, step: i32, last_step: i32, is_iteration_step: bool, delta: f64) {
        // Leaving an iteration: push every child past its own boundary
        if !is_iteration_step {
            if step > last_step {
                let dt = if self.state.is_reverse(last_step) {
                    -delta - 1.0
                } else {
                    delta + 1.0
                };
                self.for_each_child(true, |child| child.update(dt));
            } else if step < last_step {
                let dt = if self.state.is_reverse(last_step) {
                    -delta + 1.0
                } else {
                    delta - 1.0
                };
                self.for_each_child(false, |child| child.update(dt));
            }
            return;
        }

        // Entering an iteration: the consumed delta lies outside it, children only snap
        if step > last_step {
            if self.state.is_reverse(step) {
                self.force_end_values();
            } else {
                self.force_start_values();
            }
            return;
        }
        if step < last_step {
            if self.state.is_reverse(step) {
                self.force_start_values();
            } else {
                self.force_end_values();
            }
            return;
        }

        let dt = if self.state.is_reverse(step) {
            -delta
        } else {
            delta
        };
        self.for_each_child(dt >= 0.0, |child| child.update(dt));
    }

    fn force_start_values(&mut self) {
        for child in self.children.iter_mut().rev() {
            child.force_to_start();
        }
    }

    fn force_end_values(&mut self) {
        let duration = self.state.duration;
        for child in self.children.iter_mut() {
            child.force_to_end(duration);
        }
    }

    fn contains_target(&self, target: &Target) -> bool {
        self.children.iter().any(|child| child.contains_target(target))
    }

    fn contains_target_type(&self, target: &Target, tween_type: i32) -> bool {
        self.children
            .iter()
            .any(|child| child.contains_target_type(target, tween_type))
    }
}

impl Poolable for Timeline {
    fn on_release(&mut self) {
        self.state.reset();
        self.mode = TimelineMode::Sequence;
        self.children.clear();
        self.open.clear();
        self.is_built = false;
    }
}
