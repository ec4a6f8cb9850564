//! Tagged union of the two unit kinds

use crate::accessor::{AccessorRegistry, Target};
use crate::error::Result;
use crate::timeline::Timeline;
use crate::tween::Tween;
use crate::unit::{Unit, UnitState};

/// A tween or a timeline, as stored in timelines and managers
pub enum AnyUnit {
    Tween(Tween),
    Timeline(Timeline),
}

macro_rules! delegate {
    ($self:ident, $unit:ident => $body:expr) => {
        match $self {
            AnyUnit::Tween($unit) => $body,
            AnyUnit::Timeline($unit) => $body,
        }
    };
}

impl AnyUnit {
    pub fn as_tween(&self) -> Option<&Tween> {
        match self {
            AnyUnit::Tween(tween) => Some(tween),
            AnyUnit::Timeline(_) => None,
        }
    }

    pub fn as_tween_mut(&mut self) -> Option<&mut Tween> {
        match self {
            AnyUnit::Tween(tween) => Some(tween),
            AnyUnit::Timeline(_) => None,
        }
    }

    pub fn as_timeline(&self) -> Option<&Timeline> {
        match self {
            AnyUnit::Timeline(timeline) => Some(timeline),
            AnyUnit::Tween(_) => None,
        }
    }

    pub fn as_timeline_mut(&mut self) -> Option<&mut Timeline> {
        match self {
            AnyUnit::Timeline(timeline) => Some(timeline),
            AnyUnit::Tween(_) => None,
        }
    }

    /// Tweens in this unit, nested ones included
    pub fn tweens_count(&self) -> usize {
        match self {
            AnyUnit::Tween(_) => 1,
            AnyUnit::Timeline(timeline) => timeline.children().iter().map(Self::tweens_count).sum(),
        }
    }

    /// Timelines in this unit, itself and nested ones included
    pub fn timelines_count(&self) -> usize {
        match self {
            AnyUnit::Tween(_) => 0,
            AnyUnit::Timeline(timeline) => {
                1 + timeline
                    .children()
                    .iter()
                    .map(Self::timelines_count)
                    .sum::<usize>()
            }
        }
    }
}

impl From<Tween> for AnyUnit {
    fn from(tween: Tween) -> Self {
        AnyUnit::Tween(tween)
    }
}

impl From<Timeline> for AnyUnit {
    fn from(timeline: Timeline) -> Self {
        AnyUnit::Timeline(timeline)
    }
}

impl Unit for AnyUnit {
    fn state(&self) -> &UnitState {
        delegate!(self, unit => unit.state())
    }

    fn state_mut(&mut self) -> &mut UnitState {
        delegate!(self, unit => unit.state_mut())
    }

    fn build(&mut self, registry: &AccessorRegistry) -> Result<()> {
        delegate!(self, unit => unit.build(registry))
    }

    fn force_start_values(&mut self) {
        delegate!(self, unit => unit.force_start_values())
    }

    fn force_end_values(&mut self) {
        delegate!(self, unit => unit.force_end_values())
    }

    fn contains_target(&self, target: &Target) -> bool {
        delegate!(self, unit => unit.contains_target(target))
    }

    fn contains_target_type(&self, target: &Target, tween_type: i32) -> bool {
        delegate!(self, unit => unit.contains_target_type(target, tween_type))
    }

    fn initialize_override(&mut self) {
        delegate!(self, unit => unit.initialize_override())
    }

    fn update_override(&mut self, step: i32, last_step: i32, is_iteration_step: bool, delta: f64) {
        delegate!(self, unit => unit.update_override(step, last_step, is_iteration_step, delta))
    }

    fn start(&mut self, registry: &AccessorRegistry) -> Result<()> {
        delegate!(self, unit => unit.start(registry))
    }

    fn update(&mut self, delta: f64) {
        delegate!(self, unit => unit.update(delta))
    }
}
