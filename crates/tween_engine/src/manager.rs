//! Tween manager
//!
//! Owns running units and updates them each frame. Finished units are
//! removed and returned to the pools at the beginning of the next update.

use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::accessor::{AccessorRegistry, Target};
use crate::any_unit::AnyUnit;
use crate::error::Result;
use crate::pool::UnitPools;
use crate::unit::Unit;

new_key_type! {
    /// Handle to a unit owned by a [`TweenManager`]
    pub struct UnitId;
}

/// Drives a set of tweens and timelines
pub struct TweenManager {
    units: SlotMap<UnitId, AnyUnit>,
    /// Insertion order, used to update units deterministically
    order: Vec<UnitId>,
    registry: Rc<AccessorRegistry>,
    pools: UnitPools,
    is_paused: bool,
}

impl TweenManager {
    pub fn new(registry: Rc<AccessorRegistry>) -> Self {
        let pools = UnitPools::new(registry.config());
        Self {
            units: SlotMap::with_key(),
            order: Vec::new(),
            registry,
            pools,
            is_paused: false,
        }
    }

    pub fn registry(&self) -> &AccessorRegistry {
        &self.registry
    }

    /// Factories for pooled tweens and timelines
    pub fn pools_mut(&mut self) -> &mut UnitPools {
        &mut self.pools
    }

    /// Take ownership of a unit, starting it unless auto start was disabled
    pub fn add(&mut self, unit: impl Into<AnyUnit>) -> Result<UnitId> {
        let mut unit = unit.into();
        if unit.state().is_auto_start_enabled() {
            unit.start(&self.registry)?;
        }
        let id = self.units.insert(unit);
        self.order.push(id);
        tracing::debug!(?id, units = self.units.len(), "unit added");
        Ok(id)
    }

    /// Start a unit added with auto start disabled
    pub fn start(&mut self, id: UnitId) -> Result<()> {
        match self.units.get_mut(id) {
            Some(unit) => unit.start(&self.registry),
            None => {
                tracing::warn!(?id, "start requested for unknown unit");
                Ok(())
            }
        }
    }

    pub fn get(&self, id: UnitId) -> Option<&AnyUnit> {
        self.units.get(id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut AnyUnit> {
        self.units.get_mut(id)
    }

    /// Take a unit back out of the manager without freeing it
    pub fn remove(&mut self, id: UnitId) -> Option<AnyUnit> {
        let unit = self.units.remove(id)?;
        self.order.retain(|other| *other != id);
        Some(unit)
    }

    /// Drop finished units, then advance the others by `delta` seconds
    ///
    /// Negative deltas update units in reverse insertion order.
    pub fn update(&mut self, delta: f64) {
        let units = &mut self.units;
        let pools = &mut self.pools;
        self.order.retain(|id| {
            let finished = match units.get(*id) {
                Some(unit) => unit.is_finished() && unit.state().is_auto_remove_enabled(),
                None => return false,
            };
            if finished {
                if let Some(unit) = units.remove(*id) {
                    tracing::debug!(?id, "finished unit freed");
                    pools.free(unit);
                }
            }
            !finished
        });

        if self.is_paused {
            return;
        }
        if delta >= 0.0 {
            for id in self.order.iter() {
                if let Some(unit) = self.units.get_mut(*id) {
                    unit.update(delta);
                }
            }
        } else {
            for id in self.order.iter().rev() {
                if let Some(unit) = self.units.get_mut(*id) {
                    unit.update(delta);
                }
            }
        }
    }

    pub fn kill(&mut self, id: UnitId) {
        match self.units.get_mut(id) {
            Some(unit) => unit.kill(),
            None => tracing::warn!(?id, "kill requested for unknown unit"),
        }
    }

    /// Kill every managed unit; they are freed on the next update
    pub fn kill_all(&mut self) {
        for (_, unit) in self.units.iter_mut() {
            unit.kill();
        }
    }

    /// Kill every unit animating `target`
    pub fn kill_target(&mut self, target: &Target) {
        for (_, unit) in self.units.iter_mut() {
            unit.kill_target(target);
        }
    }

    pub fn kill_target_type(&mut self, target: &Target, tween_type: i32) {
        for (_, unit) in self.units.iter_mut() {
            unit.kill_target_type(target, tween_type);
        }
    }

    pub fn contains_target(&self, target: &Target) -> bool {
        self.units.values().any(|unit| unit.contains_target(target))
    }

    pub fn contains_target_type(&self, target: &Target, tween_type: i32) -> bool {
        self.units
            .values()
            .any(|unit| unit.contains_target_type(target, tween_type))
    }

    /// Suspend updates of every managed unit
    pub fn pause(&mut self) {
        self.is_paused = true;
    }

    pub fn resume(&mut self) {
        self.is_paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Number of managed top-level units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Tweens managed, including those nested in timelines
    pub fn running_tweens_count(&self) -> usize {
        self.units.values().map(AnyUnit::tweens_count).sum()
    }

    /// Timelines managed, including nested ones
    pub fn running_timelines_count(&self) -> usize {
        self.units.values().map(AnyUnit::timelines_count).sum()
    }

    /// Iterate over managed units in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (UnitId, &AnyUnit)> {
        self.order
            .iter()
            .filter_map(|id| self.units.get(*id).map(|unit| (*id, unit)))
    }
}

impl Default for TweenManager {
    fn default() -> Self {
        Self::new(Rc::new(AccessorRegistry::new()))
    }
}
