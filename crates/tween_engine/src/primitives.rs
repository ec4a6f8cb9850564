//! Mutable numbers usable directly as tween targets
//!
//! Both types read and write their own value, so they need no registered
//! accessor. [`AccessorRegistry::new`](crate::AccessorRegistry::new) knows
//! them already, and the tween type is ignored.

use crate::accessor::Tweenable;

/// Shared float to tween when there's no object to animate
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutableFloat {
    value: f32,
}

impl MutableFloat {
    pub fn new(value: f32) -> Self {
        Self { value }
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = value;
    }

    /// Truncated toward zero, saturating at the `i32` bounds
    pub fn int_value(&self) -> i32 {
        self.value as i32
    }

    pub fn long_value(&self) -> i64 {
        self.value as i64
    }

    pub fn float_value(&self) -> f32 {
        self.value
    }

    pub fn double_value(&self) -> f64 {
        f64::from(self.value)
    }
}

impl From<f32> for MutableFloat {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl Tweenable for MutableFloat {
    fn get_values(&self, _: i32, values: &mut [f64]) -> usize {
        values[0] = f64::from(self.value);
        1
    }

    fn set_values(&mut self, _: i32, values: &[f64]) {
        self.value = values[0] as f32;
    }
}

/// Shared integer to tween, every written value is truncated toward zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutableInteger {
    value: i32,
}

impl MutableInteger {
    pub fn new(value: i32) -> Self {
        Self { value }
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    pub fn int_value(&self) -> i32 {
        self.value
    }

    pub fn long_value(&self) -> i64 {
        i64::from(self.value)
    }

    pub fn float_value(&self) -> f32 {
        self.value as f32
    }

    pub fn double_value(&self) -> f64 {
        f64::from(self.value)
    }
}

impl From<i32> for MutableInteger {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl Tweenable for MutableInteger {
    fn get_values(&self, _: i32, values: &mut [f64]) -> usize {
        values[0] = f64::from(self.value);
        1
    }

    fn set_values(&mut self, _: i32, values: &[f64]) {
        self.value = values[0] as i32;
    }
}
