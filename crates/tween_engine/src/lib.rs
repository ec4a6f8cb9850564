//! Tween Engine
//!
//! Step-driven interpolation of arbitrary object attributes.
//!
//! # Features
//!
//! - **Tweens**: interpolate up to a configurable number of floats on any target
//! - **Timelines**: sequence and parallel composition, nested to any depth
//! - **Repeats and yoyo**: finite or infinite, with delays between iterations
//! - **Exact callbacks**: every boundary fires once, however large the delta
//! - **Backward playback**: negative deltas rewind units and fire BACK_* events
//! - **Pooling**: tweens and timelines are recycled through free-lists
//! - **Primitives**: [`MutableFloat`] and [`MutableInteger`] tween without an accessor
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use tween_engine::{AccessorRegistry, Easing, Tween, TweenAccessor, TweenManager};
//!
//! struct Opacity(f64);
//!
//! struct OpacityAccessor;
//!
//! impl TweenAccessor<Opacity> for OpacityAccessor {
//!     fn get_values(&self, target: &Opacity, _: i32, values: &mut [f64]) -> usize {
//!         values[0] = target.0;
//!         1
//!     }
//!
//!     fn set_values(&self, target: &mut Opacity, _: i32, values: &[f64]) {
//!         target.0 = values[0];
//!     }
//! }
//!
//! let mut registry = AccessorRegistry::new();
//! registry.register::<Opacity, _>(OpacityAccessor);
//! let mut manager = TweenManager::new(Rc::new(registry));
//!
//! let opacity = Rc::new(RefCell::new(Opacity(0.0)));
//! let tween = Tween::to(opacity.clone(), 0, 1.0)?
//!     .target(&[1.0])
//!     .ease(Easing::Linear);
//! manager.add(tween)?;
//!
//! manager.update(0.5);
//! assert_eq!(opacity.borrow().0, 0.5);
//! # Ok::<(), tween_engine::TweenError>(())
//! ```

pub mod accessor;
pub mod any_unit;
pub mod callback;
pub mod config;
pub mod error;
pub mod manager;
pub mod pool;
pub mod primitives;
pub mod timeline;
pub mod tween;
pub mod unit;

pub use accessor::{AccessorRegistry, Target, TweenAccessor, Tweenable};
pub use any_unit::AnyUnit;
pub use callback::{TweenCallback, TweenEvent};
pub use config::TweenConfig;
pub use error::{Result, TweenError};
pub use manager::{TweenManager, UnitId};
pub use pool::{Pool, Poolable, UnitPools};
pub use primitives::{MutableFloat, MutableInteger};
pub use timeline::{Timeline, TimelineMode};
pub use tween::Tween;
pub use tween_easing::{EaseMode, Easing, TweenPath};
pub use unit::{Unit, UnitState, MAX_REPEAT_COUNT};
