//! Tween Easing
//!
//! Pure numeric building blocks used by the tween engine.
//!
//! # Features
//!
//! - **Easing**: Robert Penner's equations plus CSS-style cubic bezier curves
//! - **Paths**: Linear and Catmull-Rom interpolation through waypoints
//! - **Named equations**: every built-in equation parses from and prints as `Family.MODE`

pub mod easing;
pub mod path;

pub use easing::{EaseMode, Easing, ParseEasingError};
pub use path::TweenPath;
