//! Tween engine error types

use thiserror::Error;

/// Configuration errors raised while setting up tweens and timelines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweenError {
    /// Duration passed to a factory was negative
    #[error("Duration can't be negative: {0}")]
    NegativeDuration(f64),

    /// The accessor reports more attributes than the engine can combine
    #[error("Combined attributes limit exceeded: {count} > {limit}")]
    CombinedAttributesLimit { limit: usize, count: usize },

    /// More waypoints than the configured limit
    #[error("Waypoints limit exceeded: {count} > {limit}")]
    WaypointsLimit { limit: usize, count: usize },

    /// Repeat configuration changed after `start()`
    #[error("You can't change the repetitions of a tween or timeline once it is started")]
    AlreadyStarted,

    /// Finite repeat count whose last step doesn't fit the step counter
    #[error("Repeat count {count} is too large, the maximum is {max}")]
    RepeatCountTooLarge { count: i32, max: i32 },

    /// Child pushed into a timeline that was already built
    #[error("You can't push anything to a timeline once it is started")]
    TimelineBuilt,

    /// A timeline with open nested timelines was pushed into another
    #[error("You forgot to call {0} end() call(s) on the pushed timeline")]
    UnclosedTimeline(usize),

    /// `end()` without a matching `begin_sequence()` or `begin_parallel()`
    #[error("Nothing to end")]
    NothingToEnd,

    /// Timelines can only contain units with a finite full duration
    #[error("You can't push an object with infinite repetitions in a timeline")]
    InfiniteChild,

    /// No accessor could be resolved for the target type
    #[error("No TweenAccessor was found for the target: {0}")]
    NoAccessor(&'static str),

    /// Infinite repeats with nothing to consume per cycle
    #[error("An infinitely repeated unit needs a positive duration or repeat delay")]
    ZeroLengthInfiniteLoop,
}

/// Result type for tween engine operations
pub type Result<T> = std::result::Result<T, TweenError>;
