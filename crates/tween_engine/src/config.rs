//! Engine configuration

/// Limits and pool sizes shared by every unit built against the same registry
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TweenConfig {
    /// Maximum number of attributes a single tween may drive
    pub combined_attributes_limit: usize,
    /// Maximum number of waypoints per tween
    pub waypoints_limit: usize,
    /// Tweens reserved up front by `UnitPools`
    pub tween_pool_capacity: usize,
    /// Timelines reserved up front by `UnitPools`
    pub timeline_pool_capacity: usize,
}

impl TweenConfig {
    pub fn new() -> Self {
        Self {
            combined_attributes_limit: 3,
            waypoints_limit: 0,
            tween_pool_capacity: 20,
            timeline_pool_capacity: 10,
        }
    }

    pub fn with_combined_attributes_limit(mut self, limit: usize) -> Self {
        self.combined_attributes_limit = limit;
        self
    }

    pub fn with_waypoints_limit(mut self, limit: usize) -> Self {
        self.waypoints_limit = limit;
        self
    }

    pub fn with_pool_capacity(mut self, tweens: usize, timelines: usize) -> Self {
        self.tween_pool_capacity = tweens;
        self.timeline_pool_capacity = timelines;
        self
    }
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TweenConfig::default();
        assert_eq!(config.combined_attributes_limit, 3);
        assert_eq!(config.waypoints_limit, 0);
        assert_eq!(config.tween_pool_capacity, 20);
        assert_eq!(config.timeline_pool_capacity, 10);
    }

    #[test]
    fn test_builder() {
        let config = TweenConfig::new()
            .with_combined_attributes_limit(4)
            .with_waypoints_limit(2)
            .with_pool_capacity(1, 2);
        assert_eq!(config.combined_attributes_limit, 4);
        assert_eq!(config.waypoints_limit, 2);
        assert_eq!(config.tween_pool_capacity, 1);
        assert_eq!(config.timeline_pool_capacity, 2);
    }
}
