//! Configuration for ranking and schedule assembly.

use chrono::Duration;

use crate::domain::SECONDS_PER_DAY;

/// Tunable parameters for option filtering and schedule chaining.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// Options whose average travel time exceeds this multiple of the best
    /// option's average are dropped.
    pub threshold: f64,

    /// Options with at least this multiple of the best option's leg count
    /// are dropped.
    pub trivial_leg_multiplier: usize,

    /// Minimum time between alighting one vehicle and boarding the next (seconds).
    pub min_transfer_secs: i64,

    /// Length of the timetable window looked up per leg (seconds).
    pub lookup_window_secs: i64,

    /// When false, the difference ordering keeps every option.
    pub filter_bad_results: bool,

    /// Maximum number of options assembled concurrently.
    pub max_concurrent_assemblies: usize,
}

impl ProfileConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        threshold: f64,
        trivial_leg_multiplier: usize,
        min_transfer_secs: i64,
        lookup_window_secs: i64,
        filter_bad_results: bool,
        max_concurrent_assemblies: usize,
    ) -> Self {
        Self {
            threshold,
            trivial_leg_multiplier,
            min_transfer_secs,
            lookup_window_secs,
            filter_bad_results,
            max_concurrent_assemblies,
        }
    }

    /// Returns the minimum transfer time as a Duration.
    pub fn min_transfer(&self) -> Duration {
        Duration::seconds(self.min_transfer_secs)
    }

    /// Returns the lookup window as a Duration.
    pub fn lookup_window(&self) -> Duration {
        Duration::seconds(self.lookup_window_secs)
    }

    /// Returns true if `avg` is more than `threshold` times `best_avg`.
    pub fn exceeds_threshold(&self, avg: u32, best_avg: u32) -> bool {
        f64::from(avg) > self.threshold * f64::from(best_avg)
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            threshold: 1.5,
            trivial_leg_multiplier: 3,
            min_transfer_secs: 300, // 5 minutes
            lookup_window_secs: SECONDS_PER_DAY,
            filter_bad_results: true,
            max_concurrent_assemblies: 8,
        }
    }
}
