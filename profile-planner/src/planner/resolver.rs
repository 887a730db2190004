//! Timetable collaborators.
//!
//! The planner never reads a timetable directly. Realized leg timings come
//! from a `LegResolver`, and pattern geometry from a `TransitNetwork`. Both
//! are read-only and may be shared across concurrent assemblies.

use std::future::Future;

use crate::domain::{PatternId, SegmentPattern, ServiceDay, StopPairSchedule};

use super::config::ProfileConfig;

/// Error from a timetable lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The pattern is not in the timetable
    #[error("unknown pattern {0}")]
    UnknownPattern(PatternId),

    /// A stop index lies outside the pattern
    #[error("stop index {index} out of range for pattern {pattern} with {stops} stops")]
    StopIndexOutOfRange {
        pattern: PatternId,
        index: usize,
        stops: usize,
    },

    /// The timetable could not be read
    #[error("timetable unavailable: {0}")]
    Unavailable(String),
}

/// One timetable lookup: the trips of a pattern between two stops, departing
/// within `[start, start + window)` (epoch seconds).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LegQuery {
    pub pattern_id: PatternId,
    pub from_index: usize,
    pub to_index: usize,
    pub start: i64,
    pub window: i64,
}

impl LegQuery {
    /// Build the query covering one lookup window from the day's midnight.
    pub fn for_pattern(pattern: &SegmentPattern, day: ServiceDay, config: &ProfileConfig) -> Self {
        Self {
            pattern_id: pattern.pattern_id.clone(),
            from_index: pattern.from_index,
            to_index: pattern.to_index,
            start: day.midnight_epoch(),
            window: config.lookup_window().num_seconds(),
        }
    }

    /// Returns true if an epoch second lies inside the query window.
    pub fn contains(&self, epoch: i64) -> bool {
        epoch >= self.start && epoch < self.start + self.window
    }
}

/// Source of realized leg timings.
///
/// Implementations must return an empty vector, not an error, when no trip
/// runs in the window. Results need not be sorted.
pub trait LegResolver: Sync {
    fn resolve(
        &self,
        query: &LegQuery,
    ) -> impl Future<Output = Result<Vec<StopPairSchedule>, ResolveError>> + Send;
}

/// Read-only pattern geometry.
pub trait TransitNetwork {
    /// Length of each hop of a pattern, in metres. Hop `i` joins stops `i`
    /// and `i + 1`. Returns `None` for unknown patterns.
    fn hop_distances(&self, pattern: &PatternId) -> Option<&[f64]>;
}
