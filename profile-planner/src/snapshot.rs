//! Static timetable snapshot.
//!
//! Serves leg lookups and hop geometry from a JSON document loaded into
//! memory, for running the planner without a live timetable.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{
    PatternId, PatternShort, RealTimeState, RouteShort, ServiceDay, StopId, StopPairSchedule,
    TripId, TripTimeShort,
};
use crate::planner::{LegQuery, LegResolver, ResolveError, TransitNetwork};

/// Error loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot is not valid JSON for the expected shape
    #[error("failed to parse snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot parsed but is inconsistent
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

/// Scheduled times of one trip at one stop, in seconds after midnight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopTime {
    pub arrival: i32,
    pub departure: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_delay: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_delay: Option<i32>,
    #[serde(default = "default_timepoint")]
    pub timepoint: bool,
}

fn default_timepoint() -> bool {
    true
}

/// One trip of a pattern on one service date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSchedule {
    pub trip_id: TripId,
    pub service_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headsign: Option<String>,
    #[serde(default)]
    pub realtime_state: RealTimeState,
    /// One entry per stop of the pattern.
    pub stop_times: Vec<StopTime>,
}

impl TripSchedule {
    /// Timing record at stop `index`, or `None` past the last stop.
    fn record(&self, stops: &[StopId], index: usize) -> Option<TripTimeShort> {
        let stop_time = self.stop_times.get(index)?;
        let stop_id = stops.get(index)?;
        let day = ServiceDay::new(self.service_date);

        let mut record = TripTimeShort::scheduled(
            self.trip_id.clone(),
            stop_id.clone(),
            index,
            stops.len(),
            day.midnight_epoch(),
            stop_time.arrival,
            stop_time.departure,
        );
        if stop_time.arrival_delay.is_some() || stop_time.departure_delay.is_some() {
            record = record.with_delays(
                stop_time.arrival_delay.unwrap_or(0),
                stop_time.departure_delay.unwrap_or(0),
            );
        }
        if self.realtime_state != RealTimeState::Scheduled {
            record.realtime = true;
            record.realtime_state = self.realtime_state;
        }
        record.timepoint = stop_time.timepoint;
        record.block_id = self.block_id.clone();
        record.headsign = self.headsign.clone();
        Some(record)
    }
}

/// Everything the snapshot knows about one pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternTimetable {
    pub pattern: PatternShort,
    pub route: RouteShort,
    pub stops: Vec<StopId>,
    /// Metres between consecutive stops.
    pub hop_distances: Vec<f64>,
    #[serde(default)]
    pub trips: Vec<TripSchedule>,
}

impl PatternTimetable {
    fn validate(&self) -> Result<(), SnapshotError> {
        let id = &self.pattern.id;
        if self.stops.len() < 2 {
            return Err(SnapshotError::Invalid(format!(
                "pattern {id} needs at least two stops"
            )));
        }
        if self.hop_distances.len() + 1 != self.stops.len() {
            return Err(SnapshotError::Invalid(format!(
                "pattern {id} has {} stops but {} hop distances",
                self.stops.len(),
                self.hop_distances.len()
            )));
        }
        if let Some(trip) = self
            .trips
            .iter()
            .find(|t| t.stop_times.len() != self.stops.len())
        {
            return Err(SnapshotError::Invalid(format!(
                "trip {} of pattern {id} has {} stop times for {} stops",
                trip.trip_id,
                trip.stop_times.len(),
                self.stops.len()
            )));
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), ResolveError> {
        if index < self.stops.len() {
            Ok(())
        } else {
            Err(ResolveError::StopIndexOutOfRange {
                pattern: self.pattern.id.clone(),
                index,
                stops: self.stops.len(),
            })
        }
    }
}

#[derive(Deserialize)]
struct SnapshotDocument {
    patterns: Vec<PatternTimetable>,
}

/// In-memory timetable keyed by pattern.
#[derive(Debug, Clone, Default)]
pub struct StaticTimetable {
    patterns: HashMap<PatternId, PatternTimetable>,
}

impl StaticTimetable {
    /// Build a timetable from already-parsed patterns.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a pattern is inconsistent or appears twice.
    pub fn from_patterns(
        patterns: impl IntoIterator<Item = PatternTimetable>,
    ) -> Result<Self, SnapshotError> {
        let mut by_id = HashMap::new();
        for pattern in patterns {
            pattern.validate()?;
            let id = pattern.pattern.id.clone();
            if by_id.insert(id.clone(), pattern).is_some() {
                return Err(SnapshotError::Invalid(format!("duplicate pattern {id}")));
            }
        }
        Ok(Self { patterns: by_id })
    }

    /// Parse a snapshot document: `{ "patterns": [...] }`.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let document: SnapshotDocument = serde_json::from_str(json)?;
        Self::from_patterns(document.patterns)
    }

    /// Load a snapshot document from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let timetable = Self::from_json(&json)?;
        info!(path = %path.display(), patterns = timetable.len(), "loaded timetable snapshot");
        Ok(timetable)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    fn stop_pairs(&self, query: &LegQuery) -> Result<Vec<StopPairSchedule>, ResolveError> {
        let timetable = self
            .patterns
            .get(&query.pattern_id)
            .ok_or_else(|| ResolveError::UnknownPattern(query.pattern_id.clone()))?;
        timetable.check_index(query.from_index)?;
        timetable.check_index(query.to_index)?;

        let mut pairs = Vec::new();
        for trip in &timetable.trips {
            let (Some(orig), Some(dest)) = (
                trip.record(&timetable.stops, query.from_index),
                trip.record(&timetable.stops, query.to_index),
            ) else {
                continue;
            };
            if !query.contains(orig.absolute_departure()) {
                continue;
            }
            match StopPairSchedule::new(
                timetable.pattern.clone(),
                timetable.route.clone(),
                orig,
                dest,
            ) {
                Ok(pair) => pairs.push(pair),
                Err(e) => debug!(trip = %trip.trip_id, error = %e, "skipping unusable trip"),
            }
        }
        Ok(pairs)
    }
}

impl LegResolver for StaticTimetable {
    async fn resolve(&self, query: &LegQuery) -> Result<Vec<StopPairSchedule>, ResolveError> {
        self.stop_pairs(query)
    }
}

impl TransitNetwork for StaticTimetable {
    fn hop_distances(&self, pattern: &PatternId) -> Option<&[f64]> {
        self.patterns
            .get(pattern)
            .map(|p| p.hop_distances.as_slice())
    }
}
