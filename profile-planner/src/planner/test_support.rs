//! Builders and in-memory collaborators shared by the planner tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::{
    PatternId, PatternShort, ProfileOption, RouteId, RouteShort, Segment, SegmentPattern, Stats,
    StopId, StopPairSchedule, StreetSegment, TraverseMode, TripId, TripTimeShort,
};

use super::resolver::{LegQuery, LegResolver, ResolveError, TransitNetwork};

/// Network with explicit hop lengths per pattern.
#[derive(Default)]
pub struct TestNetwork {
    pub hops: HashMap<PatternId, Vec<f64>>,
}

impl TestNetwork {
    pub fn with(mut self, pattern: &str, hops: &[f64]) -> Self {
        self.hops
            .insert(PatternId::new(pattern).unwrap(), hops.to_vec());
        self
    }
}

impl TransitNetwork for TestNetwork {
    fn hop_distances(&self, pattern: &PatternId) -> Option<&[f64]> {
        self.hops.get(pattern).map(Vec::as_slice)
    }
}

/// Mock resolver serving canned stop pairs per pattern.
///
/// Only pairs departing inside the query window are returned, mirroring
/// what a timetable would do.
#[derive(Default)]
pub struct MockResolver {
    pairs: HashMap<PatternId, Vec<StopPairSchedule>>,
    failing: Option<ResolveError>,
    call_count: Mutex<usize>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add trips on `pattern` as `(trip, departure, arrival)` seconds after
    /// midnight of service day 0.
    pub fn add(&mut self, pattern: &str, trips: &[(&str, i32, i32)]) {
        let entry = self
            .pairs
            .entry(PatternId::new(pattern).unwrap())
            .or_default();
        entry.extend(
            trips
                .iter()
                .map(|(trip, dep, arr)| stop_pair(pattern, trip, *dep, *arr)),
        );
    }

    pub fn pairs_mut(&mut self, pattern: &str) -> &mut Vec<StopPairSchedule> {
        self.pairs
            .entry(PatternId::new(pattern).unwrap())
            .or_default()
    }

    /// Make every lookup fail with `err`.
    pub fn failing(err: ResolveError) -> Self {
        Self {
            failing: Some(err),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl LegResolver for MockResolver {
    async fn resolve(&self, query: &LegQuery) -> Result<Vec<StopPairSchedule>, ResolveError> {
        *self.call_count.lock().unwrap() += 1;
        if let Some(err) = &self.failing {
            return Err(err.clone());
        }
        Ok(self
            .pairs
            .get(&query.pattern_id)
            .map(|pairs| {
                pairs
                    .iter()
                    .filter(|p| query.contains(p.departure()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// A ride on `trip` of `pattern` from stop 0 to stop 1, service day 0.
pub fn stop_pair(pattern: &str, trip: &str, dep: i32, arr: i32) -> StopPairSchedule {
    let trip = TripId::new(trip).unwrap();
    StopPairSchedule::new(
        PatternShort::new(PatternId::new(pattern).unwrap()),
        RouteShort::new(RouteId::new(format!("route-{pattern}")).unwrap(), TraverseMode::Bus),
        TripTimeShort::scheduled(trip.clone(), StopId::new("from").unwrap(), 0, 2, 0, dep, dep),
        TripTimeShort::scheduled(trip, StopId::new("to").unwrap(), 1, 2, 0, arr, arr),
    )
    .unwrap()
}

/// A leg riding hops `0..hops` of `pattern`, served by `routes`.
pub fn leg(pattern: &str, hops: usize, routes: &[&str]) -> Segment {
    Segment::new(
        vec![SegmentPattern::new(PatternId::new(pattern).unwrap(), 0, hops)],
        routes
            .iter()
            .map(|r| RouteShort::new(RouteId::new(*r).unwrap(), TraverseMode::Bus))
            .collect(),
    )
}

/// A transit option with one access segment per mode.
pub fn transit_option(
    summary: &str,
    modes: &[TraverseMode],
    legs: Vec<Segment>,
    avg: u32,
) -> ProfileOption {
    ProfileOption {
        access: modes.iter().map(|m| StreetSegment::new(*m, 120)).collect(),
        egress: vec![StreetSegment::new(TraverseMode::Walk, 60)],
        transit: legs,
        stats: Stats::new(avg.saturating_sub(60), avg, avg + 60),
        summary: summary.to_string(),
    }
}

/// A street-only option.
pub fn walk_option(summary: &str, secs: u32) -> ProfileOption {
    ProfileOption {
        access: vec![StreetSegment::new(TraverseMode::Walk, secs)],
        egress: vec![],
        transit: vec![],
        stats: Stats::new(secs, secs, secs),
        summary: summary.to_string(),
    }
}
