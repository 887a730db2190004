//! Concrete leg realizations and complete schedules.
//!
//! A `StopPairSchedule` is one trip ridden between two stops. A `Schedule`
//! chains one of them per transit leg. Schedules are identified only by
//! their ordered trip ids, so two schedules riding the same trips compare
//! equal even if their timing fields differ.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{DomainError, PatternShort, RouteShort, TripId, TripTimeShort, format_hhmm};

/// One concrete, timed realization of a leg on a specific trip.
///
/// # Invariants
///
/// - `orig` and `dest` belong to the same trip
/// - `orig.stop_index < dest.stop_index`
/// - `dest` arrives no earlier than `orig` departs
///
/// Deserialization goes through [`StopPairSchedule::new`], so these hold for
/// pairs read from JSON too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStopPair")]
pub struct StopPairSchedule {
    pub orig: TripTimeShort,
    pub dest: TripTimeShort,
    pub pattern: PatternShort,
    pub route: RouteShort,
}

impl StopPairSchedule {
    /// Construct a stop pair, validating that it is a forward ride on one trip.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the records belong to different trips, if the
    /// destination is not after the origin in stop order, or if the
    /// destination arrival precedes the origin departure.
    pub fn new(
        pattern: PatternShort,
        route: RouteShort,
        orig: TripTimeShort,
        dest: TripTimeShort,
    ) -> Result<Self, DomainError> {
        if orig.trip_id != dest.trip_id {
            return Err(DomainError::InvalidStopPair(
                "origin and destination are on different trips",
            ));
        }
        if dest.stop_index <= orig.stop_index {
            return Err(DomainError::InvalidStopPair(
                "destination stop must come after origin stop",
            ));
        }
        if dest.absolute_arrival() < orig.absolute_departure() {
            return Err(DomainError::InvalidStopPair(
                "destination arrival precedes origin departure",
            ));
        }
        Ok(Self {
            orig,
            dest,
            pattern,
            route,
        })
    }

    /// Returns the trip this pair is ridden on.
    pub fn trip_id(&self) -> &TripId {
        &self.orig.trip_id
    }

    /// Realtime departure from the origin stop, in epoch seconds.
    pub fn departure(&self) -> i64 {
        self.orig.absolute_departure()
    }

    /// Realtime arrival at the destination stop, in epoch seconds.
    pub fn arrival(&self) -> i64 {
        self.dest.absolute_arrival()
    }

    /// Returns true if either end of the ride is cancelled.
    pub fn is_canceled(&self) -> bool {
        self.orig.is_canceled() || self.dest.is_canceled()
    }
}

#[derive(Deserialize)]
struct RawStopPair {
    orig: TripTimeShort,
    dest: TripTimeShort,
    pattern: PatternShort,
    route: RouteShort,
}

impl TryFrom<RawStopPair> for StopPairSchedule {
    type Error = DomainError;

    fn try_from(raw: RawStopPair) -> Result<Self, Self::Error> {
        Self::new(raw.pattern, raw.route, raw.orig, raw.dest)
    }
}

impl fmt::Display for StopPairSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}-{}",
            self.route,
            self.trip_id(),
            format_hhmm(self.orig.realtime_departure),
            format_hhmm(self.dest.realtime_arrival)
        )
    }
}

/// Identity of a schedule: the ordered sequence of trips it rides.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleKey(Vec<TripId>);

/// A fully chained itinerary: one stop pair per transit leg, in leg order,
/// plus the access and egress time of the option it realizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    schedule: Vec<StopPairSchedule>,
    access_time: u32,
    egress_time: u32,
}

impl Schedule {
    /// Create a schedule from stop pairs in leg order.
    pub fn new(schedule: Vec<StopPairSchedule>, access_time: u32, egress_time: u32) -> Self {
        Self {
            schedule,
            access_time,
            egress_time,
        }
    }

    /// Returns the stop pairs in leg order.
    pub fn stop_pairs(&self) -> &[StopPairSchedule] {
        &self.schedule
    }

    /// Returns the identity key of this schedule.
    pub fn key(&self) -> ScheduleKey {
        ScheduleKey(self.trip_ids().cloned().collect())
    }

    /// Returns the trips ridden, in order.
    pub fn trip_ids(&self) -> impl Iterator<Item = &TripId> {
        self.schedule.iter().map(StopPairSchedule::trip_id)
    }

    /// Access time in seconds.
    pub fn access_time(&self) -> u32 {
        self.access_time
    }

    /// Egress time in seconds.
    pub fn egress_time(&self) -> u32 {
        self.egress_time
    }

    /// Departure of the first leg, in epoch seconds.
    pub fn departure(&self) -> Option<i64> {
        self.schedule.first().map(StopPairSchedule::departure)
    }

    /// Arrival of the last leg, in epoch seconds.
    pub fn arrival(&self) -> Option<i64> {
        self.schedule.last().map(StopPairSchedule::arrival)
    }

    /// Door-to-door duration in seconds, including access and egress.
    pub fn total_duration(&self) -> Option<i64> {
        let (dep, arr) = (self.departure()?, self.arrival()?);
        Some(arr - dep + i64::from(self.access_time) + i64::from(self.egress_time))
    }
}

impl PartialEq for Schedule {
    fn eq(&self, other: &Self) -> bool {
        self.trip_ids().eq(other.trip_ids())
    }
}

impl Eq for Schedule {}

impl Hash for Schedule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for trip in self.trip_ids() {
            trip.hash(state);
        }
    }
}
