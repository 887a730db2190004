//! Per-stop timing records.

use serde::{Deserialize, Serialize};

use super::{StopId, TripId};

/// Realtime status of a trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RealTimeState {
    /// No realtime data; times are as published.
    #[default]
    Scheduled,
    /// Times were updated from a realtime feed.
    Updated,
    /// The trip does not run.
    Canceled,
    /// The trip was added by a realtime feed.
    Added,
    /// The trip's stop pattern was modified by a realtime feed.
    Modified,
}

/// Snapshot of one trip at one stop.
///
/// All times are seconds since midnight of `service_day`, which is itself an
/// epoch second. Records are produced by the timetable and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TripTimeShort {
    pub stop_id: StopId,
    pub stop_index: usize,
    pub stop_count: usize,
    pub scheduled_arrival: i32,
    pub scheduled_departure: i32,
    pub realtime_arrival: i32,
    pub realtime_departure: i32,
    pub arrival_delay: i32,
    pub departure_delay: i32,
    pub timepoint: bool,
    pub realtime: bool,
    pub realtime_state: RealTimeState,
    pub service_day: i64,
    pub trip_id: TripId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headsign: Option<String>,
}

impl TripTimeShort {
    /// A record with no realtime information: realtime equals scheduled.
    pub fn scheduled(
        trip_id: TripId,
        stop_id: StopId,
        stop_index: usize,
        stop_count: usize,
        service_day: i64,
        arrival: i32,
        departure: i32,
    ) -> Self {
        Self {
            stop_id,
            stop_index,
            stop_count,
            scheduled_arrival: arrival,
            scheduled_departure: departure,
            realtime_arrival: arrival,
            realtime_departure: departure,
            arrival_delay: 0,
            departure_delay: 0,
            timepoint: true,
            realtime: false,
            realtime_state: RealTimeState::Scheduled,
            service_day,
            trip_id,
            block_id: None,
            headsign: None,
        }
    }

    /// Apply realtime delays on top of the scheduled times.
    pub fn with_delays(mut self, arrival_delay: i32, departure_delay: i32) -> Self {
        self.arrival_delay = arrival_delay;
        self.departure_delay = departure_delay;
        self.realtime_arrival = self.scheduled_arrival + arrival_delay;
        self.realtime_departure = self.scheduled_departure + departure_delay;
        self.realtime = true;
        self.realtime_state = RealTimeState::Updated;
        self
    }

    /// Realtime departure in epoch seconds.
    pub fn absolute_departure(&self) -> i64 {
        self.service_day + i64::from(self.realtime_departure)
    }

    /// Realtime arrival in epoch seconds.
    pub fn absolute_arrival(&self) -> i64 {
        self.service_day + i64::from(self.realtime_arrival)
    }

    /// Returns true if the trip is cancelled at this stop.
    pub fn is_canceled(&self) -> bool {
        self.realtime_state == RealTimeState::Canceled
    }
}
