//! Domain types for the profile planner.
//!
//! This module contains the data model shared by ranking and schedule
//! assembly: candidate options, timing records, realized stop pairs and
//! schedules. Types that carry invariants check them at construction.

mod error;
mod ids;
mod option;
mod route;
mod schedule;
mod stop_time;
mod time;

pub use error::DomainError;
pub use ids::{PatternId, RouteId, StopId, TripId};
pub use option::{ProfileOption, Segment, SegmentPattern, Stats, StreetSegment};
pub use route::{PatternShort, RouteShort, TraverseMode};
pub use schedule::{Schedule, ScheduleKey, StopPairSchedule};
pub use stop_time::{RealTimeState, TripTimeShort};
pub use time::{SECONDS_PER_DAY, ServiceDay, format_hhmm};
