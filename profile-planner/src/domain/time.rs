//! Service-day time handling.
//!
//! Timetable times are seconds since the midnight that starts a service day.
//! A `ServiceDay` ties a calendar date to that midnight's epoch second so
//! times from different service days can be compared on one axis.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Seconds in one service day; the default lookup window.
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// A calendar date interpreted as a service day.
///
/// # Examples
///
/// ```
/// use profile_planner::domain::ServiceDay;
/// use chrono::NaiveDate;
///
/// let day = ServiceDay::new(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap());
/// assert_eq!(day.midnight_epoch(), 86_400);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceDay(NaiveDate);

impl ServiceDay {
    /// Create a service day for a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Epoch seconds of this day's midnight (UTC).
    pub fn midnight_epoch(&self) -> i64 {
        self.0.and_time(NaiveTime::MIN).and_utc().timestamp()
    }
}

impl fmt::Display for ServiceDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Format seconds-since-midnight as `HH:MM`, letting hours run past 24 for
/// trips that continue after midnight.
///
/// ```
/// use profile_planner::domain::format_hhmm;
///
/// assert_eq!(format_hhmm(8 * 3600 + 5 * 60), "08:05");
/// assert_eq!(format_hhmm(25 * 3600), "25:00");
/// ```
pub fn format_hhmm(secs: i32) -> String {
    let mins = secs.div_euclid(60);
    format!("{:02}:{:02}", mins.div_euclid(60), mins.rem_euclid(60))
}
