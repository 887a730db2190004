//! Backward greedy schedule chaining.
//!
//! Turns one transit option into concrete schedules for a service day. Legs
//! are resolved last-first: once a leg is processed, every viable onward
//! continuation from it is already known, so each earlier leg is matched by
//! a binary search against a sorted list instead of a multi-leg join.

use std::collections::HashSet;

use futures::future::try_join_all;
use tracing::{debug, info, trace};

use crate::domain::{ProfileOption, Schedule, Segment, ServiceDay, StopPairSchedule};

use super::config::ProfileConfig;
use super::error::ProfileError;
use super::resolver::{LegQuery, LegResolver};

/// A chained tail of an itinerary, stored latest leg first so that the
/// leading (earliest) ride is `last()`.
type Suffix = Vec<StopPairSchedule>;

/// Assembles schedules for transit options.
pub struct ScheduleAssembler<'a, R: LegResolver> {
    resolver: &'a R,
    config: &'a ProfileConfig,
}

impl<'a, R: LegResolver> ScheduleAssembler<'a, R> {
    /// Create a new assembler.
    pub fn new(resolver: &'a R, config: &'a ProfileConfig) -> Self {
        Self { resolver, config }
    }

    pub fn config(&self) -> &ProfileConfig {
        self.config
    }

    /// Enumerate every chained schedule for `option` on `day`.
    ///
    /// Returns an empty vector when some leg has no trips on the day or no
    /// chain satisfies the transfer rule. Schedules are unique by trip
    /// sequence and ordered by first departure.
    ///
    /// # Errors
    ///
    /// Returns `Err` only if the resolver fails.
    pub async fn assemble(
        &self,
        option: &ProfileOption,
        day: ServiceDay,
    ) -> Result<Vec<Schedule>, ProfileError> {
        let mut suffixes: Vec<Suffix> = Vec::new();

        for (idx, leg) in option.transit.iter().enumerate().rev() {
            let records = self.leg_records(leg, day).await?;
            if records.is_empty() {
                info!(
                    leg = idx,
                    date = %day,
                    summary = %option.summary,
                    "leg has no trips, option cannot be realized"
                );
                return Ok(Vec::new());
            }

            suffixes = if idx + 1 == option.transit.len() {
                records.into_iter().map(|r| vec![r]).collect()
            } else {
                chain_leg(records, suffixes, self.config.min_transfer().num_seconds())
            };

            if suffixes.is_empty() {
                info!(
                    leg = idx,
                    date = %day,
                    summary = %option.summary,
                    "no transfer-feasible connection onward from leg"
                );
                return Ok(Vec::new());
            }
        }

        let access = option.access_time();
        let egress = option.egress_time();
        let mut seen = HashSet::new();
        let schedules: Vec<Schedule> = suffixes
            .into_iter()
            .map(|mut suffix| {
                suffix.reverse();
                Schedule::new(suffix, access, egress)
            })
            .filter(|schedule| seen.insert(schedule.key()))
            .collect();

        debug!(
            summary = %option.summary,
            schedules = schedules.len(),
            shortest = ?schedules.iter().filter_map(Schedule::total_duration).min(),
            "assembled schedules"
        );
        Ok(schedules)
    }

    /// Resolve every alternative pattern of a leg, concurrently, and merge
    /// the results sorted by departure.
    ///
    /// Cancelled rides are dropped here, before the caller checks for an
    /// empty leg, so a leg whose every ride is cancelled voids the option.
    async fn leg_records(
        &self,
        leg: &Segment,
        day: ServiceDay,
    ) -> Result<Vec<StopPairSchedule>, ProfileError> {
        let queries: Vec<LegQuery> = leg
            .segment_patterns
            .iter()
            .map(|pattern| LegQuery::for_pattern(pattern, day, self.config))
            .collect();

        let results = try_join_all(queries.iter().map(|q| self.resolver.resolve(q))).await?;

        let (cancelled, mut records): (Vec<_>, Vec<_>) = results
            .into_iter()
            .flatten()
            .partition(StopPairSchedule::is_canceled);
        if !cancelled.is_empty() {
            trace!(cancelled = cancelled.len(), "dropping cancelled rides");
        }
        records.sort_by_key(StopPairSchedule::departure);
        Ok(records)
    }
}

/// Prepend one earlier leg to the suffixes built so far.
///
/// `records` must be sorted by departure and `suffixes` by leading
/// departure. Each record targets the first suffix it can reach with at
/// least `min_transfer` seconds to spare. When several records target the
/// same suffix, the latest departure wins, then the earliest arrival, then
/// the first seen. Suffixes nobody reaches and records that reach nothing
/// are dropped. The result is sorted by leading departure.
pub fn chain_leg(
    records: Vec<StopPairSchedule>,
    suffixes: Vec<Suffix>,
    min_transfer: i64,
) -> Vec<Suffix> {
    let leads: Vec<i64> = suffixes
        .iter()
        .map(|s| s.last().map_or(i64::MIN, StopPairSchedule::departure))
        .collect();
    let mut winners: Vec<Option<StopPairSchedule>> = vec![None; suffixes.len()];

    for record in records {
        let ready = record.arrival() + min_transfer;
        let target = leads.partition_point(|&dep| dep < ready);
        let Some(slot) = winners.get_mut(target) else {
            trace!(trip = %record.trip_id(), ready, "no onward connection");
            continue;
        };
        let replace = match slot {
            None => true,
            Some(current) => {
                record.departure() > current.departure()
                    || (record.departure() == current.departure()
                        && record.arrival() < current.arrival())
            }
        };
        if replace {
            trace!(trip = %record.trip_id(), target, "claiming connection");
            *slot = Some(record);
        }
    }

    let mut chained: Vec<Suffix> = suffixes
        .into_iter()
        .zip(winners)
        .filter_map(|(mut suffix, winner)| {
            suffix.push(winner?);
            Some(suffix)
        })
        .collect();
    chained.sort_by_key(|s| s.last().map_or(i64::MIN, StopPairSchedule::departure));
    chained
}
