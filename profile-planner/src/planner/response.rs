//! Profile response assembly.

use std::collections::HashSet;
use std::future::Future;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{ProfileOption, Schedule, ServiceDay};

use super::assemble::ScheduleAssembler;
use super::config::ProfileConfig;
use super::error::ProfileError;
use super::rank::{SortOrder, best_option, rank_options, select_per_mode};
use super::resolver::{LegResolver, TransitNetwork};

/// The options worth showing for a request, and optionally their schedules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileResponse {
    /// Non-transit options first, then retained transit options in rank order.
    pub options: Vec<ProfileOption>,
    /// Concrete schedules, unique by trip sequence, ordered by departure.
    pub schedules: Vec<Schedule>,
}

impl ProfileResponse {
    /// Rank and filter `all` into a response without schedules.
    ///
    /// Non-transit options are always kept. Transit options are ranked by
    /// `order_by` and then cut to at most `limit` acceptable options per
    /// access mode (`limit <= 0` keeps every acceptable option).
    ///
    /// # Errors
    ///
    /// Returns `Err` if a transit option is malformed or names a pattern the
    /// network cannot measure.
    pub fn build<N: TransitNetwork>(
        all: impl IntoIterator<Item = ProfileOption>,
        order_by: SortOrder,
        limit: i32,
        network: &N,
        config: &ProfileConfig,
    ) -> Result<Self, ProfileError> {
        let mut options = Vec::new();
        let mut seen = HashSet::new();
        let mut transit = Vec::new();

        for option in all {
            if option.is_transit() {
                option.validate()?;
                transit.push(option);
            } else if seen.insert(option.clone()) {
                options.push(option);
            }
        }

        let best = best_option(&transit).cloned();
        let ranked = rank_options(transit, order_by, network, config)?;

        match best {
            Some(best) => {
                let selected: HashSet<ProfileOption> =
                    select_per_mode(&ranked, &best, limit, config)
                        .into_values()
                        .flatten()
                        .collect();
                for option in ranked {
                    if selected.contains(&option) && seen.insert(option.clone()) {
                        options.push(option);
                    }
                }
            }
            None => debug!("no transit options to rank"),
        }

        for option in &options {
            info!(stats = %option.stats, summary = %option.summary, "retained option");
        }

        Ok(Self {
            options,
            schedules: Vec::new(),
        })
    }

    /// Retained options that ride transit.
    pub fn transit_options(&self) -> impl Iterator<Item = &ProfileOption> {
        self.options.iter().filter(|o| o.is_transit())
    }

    /// Retained street-only options.
    pub fn non_transit_options(&self) -> impl Iterator<Item = &ProfileOption> {
        self.options.iter().filter(|o| !o.is_transit())
    }

    /// Assemble schedules for every retained transit option on `day`.
    ///
    /// Options are assembled concurrently, at most
    /// `max_concurrent_assemblies` at a time. An option that cannot be
    /// realized contributes nothing. On error no schedules are added.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the resolver fails for any option.
    pub async fn populate_schedules<R: LegResolver>(
        &mut self,
        assembler: &ScheduleAssembler<'_, R>,
        day: ServiceDay,
    ) -> Result<(), ProfileError> {
        let in_flight = assembler.config().max_concurrent_assemblies.max(1);
        let mut assembled = stream::iter(self.options.iter().filter(|o| o.is_transit()))
            .map(|option| assembler.assemble(option, day))
            .buffer_unordered(in_flight);

        let mut seen: HashSet<_> = self.schedules.iter().map(Schedule::key).collect();
        let mut added = Vec::new();
        while let Some(schedules) = assembled.next().await {
            for schedule in schedules? {
                if seen.insert(schedule.key()) {
                    added.push(schedule);
                }
            }
        }
        drop(assembled);

        debug!(date = %day, schedules = added.len(), "populated schedules");
        self.schedules.extend(added);
        self.schedules.sort_by_key(|s| (s.departure(), s.key()));
        Ok(())
    }

    /// Like [`populate_schedules`](Self::populate_schedules), but gives up
    /// with `ProfileError::Cancelled` if `cancel` resolves first. A
    /// cancelled call leaves the schedules untouched.
    pub async fn populate_schedules_until<R, C>(
        &mut self,
        assembler: &ScheduleAssembler<'_, R>,
        day: ServiceDay,
        cancel: C,
    ) -> Result<(), ProfileError>
    where
        R: LegResolver,
        C: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            () = cancel => {
                info!(date = %day, "schedule assembly cancelled");
                Err(ProfileError::Cancelled)
            }
            result = self.populate_schedules(assembler, day) => result,
        }
    }
}
