//! Profile planner core.
//!
//! This module turns the candidate options of a profile search into the
//! answer a rider sees: which options are worth showing, and the concrete
//! vehicle sequences that realize each of them on a given day.
//!
//! Ranking and filtering live in `rank`, schedule chaining in `assemble`,
//! and `ProfileResponse` ties the two together.

mod assemble;
mod config;
mod error;
mod rank;
mod resolver;
mod response;

#[cfg(test)]
pub(crate) mod test_support;

pub use assemble::{ScheduleAssembler, chain_leg};
pub use config::ProfileConfig;
pub use error::ProfileError;
pub use rank::{
    SortOrder, best_option, diversity_key, leg_distance, ok_option, rank_options,
    select_per_mode, sort_by_difference, sort_by_stats,
};
pub use resolver::{LegQuery, LegResolver, ResolveError, TransitNetwork};
pub use response::ProfileResponse;
