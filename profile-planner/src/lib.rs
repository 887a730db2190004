//! Transit profile planner.
//!
//! Given the candidate options of a profile search, decides which are worth
//! showing a rider and turns each retained option into the concrete,
//! transfer-feasible vehicle sequences that realize it on a service day.

pub mod cache;
pub mod domain;
pub mod planner;
pub mod request;
pub mod snapshot;
