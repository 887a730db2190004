//! Option ranking and filtering.
//!
//! Orders transit options by a chosen policy, prunes options that add
//! transfers or time without adding route diversity, and keeps the top N
//! options for each access mode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::domain::{DomainError, ProfileOption, RouteId, Segment, TraverseMode};

use super::config::ProfileConfig;
use super::error::ProfileError;
use super::resolver::TransitNetwork;

/// How transit options are ordered before the per-mode cut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    /// Ascending by fastest variant.
    #[default]
    Min,
    /// Ascending by slowest variant.
    Max,
    /// Ascending by average travel time.
    Avg,
    /// Round-robin across the routes of each option's longest leg.
    Difference,
}

/// Order transit options by the requested policy.
pub fn rank_options<N: TransitNetwork>(
    options: Vec<ProfileOption>,
    order: SortOrder,
    network: &N,
    config: &ProfileConfig,
) -> Result<Vec<ProfileOption>, ProfileError> {
    match order {
        SortOrder::Difference => sort_by_difference(options, network, config),
        _ => Ok(sort_by_stats(options, order)),
    }
}

/// Stable ascending sort by the stats field the order names.
///
/// `SortOrder::Difference` falls back to the minimum.
pub fn sort_by_stats(mut options: Vec<ProfileOption>, order: SortOrder) -> Vec<ProfileOption> {
    match order {
        SortOrder::Max => options.sort_by_key(|o| o.stats.max),
        SortOrder::Avg => options.sort_by_key(|o| o.stats.avg),
        SortOrder::Min | SortOrder::Difference => options.sort_by_key(|o| o.stats.min),
    }
    options
}

/// Order options so that consecutive results come from different routes.
///
/// Options are grouped by their diversity key, each group sorted by average
/// travel time, and groups are drained round-robin in key order. Options
/// whose average is at least `threshold` times the best average are dropped
/// unless `filter_bad_results` is off; options tied with the best are
/// always kept.
pub fn sort_by_difference<N: TransitNetwork>(
    options: Vec<ProfileOption>,
    network: &N,
    config: &ProfileConfig,
) -> Result<Vec<ProfileOption>, ProfileError> {
    let Some(best_avg) = options.iter().map(|o| o.stats.avg).min() else {
        return Ok(Vec::new());
    };
    let total = options.len();

    let mut groups: BTreeMap<RouteId, Vec<ProfileOption>> = BTreeMap::new();
    for option in options {
        let key = diversity_key(&option, network)?;
        groups.entry(key).or_default().push(option);
    }
    debug!(options = total, groups = groups.len(), "grouped options by longest leg");

    let mut cursors: Vec<_> = groups
        .into_values()
        .map(|mut group| {
            group.sort_by_key(|o| o.stats.avg);
            group.into_iter()
        })
        .collect();

    let threshold = config.threshold * f64::from(best_avg);
    let mut ranked = Vec::with_capacity(total);
    loop {
        let mut advanced = false;
        for cursor in &mut cursors {
            let Some(option) = cursor.next() else {
                continue;
            };
            advanced = true;
            let avg = option.stats.avg;
            if !config.filter_bad_results || avg == best_avg || f64::from(avg) < threshold {
                ranked.push(option);
            } else {
                trace!(avg, best_avg, summary = %option.summary, "dropping slow option");
            }
        }
        if !advanced {
            break;
        }
    }

    Ok(ranked)
}

/// The route id that stands for an option in the difference ordering: the
/// smallest route id serving its longest leg.
pub fn diversity_key<N: TransitNetwork>(
    option: &ProfileOption,
    network: &N,
) -> Result<RouteId, ProfileError> {
    let leg = longest_leg(option, network)?;
    leg.min_route_id().cloned().ok_or_else(|| {
        ProfileError::Domain(DomainError::MalformedOption(format!(
            "longest leg of '{}' has no routes",
            option.summary
        )))
    })
}

/// The leg covering the greatest average distance; the first on ties.
fn longest_leg<'o, N: TransitNetwork>(
    option: &'o ProfileOption,
    network: &N,
) -> Result<&'o Segment, ProfileError> {
    let mut longest: Option<(&Segment, f64)> = None;
    for leg in &option.transit {
        let distance = leg_distance(leg, network)?;
        if longest.is_none_or(|(_, best)| distance > best) {
            longest = Some((leg, distance));
        }
    }
    longest.map(|(leg, _)| leg).ok_or_else(|| {
        ProfileError::Domain(DomainError::MalformedOption(format!(
            "'{}' has no transit legs",
            option.summary
        )))
    })
}

/// Distance ridden on a leg, averaged over its alternative patterns.
pub fn leg_distance<N: TransitNetwork>(leg: &Segment, network: &N) -> Result<f64, ProfileError> {
    if leg.segment_patterns.is_empty() {
        return Ok(0.0);
    }

    let mut sum = 0.0;
    for pattern in &leg.segment_patterns {
        let hops = network
            .hop_distances(&pattern.pattern_id)
            .ok_or_else(|| ProfileError::UnknownPattern(pattern.pattern_id.clone()))?;
        let ridden = hops
            .get(pattern.from_index..pattern.to_index)
            .ok_or_else(|| ProfileError::HopOutOfRange {
                pattern: pattern.pattern_id.clone(),
                to_index: pattern.to_index,
                hops: hops.len(),
            })?;
        sum += ridden.iter().sum::<f64>();
    }

    Ok(sum / leg.segment_patterns.len() as f64)
}

/// The transit option with the smallest average travel time; the first on ties.
pub fn best_option(options: &[ProfileOption]) -> Option<&ProfileOption> {
    options.iter().min_by_key(|o| o.stats.avg)
}

/// Decide whether an option is worth showing next to the best one.
///
/// An option is rejected if it:
/// 1. Has more legs than `best` while riding a route of `best`'s first leg
///    (more transfers, no new route)
/// 2. Averages more than `threshold` times `best`'s average
/// 3. Has at least `trivial_leg_multiplier` times `best`'s leg count
pub fn ok_option(option: &ProfileOption, best: &ProfileOption, config: &ProfileConfig) -> bool {
    if option.leg_count() > best.leg_count() {
        if let Some(first) = best.transit.first() {
            if option.route_ids().into_iter().any(|id| first.has_route(id)) {
                return false;
            }
        }
    }

    if config.exceeds_threshold(option.stats.avg, best.stats.avg) {
        return false;
    }

    option.leg_count() < config.trivial_leg_multiplier * best.leg_count()
}

/// Keep the first `limit` acceptable options for each access mode.
///
/// Ranked order is preserved within each mode. An option with several
/// access modes is considered once under each. `limit <= 0` keeps every
/// acceptable option.
pub fn select_per_mode(
    ranked: &[ProfileOption],
    best: &ProfileOption,
    limit: i32,
    config: &ProfileConfig,
) -> BTreeMap<TraverseMode, Vec<ProfileOption>> {
    let mut by_mode: BTreeMap<TraverseMode, Vec<&ProfileOption>> = BTreeMap::new();
    for option in ranked {
        for mode in option.access_modes() {
            by_mode.entry(mode).or_default().push(option);
        }
    }

    let cap = usize::try_from(limit).ok().filter(|&n| n > 0);
    by_mode
        .into_iter()
        .map(|(mode, candidates)| {
            let mut kept = Vec::new();
            for option in candidates {
                if cap.is_some_and(|n| kept.len() >= n) {
                    break;
                }
                if ok_option(option, best, config) {
                    kept.push(option.clone());
                }
            }
            debug!(%mode, kept = kept.len(), "selected transit options");
            (mode, kept)
        })
        .collect()
}
