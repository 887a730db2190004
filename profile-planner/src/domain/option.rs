//! Candidate itinerary shapes.
//!
//! A `ProfileOption` is one shape of itinerary produced by upstream search:
//! access alternatives, an ordered list of transit legs, and egress
//! alternatives. It is not yet bound to any date or trip.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DomainError, PatternId, RouteId, RouteShort, TraverseMode};

/// One access or egress alternative on the street network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreetSegment {
    pub mode: TraverseMode,
    /// Travel time in seconds.
    pub duration: u32,
}

impl StreetSegment {
    pub fn new(mode: TraverseMode, duration: u32) -> Self {
        Self { mode, duration }
    }
}

/// Travel-time summary across the realizable variants of an option, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub min: u32,
    pub avg: u32,
    pub max: u32,
}

impl Stats {
    pub fn new(min: u32, avg: u32, max: u32) -> Self {
        Self { min, avg, max }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "min={} avg={} max={}", self.min, self.avg, self.max)
    }
}

/// A route pattern and the hop range `[from_index, to_index)` a leg rides on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentPattern {
    pub pattern_id: PatternId,
    pub from_index: usize,
    pub to_index: usize,
}

impl SegmentPattern {
    pub fn new(pattern_id: PatternId, from_index: usize, to_index: usize) -> Self {
        Self {
            pattern_id,
            from_index,
            to_index,
        }
    }
}

/// One transit leg. Its patterns are interchangeable alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub segment_patterns: Vec<SegmentPattern>,
    pub routes: Vec<RouteShort>,
}

impl Segment {
    pub fn new(segment_patterns: Vec<SegmentPattern>, routes: Vec<RouteShort>) -> Self {
        Self {
            segment_patterns,
            routes,
        }
    }

    /// Returns true if any route serving this leg has the given id.
    pub fn has_route(&self, id: &RouteId) -> bool {
        self.routes.iter().any(|r| &r.id == id)
    }

    /// The lexicographically smallest route id serving this leg.
    pub fn min_route_id(&self) -> Option<&RouteId> {
        self.routes.iter().map(|r| &r.id).min()
    }
}

/// One candidate itinerary shape.
///
/// Equality and hashing are structural over every field, so identical
/// options produced by different upstream paths collapse in sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileOption {
    #[serde(default)]
    pub access: Vec<StreetSegment>,
    #[serde(default)]
    pub egress: Vec<StreetSegment>,
    #[serde(default)]
    pub transit: Vec<Segment>,
    pub stats: Stats,
    #[serde(default)]
    pub summary: String,
}

impl ProfileOption {
    /// Returns true if this option rides at least one transit leg.
    pub fn is_transit(&self) -> bool {
        !self.transit.is_empty()
    }

    /// Number of transit legs.
    pub fn leg_count(&self) -> usize {
        self.transit.len()
    }

    /// Access time in seconds: the fastest access alternative, or 0.
    pub fn access_time(&self) -> u32 {
        self.access.iter().map(|s| s.duration).min().unwrap_or(0)
    }

    /// Egress time in seconds: the fastest egress alternative, or 0.
    pub fn egress_time(&self) -> u32 {
        self.egress.iter().map(|s| s.duration).min().unwrap_or(0)
    }

    /// Distinct access modes, in order of first appearance.
    pub fn access_modes(&self) -> Vec<TraverseMode> {
        let mut modes = Vec::with_capacity(self.access.len());
        for segment in &self.access {
            if !modes.contains(&segment.mode) {
                modes.push(segment.mode);
            }
        }
        modes
    }

    /// Ids of every route serving any leg.
    pub fn route_ids(&self) -> HashSet<&RouteId> {
        self.transit
            .iter()
            .flat_map(|leg| leg.routes.iter().map(|r| &r.id))
            .collect()
    }

    /// Check the structural invariants a transit option must satisfy.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a leg has no patterns, no routes, or a pattern whose
    /// range is empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (i, leg) in self.transit.iter().enumerate() {
            if leg.segment_patterns.is_empty() {
                return Err(DomainError::MalformedOption(format!(
                    "leg {i} of '{}' has no patterns",
                    self.summary
                )));
            }
            if leg.routes.is_empty() {
                return Err(DomainError::MalformedOption(format!(
                    "leg {i} of '{}' has no routes",
                    self.summary
                )));
            }
            if let Some(p) = leg
                .segment_patterns
                .iter()
                .find(|p| p.from_index >= p.to_index)
            {
                return Err(DomainError::MalformedOption(format!(
                    "leg {i} of '{}' rides pattern {} over empty range {}..{}",
                    self.summary, p.pattern_id, p.from_index, p.to_index
                )));
            }
        }
        Ok(())
    }
}
