//! Request-level errors.

use crate::domain::{DomainError, PatternId};

use super::resolver::ResolveError;

/// Error that aborts a whole profile request.
///
/// Per-option problems such as a leg with no trips on the planning date are
/// not errors; they only leave that option without schedules.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProfileError {
    /// An option handed to the planner breaks an upstream contract
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The timetable lookup failed
    #[error("leg lookup failed: {0}")]
    Resolve(#[from] ResolveError),

    /// A pattern named by an option is missing from the network
    #[error("pattern {0} is not in the network")]
    UnknownPattern(PatternId),

    /// A pattern range runs past the pattern's last hop
    #[error("pattern {pattern} has {hops} hops but a leg rides to stop {to_index}")]
    HopOutOfRange {
        pattern: PatternId,
        to_index: usize,
        hops: usize,
    },

    /// The caller gave up on the request
    #[error("request cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ProfileError::from(DomainError::MalformedOption("leg 0".into()));
        assert_eq!(err.to_string(), "malformed option: leg 0");

        let err = ProfileError::from(ResolveError::Unavailable("snapshot closed".into()));
        assert_eq!(
            err.to_string(),
            "leg lookup failed: timetable unavailable: snapshot closed"
        );

        let err = ProfileError::HopOutOfRange {
            pattern: PatternId::new("P1").unwrap(),
            to_index: 5,
            hops: 3,
        };
        assert_eq!(
            err.to_string(),
            "pattern P1 has 3 hops but a leg rides to stop 5"
        );

        assert_eq!(ProfileError::Cancelled.to_string(), "request cancelled");
    }
}
