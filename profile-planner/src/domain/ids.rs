//! Identifier newtypes for routes, patterns, trips and stops.
//!
//! Identifiers are opaque strings assigned by the upstream feed. The only
//! validation is that they must be non-empty.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier, rejecting empty strings.
            pub fn new(s: impl Into<String>) -> Result<Self, DomainError> {
                let s = s.into();
                if s.is_empty() {
                    return Err(DomainError::EmptyId($what));
                }
                Ok(Self(s))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// A route identifier, e.g. `"TriMet:100"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_planner::domain::RouteId;
    ///
    /// let id = RouteId::new("TriMet:100").unwrap();
    /// assert_eq!(id.as_str(), "TriMet:100");
    /// assert!(RouteId::new("").is_err());
    /// ```
    RouteId,
    "route"
);

string_id!(
    /// A route-pattern identifier.
    PatternId,
    "pattern"
);

string_id!(
    /// A trip identifier. Schedules are identified by their trip sequence.
    TripId,
    "trip"
);

string_id!(
    /// A stop identifier.
    StopId,
    "stop"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_empty() {
        assert!(RouteId::new("").is_err());
        assert!(PatternId::new("").is_err());
        assert!(TripId::new("").is_err());
        assert!(StopId::new("").is_err());
    }

    #[test]
    fn display_and_debug() {
        let id = TripId::new("T1").unwrap();
        assert_eq!(format!("{id}"), "T1");
        assert_eq!(format!("{id:?}"), "TripId(T1)");
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = RouteId::new("A:10").unwrap();
        let b = RouteId::new("A:9").unwrap();
        assert!(a < b);
    }

    #[test]
    fn serde_rejects_empty() {
        let ok: RouteId = serde_json::from_str("\"R1\"").unwrap();
        assert_eq!(ok.as_str(), "R1");
        assert!(serde_json::from_str::<RouteId>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "\"R1\"");
    }
}
