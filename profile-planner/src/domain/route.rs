//! Route and pattern summaries.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{PatternId, RouteId};

/// A way of travelling: street modes for access/egress, transit modes for routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraverseMode {
    Walk,
    Bicycle,
    Car,
    Bus,
    Tram,
    Subway,
    Rail,
    Ferry,
    CableCar,
    Gondola,
    Funicular,
}

impl fmt::Display for TraverseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Walk => "WALK",
            Self::Bicycle => "BICYCLE",
            Self::Car => "CAR",
            Self::Bus => "BUS",
            Self::Tram => "TRAM",
            Self::Subway => "SUBWAY",
            Self::Rail => "RAIL",
            Self::Ferry => "FERRY",
            Self::CableCar => "CABLE_CAR",
            Self::Gondola => "GONDOLA",
            Self::Funicular => "FUNICULAR",
        };
        f.write_str(s)
    }
}

/// Summary of a route, as attached to legs and realized stop pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteShort {
    pub id: RouteId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    pub mode: TraverseMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,
}

impl RouteShort {
    /// Create a route summary with only an id and mode.
    pub fn new(id: RouteId, mode: TraverseMode) -> Self {
        Self {
            id,
            short_name: None,
            long_name: None,
            mode,
            color: None,
            agency_name: None,
        }
    }
}

/// Prefers the short name, then the long name, then the id.
impl fmt::Display for RouteShort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.short_name {
            return f.write_str(name);
        }
        if let Some(name) = &self.long_name {
            return f.write_str(name);
        }
        write!(f, "{}", self.id)
    }
}

/// Summary of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternShort {
    pub id: PatternId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

impl PatternShort {
    pub fn new(id: PatternId) -> Self {
        Self { id, desc: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> RouteShort {
        RouteShort::new(RouteId::new("R:1").unwrap(), TraverseMode::Bus)
    }

    #[test]
    fn display_prefers_short_name() {
        let mut r = route();
        assert_eq!(r.to_string(), "R:1");

        r.long_name = Some("Crosstown".into());
        assert_eq!(r.to_string(), "Crosstown");

        r.short_name = Some("12".into());
        assert_eq!(r.to_string(), "12");
    }

    #[test]
    fn mode_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&TraverseMode::CableCar).unwrap(),
            "\"CABLE_CAR\""
        );
        assert_eq!(TraverseMode::CableCar.to_string(), "CABLE_CAR");
        let m: TraverseMode = serde_json::from_str("\"BICYCLE\"").unwrap();
        assert_eq!(m, TraverseMode::Bicycle);
    }

    #[test]
    fn optional_names_are_omitted() {
        let json = serde_json::to_value(route()).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "R:1", "mode": "BUS" }));
    }
}
