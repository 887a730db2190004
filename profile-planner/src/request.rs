//! Self-contained profile requests.
//!
//! A request document bundles the planning date, the ranking parameters,
//! the candidate options and the timetable snapshot to realize them against.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::cache::{CacheConfig, CachedResolver};
use crate::domain::{ProfileOption, ServiceDay};
use crate::planner::{ProfileConfig, ProfileError, ProfileResponse, ScheduleAssembler, SortOrder};
use crate::snapshot::{PatternTimetable, SnapshotError, StaticTimetable};

/// Options kept per access mode when a request names no limit.
const DEFAULT_LIMIT: i32 = 3;

/// Error answering a request document.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("failed to read request: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse request: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// A profile request document.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRequest {
    /// Service date the schedules are assembled for.
    pub date: NaiveDate,
    #[serde(default)]
    pub order_by: SortOrder,
    /// Options kept per access mode; zero or less keeps all.
    #[serde(default = "default_limit")]
    pub limit: i32,
    pub options: Vec<ProfileOption>,
    #[serde(default)]
    pub timetable: Vec<PatternTimetable>,
}

fn default_limit() -> i32 {
    DEFAULT_LIMIT
}

impl ProfileRequest {
    pub fn from_json(json: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RequestError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Rank the request's options and assemble their schedules against its
    /// timetable.
    pub async fn answer(
        self,
        config: &ProfileConfig,
        cache_config: &CacheConfig,
    ) -> Result<ProfileResponse, RequestError> {
        let timetable = StaticTimetable::from_patterns(self.timetable)?;
        let mut response =
            ProfileResponse::build(self.options, self.order_by, self.limit, &timetable, config)?;

        let resolver = CachedResolver::new(timetable, cache_config);
        let assembler = ScheduleAssembler::new(&resolver, config);
        response
            .populate_schedules(&assembler, ServiceDay::new(self.date))
            .await?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST: &str = r#"{
        "date": "2024-03-15",
        "order_by": "AVG",
        "options": [
            {
                "access": [ { "mode": "WALK", "duration": 300 } ],
                "egress": [ { "mode": "WALK", "duration": 120 } ],
                "transit": [
                    {
                        "segment_patterns": [
                            { "pattern_id": "P1", "from_index": 0, "to_index": 1 }
                        ],
                        "routes": [ { "id": "R1", "mode": "BUS" } ]
                    },
                    {
                        "segment_patterns": [
                            { "pattern_id": "P2", "from_index": 0, "to_index": 1 }
                        ],
                        "routes": [ { "id": "R2", "mode": "TRAM" } ]
                    }
                ],
                "stats": { "min": 1500, "avg": 1800, "max": 2400 },
                "summary": "12 then tram"
            },
            {
                "access": [ { "mode": "WALK", "duration": 2700 } ],
                "stats": { "min": 2700, "avg": 2700, "max": 2700 },
                "summary": "walk"
            }
        ],
        "timetable": [
            {
                "pattern": { "id": "P1" },
                "route": { "id": "R1", "short_name": "12", "mode": "BUS" },
                "stops": ["S1", "S2"],
                "hop_distances": [900.0],
                "trips": [
                    { "trip_id": "A1", "service_date": "2024-03-15",
                      "stop_times": [ { "arrival": 28800, "departure": 28800 },
                                      { "arrival": 29400, "departure": 29400 } ] },
                    { "trip_id": "A2", "service_date": "2024-03-15",
                      "stop_times": [ { "arrival": 30600, "departure": 30600 },
                                      { "arrival": 31200, "departure": 31200 } ] }
                ]
            },
            {
                "pattern": { "id": "P2" },
                "route": { "id": "R2", "mode": "TRAM" },
                "stops": ["S2", "S3"],
                "hop_distances": [1200.0],
                "trips": [
                    { "trip_id": "B1", "service_date": "2024-03-15",
                      "stop_times": [ { "arrival": 29700, "departure": 29700 },
                                      { "arrival": 30300, "departure": 30300 } ] },
                    { "trip_id": "B2", "service_date": "2024-03-15",
                      "stop_times": [ { "arrival": 31500, "departure": 31500 },
                                      { "arrival": 32100, "departure": 32100 } ] }
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_with_defaults() {
        let request = ProfileRequest::from_json(REQUEST).unwrap();
        assert_eq!(request.order_by, SortOrder::Avg);
        assert_eq!(request.limit, DEFAULT_LIMIT);
        assert_eq!(request.options.len(), 2);
        assert_eq!(request.timetable.len(), 2);
    }

    #[tokio::test]
    async fn answers_end_to_end() {
        let request = ProfileRequest::from_json(REQUEST).unwrap();
        let response = request
            .answer(&ProfileConfig::default(), &CacheConfig::default())
            .await
            .unwrap();

        let summaries: Vec<&str> = response.options.iter().map(|o| o.summary.as_str()).collect();
        assert_eq!(summaries, ["walk", "12 then tram"]);

        let chains: Vec<Vec<&str>> = response
            .schedules
            .iter()
            .map(|s| s.trip_ids().map(|t| t.as_str()).collect())
            .collect();
        assert_eq!(chains, [vec!["A1", "B1"], vec!["A2", "B2"]]);
        assert_eq!(response.schedules[0].access_time(), 300);
        assert_eq!(response.schedules[0].egress_time(), 120);
    }

    #[tokio::test]
    async fn option_on_unknown_pattern_fails() {
        let mut request = ProfileRequest::from_json(REQUEST).unwrap();
        request.timetable.pop();

        let result = request
            .answer(&ProfileConfig::default(), &CacheConfig::default())
            .await;
        assert!(matches!(
            result,
            Err(RequestError::Profile(ProfileError::Resolve(_)))
        ));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, REQUEST).unwrap();

        let request = ProfileRequest::from_path(&path).unwrap();
        assert_eq!(request.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        assert!(matches!(
            ProfileRequest::from_path(dir.path().join("missing.json")),
            Err(RequestError::Io(_))
        ));
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ProfileRequest::from_path(&path),
            Err(RequestError::Json(_))
        ));
    }
}
