//! Data source abstraction for fetching league data from the upstream API.

use crate::domain::{SeasonId, TeamAbbrev};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt;

pub mod fields;
pub mod mock;
pub mod nhl;
pub mod parse;

pub use mock::MockDataSource;
pub use nhl::NhlDataSource;

/// Game type code the league API uses for regular-season games.
pub const REGULAR_SEASON: u8 = 2;

/// Upstream resources this crate reads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Schedule for the week containing the date.
    Schedule(NaiveDate),
    /// League standings table as of the date.
    Standings(NaiveDate),
    /// Club skater/goalie statistics for one season and game type.
    ClubStats {
        team: TeamAbbrev,
        season: SeasonId,
        game_type: u8,
    },
    /// Every game one club played or will play in a season.
    ClubScheduleSeason { team: TeamAbbrev, season: SeasonId },
}

impl Endpoint {
    /// Path relative to the API base, without a leading slash.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Schedule(date) => format!("schedule/{}", date.format("%Y-%m-%d")),
            Endpoint::Standings(date) => format!("standings/{}", date.format("%Y-%m-%d")),
            Endpoint::ClubStats {
                team,
                season,
                game_type,
            } => format!("club-stats/{}/{}/{}", team, season, game_type),
            Endpoint::ClubScheduleSeason { team, season } => {
                format!("club-schedule-season/{}/{}", team, season)
            }
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}

/// Data source trait for fetching raw upstream payloads.
///
/// One attempt per call, no retries. Every failure is reported as a
/// `DataSourceError`; callers treat any error as "upstream has no opinion".
#[async_trait]
pub trait DataSource: Send + Sync + fmt::Debug {
    /// Fetch and decode the JSON body behind an endpoint.
    async fn fetch(&self, endpoint: &Endpoint) -> Result<serde_json::Value, DataSourceError>;
}

/// Error type for data source operations.
#[derive(Debug, Clone)]
pub enum DataSourceError {
    /// Network error (e.g., connection timeout, DNS failure)
    NetworkError(String),
    /// HTTP error (any non-success status other than 429)
    HttpError { status: u16, message: String },
    /// Parsing error (invalid JSON or malformed response)
    ParseError(String),
    /// Rate limit exceeded
    RateLimited,
    /// Other error
    Other(String),
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DataSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            DataSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DataSourceError::RateLimited => write!(f, "Rate limited"),
            DataSourceError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for DataSourceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datasource_error_display() {
        let err = DataSourceError::HttpError {
            status: 503,
            message: "standings unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 503: standings unavailable");
        assert_eq!(DataSourceError::RateLimited.to_string(), "Rate limited");
        assert_eq!(
            DataSourceError::ParseError("expected value at line 1".to_string()).to_string(),
            "Parse error: expected value at line 1"
        );
    }

    #[tokio::test]
    async fn test_unserved_endpoint_error_names_its_path() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let err = MockDataSource::new()
            .fetch(&Endpoint::Standings(date))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "HTTP error 404: no mock payload for standings/2025-03-01"
        );
    }

    #[test]
    fn test_endpoint_paths() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(Endpoint::Schedule(date).path(), "schedule/2025-03-01");
        assert_eq!(Endpoint::Standings(date).path(), "standings/2025-03-01");
        assert_eq!(
            Endpoint::ClubStats {
                team: TeamAbbrev::new("tor"),
                season: SeasonId::new(2024),
                game_type: REGULAR_SEASON,
            }
            .path(),
            "club-stats/TOR/20242025/2"
        );
        assert_eq!(
            Endpoint::ClubScheduleSeason {
                team: TeamAbbrev::new("BOS"),
                season: SeasonId::new(2023),
            }
            .to_string(),
            "/club-schedule-season/BOS/20232024"
        );
    }
}
