//! Mock data source for testing without network calls.

use super::{DataSource, DataSourceError, Endpoint, REGULAR_SEASON};
use crate::domain::{SeasonId, TeamAbbrev};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock data source that serves predefined JSON payloads by endpoint.
///
/// Endpoints without a payload answer with a 404 `HttpError`. Every call is
/// recorded so tests can assert on caching and concurrency.
#[derive(Debug, Clone, Default)]
pub struct MockDataSource {
    responses: HashMap<String, serde_json::Value>,
    latency: Option<Duration>,
    stats: Arc<CallStats>,
}

#[derive(Debug, Default)]
struct CallStats {
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockDataSource {
    /// Create a new mock data source with no payloads.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `endpoint`.
    pub fn with_response(mut self, endpoint: Endpoint, body: serde_json::Value) -> Self {
        self.responses.insert(endpoint.path(), body);
        self
    }

    pub fn with_schedule(self, date: NaiveDate, body: serde_json::Value) -> Self {
        self.with_response(Endpoint::Schedule(date), body)
    }

    pub fn with_standings(self, date: NaiveDate, body: serde_json::Value) -> Self {
        self.with_response(Endpoint::Standings(date), body)
    }

    /// Regular-season club stats for `team`.
    pub fn with_club_stats(self, team: &str, season: SeasonId, body: serde_json::Value) -> Self {
        self.with_response(
            Endpoint::ClubStats {
                team: TeamAbbrev::new(team),
                season,
                game_type: REGULAR_SEASON,
            },
            body,
        )
    }

    pub fn with_club_schedule(self, team: &str, season: SeasonId, body: serde_json::Value) -> Self {
        self.with_response(
            Endpoint::ClubScheduleSeason {
                team: TeamAbbrev::new(team),
                season,
            },
            body,
        )
    }

    /// Delay every response, so concurrent callers overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Paths requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.stats
            .calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self, endpoint: &Endpoint) -> usize {
        let path = endpoint.path();
        self.calls().iter().filter(|c| **c == path).count()
    }

    /// Highest number of requests that were in flight at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.stats.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<serde_json::Value, DataSourceError> {
        let path = endpoint.path();
        if let Ok(mut calls) = self.stats.calls.lock() {
            calls.push(path.clone());
        }

        let now = self.stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.stats.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.responses
            .get(&path)
            .cloned()
            .ok_or_else(|| DataSourceError::HttpError {
                status: 404,
                message: format!("no mock payload for {}", path),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[tokio::test]
    async fn test_mock_serves_registered_payload() {
        let mock = MockDataSource::new().with_standings(date(), json!({"standings": []}));
        let body = mock.fetch(&Endpoint::Standings(date())).await.unwrap();
        assert_eq!(body, json!({"standings": []}));
    }

    #[tokio::test]
    async fn test_mock_missing_payload_is_404() {
        let mock = MockDataSource::new();
        let err = mock.fetch(&Endpoint::Schedule(date())).await.unwrap_err();
        assert!(matches!(err, DataSourceError::HttpError { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_mock_records_calls_across_clones() {
        let mock = MockDataSource::new();
        let clone = mock.clone();
        let _ = clone.fetch(&Endpoint::Standings(date())).await;
        let _ = clone.fetch(&Endpoint::Standings(date())).await;
        assert_eq!(mock.call_count(&Endpoint::Standings(date())), 2);
        assert_eq!(mock.calls(), vec!["standings/2025-03-01", "standings/2025-03-01"]);
    }
}
