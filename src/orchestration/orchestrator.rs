use crate::config::Config;
use crate::datasource::DataSourceError;
use crate::domain::{MatchupResult, ScheduledGame};
use crate::engine::ScoringEngine;
use crate::orchestration::league::LeagueClient;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Orchestrator {
    league: Arc<LeagueClient>,
    engine: ScoringEngine,
    h2h_games: u32,
    h2h_max_seasons: u32,
}

impl Orchestrator {
    pub fn new(league: Arc<LeagueClient>, engine: ScoringEngine) -> Self {
        Self {
            league,
            engine,
            h2h_games: 5,
            h2h_max_seasons: 5,
        }
    }

    pub fn from_config(league: Arc<LeagueClient>, config: &Config) -> Self {
        Self::new(league, ScoringEngine::new(config.scoring))
            .with_head_to_head(config.h2h_games, config.h2h_max_seasons)
    }

    pub fn with_head_to_head(mut self, games: u32, max_seasons: u32) -> Self {
        self.h2h_games = games;
        self.h2h_max_seasons = max_seasons;
        self
    }

    pub fn league(&self) -> &LeagueClient {
        &self.league
    }

    /// Fetch the schedule for `date` and score every game on it.
    pub async fn matchups_for(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<MatchupResult>, OrchestrationError> {
        let games = self
            .league
            .schedule(date)
            .await
            .map_err(OrchestrationError::ScheduleUnavailable)?;
        let results = self.build_matchups(date, &games).await;
        info!(%date, games = games.len(), matchups = results.len(), "matchups scored");
        Ok(results)
    }

    /// Score each game in schedule order, one game at a time.
    pub async fn build_matchups(
        &self,
        date: NaiveDate,
        games: &[ScheduledGame],
    ) -> Vec<MatchupResult> {
        let mut results = Vec::with_capacity(games.len());
        for game in games {
            let home = self.league.build_team_snapshot(&game.home, date).await;
            let away = self.league.build_team_snapshot(&game.away, date).await;
            let h2h = self
                .league
                .head_to_head(
                    &game.home,
                    &game.away,
                    self.h2h_games,
                    self.h2h_max_seasons,
                    date,
                )
                .await;

            results.push(MatchupResult {
                game_id: game.game_id.clone(),
                date: game.date,
                home_team: game.home.clone(),
                away_team: game.away.clone(),
                score: self.engine.score(&home, &away, h2h.as_ref()),
            });
        }
        results
    }
}

#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("schedule unavailable: {0}")]
    ScheduleUnavailable(DataSourceError),
}
