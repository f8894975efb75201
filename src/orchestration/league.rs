//! League data access: cached standings, ranks and goalie factors, team
//! snapshots and head-to-head history.
//!
//! Every upstream failure is logged and masked here. Callers only see
//! "unavailable" (`None`) or a neutral default, except for the schedule which
//! has no sensible default.

use crate::cache::KeyedCache;
use crate::config::Config;
use crate::datasource::parse::{
    parse_club_goalies, parse_club_schedule, parse_schedule, parse_standings,
};
use crate::datasource::{DataSource, DataSourceError, Endpoint, REGULAR_SEASON};
use crate::domain::{
    GoalieFactor, HeadToHeadRecord, ScheduledGame, SeasonId, StandingsSnapshot, TeamAbbrev,
    TeamSnapshot,
};
use crate::engine::{compute_ranks, resolve_goalie_factor, HeadToHeadTally, RankTable};
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Goalie factor per team for one calendar date.
pub type GoalieTable = HashMap<TeamAbbrev, GoalieFactor>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeagueSettings {
    /// Fixed season for club stats and the head-to-head walk; derived from
    /// the request date when absent.
    pub season_override: Option<SeasonId>,
    pub goalie_fetch_concurrency: usize,
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            season_override: None,
            goalie_fetch_concurrency: 8,
        }
    }
}

impl From<&Config> for LeagueSettings {
    fn from(config: &Config) -> Self {
        Self {
            season_override: config.season_override,
            goalie_fetch_concurrency: config.goalie_fetch_concurrency,
        }
    }
}

#[derive(Debug)]
pub struct LeagueClient {
    datasource: Arc<dyn DataSource>,
    settings: LeagueSettings,
    standings: KeyedCache<NaiveDate, StandingsSnapshot>,
    ranks: KeyedCache<String, RankTable>,
    goalies: KeyedCache<NaiveDate, GoalieTable>,
}

impl LeagueClient {
    pub fn new(datasource: Arc<dyn DataSource>, settings: LeagueSettings) -> Self {
        Self {
            datasource,
            settings,
            standings: KeyedCache::new("standings"),
            ranks: KeyedCache::new("ranks"),
            goalies: KeyedCache::new("goalies"),
        }
    }

    pub fn settings(&self) -> LeagueSettings {
        self.settings
    }

    /// Season used for club stats and as the newest head-to-head season.
    pub fn season_for(&self, date: NaiveDate) -> SeasonId {
        self.settings
            .season_override
            .unwrap_or_else(|| SeasonId::for_date(date))
    }

    async fn fetch_json(&self, endpoint: &Endpoint) -> Option<serde_json::Value> {
        fetch_or_warn(self.datasource.as_ref(), endpoint).await
    }

    /// Games scheduled on `date`. The only fetch whose failure is surfaced.
    pub async fn schedule(&self, date: NaiveDate) -> Result<Vec<ScheduledGame>, DataSourceError> {
        let body = self.datasource.fetch(&Endpoint::Schedule(date)).await?;
        let games = parse_schedule(&body, date);
        debug!(%date, games = games.len(), "schedule parsed");
        Ok(games)
    }

    /// Standings table for `date`, cached until the date changes.
    pub async fn standings(&self, date: NaiveDate) -> Option<Arc<StandingsSnapshot>> {
        self.standings
            .refresh_if_stale(date, || async move {
                let body = self.fetch_json(&Endpoint::Standings(date)).await?;
                let snapshot = parse_standings(&body);
                if snapshot.is_none() {
                    warn!(%date, "standings payload has no usable rows");
                }
                snapshot
            })
            .await
    }

    /// Rank table for a standings snapshot, cached by the snapshot's fingerprint.
    pub async fn ranks_for(&self, snapshot: &StandingsSnapshot) -> Arc<RankTable> {
        let cached = self
            .ranks
            .refresh_if_stale(snapshot.fingerprint.clone(), || async {
                Some(compute_ranks(&snapshot.rows))
            })
            .await;
        cached.unwrap_or_else(|| Arc::new(compute_ranks(&snapshot.rows)))
    }

    /// Goalie factors for every team in the standings for `date`.
    ///
    /// Club stats are fetched concurrently, at most
    /// `goalie_fetch_concurrency` in flight. `None` when standings are
    /// unavailable. That outcome is not memoized: every call for the date
    /// retries the standings fetch instead of reusing an empty table.
    pub async fn goalie_factors(&self, date: NaiveDate) -> Option<Arc<GoalieTable>> {
        self.goalies
            .refresh_if_stale(date, || async move {
                let standings = self.standings(date).await?;
                Some(self.resolve_goalies(&standings.teams(), self.season_for(date)).await)
            })
            .await
    }

    async fn resolve_goalies(&self, teams: &[TeamAbbrev], season: SeasonId) -> GoalieTable {
        let limit = self.settings.goalie_fetch_concurrency.max(1);
        let datasource = Arc::clone(&self.datasource);
        let fetches = teams.iter().cloned().map(move |team| {
            let datasource = Arc::clone(&datasource);
            async move {
                let endpoint = Endpoint::ClubStats {
                    team: team.clone(),
                    season,
                    game_type: REGULAR_SEASON,
                };
                let factor = match fetch_or_warn(datasource.as_ref(), &endpoint).await {
                    Some(body) => resolve_goalie_factor(&parse_club_goalies(&body)),
                    None => GoalieFactor::neutral(),
                };
                (team, factor)
            }
        });
        let table: GoalieTable = stream::iter(fetches)
            .buffer_unordered(limit)
            .collect()
            .await;

        info!(%season, teams = table.len(), "goalie factors resolved");
        table
    }

    /// Goalie factor for one team; neutral when unknown.
    pub async fn team_goalie_factor(&self, team: &TeamAbbrev, date: NaiveDate) -> GoalieFactor {
        self.goalie_factors(date)
            .await
            .and_then(|table| table.get(team).copied())
            .unwrap_or_default()
    }

    /// Snapshot for `team` on `date`, or the neutral stand-in when the team
    /// has no standings row.
    pub async fn build_team_snapshot(&self, team: &TeamAbbrev, date: NaiveDate) -> TeamSnapshot {
        let Some(standings) = self.standings(date).await else {
            return TeamSnapshot::neutral(team.clone());
        };
        let Some(row) = standings.find(team) else {
            warn!(%team, %date, "team missing from standings, using neutral snapshot");
            return TeamSnapshot::neutral(team.clone());
        };

        let ranks = self.ranks_for(&standings).await;
        let team_ranks = ranks.get(team);

        TeamSnapshot {
            team: team.clone(),
            points_pct: row.effective_points_pct(),
            home_points_pct: row.home.points_pct(),
            away_points_pct: row.road.points_pct(),
            goals_for_rank: team_ranks.map(|r| r.goals_for),
            goals_against_rank: team_ranks.map(|r| r.goals_against),
            last10_points_pct: row.last10.points_pct(),
            streak: row.streak,
            out_top15_scorers: 0,
            out_top50_scorers: 0,
            goalie: self.team_goalie_factor(team, date).await,
        }
    }

    /// Up to `games` most recent meetings between two teams, looking back at
    /// most `max_seasons` seasons from the one containing `date`.
    ///
    /// Seasons are fetched one at a time and the walk stops as soon as enough
    /// meetings are found. `None` when no meeting turned up at all.
    pub async fn head_to_head(
        &self,
        home: &TeamAbbrev,
        away: &TeamAbbrev,
        games: u32,
        max_seasons: u32,
        date: NaiveDate,
    ) -> Option<HeadToHeadRecord> {
        let mut tally = HeadToHeadTally::new(home.clone(), away.clone(), games);

        for season in self.season_for(date).walk_back(max_seasons as usize) {
            if tally.is_complete() {
                break;
            }
            let endpoint = Endpoint::ClubScheduleSeason {
                team: home.clone(),
                season,
            };
            if let Some(body) = self.fetch_json(&endpoint).await {
                tally.scan_season(&parse_club_schedule(&body));
            }
        }

        let record = tally.finish();
        debug!(%home, %away, ?record, "head-to-head resolved");
        record
    }
}

async fn fetch_or_warn(
    datasource: &dyn DataSource,
    endpoint: &Endpoint,
) -> Option<serde_json::Value> {
    match datasource.fetch(endpoint).await {
        Ok(body) => Some(body),
        Err(e) => {
            warn!(endpoint = %endpoint, error = %e, "upstream unavailable, using defaults");
            None
        }
    }
}
