//! Matchup inputs and scoring outputs.

use super::{GameId, TeamAbbrev};
use chrono::NaiveDate;
use serde::Serialize;

/// One game on the requested day's schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledGame {
    pub game_id: GameId,
    pub date: NaiveDate,
    pub home: TeamAbbrev,
    pub away: TeamAbbrev,
}

/// One entry of a club's season schedule, as far as head-to-head needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubGame {
    pub home: Option<TeamAbbrev>,
    pub away: Option<TeamAbbrev>,
    /// Absent until the game has a final score.
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
}

/// Recent meetings between two teams. Ties count toward `games_found` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeadToHeadRecord {
    pub home_wins: u32,
    pub away_wins: u32,
    pub games_found: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeFactor {
    PointsPct,
    HomeAway,
    Injuries,
    GoalsBalance,
    Form,
    Goalie,
    #[serde(rename = "h2h_recent")]
    HeadToHead,
}

impl EdgeFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeFactor::PointsPct => "points_pct",
            EdgeFactor::HomeAway => "home_away",
            EdgeFactor::Injuries => "injuries",
            EdgeFactor::GoalsBalance => "goals_balance",
            EdgeFactor::Form => "form",
            EdgeFactor::Goalie => "goalie",
            EdgeFactor::HeadToHead => "h2h_recent",
        }
    }
}

impl std::fmt::Display for EdgeFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule's signed contribution and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeBreakdown {
    pub factor: EdgeFactor,
    pub team: Option<TeamAbbrev>,
    pub points: i32,
    pub reason: String,
}

impl EdgeBreakdown {
    pub fn new(
        factor: EdgeFactor,
        team: Option<&TeamAbbrev>,
        points: i32,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            factor,
            team: team.cloned(),
            points,
            reason: reason.into(),
        }
    }

    /// Zero-point entry recorded when a rule finds no edge.
    pub fn neutral(factor: EdgeFactor, reason: impl Into<String>) -> Self {
        Self::new(factor, None, 0, reason)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchupScoreResult {
    pub home_score: i32,
    pub away_score: i32,
    /// `home_score - away_score`, unclamped.
    pub differential: i32,
    pub probability_home: f64,
    pub probability_away: f64,
    pub projected_total_goals: f64,
    pub breakdown: Vec<EdgeBreakdown>,
}

/// A scored game, carrying the identifiers the presentation layer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchupResult {
    pub game_id: GameId,
    pub date: NaiveDate,
    pub home_team: TeamAbbrev,
    pub away_team: TeamAbbrev,
    pub score: MatchupScoreResult,
}
