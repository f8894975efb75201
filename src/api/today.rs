use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::domain::{EdgeBreakdown, MatchupResult};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayQuery {
    /// `YYYY-MM-DD`; defaults to the server's local date.
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayResponse {
    pub date: String,
    pub matchups: Vec<MatchupDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupDto {
    pub game_id: String,
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub score: ScoreDto,
    pub probability: ProbabilityDto,
    pub projected_total_goals: f64,
    pub breakdown: Vec<BreakdownDto>,
}

#[derive(Debug, Serialize)]
pub struct ScoreDto {
    pub home: i32,
    pub away: i32,
    pub diff: i32,
}

#[derive(Debug, Serialize)]
pub struct ProbabilityDto {
    pub home: f64,
    pub away: f64,
}

#[derive(Debug, Serialize)]
pub struct BreakdownDto {
    pub factor: &'static str,
    pub team: Option<String>,
    pub points: i32,
    pub reason: String,
}

pub async fn get_today(
    Query(params): Query<TodayQuery>,
    State(state): State<AppState>,
) -> Result<Json<TodayResponse>, AppError> {
    let date = match params.date.as_deref() {
        Some("") | None => chrono::Local::now().date_naive(),
        Some(raw) => parse_date(raw)?,
    };

    let results = state.orchestrator.matchups_for(date).await?;

    Ok(Json(TodayResponse {
        date: date.format("%Y-%m-%d").to_string(),
        matchups: results.into_iter().map(MatchupDto::from).collect(),
    }))
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest("date must be YYYY-MM-DD".into()))
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

impl From<MatchupResult> for MatchupDto {
    fn from(result: MatchupResult) -> Self {
        let score = result.score;
        MatchupDto {
            game_id: result.game_id.to_string(),
            date: result.date.format("%Y-%m-%d").to_string(),
            home_team: result.home_team.to_string(),
            away_team: result.away_team.to_string(),
            score: ScoreDto {
                home: score.home_score,
                away: score.away_score,
                diff: score.differential,
            },
            probability: ProbabilityDto {
                home: round_to(score.probability_home, 4),
                away: round_to(score.probability_away, 4),
            },
            projected_total_goals: round_to(score.projected_total_goals, 2),
            breakdown: score.breakdown.into_iter().map(BreakdownDto::from).collect(),
        }
    }
}

impl From<EdgeBreakdown> for BreakdownDto {
    fn from(entry: EdgeBreakdown) -> Self {
        BreakdownDto {
            factor: entry.factor.as_str(),
            team: entry.team.map(|t| t.to_string()),
            points: entry.points,
            reason: entry.reason,
        }
    }
}
