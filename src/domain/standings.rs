//! Standings table rows and the per-date snapshot they live in.

use super::TeamAbbrev;
use std::collections::BTreeSet;

/// Win / regulation-loss / overtime-loss counts for one split of the season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub ot_losses: u32,
}

impl Record {
    pub fn new(wins: u32, losses: u32, ot_losses: u32) -> Self {
        Self {
            wins,
            losses,
            ot_losses,
        }
    }

    /// Widened so counts taken straight from an upstream payload cannot overflow.
    pub fn games(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.losses) + u64::from(self.ot_losses)
    }

    /// `(2W + OTL) / (2 * games)`; `None` when no games were played.
    pub fn points_pct(&self) -> Option<f64> {
        let games = self.games();
        if games == 0 {
            return None;
        }
        let points = 2 * u64::from(self.wins) + u64::from(self.ot_losses);
        Some(points as f64 / (2 * games) as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreakKind {
    Win,
    Loss,
    Overtime,
}

impl StreakKind {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "W" => Some(StreakKind::Win),
            "L" => Some(StreakKind::Loss),
            "OT" | "O" => Some(StreakKind::Overtime),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streak {
    pub kind: StreakKind,
    pub length: u32,
}

/// One team's row in the league standings table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StandingsRow {
    pub team: Option<TeamAbbrev>,
    pub overall: Record,
    pub home: Record,
    pub road: Record,
    pub last10: Record,
    /// Points percentage as reported upstream, if present.
    pub points_pct: Option<f64>,
    pub goals_for: Option<f64>,
    pub goals_against: Option<f64>,
    pub streak: Option<Streak>,
}

impl StandingsRow {
    /// Prefer the upstream figure, else derive it from the overall record.
    pub fn effective_points_pct(&self) -> Option<f64> {
        self.points_pct.or_else(|| self.overall.points_pct())
    }
}

/// Standings table for one calendar date.
///
/// `fingerprint` identifies the payload the rows were parsed from, so tables
/// derived from it (ranks) can be cached against it.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingsSnapshot {
    pub rows: Vec<StandingsRow>,
    pub fingerprint: String,
}

impl StandingsSnapshot {
    pub fn new(rows: Vec<StandingsRow>, fingerprint: String) -> Self {
        Self { rows, fingerprint }
    }

    pub fn find(&self, team: &TeamAbbrev) -> Option<&StandingsRow> {
        self.rows.iter().find(|r| r.team.as_ref() == Some(team))
    }

    /// Every team listed, sorted and de-duplicated.
    pub fn teams(&self) -> Vec<TeamAbbrev> {
        self.rows
            .iter()
            .filter_map(|r| r.team.clone())
            .filter(|t| !t.as_str().is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
