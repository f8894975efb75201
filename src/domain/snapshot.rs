//! Per-team statistical snapshot consumed by the scoring engine.

use super::{Streak, StreakKind, TeamAbbrev};

/// League-midpoint rank used wherever a rank is unknown but a value is needed.
pub const LEAGUE_MIDPOINT_RANK: u32 = 16;

/// Goalie factor for one team, derived from its starter(s) save percentage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GoalieFactor {
    /// Bucketed score in -2..=2.
    pub score: i32,
    /// Save percentage the score came from (average of two goalies on a platoon).
    pub save_pct: Option<f64>,
    /// Games played by the leading goalie.
    pub games_played: u32,
    pub used_split: bool,
}

impl GoalieFactor {
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// One goalie's line from a club's season statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalieLine {
    pub games_played: u32,
    pub save_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamSnapshot {
    pub team: TeamAbbrev,
    pub points_pct: Option<f64>,
    pub home_points_pct: Option<f64>,
    pub away_points_pct: Option<f64>,
    /// 1 = most goals scored.
    pub goals_for_rank: Option<u32>,
    /// 1 = fewest goals allowed.
    pub goals_against_rank: Option<u32>,
    pub last10_points_pct: Option<f64>,
    pub streak: Option<Streak>,
    pub out_top15_scorers: u32,
    pub out_top50_scorers: u32,
    pub goalie: GoalieFactor,
}

impl TeamSnapshot {
    /// Snapshot with every statistic absent.
    pub fn empty(team: TeamAbbrev) -> Self {
        Self {
            team,
            points_pct: None,
            home_points_pct: None,
            away_points_pct: None,
            goals_for_rank: None,
            goals_against_rank: None,
            last10_points_pct: None,
            streak: None,
            out_top15_scorers: 0,
            out_top50_scorers: 0,
            goalie: GoalieFactor::neutral(),
        }
    }

    /// Stand-in used when a team has no standings row.
    ///
    /// Home/away splits stay absent: a 0.5 split on both sides would read as
    /// "both losing" and hand the home team a point out of no data.
    pub fn neutral(team: TeamAbbrev) -> Self {
        Self {
            points_pct: Some(0.5),
            goals_for_rank: Some(LEAGUE_MIDPOINT_RANK),
            goals_against_rank: Some(LEAGUE_MIDPOINT_RANK),
            last10_points_pct: Some(0.5),
            ..Self::empty(team)
        }
    }

    pub fn streak_kind(&self) -> Option<StreakKind> {
        self.streak.map(|s| s.kind)
    }

    pub fn goalie_factor(&self) -> i32 {
        self.goalie.score
    }
}
