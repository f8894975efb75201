//! Edge rules. Each rule is a pure function of its inputs that returns the
//! points it awards to each side plus the breakdown entries explaining them.

use crate::domain::{
    EdgeBreakdown, EdgeFactor, HeadToHeadRecord, StreakKind, TeamAbbrev, TeamSnapshot,
};

/// Signed points for each side and the entries that justify them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleOutcome {
    pub home: i32,
    pub away: i32,
    pub entries: Vec<EdgeBreakdown>,
}

impl RuleOutcome {
    fn neutral(factor: EdgeFactor, reason: impl Into<String>) -> Self {
        Self {
            home: 0,
            away: 0,
            entries: vec![EdgeBreakdown::neutral(factor, reason)],
        }
    }

    fn for_home(factor: EdgeFactor, home: &TeamSnapshot, points: i32, reason: &str) -> Self {
        Self {
            home: points,
            away: 0,
            entries: vec![EdgeBreakdown::new(factor, Some(&home.team), points, reason)],
        }
    }

    fn for_away(factor: EdgeFactor, away: &TeamSnapshot, points: i32, reason: &str) -> Self {
        Self {
            home: 0,
            away: points,
            entries: vec![EdgeBreakdown::new(factor, Some(&away.team), points, reason)],
        }
    }
}

/// Rule over the two team snapshots.
pub type SnapshotRule = fn(&TeamSnapshot, &TeamSnapshot) -> RuleOutcome;

/// Snapshot rules in application order. Head-to-head runs after these.
pub const SNAPSHOT_RULES: [SnapshotRule; 6] = [
    points_pct_edge,
    home_away_edge,
    injuries_edge,
    goals_balance_edge,
    form_edge,
    goalie_edge,
];

const POINTS_PCT_EDGE: i32 = 5;

pub fn points_pct_edge(home: &TeamSnapshot, away: &TeamSnapshot) -> RuleOutcome {
    let factor = EdgeFactor::PointsPct;
    let (Some(hp), Some(ap)) = (home.points_pct, away.points_pct) else {
        return RuleOutcome::neutral(factor, "Missing points% data");
    };

    if hp > ap {
        RuleOutcome::for_home(factor, home, POINTS_PCT_EDGE, "Higher points%")
    } else if ap > hp {
        RuleOutcome::for_away(factor, away, POINTS_PCT_EDGE, "Higher points%")
    } else {
        RuleOutcome::neutral(factor, "Equal points%")
    }
}

/// Home team's home split against the away team's road split.
///
/// When both splits are winning, or both losing, the home side takes the
/// single point.
pub fn home_away_edge(home: &TeamSnapshot, away: &TeamSnapshot) -> RuleOutcome {
    let factor = EdgeFactor::HomeAway;
    let (Some(home_split), Some(away_split)) = (home.home_points_pct, away.away_points_pct) else {
        return RuleOutcome::neutral(factor, "Missing home/away data");
    };

    match (home_split > 0.5, away_split > 0.5) {
        (true, false) => RuleOutcome::for_home(factor, home, 2, "Home winning; away losing"),
        (false, true) => RuleOutcome::for_away(factor, away, 2, "Away winning; home losing"),
        (true, true) => {
            RuleOutcome::for_home(factor, home, 1, "Both winning splits; home slight edge")
        }
        (false, false) => {
            RuleOutcome::for_home(factor, home, 1, "Both losing splits; home slight edge")
        }
    }
}

/// Penalty for one team's missing scorers, evaluated per team.
fn injury_penalty(team: &TeamSnapshot) -> Option<EdgeBreakdown> {
    let factor = EdgeFactor::Injuries;
    if team.out_top15_scorers > 0 {
        Some(EdgeBreakdown::new(
            factor,
            Some(&team.team),
            -5,
            format!("Missing top-15 scorer(s): {}", team.out_top15_scorers),
        ))
    } else if team.out_top50_scorers > 0 {
        Some(EdgeBreakdown::new(
            factor,
            Some(&team.team),
            -3,
            format!("Missing top-50 scorer(s): {}", team.out_top50_scorers),
        ))
    } else {
        None
    }
}

pub fn injuries_edge(home: &TeamSnapshot, away: &TeamSnapshot) -> RuleOutcome {
    let home_penalty = injury_penalty(home);
    let away_penalty = injury_penalty(away);
    if home_penalty.is_none() && away_penalty.is_none() {
        return RuleOutcome::neutral(EdgeFactor::Injuries, "No significant scoring injuries");
    }

    RuleOutcome {
        home: home_penalty.as_ref().map_or(0, |e| e.points),
        away: away_penalty.as_ref().map_or(0, |e| e.points),
        entries: home_penalty.into_iter().chain(away_penalty).collect(),
    }
}

const ELITE_RANK_MAX: u32 = 15;
const POOR_RANK_MIN: u32 = 18;

pub fn goals_balance_edge(home: &TeamSnapshot, away: &TeamSnapshot) -> RuleOutcome {
    let factor = EdgeFactor::GoalsBalance;
    let (Some(hgf), Some(hga), Some(agf), Some(aga)) = (
        home.goals_for_rank,
        home.goals_against_rank,
        away.goals_for_rank,
        away.goals_against_rank,
    ) else {
        return RuleOutcome::neutral(factor, "Missing goals rank data");
    };

    let elite = |gf: u32, ga: u32| gf <= ELITE_RANK_MAX && ga <= ELITE_RANK_MAX;
    let poor = |gf: u32, ga: u32| gf >= POOR_RANK_MIN && ga >= POOR_RANK_MIN;
    let (home_elite, away_elite) = (elite(hgf, hga), elite(agf, aga));
    let (home_poor, away_poor) = (poor(hgf, hga), poor(agf, aga));

    const ELITE: &str = "Top-15 goals for AND top-15 goals against";
    const POOR: &str = "Bottom-15 goals for AND bottom-15 goals against";

    if home_elite && !away_elite {
        RuleOutcome::for_home(factor, home, 2, ELITE)
    } else if away_elite && !home_elite {
        RuleOutcome::for_away(factor, away, 2, ELITE)
    } else if home_poor && !away_poor {
        RuleOutcome::for_home(factor, home, -2, POOR)
    } else if away_poor && !home_poor {
        RuleOutcome::for_away(factor, away, -2, POOR)
    } else {
        RuleOutcome::neutral(factor, "No clear goals balance edge")
    }
}

/// Last-10 form combined with the current streak.
fn form_points(team: &TeamSnapshot) -> i32 {
    let Some(last10) = team.last10_points_pct else {
        return 0;
    };
    let above = last10 > 0.5;
    let below = last10 < 0.5;

    match team.streak_kind() {
        Some(StreakKind::Win) if above => 2,
        Some(StreakKind::Loss) if above => -2,
        Some(StreakKind::Loss) if below => -2,
        Some(StreakKind::Win) if below => 1,
        _ => 0,
    }
}

pub fn form_edge(home: &TeamSnapshot, away: &TeamSnapshot) -> RuleOutcome {
    let factor = EdgeFactor::Form;
    let home_points = form_points(home);
    let away_points = form_points(away);
    if home_points == away_points {
        return RuleOutcome::neutral(factor, "Form factors offset or equal");
    }

    let mut entries = Vec::new();
    if home_points != 0 {
        entries.push(EdgeBreakdown::new(
            factor,
            Some(&home.team),
            home_points,
            "Last 10 + streak effect",
        ));
    }
    if away_points != 0 {
        entries.push(EdgeBreakdown::new(
            factor,
            Some(&away.team),
            away_points,
            "Last 10 + streak effect",
        ));
    }

    RuleOutcome {
        home: home_points,
        away: away_points,
        entries,
    }
}

pub fn goalie_edge(home: &TeamSnapshot, away: &TeamSnapshot) -> RuleOutcome {
    let factor = EdgeFactor::Goalie;
    let (h, a) = (home.goalie_factor(), away.goalie_factor());
    const REASON: &str = "Stronger team goalie (by SV% & usage)";

    if h > a {
        RuleOutcome::for_home(factor, home, h - a, REASON)
    } else if a > h {
        RuleOutcome::for_away(factor, away, a - h, REASON)
    } else {
        RuleOutcome::neutral(factor, "Equal team goalie factor")
    }
}

/// Points available for a head-to-head sample of `games_found` meetings.
pub fn head_to_head_points(games_found: u32) -> i32 {
    match games_found {
        n if n >= 5 => 3,
        n if n >= 3 => 2,
        n if n >= 2 => 1,
        _ => 0,
    }
}

/// Recent head-to-head record. Keyed off team identifiers rather than
/// snapshots; runs after the snapshot rules.
pub fn head_to_head_edge(
    h2h: Option<&HeadToHeadRecord>,
    home: &TeamAbbrev,
    away: &TeamAbbrev,
) -> RuleOutcome {
    let factor = EdgeFactor::HeadToHead;
    let Some(record) = h2h else {
        return RuleOutcome::neutral(factor, "No head-to-head data available");
    };
    if record.games_found == 0 {
        return RuleOutcome::neutral(factor, "Incomplete head-to-head data");
    }

    let points = head_to_head_points(record.games_found);
    if points == 0 || record.home_wins == record.away_wins {
        return RuleOutcome::neutral(
            factor,
            format!("Even/too-small H2H sample (n={})", record.games_found),
        );
    }

    let reason = format!("Better H2H in last {} games", record.games_found);
    if record.home_wins > record.away_wins {
        RuleOutcome {
            home: points,
            away: 0,
            entries: vec![EdgeBreakdown::new(factor, Some(home), points, reason)],
        }
    } else {
        RuleOutcome {
            home: 0,
            away: points,
            entries: vec![EdgeBreakdown::new(factor, Some(away), points, reason)],
        }
    }
}
