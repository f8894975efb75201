//! Matchup scoring: rule aggregation, logistic win probability, and the
//! projected total-goals figure.

use super::rules::{head_to_head_edge, RuleOutcome, SNAPSHOT_RULES};
use crate::domain::{HeadToHeadRecord, MatchupScoreResult, TeamSnapshot, LEAGUE_MIDPOINT_RANK};

const BASE_TOTAL_GOALS: f64 = 6.0;
const RANK_GOALS_WEIGHT: f64 = 0.6;
const MIN_TOTAL_GOALS: f64 = 4.0;
const MAX_TOTAL_GOALS: f64 = 8.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    /// Divisor applied to the clamped differential; smaller is more decisive.
    pub logistic_temperature: f64,
    /// Symmetric bound on the differential before the logistic transform.
    pub max_abs_diff: i32,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            logistic_temperature: 4.0,
            max_abs_diff: 15,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    params: ScoringParams,
}

impl ScoringEngine {
    pub fn new(params: ScoringParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> ScoringParams {
        self.params
    }

    /// Score one matchup. Pure: never fails, never performs I/O.
    pub fn score(
        &self,
        home: &TeamSnapshot,
        away: &TeamSnapshot,
        h2h: Option<&HeadToHeadRecord>,
    ) -> MatchupScoreResult {
        let outcomes = SNAPSHOT_RULES
            .iter()
            .map(|rule| rule(home, away))
            .chain(std::iter::once(head_to_head_edge(h2h, &home.team, &away.team)));

        let mut home_score = 0;
        let mut away_score = 0;
        let mut breakdown = Vec::new();
        for RuleOutcome {
            home: h,
            away: a,
            entries,
        } in outcomes
        {
            home_score += h;
            away_score += a;
            breakdown.extend(entries);
        }

        let differential = home_score - away_score;
        let probability_home = self.probability_home(differential);

        MatchupScoreResult {
            home_score,
            away_score,
            differential,
            probability_home,
            probability_away: 1.0 - probability_home,
            projected_total_goals: projected_total_goals(home, away),
            breakdown,
        }
    }

    /// Home win probability for a differential, clamped to `±max_abs_diff`.
    pub fn probability_home(&self, differential: i32) -> f64 {
        let bound = self.params.max_abs_diff.saturating_abs();
        let clamped = differential.clamp(-bound, bound);
        logistic(f64::from(clamped) / self.params.logistic_temperature)
    }
}

/// `1 / (1 + e^-x)`, evaluated so that `logistic(x) + logistic(-x)` is
/// exactly 1.0.
pub fn logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        1.0 - 1.0 / (1.0 + x.exp())
    }
}

/// Total goals from goals-for/against ranks; unknown ranks count as midpoint.
pub fn projected_total_goals(home: &TeamSnapshot, away: &TeamSnapshot) -> f64 {
    let rank = |r: Option<u32>| f64::from(r.unwrap_or(LEAGUE_MIDPOINT_RANK));
    let mid = f64::from(LEAGUE_MIDPOINT_RANK);

    let offense = ((mid - rank(home.goals_for_rank)) + (mid - rank(away.goals_for_rank))) / mid;
    let defense =
        ((rank(home.goals_against_rank) - mid) + (rank(away.goals_against_rank) - mid)) / mid;

    let total = BASE_TOTAL_GOALS + RANK_GOALS_WEIGHT * offense + RANK_GOALS_WEIGHT * defense;
    total.clamp(MIN_TOTAL_GOALS, MAX_TOTAL_GOALS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EdgeFactor, TeamAbbrev};

    fn engine() -> ScoringEngine {
        ScoringEngine::default()
    }

    fn ranked(team: &str, gf: u32, ga: u32) -> TeamSnapshot {
        TeamSnapshot {
            goals_for_rank: Some(gf),
            goals_against_rank: Some(ga),
            ..TeamSnapshot::empty(TeamAbbrev::new(team))
        }
    }

    #[test]
    fn test_logistic_symmetry_is_exact() {
        let e = engine();
        for diff in -30..=30 {
            assert_eq!(e.probability_home(diff) + e.probability_home(-diff), 1.0);
        }
    }

    #[test]
    fn test_probability_monotonic_and_bounded() {
        let e = engine();
        let mut previous = 0.0;
        for diff in -40..=40 {
            let p = e.probability_home(diff);
            assert!(p > 0.0 && p < 1.0);
            assert!(p >= previous);
            previous = p;
        }
    }

    #[test]
    fn test_probability_clamped_at_bound() {
        let e = engine();
        assert_eq!(e.probability_home(25), e.probability_home(15));
        assert_eq!(e.probability_home(-100), e.probability_home(-15));
        assert!(e.probability_home(14) < e.probability_home(15));
    }

    #[test]
    fn test_probability_zero_diff_is_even() {
        assert_eq!(engine().probability_home(0), 0.5);
    }

    #[test]
    fn test_custom_params() {
        let e = ScoringEngine::new(ScoringParams {
            logistic_temperature: 2.0,
            max_abs_diff: 4,
        });
        let expected = 1.0 / (1.0 + (-2.0f64).exp());
        assert!((e.probability_home(10) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_projected_total_midpoint_is_base() {
        let home = TeamSnapshot::empty(TeamAbbrev::new("TOR"));
        let away = TeamSnapshot::empty(TeamAbbrev::new("BOS"));
        assert_eq!(projected_total_goals(&home, &away), 6.0);
    }

    #[test]
    fn test_projected_total_adjusts_with_ranks() {
        let total = projected_total_goals(&ranked("TOR", 10, 12), &ranked("BOS", 20, 22));
        assert!((total - 6.15).abs() < 1e-9);

        let high = projected_total_goals(&ranked("TOR", 1, 32), &ranked("BOS", 1, 32));
        assert!((high - 8.325).abs() < 1e-9);
    }

    #[test]
    fn test_projected_total_is_clamped() {
        let extreme = projected_total_goals(&ranked("TOR", 1, 200), &ranked("BOS", 1, 200));
        assert_eq!(extreme, 8.5);
        let low = projected_total_goals(&ranked("TOR", 200, 1), &ranked("BOS", 200, 1));
        assert_eq!(low, 4.0);
    }

    #[test]
    fn test_breakdown_follows_rule_order() {
        let home = TeamSnapshot::empty(TeamAbbrev::new("TOR"));
        let away = TeamSnapshot::empty(TeamAbbrev::new("BOS"));
        let result = engine().score(&home, &away, None);
        let factors: Vec<EdgeFactor> = result.breakdown.iter().map(|e| e.factor).collect();
        assert_eq!(
            factors,
            vec![
                EdgeFactor::PointsPct,
                EdgeFactor::HomeAway,
                EdgeFactor::Injuries,
                EdgeFactor::GoalsBalance,
                EdgeFactor::Form,
                EdgeFactor::Goalie,
                EdgeFactor::HeadToHead,
            ]
        );
        assert_eq!(result.differential, 0);
    }
}
