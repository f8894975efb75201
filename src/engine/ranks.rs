//! Goals-for / goals-against ranks derived from a standings table.

use crate::domain::{StandingsRow, TeamAbbrev};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamRanks {
    /// 1 = most goals scored.
    pub goals_for: u32,
    /// 1 = fewest goals allowed.
    pub goals_against: u32,
}

pub type RankTable = HashMap<TeamAbbrev, TeamRanks>;

/// Rank every team that has both goal totals.
///
/// Ties keep their standings order (stable sort). Teams without goal totals
/// get no entry. A team listed twice is ranked on its first row only, so each
/// rank column stays a permutation of `1..=K`.
pub fn compute_ranks(rows: &[StandingsRow]) -> RankTable {
    let mut seen = HashSet::new();
    let totals: Vec<(&TeamAbbrev, f64, f64)> = rows
        .iter()
        .filter_map(|r| Some((r.team.as_ref()?, r.goals_for?, r.goals_against?)))
        .filter(|(team, _, _)| seen.insert(*team))
        .collect();

    let mut by_goals_for = totals.clone();
    by_goals_for.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut by_goals_against = totals;
    by_goals_against.sort_by(|a, b| a.2.total_cmp(&b.2));

    let goals_against_rank: HashMap<&TeamAbbrev, u32> = by_goals_against
        .iter()
        .zip(1u32..)
        .map(|((team, _, _), rank)| (*team, rank))
        .collect();

    by_goals_for
        .iter()
        .zip(1u32..)
        .filter_map(|((team, _, _), gf_rank)| {
            let ga_rank = *goals_against_rank.get(team)?;
            Some((
                (*team).clone(),
                TeamRanks {
                    goals_for: gf_rank,
                    goals_against: ga_rank,
                },
            ))
        })
        .collect()
}
