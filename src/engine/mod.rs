//! Pure computation: ranks, goalie factors, head-to-head tallies, edge rules
//! and the scoring engine. Nothing in here performs I/O.

pub mod goalie;
pub mod head_to_head;
pub mod ranks;
pub mod rules;
pub mod scoring;

pub use goalie::{bucket_save_pct, resolve_goalie_factor};
pub use head_to_head::HeadToHeadTally;
pub use ranks::{compute_ranks, RankTable, TeamRanks};
pub use rules::{RuleOutcome, SNAPSHOT_RULES};
pub use scoring::{logistic, projected_total_goals, ScoringEngine, ScoringParams};
