//! Domain types for the hockey matchup model.
//!
//! This module provides:
//! - Primitives: TeamAbbrev, GameId, SeasonId
//! - Standings rows and per-date standings snapshots
//! - TeamSnapshot, the fixed-shape record the scoring engine reads
//! - Matchup inputs (schedule, head-to-head) and scoring outputs

pub mod matchup;
pub mod primitives;
pub mod snapshot;
pub mod standings;

pub use matchup::{
    ClubGame, EdgeBreakdown, EdgeFactor, HeadToHeadRecord, MatchupResult, MatchupScoreResult,
    ScheduledGame,
};
pub use primitives::{GameId, SeasonId, SeasonParseError, TeamAbbrev};
pub use snapshot::{GoalieFactor, GoalieLine, TeamSnapshot, LEAGUE_MIDPOINT_RANK};
pub use standings::{Record, StandingsRow, StandingsSnapshot, Streak, StreakKind};
