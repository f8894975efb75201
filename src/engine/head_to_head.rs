//! Head-to-head tally over club season schedules.

use crate::domain::{ClubGame, HeadToHeadRecord, TeamAbbrev};

/// Accumulates up to `wanted` meetings between two teams, newest first.
#[derive(Debug, Clone)]
pub struct HeadToHeadTally {
    home: TeamAbbrev,
    away: TeamAbbrev,
    wanted: u32,
    record: HeadToHeadRecord,
}

impl HeadToHeadTally {
    pub fn new(home: TeamAbbrev, away: TeamAbbrev, wanted: u32) -> Self {
        Self {
            home,
            away,
            wanted,
            record: HeadToHeadRecord::default(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.record.games_found >= self.wanted
    }

    /// Scan one season's games (upstream order, oldest first) from the most
    /// recent backwards, stopping once `wanted` meetings are found.
    pub fn scan_season(&mut self, games: &[ClubGame]) {
        for game in games.iter().rev() {
            if self.is_complete() {
                break;
            }
            self.observe(game);
        }
    }

    fn observe(&mut self, game: &ClubGame) {
        let (Some(game_home), Some(game_away)) = (game.home.as_ref(), game.away.as_ref()) else {
            return;
        };
        let is_meeting = (game_home == &self.home && game_away == &self.away)
            || (game_home == &self.away && game_away == &self.home);
        if !is_meeting {
            return;
        }
        let (Some(home_score), Some(away_score)) = (game.home_score, game.away_score) else {
            return;
        };

        self.record.games_found += 1;
        let winner = if home_score > away_score {
            game_home
        } else if away_score > home_score {
            game_away
        } else {
            return;
        };

        if winner == &self.home {
            self.record.home_wins += 1;
        } else {
            self.record.away_wins += 1;
        }
    }

    pub fn record(&self) -> HeadToHeadRecord {
        self.record
    }

    /// The record, or `None` when no meeting was found at all.
    pub fn finish(self) -> Option<HeadToHeadRecord> {
        (self.record.games_found > 0).then_some(self.record)
    }
}
