//! Goalie factor: starter selection and save-percentage bucketing.

use crate::domain::{GoalieFactor, GoalieLine};

/// Below this many games the leading goalie's numbers are ignored.
pub const MIN_GAMES_PLAYED: u32 = 8;

/// Two goalies within this many games of each other share the net.
pub const PLATOON_GAMES_WINDOW: u32 = 3;

/// Map a save percentage onto -2..=2.
///
/// `>= .920` → 2, `[.910, .920)` → 1, `[.900, .910)` → 0, `[.890, .900)` → -1,
/// below → -2.
pub fn bucket_save_pct(save_pct: f64) -> i32 {
    if save_pct >= 0.920 {
        2
    } else if save_pct >= 0.910 {
        1
    } else if save_pct >= 0.900 {
        0
    } else if save_pct >= 0.890 {
        -1
    } else {
        -2
    }
}

/// Resolve a team's goalie factor from its goalie lines.
pub fn resolve_goalie_factor(lines: &[GoalieLine]) -> GoalieFactor {
    let mut lines = lines.to_vec();
    lines.sort_by(|a, b| b.games_played.cmp(&a.games_played));

    let Some(leader) = lines.first().copied() else {
        return GoalieFactor::neutral();
    };

    if leader.games_played < MIN_GAMES_PLAYED {
        return GoalieFactor {
            games_played: leader.games_played,
            ..GoalieFactor::neutral()
        };
    }

    let platoon = lines
        .get(1)
        .filter(|second| leader.games_played - second.games_played <= PLATOON_GAMES_WINDOW);

    let (save_pct, used_split) = match platoon {
        Some(second) => match (leader.save_pct, second.save_pct) {
            (Some(a), Some(b)) => (Some((a + b) / 2.0), true),
            _ => (None, true),
        },
        None => (leader.save_pct, false),
    };

    GoalieFactor {
        score: save_pct.map(bucket_save_pct).unwrap_or(0),
        save_pct,
        games_played: leader.games_played,
        used_split,
    }
}
