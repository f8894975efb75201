//! Adapters from raw upstream payloads to domain records.
//!
//! One function per payload. Each is best-effort: malformed entries are
//! skipped, absent fields become `None` or zero, and nothing here panics.

use super::fields::{
    localized_str, lookup_count, lookup_f64, lookup_i64, lookup_id, lookup_localized, lookup_str,
    nested,
};
use crate::domain::{
    ClubGame, GameId, GoalieLine, Record, ScheduledGame, StandingsRow, StandingsSnapshot, Streak,
    StreakKind, TeamAbbrev,
};
use chrono::NaiveDate;
use serde_json::Value;
use sha2::{Digest, Sha256};

const ABBREV_ALIASES: &[&str] = &["abbrev", "triCode", "abbreviation"];
const GAME_ID_ALIASES: &[&str] = &["id", "gameId"];

/// Games scheduled on `date`.
///
/// The schedule endpoint answers with a whole `gameWeek`; only the day matching
/// `date` is kept. Payloads without a week structure fall back to a flat
/// `games` list. Games missing an id or either team are dropped.
pub fn parse_schedule(body: &Value, date: NaiveDate) -> Vec<ScheduledGame> {
    let day = date.format("%Y-%m-%d").to_string();
    let mut raw_games: Vec<&Value> = Vec::new();

    if let Some(week) = body.get("gameWeek").and_then(Value::as_array) {
        for entry in week.iter().filter(|d| d.is_object()) {
            if let Some(entry_date) = entry.get("date").and_then(Value::as_str) {
                if entry_date != day {
                    continue;
                }
            }
            if let Some(games) = entry.get("games").and_then(Value::as_array) {
                raw_games.extend(games);
            }
        }
    }

    if raw_games.is_empty() {
        if let Some(games) = body.get("games").and_then(Value::as_array) {
            raw_games.extend(games);
        }
    }

    raw_games
        .into_iter()
        .filter_map(|g| parse_scheduled_game(g, date))
        .collect()
}

fn parse_scheduled_game(game: &Value, date: NaiveDate) -> Option<ScheduledGame> {
    let game_id = lookup_id(game, GAME_ID_ALIASES)?;
    let home = game.get("homeTeam").and_then(|t| lookup_str(t, ABBREV_ALIASES))?;
    let away = game.get("awayTeam").and_then(|t| lookup_str(t, ABBREV_ALIASES))?;

    Some(ScheduledGame {
        game_id: GameId::new(game_id),
        date,
        home: TeamAbbrev::new(home),
        away: TeamAbbrev::new(away),
    })
}

/// League standings table, or `None` when the payload has no `standings` list.
pub fn parse_standings(body: &Value) -> Option<StandingsSnapshot> {
    let rows = body.get("standings").and_then(Value::as_array)?;
    let rows = rows.iter().map(parse_standings_row).collect();
    Some(StandingsSnapshot::new(rows, fingerprint(body)))
}

/// SHA-256 of the payload's canonical JSON text, hex encoded.
pub fn fingerprint(body: &Value) -> String {
    hex::encode(Sha256::digest(body.to_string().as_bytes()))
}

pub fn parse_standings_row(row: &Value) -> StandingsRow {
    StandingsRow {
        team: lookup_localized(row, &["teamAbbrev", "teamTriCode", "triCode"]).map(TeamAbbrev::new),
        overall: parse_record(row, &["wins"], &["losses"], &["otLosses"]),
        home: parse_record(row, &["homeWins"], &["homeLosses"], &["homeOtLosses"]),
        road: parse_record(
            row,
            &["roadWins", "awayWins"],
            &["roadLosses", "awayLosses"],
            &["roadOtLosses", "awayOtLosses"],
        ),
        last10: parse_record(row, &["l10Wins"], &["l10Losses"], &["l10OtLosses"]),
        points_pct: lookup_f64(row, &["pointPctg"]),
        goals_for: lookup_f64(row, &["goalFor"]),
        goals_against: lookup_f64(row, &["goalAgainst"]),
        streak: parse_streak(row),
    }
}

fn parse_record(row: &Value, wins: &[&str], losses: &[&str], ot_losses: &[&str]) -> Record {
    Record::new(
        lookup_count(row, wins),
        lookup_count(row, losses),
        lookup_count(row, ot_losses),
    )
}

/// Streak from either `streakCode` + `streakCount` or a combined `streak`
/// string such as `"W3"`.
pub fn parse_streak(row: &Value) -> Option<Streak> {
    let code = lookup_str(row, &["streakCode"]);
    let count = lookup_i64(row, &["streakCount"]).and_then(|n| u32::try_from(n).ok());
    if let (Some(code), Some(length)) = (code, count) {
        return StreakKind::from_code(code).map(|kind| Streak { kind, length });
    }

    let combined = lookup_str(row, &["streak"])?.trim();
    let split = combined.find(|c: char| c.is_ascii_digit())?;
    let (code, digits) = combined.split_at(split);
    let kind = StreakKind::from_code(code)?;
    let length = digits.parse::<u32>().ok()?;
    Some(Streak { kind, length })
}

/// Goalie lines from a club-stats payload. Entries without an integer
/// `gamesPlayed` are dropped.
pub fn parse_club_goalies(body: &Value) -> Vec<GoalieLine> {
    body.get("goalies")
        .and_then(Value::as_array)
        .map(|goalies| {
            goalies
                .iter()
                .filter_map(|g| {
                    let games_played = lookup_i64(g, &["gamesPlayed"])?;
                    Some(GoalieLine {
                        games_played: u32::try_from(games_played).ok()?,
                        save_pct: lookup_f64(g, &["savePercentage"]),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Season schedule for a club, in upstream order (oldest first).
pub fn parse_club_schedule(body: &Value) -> Vec<ClubGame> {
    body.get("games")
        .and_then(Value::as_array)
        .map(|games| games.iter().filter_map(parse_club_game).collect())
        .unwrap_or_default()
}

fn parse_club_game(game: &Value) -> Option<ClubGame> {
    let home = game.get("homeTeam").filter(|t| t.is_object())?;
    let away = game.get("awayTeam").filter(|t| t.is_object())?;
    let abbrev = |team: &Value| {
        nested(team, &["abbrev"])
            .and_then(localized_str)
            .map(TeamAbbrev::new)
    };

    Some(ClubGame {
        home: abbrev(home),
        away: abbrev(away),
        home_score: lookup_i64(home, &["score"]),
        away_score: lookup_i64(away, &["score"]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_standings_row_with_oversized_counts() {
        let row = parse_standings_row(&json!({
            "teamAbbrev": "TOR",
            "wins": 3_000_000_000u64,
            "losses": 1,
            "otLosses": 0
        }));
        assert_eq!(row.overall.wins, 3_000_000_000);
        let pct = row.effective_points_pct().unwrap();
        assert!(pct > 0.999_999 && pct <= 1.0);

        let row = parse_standings_row(&json!({"teamAbbrev": "TOR", "wins": 5_000_000_000u64}));
        assert_eq!(row.overall.wins, 0);
        assert_eq!(row.effective_points_pct(), None);
    }

    #[test]
    fn test_schedule_keeps_only_requested_day() {
        let body = json!({
            "gameWeek": [
                {"date": "2025-02-28", "games": [
                    {"id": 1, "homeTeam": {"abbrev": "TOR"}, "awayTeam": {"abbrev": "BOS"}}
                ]},
                {"date": "2025-03-01", "games": [
                    {"id": 2, "homeTeam": {"abbrev": "MTL"}, "awayTeam": {"triCode": "OTT"}},
                    {"gameId": "3", "homeTeam": {"abbreviation": "edm"}, "awayTeam": {"abbrev": "CGY"}}
                ]}
            ]
        });
        let games = parse_schedule(&body, date());
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].game_id.as_str(), "2");
        assert_eq!(games[0].away.as_str(), "OTT");
        assert_eq!(games[1].game_id.as_str(), "3");
        assert_eq!(games[1].home.as_str(), "EDM");
        assert!(games.iter().all(|g| g.date == date()));
    }

    #[test]
    fn test_schedule_falls_back_to_flat_games() {
        let body = json!({
            "games": [
                {"id": 9, "homeTeam": {"abbrev": "TOR"}, "awayTeam": {"abbrev": "BOS"}},
                {"id": 10, "homeTeam": {}, "awayTeam": {"abbrev": "BOS"}},
                {"homeTeam": {"abbrev": "TOR"}, "awayTeam": {"abbrev": "BOS"}}
            ]
        });
        let games = parse_schedule(&body, date());
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].game_id.as_str(), "9");
    }

    #[test]
    fn test_schedule_unrecognized_shape_is_empty() {
        assert!(parse_schedule(&json!({"foo": 1}), date()).is_empty());
    }

    #[test]
    fn test_standings_row_fields() {
        let body = json!({"standings": [{
            "teamAbbrev": {"default": "tor"},
            "wins": 30, "losses": 15, "otLosses": 5,
            "homeWins": 18, "homeLosses": 6, "homeOtLosses": 1,
            "awayWins": 12, "awayLosses": 9, "awayOtLosses": 4,
            "l10Wins": 6, "l10Losses": 3, "l10OtLosses": 1,
            "pointPctg": 0.65,
            "goalFor": 170, "goalAgainst": 140,
            "streakCode": "W", "streakCount": 3
        }]});
        let snapshot = parse_standings(&body).unwrap();
        let row = snapshot.find(&TeamAbbrev::new("TOR")).unwrap();
        assert_eq!(row.overall, Record::new(30, 15, 5));
        assert_eq!(row.home, Record::new(18, 6, 1));
        assert_eq!(row.road, Record::new(12, 9, 4));
        assert_eq!(row.last10, Record::new(6, 3, 1));
        assert_eq!(row.points_pct, Some(0.65));
        assert_eq!(row.goals_for, Some(170.0));
        assert_eq!(row.goals_against, Some(140.0));
        assert_eq!(
            row.streak,
            Some(Streak {
                kind: StreakKind::Win,
                length: 3
            })
        );
    }

    #[test]
    fn test_standings_without_list_is_none() {
        assert!(parse_standings(&json!({"standings": "nope"})).is_none());
        assert!(parse_standings(&json!({})).is_none());
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = parse_standings(&json!({"standings": [{"teamAbbrev": "TOR"}]})).unwrap();
        let b = parse_standings(&json!({"standings": [{"teamAbbrev": "TOR"}]})).unwrap();
        let c = parse_standings(&json!({"standings": [{"teamAbbrev": "BOS"}]})).unwrap();
        assert_eq!(a.fingerprint, b.fingerprint);
        assert_ne!(a.fingerprint, c.fingerprint);
        assert_eq!(a.fingerprint.len(), 64);
    }

    #[test]
    fn test_streak_combined_string() {
        assert_eq!(
            parse_streak(&json!({"streak": "L4"})),
            Some(Streak {
                kind: StreakKind::Loss,
                length: 4
            })
        );
        assert_eq!(
            parse_streak(&json!({"streak": "OT2"})),
            Some(Streak {
                kind: StreakKind::Overtime,
                length: 2
            })
        );
        assert_eq!(parse_streak(&json!({"streak": "W"})), None);
        assert_eq!(parse_streak(&json!({"streak": "Wx"})), None);
        assert_eq!(parse_streak(&json!({})), None);
    }

    #[test]
    fn test_streak_code_pair_wins_over_combined_string() {
        let row = json!({"streakCode": "l", "streakCount": 2, "streak": "W5"});
        assert_eq!(
            parse_streak(&row),
            Some(Streak {
                kind: StreakKind::Loss,
                length: 2
            })
        );
    }

    #[test]
    fn test_club_goalies() {
        let body = json!({"goalies": [
            {"gamesPlayed": 30, "savePercentage": 0.915},
            {"gamesPlayed": 12},
            {"gamesPlayed": "many", "savePercentage": 0.9},
            "garbage"
        ]});
        let lines = parse_club_goalies(&body);
        assert_eq!(
            lines,
            vec![
                GoalieLine {
                    games_played: 30,
                    save_pct: Some(0.915)
                },
                GoalieLine {
                    games_played: 12,
                    save_pct: None
                },
            ]
        );
        assert!(parse_club_goalies(&json!({})).is_empty());
    }

    #[test]
    fn test_club_schedule() {
        let body = json!({"games": [
            {"homeTeam": {"abbrev": "TOR", "score": 3}, "awayTeam": {"abbrev": "BOS", "score": 2}},
            {"homeTeam": {"abbrev": "BOS"}, "awayTeam": {"abbrev": "TOR"}},
            {"homeTeam": "TOR", "awayTeam": {"abbrev": "BOS"}}
        ]});
        let games = parse_club_schedule(&body);
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].home_score, Some(3));
        assert_eq!(games[0].away, Some(TeamAbbrev::new("BOS")));
        assert_eq!(games[1].home_score, None);
    }
}
