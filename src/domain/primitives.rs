//! Domain primitives: TeamAbbrev, GameId, SeasonId.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Team abbreviation (e.g., "TOR", "BOS"), always trimmed and upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamAbbrev(String);

impl TeamAbbrev {
    /// Create a normalized TeamAbbrev from any casing.
    pub fn new(abbrev: impl AsRef<str>) -> Self {
        TeamAbbrev(abbrev.as_ref().trim().to_ascii_uppercase())
    }

    /// Get the abbreviation as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TeamAbbrev {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upstream game identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    pub fn new(id: String) -> Self {
        GameId(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hockey season spanning July of `start_year` through June of `start_year + 1`.
///
/// Rendered as the eight-digit identifier the league API uses, e.g. "20242025".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeasonId {
    start_year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid season id {0:?}: expected eight digits YYYY(YYYY+1)")]
pub struct SeasonParseError(pub String);

impl SeasonId {
    pub fn new(start_year: i32) -> Self {
        SeasonId { start_year }
    }

    /// Season a calendar date belongs to. January through June belong to the
    /// season that started the previous calendar year.
    pub fn for_date(date: NaiveDate) -> Self {
        if date.month() <= 6 {
            SeasonId::new(date.year() - 1)
        } else {
            SeasonId::new(date.year())
        }
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn previous(&self) -> Self {
        SeasonId::new(self.start_year - 1)
    }

    /// This season followed by the `count - 1` seasons before it, newest first.
    pub fn walk_back(self, count: usize) -> impl Iterator<Item = SeasonId> {
        std::iter::successors(Some(self), |s| Some(s.previous())).take(count)
    }
}

impl std::fmt::Display for SeasonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.start_year, self.start_year + 1)
    }
}

impl FromStr for SeasonId {
    type Err = SeasonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 8 || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(SeasonParseError(s.to_string()));
        }
        let start: i32 = s[..4].parse().map_err(|_| SeasonParseError(s.to_string()))?;
        let end: i32 = s[4..].parse().map_err(|_| SeasonParseError(s.to_string()))?;
        if end != start + 1 {
            return Err(SeasonParseError(s.to_string()));
        }
        Ok(SeasonId::new(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_team_abbrev_normalizes_case_and_whitespace() {
        assert_eq!(TeamAbbrev::new(" tor ").as_str(), "TOR");
        assert_eq!(TeamAbbrev::new("Bos"), TeamAbbrev::new("BOS"));
    }

    #[test]
    fn test_season_for_spring_date_belongs_to_previous_start_year() {
        assert_eq!(SeasonId::for_date(date(2025, 3, 1)).to_string(), "20242025");
        assert_eq!(SeasonId::for_date(date(2025, 6, 30)).to_string(), "20242025");
    }

    #[test]
    fn test_season_for_autumn_date_starts_this_year() {
        assert_eq!(SeasonId::for_date(date(2025, 9, 1)).to_string(), "20252026");
        assert_eq!(SeasonId::for_date(date(2025, 7, 1)).to_string(), "20252026");
    }

    #[test]
    fn test_walk_back_is_newest_first() {
        let seasons: Vec<String> = SeasonId::new(2024)
            .walk_back(3)
            .map(|s| s.to_string())
            .collect();
        assert_eq!(seasons, vec!["20242025", "20232024", "20222023"]);
    }

    #[test]
    fn test_walk_back_zero_is_empty() {
        assert_eq!(SeasonId::new(2024).walk_back(0).count(), 0);
    }

    #[test]
    fn test_season_parse() {
        assert_eq!("20242025".parse::<SeasonId>().unwrap(), SeasonId::new(2024));
        assert!("2024".parse::<SeasonId>().is_err());
        assert!("20242026".parse::<SeasonId>().is_err());
        assert!("2024-025".parse::<SeasonId>().is_err());
    }
}
