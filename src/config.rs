use crate::domain::SeasonId;
use crate::engine::ScoringParams;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_NHL_API_BASE: &str = "https://api-web.nhle.com/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub nhl_api_base: String,
    pub season_override: Option<SeasonId>,
    pub http_timeout: Duration,
    pub scoring: ScoringParams,
    pub goalie_fetch_concurrency: usize,
    pub h2h_games: u32,
    pub h2h_max_seasons: u32,
    pub cors_origins: CorsOrigins,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            nhl_api_base: DEFAULT_NHL_API_BASE.to_string(),
            season_override: None,
            http_timeout: Duration::from_secs(20),
            scoring: ScoringParams::default(),
            goalie_fetch_concurrency: 8,
            h2h_games: 5,
            h2h_max_seasons: 5,
            cors_origins: CorsOrigins::List(vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ]),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let port = parse_or(&env_map, "PORT", defaults.port, "must be a valid u16")?;

        let nhl_api_base = env_map
            .get("NHL_API_BASE")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.nhl_api_base);

        let season_override = match env_map.get("NHL_SEASON").map(|s| s.trim()) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<SeasonId>().map_err(|e| {
                ConfigError::InvalidValue("NHL_SEASON".to_string(), e.to_string())
            })?),
        };

        let timeout_secs: u64 = parse_or(
            &env_map,
            "HTTP_TIMEOUT_SECS",
            defaults.http_timeout.as_secs(),
            "must be a positive number of seconds",
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "HTTP_TIMEOUT_SECS".to_string(),
                "must be greater than 0".to_string(),
            ));
        }

        let logistic_temperature: f64 = parse_or(
            &env_map,
            "LOGISTIC_TEMPERATURE",
            defaults.scoring.logistic_temperature,
            "must be a number",
        )?;
        if !logistic_temperature.is_finite() || logistic_temperature <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "LOGISTIC_TEMPERATURE".to_string(),
                format!("must be finite and > 0, got {}", logistic_temperature),
            ));
        }

        let max_abs_diff: u16 = parse_or(
            &env_map,
            "MAX_ABS_DIFF",
            defaults.scoring.max_abs_diff.unsigned_abs() as u16,
            "must be a non-negative integer",
        )?;

        let goalie_fetch_concurrency = parse_positive(
            &env_map,
            "GOALIE_FETCH_CONCURRENCY",
            defaults.goalie_fetch_concurrency,
        )?;
        let h2h_games = parse_positive(&env_map, "H2H_GAMES", defaults.h2h_games)?;
        let h2h_max_seasons =
            parse_positive(&env_map, "H2H_MAX_SEASONS", defaults.h2h_max_seasons)?;

        let cors_origins = match env_map.get("CORS_ALLOWED_ORIGINS") {
            Some(raw) => parse_cors_origins(raw),
            None => defaults.cors_origins,
        };

        Ok(Config {
            port,
            nhl_api_base,
            season_override,
            http_timeout: Duration::from_secs(timeout_secs),
            scoring: ScoringParams {
                logistic_temperature,
                max_abs_diff: i32::from(max_abs_diff),
            },
            goalie_fetch_concurrency,
            h2h_games,
            h2h_max_seasons,
            cors_origins,
        })
    }
}

fn parse_or<T: FromStr>(
    env_map: &HashMap<String, String>,
    key: &str,
    default: T,
    reason: &str,
) -> Result<T, ConfigError> {
    match env_map.get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(key.to_string(), reason.to_string())),
        None => Ok(default),
    }
}

fn parse_positive<T>(
    env_map: &HashMap<String, String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    let value = parse_or(env_map, key, default, "must be a positive integer")?;
    if value <= T::default() {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            "must be greater than 0".to_string(),
        ));
    }
    Ok(value)
}

fn parse_cors_origins(raw: &str) -> CorsOrigins {
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if origins.iter().any(|o| o == "*") {
        CorsOrigins::Any
    } else {
        CorsOrigins::List(origins)
    }
}
