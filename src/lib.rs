pub mod api;
pub mod cache;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;

pub use cache::KeyedCache;
pub use config::Config;
pub use datasource::{DataSource, DataSourceError, Endpoint, MockDataSource, NhlDataSource};
pub use domain::{
    EdgeBreakdown, EdgeFactor, GameId, GoalieFactor, HeadToHeadRecord, MatchupResult,
    MatchupScoreResult, ScheduledGame, SeasonId, TeamAbbrev, TeamSnapshot,
};
pub use engine::{ScoringEngine, ScoringParams};
pub use error::AppError;
pub use orchestration::{LeagueClient, LeagueSettings, Orchestrator};
