pub mod league;
pub mod orchestrator;

pub use league::{GoalieTable, LeagueClient, LeagueSettings};
pub use orchestrator::{OrchestrationError, Orchestrator};
