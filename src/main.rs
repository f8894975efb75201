use hockey_odds::orchestration::{LeagueClient, LeagueSettings, Orchestrator};
use hockey_odds::{api, config::Config, DataSource, NhlDataSource};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let port = config.port;

    let datasource: Arc<dyn DataSource> =
        match NhlDataSource::new(config.nhl_api_base.clone(), config.http_timeout) {
            Ok(ds) => Arc::new(ds),
            Err(e) => {
                eprintln!("Failed to build HTTP client: {}", e);
                std::process::exit(1);
            }
        };

    let league = Arc::new(LeagueClient::new(datasource, LeagueSettings::from(&config)));
    let orchestrator = Arc::new(Orchestrator::from_config(league, &config));

    // Create router
    let app = api::create_router(api::AppState::new(config, orchestrator));

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
