use axum::http::StatusCode;
use chrono::NaiveDate;
use hockey_odds::api;
use hockey_odds::config::Config;
use hockey_odds::datasource::MockDataSource;
use hockey_odds::domain::SeasonId;
use hockey_odds::orchestration::{LeagueClient, LeagueSettings, Orchestrator};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

fn setup_app(datasource: MockDataSource) -> axum::Router {
    let config = Config::default();
    let league = Arc::new(LeagueClient::new(
        Arc::new(datasource),
        LeagueSettings::from(&config),
    ));
    let orchestrator = Arc::new(Orchestrator::from_config(league, &config));
    api::create_router(api::AppState::new(config, orchestrator))
}

async fn request(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let req = axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn schedule() -> Value {
    json!({
        "gameWeek": [
            {"date": "2025-01-14", "games": [
                {"id": 1, "homeTeam": {"abbrev": "MTL"}, "awayTeam": {"abbrev": "OTT"}}
            ]},
            {"date": "2025-01-15", "games": [
                {"id": 2024020700, "homeTeam": {"abbrev": "TOR"}, "awayTeam": {"abbrev": "BOS"}},
                {"homeTeam": {"abbrev": "NYR"}, "awayTeam": {"abbrev": "NJD"}}
            ]}
        ]
    })
}

fn standings() -> Value {
    json!({"standings": [
        {"teamAbbrev": {"default": "TOR"}, "pointPctg": 0.6, "goalFor": 150, "goalAgainst": 110,
         "l10Wins": 7, "l10Losses": 3, "l10OtLosses": 0, "streakCode": "W", "streakCount": 3},
        {"teamAbbrev": {"default": "BOS"}, "pointPctg": 0.5, "goalFor": 120, "goalAgainst": 130,
         "l10Wins": 3, "l10Losses": 6, "l10OtLosses": 1, "streakCode": "L", "streakCount": 2}
    ]})
}

#[tokio::test]
async fn test_health_and_ready() {
    let app = setup_app(MockDataSource::new());
    let (status, body) = request(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = request(app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ready"}));
}

#[tokio::test]
async fn test_schedule_failure_returns_bad_gateway() {
    let app = setup_app(MockDataSource::new());
    let (status, body) = request(app, "/v1/today?date=2025-01-15").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"error": "Failed to fetch NHL schedule"}));
}

#[tokio::test]
async fn test_invalid_date_is_bad_request() {
    let app = setup_app(MockDataSource::new());
    let (status, _) = request(app, "/v1/today?date=yesterday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_today_scores_scheduled_games() {
    let mock = MockDataSource::new()
        .with_schedule(date(), schedule())
        .with_standings(date(), standings())
        .with_club_stats(
            "TOR",
            SeasonId::new(2024),
            json!({"goalies": [{"gamesPlayed": 30, "savePercentage": 0.915}]}),
        );
    let app = setup_app(mock);

    let (status, body) = request(app, "/v1/today?date=2025-01-15").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2025-01-15");

    let matchups = body["matchups"].as_array().unwrap();
    assert_eq!(matchups.len(), 1);
    let m = &matchups[0];
    assert_eq!(m["gameId"], "2024020700");
    assert_eq!(m["date"], "2025-01-15");
    assert_eq!(m["homeTeam"], "TOR");
    assert_eq!(m["awayTeam"], "BOS");

    // points% +5, form TOR +2 / BOS -2, goalie +1; both sides rank top-15 so
    // goals balance is neutral.
    assert_eq!(m["score"], json!({"home": 8, "away": -2, "diff": 10}));

    let home = m["probability"]["home"].as_f64().unwrap();
    let away = m["probability"]["away"].as_f64().unwrap();
    assert!((home - 0.9241).abs() < 1e-9, "home probability {}", home);
    assert!((home + away - 1.0).abs() < 1e-9);
    assert_eq!(m["projectedTotalGoals"], json!(6.0));

    let breakdown = m["breakdown"].as_array().unwrap();
    assert!(breakdown.iter().any(|e| e["factor"] == "h2h_recent"
        && e["team"].is_null()
        && e["reason"] == "No head-to-head data available"));
    assert!(breakdown
        .iter()
        .any(|e| e["factor"] == "goalie" && e["team"] == "TOR" && e["points"] == 1));
}
