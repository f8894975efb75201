use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

/// Liveness: the process is serving requests.
pub async fn health() -> Json<StatusBody> {
    Json(StatusBody { status: "ok" })
}

/// Readiness. Upstream reachability is not probed; every request degrades
/// to neutral defaults when the league API is down.
pub async fn ready() -> Json<StatusBody> {
    Json(StatusBody { status: "ready" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_returns_ok() {
        let Json(body) = health().await;
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn test_ready_serializes_status() {
        let Json(body) = ready().await;
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"status": "ready"})
        );
    }
}
