use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

// Liveness - no dependencies touched
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// Readiness: settings DB reachable within 5s
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let query = sqlx::query("SELECT 1").fetch_one(&state.db);
    match tokio::time::timeout(std::time::Duration::from_secs(5), query).await {
        Ok(Ok(_)) => (StatusCode::OK, "ready").into_response(),
        Ok(Err(e)) => (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: {}", e)).into_response(),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready: timeout").into_response(),
    }
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.get_snapshot())
}

// Prometheus text exposition format
pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let m = state.metrics.get_snapshot();
    let counters = [
        ("scans_requested", "Library scans requested", m.scans_requested),
        ("scans_skipped", "Scan requests without a known refresh task", m.scans_skipped),
        ("order_moves", "Library order moves persisted", m.order_moves),
        ("libraries_added", "Libraries created through the dashboard", m.libraries_added),
        ("task_polls", "Live task polls", m.task_polls),
        ("task_poll_failures", "Failed live task polls", m.task_poll_failures),
        ("folder_fetch_failures", "Failed virtual folder fetches", m.folder_fetch_failures),
    ];
    let mut body = String::new();
    for (name, help, value) in counters {
        body.push_str(&format!(
            "# HELP libraryboard_{name} {help}\n# TYPE libraryboard_{name} counter\nlibraryboard_{name} {value}\n"
        ));
    }
    body.push_str(&format!(
        "# HELP libraryboard_uptime_seconds Uptime seconds\n# TYPE libraryboard_uptime_seconds gauge\nlibraryboard_uptime_seconds {}\n",
        m.uptime_seconds
    ));
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

pub async fn version() -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}
