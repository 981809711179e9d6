//! Local read API serving a snapshot source over HTTP.
//!
//! Mirrors the routes the dashboard's HTTP source expects, so the live
//! path can be exercised without the real backend.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use autosoc::{DashboardSnapshot, SnapshotSource};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
struct AppState {
    source: Arc<dyn SnapshotSource>,
}

#[derive(Serialize)]
struct ServiceBanner {
    service: &'static str,
    status: &'static str,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Deserialize)]
struct OverviewParams {
    client_id: Option<String>,
}

/// Request failures as JSON bodies
#[derive(Debug, Error)]
enum ApiError {
    #[error("client_id is required")]
    MissingClientId,
    #[error("{0}")]
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingClientId => StatusCode::BAD_REQUEST,
            Self::Upstream(msg) => {
                warn!(error = %msg, "snapshot source failed");
                StatusCode::BAD_GATEWAY
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

async fn root() -> Json<ServiceBanner> {
    Json(ServiceBanner {
        service: "AutoSOC API",
        status: "operational",
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

async fn overview(
    State(state): State<AppState>,
    Query(params): Query<OverviewParams>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    let client_id = params
        .client_id
        .filter(|id| !id.trim().is_empty())
        .ok_or(ApiError::MissingClientId)?;
    info!(%client_id, "overview requested");

    state
        .source
        .fetch_snapshot()
        .await
        .map(Json)
        .map_err(|e| ApiError::Upstream(e.to_string()))
}

/// Routes of the read API.
pub fn router(source: Arc<dyn SnapshotSource>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/v1/overview", get(overview))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { source })
}

/// Serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, source: Arc<dyn SnapshotSource>) -> Result<()> {
    let description = source.describe();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, source = %description, "AutoSOC API listening");

    axum::serve(listener, router(source))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("server error")?;

    info!("AutoSOC API stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use autosoc::{DemoSource, SocError};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    struct DownSource;

    #[async_trait]
    impl SnapshotSource for DownSource {
        async fn fetch_snapshot(&self) -> autosoc::Result<DashboardSnapshot> {
            Err(SocError::Connection("feed offline".into()))
        }

        fn describe(&self) -> String {
            "offline feed".into()
        }
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn banner_and_health() {
        let (status, body) = get_json(router(Arc::new(DemoSource)), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "operational");

        let (status, body) = get_json(router(Arc::new(DemoSource)), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn overview_returns_wire_format() {
        let (status, body) = get_json(
            router(Arc::new(DemoSource)),
            "/api/v1/overview?client_id=demo-client-001",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["risk_score"], 24);
        assert_eq!(body["summary"]["total_events_today"], 2847);
        assert_eq!(body["recent_alerts"][0]["type"], "Brute Force Attack");

        let parsed: DashboardSnapshot = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.high_plus_count(), 3);
    }

    #[tokio::test]
    async fn overview_requires_client_id() {
        let (status, body) = get_json(router(Arc::new(DemoSource)), "/api/v1/overview").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "client_id is required");
    }

    #[tokio::test]
    async fn source_failure_is_bad_gateway() {
        let (status, body) = get_json(
            router(Arc::new(DownSource)),
            "/api/v1/overview?client_id=demo-client-001",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("feed offline"));
    }
}
