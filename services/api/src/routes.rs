use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json};
use content_compliance::compliance::{compliance_router, ComplianceService};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Compliance API plus the probes and metrics endpoint every deployment expects.
pub(crate) fn with_operational_routes(service: Arc<ComplianceService>) -> axum::Router {
    compliance_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::build_service;
    use axum::body::Body;
    use axum::http::Request;
    use content_compliance::config::ComplianceSettings;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        }
    }

    fn app(ready: bool) -> axum::Router {
        let service = build_service(&ComplianceSettings::default()).expect("service builds");
        with_operational_routes(Arc::new(service)).layer(Extension(state(ready)))
    }

    async fn status_of(app: axum::Router, uri: &str) -> StatusCode {
        app.oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds")
        .status()
    }

    #[tokio::test]
    async fn health_is_always_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(status_of(app(false), "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_tracks_the_flag() {
        assert_eq!(
            status_of(app(false), "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(status_of(app(true), "/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_render_as_prometheus_text() {
        let response = metrics_endpoint(Extension(state(true))).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).map(|value| value.as_bytes()),
            Some("text/plain; version=0.0.4".as_bytes())
        );
    }

    #[tokio::test]
    async fn compliance_routes_are_mounted() {
        assert_eq!(
            status_of(app(true), "/api/v1/compliance/rules").await,
            StatusCode::OK
        );
    }
}
