use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::warn;

use super::catalog::RuleCategory;
use super::service::{ComplianceService, ComplianceServiceError, EvaluateRequest, OptimizeRequest};

/// Router builder exposing the catalog, scoring and optimization endpoints.
pub fn compliance_router(service: Arc<ComplianceService>) -> Router {
    Router::new()
        .route("/api/v1/compliance/rules", get(rules_handler))
        .route(
            "/api/v1/compliance/rules/:category",
            get(category_rules_handler),
        )
        .route("/api/v1/compliance/evaluate", post(evaluate_handler))
        .route("/api/v1/compliance/optimize", post(optimize_handler))
        .with_state(service)
}

pub(crate) async fn rules_handler(State(service): State<Arc<ComplianceService>>) -> Response {
    let rules = service.rules(None);
    let payload = json!({
        "total": rules.len(),
        "rules": rules,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn category_rules_handler(
    State(service): State<Arc<ComplianceService>>,
    Path(category): Path<String>,
) -> Response {
    let Some(parsed) = RuleCategory::from_name(&category) else {
        let payload = json!({
            "error": format!("unknown rule category '{category}'"),
        });
        return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
    };

    let rules = service.rules(Some(parsed));
    let payload = json!({
        "category": parsed,
        "total": rules.len(),
        "rules": rules,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn evaluate_handler(
    State(service): State<Arc<ComplianceService>>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response {
    match service.evaluate(request) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn optimize_handler(
    State(service): State<Arc<ComplianceService>>,
    axum::Json(request): axum::Json<OptimizeRequest>,
) -> Response {
    match service.optimize(request) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ComplianceServiceError) -> Response {
    if error.is_rejection() {
        let payload = json!({
            "error": error.to_string(),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    warn!(error = %error, rule_id = ?error.rule_id(), "compliance engine fault");
    let payload = json!({
        "error": error.to_string(),
        "rule_id": error.rule_id(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
