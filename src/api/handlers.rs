//! HTTP request handlers for the Duty Compliance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::{compute_batch, default_workers};
use crate::error::EngineError;
use crate::models::{ReportingPeriod, ScheduledDuty};

use super::request::{BatchRequest, EvaluateRequest, ReportRequest, TrendRequest};
use super::response::{
    ApiError, ApiErrorResponse, EvaluateResponse, HealthResponse, ReportResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/compliance/report", post(report_handler))
        .route("/compliance/evaluate", post(evaluate_handler))
        .route("/compliance/trend", post(trend_handler))
        .route("/compliance/batch", post(batch_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Converts a JSON extraction failure into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}

/// Handler for POST /compliance/report.
///
/// Builds the report of one staff member and, when a role is given, the
/// verdict and recommendations.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match build_report_response(&state, request) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                staff_id = %response.report.staff_id,
                period = %response.report.period.label(),
                duties = response.report.daily_breakdown.len(),
                completion_rate = %response.report.summary.completion_rate,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Report completed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

fn build_report_response(
    state: &AppState,
    request: ReportRequest,
) -> Result<ReportResponse, EngineError> {
    let engine = state.engine();
    let period: ReportingPeriod = request.period.into_period()?;
    let ctx = engine.context(request.location.as_deref(), request.as_of)?;

    let staff_id = request.staff_id;
    let duties: Vec<ScheduledDuty> = request
        .duties
        .into_iter()
        .map(|d| d.into_duty(&staff_id, ctx.overtime_after_sequence))
        .collect();
    let events: Vec<_> = request
        .attendance
        .into_iter()
        .map(|a| a.into_event(&staff_id))
        .collect();

    let report = engine.build_report(&staff_id, period, &duties, &events, &ctx)?;

    let (verdict, recommendations) = match request.role {
        Some(role) => {
            let verdict = engine.evaluate_standards(&report.summary, role)?;
            let recommendations = engine.generate_recommendations(&report.summary, &verdict);
            (Some(verdict), recommendations)
        }
        None => (None, Vec::new()),
    };

    Ok(ReportResponse {
        report,
        verdict,
        recommendations,
    })
}

/// Handler for POST /compliance/evaluate.
async fn evaluate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing evaluate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let engine = state.engine();
    match engine.evaluate_standards(&request.summary, request.role) {
        Ok(verdict) => {
            let recommendations = engine.generate_recommendations(&request.summary, &verdict);
            json_response(
                StatusCode::OK,
                EvaluateResponse {
                    verdict,
                    recommendations,
                },
            )
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /compliance/trend.
async fn trend_handler(
    State(state): State<AppState>,
    payload: Result<Json<TrendRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing trend request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let trend = state.engine().compute_trend(&request.summaries);
    info!(
        correlation_id = %correlation_id,
        periods = trend.periods,
        direction = ?trend.direction,
        "Trend computed"
    );
    json_response(StatusCode::OK, trend)
}

/// Handler for POST /compliance/batch.
///
/// Per-staff failures are returned in the body; only request-level problems
/// (bad period, unknown location) fail the whole request.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let period = match request.period.into_period() {
        Ok(period) => period,
        Err(err) => return engine_error_response(correlation_id, err),
    };
    let ctx = match state
        .engine()
        .context(request.location.as_deref(), request.as_of)
    {
        Ok(ctx) => ctx,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let rosters = request
        .rosters
        .into_iter()
        .map(|r| r.into_roster(ctx.overtime_after_sequence))
        .collect();
    let workers = request.workers.unwrap_or_else(default_workers);

    let start_time = Instant::now();
    let outcome = compute_batch(state.shared_engine(), rosters, period, ctx, workers).await;
    info!(
        correlation_id = %correlation_id,
        succeeded = outcome.reports.len(),
        failed = outcome.failures.len(),
        duration_us = start_time.elapsed().as_micros() as u64,
        "Batch completed"
    );
    json_response(StatusCode::OK, outcome)
}
