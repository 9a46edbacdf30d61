//! HTTP request handlers for the Settlement Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_settlement;
use crate::error::EngineError;
use crate::models::SettlementResult;

use super::export::settlement_to_csv;
use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/calculate/csv", post(calculate_csv_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns the settlement wrapped in a
/// [`CalculationResponse`].
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_error(rejection_error(rejection, correlation_id)),
    };

    let start_time = Instant::now();
    match settle(&state, &request) {
        Ok((result, rate_table_effective_date)) => {
            info!(
                correlation_id = %correlation_id,
                status = ?result.status,
                gross_total = %result.gross_total,
                net_total = %result.net_total,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            let response = CalculationResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                engine_version: state.config().metadata().version.clone(),
                rate_table_effective_date,
                result,
            };
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            json_error(err.into())
        }
    }
}

/// Handler for POST /calculate/csv endpoint.
///
/// Same request as `/calculate`; responds with the settlement as a
/// `label,gross_amount` table.
async fn calculate_csv_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing CSV export request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_error(rejection_error(rejection, correlation_id)),
    };

    let csv = settle(&state, &request).and_then(|(result, _)| settlement_to_csv(&result));
    match csv {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                bytes = body.len(),
                "CSV export completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
                body,
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "CSV export failed"
            );
            json_error(err.into())
        }
    }
}

/// Validates the fact, resolves rate tables and policy, and calculates.
///
/// Returns the settlement and the effective date of the rate tables used.
/// A fact whose termination is not after admission falls back to the
/// earliest rate tables when none cover its termination date.
fn settle(
    state: &AppState,
    request: &CalculationRequest,
) -> Result<(SettlementResult, NaiveDate), EngineError> {
    let fact = &request.fact;
    fact.validate()?;

    let config = state.config();
    // An inverted range applies no table; it still gets its flagged result.
    let tables = match config.rate_tables_for(fact.termination_date) {
        Ok(tables) => tables,
        Err(err) if fact.has_valid_date_range() => return Err(err),
        Err(err) => config.config().schedule().earliest().ok_or(err)?,
    };
    let policy = request.policy_or(config.policy());

    let result = calculate_settlement(fact, tables, &policy);
    Ok((result, tables.effective_date))
}

/// Maps a body rejection to a 400 error.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
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

    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
}

fn json_error(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}
