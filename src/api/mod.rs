//! HTTP API module for the Settlement Engine.
//!
//! This module provides the REST endpoints that wrap
//! [`crate::calculation::calculate_settlement`]: JSON results and CSV export.

mod export;
mod handlers;
mod request;
mod response;
mod state;

pub use export::{CSV_HEADER, settlement_to_csv};
pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, ApiErrorResponse, CalculationResponse};
pub use state::AppState;
