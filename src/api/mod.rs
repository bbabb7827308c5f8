//! HTTP API module for the Duty Compliance Engine.
//!
//! This module exposes the engine's report, standards, trend and batch
//! operations as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AttendanceRequest, BatchRequest, DutyRequest, EvaluateRequest, PeriodRequest, ReportRequest,
    RosterRequest, TrendRequest,
};
pub use response::{ApiError, EvaluateResponse, HealthResponse, ReportResponse};
pub use state::AppState;
