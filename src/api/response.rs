//! Response types for the Duty Compliance Engine API.
//!
//! This module defines the success bodies, the error response structures and
//! the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{ComplianceReport, ComplianceVerdict, Recommendation};

/// Response body for the `/compliance/report` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    /// The full report.
    pub report: ComplianceReport,
    /// Verdict, when the request named a role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<ComplianceVerdict>,
    /// Recommendations, when the request named a role.
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// Response body for the `/compliance/evaluate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    /// Verdict against the role's thresholds.
    pub verdict: ComplianceVerdict,
    /// Prioritized recommendations.
    pub recommendations: Vec<Recommendation>,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` when the server answers.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a location not found error response.
    pub fn location_not_found(code: &str) -> Self {
        Self::with_details(
            "LOCATION_NOT_FOUND",
            format!("Work location not found: {}", code),
            format!("The location code '{}' is not configured in the policy", code),
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::UnknownLocation { code } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::location_not_found(&code),
            },
            EngineError::UnknownRole { role } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "UNKNOWN_ROLE",
                    message,
                    format!("Add a '{}' row to standards.yaml to evaluate this role", role),
                ),
            },
            EngineError::InvalidShiftTemplate { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_SHIFT_TEMPLATE",
                    message,
                    "The shift template contains invalid information",
                ),
            },
            EngineError::InvalidDuty { .. } | EngineError::DuplicateDuty { .. } => {
                ApiErrorResponse {
                    status: StatusCode::BAD_REQUEST,
                    error: ApiError::with_details(
                        "INVALID_DUTY",
                        message,
                        "The scheduled duties contain invalid information",
                    ),
                }
            }
            EngineError::InvalidAttendance { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_ATTENDANCE",
                    message,
                    "The attendance records contain invalid information",
                ),
            },
            EngineError::InvalidPeriod { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(message),
            },
            EngineError::SourceError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("SOURCE_ERROR", "Roster source failed", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_unknown_location_maps_to_404() {
        let api_error: ApiErrorResponse = EngineError::UnknownLocation {
            code: "nowhere".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "LOCATION_NOT_FOUND");
        assert!(api_error.error.message.contains("nowhere"));
    }

    #[test]
    fn test_duplicate_duty_maps_to_invalid_duty() {
        let api_error: ApiErrorResponse = EngineError::DuplicateDuty {
            staff_id: "staff_001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            sequence: 2,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_DUTY");
        assert!(api_error.error.message.contains("sequence 2"));
    }

    #[test]
    fn test_config_errors_map_to_500() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "/missing".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
