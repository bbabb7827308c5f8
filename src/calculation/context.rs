//! Evaluation context shared by the calculation functions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::LocationPolicy;

/// Explicit time and policy inputs for one evaluation.
///
/// The engine never reads the system clock; `as_of` decides which duties are
/// still pending, and `location` supplies the matching windows and the late
/// tolerance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationContext {
    /// Instant the evaluation is performed for, in location wall-clock time.
    pub as_of: NaiveDateTime,
    /// Code of the work location.
    pub location_code: String,
    /// Attendance policy of the work location.
    pub location: LocationPolicy,
    /// Sequence numbers above this value are overtime.
    pub overtime_after_sequence: u32,
}

impl EvaluationContext {
    /// Creates a context with the default overtime sequence policy.
    pub fn new(
        as_of: NaiveDateTime,
        location_code: impl Into<String>,
        location: LocationPolicy,
    ) -> Self {
        Self {
            as_of,
            location_code: location_code.into(),
            location,
            overtime_after_sequence: crate::models::DEFAULT_OVERTIME_AFTER_SEQUENCE,
        }
    }
}
