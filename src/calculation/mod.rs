//! Calculation logic for the Duty Compliance Engine.
//!
//! This module contains the pure evaluation functions: input validation,
//! matching attendance records to scheduled duties, per-shift outcomes,
//! schedule-compliance bucketing, period aggregation, standards evaluation,
//! trend analysis and rule-based recommendations.

mod context;
mod period_summary;
mod recommendations;
mod schedule_compliance;
mod shift_matching;
mod shift_outcome;
mod standards;
mod trend;
mod validation;

pub use context::EvaluationContext;
pub use period_summary::{percentage, summarize_outcomes};
pub use recommendations::{DEFAULT_EXCELLENCE_THRESHOLD, generate_recommendations};
pub use schedule_compliance::{
    ACCEPTABLE_LATE_LIMIT_MINUTES, LATE_LIMIT_MINUTES, VERY_EARLY_LIMIT_MINUTES,
    classify_schedule_compliance,
};
pub use shift_matching::{DutyMatch, MatchResult, attendance_window, match_day, match_duties};
pub use shift_outcome::evaluate_shift;
pub use standards::{
    ATTENDANCE_WEIGHT, GPS_WEIGHT, PUNCTUALITY_WEIGHT, composite_score, evaluate_against,
    evaluate_standards,
};
pub use trend::{DEFAULT_TREND_DEAD_BAND, compute_trend};
pub use validation::{validate_attendance, validate_duties, validate_template};
