//! Core data models for the duty compliance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod evaluation;
mod outcome;
mod period;
mod report;
mod schedule;
mod summary;

pub use attendance::{AttendanceEvent, GeoPoint};
pub use evaluation::{
    ComplianceVerdict, MetricTrend, Priority, Recommendation, RecommendationCategory,
    RoleThresholds, TrendDirection, TrendResult,
};
pub use outcome::{OutcomeStatus, ScheduleCompliance, ShiftOutcome};
pub use period::ReportingPeriod;
pub use report::{AuditStep, AuditTrace, AuditWarning, ComplianceReport};
pub use schedule::{
    DEFAULT_OVERTIME_AFTER_SEQUENCE, DutyStatus, ScheduledDuty, ShiftTemplate, StaffRole,
    overtime_for_sequence,
};
pub use summary::{ComplianceBreakdown, ComplianceSummary, PerformanceStatus};
