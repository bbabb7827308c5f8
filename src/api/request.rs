//! Request types for the Duty Compliance Engine API.
//!
//! This module defines the JSON request structures for the `/compliance/*`
//! endpoints and their conversion into domain types.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::engine::StaffRoster;
use crate::error::EngineResult;
use crate::models::{
    AttendanceEvent, ComplianceSummary, DutyStatus, GeoPoint, ReportingPeriod, ScheduledDuty,
    ShiftTemplate, StaffRole, overtime_for_sequence,
};

/// Request body for the `/compliance/report` endpoint.
///
/// Contains the pre-fetched duties and attendance of one staff member for one
/// reporting period, plus the explicit evaluation instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// The staff member to report on.
    pub staff_id: String,
    /// When present, the report is also evaluated against this role.
    #[serde(default)]
    pub role: Option<StaffRole>,
    /// The reporting period.
    pub period: PeriodRequest,
    /// Work-location code; the configured default when omitted.
    #[serde(default)]
    pub location: Option<String>,
    /// Evaluation instant in location wall-clock time.
    pub as_of: NaiveDateTime,
    /// Scheduled duties.
    #[serde(default)]
    pub duties: Vec<DutyRequest>,
    /// Attendance records.
    #[serde(default)]
    pub attendance: Vec<AttendanceRequest>,
}

/// Request body for the `/compliance/evaluate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// A previously computed summary.
    pub summary: ComplianceSummary,
    /// Role whose thresholds apply.
    pub role: StaffRole,
}

/// Request body for the `/compliance/trend` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendRequest {
    /// Summaries of consecutive periods, in any order.
    pub summaries: Vec<ComplianceSummary>,
}

/// Request body for the `/compliance/batch` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// The reporting period applied to every roster.
    pub period: PeriodRequest,
    /// Work-location code; the configured default when omitted.
    #[serde(default)]
    pub location: Option<String>,
    /// Evaluation instant in location wall-clock time.
    pub as_of: NaiveDateTime,
    /// Number of parallel partitions; the available parallelism when omitted.
    #[serde(default)]
    pub workers: Option<usize>,
    /// One roster per staff member.
    pub rosters: Vec<RosterRequest>,
}

/// Reporting period in a request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl PeriodRequest {
    /// Converts into a validated [`ReportingPeriod`].
    pub fn into_period(self) -> EngineResult<ReportingPeriod> {
        ReportingPeriod::new(self.start_date, self.end_date)
    }
}

/// One staff member's inputs in a batch request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRequest {
    /// The staff member.
    pub staff_id: String,
    /// Role whose thresholds apply.
    pub role: StaffRole,
    /// Scheduled duties.
    #[serde(default)]
    pub duties: Vec<DutyRequest>,
    /// Attendance records.
    #[serde(default)]
    pub attendance: Vec<AttendanceRequest>,
}

/// Scheduled duty in a request.
///
/// `staff_id` defaults to the enclosing request's staff member and
/// `is_overtime` to the configured sequence policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyRequest {
    /// Unique identifier for the duty.
    pub id: String,
    /// The staff member, when different from the enclosing request.
    #[serde(default)]
    pub staff_id: Option<String>,
    /// The date the duty starts on.
    pub date: NaiveDate,
    /// Shift template snapshot.
    pub shift: ShiftTemplate,
    /// Ordering of duties on the same date, starting at 1.
    #[serde(default = "default_sequence")]
    pub sequence: u32,
    /// Role the duty is performed under.
    pub role: StaffRole,
    /// Planning status.
    #[serde(default = "default_status")]
    pub status: DutyStatus,
    /// Explicit overtime flag, checked against the sequence policy.
    #[serde(default)]
    pub is_overtime: Option<bool>,
}

fn default_sequence() -> u32 {
    1
}

fn default_status() -> DutyStatus {
    DutyStatus::Active
}

impl DutyRequest {
    /// Converts into a [`ScheduledDuty`] owned by `staff_id` unless the
    /// request names another staff member.
    pub fn into_duty(self, staff_id: &str, overtime_after_sequence: u32) -> ScheduledDuty {
        let is_overtime = self
            .is_overtime
            .unwrap_or_else(|| overtime_for_sequence(self.sequence, overtime_after_sequence));
        ScheduledDuty {
            id: self.id,
            staff_id: self.staff_id.unwrap_or_else(|| staff_id.to_string()),
            date: self.date,
            shift: self.shift,
            sequence: self.sequence,
            role: self.role,
            status: self.status,
            is_overtime,
        }
    }
}

/// Attendance record in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// Unique identifier for the record.
    pub id: String,
    /// The staff member, when different from the enclosing request.
    #[serde(default)]
    pub staff_id: Option<String>,
    /// The date of the check-in.
    pub date: NaiveDate,
    /// Check-in clock time; omitted for a no-show.
    #[serde(default)]
    pub check_in: Option<NaiveTime>,
    /// Check-out clock time.
    #[serde(default)]
    pub check_out: Option<NaiveTime>,
    /// Captured GPS position.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Validity flag set by the capture subsystem.
    #[serde(default)]
    pub is_valid: bool,
}

impl AttendanceRequest {
    /// Converts into an [`AttendanceEvent`] owned by `staff_id` unless the
    /// request names another staff member.
    pub fn into_event(self, staff_id: &str) -> AttendanceEvent {
        AttendanceEvent {
            id: self.id,
            staff_id: self.staff_id.unwrap_or_else(|| staff_id.to_string()),
            date: self.date,
            check_in: self.check_in,
            check_out: self.check_out,
            location: self.location,
            is_valid: self.is_valid,
        }
    }
}

impl RosterRequest {
    /// Converts into a [`StaffRoster`].
    pub fn into_roster(self, overtime_after_sequence: u32) -> StaffRoster {
        let staff_id = self.staff_id;
        let duties = self
            .duties
            .into_iter()
            .map(|d| d.into_duty(&staff_id, overtime_after_sequence))
            .collect();
        let events = self
            .attendance
            .into_iter()
            .map(|a| a.into_event(&staff_id))
            .collect();
        StaffRoster {
            staff_id,
            role: self.role,
            duties,
            events,
        }
    }
}
