//! Per-shift outcome models.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{DutyStatus, StaffRole};

/// What happened for one scheduled duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeStatus {
    /// The staff member checked in.
    Present,
    /// No attendance record exists for the duty.
    Absent,
    /// An attendance record exists but carries no check-in.
    NoShow,
    /// The duty is covered by approved or pending leave.
    Leave,
    /// The attendance window has not closed yet as of evaluation.
    Pending,
}

impl OutcomeStatus {
    /// Returns true for outcomes that count as a missed shift.
    pub fn is_missed(&self) -> bool {
        matches!(self, OutcomeStatus::Absent | OutcomeStatus::NoShow)
    }
}

/// Punctuality bucket for a check-in relative to the scheduled start.
///
/// Each bucket is closed on its upper bound:
/// `<= -15` very early, `(-15, 0]` on time, `(0, 15]` acceptable late,
/// `(15, 30]` late, `> 30` very late.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleCompliance {
    /// Fifteen or more minutes early.
    VeryEarly,
    /// Up to fifteen minutes early, or exactly on time.
    OnTime,
    /// Up to fifteen minutes late.
    AcceptableLate,
    /// Sixteen to thirty minutes late.
    Late,
    /// More than thirty minutes late.
    VeryLate,
}

impl ScheduleCompliance {
    /// All buckets in ascending lateness order.
    pub const ALL: [ScheduleCompliance; 5] = [
        ScheduleCompliance::VeryEarly,
        ScheduleCompliance::OnTime,
        ScheduleCompliance::AcceptableLate,
        ScheduleCompliance::Late,
        ScheduleCompliance::VeryLate,
    ];

    /// Returns the display label used in detailed reports.
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleCompliance::VeryEarly => "Very Early",
            ScheduleCompliance::OnTime => "On Time",
            ScheduleCompliance::AcceptableLate => "Acceptable Late",
            ScheduleCompliance::Late => "Late",
            ScheduleCompliance::VeryLate => "Very Late",
        }
    }
}

impl fmt::Display for ScheduleCompliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The result of matching one scheduled duty to zero or one attendance event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftOutcome {
    /// The duty this outcome was derived from.
    pub duty_id: String,
    /// The matched attendance record, if any.
    pub attendance_id: Option<String>,
    /// The staff member.
    pub staff_id: String,
    /// Duty date.
    pub date: NaiveDate,
    /// Duty sequence on that date.
    pub sequence: u32,
    /// Shift template name at evaluation time.
    pub shift_name: String,
    /// Role the duty was scheduled under.
    pub role: StaffRole,
    /// Planning status of the duty.
    pub duty_status: DutyStatus,
    /// Whether the duty is an overtime shift.
    pub is_overtime: bool,
    /// Scheduled start instant.
    pub scheduled_start: NaiveDateTime,
    /// Scheduled end instant.
    pub scheduled_end: NaiveDateTime,
    /// Observed check-in instant.
    pub check_in: Option<NaiveDateTime>,
    /// Observed check-out instant.
    pub check_out: Option<NaiveDateTime>,
    /// Outcome classification.
    pub status: OutcomeStatus,
    /// Signed check-in drift in minutes; negative means early.
    pub late_minutes: Option<i64>,
    /// Minutes left before the scheduled end, when the staff member checked out early.
    pub early_departure_minutes: Option<i64>,
    /// Location validity taken from the attendance record.
    pub gps_valid: bool,
    /// Minutes between check-in and check-out; zero when either is missing.
    pub work_minutes: i64,
    /// Punctuality bucket for present outcomes.
    pub schedule_compliance: Option<ScheduleCompliance>,
}

impl ShiftOutcome {
    /// Returns true when both check-in and check-out were recorded.
    pub fn has_complete_attendance(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_some()
    }
}
