//! Shift template and scheduled duty models.
//!
//! This module defines the planned side of the compliance engine: reusable
//! [`ShiftTemplate`]s and the [`ScheduledDuty`] assignments that reference them.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Sequence numbers above this value are overtime shifts by default policy.
pub const DEFAULT_OVERTIME_AFTER_SEQUENCE: u32 = 2;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// The staff role a duty is performed under.
///
/// Roles select the threshold row applied by the standards evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaffRole {
    /// Medical doctor.
    Doctor,
    /// Paramedic (nurse, midwife, pharmacist and other clinical support).
    Paramedic,
    /// Non-clinical staff (administration, security, cleaning).
    NonParamedic,
}

impl StaffRole {
    /// Returns the wire label for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Doctor => "doctor",
            StaffRole::Paramedic => "paramedic",
            StaffRole::NonParamedic => "non-paramedic",
        }
    }
}

/// Planning status of a scheduled duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DutyStatus {
    /// A regular working duty.
    Active,
    /// A standby duty; attendance is still expected.
    OnCall,
    /// The staff member is on approved leave for this duty.
    LeaveApproved,
    /// A leave request covering this duty awaits approval.
    LeavePending,
}

impl DutyStatus {
    /// Returns true for both approved and pending leave.
    pub fn is_leave(&self) -> bool {
        matches!(self, DutyStatus::LeaveApproved | DutyStatus::LeavePending)
    }
}

/// A reusable daily shift definition.
///
/// Start and end are wall-clock times at the work location. When `end_time`
/// is not after `start_time` the shift runs past midnight into the next day.
///
/// # Example
///
/// ```
/// use duty_compliance::models::ShiftTemplate;
/// use chrono::NaiveTime;
///
/// let night = ShiftTemplate {
///     id: "night".to_string(),
///     name: "Night".to_string(),
///     start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
/// };
/// assert!(night.is_overnight());
/// assert_eq!(night.duration_minutes(), 480);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    /// Unique identifier for the template.
    pub id: String,
    /// Human-readable name (e.g., "Morning", "Night").
    pub name: String,
    /// Scheduled start time.
    pub start_time: NaiveTime,
    /// Scheduled end time.
    pub end_time: NaiveTime,
}

impl ShiftTemplate {
    /// Returns true when the shift crosses midnight.
    pub fn is_overnight(&self) -> bool {
        self.end_time <= self.start_time
    }

    /// Returns the shift duration in minutes.
    ///
    /// A template whose start and end are identical yields `0`; such
    /// templates are rejected by validation.
    pub fn duration_minutes(&self) -> i64 {
        let raw = (self.end_time - self.start_time).num_minutes();
        if raw < 0 {
            raw + MINUTES_PER_DAY
        } else {
            raw
        }
    }
}

/// Returns whether a shift with the given sequence counts as overtime.
pub fn overtime_for_sequence(sequence: u32, overtime_after_sequence: u32) -> bool {
    sequence > overtime_after_sequence
}

/// One planned duty assignment for a staff member on a date.
///
/// The template is stored as a snapshot so later edits to the template do
/// not change how historical duties are evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledDuty {
    /// Unique identifier for the duty.
    pub id: String,
    /// The staff member assigned to the duty.
    pub staff_id: String,
    /// Calendar date the duty starts on.
    pub date: NaiveDate,
    /// Snapshot of the shift template times.
    pub shift: ShiftTemplate,
    /// Ordering of duties on the same date, starting at 1.
    pub sequence: u32,
    /// Role the duty is performed under.
    pub role: StaffRole,
    /// Planning status.
    pub status: DutyStatus,
    /// Whether the duty is an overtime shift.
    #[serde(default)]
    pub is_overtime: bool,
}

impl ScheduledDuty {
    /// Creates a duty, deriving `is_overtime` from the default sequence policy.
    ///
    /// # Example
    ///
    /// ```
    /// use duty_compliance::models::{DutyStatus, ScheduledDuty, ShiftTemplate, StaffRole};
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let template = ShiftTemplate {
    ///     id: "evening".to_string(),
    ///     name: "Evening".to_string(),
    ///     start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
    /// };
    /// let duty = ScheduledDuty::new(
    ///     "d-3",
    ///     "staff-1",
    ///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     template,
    ///     3,
    ///     StaffRole::Paramedic,
    ///     DutyStatus::Active,
    /// );
    /// assert!(duty.is_overtime);
    /// ```
    pub fn new(
        id: impl Into<String>,
        staff_id: impl Into<String>,
        date: NaiveDate,
        shift: ShiftTemplate,
        sequence: u32,
        role: StaffRole,
        status: DutyStatus,
    ) -> Self {
        Self {
            id: id.into(),
            staff_id: staff_id.into(),
            date,
            shift,
            sequence,
            role,
            status,
            is_overtime: overtime_for_sequence(sequence, DEFAULT_OVERTIME_AFTER_SEQUENCE),
        }
    }

    /// Returns the scheduled start instant.
    pub fn scheduled_start(&self) -> NaiveDateTime {
        self.date.and_time(self.shift.start_time)
    }

    /// Returns the scheduled end instant, computed as start plus duration so
    /// overnight shifts end on the following day.
    pub fn scheduled_end(&self) -> NaiveDateTime {
        self.scheduled_start() + Duration::minutes(self.shift.duration_minutes())
    }

    /// Returns true when attendance is expected for this duty.
    pub fn requires_attendance(&self) -> bool {
        !self.status.is_leave()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn template(start: NaiveTime, end: NaiveTime) -> ShiftTemplate {
        ShiftTemplate {
            id: "t1".to_string(),
            name: "Test".to_string(),
            start_time: start,
            end_time: end,
        }
    }

    fn duty(sequence: u32, shift: ShiftTemplate) -> ScheduledDuty {
        ScheduledDuty::new(
            format!("d{}", sequence),
            "staff_001",
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            shift,
            sequence,
            StaffRole::Doctor,
            DutyStatus::Active,
        )
    }

    #[test]
    fn test_day_shift_duration() {
        let shift = template(time(7, 0), time(14, 0));
        assert!(!shift.is_overnight());
        assert_eq!(shift.duration_minutes(), 420);
    }

    #[test]
    fn test_overnight_shift_duration() {
        let shift = template(time(22, 0), time(6, 0));
        assert!(shift.is_overnight());
        assert_eq!(shift.duration_minutes(), 480);
    }

    #[test]
    fn test_zero_length_template_has_zero_duration() {
        let shift = template(time(8, 0), time(8, 0));
        assert_eq!(shift.duration_minutes(), 0);
    }

    #[test]
    fn test_overnight_scheduled_end_is_next_day() {
        let d = duty(1, template(time(22, 0), time(6, 0)));
        assert_eq!(
            d.scheduled_end(),
            NaiveDate::from_ymd_opt(2026, 1, 16)
                .unwrap()
                .and_time(time(6, 0))
        );
    }

    #[test]
    fn test_sequence_three_is_overtime() {
        let shift = template(time(7, 0), time(14, 0));
        assert!(!duty(1, shift.clone()).is_overtime);
        assert!(!duty(2, shift.clone()).is_overtime);
        assert!(duty(3, shift).is_overtime);
    }

    #[test]
    fn test_leave_statuses() {
        assert!(DutyStatus::LeaveApproved.is_leave());
        assert!(DutyStatus::LeavePending.is_leave());
        assert!(!DutyStatus::Active.is_leave());
        assert!(!DutyStatus::OnCall.is_leave());
    }

    #[test]
    fn test_role_and_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&StaffRole::NonParamedic).unwrap(),
            "\"non-paramedic\""
        );
        assert_eq!(
            serde_json::to_string(&DutyStatus::LeaveApproved).unwrap(),
            "\"leave-approved\""
        );
        assert_eq!(StaffRole::NonParamedic.as_str(), "non-paramedic");
    }

    #[test]
    fn test_duty_deserialization() {
        let json = r#"{
            "id": "d1",
            "staff_id": "staff_001",
            "date": "2026-01-15",
            "shift": {
                "id": "morning",
                "name": "Morning",
                "start_time": "07:00:00",
                "end_time": "14:00:00"
            },
            "sequence": 1,
            "role": "paramedic",
            "status": "on-call"
        }"#;

        let duty: ScheduledDuty = serde_json::from_str(json).unwrap();
        assert_eq!(duty.status, DutyStatus::OnCall);
        assert_eq!(duty.role, StaffRole::Paramedic);
        assert!(!duty.is_overtime);
        assert!(duty.requires_attendance());
    }
}
