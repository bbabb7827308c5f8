//! Per-shift outcome derivation.
//!
//! Turns one duty and its matched attendance record (if any) into a
//! [`ShiftOutcome`].

use crate::models::{AttendanceEvent, OutcomeStatus, ScheduledDuty, ShiftOutcome};

use super::context::EvaluationContext;
use super::schedule_compliance::classify_schedule_compliance;
use super::shift_matching::attendance_window;

/// Derives the outcome of one duty.
///
/// # Rules
///
/// - Leave duties yield `leave` regardless of attendance.
/// - A check-in yields `present`, with `late_minutes` measured from the
///   scheduled start (negative when early) and `work_minutes` from check-in to
///   check-out, rolling past midnight when the check-out clock time is earlier.
/// - A record without a check-in yields `no-show`.
/// - No record yields `pending` while the attendance window is still open at
///   `ctx.as_of`, and `absent` once it has closed.
///
/// `gps_valid` is copied from the record's validity flag.
pub fn evaluate_shift(
    duty: &ScheduledDuty,
    event: Option<&AttendanceEvent>,
    ctx: &EvaluationContext,
) -> ShiftOutcome {
    let scheduled_start = duty.scheduled_start();
    let scheduled_end = duty.scheduled_end();

    let mut outcome = ShiftOutcome {
        duty_id: duty.id.clone(),
        attendance_id: event.map(|e| e.id.clone()),
        staff_id: duty.staff_id.clone(),
        date: duty.date,
        sequence: duty.sequence,
        shift_name: duty.shift.name.clone(),
        role: duty.role,
        duty_status: duty.status,
        is_overtime: duty.is_overtime,
        scheduled_start,
        scheduled_end,
        check_in: None,
        check_out: None,
        status: OutcomeStatus::Absent,
        late_minutes: None,
        early_departure_minutes: None,
        gps_valid: false,
        work_minutes: 0,
        schedule_compliance: None,
    };

    if !duty.requires_attendance() {
        outcome.status = OutcomeStatus::Leave;
        outcome.attendance_id = None;
        return outcome;
    }

    let Some(event) = event else {
        let (_, closes) = attendance_window(duty, &ctx.location);
        if ctx.as_of < closes {
            outcome.status = OutcomeStatus::Pending;
        }
        return outcome;
    };

    let Some(check_in) = event.check_in_at() else {
        outcome.status = OutcomeStatus::NoShow;
        return outcome;
    };

    let late_minutes = (check_in - scheduled_start).num_minutes();
    let check_out = event.check_out_at();

    outcome.status = OutcomeStatus::Present;
    outcome.check_in = Some(check_in);
    outcome.check_out = check_out;
    outcome.late_minutes = Some(late_minutes);
    outcome.schedule_compliance = Some(classify_schedule_compliance(late_minutes));
    outcome.gps_valid = event.is_valid;
    outcome.work_minutes = event.worked_minutes().unwrap_or(0);
    outcome.early_departure_minutes = check_out
        .map(|out| (scheduled_end - out).num_minutes())
        .filter(|minutes| *minutes > 0);

    outcome
}
