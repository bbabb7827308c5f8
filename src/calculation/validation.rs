//! Boundary validation for schedule and attendance inputs.
//!
//! Validation fails fast on the first malformed record; nothing is coerced.

use std::collections::HashSet;

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceEvent, ScheduledDuty, ShiftTemplate, overtime_for_sequence};

/// Checks a shift template has an id and a non-zero duration.
pub fn validate_template(template: &ShiftTemplate) -> EngineResult<()> {
    let fail = |message: &str| {
        let error = EngineError::InvalidShiftTemplate {
            template_id: template.id.clone(),
            message: message.to_string(),
        };
        warn!(error = %error, "Rejected shift template");
        Err(error)
    };

    if template.id.trim().is_empty() {
        return fail("template id must not be empty");
    }
    if template.duration_minutes() <= 0 {
        return fail("start and end time must differ");
    }
    Ok(())
}

/// Checks every duty and the uniqueness of `(staff, date, sequence)`.
///
/// `is_overtime` must agree with the sequence policy.
pub fn validate_duties(duties: &[ScheduledDuty], overtime_after_sequence: u32) -> EngineResult<()> {
    let mut seen = HashSet::with_capacity(duties.len());

    for duty in duties {
        let fail = |message: String| {
            let error = EngineError::InvalidDuty {
                duty_id: duty.id.clone(),
                message,
            };
            warn!(error = %error, staff_id = %duty.staff_id, "Rejected scheduled duty");
            Err(error)
        };

        if duty.id.trim().is_empty() {
            return fail("duty id must not be empty".to_string());
        }
        if duty.staff_id.trim().is_empty() {
            return fail("staff id must not be empty".to_string());
        }
        if duty.sequence == 0 {
            return fail("sequence starts at 1".to_string());
        }
        validate_template(&duty.shift)?;

        let expected = overtime_for_sequence(duty.sequence, overtime_after_sequence);
        if duty.is_overtime != expected {
            return fail(format!(
                "is_overtime is {} but sequence {} implies {}",
                duty.is_overtime, duty.sequence, expected
            ));
        }

        if !seen.insert((duty.staff_id.as_str(), duty.date, duty.sequence)) {
            let error = EngineError::DuplicateDuty {
                staff_id: duty.staff_id.clone(),
                date: duty.date,
                sequence: duty.sequence,
            };
            warn!(error = %error, "Rejected scheduled duty");
            return Err(error);
        }
    }
    Ok(())
}

/// Checks every attendance record for internal consistency.
pub fn validate_attendance(events: &[AttendanceEvent]) -> EngineResult<()> {
    for event in events {
        let fail = |message: &str| {
            let error = EngineError::InvalidAttendance {
                attendance_id: event.id.clone(),
                message: message.to_string(),
            };
            warn!(error = %error, staff_id = %event.staff_id, "Rejected attendance record");
            Err(error)
        };

        if event.id.trim().is_empty() {
            return fail("attendance id must not be empty");
        }
        if event.staff_id.trim().is_empty() {
            return fail("staff id must not be empty");
        }
        if event.check_in.is_none() && event.check_out.is_some() {
            return fail("check-out recorded without check-in");
        }
        if event.location.is_some_and(|point| !point.is_well_formed()) {
            return fail("GPS coordinates or accuracy out of range");
        }
    }
    Ok(())
}
