//! Input seam for duties and attendance records.

use crate::error::EngineResult;
use crate::models::{AttendanceEvent, ReportingPeriod, ScheduledDuty};

/// Supplies the read-only duties and attendance records the engine evaluates.
///
/// Implementations typically wrap a persistence layer. Any I/O happens here,
/// before evaluation starts; the engine itself never blocks on I/O.
pub trait RosterSource {
    /// Returns the duties of `staff_id` dated within `period`.
    fn schedules_for_staff(
        &self,
        staff_id: &str,
        period: &ReportingPeriod,
    ) -> EngineResult<Vec<ScheduledDuty>>;

    /// Returns the attendance records of `staff_id` dated within `period`.
    fn attendance_for_staff(
        &self,
        staff_id: &str,
        period: &ReportingPeriod,
    ) -> EngineResult<Vec<AttendanceEvent>>;
}

/// A [`RosterSource`] backed by vectors already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoster {
    duties: Vec<ScheduledDuty>,
    events: Vec<AttendanceEvent>,
}

impl InMemoryRoster {
    /// Creates a roster from pre-fetched duties and attendance records.
    pub fn new(duties: Vec<ScheduledDuty>, events: Vec<AttendanceEvent>) -> Self {
        Self { duties, events }
    }

    /// All duties held, across staff.
    pub fn duties(&self) -> &[ScheduledDuty] {
        &self.duties
    }

    /// All attendance records held, across staff.
    pub fn events(&self) -> &[AttendanceEvent] {
        &self.events
    }
}

impl RosterSource for InMemoryRoster {
    fn schedules_for_staff(
        &self,
        staff_id: &str,
        period: &ReportingPeriod,
    ) -> EngineResult<Vec<ScheduledDuty>> {
        Ok(self
            .duties
            .iter()
            .filter(|d| d.staff_id == staff_id && period.contains_date(d.date))
            .cloned()
            .collect())
    }

    fn attendance_for_staff(
        &self,
        staff_id: &str,
        period: &ReportingPeriod,
    ) -> EngineResult<Vec<AttendanceEvent>> {
        Ok(self
            .events
            .iter()
            .filter(|e| e.staff_id == staff_id && period.contains_date(e.date))
            .cloned()
            .collect())
    }
}
