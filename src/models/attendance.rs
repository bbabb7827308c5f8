//! Attendance event model.
//!
//! Attendance events are produced by the external capture subsystem and are
//! consumed read-only by the engine.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// GPS fix recorded with a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Accuracy radius in meters.
    pub accuracy_meters: f64,
}

impl GeoPoint {
    /// Returns true when the coordinates and accuracy are physically plausible.
    pub fn is_well_formed(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.accuracy_meters.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
            && self.accuracy_meters >= 0.0
    }
}

/// One observed presence record for a staff member on a date.
///
/// Times are wall-clock times at the work location. A missing `check_in`
/// records a no-show; a missing `check_out` means the staff member is still
/// on duty or never checked out. A `check_out` earlier than `check_in` is read
/// as falling on the following day.
///
/// # Example
///
/// ```
/// use duty_compliance::models::AttendanceEvent;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let event = AttendanceEvent {
///     id: "att-1".to_string(),
///     staff_id: "staff-1".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     check_in: NaiveTime::from_hms_opt(21, 50, 0),
///     check_out: NaiveTime::from_hms_opt(6, 10, 0),
///     location: None,
///     is_valid: true,
/// };
/// assert_eq!(event.worked_minutes(), Some(500));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// Unique identifier for the record.
    pub id: String,
    /// The staff member the record belongs to.
    pub staff_id: String,
    /// The date the record was captured for.
    pub date: NaiveDate,
    /// Check-in time, if the staff member checked in.
    #[serde(default)]
    pub check_in: Option<NaiveTime>,
    /// Check-out time, if the staff member checked out.
    #[serde(default)]
    pub check_out: Option<NaiveTime>,
    /// GPS fix taken at check-in.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Location validity as decided by the capture subsystem.
    #[serde(default)]
    pub is_valid: bool,
}

impl AttendanceEvent {
    /// Returns the check-in instant.
    pub fn check_in_at(&self) -> Option<NaiveDateTime> {
        self.check_in.map(|t| self.date.and_time(t))
    }

    /// Returns the check-out instant, rolled to the next day when the clock
    /// time is earlier than the check-in.
    pub fn check_out_at(&self) -> Option<NaiveDateTime> {
        let check_in = self.check_in_at()?;
        let check_out = self.date.and_time(self.check_out?);
        if check_out < check_in {
            Some(check_out + Duration::days(1))
        } else {
            Some(check_out)
        }
    }

    /// Returns minutes between check-in and check-out when both exist.
    pub fn worked_minutes(&self) -> Option<i64> {
        let check_in = self.check_in_at()?;
        let check_out = self.check_out_at()?;
        Some((check_out - check_in).num_minutes())
    }
}
