//! Schedule-compliance bucketing of check-in drift.

use crate::models::ScheduleCompliance;

/// Lower bound of the on-time bucket; anything at or below is very early.
pub const VERY_EARLY_LIMIT_MINUTES: i64 = -15;
/// Upper bound of the acceptable-late bucket.
pub const ACCEPTABLE_LATE_LIMIT_MINUTES: i64 = 15;
/// Upper bound of the late bucket; anything above is very late.
pub const LATE_LIMIT_MINUTES: i64 = 30;

/// Maps signed check-in drift to exactly one bucket.
///
/// Buckets are closed on their upper bound, so `-15` is very early, `0` is
/// on time, `15` is acceptable late and `30` is late.
///
/// # Example
///
/// ```
/// use duty_compliance::calculation::classify_schedule_compliance;
/// use duty_compliance::models::ScheduleCompliance;
///
/// assert_eq!(classify_schedule_compliance(-15), ScheduleCompliance::VeryEarly);
/// assert_eq!(classify_schedule_compliance(0), ScheduleCompliance::OnTime);
/// assert_eq!(classify_schedule_compliance(31), ScheduleCompliance::VeryLate);
/// ```
pub fn classify_schedule_compliance(late_minutes: i64) -> ScheduleCompliance {
    if late_minutes <= VERY_EARLY_LIMIT_MINUTES {
        ScheduleCompliance::VeryEarly
    } else if late_minutes <= 0 {
        ScheduleCompliance::OnTime
    } else if late_minutes <= ACCEPTABLE_LATE_LIMIT_MINUTES {
        ScheduleCompliance::AcceptableLate
    } else if late_minutes <= LATE_LIMIT_MINUTES {
        ScheduleCompliance::Late
    } else {
        ScheduleCompliance::VeryLate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_documented_boundaries() {
        assert_eq!(classify_schedule_compliance(-15), ScheduleCompliance::VeryEarly);
        assert_eq!(classify_schedule_compliance(0), ScheduleCompliance::OnTime);
        assert_eq!(classify_schedule_compliance(15), ScheduleCompliance::AcceptableLate);
        assert_eq!(classify_schedule_compliance(30), ScheduleCompliance::Late);
    }

    #[test]
    fn test_values_just_past_boundaries() {
        assert_eq!(classify_schedule_compliance(-16), ScheduleCompliance::VeryEarly);
        assert_eq!(classify_schedule_compliance(-14), ScheduleCompliance::OnTime);
        assert_eq!(classify_schedule_compliance(1), ScheduleCompliance::AcceptableLate);
        assert_eq!(classify_schedule_compliance(16), ScheduleCompliance::Late);
        assert_eq!(classify_schedule_compliance(31), ScheduleCompliance::VeryLate);
    }

    proptest! {
        #[test]
        fn prop_buckets_are_monotonic(a in -600i64..600, b in -600i64..600) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classify_schedule_compliance(lo) <= classify_schedule_compliance(hi));
        }

        #[test]
        fn prop_bucket_matches_its_interval(minutes in -1440i64..1440) {
            let bucket = classify_schedule_compliance(minutes);
            let inside = match bucket {
                ScheduleCompliance::VeryEarly => minutes <= -15,
                ScheduleCompliance::OnTime => minutes > -15 && minutes <= 0,
                ScheduleCompliance::AcceptableLate => minutes > 0 && minutes <= 15,
                ScheduleCompliance::Late => minutes > 15 && minutes <= 30,
                ScheduleCompliance::VeryLate => minutes > 30,
            };
            prop_assert!(inside);
        }
    }
}
