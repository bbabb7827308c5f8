//! Matching of attendance events to scheduled duties.
//!
//! Duties are processed per staff member in date then `sequence` order.
//! Each duty greedily claims the unclaimed check-in inside its attendance
//! window that is closest to its scheduled start, so when two duties are
//! equally close to a check-in the lower sequence wins. Ties between
//! check-ins equally close to the start go to the earlier check-in, then to
//! the record supplied first. Check-ins dated on the duty's own date are
//! offered first; duties still unpaired then look at check-ins dated one day
//! either side.
//!
//! Duties left unmatched then take, in sequence order, any remaining records
//! on their date that carry no check-in (explicit no-show records). Leave
//! duties never claim records.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::config::LocationPolicy;
use crate::models::{AttendanceEvent, ScheduledDuty};

/// One duty paired with the attendance record it claimed, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DutyMatch<'a> {
    /// The scheduled duty.
    pub duty: &'a ScheduledDuty,
    /// The claimed attendance record.
    pub event: Option<&'a AttendanceEvent>,
}

/// The pairing produced for a set of duties and attendance records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult<'a> {
    /// One entry per duty, ordered by staff, date, then sequence.
    pub matches: Vec<DutyMatch<'a>>,
    /// Records no duty claimed. Informational only.
    pub unmatched_events: Vec<&'a AttendanceEvent>,
}

/// Returns the inclusive window in which a check-in may match a duty.
///
/// The window runs from `checkin_before_shift_minutes` before the scheduled
/// start to `checkout_after_shift_minutes` after the scheduled end, where the
/// end is start plus duration so overnight shifts extend into the next day.
pub fn attendance_window(
    duty: &ScheduledDuty,
    policy: &LocationPolicy,
) -> (NaiveDateTime, NaiveDateTime) {
    let opens = duty.scheduled_start() - Duration::minutes(policy.checkin_before_shift_minutes);
    let closes = duty.scheduled_end() + Duration::minutes(policy.checkout_after_shift_minutes);
    (opens, closes)
}

/// Matches the duties and records of a single staff member on a single date.
///
/// `duties` need not be sorted; they are processed by ascending sequence.
pub fn match_day<'a>(
    duties: &[&'a ScheduledDuty],
    events: &[&'a AttendanceEvent],
    policy: &LocationPolicy,
) -> MatchResult<'a> {
    let mut ordered: Vec<&'a ScheduledDuty> = duties.to_vec();
    ordered.sort_by_key(|duty| duty.sequence);
    pair_staff(&ordered, events, policy)
}

/// Pairs the duties of one staff member, ordered by date then sequence, with
/// that staff member's records.
///
/// Duties first claim check-ins dated on their own date. Duties still
/// unpaired then claim check-ins dated one day either side that fall inside
/// their window, which covers early-morning shifts whose window opens the
/// evening before. Records without a check-in only pair with duties on their
/// own date.
fn pair_staff<'a>(
    ordered: &[&'a ScheduledDuty],
    events: &[&'a AttendanceEvent],
    policy: &LocationPolicy,
) -> MatchResult<'a> {
    let mut claimed = vec![false; events.len()];
    let mut paired: Vec<Option<usize>> = vec![None; ordered.len()];

    claim_check_ins(ordered, events, policy, &mut claimed, &mut paired, |days| days == 0);
    claim_check_ins(ordered, events, policy, &mut claimed, &mut paired, |days| {
        days.abs() == 1
    });

    // Explicit no-show records go to the remaining duties in sequence order.
    for (slot, duty) in ordered.iter().enumerate() {
        if paired[slot].is_some() || !duty.requires_attendance() {
            continue;
        }
        let no_show = events.iter().enumerate().find(|(index, event)| {
            !claimed[*index] && event.check_in.is_none() && event.date == duty.date
        });
        if let Some((index, _)) = no_show {
            claimed[index] = true;
            paired[slot] = Some(index);
        }
    }

    let matches = ordered
        .iter()
        .zip(&paired)
        .map(|(duty, index)| DutyMatch {
            duty: *duty,
            event: index.map(|i| events[i]),
        })
        .collect();

    let unmatched_events = events
        .iter()
        .zip(&claimed)
        .filter(|(_, claimed)| !**claimed)
        .map(|(event, _)| *event)
        .collect();

    MatchResult {
        matches,
        unmatched_events,
    }
}

/// Lets each unpaired duty claim the closest unclaimed check-in inside its
/// window whose date lies `days` from the duty's date, for `days` accepted by
/// `date_offset`.
fn claim_check_ins(
    ordered: &[&ScheduledDuty],
    events: &[&AttendanceEvent],
    policy: &LocationPolicy,
    claimed: &mut [bool],
    paired: &mut [Option<usize>],
    date_offset: impl Fn(i64) -> bool,
) {
    for (slot, duty) in ordered.iter().enumerate() {
        if paired[slot].is_some() || !duty.requires_attendance() {
            continue;
        }
        let start = duty.scheduled_start();
        let (opens, closes) = attendance_window(duty, policy);

        let best = events
            .iter()
            .enumerate()
            .filter(|(index, event)| {
                let days = event.date.signed_duration_since(duty.date).num_days();
                !claimed[*index] && date_offset(days)
            })
            .filter_map(|(index, event)| event.check_in_at().map(|at| (index, at)))
            .filter(|(_, at)| *at >= opens && *at <= closes)
            .min_by_key(|(index, at)| ((*at - start).num_seconds().abs(), *at, *index));

        if let Some((index, _)) = best {
            claimed[index] = true;
            paired[slot] = Some(index);
        }
    }
}

/// Matches duties and records spanning any number of staff members and dates.
///
/// Each staff member's duties share one pool of that staff member's records,
/// so a check-in dated the evening before can pair with a duty starting just
/// after midnight. Records no duty claims are reported as unmatched, ordered
/// by staff, date, then input order.
pub fn match_duties<'a>(
    duties: &'a [ScheduledDuty],
    events: &'a [AttendanceEvent],
    policy: &LocationPolicy,
) -> MatchResult<'a> {
    type Staff<'d> = (Vec<&'d ScheduledDuty>, Vec<&'d AttendanceEvent>);
    let mut staff: BTreeMap<&'a str, Staff<'a>> = BTreeMap::new();

    for duty in duties {
        staff.entry(duty.staff_id.as_str()).or_default().0.push(duty);
    }
    for event in events {
        staff.entry(event.staff_id.as_str()).or_default().1.push(event);
    }

    let mut result = MatchResult::default();
    for (staff_id, (mut staff_duties, mut staff_events)) in staff {
        staff_duties.sort_by_key(|duty| (duty.date, duty.sequence));
        staff_events.sort_by_key(|event| event.date);

        let pairing = pair_staff(&staff_duties, &staff_events, policy);
        for event in &pairing.unmatched_events {
            debug!(
                staff_id = staff_id,
                date = %event.date,
                attendance_id = %event.id,
                "Attendance record matched no duty"
            );
        }
        result.matches.extend(pairing.matches);
        result.unmatched_events.extend(pairing.unmatched_events);
    }
    result
}
