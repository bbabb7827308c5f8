//! Per-staff compliance evaluation.
//!
//! [`ComplianceEngine`] ties the calculation functions together: it validates
//! the inputs, matches attendance to duties, derives outcomes, aggregates them
//! and records every step in an [`AuditTrace`].

use std::time::Instant;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculation::{
    self, EvaluationContext, evaluate_shift, match_duties, summarize_outcomes,
    validate_attendance, validate_duties,
};
use crate::config::PolicyConfig;
use crate::error::EngineResult;
use crate::models::{
    AttendanceEvent, AuditTrace, AuditWarning, ComplianceReport, ComplianceSummary,
    ComplianceVerdict, OutcomeStatus, Recommendation, ReportingPeriod, ScheduledDuty,
    ShiftOutcome, StaffRole, TrendResult,
};

use super::source::RosterSource;

/// Rule identifiers recorded in the audit trace.
pub mod rule_ids {
    /// Input validation of duties and attendance records.
    pub const INPUT_VALIDATION: &str = "input_validation";
    /// Pairing of attendance records with duties.
    pub const SHIFT_MATCHING: &str = "shift_matching";
    /// Derivation of per-duty outcomes.
    pub const SHIFT_OUTCOMES: &str = "shift_outcomes";
    /// Bucketing of check-in drift.
    pub const SCHEDULE_COMPLIANCE: &str = "schedule_compliance";
    /// Period aggregation.
    pub const PERIOD_AGGREGATION: &str = "period_aggregation";
}

/// Warning code for attendance records no duty claimed.
pub const UNMATCHED_ATTENDANCE: &str = "UNMATCHED_ATTENDANCE";

/// Evaluates schedules against attendance under an injected policy.
///
/// The engine holds no mutable state and never reads the clock; every time
/// dependency comes from the [`EvaluationContext`].
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use duty_compliance::config::PolicyConfig;
/// use duty_compliance::engine::{ComplianceEngine, InMemoryRoster};
/// use duty_compliance::models::ReportingPeriod;
///
/// let engine = ComplianceEngine::new(PolicyConfig::default());
/// let as_of = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let ctx = engine.context(None, as_of).unwrap();
/// let period = ReportingPeriod::month(2026, 1).unwrap();
///
/// let roster = InMemoryRoster::default();
/// let summary = engine.compute_summary(&roster, "staff_001", period, &ctx).unwrap();
/// assert_eq!(summary.total_scheduled_shifts, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComplianceEngine {
    policy: PolicyConfig,
}

impl ComplianceEngine {
    /// Creates an engine for the given policy.
    pub fn new(policy: PolicyConfig) -> Self {
        Self { policy }
    }

    /// Returns the policy in use.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Builds an evaluation context for a work location.
    ///
    /// `None` selects the policy's default location.
    pub fn context(
        &self,
        location: Option<&str>,
        as_of: NaiveDateTime,
    ) -> EngineResult<EvaluationContext> {
        let (code, policy) = self.policy.location(location).inspect_err(|err| {
            warn!(error = %err, "Unknown work location");
        })?;
        let mut ctx = EvaluationContext::new(as_of, code, policy.clone());
        ctx.overtime_after_sequence = self.policy.settings().overtime_after_sequence;
        Ok(ctx)
    }

    /// Builds the full report for one staff member from pre-fetched inputs.
    ///
    /// Duties and records belonging to other staff members or dated outside
    /// `period` are ignored. Invalid inputs abort this report only.
    pub fn build_report(
        &self,
        staff_id: &str,
        period: ReportingPeriod,
        duties: &[ScheduledDuty],
        events: &[AttendanceEvent],
        ctx: &EvaluationContext,
    ) -> EngineResult<ComplianceReport> {
        let started = Instant::now();
        period.validate().inspect_err(|err| {
            warn!(staff_id = staff_id, error = %err, "Rejected reporting period");
        })?;

        let duties: Vec<ScheduledDuty> = duties
            .iter()
            .filter(|d| d.staff_id == staff_id && period.contains_date(d.date))
            .cloned()
            .collect();
        let events: Vec<AttendanceEvent> = events
            .iter()
            .filter(|e| e.staff_id == staff_id && period.contains_date(e.date))
            .cloned()
            .collect();

        validate_duties(&duties, ctx.overtime_after_sequence)?;
        validate_attendance(&events)?;

        let mut trace = AuditTrace::default();
        trace.push_step(
            rule_ids::INPUT_VALIDATION,
            "Input Validation",
            serde_json::json!({
                "staff_id": staff_id,
                "period": period.label(),
                "duties": duties.len(),
                "attendance_records": events.len(),
                "overtime_after_sequence": ctx.overtime_after_sequence,
            }),
            serde_json::json!({ "valid": true }),
            format!(
                "{} duties and {} attendance records in {} passed validation",
                duties.len(),
                events.len(),
                period.label()
            ),
        );

        let matched = match_duties(&duties, &events, &ctx.location);
        let paired = matched.matches.iter().filter(|m| m.event.is_some()).count();
        let unmatched_attendance: Vec<String> =
            matched.unmatched_events.iter().map(|e| e.id.clone()).collect();
        trace.push_step(
            rule_ids::SHIFT_MATCHING,
            "Shift Matching",
            serde_json::json!({
                "location": ctx.location_code,
                "checkin_before_shift_minutes": ctx.location.checkin_before_shift_minutes,
                "checkout_after_shift_minutes": ctx.location.checkout_after_shift_minutes,
            }),
            serde_json::json!({
                "matched_duties": paired,
                "unmatched_duties": matched.matches.len() - paired,
                "unmatched_attendance": unmatched_attendance,
            }),
            format!(
                "Paired {} of {} duties with an attendance record; {} record(s) left unmatched",
                paired,
                matched.matches.len(),
                unmatched_attendance.len()
            ),
        );
        for event in &matched.unmatched_events {
            trace.warnings.push(AuditWarning {
                code: UNMATCHED_ATTENDANCE.to_string(),
                message: format!(
                    "Attendance record '{}' on {} matched no scheduled duty",
                    event.id, event.date
                ),
                severity: "low".to_string(),
            });
        }

        let daily_breakdown: Vec<ShiftOutcome> = matched
            .matches
            .iter()
            .map(|m| evaluate_shift(m.duty, m.event, ctx))
            .collect();
        let count = |status: OutcomeStatus| {
            daily_breakdown.iter().filter(|o| o.status == status).count()
        };
        trace.push_step(
            rule_ids::SHIFT_OUTCOMES,
            "Shift Outcomes",
            serde_json::json!({ "as_of": ctx.as_of.to_string() }),
            serde_json::json!({
                "present": count(OutcomeStatus::Present),
                "absent": count(OutcomeStatus::Absent),
                "no_show": count(OutcomeStatus::NoShow),
                "leave": count(OutcomeStatus::Leave),
                "pending": count(OutcomeStatus::Pending),
            }),
            "Leave duties are excluded; duties whose window is still open at as_of are pending"
                .to_string(),
        );

        let summary = summarize_outcomes(
            staff_id,
            period,
            &daily_breakdown,
            ctx.location.late_tolerance_minutes,
        );
        trace.push_step(
            rule_ids::SCHEDULE_COMPLIANCE,
            "Schedule Compliance",
            serde_json::json!({
                "very_early_limit_minutes": calculation::VERY_EARLY_LIMIT_MINUTES,
                "acceptable_late_limit_minutes": calculation::ACCEPTABLE_LATE_LIMIT_MINUTES,
                "late_limit_minutes": calculation::LATE_LIMIT_MINUTES,
            }),
            serde_json::json!({
                "very_early": summary.compliance_breakdown.very_early,
                "on_time": summary.compliance_breakdown.on_time,
                "acceptable_late": summary.compliance_breakdown.acceptable_late,
                "late": summary.compliance_breakdown.late,
                "very_late": summary.compliance_breakdown.very_late,
            }),
            format!(
                "Bucketed check-in drift of {} present shift(s)",
                summary.compliance_breakdown.total()
            ),
        );
        trace.push_step(
            rule_ids::PERIOD_AGGREGATION,
            "Period Aggregation",
            serde_json::json!({
                "total_scheduled_shifts": summary.total_scheduled_shifts,
                "attended_shifts": summary.attended_shifts,
                "on_time_shifts": summary.on_time_shifts,
                "gps_valid_shifts": summary.gps_valid_shifts,
                "late_tolerance_minutes": ctx.location.late_tolerance_minutes,
            }),
            serde_json::json!({
                "completion_rate": summary.completion_rate.to_string(),
                "punctuality_rate": summary.punctuality_rate.to_string(),
                "gps_validation_rate": summary.gps_validation_rate.to_string(),
                "status": summary.status,
            }),
            format!(
                "{} of {} duties attended; {} leave and {} pending duties excluded",
                summary.attended_shifts,
                summary.total_scheduled_shifts,
                summary.leave_shifts + summary.pending_leave_shifts,
                summary.pending_shifts
            ),
        );

        debug!(
            staff_id = staff_id,
            period = %period.label(),
            duties = daily_breakdown.len(),
            unmatched = unmatched_attendance.len(),
            duration_us = started.elapsed().as_micros() as u64,
            "Built compliance report"
        );

        Ok(ComplianceReport {
            staff_id: staff_id.to_string(),
            period,
            location: ctx.location_code.clone(),
            as_of: ctx.as_of,
            summary,
            daily_breakdown,
            unmatched_attendance,
            audit_trace: trace,
        })
    }

    /// Fetches the inputs of one staff member from `source` and builds the report.
    pub fn compute_report<S: RosterSource + ?Sized>(
        &self,
        source: &S,
        staff_id: &str,
        period: ReportingPeriod,
        ctx: &EvaluationContext,
    ) -> EngineResult<ComplianceReport> {
        let duties = source.schedules_for_staff(staff_id, &period)?;
        let events = source.attendance_for_staff(staff_id, &period)?;
        self.build_report(staff_id, period, &duties, &events, ctx)
    }

    /// Computes the period summary of one staff member.
    pub fn compute_summary<S: RosterSource + ?Sized>(
        &self,
        source: &S,
        staff_id: &str,
        period: ReportingPeriod,
        ctx: &EvaluationContext,
    ) -> EngineResult<ComplianceSummary> {
        Ok(self.compute_report(source, staff_id, period, ctx)?.summary)
    }

    /// Computes one outcome per duty, ordered by date then sequence.
    pub fn compute_daily_breakdown<S: RosterSource + ?Sized>(
        &self,
        source: &S,
        staff_id: &str,
        period: ReportingPeriod,
        ctx: &EvaluationContext,
    ) -> EngineResult<Vec<ShiftOutcome>> {
        Ok(self
            .compute_report(source, staff_id, period, ctx)?
            .daily_breakdown)
    }

    /// Evaluates a summary against the configured thresholds of `role`.
    pub fn evaluate_standards(
        &self,
        summary: &ComplianceSummary,
        role: StaffRole,
    ) -> EngineResult<ComplianceVerdict> {
        let verdict = calculation::evaluate_standards(summary, role, self.policy.standards())
            .inspect_err(|err| {
                warn!(staff_id = %summary.staff_id, error = %err, "Standards evaluation failed");
            })?;
        info!(
            staff_id = %verdict.staff_id,
            role = role.as_str(),
            overall_compliant = verdict.overall_compliant,
            score = %verdict.score,
            "Evaluated standards"
        );
        Ok(verdict)
    }

    /// Computes the trend across summaries using the configured dead-band.
    pub fn compute_trend(&self, summaries: &[ComplianceSummary]) -> TrendResult {
        calculation::compute_trend(summaries, self.dead_band())
    }

    /// Produces recommendations using the configured excellence threshold.
    pub fn generate_recommendations(
        &self,
        summary: &ComplianceSummary,
        verdict: &ComplianceVerdict,
    ) -> Vec<Recommendation> {
        calculation::generate_recommendations(
            summary,
            verdict,
            self.policy.settings().excellence_threshold,
        )
    }

    fn dead_band(&self) -> Decimal {
        self.policy.settings().trend_dead_band
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::InMemoryRoster;
    use crate::error::EngineError;
    use crate::models::{DutyStatus, PerformanceStatus, ShiftTemplate};
    use chrono::{NaiveDate, NaiveTime};

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn template(id: &str, start: NaiveTime, end: NaiveTime) -> ShiftTemplate {
        ShiftTemplate {
            id: id.to_string(),
            name: id.to_string(),
            start_time: start,
            end_time: end,
        }
    }

    fn morning() -> ShiftTemplate {
        template("morning", time(7, 0), time(14, 0))
    }

    fn duty(id: &str, date: NaiveDate, shift: ShiftTemplate, sequence: u32) -> ScheduledDuty {
        ScheduledDuty::new(
            id,
            "staff_001",
            date,
            shift,
            sequence,
            StaffRole::Doctor,
            DutyStatus::Active,
        )
    }

    fn attended(id: &str, date: NaiveDate, check_in: NaiveTime, check_out: NaiveTime) -> AttendanceEvent {
        AttendanceEvent {
            id: id.to_string(),
            staff_id: "staff_001".to_string(),
            date,
            check_in: Some(check_in),
            check_out: Some(check_out),
            location: None,
            is_valid: true,
        }
    }

    fn engine() -> ComplianceEngine {
        ComplianceEngine::new(PolicyConfig::default())
    }

    fn ctx(engine: &ComplianceEngine) -> EvaluationContext {
        let as_of = NaiveDate::from_ymd_opt(2026, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        engine.context(None, as_of).unwrap()
    }

    fn january() -> ReportingPeriod {
        ReportingPeriod::month(2026, 1).unwrap()
    }

    /// 20 duties, 18 attended (3 of them 20 minutes late), 2 no-show records.
    fn scenario_a() -> InMemoryRoster {
        let mut duties = Vec::new();
        let mut events = Vec::new();
        for d in 1..=20 {
            duties.push(duty(&format!("d{}", d), day(d), morning(), 1));
            let id = format!("a{}", d);
            match d {
                1 | 2 => events.push(AttendanceEvent {
                    check_in: None,
                    check_out: None,
                    is_valid: false,
                    ..attended(&id, day(d), time(7, 0), time(14, 0))
                }),
                3..=5 => events.push(attended(&id, day(d), time(7, 20), time(14, 0))),
                _ => events.push(attended(&id, day(d), time(6, 55), time(14, 0))),
            }
        }
        InMemoryRoster::new(duties, events)
    }

    #[test]
    fn test_scenario_a_summary() {
        let engine = engine();
        let summary = engine
            .compute_summary(&scenario_a(), "staff_001", january(), &ctx(&engine))
            .unwrap();

        assert_eq!(summary.total_scheduled_shifts, 20);
        assert_eq!(summary.attended_shifts, 18);
        assert_eq!(summary.missed_shifts, 2);
        assert_eq!(summary.completion_rate, Decimal::new(900, 1));
        assert_eq!(summary.punctuality_rate, Decimal::new(833, 1));
        assert_eq!(summary.gps_validation_rate, Decimal::new(1000, 1));
        assert_eq!(summary.late_arrivals, 3);
        assert_eq!(summary.status, PerformanceStatus::Good);
    }

    #[test]
    fn test_scenario_b_doctor_verdict() {
        let engine = engine();
        let summary = engine
            .compute_summary(&scenario_a(), "staff_001", january(), &ctx(&engine))
            .unwrap();
        let mut summary = summary;
        summary.late_arrivals = 0;

        let verdict = engine.evaluate_standards(&summary, StaffRole::Doctor).unwrap();

        assert!(!verdict.attendance_compliant);
        assert!(verdict.punctuality_compliant);
    }

    #[test]
    fn test_scenario_c_multi_shift_overtime() {
        let engine = engine();
        let duties = vec![
            duty("d1", day(15), template("early", time(6, 0), time(10, 0)), 1),
            duty("d2", day(15), template("mid", time(11, 0), time(15, 0)), 2),
            duty("d3", day(15), template("late", time(16, 0), time(20, 0)), 3),
        ];
        let events = vec![
            attended("a1", day(15), time(6, 0), time(10, 0)),
            attended("a2", day(15), time(11, 5), time(15, 0)),
            attended("a3", day(15), time(16, 0), time(20, 0)),
        ];

        let report = engine
            .build_report("staff_001", january(), &duties, &events, &ctx(&engine))
            .unwrap();

        let flags: Vec<(u32, bool)> = report
            .daily_breakdown
            .iter()
            .map(|o| (o.sequence, o.is_overtime))
            .collect();
        assert_eq!(flags, vec![(1, false), (2, false), (3, true)]);
        assert_eq!(report.summary.overtime_shifts, 1);
        assert_eq!(
            report.daily_breakdown[1].attendance_id.as_deref(),
            Some("a2")
        );
    }

    #[test]
    fn test_scenario_d_leave_excluded_from_total() {
        let engine = engine();
        let mut leave = duty("d2", day(6), morning(), 1);
        leave.status = DutyStatus::LeaveApproved;
        let duties = vec![duty("d1", day(5), morning(), 1), leave];
        let events = vec![attended("a1", day(5), time(7, 0), time(14, 0))];

        let report = engine
            .build_report("staff_001", january(), &duties, &events, &ctx(&engine))
            .unwrap();

        assert_eq!(report.summary.total_scheduled_shifts, 1);
        assert_eq!(report.summary.leave_shifts, 1);
        assert_eq!(report.daily_breakdown.len(), 2);
        assert_eq!(report.daily_breakdown[1].status, OutcomeStatus::Leave);
    }

    #[test]
    fn test_report_is_idempotent() {
        let engine = engine();
        let roster = scenario_a();
        let ctx = ctx(&engine);

        let first = engine.compute_report(&roster, "staff_001", january(), &ctx).unwrap();
        let second = engine.compute_report(&roster, "staff_001", january(), &ctx).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_is_idempotent() {
        let engine = engine();
        let roster = scenario_a();
        let ctx = ctx(&engine);

        let first = engine.compute_summary(&roster, "staff_001", january(), &ctx).unwrap();
        let second = engine.compute_summary(&roster, "staff_001", january(), &ctx).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.completion_rate, Decimal::new(900, 1));
    }

    #[test]
    fn test_check_in_before_midnight_counts_for_midnight_duty() {
        let engine = engine();
        let duties = vec![duty("d1", day(16), template("graveyard", time(0, 0), time(8, 0)), 1)];
        let events = vec![attended("a1", day(15), time(23, 50), time(8, 0))];

        let report = engine
            .build_report("staff_001", january(), &duties, &events, &ctx(&engine))
            .unwrap();

        let outcome = &report.daily_breakdown[0];
        assert_eq!(outcome.status, OutcomeStatus::Present);
        assert_eq!(outcome.attendance_id.as_deref(), Some("a1"));
        assert_eq!(outcome.late_minutes, Some(-10));
        assert!(report.unmatched_attendance.is_empty());
        assert!(report.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_schedule_compliance_step_lists_buckets() {
        let engine = engine();
        let report = engine
            .compute_report(&scenario_a(), "staff_001", january(), &ctx(&engine))
            .unwrap();

        let step = &report.audit_trace.steps[3];
        assert_eq!(step.rule_id, rule_ids::SCHEDULE_COMPLIANCE);
        assert_eq!(
            step.output,
            serde_json::json!({
                "very_early": 0,
                "on_time": 15,
                "acceptable_late": 0,
                "late": 3,
                "very_late": 0,
            })
        );
    }

    #[test]
    fn test_unmatched_attendance_becomes_warning() {
        let engine = engine();
        let duties = vec![duty("d1", day(5), morning(), 1)];
        let events = vec![
            attended("a1", day(5), time(7, 0), time(14, 0)),
            attended("a2", day(9), time(7, 0), time(14, 0)),
        ];

        let report = engine
            .build_report("staff_001", january(), &duties, &events, &ctx(&engine))
            .unwrap();

        assert_eq!(report.unmatched_attendance, vec!["a2".to_string()]);
        assert_eq!(report.audit_trace.warnings.len(), 1);
        assert_eq!(report.audit_trace.warnings[0].code, UNMATCHED_ATTENDANCE);
        assert_eq!(report.summary.attended_shifts, 1);
    }

    #[test]
    fn test_audit_trace_records_each_stage() {
        let engine = engine();
        let report = engine
            .compute_report(&scenario_a(), "staff_001", january(), &ctx(&engine))
            .unwrap();

        let recorded: Vec<&str> = report
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            recorded,
            vec![
                rule_ids::INPUT_VALIDATION,
                rule_ids::SHIFT_MATCHING,
                rule_ids::SHIFT_OUTCOMES,
                rule_ids::SCHEDULE_COMPLIANCE,
                rule_ids::PERIOD_AGGREGATION,
            ]
        );
        assert_eq!(report.audit_trace.steps[4].step_number, 5);
    }

    #[test]
    fn test_pending_duties_before_as_of() {
        let engine = engine();
        let duties = vec![duty("d1", day(30), morning(), 1), duty("d2", day(31), morning(), 1)];
        let events = vec![attended("a1", day(30), time(7, 0), time(14, 0))];
        let as_of = day(31).and_time(time(9, 0));
        let ctx = engine.context(None, as_of).unwrap();

        let report = engine
            .build_report("staff_001", january(), &duties, &events, &ctx)
            .unwrap();

        assert_eq!(report.daily_breakdown[1].status, OutcomeStatus::Pending);
        assert_eq!(report.summary.pending_shifts, 1);
        assert_eq!(report.summary.total_scheduled_shifts, 1);
        assert_eq!(report.summary.completion_rate, Decimal::new(1000, 1));
    }

    #[test]
    fn test_invalid_duty_aborts_report() {
        let engine = engine();
        let mut bad = duty("d1", day(5), morning(), 3);
        bad.is_overtime = false;

        let result = engine.build_report("staff_001", january(), &[bad], &[], &ctx(&engine));

        assert!(matches!(result, Err(EngineError::InvalidDuty { .. })));
    }

    #[test]
    fn test_other_staff_inputs_are_ignored() {
        let engine = engine();
        let mut foreign = duty("x1", day(5), morning(), 1);
        foreign.staff_id = "staff_002".to_string();
        foreign.id = String::new();

        let report = engine
            .build_report("staff_001", january(), &[foreign], &[], &ctx(&engine))
            .unwrap();

        assert!(report.daily_breakdown.is_empty());
        assert_eq!(report.summary.completion_rate, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_location_context() {
        let engine = engine();
        let as_of = day(1).and_time(time(0, 0));

        assert!(matches!(
            engine.context(Some("nowhere"), as_of),
            Err(EngineError::UnknownLocation { .. })
        ));
    }

    #[test]
    fn test_trend_and_recommendations_use_policy() {
        let engine = engine();
        let summary = engine
            .compute_summary(&scenario_a(), "staff_001", january(), &ctx(&engine))
            .unwrap();
        let verdict = engine.evaluate_standards(&summary, StaffRole::Doctor).unwrap();

        let recs = engine.generate_recommendations(&summary, &verdict);
        assert_eq!(recs[0].rule_id, "ATTENDANCE_BELOW_MINIMUM");
        assert_eq!(recs.len(), 2);

        let trend = engine.compute_trend(std::slice::from_ref(&summary));
        assert_eq!(trend.periods, 1);
    }
}
