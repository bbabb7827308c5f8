//! Batch evaluation across many staff members.
//!
//! Rosters sharing a staff identifier are merged, then partitioned by staff
//! identifier, and each partition is evaluated on a tokio blocking task. A failing staff member never aborts the batch:
//! the error is logged and collected alongside the successful reports.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::EvaluationContext;
use crate::error::EngineResult;
use crate::models::{
    AttendanceEvent, ComplianceReport, ComplianceVerdict, Recommendation, ReportingPeriod,
    ScheduledDuty, StaffRole,
};

use super::compliance::ComplianceEngine;

/// Pre-fetched inputs of one staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffRoster {
    /// The staff member.
    pub staff_id: String,
    /// Role whose thresholds apply.
    pub role: StaffRole,
    /// Scheduled duties.
    #[serde(default)]
    pub duties: Vec<ScheduledDuty>,
    /// Attendance records.
    #[serde(default)]
    pub events: Vec<AttendanceEvent>,
}

/// Report, verdict and recommendations of one staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffEvaluation {
    /// The full report.
    pub report: ComplianceReport,
    /// Verdict against the role's thresholds.
    pub verdict: ComplianceVerdict,
    /// Prioritized recommendations.
    pub recommendations: Vec<Recommendation>,
}

/// A staff member whose evaluation failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// The staff member.
    pub staff_id: String,
    /// Why evaluation failed.
    pub error: String,
}

/// Everything a batch run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Successful evaluations, ordered by staff identifier.
    pub reports: Vec<StaffEvaluation>,
    /// Failed evaluations, ordered by staff identifier.
    pub failures: Vec<BatchFailure>,
}

impl ComplianceEngine {
    /// Builds the report of one roster and evaluates it against its role.
    pub fn evaluate_roster(
        &self,
        roster: &StaffRoster,
        period: ReportingPeriod,
        ctx: &EvaluationContext,
    ) -> EngineResult<StaffEvaluation> {
        let report = self.build_report(
            &roster.staff_id,
            period,
            &roster.duties,
            &roster.events,
            ctx,
        )?;
        let verdict = self.evaluate_standards(&report.summary, roster.role)?;
        let recommendations = self.generate_recommendations(&report.summary, &verdict);
        Ok(StaffEvaluation {
            report,
            verdict,
            recommendations,
        })
    }
}

/// Returns the number of partitions used when the caller has no preference.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Folds rosters that share a staff identifier into one roster per staff
/// member, ordered by staff identifier.
///
/// The merged roster goes through the same validation as any other, so a
/// duty repeated across the inputs is reported as a duplicate. Rosters that
/// disagree on the role are rejected.
fn merge_rosters(mut rosters: Vec<StaffRoster>) -> (Vec<StaffRoster>, Vec<BatchFailure>) {
    rosters.sort_by(|a, b| a.staff_id.cmp(&b.staff_id));

    let mut merged: Vec<StaffRoster> = Vec::with_capacity(rosters.len());
    let mut conflicting: Vec<String> = Vec::new();
    for roster in rosters {
        match merged.last_mut() {
            Some(current) if current.staff_id == roster.staff_id => {
                if current.role != roster.role {
                    warn!(
                        staff_id = %roster.staff_id,
                        first = current.role.as_str(),
                        second = roster.role.as_str(),
                        "Conflicting roles in batch rosters"
                    );
                    if conflicting.last() != Some(&roster.staff_id) {
                        conflicting.push(roster.staff_id.clone());
                    }
                }
                current.duties.extend(roster.duties);
                current.events.extend(roster.events);
            }
            _ => merged.push(roster),
        }
    }

    let failures = conflicting
        .iter()
        .map(|staff_id| BatchFailure {
            staff_id: staff_id.clone(),
            error: "Rosters for this staff member name different roles".to_string(),
        })
        .collect();
    merged.retain(|roster| !conflicting.contains(&roster.staff_id));
    (merged, failures)
}

/// Splits rosters, already one per staff member and sorted, into at most
/// `workers` partitions of contiguous staff ids.
fn partition(rosters: Vec<StaffRoster>, workers: usize) -> Vec<Vec<StaffRoster>> {
    let per_partition = rosters.len().div_ceil(workers.max(1)).max(1);

    let mut partitions: Vec<Vec<StaffRoster>> = Vec::new();
    let mut current: Vec<StaffRoster> = Vec::with_capacity(per_partition);
    for roster in rosters {
        current.push(roster);
        if current.len() == per_partition {
            partitions.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        partitions.push(current);
    }
    partitions
}

/// Evaluates every roster for `period`, spreading the work over `workers`
/// blocking tasks.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use duty_compliance::engine::{ComplianceEngine, compute_batch, default_workers};
/// # async fn run(engine: Arc<ComplianceEngine>, ctx: duty_compliance::calculation::EvaluationContext) {
/// let period = duty_compliance::models::ReportingPeriod::month(2026, 1).unwrap();
/// let outcome = compute_batch(engine, Vec::new(), period, ctx, default_workers()).await;
/// assert!(outcome.failures.is_empty());
/// # }
/// ```
pub async fn compute_batch(
    engine: Arc<ComplianceEngine>,
    rosters: Vec<StaffRoster>,
    period: ReportingPeriod,
    ctx: EvaluationContext,
    workers: usize,
) -> BatchOutcome {
    let (rosters, rejected) = merge_rosters(rosters);
    let staff_count = rosters.len() + rejected.len();
    let partitions = partition(rosters, workers);
    let partition_count = partitions.len();

    let mut handles = Vec::with_capacity(partition_count);
    for rosters in partitions {
        let staff_ids: Vec<String> = rosters.iter().map(|r| r.staff_id.clone()).collect();
        let engine = Arc::clone(&engine);
        let ctx = ctx.clone();
        let handle = tokio::task::spawn_blocking(move || {
            rosters
                .iter()
                .map(|roster| {
                    (
                        roster.staff_id.clone(),
                        engine.evaluate_roster(roster, period, &ctx),
                    )
                })
                .collect::<Vec<_>>()
        });
        handles.push((staff_ids, handle));
    }

    let mut outcome = BatchOutcome {
        reports: Vec::new(),
        failures: rejected,
    };
    for (staff_ids, handle) in handles {
        match handle.await {
            Ok(results) => {
                for (staff_id, result) in results {
                    match result {
                        Ok(evaluation) => outcome.reports.push(evaluation),
                        Err(err) => {
                            warn!(staff_id = %staff_id, error = %err, "Staff evaluation failed");
                            outcome.failures.push(BatchFailure {
                                staff_id,
                                error: err.to_string(),
                            });
                        }
                    }
                }
            }
            Err(join_error) => {
                for staff_id in staff_ids {
                    warn!(staff_id = %staff_id, error = %join_error, "Batch partition aborted");
                    outcome.failures.push(BatchFailure {
                        staff_id,
                        error: format!("evaluation task failed: {}", join_error),
                    });
                }
            }
        }
    }

    outcome
        .failures
        .sort_by(|a, b| a.staff_id.cmp(&b.staff_id));

    info!(
        period = %period.label(),
        staff = staff_count,
        partitions = partition_count,
        succeeded = outcome.reports.len(),
        failed = outcome.failures.len(),
        "Batch evaluation finished"
    );
    outcome
}
