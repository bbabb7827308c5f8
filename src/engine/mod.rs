//! Orchestration of the calculation functions.
//!
//! This module exposes the consumer-facing operations: computing summaries,
//! daily breakdowns and full reports from a [`RosterSource`], evaluating
//! standards, computing trends, generating recommendations and running
//! batches across staff.

mod batch;
mod compliance;
mod source;

pub use batch::{
    BatchFailure, BatchOutcome, StaffEvaluation, StaffRoster, compute_batch, default_workers,
};
pub use compliance::{ComplianceEngine, UNMATCHED_ATTENDANCE, rule_ids};
pub use source::{InMemoryRoster, RosterSource};
