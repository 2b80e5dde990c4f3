//! Resume-level status from claim states.

use tracing::debug;
use vouch_types::{ClaimState, OverallStatus, VerificationRecord};

/// Default share of verified claims at which a resume is `VERIFIED`.
pub const DEFAULT_THRESHOLD_PERCENT: f64 = 75.0;

/// Counts behind one aggregation, kept for logging and responses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AggregateSummary {
    pub total: usize,
    pub verified: usize,
    pub pending: usize,
    pub percentage: f64,
    pub status: OverallStatus,
}

/// Derives [`OverallStatus`] from the states of every claim on a record.
///
/// Any `PENDING` claim keeps the resume `PENDING`. `SUBMITTED` claims do not
/// hold the aggregate back: they count as not verified. Otherwise the resume
/// is `VERIFIED` when the verified share reaches the threshold and `REJECTED`
/// below it. A resume with no claims is always `REJECTED`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusAggregator {
    threshold_percent: f64,
}

impl Default for StatusAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_PERCENT)
    }
}

impl StatusAggregator {
    pub fn new(threshold_percent: f64) -> Self {
        Self { threshold_percent }
    }

    pub fn threshold_percent(&self) -> f64 {
        self.threshold_percent
    }

    pub fn summarize<I>(&self, states: I) -> AggregateSummary
    where
        I: IntoIterator<Item = ClaimState>,
    {
        let (mut total, mut verified, mut pending) = (0usize, 0usize, 0usize);
        for state in states {
            total += 1;
            if state == ClaimState::Pending {
                pending += 1;
            }
            if state.counts_as_verified() {
                verified += 1;
            }
        }

        let percentage = if total == 0 {
            0.0
        } else {
            verified as f64 / total as f64 * 100.0
        };

        let status = if pending > 0 {
            OverallStatus::Pending
        } else if total > 0 && percentage >= self.threshold_percent {
            OverallStatus::Verified
        } else {
            OverallStatus::Rejected
        };

        AggregateSummary {
            total,
            verified,
            pending,
            percentage,
            status,
        }
    }

    /// The overall status `record` should carry given its claims.
    pub fn recompute(&self, record: &VerificationRecord) -> OverallStatus {
        let summary = self.summarize(record.claim_states());
        debug!(
            resume_id = %record.resume_id,
            total = summary.total,
            verified = summary.verified,
            pending = summary.pending,
            percentage = summary.percentage,
            status = %summary.status,
            "aggregated claim states"
        );
        summary.status
    }
}
