//! The per-resume verification record.

use serde::{Deserialize, Serialize};

use crate::claim::{ClaimRecord, EducationClaim, EmploymentClaim};
use crate::id::{RecordId, ResumeId};
use crate::state::{ClaimKind, ClaimState, OverallStatus};
use crate::time::Timestamp;

/// One record per resume, holding every claim and the derived overall status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Assigned by the store on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub resume_id: ResumeId,
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub education: Vec<EducationClaim>,
    #[serde(default)]
    pub work_experience: Vec<EmploymentClaim>,
    /// Derived from the claim states; recomputed after every mutation.
    #[serde(default)]
    pub overall_status: OverallStatus,
    /// Bumped by the store on every successful update.
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

impl VerificationRecord {
    /// Number of claims of the given kind.
    pub fn claim_count(&self, kind: ClaimKind) -> usize {
        match kind {
            ClaimKind::Education => self.education.len(),
            ClaimKind::WorkExperience => self.work_experience.len(),
        }
    }

    /// Total claims across both sections.
    pub fn total_claims(&self) -> usize {
        self.education.len() + self.work_experience.len()
    }

    /// A copy of the claim at `index`, if it exists.
    pub fn claim(&self, kind: ClaimKind, index: usize) -> Option<ClaimRecord> {
        match kind {
            ClaimKind::Education => self.education.get(index).cloned().map(ClaimRecord::from),
            ClaimKind::WorkExperience => self
                .work_experience
                .get(index)
                .cloned()
                .map(ClaimRecord::from),
        }
    }

    /// Put `claim` at `index` in the section matching its kind.
    ///
    /// Returns `false` without touching the record when the index is out of range.
    pub fn set_claim(&mut self, index: usize, claim: ClaimRecord) -> bool {
        match claim {
            ClaimRecord::Education(c) => match self.education.get_mut(index) {
                Some(slot) => {
                    *slot = c;
                    true
                }
                None => false,
            },
            ClaimRecord::WorkExperience(c) => match self.work_experience.get_mut(index) {
                Some(slot) => {
                    *slot = c;
                    true
                }
                None => false,
            },
        }
    }

    /// States of every claim, education first.
    pub fn claim_states(&self) -> impl Iterator<Item = ClaimState> + '_ {
        self.education
            .iter()
            .map(|c| c.state)
            .chain(self.work_experience.iter().map(|c| c.state))
    }
}
