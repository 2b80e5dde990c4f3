//! Partial updates applied to a stored verification record.
//!
//! Claims are replaced one index at a time; the claim arrays themselves are
//! never swapped out wholesale.

use serde::{Deserialize, Serialize};
use vouch_types::{ClaimRecord, OverallStatus, Timestamp, VerificationRecord};

use crate::StoreError;

/// Replace the claim at `index` (in the section matching the claim's kind).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaimPatch {
    pub index: usize,
    pub claim: ClaimRecord,
}

/// The fields one mutation changes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(default)]
    pub claims: Vec<ClaimPatch>,
    #[serde(default)]
    pub overall_status: Option<OverallStatus>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty() && self.overall_status.is_none() && self.updated_at.is_none()
    }

    /// Apply the patch to `record` in place.
    ///
    /// Bounds are checked for every claim before anything is written, so a
    /// failing patch leaves the record untouched. The version is not touched;
    /// that belongs to the store.
    pub fn apply_to(&self, record: &mut VerificationRecord) -> Result<(), StoreError> {
        for patch in &self.claims {
            let kind = patch.claim.kind();
            let len = record.claim_count(kind);
            if patch.index >= len {
                return Err(StoreError::IndexOutOfRange {
                    section: kind.to_string(),
                    index: patch.index,
                    len,
                });
            }
        }
        for patch in &self.claims {
            record.set_claim(patch.index, patch.claim.clone());
        }
        if let Some(status) = self.overall_status {
            record.overall_status = status;
        }
        if let Some(at) = self.updated_at {
            record.updated_at = at;
        }
        Ok(())
    }
}
