//! Verification record storage trait.

use async_trait::async_trait;
use vouch_types::{RecordId, ResumeId, VerificationRecord};

use crate::{RecordPatch, StoreError};

/// Document store holding one verification record per resume.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Load the record for a resume, if one exists.
    async fn get(&self, resume_id: &ResumeId) -> Result<Option<VerificationRecord>, StoreError>;

    /// Insert a new record and return the id the store assigned to it.
    ///
    /// Fails with [`StoreError::Duplicate`] if the resume already has one.
    async fn create(&self, record: &VerificationRecord) -> Result<RecordId, StoreError>;

    /// Apply `patch` to the record `id` if its stored version still equals
    /// `expected_version`. Returns the new version.
    ///
    /// A stale version fails with [`StoreError::VersionConflict`] and leaves
    /// the stored record unchanged.
    async fn update(
        &self,
        id: &RecordId,
        expected_version: u64,
        patch: &RecordPatch,
    ) -> Result<u64, StoreError>;
}
