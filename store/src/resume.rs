//! Source of parsed resumes.

use async_trait::async_trait;
use vouch_types::{ResumeDocument, ResumeId};

use crate::StoreError;

/// Read access to parsed resumes owned by the ingestion side.
#[async_trait]
pub trait ResumeSource: Send + Sync {
    async fn get_resume(&self, resume_id: &ResumeId) -> Result<Option<ResumeDocument>, StoreError>;
}
