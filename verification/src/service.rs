//! The public operations: initialize a resume, then check or decide its claims.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn, Instrument};
use vouch_directory::InstitutionalDirectory;
use vouch_ledger::LedgerClient;
use vouch_store::{ResumeSource, StoreError, VerificationStore};
use vouch_types::{
    ClaimKind, EducationClaim, EducationDetails, EmploymentClaim, EmploymentDetails,
    OverallStatus, ResumeDocument, ResumeId, Timestamp, VerificationRecord,
};
use vouch_utils::extract_gpa;

use crate::aggregate::StatusAggregator;
use crate::bounded::{bounded, CallFailure};
use crate::config::EngineConfig;
use crate::error::ReconcileError;
use crate::reconciler::{ClaimOutcome, ClaimReconciler};
use crate::spans::initialize_span;

/// What every operation answers with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperationResponse {
    pub success: bool,
    pub message: String,
    /// The record after the operation. Absent when the operation failed
    /// before a record could be loaded or written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<VerificationRecord>,
}

impl OperationResponse {
    pub fn ok(message: impl Into<String>, record: VerificationRecord) -> Self {
        Self {
            success: true,
            message: message.into(),
            record: Some(record),
        }
    }

    pub fn failure(error: &ReconcileError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            record: None,
        }
    }
}

impl From<Result<ClaimOutcome, ReconcileError>> for OperationResponse {
    fn from(result: Result<ClaimOutcome, ReconcileError>) -> Self {
        match result {
            Ok(outcome) => Self::ok(outcome.message, outcome.record),
            Err(e) => {
                warn!(error = %e, "operation failed");
                Self::failure(&e)
            }
        }
    }
}

/// Entry point for the five verification operations.
///
/// Collaborators are injected here and shared by reference count with the
/// underlying [`ClaimReconciler`].
pub struct VerificationService<L, D, S, R> {
    reconciler: ClaimReconciler<L, D, S>,
    resumes: Arc<R>,
}

impl<L, D, S, R> VerificationService<L, D, S, R>
where
    L: LedgerClient,
    D: InstitutionalDirectory,
    S: VerificationStore,
    R: ResumeSource,
{
    pub fn new(
        config: EngineConfig,
        ledger: Arc<L>,
        directory: Arc<D>,
        store: Arc<S>,
        resumes: Arc<R>,
    ) -> Self {
        Self {
            reconciler: ClaimReconciler::new(config, ledger, directory, store),
            resumes,
        }
    }

    pub fn reconciler(&self) -> &ClaimReconciler<L, D, S> {
        &self.reconciler
    }

    /// Create the verification record for a resume and check every claim once.
    ///
    /// A resume that already has a record is not re-initialised; the existing
    /// record comes back with an unsuccessful response. Errors while checking
    /// individual claims are reported in the message and do not stop the
    /// remaining claims from being checked.
    pub async fn initialize(&self, resume_id: &ResumeId) -> OperationResponse {
        async {
            let _guard = self.reconciler.locks().lock(resume_id).await;
            match self.create_record(resume_id).await {
                Ok(record) => self.check_all(record).await,
                Err(Initialize::Exists(record)) => OperationResponse {
                    success: false,
                    message: ReconcileError::AlreadyInitialized(resume_id.clone()).to_string(),
                    record: Some(record),
                },
                Err(Initialize::Failed(e)) => {
                    warn!(error = %e, "initialization failed");
                    OperationResponse::failure(&e)
                }
            }
        }
        .instrument(initialize_span(resume_id))
        .await
    }

    pub async fn check_education(&self, resume_id: &ResumeId, index: usize) -> OperationResponse {
        self.reconciler
            .check(resume_id, ClaimKind::Education, index)
            .await
            .into()
    }

    pub async fn check_work_experience(
        &self,
        resume_id: &ResumeId,
        index: usize,
    ) -> OperationResponse {
        self.reconciler
            .check(resume_id, ClaimKind::WorkExperience, index)
            .await
            .into()
    }

    pub async fn verify_education(
        &self,
        resume_id: &ResumeId,
        index: usize,
        approve: bool,
    ) -> OperationResponse {
        self.reconciler
            .adjudicate(resume_id, ClaimKind::Education, index, approve)
            .await
            .into()
    }

    pub async fn verify_work_experience(
        &self,
        resume_id: &ResumeId,
        index: usize,
        approve: bool,
    ) -> OperationResponse {
        self.reconciler
            .adjudicate(resume_id, ClaimKind::WorkExperience, index, approve)
            .await
            .into()
    }

    /// Build and store a fresh record. Caller holds the resume's lock.
    async fn create_record(&self, resume_id: &ResumeId) -> Result<VerificationRecord, Initialize> {
        let store_timeout = self.reconciler.config().store_timeout();
        let store = self.reconciler.store();

        if let Some(existing) = bounded(store_timeout, store.get(resume_id))
            .await
            .map_err(ReconcileError::from)?
        {
            return Err(Initialize::Exists(existing));
        }

        let resume = bounded(store_timeout, self.resumes.get_resume(resume_id))
            .await
            .map_err(ReconcileError::from)?
            .ok_or_else(|| ReconcileError::resume_not_found(resume_id))?;

        let mut record = record_from_resume(&resume, self.reconciler.aggregator(), Timestamp::now());
        match bounded(store_timeout, store.create(&record)).await {
            Ok(id) => record.id = Some(id),
            Err(failure) => {
                // lost a race with another process creating the same record
                if let CallFailure::Failed(StoreError::Duplicate(_)) = failure {
                    let existing = bounded(store_timeout, store.get(resume_id))
                        .await
                        .map_err(ReconcileError::from)?
                        .ok_or_else(|| ReconcileError::record_not_found(resume_id))?;
                    return Err(Initialize::Exists(existing));
                }
                return Err(ReconcileError::from(failure).into());
            }
        }

        info!(
            education = record.education.len(),
            work_experience = record.work_experience.len(),
            "verification record created"
        );
        Ok(record)
    }

    /// Check every claim once, education first. Caller holds the resume's lock.
    async fn check_all(&self, mut record: VerificationRecord) -> OperationResponse {
        let resume_id = record.resume_id.clone();
        let mut results = Vec::with_capacity(record.total_claims());

        for kind in [ClaimKind::Education, ClaimKind::WorkExperience] {
            let heading = match kind {
                ClaimKind::Education => "Education",
                ClaimKind::WorkExperience => "Work Experience",
            };
            for index in 0..record.claim_count(kind) {
                match self.reconciler.check_locked(&resume_id, kind, index).await {
                    Ok(outcome) => {
                        results.push(format!("{heading} {index}: {}", outcome.message));
                        record = outcome.record;
                    }
                    Err(e) => {
                        warn!(%kind, index, error = %e, "initial check failed");
                        results.push(format!("{heading} {index}: Error - {e}"));
                    }
                }
            }
        }

        OperationResponse::ok(
            format!(
                "Verification record created and verification started: {}",
                results.join("; ")
            ),
            record,
        )
    }
}

/// Why `initialize` did not produce a new record.
enum Initialize {
    Exists(VerificationRecord),
    Failed(ReconcileError),
}

impl From<ReconcileError> for Initialize {
    fn from(e: ReconcileError) -> Self {
        Self::Failed(e)
    }
}

/// A new verification record for `resume`, every claim `PENDING`.
///
/// Education GPA is read from the entry's free-text details. The overall
/// status is derived like any other time, so a resume without claims starts
/// out `REJECTED`.
pub fn record_from_resume(
    resume: &ResumeDocument,
    aggregator: &StatusAggregator,
    now: Timestamp,
) -> VerificationRecord {
    let education = resume
        .education
        .iter()
        .map(|entry| {
            EducationClaim::pending(EducationDetails {
                degree: entry.degree.clone(),
                institution: entry.institution.clone(),
                gpa: extract_gpa(&entry.details),
            })
        })
        .collect();
    let work_experience = resume
        .work_experience
        .iter()
        .map(|entry| {
            EmploymentClaim::pending(EmploymentDetails {
                position: entry.position.clone(),
                company: entry.company.clone(),
            })
        })
        .collect();

    let mut record = VerificationRecord {
        id: None,
        resume_id: resume.resume_id.clone(),
        job_id: resume.job_id.clone(),
        username: resume.username.clone(),
        name: resume.name.clone(),
        email: resume.email.clone(),
        phone: resume.phone.clone(),
        education,
        work_experience,
        overall_status: OverallStatus::Pending,
        version: 0,
        created_at: now,
        updated_at: now,
    };
    record.overall_status = aggregator.recompute(&record);
    record
}
