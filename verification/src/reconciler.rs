//! Driving claims through the state machine against the outside world.
//!
//! Every operation follows the same shape: take the resume's lock, load the
//! record, ask the ledger (and for `check`, the directory) about the claim,
//! compute the transition, then persist it with a version check. Collaborator
//! calls are each bounded by their configured timeout; a failed or timed-out
//! call aborts the operation before anything is written, so the claim stays
//! in its pre-call state.

use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};
use vouch_crypto::{canonical_string, claim_fingerprint, fingerprint_subject};
use vouch_directory::{select_by_position, InstitutionalDirectory};
use vouch_ledger::{AttestationRequest, LedgerClient};
use vouch_store::VerificationStore;
use vouch_types::{
    ClaimKind, ClaimRecord, ClaimState, Fingerprint, ResolvedFields, ResumeId, Timestamp,
    VerificationRecord,
};

use crate::aggregate::StatusAggregator;
use crate::bounded::bounded;
use crate::config::EngineConfig;
use crate::error::ReconcileError;
use crate::locks::RecordLocks;
use crate::spans::{adjudicate_span, check_span};
use crate::transition::{self, claim_at, ClaimEvent, Transition};

/// Result of one `check` or `adjudicate`.
#[derive(Clone, Debug, PartialEq)]
pub struct ClaimOutcome {
    /// The record as persisted (or as loaded, when nothing changed).
    pub record: VerificationRecord,
    pub message: String,
    /// State of the claim the operation addressed.
    pub state: ClaimState,
}

/// Runs `check` and `adjudicate` for single claims.
pub struct ClaimReconciler<L, D, S> {
    ledger: Arc<L>,
    directory: Arc<D>,
    store: Arc<S>,
    locks: Arc<RecordLocks>,
    aggregator: StatusAggregator,
    config: EngineConfig,
}

impl<L, D, S> ClaimReconciler<L, D, S>
where
    L: LedgerClient,
    D: InstitutionalDirectory,
    S: VerificationStore,
{
    pub fn new(config: EngineConfig, ledger: Arc<L>, directory: Arc<D>, store: Arc<S>) -> Self {
        Self {
            ledger,
            directory,
            store,
            locks: Arc::new(RecordLocks::new()),
            aggregator: StatusAggregator::new(config.verified_threshold_percent),
            config,
        }
    }

    /// Share a lock table with other engines serving the same store.
    pub fn with_locks(mut self, locks: Arc<RecordLocks>) -> Self {
        self.locks = locks;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn aggregator(&self) -> &StatusAggregator {
        &self.aggregator
    }

    pub fn locks(&self) -> &Arc<RecordLocks> {
        &self.locks
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Re-evaluate claim `index` of `kind` against the ledger and directory.
    pub async fn check(
        &self,
        resume_id: &ResumeId,
        kind: ClaimKind,
        index: usize,
    ) -> Result<ClaimOutcome, ReconcileError> {
        async {
            let _guard = self.locks.lock(resume_id).await;
            self.check_locked(resume_id, kind, index).await
        }
        .instrument(check_span(resume_id, kind, index))
        .await
    }

    /// Approve or reject claim `index` of `kind`.
    ///
    /// Approval writes a verified attestation to the ledger unless one is
    /// already there; the claim only becomes `VERIFIED` once that write has
    /// committed. Rejection never touches the ledger.
    pub async fn adjudicate(
        &self,
        resume_id: &ResumeId,
        kind: ClaimKind,
        index: usize,
        approve: bool,
    ) -> Result<ClaimOutcome, ReconcileError> {
        async {
            let _guard = self.locks.lock(resume_id).await;
            self.adjudicate_locked(resume_id, kind, index, approve).await
        }
        .instrument(adjudicate_span(resume_id, kind, index, approve))
        .await
    }

    /// `check` for a caller that already holds the resume's lock.
    pub(crate) async fn check_locked(
        &self,
        resume_id: &ResumeId,
        kind: ClaimKind,
        index: usize,
    ) -> Result<ClaimOutcome, ReconcileError> {
        let record = self.load(resume_id).await?;
        let claim = claim_at(&record, kind, index)?;
        if claim.state().is_terminal() {
            return Ok(final_state(record, kind, claim.state()));
        }

        let fingerprint = claim_fingerprint(&record.name, &claim);
        debug!(%fingerprint, state = %claim.state(), "checking claim");

        let event = self.observe(&record.name, &claim, &fingerprint).await?;
        let message = event.message(kind);
        let transition = transition::apply(
            &record,
            kind,
            index,
            &event,
            &self.aggregator,
            Timestamp::now(),
        )?;
        self.persist(transition, message).await
    }

    async fn adjudicate_locked(
        &self,
        resume_id: &ResumeId,
        kind: ClaimKind,
        index: usize,
        approve: bool,
    ) -> Result<ClaimOutcome, ReconcileError> {
        let record = self.load(resume_id).await?;
        let claim = claim_at(&record, kind, index)?;
        if claim.state().is_terminal() {
            return Ok(final_state(record, kind, claim.state()));
        }

        let (event, message) = if approve {
            let message = self.attest(&record.name, &claim).await?;
            (ClaimEvent::Approved, message)
        } else {
            (ClaimEvent::Rejected, ClaimEvent::Rejected.message(kind))
        };

        let transition = transition::apply(
            &record,
            kind,
            index,
            &event,
            &self.aggregator,
            Timestamp::now(),
        )?;
        self.persist(transition, message).await
    }

    /// What the ledger, failing that the directory, knows about `claim`.
    async fn observe(
        &self,
        name: &str,
        claim: &ClaimRecord,
        fingerprint: &Fingerprint,
    ) -> Result<ClaimEvent, ReconcileError> {
        let ledger_timeout = self.config.ledger_timeout();
        if bounded(ledger_timeout, self.ledger.exists(fingerprint)).await? {
            let status = bounded(ledger_timeout, self.ledger.status(fingerprint)).await?;
            info!(
                %fingerprint,
                verified = status.verified,
                attestation = %status.kind,
                oracle = %status.oracle,
                "attestation found on ledger"
            );
            return Ok(ClaimEvent::LedgerHit {
                verified: status.verified,
            });
        }

        let directory_timeout = self.config.directory_timeout();
        let resolved = match claim {
            ClaimRecord::Education(c) => bounded(
                directory_timeout,
                self.directory.find_education(name, &c.declared.institution),
            )
            .await?
            .map(|record| ResolvedFields::Education(record.resolved())),
            ClaimRecord::WorkExperience(c) => {
                let records = bounded(
                    directory_timeout,
                    self.directory.find_employment(name, &c.declared.company),
                )
                .await?;
                select_by_position(&records, &c.declared.position)
                    .map(|record| ResolvedFields::WorkExperience(record.resolved()))
            }
        };

        match resolved {
            Some(fields) => {
                info!(?fields, "directory record matched");
                Ok(ClaimEvent::DirectoryMatch(fields))
            }
            None => {
                info!("no directory record matched");
                Ok(ClaimEvent::NoMatch)
            }
        }
    }

    /// Make sure the ledger holds a verified attestation for `claim`.
    ///
    /// Returns the response message. Any failure leaves the ledger as it was
    /// from this call's point of view and must abort the approval.
    async fn attest(&self, name: &str, claim: &ClaimRecord) -> Result<String, ReconcileError> {
        let kind = claim.kind();
        let fingerprint = claim_fingerprint(name, claim);
        let ledger_timeout = self.config.ledger_timeout();

        if bounded(ledger_timeout, self.ledger.exists(&fingerprint)).await? {
            let status = bounded(ledger_timeout, self.ledger.status(&fingerprint)).await?;
            if status.verified {
                info!(%fingerprint, "claim already attested on ledger, skipping write");
                return Ok(format!("{} already verified in blockchain", kind.label()));
            }
            debug!(%fingerprint, "ledger entry is not verified, recording a new attestation");
        }

        let details = canonical_string(&fingerprint_subject(name, claim)).map_err(|e| {
            ReconcileError::LedgerUnavailable(format!("cannot encode attestation: {e}"))
        })?;
        let request = AttestationRequest {
            kind: kind.into(),
            details,
            requested_at: Timestamp::now(),
        };

        match bounded(ledger_timeout, self.ledger.store(&fingerprint, true, &request)).await {
            Ok(tx) => {
                info!(%fingerprint, %tx, attestation = %request.kind, "attestation recorded");
                Ok(format!(
                    "{} verification completed and stored on blockchain",
                    kind.label()
                ))
            }
            Err(failure) => {
                warn!(%fingerprint, error = %failure, "ledger write failed, claim left unchanged");
                Err(failure.into())
            }
        }
    }

    async fn load(&self, resume_id: &ResumeId) -> Result<VerificationRecord, ReconcileError> {
        bounded(self.config.store_timeout(), self.store.get(resume_id))
            .await?
            .ok_or_else(|| ReconcileError::record_not_found(resume_id))
    }

    async fn persist(
        &self,
        transition: Transition,
        message: String,
    ) -> Result<ClaimOutcome, ReconcileError> {
        let Transition {
            mut record,
            patch,
            from,
            to,
        } = transition;

        let id = record.id.clone().ok_or_else(|| {
            ReconcileError::Persistence(format!(
                "record for resume ID {} has no store id",
                record.resume_id
            ))
        })?;
        record.version = bounded(
            self.config.store_timeout(),
            self.store.update(&id, record.version, &patch),
        )
        .await?;

        info!(
            %from,
            %to,
            overall_status = %record.overall_status,
            version = record.version,
            "claim state persisted"
        );
        Ok(ClaimOutcome {
            record,
            message,
            state: to,
        })
    }
}

fn final_state(record: VerificationRecord, kind: ClaimKind, state: ClaimState) -> ClaimOutcome {
    debug!(%state, "claim already final, nothing to do");
    ClaimOutcome {
        record,
        message: format!("{} already in final state: {state}", kind.label()),
        state,
    }
}
