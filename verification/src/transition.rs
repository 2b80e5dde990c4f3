//! The per-claim state machine.
//!
//! Transitions are pure: they take an immutable snapshot of the record and
//! return the record as it should be afterwards together with the
//! [`RecordPatch`] that turns the stored copy into it. All I/O (ledger,
//! directory, store) happens outside this module; its results arrive here as
//! a [`ClaimEvent`].
//!
//! ```text
//! PENDING              --ledger hit-------------> BLOCKCHAIN_VERIFIED
//! PENDING              --directory match--------> SUBMITTED
//! PENDING              --no match---------------> PENDING
//! SUBMITTED            --ledger hit-------------> BLOCKCHAIN_VERIFIED
//! SUBMITTED            --directory match--------> SUBMITTED (resolved refreshed)
//! SUBMITTED            --no match---------------> SUBMITTED
//! BLOCKCHAIN_VERIFIED  --ledger hit-------------> BLOCKCHAIN_VERIFIED
//! BLOCKCHAIN_VERIFIED  --directory match/miss---> BLOCKCHAIN_VERIFIED
//! any non-terminal     --approve----------------> VERIFIED
//! any non-terminal     --reject-----------------> REJECTED
//! VERIFIED, REJECTED   --anything---------------> unchanged
//! ```

use vouch_store::{ClaimPatch, RecordPatch};
use vouch_types::{
    ClaimKind, ClaimRecord, ClaimState, ResolvedFields, Timestamp, VerificationRecord,
};

use crate::aggregate::StatusAggregator;
use crate::error::ReconcileError;

/// What the outside world said about a claim.
#[derive(Clone, Debug, PartialEq)]
pub enum ClaimEvent {
    /// The ledger holds an attestation for the claim's fingerprint.
    ///
    /// `verified` is the flag the ledger reported for it. The claim becomes
    /// `BLOCKCHAIN_VERIFIED` either way; only a verified entry copies the
    /// declared values into `resolved`.
    LedgerHit { verified: bool },
    /// No ledger entry; the directory produced an authoritative record.
    DirectoryMatch(ResolvedFields),
    /// Neither the ledger nor the directory knew the claim.
    NoMatch,
    /// An adjudicator approved the claim and the ledger holds a verified
    /// attestation for it.
    Approved,
    /// An adjudicator rejected the claim.
    Rejected,
}

impl ClaimEvent {
    /// Response wording for the event, given the claim's kind.
    pub fn message(&self, kind: ClaimKind) -> String {
        let label = kind.label();
        match self {
            Self::LedgerHit { .. } => {
                format!("{label} verification status retrieved from blockchain")
            }
            Self::DirectoryMatch(_) => match kind {
                ClaimKind::Education => {
                    "Education information found in database. Awaiting verification.".to_string()
                }
                ClaimKind::WorkExperience => {
                    "Work experience information fetched. Awaiting verification.".to_string()
                }
            },
            Self::NoMatch => match kind {
                ClaimKind::Education => {
                    "No matching education records found. Awaiting manual verification."
                        .to_string()
                }
                ClaimKind::WorkExperience => {
                    "No matching employment records found. Awaiting manual verification."
                        .to_string()
                }
            },
            Self::Approved => format!("{label} verification completed"),
            Self::Rejected => format!("{label} verification rejected"),
        }
    }
}

/// The next state of a single claim.
pub fn next_claim(claim: &ClaimRecord, event: &ClaimEvent) -> ClaimRecord {
    use ClaimState::*;

    let claim = claim.clone();
    match (claim.state(), event) {
        (Verified | Rejected, _) => claim,

        (Pending | Submitted | BlockchainVerified, ClaimEvent::LedgerHit { verified: true }) => {
            claim.resolve_from_declared().with_state(BlockchainVerified)
        }
        (Pending | Submitted | BlockchainVerified, ClaimEvent::LedgerHit { verified: false }) => {
            claim.with_state(BlockchainVerified)
        }

        (Pending | Submitted, ClaimEvent::DirectoryMatch(fields)) => {
            claim.with_resolved(fields.clone()).with_state(Submitted)
        }
        (BlockchainVerified, ClaimEvent::DirectoryMatch(_)) => claim,

        (Pending | Submitted | BlockchainVerified, ClaimEvent::NoMatch) => claim,

        (Pending | Submitted | BlockchainVerified, ClaimEvent::Approved) => {
            claim.fill_unresolved_from_declared().with_state(Verified)
        }
        (Pending | Submitted | BlockchainVerified, ClaimEvent::Rejected) => {
            claim.with_state(Rejected)
        }
    }
}

/// A computed but not yet persisted change to one record.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// The record as it reads once `patch` has been applied.
    pub record: VerificationRecord,
    pub patch: RecordPatch,
    pub from: ClaimState,
    pub to: ClaimState,
}

/// Apply `event` to claim `index` of `kind` on `snapshot`.
///
/// The overall status is recomputed from the new claim states and carried in
/// the patch alongside the claim itself and `now` as the update time.
pub fn apply(
    snapshot: &VerificationRecord,
    kind: ClaimKind,
    index: usize,
    event: &ClaimEvent,
    aggregator: &StatusAggregator,
    now: Timestamp,
) -> Result<Transition, ReconcileError> {
    let claim = claim_at(snapshot, kind, index)?;
    let next = next_claim(&claim, event);

    let mut record = snapshot.clone();
    record.set_claim(index, next.clone());
    record.overall_status = aggregator.recompute(&record);
    record.updated_at = now;

    let patch = RecordPatch {
        claims: vec![ClaimPatch {
            index,
            claim: next.clone(),
        }],
        overall_status: Some(record.overall_status),
        updated_at: Some(now),
    };

    Ok(Transition {
        record,
        patch,
        from: claim.state(),
        to: next.state(),
    })
}

/// The claim at `index` of `kind`, or [`ReconcileError::IndexOutOfRange`].
pub fn claim_at(
    record: &VerificationRecord,
    kind: ClaimKind,
    index: usize,
) -> Result<ClaimRecord, ReconcileError> {
    record
        .claim(kind, index)
        .ok_or_else(|| ReconcileError::IndexOutOfRange {
            kind,
            index,
            len: record.claim_count(kind),
        })
}
