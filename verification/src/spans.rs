//! [`tracing::Span`] constructors for engine operations.
//!
//! Every operation on a claim runs inside one of these, so events emitted
//! by the ledger, directory and store layers carry the resume and claim.

use tracing::{info_span, Span};
use vouch_types::{ClaimKind, ResumeId};

/// Span covering a `check` of one claim.
pub fn check_span(resume_id: &ResumeId, kind: ClaimKind, index: usize) -> Span {
    info_span!("check", resume_id = %resume_id, kind = %kind, index)
}

/// Span covering an adjudication of one claim.
pub fn adjudicate_span(resume_id: &ResumeId, kind: ClaimKind, index: usize, approve: bool) -> Span {
    info_span!("adjudicate", resume_id = %resume_id, kind = %kind, index, approve)
}

/// Span covering the creation and first pass over a resume's claims.
pub fn initialize_span(resume_id: &ResumeId) -> Span {
    info_span!("initialize", resume_id = %resume_id)
}
