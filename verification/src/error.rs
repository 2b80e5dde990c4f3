use thiserror::Error;
use vouch_types::{ClaimKind, ResumeId};

/// Failures surfaced by the reconciliation engine.
///
/// None of these is fatal to the engine; the service turns each into an
/// unsuccessful response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{} index {index} is out of range", index_noun(.kind))]
    IndexOutOfRange {
        kind: ClaimKind,
        index: usize,
        len: usize,
    },

    #[error("Verification for resume ID {0} already exists")]
    AlreadyInitialized(ResumeId),

    #[error("ledger unavailable: {0}")]
    LedgerUnavailable(String),

    #[error("directory query failed: {0}")]
    DirectoryQuery(String),

    #[error("persistence error: {0}")]
    Persistence(String),
}

impl ReconcileError {
    pub fn resume_not_found(id: &ResumeId) -> Self {
        Self::NotFound(format!("Resume with ID {id}"))
    }

    pub fn record_not_found(id: &ResumeId) -> Self {
        Self::NotFound(format!("Verification record for resume ID {id}"))
    }
}

fn index_noun(kind: &ClaimKind) -> &'static str {
    match kind {
        ClaimKind::Education => "Education",
        ClaimKind::WorkExperience => "Experience",
    }
}
