use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("no attestation for fingerprint {0}")]
    NotFound(String),

    #[error("attestation already recorded for fingerprint {0}")]
    AlreadyRecorded(String),

    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    #[error("transaction rejected: {0}")]
    Rejected(String),
}
