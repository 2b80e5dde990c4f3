//! Ledger client trait.

use async_trait::async_trait;
use vouch_types::Fingerprint;

use crate::{AttestationRequest, LedgerError, LedgerStatus, TransactionId};

/// Hash-keyed access to the attestation ledger.
///
/// Entries are append-only: `store` adds a new attestation and nothing ever
/// rewrites an existing one.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Whether any attestation exists for `fingerprint`.
    async fn exists(&self, fingerprint: &Fingerprint) -> Result<bool, LedgerError>;

    /// Status of the attestation for `fingerprint`.
    ///
    /// Fails with [`LedgerError::NotFound`] when there is none.
    async fn status(&self, fingerprint: &Fingerprint) -> Result<LedgerStatus, LedgerError>;

    /// Record a new attestation and return its transaction id once committed.
    async fn store(
        &self,
        fingerprint: &Fingerprint,
        verified: bool,
        request: &AttestationRequest,
    ) -> Result<TransactionId, LedgerError>;
}
