//! Nullable ledger: an in-memory, append-only attestation map.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use vouch_ledger::{
    AttestationKind, AttestationRequest, LedgerClient, LedgerError, LedgerStatus, TransactionId,
};
use vouch_types::Fingerprint;

/// One `store` call as the ledger received it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerWrite {
    pub fingerprint: Fingerprint,
    pub verified: bool,
    pub request: AttestationRequest,
    pub tx: TransactionId,
}

/// A test ledger that keeps attestations in memory.
///
/// Later writes for the same fingerprint shadow earlier ones in `status`,
/// like a newer block would; nothing is ever removed.
pub struct NullLedger {
    entries: Mutex<HashMap<Fingerprint, LedgerStatus>>,
    writes: Mutex<Vec<LedgerWrite>>,
    outage: Mutex<Option<LedgerError>>,
    write_failure: Mutex<Option<LedgerError>>,
    delay: Mutex<Duration>,
    oracle: String,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            writes: Mutex::new(Vec::new()),
            outage: Mutex::new(None),
            write_failure: Mutex::new(None),
            delay: Mutex::new(Duration::ZERO),
            oracle: "0x0000000000000000000000000000000000000001".to_string(),
        }
    }

    /// Seed an attestation as if some earlier process had written it.
    pub fn attest(&self, fingerprint: Fingerprint, verified: bool, kind: AttestationKind) {
        self.insert(
            fingerprint,
            LedgerStatus {
                verified,
                kind,
                recorded_at: vouch_types::Timestamp::EPOCH,
                oracle: self.oracle.clone(),
                details: String::new(),
            },
        );
    }

    pub fn insert(&self, fingerprint: Fingerprint, status: LedgerStatus) {
        self.entries.lock().unwrap().insert(fingerprint, status);
    }

    /// Every call fails with [`LedgerError::Unavailable`] until cleared.
    pub fn set_unavailable(&self, reason: Option<&str>) {
        *self.outage.lock().unwrap() = reason.map(|r| LedgerError::Unavailable(r.to_string()));
    }

    /// `store` fails with `error` (reads still work) until cleared.
    pub fn fail_writes(&self, error: Option<LedgerError>) {
        *self.write_failure.lock().unwrap() = error;
    }

    /// Delay every answer by `delay`.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn status_of(&self, fingerprint: &Fingerprint) -> Option<LedgerStatus> {
        self.entries.lock().unwrap().get(fingerprint).cloned()
    }

    /// Every attestation currently on the ledger.
    pub fn entries(&self) -> Vec<(Fingerprint, LedgerStatus)> {
        let mut entries: Vec<_> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .map(|(f, s)| (*f, s.clone()))
            .collect();
        entries.sort_by_key(|(f, _)| *f);
        entries
    }

    /// Every successful `store` call, oldest first.
    pub fn writes(&self) -> Vec<LedgerWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    async fn answer(&self) -> Result<(), LedgerError> {
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match self.outage.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerClient for NullLedger {
    async fn exists(&self, fingerprint: &Fingerprint) -> Result<bool, LedgerError> {
        self.answer().await?;
        Ok(self.entries.lock().unwrap().contains_key(fingerprint))
    }

    async fn status(&self, fingerprint: &Fingerprint) -> Result<LedgerStatus, LedgerError> {
        self.answer().await?;
        self.status_of(fingerprint)
            .ok_or_else(|| LedgerError::NotFound(fingerprint.to_string()))
    }

    async fn store(
        &self,
        fingerprint: &Fingerprint,
        verified: bool,
        request: &AttestationRequest,
    ) -> Result<TransactionId, LedgerError> {
        self.answer().await?;
        if let Some(e) = self.write_failure.lock().unwrap().clone() {
            return Err(e);
        }

        let mut writes = self.writes.lock().unwrap();
        let tx = TransactionId::new(format!("0x{:064x}", writes.len() + 1));
        self.entries.lock().unwrap().insert(
            *fingerprint,
            LedgerStatus {
                verified,
                kind: request.kind,
                recorded_at: request.requested_at,
                oracle: self.oracle.clone(),
                details: request.details.clone(),
            },
        );
        writes.push(LedgerWrite {
            fingerprint: *fingerprint,
            verified,
            request: request.clone(),
            tx: tx.clone(),
        });
        Ok(tx)
    }
}
