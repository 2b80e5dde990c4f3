//! Timeout-bounded collaborator calls.

use std::fmt;
use std::future::Future;
use std::time::Duration;
use vouch_directory::DirectoryError;
use vouch_ledger::LedgerError;
use vouch_store::StoreError;

use crate::error::ReconcileError;

/// Why a bounded call produced no value.
#[derive(Debug)]
pub(crate) enum CallFailure<E> {
    TimedOut(Duration),
    Failed(E),
}

impl<E: fmt::Display> fmt::Display for CallFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimedOut(limit) => write!(f, "timed out after {}ms", limit.as_millis()),
            Self::Failed(e) => e.fmt(f),
        }
    }
}

/// Await `call`, giving up once `limit` has elapsed.
///
/// On timeout the call is dropped; nothing it would have returned is observed.
pub(crate) async fn bounded<T, E, F>(limit: Duration, call: F) -> Result<T, CallFailure<E>>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(CallFailure::Failed(e)),
        Err(_) => Err(CallFailure::TimedOut(limit)),
    }
}

impl From<CallFailure<LedgerError>> for ReconcileError {
    fn from(failure: CallFailure<LedgerError>) -> Self {
        Self::LedgerUnavailable(failure.to_string())
    }
}

impl From<CallFailure<DirectoryError>> for ReconcileError {
    fn from(failure: CallFailure<DirectoryError>) -> Self {
        Self::DirectoryQuery(failure.to_string())
    }
}

impl From<CallFailure<StoreError>> for ReconcileError {
    fn from(failure: CallFailure<StoreError>) -> Self {
        Self::Persistence(failure.to_string())
    }
}
