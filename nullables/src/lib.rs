//! Nullable infrastructure for deterministic testing.
//!
//! Every collaborator the reconciliation engine talks to (ledger, directory,
//! verification store, resume source) has an in-memory implementation here
//! that:
//! - Returns deterministic values
//! - Can be told to fail or to answer slowly
//! - Records what was asked of it, for assertions
//! - Never touches the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod directory;
pub mod ledger;
pub mod store;

pub use directory::NullDirectorySource;
pub use ledger::{LedgerWrite, NullLedger};
pub use store::{NullResumeSource, NullVerificationStore};
