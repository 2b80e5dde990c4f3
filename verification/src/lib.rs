//! Claim reconciliation engine.
//!
//! Each claim on a resume (a degree, a job) moves through a small state
//! machine driven by three collaborators: the attestation ledger, the
//! institutional directory and the verification store. This crate contains:
//!
//! - [`transition`]: the pure per-claim state machine and record patches
//! - [`aggregate`]: resume-level status derived from claim states
//! - [`reconciler`]: `check` and `adjudicate` of single claims under a
//!   per-resume lock, with timeout-bounded collaborator calls
//! - [`service`]: the public operations and their responses
//! - [`config`]: engine configuration loaded from TOML

pub mod aggregate;
mod bounded;
pub mod config;
pub mod error;
pub mod locks;
pub mod reconciler;
pub mod service;
pub mod spans;
pub mod transition;

pub use aggregate::{AggregateSummary, StatusAggregator, DEFAULT_THRESHOLD_PERCENT};
pub use config::{ConfigError, EngineConfig};
pub use error::ReconcileError;
pub use locks::RecordLocks;
pub use reconciler::{ClaimOutcome, ClaimReconciler};
pub use service::{record_from_resume, OperationResponse, VerificationService};
pub use transition::{ClaimEvent, Transition};
