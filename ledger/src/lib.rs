//! Attestation ledger interface.
//!
//! The ledger is an external, append-only store of verification attestations
//! keyed by claim fingerprint. This crate defines the client trait the engine
//! calls and the attestation types that cross it; consensus and signing live
//! on the other side of the trait.

pub mod attestation;
pub mod client;
pub mod error;

pub use attestation::{AttestationKind, AttestationRequest, LedgerStatus, TransactionId};
pub use client::LedgerClient;
pub use error::LedgerError;
