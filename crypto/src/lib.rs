//! Hashing primitives for claim reconciliation.
//!
//! - **SHA-256** for every digest the ledger sees
//! - **Canonical JSON** with sorted keys so construction order never leaks into a hash
//! - **Fingerprints**: the ledger key of a claim, independent of which resume asserted it

pub mod canonical;
pub mod fingerprint;
pub mod hash;

pub use canonical::{canonical_json, canonical_string};
pub use fingerprint::{claim_fingerprint, fingerprint_subject, FingerprintSubject};
pub use hash::sha256;
