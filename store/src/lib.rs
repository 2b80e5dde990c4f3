//! Abstract storage traits for claim reconciliation.
//!
//! The persistence driver is an opaque document store. Backends (a database
//! driver, the in-memory nullables for testing) implement these traits; the
//! engine depends only on the traits.

pub mod error;
pub mod patch;
pub mod resume;
pub mod verification;

pub use error::StoreError;
pub use patch::{ClaimPatch, RecordPatch};
pub use resume::ResumeSource;
pub use verification::VerificationStore;
