//! Fundamental types for claim reconciliation.
//!
//! Every other crate in the workspace speaks in these terms: the applicant's
//! declared claims, what authoritative sources resolved for them, the per-claim
//! state machine states and the resume-level verification record.

pub mod claim;
pub mod error;
pub mod hash;
pub mod id;
pub mod record;
pub mod resume;
pub mod state;
pub mod time;

pub use claim::{
    Claim, ClaimRecord, EducationClaim, EducationDetails, EmploymentClaim, EmploymentDetails,
    ResolvedEducation, ResolvedEmployment, ResolvedFields,
};
pub use error::TypesError;
pub use hash::Fingerprint;
pub use id::{RecordId, ResumeId};
pub use record::VerificationRecord;
pub use resume::{ResumeDocument, ResumeEducation, ResumeExperience};
pub use state::{ClaimKind, ClaimState, OverallStatus};
pub use time::Timestamp;
