//! Authoritative institutional records and how claims are matched against them.
//!
//! A [`DirectorySource`] hands out candidate university and employment
//! records. The [`cascade`] module owns the matching: an ordered list of
//! tiers (exact, pattern, contains), each a pure function over the candidates,
//! stopping at the first tier that yields anything. [`CascadeDirectory`] puts
//! the two together behind [`InstitutionalDirectory`], the interface the
//! reconciliation engine consumes.

pub mod cascade;
pub mod directory;
pub mod error;
pub mod records;
pub mod source;

pub use cascade::{select_by_position, EducationQuery, EmploymentQuery, MatchTier};
pub use directory::{CascadeDirectory, InstitutionalDirectory};
pub use error::DirectoryError;
pub use records::{EmploymentRecord, UniversityRecord};
pub use source::DirectorySource;
