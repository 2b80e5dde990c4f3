//! Backend trait for the institutional record collections.

use async_trait::async_trait;

use crate::{DirectoryError, EmploymentRecord, UniversityRecord};

/// Read access to university and company records.
///
/// Backends may narrow the candidates by applicant name however they like,
/// or return the whole collection; the cascade does the actual matching and
/// must see every record that could match case-insensitively.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    async fn university_candidates(&self, name: &str)
        -> Result<Vec<UniversityRecord>, DirectoryError>;

    async fn employment_candidates(&self, name: &str)
        -> Result<Vec<EmploymentRecord>, DirectoryError>;
}
