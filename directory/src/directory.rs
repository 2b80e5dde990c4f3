//! The directory interface consumed by the reconciliation engine.

use async_trait::async_trait;

use crate::cascade::{run_cascade, EducationQuery, EmploymentQuery, EDUCATION_TIERS, EMPLOYMENT_TIERS};
use crate::{DirectoryError, DirectorySource, EmploymentRecord, UniversityRecord};

/// Fuzzy lookup of authoritative university and company records.
#[async_trait]
pub trait InstitutionalDirectory: Send + Sync {
    /// The university record best matching `name` at `institution`.
    async fn find_education(
        &self,
        name: &str,
        institution: &str,
    ) -> Result<Option<UniversityRecord>, DirectoryError>;

    /// Every employment record matching `name` at `company`, in source order.
    async fn find_employment(
        &self,
        name: &str,
        company: &str,
    ) -> Result<Vec<EmploymentRecord>, DirectoryError>;
}

/// [`InstitutionalDirectory`] running the tiered cascade over a [`DirectorySource`].
pub struct CascadeDirectory<S> {
    source: S,
}

impl<S: DirectorySource> CascadeDirectory<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[async_trait]
impl<S: DirectorySource> InstitutionalDirectory for CascadeDirectory<S> {
    async fn find_education(
        &self,
        name: &str,
        institution: &str,
    ) -> Result<Option<UniversityRecord>, DirectoryError> {
        // A blank field would turn the pattern tiers into match-anything.
        if is_blank(name) || is_blank(institution) {
            return Ok(None);
        }
        let candidates = self.source.university_candidates(name).await?;
        let query = EducationQuery { name, institution };
        match run_cascade(&EDUCATION_TIERS, &query, &candidates)? {
            Some((tier, found)) => {
                tracing::debug!(%tier, matches = found.len(), "university record matched");
                Ok(found.into_iter().next())
            }
            None => {
                tracing::debug!(candidates = candidates.len(), "no university record matched");
                Ok(None)
            }
        }
    }

    async fn find_employment(
        &self,
        name: &str,
        company: &str,
    ) -> Result<Vec<EmploymentRecord>, DirectoryError> {
        if is_blank(name) || is_blank(company) {
            return Ok(Vec::new());
        }
        let candidates = self.source.employment_candidates(name).await?;
        let query = EmploymentQuery { name, company };
        match run_cascade(&EMPLOYMENT_TIERS, &query, &candidates)? {
            Some((tier, found)) => {
                tracing::debug!(%tier, matches = found.len(), "employment records matched");
                Ok(found)
            }
            None => {
                tracing::debug!(candidates = candidates.len(), "no employment record matched");
                Ok(Vec::new())
            }
        }
    }
}
