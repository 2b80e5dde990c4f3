//! The matching cascade.
//!
//! Each tier is a pure function from a query and the candidate records to the
//! records it accepts. Tiers run in order and the first non-empty result wins:
//!
//! | tier | name | institution / company |
//! |---|---|---|
//! | [`MatchTier::Exact`] | equal | equal |
//! | [`MatchTier::Pattern`] | case-insensitive pattern | education: anchored, employment: substring |
//! | [`MatchTier::Contains`] | as `Pattern` | case-insensitive substring |
//!
//! Declared text is always escaped before it becomes part of a pattern.

use regex::{Regex, RegexBuilder};
use std::fmt;

use crate::{DirectoryError, EmploymentRecord, UniversityRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    Pattern,
    Contains,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Pattern => write!(f, "pattern"),
            Self::Contains => write!(f, "contains"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct EducationQuery<'a> {
    pub name: &'a str,
    pub institution: &'a str,
}

#[derive(Clone, Copy, Debug)]
pub struct EmploymentQuery<'a> {
    pub name: &'a str,
    pub company: &'a str,
}

/// A tier over university records.
pub type EducationTier =
    for<'q> fn(&EducationQuery<'q>, &[UniversityRecord]) -> Result<Vec<UniversityRecord>, DirectoryError>;

/// A tier over employment records.
pub type EmploymentTier =
    for<'q> fn(&EmploymentQuery<'q>, &[EmploymentRecord]) -> Result<Vec<EmploymentRecord>, DirectoryError>;

pub const EDUCATION_TIERS: [(MatchTier, EducationTier); 3] = [
    (MatchTier::Exact, education_exact),
    (MatchTier::Pattern, education_pattern),
    (MatchTier::Contains, education_contains),
];

pub const EMPLOYMENT_TIERS: [(MatchTier, EmploymentTier); 3] = [
    (MatchTier::Exact, employment_exact),
    (MatchTier::Pattern, employment_pattern),
    (MatchTier::Contains, employment_contains),
];

fn insensitive(pattern: &str) -> Result<Regex, DirectoryError> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

fn anchored(text: &str) -> Result<Regex, DirectoryError> {
    insensitive(&format!("^{}$", regex::escape(text)))
}

fn substring(text: &str) -> Result<Regex, DirectoryError> {
    insensitive(&regex::escape(text))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn education_exact(
    q: &EducationQuery<'_>,
    candidates: &[UniversityRecord],
) -> Result<Vec<UniversityRecord>, DirectoryError> {
    Ok(candidates
        .iter()
        .filter(|r| r.full_name == q.name && r.university == q.institution)
        .cloned()
        .collect())
}

pub fn education_pattern(
    q: &EducationQuery<'_>,
    candidates: &[UniversityRecord],
) -> Result<Vec<UniversityRecord>, DirectoryError> {
    let name = anchored(q.name)?;
    let institution = anchored(q.institution)?;
    Ok(candidates
        .iter()
        .filter(|r| name.is_match(&r.full_name) && institution.is_match(&r.university))
        .cloned()
        .collect())
}

pub fn education_contains(
    q: &EducationQuery<'_>,
    candidates: &[UniversityRecord],
) -> Result<Vec<UniversityRecord>, DirectoryError> {
    let name = anchored(q.name)?;
    Ok(candidates
        .iter()
        .filter(|r| name.is_match(&r.full_name) && contains_ignore_case(&r.university, q.institution))
        .cloned()
        .collect())
}

pub fn employment_exact(
    q: &EmploymentQuery<'_>,
    candidates: &[EmploymentRecord],
) -> Result<Vec<EmploymentRecord>, DirectoryError> {
    Ok(candidates
        .iter()
        .filter(|r| r.full_name == q.name && r.company == q.company)
        .cloned()
        .collect())
}

pub fn employment_pattern(
    q: &EmploymentQuery<'_>,
    candidates: &[EmploymentRecord],
) -> Result<Vec<EmploymentRecord>, DirectoryError> {
    let name = substring(q.name)?;
    let company = substring(q.company)?;
    Ok(candidates
        .iter()
        .filter(|r| name.is_match(&r.full_name) && company.is_match(&r.company))
        .cloned()
        .collect())
}

pub fn employment_contains(
    q: &EmploymentQuery<'_>,
    candidates: &[EmploymentRecord],
) -> Result<Vec<EmploymentRecord>, DirectoryError> {
    let name = substring(q.name)?;
    Ok(candidates
        .iter()
        .filter(|r| name.is_match(&r.full_name) && contains_ignore_case(&r.company, q.company))
        .cloned()
        .collect())
}

/// Run `tiers` in order and return the first non-empty result with its tier.
pub fn run_cascade<Q, R, F>(
    tiers: &[(MatchTier, F)],
    query: &Q,
    candidates: &[R],
) -> Result<Option<(MatchTier, Vec<R>)>, DirectoryError>
where
    F: Fn(&Q, &[R]) -> Result<Vec<R>, DirectoryError>,
{
    for (tier, matches) in tiers {
        let found = matches(query, candidates)?;
        if !found.is_empty() {
            return Ok(Some((*tier, found)));
        }
    }
    Ok(None)
}

/// Pick the record whose position contains, or is contained in, the declared
/// position (ignoring case). Falls back to the first record.
pub fn select_by_position<'a>(
    records: &'a [EmploymentRecord],
    position: &str,
) -> Option<&'a EmploymentRecord> {
    let declared = position.to_lowercase();
    records
        .iter()
        .find(|r| {
            let stored = r.position.to_lowercase();
            stored.contains(&declared) || declared.contains(&stored)
        })
        .or_else(|| records.first())
}
