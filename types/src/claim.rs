//! Claims: what the applicant declared, what authoritative sources resolved,
//! and where the claim sits in the verification state machine.

use serde::{Deserialize, Serialize};

use crate::state::{ClaimKind, ClaimState};

/// Applicant-declared education fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EducationDetails {
    pub degree: String,
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
}

/// Education fields confirmed by the ledger or a university record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEducation {
    pub degree: Option<String>,
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
}

/// Applicant-declared employment fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentDetails {
    pub position: String,
    pub company: String,
}

/// Employment fields confirmed by the ledger or a company record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEmployment {
    pub position: Option<String>,
    pub company: Option<String>,
}

/// One claim: declared values, resolved values and the current state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Claim<D, R> {
    pub declared: D,
    pub resolved: R,
    #[serde(default)]
    pub state: ClaimState,
}

pub type EducationClaim = Claim<EducationDetails, ResolvedEducation>;
pub type EmploymentClaim = Claim<EmploymentDetails, ResolvedEmployment>;

impl EducationClaim {
    /// A fresh claim: nothing resolved, state `Pending`.
    pub fn pending(declared: EducationDetails) -> Self {
        Self {
            declared,
            resolved: ResolvedEducation::default(),
            state: ClaimState::Pending,
        }
    }
}

impl EmploymentClaim {
    /// A fresh claim: nothing resolved, state `Pending`.
    pub fn pending(declared: EmploymentDetails) -> Self {
        Self {
            declared,
            resolved: ResolvedEmployment::default(),
            state: ClaimState::Pending,
        }
    }
}

/// Authoritative values for one claim, as found by a directory lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedFields {
    Education(ResolvedEducation),
    WorkExperience(ResolvedEmployment),
}

/// A claim of either kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimRecord {
    Education(EducationClaim),
    WorkExperience(EmploymentClaim),
}

impl ClaimRecord {
    pub fn kind(&self) -> ClaimKind {
        match self {
            Self::Education(_) => ClaimKind::Education,
            Self::WorkExperience(_) => ClaimKind::WorkExperience,
        }
    }

    pub fn state(&self) -> ClaimState {
        match self {
            Self::Education(c) => c.state,
            Self::WorkExperience(c) => c.state,
        }
    }

    pub fn with_state(mut self, state: ClaimState) -> Self {
        match &mut self {
            Self::Education(c) => c.state = state,
            Self::WorkExperience(c) => c.state = state,
        }
        self
    }

    /// Whether no resolved field has been filled yet.
    pub fn is_unresolved(&self) -> bool {
        match self {
            Self::Education(c) => c.resolved == ResolvedEducation::default(),
            Self::WorkExperience(c) => c.resolved == ResolvedEmployment::default(),
        }
    }

    /// Overwrite the resolved fields with the declared values.
    ///
    /// Used when the ledger confirms the declared content verbatim. An
    /// undeclared GPA leaves any resolved GPA in place.
    pub fn resolve_from_declared(mut self) -> Self {
        match &mut self {
            Self::Education(c) => {
                c.resolved.degree = Some(c.declared.degree.clone());
                c.resolved.institution = Some(c.declared.institution.clone());
                if c.declared.gpa.is_some() {
                    c.resolved.gpa = c.declared.gpa;
                }
            }
            Self::WorkExperience(c) => {
                c.resolved = ResolvedEmployment {
                    position: Some(c.declared.position.clone()),
                    company: Some(c.declared.company.clone()),
                };
            }
        }
        self
    }

    /// Fill only the resolved fields that are still empty from the declared values.
    pub fn fill_unresolved_from_declared(mut self) -> Self {
        fn fill(slot: &mut Option<String>, value: &str) {
            if slot.as_deref().map_or(true, str::is_empty) {
                *slot = Some(value.to_string());
            }
        }
        match &mut self {
            Self::Education(c) => {
                fill(&mut c.resolved.degree, &c.declared.degree);
                fill(&mut c.resolved.institution, &c.declared.institution);
                if c.resolved.gpa.is_none() {
                    c.resolved.gpa = c.declared.gpa;
                }
            }
            Self::WorkExperience(c) => {
                fill(&mut c.resolved.position, &c.declared.position);
                fill(&mut c.resolved.company, &c.declared.company);
            }
        }
        self
    }

    /// Replace the resolved fields with authoritative values.
    ///
    /// Fields of the other claim kind are ignored.
    pub fn with_resolved(mut self, fields: ResolvedFields) -> Self {
        match (&mut self, fields) {
            (Self::Education(c), ResolvedFields::Education(r)) => c.resolved = r,
            (Self::WorkExperience(c), ResolvedFields::WorkExperience(r)) => c.resolved = r,
            _ => {}
        }
        self
    }
}

impl From<EducationClaim> for ClaimRecord {
    fn from(c: EducationClaim) -> Self {
        Self::Education(c)
    }
}

impl From<EmploymentClaim> for ClaimRecord {
    fn from(c: EmploymentClaim) -> Self {
        Self::WorkExperience(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn education() -> ClaimRecord {
        EducationClaim::pending(EducationDetails {
            degree: "BSc CS".into(),
            institution: "X University".into(),
            gpa: Some(3.6),
        })
        .into()
    }

    #[test]
    fn fresh_claim_is_pending_and_unresolved() {
        let claim = education();
        assert_eq!(claim.state(), ClaimState::Pending);
        assert!(claim.is_unresolved());
        assert_eq!(claim.kind(), ClaimKind::Education);
    }

    #[test]
    fn fill_keeps_existing_authoritative_values() {
        let claim = education().with_resolved(ResolvedFields::Education(ResolvedEducation {
            degree: Some("Bachelor of Science".into()),
            institution: None,
            gpa: None,
        }));
        let ClaimRecord::Education(c) = claim.fill_unresolved_from_declared() else {
            panic!("kind changed");
        };
        assert_eq!(c.resolved.degree.as_deref(), Some("Bachelor of Science"));
        assert_eq!(c.resolved.institution.as_deref(), Some("X University"));
        assert_eq!(c.resolved.gpa, Some(3.6));
    }

    #[test]
    fn mismatched_resolved_kind_is_ignored() {
        let claim = education().with_resolved(ResolvedFields::WorkExperience(
            ResolvedEmployment {
                position: Some("Engineer".into()),
                company: None,
            },
        ));
        assert!(claim.is_unresolved());
    }

    #[test]
    fn unresolved_fields_serialize_as_null() {
        let claim = EmploymentClaim::pending(EmploymentDetails {
            position: "Engineer".into(),
            company: "Acme".into(),
        });
        let json = serde_json::to_value(&claim).unwrap();
        assert!(json["resolved"]["position"].is_null());
        assert_eq!(json["state"], "PENDING");
    }
}
