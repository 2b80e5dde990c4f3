//! Record layouts of the university and company collections.

use serde::{Deserialize, Serialize};
use vouch_types::{ResolvedEducation, ResolvedEmployment};

/// One graduate in a university's records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UniversityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    pub full_name: String,
    pub university: String,
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<u16>,
}

impl UniversityRecord {
    /// The authoritative values this record resolves an education claim to.
    pub fn resolved(&self) -> ResolvedEducation {
        ResolvedEducation {
            degree: Some(self.degree.clone()),
            institution: Some(self.university.clone()),
            gpa: self.gpa,
        }
    }
}

/// One employee in a company's records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    pub full_name: String,
    pub company: String,
    #[serde(alias = "job_title")]
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl EmploymentRecord {
    /// The authoritative values this record resolves an employment claim to.
    pub fn resolved(&self) -> ResolvedEmployment {
        ResolvedEmployment {
            position: Some(self.position.clone()),
            company: Some(self.company.clone()),
        }
    }
}
