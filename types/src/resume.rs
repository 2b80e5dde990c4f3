//! Parsed resume data as delivered by the ingestion side.

use serde::{Deserialize, Serialize};

use crate::id::ResumeId;

/// A parsed resume: identity plus the raw education and employment entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub resume_id: ResumeId,
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub education: Vec<ResumeEducation>,
    #[serde(default)]
    pub work_experience: Vec<ResumeExperience>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeEducation {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    /// Free text that may mention a GPA ("CGPA: 3.72/4.0").
    #[serde(default)]
    pub details: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeExperience {
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub company: String,
}
