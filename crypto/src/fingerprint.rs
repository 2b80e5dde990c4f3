//! Claim fingerprints.
//!
//! A fingerprint is the SHA-256 of the key-sorted JSON of a claim's comparable
//! fields plus the applicant name. Field names are the ones the ledger has
//! always been keyed by:
//!
//! - education: `name`, `university`, `degree`, and `gpa` when declared
//! - employment: `name`, `company`, `job_title`

use serde_json::{Number, Value};
use std::collections::BTreeMap;
use vouch_types::{ClaimRecord, Fingerprint};

use crate::canonical::canonical_json;
use crate::hash::sha256;

/// The exact field set that gets hashed, keys in sorted order.
pub type FingerprintSubject = BTreeMap<&'static str, Value>;

/// Build the hashed field set for a claim asserted by `name`.
///
/// A non-finite GPA cannot be represented in JSON and is left out.
pub fn fingerprint_subject(name: &str, claim: &ClaimRecord) -> FingerprintSubject {
    let mut subject = FingerprintSubject::new();
    subject.insert("name", Value::from(name));
    match claim {
        ClaimRecord::Education(c) => {
            subject.insert("university", Value::from(c.declared.institution.as_str()));
            subject.insert("degree", Value::from(c.declared.degree.as_str()));
            if let Some(gpa) = c.declared.gpa.and_then(Number::from_f64) {
                subject.insert("gpa", Value::Number(gpa));
            }
        }
        ClaimRecord::WorkExperience(c) => {
            subject.insert("company", Value::from(c.declared.company.as_str()));
            subject.insert("job_title", Value::from(c.declared.position.as_str()));
        }
    }
    subject
}

/// Fingerprint of a claim asserted by `name`.
pub fn claim_fingerprint(name: &str, claim: &ClaimRecord) -> Fingerprint {
    let subject = fingerprint_subject(name, claim);
    let bytes = canonical_json(&subject).expect("string and number maps always serialize");
    Fingerprint::new(sha256(&bytes))
}
