//! Attestation types exchanged with the ledger.

use serde::{Deserialize, Serialize};
use std::fmt;
use vouch_types::{ClaimKind, Timestamp};

/// What an attestation vouches for. The discriminants are the on-chain type codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttestationKind {
    Gpa = 0,
    Employment = 1,
    Degree = 2,
    Certificate = 3,
}

impl AttestationKind {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Gpa),
            1 => Some(Self::Employment),
            2 => Some(Self::Degree),
            3 => Some(Self::Certificate),
            _ => None,
        }
    }
}

impl From<ClaimKind> for AttestationKind {
    fn from(kind: ClaimKind) -> Self {
        match kind {
            ClaimKind::Education => Self::Degree,
            ClaimKind::WorkExperience => Self::Employment,
        }
    }
}

impl fmt::Display for AttestationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Gpa => "GPA Verification",
            Self::Employment => "Employment Verification",
            Self::Degree => "Degree Verification",
            Self::Certificate => "Certificate Verification",
        };
        f.write_str(s)
    }
}

/// Status of an existing ledger entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStatus {
    /// The attestation's verdict. An entry may exist with `verified = false`.
    pub verified: bool,
    pub kind: AttestationKind,
    pub recorded_at: Timestamp,
    /// Address of the oracle that wrote the entry.
    #[serde(default)]
    pub oracle: String,
    /// Free-form details stored with the entry (the attested subject as JSON).
    #[serde(default)]
    pub details: String,
}

/// Metadata accompanying a new attestation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationRequest {
    pub kind: AttestationKind,
    /// The fingerprinted subject, as canonical JSON.
    pub details: String,
    pub requested_at: Timestamp,
}

/// Handle of a committed ledger transaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
