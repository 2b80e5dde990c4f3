//! State enums for claims and whole verification records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which section of a resume a claim comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimKind {
    Education,
    WorkExperience,
}

impl ClaimKind {
    /// Human-readable label used in operation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Education => "Education",
            Self::WorkExperience => "Work experience",
        }
    }
}

impl fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Education => write!(f, "education"),
            Self::WorkExperience => write!(f, "work_experience"),
        }
    }
}

/// The verification state of a single claim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimState {
    /// Nothing authoritative found yet; awaiting a match or a manual decision.
    #[default]
    Pending,
    /// A directory record was found; awaiting human confirmation.
    Submitted,
    /// An attestation for this fingerprint already exists on the ledger.
    BlockchainVerified,
    /// Approved by an adjudicator. Terminal.
    Verified,
    /// Rejected by an adjudicator. Terminal.
    Rejected,
}

impl ClaimState {
    /// Whether no further transition may happen from this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Verified | Self::Rejected)
    }

    /// Whether this claim counts toward the verified share of a resume.
    ///
    /// `BlockchainVerified` counts regardless of the `verified` flag the
    /// ledger reported for the entry.
    pub fn counts_as_verified(&self) -> bool {
        matches!(self, Self::Verified | Self::BlockchainVerified)
    }
}

impl fmt::Display for ClaimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Submitted => "SUBMITTED",
            Self::BlockchainVerified => "BLOCKCHAIN_VERIFIED",
            Self::Verified => "VERIFIED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(s)
    }
}

/// Resume-level status, always derived from the claim states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Verified => "VERIFIED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(s)
    }
}
