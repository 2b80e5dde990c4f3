//! The JSON state file the CLI operates on.
//!
//! One file holds everything the engine's collaborators would otherwise
//! fetch from their backends: parsed resumes, verification records, the
//! directory collections and the ledger's attestations. It is loaded into
//! the nullables before an operation and written back afterwards.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use vouch_directory::{CascadeDirectory, EmploymentRecord, UniversityRecord};
use vouch_ledger::LedgerStatus;
use vouch_nullables::{NullDirectorySource, NullLedger, NullResumeSource, NullVerificationStore};
use vouch_types::{Fingerprint, ResumeDocument, VerificationRecord};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateFile {
    #[serde(default)]
    pub resumes: Vec<ResumeDocument>,
    #[serde(default)]
    pub records: Vec<VerificationRecord>,
    #[serde(default)]
    pub universities: Vec<UniversityRecord>,
    #[serde(default)]
    pub employment: Vec<EmploymentRecord>,
    #[serde(default)]
    pub ledger: Vec<LedgerEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub fingerprint: Fingerprint,
    #[serde(flatten)]
    pub status: LedgerStatus,
}

/// The in-memory collaborators a [`StateFile`] was loaded into.
pub struct Backends {
    pub ledger: Arc<NullLedger>,
    pub directory: Arc<CascadeDirectory<NullDirectorySource>>,
    pub store: Arc<NullVerificationStore>,
    pub resumes: Arc<NullResumeSource>,
    resume_docs: Vec<ResumeDocument>,
}

impl StateFile {
    /// Read a state file. A missing file is an empty state.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading state file {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing state file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json + "\n")
            .with_context(|| format!("writing state file {}", path.display()))
    }

    pub fn into_backends(self) -> Backends {
        let ledger = NullLedger::new();
        for entry in self.ledger {
            ledger.insert(entry.fingerprint, entry.status);
        }
        let store = NullVerificationStore::new();
        for record in self.records {
            store.insert(record);
        }
        Backends {
            ledger: Arc::new(ledger),
            directory: Arc::new(CascadeDirectory::new(NullDirectorySource::with_records(
                self.universities,
                self.employment,
            ))),
            store: Arc::new(store),
            resumes: Arc::new(NullResumeSource::with_resumes(self.resumes.clone())),
            resume_docs: self.resumes,
        }
    }
}

impl Backends {
    /// Snapshot the collaborators back into a state file.
    pub fn capture(&self) -> StateFile {
        StateFile {
            resumes: self.resume_docs.clone(),
            records: self.store.records(),
            universities: self.directory.source().universities(),
            employment: self.directory.source().employment(),
            ledger: self
                .ledger
                .entries()
                .into_iter()
                .map(|(fingerprint, status)| LedgerEntry {
                    fingerprint,
                    status,
                })
                .collect(),
        }
    }
}
