//! Nullable stores: thread-safe in-memory records and resumes for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use vouch_store::{RecordPatch, ResumeSource, StoreError, VerificationStore};
use vouch_types::{RecordId, ResumeDocument, ResumeId, VerificationRecord};

/// An in-memory verification store with version checking.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullVerificationStore {
    records: Mutex<HashMap<ResumeId, VerificationRecord>>,
    next_id: Mutex<u64>,
    outage: Mutex<Option<String>>,
    delay: Mutex<Duration>,
    updates: Mutex<usize>,
}

impl NullVerificationStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            next_id: Mutex::new(1),
            outage: Mutex::new(None),
            delay: Mutex::new(Duration::ZERO),
            updates: Mutex::new(0),
        }
    }

    /// Put `record` in place as-is, assigning an id if it has none.
    pub fn insert(&self, mut record: VerificationRecord) -> RecordId {
        let mut records = self.records.lock().unwrap();
        let id = match &record.id {
            Some(id) => id.clone(),
            None => self.allocate_id(&records),
        };
        record.id = Some(id.clone());
        records.insert(record.resume_id.clone(), record);
        id
    }

    pub fn record(&self, resume_id: &ResumeId) -> Option<VerificationRecord> {
        self.records.lock().unwrap().get(resume_id).cloned()
    }

    /// Every stored record, ordered by resume id.
    pub fn records(&self) -> Vec<VerificationRecord> {
        let mut records: Vec<_> = self.records.lock().unwrap().values().cloned().collect();
        records.sort_by(|a, b| a.resume_id.cmp(&b.resume_id));
        records
    }

    /// Number of successful `update` calls.
    pub fn update_count(&self) -> usize {
        *self.updates.lock().unwrap()
    }

    /// Every call fails with [`StoreError::Backend`] until cleared.
    pub fn set_unavailable(&self, reason: Option<&str>) {
        *self.outage.lock().unwrap() = reason.map(str::to_string);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    /// Next sequential id not already held by a seeded record.
    fn allocate_id(&self, records: &HashMap<ResumeId, VerificationRecord>) -> RecordId {
        let mut next = self.next_id.lock().unwrap();
        loop {
            let id = RecordId::new(format!("rec-{:06}", *next));
            *next += 1;
            if !records.values().any(|r| r.id.as_ref() == Some(&id)) {
                return id;
            }
        }
    }

    async fn answer(&self) -> Result<(), StoreError> {
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match self.outage.lock().unwrap().clone() {
            Some(reason) => Err(StoreError::Backend(reason)),
            None => Ok(()),
        }
    }
}

impl Default for NullVerificationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationStore for NullVerificationStore {
    async fn get(&self, resume_id: &ResumeId) -> Result<Option<VerificationRecord>, StoreError> {
        self.answer().await?;
        Ok(self.record(resume_id))
    }

    async fn create(&self, record: &VerificationRecord) -> Result<RecordId, StoreError> {
        self.answer().await?;
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&record.resume_id) {
            return Err(StoreError::Duplicate(record.resume_id.to_string()));
        }
        let id = self.allocate_id(&records);
        let mut stored = record.clone();
        stored.id = Some(id.clone());
        records.insert(stored.resume_id.clone(), stored);
        Ok(id)
    }

    async fn update(
        &self,
        id: &RecordId,
        expected_version: u64,
        patch: &RecordPatch,
    ) -> Result<u64, StoreError> {
        self.answer().await?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .values_mut()
            .find(|r| r.id.as_ref() == Some(id))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if record.version != expected_version {
            return Err(StoreError::VersionConflict {
                id: id.to_string(),
                expected: expected_version,
                found: record.version,
            });
        }
        patch.apply_to(record)?;
        record.version += 1;
        *self.updates.lock().unwrap() += 1;
        Ok(record.version)
    }
}

/// An in-memory resume collection.
pub struct NullResumeSource {
    resumes: Mutex<HashMap<ResumeId, ResumeDocument>>,
}

impl NullResumeSource {
    pub fn new() -> Self {
        Self {
            resumes: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_resumes(resumes: impl IntoIterator<Item = ResumeDocument>) -> Self {
        let source = Self::new();
        for resume in resumes {
            source.insert(resume);
        }
        source
    }

    pub fn insert(&self, resume: ResumeDocument) {
        self.resumes
            .lock()
            .unwrap()
            .insert(resume.resume_id.clone(), resume);
    }
}

impl Default for NullResumeSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResumeSource for NullResumeSource {
    async fn get_resume(&self, resume_id: &ResumeId) -> Result<Option<ResumeDocument>, StoreError> {
        Ok(self.resumes.lock().unwrap().get(resume_id).cloned())
    }
}
