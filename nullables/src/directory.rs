//! Nullable directory source: fixed university and company collections.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use vouch_directory::{DirectoryError, DirectorySource, EmploymentRecord, UniversityRecord};

/// A test directory that hands out every record it was given.
pub struct NullDirectorySource {
    universities: Mutex<Vec<UniversityRecord>>,
    employment: Mutex<Vec<EmploymentRecord>>,
    outage: Mutex<Option<String>>,
    delay: Mutex<Duration>,
    queries: Mutex<usize>,
}

impl NullDirectorySource {
    pub fn new() -> Self {
        Self {
            universities: Mutex::new(Vec::new()),
            employment: Mutex::new(Vec::new()),
            outage: Mutex::new(None),
            delay: Mutex::new(Duration::ZERO),
            queries: Mutex::new(0),
        }
    }

    pub fn with_records(
        universities: Vec<UniversityRecord>,
        employment: Vec<EmploymentRecord>,
    ) -> Self {
        let source = Self::new();
        *source.universities.lock().unwrap() = universities;
        *source.employment.lock().unwrap() = employment;
        source
    }

    pub fn add_university(&self, record: UniversityRecord) {
        self.universities.lock().unwrap().push(record);
    }

    pub fn add_employment(&self, record: EmploymentRecord) {
        self.employment.lock().unwrap().push(record);
    }

    pub fn universities(&self) -> Vec<UniversityRecord> {
        self.universities.lock().unwrap().clone()
    }

    pub fn employment(&self) -> Vec<EmploymentRecord> {
        self.employment.lock().unwrap().clone()
    }

    /// Every query fails with [`DirectoryError::Backend`] until cleared.
    pub fn set_unavailable(&self, reason: Option<&str>) {
        *self.outage.lock().unwrap() = reason.map(str::to_string);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    /// Number of candidate queries answered or attempted.
    pub fn query_count(&self) -> usize {
        *self.queries.lock().unwrap()
    }

    async fn answer(&self) -> Result<(), DirectoryError> {
        *self.queries.lock().unwrap() += 1;
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match self.outage.lock().unwrap().clone() {
            Some(reason) => Err(DirectoryError::Backend(reason)),
            None => Ok(()),
        }
    }
}

impl Default for NullDirectorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectorySource for NullDirectorySource {
    async fn university_candidates(
        &self,
        _name: &str,
    ) -> Result<Vec<UniversityRecord>, DirectoryError> {
        self.answer().await?;
        Ok(self.universities.lock().unwrap().clone())
    }

    async fn employment_candidates(
        &self,
        _name: &str,
    ) -> Result<Vec<EmploymentRecord>, DirectoryError> {
        self.answer().await?;
        Ok(self.employment.lock().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_whole_collection_and_counts_queries() {
        let source = NullDirectorySource::new();
        source.add_employment(EmploymentRecord {
            employee_id: None,
            full_name: "Ada Lovelace".into(),
            company: "Acme Corp".into(),
            position: "Engineer".into(),
            start_date: None,
            end_date: None,
        });
        assert_eq!(source.employment_candidates("anyone").await.unwrap().len(), 1);
        assert!(source.university_candidates("anyone").await.unwrap().is_empty());
        assert_eq!(source.query_count(), 2);
    }

    #[tokio::test]
    async fn outage_is_a_backend_error() {
        let source = NullDirectorySource::new();
        source.set_unavailable(Some("connection refused"));
        assert_eq!(
            source.university_candidates("Ada").await.unwrap_err(),
            DirectoryError::Backend("connection refused".into())
        );
    }
}
