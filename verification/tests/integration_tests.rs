//! Integration tests exercising the full reconciliation pipeline:
//! resume → verification record → ledger / directory lookups → persisted state.
//!
//! Every collaborator is a nullable, so each test controls exactly what the
//! ledger and the directory know and can inject outages and latency.

use std::sync::Arc;
use std::time::Duration;

use vouch_crypto::claim_fingerprint;
use vouch_directory::{CascadeDirectory, EmploymentRecord, UniversityRecord};
use vouch_ledger::{AttestationKind, LedgerError};
use vouch_nullables::{NullDirectorySource, NullLedger, NullResumeSource, NullVerificationStore};
use vouch_types::{
    ClaimKind, ClaimRecord, ClaimState, EducationClaim, EducationDetails, EmploymentClaim,
    EmploymentDetails, OverallStatus, ResolvedEducation, ResumeDocument, ResumeEducation,
    ResumeExperience, ResumeId, Timestamp, VerificationRecord,
};
use vouch_verification::{EngineConfig, VerificationService};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const NAME: &str = "Ada Lovelace";

type Service = VerificationService<
    NullLedger,
    CascadeDirectory<NullDirectorySource>,
    NullVerificationStore,
    NullResumeSource,
>;

struct Harness {
    ledger: Arc<NullLedger>,
    directory: Arc<CascadeDirectory<NullDirectorySource>>,
    store: Arc<NullVerificationStore>,
    service: Service,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    fn with_config(config: EngineConfig) -> Self {
        let ledger = Arc::new(NullLedger::new());
        let directory = Arc::new(CascadeDirectory::new(NullDirectorySource::new()));
        let store = Arc::new(NullVerificationStore::new());
        let resumes = Arc::new(NullResumeSource::with_resumes([resume()]));
        let service = VerificationService::new(
            config,
            Arc::clone(&ledger),
            Arc::clone(&directory),
            Arc::clone(&store),
            resumes,
        );
        Self {
            ledger,
            directory,
            store,
            service,
        }
    }

    fn source(&self) -> &NullDirectorySource {
        self.directory.source()
    }

    fn stored(&self) -> VerificationRecord {
        self.store.record(&rid()).expect("record stored")
    }
}

fn rid() -> ResumeId {
    ResumeId::new("resume-1").unwrap()
}

fn resume() -> ResumeDocument {
    ResumeDocument {
        resume_id: rid(),
        job_id: "job-1".into(),
        username: "ada".into(),
        name: NAME.into(),
        email: "ada@example.com".into(),
        phone: "+44 20 0000 0000".into(),
        education: vec![ResumeEducation {
            degree: "BSc CS".into(),
            institution: "X University".into(),
            details: "First class honours, GPA: 3.80/4.0".into(),
        }],
        work_experience: vec![ResumeExperience {
            position: "Software Engineer".into(),
            company: "Acme Corp".into(),
        }],
    }
}

fn education_claim(state: ClaimState) -> EducationClaim {
    let mut claim = EducationClaim::pending(EducationDetails {
        degree: "BSc CS".into(),
        institution: "X University".into(),
        gpa: Some(3.8),
    });
    claim.state = state;
    claim
}

fn employment_claim(state: ClaimState) -> EmploymentClaim {
    let mut claim = EmploymentClaim::pending(EmploymentDetails {
        position: "Software Engineer".into(),
        company: "Acme Corp".into(),
    });
    claim.state = state;
    claim
}

/// Store a record directly, bypassing `initialize`.
fn seed(h: &Harness, education: EducationClaim, work: EmploymentClaim) -> VerificationRecord {
    let record = VerificationRecord {
        id: None,
        resume_id: rid(),
        job_id: "job-1".into(),
        username: "ada".into(),
        name: NAME.into(),
        email: String::new(),
        phone: String::new(),
        education: vec![education],
        work_experience: vec![work],
        overall_status: OverallStatus::Pending,
        version: 0,
        created_at: Timestamp::EPOCH,
        updated_at: Timestamp::EPOCH,
    };
    h.store.insert(record);
    h.stored()
}

fn university(degree: &str) -> UniversityRecord {
    UniversityRecord {
        student_id: Some("S-001".into()),
        full_name: NAME.into(),
        university: "X University".into(),
        degree: degree.into(),
        gpa: Some(3.7),
        graduation_year: Some(2019),
    }
}

fn employee(position: &str) -> EmploymentRecord {
    EmploymentRecord {
        employee_id: Some("E-17".into()),
        full_name: NAME.into(),
        company: "Acme Corp".into(),
        position: position.into(),
        start_date: Some("2020-01-01".into()),
        end_date: None,
    }
}

fn education_fingerprint() -> vouch_types::Fingerprint {
    claim_fingerprint(NAME, &education_claim(ClaimState::Pending).into())
}

fn employment_fingerprint() -> vouch_types::Fingerprint {
    claim_fingerprint(NAME, &employment_claim(ClaimState::Pending).into())
}

// ---------------------------------------------------------------------------
// 1. initialize
// ---------------------------------------------------------------------------

#[tokio::test]
async fn initialize_creates_record_and_checks_every_claim() {
    let h = Harness::new();
    h.source().add_university(university("Bachelor of Science in CS"));
    h.source().add_employment(employee("Senior Software Engineer"));

    let response = h.service.initialize(&rid()).await;
    assert!(response.success, "{}", response.message);
    assert_eq!(
        response.message,
        "Verification record created and verification started: \
         Education 0: Education information found in database. Awaiting verification.; \
         Work Experience 0: Work experience information fetched. Awaiting verification."
    );

    let record = response.record.unwrap();
    assert_eq!(record, h.stored());
    assert_eq!(record.education[0].declared.gpa, Some(3.8));
    assert_eq!(record.education[0].state, ClaimState::Submitted);
    assert_eq!(record.work_experience[0].state, ClaimState::Submitted);
    assert_eq!(
        record.work_experience[0].resolved.position.as_deref(),
        Some("Senior Software Engineer")
    );
    // two submitted claims and nothing verified
    assert_eq!(record.overall_status, OverallStatus::Rejected);
    assert_eq!(record.version, 2);
}

#[tokio::test]
async fn initialize_twice_returns_existing_record() {
    let h = Harness::new();
    let first = h.service.initialize(&rid()).await;
    assert!(first.success);

    let second = h.service.initialize(&rid()).await;
    assert!(!second.success);
    assert_eq!(
        second.message,
        "Verification for resume ID resume-1 already exists"
    );
    assert_eq!(second.record, first.record);
    assert_eq!(h.store.records().len(), 1);
}

#[tokio::test]
async fn initialize_unknown_resume_is_not_found() {
    let h = Harness::new();
    let response = h
        .service
        .initialize(&ResumeId::new("missing").unwrap())
        .await;
    assert!(!response.success);
    assert_eq!(response.message, "Resume with ID missing not found");
    assert!(response.record.is_none());
    assert!(h.store.records().is_empty());
}

#[tokio::test]
async fn initialize_reports_per_claim_errors_and_keeps_going() {
    let h = Harness::new();
    h.ledger.set_unavailable(Some("rpc down"));

    let response = h.service.initialize(&rid()).await;
    assert!(response.success);
    assert!(response
        .message
        .contains("Education 0: Error - ledger unavailable"));
    assert!(response
        .message
        .contains("Work Experience 0: Error - ledger unavailable"));

    let record = response.record.unwrap();
    assert_eq!(record.education[0].state, ClaimState::Pending);
    assert_eq!(record.work_experience[0].state, ClaimState::Pending);
    assert_eq!(record.overall_status, OverallStatus::Pending);
    assert_eq!(record, h.stored());
}

// ---------------------------------------------------------------------------
// 2. check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ledger_miss_with_exact_directory_match_submits_claim() {
    let h = Harness::new();
    seed(
        &h,
        education_claim(ClaimState::Pending),
        employment_claim(ClaimState::Pending),
    );
    h.source().add_university(university("Bachelor of Science in CS"));

    let response = h.service.check_education(&rid(), 0).await;
    assert!(response.success);
    let record = response.record.unwrap();
    let claim = &record.education[0];
    assert_eq!(claim.state, ClaimState::Submitted);
    assert_eq!(
        claim.resolved,
        ResolvedEducation {
            degree: Some("Bachelor of Science in CS".into()),
            institution: Some("X University".into()),
            gpa: Some(3.7),
        }
    );
    assert_eq!(record.overall_status, OverallStatus::Pending);
    assert_eq!(h.ledger.write_count(), 0);
}

#[tokio::test]
async fn no_directory_match_stays_pending() {
    let h = Harness::new();
    seed(
        &h,
        education_claim(ClaimState::Pending),
        employment_claim(ClaimState::Pending),
    );
    h.source().add_employment(EmploymentRecord {
        company: "Globex".into(),
        ..employee("Software Engineer")
    });

    let response = h.service.check_work_experience(&rid(), 0).await;
    assert!(response.success);
    assert_eq!(
        response.message,
        "No matching employment records found. Awaiting manual verification."
    );
    let record = response.record.unwrap();
    assert_eq!(record.work_experience[0].state, ClaimState::Pending);
    assert!(record.work_experience[0].resolved.position.is_none());
}

#[tokio::test]
async fn verified_ledger_entry_resolves_from_declared() {
    let h = Harness::new();
    seed(
        &h,
        education_claim(ClaimState::Pending),
        employment_claim(ClaimState::Verified),
    );
    h.ledger
        .attest(education_fingerprint(), true, AttestationKind::Degree);

    let response = h.service.check_education(&rid(), 0).await;
    assert_eq!(
        response.message,
        "Education verification status retrieved from blockchain"
    );
    let record = response.record.unwrap();
    let claim = &record.education[0];
    assert_eq!(claim.state, ClaimState::BlockchainVerified);
    assert_eq!(claim.resolved.degree.as_deref(), Some("BSc CS"));
    assert_eq!(claim.resolved.gpa, Some(3.8));
    assert_eq!(record.overall_status, OverallStatus::Verified);
    assert_eq!(h.source().query_count(), 0);
}

#[tokio::test]
async fn ledger_lookup_ignores_which_resume_asserted_the_claim() {
    let h = Harness::new();
    let mut record = seed(
        &h,
        education_claim(ClaimState::Pending),
        employment_claim(ClaimState::Pending),
    );
    h.ledger
        .attest(employment_fingerprint(), true, AttestationKind::Employment);

    // a second resume by the same person asserting the same job
    record.id = None;
    record.resume_id = ResumeId::new("resume-2").unwrap();
    h.store.insert(record);

    let response = h
        .service
        .check_work_experience(&ResumeId::new("resume-2").unwrap(), 0)
        .await;
    assert_eq!(
        response.record.unwrap().work_experience[0].state,
        ClaimState::BlockchainVerified
    );
}

/// Unverified ledger entries still promote the claim and still count as
/// verified toward the overall status.
#[tokio::test]
async fn unverified_ledger_entry_keeps_blockchain_verified() {
    let h = Harness::new();
    seed(
        &h,
        education_claim(ClaimState::BlockchainVerified),
        employment_claim(ClaimState::Verified),
    );
    h.ledger
        .attest(education_fingerprint(), false, AttestationKind::Degree);

    let response = h.service.check_education(&rid(), 0).await;
    assert!(response.success);
    let record = response.record.unwrap();
    assert_eq!(record.education[0].state, ClaimState::BlockchainVerified);
    assert_eq!(record.education[0].resolved, ResolvedEducation::default());
    assert_eq!(record.overall_status, OverallStatus::Verified);
}

#[tokio::test]
async fn verified_and_blockchain_verified_make_resume_verified() {
    let h = Harness::new();
    seed(
        &h,
        education_claim(ClaimState::Verified),
        employment_claim(ClaimState::BlockchainVerified),
    );
    h.ledger
        .attest(employment_fingerprint(), true, AttestationKind::Employment);

    let response = h.service.check_work_experience(&rid(), 0).await;
    assert_eq!(
        response.record.unwrap().overall_status,
        OverallStatus::Verified
    );
}

// ---------------------------------------------------------------------------
// 3. adjudicate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rejected_and_verified_is_rejected_overall() {
    let h = Harness::new();
    seed(
        &h,
        education_claim(ClaimState::Rejected),
        employment_claim(ClaimState::Submitted),
    );

    let response = h.service.verify_work_experience(&rid(), 0, true).await;
    assert!(response.success, "{}", response.message);
    let record = response.record.unwrap();
    assert_eq!(record.work_experience[0].state, ClaimState::Verified);
    assert_eq!(record.overall_status, OverallStatus::Rejected);
}

#[tokio::test]
async fn approval_writes_attestation_then_verifies() {
    let h = Harness::new();
    seed(
        &h,
        education_claim(ClaimState::Submitted),
        employment_claim(ClaimState::Pending),
    );

    let response = h.service.verify_education(&rid(), 0, true).await;
    assert_eq!(
        response.message,
        "Education verification completed and stored on blockchain"
    );
    let claim = &response.record.unwrap().education[0];
    assert_eq!(claim.state, ClaimState::Verified);
    assert_eq!(claim.resolved.institution.as_deref(), Some("X University"));

    let writes = h.ledger.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].fingerprint, education_fingerprint());
    assert!(writes[0].verified);
    assert_eq!(writes[0].request.kind, AttestationKind::Degree);
    assert_eq!(
        writes[0].request.details,
        r#"{"degree": "BSc CS", "gpa": 3.8, "name": "Ada Lovelace", "university": "X University"}"#
    );
}

#[tokio::test]
async fn approval_skips_write_when_ledger_already_verified() {
    let h = Harness::new();
    seed(
        &h,
        education_claim(ClaimState::Pending),
        employment_claim(ClaimState::Pending),
    );
    h.ledger
        .attest(employment_fingerprint(), true, AttestationKind::Employment);

    let response = h.service.verify_work_experience(&rid(), 0, true).await;
    assert_eq!(
        response.message,
        "Work experience already verified in blockchain"
    );
    let claim = &response.record.unwrap().work_experience[0];
    assert_eq!(claim.state, ClaimState::Verified);
    assert_eq!(claim.resolved.company.as_deref(), Some("Acme Corp"));
    assert_eq!(h.ledger.write_count(), 0);
}

#[tokio::test]
async fn approval_over_unverified_entry_appends_a_verified_one() {
    let h = Harness::new();
    seed(
        &h,
        education_claim(ClaimState::BlockchainVerified),
        employment_claim(ClaimState::Pending),
    );
    h.ledger
        .attest(education_fingerprint(), false, AttestationKind::Degree);

    let response = h.service.verify_education(&rid(), 0, true).await;
    assert!(response.success);
    assert_eq!(h.ledger.write_count(), 1);
    assert!(h.ledger.status_of(&education_fingerprint()).unwrap().verified);
}

#[tokio::test]
async fn rejection_never_touches_the_ledger() {
    let h = Harness::new();
    seed(
        &h,
        education_claim(ClaimState::Submitted),
        employment_claim(ClaimState::Pending),
    );
    h.ledger.set_unavailable(Some("rpc down"));

    let response = h.service.verify_education(&rid(), 0, false).await;
    assert!(response.success);
    assert_eq!(response.message, "Education verification rejected");
    let record = response.record.unwrap();
    assert_eq!(record.education[0].state, ClaimState::Rejected);
    assert_eq!(record.overall_status, OverallStatus::Pending);
    assert_eq!(h.ledger.write_count(), 0);
}

#[tokio::test]
async fn failed_ledger_write_leaves_claim_unchanged() {
    let h = Harness::new();
    let before = seed(
        &h,
        education_claim(ClaimState::Submitted),
        employment_claim(ClaimState::Pending),
    );
    h.ledger
        .fail_writes(Some(LedgerError::Rejected("out of gas".into())));

    let response = h.service.verify_education(&rid(), 0, true).await;
    assert!(!response.success);
    assert!(response.message.starts_with("ledger unavailable"));
    assert!(response.message.contains("out of gas"));
    assert_eq!(h.stored(), before);
    assert_eq!(h.store.update_count(), 0);
}

// ---------------------------------------------------------------------------
// 4. terminal states and errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn terminal_claims_are_left_alone() {
    let h = Harness::new();
    let mut verified = education_claim(ClaimState::Verified);
    verified.resolved.degree = Some("Bachelor of Science in CS".into());
    let before = seed(&h, verified, employment_claim(ClaimState::Rejected));
    h.ledger
        .attest(education_fingerprint(), false, AttestationKind::Degree);
    h.source().add_employment(employee("Software Engineer"));

    let responses = [
        h.service.check_education(&rid(), 0).await,
        h.service.verify_education(&rid(), 0, false).await,
        h.service.check_work_experience(&rid(), 0).await,
        h.service.verify_work_experience(&rid(), 0, true).await,
    ];
    for response in &responses {
        assert!(response.success);
        assert_eq!(response.record.as_ref(), Some(&before));
    }
    assert_eq!(
        responses[0].message,
        "Education already in final state: VERIFIED"
    );
    assert_eq!(
        responses[3].message,
        "Work experience already in final state: REJECTED"
    );
    assert_eq!(h.stored(), before);
    assert_eq!(h.store.update_count(), 0);
    assert_eq!(h.ledger.write_count(), 0);
}

#[tokio::test]
async fn index_out_of_range_mutates_nothing() {
    let h = Harness::new();
    let before = seed(
        &h,
        education_claim(ClaimState::Pending),
        employment_claim(ClaimState::Pending),
    );

    let response = h.service.check_education(&rid(), 5).await;
    assert!(!response.success);
    assert_eq!(response.message, "Education index 5 is out of range");

    let response = h.service.verify_work_experience(&rid(), 1, true).await;
    assert!(!response.success);
    assert_eq!(response.message, "Experience index 1 is out of range");

    assert_eq!(h.stored(), before);
    assert_eq!(h.ledger.write_count(), 0);
}

#[tokio::test]
async fn missing_record_is_not_found() {
    let h = Harness::new();
    let response = h.service.check_work_experience(&rid(), 0).await;
    assert!(!response.success);
    assert_eq!(
        response.message,
        "Verification record for resume ID resume-1 not found"
    );
}

#[tokio::test(start_paused = true)]
async fn slow_directory_times_out_without_mutation() {
    let h = Harness::with_config(EngineConfig {
        directory_timeout_ms: 50,
        ..EngineConfig::default()
    });
    let before = seed(
        &h,
        education_claim(ClaimState::Pending),
        employment_claim(ClaimState::Pending),
    );
    h.source().add_university(university("BSc CS"));
    h.source().set_delay(Duration::from_secs(30));

    let response = h.service.check_education(&rid(), 0).await;
    assert!(!response.success);
    assert_eq!(
        response.message,
        "directory query failed: timed out after 50ms"
    );
    assert_eq!(h.stored(), before);
}

#[tokio::test(start_paused = true)]
async fn slow_ledger_write_times_out_without_mutation() {
    let h = Harness::with_config(EngineConfig {
        ledger_timeout_ms: 100,
        ..EngineConfig::default()
    });
    let before = seed(
        &h,
        education_claim(ClaimState::Submitted),
        employment_claim(ClaimState::Pending),
    );
    h.ledger.set_delay(Duration::from_secs(5));

    let response = h.service.verify_education(&rid(), 0, true).await;
    assert!(!response.success);
    assert!(response.message.contains("timed out after 100ms"));
    assert_eq!(h.stored(), before);
}

#[tokio::test]
async fn store_outage_is_a_persistence_error() {
    let h = Harness::new();
    seed(
        &h,
        education_claim(ClaimState::Pending),
        employment_claim(ClaimState::Pending),
    );
    h.store.set_unavailable(Some("disk full"));

    let response = h.service.verify_education(&rid(), 0, false).await;
    assert!(!response.success);
    assert!(response.message.starts_with("persistence error"));
}

// ---------------------------------------------------------------------------
// 5. aggregate edge cases and concurrency
// ---------------------------------------------------------------------------

/// A claim still in `SUBMITTED` does not keep the resume `PENDING`.
#[tokio::test]
async fn submitted_claim_does_not_hold_back_final_status() {
    let h = Harness::new();
    seed(
        &h,
        education_claim(ClaimState::Submitted),
        employment_claim(ClaimState::Pending),
    );

    let response = h.service.verify_work_experience(&rid(), 0, true).await;
    let record = response.record.unwrap();
    assert_eq!(record.education[0].state, ClaimState::Submitted);
    assert_eq!(record.overall_status, OverallStatus::Rejected);
}

#[tokio::test]
async fn resume_without_claims_initializes_rejected() {
    let h = Harness::new();
    let empty = ResumeDocument {
        resume_id: ResumeId::new("empty").unwrap(),
        education: Vec::new(),
        work_experience: Vec::new(),
        ..resume()
    };
    let service = VerificationService::new(
        EngineConfig::default(),
        Arc::clone(&h.ledger),
        Arc::clone(&h.directory),
        Arc::clone(&h.store),
        Arc::new(NullResumeSource::with_resumes([empty])),
    );

    let response = service.initialize(&ResumeId::new("empty").unwrap()).await;
    assert!(response.success);
    assert_eq!(
        response.record.unwrap().overall_status,
        OverallStatus::Rejected
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_decisions_on_one_resume_are_not_lost() {
    let h = Harness::new();
    seed(
        &h,
        education_claim(ClaimState::Submitted),
        employment_claim(ClaimState::Submitted),
    );
    h.store.set_delay(Duration::from_millis(5));

    let id = rid();
    let (a, b) = tokio::join!(
        h.service.verify_education(&id, 0, true),
        h.service.verify_work_experience(&id, 0, false),
    );
    assert!(a.success && b.success);

    let record = h.stored();
    assert_eq!(record.education[0].state, ClaimState::Verified);
    assert_eq!(record.work_experience[0].state, ClaimState::Rejected);
    assert_eq!(record.overall_status, OverallStatus::Rejected);
    assert_eq!(record.version, 2);
}

#[tokio::test]
async fn claims_are_addressed_by_kind_and_index() {
    let h = Harness::new();
    let record = seed(
        &h,
        education_claim(ClaimState::Pending),
        employment_claim(ClaimState::Pending),
    );
    assert_eq!(
        record.claim(ClaimKind::WorkExperience, 0),
        Some(ClaimRecord::from(employment_claim(ClaimState::Pending)))
    );

    h.service.verify_work_experience(&rid(), 0, false).await;
    let record = h.stored();
    assert_eq!(record.education[0].state, ClaimState::Pending);
    assert_eq!(record.work_experience[0].state, ClaimState::Rejected);
}
