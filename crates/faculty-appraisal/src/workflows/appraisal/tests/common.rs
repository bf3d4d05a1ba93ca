use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::workflows::appraisal::documents::{AppraisalDocument, PartDocument};
use crate::workflows::appraisal::domain::{
    Designation, FacultyId, FacultyProfile, FormStatus, PartId, RecordVersion, StatusSnapshot,
};
use crate::workflows::appraisal::forms::{
    CourseMetric, MetricData, PartAInputs, PartBInputs, PartInputs, PortfolioEvaluation,
    PortfolioType, Semester,
};
use crate::workflows::appraisal::scoring::sections::PartBSection;
use crate::workflows::appraisal::scoring::ScoringEngine;
use crate::workflows::appraisal::store::{AppraisalStore, StoreError};
use crate::workflows::appraisal::{appraisal_router, AppraisalService};

pub(super) fn faculty() -> FacultyId {
    FacultyId("fac-001".to_string())
}

pub(super) fn assistant() -> FacultyProfile {
    FacultyProfile::academic(Designation::AssistantProfessor)
}

/// One course: result analysis 35.6, outcome 44, engagement 37.5, feedback 88.
pub(super) fn course() -> CourseMetric {
    CourseMetric {
        course_code: "CS301".to_string(),
        course_name: "Operating Systems".to_string(),
        semester: Semester::SemI,
        total_students: 25.0,
        above_60: 12.0,
        between_50_60: 5.0,
        between_40_50: 3.0,
        co_attainment: 80.0,
        timely_submission: true,
        enrolled: 40.0,
        present: 30.0,
        feedback_percent: 88.0,
    }
}

/// Complete Part A for an assistant professor; raw section sum 325.1.
pub(super) fn part_a() -> PartAInputs {
    PartAInputs {
        courses: vec![course()],
        weekly_load_sem1: 16.0,
        weekly_load_sem2: 16.0,
        phd_scholar: false,
        e_learning_modules: 2.0,
        projects_guided: 5.0,
        ptg_meetings: 3.0,
        ..PartAInputs::default()
    }
}

/// Journals 200, conferences 30, citations 19: raw 249.
pub(super) fn part_b() -> PartBInputs {
    let mut inputs = PartBInputs::default();
    inputs.claim(
        PartBSection::Journals,
        "sci",
        MetricData::claimed(2.0, "https://doi.org/10.1000/j1"),
    );
    inputs.claim(
        PartBSection::Conferences,
        "scopus",
        MetricData::claimed(1.0, "https://doi.org/10.1000/c1"),
    );
    inputs.claim(PartBSection::Citations, "wos", MetricData::claimed(10.0, ""));
    inputs.claim(PartBSection::Citations, "scopus", MetricData::claimed(6.0, ""));
    inputs.claim(PartBSection::Citations, "scholar", MetricData::claimed(9.0, ""));
    inputs
}

pub(super) fn portfolio(
    portfolio_type: PortfolioType,
    self_marks: f64,
    hod: Option<f64>,
    dean: Option<f64>,
) -> PortfolioEvaluation {
    PortfolioEvaluation {
        portfolio_type,
        self_awarded_marks: self_marks,
        hod_marks: hod,
        dean_marks: dean,
        ..PortfolioEvaluation::default()
    }
}

pub(super) fn draft_document(profile: FacultyProfile) -> AppraisalDocument {
    AppraisalDocument::draft(faculty(), "Computer Engineering", profile)
}

/// Encode `inputs` the way a save would, with freshly computed marks.
pub(super) fn encoded(inputs: PartInputs, profile: &FacultyProfile) -> PartDocument {
    let score = ScoringEngine::new(*profile).score(&inputs);
    PartDocument::encode(&inputs, &score, profile)
}

/// A draft that passes the mandatory-section check.
pub(super) fn complete_document() -> AppraisalDocument {
    let profile = assistant();
    let mut document = draft_document(profile);
    document.put_part(encoded(PartInputs::A(part_a()), &profile));
    document.put_part(encoded(
        PartInputs::D(portfolio(PortfolioType::Department, 40.0, None, None)),
        &profile,
    ));
    document
}

fn bump(version: &RecordVersion) -> RecordVersion {
    let next = version.0.parse::<u64>().unwrap_or(0) + 1;
    RecordVersion(next.to_string())
}

/// In-memory backend that counts every call crossing the store boundary.
#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) records: Arc<Mutex<HashMap<FacultyId, AppraisalDocument>>>,
    pub(super) part_writes: Arc<AtomicUsize>,
    pub(super) review_writes: Arc<AtomicUsize>,
    pub(super) submits: Arc<AtomicUsize>,
    pub(super) document_reads: Arc<AtomicUsize>,
    pub(super) last_write: Arc<Mutex<Option<PartDocument>>>,
}

impl MemoryStore {
    pub(super) fn with(document: AppraisalDocument) -> Self {
        let store = Self::default();
        store
            .records
            .lock()
            .expect("store mutex poisoned")
            .insert(document.faculty_id.clone(), document);
        store
    }

    pub(super) fn document(&self, faculty_id: &FacultyId) -> AppraisalDocument {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .get(faculty_id)
            .cloned()
            .expect("document seeded")
    }

    /// Change status the way a backend workflow step would, bumping the version.
    pub(super) fn set_status(&self, faculty_id: &FacultyId, status: FormStatus) {
        let mut records = self.records.lock().expect("store mutex poisoned");
        let document = records.get_mut(faculty_id).expect("document seeded");
        document.status = status;
        document.version = bump(&document.version);
    }

    pub(super) fn set_part_status(&self, faculty_id: &FacultyId, part: PartId, status: FormStatus) {
        let mut records = self.records.lock().expect("store mutex poisoned");
        let document = records.get_mut(faculty_id).expect("document seeded");
        document.part_status.insert(part, status);
        document.version = bump(&document.version);
    }

    pub(super) fn writes(&self) -> usize {
        self.part_writes.load(Ordering::SeqCst) + self.review_writes.load(Ordering::SeqCst)
    }

    pub(super) fn last_write(&self) -> Option<PartDocument> {
        self.last_write.lock().expect("store mutex poisoned").clone()
    }

    fn put(&self, faculty_id: &FacultyId, document: PartDocument) -> Result<RecordVersion, StoreError> {
        let mut records = self.records.lock().expect("store mutex poisoned");
        let stored = records
            .get_mut(faculty_id)
            .ok_or_else(|| StoreError::NotFound(faculty_id.clone()))?;
        *self.last_write.lock().expect("store mutex poisoned") = Some(document.clone());
        stored.put_part(document);
        stored.version = bump(&stored.version);
        stored.updated_at = Some(Utc::now());
        Ok(stored.version.clone())
    }
}

#[async_trait]
impl AppraisalStore for MemoryStore {
    async fn read_appraisal(&self, faculty_id: &FacultyId) -> Result<AppraisalDocument, StoreError> {
        self.document_reads.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .expect("store mutex poisoned")
            .get(faculty_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(faculty_id.clone()))
    }

    async fn read_status(&self, faculty_id: &FacultyId) -> Result<StatusSnapshot, StoreError> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .get(faculty_id)
            .map(AppraisalDocument::snapshot)
            .ok_or_else(|| StoreError::NotFound(faculty_id.clone()))
    }

    async fn write_part(
        &self,
        faculty_id: &FacultyId,
        document: PartDocument,
    ) -> Result<RecordVersion, StoreError> {
        self.part_writes.fetch_add(1, Ordering::SeqCst);
        self.put(faculty_id, document)
    }

    async fn write_review(
        &self,
        faculty_id: &FacultyId,
        document: PartDocument,
    ) -> Result<RecordVersion, StoreError> {
        self.review_writes.fetch_add(1, Ordering::SeqCst);
        self.put(faculty_id, document)
    }

    async fn submit(&self, faculty_id: &FacultyId) -> Result<StatusSnapshot, StoreError> {
        self.submits.fetch_add(1, Ordering::SeqCst);
        self.set_status(faculty_id, FormStatus::Submitted);
        self.read_status(faculty_id).await
    }
}

pub(super) struct UnavailableStore;

#[async_trait]
impl AppraisalStore for UnavailableStore {
    async fn read_appraisal(&self, _faculty_id: &FacultyId) -> Result<AppraisalDocument, StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }

    async fn read_status(&self, _faculty_id: &FacultyId) -> Result<StatusSnapshot, StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }

    async fn write_part(
        &self,
        _faculty_id: &FacultyId,
        _document: PartDocument,
    ) -> Result<RecordVersion, StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }

    async fn write_review(
        &self,
        _faculty_id: &FacultyId,
        _document: PartDocument,
    ) -> Result<RecordVersion, StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }

    async fn submit(&self, _faculty_id: &FacultyId) -> Result<StatusSnapshot, StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }
}

/// Answers status reads but never finishes a write.
pub(super) struct StalledStore {
    pub(super) inner: MemoryStore,
}

#[async_trait]
impl AppraisalStore for StalledStore {
    async fn read_appraisal(&self, faculty_id: &FacultyId) -> Result<AppraisalDocument, StoreError> {
        self.inner.read_appraisal(faculty_id).await
    }

    async fn read_status(&self, faculty_id: &FacultyId) -> Result<StatusSnapshot, StoreError> {
        self.inner.read_status(faculty_id).await
    }

    async fn write_part(
        &self,
        _faculty_id: &FacultyId,
        _document: PartDocument,
    ) -> Result<RecordVersion, StoreError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Err(StoreError::Unavailable("unreachable".to_string()))
    }

    async fn write_review(
        &self,
        faculty_id: &FacultyId,
        document: PartDocument,
    ) -> Result<RecordVersion, StoreError> {
        self.write_part(faculty_id, document).await
    }

    async fn submit(&self, faculty_id: &FacultyId) -> Result<StatusSnapshot, StoreError> {
        self.inner.submit(faculty_id).await
    }
}

pub(super) fn build_service(document: AppraisalDocument) -> (AppraisalService<MemoryStore>, MemoryStore) {
    let store = MemoryStore::with(document);
    let service = AppraisalService::new(Arc::new(store.clone()));
    (service, store)
}

pub(super) fn router_with_service(service: AppraisalService<MemoryStore>) -> axum::Router {
    appraisal_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
