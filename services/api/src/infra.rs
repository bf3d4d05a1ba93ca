use async_trait::async_trait;
use faculty_appraisal::workflows::appraisal::{
    AppraisalDocument, AppraisalStore, FacultyId, FormStatus, PartDocument, RecordVersion,
    StatusSnapshot, StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Development backend used when no persistence URL is configured. Behaves
/// like the real backend: faculty writes to a locked part are refused and
/// every accepted write bumps the record version.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAppraisalStore {
    records: Arc<Mutex<HashMap<FacultyId, AppraisalDocument>>>,
}

impl InMemoryAppraisalStore {
    pub(crate) fn with_documents(documents: impl IntoIterator<Item = AppraisalDocument>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.records();
            for document in documents {
                guard.insert(document.faculty_id.clone(), document);
            }
        }
        store
    }

    pub(crate) fn len(&self) -> usize {
        self.records().len()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<FacultyId, AppraisalDocument>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn put(
        &self,
        faculty_id: &FacultyId,
        document: PartDocument,
        review: bool,
    ) -> Result<RecordVersion, StoreError> {
        let mut guard = self.records();
        let stored = guard
            .get_mut(faculty_id)
            .ok_or_else(|| StoreError::NotFound(faculty_id.clone()))?;
        let status = stored.snapshot().for_part(document.part()).clone();
        if !review && !status.is_editable() {
            return Err(StoreError::Rejected {
                status: 409,
                message: format!("{} is {}", document.part().document_key(), status.label()),
            });
        }
        stored.put_part(document);
        stored.version = next_version(&stored.version);
        stored.updated_at = Some(chrono::Utc::now());
        Ok(stored.version.clone())
    }
}

fn next_version(current: &RecordVersion) -> RecordVersion {
    let next = current.0.parse::<u64>().map(|n| n + 1).unwrap_or(1);
    RecordVersion(next.to_string())
}

#[async_trait]
impl AppraisalStore for InMemoryAppraisalStore {
    async fn read_appraisal(&self, faculty_id: &FacultyId) -> Result<AppraisalDocument, StoreError> {
        self.records()
            .get(faculty_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(faculty_id.clone()))
    }

    async fn read_status(&self, faculty_id: &FacultyId) -> Result<StatusSnapshot, StoreError> {
        self.records()
            .get(faculty_id)
            .map(AppraisalDocument::snapshot)
            .ok_or_else(|| StoreError::NotFound(faculty_id.clone()))
    }

    async fn write_part(
        &self,
        faculty_id: &FacultyId,
        document: PartDocument,
    ) -> Result<RecordVersion, StoreError> {
        self.put(faculty_id, document, false)
    }

    async fn write_review(
        &self,
        faculty_id: &FacultyId,
        document: PartDocument,
    ) -> Result<RecordVersion, StoreError> {
        self.put(faculty_id, document, true)
    }

    async fn submit(&self, faculty_id: &FacultyId) -> Result<StatusSnapshot, StoreError> {
        let mut guard = self.records();
        let stored = guard
            .get_mut(faculty_id)
            .ok_or_else(|| StoreError::NotFound(faculty_id.clone()))?;
        stored.status = FormStatus::Submitted;
        stored.part_status.clear();
        stored.version = next_version(&stored.version);
        stored.updated_at = Some(chrono::Utc::now());
        Ok(stored.snapshot())
    }
}
