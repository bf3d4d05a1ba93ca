use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::documents::AppraisalDocument;
use super::domain::{FacultyId, RecordVersion};

/// Last document read per faculty member, trusted only while the backend
/// still reports the same [`RecordVersion`].
#[derive(Debug, Default)]
pub struct DraftCache {
    entries: Mutex<HashMap<FacultyId, AppraisalDocument>>,
}

impl DraftCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached document for `faculty_id` if it was stored at `current`.
    pub fn fresh(&self, faculty_id: &FacultyId, current: &RecordVersion) -> Option<AppraisalDocument> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(faculty_id)
            .filter(|document| &document.version == current)
            .cloned()
    }

    pub fn remember(&self, document: AppraisalDocument) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(document.faculty_id.clone(), document);
    }

    pub fn invalidate(&self, faculty_id: &FacultyId) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(faculty_id);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
