use async_trait::async_trait;
use serde::Serialize;

use super::documents::{AppraisalDocument, PartDocument};
use super::domain::{FacultyId, PartId, RecordVersion, StatusSnapshot};

/// Backend that owns appraisal records and every status transition.
///
/// Faculty writes go through [`AppraisalStore::write_part`] after the caller
/// has confirmed the part is still a draft. Superior ratings and verification
/// figures go through [`AppraisalStore::write_review`], which the backend
/// authorises separately and which this crate never gates on status.
#[async_trait]
pub trait AppraisalStore: Send + Sync {
    async fn read_appraisal(&self, faculty_id: &FacultyId) -> Result<AppraisalDocument, StoreError>;

    /// Cheap status read used for the pre-write lock check and cache freshness.
    async fn read_status(&self, faculty_id: &FacultyId) -> Result<StatusSnapshot, StoreError>;

    async fn write_part(
        &self,
        faculty_id: &FacultyId,
        document: PartDocument,
    ) -> Result<RecordVersion, StoreError>;

    async fn write_review(
        &self,
        faculty_id: &FacultyId,
        document: PartDocument,
    ) -> Result<RecordVersion, StoreError>;

    async fn submit(&self, faculty_id: &FacultyId) -> Result<StatusSnapshot, StoreError>;
}

/// Failures crossing the persistence boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no appraisal on record for faculty {0}")]
    NotFound(FacultyId),
    #[error("appraisal store unavailable: {0}")]
    Unavailable(String),
    #[error("appraisal store did not answer {operation} within {after_ms} ms")]
    Timeout {
        operation: &'static str,
        after_ms: u64,
    },
    #[error("appraisal store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("appraisal store returned an unreadable document: {0}")]
    Decode(String),
}

impl StoreError {
    /// Whether retrying the same request later could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Unavailable(_) | Self::Timeout { .. } => true,
            Self::Rejected { status, .. } => *status >= 500,
            Self::NotFound(_) | Self::Decode(_) => false,
        }
    }
}

/// Outcome of a successful part write, returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReceipt {
    pub faculty_id: FacultyId,
    pub part: PartId,
    pub version: RecordVersion,
    pub total_marks: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_claimed: Option<f64>,
    /// Total under the reviewer's figures: the dean-evaluation total for a
    /// Part D review, the verified-basis total for a Part B verification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_total: Option<f64>,
}
