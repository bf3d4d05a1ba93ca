//! Faculty appraisal scoring, form locking, and persistence plumbing.
//!
//! Raw inputs for the five parts are normalised and aggregated by
//! [`scoring`], locked by [`lifecycle`] once the backend moves a record out of
//! `DRAFT`, and read and written through an [`AppraisalStore`].

pub(crate) mod cache;
pub mod documents;
pub mod domain;
pub mod forms;
pub mod http;
pub mod lifecycle;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use cache::DraftCache;
pub use documents::{AppraisalDocument, PartDocument, StoredFlag, StoredNumber};
pub use domain::{
    AdministrativeRole, Designation, FacultyId, FacultyProfile, FormStatus, PartId,
    RecordVersion, StatusSnapshot,
};
pub use forms::{
    AdministrativePortfolio, AppraisalInputs, CourseMetric, DeanEvaluation,
    ExtraordinaryContribution, ManualMarks, MetricData, PartAInputs, PartBInputs, PartCInputs,
    PartInputs, PhdGuidance, PhdStage, PortfolioEvaluation, PortfolioType, SectionClaims,
    Semester, TrainingCounts,
};
pub use http::{HttpAppraisalStore, Session};
pub use lifecycle::{FormGuard, FormLockedError, LockState, ValidationError};
pub use router::appraisal_router;
pub use scoring::sections::{
    PartASection, PartBSection, PartCSection, PartDSection, PartESection, Section,
};
pub use scoring::{
    AppraisalScore, ClaimBasis, PartScore, ScoreOrigin, ScoringEngine, SectionMark,
};
pub use service::{
    AppraisalError, AppraisalService, AppraisalView, PartView, PortfolioReview,
    ResearchVerification, DEFAULT_STORE_TIMEOUT,
};
pub use store::{AppraisalStore, SaveReceipt, StoreError};
