use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::cache::DraftCache;
use super::documents::{AppraisalDocument, PartDocument};
use super::domain::{FacultyId, FacultyProfile, PartId, RecordVersion, StatusSnapshot};
use super::forms::{
    AdministrativePortfolio, AppraisalInputs, DeanEvaluation, ExtraordinaryContribution,
    PartAInputs, PartBInputs, PartCInputs, PartInputs, PortfolioEvaluation,
};
use super::lifecycle::{FormGuard, FormLockedError, LockState, ValidationError};
use super::scoring::reconcile::merge_self_assessment;
use super::scoring::sections::PartBSection;
use super::scoring::{
    dean_evaluation_total, score_part_b, ClaimBasis, PartScore, ScoringEngine, SuperiorWeighting,
};
use super::store::{AppraisalStore, SaveReceipt, StoreError};

/// Default bound on every store round trip.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Stored totals further than this from a recomputation are flagged stale.
const STALE_TOLERANCE: f64 = 1e-6;

/// Service composing the form guard, scoring engine, and appraisal store.
pub struct AppraisalService<S> {
    store: Arc<S>,
    cache: Arc<DraftCache>,
    timeout: Duration,
}

impl<S> Clone for AppraisalService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: Arc::clone(&self.cache),
            timeout: self.timeout,
        }
    }
}

impl<S> AppraisalService<S>
where
    S: AppraisalStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            cache: Arc::new(DraftCache::new()),
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cache(&self) -> &DraftCache {
        &self.cache
    }

    /// Upper bound applied to every store call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                operation,
                after_ms: self.timeout.as_millis() as u64,
            }),
        }
    }

    async fn status(&self, faculty_id: &FacultyId) -> Result<StatusSnapshot, StoreError> {
        self.bounded("read_status", self.store.read_status(faculty_id))
            .await
    }

    /// Document at `version`, from the cache when it is still current.
    async fn document(
        &self,
        faculty_id: &FacultyId,
        version: &RecordVersion,
    ) -> Result<AppraisalDocument, StoreError> {
        if let Some(document) = self.cache.fresh(faculty_id, version) {
            debug!(faculty_id = %faculty_id, version = %version, "appraisal served from cache");
            return Ok(document);
        }
        let document = self
            .bounded("read_appraisal", self.store.read_appraisal(faculty_id))
            .await?;
        self.cache.remember(document.clone());
        Ok(document)
    }

    /// Load an appraisal and recompute every derived mark from its raw inputs.
    pub async fn load(&self, faculty_id: &FacultyId) -> Result<AppraisalView, AppraisalError> {
        let snapshot = self.status(faculty_id).await?;
        let document = self.document(faculty_id, &snapshot.version).await?;
        let profile = document.profile();
        let engine = ScoringEngine::new(profile);

        let mut parts = Vec::new();
        for part in PartId::ordered() {
            let Some(stored) = document.part(part) else {
                continue;
            };
            let score = engine.score(&stored.decode());
            let stored_total = stored.stored_total();
            let stale = (stored_total - score.total).abs() > STALE_TOLERANCE;
            if stale {
                warn!(
                    faculty_id = %faculty_id,
                    part = %part,
                    stored_total,
                    recomputed_total = score.total,
                    "stored appraisal total diverges from recomputation"
                );
            }
            parts.push(PartView {
                score,
                stored_total,
                stale,
            });
        }

        let total = parts.iter().map(|view| view.score.total).sum();
        Ok(AppraisalView {
            faculty_id: document.faculty_id.clone(),
            department: document.department.clone(),
            profile,
            lock: LockState::from(&snapshot),
            version: snapshot.version.clone(),
            updated_at: document.updated_at,
            inputs: document.inputs(),
            parts,
            total,
            max: super::scoring::policy::appraisal_max(profile.designation),
        })
    }

    /// Save one part after confirming, on a fresh status read, that it is
    /// still a draft. Derived marks are recomputed; stored ones are ignored.
    pub async fn save_part(
        &self,
        faculty_id: &FacultyId,
        inputs: PartInputs,
    ) -> Result<SaveReceipt, AppraisalError> {
        let part = inputs.part();
        let snapshot = self.status(faculty_id).await?;
        if let Err(locked) = FormGuard::ensure_editable(part, &snapshot) {
            warn!(faculty_id = %faculty_id, part = %part, status = %locked.status, "rejected edit to locked appraisal");
            return Err(locked.into());
        }

        let document = self.document(faculty_id, &snapshot.version).await?;
        let profile = document.profile();
        let inputs = match inputs {
            PartInputs::D(incoming) => {
                let stored = document.part_d.as_ref().map(|stored| stored.decode());
                PartInputs::D(merge_self_assessment(stored.as_ref(), incoming))
            }
            other => other,
        };

        let score = ScoringEngine::new(profile).score(&inputs);
        let payload = PartDocument::encode(&inputs, &score, &profile);
        let version = self
            .bounded("write_part", self.store.write_part(faculty_id, payload))
            .await?;
        self.cache.invalidate(faculty_id);

        info!(
            faculty_id = %faculty_id,
            part = %part,
            version = %version,
            total_marks = score.total,
            "appraisal part saved"
        );
        Ok(receipt(faculty_id, &score, version, None))
    }

    pub async fn save_part_a(
        &self,
        faculty_id: &FacultyId,
        inputs: PartAInputs,
    ) -> Result<SaveReceipt, AppraisalError> {
        self.save_part(faculty_id, PartInputs::A(inputs)).await
    }

    pub async fn save_part_b(
        &self,
        faculty_id: &FacultyId,
        inputs: PartBInputs,
    ) -> Result<SaveReceipt, AppraisalError> {
        self.save_part(faculty_id, PartInputs::B(inputs)).await
    }

    pub async fn save_part_c(
        &self,
        faculty_id: &FacultyId,
        inputs: PartCInputs,
    ) -> Result<SaveReceipt, AppraisalError> {
        self.save_part(faculty_id, PartInputs::C(inputs)).await
    }

    /// Save the faculty member's own Part D fields. Superior ratings already
    /// on record are carried over and cannot be set through this path.
    pub async fn save_part_d(
        &self,
        faculty_id: &FacultyId,
        evaluation: PortfolioEvaluation,
    ) -> Result<SaveReceipt, AppraisalError> {
        self.save_part(faculty_id, PartInputs::D(evaluation)).await
    }

    pub async fn save_part_e(
        &self,
        faculty_id: &FacultyId,
        contribution: ExtraordinaryContribution,
    ) -> Result<SaveReceipt, AppraisalError> {
        self.save_part(faculty_id, PartInputs::E(contribution)).await
    }

    /// Validate mandatory sections over freshly recomputed scores, then ask
    /// the backend to move the record out of `DRAFT`.
    pub async fn submit(&self, faculty_id: &FacultyId) -> Result<StatusSnapshot, AppraisalError> {
        let snapshot = self.status(faculty_id).await?;
        for part in PartId::ordered() {
            FormGuard::ensure_editable(part, &snapshot)?;
        }

        let document = self.document(faculty_id, &snapshot.version).await?;
        let scores = ScoringEngine::new(document.profile()).score_all(&document.inputs());
        if let Err(missing) = FormGuard::ensure_complete(&scores.parts) {
            info!(faculty_id = %faculty_id, missing = ?missing.missing, "submit blocked by incomplete sections");
            return Err(missing.into());
        }

        let submitted = self
            .bounded("submit", self.store.submit(faculty_id))
            .await?;
        self.cache.invalidate(faculty_id);
        info!(faculty_id = %faculty_id, status = %submitted.status, total_marks = scores.total, "appraisal submitted");
        Ok(submitted)
    }

    async fn portfolio(&self, faculty_id: &FacultyId) -> Result<(FacultyProfile, PortfolioEvaluation), StoreError> {
        let snapshot = self.status(faculty_id).await?;
        let document = self.document(faculty_id, &snapshot.version).await?;
        let evaluation = document
            .part_d
            .as_ref()
            .map(|stored| stored.decode())
            .unwrap_or_default();
        Ok((document.profile(), evaluation))
    }

    async fn write_review(
        &self,
        faculty_id: &FacultyId,
        profile: &FacultyProfile,
        inputs: PartInputs,
        review_total: Option<f64>,
    ) -> Result<SaveReceipt, AppraisalError> {
        let score = ScoringEngine::new(*profile).score(&inputs);
        let payload = PartDocument::encode(&inputs, &score, profile);
        let version = self
            .bounded("write_review", self.store.write_review(faculty_id, payload))
            .await?;
        self.cache.invalidate(faculty_id);
        info!(
            faculty_id = %faculty_id,
            part = %score.part,
            version = %version,
            total_marks = score.total,
            "appraisal review recorded"
        );
        Ok(receipt(faculty_id, &score, version, review_total))
    }

    /// Record superior ratings for Part D. Not gated on `DRAFT`; the backend
    /// authorises the reviewer.
    pub async fn record_portfolio_marks(
        &self,
        faculty_id: &FacultyId,
        review: PortfolioReview,
    ) -> Result<SaveReceipt, AppraisalError> {
        let (profile, mut evaluation) = self.portfolio(faculty_id).await?;
        if evaluation.administrative.is_none() {
            evaluation.administrative =
                profile.administrative_role.map(|role| AdministrativePortfolio {
                    role,
                    self_awarded_marks: 0.0,
                    director_marks: None,
                    admin_dean_marks: None,
                });
        }
        if review.rates_administration() && evaluation.administrative.is_none() {
            warn!(
                faculty_id = %faculty_id,
                "administrative marks sent for faculty without an administrative role"
            );
            return Err(AppraisalError::NotAdministrative(faculty_id.clone()));
        }
        review.apply(&mut evaluation);
        self.write_review(faculty_id, &profile, PartInputs::D(evaluation), None)
            .await
    }

    /// Record a dean's evaluation of an HOD or associate dean.
    pub async fn record_dean_evaluation(
        &self,
        faculty_id: &FacultyId,
        dean_evaluation: DeanEvaluation,
    ) -> Result<SaveReceipt, AppraisalError> {
        let (profile, mut evaluation) = self.portfolio(faculty_id).await?;
        evaluation.dean_evaluation = Some(dean_evaluation);
        let total = dean_evaluation_total(SuperiorWeighting::for_ratee(&profile), &dean_evaluation);
        self.write_review(faculty_id, &profile, PartInputs::D(evaluation), Some(total))
            .await
    }

    /// Record the verification committee's figures against Part B claims.
    /// Figures for claims that were never made are ignored.
    pub async fn record_verification(
        &self,
        faculty_id: &FacultyId,
        verification: ResearchVerification,
    ) -> Result<SaveReceipt, AppraisalError> {
        let snapshot = self.status(faculty_id).await?;
        let document = self.document(faculty_id, &snapshot.version).await?;
        let profile = document.profile();
        let mut inputs = document
            .part_b
            .as_ref()
            .map(|stored| stored.decode())
            .unwrap_or_default();

        let ignored = verification.apply(&mut inputs);
        if ignored > 0 {
            debug!(faculty_id = %faculty_id, ignored, "verified figures without a matching claim");
        }

        let verified_total = score_part_b(&inputs, profile.designation, ClaimBasis::Verified).total;
        self.write_review(faculty_id, &profile, PartInputs::B(inputs), Some(verified_total))
            .await
    }
}

fn receipt(
    faculty_id: &FacultyId,
    score: &PartScore,
    version: RecordVersion,
    review_total: Option<f64>,
) -> SaveReceipt {
    SaveReceipt {
        faculty_id: faculty_id.clone(),
        part: score.part,
        version,
        total_marks: score.total,
        total_claimed: (score.part == PartId::B).then_some(score.raw_total),
        review_total,
    }
}

/// Superior ratings for a portfolio. Absent fields leave the stored rating unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioReview {
    pub hod_marks: Option<f64>,
    pub dean_marks: Option<f64>,
    pub director_marks: Option<f64>,
    pub admin_dean_marks: Option<f64>,
}

impl PortfolioReview {
    fn rates_administration(&self) -> bool {
        self.director_marks.is_some() || self.admin_dean_marks.is_some()
    }

    fn apply(&self, evaluation: &mut PortfolioEvaluation) {
        if let Some(marks) = self.hod_marks {
            evaluation.hod_marks = Some(marks);
        }
        if let Some(marks) = self.dean_marks {
            evaluation.dean_marks = Some(marks);
        }
        if let Some(administrative) = evaluation.administrative.as_mut() {
            if let Some(marks) = self.director_marks {
                administrative.director_marks = Some(marks);
            }
            if let Some(marks) = self.admin_dean_marks {
                administrative.admin_dean_marks = Some(marks);
            }
        }
    }
}

/// Verified figures per Part B section and sub-category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchVerification {
    pub sections: BTreeMap<PartBSection, BTreeMap<String, f64>>,
}

impl ResearchVerification {
    /// Apply figures to matching claims; returns how many had no claim.
    fn apply(&self, inputs: &mut PartBInputs) -> usize {
        let mut ignored = 0;
        for (section, figures) in &self.sections {
            for (category, verified) in figures {
                match inputs
                    .sections
                    .get_mut(section)
                    .and_then(|claims| claims.get_mut(category))
                {
                    Some(claim) => claim.verified = Some(*verified),
                    None => ignored += 1,
                }
            }
        }
        ignored
    }
}

/// One part's recomputed score next to the total the backend has on file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartView {
    #[serde(flatten)]
    pub score: PartScore,
    pub stored_total: f64,
    pub stale: bool,
}

/// A loaded appraisal with freshly computed scores and its lock state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppraisalView {
    pub faculty_id: FacultyId,
    pub department: String,
    pub profile: FacultyProfile,
    pub lock: LockState,
    pub version: RecordVersion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub inputs: AppraisalInputs,
    pub parts: Vec<PartView>,
    pub total: f64,
    pub max: f64,
}

impl AppraisalView {
    pub fn part(&self, part: PartId) -> Option<&PartView> {
        self.parts.iter().find(|view| view.score.part == part)
    }
}

/// Error raised by the appraisal service.
#[derive(Debug, thiserror::Error)]
pub enum AppraisalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Locked(#[from] FormLockedError),
    #[error(transparent)]
    Persistence(#[from] StoreError),
    #[error("faculty {0} holds no administrative role; director and dean-of-administration marks do not apply")]
    NotAdministrative(FacultyId),
}
