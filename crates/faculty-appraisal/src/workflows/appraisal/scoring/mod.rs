mod aggregate;
pub mod normalizer;
pub mod policy;
pub mod reconcile;
pub mod sections;

pub use aggregate::{score_part_a, score_part_b, score_part_c, score_part_e};
pub use normalizer::ClaimBasis;
pub use policy::{part_policy, PartPolicy, SuperiorWeighting};
pub use reconcile::{dean_evaluation_total, score_part_d, superior_marks};

use serde::Serialize;

use super::domain::{FacultyProfile, PartId};
use super::forms::{AppraisalInputs, PartInputs};
use sections::Section;

/// Whether a section's marks came from the formula or a human entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOrigin {
    Computed,
    Manual,
}

/// Marks for one section, already clamped to the section cap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionMark {
    pub key: &'static str,
    pub label: &'static str,
    pub marks: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub origin: ScoreOrigin,
}

impl SectionMark {
    /// Resolve a section from its formula value, unless a manual entry overrides it.
    pub(crate) fn resolve<S: Section>(section: S, computed: f64, manual: Option<f64>) -> Self {
        let (raw, origin) = match manual {
            Some(entered) => (entered, ScoreOrigin::Manual),
            None => (computed, ScoreOrigin::Computed),
        };
        Self {
            key: section.key(),
            label: section.label(),
            marks: normalizer::clamp_score(raw, section.cap()),
            max: section.cap(),
            origin,
        }
    }
}

/// Aggregated score for one part.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartScore {
    pub part: PartId,
    pub sections: Vec<SectionMark>,
    /// Sum of section marks before the role factor and part cap.
    pub raw_total: f64,
    pub total: f64,
}

impl PartScore {
    pub(crate) fn from_sections(part: PartId, sections: Vec<SectionMark>, policy: PartPolicy) -> Self {
        let raw_total = sections
            .iter()
            .map(|section| section.marks)
            .sum::<f64>()
            .min(f64::MAX);
        Self {
            part,
            total: policy.apply(raw_total),
            raw_total,
            sections,
        }
    }

    pub fn section(&self, key: &str) -> Option<&SectionMark> {
        self.sections.iter().find(|section| section.key == key)
    }

    pub fn section_marks(&self, key: &str) -> f64 {
        self.section(key).map(|section| section.marks).unwrap_or(0.0)
    }
}

/// Scores every part for one faculty member.
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine {
    profile: FacultyProfile,
}

impl ScoringEngine {
    pub fn new(profile: FacultyProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &FacultyProfile {
        &self.profile
    }

    pub fn score(&self, inputs: &PartInputs) -> PartScore {
        let designation = self.profile.designation;
        match inputs {
            PartInputs::A(inputs) => score_part_a(inputs, designation),
            PartInputs::B(inputs) => score_part_b(inputs, designation, ClaimBasis::Claimed),
            PartInputs::C(inputs) => score_part_c(inputs, designation),
            PartInputs::D(evaluation) => score_part_d(evaluation),
            PartInputs::E(contribution) => score_part_e(contribution),
        }
    }

    pub fn score_all(&self, inputs: &AppraisalInputs) -> AppraisalScore {
        let parts: Vec<PartScore> = inputs.parts().iter().map(|part| self.score(part)).collect();
        let total = parts.iter().map(|part| part.total).sum();
        AppraisalScore {
            profile: self.profile,
            parts,
            total,
            max: policy::appraisal_max(self.profile.designation),
        }
    }
}

/// Scores for the parts supplied, plus their grand total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppraisalScore {
    pub profile: FacultyProfile,
    pub parts: Vec<PartScore>,
    pub total: f64,
    pub max: f64,
}
