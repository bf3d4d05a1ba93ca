//! Raw, faculty-entered inputs for each appraisal part.
//!
//! Every numeric field is an `f64` so that malformed values coming from the
//! backend or a form (negative counts, `NaN`) can be carried through and
//! coerced by the normalizer instead of failing deserialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{AdministrativeRole, PartId};
use super::scoring::sections::{PartASection, PartBSection, PartCSection, Section};

/// Human-entered section marks that bypass the formula for that section.
///
/// A section listed here is scored from the entered value (clamped to the
/// section maximum); every other section is computed from raw inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize + Ord",
    deserialize = "S: Deserialize<'de> + Ord"
))]
pub struct ManualMarks<S>(pub BTreeMap<S, f64>);

impl<S: Section> ManualMarks<S> {
    pub fn get(&self, section: S) -> Option<f64> {
        self.0.get(&section).copied()
    }

    pub fn set(&mut self, section: S, marks: f64) {
        self.0.insert(section, marks);
    }

    pub fn clear(&mut self, section: S) {
        self.0.remove(&section);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S> Default for ManualMarks<S> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Semester {
    #[default]
    #[serde(rename = "Sem I")]
    SemI,
    #[serde(rename = "Sem II")]
    SemII,
}

impl Semester {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SemI => "Sem I",
            Self::SemII => "Sem II",
        }
    }
}

/// One course taught in one semester.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CourseMetric {
    pub course_code: String,
    pub course_name: String,
    pub semester: Semester,
    pub total_students: f64,
    #[serde(rename = "above60")]
    pub above_60: f64,
    #[serde(rename = "mid50")]
    pub between_50_60: f64,
    #[serde(rename = "mid40")]
    pub between_40_50: f64,
    /// Course-outcome attainment in percent.
    pub co_attainment: f64,
    pub timely_submission: bool,
    pub enrolled: f64,
    pub present: f64,
    pub feedback_percent: f64,
}

/// Part A: Academic Involvement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartAInputs {
    pub courses: Vec<CourseMetric>,
    pub weekly_load_sem1: f64,
    pub weekly_load_sem2: f64,
    pub phd_scholar: bool,
    pub e_learning_modules: f64,
    pub projects_guided: f64,
    pub ptg_meetings: f64,
    #[serde(skip_serializing_if = "ManualMarks::is_empty")]
    pub manual: ManualMarks<PartASection>,
}

/// A claimed count (or amount) with its proof link.
///
/// `verified` is filled in by the verification committee and is never read
/// by the claim-based score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricData {
    pub value: f64,
    pub proof: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<f64>,
}

impl MetricData {
    pub fn claimed(value: f64, proof: impl Into<String>) -> Self {
        Self {
            value,
            proof: proof.into(),
            verified: None,
        }
    }
}

/// Claims for one research section, keyed by sub-category (`sci`, `scopus`, ...).
pub type SectionClaims = BTreeMap<String, MetricData>;

/// Part B: Research.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartBInputs {
    pub sections: BTreeMap<PartBSection, SectionClaims>,
    #[serde(skip_serializing_if = "ManualMarks::is_empty")]
    pub manual: ManualMarks<PartBSection>,
}

impl PartBInputs {
    pub fn claim(&mut self, section: PartBSection, category: &str, data: MetricData) {
        self.sections
            .entry(section)
            .or_default()
            .insert(category.to_string(), data);
    }

    pub fn claims(&self, section: PartBSection) -> Option<&SectionClaims> {
        self.sections.get(&section)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhdStage {
    #[default]
    None,
    Pursuing,
    Awarded,
}

/// Training programmes counted by duration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrainingCounts {
    pub two_week: f64,
    pub one_week: f64,
    pub short_term: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhdGuidance {
    pub awarded: f64,
    pub submitted: f64,
    pub ongoing: f64,
}

/// Part C: Self-Development.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartCInputs {
    pub qualification: PhdStage,
    pub trainings_attended: TrainingCounts,
    pub trainings_organized: TrainingCounts,
    pub phd_guided: PhdGuidance,
    #[serde(skip_serializing_if = "ManualMarks::is_empty")]
    pub manual: ManualMarks<PartCSection>,
}

/// Which superior rates the faculty member's portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioType {
    Institute,
    #[default]
    Department,
    Both,
}

/// Portfolio marks for faculty holding an administrative post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdministrativePortfolio {
    pub role: AdministrativeRole,
    #[serde(default)]
    pub self_awarded_marks: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director_marks: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_dean_marks: Option<f64>,
}

/// Dean's rating of an HOD/associate dean's interaction and portfolio work.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeanEvaluation {
    pub self_marks: f64,
    pub hod_marks: f64,
    pub dean_marks: f64,
}

/// Part D: Portfolio.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioEvaluation {
    pub portfolio_type: PortfolioType,
    pub institute_portfolios: Vec<String>,
    pub department_portfolios: Vec<String>,
    pub self_awarded_marks: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hod_marks: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dean_marks: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrative: Option<AdministrativePortfolio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dean_evaluation: Option<DeanEvaluation>,
}

/// Part E: Extraordinary Contributions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtraordinaryContribution {
    pub description: String,
    pub self_awarded_marks: f64,
}

/// Inputs for exactly one part, as submitted by a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "part", content = "inputs")]
pub enum PartInputs {
    #[serde(rename = "partA")]
    A(PartAInputs),
    #[serde(rename = "partB")]
    B(PartBInputs),
    #[serde(rename = "partC")]
    C(PartCInputs),
    #[serde(rename = "partD")]
    D(PortfolioEvaluation),
    #[serde(rename = "partE")]
    E(ExtraordinaryContribution),
}

impl PartInputs {
    pub fn part(&self) -> PartId {
        match self {
            Self::A(_) => PartId::A,
            Self::B(_) => PartId::B,
            Self::C(_) => PartId::C,
            Self::D(_) => PartId::D,
            Self::E(_) => PartId::E,
        }
    }

    /// Decode the inputs for `part` from an untagged JSON body.
    pub fn from_value(part: PartId, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match part {
            PartId::A => Self::A(serde_json::from_value(value)?),
            PartId::B => Self::B(serde_json::from_value(value)?),
            PartId::C => Self::C(serde_json::from_value(value)?),
            PartId::D => Self::D(serde_json::from_value(value)?),
            PartId::E => Self::E(serde_json::from_value(value)?),
        })
    }
}

/// Any subset of the five parts, used for previews and batch scoring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppraisalInputs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_a: Option<PartAInputs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_b: Option<PartBInputs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_c: Option<PartCInputs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_d: Option<PortfolioEvaluation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_e: Option<ExtraordinaryContribution>,
}

impl AppraisalInputs {
    pub fn parts(&self) -> Vec<PartInputs> {
        let mut parts = Vec::new();
        if let Some(inputs) = &self.part_a {
            parts.push(PartInputs::A(inputs.clone()));
        }
        if let Some(inputs) = &self.part_b {
            parts.push(PartInputs::B(inputs.clone()));
        }
        if let Some(inputs) = &self.part_c {
            parts.push(PartInputs::C(inputs.clone()));
        }
        if let Some(inputs) = &self.part_d {
            parts.push(PartInputs::D(inputs.clone()));
        }
        if let Some(inputs) = &self.part_e {
            parts.push(PartInputs::E(inputs.clone()));
        }
        parts
    }
}
