//! Stored appraisal documents as the backend keeps them, and their mapping to
//! the typed inputs the scoring engine consumes.
//!
//! The backend is lenient about types: numbers may arrive as numeric strings
//! and flags as `"yes"`/`1`. Decoding coerces those; encoding always writes
//! canonical JSON numbers and booleans, using integers for integral values so
//! that unchanged inputs survive a round trip byte for byte.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

use super::domain::{
    AdministrativeRole, Designation, FacultyId, FacultyProfile, FormStatus, PartId,
    RecordVersion, StatusSnapshot,
};
use super::forms::{
    AdministrativePortfolio, AppraisalInputs, CourseMetric, DeanEvaluation,
    ExtraordinaryContribution, ManualMarks, MetricData, PartAInputs, PartBInputs, PartCInputs,
    PartInputs, PhdGuidance, PhdStage, PortfolioEvaluation, PortfolioType, Semester,
    TrainingCounts,
};
use super::scoring::policy::SuperiorWeighting;
use super::scoring::reconcile::dean_evaluation_total;
use super::scoring::sections::{PartASection, PartBSection, PartCSection, Section};
use super::scoring::PartScore;

/// JSON number that also accepts numeric strings; anything unparseable is 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StoredNumber(pub Number);

impl StoredNumber {
    pub fn from_f64(value: f64) -> Self {
        const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;
        if value.is_finite() && value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT {
            return Self(Number::from(value as i64));
        }
        Self(Number::from_f64(value).unwrap_or_else(|| Number::from(0)))
    }

    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or(0.0)
    }

    fn parse(raw: &str) -> Self {
        let trimmed = raw.trim().replace(',', "");
        if let Ok(integer) = trimmed.parse::<i64>() {
            return Self(Number::from(integer));
        }
        trimmed
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Self)
            .unwrap_or_else(|| Self(Number::from(0)))
    }
}

impl Default for StoredNumber {
    fn default() -> Self {
        Self(Number::from(0))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseScalar {
    Bool(bool),
    Number(Number),
    Text(String),
    Null(()),
}

impl<'de> Deserialize<'de> for StoredNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match LooseScalar::deserialize(deserializer)? {
            LooseScalar::Number(number) => Self(number),
            LooseScalar::Text(raw) => Self::parse(&raw),
            LooseScalar::Bool(flag) => Self(Number::from(u8::from(flag))),
            LooseScalar::Null(()) => Self::default(),
        })
    }
}

/// Boolean that also accepts `"true"`, `"yes"`, `"on"`, `1` and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct StoredFlag(pub bool);

impl<'de> Deserialize<'de> for StoredFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self(match LooseScalar::deserialize(deserializer)? {
            LooseScalar::Bool(flag) => flag,
            LooseScalar::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
            LooseScalar::Text(raw) => matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "y" | "on" | "1"
            ),
            LooseScalar::Null(()) => false,
        }))
    }
}

fn num(value: f64) -> StoredNumber {
    StoredNumber::from_f64(value)
}

fn opt_num(value: Option<f64>) -> Option<StoredNumber> {
    value.map(StoredNumber::from_f64)
}

fn opt_f64(value: &Option<StoredNumber>) -> Option<f64> {
    value.as_ref().map(StoredNumber::as_f64)
}

/// Stored manual-entry toggle for one section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredManualEntry {
    pub enabled: StoredFlag,
    pub marks: StoredNumber,
}

type StoredManual = BTreeMap<String, StoredManualEntry>;
type StoredSectionMarks = BTreeMap<String, StoredNumber>;

fn section_from_key<S: Section>(candidates: impl IntoIterator<Item = S>, key: &str) -> Option<S> {
    candidates.into_iter().find(|section| section.key() == key)
}

fn decode_manual<S: Section>(
    stored: &StoredManual,
    candidates: impl IntoIterator<Item = S> + Clone,
) -> ManualMarks<S> {
    let mut manual = ManualMarks::default();
    for (key, entry) in stored.iter().filter(|(_, entry)| entry.enabled.0) {
        if let Some(section) = section_from_key(candidates.clone(), key) {
            manual.set(section, entry.marks.as_f64());
        }
    }
    manual
}

fn encode_manual<S: Section>(manual: &ManualMarks<S>) -> StoredManual {
    manual
        .0
        .iter()
        .map(|(section, marks)| {
            (
                section.key().to_string(),
                StoredManualEntry {
                    enabled: StoredFlag(true),
                    marks: num(*marks),
                },
            )
        })
        .collect()
}

fn encode_section_marks(score: &PartScore) -> StoredSectionMarks {
    score
        .sections
        .iter()
        .map(|section| (section.key.to_string(), num(section.marks)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredCourse {
    pub course_code: String,
    pub course_name: String,
    pub semester: String,
    pub total_students: StoredNumber,
    pub above60: StoredNumber,
    pub mid50: StoredNumber,
    pub mid40: StoredNumber,
    pub co_attainment: StoredNumber,
    pub timely_submission: StoredFlag,
    pub enrolled: StoredNumber,
    pub present: StoredNumber,
    pub feedback_percent: StoredNumber,
}

impl StoredCourse {
    fn decode(&self) -> CourseMetric {
        CourseMetric {
            course_code: self.course_code.clone(),
            course_name: self.course_name.clone(),
            semester: match self.semester.trim() {
                "Sem II" | "II" | "2" => Semester::SemII,
                _ => Semester::SemI,
            },
            total_students: self.total_students.as_f64(),
            above_60: self.above60.as_f64(),
            between_50_60: self.mid50.as_f64(),
            between_40_50: self.mid40.as_f64(),
            co_attainment: self.co_attainment.as_f64(),
            timely_submission: self.timely_submission.0,
            enrolled: self.enrolled.as_f64(),
            present: self.present.as_f64(),
            feedback_percent: self.feedback_percent.as_f64(),
        }
    }

    fn encode(course: &CourseMetric) -> Self {
        Self {
            course_code: course.course_code.clone(),
            course_name: course.course_name.clone(),
            semester: course.semester.label().to_string(),
            total_students: num(course.total_students),
            above60: num(course.above_60),
            mid50: num(course.between_50_60),
            mid40: num(course.between_40_50),
            co_attainment: num(course.co_attainment),
            timely_submission: StoredFlag(course.timely_submission),
            enrolled: num(course.enrolled),
            present: num(course.present),
            feedback_percent: num(course.feedback_percent),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredPartA {
    pub courses: Vec<StoredCourse>,
    pub weekly_load_sem1: StoredNumber,
    pub weekly_load_sem2: StoredNumber,
    pub phd_scholar: StoredFlag,
    pub e_learning_modules: StoredNumber,
    pub projects_guided: StoredNumber,
    pub ptg_meetings: StoredNumber,
    pub manual: StoredManual,
    pub section_marks: StoredSectionMarks,
    pub total_marks: StoredNumber,
}

impl StoredPartA {
    pub fn decode(&self) -> PartAInputs {
        PartAInputs {
            courses: self.courses.iter().map(StoredCourse::decode).collect(),
            weekly_load_sem1: self.weekly_load_sem1.as_f64(),
            weekly_load_sem2: self.weekly_load_sem2.as_f64(),
            phd_scholar: self.phd_scholar.0,
            e_learning_modules: self.e_learning_modules.as_f64(),
            projects_guided: self.projects_guided.as_f64(),
            ptg_meetings: self.ptg_meetings.as_f64(),
            manual: decode_manual(&self.manual, PartASection::ordered()),
        }
    }

    pub fn encode(inputs: &PartAInputs, score: &PartScore) -> Self {
        Self {
            courses: inputs.courses.iter().map(StoredCourse::encode).collect(),
            weekly_load_sem1: num(inputs.weekly_load_sem1),
            weekly_load_sem2: num(inputs.weekly_load_sem2),
            phd_scholar: StoredFlag(inputs.phd_scholar),
            e_learning_modules: num(inputs.e_learning_modules),
            projects_guided: num(inputs.projects_guided),
            ptg_meetings: num(inputs.ptg_meetings),
            manual: encode_manual(&inputs.manual),
            section_marks: encode_section_marks(score),
            total_marks: num(score.total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredMetric {
    pub value: StoredNumber,
    pub proof: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<StoredNumber>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredPartB {
    pub sections: BTreeMap<String, BTreeMap<String, StoredMetric>>,
    pub manual: StoredManual,
    pub section_marks: StoredSectionMarks,
    pub total_claimed: StoredNumber,
    pub total_marks: StoredNumber,
}

impl StoredPartB {
    /// Unknown section keys are dropped; unknown sub-categories are kept and
    /// simply carry no weight.
    pub fn decode(&self) -> PartBInputs {
        let mut inputs = PartBInputs {
            manual: decode_manual(&self.manual, PartBSection::ordered()),
            ..PartBInputs::default()
        };
        for (key, claims) in &self.sections {
            let Some(section) = section_from_key(PartBSection::ordered(), key) else {
                continue;
            };
            for (category, metric) in claims {
                inputs.claim(
                    section,
                    category,
                    MetricData {
                        value: metric.value.as_f64(),
                        proof: metric.proof.clone(),
                        verified: opt_f64(&metric.verified),
                    },
                );
            }
        }
        inputs
    }

    pub fn encode(inputs: &PartBInputs, score: &PartScore) -> Self {
        let sections = inputs
            .sections
            .iter()
            .map(|(section, claims)| {
                let claims = claims
                    .iter()
                    .map(|(category, metric)| {
                        (
                            category.clone(),
                            StoredMetric {
                                value: num(metric.value),
                                proof: metric.proof.clone(),
                                verified: opt_num(metric.verified),
                            },
                        )
                    })
                    .collect();
                (section.key().to_string(), claims)
            })
            .collect();

        Self {
            sections,
            manual: encode_manual(&inputs.manual),
            section_marks: encode_section_marks(score),
            total_claimed: num(score.raw_total),
            total_marks: num(score.total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredPartC {
    pub qualification: String,
    pub trainings_attended: BTreeMap<String, StoredNumber>,
    pub trainings_organized: BTreeMap<String, StoredNumber>,
    pub phd_guided: BTreeMap<String, StoredNumber>,
    pub manual: StoredManual,
    pub section_marks: StoredSectionMarks,
    pub total_marks: StoredNumber,
}

fn lookup(map: &BTreeMap<String, StoredNumber>, key: &str) -> f64 {
    map.get(key).map(StoredNumber::as_f64).unwrap_or(0.0)
}

fn decode_training(map: &BTreeMap<String, StoredNumber>) -> TrainingCounts {
    TrainingCounts {
        two_week: lookup(map, "twoWeek"),
        one_week: lookup(map, "oneWeek"),
        short_term: lookup(map, "shortTerm"),
    }
}

fn encode_training(counts: &TrainingCounts) -> BTreeMap<String, StoredNumber> {
    BTreeMap::from([
        ("twoWeek".to_string(), num(counts.two_week)),
        ("oneWeek".to_string(), num(counts.one_week)),
        ("shortTerm".to_string(), num(counts.short_term)),
    ])
}

impl StoredPartC {
    pub fn decode(&self) -> PartCInputs {
        PartCInputs {
            qualification: match self.qualification.trim().to_ascii_lowercase().as_str() {
                "awarded" | "phd" => PhdStage::Awarded,
                "pursuing" => PhdStage::Pursuing,
                _ => PhdStage::None,
            },
            trainings_attended: decode_training(&self.trainings_attended),
            trainings_organized: decode_training(&self.trainings_organized),
            phd_guided: PhdGuidance {
                awarded: lookup(&self.phd_guided, "awarded"),
                submitted: lookup(&self.phd_guided, "submitted"),
                ongoing: lookup(&self.phd_guided, "ongoing"),
            },
            manual: decode_manual(&self.manual, PartCSection::ordered()),
        }
    }

    pub fn encode(inputs: &PartCInputs, score: &PartScore) -> Self {
        let qualification = match inputs.qualification {
            PhdStage::Awarded => "awarded",
            PhdStage::Pursuing => "pursuing",
            PhdStage::None => "none",
        };
        Self {
            qualification: qualification.to_string(),
            trainings_attended: encode_training(&inputs.trainings_attended),
            trainings_organized: encode_training(&inputs.trainings_organized),
            phd_guided: BTreeMap::from([
                ("awarded".to_string(), num(inputs.phd_guided.awarded)),
                ("submitted".to_string(), num(inputs.phd_guided.submitted)),
                ("ongoing".to_string(), num(inputs.phd_guided.ongoing)),
            ]),
            manual: encode_manual(&inputs.manual),
            section_marks: encode_section_marks(score),
            total_marks: num(score.total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredDeanEvaluation {
    pub self_marks: StoredNumber,
    pub hod_marks: StoredNumber,
    pub dean_marks: StoredNumber,
    pub total_marks: StoredNumber,
}

/// Part D keeps the administrative fields flat behind an `isAdministrativeRole` flag.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredPartD {
    pub portfolio_type: String,
    pub institute_portfolios: Vec<String>,
    pub department_portfolios: Vec<String>,
    pub self_awarded_marks: StoredNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hod_marks: Option<StoredNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dean_marks: Option<StoredNumber>,
    pub is_administrative_role: StoredFlag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrative_role: Option<AdministrativeRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_self_awarded_marks: Option<StoredNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director_marks: Option<StoredNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_dean_marks: Option<StoredNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dean_evaluation: Option<StoredDeanEvaluation>,
    pub section_marks: StoredSectionMarks,
    pub total_marks: StoredNumber,
}

impl StoredPartD {
    pub fn decode(&self) -> PortfolioEvaluation {
        let administrative = match (self.is_administrative_role.0, self.administrative_role) {
            (true, Some(role)) => Some(AdministrativePortfolio {
                role,
                self_awarded_marks: opt_f64(&self.admin_self_awarded_marks).unwrap_or(0.0),
                director_marks: opt_f64(&self.director_marks),
                admin_dean_marks: opt_f64(&self.admin_dean_marks),
            }),
            _ => None,
        };

        PortfolioEvaluation {
            portfolio_type: match self.portfolio_type.trim().to_ascii_lowercase().as_str() {
                "institute" => PortfolioType::Institute,
                "both" => PortfolioType::Both,
                _ => PortfolioType::Department,
            },
            institute_portfolios: self.institute_portfolios.clone(),
            department_portfolios: self.department_portfolios.clone(),
            self_awarded_marks: self.self_awarded_marks.as_f64(),
            hod_marks: opt_f64(&self.hod_marks),
            dean_marks: opt_f64(&self.dean_marks),
            administrative,
            dean_evaluation: self.dean_evaluation.as_ref().map(|stored| DeanEvaluation {
                self_marks: stored.self_marks.as_f64(),
                hod_marks: stored.hod_marks.as_f64(),
                dean_marks: stored.dean_marks.as_f64(),
            }),
        }
    }

    pub fn encode(evaluation: &PortfolioEvaluation, score: &PartScore, weighting: SuperiorWeighting) -> Self {
        let portfolio_type = match evaluation.portfolio_type {
            PortfolioType::Institute => "institute",
            PortfolioType::Department => "department",
            PortfolioType::Both => "both",
        };
        let administrative = evaluation.administrative.as_ref();

        Self {
            portfolio_type: portfolio_type.to_string(),
            institute_portfolios: evaluation.institute_portfolios.clone(),
            department_portfolios: evaluation.department_portfolios.clone(),
            self_awarded_marks: num(evaluation.self_awarded_marks),
            hod_marks: opt_num(evaluation.hod_marks),
            dean_marks: opt_num(evaluation.dean_marks),
            is_administrative_role: StoredFlag(administrative.is_some()),
            administrative_role: administrative.map(|admin| admin.role),
            admin_self_awarded_marks: administrative.map(|admin| num(admin.self_awarded_marks)),
            director_marks: administrative.and_then(|admin| opt_num(admin.director_marks)),
            admin_dean_marks: administrative.and_then(|admin| opt_num(admin.admin_dean_marks)),
            dean_evaluation: evaluation.dean_evaluation.as_ref().map(|dean| {
                StoredDeanEvaluation {
                    self_marks: num(dean.self_marks),
                    hod_marks: num(dean.hod_marks),
                    dean_marks: num(dean.dean_marks),
                    total_marks: num(dean_evaluation_total(weighting, dean)),
                }
            }),
            section_marks: encode_section_marks(score),
            total_marks: num(score.total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredPartE {
    pub description: String,
    pub self_awarded_marks: StoredNumber,
    pub section_marks: StoredSectionMarks,
    pub total_marks: StoredNumber,
}

impl StoredPartE {
    pub fn decode(&self) -> ExtraordinaryContribution {
        ExtraordinaryContribution {
            description: self.description.clone(),
            self_awarded_marks: self.self_awarded_marks.as_f64(),
        }
    }

    pub fn encode(contribution: &ExtraordinaryContribution, score: &PartScore) -> Self {
        Self {
            description: contribution.description.clone(),
            self_awarded_marks: num(contribution.self_awarded_marks),
            section_marks: encode_section_marks(score),
            total_marks: num(score.total),
        }
    }
}

/// Payload for one part write: raw inputs plus the marks computed from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PartDocument {
    A(StoredPartA),
    B(StoredPartB),
    C(StoredPartC),
    D(StoredPartD),
    E(StoredPartE),
}

impl PartDocument {
    pub fn part(&self) -> PartId {
        match self {
            Self::A(_) => PartId::A,
            Self::B(_) => PartId::B,
            Self::C(_) => PartId::C,
            Self::D(_) => PartId::D,
            Self::E(_) => PartId::E,
        }
    }

    /// Encode inputs together with the score computed for them.
    pub fn encode(inputs: &PartInputs, score: &PartScore, profile: &FacultyProfile) -> Self {
        match inputs {
            PartInputs::A(inputs) => Self::A(StoredPartA::encode(inputs, score)),
            PartInputs::B(inputs) => Self::B(StoredPartB::encode(inputs, score)),
            PartInputs::C(inputs) => Self::C(StoredPartC::encode(inputs, score)),
            PartInputs::D(evaluation) => Self::D(StoredPartD::encode(
                evaluation,
                score,
                SuperiorWeighting::for_ratee(profile),
            )),
            PartInputs::E(contribution) => Self::E(StoredPartE::encode(contribution, score)),
        }
    }

    pub fn decode(&self) -> PartInputs {
        match self {
            Self::A(stored) => PartInputs::A(stored.decode()),
            Self::B(stored) => PartInputs::B(stored.decode()),
            Self::C(stored) => PartInputs::C(stored.decode()),
            Self::D(stored) => PartInputs::D(stored.decode()),
            Self::E(stored) => PartInputs::E(stored.decode()),
        }
    }

    /// The total the backend has on file, which may be stale.
    pub fn stored_total(&self) -> f64 {
        match self {
            Self::A(stored) => stored.total_marks.as_f64(),
            Self::B(stored) => stored.total_marks.as_f64(),
            Self::C(stored) => stored.total_marks.as_f64(),
            Self::D(stored) => stored.total_marks.as_f64(),
            Self::E(stored) => stored.total_marks.as_f64(),
        }
    }
}

/// A faculty member's appraisal for the current cycle, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppraisalDocument {
    pub faculty_id: FacultyId,
    #[serde(default)]
    pub department: String,
    pub designation: Designation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrative_role: Option<AdministrativeRole>,
    pub status: FormStatus,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub part_status: BTreeMap<PartId, FormStatus>,
    pub version: RecordVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_a: Option<StoredPartA>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_b: Option<StoredPartB>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_c: Option<StoredPartC>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_d: Option<StoredPartD>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_e: Option<StoredPartE>,
}

impl AppraisalDocument {
    /// A fresh draft with no parts filled in.
    pub fn draft(faculty_id: FacultyId, department: &str, profile: FacultyProfile) -> Self {
        Self {
            faculty_id,
            department: department.to_string(),
            designation: profile.designation,
            administrative_role: profile.administrative_role,
            status: FormStatus::Draft,
            part_status: BTreeMap::new(),
            version: RecordVersion("0".to_string()),
            updated_at: None,
            part_a: None,
            part_b: None,
            part_c: None,
            part_d: None,
            part_e: None,
        }
    }

    pub fn profile(&self) -> FacultyProfile {
        FacultyProfile {
            designation: self.designation,
            administrative_role: self.administrative_role,
        }
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            status: self.status.clone(),
            parts: self.part_status.clone(),
            version: self.version.clone(),
        }
    }

    pub fn part(&self, part: PartId) -> Option<PartDocument> {
        match part {
            PartId::A => self.part_a.clone().map(PartDocument::A),
            PartId::B => self.part_b.clone().map(PartDocument::B),
            PartId::C => self.part_c.clone().map(PartDocument::C),
            PartId::D => self.part_d.clone().map(PartDocument::D),
            PartId::E => self.part_e.clone().map(PartDocument::E),
        }
    }

    /// Replace one part in place; used by stores that hold documents locally.
    pub fn put_part(&mut self, document: PartDocument) {
        match document {
            PartDocument::A(stored) => self.part_a = Some(stored),
            PartDocument::B(stored) => self.part_b = Some(stored),
            PartDocument::C(stored) => self.part_c = Some(stored),
            PartDocument::D(stored) => self.part_d = Some(stored),
            PartDocument::E(stored) => self.part_e = Some(stored),
        }
    }

    /// Decoded inputs for every stored part.
    pub fn inputs(&self) -> AppraisalInputs {
        AppraisalInputs {
            part_a: self.part_a.as_ref().map(StoredPartA::decode),
            part_b: self.part_b.as_ref().map(StoredPartB::decode),
            part_c: self.part_c.as_ref().map(StoredPartC::decode),
            part_d: self.part_d.as_ref().map(StoredPartD::decode),
            part_e: self.part_e.as_ref().map(StoredPartE::decode),
        }
    }
}
