//! Role-dependent weights and caps, kept in one table so every part reads the
//! same designation rules.

use serde::{Deserialize, Serialize};

use crate::workflows::appraisal::domain::{AdministrativeRole, Designation, FacultyProfile, PartId};

/// Multiplier and cap applied to a part's summed section marks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartPolicy {
    pub factor: f64,
    pub max: f64,
}

impl PartPolicy {
    const fn capped(max: f64) -> Self {
        Self { factor: 1.0, max }
    }

    pub fn apply(&self, raw_total: f64) -> f64 {
        let weighted = raw_total * self.factor;
        if weighted.is_nan() {
            0.0
        } else {
            weighted.clamp(0.0, self.max)
        }
    }
}

pub const PORTFOLIO_MAX: f64 = 120.0;
pub const PORTFOLIO_SHARE_MAX: f64 = 60.0;
pub const EXTRAORDINARY_MAX: f64 = 50.0;

pub fn part_policy(part: PartId, designation: Designation) -> PartPolicy {
    use Designation::{AssistantProfessor, AssociateProfessor, Professor};

    match (part, designation) {
        (PartId::A, Professor) => PartPolicy {
            factor: 0.68,
            max: 300.0,
        },
        (PartId::A, AssociateProfessor) => PartPolicy {
            factor: 0.818,
            max: 360.0,
        },
        (PartId::A, AssistantProfessor) => PartPolicy {
            factor: 1.0,
            max: 440.0,
        },
        (PartId::B, Professor) => PartPolicy::capped(370.0),
        (PartId::B, AssociateProfessor) => PartPolicy::capped(300.0),
        (PartId::B, AssistantProfessor) => PartPolicy::capped(210.0),
        (PartId::C, Professor) => PartPolicy::capped(160.0),
        (PartId::C, AssociateProfessor) => PartPolicy::capped(170.0),
        (PartId::C, AssistantProfessor) => PartPolicy::capped(180.0),
        (PartId::D, _) => PartPolicy::capped(PORTFOLIO_MAX),
        (PartId::E, _) => PartPolicy::capped(EXTRAORDINARY_MAX),
    }
}

/// Weekly contact hours expected of each rank; the teaching-load denominator.
pub const fn minimum_teaching_load(designation: Designation) -> f64 {
    match designation {
        Designation::Professor => 12.0,
        Designation::AssociateProfessor => 14.0,
        Designation::AssistantProfessor => 16.0,
    }
}

/// Highest total a designation can reach across all five parts.
pub fn appraisal_max(designation: Designation) -> f64 {
    PartId::ordered()
        .into_iter()
        .map(|part| part_policy(part, designation).max)
        .sum()
}

/// How the dean's evaluation of a portfolio splits the superior weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuperiorWeighting {
    /// Associate deans report to both HOD and Dean: each counts half.
    SplitHodDean,
    /// Everyone else: the Dean's rating at full weight.
    DeanOnly,
}

impl SuperiorWeighting {
    pub fn for_ratee(profile: &FacultyProfile) -> Self {
        match profile.administrative_role {
            Some(AdministrativeRole::AssociateDean) => Self::SplitHodDean,
            _ => Self::DeanOnly,
        }
    }
}

/// Which superior's marks replace the HOD/Dean marks for administrative staff.
pub fn administrative_rater(role: AdministrativeRole) -> AdministrativeRater {
    match role {
        AdministrativeRole::AssociateDean => AdministrativeRater::Dean,
        _ => AdministrativeRater::Director,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdministrativeRater {
    Dean,
    Director,
}

/// Sections that must be non-zero before a form may be submitted.
pub const MANDATORY_SECTIONS: &[(PartId, &str)] = &[
    (PartId::A, "teachingLoad"),
    (PartId::A, "resultAnalysis"),
    (PartId::A, "courseOutcome"),
    (PartId::A, "academicEngagement"),
    (PartId::A, "studentFeedback"),
    (PartId::D, "selfAwardedMarks"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_designation_totals_one_thousand() {
        for designation in Designation::ordered() {
            assert_eq!(appraisal_max(designation), 1000.0, "{designation:?}");
        }
    }

    #[test]
    fn part_a_factor_then_cap() {
        let professor = part_policy(PartId::A, Designation::Professor);
        assert!((professor.apply(400.0) - 272.0).abs() < 1e-9);
        assert_eq!(professor.apply(500.0), 300.0);

        let assistant = part_policy(PartId::A, Designation::AssistantProfessor);
        assert_eq!(assistant.apply(440.0), 440.0);
        assert_eq!(assistant.apply(-5.0), 0.0);
    }

    #[test]
    fn associate_dean_splits_superior_weight() {
        let associate_dean =
            FacultyProfile::with_role(Designation::Professor, AdministrativeRole::AssociateDean);
        let hod = FacultyProfile::with_role(Designation::Professor, AdministrativeRole::Hod);
        assert_eq!(
            SuperiorWeighting::for_ratee(&associate_dean),
            SuperiorWeighting::SplitHodDean
        );
        assert_eq!(SuperiorWeighting::for_ratee(&hod), SuperiorWeighting::DeanOnly);
        assert_eq!(
            SuperiorWeighting::for_ratee(&FacultyProfile::academic(Designation::Professor)),
            SuperiorWeighting::DeanOnly
        );
    }
}
