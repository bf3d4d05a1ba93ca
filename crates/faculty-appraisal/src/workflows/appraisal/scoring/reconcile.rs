//! Combining self-awarded portfolio marks with superior ratings.

use super::normalizer::non_negative;
use super::policy::{
    administrative_rater, part_policy, AdministrativeRater, SuperiorWeighting, PORTFOLIO_MAX,
};
use super::sections::PartDSection;
use super::{PartScore, SectionMark};
use crate::workflows::appraisal::domain::{Designation, PartId};
use crate::workflows::appraisal::forms::{DeanEvaluation, PortfolioEvaluation, PortfolioType};

fn marks(value: Option<f64>) -> f64 {
    value.map(non_negative).unwrap_or(0.0)
}

/// The faculty member's own marks: the administrative self-assessment for
/// staff holding an administrative post.
pub fn self_marks(evaluation: &PortfolioEvaluation) -> f64 {
    match &evaluation.administrative {
        Some(administrative) => non_negative(administrative.self_awarded_marks),
        None => non_negative(evaluation.self_awarded_marks),
    }
}

/// Superior marks after role substitution and portfolio-type averaging.
/// Ratings not yet entered count as zero.
pub fn superior_marks(evaluation: &PortfolioEvaluation) -> f64 {
    if let Some(administrative) = &evaluation.administrative {
        return match administrative_rater(administrative.role) {
            AdministrativeRater::Dean => marks(administrative.admin_dean_marks),
            AdministrativeRater::Director => marks(administrative.director_marks),
        };
    }

    match evaluation.portfolio_type {
        PortfolioType::Both => (marks(evaluation.dean_marks) + marks(evaluation.hod_marks)) / 2.0,
        PortfolioType::Institute => marks(evaluation.dean_marks),
        PortfolioType::Department => marks(evaluation.hod_marks),
    }
}

/// `min(120, min(60, self) + min(60, superior))`.
pub fn score_part_d(evaluation: &PortfolioEvaluation) -> PartScore {
    let sections = vec![
        SectionMark::resolve(PartDSection::SelfAwardedMarks, self_marks(evaluation), None),
        SectionMark::resolve(PartDSection::SuperiorMarks, superior_marks(evaluation), None),
    ];
    PartScore::from_sections(
        PartId::D,
        sections,
        part_policy(PartId::D, Designation::AssistantProfessor),
    )
}

/// Total of a dean's evaluation: associate deans get `self + hod/2 + dean/2`,
/// everyone else `self + dean`, both capped at 120.
pub fn dean_evaluation_total(weighting: SuperiorWeighting, evaluation: &DeanEvaluation) -> f64 {
    let own = non_negative(evaluation.self_marks);
    let hod = non_negative(evaluation.hod_marks);
    let dean = non_negative(evaluation.dean_marks);
    let total = match weighting {
        SuperiorWeighting::SplitHodDean => own + hod / 2.0 + dean / 2.0,
        SuperiorWeighting::DeanOnly => own + dean,
    };
    total.min(PORTFOLIO_MAX)
}

/// Keep the faculty member's own fields from `incoming` and every superior
/// rating from `stored`, so a self-service save can never alter them.
pub fn merge_self_assessment(
    stored: Option<&PortfolioEvaluation>,
    incoming: PortfolioEvaluation,
) -> PortfolioEvaluation {
    let Some(stored) = stored else {
        return PortfolioEvaluation {
            hod_marks: None,
            dean_marks: None,
            dean_evaluation: None,
            administrative: incoming.administrative.map(|mut administrative| {
                administrative.director_marks = None;
                administrative.admin_dean_marks = None;
                administrative
            }),
            ..incoming
        };
    };

    let administrative = incoming.administrative.map(|mut administrative| {
        let previous = stored
            .administrative
            .as_ref()
            .filter(|previous| previous.role == administrative.role);
        administrative.director_marks = previous.and_then(|previous| previous.director_marks);
        administrative.admin_dean_marks = previous.and_then(|previous| previous.admin_dean_marks);
        administrative
    });

    PortfolioEvaluation {
        hod_marks: stored.hod_marks,
        dean_marks: stored.dean_marks,
        dean_evaluation: stored.dean_evaluation,
        administrative,
        ..incoming
    }
}
