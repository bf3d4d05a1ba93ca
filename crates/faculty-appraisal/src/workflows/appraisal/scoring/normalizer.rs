//! Formulas that turn raw activity counts into section marks.
//!
//! Nothing here fails: NaN, infinite and negative inputs count as zero and
//! zero denominators contribute nothing. Callers clamp results to the section
//! cap through [`clamp_score`], which saturates products that overflow to
//! infinity so the part cap still applies.

use super::sections::{ClaimRule, AMOUNT_CATEGORY};
use crate::workflows::appraisal::forms::{
    CourseMetric, MetricData, PhdGuidance, PhdStage, SectionClaims, TrainingCounts,
};

/// Which value of a [`MetricData`] a research score is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimBasis {
    /// Faculty-claimed `value`; the only basis used when saving a part.
    Claimed,
    /// Committee `verified` value, falling back to the claim when unverified.
    Verified,
}

pub(crate) const PHD_SCHOLAR_BONUS: f64 = 2.0;

pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Clamp a score into `[0, max]`; `None` bounds it only by `f64::MAX`.
pub fn clamp_score(value: f64, max: Option<f64>) -> f64 {
    let value = if value.is_nan() { 0.0 } else { value.max(0.0) };
    value.min(max.unwrap_or(f64::MAX))
}

fn average(scores: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = scores.fold((0.0, 0usize), |(sum, count), score| {
        (sum + score, count + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// `value / denominator`, or zero when the denominator is not positive.
fn ratio(value: f64, denominator: f64) -> f64 {
    let denominator = non_negative(denominator);
    if denominator == 0.0 {
        0.0
    } else {
        non_negative(value) / denominator
    }
}

pub fn course_result_analysis(course: &CourseMetric) -> f64 {
    let weighted = non_negative(course.above_60) * 5.0
        + non_negative(course.between_50_60) * 4.0
        + non_negative(course.between_40_50) * 3.0;
    clamp_score(10.0 * ratio(weighted, course.total_students), Some(50.0))
}

pub fn result_analysis(courses: &[CourseMetric]) -> f64 {
    average(courses.iter().map(course_result_analysis))
}

pub fn course_outcome_score(course: &CourseMetric) -> f64 {
    let timely = if course.timely_submission { 20.0 } else { 0.0 };
    let attainment = non_negative(course.co_attainment).min(100.0);
    clamp_score(timely + attainment * 30.0 / 100.0, Some(50.0))
}

pub fn course_outcome(courses: &[CourseMetric]) -> f64 {
    average(courses.iter().map(course_outcome_score))
}

pub fn course_engagement(course: &CourseMetric) -> f64 {
    clamp_score(50.0 * ratio(course.present, course.enrolled), Some(50.0))
}

pub fn academic_engagement(courses: &[CourseMetric]) -> f64 {
    average(courses.iter().map(course_engagement))
}

pub fn student_feedback(courses: &[CourseMetric]) -> f64 {
    average(
        courses
            .iter()
            .map(|course| non_negative(course.feedback_percent).min(100.0)),
    )
}

/// `50 × (average weekly load + PhD bonus) / minimum load`, capped at 50.
pub fn teaching_load(sem1: f64, sem2: f64, phd_scholar: bool, minimum_load: f64) -> f64 {
    let average_load = (non_negative(sem1) + non_negative(sem2)) / 2.0;
    let bonus = if phd_scholar { PHD_SCHOLAR_BONUS } else { 0.0 };
    clamp_score(50.0 * ratio(average_load + bonus, minimum_load), Some(50.0))
}

pub fn linear(count: f64, weight: f64) -> f64 {
    non_negative(count) * weight
}

fn basis_value(data: &MetricData, basis: ClaimBasis) -> f64 {
    match basis {
        ClaimBasis::Claimed => non_negative(data.value),
        ClaimBasis::Verified => non_negative(data.verified.unwrap_or(data.value)),
    }
}

/// Uncapped research marks for one section's claims.
pub fn research_claims(claims: &SectionClaims, rule: ClaimRule, basis: ClaimBasis) -> f64 {
    match rule {
        ClaimRule::Weighted(weights) => weights
            .iter()
            .filter_map(|(category, weight)| {
                claims
                    .get(*category)
                    .map(|data| basis_value(data, basis) * weight)
            })
            .sum(),
        ClaimRule::Amount { marks, per } => claims
            .get(AMOUNT_CATEGORY)
            .map(|data| basis_value(data, basis) * marks / per)
            .unwrap_or(0.0),
    }
}

pub fn qualification(stage: PhdStage) -> f64 {
    match stage {
        PhdStage::Awarded => 40.0,
        PhdStage::Pursuing => 20.0,
        PhdStage::None => 0.0,
    }
}

pub fn training(counts: &TrainingCounts) -> f64 {
    linear(counts.two_week, 20.0) + linear(counts.one_week, 10.0) + linear(counts.short_term, 5.0)
}

pub fn phd_guided(guidance: &PhdGuidance) -> f64 {
    linear(guidance.awarded, 50.0)
        + linear(guidance.submitted, 25.0)
        + linear(guidance.ongoing, 10.0)
}
