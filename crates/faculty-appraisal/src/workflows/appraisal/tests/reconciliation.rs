use super::common::*;
use crate::workflows::appraisal::domain::{AdministrativeRole, Designation, FacultyProfile};
use crate::workflows::appraisal::forms::{
    AdministrativePortfolio, DeanEvaluation, PortfolioEvaluation, PortfolioType,
};
use crate::workflows::appraisal::scoring::reconcile::{merge_self_assessment, self_marks};
use crate::workflows::appraisal::scoring::{
    dean_evaluation_total, score_part_d, superior_marks, SuperiorWeighting,
};

fn administrative(role: AdministrativeRole, own: f64, director: f64, dean: f64) -> PortfolioEvaluation {
    PortfolioEvaluation {
        self_awarded_marks: 10.0,
        hod_marks: Some(5.0),
        dean_marks: Some(5.0),
        administrative: Some(AdministrativePortfolio {
            role,
            self_awarded_marks: own,
            director_marks: Some(director),
            admin_dean_marks: Some(dean),
        }),
        ..PortfolioEvaluation::default()
    }
}

#[test]
fn both_portfolios_average_hod_and_dean() {
    let evaluation = portfolio(PortfolioType::Both, 45.0, Some(40.0), Some(50.0));
    assert_close(superior_marks(&evaluation), 45.0);
    assert_close(score_part_d(&evaluation).total, 90.0);
}

#[test]
fn portfolio_type_picks_the_rater() {
    let institute = portfolio(PortfolioType::Institute, 30.0, Some(10.0), Some(55.0));
    assert_close(superior_marks(&institute), 55.0);

    let department = portfolio(PortfolioType::Department, 30.0, Some(10.0), Some(55.0));
    assert_close(superior_marks(&department), 10.0);
}

#[test]
fn missing_superior_ratings_count_as_zero() {
    let evaluation = portfolio(PortfolioType::Both, 50.0, None, Some(40.0));
    assert_close(superior_marks(&evaluation), 20.0);
    assert_close(score_part_d(&evaluation).total, 70.0);
}

#[test]
fn each_share_is_capped_at_sixty() {
    let evaluation = portfolio(PortfolioType::Institute, 95.0, None, Some(75.0));
    let score = score_part_d(&evaluation);
    assert_close(score.section_marks("selfAwardedMarks"), 60.0);
    assert_close(score.section_marks("superiorMarks"), 60.0);
    assert_close(score.total, 120.0);
}

#[test]
fn administrative_staff_are_rated_by_their_role_superior() {
    let associate_dean = administrative(AdministrativeRole::AssociateDean, 35.0, 20.0, 48.0);
    assert_close(self_marks(&associate_dean), 35.0);
    assert_close(superior_marks(&associate_dean), 48.0);
    assert_close(score_part_d(&associate_dean).total, 83.0);

    let hod = administrative(AdministrativeRole::Hod, 35.0, 20.0, 48.0);
    assert_close(superior_marks(&hod), 20.0);
    assert_close(score_part_d(&hod).total, 55.0);
}

#[test]
fn dean_evaluation_splits_weight_for_associate_deans_only() {
    let evaluation = DeanEvaluation {
        self_marks: 50.0,
        hod_marks: 30.0,
        dean_marks: 40.0,
    };

    let associate_dean = FacultyProfile::with_role(
        Designation::AssociateProfessor,
        AdministrativeRole::AssociateDean,
    );
    let weighting = SuperiorWeighting::for_ratee(&associate_dean);
    assert_eq!(weighting, SuperiorWeighting::SplitHodDean);
    assert_close(dean_evaluation_total(weighting, &evaluation), 85.0);

    let hod = FacultyProfile::with_role(Designation::Professor, AdministrativeRole::Hod);
    let weighting = SuperiorWeighting::for_ratee(&hod);
    assert_eq!(weighting, SuperiorWeighting::DeanOnly);
    assert_close(dean_evaluation_total(weighting, &evaluation), 90.0);
}

#[test]
fn dean_evaluation_is_capped() {
    let evaluation = DeanEvaluation {
        self_marks: 80.0,
        hod_marks: 0.0,
        dean_marks: 70.0,
    };
    assert_close(
        dean_evaluation_total(SuperiorWeighting::DeanOnly, &evaluation),
        120.0,
    );
}

#[test]
fn self_assessment_cannot_overwrite_superior_ratings() {
    let mut stored = portfolio(PortfolioType::Both, 20.0, Some(40.0), Some(50.0));
    stored.dean_evaluation = Some(DeanEvaluation {
        self_marks: 20.0,
        hod_marks: 40.0,
        dean_marks: 50.0,
    });

    let incoming = portfolio(PortfolioType::Both, 45.0, Some(60.0), Some(60.0));
    let merged = merge_self_assessment(Some(&stored), incoming);

    assert_close(merged.self_awarded_marks, 45.0);
    assert_eq!(merged.hod_marks, Some(40.0));
    assert_eq!(merged.dean_marks, Some(50.0));
    assert_eq!(merged.dean_evaluation, stored.dean_evaluation);
}

#[test]
fn first_self_assessment_drops_superior_fields() {
    let incoming = administrative(AdministrativeRole::Director, 30.0, 60.0, 60.0);
    let merged = merge_self_assessment(None, incoming);

    assert_eq!(merged.hod_marks, None);
    assert_eq!(merged.dean_marks, None);
    let administrative = merged.administrative.expect("administrative block kept");
    assert_close(administrative.self_awarded_marks, 30.0);
    assert_eq!(administrative.director_marks, None);
    assert_eq!(administrative.admin_dean_marks, None);
}
