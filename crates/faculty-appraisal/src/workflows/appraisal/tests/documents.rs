use serde_json::{json, Value};

use super::common::*;
use crate::workflows::appraisal::documents::{
    AppraisalDocument, PartDocument, StoredFlag, StoredNumber, StoredPartB, StoredPartD,
};
use crate::workflows::appraisal::domain::{
    AdministrativeRole, Designation, FacultyProfile, FormStatus, PartId,
};
use crate::workflows::appraisal::forms::{PartInputs, PortfolioType};
use crate::workflows::appraisal::scoring::sections::{PartASection, PartBSection};
use crate::workflows::appraisal::scoring::{score_part_b, ClaimBasis, ScoringEngine};

fn number(value: Value) -> f64 {
    serde_json::from_value::<StoredNumber>(value)
        .expect("lenient number")
        .as_f64()
}

fn flag(value: Value) -> bool {
    serde_json::from_value::<StoredFlag>(value)
        .expect("lenient flag")
        .0
}

#[test]
fn numbers_accept_numeric_strings() {
    assert_close(number(json!(12)), 12.0);
    assert_close(number(json!("12.50")), 12.5);
    assert_close(number(json!(" 7 ")), 7.0);
    assert_close(number(json!("2,00,000")), 200_000.0);
    assert_close(number(json!("")), 0.0);
    assert_close(number(json!("n/a")), 0.0);
    assert_close(number(Value::Null), 0.0);
}

#[test]
fn flags_accept_loose_truthy_values() {
    assert!(flag(json!(true)));
    assert!(flag(json!("yes")));
    assert!(flag(json!(1)));
    assert!(!flag(json!("false")));
    assert!(!flag(json!(0)));
    assert!(!flag(Value::Null));
}

#[test]
fn integral_values_are_written_as_integers() {
    assert_eq!(serde_json::to_string(&StoredNumber::from_f64(40.0)).expect("serialize"), "40");
    assert_eq!(serde_json::to_string(&StoredNumber::from_f64(35.6)).expect("serialize"), "35.6");
    assert_eq!(serde_json::to_string(&StoredNumber::from_f64(f64::NAN)).expect("serialize"), "0");
}

#[test]
fn part_b_round_trip_preserves_claims_and_recomputes_totals() {
    let stored = json!({
        "sections": {
            "journals": {
                "sci": { "value": 2, "proof": "https://doi.org/10.1000/j1" },
                "scopus": { "value": 1, "proof": "https://doi.org/10.1000/j2", "verified": 1 }
            },
            "citations": {
                "scholar": { "value": 4.5, "proof": "https://scholar.example/profile" }
            },
            "researchGrants": {
                "amount": { "value": 300000, "proof": "sanction-letter.pdf" }
            }
        },
        "sectionMarks": { "journals": 999 },
        "totalClaimed": 999,
        "totalMarks": 1
    });

    let document: StoredPartB = serde_json::from_value(stored.clone()).expect("stored part B");
    let inputs = document.decode();
    let score = score_part_b(&inputs, Designation::AssociateProfessor, ClaimBasis::Claimed);
    let encoded = StoredPartB::encode(&inputs, &score);
    let written = serde_json::to_value(&encoded).expect("serialize");

    assert_eq!(written["sections"], stored["sections"]);
    assert_eq!(
        serde_json::to_string(&written["sections"]).expect("serialize"),
        serde_json::to_string(&stored["sections"]).expect("serialize")
    );

    let fresh = score_part_b(
        &encoded.decode(),
        Designation::AssociateProfessor,
        ClaimBasis::Claimed,
    );
    assert_close(encoded.total_claimed.as_f64(), fresh.raw_total);
    assert_close(fresh.raw_total, 250.0 + 1.5 + 15.0);
    assert_eq!(written["sectionMarks"]["journals"], json!(250));
}

#[test]
fn numeric_strings_are_normalised_on_write() {
    let stored = json!({
        "sections": { "journals": { "ugc": { "value": "3", "proof": "" } } }
    });
    let document: StoredPartB = serde_json::from_value(stored).expect("stored part B");
    let inputs = document.decode();
    assert_close(inputs.claims(PartBSection::Journals).expect("claims")["ugc"].value, 3.0);

    let score = score_part_b(&inputs, Designation::Professor, ClaimBasis::Claimed);
    let written = serde_json::to_value(StoredPartB::encode(&inputs, &score)).expect("serialize");
    assert_eq!(written["sections"]["journals"]["ugc"]["value"], json!(3));
    assert_eq!(written["totalMarks"], json!(30));
}

#[test]
fn unknown_sections_are_dropped_and_disabled_manual_entries_ignored() {
    let stored = json!({
        "sections": { "podcasts": { "episodes": { "value": 10, "proof": "" } } },
        "manual": {
            "journals": { "enabled": "true", "marks": "45" },
            "books": { "enabled": false, "marks": 80 }
        }
    });
    let inputs = serde_json::from_value::<StoredPartB>(stored)
        .expect("stored part B")
        .decode();

    assert!(inputs.sections.is_empty());
    assert_eq!(inputs.manual.get(PartBSection::Journals), Some(45.0));
    assert_eq!(inputs.manual.get(PartBSection::Books), None);
}

#[test]
fn administrative_fields_map_through_the_flag() {
    let profile = FacultyProfile::with_role(Designation::Professor, AdministrativeRole::AssociateDean);
    let stored = json!({
        "portfolioType": "both",
        "selfAwardedMarks": "20",
        "hodMarks": 30,
        "isAdministrativeRole": "yes",
        "administrativeRole": "Associate Dean",
        "adminSelfAwardedMarks": 42,
        "adminDeanMarks": "51",
        "deanEvaluation": { "selfMarks": 50, "hodMarks": 30, "deanMarks": 40 }
    });

    let evaluation = serde_json::from_value::<StoredPartD>(stored)
        .expect("stored part D")
        .decode();
    assert_eq!(evaluation.portfolio_type, PortfolioType::Both);
    assert_eq!(evaluation.dean_marks, None);
    let administrative = evaluation.administrative.clone().expect("administrative block");
    assert_eq!(administrative.role, AdministrativeRole::AssociateDean);
    assert_eq!(administrative.admin_dean_marks, Some(51.0));

    let written = serde_json::to_value(encoded(PartInputs::D(evaluation), &profile)).expect("serialize");
    assert_eq!(written["isAdministrativeRole"], json!(true));
    assert_eq!(written["administrativeRole"], json!("Associate Dean"));
    assert_eq!(written["totalMarks"], json!(93));
    assert_eq!(written["deanEvaluation"]["totalMarks"], json!(85));
    assert!(written.get("deanMarks").is_none());
}

#[test]
fn flag_without_role_is_not_administrative() {
    let stored = json!({ "isAdministrativeRole": true, "selfAwardedMarks": 25 });
    let evaluation = serde_json::from_value::<StoredPartD>(stored)
        .expect("stored part D")
        .decode();
    assert!(evaluation.administrative.is_none());
    assert_close(evaluation.self_awarded_marks, 25.0);
}

#[test]
fn appraisal_document_reads_backend_shape() {
    let raw = json!({
        "facultyId": "fac-042",
        "department": "Mechanical Engineering",
        "designation": "Associate Professor",
        "status": "UNDER_AUDIT",
        "partStatus": { "partD": "SUBMITTED" },
        "version": "17",
        "updatedAt": "2026-03-14T09:30:00Z",
        "partA": {
            "courses": [{ "courseCode": "ME210", "semester": "Sem II", "totalStudents": "30",
                          "above60": 10, "timelySubmission": "yes" }],
            "weeklyLoadSem1": "14",
            "manual": { "ptgMeetings": { "enabled": true, "marks": 25 } },
            "totalMarks": 0
        }
    });

    let document: AppraisalDocument = serde_json::from_value(raw).expect("document");
    assert_eq!(document.status, FormStatus::Other("UNDER_AUDIT".to_string()));
    assert!(document.updated_at.is_some());
    let snapshot = document.snapshot();
    assert_eq!(snapshot.for_part(PartId::D), &FormStatus::Submitted);
    assert_eq!(document.profile().administrative_role, None);

    let inputs = document.inputs();
    let part_a = inputs.part_a.expect("part A decoded");
    assert_close(part_a.courses[0].total_students, 30.0);
    assert!(part_a.courses[0].timely_submission);
    assert_close(part_a.weekly_load_sem1, 14.0);
    assert_eq!(part_a.manual.get(PartASection::PtgMeetings), Some(25.0));
    assert!(inputs.part_b.is_none());

    let stored = document.part(PartId::A).expect("part A stored");
    assert_eq!(stored.part(), PartId::A);
    assert_close(stored.stored_total(), 0.0);
}

#[test]
fn encoded_parts_carry_recomputed_section_marks() {
    let profile = assistant();
    let document = encoded(PartInputs::A(part_a()), &profile);
    let PartDocument::A(stored) = &document else {
        panic!("expected part A document");
    };
    assert_close(stored.section_marks["resultAnalysis"].as_f64(), 35.6);
    assert_close(stored.total_marks.as_f64(), 325.1);

    let rescored = ScoringEngine::new(profile).score(&document.decode());
    assert_close(rescored.total, document.stored_total());
}
